use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StateChangeError {
    EarlyStop,
    LimitReached,
    StateUnchanged,
    InvalidCaller,
}

/// A command line that could not be executed. The reply channel receives
/// the `Display` form of the first error on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    Invalid(String),
}

impl fmt::Display for CommandError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Unknown(token) => write!(f, "!invalid or unknown command: {}", token),
            Self::Invalid(token) => write!(f, "!invalid argument: {}", token),
        }
    }
}

impl std::error::Error for CommandError {}
