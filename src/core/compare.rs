#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchMethod<T> {
    Equals(T),
    Contains(T),
}

impl MatchMethod<&str> {
    /// Case-insensitive comparison against a window class or instance.
    pub fn matches(
        &self,
        value: &str,
    ) -> bool {
        let value = value.to_lowercase();

        match self {
            MatchMethod::Equals(pattern) => value == pattern.to_lowercase(),
            MatchMethod::Contains(pattern) => value.contains(&pattern.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert!(MatchMethod::Equals("Firefox").matches("firefox"));
        assert!(!MatchMethod::Equals("fire").matches("firefox"));
        assert!(MatchMethod::Contains("gimp").matches("Gimp-2.10"));
    }
}
