use winsys::event::ToggleAction;

use std::ops::Add;
use std::ops::Mul;
use std::ops::Sub;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
    Reverse,
}

impl From<ToggleAction> for Toggle {
    #[inline(always)]
    fn from(action: ToggleAction) -> Self {
        match action {
            ToggleAction::Add => Toggle::On,
            ToggleAction::Remove => Toggle::Off,
            ToggleAction::Toggle => Toggle::Reverse,
        }
    }
}

impl Toggle {
    #[inline(always)]
    pub fn eval(
        self,
        current: bool,
    ) -> bool {
        match self {
            Toggle::On => true,
            Toggle::Off => false,
            Toggle::Reverse => !current,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Splits a signed step count into a direction and a repeat count.
    pub fn from_steps(steps: i32) -> Option<(Self, u32)> {
        match steps {
            0 => None,
            n if n > 0 => Some((Self::Forward, n as u32)),
            n => Some((Self::Backward, n.wrapping_neg() as u32)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Change<T>
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    Inc(T),
    Dec(T),
}

impl Change<i32> {
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta {
            0 => None,
            d if d > 0 => Some(Change::Inc(d)),
            d => Some(Change::Dec(d.saturating_neg())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_actions() {
        assert!(Toggle::from(ToggleAction::Add).eval(false));
        assert!(!Toggle::from(ToggleAction::Remove).eval(true));
        assert!(Toggle::from(ToggleAction::Toggle).eval(false));
        assert!(!Toggle::from(ToggleAction::Toggle).eval(true));
    }

    #[test]
    fn steps_split_into_direction() {
        assert_eq!(Direction::from_steps(0), None);
        assert_eq!(Direction::from_steps(3), Some((Direction::Forward, 3)));
        assert_eq!(Direction::from_steps(-2), Some((Direction::Backward, 2)));
        assert_eq!(Direction::from_steps(i32::MIN), Some((Direction::Backward, 1 << 31)));
        assert_eq!(Change::from_delta(-4), Some(Change::Dec(4)));
        assert_eq!(Change::from_delta(i32::MIN), Some(Change::Dec(i32::MAX)));
    }
}
