pub use crate::input::*;

use std::collections::HashSet;

use x11rb::protocol::xproto::ButtonIndex;
use x11rb::protocol::xproto::ModMask;

impl From<Modifier> for u16 {
    fn from(modifier: Modifier) -> u16 {
        u16::from(match modifier {
            Modifier::Ctrl => ModMask::CONTROL,
            Modifier::Shift => ModMask::SHIFT,
            Modifier::Alt => ModMask::M1,
            Modifier::Super => ModMask::M4,
        })
    }
}

impl From<Button> for u8 {
    fn from(button: Button) -> u8 {
        match button {
            Button::Left => 1,
            Button::Middle => 2,
            Button::Right => 3,
        }
    }
}

impl From<Button> for ButtonIndex {
    fn from(button: Button) -> ButtonIndex {
        match button {
            Button::Left => ButtonIndex::M1,
            Button::Middle => ButtonIndex::M2,
            Button::Right => ButtonIndex::M3,
        }
    }
}

impl Button {
    pub fn from_detail(detail: u8) -> Option<Self> {
        match detail {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Decodes a key/button state mask, dropping lock modifiers.
pub fn modifiers_from_state(state: u16) -> HashSet<Modifier> {
    let mut modifiers = HashSet::new();

    if state & u16::from(ModMask::CONTROL) > 0 {
        modifiers.insert(Modifier::Ctrl);
    }

    if state & u16::from(ModMask::SHIFT) > 0 {
        modifiers.insert(Modifier::Shift);
    }

    if state & u16::from(ModMask::M1) > 0 {
        modifiers.insert(Modifier::Alt);
    }

    if state & u16::from(ModMask::M4) > 0 {
        modifiers.insert(Modifier::Super);
    }

    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_modifiers_are_ignored() {
        let state = u16::from(ModMask::M1) | u16::from(ModMask::M2) | u16::from(ModMask::LOCK);
        let modifiers = modifiers_from_state(state);

        assert_eq!(modifiers.len(), 1);
        assert!(modifiers.contains(&Modifier::Alt));
    }
}
