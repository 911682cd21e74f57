use crate::geometry::Pos;
use crate::window::Window;

use std::collections::HashSet;

use strum::EnumIter;
use strum::EnumString;

#[derive(Debug, PartialEq, EnumIter, EnumString, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum Modifier {
    #[strum(serialize = "ctrl", serialize = "control")]
    Ctrl,
    #[strum(serialize = "shift")]
    Shift,
    #[strum(serialize = "alt", serialize = "mod1")]
    Alt,
    #[strum(serialize = "super", serialize = "mod4")]
    Super,
}

#[derive(Debug, PartialEq, EnumIter, EnumString, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum Button {
    #[strum(serialize = "button1")]
    Left,
    #[strum(serialize = "button2")]
    Middle,
    #[strum(serialize = "button3")]
    Right,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    Motion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub window: Option<Window>,
    pub button: Option<Button>,
    pub modifiers: HashSet<Modifier>,
    pub root_rpos: Pos,
    pub time: u32,
}

impl MouseEvent {
    pub fn has_only(
        &self,
        modifier: Modifier,
    ) -> bool {
        self.modifiers.len() == 1 && self.modifiers.contains(&modifier)
    }
}

/// The modifier and buttons that start an interactive move or resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseBinding {
    pub modifier: Modifier,
    pub move_button: Button,
    pub resize_button: Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    Move,
    Resize,
}

impl MouseBinding {
    pub fn grab_for(
        &self,
        event: &MouseEvent,
    ) -> Option<Grab> {
        if !event.has_only(self.modifier) {
            return None;
        }

        match event.button {
            Some(button) if button == self.move_button => Some(Grab::Move),
            Some(button) if button == self.resize_button => Some(Grab::Resize),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    fn press(
        button: Button,
        modifiers: &[Modifier],
    ) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Press,
            window: Some(0x200001),
            button: Some(button),
            modifiers: modifiers.iter().copied().collect(),
            root_rpos: Pos::default(),
            time: 0,
        }
    }

    #[test]
    fn modifier_names() {
        assert_eq!(Modifier::from_str("mod1"), Ok(Modifier::Alt));
        assert_eq!(Modifier::from_str("super"), Ok(Modifier::Super));
        assert_eq!(Modifier::from_str("control"), Ok(Modifier::Ctrl));
        assert!(Modifier::from_str("hyper").is_err());
        assert_eq!(Button::from_str("button3"), Ok(Button::Right));
    }

    #[test]
    fn binding_requires_exact_modifier() {
        let binding = MouseBinding {
            modifier: Modifier::Alt,
            move_button: Button::Left,
            resize_button: Button::Right,
        };

        assert_eq!(
            binding.grab_for(&press(Button::Left, &[Modifier::Alt])),
            Some(Grab::Move)
        );
        assert_eq!(
            binding.grab_for(&press(Button::Right, &[Modifier::Alt])),
            Some(Grab::Resize)
        );
        assert_eq!(
            binding.grab_for(&press(Button::Left, &[Modifier::Alt, Modifier::Shift])),
            None
        );
        assert_eq!(binding.grab_for(&press(Button::Middle, &[Modifier::Alt])), None);
    }
}
