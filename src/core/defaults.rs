use crate::compare::MatchMethod;
use crate::config::Settings;
use crate::layout::LayoutKind;
use crate::rule::ClientRule;
use crate::rule::WorkspaceRule;

use winsys::input::Button;
use winsys::input::Modifier;
use winsys::input::MouseBinding;

#[macro_export]
macro_rules! WM_NAME (
    () => { "yaxwm" };
);

impl Settings {
    pub const BORDER_WIDTH: u32 = 1;
    pub const FOCUS_COLOR: u32 = 0xff6699cc;
    pub const UNFOCUS_COLOR: u32 = 0xff000000;
    pub const SMART_BORDERS: bool = true;
    pub const FOCUS_FOLLOWS_MOUSE: bool = true;
    pub const TILE_TO_HEAD: bool = false;
    pub const MOUSE_BINDING: MouseBinding = MouseBinding {
        modifier: Modifier::Alt,
        move_button: Button::Left,
        resize_button: Button::Right,
    };

    /// Minimum interval between handled motion events, in milliseconds.
    pub const MOTION_INTERVAL: u32 = 1000 / 60;
}

macro_rules! workspace_rules {
    ($($name:literal),+) => {
        [$(
            WorkspaceRule {
                name: $name,
                nmaster: 1,
                nstack: 3,
                gap: 0,
                split: 0.5,
                layout: LayoutKind::Tile,
            },
        )+]
    };
}

pub const WORKSPACE_RULES: [WorkspaceRule; 10] =
    workspace_rules!("1", "2", "3", "4", "5", "6", "7", "8", "9", "10");

pub const CLIENT_RULES: [ClientRule; 4] = [
    ClientRule {
        pattern: MatchMethod::Equals("mpv"),
        workspace: None,
        monitor: None,
        float: true,
    },
    ClientRule {
        pattern: MatchMethod::Contains("gimp"),
        workspace: None,
        monitor: None,
        float: true,
    },
    ClientRule {
        pattern: MatchMethod::Equals("pavucontrol"),
        workspace: None,
        monitor: None,
        float: true,
    },
    ClientRule {
        pattern: MatchMethod::Equals("firefox"),
        workspace: Some(1),
        monitor: None,
        float: false,
    },
];
