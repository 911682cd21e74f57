use crate::geometry::Pos;
use crate::geometry::Region;
use crate::input::MouseEvent;
use crate::window::Window;
use crate::window::WindowState;

#[derive(Debug, Clone)]
pub enum Event {
    Mouse {
        event: MouseEvent,
    },
    MapRequest {
        window: Window,
        ignore: bool,
    },
    Enter {
        window: Window,
        root_rpos: Pos,
    },
    FocusIn {
        window: Window,
    },
    Destroy {
        window: Window,
    },
    Unmap {
        window: Window,
        synthetic: bool,
    },
    ConfigureRequest {
        request: ConfigureRequest,
    },
    Configure {
        window: Window,
        region: Region,
        on_root: bool,
    },
    StateRequest {
        window: Window,
        state: WindowState,
        action: ToggleAction,
        on_root: bool,
    },
    FocusRequest {
        window: Window,
        on_root: bool,
    },
    CloseRequest {
        window: Window,
        on_root: bool,
    },
    WorkspaceRequest {
        window: Option<Window>,
        index: usize,
        on_root: bool,
    },
    Property {
        window: Window,
        kind: PropertyKind,
        on_root: bool,
    },
    ScreenChange,
    ProtocolError {
        code: u8,
        major: u8,
    },
}

/// A configure request with only the fields the client asked to change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub window: Window,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
    pub border_width: Option<u32>,
    pub sibling: Option<Window>,
    pub stack_mode: Option<StackMode>,
}

impl ConfigureRequest {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            x: None,
            y: None,
            w: None,
            h: None,
            border_width: None,
            sibling: None,
            stack_mode: None,
        }
    }

    pub fn changes_position_only(&self) -> bool {
        (self.x.is_some() || self.y.is_some()) && self.w.is_none() && self.h.is_none()
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum StackMode {
    Above,
    Below,
    TopIf,
    BottomIf,
    Opposite,
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum ToggleAction {
    Toggle,
    Add,
    Remove,
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum PropertyKind {
    TransientFor,
    NormalHints,
    Hints,
    WindowType,
    Strut,
}
