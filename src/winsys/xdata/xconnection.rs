use crate::connection::Connection;
use crate::event::ConfigureRequest;
use crate::event::Event;
use crate::event::PropertyKind;
use crate::event::StackMode;
use crate::event::ToggleAction;
use crate::geometry::Dim;
use crate::geometry::Extents;
use crate::geometry::Pos;
use crate::geometry::Region;
use crate::geometry::Strut;
use crate::hints::Hints;
use crate::hints::SizeHints;
use crate::input::Button;
use crate::input::Grab;
use crate::input::MouseBinding;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::screen::Output;
use crate::screen::OutputId;
use crate::window::IcccmWindowState;
use crate::window::Window;
use crate::window::WindowState;
use crate::window::WindowType;
use crate::xdata::input::modifiers_from_state;
use crate::Result;

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::VecDeque;

use x11rb::connection;
use x11rb::cursor::Handle as CursorHandle;
use x11rb::errors::ReplyError;
use x11rb::properties;
use x11rb::protocol::randr;
use x11rb::protocol::xproto;
use x11rb::protocol::xproto::ConnectionExt;
use x11rb::protocol::xproto::EventMask;
use x11rb::protocol::xproto::ModMask;
use x11rb::protocol::xproto::CLIENT_MESSAGE_EVENT;
use x11rb::protocol::ErrorKind;
use x11rb::protocol::Event as XEvent;
use x11rb::resource_manager::Database;
use x11rb::wrapper::ConnectionExt as _;

use anyhow::anyhow;

type Atom = u32;

const NUM_LOCK_KEYSYM: u32 = 0xff7f;

x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        Any,
        ATOM,
        CARDINAL,
        WINDOW,
        STRING,
        UTF8_STRING,

        // ICCCM client properties
        WM_NAME,
        WM_CLASS,
        WM_HINTS,
        WM_PROTOCOLS,
        WM_NORMAL_HINTS,
        WM_DELETE_WINDOW,
        WM_TRANSIENT_FOR,
        WM_TAKE_FOCUS,

        // ICCCM window manager properties
        WM_STATE,

        // EWMH root properties
        _NET_SUPPORTED,
        _NET_CLIENT_LIST,
        _NET_NUMBER_OF_DESKTOPS,
        _NET_DESKTOP_GEOMETRY,
        _NET_DESKTOP_VIEWPORT,
        _NET_CURRENT_DESKTOP,
        _NET_DESKTOP_NAMES,
        _NET_ACTIVE_WINDOW,
        _NET_WORKAREA,
        _NET_SUPPORTING_WM_CHECK,

        // EWMH root messages
        _NET_CLOSE_WINDOW,

        // EWMH application properties
        _NET_WM_NAME,
        _NET_WM_DESKTOP,
        _NET_WM_WINDOW_TYPE,
        _NET_WM_STATE,
        _NET_WM_STRUT,
        _NET_WM_STRUT_PARTIAL,
        _NET_FRAME_EXTENTS,

        // EWMH window states
        _NET_WM_STATE_MODAL,
        _NET_WM_STATE_STICKY,
        _NET_WM_STATE_HIDDEN,
        _NET_WM_STATE_FULLSCREEN,
        _NET_WM_STATE_ABOVE,
        _NET_WM_STATE_BELOW,
        _NET_WM_STATE_DEMANDS_ATTENTION,

        // EWMH window types
        _NET_WM_WINDOW_TYPE_DESKTOP,
        _NET_WM_WINDOW_TYPE_DOCK,
        _NET_WM_WINDOW_TYPE_TOOLBAR,
        _NET_WM_WINDOW_TYPE_MENU,
        _NET_WM_WINDOW_TYPE_UTILITY,
        _NET_WM_WINDOW_TYPE_SPLASH,
        _NET_WM_WINDOW_TYPE_DIALOG,
        _NET_WM_WINDOW_TYPE_DROPDOWN_MENU,
        _NET_WM_WINDOW_TYPE_POPUP_MENU,
        _NET_WM_WINDOW_TYPE_TOOLTIP,
        _NET_WM_WINDOW_TYPE_NOTIFICATION,
        _NET_WM_WINDOW_TYPE_COMBO,
        _NET_WM_WINDOW_TYPE_DND,
        _NET_WM_WINDOW_TYPE_NORMAL,
    }
}

struct Cursors {
    normal: xproto::Cursor,
    moving: xproto::Cursor,
    resizing: xproto::Cursor,
}

pub struct XConnection<'conn, Conn: connection::Connection> {
    conn: &'conn Conn,
    atoms: Atoms,
    type_map: HashMap<Atom, WindowType>,
    state_map: HashMap<Atom, WindowState>,
    screen: xproto::Screen,
    check_window: Window,
    cursors: Cursors,
    has_randr: bool,
    numlock_mask: u16,
    deferred: RefCell<VecDeque<XEvent>>,
    root_event_mask: EventMask,
    client_event_mask: EventMask,
    panel_event_mask: EventMask,
    button_event_mask: EventMask,
    grab_event_mask: EventMask,
}

impl<'conn, Conn: connection::Connection> XConnection<'conn, Conn> {
    pub fn new(
        conn: &'conn Conn,
        screen_num: usize,
    ) -> Result<Self> {
        let screen = conn.setup().roots[screen_num].clone();
        let root = screen.root;

        let aux = xproto::ChangeWindowAttributesAux::default()
            .event_mask(EventMask::SUBSTRUCTURE_REDIRECT);

        let res = conn.change_window_attributes(root, &aux)?.check();
        if let Err(ReplyError::X11Error(err)) = res {
            if err.error_kind == ErrorKind::Access {
                return Err(anyhow!("another window manager is already running"));
            } else {
                return Err(anyhow!("unable to set up window manager"));
            }
        }

        let atoms = Atoms::new(conn)?.reply()?;
        let check_window = conn.generate_id()?;

        let type_map: HashMap<Atom, WindowType> = map!(
            atoms._NET_WM_WINDOW_TYPE_DESKTOP => WindowType::Desktop,
            atoms._NET_WM_WINDOW_TYPE_DOCK => WindowType::Dock,
            atoms._NET_WM_WINDOW_TYPE_TOOLBAR => WindowType::Toolbar,
            atoms._NET_WM_WINDOW_TYPE_MENU => WindowType::Menu,
            atoms._NET_WM_WINDOW_TYPE_UTILITY => WindowType::Utility,
            atoms._NET_WM_WINDOW_TYPE_SPLASH => WindowType::Splash,
            atoms._NET_WM_WINDOW_TYPE_DIALOG => WindowType::Dialog,
            atoms._NET_WM_WINDOW_TYPE_DROPDOWN_MENU => WindowType::DropdownMenu,
            atoms._NET_WM_WINDOW_TYPE_POPUP_MENU => WindowType::PopupMenu,
            atoms._NET_WM_WINDOW_TYPE_TOOLTIP => WindowType::Tooltip,
            atoms._NET_WM_WINDOW_TYPE_NOTIFICATION => WindowType::Notification,
            atoms._NET_WM_WINDOW_TYPE_COMBO => WindowType::Combo,
            atoms._NET_WM_WINDOW_TYPE_DND => WindowType::Dnd,
            atoms._NET_WM_WINDOW_TYPE_NORMAL => WindowType::Normal,
        );

        let state_map: HashMap<Atom, WindowState> = map!(
            atoms._NET_WM_STATE_MODAL => WindowState::Modal,
            atoms._NET_WM_STATE_STICKY => WindowState::Sticky,
            atoms._NET_WM_STATE_HIDDEN => WindowState::Hidden,
            atoms._NET_WM_STATE_FULLSCREEN => WindowState::Fullscreen,
            atoms._NET_WM_STATE_ABOVE => WindowState::Above,
            atoms._NET_WM_STATE_BELOW => WindowState::Below,
            atoms._NET_WM_STATE_DEMANDS_ATTENTION => WindowState::DemandsAttention,
        );

        conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            check_window,
            root,
            -1,
            -1,
            1,
            1,
            0,
            xproto::WindowClass::INPUT_ONLY,
            x11rb::COPY_FROM_PARENT,
            &xproto::CreateWindowAux::default().override_redirect(1),
        )?;

        let has_randr = conn
            .extension_information(randr::X11_EXTENSION_NAME)
            .map_or(false, |info| info.is_some());

        if has_randr {
            randr::select_input(
                conn,
                root,
                randr::NotifyMask::OUTPUT_CHANGE
                    | randr::NotifyMask::CRTC_CHANGE
                    | randr::NotifyMask::SCREEN_CHANGE,
            )?;
        } else {
            warn!("RandR extension unavailable, falling back to a single output");
        }

        let mut cursors = Cursors {
            normal: x11rb::NONE,
            moving: x11rb::NONE,
            resizing: x11rb::NONE,
        };

        if let Ok(database) = Database::new_from_default(conn) {
            drop(
                CursorHandle::new(conn, screen_num, &database).map(|cookie| {
                    cookie.reply().map(|handle| {
                        cursors.normal = handle.load_cursor(conn, "left_ptr").unwrap_or(x11rb::NONE);
                        cursors.moving = handle.load_cursor(conn, "fleur").unwrap_or(x11rb::NONE);
                        cursors.resizing = handle.load_cursor(conn, "sizing").unwrap_or(x11rb::NONE);
                    })
                }),
            );
        }

        let numlock_mask = Self::numlock_mask(conn);

        let root_event_mask: EventMask = EventMask::SUBSTRUCTURE_REDIRECT
            | EventMask::SUBSTRUCTURE_NOTIFY
            | EventMask::BUTTON_PRESS
            | EventMask::POINTER_MOTION
            | EventMask::ENTER_WINDOW
            | EventMask::LEAVE_WINDOW
            | EventMask::STRUCTURE_NOTIFY
            | EventMask::PROPERTY_CHANGE;

        let client_event_mask: EventMask = EventMask::ENTER_WINDOW
            | EventMask::FOCUS_CHANGE
            | EventMask::PROPERTY_CHANGE
            | EventMask::STRUCTURE_NOTIFY;

        let panel_event_mask: EventMask = EventMask::PROPERTY_CHANGE | EventMask::STRUCTURE_NOTIFY;

        let button_event_mask: EventMask = EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE;

        let grab_event_mask: EventMask =
            EventMask::BUTTON_RELEASE | EventMask::BUTTON_MOTION | EventMask::POINTER_MOTION;

        drop(conn.change_window_attributes(
            root,
            &xproto::ChangeWindowAttributesAux::default()
                .event_mask(root_event_mask)
                .cursor(cursors.normal),
        ));

        Ok(Self {
            conn,
            atoms,
            type_map,
            state_map,
            screen,
            check_window,
            cursors,
            has_randr,
            numlock_mask,
            deferred: RefCell::new(VecDeque::new()),
            root_event_mask,
            client_event_mask,
            panel_event_mask,
            button_event_mask,
            grab_event_mask,
        })
    }

    fn numlock_mask(conn: &Conn) -> u16 {
        let setup = conn.setup();
        let min_keycode = setup.min_keycode;
        let count = setup.max_keycode - min_keycode + 1;

        let numlock_keycode = conn
            .get_keyboard_mapping(min_keycode, count)
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .and_then(|reply| {
                let per_keycode = reply.keysyms_per_keycode as usize;

                if per_keycode == 0 {
                    return None;
                }

                reply
                    .keysyms
                    .chunks(per_keycode)
                    .position(|keysyms| keysyms.contains(&NUM_LOCK_KEYSYM))
                    .map(|offset| min_keycode + offset as u8)
            });

        let numlock_keycode = match numlock_keycode {
            Some(keycode) => keycode,
            None => return 0,
        };

        conn.get_modifier_mapping()
            .ok()
            .and_then(|cookie| cookie.reply().ok())
            .map_or(0, |reply| {
                let per_modifier = reply.keycodes.len() / 8;

                if per_modifier == 0 {
                    return 0;
                }

                reply
                    .keycodes
                    .chunks(per_modifier)
                    .position(|keycodes| keycodes.contains(&numlock_keycode))
                    .map_or(0, |modifier| 1 << modifier)
            })
    }

    pub fn window_is_any_of_types(
        &self,
        window: Window,
        types: &[Atom],
    ) -> bool {
        self.conn
            .get_property(
                false,
                window,
                self.atoms._NET_WM_WINDOW_TYPE,
                self.atoms.ATOM,
                0,
                std::u32::MAX,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut window_types| {
                        window_types.any(|type_| types.contains(&type_))
                    })
                })
            })
    }

    pub fn window_is_any_of_states(
        &self,
        window: Window,
        states: &[Atom],
    ) -> bool {
        self.conn
            .get_property(
                false,
                window,
                self.atoms._NET_WM_STATE,
                self.atoms.ATOM,
                0,
                std::u32::MAX,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut window_states| {
                        window_states.any(|state| states.contains(&state))
                    })
                })
            })
    }

    pub fn window_has_any_of_protocols(
        &self,
        window: Window,
        protocols: &[Atom],
    ) -> bool {
        self.conn
            .get_property(
                false,
                window,
                self.atoms.WM_PROTOCOLS,
                self.atoms.ATOM,
                0,
                std::u32::MAX,
            )
            .map_or(false, |cookie| {
                cookie.reply().map_or(false, |reply| {
                    reply.value32().map_or(false, |mut window_protocols| {
                        window_protocols.any(|protocol| protocols.contains(&protocol))
                    })
                })
            })
    }

    fn get_cardinals(
        &self,
        window: Window,
        atom: Atom,
    ) -> Option<Vec<u32>> {
        self.conn
            .get_property(false, window, atom, self.atoms.CARDINAL, 0, std::u32::MAX)
            .ok()?
            .reply()
            .ok()
            .and_then(|reply| reply.value32().map(|values| values.collect::<Vec<u32>>()))
            .filter(|values| !values.is_empty())
    }

    #[inline]
    fn send_client_message(
        &self,
        window: Window,
        atom: Atom,
        type_: Atom,
    ) -> Result<()> {
        let data = [atom, x11rb::CURRENT_TIME, 0, 0, 0];

        let event = xproto::ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window,
            type_,
            data: data.into(),
        };

        self.conn
            .send_event(false, window, EventMask::NO_EVENT, &event)?;

        Ok(())
    }

    #[inline]
    fn send_protocol_client_message(
        &self,
        window: Window,
        atom: Atom,
    ) -> Result<()> {
        self.send_client_message(window, atom, self.atoms.WM_PROTOCOLS)
    }

    #[inline]
    fn get_window_state_from_atom(
        &self,
        atom: Atom,
    ) -> Option<WindowState> {
        self.state_map.get(&atom).copied()
    }

    #[inline]
    fn get_atom_from_window_state(
        &self,
        state: WindowState,
    ) -> Atom {
        match state {
            WindowState::Modal => self.atoms._NET_WM_STATE_MODAL,
            WindowState::Sticky => self.atoms._NET_WM_STATE_STICKY,
            WindowState::Hidden => self.atoms._NET_WM_STATE_HIDDEN,
            WindowState::Fullscreen => self.atoms._NET_WM_STATE_FULLSCREEN,
            WindowState::Above => self.atoms._NET_WM_STATE_ABOVE,
            WindowState::Below => self.atoms._NET_WM_STATE_BELOW,
            WindowState::DemandsAttention => self.atoms._NET_WM_STATE_DEMANDS_ATTENTION,
        }
    }

    #[inline]
    fn get_atom_from_window_type(
        &self,
        type_: WindowType,
    ) -> Atom {
        self.type_map
            .iter()
            .find(|&(_, &mapped)| mapped == type_)
            .map_or(self.atoms._NET_WM_WINDOW_TYPE_NORMAL, |(&atom, _)| atom)
    }

    fn set_window_state_atom(
        &self,
        window: Window,
        state_atom: Atom,
        on: bool,
    ) {
        if on {
            if self.window_is_any_of_states(window, &[state_atom]) {
                return;
            }

            drop(self.conn.change_property32(
                xproto::PropMode::APPEND,
                window,
                self.atoms._NET_WM_STATE,
                xproto::AtomEnum::ATOM,
                &[state_atom],
            ));
        } else {
            let mut states = self
                .conn
                .get_property(
                    false,
                    window,
                    self.atoms._NET_WM_STATE,
                    self.atoms.ATOM,
                    0,
                    std::u32::MAX,
                )
                .map_or(Vec::with_capacity(0), |cookie| {
                    cookie.reply().map_or(Vec::with_capacity(0), |reply| {
                        reply
                            .value32()
                            .map_or(Vec::with_capacity(0), |window_states| {
                                window_states.collect()
                            })
                    })
                });

            states.retain(|&state| state != state_atom);

            drop(self.conn.change_property32(
                xproto::PropMode::REPLACE,
                window,
                self.atoms._NET_WM_STATE,
                xproto::AtomEnum::ATOM,
                &states,
            ));
        }
    }

    #[inline]
    fn mouse_window(
        &self,
        event: Window,
        child: Window,
    ) -> Option<Window> {
        if event == self.screen.root || event == x11rb::NONE {
            if child == x11rb::NONE {
                None
            } else {
                Some(child)
            }
        } else {
            Some(event)
        }
    }

    #[inline]
    fn on_button_press(
        &self,
        event: &xproto::ButtonPressEvent,
    ) -> Option<Event> {
        Some(Event::Mouse {
            event: MouseEvent {
                kind: MouseEventKind::Press,
                window: self.mouse_window(event.event, event.child),
                button: Button::from_detail(event.detail),
                modifiers: modifiers_from_state(event.state),
                root_rpos: Pos {
                    x: event.root_x as i32,
                    y: event.root_y as i32,
                },
                time: event.time,
            },
        })
    }

    #[inline]
    fn on_button_release(
        &self,
        event: &xproto::ButtonReleaseEvent,
    ) -> Option<Event> {
        Some(Event::Mouse {
            event: MouseEvent {
                kind: MouseEventKind::Release,
                window: self.mouse_window(event.event, event.child),
                button: Button::from_detail(event.detail),
                modifiers: modifiers_from_state(event.state),
                root_rpos: Pos {
                    x: event.root_x as i32,
                    y: event.root_y as i32,
                },
                time: event.time,
            },
        })
    }

    #[inline]
    fn on_motion_notify(
        &self,
        event: &xproto::MotionNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Mouse {
            event: MouseEvent {
                kind: MouseEventKind::Motion,
                window: if event.event == self.screen.root {
                    None
                } else {
                    Some(event.event)
                },
                button: None,
                modifiers: modifiers_from_state(event.state),
                root_rpos: Pos {
                    x: event.root_x as i32,
                    y: event.root_y as i32,
                },
                time: event.time,
            },
        })
    }

    #[inline]
    fn on_map_request(
        &self,
        event: &xproto::MapRequestEvent,
    ) -> Option<Event> {
        Some(Event::MapRequest {
            window: event.window,
            ignore: self.window_is_override_redirect(event.window),
        })
    }

    #[inline]
    fn on_enter_notify(
        &self,
        event: &xproto::EnterNotifyEvent,
    ) -> Option<Event> {
        if event.event != self.screen.root
            && (event.mode != xproto::NotifyMode::NORMAL
                || event.detail == xproto::NotifyDetail::INFERIOR)
        {
            return None;
        }

        Some(Event::Enter {
            window: event.event,
            root_rpos: Pos {
                x: event.root_x as i32,
                y: event.root_y as i32,
            },
        })
    }

    #[inline]
    fn on_focus_in(
        &self,
        event: &xproto::FocusInEvent,
    ) -> Option<Event> {
        if event.mode == xproto::NotifyMode::GRAB
            || event.mode == xproto::NotifyMode::UNGRAB
            || event.detail == xproto::NotifyDetail::POINTER
            || event.detail == xproto::NotifyDetail::POINTER_ROOT
            || event.detail == xproto::NotifyDetail::NONE
        {
            return None;
        }

        Some(Event::FocusIn {
            window: event.event,
        })
    }

    #[inline]
    fn on_destroy_notify(
        &self,
        event: &xproto::DestroyNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Destroy {
            window: event.window,
        })
    }

    #[inline]
    fn on_unmap_notify(
        &self,
        event: &xproto::UnmapNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Unmap {
            window: event.window,
            synthetic: event.response_type & 0x80 != 0,
        })
    }

    #[inline]
    fn on_configure_request(
        &self,
        event: &xproto::ConfigureRequestEvent,
    ) -> Option<Event> {
        let mut request = ConfigureRequest::new(event.window);

        if event.value_mask & u16::from(xproto::ConfigWindow::X) != 0 {
            request.x = Some(event.x as i32);
        }

        if event.value_mask & u16::from(xproto::ConfigWindow::Y) != 0 {
            request.y = Some(event.y as i32);
        }

        if event.value_mask & u16::from(xproto::ConfigWindow::WIDTH) != 0 {
            request.w = Some(event.width as i32);
        }

        if event.value_mask & u16::from(xproto::ConfigWindow::HEIGHT) != 0 {
            request.h = Some(event.height as i32);
        }

        if event.value_mask & u16::from(xproto::ConfigWindow::BORDER_WIDTH) != 0 {
            request.border_width = Some(event.border_width as u32);
        }

        if event.value_mask & u16::from(xproto::ConfigWindow::SIBLING) != 0 {
            request.sibling = Some(event.sibling);
        }

        if event.value_mask & u16::from(xproto::ConfigWindow::STACK_MODE) != 0 {
            request.stack_mode = Some(match event.stack_mode {
                xproto::StackMode::ABOVE => StackMode::Above,
                xproto::StackMode::BELOW => StackMode::Below,
                xproto::StackMode::TOP_IF => StackMode::TopIf,
                xproto::StackMode::BOTTOM_IF => StackMode::BottomIf,
                _ => StackMode::Opposite,
            });
        }

        Some(Event::ConfigureRequest {
            request,
        })
    }

    #[inline]
    fn on_configure_notify(
        &self,
        event: &xproto::ConfigureNotifyEvent,
    ) -> Option<Event> {
        Some(Event::Configure {
            window: event.window,
            region: Region::new(
                event.x as i32,
                event.y as i32,
                event.width as i32,
                event.height as i32,
            ),
            on_root: event.window == self.screen.root,
        })
    }

    #[inline]
    fn on_property_notify(
        &self,
        event: &xproto::PropertyNotifyEvent,
    ) -> Option<Event> {
        let on_root = event.window == self.screen.root;

        if event.atom == self.atoms._NET_WM_STRUT || event.atom == self.atoms._NET_WM_STRUT_PARTIAL
        {
            return Some(Event::Property {
                window: event.window,
                kind: PropertyKind::Strut,
                on_root,
            });
        }

        if event.state != xproto::Property::NEW_VALUE {
            return None;
        }

        let kind = if event.atom == self.atoms.WM_TRANSIENT_FOR {
            PropertyKind::TransientFor
        } else if event.atom == self.atoms.WM_NORMAL_HINTS {
            PropertyKind::NormalHints
        } else if event.atom == self.atoms.WM_HINTS {
            PropertyKind::Hints
        } else if event.atom == self.atoms._NET_WM_WINDOW_TYPE {
            PropertyKind::WindowType
        } else {
            return None;
        };

        Some(Event::Property {
            window: event.window,
            kind,
            on_root,
        })
    }

    #[inline]
    fn on_client_message(
        &self,
        event: &xproto::ClientMessageEvent,
    ) -> Option<Event> {
        let data = match event.format {
            8 => event.data.as_data8().iter().map(|&i| i as usize).collect(),
            16 => event.data.as_data16().iter().map(|&i| i as usize).collect(),
            32 => event.data.as_data32().iter().map(|&i| i as usize).collect(),
            _ => Vec::with_capacity(0),
        };

        let on_root = event.window == self.screen.root;

        if event.type_ == self.atoms._NET_WM_STATE {
            if event.format != 32 || data.len() < 3 {
                return None;
            }

            let states: Vec<WindowState> = data[1..=2]
                .iter()
                .filter(|&&atom| atom != 0)
                .filter_map(|&atom| self.get_window_state_from_atom(atom as Atom))
                .collect();

            let state = if states.contains(&WindowState::Fullscreen) {
                WindowState::Fullscreen
            } else {
                *states.first()?
            };

            return Some(Event::StateRequest {
                window: event.window,
                state,
                action: match data[0] {
                    0 => ToggleAction::Remove,
                    1 => ToggleAction::Add,
                    2 => ToggleAction::Toggle,
                    _ => return None,
                },
                on_root,
            });
        } else if event.type_ == self.atoms._NET_CURRENT_DESKTOP {
            return Some(Event::WorkspaceRequest {
                window: None,
                index: *data.get(0)?,
                on_root,
            });
        } else if event.type_ == self.atoms._NET_WM_DESKTOP {
            return Some(Event::WorkspaceRequest {
                window: Some(event.window),
                index: *data.get(0)?,
                on_root,
            });
        } else if event.type_ == self.atoms._NET_CLOSE_WINDOW {
            return Some(Event::CloseRequest {
                window: event.window,
                on_root,
            });
        } else if event.type_ == self.atoms._NET_ACTIVE_WINDOW {
            if let Some(&source) = data.get(0) {
                if source <= 2 {
                    return Some(Event::FocusRequest {
                        window: event.window,
                        on_root,
                    });
                }
            }
        }

        None
    }

    #[inline]
    fn on_randr_notify(
        &self,
        _event: &randr::NotifyEvent,
    ) -> Option<Event> {
        Some(Event::ScreenChange)
    }

    fn translate(
        &self,
        event: XEvent,
    ) -> Option<Event> {
        match event {
            XEvent::ButtonPress(e) => self.on_button_press(&e),
            XEvent::ButtonRelease(e) => self.on_button_release(&e),
            XEvent::MotionNotify(e) => self.on_motion_notify(&e),
            XEvent::MapRequest(e) => self.on_map_request(&e),
            XEvent::EnterNotify(e) => self.on_enter_notify(&e),
            XEvent::FocusIn(e) => self.on_focus_in(&e),
            XEvent::DestroyNotify(e) => self.on_destroy_notify(&e),
            XEvent::UnmapNotify(e) => self.on_unmap_notify(&e),
            XEvent::ConfigureRequest(e) => self.on_configure_request(&e),
            XEvent::ConfigureNotify(e) => self.on_configure_notify(&e),
            XEvent::PropertyNotify(e) => self.on_property_notify(&e),
            XEvent::ClientMessage(e) => self.on_client_message(&e),
            XEvent::RandrNotify(e) => self.on_randr_notify(&e),
            XEvent::RandrScreenChangeNotify(_) => Some(Event::ScreenChange),
            XEvent::Error(e) => Some(Event::ProtocolError {
                code: e.error_code,
                major: e.major_opcode,
            }),
            _ => None,
        }
    }

    fn output_region(
        &self,
        crtc: randr::Crtc,
        timestamp: xproto::Timestamp,
    ) -> Option<Region> {
        if crtc == x11rb::NONE {
            return None;
        }

        randr::get_crtc_info(self.conn, crtc, timestamp)
            .ok()?
            .reply()
            .ok()
            .filter(|reply| reply.mode != x11rb::NONE && reply.width > 0 && reply.height > 0)
            .map(|reply| {
                Region::new(
                    reply.x as i32,
                    reply.y as i32,
                    reply.width as i32,
                    reply.height as i32,
                )
            })
    }
}

impl<'conn, Conn: connection::Connection> Connection for XConnection<'conn, Conn> {
    #[inline]
    fn flush(&self) -> bool {
        self.conn.flush().is_ok()
    }

    fn poll(&self) -> Result<Option<Event>> {
        loop {
            let event = match self.deferred.borrow_mut().pop_front() {
                Some(event) => event,
                None => match self.conn.poll_for_event()? {
                    Some(event) => event,
                    None => return Ok(None),
                },
            };

            if let Some(event) = self.translate(event) {
                return Ok(Some(event));
            }
        }
    }

    fn discard_enter_events(&self) {
        self.flush();

        // round trip so that every Enter caused by prior requests has arrived
        drop(
            self.conn
                .get_input_focus()
                .map(|cookie| cookie.reply()),
        );

        let mut deferred = self.deferred.borrow_mut();
        deferred.retain(|event| !matches!(event, XEvent::EnterNotify(_)));

        while let Ok(Some(event)) = self.conn.poll_for_event() {
            if !matches!(event, XEvent::EnterNotify(_)) {
                deferred.push_back(event);
            }
        }
    }

    #[inline]
    fn screen_region(&self) -> Region {
        Region::new(
            0,
            0,
            self.screen.width_in_pixels as i32,
            self.screen.height_in_pixels as i32,
        )
    }

    fn connected_outputs(&self) -> Option<Vec<Output>> {
        if !self.has_randr {
            return None;
        }

        let resources = randr::get_screen_resources_current(self.conn, self.screen.root)
            .ok()?
            .reply()
            .ok()?;

        let timestamp = resources.config_timestamp;

        let outputs: Vec<Output> = resources
            .outputs
            .iter()
            .filter_map(|&output| {
                randr::get_output_info(self.conn, output, timestamp)
                    .ok()
                    .and_then(|cookie| cookie.reply().ok())
                    .map(|info| {
                        Output::new(
                            output,
                            String::from_utf8_lossy(&info.name),
                            self.output_region(info.crtc, timestamp),
                        )
                    })
            })
            .collect();

        if outputs.iter().all(|output| output.region.is_none()) {
            return None;
        }

        Some(outputs)
    }

    fn primary_output(&self) -> Option<OutputId> {
        if !self.has_randr {
            return None;
        }

        randr::get_output_primary(self.conn, self.screen.root)
            .ok()?
            .reply()
            .ok()
            .map(|reply| reply.output)
            .filter(|&output| output != x11rb::NONE)
    }

    fn top_level_windows(&self) -> Vec<Window> {
        self.conn
            .query_tree(self.screen.root)
            .map_or(Vec::with_capacity(0), |cookie| {
                cookie
                    .reply()
                    .map_or(Vec::with_capacity(0), |reply| reply.children)
            })
    }

    #[inline]
    fn warp_pointer(
        &self,
        pos: Pos,
    ) {
        drop(self.conn.warp_pointer(
            x11rb::NONE,
            self.screen.root,
            0,
            0,
            0,
            0,
            pos.x as i16,
            pos.y as i16,
        ));
    }

    fn grab_pointer(
        &self,
        grab: Grab,
    ) -> bool {
        let cursor = match grab {
            Grab::Move => self.cursors.moving,
            Grab::Resize => self.cursors.resizing,
        };

        self.conn
            .grab_pointer(
                false,
                self.screen.root,
                u32::from(self.grab_event_mask) as u16,
                xproto::GrabMode::ASYNC,
                xproto::GrabMode::ASYNC,
                self.screen.root,
                cursor,
                x11rb::CURRENT_TIME,
            )
            .map_or(false, |cookie| {
                cookie
                    .reply()
                    .map_or(false, |reply| reply.status == xproto::GrabStatus::SUCCESS)
            })
    }

    #[inline]
    fn release_pointer(&self) {
        drop(self.conn.ungrab_pointer(x11rb::CURRENT_TIME));
    }

    fn cleanup(&self) {
        drop(self.conn.destroy_window(self.check_window));

        drop(self.conn.set_input_focus(
            xproto::InputFocus::POINTER_ROOT,
            self.screen.root,
            x11rb::CURRENT_TIME,
        ));

        for &atom in &[
            self.atoms._NET_ACTIVE_WINDOW,
            self.atoms._NET_SUPPORTING_WM_CHECK,
            self.atoms._NET_SUPPORTED,
            self.atoms._NET_CLIENT_LIST,
            self.atoms._NET_WORKAREA,
            self.atoms._NET_DESKTOP_VIEWPORT,
        ] {
            drop(self.conn.delete_property(self.screen.root, atom));
        }

        self.flush();
    }

    #[inline]
    fn init_window(
        &self,
        window: Window,
    ) {
        drop(self.conn.change_window_attributes(
            window,
            &xproto::ChangeWindowAttributesAux::default().event_mask(self.client_event_mask),
        ));
    }

    #[inline]
    fn init_panel(
        &self,
        window: Window,
    ) {
        drop(self.conn.change_window_attributes(
            window,
            &xproto::ChangeWindowAttributesAux::default().event_mask(self.panel_event_mask),
        ));
    }

    #[inline]
    fn map_window(
        &self,
        window: Window,
    ) {
        drop(self.conn.map_window(window));
    }

    #[inline]
    fn kill_window(
        &self,
        window: Window,
    ) -> bool {
        let protocols = &[self.atoms.WM_DELETE_WINDOW];

        if self.window_has_any_of_protocols(window, protocols) {
            self.send_protocol_client_message(window, self.atoms.WM_DELETE_WINDOW)
                .map_or(false, |_| self.flush())
        } else {
            self.conn
                .kill_client(window)
                .map_or(false, |_| self.flush())
        }
    }

    #[inline]
    fn place_window(
        &self,
        window: Window,
        region: Region,
        border_width: u32,
    ) {
        drop(
            self.conn.configure_window(
                window,
                &xproto::ConfigureWindowAux::default()
                    .x(region.pos.x)
                    .y(region.pos.y)
                    .width(region.dim.w as u32)
                    .height(region.dim.h as u32)
                    .border_width(border_width),
            ),
        );
    }

    #[inline]
    fn move_window(
        &self,
        window: Window,
        pos: Pos,
    ) {
        drop(
            self.conn.configure_window(
                window,
                &xproto::ConfigureWindowAux::default()
                    .x(pos.x)
                    .y(pos.y),
            ),
        );
    }

    #[inline]
    fn send_configure_notify(
        &self,
        window: Window,
        region: Region,
        border_width: u32,
    ) {
        let event = xproto::ConfigureNotifyEvent {
            response_type: xproto::CONFIGURE_NOTIFY_EVENT,
            sequence: 0,
            event: window,
            window,
            above_sibling: x11rb::NONE,
            x: region.pos.x as i16,
            y: region.pos.y as i16,
            width: region.dim.w as u16,
            height: region.dim.h as u16,
            border_width: border_width as u16,
            override_redirect: false,
        };

        drop(
            self.conn
                .send_event(false, window, EventMask::STRUCTURE_NOTIFY, &event),
        );
    }

    fn pass_configure_request(
        &self,
        request: &ConfigureRequest,
    ) {
        let mut aux = xproto::ConfigureWindowAux::default();

        if let Some(x) = request.x {
            aux = aux.x(x);
        }

        if let Some(y) = request.y {
            aux = aux.y(y);
        }

        if let Some(w) = request.w {
            aux = aux.width(w as u32);
        }

        if let Some(h) = request.h {
            aux = aux.height(h as u32);
        }

        if let Some(border_width) = request.border_width {
            aux = aux.border_width(border_width);
        }

        if let Some(sibling) = request.sibling {
            aux = aux.sibling(sibling);
        }

        if let Some(stack_mode) = request.stack_mode {
            aux = aux.stack_mode(match stack_mode {
                StackMode::Above => xproto::StackMode::ABOVE,
                StackMode::Below => xproto::StackMode::BELOW,
                StackMode::TopIf => xproto::StackMode::TOP_IF,
                StackMode::BottomIf => xproto::StackMode::BOTTOM_IF,
                StackMode::Opposite => xproto::StackMode::OPPOSITE,
            });
        }

        drop(self.conn.configure_window(request.window, &aux));
    }

    #[inline]
    fn focus_window(
        &self,
        window: Window,
        accepts_input: bool,
    ) {
        if accepts_input {
            drop(self.conn.set_input_focus(
                xproto::InputFocus::POINTER_ROOT,
                window,
                x11rb::CURRENT_TIME,
            ));

            drop(self.conn.change_property32(
                xproto::PropMode::REPLACE,
                self.screen.root,
                self.atoms._NET_ACTIVE_WINDOW,
                xproto::AtomEnum::WINDOW,
                &[window],
            ));
        }

        if self.window_has_any_of_protocols(window, &[self.atoms.WM_TAKE_FOCUS]) {
            drop(self.send_protocol_client_message(window, self.atoms.WM_TAKE_FOCUS));
        }
    }

    #[inline]
    fn unfocus(&self) {
        drop(self.conn.set_input_focus(
            xproto::InputFocus::POINTER_ROOT,
            self.screen.root,
            x11rb::CURRENT_TIME,
        ));

        drop(
            self.conn
                .delete_property(self.screen.root, self.atoms._NET_ACTIVE_WINDOW),
        );
    }

    #[inline]
    fn stack_window_above(
        &self,
        window: Window,
        sibling: Option<Window>,
    ) {
        let mut aux = xproto::ConfigureWindowAux::default().stack_mode(xproto::StackMode::ABOVE);

        if let Some(sibling) = sibling {
            aux = aux.sibling(sibling);
        }

        drop(self.conn.configure_window(window, &aux));
    }

    #[inline]
    fn stack_window_below(
        &self,
        window: Window,
        sibling: Option<Window>,
    ) {
        let mut aux = xproto::ConfigureWindowAux::default().stack_mode(xproto::StackMode::BELOW);

        if let Some(sibling) = sibling {
            aux = aux.sibling(sibling);
        }

        drop(self.conn.configure_window(window, &aux));
    }

    fn grab_buttons(
        &self,
        window: Window,
        focused: bool,
        binding: &MouseBinding,
    ) {
        let lock = u16::from(ModMask::LOCK);
        let modifier = u16::from(binding.modifier);

        self.ungrab_buttons(window);

        if !focused {
            drop(self.conn.grab_button(
                false,
                window,
                u32::from(self.button_event_mask) as u16,
                xproto::GrabMode::SYNC,
                xproto::GrabMode::SYNC,
                x11rb::NONE,
                x11rb::NONE,
                xproto::ButtonIndex::ANY,
                xproto::ModMask::ANY,
            ));
        }

        for &m in &[0, lock, self.numlock_mask, self.numlock_mask | lock] {
            for &button in &[binding.move_button, binding.resize_button] {
                drop(self.conn.grab_button(
                    false,
                    window,
                    u32::from(self.button_event_mask) as u16,
                    xproto::GrabMode::ASYNC,
                    xproto::GrabMode::SYNC,
                    x11rb::NONE,
                    x11rb::NONE,
                    xproto::ButtonIndex::from(button),
                    modifier | m,
                ));
            }
        }
    }

    #[inline]
    fn ungrab_buttons(
        &self,
        window: Window,
    ) {
        drop(
            self.conn
                .ungrab_button(xproto::ButtonIndex::ANY, window, xproto::ModMask::ANY),
        );
    }

    #[inline]
    fn replay_pointer(
        &self,
        time: u32,
    ) {
        drop(self.conn.allow_events(xproto::Allow::REPLAY_POINTER, time));
    }

    #[inline]
    fn set_window_border_width(
        &self,
        window: Window,
        width: u32,
    ) {
        drop(self.conn.configure_window(
            window,
            &xproto::ConfigureWindowAux::default().border_width(width),
        ));
    }

    #[inline]
    fn set_window_border_color(
        &self,
        window: Window,
        color: u32,
    ) {
        drop(self.conn.change_window_attributes(
            window,
            &xproto::ChangeWindowAttributesAux::default().border_pixel(color),
        ));
    }

    #[inline]
    fn window_is_override_redirect(
        &self,
        window: Window,
    ) -> bool {
        self.conn
            .get_window_attributes(window)
            .map_or(false, |cookie| {
                cookie
                    .reply()
                    .map_or(false, |reply| reply.override_redirect)
            })
    }

    #[inline]
    fn window_is_viewable(
        &self,
        window: Window,
    ) -> bool {
        self.conn
            .get_window_attributes(window)
            .map_or(false, |cookie| {
                cookie
                    .reply()
                    .map_or(false, |reply| reply.map_state == xproto::MapState::VIEWABLE)
            })
    }

    #[inline]
    fn window_has_type(
        &self,
        window: Window,
        type_: WindowType,
    ) -> bool {
        self.window_is_any_of_types(window, &[self.get_atom_from_window_type(type_)])
    }

    #[inline]
    fn window_is_fullscreen(
        &self,
        window: Window,
    ) -> bool {
        self.window_is_any_of_states(window, &[self.atoms._NET_WM_STATE_FULLSCREEN])
    }

    #[inline]
    fn get_window_geometry(
        &self,
        window: Window,
    ) -> Result<(Region, u32)> {
        Ok(self.conn.get_geometry(window)?.reply().map(|reply| {
            (
                Region::new(
                    reply.x as i32,
                    reply.y as i32,
                    reply.width as i32,
                    reply.height as i32,
                ),
                reply.border_width as u32,
            )
        })?)
    }

    fn get_icccm_window_state(
        &self,
        window: Window,
    ) -> Option<IcccmWindowState> {
        self.conn
            .get_property(
                false,
                window,
                self.atoms.WM_STATE,
                self.atoms.WM_STATE,
                0,
                2,
            )
            .ok()?
            .reply()
            .ok()
            .and_then(|reply| reply.value32()?.next())
            .and_then(|state| match state {
                0 => Some(IcccmWindowState::Withdrawn),
                1 => Some(IcccmWindowState::Normal),
                3 => Some(IcccmWindowState::Iconic),
                _ => None,
            })
    }

    #[inline]
    fn set_icccm_window_state(
        &self,
        window: Window,
        state: IcccmWindowState,
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            window,
            self.atoms.WM_STATE,
            self.atoms.WM_STATE,
            &[
                match state {
                    IcccmWindowState::Withdrawn => 0,
                    IcccmWindowState::Normal => 1,
                    IcccmWindowState::Iconic => 3,
                },
                x11rb::NONE,
            ],
        ));
    }

    #[inline]
    fn get_icccm_window_hints(
        &self,
        window: Window,
    ) -> Option<Hints> {
        let hints = properties::WmHints::get(self.conn, window)
            .ok()?
            .reply()
            .ok()?;

        let initial_state = hints.initial_state.map(|state| match state {
            properties::WmHintsState::Normal => IcccmWindowState::Normal,
            properties::WmHintsState::Iconic => IcccmWindowState::Iconic,
        });

        Some(Hints {
            urgent: hints.urgent,
            input: hints.input,
            initial_state,
            group: hints.window_group,
        })
    }

    #[inline]
    fn set_icccm_window_hints(
        &self,
        window: Window,
        hints: Hints,
    ) {
        let wm_hints = properties::WmHints {
            input: hints.input,
            initial_state: match hints.initial_state {
                Some(IcccmWindowState::Normal) => Some(properties::WmHintsState::Normal),
                Some(IcccmWindowState::Iconic) => Some(properties::WmHintsState::Iconic),
                _ => None,
            },
            icon_pixmap: None,
            icon_window: None,
            icon_position: None,
            icon_mask: None,
            window_group: hints.group,
            urgent: hints.urgent,
        };

        drop(wm_hints.set(self.conn, window));
    }

    fn get_icccm_window_size_hints(
        &self,
        window: Window,
    ) -> Option<SizeHints> {
        let size_hints = properties::WmSizeHints::get_normal_hints(self.conn, window)
            .ok()?
            .reply()
            .ok()?;

        let positive = |size: Option<(i32, i32)>| size.filter(|&(w, h)| w > 0 || h > 0);

        Some(SizeHints::new(
            positive(size_hints.min_size),
            positive(size_hints.max_size),
            positive(size_hints.base_size),
            positive(size_hints.size_increment),
            size_hints.aspect.map(|(min, max)| {
                (
                    (min.numerator, min.denominator),
                    (max.numerator, max.denominator),
                )
            }),
        ))
    }

    #[inline]
    fn get_icccm_window_transient_for(
        &self,
        window: Window,
    ) -> Option<Window> {
        self.conn
            .get_property(
                false,
                window,
                self.atoms.WM_TRANSIENT_FOR,
                self.atoms.WINDOW,
                0,
                std::u32::MAX,
            )
            .ok()?
            .reply()
            .ok()
            .and_then(|transient_for| transient_for.value32()?.next())
            .filter(|&transient_for| transient_for != x11rb::NONE)
    }

    #[inline]
    fn get_icccm_window_class(
        &self,
        window: Window,
    ) -> (String, String) {
        static NO_CLASS: &str = "n/a";

        properties::WmClass::get(self.conn, window).map_or(
            (NO_CLASS.to_owned(), NO_CLASS.to_owned()),
            |cookie| {
                cookie.reply().map_or(
                    (NO_CLASS.to_owned(), NO_CLASS.to_owned()),
                    |reply| {
                        (
                            String::from_utf8_lossy(reply.class()).into_owned(),
                            String::from_utf8_lossy(reply.instance()).into_owned(),
                        )
                    },
                )
            },
        )
    }

    #[inline]
    fn get_window_desktop(
        &self,
        window: Window,
    ) -> Option<usize> {
        self.get_cardinals(window, self.atoms._NET_WM_DESKTOP)
            .map(|desktop| desktop[0] as usize)
    }

    #[inline]
    fn set_window_desktop(
        &self,
        window: Window,
        index: usize,
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            window,
            self.atoms._NET_WM_DESKTOP,
            self.atoms.CARDINAL,
            &[index as u32],
        ));
    }

    #[inline]
    fn set_window_state(
        &self,
        window: Window,
        state: WindowState,
        on: bool,
    ) {
        self.set_window_state_atom(window, self.get_atom_from_window_state(state), on);
    }

    #[inline]
    fn set_window_frame_extents(
        &self,
        window: Window,
        extents: Extents,
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            window,
            self.atoms._NET_FRAME_EXTENTS,
            self.atoms.CARDINAL,
            &[
                extents.left as u32,
                extents.right as u32,
                extents.top as u32,
                extents.bottom as u32,
            ],
        ));
    }

    #[inline]
    fn get_window_strut(
        &self,
        window: Window,
    ) -> Option<Strut> {
        self.get_cardinals(window, self.atoms._NET_WM_STRUT_PARTIAL)
            .or_else(|| self.get_cardinals(window, self.atoms._NET_WM_STRUT))
            .and_then(|widths| Strut::from_widths(&widths))
    }

    fn init_wm_properties(
        &self,
        wm_name: &str,
        desktop_names: &[String],
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.check_window,
            self.atoms._NET_SUPPORTING_WM_CHECK,
            self.atoms.WINDOW,
            &[self.check_window],
        ));

        drop(self.conn.change_property8(
            xproto::PropMode::REPLACE,
            self.check_window,
            self.atoms._NET_WM_NAME,
            self.atoms.UTF8_STRING,
            wm_name.as_bytes(),
        ));

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_SUPPORTING_WM_CHECK,
            self.atoms.WINDOW,
            &[self.check_window],
        ));

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_SUPPORTED,
            self.atoms.ATOM,
            &[
                self.atoms._NET_ACTIVE_WINDOW,
                self.atoms._NET_CLIENT_LIST,
                self.atoms._NET_CLOSE_WINDOW,
                self.atoms._NET_CURRENT_DESKTOP,
                self.atoms._NET_DESKTOP_GEOMETRY,
                self.atoms._NET_DESKTOP_NAMES,
                self.atoms._NET_DESKTOP_VIEWPORT,
                self.atoms._NET_FRAME_EXTENTS,
                self.atoms._NET_NUMBER_OF_DESKTOPS,
                self.atoms._NET_SUPPORTED,
                self.atoms._NET_SUPPORTING_WM_CHECK,
                self.atoms._NET_WM_DESKTOP,
                self.atoms._NET_WM_NAME,
                self.atoms._NET_WM_STATE,
                self.atoms._NET_WM_STATE_FULLSCREEN,
                self.atoms._NET_WM_STRUT,
                self.atoms._NET_WM_STRUT_PARTIAL,
                self.atoms._NET_WM_WINDOW_TYPE,
                self.atoms._NET_WM_WINDOW_TYPE_DIALOG,
                self.atoms._NET_WM_WINDOW_TYPE_DOCK,
                self.atoms._NET_WORKAREA,
            ],
        ));

        drop(
            self.conn
                .delete_property(self.screen.root, self.atoms._NET_CLIENT_LIST),
        );

        self.update_desktops(desktop_names);
    }

    #[inline]
    fn get_current_desktop(&self) -> Option<usize> {
        self.get_cardinals(self.screen.root, self.atoms._NET_CURRENT_DESKTOP)
            .map(|desktop| desktop[0] as usize)
    }

    #[inline]
    fn set_current_desktop(
        &self,
        index: usize,
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_CURRENT_DESKTOP,
            self.atoms.CARDINAL,
            &[index as u32],
        ));
    }

    #[inline]
    fn set_desktop_geometry(
        &self,
        dim: Dim,
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_DESKTOP_GEOMETRY,
            self.atoms.CARDINAL,
            &[dim.w as u32, dim.h as u32],
        ));
    }

    #[inline]
    fn set_workarea(
        &self,
        workareas: &[Region],
    ) {
        let areas: Vec<u32> = workareas
            .iter()
            .flat_map(|workarea| {
                vec![
                    workarea.pos.x as u32,
                    workarea.pos.y as u32,
                    workarea.dim.w as u32,
                    workarea.dim.h as u32,
                ]
            })
            .collect();

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_WORKAREA,
            self.atoms.CARDINAL,
            &areas[..],
        ));
    }

    #[inline]
    fn set_desktop_viewport(
        &self,
        viewports: &[Pos],
    ) {
        let areas: Vec<u32> = viewports
            .iter()
            .flat_map(|viewport| vec![viewport.x as u32, viewport.y as u32])
            .collect();

        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_DESKTOP_VIEWPORT,
            self.atoms.CARDINAL,
            &areas[..],
        ));
    }

    #[inline]
    fn update_desktops(
        &self,
        desktop_names: &[String],
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_NUMBER_OF_DESKTOPS,
            self.atoms.CARDINAL,
            &[desktop_names.len() as u32],
        ));

        drop(self.conn.change_property8(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_DESKTOP_NAMES,
            self.atoms.UTF8_STRING,
            desktop_names.join("\0").as_bytes(),
        ));
    }

    #[inline]
    fn update_client_list(
        &self,
        clients: &[Window],
    ) {
        drop(self.conn.change_property32(
            xproto::PropMode::REPLACE,
            self.screen.root,
            self.atoms._NET_CLIENT_LIST,
            self.atoms.WINDOW,
            clients,
        ));
    }
}
