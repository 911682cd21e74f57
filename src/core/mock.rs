use winsys::connection::Connection;
use winsys::event::ConfigureRequest;
use winsys::event::Event;
use winsys::geometry::Dim;
use winsys::geometry::Extents;
use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::geometry::Strut;
use winsys::hints::Hints;
use winsys::hints::SizeHints;
use winsys::input::Grab;
use winsys::input::MouseBinding;
use winsys::screen::Output;
use winsys::screen::OutputId;
use winsys::window::IcccmWindowState;
use winsys::window::Window;
use winsys::window::WindowState;
use winsys::window::WindowType;
use winsys::Result;

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::VecDeque;

use anyhow::anyhow;

/// A request the window manager issued, as seen by the display server.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Map(Window),
    Kill(Window),
    Place(Window, Region, u32),
    Move(Window, Pos),
    Notify(Window, Region, u32),
    PassConfigure(Window),
    Focus(Window),
    Unfocus,
    Above(Window),
    Below(Window),
    GrabButtons(Window, bool),
    UngrabButtons(Window),
    Replay,
    BorderWidth(Window, u32),
    BorderColor(Window, u32),
    GrabPointer(Grab),
    ReleasePointer,
    Warp(Pos),
    State(Window, WindowState, bool),
    IcccmState(Window, IcccmWindowState),
    Desktop(Window, usize),
    Cleanup,
}

#[derive(Debug, Clone)]
pub struct MockWindow {
    pub region: Region,
    pub border_width: u32,
    pub class: String,
    pub instance: String,
    pub types: Vec<WindowType>,
    pub fullscreen: bool,
    pub transient_for: Option<Window>,
    pub hints: Option<Hints>,
    pub size_hints: Option<SizeHints>,
    pub override_redirect: bool,
    pub viewable: bool,
    pub icccm_state: Option<IcccmWindowState>,
    pub desktop: Option<usize>,
    pub strut: Option<Strut>,
}

impl MockWindow {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            border_width: 0,
            class: String::from("st"),
            instance: String::from("st-256color"),
            types: vec![WindowType::Normal],
            fullscreen: false,
            transient_for: None,
            hints: None,
            size_hints: None,
            override_redirect: false,
            viewable: true,
            icccm_state: None,
            desktop: None,
            strut: None,
        }
    }

    pub fn dock(
        region: Region,
        strut: Strut,
    ) -> Self {
        Self {
            types: vec![WindowType::Dock],
            strut: Some(strut),
            ..Self::new(region)
        }
    }
}

pub struct MockConnection {
    screen: Region,
    pub outputs: RefCell<Option<Vec<Output>>>,
    pub primary: Cell<Option<OutputId>>,
    pub windows: RefCell<BTreeMap<Window, MockWindow>>,
    pub requests: RefCell<Vec<Request>>,
    pub events: RefCell<VecDeque<Event>>,
    pub grab_succeeds: Cell<bool>,
    pub client_list: RefCell<Vec<Window>>,
    pub desktops: RefCell<Vec<String>>,
    pub current_desktop: Cell<Option<usize>>,
    pub workareas: RefCell<Vec<Region>>,
    pub active: Cell<Option<Window>>,
    pub pointer: Cell<Pos>,
}

impl MockConnection {
    pub fn new(screen: Region) -> Self {
        Self {
            screen,
            outputs: RefCell::new(None),
            primary: Cell::new(None),
            windows: RefCell::new(BTreeMap::new()),
            requests: RefCell::new(Vec::new()),
            events: RefCell::new(VecDeque::new()),
            grab_succeeds: Cell::new(true),
            client_list: RefCell::new(Vec::new()),
            desktops: RefCell::new(Vec::new()),
            current_desktop: Cell::new(None),
            workareas: RefCell::new(Vec::new()),
            active: Cell::new(None),
            pointer: Cell::new(Pos::default()),
        }
    }

    pub fn with_outputs(
        self,
        outputs: Vec<Output>,
    ) -> Self {
        self.outputs.replace(Some(outputs));
        self
    }

    pub fn add_window(
        &self,
        window: Window,
        mock: MockWindow,
    ) {
        self.windows.borrow_mut().insert(window, mock);
    }

    pub fn take_requests(&self) -> Vec<Request> {
        self.requests.replace(Vec::new())
    }

    /// The last geometry the window was configured with.
    pub fn placement(
        &self,
        window: Window,
    ) -> Option<(Region, u32)> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find_map(|request| match *request {
                Request::Place(w, region, bw) if w == window => Some((region, bw)),
                _ => None,
            })
    }

    /// The last position the window was moved to, by either a move or a
    /// full configure.
    pub fn position(
        &self,
        window: Window,
    ) -> Option<Pos> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find_map(|request| match *request {
                Request::Place(w, region, _) if w == window => Some(region.pos),
                Request::Move(w, pos) if w == window => Some(pos),
                _ => None,
            })
    }

    #[inline]
    fn record(
        &self,
        request: Request,
    ) {
        self.requests.borrow_mut().push(request);
    }

    fn with_window<T>(
        &self,
        window: Window,
        default: T,
        f: impl FnOnce(&MockWindow) -> T,
    ) -> T {
        self.windows.borrow().get(&window).map_or(default, f)
    }
}

impl Connection for MockConnection {
    fn flush(&self) -> bool {
        true
    }

    fn poll(&self) -> Result<Option<Event>> {
        Ok(self.events.borrow_mut().pop_front())
    }

    fn discard_enter_events(&self) {
        self.events
            .borrow_mut()
            .retain(|event| !matches!(event, Event::Enter { .. }));
    }

    fn screen_region(&self) -> Region {
        self.screen
    }

    fn connected_outputs(&self) -> Option<Vec<Output>> {
        self.outputs.borrow().clone()
    }

    fn primary_output(&self) -> Option<OutputId> {
        self.primary.get()
    }

    fn top_level_windows(&self) -> Vec<Window> {
        self.windows.borrow().keys().copied().collect()
    }

    fn warp_pointer(
        &self,
        pos: Pos,
    ) {
        self.pointer.set(pos);
        self.record(Request::Warp(pos));
    }

    fn grab_pointer(
        &self,
        grab: Grab,
    ) -> bool {
        self.record(Request::GrabPointer(grab));
        self.grab_succeeds.get()
    }

    fn release_pointer(&self) {
        self.record(Request::ReleasePointer);
    }

    fn cleanup(&self) {
        self.active.set(None);
        self.record(Request::Cleanup);
    }

    fn init_window(
        &self,
        _window: Window,
    ) {
    }

    fn init_panel(
        &self,
        _window: Window,
    ) {
    }

    fn map_window(
        &self,
        window: Window,
    ) {
        if let Some(mock) = self.windows.borrow_mut().get_mut(&window) {
            mock.viewable = true;
        }

        self.record(Request::Map(window));
    }

    fn kill_window(
        &self,
        window: Window,
    ) -> bool {
        self.record(Request::Kill(window));
        true
    }

    fn place_window(
        &self,
        window: Window,
        region: Region,
        border_width: u32,
    ) {
        if let Some(mock) = self.windows.borrow_mut().get_mut(&window) {
            mock.region = region;
            mock.border_width = border_width;
        }

        self.record(Request::Place(window, region, border_width));
    }

    fn move_window(
        &self,
        window: Window,
        pos: Pos,
    ) {
        self.record(Request::Move(window, pos));
    }

    fn send_configure_notify(
        &self,
        window: Window,
        region: Region,
        border_width: u32,
    ) {
        self.record(Request::Notify(window, region, border_width));
    }

    fn pass_configure_request(
        &self,
        request: &ConfigureRequest,
    ) {
        self.record(Request::PassConfigure(request.window));
    }

    fn focus_window(
        &self,
        window: Window,
        accepts_input: bool,
    ) {
        if accepts_input {
            self.active.set(Some(window));
        }

        self.record(Request::Focus(window));
    }

    fn unfocus(&self) {
        self.active.set(None);
        self.record(Request::Unfocus);
    }

    fn stack_window_above(
        &self,
        window: Window,
        _sibling: Option<Window>,
    ) {
        self.record(Request::Above(window));
    }

    fn stack_window_below(
        &self,
        window: Window,
        _sibling: Option<Window>,
    ) {
        self.record(Request::Below(window));
    }

    fn grab_buttons(
        &self,
        window: Window,
        focused: bool,
        _binding: &MouseBinding,
    ) {
        self.record(Request::GrabButtons(window, focused));
    }

    fn ungrab_buttons(
        &self,
        window: Window,
    ) {
        self.record(Request::UngrabButtons(window));
    }

    fn replay_pointer(
        &self,
        _time: u32,
    ) {
        self.record(Request::Replay);
    }

    fn set_window_border_width(
        &self,
        window: Window,
        width: u32,
    ) {
        self.record(Request::BorderWidth(window, width));
    }

    fn set_window_border_color(
        &self,
        window: Window,
        color: u32,
    ) {
        self.record(Request::BorderColor(window, color));
    }

    fn window_is_override_redirect(
        &self,
        window: Window,
    ) -> bool {
        self.with_window(window, false, |mock| mock.override_redirect)
    }

    fn window_is_viewable(
        &self,
        window: Window,
    ) -> bool {
        self.with_window(window, false, |mock| mock.viewable)
    }

    fn window_has_type(
        &self,
        window: Window,
        type_: WindowType,
    ) -> bool {
        self.with_window(window, false, |mock| mock.types.contains(&type_))
    }

    fn window_is_fullscreen(
        &self,
        window: Window,
    ) -> bool {
        self.with_window(window, false, |mock| mock.fullscreen)
    }

    fn get_window_geometry(
        &self,
        window: Window,
    ) -> Result<(Region, u32)> {
        self.windows
            .borrow()
            .get(&window)
            .map(|mock| (mock.region, mock.border_width))
            .ok_or_else(|| anyhow!("bad window {:#0x}", window))
    }

    fn get_icccm_window_state(
        &self,
        window: Window,
    ) -> Option<IcccmWindowState> {
        self.with_window(window, None, |mock| mock.icccm_state)
    }

    fn set_icccm_window_state(
        &self,
        window: Window,
        state: IcccmWindowState,
    ) {
        if let Some(mock) = self.windows.borrow_mut().get_mut(&window) {
            mock.icccm_state = Some(state);
        }

        self.record(Request::IcccmState(window, state));
    }

    fn get_icccm_window_hints(
        &self,
        window: Window,
    ) -> Option<Hints> {
        self.with_window(window, None, |mock| mock.hints)
    }

    fn set_icccm_window_hints(
        &self,
        window: Window,
        hints: Hints,
    ) {
        if let Some(mock) = self.windows.borrow_mut().get_mut(&window) {
            mock.hints = Some(hints);
        }
    }

    fn get_icccm_window_size_hints(
        &self,
        window: Window,
    ) -> Option<SizeHints> {
        self.with_window(window, None, |mock| mock.size_hints)
    }

    fn get_icccm_window_transient_for(
        &self,
        window: Window,
    ) -> Option<Window> {
        self.with_window(window, None, |mock| mock.transient_for)
    }

    fn get_icccm_window_class(
        &self,
        window: Window,
    ) -> (String, String) {
        self.with_window(window, (String::new(), String::new()), |mock| {
            (mock.class.to_owned(), mock.instance.to_owned())
        })
    }

    fn get_window_desktop(
        &self,
        window: Window,
    ) -> Option<usize> {
        self.with_window(window, None, |mock| mock.desktop)
    }

    fn set_window_desktop(
        &self,
        window: Window,
        index: usize,
    ) {
        if let Some(mock) = self.windows.borrow_mut().get_mut(&window) {
            mock.desktop = Some(index);
        }

        self.record(Request::Desktop(window, index));
    }

    fn set_window_state(
        &self,
        window: Window,
        state: WindowState,
        on: bool,
    ) {
        self.record(Request::State(window, state, on));
    }

    fn set_window_frame_extents(
        &self,
        _window: Window,
        _extents: Extents,
    ) {
    }

    fn get_window_strut(
        &self,
        window: Window,
    ) -> Option<Strut> {
        self.with_window(window, None, |mock| mock.strut)
    }

    fn init_wm_properties(
        &self,
        _wm_name: &str,
        desktop_names: &[String],
    ) {
        self.desktops.replace(desktop_names.to_vec());
    }

    fn get_current_desktop(&self) -> Option<usize> {
        self.current_desktop.get()
    }

    fn set_current_desktop(
        &self,
        index: usize,
    ) {
        self.current_desktop.set(Some(index));
    }

    fn set_desktop_geometry(
        &self,
        _dim: Dim,
    ) {
    }

    fn set_workarea(
        &self,
        workareas: &[Region],
    ) {
        self.workareas.replace(workareas.to_vec());
    }

    fn set_desktop_viewport(
        &self,
        _viewports: &[Pos],
    ) {
    }

    fn update_desktops(
        &self,
        desktop_names: &[String],
    ) {
        self.desktops.replace(desktop_names.to_vec());
    }

    fn update_client_list(
        &self,
        clients: &[Window],
    ) {
        self.client_list.replace(clients.to_vec());
    }
}
