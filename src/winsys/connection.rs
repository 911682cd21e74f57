use crate::event::ConfigureRequest;
use crate::event::Event;
use crate::geometry::Dim;
use crate::geometry::Extents;
use crate::geometry::Pos;
use crate::geometry::Region;
use crate::geometry::Strut;
use crate::hints::Hints;
use crate::hints::SizeHints;
use crate::input::Grab;
use crate::input::MouseBinding;
use crate::screen::Output;
use crate::screen::OutputId;
use crate::window::IcccmWindowState;
use crate::window::Window;
use crate::window::WindowState;
use crate::window::WindowType;
use crate::Result;

pub trait Connection {
    fn flush(&self) -> bool;
    /// Returns the next already-queued event, if any. An error means the
    /// connection to the server is gone.
    fn poll(&self) -> Result<Option<Event>>;
    fn discard_enter_events(&self);
    fn screen_region(&self) -> Region;
    fn connected_outputs(&self) -> Option<Vec<Output>>;
    fn primary_output(&self) -> Option<OutputId>;
    fn top_level_windows(&self) -> Vec<Window>;
    fn warp_pointer(
        &self,
        pos: Pos,
    );
    fn grab_pointer(
        &self,
        grab: Grab,
    ) -> bool;
    fn release_pointer(&self);
    fn cleanup(&self);

    // Window manipulation
    fn init_window(
        &self,
        window: Window,
    );
    fn init_panel(
        &self,
        window: Window,
    );
    fn map_window(
        &self,
        window: Window,
    );
    fn kill_window(
        &self,
        window: Window,
    ) -> bool;
    fn place_window(
        &self,
        window: Window,
        region: Region,
        border_width: u32,
    );
    fn move_window(
        &self,
        window: Window,
        pos: Pos,
    );
    fn send_configure_notify(
        &self,
        window: Window,
        region: Region,
        border_width: u32,
    );
    fn pass_configure_request(
        &self,
        request: &ConfigureRequest,
    );
    fn focus_window(
        &self,
        window: Window,
        accepts_input: bool,
    );
    fn unfocus(&self);
    fn stack_window_above(
        &self,
        window: Window,
        sibling: Option<Window>,
    );
    fn stack_window_below(
        &self,
        window: Window,
        sibling: Option<Window>,
    );
    fn grab_buttons(
        &self,
        window: Window,
        focused: bool,
        binding: &MouseBinding,
    );
    fn ungrab_buttons(
        &self,
        window: Window,
    );
    fn replay_pointer(
        &self,
        time: u32,
    );
    fn set_window_border_width(
        &self,
        window: Window,
        width: u32,
    );
    fn set_window_border_color(
        &self,
        window: Window,
        color: u32,
    );

    // Window properties
    fn window_is_override_redirect(
        &self,
        window: Window,
    ) -> bool;
    fn window_is_viewable(
        &self,
        window: Window,
    ) -> bool;
    fn window_has_type(
        &self,
        window: Window,
        type_: WindowType,
    ) -> bool;
    fn window_is_fullscreen(
        &self,
        window: Window,
    ) -> bool;
    fn get_window_geometry(
        &self,
        window: Window,
    ) -> Result<(Region, u32)>;
    fn get_icccm_window_state(
        &self,
        window: Window,
    ) -> Option<IcccmWindowState>;
    fn set_icccm_window_state(
        &self,
        window: Window,
        state: IcccmWindowState,
    );
    fn get_icccm_window_hints(
        &self,
        window: Window,
    ) -> Option<Hints>;
    fn set_icccm_window_hints(
        &self,
        window: Window,
        hints: Hints,
    );
    fn get_icccm_window_size_hints(
        &self,
        window: Window,
    ) -> Option<SizeHints>;
    fn get_icccm_window_transient_for(
        &self,
        window: Window,
    ) -> Option<Window>;
    fn get_icccm_window_class(
        &self,
        window: Window,
    ) -> (String, String);
    fn get_window_desktop(
        &self,
        window: Window,
    ) -> Option<usize>;
    fn set_window_desktop(
        &self,
        window: Window,
        index: usize,
    );
    fn set_window_state(
        &self,
        window: Window,
        state: WindowState,
        on: bool,
    );
    fn set_window_frame_extents(
        &self,
        window: Window,
        extents: Extents,
    );
    fn get_window_strut(
        &self,
        window: Window,
    ) -> Option<Strut>;

    // Root properties
    fn init_wm_properties(
        &self,
        wm_name: &str,
        desktop_names: &[String],
    );
    fn get_current_desktop(&self) -> Option<usize>;
    fn set_current_desktop(
        &self,
        index: usize,
    );
    fn set_desktop_geometry(
        &self,
        dim: Dim,
    );
    fn set_workarea(
        &self,
        workareas: &[Region],
    );
    fn set_desktop_viewport(
        &self,
        viewports: &[Pos],
    );
    fn update_desktops(
        &self,
        desktop_names: &[String],
    );
    fn update_client_list(
        &self,
        clients: &[Window],
    );
}
