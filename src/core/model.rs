use crate::change::Change;
use crate::change::Direction;
use crate::change::Toggle;
use crate::client::Client;
use crate::command;
use crate::command::Amount;
use crate::command::ColorTarget;
use crate::command::Command;
use crate::command::ManagerCommand;
use crate::command::SetCommand;
use crate::command::WindowCommand;
use crate::command::WorkspaceAction;
use crate::config::Settings;
use crate::defaults::CLIENT_RULES;
use crate::defaults::WORKSPACE_RULES;
use crate::error::CommandError;
use crate::error::StateChangeError;
use crate::fifo::ControlChannel;
use crate::layout;
use crate::layout::LayoutKind;
use crate::monitor::apply_struts;
use crate::monitor::monitor_at;
use crate::monitor::Panel;
use crate::reconcile::assign_workspaces;
use crate::reconcile::reconcile;
use crate::rule::Rules;
use crate::rule::WorkspaceRule;
use crate::signal;
use crate::store::ClientId;
use crate::store::Store;
use crate::util::Util;
use crate::workspace::Workspace;

use winsys::connection::Connection;
use winsys::event::ConfigureRequest;
use winsys::event::Event;
use winsys::event::PropertyKind;
use winsys::event::ToggleAction;
use winsys::geometry::Dim;
use winsys::geometry::Extents;
use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::input::Grab;
use winsys::input::MouseEvent;
use winsys::input::MouseEventKind;
use winsys::screen::Output;
use winsys::window::IcccmWindowState;
use winsys::window::Window;
use winsys::window::WindowState;
use winsys::window::WindowType;

use std::os::unix::io::RawFd;
use std::path::PathBuf;

use nix::errno::Errno;
use nix::sys::select::select;
use nix::sys::select::FdSet;
use nix::sys::time::TimeVal;

/// An interactive move or resize in progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct GrabState {
    kind: Grab,
    client: ClientId,
    origin: Pos,
    region: Region,
    last_time: u32,
}

pub struct Model<'a> {
    conn: &'a dyn Connection,
    store: Store,
    settings: Settings,
    screen: Region,
    selws: usize,
    grab: Option<GrabState>,
    last_motion: u32,
    running: bool,
    restart: bool,
    script: Option<PathBuf>,
}

impl<'a> Model<'a> {
    pub fn new(
        conn: &'a dyn Connection,
        script: Option<PathBuf>,
    ) -> Self {
        let workspaces = WORKSPACE_RULES
            .iter()
            .enumerate()
            .map(|(i, rule)| Workspace::new(i, rule))
            .collect();

        let mut model = Self {
            conn,
            store: Store::new(workspaces),
            settings: Settings::default(),
            screen: conn.screen_region(),
            selws: 0,
            grab: None,
            last_motion: 0,
            running: true,
            restart: false,
            script,
        };

        model.init();
        model
    }

    fn init(&mut self) {
        info!("initializing window manager");

        self.update_outputs();
        self.update_num_workspaces(self.store.monitors.len());
        self.conn
            .init_wm_properties(WM_NAME!(), &self.store.workspace_names());

        assign_workspaces(&mut self.store.workspaces, &mut self.store.monitors, 0);

        let nworkspaces = self.store.workspaces.len();
        self.selws = match self.conn.get_current_desktop() {
            Some(index) if index < nworkspaces => index,
            _ => self
                .store
                .monitors
                .iter()
                .find(|monitor| monitor.primary)
                .map_or(0, |monitor| monitor.workspace),
        };

        assign_workspaces(
            &mut self.store.workspaces,
            &mut self.store.monitors,
            self.selws,
        );

        self.conn.set_current_desktop(self.selws);
        self.conn.set_desktop_geometry(self.screen.dim);
        self.apply_struts();

        self.scan();

        self.layout(None);
        self.focus(None);
        self.restack(self.selws);
        self.update_client_list();

        if let Some(script) = &self.script {
            Util::spawn_script(script);
        }
    }

    pub fn run(
        &mut self,
        channel: &mut ControlChannel,
        display_fd: RawFd,
    ) {
        while self.running && signal::running() {
            loop {
                match self.conn.poll() {
                    Ok(Some(event)) => {
                        trace!("received event: {:?}", event);
                        self.handle_event(event);
                    },
                    Ok(None) => break,
                    Err(err) => {
                        error!("lost connection to the display server: {}", err);
                        self.running = false;
                        return;
                    },
                }
            }

            self.conn.flush();

            if !self.running || !signal::running() {
                break;
            }

            // commands wait until an interactive grab ends
            let listening = self.grab.is_none();

            let mut fds = FdSet::new();
            fds.insert(display_fd);

            if listening {
                fds.insert(channel.fd());
            }

            match select(
                None,
                &mut fds,
                None::<&mut FdSet>,
                None::<&mut FdSet>,
                None::<&mut TimeVal>,
            ) {
                Ok(_) => {},
                Err(nix::Error::Sys(Errno::EINTR)) => continue,
                Err(err) => {
                    error!("unable to wait for events: {}", err);
                    self.running = false;
                    break;
                },
            }

            if listening && fds.contains(channel.fd()) {
                for line in channel.read_lines() {
                    if let Err(err) = self.execute_line(&line) {
                        channel.reply(&err.to_string());
                    }
                }
            }
        }
    }

    pub fn exit(&mut self) {
        info!("exiting window manager");

        if self.grab.take().is_some() {
            self.conn.release_pointer();
        }

        for id in self.store.ids() {
            if let Some(client) = self.store.client(id) {
                let window = client.window;

                self.conn.move_window(window, client.region.pos);
                self.conn
                    .set_window_border_width(window, client.original_border_width);
                self.conn
                    .set_icccm_window_state(window, IcccmWindowState::Withdrawn);
                self.conn.ungrab_buttons(window);
            }
        }

        self.conn.cleanup();
        self.conn.flush();

        self.running = false;
    }

    #[inline]
    pub fn restart_requested(&self) -> bool {
        self.restart
    }

    #[inline]
    fn sel(&self) -> Option<ClientId> {
        self.store.workspaces[self.selws].sel
    }

    fn monitor_region(
        &self,
        workspace: usize,
    ) -> Region {
        self.store.workspaces[workspace]
            .monitor
            .and_then(|monitor| self.store.monitors.get(monitor))
            .map_or(self.screen, |monitor| monitor.region)
    }

    fn workarea(
        &self,
        workspace: usize,
    ) -> Region {
        self.store.workspaces[workspace]
            .monitor
            .and_then(|monitor| self.store.monitors.get(monitor))
            .map_or(self.screen, |monitor| monitor.workarea)
    }

    fn workspace_rule(index: usize) -> &'static WorkspaceRule {
        WORKSPACE_RULES
            .get(index)
            .unwrap_or(&WORKSPACE_RULES[WORKSPACE_RULES.len() - 1])
    }

    fn update_outputs(&mut self) -> bool {
        let screen = self.screen;
        let default = || vec![Output::new(0, "default", Some(screen))];
        let outputs = self.conn.connected_outputs().unwrap_or_else(default);

        let mut changed = reconcile(&mut self.store.monitors, &outputs);

        if self.store.monitors.is_empty() {
            changed |= reconcile(&mut self.store.monitors, &default());
        }

        let primary = self.conn.primary_output();

        for monitor in self.store.monitors.iter_mut() {
            monitor.primary = Some(monitor.id) == primary;
        }

        if !self.store.monitors.iter().any(|monitor| monitor.primary) {
            if let Some(monitor) = self.store.monitors.first_mut() {
                monitor.primary = true;
            }
        }

        changed
    }

    fn update_num_workspaces(
        &mut self,
        needed: usize,
    ) {
        let mut grown = false;

        while self.store.workspaces.len() < needed {
            let next = match self.store.workspaces.last() {
                Some(last) => Workspace::following(last),
                None => Workspace::new(0, Self::workspace_rule(0)),
            };

            info!("adding workspace {}", next.name);
            self.store.workspaces.push(next);
            grown = true;
        }

        if grown {
            self.conn.update_desktops(&self.store.workspace_names());
        }
    }

    fn fix_workspaces(&mut self) {
        self.update_num_workspaces(self.store.monitors.len());

        assign_workspaces(
            &mut self.store.workspaces,
            &mut self.store.monitors,
            self.selws,
        );

        for id in self.store.ids() {
            let workspace = match self.store.client(id) {
                Some(client) if client.fullscreen => client.workspace,
                _ => continue,
            };

            let region = self.monitor_region(workspace);
            self.resize(id, region, 0);
        }

        self.conn.set_desktop_geometry(self.screen.dim);
        self.apply_struts();

        self.focus(None);
        self.layout(None);
        self.restack(self.selws);
    }

    fn apply_struts(&mut self) {
        apply_struts(&mut self.store.monitors, &mut self.store.panels);
        self.publish_areas();
    }

    fn publish_areas(&self) {
        let monitors: Vec<_> = self
            .store
            .workspaces
            .iter()
            .map(|workspace| {
                workspace
                    .monitor
                    .and_then(|monitor| self.store.monitors.get(monitor))
            })
            .collect();

        let workareas: Vec<Region> = monitors
            .iter()
            .map(|monitor| monitor.map_or(self.screen, |monitor| monitor.workarea))
            .collect();

        let viewports: Vec<Pos> = monitors
            .iter()
            .map(|monitor| monitor.map_or(Pos::default(), |monitor| monitor.region.pos))
            .collect();

        self.conn.set_workarea(&workareas);
        self.conn.set_desktop_viewport(&viewports);
    }

    #[inline]
    fn update_client_list(&self) {
        self.conn.update_client_list(&self.store.client_list());
    }

    fn scan(&mut self) {
        let mut transients = Vec::new();

        for window in self.conn.top_level_windows() {
            if self.conn.window_is_override_redirect(window) {
                continue;
            }

            let viewable = self.conn.window_is_viewable(window);

            if self.conn.window_has_type(window, WindowType::Dock) {
                if viewable {
                    self.add_panel(window);
                }

                continue;
            }

            if self.conn.get_icccm_window_transient_for(window).is_some() {
                transients.push(window);
                continue;
            }

            if self.is_adoptable(window, viewable) {
                self.manage(window);
            }
        }

        for window in transients {
            let viewable = self.conn.window_is_viewable(window);

            if self.is_adoptable(window, viewable) {
                self.manage(window);
            }
        }
    }

    #[inline]
    fn is_adoptable(
        &self,
        window: Window,
        viewable: bool,
    ) -> bool {
        viewable || self.conn.get_icccm_window_state(window) == Some(IcccmWindowState::Iconic)
    }

    fn manage(
        &mut self,
        window: Window,
    ) {
        let (region, original_border_width) = match self.conn.get_window_geometry(window) {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!("unable to read geometry of window {:#0x}: {}", window, err);
                (Region::default(), 0)
            },
        };

        let (class, instance) = self.conn.get_icccm_window_class(window);
        let rules = Rules::collect(&CLIENT_RULES, &class, &instance);
        let nworkspaces = self.store.workspaces.len();

        let parent = self
            .conn
            .get_icccm_window_transient_for(window)
            .and_then(|parent| self.store.find(parent))
            .and_then(|parent| self.store.client(parent))
            .map(|parent| parent.workspace);

        let workspace = match parent {
            Some(workspace) => workspace,
            None => self
                .conn
                .get_window_desktop(window)
                .filter(|&index| index < nworkspaces)
                .or_else(|| rules.workspace.filter(|&index| index < nworkspaces))
                .or_else(|| {
                    rules.monitor.and_then(|name| {
                        self.store
                            .monitors
                            .iter()
                            .find(|monitor| monitor.name == name)
                            .map(|monitor| monitor.workspace)
                    })
                })
                .unwrap_or(self.selws),
        };

        let border_width = self.settings.border_width;

        let mut client = Client::new(window, workspace, region, original_border_width);
        rules.propagate(&mut client);
        client.floating |= parent.is_some();
        client.border_width = border_width;
        client.saved_border_width = border_width;

        let id = self.store.insert(client);
        self.store.attach(id, self.settings.tile_to_head);
        self.store.attach_stack(id);

        self.conn.set_window_border_width(window, border_width);
        self.conn.send_configure_notify(window, region, border_width);
        self.conn.set_window_desktop(window, workspace);

        self.update_window_type(id);
        self.update_size_hints(id);
        self.update_hints(id);

        self.conn.init_window(window);
        self.conn
            .set_window_border_color(window, self.settings.unfocus_color);
        self.conn
            .grab_buttons(window, false, &self.settings.mouse);

        let area = self.workarea(workspace);
        let (floating, outside) = match self.store.client_mut(id) {
            Some(client) => {
                client.floating |= client.fixed;

                let (pos, _) = client.region.values();
                let outside = pos.x < area.pos.x
                    || pos.y < area.pos.y
                    || pos.x + client.outer_width() > area.pos.x + area.dim.w
                    || pos.y + client.outer_height() > area.pos.y + area.dim.h;

                (client.floating && !client.fullscreen, outside)
            },
            None => return,
        };

        if floating {
            if outside {
                self.center(id);
            }

            self.conn.stack_window_above(window, None);
        }

        self.update_client_list();
        self.conn.set_window_frame_extents(
            window,
            Extents::with_each_edge(border_width as i32),
        );
        self.conn
            .set_icccm_window_state(window, IcccmWindowState::Normal);

        if self.store.is_visible(workspace) {
            if workspace == self.selws {
                self.unfocus(self.sel(), false);
            }

            self.layout(Some(workspace));
        } else if let Some(client) = self.store.client(id) {
            self.conn.move_window(window, Pos {
                x: -2 * client.outer_width(),
                y: client.region.pos.y,
            });
        }

        self.store.workspaces[workspace].sel = Some(id);
        self.conn.map_window(window);
        self.focus(None);

        info!(
            "managing client {:#0x} ({}) on workspace {}",
            window, class, workspace
        );
    }

    fn unmanage(
        &mut self,
        id: ClientId,
        destroyed: bool,
    ) {
        let (window, workspace, original_border_width) = match self.store.client(id) {
            Some(client) => (
                client.window,
                client.workspace,
                client.original_border_width,
            ),
            None => return,
        };

        self.store.detach(id, false);
        self.store.detach_stack(id);

        if !destroyed {
            self.conn
                .set_window_border_width(window, original_border_width);
            self.conn.ungrab_buttons(window);
            self.conn
                .set_icccm_window_state(window, IcccmWindowState::Withdrawn);
        }

        self.store.remove(id);

        if self.grab.map_or(false, |grab| grab.client == id) {
            self.grab = None;
            self.conn.release_pointer();
        }

        self.update_client_list();
        self.layout(Some(workspace));
        self.focus(None);

        info!("unmanaged client {:#0x}", window);
    }

    fn add_panel(
        &mut self,
        window: Window,
    ) {
        let region = match self.conn.get_window_geometry(window) {
            Ok((region, _)) => region,
            Err(err) => {
                warn!("unable to read geometry of panel {:#0x}: {}", window, err);
                return;
            },
        };

        let strut = self.conn.get_window_strut(window).unwrap_or_default();
        self.store.panels.push(Panel::new(window, region, strut));
        self.apply_struts();

        self.conn.init_panel(window);
        self.conn
            .set_icccm_window_state(window, IcccmWindowState::Normal);
        self.conn.map_window(window);

        self.layout(None);

        info!("added panel {:#0x} reserving {:?}", window, strut);
    }

    fn remove_panel(
        &mut self,
        index: usize,
        destroyed: bool,
    ) {
        let panel = self.store.panels.remove(index);

        if !destroyed {
            self.conn
                .set_icccm_window_state(panel.window, IcccmWindowState::Withdrawn);
        }

        self.apply_struts();
        self.layout(None);

        info!("removed panel {:#0x}", panel.window);
    }

    fn update_size_hints(
        &mut self,
        id: ClientId,
    ) {
        if let Some(window) = self.store.window(id) {
            let size_hints = self
                .conn
                .get_icccm_window_size_hints(window)
                .unwrap_or_default();

            if let Some(client) = self.store.client_mut(id) {
                client.set_size_hints(size_hints);
            }
        }
    }

    fn update_hints(
        &mut self,
        id: ClientId,
    ) {
        let window = match self.store.window(id) {
            Some(window) => window,
            None => return,
        };

        let mut hints = match self.conn.get_icccm_window_hints(window) {
            Some(hints) => hints,
            None => return,
        };

        let focused = self.sel() == Some(id);

        if focused && hints.urgent {
            hints.urgent = false;
            self.conn.set_icccm_window_hints(window, hints);
        }

        if let Some(client) = self.store.client_mut(id) {
            client.urgent = hints.urgent;
            client.nofocus = hints.refuses_input();
        }
    }

    fn update_window_type(
        &mut self,
        id: ClientId,
    ) {
        let window = match self.store.window(id) {
            Some(window) => window,
            None => return,
        };

        if self.conn.window_is_fullscreen(window) {
            self.set_fullscreen(id, true);
        } else if self.conn.window_has_type(window, WindowType::Dialog) {
            if let Some(client) = self.store.client_mut(id) {
                client.floating = true;
            }
        }
    }

    fn set_urgency(
        &mut self,
        id: ClientId,
        urgent: bool,
    ) {
        let window = match self.store.client_mut(id) {
            Some(client) => {
                client.urgent = urgent;
                client.window
            },
            None => return,
        };

        if let Some(mut hints) = self.conn.get_icccm_window_hints(window) {
            hints.urgent = urgent;
            self.conn.set_icccm_window_hints(window, hints);
        }
    }

    /// Applies a geometry verbatim and tells the client about it.
    fn resize(
        &mut self,
        id: ClientId,
        region: Region,
        border_width: u32,
    ) {
        let window = match self.store.client_mut(id) {
            Some(client) => {
                client.region = region;
                client.window
            },
            None => return,
        };

        self.conn.place_window(window, region, border_width);
        self.conn
            .send_configure_notify(window, region, border_width);
    }

    /// Constrains a requested geometry before applying it. Nothing is sent
    /// when the constrained geometry equals the current one.
    fn resize_hinted(
        &mut self,
        id: ClientId,
        region: Region,
        user_motion: bool,
    ) {
        let client = match self.store.client(id) {
            Some(client) => client,
            None => return,
        };

        let workspace = client.workspace;
        let apply_hints = client.floating || !self.store.workspaces[workspace].layout.arranges();

        let bounds = if user_motion {
            self.screen
        } else {
            self.workarea(workspace)
        };

        let (region, changed) = client.constrain(region, bounds, apply_hints);
        let border_width = client.border_width;

        if changed {
            self.resize(id, region, border_width);
        }
    }

    fn center(
        &mut self,
        id: ClientId,
    ) {
        let region = match self.store.client(id) {
            Some(client) if client.floating => Region {
                pos: client.centered_in(self.workarea(client.workspace)),
                dim: client.region.dim,
            },
            _ => return,
        };

        self.resize_hinted(id, region, false);
    }

    fn show_hide(
        &mut self,
        workspace: usize,
    ) {
        let arranges = self.store.workspaces[workspace].layout.arranges();
        let stack = self.store.workspaces[workspace].stack.clone();

        if self.store.is_visible(workspace) {
            for id in stack {
                let (window, region, border_width, free) = match self.store.client(id) {
                    Some(client) => (
                        client.window,
                        client.region,
                        client.border_width,
                        (!arranges || client.floating) && !client.fullscreen,
                    ),
                    None => continue,
                };

                self.conn.move_window(window, region.pos);

                if free {
                    self.resize(id, region, border_width);
                }
            }
        } else {
            for id in stack.into_iter().rev() {
                if let Some(client) = self.store.client(id) {
                    self.conn.move_window(client.window, Pos {
                        x: -2 * client.outer_width(),
                        y: client.region.pos.y,
                    });
                }
            }
        }
    }

    fn arrange(
        &mut self,
        workspace: usize,
    ) {
        let kind = self.store.workspaces[workspace].layout;

        if !self.store.is_visible(workspace) || !kind.arranges() {
            return;
        }

        let tiled = self.store.tiled(workspace);
        let placements = layout::arrange(
            kind,
            &self.store.workspaces[workspace].params(),
            self.workarea(workspace),
            tiled.len(),
            self.settings.border_width,
            self.settings.smart_borders,
        );

        for (id, (region, border_width)) in tiled.into_iter().zip(placements) {
            self.resize(id, region, border_width);
        }
    }

    fn layout(
        &mut self,
        workspace: Option<usize>,
    ) {
        match workspace {
            Some(workspace) => {
                self.show_hide(workspace);
                self.arrange(workspace);
                self.restack(workspace);
            },
            None => {
                for workspace in 0..self.store.workspaces.len() {
                    self.show_hide(workspace);
                }

                for workspace in 0..self.store.workspaces.len() {
                    self.arrange(workspace);
                }
            },
        }
    }

    fn restack(
        &mut self,
        workspace: usize,
    ) {
        let sel = match self.store.workspaces[workspace].sel {
            Some(sel) => sel,
            None => return,
        };

        let arranges = self.store.workspaces[workspace].layout.arranges();

        if let Some(client) = self.store.client(sel) {
            if client.floating || client.fullscreen || !arranges {
                self.conn.stack_window_above(client.window, None);
            }
        }

        if arranges && self.store.is_visible(workspace) {
            for &id in &self.store.workspaces[workspace].stack {
                if let Some(client) = self.store.client(id) {
                    if client.is_tiled() {
                        self.conn.stack_window_below(client.window, None);
                    }
                }
            }
        }

        self.conn.discard_enter_events();
    }

    fn focus(
        &mut self,
        target: Option<ClientId>,
    ) {
        let target = target
            .filter(|&id| {
                self.store
                    .client(id)
                    .map_or(false, |client| self.store.is_visible(client.workspace))
            })
            .or_else(|| self.store.workspaces[self.selws].stack.first().copied());

        let prev = self.sel();

        if prev.is_some() && prev != target {
            self.unfocus(prev, false);
        }

        let id = match target {
            Some(id) => id,
            None => {
                self.conn.unfocus();
                self.store.workspaces[self.selws].sel = None;
                return;
            },
        };

        let (window, workspace, accepts_input, urgent) = match self.store.client(id) {
            Some(client) => (
                client.window,
                client.workspace,
                !client.nofocus,
                client.urgent,
            ),
            None => return,
        };

        if workspace != self.selws {
            self.change_workspace(workspace, true);
        }

        if urgent {
            self.set_urgency(id, false);
        }

        self.store.detach_stack(id);
        self.store.attach_stack(id);

        self.conn
            .grab_buttons(window, true, &self.settings.mouse);
        self.conn
            .set_window_border_color(window, self.settings.focus_color);
        self.conn.focus_window(window, accepts_input);

        self.store.workspaces[workspace].sel = Some(id);

        debug!("focused client {:#0x}", window);
    }

    fn unfocus(
        &self,
        id: Option<ClientId>,
        focus_root: bool,
    ) {
        if let Some(window) = id.and_then(|id| self.store.window(id)) {
            self.conn
                .grab_buttons(window, false, &self.settings.mouse);
            self.conn
                .set_window_border_color(window, self.settings.unfocus_color);
        }

        if focus_root {
            self.conn.unfocus();
        }
    }

    fn change_workspace(
        &mut self,
        workspace: usize,
        user_motion: bool,
    ) {
        let prev_monitor = self.store.workspaces[self.selws].monitor;
        let monitor = self.store.workspaces[workspace].monitor;

        self.selws = workspace;

        if let Some(index) = monitor {
            self.store.monitors[index].workspace = workspace;

            if !user_motion && monitor != prev_monitor {
                self.conn
                    .warp_pointer(self.store.monitors[index].center());
            }
        }

        self.conn.set_current_desktop(workspace);
    }

    fn activate_workspace(
        &mut self,
        workspace: usize,
    ) {
        self.unfocus(self.sel(), false);
        self.change_workspace(workspace, false);

        self.focus(None);
        self.layout(None);
        self.restack(self.selws);

        info!("activated workspace {}", self.store.workspaces[workspace].name);
    }

    fn move_client_to_workspace(
        &mut self,
        id: ClientId,
        workspace: usize,
    ) {
        if self.sel() == Some(id) {
            self.unfocus(Some(id), true);
        }

        self.set_client_workspace(id, workspace);

        self.focus(None);
        self.layout(None);
    }

    fn set_client_workspace(
        &mut self,
        id: ClientId,
        workspace: usize,
    ) {
        self.store.set_workspace(id, workspace);

        if let Some(window) = self.store.window(id) {
            self.conn.set_window_desktop(window, workspace);
        }

        if self.store.client(id).map_or(false, |client| client.fullscreen) {
            let region = self.monitor_region(workspace);
            self.resize(id, region, 0);
        }

        self.update_client_list();
    }

    fn set_fullscreen(
        &mut self,
        id: ClientId,
        fullscreen: bool,
    ) {
        let (window, workspace) = match self.store.client(id) {
            Some(client) if client.fullscreen != fullscreen => (client.window, client.workspace),
            _ => return,
        };

        if fullscreen {
            if let Some(client) = self.store.client_mut(id) {
                client.prev_floating = client.floating;
                client.saved_border_width = client.border_width;
                client.prev_region = client.region;
                client.border_width = 0;
                client.fullscreen = true;
            }

            let region = self.monitor_region(workspace);

            self.conn
                .set_window_state(window, WindowState::Fullscreen, true);
            self.resize(id, region, 0);
            self.layout(Some(workspace));
            self.conn.stack_window_above(window, None);
        } else {
            let (region, border_width) = match self.store.client_mut(id) {
                Some(client) => {
                    client.fullscreen = false;
                    client.floating = client.prev_floating;
                    client.border_width = client.saved_border_width;
                    (client.prev_region, client.border_width)
                },
                None => return,
            };

            self.conn
                .set_window_state(window, WindowState::Fullscreen, false);
            self.resize(id, region, border_width);
            self.layout(Some(workspace));
        }
    }

    pub fn toggle_float(&mut self) -> Result<(), StateChangeError> {
        let id = self.sel().ok_or(StateChangeError::InvalidCaller)?;
        let area = self.workarea(self.selws);

        let (workspace, floating, region) = match self.store.client_mut(id) {
            Some(client) if !client.fullscreen => {
                let floating = !client.floating || client.fixed;

                if floating == client.floating {
                    return Err(StateChangeError::StateUnchanged);
                }

                client.floating = floating;

                if !floating {
                    client.float_region = Some(client.region);
                }

                let region = match client.float_region {
                    Some(region) => region,
                    None => Region {
                        pos: client.centered_in(area),
                        dim: client.region.dim,
                    },
                };

                (client.workspace, floating, region)
            },
            _ => return Err(StateChangeError::InvalidCaller),
        };

        if floating {
            self.resize_hinted(id, region, false);
        }

        self.layout(Some(workspace));
        Ok(())
    }

    pub fn cycle_focus(
        &mut self,
        steps: i32,
    ) -> Result<(), StateChangeError> {
        let sel = self.sel().ok_or(StateChangeError::InvalidCaller)?;

        if self.store.client(sel).map_or(true, |client| client.fullscreen) {
            return Err(StateChangeError::InvalidCaller);
        }

        let (direction, count) = Direction::from_steps(steps).ok_or(StateChangeError::StateUnchanged)?;
        let clients = &self.store.workspaces[self.selws].clients;
        let len = clients.len();

        let index = clients
            .iter()
            .position(|&id| id == sel)
            .ok_or(StateChangeError::InvalidCaller)?;

        let offset = count as usize % len;
        let target = clients[match direction {
            Direction::Forward => (index + offset) % len,
            Direction::Backward => (index + len - offset) % len,
        }];

        if target == sel {
            return Err(StateChangeError::StateUnchanged);
        }

        self.focus(Some(target));
        self.restack(self.selws);
        Ok(())
    }

    pub fn move_stack(
        &mut self,
        steps: i32,
    ) -> Result<(), StateChangeError> {
        let sel = self.sel().ok_or(StateChangeError::InvalidCaller)?;
        let workspace = self.selws;

        if !self.store.workspaces[workspace].layout.arranges()
            || !self.store.client(sel).map_or(false, Client::is_tiled)
        {
            return Err(StateChangeError::InvalidCaller);
        }

        let (direction, count) = Direction::from_steps(steps).ok_or(StateChangeError::StateUnchanged)?;
        let len = self.store.tiled(workspace).len();

        if len < 2 {
            return Err(StateChangeError::StateUnchanged);
        }

        for _ in 0..(count as usize % len) {
            self.move_once(sel, direction);
        }

        self.update_client_list();
        self.layout(Some(workspace));
        self.focus(Some(sel));
        Ok(())
    }

    /// Moves a tiled client one place along the tiling order, wrapping
    /// around at either end.
    fn move_once(
        &mut self,
        id: ClientId,
        direction: Direction,
    ) {
        let workspace = self.selws;
        let tiled = self.store.tiled(workspace);

        let index = match tiled.iter().position(|&c| c == id) {
            Some(index) => index,
            None => return,
        };

        let clients = &mut self.store.workspaces[workspace].clients;
        clients.retain(|&c| c != id);

        match direction {
            Direction::Forward => match tiled.get(index + 1) {
                Some(&next) => {
                    let at = clients.iter().position(|&c| c == next).map_or(0, |i| i + 1);
                    clients.insert(at, id);
                },
                None => clients.insert(0, id),
            },
            Direction::Backward => match index.checked_sub(1).map(|prev| tiled[prev]) {
                Some(prev) => {
                    let at = clients.iter().position(|&c| c == prev).unwrap_or(0);
                    clients.insert(at, id);
                },
                None => clients.push(id),
            },
        }
    }

    pub fn swap(&mut self) -> Result<(), StateChangeError> {
        let sel = self.sel().ok_or(StateChangeError::InvalidCaller)?;
        let workspace = self.selws;

        if !self.store.workspaces[workspace].layout.arranges()
            || !self.store.client(sel).map_or(false, Client::is_tiled)
        {
            return Err(StateChangeError::InvalidCaller);
        }

        let tiled = self.store.tiled(workspace);

        let target = if tiled.first() == Some(&sel) {
            *tiled.get(1).ok_or(StateChangeError::StateUnchanged)?
        } else {
            sel
        };

        self.store.detach(target, true);
        self.update_client_list();

        self.focus(Some(target));
        self.layout(Some(workspace));
        Ok(())
    }

    pub fn kill_focus(&mut self) -> Result<(), StateChangeError> {
        let window = self
            .sel()
            .and_then(|id| self.store.window(id))
            .ok_or(StateChangeError::InvalidCaller)?;

        self.conn.kill_window(window);
        Ok(())
    }

    pub fn view(
        &mut self,
        index: usize,
    ) -> Result<(), StateChangeError> {
        if index >= self.store.workspaces.len() {
            return Err(StateChangeError::InvalidCaller);
        }

        if index == self.selws {
            return Err(StateChangeError::StateUnchanged);
        }

        self.activate_workspace(index);
        Ok(())
    }

    pub fn send(
        &mut self,
        index: usize,
    ) -> Result<(), StateChangeError> {
        let sel = self.sel().ok_or(StateChangeError::InvalidCaller)?;

        if index >= self.store.workspaces.len() {
            return Err(StateChangeError::InvalidCaller);
        }

        if index == self.selws {
            return Err(StateChangeError::StateUnchanged);
        }

        self.move_client_to_workspace(sel, index);
        Ok(())
    }

    pub fn follow(
        &mut self,
        index: usize,
    ) -> Result<(), StateChangeError> {
        self.send(index)?;
        self.view(index)
    }

    pub fn change_gap(
        &mut self,
        amount: Amount<i32>,
    ) -> Result<(), StateChangeError> {
        let workspace = self.selws;
        let max = self.workarea(workspace).dim.h / 6 - self.settings.border_width as i32;
        let current = self.store.workspaces[workspace].gap;

        let change = match amount {
            Amount::Reset => None,
            Amount::Relative(delta) => {
                Some(Change::from_delta(delta).ok_or(StateChangeError::StateUnchanged)?)
            },
            Amount::Absolute(gap) => {
                let gap = std::cmp::max(std::cmp::min(gap, max), 0);
                Some(Change::from_delta(gap - current).ok_or(StateChangeError::StateUnchanged)?)
            },
        };

        match change {
            Some(change) => self.store.workspaces[workspace].change_gap(change, max)?,
            None => self.store.workspaces[workspace].reset_gap()?,
        }

        self.layout(Some(workspace));
        Ok(())
    }

    pub fn change_border_width(
        &mut self,
        amount: Amount<i32>,
    ) -> Result<(), StateChangeError> {
        let old = self.settings.border_width;
        let max = self.workarea(self.selws).dim.h / 6 - self.store.workspaces[self.selws].gap;

        let border_width = match amount {
            Amount::Relative(delta) => {
                std::cmp::max(std::cmp::min(max, (old as i32).saturating_add(delta)), 1)
            },
            Amount::Absolute(width) => std::cmp::max(std::cmp::min(width, max), 1),
            Amount::Reset => Settings::BORDER_WIDTH as i32,
        } as u32;

        if border_width == old {
            return Err(StateChangeError::StateUnchanged);
        }

        self.settings.border_width = border_width;

        for id in self.store.ids() {
            let window = match self.store.client_mut(id) {
                Some(client) => {
                    if client.saved_border_width == old {
                        client.saved_border_width = border_width;
                    }

                    if client.border_width == 0 || client.border_width != old {
                        continue;
                    }

                    client.border_width = border_width;
                    client.window
                },
                None => continue,
            };

            self.conn.set_window_frame_extents(
                window,
                Extents::with_each_edge(border_width as i32),
            );
        }

        self.layout(None);
        Ok(())
    }

    fn recolor_borders(&self) {
        let sel = self.sel();

        for id in self.store.ids() {
            if let Some(window) = self.store.window(id) {
                let color = if Some(id) == sel {
                    self.settings.focus_color
                } else {
                    self.settings.unfocus_color
                };

                self.conn.set_window_border_color(window, color);
            }
        }
    }

    fn regrab_buttons(&self) {
        let sel = self.sel();

        for id in self.store.ids() {
            if let Some(window) = self.store.window(id) {
                self.conn
                    .grab_buttons(window, Some(id) == sel, &self.settings.mouse);
            }
        }
    }

    pub fn change_split(
        &mut self,
        amount: Amount<f32>,
    ) -> Result<(), StateChangeError> {
        let workspace = self.selws;
        let current = self.store.workspaces[workspace].split;

        let split = match amount {
            Amount::Relative(delta) => current + delta,
            Amount::Absolute(split) => split,
            Amount::Reset => Self::workspace_rule(workspace).split,
        }
        .max(Workspace::MIN_SPLIT)
        .min(Workspace::MAX_SPLIT);

        self.store.workspaces[workspace].set_split(split)?;
        self.layout(Some(workspace));
        Ok(())
    }

    pub fn change_master_count(
        &mut self,
        amount: Amount<i32>,
    ) -> Result<(), StateChangeError> {
        let workspace = self.selws;
        let current = self.store.workspaces[workspace].nmaster as i32;

        let nmaster = match amount {
            Amount::Relative(delta) => current.saturating_add(delta),
            Amount::Absolute(nmaster) => nmaster,
            Amount::Reset => Self::workspace_rule(workspace).nmaster as i32,
        };

        self.store.workspaces[workspace].set_nmaster(nmaster)?;
        self.layout(Some(workspace));
        Ok(())
    }

    pub fn change_stack_count(
        &mut self,
        amount: Amount<i32>,
    ) -> Result<(), StateChangeError> {
        let workspace = self.selws;
        let current = self.store.workspaces[workspace].nstack as i32;

        let nstack = match amount {
            Amount::Relative(delta) => current.saturating_add(delta),
            Amount::Absolute(nstack) => nstack,
            Amount::Reset => Self::workspace_rule(workspace).nstack as i32,
        };

        self.store.workspaces[workspace].set_nstack(nstack)?;
        self.layout(Some(workspace));
        Ok(())
    }

    pub fn set_layout(
        &mut self,
        kind: LayoutKind,
    ) -> Result<(), StateChangeError> {
        let workspace = self.selws;

        self.store.workspaces[workspace].set_layout(kind)?;
        self.layout(Some(workspace));
        Ok(())
    }

    fn apply_setting(
        &mut self,
        command: SetCommand,
    ) -> Result<(), StateChangeError> {
        match command {
            SetCommand::Gap(amount) => self.change_gap(amount),
            SetCommand::BorderWidth(amount) => self.change_border_width(amount),
            SetCommand::BorderColor(target) => {
                match target {
                    ColorTarget::Reset => {
                        self.settings.focus_color = Settings::FOCUS_COLOR;
                        self.settings.unfocus_color = Settings::UNFOCUS_COLOR;
                    },
                    ColorTarget::Focus(color) => self.settings.focus_color = color,
                    ColorTarget::Unfocus(color) => self.settings.unfocus_color = color,
                }

                self.recolor_borders();
                Ok(())
            },
            SetCommand::BorderSmart(smart) => {
                if smart == self.settings.smart_borders {
                    return Err(StateChangeError::StateUnchanged);
                }

                self.settings.smart_borders = smart;
                self.layout(None);
                Ok(())
            },
            SetCommand::Split(amount) => self.change_split(amount),
            SetCommand::Master(amount) => self.change_master_count(amount),
            SetCommand::Stack(amount) => self.change_stack_count(amount),
            SetCommand::Layout(kind) => self.set_layout(kind),
            SetCommand::Mouse {
                modifier,
                move_button,
                resize_button,
            } => {
                let mouse = &mut self.settings.mouse;

                if let Some(modifier) = modifier {
                    mouse.modifier = modifier;
                }

                if let Some(button) = move_button {
                    mouse.move_button = button;
                }

                if let Some(button) = resize_button {
                    mouse.resize_button = button;
                }

                self.regrab_buttons();
                Ok(())
            },
            SetCommand::FocusMouse(enabled) => {
                self.settings.focus_follows_mouse = enabled;
                Ok(())
            },
        }
    }

    pub fn execute(
        &mut self,
        command: Command,
    ) {
        debug!("executing command {:?}", command);

        let result = match command {
            Command::Window(command) => match command {
                WindowCommand::Float => self.toggle_float(),
                WindowCommand::Focus(steps) => self.cycle_focus(steps),
                WindowCommand::Kill => self.kill_focus(),
                WindowCommand::Move(steps) => self.move_stack(steps),
                WindowCommand::Swap => self.swap(),
            },
            Command::Set(command) => self.apply_setting(command),
            Command::Workspace(action, index) => match action {
                WorkspaceAction::View => self.view(index),
                WorkspaceAction::Send => self.send(index),
                WorkspaceAction::Follow => self.follow(index),
            },
            Command::Manager(command) => {
                match command {
                    ManagerCommand::Reload => match &self.script {
                        Some(script) => Util::spawn_script(script),
                        None => warn!("no startup script to reload"),
                    },
                    ManagerCommand::Restart => {
                        self.restart = true;
                        self.running = false;
                    },
                    ManagerCommand::Exit => self.running = false,
                }

                Ok(())
            },
        };

        if let Err(err) = result {
            debug!("command {:?} had no effect: {:?}", command, err);
        }
    }

    /// Executes every command on a line in order. Commands before a
    /// malformed one still take effect.
    pub fn execute_line(
        &mut self,
        line: &str,
    ) -> Result<(), CommandError> {
        for command in command::parse(line) {
            self.execute(command?);
        }

        Ok(())
    }

    pub(crate) fn handle_event(
        &mut self,
        event: Event,
    ) {
        match event {
            Event::Mouse {
                event,
            } => self.handle_mouse(event),
            Event::MapRequest {
                window,
                ignore,
            } => self.handle_map_request(window, ignore),
            Event::Enter {
                window,
                root_rpos,
            } => self.handle_enter(window, root_rpos),
            Event::FocusIn {
                window,
            } => self.handle_focus_in(window),
            Event::Destroy {
                window,
            } => self.handle_destroy(window),
            Event::Unmap {
                window,
                synthetic,
            } => self.handle_unmap(window, synthetic),
            Event::ConfigureRequest {
                request,
            } => self.handle_configure_request(request),
            Event::Configure {
                window,
                region,
                on_root,
            } => self.handle_configure(window, region, on_root),
            Event::StateRequest {
                window,
                state,
                action,
                on_root,
            } => self.handle_state_request(window, state, action, on_root),
            Event::FocusRequest {
                window,
                on_root,
            } => self.handle_focus_request(window, on_root),
            Event::CloseRequest {
                window,
                on_root,
            } => self.handle_close_request(window, on_root),
            Event::WorkspaceRequest {
                window,
                index,
                on_root,
            } => self.handle_workspace_request(window, index, on_root),
            Event::Property {
                window,
                kind,
                on_root,
            } => self.handle_property(window, kind, on_root),
            Event::ScreenChange => self.handle_screen_change(),
            Event::ProtocolError {
                code,
                major,
            } => self.handle_protocol_error(code, major),
        }
    }

    fn handle_mouse(
        &mut self,
        event: MouseEvent,
    ) {
        match event.kind {
            MouseEventKind::Press => self.handle_button_press(event),
            MouseEventKind::Motion => self.handle_motion(event),
            MouseEventKind::Release => self.handle_button_release(),
        }
    }

    fn handle_button_press(
        &mut self,
        event: MouseEvent,
    ) {
        if self.grab.is_some() {
            return;
        }

        let id = match event.window.and_then(|window| self.store.find(window)) {
            Some(id) => id,
            None => return,
        };

        self.focus(Some(id));
        self.restack(self.selws);

        let grabbed = match self.settings.mouse.grab_for(&event) {
            Some(kind) => self.start_grab(id, kind, event.root_rpos, event.time),
            None => false,
        };

        if !grabbed {
            self.conn.replay_pointer(event.time);
        }
    }

    fn start_grab(
        &mut self,
        id: ClientId,
        kind: Grab,
        pos: Pos,
        time: u32,
    ) -> bool {
        let (region, border_width) = match self.store.client(id) {
            Some(client) if !client.fullscreen => (client.region, client.border_width as i32),
            _ => return false,
        };

        if !self.conn.grab_pointer(kind) {
            return false;
        }

        let origin = match kind {
            Grab::Move => pos,
            Grab::Resize => {
                let corner = region.pos
                    + Pos {
                        x: region.dim.w + border_width - 1,
                        y: region.dim.h + border_width - 1,
                    };

                self.conn.warp_pointer(corner);
                corner
            },
        };

        debug!("started {:?} grab on client {}", kind, id);

        self.grab = Some(GrabState {
            kind,
            client: id,
            origin,
            region,
            last_time: time,
        });

        true
    }

    fn handle_motion(
        &mut self,
        event: MouseEvent,
    ) {
        match self.grab {
            Some(grab) => self.handle_grab_motion(grab, event),
            None if event.window.is_none() => self.handle_root_motion(event),
            None => {},
        }
    }

    fn handle_grab_motion(
        &mut self,
        grab: GrabState,
        event: MouseEvent,
    ) {
        if event.time.wrapping_sub(grab.last_time) < Settings::MOTION_INTERVAL {
            return;
        }

        if let Some(grab) = self.grab.as_mut() {
            grab.last_time = event.time;
        }

        let id = grab.client;
        let (workspace, current, tiled) = match self.store.client(id) {
            Some(client) => (client.workspace, client.region, client.is_tiled()),
            None => {
                self.grab = None;
                return;
            },
        };

        let delta = event.root_rpos - grab.origin;
        let region = match grab.kind {
            Grab::Move => Region {
                pos: grab.region.pos + delta,
                dim: grab.region.dim,
            },
            Grab::Resize => Region {
                pos: grab.region.pos,
                dim: Dim {
                    w: std::cmp::max(1, grab.region.dim.w + delta.x),
                    h: std::cmp::max(1, grab.region.dim.h + delta.y),
                },
            },
        };

        let arranges = self.store.workspaces[workspace].layout.arranges();

        if region != current && tiled && arranges {
            if let Some(client) = self.store.client_mut(id) {
                client.floating = true;
            }

            self.layout(Some(workspace));
        }

        let free = self
            .store
            .client(id)
            .map_or(false, |client| client.floating || !arranges);

        if !free {
            return;
        }

        if grab.kind == Grab::Move {
            let target = monitor_at(&self.store.monitors, event.root_rpos)
                .map(|monitor| self.store.monitors[monitor].workspace);

            if let Some(target) = target.filter(|&target| target != workspace) {
                self.set_client_workspace(id, target);
                self.change_workspace(target, true);
                self.focus(Some(id));
            }
        }

        self.resize_hinted(id, region, true);
    }

    fn handle_root_motion(
        &mut self,
        event: MouseEvent,
    ) {
        if event.time.wrapping_sub(self.last_motion) < Settings::MOTION_INTERVAL {
            return;
        }

        self.last_motion = event.time;

        let monitor = match monitor_at(&self.store.monitors, event.root_rpos) {
            Some(monitor) => monitor,
            None => return,
        };

        if self.store.workspaces[self.selws].monitor == Some(monitor) {
            return;
        }

        self.unfocus(self.sel(), true);
        self.change_workspace(self.store.monitors[monitor].workspace, true);
        self.focus(None);
    }

    fn handle_button_release(&mut self) {
        if let Some(grab) = self.grab.take() {
            self.conn.release_pointer();

            if grab.kind == Grab::Resize {
                self.conn.discard_enter_events();
            }

            debug!("ended {:?} grab on client {}", grab.kind, grab.client);
        }
    }

    fn handle_map_request(
        &mut self,
        window: Window,
        ignore: bool,
    ) {
        debug!("MAP_REQUEST for window {:#0x}", window);

        if self.store.find(window).is_some() || self.store.find_panel(window).is_some() {
            return;
        }

        if self.conn.window_has_type(window, WindowType::Dock) {
            self.add_panel(window);
        } else if !ignore {
            self.manage(window);
        }
    }

    fn handle_enter(
        &mut self,
        window: Window,
        root_rpos: Pos,
    ) {
        if !self.settings.focus_follows_mouse {
            return;
        }

        let id = self.store.find(window);
        let workspace = id
            .and_then(|id| self.store.client(id))
            .map(|client| client.workspace)
            .or_else(|| {
                monitor_at(&self.store.monitors, root_rpos)
                    .map(|monitor| self.store.monitors[monitor].workspace)
            });

        let workspace = match workspace {
            Some(workspace) => workspace,
            None => return,
        };

        if workspace != self.selws {
            self.unfocus(self.sel(), true);
            self.change_workspace(workspace, true);
        } else if id.is_none() || id == self.sel() {
            return;
        }

        debug!("ENTER for window {:#0x}", window);
        self.focus(id);
    }

    fn handle_focus_in(
        &mut self,
        window: Window,
    ) {
        if let Some(client) = self.sel().and_then(|sel| self.store.client(sel)) {
            if client.window != window {
                self.conn.focus_window(client.window, !client.nofocus);
            }
        }
    }

    fn handle_destroy(
        &mut self,
        window: Window,
    ) {
        debug!("DESTROY for window {:#0x}", window);

        if let Some(id) = self.store.find(window) {
            self.unmanage(id, true);
        } else if let Some(index) = self.store.find_panel(window) {
            self.remove_panel(index, true);
        }
    }

    fn handle_unmap(
        &mut self,
        window: Window,
        synthetic: bool,
    ) {
        debug!("UNMAP for window {:#0x}", window);

        if let Some(id) = self.store.find(window) {
            if synthetic {
                self.conn
                    .set_icccm_window_state(window, IcccmWindowState::Withdrawn);
            } else {
                self.unmanage(id, false);
            }
        } else if let Some(index) = self.store.find_panel(window) {
            self.remove_panel(index, false);
        }
    }

    fn handle_configure_request(
        &mut self,
        request: ConfigureRequest,
    ) {
        let id = match self.store.find(request.window) {
            Some(id) => id,
            None => {
                self.conn.pass_configure_request(&request);
                return;
            },
        };

        let (window, workspace, region, border_width, floating) = match self.store.client(id) {
            Some(client) => (
                client.window,
                client.workspace,
                client.region,
                client.border_width,
                client.floating,
            ),
            None => return,
        };

        let arranges = self.store.workspaces[workspace].layout.arranges();

        if let Some(border_width) = request.border_width {
            if let Some(client) = self.store.client_mut(id) {
                client.border_width = border_width;
            }
        } else if floating || !arranges {
            let monitor = self.monitor_region(workspace);
            let area = self.workarea(workspace);
            let bw = 2 * border_width as i32;

            let mut region = region;

            if let Some(x) = request.x {
                region.pos.x = x;
            }

            if let Some(y) = request.y {
                region.pos.y = y;
            }

            if let Some(w) = request.w {
                region.dim.w = w;
            }

            if let Some(h) = request.h {
                region.dim.h = h;
            }

            if floating && region.pos.x + region.dim.w > monitor.pos.x + monitor.dim.w {
                region.pos.x = area.pos.x + (area.dim.w - (region.dim.w + bw)) / 2;
            }

            if floating && region.pos.y + region.dim.h > monitor.pos.y + monitor.dim.h {
                region.pos.y = area.pos.y + (area.dim.h - (region.dim.h + bw)) / 2;
            }

            if let Some(client) = self.store.client_mut(id) {
                client.region = region;
            }

            if request.changes_position_only() {
                self.conn
                    .send_configure_notify(window, region, border_width);
            }

            if self.store.is_visible(workspace) {
                self.conn.place_window(window, region, border_width);
            }
        } else {
            self.conn
                .send_configure_notify(window, region, border_width);
        }
    }

    fn handle_configure(
        &mut self,
        _window: Window,
        region: Region,
        on_root: bool,
    ) {
        if !on_root || region == self.screen {
            return;
        }

        info!("screen resized to {:?}", region.dim);
        self.screen = region;

        if self.update_outputs() {
            self.fix_workspaces();
        } else {
            self.conn.set_desktop_geometry(self.screen.dim);
        }
    }

    fn handle_state_request(
        &mut self,
        window: Window,
        state: WindowState,
        action: ToggleAction,
        _on_root: bool,
    ) {
        let id = match self.store.find(window) {
            Some(id) => id,
            None => return,
        };

        let (fullscreen, urgent) = match self.store.client(id) {
            Some(client) => (client.fullscreen, client.urgent),
            None => return,
        };

        debug!(
            "STATE_REQUEST for window {:#0x}, with state {:?} and action {:?}",
            window, state, action
        );

        match state {
            WindowState::Fullscreen => {
                self.set_fullscreen(id, Toggle::from(action).eval(fullscreen));
            },
            WindowState::DemandsAttention => {
                let urgent = Toggle::from(action).eval(urgent);

                if !urgent || self.sel() != Some(id) {
                    self.set_urgency(id, urgent);
                }
            },
            _ => {},
        }
    }

    fn handle_focus_request(
        &mut self,
        window: Window,
        _on_root: bool,
    ) {
        let id = match self.store.find(window) {
            Some(id) => id,
            None => return,
        };

        if self.sel() == Some(id) {
            return;
        }

        let workspace = match self.store.client(id) {
            Some(client) => client.workspace,
            None => return,
        };

        if workspace != self.selws {
            self.activate_workspace(workspace);
        }

        self.focus(Some(id));
        self.restack(self.selws);
    }

    fn handle_close_request(
        &mut self,
        window: Window,
        _on_root: bool,
    ) {
        if self.store.find(window).is_some() {
            self.conn.kill_window(window);
        }
    }

    fn handle_workspace_request(
        &mut self,
        window: Option<Window>,
        index: usize,
        _on_root: bool,
    ) {
        debug!("WORKSPACE_REQUEST for workspace {} by {:?}", index, window);

        if index >= self.store.workspaces.len() {
            return;
        }

        match window.map(|window| self.store.find(window)) {
            None => {
                if index != self.selws {
                    self.activate_workspace(index);
                }
            },
            Some(Some(id)) => {
                if self.store.client(id).map_or(false, |client| client.workspace != index) {
                    self.move_client_to_workspace(id, index);
                }
            },
            Some(None) => {},
        }
    }

    fn handle_property(
        &mut self,
        window: Window,
        kind: PropertyKind,
        _on_root: bool,
    ) {
        if kind == PropertyKind::Strut {
            if let Some(index) = self.store.find_panel(window) {
                self.store.panels[index].strut =
                    self.conn.get_window_strut(window).unwrap_or_default();

                self.apply_struts();
                self.layout(None);
            }

            return;
        }

        let id = match self.store.find(window) {
            Some(id) => id,
            None => return,
        };

        match kind {
            PropertyKind::TransientFor => {
                let (workspace, floating) = match self.store.client(id) {
                    Some(client) => (client.workspace, client.floating),
                    None => return,
                };

                let managed_parent = self
                    .conn
                    .get_icccm_window_transient_for(window)
                    .and_then(|parent| self.store.find(parent))
                    .is_some();

                if !floating && managed_parent {
                    if let Some(client) = self.store.client_mut(id) {
                        client.floating = true;
                    }

                    self.layout(Some(workspace));
                }
            },
            PropertyKind::NormalHints => self.update_size_hints(id),
            PropertyKind::Hints => self.update_hints(id),
            PropertyKind::WindowType => {
                let tiled = self.store.client(id).map_or(false, Client::is_tiled);
                self.update_window_type(id);

                if let Some(client) = self.store.client(id).filter(|client| tiled && client.floating) {
                    let workspace = client.workspace;
                    self.layout(Some(workspace));
                }
            },
            PropertyKind::Strut => {},
        }
    }

    fn handle_screen_change(&mut self) {
        if self.update_outputs() {
            self.fix_workspaces();
        }
    }

    fn handle_protocol_error(
        &self,
        code: u8,
        major: u8,
    ) {
        if !is_benign_error(code, major) {
            warn!("protocol error {} from request {}", code, major);
        }
    }
}

/// Errors that stale window handles routinely provoke and that are safe
/// to drop: BadWindow from any request, BadMatch from SetInputFocus and
/// ConfigureWindow, BadAccess from GrabButton and GrabKey.
pub fn is_benign_error(
    code: u8,
    major: u8,
) -> bool {
    const BAD_WINDOW: u8 = 3;
    const BAD_MATCH: u8 = 8;
    const BAD_ACCESS: u8 = 10;

    const CONFIGURE_WINDOW: u8 = 12;
    const GRAB_BUTTON: u8 = 28;
    const GRAB_KEY: u8 = 33;
    const SET_INPUT_FOCUS: u8 = 42;

    match code {
        BAD_WINDOW => true,
        BAD_MATCH => major == SET_INPUT_FOCUS || major == CONFIGURE_WINDOW,
        BAD_ACCESS => major == GRAB_BUTTON || major == GRAB_KEY,
        _ => false,
    }
}
