use crate::client::Client;
use crate::monitor::Monitor;
use crate::monitor::Panel;
use crate::util::BuildIdHasher;
use crate::workspace::Workspace;

use winsys::window::Window;

use std::collections::HashMap;

pub type ClientId = usize;

/// Arena of managed clients, addressed by stable ids, together with the
/// workspaces, monitors and panels that refer to them.
pub struct Store {
    clients: Vec<Option<Client>>,
    vacant: Vec<ClientId>,
    window_map: HashMap<Window, ClientId, BuildIdHasher>,
    pub workspaces: Vec<Workspace>,
    pub monitors: Vec<Monitor>,
    pub panels: Vec<Panel>,
}

impl Store {
    pub fn new(workspaces: Vec<Workspace>) -> Self {
        Self {
            clients: Vec::new(),
            vacant: Vec::new(),
            window_map: HashMap::with_hasher(BuildIdHasher),
            workspaces,
            monitors: Vec::new(),
            panels: Vec::new(),
        }
    }

    pub fn insert(
        &mut self,
        client: Client,
    ) -> ClientId {
        let window = client.window;

        let id = match self.vacant.pop() {
            Some(id) => {
                self.clients[id] = Some(client);
                id
            },
            None => {
                self.clients.push(Some(client));
                self.clients.len() - 1
            },
        };

        self.window_map.insert(window, id);
        id
    }

    /// Removes the client from the arena; it must already be detached.
    pub fn remove(
        &mut self,
        id: ClientId,
    ) -> Option<Client> {
        let client = self.clients.get_mut(id)?.take()?;

        self.window_map.remove(&client.window);
        self.vacant.push(id);
        Some(client)
    }

    #[inline]
    pub fn find(
        &self,
        window: Window,
    ) -> Option<ClientId> {
        self.window_map.get(&window).copied()
    }

    #[inline]
    pub fn client(
        &self,
        id: ClientId,
    ) -> Option<&Client> {
        self.clients.get(id)?.as_ref()
    }

    #[inline]
    pub fn client_mut(
        &mut self,
        id: ClientId,
    ) -> Option<&mut Client> {
        self.clients.get_mut(id)?.as_mut()
    }

    pub fn ids(&self) -> Vec<ClientId> {
        self.workspaces
            .iter()
            .flat_map(|workspace| workspace.clients.iter().copied())
            .collect()
    }

    #[inline]
    pub fn window(
        &self,
        id: ClientId,
    ) -> Option<Window> {
        self.client(id).map(|client| client.window)
    }

    #[inline]
    fn workspace_of(
        &self,
        id: ClientId,
    ) -> Option<usize> {
        self.client(id).map(|client| client.workspace)
    }

    /// Inserts the client into its workspace's tiling order.
    pub fn attach(
        &mut self,
        id: ClientId,
        to_head: bool,
    ) {
        if let Some(index) = self.workspace_of(id) {
            let clients = &mut self.workspaces[index].clients;

            if to_head {
                clients.insert(0, id);
            } else {
                clients.push(id);
            }
        }
    }

    /// Removes the client from its workspace's tiling order, optionally
    /// reinserting it at the head.
    pub fn detach(
        &mut self,
        id: ClientId,
        reattach: bool,
    ) {
        if let Some(index) = self.workspace_of(id) {
            self.workspaces[index].clients.retain(|&c| c != id);

            if reattach {
                self.attach(id, true);
            }
        }
    }

    /// Pushes the client onto the front of its workspace's focus history.
    pub fn attach_stack(
        &mut self,
        id: ClientId,
    ) {
        if let Some(index) = self.workspace_of(id) {
            self.workspaces[index].stack.insert(0, id);
        }
    }

    /// Removes the client from its workspace's focus history. Detaching the
    /// selection promotes the new head of the history.
    pub fn detach_stack(
        &mut self,
        id: ClientId,
    ) {
        if let Some(index) = self.workspace_of(id) {
            let workspace = &mut self.workspaces[index];
            workspace.stack.retain(|&c| c != id);

            if workspace.sel == Some(id) {
                workspace.sel = workspace.stack.first().copied();
            }
        }
    }

    /// Moves the client to another workspace, appending it to that
    /// workspace's tiling order and focus history.
    pub fn set_workspace(
        &mut self,
        id: ClientId,
        workspace: usize,
    ) {
        self.detach(id, false);
        self.detach_stack(id);

        if let Some(client) = self.client_mut(id) {
            client.workspace = workspace;
        }

        self.attach(id, false);
        self.attach_stack(id);
    }

    /// Tiled clients of a workspace, in tiling order.
    pub fn tiled(
        &self,
        workspace: usize,
    ) -> Vec<ClientId> {
        self.workspaces[workspace]
            .clients
            .iter()
            .copied()
            .filter(|&id| self.client(id).map_or(false, |client| client.is_tiled()))
            .collect()
    }

    /// Windows of every managed client: per workspace, in tiling order.
    pub fn client_list(&self) -> Vec<Window> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.window(id))
            .collect()
    }

    #[inline]
    pub fn is_visible(
        &self,
        workspace: usize,
    ) -> bool {
        self.workspaces
            .get(workspace)
            .and_then(|workspace| workspace.monitor)
            .and_then(|monitor| self.monitors.get(monitor))
            .map_or(false, |monitor| monitor.workspace == workspace)
    }

    pub fn find_panel(
        &self,
        window: Window,
    ) -> Option<usize> {
        self.panels.iter().position(|panel| panel.window == window)
    }

    pub fn workspace_names(&self) -> Vec<String> {
        self.workspaces
            .iter()
            .map(|workspace| workspace.name.to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::layout::LayoutKind;
    use crate::rule::WorkspaceRule;

    use winsys::geometry::Region;

    const RULE: WorkspaceRule = WorkspaceRule {
        name: "1",
        nmaster: 1,
        nstack: 3,
        gap: 0,
        split: 0.5,
        layout: LayoutKind::Tile,
    };

    fn store() -> Store {
        let workspaces = (0..2).map(|i| Workspace::new(i, &RULE)).collect();
        Store::new(workspaces)
    }

    fn manage(
        store: &mut Store,
        window: Window,
        workspace: usize,
    ) -> ClientId {
        let id = store.insert(Client::new(window, workspace, Region::new(0, 0, 100, 100), 0));
        store.attach(id, false);
        store.attach_stack(id);
        id
    }

    #[test]
    fn reattach_moves_only_the_detached_client() {
        let mut store = store();
        let ids: Vec<ClientId> = (0..4).map(|i| manage(&mut store, 0x100 + i, 0)).collect();

        store.detach(ids[2], true);

        assert_eq!(store.workspaces[0].clients, vec![ids[2], ids[0], ids[1], ids[3]]);
        assert_eq!(store.client_list(), vec![0x102, 0x100, 0x101, 0x103]);
    }

    #[test]
    fn detaching_selection_promotes_history_head() {
        let mut store = store();
        let a = manage(&mut store, 0x100, 0);
        let b = manage(&mut store, 0x101, 0);

        store.workspaces[0].sel = Some(b);
        assert_eq!(store.workspaces[0].stack, vec![b, a]);

        store.detach_stack(b);
        assert_eq!(store.workspaces[0].sel, Some(a));

        store.detach_stack(a);
        assert_eq!(store.workspaces[0].sel, None);
    }

    #[test]
    fn ids_are_reused_after_removal() {
        let mut store = store();
        let a = manage(&mut store, 0x100, 0);
        let b = manage(&mut store, 0x101, 1);

        store.detach(a, false);
        store.detach_stack(a);
        assert_eq!(store.remove(a).map(|client| client.window), Some(0x100));
        assert_eq!(store.find(0x100), None);

        let c = manage(&mut store, 0x102, 0);
        assert_eq!(c, a);
        assert_eq!(store.find(0x101), Some(b));
        assert_eq!(store.client_list(), vec![0x102, 0x101]);
    }

    #[test]
    fn moving_between_workspaces_keeps_lists_in_sync() {
        let mut store = store();
        let a = manage(&mut store, 0x100, 0);
        let b = manage(&mut store, 0x101, 0);
        store.workspaces[0].sel = Some(a);

        store.set_workspace(a, 1);

        assert_eq!(store.workspaces[0].clients, vec![b]);
        assert_eq!(store.workspaces[0].stack, vec![b]);
        assert_eq!(store.workspaces[0].sel, Some(b));
        assert_eq!(store.workspaces[1].clients, vec![a]);
        assert_eq!(store.workspaces[1].stack, vec![a]);
    }

    #[test]
    fn floating_clients_are_not_tiled() {
        let mut store = store();
        let a = manage(&mut store, 0x100, 0);
        let b = manage(&mut store, 0x101, 0);
        let c = manage(&mut store, 0x102, 0);

        if let Some(client) = store.client_mut(b) {
            client.floating = true;
        }

        assert_eq!(store.tiled(0), vec![a, c]);
    }
}
