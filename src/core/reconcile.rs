use crate::monitor::Monitor;
use crate::workspace::Workspace;

use winsys::screen::Output;

/// Brings the monitor set in line with the outputs reported by the server.
/// Returns whether any monitor was added, removed or resized.
pub fn reconcile(
    monitors: &mut Vec<Monitor>,
    outputs: &[Output],
) -> bool {
    let mut changed = false;

    for output in outputs {
        let known = monitors.iter().position(|monitor| monitor.id == output.id);

        match (output.region, known) {
            (Some(region), known) => {
                let clone = monitors
                    .iter()
                    .find(|monitor| monitor.id != output.id && monitor.region == region);

                if let Some(clone) = clone {
                    debug!("output {} clones {}, ignoring it", output.name, clone.name);
                    continue;
                }

                match known {
                    Some(index) => {
                        let monitor = &mut monitors[index];

                        if monitor.region != region {
                            info!("output {} resized to {:?}", output.name, region);
                            monitor.region = region;
                            monitor.workarea = region;
                            changed = true;
                        }

                        monitor.name = output.name.to_owned();
                    },
                    None => {
                        info!("new output {} at {:?}", output.name, region);
                        monitors.push(Monitor::new(output.id, output.name.to_owned(), region));
                        changed = true;
                    },
                }
            },
            (None, Some(index)) => {
                info!("output {} disabled", output.name);
                monitors.remove(index);
                changed = true;
            },
            (None, None) => {},
        }
    }

    let before = monitors.len();
    monitors.retain(|monitor| outputs.iter().any(|output| output.id == monitor.id));

    changed || monitors.len() != before
}

/// Distributes workspaces evenly over the monitors in order, handing out
/// the remainder one per monitor. Each monitor keeps showing `active` or
/// its previous workspace when that is still assigned to it.
pub fn assign_workspaces(
    workspaces: &mut [Workspace],
    monitors: &mut [Monitor],
    active: usize,
) {
    if monitors.is_empty() {
        workspaces
            .iter_mut()
            .for_each(|workspace| workspace.monitor = None);

        return;
    }

    let n = monitors.len();
    let per = workspaces.len() / n;

    for (i, workspace) in workspaces.iter_mut().enumerate() {
        workspace.monitor = Some(if i < per * n {
            i / per
        } else {
            (i - per * n) % n
        });
    }

    for (m, monitor) in monitors.iter_mut().enumerate() {
        let assigned = |index: usize| {
            workspaces
                .get(index)
                .map_or(false, |workspace| workspace.monitor == Some(m))
        };

        if assigned(active) {
            monitor.workspace = active;
        } else if !assigned(monitor.workspace) {
            if let Some(first) = workspaces
                .iter()
                .position(|workspace| workspace.monitor == Some(m))
            {
                monitor.workspace = first;
            }
        }

        debug!("monitor {} shows workspace {}", monitor.name, monitor.workspace);
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

    fn outputs() -> Vec<Output> {
        vec![
            Output::new(0x40, "DP-1", Some(Region::new(0, 0, 1920, 1080))),
            Output::new(0x41, "HDMI-1", Some(Region::new(0, 0, 1920, 1080))),
            Output::new(0x42, "DP-2", Some(Region::new(1920, 0, 1280, 1024))),
            Output::new(0x43, "VGA-1", None),
        ]
    }

    #[test]
    fn reconcile_skips_clones_and_disabled_outputs() {
        let mut monitors = Vec::new();

        assert!(reconcile(&mut monitors, &outputs()));
        assert_eq!(
            monitors.iter().map(|monitor| monitor.id).collect::<Vec<_>>(),
            vec![0x40, 0x42]
        );
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut monitors = Vec::new();
        reconcile(&mut monitors, &outputs());

        let before = monitors.clone();
        assert!(!reconcile(&mut monitors, &outputs()));
        assert_eq!(monitors, before);
    }

    #[test]
    fn reconcile_updates_and_removes() {
        let mut monitors = Vec::new();
        reconcile(&mut monitors, &outputs());

        let mut outputs = outputs();
        outputs[2].region = Some(Region::new(1920, 0, 2560, 1440));
        assert!(reconcile(&mut monitors, &outputs));
        assert_eq!(monitors[1].region, Region::new(1920, 0, 2560, 1440));
        assert_eq!(monitors[1].workarea, monitors[1].region);

        outputs[2].region = None;
        assert!(reconcile(&mut monitors, &outputs));
        assert_eq!(monitors.len(), 1);

        assert!(reconcile(&mut monitors, &[Output::new(
            0x50,
            "eDP-1",
            Some(Region::new(0, 0, 1366, 768))
        )]));
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0].id, 0x50);
    }

    #[test]
    fn workspaces_are_spread_evenly() {
        let mut workspaces: Vec<Workspace> = (0..10).map(|i| Workspace::new(i, &RULE)).collect();
        let mut monitors = vec![
            Monitor::new(1, "a", Region::new(0, 0, 100, 100)),
            Monitor::new(2, "b", Region::new(100, 0, 100, 100)),
            Monitor::new(3, "c", Region::new(200, 0, 100, 100)),
        ];

        assign_workspaces(&mut workspaces, &mut monitors, 4);

        let assignment: Vec<Option<usize>> =
            workspaces.iter().map(|workspace| workspace.monitor).collect();

        assert_eq!(assignment, vec![
            Some(0),
            Some(0),
            Some(0),
            Some(1),
            Some(1),
            Some(1),
            Some(2),
            Some(2),
            Some(2),
            Some(0),
        ]);

        assert_eq!(
            monitors.iter().map(|monitor| monitor.workspace).collect::<Vec<_>>(),
            vec![0, 4, 6]
        );
    }

    #[test]
    fn monitors_keep_their_previous_workspace() {
        let mut workspaces: Vec<Workspace> = (0..4).map(|i| Workspace::new(i, &RULE)).collect();
        let mut monitors = vec![
            Monitor::new(1, "a", Region::new(0, 0, 100, 100)),
            Monitor::new(2, "b", Region::new(100, 0, 100, 100)),
        ];

        monitors[1].workspace = 3;
        assign_workspaces(&mut workspaces, &mut monitors, 1);

        assert_eq!(monitors[0].workspace, 1);
        assert_eq!(monitors[1].workspace, 3);
    }
}
