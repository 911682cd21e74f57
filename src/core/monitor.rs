use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::geometry::Strut;
use winsys::screen::OutputId;
use winsys::window::Window;

#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    pub id: OutputId,
    pub name: String,
    pub region: Region,
    /// The region left over once panel struts are applied.
    pub workarea: Region,
    pub workspace: usize,
    pub primary: bool,
}

impl Monitor {
    pub fn new(
        id: OutputId,
        name: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            region,
            workarea: region,
            workspace: 0,
            primary: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Pos {
        Pos::from_center_of_region(self.region)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub window: Window,
    pub region: Region,
    pub strut: Strut,
    pub monitor: usize,
}

impl Panel {
    pub fn new(
        window: Window,
        region: Region,
        strut: Strut,
    ) -> Self {
        Self {
            window,
            region,
            strut,
            monitor: 0,
        }
    }
}

/// Index of the monitor whose region holds `pos`, if any.
pub fn monitor_at(
    monitors: &[Monitor],
    pos: Pos,
) -> Option<usize> {
    monitors
        .iter()
        .position(|monitor| monitor.region.encompasses(pos))
}

/// Recomputes every monitor's workarea from scratch, shrinking it by the
/// struts of the panels that sit on it.
pub fn apply_struts(
    monitors: &mut [Monitor],
    panels: &mut [Panel],
) {
    for monitor in monitors.iter_mut() {
        monitor.workarea = monitor.region;
    }

    if monitors.is_empty() {
        return;
    }

    for panel in panels.iter_mut() {
        panel.monitor = monitor_at(monitors, panel.region.pos).unwrap_or(0);

        if panel.strut.is_empty() {
            continue;
        }

        let monitor = &mut monitors[panel.monitor];
        let region = monitor.region;
        let workarea = &mut monitor.workarea;
        let strut = panel.strut;

        let left = region.pos.x + strut.left as i32;
        let top = region.pos.y + strut.top as i32;
        let right = region.pos.x + region.dim.w - strut.right as i32;
        let bottom = region.pos.y + region.dim.h - strut.bottom as i32;

        let x = std::cmp::max(workarea.pos.x, left);
        let y = std::cmp::max(workarea.pos.y, top);
        let w = std::cmp::min(workarea.pos.x + workarea.dim.w, right) - x;
        let h = std::cmp::min(workarea.pos.y + workarea.dim.h, bottom) - y;

        debug!(
            "panel {:#0x} reserves {:?} on monitor {}",
            panel.window, strut, monitor.name
        );

        *workarea = Region::new(x, y, std::cmp::max(1, w), std::cmp::max(1, h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strut(
        left: u32,
        right: u32,
        top: u32,
        bottom: u32,
    ) -> Strut {
        Strut {
            left,
            right,
            top,
            bottom,
        }
    }

    #[test]
    fn struts_shrink_the_monitor_they_sit_on() {
        let mut monitors = vec![
            Monitor::new(1, "DP-1", Region::new(0, 0, 1920, 1080)),
            Monitor::new(2, "DP-2", Region::new(1920, 0, 1280, 1024)),
        ];

        let mut panels = vec![
            Panel::new(0x600001, Region::new(1920, 0, 1280, 20), strut(0, 0, 20, 0)),
            Panel::new(0x600002, Region::new(1920, 1004, 1280, 20), strut(0, 0, 0, 20)),
            Panel::new(0x600003, Region::new(0, 0, 30, 1080), strut(30, 0, 0, 0)),
        ];

        apply_struts(&mut monitors, &mut panels);

        assert_eq!(monitors[0].workarea, Region::new(30, 0, 1890, 1080));
        assert_eq!(monitors[1].workarea, Region::new(1920, 20, 1280, 984));
        assert_eq!(panels[0].monitor, 1);
        assert_eq!(panels[2].monitor, 0);

        // reapplying starts over rather than shrinking twice
        apply_struts(&mut monitors, &mut panels);
        assert_eq!(monitors[1].workarea, Region::new(1920, 20, 1280, 984));
    }

    #[test]
    fn empty_struts_reserve_nothing() {
        let mut monitors = vec![Monitor::new(1, "default", Region::new(0, 0, 800, 600))];
        let mut panels = vec![Panel::new(0x600001, Region::new(0, 0, 800, 20), Strut::default())];

        apply_struts(&mut monitors, &mut panels);
        assert_eq!(monitors[0].workarea, monitors[0].region);
    }
}
