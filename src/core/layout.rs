use winsys::geometry::Region;

use strum_macros::EnumIter;
use strum_macros::EnumString;
use strum_macros::ToString;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumString, ToString)]
pub enum LayoutKind {
    #[strum(serialize = "tile")]
    Tile,
    #[strum(serialize = "monocle")]
    Monocle,
    #[strum(serialize = "none")]
    None,
}

impl LayoutKind {
    /// Whether the layout assigns geometry to tiled clients at all.
    #[inline]
    pub fn arranges(&self) -> bool {
        *self != LayoutKind::None
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutParams {
    pub nmaster: usize,
    pub nstack: usize,
    pub split: f32,
    pub gap: i32,
}

/// Placement for one tiled client: its outer origin and inner size, plus
/// the border width to apply.
pub type Placement = (Region, u32);

pub fn arrange(
    kind: LayoutKind,
    params: &LayoutParams,
    area: Region,
    n: usize,
    border_width: u32,
    smart_borders: bool,
) -> Vec<Placement> {
    if n == 0 {
        return Vec::with_capacity(0);
    }

    let border_width = if n == 1 && smart_borders {
        0
    } else {
        border_width
    };

    match kind {
        LayoutKind::Tile => tile(params, area, n, border_width),
        LayoutKind::Monocle => monocle(area, n, border_width),
        LayoutKind::None => Vec::with_capacity(0),
    }
}

fn monocle(
    area: Region,
    n: usize,
    border_width: u32,
) -> Vec<Placement> {
    let bw = 2 * border_width as i32;
    let region = Region::new(
        area.pos.x,
        area.pos.y,
        std::cmp::max(1, area.dim.w - bw),
        std::cmp::max(1, area.dim.h - bw),
    );

    vec![(region, border_width); n]
}

fn tile(
    params: &LayoutParams,
    area: Region,
    n: usize,
    border_width: u32,
) -> Vec<Placement> {
    let gap = params.gap;
    let bw = 2 * border_width as i32;
    let nmaster = params.nmaster;
    let nstack = params.nstack;

    let mut master_w = 0;
    let mut stack_w = 0;
    let mut secondary = 0;
    let mut columns = 1;

    if n <= nmaster {
        master_w = area.dim.w;
        secondary = 1;
    } else if nmaster > 0 {
        columns = 2;
        master_w = (area.dim.w as f32 * params.split) as i32;
    }

    if nstack > 0 && n > nmaster + nstack {
        secondary = 1;
        stack_w = (area.dim.w - master_w) / 2;
    }

    let mut master_y = gap;
    let mut stack_y = gap;
    let mut secondary_y = gap;

    let mut placements = Vec::with_capacity(n);

    for i in 0..n {
        let (x, y, w, h) = if i < nmaster {
            let remaining = std::cmp::min(n, nmaster) - i;
            let h = (area.dim.h - master_y) / remaining as i32 - gap - bw;
            let y = master_y;

            master_y += h + bw + gap;
            (gap, y, master_w - gap * (5 - columns) / 2 - bw, h)
        } else if i - nmaster < nstack {
            let remaining = std::cmp::min(n - nmaster, nstack) - (i - nmaster);
            let h = (area.dim.h - stack_y) / remaining as i32 - gap - bw;
            let y = stack_y;

            stack_y += h + bw + gap;
            (
                master_w + gap / columns,
                y,
                area.dim.w - master_w - stack_w - gap * (5 - columns - secondary) / 2 - bw,
                h,
            )
        } else {
            let remaining = n - i;
            let h = (area.dim.h - secondary_y) / remaining as i32 - gap - bw;
            let y = secondary_y;

            secondary_y += h + bw + gap;
            (
                master_w + stack_w + gap / columns,
                y,
                area.dim.w - master_w - stack_w - gap * (5 - columns) / 2 - bw,
                h,
            )
        };

        placements.push((
            Region::new(
                area.pos.x + x,
                area.pos.y + y,
                std::cmp::max(1, w),
                std::cmp::max(1, h),
            ),
            border_width,
        ));
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    fn params(
        nmaster: usize,
        nstack: usize,
        split: f32,
        gap: i32,
    ) -> LayoutParams {
        LayoutParams {
            nmaster,
            nstack,
            split,
            gap,
        }
    }

    #[test]
    fn tile_master_and_unbounded_stack() {
        let area = Region::new(0, 0, 1000, 800);
        let placements = arrange(LayoutKind::Tile, &params(1, 0, 0.5, 0), area, 3, 1, true);

        assert_eq!(placements, vec![
            (Region::new(0, 0, 498, 798), 1),
            (Region::new(500, 0, 498, 398), 1),
            (Region::new(500, 400, 498, 398), 1),
        ]);
    }

    #[test]
    fn tile_columns_fill_usable_height() {
        let area = Region::new(0, 20, 1920, 1060);
        let gap = 7;
        let bw = 2;
        let placements = arrange(LayoutKind::Tile, &params(2, 2, 0.6, gap), area, 7, bw, true);

        let mut columns: Vec<i32> = placements.iter().map(|(r, _)| r.pos.x).collect();
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), 3);

        for x in columns {
            let column: Vec<&Placement> =
                placements.iter().filter(|(r, _)| r.pos.x == x).collect();

            let used: i32 = column
                .iter()
                .map(|(r, bw)| r.dim.h + 2 * *bw as i32 + gap)
                .sum::<i32>()
                + gap;

            assert_eq!(used, area.dim.h);
        }

        let master = placements[0].0;
        assert_eq!(master.pos.x, area.pos.x + gap);
        assert!((master.dim.w + 2 * bw as i32 + gap * 3 / 2 - 1152).abs() <= 1);
    }

    #[test]
    fn tile_single_client_smart_borders() {
        let area = Region::new(0, 0, 1000, 800);

        let placements = arrange(LayoutKind::Tile, &params(1, 3, 0.5, 0), area, 1, 1, true);
        assert_eq!(placements, vec![(Region::new(0, 0, 1000, 800), 0)]);

        let placements = arrange(LayoutKind::Tile, &params(1, 3, 0.5, 0), area, 1, 1, false);
        assert_eq!(placements, vec![(Region::new(0, 0, 998, 798), 1)]);
    }

    #[test]
    fn monocle_fills_usable_area() {
        let area = Region::new(10, 30, 1000, 770);

        let placements = arrange(LayoutKind::Monocle, &params(1, 3, 0.5, 4), area, 3, 2, true);
        assert_eq!(placements.len(), 3);
        assert!(placements
            .iter()
            .all(|&placement| placement == (Region::new(10, 30, 996, 766), 2)));

        let placements = arrange(LayoutKind::Monocle, &params(1, 3, 0.5, 4), area, 1, 2, true);
        assert_eq!(placements, vec![(area, 0)]);
    }

    #[test]
    fn no_layout_places_nothing() {
        let area = Region::new(0, 0, 1000, 800);
        assert!(arrange(LayoutKind::None, &params(1, 3, 0.5, 0), area, 4, 1, true).is_empty());
        assert!(arrange(LayoutKind::Tile, &params(1, 3, 0.5, 0), area, 0, 1, true).is_empty());
    }

    #[test]
    fn layout_names() {
        assert_eq!(LayoutKind::from_str("monocle"), Ok(LayoutKind::Monocle));
        assert_eq!(LayoutKind::Tile.to_string(), "tile");
        assert!(LayoutKind::from_str("spiral").is_err());
    }
}
