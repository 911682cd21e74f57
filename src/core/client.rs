use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::hints::SizeHints;
use winsys::window::Window;

pub struct Client {
    pub window: Window,
    pub workspace: usize,
    pub region: Region,
    pub prev_region: Region,
    /// Where the client floated before it was last tiled.
    pub float_region: Option<Region>,
    pub border_width: u32,
    pub original_border_width: u32,
    pub saved_border_width: u32,
    pub size_hints: SizeHints,
    pub fixed: bool,
    pub floating: bool,
    pub prev_floating: bool,
    pub fullscreen: bool,
    pub urgent: bool,
    pub nofocus: bool,
}

impl Client {
    pub fn new(
        window: Window,
        workspace: usize,
        region: Region,
        original_border_width: u32,
    ) -> Self {
        Self {
            window,
            workspace,
            region,
            prev_region: region,
            float_region: None,
            border_width: original_border_width,
            original_border_width,
            saved_border_width: original_border_width,
            size_hints: SizeHints::default(),
            fixed: false,
            floating: false,
            prev_floating: false,
            fullscreen: false,
            urgent: false,
            nofocus: false,
        }
    }

    /// Whether the layout of the client's workspace positions it.
    #[inline]
    pub fn is_tiled(&self) -> bool {
        !self.floating && !self.fullscreen
    }

    #[inline]
    pub fn outer_width(&self) -> i32 {
        self.region.dim.w + 2 * self.border_width as i32
    }

    #[inline]
    pub fn outer_height(&self) -> i32 {
        self.region.dim.h + 2 * self.border_width as i32
    }

    #[inline]
    pub fn set_size_hints(
        &mut self,
        size_hints: SizeHints,
    ) {
        self.size_hints = size_hints;
        self.fixed = size_hints.fixed();
    }

    /// Adjusts a requested region so that it stays reachable within
    /// `bounds` and, when `apply_hints` is set, honours the client's size
    /// hints. Returns the adjusted region and whether it differs from the
    /// client's current region.
    pub fn constrain(
        &self,
        region: Region,
        bounds: Region,
        apply_hints: bool,
    ) -> (Region, bool) {
        let border = 2 * self.border_width as i32;
        let (pos, dim) = region.values();
        let (mut x, mut y) = pos.values();
        let (mut w, mut h) = dim.values();

        w = std::cmp::max(1, w);
        h = std::cmp::max(1, h);

        let right = bounds.pos.x + bounds.dim.w;
        let bottom = bounds.pos.y + bounds.dim.h;

        if x > right {
            x = right - (w + border);
        }

        if y > bottom {
            y = bottom - (h + border);
        }

        if x + w + border < bounds.pos.x {
            x = bounds.pos.x;
        }

        if y + h + border < bounds.pos.y {
            y = bounds.pos.y;
        }

        if apply_hints {
            let (w_, h_) = self.apply_size_hints(w, h);
            w = w_;
            h = h_;
        }

        let constrained = Region::new(x, y, w, h);
        (constrained, constrained != self.region)
    }

    fn apply_size_hints(
        &self,
        mut w: i32,
        mut h: i32,
    ) -> (i32, i32) {
        let hints = &self.size_hints;
        let base_is_min =
            hints.base_width == hints.min_width && hints.base_height == hints.min_height;

        // aspect limits apply to the size without the base
        if !base_is_min {
            w -= hints.base_width;
            h -= hints.base_height;
        }

        if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 && w > 0 && h > 0 {
            if hints.max_aspect < w as f32 / h as f32 {
                w = (h as f32 * hints.max_aspect + 0.5) as i32;
            } else if hints.min_aspect < h as f32 / w as f32 {
                h = (w as f32 * hints.min_aspect + 0.5) as i32;
            }
        }

        if base_is_min {
            w -= hints.base_width;
            h -= hints.base_height;
        }

        if hints.inc_width > 0 {
            w -= w % hints.inc_width;
        }

        if hints.inc_height > 0 {
            h -= h % hints.inc_height;
        }

        w = std::cmp::max(w + hints.base_width, hints.min_width);
        h = std::cmp::max(h + hints.base_height, hints.min_height);

        if hints.max_width > 0 {
            w = std::cmp::min(w, hints.max_width);
        }

        if hints.max_height > 0 {
            h = std::cmp::min(h, hints.max_height);
        }

        (std::cmp::max(1, w), std::cmp::max(1, h))
    }

    /// Position that centres the client's outer frame within `area`.
    pub fn centered_in(
        &self,
        area: Region,
    ) -> Pos {
        Pos {
            x: area.pos.x + (area.dim.w - self.outer_width()) / 2,
            y: area.pos.y + (area.dim.h - self.outer_height()) / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(region: Region) -> Client {
        let mut client = Client::new(0x400001, 0, region, 1);
        client.border_width = 1;
        client
    }

    #[test]
    fn constrain_is_idempotent() {
        let bounds = Region::new(0, 0, 1920, 1080);
        let mut client = client(Region::new(100, 100, 640, 480));
        client.set_size_hints(SizeHints::new(
            Some((100, 50)),
            Some((1000, 700)),
            Some((4, 2)),
            Some((7, 13)),
            None,
        ));

        let (region, changed) = client.constrain(Region::new(2500, 90, 1333, 333), bounds, true);
        assert!(changed);

        client.region = region;
        assert_eq!(client.constrain(region, bounds, true), (region, false));
    }

    #[test]
    fn constrain_keeps_windows_reachable() {
        let bounds = Region::new(1920, 0, 1280, 1024);
        let client = client(Region::new(2000, 100, 300, 200));

        let (region, _) = client.constrain(Region::new(4000, 100, 300, 200), bounds, false);
        assert_eq!(region.pos.x, 1920 + 1280 - 302);

        let (region, _) = client.constrain(Region::new(0, -500, 300, 200), bounds, false);
        assert_eq!(region.pos, Pos {
            x: 1920,
            y: 0
        });

        let (region, _) = client.constrain(Region::new(2000, 100, -5, 0), bounds, false);
        assert_eq!((region.dim.w, region.dim.h), (1, 1));
    }

    #[test]
    fn size_hints_only_apply_when_requested() {
        let bounds = Region::new(0, 0, 1920, 1080);
        let mut client = client(Region::new(0, 0, 100, 100));
        client.set_size_hints(SizeHints::new(Some((200, 200)), None, None, None, None));

        let (region, _) = client.constrain(Region::new(0, 0, 100, 100), bounds, false);
        assert_eq!(region.dim.w, 100);

        let (region, _) = client.constrain(Region::new(0, 0, 100, 100), bounds, true);
        assert_eq!((region.dim.w, region.dim.h), (200, 200));
    }

    #[test]
    fn fixed_size_from_hints() {
        let mut client = client(Region::new(0, 0, 100, 100));
        client.set_size_hints(SizeHints::new(Some((300, 200)), Some((300, 200)), None, None, None));
        assert!(client.fixed);
    }

    #[test]
    fn centred_in_area() {
        let client = client(Region::new(0, 0, 398, 298));

        assert_eq!(
            client.centered_in(Region::new(0, 20, 1000, 800)),
            Pos {
                x: 300,
                y: 270
            }
        );
    }
}
