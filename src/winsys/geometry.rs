use std::ops::Add;
use std::ops::Sub;

pub type Extents = Padding;

#[derive(Debug, Copy, Clone, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Default for Pos {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
        }
    }
}

impl Pos {
    pub fn from_center_of_region(region: Region) -> Self {
        Self {
            x: region.pos.x + region.dim.w / 2,
            y: region.pos.y + region.dim.h / 2,
        }
    }

    pub fn values(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl Add<Pos> for Pos {
    type Output = Self;

    fn add(
        self,
        other: Pos,
    ) -> Self::Output {
        Self::Output {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Pos {
    type Output = Self;

    fn sub(
        self,
        other: Self,
    ) -> Self::Output {
        Self::Output {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct Dim {
    pub w: i32,
    pub h: i32,
}

impl Default for Dim {
    fn default() -> Self {
        Self {
            w: 0,
            h: 0,
        }
    }
}

impl Dim {
    pub fn values(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub struct Region {
    pub pos: Pos,
    pub dim: Dim,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            pos: Default::default(),
            dim: Default::default(),
        }
    }
}

impl Region {
    pub fn new(
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Self {
        Self {
            pos: Pos {
                x,
                y,
            },
            dim: Dim {
                w,
                h,
            },
        }
    }

    pub fn values(&self) -> (Pos, Dim) {
        (self.pos, self.dim)
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring region, so adjacent outputs never both claim a point.
    pub fn encompasses(
        &self,
        pos: Pos,
    ) -> bool {
        pos.x >= self.pos.x
            && pos.y >= self.pos.y
            && pos.x < self.pos.x + self.dim.w
            && pos.y < self.pos.y + self.dim.h
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Padding {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 0,
            right: 0,
            top: 0,
            bottom: 0,
        }
    }
}

impl Padding {
    pub fn with_each_edge(size: i32) -> Self {
        Self {
            left: size,
            right: size,
            top: size,
            bottom: size,
        }
    }
}

/// Space reserved along the edges of the screen, as advertised through
/// `_NET_WM_STRUT_PARTIAL` or `_NET_WM_STRUT`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Strut {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Strut {
    fn default() -> Self {
        Self {
            left: 0,
            right: 0,
            top: 0,
            bottom: 0,
        }
    }
}

impl Strut {
    pub fn from_widths(widths: &[u32]) -> Option<Self> {
        if widths.len() < 4 {
            return None;
        }

        Some(Self {
            left: widths[0],
            right: widths[1],
            top: widths[2],
            bottom: widths[3],
        })
    }

    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encompasses_is_half_open() {
        let region = Region::new(0, 0, 100, 50);

        assert!(region.encompasses(Pos {
            x: 0,
            y: 0
        }));
        assert!(region.encompasses(Pos {
            x: 99,
            y: 49
        }));
        assert!(!region.encompasses(Pos {
            x: 100,
            y: 10
        }));
    }

    #[test]
    fn strut_requires_four_widths() {
        assert_eq!(Strut::from_widths(&[1, 2, 3]), None);
        assert_eq!(
            Strut::from_widths(&[1, 2, 3, 4, 0, 0]),
            Some(Strut {
                left: 1,
                right: 2,
                top: 3,
                bottom: 4,
            })
        );
    }
}
