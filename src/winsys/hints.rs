use crate::window::IcccmWindowState;
use crate::window::Window;

/// Normalised `WM_NORMAL_HINTS`: unset fields are zero, base and min
/// sizes fall back onto each other, and aspect bounds are stored as
/// plain ratios.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SizeHints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub base_width: i32,
    pub base_height: i32,
    pub inc_width: i32,
    pub inc_height: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl Default for SizeHints {
    fn default() -> Self {
        Self {
            min_width: 0,
            min_height: 0,
            max_width: 0,
            max_height: 0,
            base_width: 0,
            base_height: 0,
            inc_width: 0,
            inc_height: 0,
            min_aspect: 0.0,
            max_aspect: 0.0,
        }
    }
}

impl SizeHints {
    pub fn new(
        min: Option<(i32, i32)>,
        max: Option<(i32, i32)>,
        base: Option<(i32, i32)>,
        inc: Option<(i32, i32)>,
        aspect: Option<((i32, i32), (i32, i32))>,
    ) -> Self {
        let mut hints = Self::default();

        if let Some((base_width, base_height)) = base.or(min) {
            hints.base_width = base_width;
            hints.base_height = base_height;
        }

        if let Some((min_width, min_height)) = min.or(base) {
            hints.min_width = min_width;
            hints.min_height = min_height;
        }

        if let Some((max_width, max_height)) = max {
            hints.max_width = max_width;
            hints.max_height = max_height;
        }

        if let Some((inc_width, inc_height)) = inc {
            hints.inc_width = inc_width;
            hints.inc_height = inc_height;
        }

        if let Some(((min_num, min_den), (max_num, max_den))) = aspect {
            if min_num > 0 {
                hints.min_aspect = min_den as f32 / min_num as f32;
            }

            if max_den > 0 {
                hints.max_aspect = max_num as f32 / max_den as f32;
            }
        }

        hints
    }

    pub fn fixed(&self) -> bool {
        self.max_width > 0
            && self.max_height > 0
            && self.max_width == self.min_width
            && self.max_height == self.min_height
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub struct Hints {
    pub urgent: bool,
    pub input: Option<bool>,
    pub initial_state: Option<IcccmWindowState>,
    pub group: Option<Window>,
}

impl Hints {
    pub fn refuses_input(&self) -> bool {
        self.input == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_and_min_fall_back_onto_each_other() {
        let hints = SizeHints::new(Some((20, 10)), None, None, None, None);

        assert_eq!((hints.base_width, hints.base_height), (20, 10));
        assert_eq!((hints.min_width, hints.min_height), (20, 10));

        let hints = SizeHints::new(None, None, Some((4, 8)), None, None);
        assert_eq!((hints.min_width, hints.min_height), (4, 8));
    }

    #[test]
    fn fixed_requires_equal_min_and_max() {
        let hints = SizeHints::new(Some((300, 200)), Some((300, 200)), None, None, None);
        assert!(hints.fixed());

        let hints = SizeHints::new(Some((300, 200)), Some((400, 200)), None, None, None);
        assert!(!hints.fixed());

        assert!(!SizeHints::default().fixed());
    }

    #[test]
    fn aspect_bounds_are_inverted_for_min() {
        let hints = SizeHints::new(None, None, None, None, Some(((2, 1), (16, 9))));

        assert!((hints.min_aspect - 0.5).abs() < f32::EPSILON);
        assert!((hints.max_aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
