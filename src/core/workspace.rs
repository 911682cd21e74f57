use crate::change::Change;
use crate::error::StateChangeError;
use crate::layout::LayoutKind;
use crate::layout::LayoutParams;
use crate::rule::WorkspaceRule;
use crate::store::ClientId;
use crate::util::Util;

pub struct Workspace {
    pub index: usize,
    pub name: String,
    pub nmaster: usize,
    pub nstack: usize,
    pub gap: i32,
    pub default_gap: i32,
    pub split: f32,
    pub layout: LayoutKind,
    /// Tiling order.
    pub clients: Vec<ClientId>,
    /// Focus history, most recent first.
    pub stack: Vec<ClientId>,
    pub sel: Option<ClientId>,
    pub monitor: Option<usize>,
}

impl Workspace {
    pub const MIN_SPLIT: f32 = 0.1;
    pub const MAX_SPLIT: f32 = 0.9;

    pub fn new(
        index: usize,
        rule: &WorkspaceRule,
    ) -> Self {
        Self {
            index,
            name: rule.name.to_owned(),
            nmaster: rule.nmaster,
            nstack: rule.nstack,
            gap: rule.gap,
            default_gap: rule.gap,
            split: rule.split,
            layout: rule.layout,
            clients: Vec::new(),
            stack: Vec::new(),
            sel: None,
            monitor: None,
        }
    }

    /// A fresh workspace carrying over the layout parameters of `prev`.
    pub fn following(prev: &Workspace) -> Self {
        let index = prev.index + 1;

        Self {
            index,
            name: index.to_string(),
            nmaster: prev.nmaster,
            nstack: prev.nstack,
            gap: prev.gap,
            default_gap: prev.default_gap,
            split: prev.split,
            layout: prev.layout,
            clients: Vec::new(),
            stack: Vec::new(),
            sel: None,
            monitor: None,
        }
    }

    #[inline]
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            nmaster: self.nmaster,
            nstack: self.nstack,
            split: self.split,
            gap: self.gap,
        }
    }

    pub fn change_gap(
        &mut self,
        change: Change<i32>,
        max: i32,
    ) -> Result<(), StateChangeError> {
        let gap = Util::change_within_range(0, std::cmp::max(max, 0), self.gap, change);

        if gap == self.gap {
            return Err(StateChangeError::LimitReached);
        }

        self.gap = gap;
        Ok(())
    }

    pub fn reset_gap(&mut self) -> Result<(), StateChangeError> {
        if self.gap == self.default_gap {
            return Err(StateChangeError::StateUnchanged);
        }

        self.gap = self.default_gap;
        Ok(())
    }

    pub fn set_split(
        &mut self,
        split: f32,
    ) -> Result<(), StateChangeError> {
        if !(Self::MIN_SPLIT..=Self::MAX_SPLIT).contains(&split) {
            return Err(StateChangeError::LimitReached);
        }

        if (split - self.split).abs() < f32::EPSILON {
            return Err(StateChangeError::StateUnchanged);
        }

        self.split = split;
        Ok(())
    }

    pub fn set_nmaster(
        &mut self,
        nmaster: i32,
    ) -> Result<(), StateChangeError> {
        let nmaster = std::cmp::max(nmaster, 0) as usize;

        if nmaster == self.nmaster {
            return Err(StateChangeError::LimitReached);
        }

        self.nmaster = nmaster;
        Ok(())
    }

    pub fn set_nstack(
        &mut self,
        nstack: i32,
    ) -> Result<(), StateChangeError> {
        let nstack = std::cmp::max(nstack, 0) as usize;

        if nstack == self.nstack {
            return Err(StateChangeError::LimitReached);
        }

        self.nstack = nstack;
        Ok(())
    }

    pub fn set_layout(
        &mut self,
        layout: LayoutKind,
    ) -> Result<(), StateChangeError> {
        if layout == self.layout {
            return Err(StateChangeError::StateUnchanged);
        }

        info!("activating layout {} on workspace {}", layout.to_string(), self.name);
        self.layout = layout;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: WorkspaceRule = WorkspaceRule {
        name: "1",
        nmaster: 1,
        nstack: 3,
        gap: 4,
        split: 0.5,
        layout: LayoutKind::Tile,
    };

    #[test]
    fn gap_stays_within_range() {
        let mut workspace = Workspace::new(0, &RULE);

        assert_eq!(workspace.change_gap(Change::Inc(5), 100), Ok(()));
        assert_eq!(workspace.gap, 9);

        assert_eq!(workspace.change_gap(Change::Inc(500), 100), Ok(()));
        assert_eq!(workspace.gap, 100);
        assert_eq!(
            workspace.change_gap(Change::Inc(1), 100),
            Err(StateChangeError::LimitReached)
        );

        assert_eq!(workspace.change_gap(Change::Dec(500), 100), Ok(()));
        assert_eq!(workspace.gap, 0);

        assert_eq!(workspace.reset_gap(), Ok(()));
        assert_eq!(workspace.gap, 4);
    }

    #[test]
    fn split_is_bounded() {
        let mut workspace = Workspace::new(0, &RULE);

        assert_eq!(workspace.set_split(0.95), Err(StateChangeError::LimitReached));
        assert_eq!(workspace.set_split(0.05), Err(StateChangeError::LimitReached));
        assert_eq!(workspace.set_split(0.6), Ok(()));
        assert!((workspace.split - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn counts_never_go_negative() {
        let mut workspace = Workspace::new(0, &RULE);

        assert_eq!(workspace.set_nmaster(-3), Ok(()));
        assert_eq!(workspace.nmaster, 0);
        assert_eq!(workspace.set_nmaster(0), Err(StateChangeError::LimitReached));
        assert_eq!(workspace.set_nstack(5), Ok(()));
        assert_eq!(workspace.nstack, 5);
    }

    #[test]
    fn following_copies_parameters() {
        let mut workspace = Workspace::new(9, &RULE);
        workspace.layout = LayoutKind::Monocle;

        let next = Workspace::following(&workspace);
        assert_eq!(next.index, 10);
        assert_eq!(next.name, "10");
        assert_eq!(next.layout, LayoutKind::Monocle);
        assert_eq!(next.gap, 4);
    }
}
