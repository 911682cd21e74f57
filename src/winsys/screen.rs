use crate::geometry::Region;

pub type OutputId = u32;

/// A physical output as reported by the display server. Outputs that are
/// connected but have no active mode carry no region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub id: OutputId,
    pub name: String,
    pub region: Option<Region>,
}

impl Output {
    pub fn new(
        id: OutputId,
        name: impl Into<String>,
        region: Option<Region>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            region,
        }
    }
}
