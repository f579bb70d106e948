/// Explicit block height. `Auto` lets the element size to its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    #[default]
    Auto,
    Fixed(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
}

impl Overflow {
    /// Whether content past an explicit height is clipped.
    pub fn clips(self) -> bool {
        !matches!(self, Overflow::Visible)
    }
}
