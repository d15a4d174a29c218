//! Pluggable child arrangement.
//!
//! A layout is a pure function from the destination size and the children's
//! current sizes to the component's overall size and one position per child
//! it accepts.

mod full;
mod grid;

pub use full::FullLayout;
pub use grid::GridLayout;

use moleskin_engine::coords::{Position, Size};

/// Result of [`Layout::arrange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrangement {
    pub size: Size,
    /// One entry per accepted child, in child order. Children past the end
    /// of this list are neither sized nor drawn.
    pub positions: Vec<Position>,
}

impl Arrangement {
    pub fn new(size: Size, positions: Vec<Position>) -> Self {
        Self { size, positions }
    }
}

pub trait Layout {
    fn arrange(&self, destination: Size, child_sizes: &[Size]) -> Arrangement;
}
