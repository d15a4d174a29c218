use moleskin_engine::coords::{Position, Size};

use super::{Arrangement, Layout};

/// Fills the destination and stacks every child at the origin.
///
/// Intended for a single child. With several, each is drawn over the
/// previous one and only the last stays visible.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FullLayout;

impl Layout for FullLayout {
    fn arrange(&self, destination: Size, child_sizes: &[Size]) -> Arrangement {
        Arrangement::new(destination, vec![Position::ORIGIN; child_sizes.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_destination_size() {
        let arrangement = FullLayout.arrange(Size::new(320, 240), &[Size::new(10, 10)]);
        assert_eq!(arrangement.size, Size::new(320, 240));
        assert_eq!(arrangement.positions, vec![Position::ORIGIN]);
    }

    #[test]
    fn every_child_lands_on_origin() {
        let arrangement = FullLayout.arrange(Size::new(50, 50), &[Size::new(5, 5); 3]);
        assert_eq!(arrangement.positions, vec![Position::ORIGIN; 3]);
    }

    #[test]
    fn no_children() {
        let arrangement = FullLayout.arrange(Size::new(8, 8), &[]);
        assert!(arrangement.positions.is_empty());
    }
}
