use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use moleskin_engine::coords::{Position, Size};

use super::{Arrangement, Layout};

thread_local! {
    static GRIDS: RefCell<HashMap<(usize, usize), Rc<GridLayout>>> = RefCell::new(HashMap::new());
}

/// Fixed-capacity tiling of `columns * rows` children.
///
/// Children are bucketed into rows by `ordinal / columns` and into columns by
/// `ordinal / rows`. Rows sum member widths and take the tallest member;
/// columns take the widest member and sum member heights. A child is placed
/// at `(row_offset[ordinal / columns], column_offset[ordinal / rows])`.
///
/// The two bucketings only agree for square grids. Layouts built against
/// this tiling depend on it, so it is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridLayout {
    columns: usize,
    rows: usize,
}

impl GridLayout {
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// The interned instance for these dimensions.
    pub fn shared(columns: usize, rows: usize) -> Rc<GridLayout> {
        GRIDS.with(|grids| {
            grids
                .borrow_mut()
                .entry((columns, rows))
                .or_insert_with(|| Rc::new(GridLayout::new(columns, rows)))
                .clone()
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }
}

impl Layout for GridLayout {
    fn arrange(&self, _destination: Size, child_sizes: &[Size]) -> Arrangement {
        let accepted = &child_sizes[..child_sizes.len().min(self.capacity())];
        if accepted.len() < child_sizes.len() {
            log::trace!(
                "grid {}x{} dropping {} children",
                self.columns,
                self.rows,
                child_sizes.len() - accepted.len()
            );
        }

        // Per row: (sum of widths, max height). Per column: (max width, sum of heights).
        let mut row_sizes = vec![Size::ZERO; self.rows];
        let mut col_sizes = vec![Size::ZERO; self.columns];
        for (ordinal, size) in accepted.iter().enumerate() {
            let row = &mut row_sizes[ordinal / self.columns];
            row.width += size.width;
            row.height = row.height.max(size.height);

            let col = &mut col_sizes[ordinal / self.rows];
            col.width = col.width.max(size.width);
            col.height += size.height;
        }

        let row_offsets = prefix_sums(row_sizes.iter().map(|s| s.height));
        let col_offsets = prefix_sums(col_sizes.iter().map(|s| s.width));

        let size = Size::new(
            col_sizes.iter().map(|s| s.width).sum(),
            row_sizes.iter().map(|s| s.height).sum(),
        );
        let positions = (0..accepted.len())
            .map(|ordinal| {
                Position::new(
                    row_offsets[ordinal / self.columns],
                    col_offsets[ordinal / self.rows],
                )
            })
            .collect();

        Arrangement::new(size, positions)
    }
}

/// Running totals starting at zero; one longer than the input.
fn prefix_sums(values: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut offsets = vec![0];
    let mut total = 0;
    for value in values {
        total += value;
        offsets.push(total);
    }
    offsets
}
