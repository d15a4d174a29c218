use super::{Position, Size};

/// Axis-aligned rectangle in pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub origin: Position,
    pub size: Size,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            origin: Position::new(x, y),
            size: Size::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> i32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(self) -> i32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.is_empty()
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.x >= self.left() && p.y >= self.top() && p.x < self.right() && p.y < self.bottom()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.left().max(other.left());
        let y0 = self.top().max(other.top());
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }

    /// Same rectangle moved by `offset`.
    #[inline]
    pub fn translated(self, offset: Position) -> Rect {
        Rect::from_origin_size(self.origin + offset, self.size)
    }
}
