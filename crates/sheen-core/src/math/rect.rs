use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(Vec2::ZERO, Vec2::ZERO);

    pub const fn new(min: Vec2, max: Vec2) -> Rect {
        Rect { min, max }
    }

    pub fn from_point(point: Vec2) -> Rect {
        Rect::new(point, point)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn translate(self, offset: Vec2) -> Rect {
        Rect::new(self.min + offset, self.max + offset)
    }

    pub fn union(self, other: Rect) -> Rect {
        Rect::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn include(self, point: Vec2) -> Rect {
        Rect::new(self.min.min(point), self.max.max(point))
    }
}
