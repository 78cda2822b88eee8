use std::sync::Arc;

use crate::math::{Affine2, Rect, Vec2};

/// A single outline command. Coordinates are y-down surface pixels unless
/// stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEvent {
    MoveTo { point: Vec2 },
    LineTo { point: Vec2 },
    QuadTo { control: Vec2, point: Vec2 },
    CubicTo { control: [Vec2; 2], point: Vec2 },
    Close,
}

impl PathEvent {
    pub fn transform(self, transform: &Affine2) -> PathEvent {
        let t = |p: Vec2| transform.transform_point2(p);
        match self {
            PathEvent::MoveTo { point } => PathEvent::MoveTo { point: t(point) },
            PathEvent::LineTo { point } => PathEvent::LineTo { point: t(point) },
            PathEvent::QuadTo { control, point } => PathEvent::QuadTo {
                control: t(control),
                point: t(point),
            },
            PathEvent::CubicTo { control, point } => PathEvent::CubicTo {
                control: control.map(t),
                point: t(point),
            },
            PathEvent::Close => PathEvent::Close,
        }
    }
}

#[derive(Debug, Default)]
pub struct PathBuilder {
    events: Vec<PathEvent>,
}

impl PathBuilder {
    pub fn new() -> PathBuilder {
        PathBuilder::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn move_to(&mut self, point: Vec2) {
        self.events.push(PathEvent::MoveTo { point });
    }

    pub fn line_to(&mut self, point: Vec2) {
        self.events.push(PathEvent::LineTo { point });
    }

    pub fn quad_to(&mut self, control: Vec2, point: Vec2) {
        self.events.push(PathEvent::QuadTo { control, point });
    }

    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, point: Vec2) {
        self.events.push(PathEvent::CubicTo {
            control: [control1, control2],
            point,
        });
    }

    pub fn close(&mut self) {
        self.events.push(PathEvent::Close);
    }

    /// Appends an axis-aligned rectangle as a closed contour.
    pub fn rect(&mut self, pos: Vec2, size: Vec2) {
        self.move_to(pos);
        self.line_to(pos + Vec2::new(size.x, 0.0));
        self.line_to(pos + size);
        self.line_to(pos + Vec2::new(0.0, size.y));
        self.close();
    }

    /// Appends every event of `path`, mapped through `transform`.
    pub fn extend(&mut self, path: &Path, transform: &Affine2) {
        self.events
            .extend(path.events().iter().map(|e| e.transform(transform)));
    }

    pub fn finish(&mut self) -> Path {
        let path = Path {
            events: self.events.clone().into(),
        };
        self.clear();
        path
    }
}

/// An immutable, cheaply clonable outline.
#[derive(Debug, Clone)]
pub struct Path {
    events: Arc<[PathEvent]>,
}

impl Path {
    pub fn empty() -> Path {
        Path {
            events: Arc::new([]),
        }
    }

    pub fn events(&self) -> &[PathEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Bounding box of all points, control points included.
    pub fn bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut add = |p: Vec2| {
            bounds = Some(match bounds {
                Some(b) => b.include(p),
                None => Rect::from_point(p),
            });
        };

        for event in self.events() {
            match *event {
                PathEvent::MoveTo { point } | PathEvent::LineTo { point } => add(point),
                PathEvent::QuadTo { control, point } => {
                    add(control);
                    add(point);
                }
                PathEvent::CubicTo { control, point } => {
                    add(control[0]);
                    add(control[1]);
                    add(point);
                }
                PathEvent::Close => {}
            }
        }

        bounds
    }
}

impl Default for Path {
    fn default() -> Path {
        Path::empty()
    }
}
