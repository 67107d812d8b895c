//! Scalar geometry helpers shared by hit-testing and the interaction logic.

pub type Point = [f32; 2];

pub fn distance(a: Point, b: Point) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// Distance from `point` to the segment `start`..`end`. A degenerate segment
/// falls back to plain point distance.
pub fn point_segment_distance(point: Point, start: Point, end: Point) -> f32 {
    let length_squared = (end[0] - start[0]).powi(2) + (end[1] - start[1]).powi(2);

    if length_squared == 0.0 {
        return distance(point, start);
    }

    let t = ((point[0] - start[0]) * (end[0] - start[0])
        + (point[1] - start[1]) * (end[1] - start[1]))
        / length_squared;
    let t = t.clamp(0.0, 1.0);

    let projection = [
        start[0] + t * (end[0] - start[0]),
        start[1] + t * (end[1] - start[1]),
    ];

    distance(point, projection)
}

/// Axis-aligned box with sorted edges. Element corners are stored unsorted,
/// so everything that needs true bounds goes through `of_corners`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn of_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        [
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ]
    }

    pub fn expanded(&self, pad: f32) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p[0] >= self.min_x && p[0] <= self.max_x && p[1] >= self.min_y && p[1] <= self.max_y
    }
}
