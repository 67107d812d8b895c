use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math::{Bounds, Point, distance};

pub type ElementId = Uuid;

/// Active tool mode. Selection, hand and eraser are interaction modes only;
/// the rest create elements of the matching kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Selection,
    Hand,
    Rectangle,
    Diamond,
    Circle,
    Arrow,
    Line,
    Draw,
    Eraser,
    Text,
    Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Rectangle,
    Diamond,
    Circle,
    Line,
    Arrow,
    Freehand,
    Text,
    Icon,
}

impl ElementKind {
    /// Kinds created by dragging out a box; a click without drag produces a
    /// zero-area box for these and is discarded at pointer-up.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            ElementKind::Rectangle
                | ElementKind::Diamond
                | ElementKind::Circle
                | ElementKind::Line
                | ElementKind::Arrow
                | ElementKind::Icon
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    Hachure,
    CrossHatch,
    Solid,
    Zigzag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeStyle {
    Sharp,
    Round,
}

/// Full appearance of one element. The model never fills anything in:
/// callers supply every field (the editor holds the defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Color string, or the sentinel `"transparent"`.
    pub stroke_color: String,
    pub fill_color: String,
    pub stroke_width: f32,
    pub roughness: f32,
    /// 0..=100.
    pub opacity: f32,
    pub fill_style: FillStyle,
    pub line_style: LineStyle,
    pub edge_style: EdgeStyle,
    /// Fixes the sketchy renderer's jitter. Assigned once at creation and
    /// never changed afterwards; rerolling it would redraw the element with
    /// different wobble.
    pub seed: u64,
}

/// Partial style change, applied by whole-object replacement. `seed` is
/// deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct StyleUpdate {
    pub stroke_color: Option<String>,
    pub fill_color: Option<String>,
    pub stroke_width: Option<f32>,
    pub roughness: Option<f32>,
    pub opacity: Option<f32>,
    pub fill_style: Option<FillStyle>,
    pub line_style: Option<LineStyle>,
    pub edge_style: Option<EdgeStyle>,
}

impl StyleUpdate {
    pub fn apply(&self, style: &ElementStyle) -> ElementStyle {
        ElementStyle {
            stroke_color: self
                .stroke_color
                .clone()
                .unwrap_or_else(|| style.stroke_color.clone()),
            fill_color: self
                .fill_color
                .clone()
                .unwrap_or_else(|| style.fill_color.clone()),
            stroke_width: self.stroke_width.unwrap_or(style.stroke_width),
            roughness: self.roughness.unwrap_or(style.roughness),
            opacity: self.opacity.unwrap_or(style.opacity),
            fill_style: self.fill_style.unwrap_or(style.fill_style),
            line_style: self.line_style.unwrap_or(style.line_style),
            edge_style: self.edge_style.unwrap_or(style.edge_style),
            seed: style.seed,
        }
    }
}

/// One scene object. `x1,y1,x2,y2` are two opposite corners of its bounding
/// reference frame in scene coordinates, not necessarily sorted. All
/// mutation is copy-with-changes so history snapshots stay independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// Populated only for freehand; append-only during creation.
    pub points: Vec<Point>,
    pub text: Option<String>,
    pub icon_key: Option<String>,
    pub icon_label: Option<String>,
    pub style: ElementStyle,
}

impl Element {
    /// New element as a degenerate (point) box at `x,y`. Freehand starts
    /// with a one-point path.
    pub fn new(kind: ElementKind, x: f32, y: f32, style: ElementStyle) -> Self {
        let points = if kind == ElementKind::Freehand {
            vec![[x, y]]
        } else {
            Vec::new()
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            x1: x,
            y1: y,
            x2: x,
            y2: y,
            points,
            text: None,
            icon_key: None,
            icon_label: None,
            style,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::of_corners(self.x1, self.y1, self.x2, self.y2)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// A circle is defined by its box diagonal, so it shares the two-corner
    /// representation and the resize math of every other boxed kind.
    pub fn radius(&self) -> f32 {
        distance([self.x1, self.y1], [self.x2, self.y2]) / 2.0
    }

    pub fn is_zero_area(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    /// Rubber-band update while drawing: move the second corner only.
    pub fn with_second_corner(&self, x: f32, y: f32) -> Self {
        Self {
            x2: x,
            y2: y,
            ..self.clone()
        }
    }

    /// Freehand path extension: append the point and grow the box to the
    /// running min/max of all recorded points.
    pub fn with_point_appended(&self, p: Point) -> Self {
        let mut el = self.clone();
        el.points.push(p);
        el.x1 = el.x1.min(p[0]);
        el.y1 = el.y1.min(p[1]);
        el.x2 = el.x2.max(p[0]);
        el.y2 = el.y2.max(p[1]);
        el
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let mut el = self.clone();
        el.x1 += dx;
        el.y1 += dy;
        el.x2 += dx;
        el.y2 += dy;
        for p in &mut el.points {
            p[0] += dx;
            p[1] += dy;
        }
        el
    }

    /// Resize into the box spanned by the given corners. The stored corner
    /// pair and any freehand path go through the old-bounds to new-bounds
    /// affine map, so corner orientation survives: a line drawn
    /// right-to-left keeps its endpoints on the same sides of the box.
    pub fn with_corners(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let old = self.bounds();
        let new = Bounds::of_corners(x1, y1, x2, y2);
        // a zero-extent axis has no defined map; those take the given
        // corners directly
        let map_x = |x: f32, fallback: f32| {
            if old.width() > 0.0 {
                new.min_x + (x - old.min_x) / old.width() * new.width()
            } else {
                fallback
            }
        };
        let map_y = |y: f32, fallback: f32| {
            if old.height() > 0.0 {
                new.min_y + (y - old.min_y) / old.height() * new.height()
            } else {
                fallback
            }
        };
        let mut el = self.clone();
        el.x1 = map_x(self.x1, x1);
        el.y1 = map_y(self.y1, y1);
        el.x2 = map_x(self.x2, x2);
        el.y2 = map_y(self.y2, y2);
        for p in &mut el.points {
            *p = [map_x(p[0], new.min_x), map_y(p[1], new.min_y)];
        }
        el
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..self.clone()
        }
    }

    pub fn with_icon(&self, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon_key: Some(key.into()),
            icon_label: Some(label.into()),
            ..self.clone()
        }
    }

    pub fn restyled(&self, update: &StyleUpdate) -> Self {
        Self {
            style: update.apply(&self.style),
            ..self.clone()
        }
    }
}

#[cfg(test)]
pub(crate) fn test_style(seed: u64) -> ElementStyle {
    ElementStyle {
        stroke_color: "#18181b".to_string(),
        fill_color: "transparent".to_string(),
        stroke_width: 2.0,
        roughness: 1.0,
        opacity: 100.0,
        fill_style: FillStyle::Hachure,
        line_style: LineStyle::Solid,
        edge_style: EdgeStyle::Round,
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_radius_is_half_diagonal() {
        let el = Element::new(ElementKind::Circle, 0.0, 0.0, test_style(1))
            .with_second_corner(6.0, 8.0);
        assert!((el.radius() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_translated_moves_points_with_box() {
        let el = Element::new(ElementKind::Freehand, 1.0, 1.0, test_style(1))
            .with_point_appended([4.0, 5.0])
            .translated(10.0, 20.0);
        assert_eq!(el.x1, 11.0);
        assert_eq!(el.y2, 25.0);
        assert_eq!(el.points, vec![[11.0, 21.0], [14.0, 25.0]]);
    }

    #[test]
    fn test_freehand_bounds_track_points() {
        let el = Element::new(ElementKind::Freehand, 5.0, 5.0, test_style(1))
            .with_point_appended([2.0, 9.0])
            .with_point_appended([8.0, 1.0]);
        assert_eq!((el.x1, el.y1, el.x2, el.y2), (2.0, 1.0, 8.0, 9.0));
    }

    #[test]
    fn test_with_corners_remaps_freehand_points() {
        let el = Element::new(ElementKind::Freehand, 0.0, 0.0, test_style(1))
            .with_point_appended([10.0, 10.0])
            .with_corners(0.0, 0.0, 20.0, 5.0);
        assert_eq!(el.points, vec![[0.0, 0.0], [20.0, 5.0]]);
    }

    #[test]
    fn test_with_corners_preserves_corner_orientation() {
        // drawn right-to-left, bottom-up: x1 > x2, y1 < y2
        let el = Element::new(ElementKind::Line, 100.0, 0.0, test_style(1))
            .with_second_corner(0.0, 100.0)
            .with_corners(0.0, -20.0, 120.0, 100.0);
        assert_eq!((el.x1, el.y1), (120.0, -20.0));
        assert_eq!((el.x2, el.y2), (0.0, 100.0));
    }

    #[test]
    fn test_restyle_preserves_seed() {
        let el = Element::new(ElementKind::Rectangle, 0.0, 0.0, test_style(77));
        let update = StyleUpdate {
            stroke_color: Some("#ef4444".to_string()),
            roughness: Some(3.0),
            ..Default::default()
        };
        let restyled = el.restyled(&update);
        assert_eq!(restyled.style.stroke_color, "#ef4444");
        assert_eq!(restyled.style.roughness, 3.0);
        assert_eq!(restyled.style.seed, 77);
        assert_eq!(restyled.style.opacity, 100.0);
    }
}
