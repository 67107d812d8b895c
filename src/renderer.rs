//! Scene renderer driver. Walks the committed scene plus the in-progress
//! overlay in stacking order and turns each element into calls on the host's
//! [`StrokeRenderer`]; the engine itself never rasterizes anything.

use std::f32::consts::PI;

use crate::drawing::{Element, ElementId, ElementKind, ElementStyle, FillStyle, LineStyle};
use crate::icons::{self, IconCatalog};
use crate::math::Point;
use crate::view::Viewport;

/// Screen-space gap between a selected element and its outline box.
const SELECTION_MARGIN: f32 = 10.0;

/// Arrowhead geometry: screen-space length of the two head strokes and their
/// angle off the shaft.
const ARROWHEAD_LENGTH: f32 = 15.0;
const ARROWHEAD_ANGLE: f32 = PI / 6.0;

const ICON_LABEL_SIZE: f32 = 10.0;
const ICON_LABEL_COLOR: &str = "#666666";

/// Dash patterns for the non-solid line styles, in scene units.
const DASH_DASHED: [f32; 2] = [12.0, 8.0];
const DASH_DOTTED: [f32; 2] = [2.0, 4.0];

/// Primitive handed to the stroke backend, in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle { x: f32, y: f32, w: f32, h: f32 },
    Circle { cx: f32, cy: f32, r: f32 },
    Polygon { points: Vec<Point> },
    Line { from: Point, to: Point },
    Path { points: Vec<Point> },
}

/// Stroke/fill parameters for one primitive, already normalized for the
/// backend: no sentinel colors, opacity in 0..=1.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub stroke: String,
    /// `None` when the element's fill is the `"transparent"` sentinel.
    pub fill: Option<String>,
    pub stroke_width: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub fill_style: FillStyle,
    pub dash: Option<[f32; 2]>,
    /// Sketch seed; the backend must jitter deterministically from it.
    pub seed: u64,
}

impl Appearance {
    fn of(style: &ElementStyle) -> Self {
        Self {
            stroke: style.stroke_color.clone(),
            fill: if style.fill_color == "transparent" {
                None
            } else {
                Some(style.fill_color.clone())
            },
            stroke_width: style.stroke_width,
            roughness: style.roughness,
            opacity: style.opacity / 100.0,
            fill_style: style.fill_style,
            dash: match style.line_style {
                LineStyle::Solid => None,
                LineStyle::Dashed => Some(DASH_DASHED),
                LineStyle::Dotted => Some(DASH_DOTTED),
            },
            seed: style.seed,
        }
    }
}

/// Drawing backend the host plugs in (sketchy canvas, SVG writer, a test
/// recorder). All coordinates arrive in scene space; the backend applies the
/// view transform it was handed out-of-band.
pub trait StrokeRenderer {
    fn draw_shape(&mut self, shape: &Shape, appearance: &Appearance);
    fn draw_text(&mut self, text: &str, position: Point, size: f32, color: &str);
    fn draw_icon(&mut self, key: &str, fill: &str, rect: (f32, f32, f32, f32));
    /// Selection outline around `rect`; hosts draw this as a thin dashed box.
    fn draw_selection(&mut self, rect: (f32, f32, f32, f32));
}

/// Draw one frame: committed elements in list order (later on top), then the
/// in-progress overlay, then the selection outline above everything.
pub fn render_scene<R: StrokeRenderer + ?Sized>(
    renderer: &mut R,
    elements: &[Element],
    overlay: Option<&Element>,
    selected: Option<ElementId>,
    view: &Viewport,
    catalog: &dyn IconCatalog,
) {
    for element in elements {
        draw_element(renderer, element, view, catalog);
    }
    if let Some(element) = overlay {
        draw_element(renderer, element, view, catalog);
    }
    if let Some(id) = selected {
        if let Some(element) = elements.iter().find(|el| el.id == id) {
            let margin = SELECTION_MARGIN / view.scale;
            let b = element.bounds().expanded(margin);
            renderer.draw_selection((b.min_x, b.min_y, b.width(), b.height()));
        }
    }
}

fn draw_element<R: StrokeRenderer + ?Sized>(
    renderer: &mut R,
    element: &Element,
    view: &Viewport,
    catalog: &dyn IconCatalog,
) {
    let appearance = Appearance::of(&element.style);
    match element.kind {
        ElementKind::Rectangle => {
            let b = element.bounds();
            renderer.draw_shape(
                &Shape::Rectangle {
                    x: b.min_x,
                    y: b.min_y,
                    w: b.width(),
                    h: b.height(),
                },
                &appearance,
            );
        }
        ElementKind::Diamond => {
            let b = element.bounds();
            let [cx, cy] = b.center();
            renderer.draw_shape(
                &Shape::Polygon {
                    points: vec![
                        [cx, b.min_y],
                        [b.max_x, cy],
                        [cx, b.max_y],
                        [b.min_x, cy],
                    ],
                },
                &appearance,
            );
        }
        ElementKind::Circle => {
            let [cx, cy] = element.center();
            renderer.draw_shape(
                &Shape::Circle {
                    cx,
                    cy,
                    r: element.radius(),
                },
                &appearance,
            );
        }
        ElementKind::Line => {
            renderer.draw_shape(
                &Shape::Line {
                    from: [element.x1, element.y1],
                    to: [element.x2, element.y2],
                },
                &appearance,
            );
        }
        ElementKind::Arrow => {
            let from = [element.x1, element.y1];
            let to = [element.x2, element.y2];
            renderer.draw_shape(&Shape::Line { from, to }, &appearance);

            // arrowhead stays the same size on screen at every zoom level
            let head = ARROWHEAD_LENGTH / view.scale;
            let angle = (to[1] - from[1]).atan2(to[0] - from[0]);
            for side in [-1.0, 1.0] {
                let a = angle + side * ARROWHEAD_ANGLE;
                let tip = [to[0] - head * a.cos(), to[1] - head * a.sin()];
                renderer.draw_shape(&Shape::Line { from: to, to: tip }, &appearance);
            }
        }
        ElementKind::Freehand => {
            if element.points.len() >= 2 {
                renderer.draw_shape(
                    &Shape::Path {
                        points: element.points.clone(),
                    },
                    &appearance,
                );
            }
        }
        ElementKind::Text => {
            if let Some(text) = &element.text {
                let size = element.style.stroke_width * 8.0 + 12.0;
                renderer.draw_text(
                    text,
                    [element.x1, element.y1],
                    size,
                    &element.style.stroke_color,
                );
            }
        }
        ElementKind::Icon => {
            let Some(key) = &element.icon_key else {
                log::warn!("icon element {} has no key", element.id);
                return;
            };
            let b = element.bounds();
            match catalog.get(key) {
                Some(info) => {
                    let rect = icons::letterbox(info.view_box, b);
                    renderer.draw_icon(key, &info.fill, rect);
                }
                None => log::warn!("icon {key:?} not in catalog"),
            }
            if let Some(label) = &element.icon_label {
                renderer.draw_text(
                    label,
                    [b.center()[0], b.max_y + ICON_LABEL_SIZE],
                    ICON_LABEL_SIZE,
                    ICON_LABEL_COLOR,
                );
            }
        }
    }
}
