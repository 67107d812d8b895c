//! Scene and interaction engine for a sketchy infinite-canvas diagram
//! editor: element model, screen/scene transform, hit-testing, the pointer
//! gesture state machine, linear undo/redo and the renderer driver. Pixels,
//! windowing and the assistant backend belong to the embedding host.

mod assistant;
mod drawing;
mod editor;
mod event_handler;
mod history;
mod icons;
mod math;
mod renderer;
mod view;

pub use assistant::{AssistantError, ElementDescriptor, parse_descriptors};
pub use drawing::{
    EdgeStyle, Element, ElementId, ElementKind, ElementStyle, FillStyle, LineStyle, StyleUpdate,
    Tool,
};
pub use editor::{Editor, IconChoice, PendingText};
pub use event_handler::{Gesture, Key, MIN_RESIZE_EXTENT};
pub use hit_test::{HANDLE_RADIUS, HIT_PADDING, Handle, hit_test, hit_test_handle};
pub use history::History;
pub use icons::{IconCatalog, IconInfo, letterbox};
pub use math::{Bounds, Point, distance, point_segment_distance};
pub use renderer::{Appearance, Shape, StrokeRenderer, render_scene};
pub use view::{MAX_SCALE, MIN_SCALE, Viewport};
