use std::collections::HashMap;

use crate::math::Bounds;

/// One vector icon as the host's asset pack describes it: SVG path data plus
/// the view box it was authored in.
#[derive(Debug, Clone, PartialEq)]
pub struct IconInfo {
    pub name: String,
    pub path: String,
    pub view_box: (f32, f32),
    pub fill: String,
}

/// Icon lookup supplied by the host. The engine only ever resolves keys; it
/// never owns or parses icon assets.
pub trait IconCatalog {
    fn get(&self, key: &str) -> Option<&IconInfo>;
}

impl IconCatalog for HashMap<String, IconInfo> {
    fn get(&self, key: &str) -> Option<&IconInfo> {
        HashMap::get(self, key)
    }
}

/// Largest rectangle with the icon's aspect ratio centered inside `bounds`.
/// Icons keep their proportions however the placement box was dragged out.
pub fn letterbox(view_box: (f32, f32), bounds: Bounds) -> (f32, f32, f32, f32) {
    let (vw, vh) = view_box;
    if vw <= 0.0 || vh <= 0.0 {
        return (bounds.min_x, bounds.min_y, bounds.width(), bounds.height());
    }
    let scale = (bounds.width() / vw).min(bounds.height() / vh);
    let w = vw * scale;
    let h = vh * scale;
    (
        bounds.min_x + (bounds.width() - w) / 2.0,
        bounds.min_y + (bounds.height() - h) / 2.0,
        w,
        h,
    )
}
