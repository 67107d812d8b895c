use crate::math::Point;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 10.0;

/// Zoom step used by the discrete +/- zoom controls.
const SCALE_STEP: f32 = 0.1;

/// Pan/zoom state of the canvas. Process-lifetime state, never part of the
/// undo history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Point,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            offset: [0.0, 0.0],
        }
    }

    pub fn screen_to_scene(&self, screen: Point) -> Point {
        [
            (screen[0] - self.offset[0]) / self.scale,
            (screen[1] - self.offset[1]) / self.scale,
        ]
    }

    pub fn scene_to_screen(&self, scene: Point) -> Point {
        [
            scene[0] * self.scale + self.offset[0],
            scene[1] * self.scale + self.offset[1],
        ]
    }

    /// Set the scale while keeping the scene point under `pointer` (screen
    /// coordinates) fixed on screen.
    pub fn set_scale_about(&mut self, new_scale: f32, pointer: Point) {
        let new_scale = new_scale.clamp(MIN_SCALE, MAX_SCALE);
        let target = self.screen_to_scene(pointer);
        self.offset = [
            pointer[0] - target[0] * new_scale,
            pointer[1] - target[1] * new_scale,
        ];
        self.scale = new_scale;
    }

    /// Zoom wheel gesture: `delta` is the wheel amount with "up = zoom in"
    /// sign, mapped onto an exponential 1.1-per-100-units curve.
    pub fn zoom_wheel(&mut self, delta: f32, pointer: Point) {
        let factor = 1.1_f32.powf(delta / 100.0);
        self.set_scale_about(self.scale * factor, pointer);
    }

    /// Plain wheel gesture: translate the view by the wheel delta.
    pub fn pan_wheel(&mut self, dx: f32, dy: f32) {
        self.offset[0] -= dx;
        self.offset[1] -= dy;
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.offset[0] += dx;
        self.offset[1] += dy;
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
