use crate::drawing::{Element, ElementId, ElementKind, Tool};
use crate::editor::{Editor, PendingText};
use crate::hit_test::{self, Handle};
use crate::math::{Bounds, Point};

/// Minimum bounding-box extent per axis enforced while resizing, in screen
/// units. A resize gesture can never collapse an element.
pub const MIN_RESIZE_EXTENT: f32 = 10.0;

/// Current pointer gesture. Lives only between pointer-down and pointer-up;
/// exactly one gesture is active at a time.
#[derive(Debug, Clone)]
pub enum Gesture {
    None,
    Panning {
        /// Last screen position, so each move applies its own delta.
        last: Point,
    },
    Drawing {
        /// The in-progress element; appended to the scene at pointer-up.
        element: Element,
    },
    Dragging {
        id: ElementId,
        /// Scene point where the pointer grabbed the element.
        grab: Point,
        /// Snapshot taken at pointer-down; every move derives from it so
        /// drags do not accumulate rounding.
        origin: Element,
    },
    Resizing {
        id: ElementId,
        handle: Handle,
        origin: Element,
    },
    Erasing,
}

/// Keyboard input as the host surface reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
}

impl Editor {
    /// Pointer-down entry point. `pan_modifier` is the host's pan override
    /// key (space/shift while on the selection tool).
    pub fn pointer_down(&mut self, screen: Point, pan_modifier: bool) {
        if self.gesture_active() {
            // single-pointer input shouldn't get here, but a missed
            // pointer-up must not leave a stuck gesture
            log::warn!("pointer-down during active gesture, resetting");
            self.restore_committed();
            self.gesture = Gesture::None;
        }

        if self.tool == Tool::Hand || (self.tool == Tool::Selection && pan_modifier) {
            self.gesture = Gesture::Panning { last: screen };
            return;
        }

        let scene = self.view.screen_to_scene(screen);

        match self.tool {
            Tool::Selection => {
                let hit = hit_test::hit_element(&self.elements, scene, self.view.scale).cloned();
                let Some(element) = hit else {
                    self.selected = None;
                    return;
                };
                let id = element.id;
                if self.selected_id() == Some(id) {
                    if let Some(handle) =
                        hit_test::hit_test_handle(&element, scene, self.view.scale)
                    {
                        log::debug!("resize {id} via {handle:?}");
                        self.gesture = Gesture::Resizing {
                            id,
                            handle,
                            origin: element,
                        };
                        return;
                    }
                }
                log::debug!("drag {id}");
                self.selected = Some(id);
                self.gesture = Gesture::Dragging {
                    id,
                    grab: scene,
                    origin: element,
                };
            }
            Tool::Text => {
                // no drag phase; the host answers through submit_text
                log::debug!("text input requested at {scene:?}");
                self.pending_text = Some(PendingText { position: scene });
            }
            Tool::Eraser => {
                self.erase_at(scene);
                self.gesture = Gesture::Erasing;
            }
            Tool::Icon => {
                let Some(choice) = self.icon_choice.clone() else {
                    log::warn!("icon tool active but no icon chosen");
                    return;
                };
                let element =
                    Element::new(ElementKind::Icon, scene[0], scene[1], self.new_style())
                        .with_icon(choice.key, choice.label);
                self.gesture = Gesture::Drawing { element };
            }
            Tool::Draw => {
                let element =
                    Element::new(ElementKind::Freehand, scene[0], scene[1], self.new_style());
                self.gesture = Gesture::Drawing { element };
            }
            Tool::Rectangle | Tool::Diamond | Tool::Circle | Tool::Line | Tool::Arrow => {
                let kind = match self.tool {
                    Tool::Rectangle => ElementKind::Rectangle,
                    Tool::Diamond => ElementKind::Diamond,
                    Tool::Circle => ElementKind::Circle,
                    Tool::Line => ElementKind::Line,
                    _ => ElementKind::Arrow,
                };
                let element = Element::new(kind, scene[0], scene[1], self.new_style());
                self.gesture = Gesture::Drawing { element };
            }
            Tool::Hand => {}
        }
    }

    /// Pointer-move: live updates only, nothing reaches history until
    /// pointer-up.
    pub fn pointer_move(&mut self, screen: Point) {
        if matches!(self.gesture, Gesture::Erasing) {
            let scene = self.view.screen_to_scene(screen);
            self.erase_at(scene);
            return;
        }

        let mut replacement = None;
        match &mut self.gesture {
            Gesture::None | Gesture::Erasing => {}
            Gesture::Panning { last } => {
                let dx = screen[0] - last[0];
                let dy = screen[1] - last[1];
                self.view.pan_by(dx, dy);
                *last = screen;
            }
            Gesture::Drawing { element } => {
                let scene = self.view.screen_to_scene(screen);
                *element = if element.kind == ElementKind::Freehand {
                    element.with_point_appended(scene)
                } else {
                    element.with_second_corner(scene[0], scene[1])
                };
            }
            Gesture::Dragging { grab, origin, .. } => {
                let scene = self.view.screen_to_scene(screen);
                replacement = Some(origin.translated(scene[0] - grab[0], scene[1] - grab[1]));
            }
            Gesture::Resizing { handle, origin, .. } => {
                let scene = self.view.screen_to_scene(screen);
                let min_extent = MIN_RESIZE_EXTENT / self.view.scale;
                let (x1, y1, x2, y2) =
                    resize_corners(origin.bounds(), *handle, scene, min_extent);
                replacement = Some(origin.with_corners(x1, y1, x2, y2));
            }
        }
        if let Some(element) = replacement {
            self.replace_element(element);
        }
    }

    /// Pointer-up: fold the gesture's outcome into history as at most one
    /// commit and return to the idle state.
    pub fn pointer_up(&mut self) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::None);
        match gesture {
            Gesture::None | Gesture::Panning { .. } => {}
            Gesture::Drawing { element } => {
                let degenerate = (element.kind.is_shape() && element.is_zero_area())
                    || (element.kind == ElementKind::Freehand && element.points.len() < 2);
                if degenerate {
                    log::debug!("discarding degenerate {:?}", element.kind);
                    return;
                }
                let id = element.id;
                self.elements.push(element);
                self.commit();
                self.selected = Some(id);
            }
            Gesture::Dragging { .. } | Gesture::Resizing { .. } | Gesture::Erasing => {
                // a click that moved nothing (or erased nothing) must not
                // produce an undo step
                if self.elements != self.history.current() {
                    self.commit();
                }
            }
        }
    }

    /// Abnormal gesture end (capture lost, window blur): discard live edits
    /// and return to the committed snapshot.
    pub fn pointer_cancel(&mut self) {
        if self.gesture_active() {
            log::debug!("gesture cancelled");
            self.restore_committed();
            self.gesture = Gesture::None;
        }
    }

    /// Wheel input: with the zoom modifier held this zooms about the
    /// pointer, otherwise it pans by the wheel delta.
    pub fn wheel(&mut self, dx: f32, dy: f32, zoom_modifier: bool, pointer: Point) {
        if zoom_modifier {
            self.view.zoom_wheel(-dy, pointer);
        } else {
            self.view.pan_wheel(dx, dy);
        }
    }

    /// Keyboard surface: undo/redo, delete, tool hotkeys. Returns whether
    /// the key was consumed.
    pub fn handle_key(&mut self, key: Key, ctrl: bool, shift: bool) -> bool {
        match key {
            Key::Char('z') if ctrl => {
                if shift {
                    self.redo();
                } else {
                    self.undo();
                }
                true
            }
            Key::Delete | Key::Backspace => {
                if self.selected_id().is_some() {
                    self.delete_selection();
                    true
                } else {
                    false
                }
            }
            Key::Char(c) => match tool_for_key(c) {
                Some(tool) => {
                    self.set_tool(tool);
                    true
                }
                None => false,
            },
        }
    }

    /// Remove the topmost element under `scene`, if any, from the live
    /// scene. Committed once per eraser gesture, not per removal.
    fn erase_at(&mut self, scene: Point) {
        if let Some(id) = hit_test::hit_test(&self.elements, scene, self.view.scale) {
            log::debug!("erased {id}");
            self.elements.retain(|el| el.id != id);
        }
    }
}

fn tool_for_key(c: char) -> Option<Tool> {
    match c {
        'v' | '1' => Some(Tool::Selection),
        'h' => Some(Tool::Hand),
        'r' | '2' => Some(Tool::Rectangle),
        'd' | '3' => Some(Tool::Diamond),
        'o' | '4' => Some(Tool::Circle),
        'a' | '5' => Some(Tool::Arrow),
        'l' | '6' => Some(Tool::Line),
        'p' | '7' => Some(Tool::Draw),
        't' | '8' => Some(Tool::Text),
        'e' | '0' => Some(Tool::Eraser),
        _ => None,
    }
}

/// New corner pair for a resize: the dragged corner follows the pointer,
/// the opposite corner stays fixed, and the moving corner is clamped so
/// neither axis drops below `min_extent`.
fn resize_corners(origin: Bounds, handle: Handle, p: Point, min_extent: f32) -> (f32, f32, f32, f32) {
    match handle {
        Handle::Se => {
            let x = p[0].max(origin.min_x + min_extent);
            let y = p[1].max(origin.min_y + min_extent);
            (origin.min_x, origin.min_y, x, y)
        }
        Handle::Nw => {
            let x = p[0].min(origin.max_x - min_extent);
            let y = p[1].min(origin.max_y - min_extent);
            (x, y, origin.max_x, origin.max_y)
        }
        Handle::Ne => {
            let x = p[0].max(origin.min_x + min_extent);
            let y = p[1].min(origin.max_y - min_extent);
            (origin.min_x, y, x, origin.max_y)
        }
        Handle::Sw => {
            let x = p[0].min(origin.max_x - min_extent);
            let y = p[1].max(origin.min_y + min_extent);
            (x, origin.min_y, origin.max_x, y)
        }
    }
}
