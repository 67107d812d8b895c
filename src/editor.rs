use rand::Rng;

use crate::drawing::{
    EdgeStyle, Element, ElementId, ElementKind, ElementStyle, FillStyle, LineStyle, StyleUpdate,
    Tool,
};
use crate::event_handler::Gesture;
use crate::history::History;
use crate::math::Point;
use crate::view::Viewport;

/// Outstanding request for text content from the host's text-input
/// collaborator. Answered through [`Editor::submit_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingText {
    pub position: Point,
}

/// Catalog entry the icon tool stamps out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconChoice {
    pub key: String,
    pub label: String,
}

/// Central engine state: the committed scene plus the live working copy,
/// view transform, tool mode, selection and the current pointer gesture.
pub struct Editor {
    /// Live scene. Identical to the committed snapshot except during an
    /// uncommitted drag/resize/erase, when it is the displayed overlay.
    pub(crate) elements: Vec<Element>,
    pub(crate) history: History,
    pub view: Viewport,
    pub(crate) tool: Tool,
    /// Weak reference: may dangle after a deletion and then reads as "no
    /// selection".
    pub(crate) selected: Option<ElementId>,
    pub(crate) gesture: Gesture,
    pub(crate) pending_text: Option<PendingText>,
    pub(crate) assist_pending: bool,
    pub(crate) notice: Option<String>,

    // Defaults applied to newly created elements; a UI concern the model
    // itself never fills in.
    pub default_stroke_color: String,
    pub default_fill_color: String,
    pub default_stroke_width: f32,
    pub icon_choice: Option<IconChoice>,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            history: History::new(),
            view: Viewport::new(),
            tool: Tool::Selection,
            selected: None,
            gesture: Gesture::None,
            pending_text: None,
            assist_pending: false,
            notice: None,
            default_stroke_color: "#18181b".to_string(),
            default_fill_color: "transparent".to_string(),
            default_stroke_width: 2.0,
            icon_choice: None,
        }
    }

    /// Style for a freshly created element: the editor defaults plus a new
    /// random sketch seed.
    pub(crate) fn new_style(&self) -> ElementStyle {
        ElementStyle {
            stroke_color: self.default_stroke_color.clone(),
            fill_color: self.default_fill_color.clone(),
            stroke_width: self.default_stroke_width,
            roughness: 1.0,
            opacity: 100.0,
            fill_style: FillStyle::Hachure,
            line_style: LineStyle::Solid,
            edge_style: EdgeStyle::Round,
            seed: rand::rng().random::<u64>(),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The element being rubber-banded out by an active drawing gesture, if
    /// any. Not yet part of the scene; the renderer overlays it.
    pub fn in_progress(&self) -> Option<&Element> {
        match &self.gesture {
            Gesture::Drawing { element } => Some(element),
            _ => None,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        log::debug!("tool -> {tool:?}");
        self.tool = tool;
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected_element().map(|el| el.id)
    }

    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selected?;
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::None)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.elements = snapshot.to_vec();
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.elements = snapshot.to_vec();
        }
    }

    /// Remove the selected element as a single history step.
    pub fn delete_selection(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.elements.retain(|el| el.id != id);
        self.selected = None;
        self.commit();
    }

    /// Apply a partial style change to the selected element by whole-object
    /// replacement and commit. The element's seed is untouched.
    pub fn update_selected_style(&mut self, update: &StyleUpdate) {
        let Some(el) = self.selected_element() else {
            return;
        };
        let restyled = el.restyled(update);
        self.replace_element(restyled);
        self.commit();
    }

    pub fn pending_text(&self) -> Option<PendingText> {
        self.pending_text
    }

    /// Answer an outstanding text request. `None` or an empty string aborts
    /// element creation; otherwise the text element is appended, committed
    /// and selected.
    pub fn submit_text(&mut self, text: Option<String>) {
        let Some(pending) = self.pending_text.take() else {
            log::warn!("submit_text with no pending request");
            return;
        };
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => {
                log::debug!("text input cancelled");
                return;
            }
        };
        let element = Element::new(
            ElementKind::Text,
            pending.position[0],
            pending.position[1],
            self.new_style(),
        )
        .with_text(text);
        let id = element.id;
        self.elements.push(element);
        self.commit();
        self.selected = Some(id);
    }

    /// Transient user-facing notification (assistant failures and the like).
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub(crate) fn commit(&mut self) {
        self.history.commit(self.elements.clone());
    }

    /// Drop uncommitted live edits and return to the committed snapshot.
    pub(crate) fn restore_committed(&mut self) {
        self.elements = self.history.current().to_vec();
    }

    pub(crate) fn replace_element(&mut self, element: Element) {
        if let Some(slot) = self.elements.iter_mut().find(|el| el.id == element.id) {
            *slot = element;
        }
    }

    #[cfg(test)]
    pub(crate) fn history(&self) -> &History {
        &self.history
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::test_style;

    fn editor_with_rect() -> (Editor, ElementId) {
        let mut editor = Editor::new();
        let el = Element::new(ElementKind::Rectangle, 0.0, 0.0, test_style(9))
            .with_second_corner(50.0, 50.0);
        let id = el.id;
        editor.elements.push(el);
        editor.commit();
        editor.selected = Some(id);
        (editor, id)
    }

    #[test]
    fn test_dangling_selection_reads_as_none() {
        let (mut editor, id) = editor_with_rect();
        assert_eq!(editor.selected_id(), Some(id));
        editor.elements.clear();
        assert_eq!(editor.selected_id(), None);
        assert!(editor.selected_element().is_none());
    }

    #[test]
    fn test_delete_selection_is_one_commit() {
        let (mut editor, _) = editor_with_rect();
        let before = editor.history().len();
        editor.delete_selection();
        assert!(editor.elements().is_empty());
        assert_eq!(editor.history().len(), before + 1);
        // deleting again with nothing selected commits nothing
        editor.delete_selection();
        assert_eq!(editor.history().len(), before + 1);
    }

    #[test]
    fn test_update_selected_style_keeps_seed_and_commits() {
        let (mut editor, id) = editor_with_rect();
        let before = editor.history().len();
        editor.update_selected_style(&StyleUpdate {
            stroke_width: Some(6.0),
            ..Default::default()
        });
        let el = editor.selected_element().unwrap();
        assert_eq!(el.id, id);
        assert_eq!(el.style.stroke_width, 6.0);
        assert_eq!(el.style.seed, 9);
        assert_eq!(editor.history().len(), before + 1);
    }

    #[test]
    fn test_submit_text_empty_aborts() {
        let mut editor = Editor::new();
        editor.pending_text = Some(PendingText {
            position: [10.0, 20.0],
        });
        editor.submit_text(Some(String::new()));
        assert!(editor.elements().is_empty());
        assert!(editor.pending_text().is_none());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_submit_text_appends_commits_selects() {
        let mut editor = Editor::new();
        editor.pending_text = Some(PendingText {
            position: [10.0, 20.0],
        });
        editor.submit_text(Some("hello".to_string()));
        assert_eq!(editor.elements().len(), 1);
        let el = &editor.elements()[0];
        assert_eq!(el.kind, ElementKind::Text);
        assert_eq!(el.text.as_deref(), Some("hello"));
        assert_eq!((el.x1, el.y1, el.x2, el.y2), (10.0, 20.0, 10.0, 20.0));
        assert_eq!(editor.selected_id(), Some(el.id));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_undo_redo_swap_live_scene() {
        let (mut editor, _) = editor_with_rect();
        editor.undo();
        assert!(editor.elements().is_empty());
        editor.redo();
        assert_eq!(editor.elements().len(), 1);
    }
}
