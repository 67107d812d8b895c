//! Diagram-assistant integration. The host owns the actual model call; the
//! engine only hands out the request gate, parses the reply into element
//! descriptors and folds the result into the scene as one undo step.

use serde::Deserialize;
use thiserror::Error;

use crate::drawing::{Element, ElementKind};
use crate::editor::Editor;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("a generation request is already in flight")]
    Busy,
    #[error("malformed element JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("assistant backend: {0}")]
    Backend(String),
}

/// One element as the assistant describes it: kind, placement, and optional
/// style overrides. Everything else comes from the editor defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(default)]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f32>,
}

/// Parse the assistant's reply. Models wrap JSON in markdown fences more
/// often than not, so those are stripped first.
pub fn parse_descriptors(reply: &str) -> Result<Vec<ElementDescriptor>, AssistantError> {
    let body = reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    Ok(serde_json::from_str(body)?)
}

impl Editor {
    /// Gate a new generation request. At most one request may be in flight;
    /// the host calls [`Editor::finish_assist`] with the outcome.
    pub fn begin_assist(&mut self) -> Result<(), AssistantError> {
        if self.assist_pending {
            return Err(AssistantError::Busy);
        }
        self.assist_pending = true;
        Ok(())
    }

    pub fn assist_in_flight(&self) -> bool {
        self.assist_pending
    }

    /// Resolve the in-flight request. Success appends all described elements
    /// and commits once; failure leaves the scene untouched and surfaces a
    /// notice for the host to show.
    pub fn finish_assist(&mut self, result: Result<Vec<ElementDescriptor>, AssistantError>) {
        if !self.assist_pending {
            log::warn!("finish_assist with no request in flight");
            return;
        }
        self.assist_pending = false;

        let descriptors = match result {
            Ok(descriptors) => descriptors,
            Err(err) => {
                log::warn!("assistant request failed: {err}");
                self.notice = Some(err.to_string());
                return;
            }
        };
        if descriptors.is_empty() {
            log::debug!("assistant returned no elements");
            return;
        }

        log::info!("assistant generated {} elements", descriptors.len());
        for d in descriptors {
            let mut style = self.new_style();
            if let Some(color) = d.stroke_color {
                style.stroke_color = color;
            }
            if let Some(width) = d.stroke_width {
                style.stroke_width = width;
            }
            let element =
                Element::new(d.kind, d.x1, d.y1, style).with_second_corner(d.x2, d.y2);
            self.elements.push(element);
        }
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_fenced_json() {
        let plain = r#"[{"type":"rectangle","x1":100,"y1":100,"x2":300,"y2":200}]"#;
        let parsed = parse_descriptors(plain).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, ElementKind::Rectangle);
        assert_eq!(parsed[0].x2, 300.0);
        assert_eq!(parsed[0].stroke_color, None);

        let fenced = "```json\n[{\"type\":\"arrow\",\"x1\":0,\"y1\":0,\"x2\":50,\"y2\":50,\"strokeColor\":\"#ef4444\",\"strokeWidth\":4}]\n```";
        let parsed = parse_descriptors(fenced).unwrap();
        assert_eq!(parsed[0].kind, ElementKind::Arrow);
        assert_eq!(parsed[0].stroke_color.as_deref(), Some("#ef4444"));
        assert_eq!(parsed[0].stroke_width, Some(4.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_descriptors("the diagram you asked for:"),
            Err(AssistantError::Parse(_))
        ));
    }

    #[test]
    fn test_busy_guard() {
        let mut editor = Editor::new();
        assert!(editor.begin_assist().is_ok());
        assert!(editor.assist_in_flight());
        assert!(matches!(editor.begin_assist(), Err(AssistantError::Busy)));

        editor.finish_assist(Ok(Vec::new()));
        assert!(!editor.assist_in_flight());
        assert!(editor.begin_assist().is_ok());
    }

    #[test]
    fn test_success_appends_all_elements_as_one_commit() {
        let mut editor = Editor::new();
        let before = editor.history().len();
        editor.begin_assist().unwrap();
        let reply = r##"[
            {"type":"rectangle","x1":100,"y1":100,"x2":300,"y2":200},
            {"type":"circle","x1":400,"y1":100,"x2":500,"y2":200,"strokeColor":"#3b82f6"},
            {"type":"arrow","x1":300,"y1":150,"x2":400,"y2":150}
        ]"##;
        editor.finish_assist(parse_descriptors(reply));

        assert_eq!(editor.elements().len(), 3);
        assert_eq!(editor.history().len(), before + 1);
        assert_eq!(editor.elements()[1].style.stroke_color, "#3b82f6");
        // each generated element gets its own sketch seed
        assert_ne!(
            editor.elements()[0].style.seed,
            editor.elements()[1].style.seed
        );
        assert!(editor.take_notice().is_none());
    }

    #[test]
    fn test_failure_leaves_scene_unchanged_with_notice() {
        let mut editor = Editor::new();
        let before = editor.history().len();
        editor.begin_assist().unwrap();
        editor.finish_assist(Err(AssistantError::Backend("rate limited".to_string())));

        assert!(editor.elements().is_empty());
        assert_eq!(editor.history().len(), before);
        let notice = editor.take_notice().expect("notice surfaced");
        assert!(notice.contains("rate limited"));
        assert!(editor.take_notice().is_none());
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut editor = Editor::new();
        editor.finish_assist(Ok(vec![ElementDescriptor {
            kind: ElementKind::Rectangle,
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 10.0,
            stroke_color: None,
            stroke_width: None,
        }]));
        assert!(editor.elements().is_empty());
    }
}
