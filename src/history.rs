use crate::drawing::Element;

/// Linear undo/redo log of committed scene snapshots. The snapshot at the
/// cursor is the current committed scene; a new commit drops every snapshot
/// after the cursor before appending.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &[Element] {
        &self.snapshots[self.cursor]
    }

    pub fn commit(&mut self, scene: Vec<Element>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(scene);
        self.cursor = self.snapshots.len() - 1;
        log::debug!(
            "committed snapshot {} ({} elements)",
            self.cursor,
            self.current().len()
        );
    }

    /// Step back one snapshot. No-op at the beginning of the log.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if self.cursor == 0 {
            log::debug!("nothing to undo");
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot. No-op at the end of the log.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if self.cursor + 1 >= self.snapshots.len() {
            log::debug!("nothing to redo");
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Snapshot count, always at least one (the initial empty scene).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Element, ElementKind, test_style};

    fn scene(n: usize) -> Vec<Element> {
        (0..n)
            .map(|i| Element::new(ElementKind::Rectangle, i as f32, 0.0, test_style(i as u64)))
            .collect()
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new();
        let s1 = scene(1);
        let s2 = scene(2);
        history.commit(s1.clone());
        history.commit(s2.clone());

        assert_eq!(history.undo(), Some(&s1[..]));
        assert_eq!(history.redo(), Some(&s2[..]));
        assert_eq!(history.current(), &s2[..]);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut history = History::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_at_end_is_noop() {
        let mut history = History::new();
        history.commit(scene(1));
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_commit_truncates_redo_tail() {
        let mut history = History::new();
        history.commit(scene(1));
        history.commit(scene(2));
        history.undo();
        history.undo();

        let s3 = scene(3);
        history.commit(s3.clone());
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current(), &s3[..]);
        assert!(!history.can_redo());
    }
}
