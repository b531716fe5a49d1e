//! Semantic reorder events.
//!
//! The drag-and-drop layer reports a drop as a source index, an optional
//! destination index and the list it happened in. A drop outside any valid
//! target has no destination and changes nothing.

use serde::{Deserialize, Serialize};

/// Which list a move applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveScope {
    /// The top-level list of selections.
    Selections,
    /// The variant list of the selection at the given position.
    Variants { selection_index: usize },
}

/// A "move item from A to B" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub source_index: usize,
    pub destination_index: Option<usize>,
    pub scope: MoveScope,
}

impl MoveEvent {
    /// A move within the selection list.
    pub fn selections(source_index: usize, destination_index: Option<usize>) -> Self {
        Self {
            source_index,
            destination_index,
            scope: MoveScope::Selections,
        }
    }

    /// A move within one selection's variant list.
    pub fn variants(
        selection_index: usize,
        source_index: usize,
        destination_index: Option<usize>,
    ) -> Self {
        Self {
            source_index,
            destination_index,
            scope: MoveScope::Variants { selection_index },
        }
    }
}

/// Remove the element at `from` and reinsert it at `to`.
///
/// Returns `false` without touching the slice when either index is out of range.
pub(crate) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_forward() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut v, 0, 2));
        assert_eq!(v, vec!['b', 'c', 'a', 'd']);
    }

    #[test]
    fn test_move_backward() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut v, 3, 1));
        assert_eq!(v, vec!['a', 'd', 'b', 'c']);
    }

    #[test]
    fn test_move_out_of_range_is_rejected() {
        let mut v = vec!['a', 'b'];
        assert!(!move_item(&mut v, 2, 0));
        assert!(!move_item(&mut v, 0, 2));
        assert_eq!(v, vec!['a', 'b']);
    }

    #[test]
    fn test_event_serialization() {
        let event = MoveEvent::variants(1, 0, Some(2));
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["scope"]["variants"]["selection_index"], 1);
        assert!(MoveEvent::selections(0, None).destination_index.is_none());
    }
}
