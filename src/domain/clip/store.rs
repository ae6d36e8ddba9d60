//! Append-only clip store

use super::{ClipIndex, ClipReference};

/// Ordered sequence of recorded clips.
///
/// Insertion order is recording order. The store only grows: there is no
/// removal and no reordering, so an index stays valid for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipStore {
    clips: Vec<ClipReference>,
}

impl ClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip and return its index
    pub fn append(&mut self, clip: ClipReference) -> ClipIndex {
        self.clips.push(clip);
        ClipIndex::new(self.clips.len() - 1)
    }

    pub fn get(&self, index: ClipIndex) -> Option<&ClipReference> {
        self.clips.get(index.get())
    }

    pub fn contains(&self, index: ClipIndex) -> bool {
        index.get() < self.clips.len()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Iterate clips with their indices, in recording order
    pub fn iter(&self) -> impl Iterator<Item = (ClipIndex, &ClipReference)> {
        self.clips
            .iter()
            .enumerate()
            .map(|(i, clip)| (ClipIndex::new(i), clip))
    }
}
