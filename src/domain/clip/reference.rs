//! Clip reference and index value objects

use std::fmt;
use std::path::Path;

/// Opaque locator of one recorded clip.
///
/// For the desktop engine this is the path of the clip file. Immutable once
/// created; the raw locator is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipReference {
    locator: String,
}

impl ClipReference {
    /// Build a reference from the raw locator an engine returned.
    ///
    /// Returns `None` when the locator is empty or whitespace only, which is
    /// how an engine signals that a recording produced nothing usable.
    pub fn from_locator(locator: impl Into<String>) -> Option<Self> {
        let locator = locator.into();
        if locator.trim().is_empty() {
            return None;
        }
        Some(Self { locator })
    }

    /// Get the raw locator
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// View the locator as a filesystem path
    pub fn as_path(&self) -> &Path {
        Path::new(&self.locator)
    }
}

impl fmt::Display for ClipReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.locator)
    }
}

/// Zero-based position of a clip in the store.
///
/// Displayed one-based, matching the "Voice note N" row labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClipIndex(usize);

impl ClipIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Build from a one-based row number; `0` has no clip
    pub fn from_row_number(row: usize) -> Option<Self> {
        row.checked_sub(1).map(Self)
    }

    pub const fn get(&self) -> usize {
        self.0
    }

    /// One-based row number used in labels
    pub const fn row_number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for ClipIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Voice note {}", self.row_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_locator_has_no_reference() {
        assert!(ClipReference::from_locator("").is_none());
        assert!(ClipReference::from_locator("   ").is_none());
    }

    #[test]
    fn locator_is_kept_verbatim() {
        let clip = ClipReference::from_locator("/tmp/voice-note-1.wav").unwrap();
        assert_eq!(clip.locator(), "/tmp/voice-note-1.wav");
        assert_eq!(clip.as_path(), Path::new("/tmp/voice-note-1.wav"));
        assert_eq!(clip.to_string(), "/tmp/voice-note-1.wav");
    }

    #[test]
    fn index_row_numbers_are_one_based() {
        assert_eq!(ClipIndex::new(0).row_number(), 1);
        assert_eq!(ClipIndex::from_row_number(3), Some(ClipIndex::new(2)));
        assert_eq!(ClipIndex::from_row_number(0), None);
        assert_eq!(ClipIndex::new(1).to_string(), "Voice note 2");
    }
}
