//! Dotted paths naming the node under construction.

use std::fmt;

/// Path from the top-level build to the current field, e.g.
/// `body.0.struct_block.title`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The path of a top-level build.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Extend the path by one segment.
    #[must_use]
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Returns `true` for the top-level path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Render the path, naming the root after `root_name`.
    #[must_use]
    pub fn describe(&self, root_name: &str) -> String {
        if self.is_root() {
            root_name.to_owned()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
