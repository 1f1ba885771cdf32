use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for stroke IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Process-wide counter shared by every generated id, so ids stay unique
/// across prefixes.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A lightweight, interned identifier for strokes.
/// Internally a `Spur` index: 4 bytes and `Copy`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId(Spur);

impl StrokeId {
    /// Intern a string as a StrokeId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        StrokeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Fresh id for a stroke drawn on the main canvas.
    pub fn generate() -> Self {
        Self::with_prefix("stroke")
    }

    /// Generate a unique id with a prefix (e.g. `stroke_4`, `zoom-stroke_9`).
    pub fn with_prefix(prefix: &str) -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// Id for a piece of this stroke left behind by the eraser. Pieces
    /// share the root prefix (`zoom-stroke_3` → `zoom-stroke_41`), so
    /// erasing a fragment again does not lengthen its id.
    pub fn derive(&self) -> Self {
        Self::with_prefix(self.root())
    }

    /// The id up to its first numeric `_<n>` segment.
    fn root(&self) -> &str {
        let s = self.as_str();
        let mut end = 0;
        for segment in s.split('_') {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                break;
            }
            end += segment.len() + 1;
        }
        match s.get(..end.saturating_sub(1)) {
            Some(root) if !root.is_empty() => root,
            _ => "stroke",
        }
    }
}

impl fmt::Debug for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StrokeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StrokeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(StrokeId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = StrokeId::intern("path_1712_ab12");
        let b = StrokeId::intern("path_1712_ab12");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "path_1712_ab12");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = StrokeId::generate();
        let b = StrokeId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("stroke_"));
    }

    #[test]
    fn derived_ids_keep_root_prefix() {
        let parent = StrokeId::intern("zoom-stroke_3");
        let left = parent.derive();
        let right = parent.derive();
        assert_ne!(left, right);
        assert_ne!(left, parent);
        assert!(left.as_str().starts_with("zoom-stroke_"));
        assert!(!left.as_str().starts_with("zoom-stroke_3_"));

        assert!(StrokeId::intern("path_1712_ab12").derive().as_str().starts_with("path_"));
        assert!(StrokeId::intern("legacy").derive().as_str().starts_with("legacy_"));
        assert!(StrokeId::intern("42").derive().as_str().starts_with("stroke_"));
    }

    #[test]
    fn repeated_derivation_stays_short() {
        let mut id = StrokeId::intern("stroke_1");
        for _ in 0..200 {
            id = id.derive();
        }
        assert!(id.as_str().starts_with("stroke_"));
        assert!(id.as_str().len() < 32, "{id}");
    }
}
