//! Page engine: the single authoritative stroke collection of a page.
//!
//! Tools never touch strokes directly. They return `StrokeMutation`s and
//! the engine applies them in order, bumping a revision counter and
//! marking the page dirty. The zoom window only ever reads from here.
//!
//! Persistence goes through the [`PageStore`] seam so the host decides
//! where pages live.

use ink_core::error::{InkError, Result};
use ink_core::id::StrokeId;
use ink_core::model::*;
use smallvec::SmallVec;
use std::collections::HashMap;

/// A change to a page's stroke collection.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeMutation {
    /// Append a committed stroke.
    Add(Stroke),
    /// Swap one stroke for zero or more others, in place. Used by the
    /// eraser; an empty `with` is the same as `Remove`.
    Replace {
        id: StrokeId,
        with: SmallVec<[Stroke; 2]>,
    },
    Remove { id: StrokeId },
}

pub struct PageEngine {
    strokes: Vec<Stroke>,
    background_id: Option<String>,
    /// Bumped on every applied mutation.
    revision: u64,
    /// Set on change, cleared by a successful save or a load.
    dirty: bool,
}

impl Default for PageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PageEngine {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            background_id: None,
            revision: 0,
            dirty: false,
        }
    }

    /// Build an engine from a stored record. Invalid strokes are dropped.
    pub fn from_document(mut doc: PageDocument) -> Self {
        doc.sanitize();
        Self {
            strokes: doc.strokes,
            background_id: doc.background_id,
            revision: 0,
            dirty: false,
        }
    }

    pub fn to_document(&self) -> PageDocument {
        PageDocument {
            strokes: self.strokes.clone(),
            background_id: self.background_id.clone(),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id == id)
    }

    pub fn background_id(&self) -> Option<&str> {
        self.background_id.as_deref()
    }

    pub fn set_background(&mut self, background_id: Option<String>) {
        if self.background_id != background_id {
            self.background_id = background_id;
            self.touch();
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.dirty = true;
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one mutation. Returns whether anything changed; mutations that
    /// name a stroke no longer on the page are ignored.
    pub fn apply_mutation(&mut self, mutation: StrokeMutation) -> bool {
        match mutation {
            StrokeMutation::Add(stroke) => {
                if !stroke.is_valid() {
                    log::warn!("refusing to add invalid stroke {}", stroke.id);
                    return false;
                }
                log::debug!("add {} ({} points)", stroke.id, stroke.len());
                self.strokes.push(stroke);
            }
            StrokeMutation::Replace { id, with } => {
                let Some(idx) = self.position(id) else {
                    log::warn!("replace of unknown stroke {id}");
                    return false;
                };
                log::debug!("replace {id} with {} stroke(s)", with.len());
                self.strokes.splice(idx..=idx, with);
            }
            StrokeMutation::Remove { id } => {
                let Some(idx) = self.position(id) else {
                    log::warn!("remove of unknown stroke {id}");
                    return false;
                };
                log::debug!("remove {id}");
                self.strokes.remove(idx);
            }
        }
        self.touch();
        true
    }

    /// Apply mutations in order. Returns how many changed the page.
    pub fn apply_all(&mut self, mutations: impl IntoIterator<Item = StrokeMutation>) -> usize {
        let mut changed = 0;
        for mutation in mutations {
            if self.apply_mutation(mutation) {
                changed += 1;
            }
        }
        changed
    }

    /// Remove every stroke and the background.
    pub fn clear(&mut self) {
        if !self.strokes.is_empty() || self.background_id.is_some() {
            self.strokes.clear();
            self.background_id = None;
            self.touch();
        }
    }

    fn position(&self, id: StrokeId) -> Option<usize> {
        self.strokes.iter().position(|s| s.id == id)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Replace the page with the stored record for `page_id`, or an empty
    /// page if there is none.
    pub fn load(&mut self, store: &dyn PageStore, page_id: &str) -> Result<()> {
        let doc = store.load_page(page_id)?.unwrap_or_default();
        *self = Self::from_document(doc);
        log::debug!("loaded page {page_id}: {} strokes", self.strokes.len());
        Ok(())
    }

    /// Write the page to `store`. The page stays dirty if the write fails.
    pub fn save(&mut self, store: &mut dyn PageStore, page_id: &str) -> Result<()> {
        store.save_page(page_id, &self.to_document())?;
        self.dirty = false;
        log::debug!("saved page {page_id} at revision {}", self.revision);
        Ok(())
    }
}

// ─── Storage seam ────────────────────────────────────────────────────────

/// Where pages are persisted. Synchronous from the editor's point of view;
/// remote implementations queue the snapshot they are handed.
pub trait PageStore {
    fn load_page(&self, page_id: &str) -> Result<Option<PageDocument>>;
    fn save_page(&mut self, page_id: &str, page: &PageDocument) -> Result<()>;
}

/// Keeps pages as MessagePack snapshots in memory.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: HashMap<String, Vec<u8>>,
    read_only: bool,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn contains(&self, page_id: &str) -> bool {
        self.pages.contains_key(page_id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageStore for MemoryPageStore {
    fn load_page(&self, page_id: &str) -> Result<Option<PageDocument>> {
        self.pages
            .get(page_id)
            .map(|bytes| PageDocument::from_msgpack(bytes))
            .transpose()
    }

    fn save_page(&mut self, page_id: &str, page: &PageDocument) -> Result<()> {
        if self.read_only {
            return Err(InkError::Store(format!("store is read-only, cannot save {page_id}")));
        }
        self.pages.insert(page_id.to_string(), page.to_msgpack()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn stroke(name: &str, xs: &[f32]) -> Stroke {
        Stroke::from_points(
            StrokeId::intern(name),
            xs.iter().map(|&x| Point::new(x, 0.0)).collect(),
            StrokeStyle::default(),
        )
    }

    fn ids(engine: &PageEngine) -> Vec<&str> {
        engine.strokes().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn add_bumps_revision_and_dirty() {
        let mut engine = PageEngine::new();
        assert!(!engine.is_dirty());
        assert!(engine.apply_mutation(StrokeMutation::Add(stroke("pa", &[0.0, 1.0]))));
        assert_eq!(engine.revision(), 1);
        assert!(engine.is_dirty());
    }

    #[test]
    fn replace_keeps_order() {
        let mut engine = PageEngine::new();
        engine.apply_all([
            StrokeMutation::Add(stroke("pr1", &[0.0, 1.0])),
            StrokeMutation::Add(stroke("pr2", &[0.0, 1.0])),
            StrokeMutation::Add(stroke("pr3", &[0.0, 1.0])),
        ]);
        engine.apply_mutation(StrokeMutation::Replace {
            id: StrokeId::intern("pr2"),
            with: smallvec![stroke("pr2a", &[0.0, 1.0]), stroke("pr2b", &[2.0, 3.0])],
        });
        assert_eq!(ids(&engine), vec!["pr1", "pr2a", "pr2b", "pr3"]);
        assert!(engine.stroke(StrokeId::intern("pr2")).is_none());
        assert_eq!(engine.stroke(StrokeId::intern("pr2b")).map(Stroke::len), Some(2));

        engine.apply_mutation(StrokeMutation::Replace {
            id: StrokeId::intern("pr2a"),
            with: SmallVec::new(),
        });
        assert_eq!(ids(&engine), vec!["pr1", "pr2b", "pr3"]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut engine = PageEngine::new();
        assert!(!engine.apply_mutation(StrokeMutation::Remove {
            id: StrokeId::intern("ghost")
        }));
        assert_eq!(engine.revision(), 0);
        assert!(!engine.is_dirty());
    }

    #[test]
    fn invalid_add_is_refused() {
        let mut engine = PageEngine::new();
        assert!(!engine.apply_mutation(StrokeMutation::Add(stroke("empty_add", &[]))));
        assert!(engine.strokes().is_empty());
    }

    #[test]
    fn save_and_load_through_store() {
        let mut store = MemoryPageStore::new();
        let mut engine = PageEngine::new();
        engine.apply_mutation(StrokeMutation::Add(stroke("ps", &[0.0, 4.0, 8.0])));
        engine.set_background(Some("bg_dots".into()));
        engine.save(&mut store, "page-1").unwrap();
        assert!(!engine.is_dirty());

        let mut other = PageEngine::new();
        other.load(&store, "page-1").unwrap();
        assert_eq!(other.to_document(), engine.to_document());
        assert_eq!(other.background_id(), Some("bg_dots"));

        other.load(&store, "missing").unwrap();
        assert!(other.strokes().is_empty());
    }

    #[test]
    fn failed_save_stays_dirty() {
        let mut store = MemoryPageStore::new();
        store.set_read_only(true);
        let mut engine = PageEngine::new();
        engine.apply_mutation(StrokeMutation::Add(stroke("pf", &[0.0, 1.0])));
        let err = engine.save(&mut store, "page-1").unwrap_err();
        assert!(matches!(err, InkError::Store(_)));
        assert!(engine.is_dirty());
        assert!(store.is_empty());
    }
}
