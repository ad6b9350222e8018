//! Owner of every open document, addressed by stable handles.

use crate::config::EditorConfig;
use crate::document::{Document, EditorMode};
use crate::error::EditorError;
use crate::spell::{misspelled_ranges, SpellCache, SpellOracle};
use std::fmt;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// Handle to a document in a [`Workspace`]. Never reused after close.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}

/// Set of independent documents plus the shared configuration used to
/// create them.
///
/// The spell cache is shared by every document: answers depend only on the
/// word, never on which document it came from.
#[derive(Debug, Default)]
pub struct Workspace {
    config: EditorConfig,
    documents: Vec<(DocumentId, Document)>,
    next_id: u64,
    active: Option<DocumentId>,
    spell: SpellCache,
}

impl Workspace {
    pub fn new(config: EditorConfig) -> Self {
        let spell = SpellCache::from_config(&config);
        Self {
            config,
            documents: Vec::new(),
            next_id: 1,
            active: None,
            spell,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn insert(&mut self, doc: Document) -> DocumentId {
        let id = DocumentId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.documents.push((id, doc));
        self.active = Some(id);
        debug!(%id, open = self.documents.len(), "document opened");
        id
    }

    /// Opens a document holding `text` and makes it active.
    pub fn open(&mut self, text: &str) -> DocumentId {
        let doc = Document::with_config(text, &self.config);
        self.insert(doc)
    }

    /// Decodes file bytes into a new active document, picking the mode from
    /// `path` when given.
    ///
    /// # Errors
    /// Propagates decoding failures from [`Document::from_bytes`].
    pub fn open_bytes(
        &mut self,
        bytes: &[u8],
        path: Option<&Path>,
    ) -> Result<DocumentId, EditorError> {
        let mut doc = Document::from_bytes(bytes, &self.config)?;
        if let Some(path) = path {
            doc.set_mode(EditorMode::for_path(path));
        }
        Ok(self.insert(doc))
    }

    /// # Errors
    /// Returns [`EditorError::UnknownDocument`] for closed or foreign ids.
    pub fn get(&self, id: DocumentId) -> Result<&Document, EditorError> {
        self.documents
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, doc)| doc)
            .ok_or(EditorError::UnknownDocument(id))
    }

    /// # Errors
    /// Returns [`EditorError::UnknownDocument`] for closed or foreign ids.
    pub fn get_mut(&mut self, id: DocumentId) -> Result<&mut Document, EditorError> {
        self.documents
            .iter_mut()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, doc)| doc)
            .ok_or(EditorError::UnknownDocument(id))
    }

    /// Removes a document and returns it. The active handle moves to the
    /// neighbour that took its place, if any.
    ///
    /// # Errors
    /// Returns [`EditorError::UnknownDocument`] for closed or foreign ids.
    pub fn close(&mut self, id: DocumentId) -> Result<Document, EditorError> {
        let idx = self
            .documents
            .iter()
            .position(|(candidate, _)| *candidate == id)
            .ok_or(EditorError::UnknownDocument(id))?;
        let (_, doc) = self.documents.remove(idx);
        if self.active == Some(id) {
            let next = idx.min(self.documents.len().saturating_sub(1));
            self.active = self.documents.get(next).map(|(id, _)| *id);
        }
        debug!(%id, open = self.documents.len(), "document closed");
        Ok(doc)
    }

    /// Handles in open order.
    pub fn ids(&self) -> Vec<DocumentId> {
        self.documents.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn active(&self) -> Option<DocumentId> {
        self.active
    }

    /// # Errors
    /// Returns [`EditorError::UnknownDocument`] for closed or foreign ids.
    pub fn set_active(&mut self, id: DocumentId) -> Result<(), EditorError> {
        self.get(id)?;
        self.active = Some(id);
        Ok(())
    }

    /// Spell cache shared by every open document.
    pub fn spell_cache(&mut self) -> &mut SpellCache {
        &mut self.spell
    }

    /// Misspelled word ranges inside `range` of document `id`, memoized in
    /// the shared spell cache.
    ///
    /// # Arguments
    /// - `id`: Document to scan.
    /// - `range`: Char range to scan, clamped to the document.
    /// - `oracle`: Host dictionary consulted on cache misses.
    ///
    /// # Errors
    /// Returns [`EditorError::UnknownDocument`] for closed or foreign ids.
    pub fn misspelled(
        &mut self,
        id: DocumentId,
        range: Range<usize>,
        oracle: &dyn SpellOracle,
    ) -> Result<Vec<Range<usize>>, EditorError> {
        let doc = self
            .documents
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, doc)| doc)
            .ok_or(EditorError::UnknownDocument(id))?;
        Ok(misspelled_ranges(doc, range, &mut self.spell, oracle))
    }

    /// Handles of documents with unsaved changes.
    pub fn modified(&self) -> Vec<DocumentId> {
        self.documents
            .iter()
            .filter(|(_, doc)| doc.is_modified())
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_are_independent() {
        let mut workspace = Workspace::new(EditorConfig::default());
        let first = workspace.open("one");
        let second = workspace.open("two");
        assert_ne!(first, second);
        workspace
            .get_mut(first)
            .expect("first")
            .insert_text("X");
        assert_eq!(workspace.get(first).expect("first").text(), "Xone");
        assert_eq!(workspace.get(second).expect("second").text(), "two");
        assert_eq!(workspace.modified(), vec![first]);
        assert_eq!(workspace.active(), Some(second));
    }

    #[test]
    fn closed_handles_are_never_reused() {
        let mut workspace = Workspace::new(EditorConfig::default());
        let first = workspace.open("");
        let second = workspace.open("");
        workspace.close(first).expect("close");
        assert_eq!(
            workspace.get(first).map(|_| ()),
            Err(EditorError::UnknownDocument(first))
        );
        let third = workspace.open("");
        assert!(third > second);
        assert_eq!(workspace.ids(), vec![second, third]);
    }

    #[test]
    fn closing_active_document_moves_focus() {
        let mut workspace = Workspace::new(EditorConfig::default());
        let first = workspace.open("");
        let second = workspace.open("");
        workspace.set_active(first).expect("activate");
        workspace.close(first).expect("close");
        assert_eq!(workspace.active(), Some(second));
        workspace.close(second).expect("close");
        assert_eq!(workspace.active(), None);
        assert!(workspace.is_empty());
    }

    #[test]
    fn spell_checks_share_one_configured_cache() {
        let config = EditorConfig {
            spell_cache_max: 16,
            ..EditorConfig::default()
        };
        let mut workspace = Workspace::new(config);
        let first = workspace.open("teh cat");
        let second = workspace.open("the teh");
        let oracle = |word: &str| word != "teh";
        assert_eq!(workspace.misspelled(first, 0..7, &oracle), Ok(vec![0..3]));
        assert_eq!(workspace.misspelled(second, 0..100, &oracle), Ok(vec![4..7]));
        assert_eq!(workspace.spell_cache().max_entries(), 16);
        assert_eq!(workspace.spell_cache().len(), 3);
        workspace.close(first).expect("close");
        assert_eq!(
            workspace.misspelled(first, 0..7, &oracle),
            Err(EditorError::UnknownDocument(first))
        );
    }

    #[test]
    fn open_bytes_detects_mode_and_rejects_bad_input() {
        let mut workspace = Workspace::new(EditorConfig::default());
        let id = workspace
            .open_bytes(b"fn main() {}\r\n", Some(Path::new("main.rs")))
            .expect("open");
        let doc = workspace.get(id).expect("doc");
        assert_eq!(doc.mode(), EditorMode::Code);
        assert_eq!(doc.text(), "fn main() {}\n");
        assert!(workspace.open_bytes(b"\xFF", None).is_err());
        assert_eq!(workspace.len(), 1);
    }
}
