//! Engine-facing API for embedding editors.
//!
//! A `SearchSession` pairs one document with its highlighting state; every
//! update builds a fresh session value. `SessionStore` keeps sessions for
//! multiple open documents behind a concurrent map, replacing the stored
//! session wholesale on each update so readers holding the previous `Arc`
//! are never disturbed.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::doc::{AnnotationSet, Node, Transaction};
use crate::search::{list_item_group, GroupPredicate, PluginState, SearchConfig};

/// One document's highlighting session.
#[derive(Debug, Clone)]
pub struct SearchSession {
    doc: Node,
    state: PluginState,
    is_group: GroupPredicate,
}

impl SearchSession {
    /// Open a session over a document. If the configuration carries a term
    /// the document is scanned immediately.
    pub fn new(doc: Node, config: SearchConfig) -> Self {
        let state = PluginState::init(config.clone());
        let state = state.configure(&doc, config, list_item_group);
        Self {
            doc,
            state,
            is_group: list_item_group,
        }
    }

    /// Replace the grouping predicate (which containers get their text
    /// concatenated before matching) and rescan.
    pub fn with_group_predicate(mut self, is_group: GroupPredicate) -> Self {
        self.is_group = is_group;
        self.state = self
            .state
            .configure(&self.doc, self.state.config.clone(), is_group);
        self
    }

    /// Set or clear the search term, keeping all other options.
    pub fn search(&self, term: Option<&str>) -> Self {
        let config = SearchConfig {
            search_term: term.map(str::to_string),
            ..self.state.config.clone()
        };
        self.configure(config)
    }

    /// Apply a full configuration change: always a full recompute.
    pub fn configure(&self, config: SearchConfig) -> Self {
        debug!(term = config.search_term.as_deref(), "configure search session");
        Self {
            doc: self.doc.clone(),
            state: self.state.configure(&self.doc, config, self.is_group),
            is_group: self.is_group,
        }
    }

    /// Apply a document edit, remapping annotations and rescanning only
    /// the changed regions when live updates are on.
    pub fn edit(&self, tr: Transaction) -> Self {
        let state = self.state.apply_edit(&tr, self.is_group);
        Self {
            doc: tr.into_doc(),
            state,
            is_group: self.is_group,
        }
    }

    /// Toggle whole-word matching. A no-op without an active term, as
    /// there is nothing to rescan.
    pub fn toggle_whole_word(&self, on: bool) -> Self {
        if !self.state.config.has_term() {
            return self.clone();
        }
        self.configure(SearchConfig {
            match_whole_words_only: on,
            ..self.state.config.clone()
        })
    }

    /// Toggle case sensitivity. A no-op without an active term.
    pub fn toggle_case_sensitive(&self, on: bool) -> Self {
        if !self.state.config.has_term() {
            return self.clone();
        }
        self.configure(SearchConfig {
            case_sensitive: on,
            ..self.state.config.clone()
        })
    }

    /// Re-run the current search, e.g. after the document was replaced
    /// outside the transaction flow.
    pub fn refresh(&self) -> Self {
        if !self.state.config.has_term() {
            return self.clone();
        }
        self.configure(self.state.config.clone())
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.state.annotations
    }

    pub fn config(&self) -> &SearchConfig {
        &self.state.config
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }
}

/// Concurrent storage for the sessions of open documents, keyed by the
/// embedder's document id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<SearchSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Open (or re-open) a document's session.
    pub fn open(
        &self,
        id: impl Into<String>,
        doc: Node,
        config: SearchConfig,
    ) -> Arc<SearchSession> {
        let session = Arc::new(SearchSession::new(doc, config));
        self.sessions.insert(id.into(), Arc::clone(&session));
        session
    }

    /// Close a document's session.
    pub fn close(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn get(&self, id: &str) -> Option<Arc<SearchSession>> {
        self.sessions.get(id).map(|s| Arc::clone(&s))
    }

    /// Replace a session with an updated value derived from the current
    /// one. Returns the new session, or `None` for an unknown id.
    pub fn update<F>(&self, id: &str, f: F) -> Option<Arc<SearchSession>>
    where
        F: FnOnce(&SearchSession) -> SearchSession,
    {
        let mut entry = self.sessions.get_mut(id)?;
        let next = Arc::new(f(entry.value()));
        *entry = Arc::clone(&next);
        Some(next)
    }

    pub fn search(&self, id: &str, term: Option<&str>) -> Option<Arc<SearchSession>> {
        self.update(id, |s| s.search(term))
    }

    pub fn edit(&self, id: &str, tr: Transaction) -> Option<Arc<SearchSession>> {
        self.update(id, |s| s.edit(tr))
    }

    pub fn toggle_whole_word(&self, id: &str, on: bool) -> Option<Arc<SearchSession>> {
        self.update(id, |s| s.toggle_whole_word(on))
    }

    pub fn toggle_case_sensitive(&self, id: &str, on: bool) -> Option<Arc<SearchSession>> {
        self.update(id, |s| s.toggle_case_sensitive(on))
    }

    pub fn refresh(&self, id: &str) -> Option<Arc<SearchSession>> {
        self.update(id, |s| s.refresh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Node {
        Node::doc(vec![Node::paragraph(vec![Node::text("the cat sat")])])
    }

    #[test]
    fn search_and_clear() {
        let session = SearchSession::new(sample_doc(), SearchConfig::default());
        assert!(session.annotations().is_empty());

        let session = session.search(Some("cat"));
        assert_eq!(session.annotations().len(), 1);

        let session = session.search(None);
        assert!(session.annotations().is_empty());
    }

    #[test]
    fn toggles_are_noops_without_a_term() {
        let session = SearchSession::new(sample_doc(), SearchConfig::default());
        let toggled = session.toggle_whole_word(true);
        assert!(!toggled.config().match_whole_words_only);
        let toggled = session.toggle_case_sensitive(true);
        assert!(!toggled.config().case_sensitive);
    }

    #[test]
    fn whole_word_toggle_rescans() {
        let doc = Node::doc(vec![Node::paragraph(vec![Node::text("cat category")])]);
        let session = SearchSession::new(doc, SearchConfig::default()).search(Some("cat"));
        assert_eq!(session.annotations().len(), 2);

        let session = session.toggle_whole_word(true);
        assert_eq!(session.annotations().len(), 1);
    }

    #[test]
    fn store_lifecycle() {
        let store = SessionStore::new();
        store.open("doc-1", sample_doc(), SearchConfig::default());

        let session = store.search("doc-1", Some("cat")).unwrap();
        assert_eq!(session.annotations().len(), 1);
        assert_eq!(store.get("doc-1").unwrap().annotations().len(), 1);

        store.close("doc-1");
        assert!(store.get("doc-1").is_none());
        assert!(store.search("doc-1", Some("cat")).is_none());
    }

    #[test]
    fn old_sessions_are_unaffected_by_updates() {
        let store = SessionStore::new();
        let before = store.open("doc-1", sample_doc(), SearchConfig::default());
        store.search("doc-1", Some("cat"));
        assert!(before.annotations().is_empty());
    }
}
