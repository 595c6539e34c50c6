//! Persistent plugin state and its transitions.

use serde::Deserialize;
use tracing::debug;

use crate::doc::{AnnotationSet, Node, Transaction};

use super::changes::changed_regions;
use super::collect::GroupPredicate;
use super::matcher::{compute_full, compute_range};

/// Search parameters and styling for one highlighting session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The raw user term. `None` or blank means no active search.
    pub search_term: Option<String>,
    pub match_whole_words_only: bool,
    pub case_sensitive: bool,
    /// When off, edits only remap existing annotations; nothing is
    /// rescanned until the next explicit configuration change.
    pub live_updates: bool,
    /// Style class painted on ordinary matches.
    pub highlight_class: String,
    /// Style class for matches inside the selected container; falls back
    /// to `highlight_class` when unset.
    pub individual_highlight_class: Option<String>,
    /// Identity attribute of the selected container, if any.
    pub selected_highlight: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_term: None,
            match_whole_words_only: false,
            case_sensitive: false,
            live_updates: true,
            highlight_class: "highlight".to_string(),
            individual_highlight_class: None,
            selected_highlight: None,
        }
    }
}

impl SearchConfig {
    /// Whether an active (non-blank) search term is set.
    pub fn has_term(&self) -> bool {
        self.search_term
            .as_deref()
            .is_some_and(|term| !term.trim().is_empty())
    }
}

/// The plugin's persistent state: the current configuration plus the
/// annotation set for the current document.
///
/// States are values: every transition builds a fresh `PluginState` and
/// leaves the previous one untouched, so older states can safely be read
/// concurrently. At any quiescent point the annotation set equals what a
/// full recompute over the current document would produce, whether it was
/// reached by `configure` or by a chain of `apply_edit` calls.
#[derive(Debug, Clone)]
pub struct PluginState {
    pub config: SearchConfig,
    pub annotations: AnnotationSet,
}

impl PluginState {
    /// Initial state for a fresh editing session; nothing is highlighted
    /// until the first `configure`.
    pub fn init(config: SearchConfig) -> Self {
        Self {
            config,
            annotations: AnnotationSet::empty(),
        }
    }

    /// Apply a configuration change: always a full recompute, since any of
    /// the parameters can change which spans match or how they classify.
    /// A blank term lands in the idle state with an empty set.
    pub fn configure(&self, doc: &Node, config: SearchConfig, is_group: GroupPredicate) -> Self {
        let annotations = compute_full(doc, &config, is_group);
        Self {
            config,
            annotations,
        }
    }

    /// Apply a document edit.
    ///
    /// Existing annotations are first remapped through the edit's position
    /// maps. When live updates are on and a term is active, the regions
    /// the edit touched are then rescanned: stale annotations overlapping
    /// each region are dropped and replaced with freshly computed ones.
    pub fn apply_edit(&self, tr: &Transaction, is_group: GroupPredicate) -> Self {
        let annotations = self.annotations.map_through(tr.mapping(), tr.doc());

        if !tr.doc_changed() || !self.config.live_updates || !self.config.has_term() {
            return Self {
                config: self.config.clone(),
                annotations,
            };
        }

        let regions = changed_regions(tr);
        debug!(regions = regions.len(), "incremental highlight recompute");

        let mut set = annotations;
        for region in regions {
            if region.is_empty() {
                continue;
            }
            let stale = set.find(region.from, region.to);
            set = set.remove(&stale);
            set = set.add(tr.doc(), compute_range(tr.doc(), &self.config, region, is_group));
        }

        Self {
            config: self.config.clone(),
            annotations: set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::StepMap;
    use crate::search::collect::list_item_group;

    fn config(term: &str) -> SearchConfig {
        SearchConfig {
            search_term: Some(term.to_string()),
            highlight_class: "hl".to_string(),
            ..SearchConfig::default()
        }
    }

    fn spans(set: &AnnotationSet) -> Vec<(usize, usize)> {
        set.iter().map(|a| (a.from, a.to)).collect()
    }

    #[test]
    fn configure_recomputes_wholesale() {
        let doc = Node::doc(vec![Node::paragraph(vec![Node::text("cat dog cat")])]);
        let state = PluginState::init(SearchConfig::default());
        assert!(state.annotations.is_empty());

        let state = state.configure(&doc, config("cat"), list_item_group);
        assert_eq!(spans(&state.annotations), vec![(1, 4), (9, 12)]);

        let state = state.configure(&doc, config("dog"), list_item_group);
        assert_eq!(spans(&state.annotations), vec![(5, 8)]);
    }

    #[test]
    fn blank_term_clears_regardless_of_prior_state() {
        let doc = Node::doc(vec![Node::paragraph(vec![Node::text("cat")])]);
        let state =
            PluginState::init(SearchConfig::default()).configure(&doc, config("cat"), list_item_group);
        assert_eq!(state.annotations.len(), 1);

        let state = state.configure(&doc, SearchConfig::default(), list_item_group);
        assert!(state.annotations.is_empty());
    }

    #[test]
    fn edit_patches_only_changed_regions() {
        // p1 [0,7): "x cat", p2 [7,17): "cat here"
        let before = Node::doc(vec![
            Node::paragraph(vec![Node::text("x cat")]),
            Node::paragraph(vec![Node::text("cat here")]),
        ]);
        let state =
            PluginState::init(SearchConfig::default()).configure(&before, config("cat"), list_item_group);
        assert_eq!(spans(&state.annotations), vec![(3, 6), (8, 11)]);

        // insert "cat " at the start of p1's text
        let after = Node::doc(vec![
            Node::paragraph(vec![Node::text("cat x cat")]),
            Node::paragraph(vec![Node::text("cat here")]),
        ]);
        let tr = Transaction::new(before).step(after.clone(), StepMap::insertion(1, 4));
        let state = state.apply_edit(&tr, list_item_group);

        assert_eq!(spans(&state.annotations), vec![(1, 4), (7, 10), (12, 15)]);
        // incremental result agrees with a full recompute
        let full = compute_full(&after, &state.config, list_item_group);
        assert_eq!(state.annotations, full);
    }

    #[test]
    fn edit_that_breaks_a_match_invalidates_it() {
        let before = Node::doc(vec![Node::paragraph(vec![Node::text("the cat sat")])]);
        let state =
            PluginState::init(SearchConfig::default()).configure(&before, config("cat"), list_item_group);
        assert_eq!(spans(&state.annotations), vec![(5, 8)]);

        // split the match: "ca" + "xyz" + "t"
        let after = Node::doc(vec![Node::paragraph(vec![Node::text("the caxyzt sat")])]);
        let tr = Transaction::new(before).step(after.clone(), StepMap::insertion(7, 3));
        let state = state.apply_edit(&tr, list_item_group);

        assert!(state.annotations.is_empty());
        assert_eq!(state.annotations, compute_full(&after, &state.config, list_item_group));
    }

    #[test]
    fn reverse_order_steps_rescan_every_edited_block() {
        // p1 [0,5), p2 [5,10); a back-to-front replace edits p2 first
        let before = Node::doc(vec![
            Node::paragraph(vec![Node::text("aaa")]),
            Node::paragraph(vec![Node::text("bbb")]),
        ]);
        let state =
            PluginState::init(SearchConfig::default()).configure(&before, config("cat"), list_item_group);
        assert!(state.annotations.is_empty());

        let mid = Node::doc(vec![
            Node::paragraph(vec![Node::text("aaa")]),
            Node::paragraph(vec![Node::text("cat")]),
        ]);
        let after = Node::doc(vec![
            Node::paragraph(vec![Node::text("cat")]),
            Node::paragraph(vec![Node::text("cat")]),
        ]);
        let tr = Transaction::new(before)
            .step(mid, StepMap::replacement(6, 3, 3))
            .step(after.clone(), StepMap::replacement(1, 3, 3));
        let state = state.apply_edit(&tr, list_item_group);

        assert_eq!(spans(&state.annotations), vec![(1, 4), (6, 9)]);
        assert_eq!(state.annotations, compute_full(&after, &state.config, list_item_group));
    }

    #[test]
    fn deleting_a_trailing_block_only_remaps_the_rest() {
        // p1 [0,5): "cat", p2 [5,10): "dog"; deleting p2 leaves a
        // collapsed change span at the document's end
        let before = Node::doc(vec![
            Node::paragraph(vec![Node::text("cat")]),
            Node::paragraph(vec![Node::text("dog")]),
        ]);
        let state =
            PluginState::init(SearchConfig::default()).configure(&before, config("cat"), list_item_group);
        assert_eq!(spans(&state.annotations), vec![(1, 4)]);

        let after = Node::doc(vec![Node::paragraph(vec![Node::text("cat")])]);
        let tr = Transaction::new(before).step(after.clone(), StepMap::deletion(5, 5));
        let state = state.apply_edit(&tr, list_item_group);

        assert_eq!(spans(&state.annotations), vec![(1, 4)]);
        assert_eq!(state.annotations, compute_full(&after, &state.config, list_item_group));
    }

    #[test]
    fn live_updates_off_only_remaps() {
        let before = Node::doc(vec![Node::paragraph(vec![Node::text("cat")])]);
        let cfg = SearchConfig {
            live_updates: false,
            ..config("cat")
        };
        let state = PluginState::init(SearchConfig::default()).configure(&before, cfg, list_item_group);
        assert_eq!(spans(&state.annotations), vec![(1, 4)]);

        // insert a second "cat" before the first; it must not be found,
        // but the existing annotation is shifted
        let after = Node::doc(vec![Node::paragraph(vec![Node::text("cat cat")])]);
        let tr = Transaction::new(before).step(after, StepMap::insertion(1, 4));
        let state = state.apply_edit(&tr, list_item_group);
        assert_eq!(spans(&state.annotations), vec![(5, 8)]);
    }

    #[test]
    fn edit_without_steps_is_a_pure_remap() {
        let doc = Node::doc(vec![Node::paragraph(vec![Node::text("cat")])]);
        let state =
            PluginState::init(SearchConfig::default()).configure(&doc, config("cat"), list_item_group);
        let tr = Transaction::new(doc);
        let state2 = state.apply_edit(&tr, list_item_group);
        assert_eq!(state.annotations, state2.annotations);
    }

    #[test]
    fn idle_state_stays_idle_through_edits() {
        let before = Node::doc(vec![Node::paragraph(vec![Node::text("cat")])]);
        let state = PluginState::init(SearchConfig::default());
        let after = Node::doc(vec![Node::paragraph(vec![Node::text("cat cat")])]);
        let tr = Transaction::new(before).step(after, StepMap::insertion(1, 4));
        let state = state.apply_edit(&tr, list_item_group);
        assert!(state.annotations.is_empty());
    }
}
