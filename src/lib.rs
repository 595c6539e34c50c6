//! Incremental search-highlight engine for tree-structured rich-text
//! documents.
//!
//! Given a raw search term and styling options, the engine locates every
//! occurrence of the term in a document's text content and exposes the
//! matches as position-addressed, styled annotation ranges for a rendering
//! layer to paint. Text fragmented across inline-formatted leaves inside
//! one list item is concatenated before matching; ordinary paragraphs are
//! matched leaf by leaf, so a term never matches across unrelated blocks.
//! On edits, only the regions the edit touched are rescanned; everything
//! else is remapped through the edit's position maps.

mod doc;
mod error;
mod search;
mod session;
mod settings;

pub use doc::{Ancestor, Annotation, AnnotationSet, Mapping, Node, Region, StepMap, Transaction};
pub use error::Error;
pub use search::{
    build_pattern, changed_regions, collect_runs, compute_full, compute_range, list_item_group,
    selected_spans, GroupKey, GroupPredicate, PluginState, SearchConfig, SelectedSpans, TextRun,
};
pub use session::{SearchSession, SessionStore};
pub use settings::{load_settings, SearchDefaults, Settings};
