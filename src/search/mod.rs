//! The match-and-annotate engine.
//!
//! This module provides:
//! - Pattern construction from raw user search terms
//! - Text collection over document regions with list-item grouping
//! - Match computation, classification and annotation emission
//! - Change-range detection for incremental recompute
//! - The persistent plugin state machine

mod changes;
mod collect;
mod matcher;
mod pattern;
mod selection;
mod state;

pub use changes::changed_regions;
pub use collect::{collect_runs, list_item_group, GroupKey, GroupPredicate, TextRun};
pub use matcher::{compute_full, compute_range};
pub use pattern::build_pattern;
pub use selection::{selected_spans, SelectedSpans};
pub use state::{PluginState, SearchConfig};
