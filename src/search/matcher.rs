//! Running the search pattern over collected text and emitting annotations.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::{debug, warn};

use crate::doc::{Annotation, AnnotationSet, Node, Region};

use super::collect::{collect_runs, GroupKey, GroupPredicate, TextRun};
use super::pattern::build_pattern;
use super::selection::{selected_spans, SelectedSpans};
use super::state::SearchConfig;

/// Compute annotations for every match inside `region`.
///
/// A blank search term yields no annotations: that is the canonical
/// "search cleared" state, not an error. A pattern the regex engine cannot
/// compile degrades the same way; highlighting must never block editing.
pub fn compute_range(
    doc: &Node,
    config: &SearchConfig,
    region: Region,
    is_group: GroupPredicate,
) -> Vec<Annotation> {
    let Some(term) = config
        .search_term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return Vec::new();
    };

    let regex = match build_pattern(term, config.match_whole_words_only, config.case_sensitive) {
        Ok(regex) => regex,
        Err(err) => {
            warn!(%err, "unusable search pattern, skipping highlight pass");
            return Vec::new();
        }
    };

    let selected = selected_spans(doc, region, config.selected_highlight.as_deref());
    let runs = collect_runs(doc, region, is_group);

    let mut annotations = Vec::new();
    let mut groups: BTreeMap<usize, (String, Vec<&TextRun>)> = BTreeMap::new();

    for run in &runs {
        match run.group {
            GroupKey::Solo(_) => scan_run(&regex, run, region, &selected, config, &mut annotations),
            GroupKey::Grouped(container) => {
                let (joined, members) = groups.entry(container).or_default();
                joined.push_str(&run.text);
                members.push(run);
            }
        }
    }

    // Grouped runs get a cheap existence check on the concatenated item
    // text first; only items that can match at all are rescanned leaf by
    // leaf for position-correct spans.
    for (joined, members) in groups.values() {
        if regex.is_match(joined) {
            for run in members.iter().copied() {
                scan_run(&regex, run, region, &selected, config, &mut annotations);
            }
        }
    }

    annotations.sort_by_key(|a| (a.from, a.to));
    annotations
}

/// Compute annotations for the whole document and package them as a set.
pub fn compute_full(doc: &Node, config: &SearchConfig, is_group: GroupPredicate) -> AnnotationSet {
    let annotations = compute_range(doc, config, Region::whole(doc), is_group);
    debug!(matches = annotations.len(), "full highlight recompute");
    AnnotationSet::create(doc, annotations)
}

fn scan_run(
    regex: &Regex,
    run: &TextRun,
    region: Region,
    selected: &SelectedSpans,
    config: &SearchConfig,
    out: &mut Vec<Annotation>,
) {
    for m in regex.find_iter(&run.text) {
        // zero-length matches would also make a hand-rolled scan loop spin
        if m.start() == m.end() {
            continue;
        }
        if m.as_str().contains('\n') {
            continue;
        }

        let from = run.start + m.start();
        let to = run.start + m.end();
        if !region.contains(from, to) {
            continue;
        }

        let class = if selected.contains(from, to) {
            config
                .individual_highlight_class
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(config.highlight_class.as_str())
        } else {
            config.highlight_class.as_str()
        };
        out.push(Annotation::new(from, to, class));
    }
}
