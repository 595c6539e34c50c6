//! Deriving minimal reprocessing regions from an edit.

use crate::doc::{Node, Region, Transaction};

/// Regions of the post-edit document that need rescanning.
///
/// Each elementary map's changed spans are expanded to the boundaries of
/// the textblocks they touch, so a match whose start lies before the edit
/// and end after it is still found or invalidated. Steps need not arrive
/// in increasing document order (a replace-all applies back-to-front to
/// keep earlier positions stable), so the expanded spans are sorted
/// before adjacent and overlapping ones coalesce.
pub fn changed_regions(tr: &Transaction) -> Vec<Region> {
    let doc = tr.doc();
    let size = doc.content_size();
    let mut expanded: Vec<Region> = Vec::new();

    for map in tr.mapping().maps() {
        map.for_each(|_old_from, _old_to, new_from, new_to| {
            expanded.push(expand_to_text_blocks(doc, new_from, new_to).clamp(size));
        });
    }
    expanded.sort_by_key(|region| (region.from, region.to));

    let mut merged: Vec<Region> = Vec::new();
    for region in expanded {
        match merged.last_mut() {
            Some(prev) if region.from <= prev.to => prev.to = prev.to.max(region.to),
            _ => merged.push(region),
        }
    }

    merged
}

/// Widen `[from, to)` to cover every textblock it overlaps; the raw span is
/// kept when the change point lies outside any textblock.
fn expand_to_text_blocks(doc: &Node, mut from: usize, mut to: usize) -> Region {
    doc.nodes_between(from, to, &mut |node, pos| {
        if node.is_text_block() {
            from = from.min(pos);
            to = to.max(pos + node.size());
            return false;
        }
        true
    });
    Region { from, to }
}
