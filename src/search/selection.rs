//! Locating the application-designated "selected" container.

use crate::doc::{Node, Region};

/// The position spans of every container carrying the selected identity.
///
/// Degenerate documents may give several containers the same identity; all
/// of their spans are honored, each with its own size.
#[derive(Debug, Clone, Default)]
pub struct SelectedSpans {
    spans: Vec<Region>,
}

impl SelectedSpans {
    /// Whether `[from, to)` lies fully inside any recorded span.
    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.spans.iter().any(|span| span.contains(from, to))
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Scan `region` for containers whose identity attribute equals
/// `selected_id`. An absent or empty id yields no spans, so no match is
/// ever classified as selected.
pub fn selected_spans(doc: &Node, region: Region, selected_id: Option<&str>) -> SelectedSpans {
    let Some(id) = selected_id.filter(|id| !id.is_empty()) else {
        return SelectedSpans::default();
    };

    let mut spans = Vec::new();
    doc.nodes_between(region.from, region.to, &mut |node, pos| {
        if node.object_id() == Some(id) {
            spans.push(Region {
                from: pos,
                to: pos + node.size(),
            });
        }
        true
    });
    SelectedSpans { spans }
}
