//! Styled highlight ranges over a document.

use super::{Mapping, Node};

/// A single highlighted match: a half-open byte range plus a style class.
///
/// Annotations are immutable; remapping through an edit builds new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub from: usize,
    pub to: usize,
    pub class: String,
}

impl Annotation {
    pub fn new(from: usize, to: usize, class: impl Into<String>) -> Self {
        Self {
            from,
            to,
            class: class.into(),
        }
    }
}

/// An ordered, range-queryable collection of annotations covering a whole
/// document. All operations return fresh sets; existing sets are never
/// mutated, so a previous state can keep referring to its own set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from unordered annotations, clamped into the document.
    pub fn create(doc: &Node, mut annotations: Vec<Annotation>) -> Self {
        let size = doc.content_size();
        annotations.retain(|a| a.from < a.to && a.to <= size);
        annotations.sort_by_key(|a| (a.from, a.to));
        Self { annotations }
    }

    /// All annotations strictly overlapping `[from, to)`.
    pub fn find(&self, from: usize, to: usize) -> Vec<Annotation> {
        self.annotations
            .iter()
            .filter(|a| a.from < to && a.to > from)
            .cloned()
            .collect()
    }

    /// A new set without the given annotations.
    pub fn remove(&self, remove: &[Annotation]) -> Self {
        Self {
            annotations: self
                .annotations
                .iter()
                .filter(|a| !remove.contains(a))
                .cloned()
                .collect(),
        }
    }

    /// A new set with the given annotations merged in.
    pub fn add(&self, doc: &Node, added: Vec<Annotation>) -> Self {
        let mut annotations = self.annotations.clone();
        annotations.extend(added);
        Self::create(doc, annotations)
    }

    /// Remap every annotation through an edit's mapping, dropping ranges
    /// the edit collapsed. The start maps forward past insertions and the
    /// end maps backward, so text inserted at an edge does not get painted.
    pub fn map_through(&self, mapping: &Mapping, doc: &Node) -> Self {
        let remapped = self
            .annotations
            .iter()
            .map(|a| Annotation::new(mapping.map(a.from, 1), mapping.map(a.to, -1), a.class.clone()))
            .collect();
        Self::create(doc, remapped)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
