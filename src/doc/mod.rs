//! Document model and position bookkeeping.
//!
//! This module provides:
//! - `Node` for tree-structured rich-text documents with byte addressing
//! - `Region` for half-open spans in a document's address space
//! - `StepMap`, `Mapping` and `Transaction` for edits and position remapping
//! - `Annotation` and `AnnotationSet` for styled highlight ranges

mod annotations;
mod node;
mod transform;

pub use annotations::{Annotation, AnnotationSet};
pub use node::{Ancestor, Node};
pub use transform::{Mapping, StepMap, Transaction};

use crate::error::Error;

/// A half-open span `[from, to)` in a document's address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub from: usize,
    pub to: usize,
}

impl Region {
    /// Create a region, rejecting inverted bounds.
    pub fn new(from: usize, to: usize) -> Result<Self, Error> {
        if from > to {
            return Err(Error::InvalidRegion { from, to });
        }
        Ok(Self { from, to })
    }

    /// The whole content of a document.
    pub fn whole(doc: &Node) -> Self {
        Self {
            from: 0,
            to: doc.content_size(),
        }
    }

    /// Saturate both bounds into `[0, size]`.
    pub fn clamp(self, size: usize) -> Self {
        Self {
            from: self.from.min(size),
            to: self.to.min(size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Whether `[from, to)` lies fully inside this region.
    pub fn contains(&self, from: usize, to: usize) -> bool {
        from >= self.from && to <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert!(Region::new(3, 10).is_ok());
        assert!(Region::new(10, 3).is_err());
        assert!(Region::new(5, 5).is_ok());
    }

    #[test]
    fn clamp_saturates() {
        let region = Region::new(4, 100).unwrap();
        assert_eq!(region.clamp(10), Region { from: 4, to: 10 });
        assert_eq!(region.clamp(2), Region { from: 2, to: 2 });
    }

    #[test]
    fn containment() {
        let region = Region::new(5, 15).unwrap();
        assert!(region.contains(5, 15));
        assert!(region.contains(7, 10));
        assert!(!region.contains(4, 10));
        assert!(!region.contains(7, 16));
    }
}
