//! Edit transactions and position remapping.
//!
//! The engine never constructs edits; the embedding editor applies a change
//! to its document and hands the engine a `Transaction` describing the
//! post-edit tree plus one elementary `StepMap` per edit step. Maps
//! translate pre-edit positions to post-edit positions, accounting for the
//! bytes each step replaced.

use super::Node;

/// An elementary position map for one edit step.
///
/// Stored as `(start, old_size, new_size)` triples in ascending order of
/// `start` (pre-edit coordinates): at `start`, `old_size` bytes were
/// replaced by `new_size` bytes.
#[derive(Debug, Clone, Default)]
pub struct StepMap {
    ranges: Vec<(usize, usize, usize)>,
}

impl StepMap {
    pub fn new(ranges: Vec<(usize, usize, usize)>) -> Self {
        Self { ranges }
    }

    /// A single insertion of `len` bytes at `pos`.
    pub fn insertion(pos: usize, len: usize) -> Self {
        Self::new(vec![(pos, 0, len)])
    }

    /// A single deletion of `len` bytes at `pos`.
    pub fn deletion(pos: usize, len: usize) -> Self {
        Self::new(vec![(pos, len, 0)])
    }

    /// `old_len` bytes at `pos` replaced by `new_len` bytes.
    pub fn replacement(pos: usize, old_len: usize, new_len: usize) -> Self {
        Self::new(vec![(pos, old_len, new_len)])
    }

    /// Map a pre-edit position to a post-edit position.
    ///
    /// `assoc` resolves positions at a replacement boundary: negative stays
    /// before inserted content, non-negative lands after it.
    pub fn map(&self, pos: usize, assoc: i8) -> usize {
        let mut diff: isize = 0;
        for &(start, old_size, new_size) in &self.ranges {
            if start > pos {
                break;
            }
            let end = start + old_size;
            if pos <= end {
                let side = if old_size == 0 {
                    assoc
                } else if pos == start {
                    -1
                } else if pos == end {
                    1
                } else {
                    assoc
                };
                let base = (start as isize + diff) as usize;
                return if side < 0 { base } else { base + new_size };
            }
            diff += new_size as isize - old_size as isize;
        }
        (pos as isize + diff) as usize
    }

    /// Enumerate each replaced span as
    /// `(old_from, old_to, new_from, new_to)`, in document order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, usize, usize),
    {
        let mut diff: isize = 0;
        for &(start, old_size, new_size) in &self.ranges {
            let new_start = (start as isize + diff) as usize;
            f(start, start + old_size, new_start, new_start + new_size);
            diff += new_size as isize - old_size as isize;
        }
    }

    pub fn is_identity(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// An ordered composition of elementary step maps.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_maps(maps: Vec<StepMap>) -> Self {
        Self { maps }
    }

    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    pub fn maps(&self) -> &[StepMap] {
        &self.maps
    }

    /// Map a position through every step in order.
    pub fn map(&self, pos: usize, assoc: i8) -> usize {
        self.maps.iter().fold(pos, |p, m| m.map(p, assoc))
    }
}

/// An edit handed to the engine: the post-edit document, the accumulated
/// position mapping, and whether the document structurally changed.
#[derive(Debug, Clone)]
pub struct Transaction {
    doc: Node,
    mapping: Mapping,
    doc_changed: bool,
}

impl Transaction {
    /// A transaction that carries no steps (selection moves, metadata).
    pub fn new(doc: Node) -> Self {
        Self {
            doc,
            mapping: Mapping::new(),
            doc_changed: false,
        }
    }

    /// Record one edit step: the document after the step and its map.
    pub fn step(mut self, new_doc: Node, map: StepMap) -> Self {
        self.doc = new_doc;
        self.doc_changed = self.doc_changed || !map.is_identity();
        self.mapping.push(map);
        self
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn into_doc(self) -> Node {
        self.doc
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn doc_changed(&self) -> bool {
        self.doc_changed
    }
}
