//! Hyperlink records and the relationship-id collaborator seam
//!
//! The worksheet part does not store hyperlink targets; it stores an opaque
//! relationship id pointing into the package's relationship part, plus an
//! optional in-document location (URL fragment). Allocation of ids and
//! URL-vs-mail discrimination belong to the packaging layer, so the model
//! only keeps the resulting id and echoes it on serialization.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::cell::CellAddress;

/// Hyperlink attached to a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Relationship id allocated by the packaging layer (e.g., "rId1")
    pub rel_id: String,
    /// Optional in-document location (the URL fragment after '#')
    pub location: Option<String>,
}

impl Hyperlink {
    /// Create a hyperlink record
    pub fn new<S: Into<String>>(rel_id: S, location: Option<String>) -> Self {
        Self {
            rel_id: rel_id.into(),
            location,
        }
    }
}

/// Mapping from cell address to hyperlink record, ordered by address
#[derive(Debug, Default)]
pub struct HyperlinkSet {
    links: BTreeMap<CellAddress, Hyperlink>,
}

impl HyperlinkSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a hyperlink to a cell, replacing any previous one there
    pub fn insert(&mut self, addr: CellAddress, link: Hyperlink) {
        self.links.insert(addr, link);
    }

    /// Get the hyperlink on a cell, if any
    pub fn get(&self, addr: &CellAddress) -> Option<&Hyperlink> {
        self.links.get(addr)
    }

    /// Iterate in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = (&CellAddress, &Hyperlink)> {
        self.links.iter()
    }

    /// Get the number of hyperlinks
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Collaborator that owns cross-part relationship ids.
///
/// Implemented by the packaging layer; called once per distinct hyperlink
/// target before the hyperlinks block is emitted.
pub trait RelationshipAllocator {
    /// Allocate (or return the previously allocated) id for a target
    fn allocate(&mut self, target: &str) -> String;
}

/// Simple sequential allocator handing out "rId1", "rId2", … with one id
/// per distinct target. Suitable for single-part embedders and tests.
#[derive(Debug, Default)]
pub struct SequentialRelIds {
    by_target: AHashMap<String, String>,
    next: u32,
}

impl SequentialRelIds {
    /// Create an allocator starting at "rId1"
    pub fn new() -> Self {
        Self::default()
    }
}

impl RelationshipAllocator for SequentialRelIds {
    fn allocate(&mut self, target: &str) -> String {
        if let Some(id) = self.by_target.get(target) {
            return id.clone();
        }
        self.next += 1;
        let id = format!("rId{}", self.next);
        self.by_target.insert(target.to_string(), id.clone());
        id
    }
}
