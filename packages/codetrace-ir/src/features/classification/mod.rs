//! Structure Classification Feature
//!
//! Tags data-structure shapes from syntactic cues: container keywords in
//! type or variable names, node-record fields, and literal shapes.
//!
//! ## Structure
//! - `patterns` - container keyword matchers
//! - `records` - node-record field heuristics

pub mod patterns;
pub mod records;

pub use patterns::{container_shape, KeywordPattern};
pub use records::{block_from, classify_record, is_node_record_name};

use crate::shared::models::StructureTag;

/// Outcome of classifying one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureMatch {
    pub tag: StructureTag,

    /// Literal elements, when the declaration carries a literal list
    pub elements: Option<Vec<String>>,

    /// Variable the structure is bound to, when known
    pub owner: Option<String>,
}

impl StructureMatch {
    pub fn new(tag: StructureTag) -> Self {
        Self {
            tag,
            elements: None,
            owner: None,
        }
    }

    /// Array with literal elements
    pub fn array(elements: Vec<String>) -> Self {
        Self::new(StructureTag::Array).with_elements(elements)
    }

    pub fn with_elements(mut self, elements: Vec<String>) -> Self {
        self.elements = Some(elements);
        self
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }
}
