//! Node-record heuristics
//!
//! A record (class/struct) whose name contains "node" is a linked shape;
//! its fields decide which one.

use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::models::StructureTag;

lazy_static! {
    static ref PREV_FIELD: Regex = Regex::new(r"\bprev\w*").unwrap();
    static ref CHILD_FIELD: Regex = Regex::new(r"\b(left|right)\b").unwrap();
    static ref NEXT_FIELD: Regex = Regex::new(r"\bnext\b").unwrap();
    static ref NEXT_TO_HEAD: Regex = Regex::new(r"(\.|->)\s*next\s*=\s*head\b").unwrap();
}

pub fn is_node_record_name(name: &str) -> bool {
    name.to_lowercase().contains("node")
}

/// Classify a record declaration; `None` unless the name is node-like
///
/// `body` is the record's own text, `source` the whole document (a cycle
/// back to `head` may be written anywhere).
pub fn classify_record(name: &str, body: &str, source: &str) -> Option<StructureTag> {
    if !is_node_record_name(name) {
        return None;
    }

    let tag = if PREV_FIELD.is_match(body) {
        StructureTag::DoublyLinkedList
    } else if CHILD_FIELD.is_match(body) {
        StructureTag::BinaryTree
    } else if NEXT_FIELD.is_match(body) && NEXT_TO_HEAD.is_match(source) {
        StructureTag::CircularLinkedList
    } else {
        StructureTag::SinglyLinkedList
    };
    Some(tag)
}

/// Text from the start of `line` to the brace closing the first block opened
/// there; the rest of the source when the block never closes
pub fn block_from(source: &str, line: usize) -> &str {
    let start: usize = source
        .split_inclusive('\n')
        .take(line)
        .map(str::len)
        .sum();
    let rest = match source.get(start..) {
        Some(rest) => rest,
        None => return "",
    };

    let mut depth = 0usize;
    let mut opened = false;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '{' => {
                depth += 1;
                opened = true;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if opened && depth == 0 {
                    return &rest[..=idx];
                }
            }
            _ => {}
        }
    }
    rest
}
