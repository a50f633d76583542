//! Structure tags
//!
//! A tag labels an inferred data-structure shape. Tags serialize to their
//! display text so the player can list them without a lookup table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred data-structure category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StructureTag {
    Array,
    SinglyLinkedList,
    DoublyLinkedList,
    CircularLinkedList,
    BinaryTree,
    Stack,
    Queue,
    CircularQueue,
    /// Dictionary/map literal rendered as a fixed stand-in graph
    DictionaryAsGraph,
    /// One entry per recognized call of a declared callable
    RecursiveCall(String),
}

impl StructureTag {
    fn parse(s: &str) -> Option<Self> {
        let tag = match s {
            "Array" => StructureTag::Array,
            "Singly Linked List" => StructureTag::SinglyLinkedList,
            "Doubly Linked List" => StructureTag::DoublyLinkedList,
            "Circular Linked List" => StructureTag::CircularLinkedList,
            "Binary Tree" => StructureTag::BinaryTree,
            "Stack" => StructureTag::Stack,
            "Queue" => StructureTag::Queue,
            "Circular Queue" => StructureTag::CircularQueue,
            "Dictionary (Tree/Graph)" => StructureTag::DictionaryAsGraph,
            other => {
                let name = other.strip_prefix("Recursive Call: ")?;
                StructureTag::RecursiveCall(name.to_string())
            }
        };
        Some(tag)
    }
}

impl fmt::Display for StructureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureTag::Array => write!(f, "Array"),
            StructureTag::SinglyLinkedList => write!(f, "Singly Linked List"),
            StructureTag::DoublyLinkedList => write!(f, "Doubly Linked List"),
            StructureTag::CircularLinkedList => write!(f, "Circular Linked List"),
            StructureTag::BinaryTree => write!(f, "Binary Tree"),
            StructureTag::Stack => write!(f, "Stack"),
            StructureTag::Queue => write!(f, "Queue"),
            StructureTag::CircularQueue => write!(f, "Circular Queue"),
            StructureTag::DictionaryAsGraph => write!(f, "Dictionary (Tree/Graph)"),
            StructureTag::RecursiveCall(name) => write!(f, "Recursive Call: {}", name),
        }
    }
}

impl From<StructureTag> for String {
    fn from(tag: StructureTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for StructureTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StructureTag::parse(&value).ok_or_else(|| format!("Unknown structure tag '{}'", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(StructureTag::BinaryTree.to_string(), "Binary Tree");
        assert_eq!(
            StructureTag::RecursiveCall("fact".into()).to_string(),
            "Recursive Call: fact"
        );
    }

    #[test]
    fn test_serializes_as_display_text() {
        let json = serde_json::to_string(&StructureTag::DictionaryAsGraph).unwrap();
        assert_eq!(json, "\"Dictionary (Tree/Graph)\"");

        let back: StructureTag = serde_json::from_str("\"Recursive Call: fib\"").unwrap();
        assert_eq!(back, StructureTag::RecursiveCall("fib".into()));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!(serde_json::from_str::<StructureTag>("\"Heap\"").is_err());
    }
}
