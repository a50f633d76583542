//! ID generation utilities
//!
//! Ids are built from (structural role, sequence index, source line) so the
//! same input always yields the same ids. No hashing, no counters seeded from
//! time or randomness.

use rustc_hash::FxHashSet;

use crate::shared::models::NodeKind;

/// Issues node/edge ids for one analysis request
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: FxHashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the `index`-th element of an array literal on `line`
    pub fn array_element(&mut self, index: usize, line: usize) -> String {
        self.claim(format!("{}-{}-{}", NodeKind::ArrayElement.id_prefix(), index, line))
    }

    /// Id of a call frame node
    pub fn call_frame(&mut self, callee: &str, depth: u32, line: usize) -> String {
        self.claim(format!("{}-{}-{}-{}", NodeKind::CallFrame.id_prefix(), callee, depth, line))
    }

    /// Id of the edge entering a call frame
    pub fn call_edge(&mut self, callee: &str, depth: u32, line: usize) -> String {
        self.claim(format!("recurse-edge-{}-{}-{}", callee, depth, line))
    }

    /// Id of a stand-in node, e.g. `node-root-3` or `dict-child1-0`
    pub fn stand_in(&mut self, kind: NodeKind, slot: &str, line: usize) -> String {
        self.claim(format!("{}-{}-{}", kind.id_prefix(), slot, line))
    }

    /// Id of a stand-in edge, e.g. `edge-root-left-3`
    pub fn stand_in_edge(&mut self, from_slot: &str, to_slot: &str, line: usize) -> String {
        self.claim(format!("edge-{}-{}-{}", from_slot, to_slot, line))
    }

    /// Register `base`, suffixing `~n` when an identical id was already issued
    /// (two literals on one line)
    fn claim(&mut self, base: String) -> String {
        if self.issued.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}~{}", base, n);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_deterministic() {
        let mut a = IdGenerator::new();
        let mut b = IdGenerator::new();
        assert_eq!(a.array_element(0, 4), b.array_element(0, 4));
        assert_eq!(a.call_frame("fib", 2, 7), "recurse-fib-2-7");
    }

    #[test]
    fn test_same_slot_twice_is_disambiguated() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.array_element(0, 1), "array-0-1");
        assert_eq!(ids.array_element(0, 1), "array-0-1~2");
        assert_eq!(ids.array_element(0, 1), "array-0-1~3");
    }

    #[test]
    fn test_stand_in_format() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.stand_in(NodeKind::TreeNode, "root", 3), "node-root-3");
        assert_eq!(ids.stand_in_edge("root", "left", 3), "edge-root-left-3");
    }
}
