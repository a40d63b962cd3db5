//! Decode trie.
//!
//! Tables describe partial tries as [`Node`] values. [`DecodeTrie::build`]
//! merges a base node with any number of extension nodes into a single
//! [`DecodeNode`] tree, rejecting collisions and validating every leaf.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use tracing::{trace, trace_span};

use crate::category::Category;
use crate::descriptor::Descriptor;
use crate::error::{BuildError, Result};
use crate::field::BitRange;

/// Declarative (partial) trie, as written in the decode tables.
#[derive(Clone, Debug)]
pub enum Node {
    Inst(Descriptor),
    Level {
        range: BitRange,
        entries: Vec<(u32, Node)>,
    },
}

/// Level selecting bits `[start, end)`.
pub fn level(start: u8, end: u8, entries: impl IntoIterator<Item = (u32, Node)>) -> Node {
    Node::Level {
        range: BitRange::new(start, end),
        entries: entries.into_iter().collect(),
    }
}

impl From<Descriptor> for Node {
    fn from(descriptor: Descriptor) -> Self {
        Self::Inst(descriptor)
    }
}

/// Built trie node.
#[derive(Clone, Debug)]
pub enum DecodeNode {
    Leaf(Descriptor),
    Branch {
        range: BitRange,
        children: FxHashMap<u32, DecodeNode>,
    },
}

impl DecodeNode {
    fn empty(range: BitRange) -> Self {
        Self::Branch {
            range,
            children: FxHashMap::default(),
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Leaf(d) => d.mnemonic,
            Self::Branch { .. } => "<level>",
        }
    }
}

/// Validated decode trie for one category set.
#[derive(Clone, Debug)]
pub struct DecodeTrie {
    root: DecodeNode,
    categories: Category,
}

/// One step on the path from the root to a node.
#[derive(Clone, Copy, Debug)]
struct Step {
    range: BitRange,
    key: u32,
}

fn path_string(path: &[Step]) -> String {
    let mut out = String::new();
    for (i, step) in path.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        let _ = write!(out, "{}={:#x}", step.range, step.key);
    }
    if out.is_empty() {
        out.push_str("<root>");
    }
    out
}

impl DecodeTrie {
    /// Merge `base` and `extensions`, keeping only leaves whose category is in
    /// `categories`.
    ///
    /// `categories` should already be an effective set (see
    /// [`Category::effective`]).
    pub fn build(
        base: Node,
        extensions: impl IntoIterator<Item = Node>,
        categories: Category,
    ) -> Result<Self> {
        let Node::Level { range, .. } = &base else {
            return Err(BuildError::Collision {
                path: "<root>".to_string(),
                existing: "<level>",
                incoming: node_name(&base),
            });
        };
        let mut trie = Self {
            root: DecodeNode::empty(*range),
            categories,
        };
        trie.merge(base)?;
        for ext in extensions {
            trie.merge(ext)?;
        }
        Ok(trie)
    }

    /// Merge a partial trie rooted at the same selector as the root.
    pub fn merge(&mut self, node: Node) -> Result<()> {
        let _span = trace_span!("merge").entered();
        let mut path = Vec::new();
        merge_into(&mut self.root, node, self.categories, &mut path)
    }

    #[must_use]
    pub const fn root(&self) -> &DecodeNode {
        &self.root
    }

    #[must_use]
    pub const fn categories(&self) -> Category {
        self.categories
    }

    /// Walk the trie for a 32-bit fetch word.
    #[must_use]
    pub fn lookup(&self, word: u32) -> Option<&Descriptor> {
        let mut node = &self.root;
        loop {
            match node {
                DecodeNode::Leaf(d) => return Some(d),
                DecodeNode::Branch { range, children } => {
                    node = children.get(&range.extract(word))?;
                }
            }
        }
    }

    /// Every reachable descriptor, once per leaf position.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Descriptor> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                DecodeNode::Leaf(d) => out.push(d),
                DecodeNode::Branch { children, .. } => stack.extend(children.values()),
            }
        }
        out
    }

    /// Deepest leaf, counted in levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn depth_of(node: &DecodeNode) -> usize {
            match node {
                DecodeNode::Leaf(_) => 0,
                DecodeNode::Branch { children, .. } => {
                    1 + children.values().map(depth_of).max().unwrap_or(0)
                }
            }
        }
        depth_of(&self.root)
    }
}

const fn node_name(node: &Node) -> &'static str {
    match node {
        Node::Inst(d) => d.mnemonic,
        Node::Level { .. } => "<level>",
    }
}

fn merge_into(
    target: &mut DecodeNode,
    incoming: Node,
    categories: Category,
    path: &mut Vec<Step>,
) -> Result<()> {
    let DecodeNode::Branch { range, children } = target else {
        return Err(BuildError::Collision {
            path: path_string(path),
            existing: target.name(),
            incoming: node_name(&incoming),
        });
    };
    let (in_range, entries) = match incoming {
        Node::Level { range, entries } => (range, entries),
        Node::Inst(d) => {
            return Err(BuildError::Collision {
                path: path_string(path),
                existing: "<level>",
                incoming: d.mnemonic,
            });
        }
    };
    if *range != in_range {
        return Err(BuildError::SelectorMismatch {
            path: path_string(path),
            existing: *range,
            incoming: in_range,
        });
    }
    let range = *range;
    for (key, child) in entries {
        if !range.fits(key) {
            return Err(BuildError::KeyOverflow { key, range });
        }
        path.push(Step { range, key });
        match child {
            Node::Inst(descriptor) => {
                if categories.contains(descriptor.category) {
                    validate_leaf(&descriptor, path)?;
                    if let Some(existing) = children.get(&key) {
                        return Err(BuildError::Collision {
                            path: path_string(path),
                            existing: existing.name(),
                            incoming: descriptor.mnemonic,
                        });
                    }
                    trace!(path = %path_string(path), mnemonic = descriptor.mnemonic, "leaf");
                    children.insert(key, DecodeNode::Leaf(descriptor));
                } else {
                    trace!(
                        mnemonic = descriptor.mnemonic,
                        category = %descriptor.category,
                        "pruned inactive leaf"
                    );
                }
            }
            Node::Level {
                range: sub,
                entries,
            } => {
                let slot = children
                    .entry(key)
                    .or_insert_with(|| DecodeNode::empty(sub));
                merge_into(slot, Node::Level { range: sub, entries }, categories, path)?;
            }
        }
        path.pop();
    }
    Ok(())
}

fn validate_leaf(descriptor: &Descriptor, path: &[Step]) -> Result<()> {
    descriptor.validate()?;
    let limit = u32::from(descriptor.length) * 8;
    if let Some(step) = path.iter().find(|s| u32::from(s.range.end) > limit) {
        return Err(BuildError::SelectorPastLength {
            mnemonic: descriptor.mnemonic,
            range: step.range,
            length: descriptor.length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::format;

    fn short(name: &'static str) -> Node {
        Descriptor::new(name, Category::VLE, &format::R, &[Field::RX]).into()
    }

    fn long(name: &'static str, category: Category) -> Node {
        Descriptor::new(name, category, &format::D, &[Field::RT, Field::RA, Field::D]).into()
    }

    #[test]
    fn test_lookup_walks_levels() {
        let base = level(0, 4, [(0x0, level(4, 8, [(0x2, short("se_a"))]))]);
        let trie = DecodeTrie::build(base, [], Category::BASE).unwrap();
        assert_eq!(trie.lookup(0x0200_0000).map(|d| d.mnemonic), Some("se_a"));
        assert!(trie.lookup(0x0300_0000).is_none());
        assert_eq!(trie.depth(), 2);
    }

    #[test]
    fn test_graft_and_recurse() {
        let base = level(0, 4, [(0x0, level(4, 8, [(0x2, short("se_a"))]))]);
        let ext = level(0, 4, [(0x0, level(4, 8, [(0x3, short("se_b"))]))]);
        let trie = DecodeTrie::build(base, [ext], Category::BASE).unwrap();
        assert_eq!(trie.lookup(0x0300_0000).map(|d| d.mnemonic), Some("se_b"));
        assert_eq!(trie.leaves().len(), 2);
    }

    #[test]
    fn test_collision_rejected() {
        let base = level(0, 4, [(0x1, long("e_a", Category::VLE))]);
        let ext = level(0, 4, [(0x1, long("e_b", Category::VLE))]);
        let err = DecodeTrie::build(base, [ext], Category::BASE).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Collision {
                existing: "e_a",
                incoming: "e_b",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_key_within_table_rejected() {
        let base = level(0, 4, [(0x1, long("e_a", Category::VLE)), (0x1, long("e_b", Category::VLE))]);
        assert!(matches!(
            DecodeTrie::build(base, [], Category::BASE),
            Err(BuildError::Collision { .. })
        ));
    }

    #[test]
    fn test_level_onto_leaf_rejected() {
        let base = level(0, 4, [(0x1, long("e_a", Category::VLE))]);
        let ext = level(0, 4, [(0x1, level(4, 8, [(0, long("e_b", Category::VLE))]))]);
        assert!(matches!(
            DecodeTrie::build(base, [ext], Category::BASE),
            Err(BuildError::Collision { .. })
        ));
    }

    #[test]
    fn test_selector_mismatch() {
        let base = level(0, 4, [(0x1, level(4, 6, [(0, long("e_a", Category::VLE))]))]);
        let ext = level(0, 4, [(0x1, level(4, 8, [(1, long("e_b", Category::VLE))]))]);
        assert!(matches!(
            DecodeTrie::build(base, [ext], Category::BASE),
            Err(BuildError::SelectorMismatch { .. })
        ));
    }

    #[test]
    fn test_selector_past_length() {
        let base = level(0, 4, [(0x0, level(16, 20, [(0, short("se_a"))]))]);
        assert!(matches!(
            DecodeTrie::build(base, [], Category::BASE),
            Err(BuildError::SelectorPastLength {
                mnemonic: "se_a",
                length: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_key_overflow() {
        let base = level(0, 4, [(0x10, short("se_a"))]);
        assert!(matches!(
            DecodeTrie::build(base, [], Category::BASE),
            Err(BuildError::KeyOverflow { key: 0x10, .. })
        ));
    }

    #[test]
    fn test_inactive_leaves_pruned() {
        let base = level(0, 4, [(0x1, long("e_a", Category::VLE)), (0x2, long("x_b", Category::SP))]);
        let trie = DecodeTrie::build(base.clone(), [], Category::BASE).unwrap();
        assert!(trie.lookup(0x2000_0000).is_none());
        let trie = DecodeTrie::build(base, [], Category::SP.effective()).unwrap();
        assert_eq!(trie.lookup(0x2000_0000).map(|d| d.mnemonic), Some("x_b"));
    }

    #[test]
    fn test_mixed_depths() {
        let base = level(
            0,
            4,
            [
                (0x1, long("e_a", Category::VLE)),
                (0x2, level(4, 5, [(0, short("se_b")), (1, level(5, 8, [(3, short("se_c"))]))])),
            ],
        );
        let trie = DecodeTrie::build(base, [], Category::BASE).unwrap();
        assert_eq!(trie.lookup(0x2000_0000).map(|d| d.mnemonic), Some("se_b"));
        assert_eq!(trie.lookup(0x2B00_0000).map(|d| d.mnemonic), Some("se_c"));
    }
}
