//! Rebuilds the course subtree from an ordered sequence of hierarchy entries.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use tracing::debug;

use super::NavNode;
use crate::outline::{HierarchyEntry, OutlineItem};

/// Upper bound on nesting recursion. Outlines are user-authored, so a depth
/// run long enough to threaten the stack must come back as an error.
const MAX_NESTING: usize = 64;

/// Appends the hierarchy's nodes under `root`, resolving section references
/// against `sections`. References that do not resolve are dropped without a
/// node; the source nodes are only copied from, never mutated.
pub(crate) fn build_tree(
    root: &mut NavNode,
    entries: &[HierarchyEntry],
    sections: &BTreeMap<u64, &NavNode>,
) -> Result<()> {
    let Some(first) = entries.first() else {
        return Ok(());
    };

    let mut assembler = Assembler {
        entries,
        position: 0,
        level: first.depth,
    };
    // A dedent unwinds one recursion level per return, so a dedent past the
    // outermost frame lands back here with entries still pending.
    while !assembler.done() {
        assembler.attach(root, sections, MAX_NESTING)?;
    }
    Ok(())
}

/// Cursor and nesting level shared across recursion frames.
struct Assembler<'e> {
    entries: &'e [HierarchyEntry],
    position: usize,
    level: usize,
}

impl Assembler<'_> {
    fn done(&self) -> bool {
        self.position >= self.entries.len()
    }

    /// Consumes entries at the current level as children of `parent`. A depth
    /// increase recurses under the most recently created sibling, a decrease
    /// steps the level down by one and returns without consuming the entry.
    fn attach(
        &mut self,
        parent: &mut NavNode,
        sections: &BTreeMap<u64, &NavNode>,
        headroom: usize,
    ) -> Result<()> {
        let mut last_child = None;

        while let Some(entry) = self.entries.get(self.position) {
            if entry.depth == self.level {
                match &entry.item {
                    OutlineItem::Label { text, link } => {
                        parent.add(NavNode::label(text.clone(), link.clone()));
                        last_child = Some(parent.children.len() - 1);
                    }
                    OutlineItem::Section(id) => {
                        if let Some(section) = sections.get(id) {
                            parent.add(section.detached());
                            last_child = Some(parent.children.len() - 1);
                        } else {
                            debug!(id, "outline references an unknown section, dropping");
                        }
                    }
                }
                self.position += 1;
            } else if entry.depth > self.level {
                if headroom == 0 {
                    bail!("outline nesting exceeds {MAX_NESTING} levels");
                }
                self.level = entry.depth;
                let group_parent = match last_child {
                    Some(index) => &mut parent.children[index],
                    None => &mut *parent,
                };
                self.attach(group_parent, sections, headroom - 1)?;
            } else {
                self.level -= 1;
                return Ok(());
            }
        }
        Ok(())
    }
}
