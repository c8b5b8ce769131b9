//! Navigation display tree.

mod build;

use std::fmt;

pub(crate) use build::build_tree;

/// Key of the whole-site course node.
pub(crate) const SITE_COURSE_KEY: u64 = 1;

/// Host node-type tags, ordered the way the host's numeric constants order
/// them so an expansion limit can be compared as a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum NodeType {
    Root,
    Category,
    Course,
    Section,
    Activity,
    Label,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeType::Root => "root",
            NodeType::Category => "category",
            NodeType::Course => "course",
            NodeType::Section => "section",
            NodeType::Activity => "activity",
            NodeType::Label => "label",
        })
    }
}

/// One node of the tree handed to the renderer. Built fresh for every render
/// and never shared back into the source graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NavNode {
    pub(crate) key: Option<u64>,
    pub(crate) node_type: NodeType,
    pub(crate) title: String,
    pub(crate) action: Option<String>,
    pub(crate) children: Vec<NavNode>,
}

impl NavNode {
    pub(crate) fn new(
        key: Option<u64>,
        node_type: NodeType,
        title: String,
        action: Option<String>,
    ) -> Self {
        Self {
            key,
            node_type,
            title,
            action,
            children: Vec::new(),
        }
    }

    /// A synthetic grouping node; carries no key.
    pub(crate) fn label(text: String, link: Option<String>) -> Self {
        Self::new(None, NodeType::Label, text, link)
    }

    /// Copy of the node's own properties without its subtree.
    pub(crate) fn detached(&self) -> Self {
        Self::new(
            self.key,
            self.node_type,
            self.title.clone(),
            self.action.clone(),
        )
    }

    pub(crate) fn add(&mut self, child: NavNode) -> &mut NavNode {
        self.children.push(child);
        self.children.last_mut().expect("just pushed")
    }

    /// Depth-first search for a keyed node of the given type.
    pub(crate) fn find(&self, key: u64, node_type: NodeType) -> Option<&NavNode> {
        if self.key == Some(key) && self.node_type == node_type {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key, node_type))
    }

    /// All descendants of the given type, in document order.
    pub(crate) fn find_all_of_type(&self, node_type: NodeType) -> Vec<&NavNode> {
        let mut found = Vec::new();
        self.collect_of_type(node_type, &mut found);
        found
    }

    fn collect_of_type<'n>(&'n self, node_type: NodeType, found: &mut Vec<&'n NavNode>) {
        for child in &self.children {
            if child.node_type == node_type {
                found.push(child);
            }
            child.collect_of_type(node_type, found);
        }
    }

    /// Collects keyed leaf nodes, the ones a client may still expand lazily.
    pub(crate) fn find_expandable(&self, expandable: &mut Vec<Expandable>) {
        if self.children.is_empty() {
            if let Some(key) = self.key {
                expandable.push(Expandable {
                    key,
                    node_type: self.node_type,
                });
            }
            return;
        }
        for child in &self.children {
            child.find_expandable(expandable);
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.title, width = depth * 2)?;
        if let Some(action) = &self.action {
            write!(f, " -> {action}")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for NavNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Node reported to the client as eligible for lazy expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Expandable {
    pub(crate) key: u64,
    pub(crate) node_type: NodeType,
}
