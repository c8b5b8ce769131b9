//! Read adapters over the host navigation graph.

use std::collections::BTreeMap;

use crate::nav::{NavNode, NodeType};

/// Key of the reserved overview section; it is never part of the hierarchy.
pub(crate) const OVERVIEW_KEY: u64 = 0;

/// A course section as the store publishes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section {
    pub(crate) id: u64,
    pub(crate) name: String,
    /// Ordinal within the course; 0 is the overview.
    pub(crate) position: u32,
}

/// The course node carrying the given id, anywhere in the graph.
pub(crate) fn find_course_node(graph: &NavNode, course_id: u64) -> Option<&NavNode> {
    graph.find(course_id, NodeType::Course)
}

/// The course's section nodes keyed by section id.
pub(crate) fn section_nodes(course: &NavNode) -> BTreeMap<u64, &NavNode> {
    course
        .find_all_of_type(NodeType::Section)
        .into_iter()
        .filter_map(|node| node.key.map(|key| (key, node)))
        .collect()
}

/// Section display names in course order, skipping the overview section.
pub(crate) fn section_names(course: &NavNode) -> Vec<(u64, String)> {
    course
        .find_all_of_type(NodeType::Section)
        .into_iter()
        .filter_map(|node| node.key.map(|key| (key, node.title.clone())))
        .filter(|(key, _)| *key != OVERVIEW_KEY)
        .collect()
}
