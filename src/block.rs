//! Block orchestration: one render or one edit commit per call.

use anyhow::Result;
use tracing::{debug, info};

use crate::{
    config::BlockConfig,
    course::{find_course_node, section_names, section_nodes},
    nav::{Expandable, NavNode, NodeType, SITE_COURSE_KEY, build_tree},
    outline::{self, HierarchyEntry, OutlineCommit},
    store::CourseStore,
    trim,
};

/// One configured block instance. The instance id comes from the host page,
/// nothing here survives a call.
pub(crate) struct CourseNavBlock {
    instance_id: u64,
    config: BlockConfig,
}

/// A finished render: the display tree plus what the client script needs for
/// lazy loading.
#[derive(Debug)]
pub(crate) struct BlockContent {
    pub(crate) title: String,
    pub(crate) tree: NavNode,
    pub(crate) expandable: Vec<Expandable>,
    /// Client-side variable the expandable set is published under.
    pub(crate) expansion_key: String,
}

/// Outcome of committing an edited outline.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct EditOutcome {
    /// New canonical hierarchy string for the host to persist.
    pub(crate) hierarchy: String,
    /// Section data changed; the host must refresh its course caches.
    pub(crate) refresh_needed: bool,
}

impl CourseNavBlock {
    pub(crate) fn new(instance_id: u64, config: BlockConfig) -> Self {
        Self {
            instance_id,
            config,
        }
    }

    /// Builds the display tree for one render. `None` when the graph holds no
    /// matching course, which is not an error.
    pub(crate) fn navigation(&self, graph: &NavNode, course_id: u64) -> Result<Option<NavNode>> {
        let Some(course) = find_course_node(graph, course_id) else {
            debug!(course_id, "no course node in the navigation graph");
            return Ok(None);
        };

        let mut root = course.detached();
        let sections = section_nodes(course);
        if !sections.is_empty() {
            let entries = self.hierarchy_entries(course);
            build_tree(&mut root, &entries, &sections)?;
        }
        Ok(Some(root))
    }

    fn hierarchy_entries(&self, course: &NavNode) -> Vec<HierarchyEntry> {
        if self.config.use_hierarchy {
            // An empty stored hierarchy means exactly that: no children.
            let stored = self.config.hierarchy.as_deref().unwrap_or_default();
            outline::parse_canonical(stored)
        } else {
            outline::default_hierarchy(&section_names(course))
        }
    }

    /// Full render content: trimmed tree plus the filtered expandable set.
    pub(crate) fn content(&self, graph: &NavNode, course_id: u64) -> Result<Option<BlockContent>> {
        let Some(mut tree) = self.navigation(graph, course_id)? else {
            return Ok(None);
        };

        trim::trim_tree(&mut tree, self.config.trim_mode, self.config.trim_length);

        let mut expandable = Vec::new();
        tree.find_expandable(&mut expandable);
        if let Some(limit) = self.config.expansion_limit {
            expandable.retain(|node| {
                !(node.node_type > limit
                    && !(limit == NodeType::Course
                        && node.node_type == limit
                        && node.key == SITE_COURSE_KEY))
            });
        }

        Ok(Some(BlockContent {
            title: self.config.effective_title().to_owned(),
            tree,
            expandable,
            expansion_key: format!("navtreeexpansions{}", self.instance_id),
        }))
    }

    /// The outline text shown in the editing form: the stored hierarchy when
    /// one exists, the identity ordering otherwise, plus comment lines for
    /// every unplaced section.
    pub(crate) fn outline_text(&self, course: &NavNode) -> String {
        let names = section_names(course);
        let entries;
        let existing = match self.config.hierarchy.as_deref() {
            Some(stored) if !stored.trim().is_empty() => {
                entries = outline::parse_canonical(stored);
                Some(entries.as_slice())
            }
            _ => None,
        };
        outline::outline_template(existing, &names)
    }

    /// Commits an edited outline: returns the new canonical string and, per
    /// the configured flags, pushes names and order back to the store.
    pub(crate) fn apply_edit(&self, text: &str, store: &mut CourseStore) -> Result<EditOutcome> {
        if !self.config.use_hierarchy {
            return Ok(EditOutcome {
                hierarchy: String::new(),
                refresh_needed: false,
            });
        }

        let OutlineCommit {
            hierarchy,
            names,
            order,
        } = outline::parse_outline_commit(text);

        let mut refresh_needed = false;
        if self.config.update_names && !names.is_empty() {
            store.rename_sections(names)?;
            refresh_needed = true;
        }
        if self.config.update_order && !order.is_empty() {
            store.reorder_sections(order)?;
            refresh_needed = true;
        }

        info!(
            instance = self.instance_id,
            refresh_needed, "outline committed"
        );
        Ok(EditOutcome {
            hierarchy,
            refresh_needed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::BlockConfigBuilder;

    fn graph() -> NavNode {
        let mut root = NavNode::new(None, NodeType::Root, "Site".to_owned(), None);
        let course = root.add(NavNode::new(
            Some(42),
            NodeType::Course,
            "Systems Programming".to_owned(),
            None,
        ));
        course.add(NavNode::new(
            Some(0),
            NodeType::Section,
            "General".to_owned(),
            None,
        ));
        course.add(NavNode::new(
            Some(11),
            NodeType::Section,
            "Week 1".to_owned(),
            Some("https://example.org/section/11".to_owned()),
        ));
        course.add(NavNode::new(
            Some(12),
            NodeType::Section,
            "Week 2".to_owned(),
            None,
        ));
        root
    }

    fn block(config: BlockConfig) -> CourseNavBlock {
        CourseNavBlock::new(7, config)
    }

    #[test]
    fn default_render_lists_sections_flat() {
        let block = block(BlockConfigBuilder::default().build().unwrap());

        let tree = block.navigation(&graph(), 42).unwrap().unwrap();
        assert_eq!(tree.key, Some(42));
        assert_eq!(tree.node_type, NodeType::Course);
        assert_eq!(
            tree.children.iter().map(|c| c.key).collect::<Vec<_>>(),
            vec![Some(11), Some(12)]
        );
        assert_eq!(
            tree.children[0].action.as_deref(),
            Some("https://example.org/section/11")
        );
    }

    #[test]
    fn stored_hierarchy_reshapes_the_tree() {
        let config = BlockConfigBuilder::default()
            .use_hierarchy(true)
            .hierarchy("0 l:Half A,1 12,0 l:Half B,1 11".to_owned())
            .build()
            .unwrap();
        let block = block(config);

        let tree = block.navigation(&graph(), 42).unwrap().unwrap();
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].title, "Half A");
        assert_eq!(tree.children[0].children[0].key, Some(12));
        assert_eq!(tree.children[1].title, "Half B");
        assert_eq!(tree.children[1].children[0].key, Some(11));
    }

    #[test]
    fn empty_stored_hierarchy_means_no_children() {
        let config = BlockConfigBuilder::default()
            .use_hierarchy(true)
            .build()
            .unwrap();
        let block = block(config);

        let tree = block.navigation(&graph(), 42).unwrap().unwrap();
        assert!(tree.children.is_empty());
    }

    #[test]
    fn missing_course_renders_nothing() {
        let block = block(BlockConfigBuilder::default().build().unwrap());
        assert!(block.navigation(&graph(), 777).unwrap().is_none());
    }

    #[test]
    fn content_trims_titles_and_reports_expandable() {
        let config = BlockConfigBuilder::default()
            .title("Sections".to_owned())
            .trim_length(4)
            .build()
            .unwrap();
        let block = block(config);

        let content = block.content(&graph(), 42).unwrap().unwrap();
        assert_eq!(content.title, "Sections");
        assert_eq!(content.expansion_key, "navtreeexpansions7");
        assert_eq!(content.tree.children[0].title, "...ek 1");
        assert_eq!(
            content
                .expandable
                .iter()
                .map(|e| e.key)
                .collect::<Vec<_>>(),
            vec![11, 12]
        );
    }

    #[test]
    fn expansion_limit_filters_deeper_types() {
        let config = BlockConfigBuilder::default()
            .expansion_limit(NodeType::Course)
            .build()
            .unwrap();
        let block = block(config);

        let content = block.content(&graph(), 42).unwrap().unwrap();
        assert!(content.expandable.is_empty());

        let config = BlockConfigBuilder::default()
            .expansion_limit(NodeType::Section)
            .build()
            .unwrap();
        let block = CourseNavBlock::new(7, config);
        let content = block.content(&graph(), 42).unwrap().unwrap();
        assert_eq!(content.expandable.len(), 2);
    }

    #[test]
    fn outline_text_folds_the_stored_hierarchy() {
        let config = BlockConfigBuilder::default()
            .use_hierarchy(true)
            .hierarchy("0 l:Half A,1 12".to_owned())
            .build()
            .unwrap();
        let block = block(config);

        let graph = graph();
        let course = find_course_node(&graph, 42).unwrap();
        assert_eq!(
            block.outline_text(course),
            "l:Half A\n- Week 2|12\n# Week 1|11\n"
        );
    }

    #[test]
    fn outline_text_defaults_to_the_identity_ordering() {
        let block = block(BlockConfigBuilder::default().build().unwrap());

        let graph = graph();
        let course = find_course_node(&graph, 42).unwrap();
        assert_eq!(block.outline_text(course), "Week 1|11\nWeek 2|12\n");
    }

    #[test]
    fn commit_pushes_names_and_order_when_asked() {
        let mut store = CourseStore::faux();
        faux::when!(store.rename_sections(HashMap::from([
            (12, "Week B".to_owned()),
            (11, "Week A".to_owned()),
        ])))
        .then(|_| Ok(()));
        faux::when!(store.reorder_sections(vec![12, 11])).then(|_| Ok(()));

        let config = BlockConfigBuilder::default()
            .use_hierarchy(true)
            .update_names(true)
            .update_order(true)
            .build()
            .unwrap();
        let block = block(config);

        let outcome = block
            .apply_edit("Week B|12\nWeek A|11\n", &mut store)
            .unwrap();
        assert_eq!(outcome.hierarchy, "0 12,0 11");
        assert!(outcome.refresh_needed);
    }

    #[test]
    fn commit_without_flags_leaves_the_store_alone() {
        // Any store call would hit an unmocked method and panic.
        let mut store = CourseStore::faux();

        let config = BlockConfigBuilder::default()
            .use_hierarchy(true)
            .build()
            .unwrap();
        let block = block(config);

        let outcome = block.apply_edit("Week B|12\n", &mut store).unwrap();
        assert_eq!(outcome.hierarchy, "0 12");
        assert!(!outcome.refresh_needed);
    }

    #[test]
    fn commit_with_hierarchy_disabled_is_a_no_op() {
        let mut store = CourseStore::faux();

        let config = BlockConfigBuilder::default()
            .update_names(true)
            .update_order(true)
            .build()
            .unwrap();
        let block = block(config);

        let outcome = block.apply_edit("Week B|12\n", &mut store).unwrap();
        assert_eq!(outcome.hierarchy, "");
        assert!(!outcome.refresh_needed);
    }
}
