//! Course snapshot storage.
//!
//! A course file holds one `id|name` line for the course followed by one per
//! section; a section's position is its line order, with the first section
//! line being the reserved overview section.

use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    course::Section,
    nav::{NavNode, NodeType},
};

/// Reads a course snapshot from disk.
pub(crate) fn load_course(path: PathBuf) -> Result<CourseStore> {
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("unable to read course file {}", path.display()))?;

    let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
    let (course_id, course_name) = lines
        .next()
        .context("course file is empty")
        .and_then(parse_record)?;

    let mut sections = Vec::new();
    for (position, line) in lines.enumerate() {
        let (id, name) = parse_record(line)?;
        sections.push(Section {
            id,
            name,
            position: position as u32,
        });
    }

    Ok(CourseStore::new(path, course_id, course_name, sections))
}

fn parse_record(line: &str) -> Result<(u64, String)> {
    let (id, name) = line
        .split_once('|')
        .with_context(|| format!("malformed course line: {line}"))?;
    let id = id
        .trim()
        .parse()
        .with_context(|| format!("bad id in course line: {line}"))?;
    Ok((id, name.trim().to_owned()))
}

#[cfg_attr(test, faux::create)]
pub(crate) struct CourseStore {
    path: PathBuf,
    course_id: u64,
    course_name: String,
    sections: Vec<Section>,
}

#[cfg_attr(test, faux::methods)]
impl CourseStore {
    pub(crate) fn new(
        path: PathBuf,
        course_id: u64,
        course_name: String,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            path,
            course_id,
            course_name,
            sections,
        }
    }

    pub(crate) fn course_id(&self) -> u64 {
        self.course_id
    }

    /// Snapshot of the sections in position order.
    pub(crate) fn sections(&self) -> Vec<Section> {
        self.sections.clone()
    }

    /// The course subtree as a navigation graph, sections in position order.
    pub(crate) fn navigation(&self) -> NavNode {
        let mut root = NavNode::new(None, NodeType::Root, "Site".to_owned(), None);
        let course = root.add(NavNode::new(
            Some(self.course_id),
            NodeType::Course,
            self.course_name.clone(),
            None,
        ));
        for section in &self.sections {
            course.add(NavNode::new(
                Some(section.id),
                NodeType::Section,
                section.name.clone(),
                None,
            ));
        }
        root
    }

    /// Updates the names of the given sections; unknown ids are ignored.
    pub(crate) fn rename_sections(&mut self, names: HashMap<u64, String>) -> Result<()> {
        for (id, name) in names {
            if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
                section.name = name;
            }
        }
        info!(course = self.course_id, "renamed sections");
        self.persist()
    }

    /// Moves the given sections to the front in the given order. Sections not
    /// mentioned follow in their pre-existing relative order, the overview
    /// section stays pinned, and positions are renumbered densely from 1.
    pub(crate) fn reorder_sections(&mut self, order: Vec<u64>) -> Result<()> {
        let mut merged: Vec<u64> = Vec::new();
        for id in order {
            let movable = self.sections.iter().any(|s| s.id == id && s.position > 0);
            if movable && !merged.contains(&id) {
                merged.push(id);
            }
        }
        for section in &self.sections {
            if section.position > 0 && !merged.contains(&section.id) {
                merged.push(section.id);
            }
        }

        for (index, id) in merged.iter().enumerate() {
            let section = self
                .sections
                .iter_mut()
                .find(|s| s.id == *id)
                .expect("merged ids come from the snapshot");
            section.position = index as u32 + 1;
        }
        self.sections.sort_by_key(|s| s.position);

        info!(course = self.course_id, order = ?merged, "reordered sections");
        self.persist()
    }

    pub(crate) fn persist(&self) -> Result<()> {
        let mut out = format!("{}|{}\n", self.course_id, self.course_name);
        for section in &self.sections {
            out.push_str(&format!("{}|{}\n", section.id, section.name));
        }
        fs::write(&self.path, out)
            .with_context(|| format!("unable to write course file {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const COURSE: &str = "42|Systems Programming
0|General
1|Week 1
2|Week 2
3|Week 3
";

    fn test_store(dir: &TempDir) -> CourseStore {
        let path = dir.path().join("course.txt");
        fs::write(&path, COURSE).expect("cannot seed course file");
        load_course(path).expect("cannot load course file")
    }

    #[test]
    fn loads_sections_in_position_order() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        assert_eq!(store.course_id(), 42);
        assert_eq!(
            store
                .sections()
                .iter()
                .map(|s| (s.id, s.position))
                .collect::<Vec<_>>(),
            vec![(0, 0), (1, 1), (2, 2), (3, 3)]
        );
    }

    #[test]
    fn rejects_a_malformed_course_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("course.txt");
        fs::write(&path, "not a course line\n").unwrap();
        assert!(load_course(path).is_err());
    }

    #[test]
    fn reorder_appends_unmentioned_and_renumbers() {
        let dir = TempDir::new().unwrap();
        let mut store = test_store(&dir);

        store.reorder_sections(vec![3, 1]).unwrap();

        assert_eq!(
            store
                .sections()
                .iter()
                .map(|s| (s.id, s.position))
                .collect::<Vec<_>>(),
            vec![(0, 0), (3, 1), (1, 2), (2, 3)]
        );
    }

    #[test]
    fn reorder_ignores_unknown_and_overview_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = test_store(&dir);

        store.reorder_sections(vec![99, 0, 2, 2]).unwrap();

        assert_eq!(
            store.sections().iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![0, 2, 1, 3]
        );
    }

    #[test]
    fn reorder_survives_a_reload() {
        let dir = TempDir::new().unwrap();
        let mut store = test_store(&dir);
        store.reorder_sections(vec![2]).unwrap();

        let reloaded = load_course(dir.path().join("course.txt")).unwrap();
        assert_eq!(
            reloaded.sections().iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![0, 2, 1, 3]
        );
    }

    #[test]
    fn rename_skips_unknown_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = test_store(&dir);

        store
            .rename_sections(HashMap::from([
                (2, "Week Two".to_owned()),
                (99, "Nope".to_owned()),
            ]))
            .unwrap();

        let names: Vec<_> = store.sections().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["General", "Week 1", "Week Two", "Week 3"]);
    }

    #[test]
    fn navigation_mirrors_the_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let graph = store.navigation();
        let course = graph.find(42, NodeType::Course).unwrap();
        assert_eq!(course.title, "Systems Programming");
        assert_eq!(
            course.children.iter().map(|c| c.key).collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2), Some(3)]
        );
    }
}
