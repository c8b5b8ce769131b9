//! Outline hierarchy entries and their canonical persisted form.

mod parse;
mod serialize;

use std::{fmt, str::FromStr};

use anyhow::{Context, Error};
use itertools::Itertools;
pub(crate) use parse::{OutlineCommit, parse_outline, parse_outline_commit};
pub(crate) use serialize::outline_template;
use tracing::warn;

pub(crate) const LABEL_MARKER: &str = "l:";
pub(crate) const COMMENT_MARKER: char = '#';

/// One parsed outline line: nesting depth plus what the line denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HierarchyEntry {
    pub(crate) depth: usize,
    pub(crate) item: OutlineItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutlineItem {
    /// Synthetic grouping node, optionally linked.
    Label { text: String, link: Option<String> },
    /// Reference to a course section by id.
    Section(u64),
}

impl HierarchyEntry {
    pub(crate) fn section(depth: usize, id: u64) -> Self {
        Self {
            depth,
            item: OutlineItem::Section(id),
        }
    }
}

impl OutlineItem {
    /// The descriptor without depth: `l:text`, `l:text|url` or a bare id.
    pub(crate) fn descriptor(&self) -> String {
        match self {
            OutlineItem::Label {
                text,
                link: Some(link),
            } => format!("{LABEL_MARKER}{text}|{link}"),
            OutlineItem::Label { text, link: None } => format!("{LABEL_MARKER}{text}"),
            OutlineItem::Section(id) => id.to_string(),
        }
    }
}

impl fmt::Display for HierarchyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.depth, self.item.descriptor())
    }
}

impl FromStr for HierarchyEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (depth, descriptor) = s.split_once(' ').context("missing depth separator")?;
        let depth = depth.parse().context("bad depth")?;
        let descriptor = descriptor.trim();

        let item = if let Some(label) = descriptor.strip_prefix(LABEL_MARKER) {
            match label.split_once('|') {
                Some((text, link)) if !link.trim().is_empty() => OutlineItem::Label {
                    text: text.to_owned(),
                    link: Some(link.trim().to_owned()),
                },
                Some((text, _)) => OutlineItem::Label {
                    text: text.to_owned(),
                    link: None,
                },
                None => OutlineItem::Label {
                    text: label.to_owned(),
                    link: None,
                },
            }
        } else {
            OutlineItem::Section(descriptor.parse().context("bad section id")?)
        };

        Ok(Self { depth, item })
    }
}

/// Comma-joined `"<depth> <descriptor>"` tokens, the form the host persists.
pub(crate) fn canonical_string(entries: &[HierarchyEntry]) -> String {
    entries.iter().join(",")
}

/// Parses a persisted hierarchy string back into entries. Tokens that no
/// longer parse are skipped, the stored string is as untrusted as the
/// outline it came from.
pub(crate) fn parse_canonical(hierarchy: &str) -> Vec<HierarchyEntry> {
    hierarchy
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            token
                .parse()
                .inspect_err(|e| warn!(token, ?e, "skipping malformed hierarchy token"))
                .ok()
        })
        .collect()
}

/// Identity ordering: one depth-0 section entry per known section.
pub(crate) fn default_hierarchy(names: &[(u64, String)]) -> Vec<HierarchyEntry> {
    names
        .iter()
        .map(|(id, _)| HierarchyEntry::section(0, *id))
        .collect()
}
