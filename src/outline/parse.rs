//! Parsing of the user-authored outline text.
//!
//! A line is either a `#` comment, or a run of `-` characters giving the
//! nesting depth followed by `l:<label>`, `l:<label>|<url>` or
//! `<name>|<sectionid>`. Lines that fit neither shape are dropped, the text
//! is user input and partially invalid content is expected.

use std::collections::HashMap;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{char, multispace0, u64},
    combinator::{all_consuming, map, opt, rest},
    sequence::{delimited, preceded},
};
use tracing::warn;

use super::{COMMENT_MARKER, HierarchyEntry, LABEL_MARKER, OutlineItem, canonical_string};

/// Everything an edit commit extracts from the outline besides the entries:
/// the canonical string to persist and the intended names and order of the
/// sections mentioned.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OutlineCommit {
    pub(crate) hierarchy: String,
    pub(crate) names: HashMap<u64, String>,
    pub(crate) order: Vec<u64>,
}

/// Hierarchy-only parse used at render time.
pub(crate) fn parse_outline(text: &str) -> Vec<HierarchyEntry> {
    parsed_lines(text)
        .map(|line| HierarchyEntry {
            depth: line.depth,
            item: line.item,
        })
        .collect()
}

/// Edit-commit parse: additionally collates, in line order, the name each
/// section line carries and the order the section ids appear in.
pub(crate) fn parse_outline_commit(text: &str) -> OutlineCommit {
    let mut entries = Vec::new();
    let mut names = HashMap::new();
    let mut order = Vec::new();

    for line in parsed_lines(text) {
        if let OutlineItem::Section(id) = line.item {
            if let Some(name) = line.name {
                names.insert(id, name);
            }
            order.push(id);
        }
        entries.push(HierarchyEntry {
            depth: line.depth,
            item: line.item,
        });
    }

    OutlineCommit {
        hierarchy: canonical_string(&entries),
        names,
        order,
    }
}

struct ParsedLine {
    depth: usize,
    item: OutlineItem,
    /// Display name typed on a section line; labels carry none.
    name: Option<String>,
}

fn parsed_lines(text: &str) -> impl Iterator<Item = ParsedLine> + '_ {
    text.lines().filter_map(parse_line)
}

fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return None;
    }

    let depth = line.chars().take_while(|c| *c == '-').count();
    let body = line[depth..].trim();
    if body.is_empty() {
        return None;
    }

    match parse_item(body) {
        Ok((_, (item, name))) => Some(ParsedLine { depth, item, name }),
        Err(e) => {
            warn!(line, ?e, "skipping malformed outline line");
            None
        }
    }
}

fn parse_item(input: &str) -> IResult<&str, (OutlineItem, Option<String>)> {
    alt((parse_label, parse_section)).parse(input)
}

fn parse_label(input: &str) -> IResult<&str, (OutlineItem, Option<String>)> {
    map(
        preceded(
            tag(LABEL_MARKER),
            (take_till(|c| c == '|'), opt(preceded(char('|'), rest))),
        ),
        |(text, link): (&str, Option<&str>)| {
            let link = link
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_owned);
            (
                OutlineItem::Label {
                    text: text.trim().to_owned(),
                    link,
                },
                None,
            )
        },
    )
    .parse(input)
}

fn parse_section(input: &str) -> IResult<&str, (OutlineItem, Option<String>)> {
    map(
        (
            take_till(|c| c == '|'),
            char('|'),
            all_consuming(delimited(multispace0, u64, multispace0)),
        ),
        |(name, _, id): (&str, _, _)| (OutlineItem::Section(id), Some(name.trim().to_owned())),
    )
    .parse(input)
}
