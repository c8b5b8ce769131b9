//! Title trimming applied to the built tree before rendering.

use crate::nav::NavNode;

/// Which side of an over-long title gets cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum TrimMode {
    /// Keep the head, cut the tail.
    Right,
    /// Keep the tail, cut the head.
    #[default]
    Left,
    /// Keep both ends, cut the middle.
    Center,
}

const ELLIPSIS: &str = "...";

/// Shortens every title in the subtree to at most `length` characters plus
/// the ellipsis marker.
pub(crate) fn trim_tree(node: &mut NavNode, mode: TrimMode, length: usize) {
    node.title = shorten(&node.title, mode, length);
    for child in &mut node.children {
        trim_tree(child, mode, length);
    }
}

fn shorten(text: &str, mode: TrimMode, length: usize) -> String {
    let count = text.chars().count();
    if count <= length {
        return text.to_owned();
    }

    match mode {
        TrimMode::Right => {
            let head: String = text.chars().take(length).collect();
            format!("{head}{ELLIPSIS}")
        }
        TrimMode::Left => {
            let tail: String = text.chars().skip(count - length).collect();
            format!("{ELLIPSIS}{tail}")
        }
        TrimMode::Center => {
            let keep = length.div_ceil(2);
            let head: String = text.chars().take(keep).collect();
            let tail: String = text.chars().skip(count - keep).collect();
            format!("{head}{ELLIPSIS}{tail}")
        }
    }
}
