//! Emission of the outline text shown in the editing form.

use super::{COMMENT_MARKER, HierarchyEntry, OutlineItem, default_hierarchy};

/// Renders a hierarchy back into editable outline text. Sections the
/// hierarchy references by a known id come out as `name|id` lines and are
/// consumed from the working name set; whatever names remain afterwards are
/// appended as comment lines so nothing the course has is lost from view.
pub(crate) fn outline_template(
    existing: Option<&[HierarchyEntry]>,
    names: &[(u64, String)],
) -> String {
    let mut remaining: Vec<(u64, &str)> = names.iter().map(|(id, n)| (*id, n.as_str())).collect();

    let default;
    let entries = match existing {
        Some(entries) => entries,
        None => {
            default = default_hierarchy(names);
            &default
        }
    };

    let mut out = String::new();
    for entry in entries {
        let content = match &entry.item {
            OutlineItem::Label { .. } => entry.item.descriptor(),
            OutlineItem::Section(id) => {
                let Some(found) = remaining.iter().position(|(known, _)| known == id) else {
                    continue;
                };
                let (_, name) = remaining.remove(found);
                format!("{name}|{id}")
            }
        };

        if entry.depth > 0 {
            out.push_str(&"-".repeat(entry.depth));
            out.push(' ');
        }
        out.push_str(&content);
        out.push('\n');
    }

    for (id, name) in remaining {
        out.push(COMMENT_MARKER);
        out.push_str(&format!(" {name}|{id}\n"));
    }

    out
}
