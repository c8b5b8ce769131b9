//! Per-instance block configuration supplied by the host.

use derive_builder::Builder;

use crate::{nav::NodeType, trim::TrimMode};

pub(crate) const DEFAULT_TITLE: &str = "Course navigation";
pub(crate) const DEFAULT_TRIM_LENGTH: usize = 50;

/// Settings collected by the host's configuration form. The core consumes
/// this surface, it never owns or persists it.
#[derive(Debug, Clone, Builder)]
#[builder(setter(strip_option))]
pub(crate) struct BlockConfig {
    /// User-defined block title; empty falls back to the default.
    #[builder(default)]
    pub(crate) title: Option<String>,
    /// Off means the identity ordering of sections.
    #[builder(default)]
    pub(crate) use_hierarchy: bool,
    /// Canonical comma-joined hierarchy string, as last committed.
    #[builder(default)]
    pub(crate) hierarchy: Option<String>,
    /// Push intended section names to the store on save.
    #[builder(default)]
    pub(crate) update_names: bool,
    /// Push outline order to the store on save.
    #[builder(default)]
    pub(crate) update_order: bool,
    /// Deepest node type still reported as expandable to the client.
    #[builder(default)]
    pub(crate) expansion_limit: Option<NodeType>,
    #[builder(default)]
    pub(crate) trim_mode: TrimMode,
    #[builder(default = "DEFAULT_TRIM_LENGTH")]
    pub(crate) trim_length: usize,
}

impl BlockConfig {
    /// Effective title, never empty.
    pub(crate) fn effective_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => DEFAULT_TITLE,
        }
    }
}
