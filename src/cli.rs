use crate::{nav::NodeType, trim::TrimMode};

/// Course navigation outline tool
#[derive(clap::Parser, Debug)]
#[command(version = "0.1", about = "Reshape a course navigation tree from an outline", long_about = None)]
pub(super) struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub(super) enum Command {
    /// Print the display tree for a course
    Render {
        /// Course snapshot file
        #[arg(long)]
        course: String,
        /// Outline file; omitted means the stored section ordering
        #[arg(long)]
        outline: Option<String>,
        /// Block title override
        #[arg(long)]
        title: Option<String>,
        /// Deepest node type reported as expandable
        #[arg(long, value_parser = parse_node_type)]
        expansion_limit: Option<NodeType>,
        #[arg(long, value_parser = parse_trim_mode, default_value = "left")]
        trim_mode: TrimMode,
        #[arg(long, default_value_t = 50)]
        trim_length: usize,
    },
    /// Print the editable outline template for a course
    Template {
        /// Course snapshot file
        #[arg(long)]
        course: String,
        /// Existing outline to fold in
        #[arg(long)]
        outline: Option<String>,
    },
    /// Commit an edited outline and print the canonical hierarchy
    Commit {
        /// Course snapshot file
        #[arg(long)]
        course: String,
        /// Edited outline file
        #[arg(long)]
        outline: String,
        /// Push the outline's section names to the course store
        #[arg(long)]
        update_names: bool,
        /// Push the outline's section order to the course store
        #[arg(long)]
        update_order: bool,
    },
}

fn parse_node_type(s: &str) -> Result<NodeType, String> {
    match s {
        "root" => Ok(NodeType::Root),
        "category" => Ok(NodeType::Category),
        "course" => Ok(NodeType::Course),
        "section" => Ok(NodeType::Section),
        "activity" => Ok(NodeType::Activity),
        "label" => Ok(NodeType::Label),
        _ => Err(format!("unknown node type: {s}")),
    }
}

fn parse_trim_mode(s: &str) -> Result<TrimMode, String> {
    match s {
        "right" => Ok(TrimMode::Right),
        "left" => Ok(TrimMode::Left),
        "center" => Ok(TrimMode::Center),
        _ => Err(format!("unknown trim mode: {s}")),
    }
}
