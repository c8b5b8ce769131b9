mod block;
mod cli;
mod config;
mod course;
mod nav;
mod outline;
mod store;
mod trim;
mod util;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser as _;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

use crate::{block::CourseNavBlock, config::BlockConfigBuilder};

/// Instance id a bare CLI run stands in for; a hosting page supplies real ids.
const CLI_INSTANCE_ID: u64 = 1;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Args::parse();

    match cli.command {
        Command::Render {
            course,
            outline,
            title,
            expansion_limit,
            trim_mode,
            trim_length,
        } => {
            let store = store::load_course(util::make_path(&course)?)?;

            let mut builder = BlockConfigBuilder::default();
            builder.trim_mode(trim_mode).trim_length(trim_length);
            if let Some(title) = title {
                builder.title(title);
            }
            if let Some(limit) = expansion_limit {
                builder.expansion_limit(limit);
            }
            if let Some(path) = outline {
                let text = read_outline(&path)?;
                let entries = outline::parse_outline(&text);
                builder
                    .use_hierarchy(true)
                    .hierarchy(outline::canonical_string(&entries));
            }

            let block = CourseNavBlock::new(CLI_INSTANCE_ID, builder.build()?);
            let graph = store.navigation();
            if let Some(content) = block.content(&graph, store.course_id())? {
                println!("{}", content.title);
                print!("{}", content.tree);
                if !content.expandable.is_empty() {
                    println!();
                    println!("expandable ({}):", content.expansion_key);
                    for node in &content.expandable {
                        println!("  {} {}", node.node_type, node.key);
                    }
                }
            }
        }
        Command::Template { course, outline } => {
            let store = store::load_course(util::make_path(&course)?)?;

            let mut builder = BlockConfigBuilder::default();
            if let Some(path) = outline {
                let text = read_outline(&path)?;
                let entries = outline::parse_outline(&text);
                builder
                    .use_hierarchy(true)
                    .hierarchy(outline::canonical_string(&entries));
            }

            let block = CourseNavBlock::new(CLI_INSTANCE_ID, builder.build()?);
            let graph = store.navigation();
            if let Some(course_node) = course::find_course_node(&graph, store.course_id()) {
                print!("{}", block.outline_text(course_node));
            }
        }
        Command::Commit {
            course,
            outline,
            update_names,
            update_order,
        } => {
            let mut store = store::load_course(util::make_path(&course)?)?;
            let text = read_outline(&outline)?;

            let config = BlockConfigBuilder::default()
                .use_hierarchy(true)
                .update_names(update_names)
                .update_order(update_order)
                .build()?;
            let block = CourseNavBlock::new(CLI_INSTANCE_ID, config);

            let outcome = block.apply_edit(&text, &mut store)?;
            if outcome.refresh_needed {
                eprintln!("course data updated; caches should be rebuilt");
                for section in store.sections() {
                    eprintln!("  {} {}|{}", section.position, section.id, section.name);
                }
            }
            println!("{}", outcome.hierarchy);
        }
    }

    Ok(())
}

fn read_outline(path: &str) -> Result<String> {
    let path = util::make_path(path)?;
    fs::read_to_string(&path)
        .with_context(|| format!("unable to read outline file {}", path.display()))
}
