use std::path::PathBuf;

use anyhow::Result;

pub(crate) fn make_path(s: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(s)?.into_owned();

    Ok(PathBuf::from(expanded))
}
