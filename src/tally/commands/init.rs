use crate::commands::{CmdMessage, CmdResult, TallyPaths};
use crate::error::Result;
use std::fs;

pub fn run(paths: &TallyPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.data_dir)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized tally store at {}",
        paths.data_dir.display()
    )));
    Ok(result)
}
