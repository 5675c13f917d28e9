//! `webmanifest build`: run the build hooks against an output directory

use crate::errors::CliError;
use crate::GlobalOpts;
use clap::Parser;
use std::path::PathBuf;
use webmanifest_core::Mode;
use webmanifest_logger as logger;
use webmanifest_plugin::{BuildPlugin, DirectoryEmitter, HostConfig, ManifestPlugin};

#[derive(Parser, Debug)]
pub struct BuildCommand {
    /// Directory receiving the emitted manifest
    #[arg(short, long, value_name = "DIR", default_value = "dist")]
    pub out_dir: PathBuf,
}

pub fn handle_build(cmd: BuildCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let options = opts.load_options()?;
    let mut plugin = ManifestPlugin::new(options);

    let root = std::env::current_dir()?;
    plugin.config_resolved(&HostConfig {
        root,
        mode: Mode::Production,
    });

    logger::step(&format!("Building {}", plugin.builder().options().filename()));
    plugin.build_start()?;

    let mut emitter = DirectoryEmitter::new(&cmd.out_dir);
    plugin.generate_bundle(&mut emitter)?;
    for path in emitter.written() {
        logger::success(&format!("Wrote {}", path.display()));
    }

    if let Some(task) = plugin.take_mirror_task() {
        let path = task.path().to_path_buf();
        if task.join()? {
            logger::success(&format!("Mirrored to {}", path.display()));
        } else {
            logger::info(&format!("{} is up to date", path.display()));
        }
    }
    Ok(())
}
