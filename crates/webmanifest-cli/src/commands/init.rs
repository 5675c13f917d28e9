use crate::errors::CliError;
use crate::GlobalOpts;
use clap::Parser;
use colored::*;
use std::fs;
use std::path::PathBuf;
use webmanifest_config::DEFAULT_CONFIG_FILE;
use webmanifest_logger as logger;

const OPTIONS_TEMPLATE: &str = r##"# Web app manifest options
# Every key is optional; omitted keys fall back to built-in defaults.

name = "My App"
short_name = "App"
description = "Describe what the app does"
lang = "en"
dir = "ltr"

start_url = "/"
scope = "/"
id = "/"
display = "standalone"
# orientation = "portrait"

theme_color = "#000000"
background_color = "#ffffff"

# categories = ["productivity"]

# Adds pkgVersion, version (from git) and buildTime
include_build_meta = true

# Name of the emitted asset and the dev route
filename = "manifest.json"

# Mirror the manifest into this directory (relative to the project root)
# output_dir = "public"

[[icons]]
src = "/icons/icon-192.png"
sizes = "192x192"
type = "image/png"

[[icons]]
src = "/icons/icon-512.png"
sizes = "512x512"
type = "image/png"

[[icons]]
src = "/icons/maskable-512.png"
sizes = "512x512"
type = "image/png"
purpose = "maskable"

# Members without a dedicated option are copied into the manifest verbatim
# [extra]
# launch_handler = { client_mode = "navigate-existing" }
"##;

#[derive(Parser, Debug)]
pub struct InitCommand {
    /// Options file to create (default: webmanifest.toml)
    pub file: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Write a starter options file
pub fn handle_init(cmd: InitCommand, _opts: &GlobalOpts) -> Result<(), CliError> {
    logger::debug("Handling init command");

    let target = cmd
        .file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if target.exists() && !cmd.force {
        return Err(CliError::AlreadyExists(target.display().to_string()));
    }

    fs::write(&target, OPTIONS_TEMPLATE)?;
    logger::success(&format!("Created options file: {}", target.display()));

    println!();
    println!("Next steps:");
    println!("  1. Edit {} with your app's details", target.display().to_string().bold());
    println!("  2. Preview the manifest: webmanifest print");
    println!("  3. Serve it while developing: webmanifest serve");
    Ok(())
}
