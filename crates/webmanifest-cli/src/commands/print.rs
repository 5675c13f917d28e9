//! `webmanifest print`: build the manifest and write the payload to stdout

use crate::errors::CliError;
use crate::GlobalOpts;
use clap::Parser;
use webmanifest_core::{ManifestBuilder, Mode, Payload};
use webmanifest_logger as logger;

#[derive(Parser, Debug)]
pub struct PrintCommand {
    /// Mode passed to the transform (development or production)
    #[arg(long, default_value = "production")]
    pub mode: Mode,

    /// Print the ETag instead of the payload
    #[arg(long)]
    pub etag: bool,
}

pub fn handle_print(cmd: PrintCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let options = opts.load_options()?;
    let builder = ManifestBuilder::new(options);
    logger::debug(&format!(
        "Building {} manifest in {}",
        cmd.mode,
        builder.root().display()
    ));

    let payload = render(&builder, cmd.mode)?;
    if cmd.etag {
        println!("{}", payload.etag);
    } else {
        // The payload already ends in a newline
        print!("{}", payload.body);
    }
    Ok(())
}

fn render(builder: &ManifestBuilder, mode: Mode) -> Result<Payload, CliError> {
    let manifest = builder.build(mode)?;
    Ok(Payload::from_manifest(&manifest)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use webmanifest_config::PluginOptions;
    use webmanifest_core::StaticMeta;

    #[test]
    fn test_render_default_manifest() {
        let builder = ManifestBuilder::new(PluginOptions {
            include_build_meta: Some(false),
            ..Default::default()
        })
        .with_meta_source(Arc::new(StaticMeta::default()));

        let Ok(payload) = render(&builder, Mode::Production) else {
            panic!("default manifest failed to render");
        };
        assert!(payload.body.starts_with("{\n  \"lang\": \"en\""));
        assert!(payload.etag.starts_with("W/\""));
    }
}
