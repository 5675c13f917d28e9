use clap::{Parser, Subcommand};
use webmanifest_cli::{
    commands::{
        build::{self, BuildCommand},
        init::{self, InitCommand},
        print::{self, PrintCommand},
        serve::{self, ServeCommand},
    },
    common, CliError, GlobalOpts,
};
use webmanifest_logger as logger;

#[derive(Parser)]
#[command(name = "webmanifest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Web app manifest generator",
    long_about = "Builds the web app manifest from webmanifest.toml, emits it as a build asset and serves it during development."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the manifest payload
    Print(PrintCommand),
    /// Run the build hooks and write the manifest into an output directory
    Build(BuildCommand),
    /// Serve the manifest from a development server
    Serve(ServeCommand),
    /// Create a starter webmanifest.toml
    Init(InitCommand),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(
        cli.global.verbosity_level(),
        cli.global.quiet,
        cli.global.log_file.as_deref(),
    ) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    common::init_tracing();

    let result: Result<(), CliError> = match cli.command {
        Commands::Print(cmd) => print::handle_print(cmd, &cli.global),
        Commands::Build(cmd) => build::handle_build(cmd, &cli.global),
        Commands::Serve(cmd) => serve::handle_serve(cmd, &cli.global),
        Commands::Init(cmd) => init::handle_init(cmd, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&e.to_string());
        logger::show_log_path();
        std::process::exit(1);
    }
}
