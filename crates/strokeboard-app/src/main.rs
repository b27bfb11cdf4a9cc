//! Replay tool entry point (native).

#[cfg(feature = "native")]
use clap::Parser;
#[cfg(feature = "native")]
use std::path::PathBuf;

/// Command-line arguments for the replay tool.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Parser)]
#[command(name = "strokeboard")]
#[command(about = "Replay a recorded Strokeboard session and export it as SVG")]
#[command(version)]
struct CliArgs {
    /// JSON script with the surface config and input events
    script: PathBuf,

    /// Previously exported document to load before replaying (repeatable)
    #[arg(long = "import", value_name = "SVG")]
    imports: Vec<PathBuf>,

    /// Directory that receives exported.svg
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the keyboard shortcuts and exit
    #[arg(long)]
    shortcuts: bool,
}

#[cfg(feature = "native")]
fn main() -> Result<(), strokeboard_app::ReplayError> {
    use strokeboard_app::{Replayer, Script, ShortcutRegistry, write_document};

    env_logger::init();
    let args = CliArgs::parse();

    if args.shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    log::info!("Replaying {}", args.script.display());
    let script = Script::load(&args.script)?;
    let mut replayer = Replayer::new(script.config.clone());

    for path in &args.imports {
        let count = replayer.import(&std::fs::read_to_string(path)?)?;
        log::info!("Imported {} elements from {}", count, path.display());
    }

    replayer.run(&script);
    let path = write_document(&replayer.export(), &args.out_dir)?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
