use adaptagrams_loader::{Bootstrapper, PlatformSignals, loader::DylibLoader, root::DirRoot};
use std::{env, process::ExitCode};

fn main() -> ExitCode {
    env_logger::init();
    // Installation root holding lib/<platform>/...
    let Some(dir) = env::args_os().nth(1) else {
        eprintln!("usage: load_from_dir <installation-root>");
        return ExitCode::FAILURE;
    };
    let signals = PlatformSignals::from_env();
    println!(
        "os [{}], {}-bit -> {}",
        signals.os(),
        signals.pointer_width(),
        signals.detect()
    );

    let root = DirRoot::new(dir);
    match Bootstrapper::new()
        .signals(signals)
        .load(&root, DylibLoader::new())
    {
        Ok(libs) => {
            for lib in &libs {
                println!("loaded {} from {}", lib.artifact(), lib.location().display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
