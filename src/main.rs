use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qrcomm::{shell::FAREWELL, Config, Shell};

fn main() -> ExitCode {
    init_tracing();
    let config = Config::parse();
    tracing::debug!(?config, "starting");

    // Ctrl-C leaves like option 0 does instead of dying mid-prompt
    if let Err(e) = ctrlc::set_handler(|| {
        println!("\n{FAREWELL}");
        std::process::exit(0);
    }) {
        tracing::warn!(error = %e, "could not install interrupt handler");
    }

    // Stdout stays unlocked so the interrupt handler can still print
    let mut shell = match Shell::new(io::stdin().lock(), io::stdout(), config) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("qrcomm: {e}");
            return ExitCode::FAILURE;
        }
    };

    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("qrcomm: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
