//! installkit CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use installkit::cli::{Cli, CommandDispatcher};
use installkit::ui::InstallTheme;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so stdout stays parseable for `--json`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("installkit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("installkit=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("installkit starting with args: {:?}", cli);

    let working_dir = std::env::current_dir().unwrap_or_default();
    let dispatcher = CommandDispatcher::new(working_dir);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = dispatcher.dispatch(&cli, &mut out);
    let _ = out.flush();

    match result {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            let theme = InstallTheme::detect(cli.no_color);
            eprintln!("{}", theme.format_error(&format!("Error: {}", e)));
            ExitCode::from(1)
        }
    }
}
