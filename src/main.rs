use mpiio_snapshot::cli::{Cli, execute_command};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();

    // stdout carries blockfile text, so all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = execute_command(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
