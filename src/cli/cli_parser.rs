use crate::cli::{Commands, HELP_TEMPLATE};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(
   // Obtain during build time, not runtime
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
#[command(
    after_help = HELP_TEMPLATE.replace("%BINARY_NAME%", env!("CARGO_PKG_NAME"))
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::try_parse().unwrap_or_else(|e| {
            // A bare invocation gets the full help rather than a one-line usage
            if e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand {
                let mut cmd = Cli::command();
                let full_help = HELP_TEMPLATE.replace("%BINARY_NAME%", cmd.get_name());
                cmd = cmd.after_help(full_help);
                let _ = cmd.print_help();
                eprintln!();
                std::process::exit(1);
            }
            e.exit()
        })
    }
}
