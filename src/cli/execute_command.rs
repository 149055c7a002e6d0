use crate::cli::{Cli, Commands};
use crate::decode::write_blockfile;
use crate::error::Result;
use crate::partition::{RepartitionOutcome, repartition_snapshot};
use crate::snapshot::{Snapshot, SnapshotPaths, SnapshotSummary};
use crate::utils::{PassThrough, format_bytes};
use std::io::{self, BufWriter};

/// Executes a parsed command line.
///
/// `decode` writes blockfile text to stdout, `repartition` writes a new
/// snapshot family and `info` prints a summary table. Diagnostics go through
/// `tracing` on stderr; failures are returned to `main`.
pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Decode { prefix } => {
            let snapshot = Snapshot::open(&SnapshotPaths::new(prefix))?;

            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_blockfile(&snapshot, &mut out)?;
        }

        Commands::Repartition {
            old_prefix,
            new_rank_count,
            new_prefix,
            copy,
        } => {
            let mode = if *copy {
                PassThrough::Copy
            } else {
                PassThrough::Link
            };

            let outcome = repartition_snapshot(
                &SnapshotPaths::new(old_prefix),
                new_rank_count.get(),
                &SnapshotPaths::new(new_prefix),
                mode,
            )?;

            match outcome {
                RepartitionOutcome::AlreadyPartitioned { rank_count } => {
                    eprintln!(
                        "Input snapshot is already for {} ranks; nothing written.",
                        rank_count
                    );
                }
                RepartitionOutcome::Written {
                    old_rank_count,
                    new_rank_count,
                    passed_through,
                } => {
                    let carried: Vec<String> =
                        passed_through.iter().map(ToString::to_string).collect();
                    println!(
                        "Repartitioned {:?} from {} to {} ranks into {:?} (carried over: {})",
                        old_prefix,
                        old_rank_count,
                        new_rank_count,
                        new_prefix,
                        carried.join(" ")
                    );
                }
            }
        }

        Commands::Info { prefix } => {
            let summary = SnapshotSummary::collect(&SnapshotPaths::new(prefix))?;
            let present: Vec<String> = summary.present.iter().map(ToString::to_string).collect();

            println!("\n{:=^50}", " SNAPSHOT INFO ");
            println!("{:<25} {:?}", "PREFIX:", summary.prefix);
            println!("{:-<50}", ""); // Separator

            println!("{:<25} {}", "RANKS:", summary.rank_count);
            println!("{:<25} {}", "PARTICLES:", summary.n_total_particles);
            println!(
                "{:<25} {} .. {}",
                "PARTICLES PER RANK:",
                summary.min_particles_per_rank,
                summary.max_particles_per_rank
            );
            println!("{:<25} {}", "BOND WORDS:", summary.n_total_bond_words);
            println!(
                "{:<25} {}",
                "BONDED IA TYPES:", summary.bonded_interaction_types
            );
            println!("{:<25} {}", "FILES:", present.join(" "));
            println!("{:<25} {}", "TOTAL SIZE:", format_bytes(summary.total_bytes));
            println!("{:<25} VALID", "PARTITION:");

            println!("{:=<50}", ""); // Footer
        }
    }

    Ok(())
}
