use clap::Subcommand;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a snapshot as human-readable blockfile text on stdout
    Decode {
        /// Path prefix shared by the snapshot's files
        #[arg(value_name = "PREFIX")]
        prefix: PathBuf,
    },

    /// Write a copy of a snapshot partitioned for a different number of ranks
    Repartition {
        /// Prefix of the existing snapshot
        #[arg(value_name = "OLD_PREFIX")]
        old_prefix: PathBuf,

        /// Number of ranks the new snapshot is written for
        #[arg(value_name = "NEW_RANK_COUNT")]
        new_rank_count: NonZeroUsize,

        /// Prefix of the new snapshot (none of its files may exist)
        #[arg(value_name = "NEW_PREFIX")]
        new_prefix: PathBuf,

        /// Copy unchanged files instead of hard-linking them
        #[arg(long)]
        copy: bool,
    },

    /// Summarize a snapshot and validate its partition metadata
    Info {
        /// Path prefix shared by the snapshot's files
        #[arg(value_name = "PREFIX")]
        prefix: PathBuf,
    },
}
