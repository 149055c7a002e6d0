pub mod codec;
pub use codec::{
    bond_counts_from_offsets, counts_from_prefix, offsets_from_bond_counts, prefix_from_counts,
};

mod metadata;
pub use metadata::PartitionMetadata;

mod repartitioner;
pub use repartitioner::{RepartitionOutcome, even_split_counts, repartition, repartition_snapshot};

pub mod segments;
pub use segments::{RankSegment, RankSegments};

mod writer;
pub use writer::write_partition;
