use crate::error::Result;
use crate::partition::codec::{
    bond_counts_from_offsets, counts_from_prefix, offsets_from_bond_counts, prefix_from_counts,
};
use crate::partition::repartitioner::even_split_counts;
use tracing::info;

/// A validated prefix array and bond-offset table for one rank count.
///
/// Construction checks every invariant once; afterwards the per-rank particle
/// counts and per-particle bond word counts are available without further
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionMetadata {
    pref: Vec<i32>,
    boff: Vec<i32>,
    counts: Vec<usize>,
    bond_counts: Vec<i32>,
}

impl PartitionMetadata {
    pub fn new(pref: Vec<i32>, boff: Vec<i32>, n_total_particles: usize) -> Result<Self> {
        let counts = counts_from_prefix(&pref, n_total_particles)?;
        let bond_counts = bond_counts_from_offsets(&boff, &counts)?;

        Ok(Self {
            pref,
            boff,
            counts,
            bond_counts,
        })
    }

    /// Partition of a snapshot that stores no bonds: every segment is all zeros.
    pub fn without_bonds(pref: Vec<i32>, n_total_particles: usize) -> Result<Self> {
        let counts = counts_from_prefix(&pref, n_total_particles)?;
        Self::from_counts(counts, vec![0; n_total_particles])
    }

    /// Builds both stored arrays from per-rank particle counts and
    /// per-particle bond word counts.
    pub fn from_counts(counts: Vec<usize>, bond_counts: Vec<i32>) -> Result<Self> {
        let pref = prefix_from_counts(&counts)?;
        let boff = offsets_from_bond_counts(&bond_counts, &counts)?;

        Ok(Self {
            pref,
            boff,
            counts,
            bond_counts,
        })
    }

    pub fn rank_count(&self) -> usize {
        self.pref.len()
    }

    pub fn n_total_particles(&self) -> usize {
        self.bond_counts.len()
    }

    /// The stored `.pref` array (`R` entries, total implicit).
    pub fn prefix(&self) -> &[i32] {
        &self.pref
    }

    /// The stored `.boff` array (`P + R` entries).
    pub fn bond_offsets(&self) -> &[i32] {
        &self.boff
    }

    pub fn particle_counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bond_counts(&self) -> &[i32] {
        &self.bond_counts
    }

    pub fn total_bond_words(&self) -> i64 {
        self.bond_counts.iter().map(|&words| i64::from(words)).sum()
    }

    /// Splits the same particles evenly over `new_rank_count` ranks.
    ///
    /// Particle order and per-particle bond word counts are unchanged; only
    /// the rank boundaries move.
    pub fn repartition(&self, new_rank_count: usize) -> Result<Self> {
        let counts = even_split_counts(self.n_total_particles(), new_rank_count)?;
        let repartitioned = Self::from_counts(counts, self.bond_counts.clone())?;

        info!(
            old_ranks = self.rank_count(),
            new_ranks = repartitioned.rank_count(),
            particles = self.n_total_particles(),
            bond_words = self.total_bond_words(),
            "repartitioned metadata"
        );

        Ok(repartitioned)
    }
}
