//! Conversions between the stored partition arrays and their per-rank and
//! per-particle count forms.
//!
//! - prefix array `pref[r]` ⇄ per-rank particle counts `ppp[r]`
//! - bond-offset table (rank-local cumulative word counts) ⇄ per-particle
//!   bond word counts in global particle order

use crate::error::{Result, SnapshotError};
use crate::partition::segments::{RankSegments, ensure_table_len};

/// Per-rank particle counts from a prefix array.
///
/// `ppp[r] = pref[r + 1] - pref[r]`, with `pref[R]` taken as
/// `n_total_particles`. Every rank must own at least one particle and the
/// first prefix must be 0.
pub fn counts_from_prefix(pref: &[i32], n_total_particles: usize) -> Result<Vec<usize>> {
    let Some(&first) = pref.first() else {
        return Err(SnapshotError::InvalidPartition {
            rank: 0,
            detail: "prefix array is empty".to_string(),
        });
    };
    if first != 0 {
        return Err(SnapshotError::InvalidPartition {
            rank: 0,
            detail: format!("first prefix is {first} instead of 0"),
        });
    }

    let total = n_total_particles as i64;
    let mut counts = Vec::with_capacity(pref.len());

    for (rank, &start) in pref.iter().enumerate() {
        let end = pref.get(rank + 1).map_or(total, |&next| i64::from(next));
        let count = end - i64::from(start);
        if count <= 0 {
            return Err(SnapshotError::InvalidPartition {
                rank,
                detail: format!("rank owns {count} particles (prefix {start}..{end})"),
            });
        }
        counts.push(count as usize);
    }

    let sum: usize = counts.iter().sum();
    if sum != n_total_particles {
        return Err(SnapshotError::InvalidPartition {
            rank: pref.len() - 1,
            detail: format!("per-rank counts sum to {sum}, expected {n_total_particles}"),
        });
    }

    Ok(counts)
}

/// Prefix array from per-rank counts; the implicit trailing total is dropped.
pub fn prefix_from_counts(counts: &[usize]) -> Result<Vec<i32>> {
    let mut pref = Vec::with_capacity(counts.len());
    let mut running = 0usize;

    for (rank, &count) in counts.iter().enumerate() {
        let start = i32::try_from(running).map_err(|_| SnapshotError::InvalidPartition {
            rank,
            detail: format!("prefix {running} does not fit a 32-bit record"),
        })?;
        pref.push(start);
        running += count;
    }

    Ok(pref)
}

/// Per-particle bond word counts, in global particle order.
///
/// Each rank's segment is located structurally from `counts`, validated, and
/// differenced.
pub fn bond_counts_from_offsets(boff: &[i32], counts: &[usize]) -> Result<Vec<i32>> {
    ensure_table_len(boff, counts)?;

    let mut bond_counts = Vec::with_capacity(boff.len() - counts.len());
    for segment in RankSegments::new(boff, counts.iter().copied()) {
        let segment = segment?;
        segment.validate()?;
        bond_counts.extend(segment.offsets().windows(2).map(|pair| pair[1] - pair[0]));
    }

    Ok(bond_counts)
}

/// Bond-offset table for the partition given by `counts`.
///
/// Each rank gets a segment `[0, c₀, c₀+c₁, …]` over its contiguous slice of
/// `bond_counts`; segments are concatenated in rank order.
pub fn offsets_from_bond_counts(bond_counts: &[i32], counts: &[usize]) -> Result<Vec<i32>> {
    let n_total_particles: usize = counts.iter().sum();
    if bond_counts.len() != n_total_particles {
        return Err(SnapshotError::InvalidPartition {
            rank: counts.len().saturating_sub(1),
            detail: format!(
                "{} bond counts for a partition of {n_total_particles} particles",
                bond_counts.len()
            ),
        });
    }

    let mut boff = Vec::with_capacity(n_total_particles + counts.len());
    let mut first = 0;

    for (rank, &count) in counts.iter().enumerate() {
        let mut running = 0i64;
        boff.push(0);

        for &words in &bond_counts[first..first + count] {
            if words < 0 {
                return Err(SnapshotError::MalformedOffsetTable {
                    rank,
                    index: boff.len(),
                    detail: format!("negative bond word count {words}"),
                });
            }
            running += i64::from(words);
            let offset = i32::try_from(running).map_err(|_| SnapshotError::InvalidPartition {
                rank,
                detail: format!("local bond offset {running} does not fit a 32-bit record"),
            })?;
            boff.push(offset);
        }

        first += count;
    }

    Ok(boff)
}
