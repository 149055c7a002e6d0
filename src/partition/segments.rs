use crate::error::{Result, SnapshotError};
use std::ops::Range;

/// One rank's local segment of a bond-offset table.
///
/// A rank owning `n` particles contributes `n + 1` entries: a cumulative count
/// of bond words starting at 0. Segments are located purely from the
/// per-rank particle counts; values are never compared across a rank
/// boundary, because a segment restart and a rank with no trailing bonds look
/// alike by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSegment<'a> {
    rank: usize,
    first_particle: usize,
    table_offset: usize,
    offsets: &'a [i32],
}

impl<'a> RankSegment<'a> {
    /// Locates the segment of `rank`, whose first particle has global index
    /// `first_particle` and which owns `particle_count` particles.
    ///
    /// Segment `r` starts at `Σ_{i<r} (count_i + 1) = first_particle + r`.
    pub fn locate(
        table: &'a [i32],
        rank: usize,
        first_particle: usize,
        particle_count: usize,
    ) -> Result<Self> {
        let table_offset = first_particle + rank;
        let end = table_offset + particle_count + 1;

        let offsets = table
            .get(table_offset..end)
            .ok_or_else(|| SnapshotError::MalformedOffsetTable {
                rank,
                index: table.len(),
                detail: format!("segment needs entries {table_offset}..{end}, table ends early"),
            })?;

        Ok(Self {
            rank,
            first_particle,
            table_offset,
            offsets,
        })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn first_particle(&self) -> usize {
        self.first_particle
    }

    /// Index of this segment's first entry in the whole table.
    pub fn table_offset(&self) -> usize {
        self.table_offset
    }

    pub fn offsets(&self) -> &'a [i32] {
        self.offsets
    }

    pub fn particle_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Global particle indices owned by this rank.
    pub fn particles(&self) -> Range<usize> {
        self.first_particle..self.first_particle + self.particle_count()
    }

    /// Checks that the segment starts at 0 and never decreases.
    ///
    /// A segment starting at 0 also guarantees that the previous rank's
    /// trailing entry is not below this rank's leading entry.
    pub fn validate(&self) -> Result<()> {
        if self.offsets[0] != 0 {
            return Err(SnapshotError::MalformedOffsetTable {
                rank: self.rank,
                index: self.table_offset,
                detail: format!("segment starts at {} instead of 0", self.offsets[0]),
            });
        }

        for (i, pair) in self.offsets.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(SnapshotError::MalformedOffsetTable {
                    rank: self.rank,
                    index: self.table_offset + i + 1,
                    detail: format!("offset {} follows larger offset {}", pair[1], pair[0]),
                });
            }
        }

        Ok(())
    }

    /// Total bond words contributed by this rank (the trailing entry).
    ///
    /// Only meaningful after [`validate`](Self::validate).
    pub fn total_words(&self) -> usize {
        self.offsets[self.offsets.len() - 1] as usize
    }

    /// Rank-local word range of the particle at local index `local`.
    ///
    /// Only meaningful after [`validate`](Self::validate).
    pub fn particle_words(&self, local: usize) -> Range<usize> {
        self.offsets[local] as usize..self.offsets[local + 1] as usize
    }
}

/// Walks the segments of a bond-offset table in rank order.
pub struct RankSegments<'a, I> {
    table: &'a [i32],
    counts: I,
    rank: usize,
    first_particle: usize,
}

impl<'a, I> RankSegments<'a, I>
where
    I: Iterator<Item = usize>,
{
    pub fn new(table: &'a [i32], counts: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            table,
            counts: counts.into_iter(),
            rank: 0,
            first_particle: 0,
        }
    }
}

impl<'a, I> Iterator for RankSegments<'a, I>
where
    I: Iterator<Item = usize>,
{
    type Item = Result<RankSegment<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let count = self.counts.next()?;
        let segment = RankSegment::locate(self.table, self.rank, self.first_particle, count);

        self.rank += 1;
        self.first_particle += count;

        Some(segment)
    }
}

/// Fails unless `table` holds exactly one entry per particle plus one per rank.
pub fn ensure_table_len(table: &[i32], counts: &[usize]) -> Result<()> {
    let expected = counts.iter().sum::<usize>() + counts.len();
    if table.len() != expected {
        return Err(SnapshotError::MalformedOffsetTable {
            rank: counts.len().saturating_sub(1),
            index: table.len(),
            detail: format!("expected {expected} entries (particles + ranks)"),
        });
    }
    Ok(())
}
