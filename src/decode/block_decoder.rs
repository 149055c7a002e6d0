use crate::decode::{BondRecord, BondRecords};
use crate::error::{Result, SnapshotError};
use crate::partition::counts_from_prefix;
use crate::partition::segments::{RankSegment, ensure_table_len};
use crate::snapshot::traits::ArityLookup;
use crate::snapshot::{FileKind, ParticleFields, ParticlePayload, SnapshotDescriptor};
use std::ops::Range;
use std::path::PathBuf;

/// One particle as seen by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedParticle<'a> {
    pub rank: usize,
    /// Position in global particle order.
    pub index: usize,
    pub fields: ParticleFields,
    /// `None` when the snapshot carries no bond-offset table.
    pub bonds: Option<Vec<BondRecord<'a>>>,
}

impl DecodedParticle<'_> {
    pub fn id(&self) -> i32 {
        self.fields.id
    }
}

/// A rank's bond-offset segment paired with the flat bond stream.
///
/// Offsets in the segment are rank-local; `base` is the number of bond words
/// written by all lower ranks and turns them into stream positions.
#[derive(Debug, Clone, Copy)]
pub struct RankBonds<'a> {
    segment: RankSegment<'a>,
    base: usize,
    stream: &'a [i32],
}

impl<'a> RankBonds<'a> {
    pub fn segment(&self) -> &RankSegment<'a> {
        &self.segment
    }

    /// Stream position of this rank's first bond word.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Stream positions holding the bonds of the rank's `local`-th particle.
    pub fn stream_range(&self, local: usize) -> Range<usize> {
        let words = self.segment.particle_words(local);
        self.base + words.start..self.base + words.end
    }

    /// Decodes the bond records of the rank's `local`-th particle.
    pub fn decode_particle<A: ArityLookup + ?Sized>(
        &self,
        local: usize,
        particle_id: i32,
        arity: &'a A,
    ) -> Result<Vec<BondRecord<'a>>> {
        let range = self.stream_range(local);
        let words = self.stream.get(range.clone()).ok_or_else(|| {
            SnapshotError::CorruptBondStream {
                rank: self.segment.rank(),
                particle_id,
                offset: range.end,
                detail: format!(
                    "offset table points past the end of the {}-word bond stream",
                    self.stream.len()
                ),
            }
        })?;

        BondRecords::new(words, range.start, self.segment.rank(), particle_id, arity).collect()
    }
}

/// Decodes a snapshot rank by rank.
///
/// Yields one [`RankBlock`] per rank in ascending order. The stream position
/// of each rank's bonds is the running total of the bond words of all lower
/// ranks, so blocks must be consumed in order; the decoder is single-pass and
/// stops after the first error.
pub struct BlockDecoder<'a, A: ?Sized> {
    payload: &'a ParticlePayload,
    boff: Option<&'a [i32]>,
    stream: &'a [i32],
    arity: &'a A,
    counts: Vec<usize>,
    rank: usize,
    first_particle: usize,
    bond_base: usize,
    failed: bool,
}

impl<'a, A: ArityLookup + ?Sized> BlockDecoder<'a, A> {
    pub fn new(
        descriptor: &'a SnapshotDescriptor,
        payload: &'a ParticlePayload,
        arity: &'a A,
    ) -> Result<Self> {
        let counts = counts_from_prefix(descriptor.prefix(), descriptor.n_total_particles())?;

        if payload.len() != descriptor.n_total_particles() {
            return Err(SnapshotError::ShapeMismatch {
                path: PathBuf::from(FileKind::Id.to_string()),
                expected: descriptor.n_total_particles(),
                found: payload.len(),
            });
        }

        let boff = descriptor.bond_offsets();
        if let Some(table) = boff {
            ensure_table_len(table, &counts)?;
        }

        Ok(Self {
            payload,
            boff,
            stream: payload.bonds().unwrap_or(&[]),
            arity,
            counts,
            rank: 0,
            first_particle: 0,
            bond_base: 0,
            failed: false,
        })
    }

    pub fn rank_count(&self) -> usize {
        self.counts.len()
    }

    /// Flattens the remaining blocks into one particle sequence.
    pub fn particles(self) -> DecodedParticles<'a, A> {
        DecodedParticles {
            blocks: self,
            current: None,
            done: false,
        }
    }

    fn rank_bonds(
        &mut self,
        table: &'a [i32],
        rank: usize,
        first_particle: usize,
        count: usize,
    ) -> Result<RankBonds<'a>> {
        let segment = RankSegment::locate(table, rank, first_particle, count)?;
        segment.validate()?;

        let base = self.bond_base;
        self.bond_base = base + segment.total_words();

        Ok(RankBonds {
            segment,
            base,
            stream: self.stream,
        })
    }
}

impl<'a, A: ArityLookup + ?Sized> Iterator for BlockDecoder<'a, A> {
    type Item = Result<RankBlock<'a, A>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let rank = self.rank;
        let count = *self.counts.get(rank)?;
        let first_particle = self.first_particle;
        self.rank += 1;
        self.first_particle += count;

        let bonds = match self.boff {
            Some(table) => match self.rank_bonds(table, rank, first_particle, count) {
                Ok(bonds) => Some(bonds),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            },
            None => None,
        };

        Some(Ok(RankBlock {
            rank,
            first_particle,
            particle_count: count,
            bonds,
            payload: self.payload,
            arity: self.arity,
        }))
    }
}

/// The particles owned by one rank, with their bonds resolved against the
/// global bond stream.
pub struct RankBlock<'a, A: ?Sized> {
    rank: usize,
    first_particle: usize,
    particle_count: usize,
    bonds: Option<RankBonds<'a>>,
    payload: &'a ParticlePayload,
    arity: &'a A,
}

impl<'a, A: ArityLookup + ?Sized> RankBlock<'a, A> {
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Global indices of the rank's particles.
    pub fn particle_range(&self) -> Range<usize> {
        self.first_particle..self.first_particle + self.particle_count
    }

    pub fn bonds(&self) -> Option<&RankBonds<'a>> {
        self.bonds.as_ref()
    }

    pub fn particles(&self) -> RankParticles<'a, A> {
        RankParticles {
            rank: self.rank,
            first_particle: self.first_particle,
            particle_count: self.particle_count,
            bonds: self.bonds,
            payload: self.payload,
            arity: self.arity,
            local: 0,
            failed: false,
        }
    }
}

/// Particles of one [`RankBlock`] in ascending id order.
pub struct RankParticles<'a, A: ?Sized> {
    rank: usize,
    first_particle: usize,
    particle_count: usize,
    bonds: Option<RankBonds<'a>>,
    payload: &'a ParticlePayload,
    arity: &'a A,
    local: usize,
    failed: bool,
}

impl<'a, A: ArityLookup + ?Sized> Iterator for RankParticles<'a, A> {
    type Item = Result<DecodedParticle<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.local >= self.particle_count {
            return None;
        }

        let local = self.local;
        self.local += 1;
        let index = self.first_particle + local;
        let fields = self.payload.fields(index)?;

        let bonds = match &self.bonds {
            Some(rank_bonds) => match rank_bonds.decode_particle(local, fields.id, self.arity) {
                Ok(records) => Some(records),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            },
            None => None,
        };

        Some(Ok(DecodedParticle {
            rank: self.rank,
            index,
            fields,
            bonds,
        }))
    }
}

/// Every particle of a snapshot, rank-ascending then id-ascending.
pub struct DecodedParticles<'a, A: ?Sized> {
    blocks: BlockDecoder<'a, A>,
    current: Option<RankParticles<'a, A>>,
    done: bool,
}

impl<'a, A: ArityLookup + ?Sized> Iterator for DecodedParticles<'a, A> {
    type Item = Result<DecodedParticle<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Some(item) = self.current.as_mut().and_then(|particles| particles.next()) {
                self.done = item.is_err();
                return Some(item);
            }

            match self.blocks.next()? {
                Ok(block) => self.current = Some(block.particles()),
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
