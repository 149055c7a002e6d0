use crate::error::{Result, SnapshotError};
use crate::snapshot::traits::ArityLookup;

/// One decoded bond: its type id and the partner particle ids that follow it
/// in the bond stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondRecord<'a> {
    pub bond_type: i32,
    pub partners: &'a [i32],
}

/// Parses the bond words of one particle into [`BondRecord`]s.
///
/// Each record is a bond type id followed by as many partner ids as its
/// arity. A record that would extend past the particle's word range, or whose
/// type has no known arity, ends the iteration with
/// [`SnapshotError::CorruptBondStream`].
pub struct BondRecords<'a, A: ?Sized> {
    words: &'a [i32],
    cursor: usize,
    stream_offset: usize,
    rank: usize,
    particle_id: i32,
    arity: &'a A,
}

impl<'a, A: ArityLookup + ?Sized> BondRecords<'a, A> {
    /// `stream_offset` is the global position of `words[0]` in the bond
    /// stream and is only used for error context.
    pub fn new(
        words: &'a [i32],
        stream_offset: usize,
        rank: usize,
        particle_id: i32,
        arity: &'a A,
    ) -> Self {
        Self {
            words,
            cursor: 0,
            stream_offset,
            rank,
            particle_id,
            arity,
        }
    }

    fn corrupt(&mut self, at: usize, detail: String) -> SnapshotError {
        self.cursor = self.words.len();
        SnapshotError::CorruptBondStream {
            rank: self.rank,
            particle_id: self.particle_id,
            offset: self.stream_offset + at,
            detail,
        }
    }
}

impl<'a, A: ArityLookup + ?Sized> Iterator for BondRecords<'a, A> {
    type Item = Result<BondRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let at = self.cursor;
        let &bond_type = self.words.get(at)?;

        let Some(arity) = self.arity.arity(bond_type) else {
            return Some(Err(self.corrupt(at, format!("unknown bond type {bond_type}"))));
        };

        let end = at + 1 + arity;
        if end > self.words.len() {
            let remaining = self.words.len() - at - 1;
            return Some(Err(self.corrupt(
                at,
                format!(
                    "bond type {bond_type} needs {arity} partners but only {remaining} words remain in the particle's range"
                ),
            )));
        }

        self.cursor = end;
        Some(Ok(BondRecord {
            bond_type,
            partners: &self.words[at + 1..end],
        }))
    }
}
