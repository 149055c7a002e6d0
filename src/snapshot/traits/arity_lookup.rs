/// Maps a bond type id to the number of partner ids stored after it in the
/// bond stream.
///
/// The snapshot header carries this table, but the decoder only needs the
/// lookup, so tests and callers with their own tables can supply any
/// implementation.
pub trait ArityLookup {
    /// Returns `None` for unknown bond types.
    fn arity(&self, bond_type: i32) -> Option<usize>;
}

impl ArityLookup for [i32] {
    fn arity(&self, bond_type: i32) -> Option<usize> {
        let index = usize::try_from(bond_type).ok()?;
        self.get(index)
            .and_then(|&arity| usize::try_from(arity).ok())
    }
}

impl ArityLookup for Vec<i32> {
    fn arity(&self, bond_type: i32) -> Option<usize> {
        self.as_slice().arity(bond_type)
    }
}

impl<T: ArityLookup + ?Sized> ArityLookup for &T {
    fn arity(&self, bond_type: i32) -> Option<usize> {
        (**self).arity(bond_type)
    }
}

#[cfg(test)]
mod tests {
    use super::ArityLookup;

    #[test]
    fn slice_lookup_rejects_unknown_and_negative() {
        let table: &[i32] = &[1, 2, -1];
        assert_eq!(table.arity(0), Some(1));
        assert_eq!(table.arity(1), Some(2));
        assert_eq!(table.arity(2), None);
        assert_eq!(table.arity(3), None);
        assert_eq!(table.arity(-1), None);
    }
}
