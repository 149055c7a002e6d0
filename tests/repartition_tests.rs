mod common;

#[cfg(test)]
mod tests {
    use crate::common::{all_paths, chain_fixture, read_i32s, two_rank_fixture};
    use mpiio_snapshot::{
        FileKind, PassThrough, RepartitionOutcome, SnapshotError, SnapshotPaths, repartition,
        repartition_snapshot,
    };
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_split_two_ranks_into_four() {
        let meta = repartition(&[0, 2], &[0, 1, 1, 0, 2, 2], 4, 4).unwrap();

        assert_eq!(meta.prefix(), &[0, 1, 2, 3]);
        assert_eq!(meta.bond_offsets(), &[0, 1, 0, 0, 0, 2, 0, 0]);
    }

    #[test]
    fn test_merge_four_ranks_back_into_two() {
        let meta = repartition(&[0, 1, 2, 3], &[0, 1, 0, 0, 0, 2, 0, 0], 4, 2).unwrap();

        assert_eq!(meta.prefix(), &[0, 2]);
        assert_eq!(meta.bond_offsets(), &[0, 1, 1, 0, 2, 2]);
    }

    #[test]
    fn test_repartition_to_same_rank_count_is_identity() {
        let pref = [0, 3];
        let boff = [0, 2, 4, 6, 0, 2, 4, 4];
        let meta = repartition(&pref, &boff, 6, 2).unwrap();

        assert_eq!(meta.prefix(), &pref);
        assert_eq!(meta.bond_offsets(), &boff);
    }

    #[test]
    fn test_repartition_preserves_bond_words_and_order() {
        let old = repartition(&[0, 3], &[0, 2, 4, 6, 0, 2, 4, 4], 6, 2).unwrap();
        let new = old.repartition(3).unwrap();

        assert_eq!(new.prefix(), &[0, 2, 4]);
        assert_eq!(new.bond_offsets(), &[0, 2, 4, 0, 2, 4, 0, 2, 2]);
        assert_eq!(new.total_bond_words(), old.total_bond_words());
        assert_eq!(new.bond_counts(), old.bond_counts());
    }

    #[test]
    fn test_more_ranks_than_particles_is_rejected() {
        let err = repartition(&[0, 2], &[0, 1, 1, 0, 2, 2], 4, 5).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidPartition { .. }));
    }

    #[test]
    fn test_malformed_old_table_is_rejected() {
        let err = repartition(&[0, 2], &[0, 2, 1, 0, 2, 2], 4, 4).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MalformedOffsetTable { rank: 0, index: 2, .. }
        ));
    }

    #[test]
    fn test_repartition_snapshot_writes_new_family() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = two_rank_fixture().write(dir.path(), "snap");
        let new = SnapshotPaths::new(dir.path().join("snap-4"));

        let outcome = repartition_snapshot(&old, 4, &new, PassThrough::Link).unwrap();
        assert_eq!(
            outcome,
            RepartitionOutcome::Written {
                old_rank_count: 2,
                new_rank_count: 4,
                passed_through: vec![FileKind::Head, FileKind::Id, FileKind::Bond],
            }
        );

        assert_eq!(read_i32s(&new.path(FileKind::Pref)), vec![0, 1, 2, 3]);
        assert_eq!(
            read_i32s(&new.path(FileKind::Boff)),
            vec![0, 1, 0, 0, 0, 2, 0, 0]
        );
        for kind in [FileKind::Head, FileKind::Id, FileKind::Bond] {
            assert_eq!(
                fs::read(new.path(kind)).unwrap(),
                fs::read(old.path(kind)).unwrap(),
                "{kind} differs"
            );
        }
        assert!(!new.is_present(FileKind::Pos));

        // The source family is untouched.
        assert_eq!(read_i32s(&old.path(FileKind::Pref)), vec![0, 2]);
        assert_eq!(
            read_i32s(&old.path(FileKind::Boff)),
            vec![0, 1, 1, 0, 2, 2]
        );
    }

    #[test]
    fn test_repartition_snapshot_copies_optional_members() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = chain_fixture()
            .with_types(vec![1; 6])
            .with_positions((0..18).map(|i| i as f64).collect())
            .write(dir.path(), "chain");
        let new = SnapshotPaths::new(dir.path().join("chain-3"));

        let outcome = repartition_snapshot(&old, 3, &new, PassThrough::Copy).unwrap();
        let RepartitionOutcome::Written { passed_through, .. } = outcome else {
            panic!("Expected a written snapshot, got {outcome:?}");
        };
        assert_eq!(
            passed_through,
            vec![
                FileKind::Head,
                FileKind::Id,
                FileKind::Type,
                FileKind::Pos,
                FileKind::Bond
            ]
        );

        assert_eq!(read_i32s(&new.path(FileKind::Pref)), vec![0, 2, 4]);
        assert_eq!(
            read_i32s(&new.path(FileKind::Boff)),
            vec![0, 2, 4, 0, 2, 4, 0, 2, 2]
        );
        assert_eq!(
            fs::read(new.path(FileKind::Pos)).unwrap(),
            fs::read(old.path(FileKind::Pos)).unwrap()
        );
    }

    #[test]
    fn test_same_rank_count_writes_nothing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = two_rank_fixture().write(dir.path(), "snap");
        let new = SnapshotPaths::new(dir.path().join("snap-2"));

        let outcome = repartition_snapshot(&old, 2, &new, PassThrough::Link).unwrap();
        assert_eq!(
            outcome,
            RepartitionOutcome::AlreadyPartitioned { rank_count: 2 }
        );
        assert!(all_paths(&new).iter().all(|path| !path.exists()));
    }

    #[test]
    fn test_existing_destination_is_never_overwritten() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = two_rank_fixture().write(dir.path(), "snap");
        let new = SnapshotPaths::new(dir.path().join("snap-4"));
        fs::write(new.path(FileKind::Id), b"keep").unwrap();

        let err = repartition_snapshot(&old, 4, &new, PassThrough::Link).unwrap_err();
        match err {
            SnapshotError::AlreadyExists { path } => assert_eq!(path, new.path(FileKind::Id)),
            other => panic!("Expected AlreadyExists, got {other:?}"),
        }

        assert_eq!(fs::read(new.path(FileKind::Id)).unwrap(), b"keep");
        assert!(!new.path(FileKind::Pref).exists());
        assert!(!new.path(FileKind::Boff).exists());
    }

    #[test]
    fn test_missing_required_source_is_reported() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = two_rank_fixture().write(dir.path(), "snap");
        fs::remove_file(old.path(FileKind::Bond)).unwrap();
        let new = SnapshotPaths::new(dir.path().join("snap-4"));

        let err = repartition_snapshot(&old, 4, &new, PassThrough::Link).unwrap_err();
        match err {
            SnapshotError::Missing { path } => assert_eq!(path, old.path(FileKind::Bond)),
            other => panic!("Expected Missing, got {other:?}"),
        }
        assert!(all_paths(&new).iter().all(|path| !path.exists()));
    }

    #[test]
    fn test_malformed_snapshot_leaves_no_output() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = two_rank_fixture()
            .with_bonds(vec![0, 1, 1, 0, 2, 1], vec![0, 1, 103])
            .write(dir.path(), "snap");
        let new = SnapshotPaths::new(dir.path().join("snap-4"));

        let err = repartition_snapshot(&old, 4, &new, PassThrough::Link).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::MalformedOffsetTable { rank: 1, .. }
        ));
        assert!(all_paths(&new).iter().all(|path| !path.exists()));
    }

    #[test]
    fn test_too_many_ranks_leaves_no_output() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = two_rank_fixture().write(dir.path(), "snap");
        let new = SnapshotPaths::new(dir.path().join("snap-8"));

        let err = repartition_snapshot(&old, 8, &new, PassThrough::Link).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidPartition { .. }));
        assert!(all_paths(&new).iter().all(|path| !path.exists()));
    }

    #[test]
    fn test_offset_table_of_wrong_length_is_shape_mismatch() {
        let dir = tempdir().expect("Failed to create temp dir");
        let old = two_rank_fixture()
            .with_bonds(vec![0, 1, 1, 0, 2], vec![0, 1, 103])
            .write(dir.path(), "snap");
        let new = SnapshotPaths::new(dir.path().join("snap-4"));

        let err = repartition_snapshot(&old, 4, &new, PassThrough::Link).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::ShapeMismatch {
                expected: 6,
                found: 5,
                ..
            }
        ));
    }
}
