#![allow(dead_code)]

use mpiio_snapshot::{FileKind, SnapshotHeader, SnapshotPaths};
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory description of a snapshot family, written with native byte order.
#[derive(Debug, Clone)]
pub struct SnapshotFixture {
    pub arities: Vec<i32>,
    pub pref: Vec<i32>,
    pub ids: Vec<i32>,
    pub types: Option<Vec<i32>>,
    pub positions: Option<Vec<f64>>,
    pub velocities: Option<Vec<f64>>,
    pub boff: Option<Vec<i32>>,
    pub bonds: Option<Vec<i32>>,
}

impl SnapshotFixture {
    pub fn new(pref: Vec<i32>, ids: Vec<i32>) -> Self {
        Self {
            arities: Vec::new(),
            pref,
            ids,
            types: None,
            positions: None,
            velocities: None,
            boff: None,
            bonds: None,
        }
    }

    pub fn with_arities(mut self, arities: Vec<i32>) -> Self {
        self.arities = arities;
        self
    }

    pub fn with_bonds(mut self, boff: Vec<i32>, bonds: Vec<i32>) -> Self {
        self.boff = Some(boff);
        self.bonds = Some(bonds);
        self
    }

    pub fn with_types(mut self, types: Vec<i32>) -> Self {
        self.types = Some(types);
        self
    }

    pub fn with_positions(mut self, positions: Vec<f64>) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn with_velocities(mut self, velocities: Vec<f64>) -> Self {
        self.velocities = Some(velocities);
        self
    }

    /// Writes every present member under `dir/name`.
    pub fn write(&self, dir: &Path, name: &str) -> SnapshotPaths {
        let paths = SnapshotPaths::new(dir.join(name));

        SnapshotHeader::new(0, self.arities.clone())
            .write(&paths.path(FileKind::Head))
            .expect("Failed to write header");

        write_raw(&paths.path(FileKind::Pref), bytemuck::cast_slice(&self.pref));
        write_raw(&paths.path(FileKind::Id), bytemuck::cast_slice(&self.ids));
        if let Some(types) = &self.types {
            write_raw(&paths.path(FileKind::Type), bytemuck::cast_slice(types));
        }
        if let Some(positions) = &self.positions {
            write_raw(&paths.path(FileKind::Pos), bytemuck::cast_slice(positions));
        }
        if let Some(velocities) = &self.velocities {
            write_raw(&paths.path(FileKind::Vel), bytemuck::cast_slice(velocities));
        }
        if let Some(boff) = &self.boff {
            write_raw(&paths.path(FileKind::Boff), bytemuck::cast_slice(boff));
        }
        if let Some(bonds) = &self.bonds {
            write_raw(&paths.path(FileKind::Bond), bytemuck::cast_slice(bonds));
        }

        paths
    }
}

fn write_raw(path: &Path, bytes: &[u8]) {
    fs::write(path, bytes).unwrap_or_else(|e| panic!("Failed to write {}: {e}", path.display()));
}

pub fn read_i32s(path: &Path) -> Vec<i32> {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    bytes
        .chunks_exact(4)
        .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Four particles on two ranks with per-particle bond words `[1, 0, 2, 0]`.
///
/// Type 0 has no partners, type 1 has one.
pub fn two_rank_fixture() -> SnapshotFixture {
    SnapshotFixture::new(vec![0, 2], vec![100, 101, 102, 103])
        .with_arities(vec![0, 1])
        .with_bonds(vec![0, 1, 1, 0, 2, 2], vec![0, 1, 103])
}

/// Six particles on two ranks; particle `i` bonds to `i + 1` with type 0
/// (one partner), except the last particle.
pub fn chain_fixture() -> SnapshotFixture {
    SnapshotFixture::new(vec![0, 3], (10..16).collect())
        .with_arities(vec![1])
        .with_bonds(
            vec![0, 2, 4, 6, 0, 2, 4, 4],
            vec![0, 11, 0, 12, 0, 13, 0, 14, 0, 15],
        )
}

pub fn all_paths(paths: &SnapshotPaths) -> Vec<PathBuf> {
    FileKind::ALL.iter().map(|&kind| paths.path(kind)).collect()
}
