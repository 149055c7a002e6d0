use crate::error::Result;
use crate::snapshot::constants::VECTOR_COMPONENTS;
use crate::snapshot::raw_array::{ensure_len, read_f64_array, read_i32_array};
use crate::snapshot::{FileKind, SnapshotPaths};

/// Per-particle fields of one particle, in global id order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFields {
    pub id: i32,
    pub type_id: Option<i32>,
    pub position: Option<[f64; VECTOR_COMPONENTS]>,
    pub velocity: Option<[f64; VECTOR_COMPONENTS]>,
}

/// The rank-independent arrays of a snapshot.
///
/// Positions, velocities and types are opaque payload: they are sliced per
/// particle but never interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticlePayload {
    ids: Vec<i32>,
    types: Option<Vec<i32>>,
    positions: Option<Vec<f64>>,
    velocities: Option<Vec<f64>>,
    bonds: Option<Vec<i32>>,
}

impl ParticlePayload {
    pub fn new(ids: Vec<i32>) -> Self {
        Self {
            ids,
            ..Self::default()
        }
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

    pub fn with_bonds(mut self, bonds: Vec<i32>) -> Self {
        self.bonds = Some(bonds);
        self
    }

    /// Loads `.id` plus whichever optional arrays exist.
    ///
    /// With `load_bonds` set, `.bond` is read (empty when absent).
    pub fn open(paths: &SnapshotPaths, n_total_particles: usize, load_bonds: bool) -> Result<Self> {
        let id_path = paths.path(FileKind::Id);
        let ids = ensure_len(&id_path, read_i32_array(&id_path)?, n_total_particles)?;

        let types = if paths.is_present(FileKind::Type) {
            let path = paths.path(FileKind::Type);
            Some(ensure_len(&path, read_i32_array(&path)?, n_total_particles)?)
        } else {
            None
        };

        let vectors = |kind: FileKind| -> Result<Option<Vec<f64>>> {
            if !paths.is_present(kind) {
                return Ok(None);
            }
            let path = paths.path(kind);
            let values = read_f64_array(&path)?;
            Ok(Some(ensure_len(
                &path,
                values,
                VECTOR_COMPONENTS * n_total_particles,
            )?))
        };
        let positions = vectors(FileKind::Pos)?;
        let velocities = vectors(FileKind::Vel)?;

        let bonds = match (load_bonds, paths.is_present(FileKind::Bond)) {
            (true, true) => Some(read_i32_array(&paths.path(FileKind::Bond))?),
            (true, false) => Some(Vec::new()),
            (false, _) => None,
        };

        Ok(Self {
            ids,
            types,
            positions,
            velocities,
            bonds,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    pub fn has_types(&self) -> bool {
        self.types.is_some()
    }

    pub fn has_positions(&self) -> bool {
        self.positions.is_some()
    }

    pub fn has_velocities(&self) -> bool {
        self.velocities.is_some()
    }

    /// The flat bond stream, if bonds were loaded.
    pub fn bonds(&self) -> Option<&[i32]> {
        self.bonds.as_deref()
    }

    /// Fields of the particle at global index `index`, or `None` past the end.
    pub fn fields(&self, index: usize) -> Option<ParticleFields> {
        let id = *self.ids.get(index)?;
        Some(ParticleFields {
            id,
            type_id: self.types.as_ref().and_then(|t| t.get(index).copied()),
            position: self.positions.as_deref().and_then(|p| vector_at(p, index)),
            velocity: self.velocities.as_deref().and_then(|v| vector_at(v, index)),
        })
    }
}

fn vector_at(values: &[f64], index: usize) -> Option<[f64; VECTOR_COMPONENTS]> {
    let start = index * VECTOR_COMPONENTS;
    let chunk = values.get(start..start + VECTOR_COMPONENTS)?;
    Some([chunk[0], chunk[1], chunk[2]])
}
