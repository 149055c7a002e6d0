use crate::decode::BlockDecoder;
use crate::error::Result;
use crate::partition::counts_from_prefix;
use crate::snapshot::{
    FileKind, ParticlePayload, SnapshotDescriptor, SnapshotHeader, SnapshotPaths,
};
use crate::utils::verify_file_existence;

/// A snapshot fully materialized in memory: header, partition metadata and
/// every payload array that exists on disk.
#[derive(Debug, Clone)]
pub struct Snapshot {
    header: SnapshotHeader,
    descriptor: SnapshotDescriptor,
    payload: ParticlePayload,
}

impl Snapshot {
    /// Opens the family at `paths`. `.head`, `.pref` and `.id` are required.
    ///
    /// The prefix array is checked against the particle count here, whether
    /// or not the snapshot stores bonds.
    pub fn open(paths: &SnapshotPaths) -> Result<Self> {
        for kind in [FileKind::Head, FileKind::Pref, FileKind::Id] {
            verify_file_existence(&paths.path(kind))?;
        }

        let header = SnapshotHeader::read(&paths.path(FileKind::Head))?;
        let descriptor = SnapshotDescriptor::open(paths)?;
        counts_from_prefix(descriptor.prefix(), descriptor.n_total_particles())?;
        let payload = ParticlePayload::open(
            paths,
            descriptor.n_total_particles(),
            descriptor.has_bonds(),
        )?;

        Ok(Self {
            header,
            descriptor,
            payload,
        })
    }

    pub fn from_parts(
        header: SnapshotHeader,
        descriptor: SnapshotDescriptor,
        payload: ParticlePayload,
    ) -> Self {
        Self {
            header,
            descriptor,
            payload,
        }
    }

    pub fn header(&self) -> &SnapshotHeader {
        &self.header
    }

    pub fn descriptor(&self) -> &SnapshotDescriptor {
        &self.descriptor
    }

    pub fn payload(&self) -> &ParticlePayload {
        &self.payload
    }

    /// Runs the decoder over every particle without producing output.
    ///
    /// Fails with the first partition, offset-table or bond-stream error, so
    /// a caller can refuse to write anything for a corrupt snapshot.
    pub fn validate(&self) -> Result<()> {
        counts_from_prefix(
            self.descriptor.prefix(),
            self.descriptor.n_total_particles(),
        )?;

        if self.descriptor.has_bonds() {
            for particle in self.decoder()?.particles() {
                particle?;
            }
        }
        Ok(())
    }

    /// Starts a rank-ordered decode using the header's arity table.
    pub fn decoder(&self) -> Result<BlockDecoder<'_, SnapshotHeader>> {
        BlockDecoder::new(&self.descriptor, &self.payload, &self.header)
    }
}
