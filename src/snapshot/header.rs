use crate::error::{Result, SnapshotError};
use crate::snapshot::constants::{HEADER_FIXED_LEN, I32_WIDTH};
use crate::snapshot::traits::ArityLookup;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Contents of a `.head` file.
///
/// # Layout (native byte order)
/// - `u32` field mask (which per-particle arrays the writer dumped)
/// - `i32` number of bonded interaction types `n`
/// - `n` × `i32` partner count of each bonded interaction type
///
/// The header is carried verbatim across a repartition; only the arity table
/// is interpreted, and only by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    fields: u32,
    arities: Vec<i32>,
}

impl SnapshotHeader {
    pub fn new(fields: u32, arities: Vec<i32>) -> Self {
        Self { fields, arities }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|err| SnapshotError::io(path, "read", err))?;
        Self::parse(path, &bytes)
    }

    /// Decodes header bytes; `path` is only used for error context.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self> {
        let malformed = |detail: String| SnapshotError::MalformedHeader {
            path: path.to_path_buf(),
            detail,
        };

        if bytes.len() < HEADER_FIXED_LEN {
            return Err(malformed(format!(
                "{} bytes is shorter than the {HEADER_FIXED_LEN}-byte fixed header",
                bytes.len()
            )));
        }

        let fields = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let n_types = i32::from_ne_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let n_types = usize::try_from(n_types)
            .map_err(|_| malformed(format!("negative bonded interaction count {n_types}")))?;

        let table = &bytes[HEADER_FIXED_LEN..];
        let needed = n_types * I32_WIDTH;
        if table.len() < needed {
            return Err(malformed(format!(
                "arity table of {n_types} entries needs {needed} bytes, found {}",
                table.len()
            )));
        }

        let arities = table[..needed]
            .chunks_exact(I32_WIDTH)
            .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        debug!(path = %path.display(), fields, n_types, "read header");
        Ok(Self { fields, arities })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_FIXED_LEN + self.arities.len() * I32_WIDTH);
        out.extend_from_slice(&self.fields.to_ne_bytes());
        out.extend_from_slice(&(self.arities.len() as i32).to_ne_bytes());
        for arity in &self.arities {
            out.extend_from_slice(&arity.to_ne_bytes());
        }
        out
    }

    /// Writes the header to a file that must not exist yet.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| SnapshotError::io(path, "create", err))?;
        file.write_all(&self.to_bytes())
            .map_err(|err| SnapshotError::io(path, "write", err))
    }

    pub fn fields(&self) -> u32 {
        self.fields
    }

    pub fn bonded_interaction_count(&self) -> usize {
        self.arities.len()
    }

    pub fn arities(&self) -> &[i32] {
        &self.arities
    }
}

impl ArityLookup for SnapshotHeader {
    fn arity(&self, bond_type: i32) -> Option<usize> {
        self.arities.as_slice().arity(bond_type)
    }
}
