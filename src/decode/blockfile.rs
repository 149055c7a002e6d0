use crate::error::{Result, SnapshotError};
use crate::snapshot::Snapshot;
use std::io::Write;

fn output_error(err: std::io::Error) -> SnapshotError {
    SnapshotError::io("<output>", "write", err)
}

/// Writes `snapshot` as blockfile text.
///
/// A `particles` block lists one entry per particle in global order with the
/// columns that exist on disk. When the snapshot stores bond offsets, a
/// `bonds` block follows, decoded rank by rank.
///
/// The whole snapshot is validated before the first byte is written; a
/// corrupt snapshot produces an error and no output.
///
/// ```text
/// {particles {id type pos v}
/// 	{0 1 0.5 0.5 0.5 0.0 0.0 0.0}
/// }
/// {bonds
/// 	{0 { {0 1} } }
/// }
/// ```
pub fn write_blockfile<W: Write>(snapshot: &Snapshot, out: &mut W) -> Result<()> {
    snapshot.validate()?;

    write_particles(snapshot, out)?;

    if snapshot.descriptor().has_bonds() {
        write_bonds(snapshot, out)?;
    }

    out.flush().map_err(output_error)
}

fn write_particles<W: Write>(snapshot: &Snapshot, out: &mut W) -> Result<()> {
    let payload = snapshot.payload();

    let mut columns = vec!["id"];
    if payload.has_types() {
        columns.push("type");
    }
    if payload.has_positions() {
        columns.push("pos");
    }
    if payload.has_velocities() {
        columns.push("v");
    }
    writeln!(out, "{{particles {{{}}}", columns.join(" ")).map_err(output_error)?;

    for fields in (0..payload.len()).filter_map(|index| payload.fields(index)) {
        write!(out, "\t{{{}", fields.id).map_err(output_error)?;
        if let Some(type_id) = fields.type_id {
            write!(out, " {}", type_id).map_err(output_error)?;
        }
        for [x, y, z] in [fields.position, fields.velocity].into_iter().flatten() {
            write!(out, " {:?} {:?} {:?}", x, y, z).map_err(output_error)?;
        }
        writeln!(out, "}}").map_err(output_error)?;
    }

    writeln!(out, "}}").map_err(output_error)
}

fn write_bonds<W: Write>(snapshot: &Snapshot, out: &mut W) -> Result<()> {
    writeln!(out, "{{bonds").map_err(output_error)?;

    for block in snapshot.decoder()? {
        let block = block?;
        for particle in block.particles() {
            let particle = particle?;
            write!(out, "\t{{{} {{ ", particle.id()).map_err(output_error)?;
            for bond in particle.bonds.iter().flatten() {
                write!(out, "{{{}", bond.bond_type).map_err(output_error)?;
                for partner in bond.partners {
                    write!(out, " {}", partner).map_err(output_error)?;
                }
                write!(out, "}} ").map_err(output_error)?;
            }
            writeln!(out, "}} }}").map_err(output_error)?;
        }
    }

    writeln!(out, "}}").map_err(output_error)
}
