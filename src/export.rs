//! Plain-text plan export.
//!
//! ```text
//! Basilisk 0
//! <room count>
//! <x> <y>                      one line per room, cell coordinates
//! <thing count>
//! <x> <y> <type> <facing>      one line per thing, pixel coordinates
//! ```
//!
//! The first line is the format marker and stays first in later versions.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExportError;
use crate::plan::Plan;

pub const FORMAT_MARKER: &str = "Basilisk 0";

pub fn write_plan<W: Write>(plan: &Plan, out: &mut W) -> io::Result<()> {
    writeln!(out, "{FORMAT_MARKER}")?;
    writeln!(out, "{}", plan.rooms().len())?;
    for room in plan.rooms() {
        writeln!(out, "{} {}", room.x, room.y)?;
    }
    writeln!(out, "{}", plan.things.len())?;
    for thing in plan.things.all() {
        writeln!(
            out,
            "{} {} {} {}",
            thing.position[0],
            thing.position[1],
            thing.kind,
            thing.facing.index()
        )?;
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

/// Write the plan to `path`. The target only ever holds a complete file:
/// the plan is written next to it first and renamed into place.
pub fn export_plan(plan: &Plan, path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if path.file_name().is_none() {
        return Err(io_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no file name",
        )));
    }

    info!(path = %path.display(), "writing plan");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let staging = staging_path(path);
    let written = fs::File::create(&staging).and_then(|file| {
        let mut out = BufWriter::new(file);
        write_plan(plan, &mut out)?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(io_err(e));
    }
    Ok(())
}
