//! Plain-text trajectory files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use nalgebra::Point3;

use crate::driver::CapturedHistories;
use crate::error::{EnsembleError, Result};

/// Write one `x y z` line per recorded position
pub fn write_history<W: Write>(writer: &mut W, history: &[Point3<f64>]) -> std::io::Result<()> {
    for point in history {
        writeln!(writer, "{} {} {}", point.x, point.y, point.z)?;
    }
    Ok(())
}

/// Directory receiving the trajectory files of a named run
pub fn history_dir(output_dir: &Path, run_name: &str) -> PathBuf {
    output_dir.join(run_name).join("data")
}

/// Write every captured trajectory to `<output_dir>/<run_name>/data/hist_<outcome>.txt`
///
/// Returns the paths written, in outcome order.
pub fn write_trajectories(
    output_dir: &Path,
    run_name: &str,
    histories: &CapturedHistories,
) -> Result<Vec<PathBuf>> {
    let dir = history_dir(output_dir, run_name);
    fs::create_dir_all(&dir).map_err(|source| EnsembleError::Io {
        path: dir.clone(),
        source,
    })?;

    let mut written = Vec::new();
    for (outcome, history) in histories.iter() {
        let path = dir.join(format!("hist_{}.txt", outcome.label()));
        let io_err = |source| EnsembleError::Io {
            path: path.clone(),
            source,
        };
        let file = File::create(&path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        write_history(&mut writer, history).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        info!("wrote {} positions to {}", history.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
