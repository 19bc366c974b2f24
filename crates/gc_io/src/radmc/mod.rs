// crates/gc_io/src/radmc/mod.rs

//! RADMC-3D 输入文件写出
//!
//! 所有文件使用 ASCII 格式（iformat = 1），浮点数按 `{:.9e}` 写出，
//! 网格数据按 x 变化最快的顺序排列。

mod fields;
mod grid;
mod job;
mod lines;
mod wavelength;

pub use fields::{write_dust_field, write_scalar_field, write_vector_field};
pub use grid::write_amr_grid;
pub use job::{write_job_script, JobScript};
pub use lines::write_lines_inp;
pub use wavelength::{
    camera_wavelengths, wavelength_grid, write_camera_wavelength, write_wavelength_micron,
};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::{IoError, IoResult};

/// RADMC-3D ASCII 格式编号
pub const IFORMAT: u32 = 1;

/// 创建文件并在闭包中写入内容
pub(crate) fn write_file<F>(path: &Path, body: F) -> IoResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| IoError::access(path, e))?;
    let mut w = BufWriter::new(file);
    body(&mut w)
        .and_then(|()| w.flush())
        .map_err(|e| IoError::access(path, e))?;
    debug!(path = %path.display(), "写出文件");
    Ok(())
}

/// 写出一列数值
pub(crate) fn write_column<W: Write>(w: &mut W, values: &[f64]) -> std::io::Result<()> {
    for v in values {
        writeln!(w, "{v:.9e}")?;
    }
    Ok(())
}
