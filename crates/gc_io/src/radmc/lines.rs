// crates/gc_io/src/radmc/lines.rs

//! lines.inp

use gc_config::Species;
use std::io::Write;
use std::path::Path;

use super::write_file;
use crate::error::IoResult;

/// lines.inp 格式版本
const LINES_FORMAT: u32 = 2;

/// 写出 lines.inp：每个分子一行 `<name> leiden 0 0 0`（LAMDA 格式，无碰撞伙伴）
pub fn write_lines_inp(path: &Path, species: &[Species]) -> IoResult<()> {
    write_file(path, |w| {
        writeln!(w, "{LINES_FORMAT}")?;
        writeln!(w, "{}", species.len())?;
        for sp in species {
            writeln!(w, "{} leiden 0 0 0", sp.file_stem())?;
        }
        Ok(())
    })
}
