// crates/gc_io/src/radmc/fields.rs

//! 网格标量、尘埃与矢量场文件

use std::io::Write;
use std::path::Path;

use super::{write_column, write_file, IFORMAT};
use crate::error::IoResult;

/// 标量场（数密度、气体温度、微湍流）
///
/// 头部为 iformat 与单元数。
pub fn write_scalar_field(path: &Path, values: &[f64]) -> IoResult<()> {
    write_file(path, |w| {
        writeln!(w, "{IFORMAT}")?;
        writeln!(w, "{}", values.len())?;
        write_column(w, values)
    })
}

/// 尘埃场（dust_density.inp、dust_temperature.dat），单一尘埃成分
///
/// 头部为 iformat、单元数与尘埃种类数。
pub fn write_dust_field(path: &Path, values: &[f64]) -> IoResult<()> {
    write_file(path, |w| {
        writeln!(w, "{IFORMAT}")?;
        writeln!(w, "{}", values.len())?;
        writeln!(w, "1")?;
        write_column(w, values)
    })
}

/// 矢量场（gas_velocity.inp），每行 `vx vy vz`
pub fn write_vector_field(path: &Path, components: [&[f64]; 3]) -> IoResult<()> {
    let [vx, vy, vz] = components;
    gc_foundation::GcError::check_size("velocity_y", vx.len(), vy.len())?;
    gc_foundation::GcError::check_size("velocity_z", vx.len(), vz.len())?;

    write_file(path, |w| {
        writeln!(w, "{IFORMAT}")?;
        writeln!(w, "{}", vx.len())?;
        for ((x, y), z) in vx.iter().zip(vy).zip(vz) {
            writeln!(w, "{x:.9e} {y:.9e} {z:.9e}")?;
        }
        Ok(())
    })
}
