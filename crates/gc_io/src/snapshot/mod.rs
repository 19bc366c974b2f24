// crates/gc_io/src/snapshot/mod.rs

//! 快照读取
//!
//! 读取器产出 [`ParticleData`]，除 `InternalEnergy` 外的有量纲字段
//! 均已换算为 CGS。矢量数据集按分量拆开：`Coordinates` 对应
//! `particle_position_{x,y,z}`，`Velocities` 对应 `velocity_{x,y,z}`。

mod gizmo_hdf5;
mod json;

pub use self::gizmo_hdf5::Hdf5SnapshotReader;
pub use self::json::JsonSnapshotReader;

use gc_config::UnitBase;
use gc_fields::{names, ParticleData};
use std::path::Path;

use crate::error::{IoError, IoResult};

/// 快照读取器
pub trait SnapshotReader {
    /// 读取器名称（日志用）
    fn name(&self) -> &'static str;

    /// 读取快照
    fn read(&self, path: &Path, units: &UnitBase) -> IoResult<ParticleData>;
}

/// 按扩展名选择读取器
pub fn read_snapshot(path: &Path, units: &UnitBase) -> IoResult<ParticleData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let reader: Box<dyn SnapshotReader> = match extension.as_deref() {
        Some("hdf5" | "h5") => Box::new(Hdf5SnapshotReader::new()),
        Some("json") => Box::new(JsonSnapshotReader),
        _ => {
            return Err(IoError::UnknownFormat {
                path: path.display().to_string(),
            })
        }
    };

    tracing::info!(reader = reader.name(), path = %path.display(), "读取快照");
    reader.read(path, units)
}

/// 数据集到 CGS 的换算系数；无量纲或保持代码单位的数据集为 1
pub fn cgs_factor(dataset: &str, units: &UnitBase) -> f64 {
    match dataset {
        "Coordinates" | "SmoothingLength" => units.length_in_cm,
        "Velocities" => units.velocity_in_cm_per_s,
        "Masses" => units.mass_in_g,
        "Density" => units.density_in_cgs(),
        "MagneticField" => units.magnetic_field_in_gauss,
        _ => 1.0,
    }
}

/// 矢量数据集的分量字段名
pub fn component_names(dataset: &str) -> Option<[&'static str; 3]> {
    match dataset {
        "Coordinates" => Some(names::POSITION),
        "Velocities" => Some(names::VELOCITY),
        _ => None,
    }
}

/// 把行优先的 `[n, 3]` 数组拆成三列
pub fn split_components(flat: &[f64], scale: f64) -> [Vec<f64>; 3] {
    let n = flat.len() / 3;
    let mut out = [
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    ];
    for row in flat.chunks_exact(3) {
        for (column, &v) in out.iter_mut().zip(row) {
            column.push(v * scale);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cgs_factors() {
        let units = UnitBase::default();
        assert_eq!(cgs_factor("Coordinates", &units), 3.08568e18);
        assert_eq!(cgs_factor("Velocities", &units), 100.0);
        assert_eq!(cgs_factor("InternalEnergy", &units), 1.0);
        assert_eq!(cgs_factor("MolecularMassFraction", &units), 1.0);
        let rho = cgs_factor("Density", &units);
        assert!((rho - 1.989e33 / 3.08568e18_f64.powi(3)).abs() / rho < 1e-12);
    }

    #[test]
    fn test_split_components() {
        let [x, y, z] = split_components(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 10.0);
        assert_eq!(x, vec![10.0, 40.0]);
        assert_eq!(y, vec![20.0, 50.0]);
        assert_eq!(z, vec![30.0, 60.0]);
        assert_eq!(component_names("Velocities").unwrap()[2], "velocity_z");
    }

    #[test]
    fn test_unknown_extension() {
        let err = read_snapshot(Path::new("snap.dat"), &UnitBase::default()).unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat { .. }));
    }
}
