// crates/gc_io/src/snapshot/gizmo_hdf5.rs

//! Gizmo HDF5 快照读取
//!
//! 需要启用 `hdf5` feature 并安装 HDF5 库。每个 `PartTypeN` 组中的
//! 一维数据集按名称读入，`[n, 3]` 的 `Coordinates`、`Velocities` 拆分为分量，
//! `ParticleIDs` 作为粒子 ID。

use gc_config::UnitBase;
use gc_fields::{ParticleData, ParticleType};
use std::path::Path;

use super::SnapshotReader;
use crate::error::IoResult;

/// HDF5 快照读取器
#[derive(Debug, Clone)]
pub struct Hdf5SnapshotReader {
    particle_types: Vec<ParticleType>,
}

impl Default for Hdf5SnapshotReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Hdf5SnapshotReader {
    /// 读取气体与 sink 粒子
    pub fn new() -> Self {
        Self {
            particle_types: vec![ParticleType::Gas, ParticleType::Sink],
        }
    }

    /// 要读取的粒子类型
    pub fn particle_types(&self) -> &[ParticleType] {
        &self.particle_types
    }
}

#[cfg(feature = "hdf5")]
impl SnapshotReader for Hdf5SnapshotReader {
    fn name(&self) -> &'static str {
        "hdf5"
    }

    fn read(&self, path: &Path, units: &UnitBase) -> IoResult<ParticleData> {
        use super::{cgs_factor, component_names, split_components};
        use crate::error::IoError;
        use gc_fields::{names, ParticleSet};
        use std::collections::BTreeMap;
        use tracing::{debug, info};

        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = ::hdf5::File::open(path)?;
        let mut sets = BTreeMap::new();

        for &particle_type in &self.particle_types {
            let group_name = particle_type.group_name();
            if !file.link_exists(&group_name) {
                debug!(group = %group_name, "快照中没有该粒子类型");
                continue;
            }
            let group = file.group(&group_name)?;
            let mut set = ParticleSet::default();

            for name in group.member_names()? {
                let dataset = group.dataset(&name)?;
                if name == names::PARTICLE_IDS {
                    set.ids = dataset.read_raw::<u64>()?;
                    continue;
                }

                let factor = cgs_factor(&name, units);
                let shape = dataset.shape();
                match (shape.as_slice(), component_names(&name)) {
                    ([_], _) => {
                        let mut values = dataset.read_raw::<f64>()?;
                        if factor != 1.0 {
                            values.iter_mut().for_each(|v| *v *= factor);
                        }
                        set.fields.insert(name, values);
                    }
                    ([_, 3], Some(components)) => {
                        let flat = dataset.read_raw::<f64>()?;
                        let columns = split_components(&flat, factor);
                        for (component, column) in components.iter().zip(columns) {
                            set.fields.insert(component.to_string(), column);
                        }
                    }
                    _ => debug!(dataset = %name, ?shape, "跳过多维数据集"),
                }
            }

            if set.ids.is_empty() && !set.fields.is_empty() {
                return Err(IoError::MissingDataset {
                    file: path.display().to_string(),
                    dataset: format!("{group_name}/{}", names::PARTICLE_IDS),
                });
            }
            set.validate()?;
            info!(group = %group_name, n = set.len(), fields = set.fields.len(), "读取粒子组");
            sets.insert(particle_type, set);
        }

        Ok(ParticleData::from_sets(sets)?)
    }
}

/// 无 HDF5 支持时的占位实现
#[cfg(not(feature = "hdf5"))]
impl SnapshotReader for Hdf5SnapshotReader {
    fn name(&self) -> &'static str {
        "hdf5"
    }

    fn read(&self, _path: &Path, _units: &UnitBase) -> IoResult<ParticleData> {
        Err(crate::error::IoError::NotAvailable { feature: "hdf5" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_particle_types() {
        let reader = Hdf5SnapshotReader::new();
        assert_eq!(reader.particle_types(), &[ParticleType::Gas, ParticleType::Sink]);
    }

    #[cfg(feature = "hdf5")]
    mod gizmo_files {
        use super::*;
        use crate::error::IoError;
        use gc_fields::{names, FieldKey};
        use std::path::PathBuf;

        fn write_ids(group: &::hdf5::Group, ids: &[u64]) {
            let dataset = group
                .new_dataset::<u64>()
                .shape(ids.len())
                .create(names::PARTICLE_IDS)
                .unwrap();
            dataset.write_raw(ids).unwrap();
        }

        fn write_column(group: &::hdf5::Group, name: &str, values: &[f64]) {
            let dataset = group.new_dataset::<f64>().shape(values.len()).create(name).unwrap();
            dataset.write_raw(values).unwrap();
        }

        fn write_vectors(group: &::hdf5::Group, name: &str, rows: &[[f64; 3]]) {
            let flat: Vec<f64> = rows.iter().flatten().copied().collect();
            let dataset = group
                .new_dataset::<f64>()
                .shape((rows.len(), 3))
                .create(name)
                .unwrap();
            dataset.write_raw(&flat).unwrap();
        }

        /// 两个气体粒子、一个 sink，代码单位
        fn write_snapshot(dir: &Path, with_sinks: bool) -> PathBuf {
            let path = dir.join("snapshot_2000.hdf5");
            let file = ::hdf5::File::create(&path).unwrap();

            let gas = file.create_group("PartType0").unwrap();
            write_ids(&gas, &[11, 12]);
            write_vectors(&gas, "Coordinates", &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
            write_vectors(&gas, "Velocities", &[[0.5, 0.0, -0.5], [1.0, 2.0, 3.0]]);
            write_column(&gas, names::DENSITY, &[1.0, 2.0]);
            write_column(&gas, names::INTERNAL_ENERGY, &[10.0, 20.0]);
            write_column(&gas, names::SMOOTHING_LENGTH, &[0.1, 0.2]);

            if with_sinks {
                let sinks = file.create_group("PartType5").unwrap();
                write_ids(&sinks, &[900]);
                write_column(&sinks, names::MASSES, &[3.0]);
            }
            // 其他类型不会被读取
            let stars = file.create_group("PartType4").unwrap();
            write_ids(&stars, &[5000]);
            path
        }

        #[test]
        fn test_read_gas_and_sinks() {
            let dir = tempfile::tempdir().unwrap();
            let path = write_snapshot(dir.path(), true);
            let units = UnitBase::default();

            let data = Hdf5SnapshotReader::new().read(&path, &units).unwrap();
            let types: Vec<_> = data.particle_types().collect();
            assert_eq!(types, vec![ParticleType::Gas, ParticleType::Sink]);
            assert_eq!(data.ids(ParticleType::Gas), &[11, 12]);
            assert_eq!(data.ids(ParticleType::Sink), &[900]);

            let [x, y, z] = names::POSITION;
            let l = units.length_in_cm;
            assert_eq!(data.field(&FieldKey::gas(x)).unwrap(), &[1.0 * l, 4.0 * l]);
            assert_eq!(data.field(&FieldKey::gas(y)).unwrap(), &[2.0 * l, 5.0 * l]);
            assert_eq!(data.field(&FieldKey::gas(z)).unwrap(), &[3.0 * l, 6.0 * l]);
            assert!(!data.has_field(&FieldKey::gas("Coordinates")));

            let [vx, _, vz] = names::VELOCITY;
            let v = units.velocity_in_cm_per_s;
            assert_eq!(data.field(&FieldKey::gas(vx)).unwrap(), &[0.5 * v, 1.0 * v]);
            assert_eq!(data.field(&FieldKey::gas(vz)).unwrap(), &[-0.5 * v, 3.0 * v]);

            let rho = units.density_in_cgs();
            assert_eq!(data.field(&FieldKey::gas(names::DENSITY)).unwrap(), &[rho, 2.0 * rho]);
            assert_eq!(
                data.field(&FieldKey::gas(names::SMOOTHING_LENGTH)).unwrap(),
                &[0.1 * l, 0.2 * l]
            );
            // 比内能保持代码单位
            assert_eq!(
                data.field(&FieldKey::gas(names::INTERNAL_ENERGY)).unwrap(),
                &[10.0, 20.0]
            );
            assert_eq!(
                data.field(&FieldKey::sink(names::MASSES)).unwrap(),
                &[3.0 * units.mass_in_g]
            );
        }

        #[test]
        fn test_missing_sink_group_is_skipped() {
            let dir = tempfile::tempdir().unwrap();
            let path = write_snapshot(dir.path(), false);

            let data = Hdf5SnapshotReader::new().read(&path, &UnitBase::default()).unwrap();
            assert!(data.set(ParticleType::Sink).is_none());
            assert!(data.ids(ParticleType::Sink).is_empty());
            assert_eq!(data.len(ParticleType::Gas), 2);
        }

        #[test]
        fn test_group_without_ids() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("snapshot_0001.hdf5");
            {
                let file = ::hdf5::File::create(&path).unwrap();
                let gas = file.create_group("PartType0").unwrap();
                write_column(&gas, names::DENSITY, &[1.0, 2.0]);
            }

            let err = Hdf5SnapshotReader::new()
                .read(&path, &UnitBase::default())
                .unwrap_err();
            match err {
                IoError::MissingDataset { dataset, .. } => {
                    assert_eq!(dataset, "PartType0/ParticleIDs")
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_missing_file() {
            let dir = tempfile::tempdir().unwrap();
            let err = Hdf5SnapshotReader::new()
                .read(&dir.path().join("nope.hdf5"), &UnitBase::default())
                .unwrap_err();
            assert!(matches!(err, IoError::FileNotFound { .. }));
        }
    }

    #[cfg(not(feature = "hdf5"))]
    #[test]
    fn test_not_available_without_feature() {
        let err = Hdf5SnapshotReader::new()
            .read(Path::new("snapshot_2000.hdf5"), &UnitBase::default())
            .unwrap_err();
        assert!(matches!(err, crate::error::IoError::NotAvailable { feature: "hdf5" }));
    }
}
