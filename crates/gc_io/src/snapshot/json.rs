// crates/gc_io/src/snapshot/json.rs

//! JSON 粒子转储
//!
//! 格式即 [`ParticleData`] 的 serde 表示，字段已是 CGS：
//!
//! ```json
//! { "PartType0": { "ids": [1, 2], "fields": { "Density": [1e-20, 2e-20] } } }
//! ```

use gc_config::UnitBase;
use gc_fields::ParticleData;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use super::SnapshotReader;
use crate::error::{IoError, IoResult};

/// JSON 转储读取器
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotReader;

impl JsonSnapshotReader {
    /// 写出转储
    pub fn write(path: &Path, data: &ParticleData) -> IoResult<()> {
        let file = File::create(path).map_err(|e| IoError::access(path, e))?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer(&mut w, data)?;
        w.flush().map_err(|e| IoError::access(path, e))?;
        Ok(())
    }
}

impl SnapshotReader for JsonSnapshotReader {
    fn name(&self) -> &'static str {
        "json"
    }

    fn read(&self, path: &Path, _units: &UnitBase) -> IoResult<ParticleData> {
        let file = File::open(path).map_err(|e| IoError::access(path, e))?;
        let data: ParticleData = serde_json::from_reader(BufReader::new(file))?;

        // serde 不检查列长度
        for particle_type in data.particle_types() {
            if let Some(set) = data.set(particle_type) {
                set.validate()?;
                debug!(%particle_type, n = set.len(), fields = set.fields.len(), "读取粒子类型");
            }
        }
        Ok(data)
    }
}
