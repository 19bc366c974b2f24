// crates/gc_io/src/input_info.rs

//! 运行参数记录

use chrono::Local;
use gc_config::CarverConfig;
use std::io::Write;
use std::path::Path;

use crate::error::IoResult;
use crate::radmc::write_file;

/// 写出本次运行的参数记录：时间、标签、快照路径和完整配置
pub fn write_input_info(path: &Path, config: &CarverConfig, snapshot: &Path) -> IoResult<()> {
    let json = serde_json::to_string_pretty(config)?;
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S %z");

    write_file(path, |w| {
        writeln!(w, "# gizmo carver input info")?;
        writeln!(w, "date: {timestamp}")?;
        writeln!(w, "tag: {}", config.tag())?;
        writeln!(w, "snapshot: {}", snapshot.display())?;
        writeln!(w, "run_directory: {}", config.run_directory().display())?;
        writeln!(w, "config:")?;
        writeln!(w, "{json}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_info_contains_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input_info.txt");
        let config = CarverConfig::default();
        write_input_info(&path, &config, Path::new("snapshot_2000.hdf5")).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("tag: sn2000_256_"));
        assert!(text.contains("snapshot: snapshot_2000.hdf5"));

        let json_start = text.find('{').unwrap();
        let parsed: CarverConfig = serde_json::from_str(&text[json_start..]).unwrap();
        assert_eq!(parsed.region.dim, 256);
    }
}
