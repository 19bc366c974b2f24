// crates/gc_io/src/radmc/grid.rs

//! amr_grid.inp

use gc_fields::UniformGrid;
use std::io::Write;
use std::path::Path;

use super::{write_file, IFORMAT};
use crate::error::IoResult;

/// 写出规则笛卡尔网格
///
/// ```text
/// 1              iformat
/// 0              规则网格
/// 1              笛卡尔坐标
/// 0              gridinfo
/// 1 1 1          三个方向均启用
/// nx ny nz
/// x 方向单元壁（nx + 1 个）
/// y 方向单元壁
/// z 方向单元壁
/// ```
pub fn write_amr_grid(path: &Path, grid: &UniformGrid) -> IoResult<()> {
    let n = grid.dim();
    write_file(path, |w| {
        writeln!(w, "{IFORMAT}")?;
        writeln!(w, "0")?;
        writeln!(w, "1")?;
        writeln!(w, "0")?;
        writeln!(w, "1 1 1")?;
        writeln!(w, "{n} {n} {n}")?;
        for axis in 0..3 {
            let walls: Vec<String> = grid
                .cell_walls(axis)
                .iter()
                .map(|x| format!("{x:.9e}"))
                .collect();
            writeln!(w, "{}", walls.join(" "))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_amr_grid_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("amr_grid.inp");
        let grid = UniformGrid::new(DVec3::new(1.0, 2.0, 3.0), 1.0, 2).unwrap();
        write_amr_grid(&path, &grid).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(&lines[..6], &["1", "0", "1", "0", "1 1 1", "2 2 2"]);
        assert_eq!(lines[6], "0.000000000e0 1.000000000e0 2.000000000e0");
        let z: Vec<f64> = lines[8].split(' ').map(|s| s.parse().unwrap()).collect();
        assert_eq!(z, vec![2.0, 3.0, 4.0]);
    }
}
