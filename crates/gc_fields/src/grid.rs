// crates/gc_fields/src/grid.rs

//! 均匀网格与粒子插值
//!
//! 网格为立方体，`dim³` 个单元，数值按 RADMC-3D 顺序排列
//! （x 变化最快）：`idx = ix + nx (iy + ny iz)`。
//!
//! 散射插值使用 Gadget 约定的三次样条核（支撑半径为 h）：
//!
//! ```text
//! W(q) = 8/(π h³) · { 1 - 6q² + 6q³   0 ≤ q < 1/2
//!                   { 2 (1 - q)³      1/2 ≤ q < 1
//!                   { 0               q ≥ 1
//! ```
//!
//! 每个单元中心取 `Σ m_j/ρ_j · A_j · W(|x - x_j|, h_j)`。核比单元还小的粒子
//! 整体落入所在单元（`m/ρ · A / V_cell`）。

use gc_config::{DepositMethod, RegionConfig};
use gc_foundation::{ensure, GcError, GcResult};
use glam::DVec3;
use rayon::prelude::*;
use std::f64::consts::PI;
use tracing::debug;

/// 立方体均匀网格（CGS）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGrid {
    center: DVec3,
    half_size: f64,
    dim: usize,
}

impl UniformGrid {
    /// 创建网格
    pub fn new(center: DVec3, half_size: f64, dim: usize) -> GcResult<Self> {
        ensure!(
            half_size > 0.0 && half_size.is_finite(),
            GcError::invalid_input(format!("网格半边长必须为正: {half_size}"))
        );
        ensure!(dim > 0, GcError::invalid_input("网格分辨率必须大于 0"));
        Ok(Self {
            center,
            half_size,
            dim,
        })
    }

    /// 由区域配置创建
    pub fn from_region(region: &RegionConfig) -> GcResult<Self> {
        Self::new(region.center_cm(), region.half_size_cm(), region.dim)
    }

    /// 每轴单元数
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// 单元总数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.dim * self.dim * self.dim
    }

    /// 中心
    #[inline]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// 单元边长
    #[inline]
    pub fn cell_size(&self) -> f64 {
        2.0 * self.half_size / self.dim as f64
    }

    /// 单元体积
    #[inline]
    pub fn cell_volume(&self) -> f64 {
        self.cell_size().powi(3)
    }

    /// 左下角
    #[inline]
    pub fn left_edge(&self) -> DVec3 {
        self.center - DVec3::splat(self.half_size)
    }

    /// 右上角
    #[inline]
    pub fn right_edge(&self) -> DVec3 {
        self.center + DVec3::splat(self.half_size)
    }

    /// 某轴的单元壁坐标（dim + 1 个）
    pub fn cell_walls(&self, axis: usize) -> Vec<f64> {
        let left = self.left_edge()[axis];
        let dx = self.cell_size();
        (0..=self.dim).map(|i| left + i as f64 * dx).collect()
    }

    /// 线性索引
    #[inline]
    pub fn cell_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + self.dim * (iy + self.dim * iz)
    }

    /// 单元中心
    #[inline]
    pub fn cell_center(&self, ix: usize, iy: usize, iz: usize) -> DVec3 {
        let dx = self.cell_size();
        self.left_edge() + DVec3::new(ix as f64 + 0.5, iy as f64 + 0.5, iz as f64 + 0.5) * dx
    }

    /// 点所在单元；网格外返回 None（右边界按网格外处理）
    pub fn locate(&self, position: DVec3) -> Option<[usize; 3]> {
        let rel = (position - self.left_edge()) / self.cell_size();
        let mut index = [0usize; 3];
        for axis in 0..3 {
            let v = rel[axis].floor();
            if !(v >= 0.0 && v < self.dim as f64) {
                return None;
            }
            index[axis] = v as usize;
        }
        Some(index)
    }

    /// 以 `position` 为中心、半径 `h` 的核是否与网格相交
    pub fn overlaps(&self, position: DVec3, h: f64) -> bool {
        let lo = self.left_edge();
        let hi = self.right_edge();
        (0..3).all(|axis| position[axis] + h >= lo[axis] && position[axis] - h < hi[axis])
    }

    /// 坐标区间 [lo, hi] 在某轴覆盖的单元索引范围；与网格不相交返回 None
    fn axis_range(&self, axis: usize, lo: f64, hi: f64) -> Option<(usize, usize)> {
        let left = self.left_edge()[axis];
        let dx = self.cell_size();
        let first = ((lo - left) / dx).floor();
        let last = ((hi - left) / dx).floor();
        let max = (self.dim - 1) as f64;
        if last < 0.0 || first > max || first.is_nan() || last.is_nan() {
            return None;
        }
        Some((first.max(0.0) as usize, last.min(max) as usize))
    }
}

/// 参与插值的粒子属性（长度一致）
#[derive(Debug, Clone, Copy)]
pub struct ParticleCloud<'a> {
    /// 位置 [cm]
    pub positions: &'a [DVec3],
    /// 质量 [g]
    pub masses: &'a [f64],
    /// 密度 [g/cm³]
    pub densities: &'a [f64],
    /// 光滑长度 [cm]
    pub smoothing: &'a [f64],
}

impl ParticleCloud<'_> {
    /// 粒子数
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn validate(&self, values: &[f64]) -> GcResult<()> {
        let n = self.len();
        GcError::check_size("Masses", n, self.masses.len())?;
        GcError::check_size("Density", n, self.densities.len())?;
        GcError::check_size("SmoothingLength", n, self.smoothing.len())?;
        GcError::check_size("deposit values", n, values.len())
    }
}

/// 核范围与网格相交的粒子下标（升序）
pub fn select_overlapping(grid: &UniformGrid, positions: &[DVec3], smoothing: &[f64]) -> Vec<usize> {
    let selected: Vec<usize> = positions
        .par_iter()
        .zip(smoothing.par_iter())
        .enumerate()
        .filter(|(_, (p, h))| grid.overlaps(**p, **h))
        .map(|(i, _)| i)
        .collect();
    debug!(total = positions.len(), selected = selected.len(), "选取区域内粒子");
    selected
}

/// 三次样条核
#[inline]
pub fn cubic_spline(r: f64, h: f64) -> f64 {
    let q = r / h;
    let norm = 8.0 / (PI * h * h * h);
    if q < 0.5 {
        norm * (1.0 - 6.0 * q * q + 6.0 * q * q * q)
    } else if q < 1.0 {
        let t = 1.0 - q;
        norm * 2.0 * t * t * t
    } else {
        0.0
    }
}

/// 粒子场插值到网格，返回 RADMC-3D 顺序的单元值
pub fn deposit(
    grid: &UniformGrid,
    cloud: &ParticleCloud<'_>,
    values: &[f64],
    method: DepositMethod,
) -> GcResult<Vec<f64>> {
    cloud.validate(values)?;
    let out = match method {
        DepositMethod::Scatter => scatter(grid, cloud, values),
        DepositMethod::Nearest => nearest(grid, cloud, values),
    };
    debug!(
        particles = cloud.len(),
        cells = out.len(),
        ?method,
        "粒子场插值完成"
    );
    Ok(out)
}

/// 粒子覆盖的单元范围
struct Footprint {
    index: usize,
    x: (usize, usize),
    y: (usize, usize),
    z: (usize, usize),
    /// 核小于单元，整体落入所在单元
    point: Option<[usize; 3]>,
}

fn footprints(grid: &UniformGrid, cloud: &ParticleCloud<'_>) -> Vec<Footprint> {
    let dx = grid.cell_size();
    (0..cloud.len())
        .into_par_iter()
        .filter_map(|i| {
            let p = cloud.positions[i];
            let h = cloud.smoothing[i];
            if !(cloud.densities[i] > 0.0) || !(h > 0.0) {
                return None;
            }
            if h < dx {
                let cell = grid.locate(p)?;
                return Some(Footprint {
                    index: i,
                    x: (cell[0], cell[0]),
                    y: (cell[1], cell[1]),
                    z: (cell[2], cell[2]),
                    point: Some(cell),
                });
            }
            Some(Footprint {
                index: i,
                x: grid.axis_range(0, p.x - h, p.x + h)?,
                y: grid.axis_range(1, p.y - h, p.y + h)?,
                z: grid.axis_range(2, p.z - h, p.z + h)?,
                point: None,
            })
        })
        .collect()
}

/// 按 z 层分桶，每层由一个任务独占写入
fn bucket_by_slab(grid: &UniformGrid, prints: &[Footprint]) -> Vec<Vec<usize>> {
    let mut slabs = vec![Vec::new(); grid.dim()];
    for (k, fp) in prints.iter().enumerate() {
        for slab in &mut slabs[fp.z.0..=fp.z.1] {
            slab.push(k);
        }
    }
    slabs
}

fn scatter(grid: &UniformGrid, cloud: &ParticleCloud<'_>, values: &[f64]) -> Vec<f64> {
    let dim = grid.dim();
    let prints = footprints(grid, cloud);
    let slabs = bucket_by_slab(grid, &prints);
    let cell_volume = grid.cell_volume();

    let mut out = vec![0.0; grid.n_cells()];
    out.par_chunks_mut(dim * dim)
        .zip(slabs.par_iter())
        .enumerate()
        .for_each(|(iz, (slab, members))| {
            for &k in members {
                let fp = &prints[k];
                let i = fp.index;
                let weight = cloud.masses[i] / cloud.densities[i] * values[i];

                if let Some([ix, iy, _]) = fp.point {
                    slab[ix + dim * iy] += weight / cell_volume;
                    continue;
                }

                let p = cloud.positions[i];
                let h = cloud.smoothing[i];
                for iy in fp.y.0..=fp.y.1 {
                    for ix in fp.x.0..=fp.x.1 {
                        let r = grid.cell_center(ix, iy, iz).distance(p);
                        let w = cubic_spline(r, h);
                        if w > 0.0 {
                            slab[ix + dim * iy] += weight * w;
                        }
                    }
                }
            }
        });
    out
}

fn nearest(grid: &UniformGrid, cloud: &ParticleCloud<'_>, values: &[f64]) -> Vec<f64> {
    let dim = grid.dim();
    let located: Vec<(usize, [usize; 3])> = (0..cloud.len())
        .into_par_iter()
        .filter_map(|i| grid.locate(cloud.positions[i]).map(|cell| (i, cell)))
        .collect();

    let mut slabs = vec![Vec::new(); dim];
    for &(i, cell) in &located {
        slabs[cell[2]].push((i, cell[0] + dim * cell[1]));
    }

    let mut out = vec![0.0; grid.n_cells()];
    out.par_chunks_mut(dim * dim)
        .zip(slabs.par_iter())
        .for_each(|(slab, members)| {
            let mut mass = vec![0.0; dim * dim];
            for &(i, local) in members {
                slab[local] += cloud.masses[i] * values[i];
                mass[local] += cloud.masses[i];
            }
            for (v, m) in slab.iter_mut().zip(&mass) {
                *v = if *m > 0.0 { *v / m } else { 0.0 };
            }
        });
    out
}
