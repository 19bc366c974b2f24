// crates/gc_io/src/radmc/wavelength.rs

//! 连续谱波长网格与谱线相机波长

use gc_foundation::constants::{KMS_TO_CMS, MICRON_CM, SPEED_OF_LIGHT_CGS};
use std::io::Write;
use std::path::Path;

use super::{write_column, write_file};
use crate::error::IoResult;

/// 对数均匀的波长网格 [μm]，含两端点
pub fn wavelength_grid(lambda_min: f64, lambda_max: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![lambda_min; n];
    }
    let (lo, hi) = (lambda_min.log10(), lambda_max.log10());
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| 10f64.powf(lo + step * i as f64)).collect()
}

/// 谱线附近的相机波长 [μm]
///
/// 中心为静止波长 λ0 = c/ν，速度在 [-vmax, vmax] km/s 上均匀取 `nwav` 点，
/// λ = λ0 (1 + v/c)。
pub fn camera_wavelengths(rest_frequency_hz: f64, vmax_kms: f64, nwav: usize) -> Vec<f64> {
    let lambda0 = SPEED_OF_LIGHT_CGS / rest_frequency_hz / MICRON_CM;
    if nwav <= 1 {
        return vec![lambda0; nwav];
    }
    let dv = 2.0 * vmax_kms / (nwav - 1) as f64;
    (0..nwav)
        .map(|i| {
            let v = (-vmax_kms + dv * i as f64) * KMS_TO_CMS;
            lambda0 * (1.0 + v / SPEED_OF_LIGHT_CGS)
        })
        .collect()
}

/// wavelength_micron.inp：点数，随后每行一个波长
pub fn write_wavelength_micron(path: &Path, lambdas: &[f64]) -> IoResult<()> {
    write_file(path, |w| {
        writeln!(w, "{}", lambdas.len())?;
        write_column(w, lambdas)
    })
}

/// camera_wavelength_micron.inp
pub fn write_camera_wavelength(
    path: &Path,
    rest_frequency_hz: f64,
    vmax_kms: f64,
    nwav: usize,
) -> IoResult<()> {
    write_wavelength_micron(path, &camera_wavelengths(rest_frequency_hz, vmax_kms, nwav))
}
