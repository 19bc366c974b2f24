// apps/gc_cli/src/commands/run.rs

//! 切割命令
//!
//! 读取快照与吸积记录，计算派生字段，插值到均匀网格并写出
//! RADMC-3D 输入文件、作业脚本和运行记录。

use anyhow::{Context, Result};
use clap::Args;
use gc_config::CarverConfig;
use gc_fields::{
    deposit, names, select_overlapping, AccretionLog, FieldKey, FieldRegistry, ParticleCloud,
    ParticleData, UniformGrid,
};
use gc_io::radmc::{self, JobScript};
use gc_io::{read_accretion_log, read_snapshot, stage_existing_files, write_input_info, StageReport};
use glam::DVec3;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// 切割参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// JSON 粒子转储（替代 HDF5 快照）
    #[arg(short, long, conflicts_with = "snapshot")]
    pub particles: Option<PathBuf>,

    /// HDF5 快照路径（默认由配置生成）
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// 输出根目录（覆盖配置）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 网格分辨率（覆盖配置）
    #[arg(long)]
    pub dim: Option<usize>,
}

/// 一次切割的结果
#[derive(Debug)]
pub struct RunSummary {
    /// 运行目录
    pub run_dir: PathBuf,
    /// 写出的文件
    pub files: Vec<PathBuf>,
    /// 参与插值的气体粒子数
    pub selected: usize,
    /// 外部文件复制结果
    pub staged: StageReport,
}

/// 执行切割命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== Gizmo Carver 启动 ===");
    let start = Instant::now();

    let mut config = CarverConfig::from_file(&args.config)
        .with_context(|| format!("无法加载配置: {}", args.config.display()))?;
    if let Some(dim) = args.dim {
        config.region.dim = dim;
    }
    if let Some(output) = &args.output {
        config.paths.output_filepath = output.clone();
    }
    config.validate().context("配置无效")?;

    let snapshot_path = args
        .particles
        .or(args.snapshot)
        .unwrap_or_else(|| config.snapshot.hdf5_path());
    let data = read_snapshot(&snapshot_path, &config.snapshot.unit_base)
        .with_context(|| format!("无法读取快照: {}", snapshot_path.display()))?;

    let accretion = match &config.accretion.log_path {
        Some(path) => {
            let log = read_accretion_log(path, config.accretion.sink_column, config.accretion.gas_column)
                .with_context(|| format!("无法读取吸积记录: {}", path.display()))?;
            Some(Arc::new(log))
        }
        None => None,
    };

    let summary = carve(&config, data, accretion, &snapshot_path)?;

    info!("=== 切割完成 ===");
    info!("运行目录: {}", summary.run_dir.display());
    info!("写出文件: {}", summary.files.len());
    info!("参与插值的粒子: {}", summary.selected);
    if !summary.staged.is_complete() {
        warn!("缺少外部文件: {}", summary.staged.missing.join(", "));
    }
    info!("耗时: {:.2} s", start.elapsed().as_secs_f64());
    Ok(())
}

/// 切割流程（不含输入读取）
pub fn carve(
    config: &CarverConfig,
    mut data: ParticleData,
    accretion: Option<Arc<AccretionLog>>,
    snapshot_path: &Path,
) -> Result<RunSummary> {
    let registry = FieldRegistry::standard(config, accretion).context("注册派生字段失败")?;
    let grid = UniformGrid::from_region(&config.region).context("网格无效")?;
    info!(
        "网格: {}³, 单元边长 {:.4e} cm, 中心 {:?}",
        grid.dim(),
        grid.cell_size(),
        grid.center()
    );

    let run_dir = config.run_directory();
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("无法创建运行目录: {}", run_dir.display()))?;

    // 选取核范围与区域相交的气体粒子
    let positions = gas_positions(&data)?;
    let smoothing = raw(&data, names::SMOOTHING_LENGTH)?;
    let selection = select_overlapping(&grid, &positions, &smoothing);
    if selection.is_empty() {
        warn!("区域内没有气体粒子，输出全为零");
    }

    let cloud_positions: Vec<DVec3> = selection.iter().map(|&i| positions[i]).collect();
    let masses = pick(&raw(&data, names::MASSES)?, &selection);
    let densities = pick(&raw(&data, names::DENSITY)?, &selection);
    let smoothing = pick(&smoothing, &selection);
    let cloud = ParticleCloud {
        positions: &cloud_positions,
        masses: &masses,
        densities: &densities,
        smoothing: &smoothing,
    };

    let gridded = |data: &mut ParticleData, name: &str| -> Result<Vec<f64>> {
        let key = FieldKey::gas(name);
        let values = registry
            .evaluate(data, &key)
            .with_context(|| format!("计算字段失败: {key}"))?;
        let values = pick(values, &selection);
        deposit(&grid, &cloud, &values, config.deposit)
            .with_context(|| format!("插值失败: {key}"))
    };

    let out = &config.outputs;
    let mut files = Vec::new();
    let mut path = |name: &str| {
        let p = run_dir.join(name);
        files.push(p.clone());
        p
    };

    radmc::write_amr_grid(&path(&out.amr_grid), &grid)?;

    let h2 = gridded(&mut data, names::H2_NUM_DENSITY)?;
    radmc::write_scalar_field(&path(&out.h2_numberdens), &h2)?;

    let dust = gridded(&mut data, names::DUST_DENSITY)?;
    radmc::write_dust_field(&path(&out.dust_density), &dust)?;

    let dust_temperature = gridded(&mut data, names::DUST_TEMPERATURE)?;
    radmc::write_dust_field(&path(&out.dust_temperature), &dust_temperature)?;

    let gas_temperature = gridded(&mut data, names::GAS_TEMPERATURE)?;

    let turbulence = gridded(&mut data, names::MICROTURBULENCE)?;
    radmc::write_scalar_field(&path(&out.microturbulence), &turbulence)?;

    let [vx, vy, vz] = names::VELOCITY;
    let velocity = [
        gridded(&mut data, vx)?,
        gridded(&mut data, vy)?,
        gridded(&mut data, vz)?,
    ];
    radmc::write_vector_field(
        &path(&out.gas_velocity),
        [&velocity[0], &velocity[1], &velocity[2]],
    )?;

    let wavelengths = radmc::wavelength_grid(
        config.wavelength.lambda_min,
        config.wavelength.lambda_max,
        config.wavelength.n_lambda,
    );
    radmc::write_wavelength_micron(&path(&out.wavelength), &wavelengths)?;

    let mut written_species = BTreeSet::new();
    for output in &config.species {
        let sp = output.species;
        let key = gc_fields::derived::species_field_key(output);
        let numberdens = gridded(&mut data, &key.name)?;
        radmc::write_scalar_field(&path(&out.numberdens(sp, output.chemistry)), &numberdens)?;

        radmc::write_job_script(
            &path(&out.job_script(sp)),
            &JobScript {
                species: sp,
                chemistry: output.chemistry,
                transitions: &config.transitions,
                npix: config.region.dim,
                names: out,
            },
        )?;

        if !written_species.insert(sp) {
            continue;
        }
        radmc::write_scalar_field(&path(&out.gas_temperature(sp)), &gas_temperature)?;
        if config.wavelength.write_line_file {
            radmc::write_lines_inp(&path(&out.lines(sp)), &[sp])?;
        }
        for &transition in &config.transitions {
            radmc::write_camera_wavelength(
                &path(&out.camera_wavelength(sp, transition)),
                sp.rest_frequency(transition),
                config.wavelength.vmax,
                config.wavelength.nwav,
            )?;
        }
    }

    let staged = stage_existing_files(config, &run_dir)?;
    write_input_info(&path(&out.input_info), config, snapshot_path)?;

    Ok(RunSummary {
        run_dir,
        files,
        selected: selection.len(),
        staged,
    })
}

fn raw(data: &ParticleData, name: &str) -> Result<Vec<f64>> {
    Ok(data
        .field(&FieldKey::gas(name))
        .with_context(|| format!("快照缺少气体字段: {name}"))?
        .to_vec())
}

fn gas_positions(data: &ParticleData) -> Result<Vec<DVec3>> {
    let [x, y, z] = names::POSITION;
    let (x, y, z) = (raw(data, x)?, raw(data, y)?, raw(data, z)?);
    Ok(x.iter()
        .zip(&y)
        .zip(&z)
        .map(|((&x, &y), &z)| DVec3::new(x, y, z))
        .collect())
}

fn pick(values: &[f64], selection: &[usize]) -> Vec<f64> {
    selection.iter().map(|&i| values[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_config::{Species, SpeciesOutput, Transition};
    use gc_fields::ParticleType;
    use gc_foundation::constants::{MASS_HYDROGEN_CGS, PARSEC_CM};

    /// 原点附近的 8 个致密冷气体粒子
    fn sample_particles(config: &CarverConfig) -> ParticleData {
        let n = 8;
        let c = config.physics.temperature_constant();
        let rho = 1e4 * 2.0 * MASS_HYDROGEN_CGS / (1.0 - config.physics.helium_mass_fraction);
        let offsets: Vec<f64> = (0..n).map(|i| (i as f64 - 3.5) * 0.1 * PARSEC_CM).collect();

        let mut data = ParticleData::new();
        data.set_ids(ParticleType::Gas, (1..=n as u64).collect()).unwrap();
        let mut insert = |name: &str, values: Vec<f64>| {
            data.insert_field(FieldKey::gas(name), values).unwrap();
        };
        insert(names::POSITION[0], offsets.clone());
        insert(names::POSITION[1], vec![0.0; n]);
        insert(names::POSITION[2], vec![0.0; n]);
        insert(names::VELOCITY[0], vec![1e5; n]);
        insert(names::VELOCITY[1], vec![0.0; n]);
        insert(names::VELOCITY[2], vec![-1e5; n]);
        insert(names::MASSES, vec![1e33; n]);
        insert(names::DENSITY, vec![rho; n]);
        insert(names::SMOOTHING_LENGTH, vec![0.4 * PARSEC_CM; n]);
        insert(names::INTERNAL_ENERGY, vec![20.0 / c; n]);
        insert(names::MOLECULAR_MASS_FRACTION, vec![1.0; n]);
        insert(names::NEUTRAL_HYDROGEN_ABUNDANCE, vec![1.0; n]);
        data
    }

    fn test_config(output: &Path, existing: &Path) -> CarverConfig {
        let mut config = CarverConfig::default();
        config.region.center = [0.0, 0.0, 0.0];
        config.region.half_size = 1.0;
        config.region.dim = 4;
        config.paths.output_filepath = output.to_path_buf();
        config.paths.existing_filepath = existing.to_path_buf();
        config.wavelength.nwav = 8;
        config.wavelength.n_lambda = 10;
        config.species.push(SpeciesOutput {
            species: Species::Co13,
            ..Default::default()
        });
        config.transitions = vec![Transition::J1_0, Transition::new(2).unwrap()];
        config
    }

    fn read_values(path: &Path, header: usize) -> Vec<f64> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .skip(header)
            .map(|l| l.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_carve_writes_radmc_inputs() {
        let output = tempfile::tempdir().unwrap();
        let existing = tempfile::tempdir().unwrap();
        std::fs::write(existing.path().join("molecule_co.inp"), "co\n").unwrap();

        let config = test_config(output.path(), existing.path());
        let data = sample_particles(&config);
        let summary = carve(&config, data, None, Path::new("particles.json")).unwrap();

        let run_dir = output.path().join("sn2000_4");
        assert_eq!(summary.run_dir, run_dir);
        assert_eq!(summary.selected, 8);
        assert_eq!(summary.staged.copied, vec!["molecule_co.inp"]);

        for name in [
            "amr_grid.inp",
            "numberdens_h2.inp",
            "dust_density.inp",
            "dust_temperature.dat",
            "gas_velocity.inp",
            "microturbulence.inp",
            "wavelength_micron.inp",
            "numberdens_CO_despotic.inp",
            "numberdens_13CO_despotic.inp",
            "gas_temperature_CO.inp",
            "gas_temperature_13CO.inp",
            "lines_co.inp",
            "lines_13co.inp",
            "camera_wavelength_micron_COJ10.inp",
            "camera_wavelength_micron_13COJ21.inp",
            "job_co.sh",
            "job_13co.sh",
            "input_info.txt",
            "molecule_co.inp",
        ] {
            assert!(run_dir.join(name).is_file(), "{name}");
        }

        let co = read_values(&run_dir.join("numberdens_CO_despotic.inp"), 2);
        let co13 = read_values(&run_dir.join("numberdens_13CO_despotic.inp"), 2);
        assert_eq!(co.len(), 64);
        assert!(co.iter().any(|&v| v > 0.0));
        for (a, b) in co.iter().zip(&co13) {
            assert!((a / 50.0 - b).abs() <= 1e-6 * a.abs().max(1e-30));
        }

        let dust = read_values(&run_dir.join("dust_density.inp"), 3);
        assert_eq!(dust.len(), 64);

        let turbulence = read_values(&run_dir.join("microturbulence.inp"), 2);
        assert!(turbulence.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_carve_requires_positions() {
        let output = tempfile::tempdir().unwrap();
        let config = test_config(output.path(), output.path());
        let mut data = ParticleData::new();
        data.insert_field(FieldKey::gas(names::DENSITY), vec![1.0]).unwrap();

        let err = carve(&config, data, None, Path::new("x.json")).unwrap_err();
        assert!(err.to_string().contains("particle_position_x"));
    }
}
