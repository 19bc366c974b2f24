// crates/gc_io/tests/io_tests.rs
//!
//! 快照读取、吸积记录与 RADMC-3D 文件集成测试

use gc_config::{CarverConfig, Chemistry, OutputNames, Species, Transition, UnitBase};
use gc_fields::{names, FieldKey, FieldRegistry, ParticleData, ParticleType, UniformGrid};
use gc_io::radmc::{self, JobScript};
use gc_io::{read_accretion_log, read_snapshot, IoError, JsonSnapshotReader};
use glam::DVec3;
use std::sync::Arc;

fn sample_data() -> ParticleData {
    let mut data = ParticleData::new();
    data.set_ids(ParticleType::Gas, vec![1, 2, 3]).unwrap();
    data.set_ids(ParticleType::Sink, vec![50]).unwrap();
    data.insert_field(FieldKey::gas(names::DENSITY), vec![1e-20, 2e-20, 3e-20])
        .unwrap();
    data
}

#[test]
fn test_json_snapshot_roundtrip_through_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("particles.json");
    JsonSnapshotReader::write(&path, &sample_data()).unwrap();

    let data = read_snapshot(&path, &UnitBase::default()).unwrap();
    assert_eq!(data.ids(ParticleType::Gas), &[1, 2, 3]);
    assert_eq!(data.ids(ParticleType::Sink), &[50]);
    assert_eq!(data.field(&FieldKey::gas(names::DENSITY)).unwrap()[2], 3e-20);
}

#[test]
fn test_json_snapshot_length_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"PartType0": {"ids": [1, 2], "fields": {"Density": [1.0]}}}"#,
    )
    .unwrap();

    let err = read_snapshot(&path, &UnitBase::default()).unwrap_err();
    assert!(matches!(err, IoError::Foundation(_)));
}

#[test]
fn test_missing_snapshot() {
    let err = read_snapshot(
        std::path::Path::new("/nonexistent/particles.json"),
        &UnitBase::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn test_accretion_log_drives_mask() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sinkprops.txt");
    std::fs::write(
        &path,
        "# t sink m x y z gas\n1.0 50 1 0 0 0 2\n1.1 51 1 0 0 0 3\n",
    )
    .unwrap();

    let log = Arc::new(read_accretion_log(&path, 1, 6).unwrap());
    assert_eq!(log.len(), 2);

    let registry = FieldRegistry::standard(&CarverConfig::default(), Some(log)).unwrap();
    let mut data = sample_data();
    let mask = registry
        .evaluate(&mut data, &FieldKey::gas(names::ACCRETED_MASK))
        .unwrap();
    assert_eq!(mask, &[0.0, 1.0, 1.0]);
}

#[test]
fn test_grid_file_matches_field_length() {
    let dir = tempfile::tempdir().unwrap();
    let grid = UniformGrid::new(DVec3::ZERO, 1.0, 3).unwrap();
    let grid_path = dir.path().join("amr_grid.inp");
    let field_path = dir.path().join("numberdens_co.inp");

    radmc::write_amr_grid(&grid_path, &grid).unwrap();
    radmc::write_scalar_field(&field_path, &vec![1.0; grid.n_cells()]).unwrap();

    let grid_text = std::fs::read_to_string(&grid_path).unwrap();
    let dims: Vec<usize> = grid_text
        .lines()
        .nth(5)
        .unwrap()
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    let field_text = std::fs::read_to_string(&field_path).unwrap();
    let ncells: usize = field_text.lines().nth(1).unwrap().parse().unwrap();
    assert_eq!(dims.iter().product::<usize>(), ncells);
    assert_eq!(field_text.lines().count(), ncells + 2);
}

#[test]
fn test_job_script_references_generated_names() {
    let names = OutputNames::default();
    let job = JobScript {
        species: Species::C18o,
        chemistry: Chemistry::Despotic,
        transitions: &[Transition::J1_0],
        npix: 64,
        names: &names,
    };
    let script = job.render();
    assert!(script.contains(&names.numberdens(Species::C18o, Chemistry::Despotic)));
    assert!(script.contains(&names.camera_wavelength(Species::C18o, Transition::J1_0)));
    assert!(script.contains("numberdens_c18o.inp"));
}
