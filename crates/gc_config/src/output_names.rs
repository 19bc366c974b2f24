// crates/gc_config/src/output_names.rs

//! RADMC-3D 输入文件名表
//!
//! 固定名称可在配置中覆盖；与分子、跃迁、化学网络相关的名称按规则生成。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::species::{Chemistry, Species, Transition};

/// 输出文件名配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputNames {
    /// AMR 网格
    #[serde(default = "default_amr_grid")]
    pub amr_grid: String,
    /// H2 数密度
    #[serde(default = "default_h2_numberdens")]
    pub h2_numberdens: String,
    /// 气体速度
    #[serde(default = "default_gas_velocity")]
    pub gas_velocity: String,
    /// 尘埃密度
    #[serde(default = "default_dust_density")]
    pub dust_density: String,
    /// 尘埃温度（RADMC-3D 要求 .dat 后缀）
    #[serde(default = "default_dust_temperature")]
    pub dust_temperature: String,
    /// 微湍流
    #[serde(default = "default_microturbulence")]
    pub microturbulence: String,
    /// 连续谱波长网格
    #[serde(default = "default_wavelength")]
    pub wavelength: String,
    /// 尘埃不透明度
    #[serde(default = "default_dust_kappa")]
    pub dust_kappa: String,
    /// 尘埃不透明度索引
    #[serde(default = "default_dust_opac")]
    pub dust_opac: String,
    /// RADMC-3D 主参数文件
    #[serde(default = "default_radmc3d_inp")]
    pub radmc3d_inp: String,
    /// RADMC-3D 可执行文件名
    #[serde(default = "default_executable")]
    pub executable: String,
    /// 运行参数记录
    #[serde(default = "default_input_info")]
    pub input_info: String,
}

fn default_amr_grid() -> String { "amr_grid.inp".into() }
fn default_h2_numberdens() -> String { "numberdens_h2.inp".into() }
fn default_gas_velocity() -> String { "gas_velocity.inp".into() }
fn default_dust_density() -> String { "dust_density.inp".into() }
fn default_dust_temperature() -> String { "dust_temperature.dat".into() }
fn default_microturbulence() -> String { "microturbulence.inp".into() }
fn default_wavelength() -> String { "wavelength_micron.inp".into() }
fn default_dust_kappa() -> String { "dustkappa_silicate.inp".into() }
fn default_dust_opac() -> String { "dustopac.inp".into() }
fn default_radmc3d_inp() -> String { "radmc3d.inp".into() }
fn default_executable() -> String { "radmc3d".into() }
fn default_input_info() -> String { "input_info.txt".into() }

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            amr_grid: default_amr_grid(),
            h2_numberdens: default_h2_numberdens(),
            gas_velocity: default_gas_velocity(),
            dust_density: default_dust_density(),
            dust_temperature: default_dust_temperature(),
            microturbulence: default_microturbulence(),
            wavelength: default_wavelength(),
            dust_kappa: default_dust_kappa(),
            dust_opac: default_dust_opac(),
            radmc3d_inp: default_radmc3d_inp(),
            executable: default_executable(),
            input_info: default_input_info(),
        }
    }
}

impl OutputNames {
    /// RADMC-3D 读取的分子数密度文件名固定为 `numberdens_<molecule>.inp`
    pub fn radmc_numberdens(species: Species) -> String {
        format!("numberdens_{}.inp", species.file_stem())
    }

    /// 分子数密度（按化学网络区分）
    pub fn numberdens(&self, species: Species, chemistry: Chemistry) -> String {
        format!("numberdens_{}_{}.inp", species.label(), chemistry.as_str())
    }

    /// 气体温度（按分子区分）
    pub fn gas_temperature(&self, species: Species) -> String {
        format!("gas_temperature_{}.inp", species.label())
    }

    /// 分子数据文件（来自已有文件目录）
    pub fn molecule(&self, species: Species) -> String {
        format!("molecule_{}.inp", species.file_stem())
    }

    /// lines.inp 变体
    pub fn lines(&self, species: Species) -> String {
        format!("lines_{}.inp", species.file_stem())
    }

    /// 谱线成像用的相机波长文件
    pub fn camera_wavelength(&self, species: Species, transition: Transition) -> String {
        format!(
            "camera_wavelength_micron_{}{}.inp",
            species.label(),
            transition.suffix()
        )
    }

    /// 作业脚本
    pub fn job_script(&self, species: Species) -> String {
        format!("job_{}.sh", species.file_stem())
    }

    /// 完整的逻辑名 -> 文件名表
    pub fn table(&self) -> BTreeMap<String, String> {
        let mut table = BTreeMap::new();
        for (key, value) in [
            ("amr_grid", &self.amr_grid),
            ("h2_numberdens", &self.h2_numberdens),
            ("gas_velocity", &self.gas_velocity),
            ("dust_density", &self.dust_density),
            ("dust_temperature", &self.dust_temperature),
            ("microturbulence", &self.microturbulence),
            ("wavelength", &self.wavelength),
            ("dust_kappa", &self.dust_kappa),
            ("dust_opac", &self.dust_opac),
            ("radmc3d_inp", &self.radmc3d_inp),
            ("executable", &self.executable),
            ("input_info", &self.input_info),
        ] {
            table.insert(key.to_string(), value.clone());
        }

        for species in Species::ALL {
            let label = species.label();
            for chemistry in [Chemistry::Despotic, Chemistry::Uclchem] {
                table.insert(
                    format!("numberdens_{}_{}", label, chemistry),
                    self.numberdens(species, chemistry),
                );
            }
            table.insert(format!("gas_temperature_{label}"), self.gas_temperature(species));
            table.insert(format!("molecule_{label}"), self.molecule(species));
            table.insert(format!("lines_{label}"), self.lines(species));
            table.insert(format!("job_{label}"), self.job_script(species));
            for transition in Transition::all() {
                table.insert(
                    format!("camera_wavelength_{}_{}", label, transition.suffix()),
                    self.camera_wavelength(species, transition),
                );
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names() {
        let names = OutputNames::default();
        let j10 = Transition::new(1).unwrap();
        let j109 = Transition::new(10).unwrap();

        assert_eq!(names.numberdens(Species::Co, Chemistry::Despotic), "numberdens_CO_despotic.inp");
        assert_eq!(names.numberdens(Species::Hcn, Chemistry::Uclchem), "numberdens_HCN_uclchem.inp");
        assert_eq!(names.gas_temperature(Species::Hnc), "gas_temperature_HNC.inp");
        assert_eq!(names.molecule(Species::H13cop), "molecule_h13cop.inp");
        assert_eq!(names.lines(Species::C18o), "lines_c18o.inp");
        assert_eq!(names.job_script(Species::Co13), "job_13co.sh");
        assert_eq!(
            names.camera_wavelength(Species::Co13, j10),
            "camera_wavelength_micron_13COJ10.inp"
        );
        assert_eq!(
            names.camera_wavelength(Species::Hcop, j109),
            "camera_wavelength_micron_HCOpJ109.inp"
        );
        assert_eq!(OutputNames::radmc_numberdens(Species::Co), "numberdens_co.inp");
    }

    #[test]
    fn test_table_is_complete() {
        let table = OutputNames::default().table();
        // 12 个固定名 + 7 个分子 × (2 数密度 + 温度 + 分子 + lines + 作业 + 10 相机波长)
        assert_eq!(table.len(), 12 + 7 * 16);
        assert_eq!(table["dust_temperature"], "dust_temperature.dat");
        // HCN 与 HNC 的温度文件互不覆盖
        assert_ne!(table["gas_temperature_HCN"], table["gas_temperature_HNC"]);
    }

    #[test]
    fn test_override_from_json() {
        let names: OutputNames = serde_json::from_str(r#"{"amr_grid": "grid.inp"}"#).unwrap();
        assert_eq!(names.amr_grid, "grid.inp");
        assert_eq!(names.gas_velocity, "gas_velocity.inp");
    }
}
