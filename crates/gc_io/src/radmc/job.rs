// crates/gc_io/src/radmc/job.rs

//! 谱线成像作业脚本
//!
//! RADMC-3D 只读取固定文件名。脚本把按分子、跃迁命名的文件复制到这些
//! 名称上，然后逐条跃迁成像并重命名输出。

use gc_config::{Chemistry, OutputNames, Species, Transition};
use std::io::Write;
use std::path::Path;

use super::write_file;
use crate::error::IoResult;

/// 作业脚本参数
#[derive(Debug, Clone)]
pub struct JobScript<'a> {
    /// 分子
    pub species: Species,
    /// 化学网络
    pub chemistry: Chemistry,
    /// 需要成像的跃迁
    pub transitions: &'a [Transition],
    /// 图像像素数
    pub npix: usize,
    /// 文件名表
    pub names: &'a OutputNames,
}

impl JobScript<'_> {
    /// 脚本内容
    pub fn render(&self) -> String {
        let sp = self.species;
        let names = self.names;
        let mut s = String::new();

        s.push_str("#!/bin/sh\n");
        s.push_str(&format!("# RADMC-3D line images: {} ({})\n", sp, self.chemistry));
        s.push_str("set -e\n");
        s.push_str(&format!(
            "cp {} {}\n",
            names.numberdens(sp, self.chemistry),
            OutputNames::radmc_numberdens(sp)
        ));
        s.push_str(&format!("cp {} gas_temperature.inp\n", names.gas_temperature(sp)));
        s.push_str(&format!("cp {} lines.inp\n", names.lines(sp)));

        for &transition in self.transitions {
            s.push_str(&format!("\n# {transition}\n"));
            s.push_str(&format!(
                "cp {} camera_wavelength_micron.inp\n",
                names.camera_wavelength(sp, transition)
            ));
            s.push_str(&format!(
                "{} image npix {} loadlambda\n",
                names.executable, self.npix
            ));
            s.push_str(&format!(
                "mv image.out image_{}{}.out\n",
                sp.label(),
                transition.suffix()
            ));
        }
        s
    }
}

/// 写出作业脚本（Unix 上设为可执行）
pub fn write_job_script(path: &Path, job: &JobScript<'_>) -> IoResult<()> {
    let content = job.render();
    write_file(path, |w| w.write_all(content.as_bytes()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(|e| crate::error::IoError::access(path, e))?;
    }

    Ok(())
}
