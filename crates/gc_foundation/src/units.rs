// crates/gc_foundation/src/units.rs

//! 长度单位
//!
//! 区域中心和半边长可以用 pc、cm、AU、ly 给出，内部统一换算为 cm。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{AU_CM, LIGHT_YEAR_CM, PARSEC_CM};
use crate::error::GcError;

/// 长度单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    /// 秒差距
    #[default]
    #[serde(rename = "pc")]
    Pc,
    /// 厘米
    #[serde(rename = "cm")]
    Cm,
    /// 天文单位
    #[serde(rename = "AU", alias = "au")]
    Au,
    /// 光年
    #[serde(rename = "ly")]
    Ly,
}

impl LengthUnit {
    /// 所有支持的单位
    pub const ALL: [LengthUnit; 4] = [Self::Pc, Self::Cm, Self::Au, Self::Ly];

    /// 一个单位对应的厘米数
    #[inline]
    pub const fn to_cm(self) -> f64 {
        match self {
            Self::Pc => PARSEC_CM,
            Self::Cm => 1.0,
            Self::Au => AU_CM,
            Self::Ly => LIGHT_YEAR_CM,
        }
    }

    /// 单位名称（与配置文件中一致）
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::Cm => "cm",
            Self::Au => "AU",
            Self::Ly => "ly",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = GcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pc" => Ok(Self::Pc),
            "cm" => Ok(Self::Cm),
            "AU" | "au" => Ok(Self::Au),
            "ly" => Ok(Self::Ly),
            other => Err(GcError::invalid_config(
                "region.units",
                other,
                "支持的单位: pc, cm, AU, ly",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cm() {
        assert_eq!(LengthUnit::Cm.to_cm(), 1.0);
        assert!((LengthUnit::Pc.to_cm() - 3.0857e18).abs() / 3.0857e18 < 1e-4);
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for unit in LengthUnit::ALL {
            assert_eq!(unit.as_str().parse::<LengthUnit>().unwrap(), unit);
        }
        assert_eq!("au".parse::<LengthUnit>().unwrap(), LengthUnit::Au);
        assert!("km".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&LengthUnit::Au).unwrap();
        assert_eq!(json, "\"AU\"");
        let unit: LengthUnit = serde_json::from_str("\"pc\"").unwrap();
        assert_eq!(unit, LengthUnit::Pc);
    }
}
