// crates/gc_config/src/species.rs

//! 分子种类与转动跃迁
//!
//! 静止频率取自各分子的 `molecule_x.inp` 数据文件（LAMDA），单位 Hz，
//! 覆盖 J=1-0 到 J=10-9 共十条跃迁。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::physics::PhysicsConstants;

/// 目标分子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    /// 12CO
    #[serde(rename = "CO")]
    Co,
    /// 13CO
    #[serde(rename = "13CO")]
    Co13,
    /// C18O
    #[serde(rename = "C18O")]
    C18o,
    /// HCO+
    #[serde(rename = "HCOp")]
    Hcop,
    /// H13CO+
    #[serde(rename = "H13COp")]
    H13cop,
    /// HCN
    #[serde(rename = "HCN")]
    Hcn,
    /// HNC
    #[serde(rename = "HNC")]
    Hnc,
}

/// 静止频率表 [Hz]，行与 `Species::ALL` 顺序一致，列为 J_upper = 1..=10
const REST_FREQUENCIES: [[f64; 10]; 7] = [
    // CO
    [
        115.271_201_8e9, 230.538_000_0e9, 345.795_989_9e9, 461.040_768_2e9, 576.267_930_5e9,
        691.473_076_3e9, 806.651_806_0e9, 921.799_700_0e9, 1036.912_393_0e9, 1151.985_452_0e9,
    ],
    // 13CO
    [
        110.201_354_279_8e9, 220.398_684_128_1e9, 330.587_965_221_8e9, 440.765_173_454_7e9,
        550.926_285_045_6e9, 661.067_276_647_2e9, 771.184_125_453_9e9, 881.272_809_310_7e9,
        991.329_306_821_4e9, 1101.349_597_457_1e9,
    ],
    // C18O
    [
        109.782_173_4e9, 219.560_354_1e9, 329.330_552_5e9, 439.088_765_8e9, 548.831_005_5e9,
        658.553_278_2e9, 768.251_593_3e9, 877.921_955_3e9, 987.560_382_2e9, 1097.162_875_3e9,
    ],
    // HCO+
    [
        89.188_524_70e9, 178.375_056_30e9, 267.557_625_90e9, 356.734_223_00e9, 445.902_872_10e9,
        535.061_581_00e9, 624.208_360_60e9, 713.341_227_80e9, 802.458_199_50e9, 891.557_290_30e9,
    ],
    // H13CO+
    [
        86.754_288_4e9, 173.506_700_3e9, 260.255_339_0e9, 346.998_344_0e9, 433.733_832_7e9,
        520.459_884_3e9, 607.174_645_6e9, 693.876_261_2e9, 780.562_812_0e9, 867.232_426_3e9,
    ],
    // HCN
    [
        88.631_602_20e9, 177.261_111_20e9, 265.886_433_90e9, 354.505_477_30e9, 443.116_148_50e9,
        531.716_347_90e9, 620.304_002_20e9, 708.877_005_10e9, 797.433_262_30e9, 885.970_694_90e9,
    ],
    // HNC
    [
        90.663_568_00e9, 181.324_758_00e9, 271.981_142_00e9, 362.630_303_00e9, 453.269_922_00e9,
        543.897_554_00e9, 634.510_826_00e9, 725.107_341_00e9, 815.684_676_00e9, 906.240_459_00e9,
    ],
];

impl Species {
    /// 所有支持的分子
    pub const ALL: [Species; 7] = [
        Self::Co,
        Self::Co13,
        Self::C18o,
        Self::Hcop,
        Self::H13cop,
        Self::Hcn,
        Self::Hnc,
    ];

    fn table_row(self) -> usize {
        match self {
            Self::Co => 0,
            Self::Co13 => 1,
            Self::C18o => 2,
            Self::Hcop => 3,
            Self::H13cop => 4,
            Self::Hcn => 5,
            Self::Hnc => 6,
        }
    }

    /// 文件名中使用的标签（如 `13CO`、`HCOp`）
    pub const fn label(self) -> &'static str {
        match self {
            Self::Co => "CO",
            Self::Co13 => "13CO",
            Self::C18o => "C18O",
            Self::Hcop => "HCOp",
            Self::H13cop => "H13COp",
            Self::Hcn => "HCN",
            Self::Hnc => "HNC",
        }
    }

    /// 小写文件名词干（`molecule_<stem>.inp`，同时也是 lines.inp 中的分子名）
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Co => "co",
            Self::Co13 => "13co",
            Self::C18o => "c18o",
            Self::Hcop => "hcop",
            Self::H13cop => "h13cop",
            Self::Hcn => "hcn",
            Self::Hnc => "hnc",
        }
    }

    /// 静止频率 [Hz]
    pub fn rest_frequency(self, transition: Transition) -> f64 {
        REST_FREQUENCIES[self.table_row()][transition.upper() as usize - 1]
    }

    /// 相对主同位素的丰度因子
    ///
    /// 13C 替代乘 13C/12C，18O 替代乘 18O/16O。
    pub fn isotope_factor(self, physics: &PhysicsConstants) -> f64 {
        match self {
            Self::Co13 | Self::H13cop => physics.c13_over_c12,
            Self::C18o => physics.o18_over_o16,
            Self::Co | Self::Hcop | Self::Hcn | Self::Hnc => 1.0,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Species {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sp| sp.label().eq_ignore_ascii_case(s) || sp.file_stem() == s)
            .ok_or_else(|| ConfigError::invalid("species", s, "未知分子"))
    }
}

/// 转动跃迁 J -> J-1，以上能级 J 表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Transition(u8);

impl Transition {
    /// J=1-0
    pub const J1_0: Transition = Transition(1);

    /// 支持的最高上能级
    pub const MAX_UPPER: u8 = 10;

    /// 创建跃迁，`upper` 必须在 1..=10
    pub fn new(upper: u8) -> Result<Self, ConfigError> {
        if (1..=Self::MAX_UPPER).contains(&upper) {
            Ok(Self(upper))
        } else {
            Err(ConfigError::invalid("transitions", upper, "上能级 J 必须在 1..=10"))
        }
    }

    /// 上能级 J
    #[inline]
    pub const fn upper(self) -> u8 {
        self.0
    }

    /// 下能级 J-1
    #[inline]
    pub const fn lower(self) -> u8 {
        self.0 - 1
    }

    /// 文件名后缀，如 `J10`、`J109`
    pub fn suffix(self) -> String {
        format!("J{}{}", self.upper(), self.lower())
    }

    /// 全部十条跃迁
    pub fn all() -> impl Iterator<Item = Transition> {
        (1..=Self::MAX_UPPER).map(Transition)
    }
}

impl TryFrom<u8> for Transition {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Transition> for u8 {
    fn from(t: Transition) -> Self {
        t.0
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "J={}-{}", self.upper(), self.lower())
    }
}

/// 化学网络（决定丰度来源与数密度文件名）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chemistry {
    /// DESPOTIC
    #[default]
    Despotic,
    /// UCLCHEM
    Uclchem,
}

impl Chemistry {
    /// 文件名中的名称
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Despotic => "despotic",
            Self::Uclchem => "uclchem",
        }
    }
}

impl fmt::Display for Chemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
