// crates/gc_fields/src/particles.rs

//! 粒子数据容器
//!
//! 按粒子类型分组保存 ID 与浮点字段。原始字段由读取器写入，
//! 派生字段由注册表求值后缓存在同一容器中。

use gc_foundation::{GcError, GcResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 粒子类型（对应 HDF5 组 `PartTypeN`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParticleType {
    /// 气体 PartType0
    Gas,
    /// sink 粒子 PartType5
    Sink,
    /// 其他类型
    Other(u8),
}

impl ParticleType {
    /// 类型编号
    pub const fn index(self) -> u8 {
        match self {
            Self::Gas => 0,
            Self::Sink => 5,
            Self::Other(n) => n,
        }
    }

    /// 由编号构造
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Gas,
            5 => Self::Sink,
            n => Self::Other(n),
        }
    }

    /// HDF5 组名
    pub fn group_name(self) -> String {
        format!("PartType{}", self.index())
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartType{}", self.index())
    }
}

impl FromStr for ParticleType {
    type Err = GcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("PartType")
            .and_then(|n| n.parse::<u8>().ok())
            .map(Self::from_index)
            .ok_or_else(|| GcError::invalid_input(format!("无效粒子类型: {s}")))
    }
}

impl TryFrom<String> for ParticleType {
    type Error = GcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParticleType> for String {
    fn from(value: ParticleType) -> Self {
        value.to_string()
    }
}

/// 字段键：(粒子类型, 字段名)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    /// 粒子类型
    pub particle_type: ParticleType,
    /// 字段名
    pub name: String,
}

impl FieldKey {
    /// 创建字段键
    pub fn new(particle_type: ParticleType, name: impl Into<String>) -> Self {
        Self {
            particle_type,
            name: name.into(),
        }
    }

    /// 气体字段
    pub fn gas(name: impl Into<String>) -> Self {
        Self::new(ParticleType::Gas, name)
    }

    /// sink 字段
    pub fn sink(name: impl Into<String>) -> Self {
        Self::new(ParticleType::Sink, name)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.particle_type, self.name)
    }
}

/// 单一类型的粒子集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleSet {
    /// 粒子 ID（ParticleIDs）
    #[serde(default)]
    pub ids: Vec<u64>,
    /// 字段名 -> 逐粒子数值
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<f64>>,
}

impl ParticleSet {
    /// 粒子数；无 ID 时取任一字段长度
    pub fn len(&self) -> usize {
        if !self.ids.is_empty() {
            return self.ids.len();
        }
        self.fields.values().next().map_or(0, Vec::len)
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 检查所有字段长度与 ID 一致
    pub fn validate(&self) -> GcResult<()> {
        let n = self.len();
        for (name, values) in &self.fields {
            GcError::check_size(name, n, values.len())?;
        }
        Ok(())
    }
}

/// 一个快照内所有类型的粒子数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleData {
    sets: BTreeMap<ParticleType, ParticleSet>,
}

impl ParticleData {
    /// 空数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 由粒子集合构造，并检查长度一致性
    pub fn from_sets(sets: BTreeMap<ParticleType, ParticleSet>) -> GcResult<Self> {
        for set in sets.values() {
            set.validate()?;
        }
        Ok(Self { sets })
    }

    /// 设置某类粒子的 ID
    pub fn set_ids(&mut self, particle_type: ParticleType, ids: Vec<u64>) -> GcResult<()> {
        let set = self.sets.entry(particle_type).or_default();
        if let Some((name, values)) = set.fields.iter().next() {
            GcError::check_size(name, values.len(), ids.len())?;
        }
        set.ids = ids;
        Ok(())
    }

    /// 插入字段，长度必须与已有粒子数一致
    pub fn insert_field(&mut self, key: FieldKey, values: Vec<f64>) -> GcResult<()> {
        let set = self.sets.entry(key.particle_type).or_default();
        let n = set.len();
        if n > 0 {
            GcError::check_size(&key.name, n, values.len())?;
        }
        set.fields.insert(key.name, values);
        Ok(())
    }

    /// 读取字段
    pub fn field(&self, key: &FieldKey) -> GcResult<&[f64]> {
        self.sets
            .get(&key.particle_type)
            .and_then(|set| set.fields.get(&key.name))
            .map(Vec::as_slice)
            .ok_or_else(|| GcError::field_not_found(key.particle_type.to_string(), &key.name))
    }

    /// 字段是否存在
    pub fn has_field(&self, key: &FieldKey) -> bool {
        self.sets
            .get(&key.particle_type)
            .is_some_and(|set| set.fields.contains_key(&key.name))
    }

    /// 某类粒子的 ID；该类型不存在时为空
    pub fn ids(&self, particle_type: ParticleType) -> &[u64] {
        self.sets
            .get(&particle_type)
            .map_or(&[][..], |set| set.ids.as_slice())
    }

    /// 某类粒子数
    pub fn len(&self, particle_type: ParticleType) -> usize {
        self.sets.get(&particle_type).map_or(0, ParticleSet::len)
    }

    /// 是否没有任何粒子
    pub fn is_empty(&self) -> bool {
        self.sets.values().all(ParticleSet::is_empty)
    }

    /// 某类粒子集合
    pub fn set(&self, particle_type: ParticleType) -> Option<&ParticleSet> {
        self.sets.get(&particle_type)
    }

    /// 已有的粒子类型
    pub fn particle_types(&self) -> impl Iterator<Item = ParticleType> + '_ {
        self.sets.keys().copied()
    }
}
