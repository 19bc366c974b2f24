// crates/gc_fields/src/registry.rs

//! 派生字段注册系统
//!
//! 派生字段由元数据、依赖列表和计算函数组成。求值时先按深度优先
//! 递归求出依赖，再计算目标字段，结果缓存在 [`ParticleData`] 中。
//!
//! # 名称规则
//!
//! 允许 snake_case（`gas_temperature`）和 Gizmo 风格的驼峰名
//! （`DustDensity`、`H2NumDensity`）：
//! - 以 ASCII 字母开头
//! - 仅含字母、数字和下划线
//! - 不能以下划线结尾，不能包含连续下划线
//!
//! 快照中的原始字段名保留，不能注册为派生字段。
//!
//! # 示例
//!
//! ```rust
//! use gc_fields::{DerivedField, FieldKey, FieldMeta, FieldRegistry, ParticleData, ParticleType};
//!
//! let mut registry = FieldRegistry::new();
//! registry
//!     .add_field(
//!         DerivedField::new(FieldMeta::gas("double_density", "g/cm^3"), |ctx| {
//!             Ok(ctx.field("Density")?.iter().map(|rho| 2.0 * rho).collect())
//!         })
//!         .depends_on(FieldKey::gas("Density")),
//!         false,
//!     )
//!     .unwrap();
//!
//! let mut data = ParticleData::new();
//! data.insert_field(FieldKey::gas("Density"), vec![1.0, 3.0]).unwrap();
//! let values = registry.evaluate(&mut data, &FieldKey::gas("double_density")).unwrap();
//! assert_eq!(values, &[2.0, 6.0]);
//! ```

use gc_foundation::{ensure, require, GcError, GcResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::names::PARTICLE_IDS;
use crate::particles::{FieldKey, ParticleData, ParticleType};

/// 注册错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// 无效字段名
    #[error("无效字段名 '{0}': 须以字母开头，仅含字母、数字和单个下划线")]
    InvalidName(String),

    /// 试图覆盖快照原始字段
    #[error("不能覆盖原始字段 '{0}'")]
    ReservedField(String),

    /// 字段已存在
    #[error("字段 {0} 已存在")]
    DuplicateField(String),
}

impl From<FieldError> for GcError {
    fn from(err: FieldError) -> Self {
        GcError::invalid_input(err.to_string())
    }
}

/// 快照原始字段（禁止注册为派生字段）
const RESERVED_FIELDS: &[&str] = &[
    PARTICLE_IDS,
    "Coordinates",
    "Velocities",
    "Masses",
    "Density",
    "InternalEnergy",
    "SmoothingLength",
    "MolecularMassFraction",
    "NeutralHydrogenAbundance",
    "ElectronAbundance",
];

fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    let mut prev = ' ';
    for ch in chars {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' => {}
            '_' if prev == '_' => return false,
            '_' => {}
            _ => return false,
        }
        prev = ch;
    }

    !name.ends_with('_')
}

fn is_reserved_field(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// 字段元数据
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMeta {
    /// 字段键
    pub key: FieldKey,
    /// 物理单位（CGS）
    pub unit: String,
    /// 描述文本
    pub description: String,
}

impl FieldMeta {
    /// 创建元数据
    #[inline]
    pub fn new(key: FieldKey, unit: impl Into<String>) -> Self {
        Self {
            key,
            unit: unit.into(),
            description: String::new(),
        }
    }

    /// 气体字段元数据
    #[inline]
    pub fn gas(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::new(FieldKey::gas(name), unit)
    }

    /// 添加描述文本
    #[inline]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

/// 计算函数在求值时看到的只读视图
///
/// 默认粒子类型为目标字段的类型。
pub struct FieldContext<'a> {
    data: &'a ParticleData,
    particle_type: ParticleType,
}

impl<'a> FieldContext<'a> {
    /// 创建视图
    pub fn new(data: &'a ParticleData, particle_type: ParticleType) -> Self {
        Self {
            data,
            particle_type,
        }
    }

    /// 同类型粒子的字段
    pub fn field(&self, name: &str) -> GcResult<&'a [f64]> {
        self.data.field(&FieldKey::new(self.particle_type, name))
    }

    /// 同类型粒子的 ID
    pub fn ids(&self) -> &'a [u64] {
        self.data.ids(self.particle_type)
    }

    /// 同类型粒子的 ID，缺失或数量与粒子数不符时报错
    pub fn require_ids(&self) -> GcResult<&'a [u64]> {
        let ids = self.ids();
        ensure!(
            !ids.is_empty() || self.is_empty(),
            GcError::field_not_found(self.particle_type.to_string(), PARTICLE_IDS)
        );
        GcError::check_size(PARTICLE_IDS, self.len(), ids.len())?;
        Ok(ids)
    }

    /// 指定类型粒子的 ID
    pub fn ids_of(&self, particle_type: ParticleType) -> &'a [u64] {
        self.data.ids(particle_type)
    }

    /// 同类型粒子数
    pub fn len(&self) -> usize {
        self.data.len(self.particle_type)
    }

    /// 是否没有粒子
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 计算函数
pub type FieldFn = Arc<dyn Fn(&FieldContext<'_>) -> GcResult<Vec<f64>> + Send + Sync>;

/// 派生字段定义
#[derive(Clone)]
pub struct DerivedField {
    /// 元数据
    pub meta: FieldMeta,
    /// 依赖字段（原始或派生）
    pub dependencies: Vec<FieldKey>,
    function: FieldFn,
}

impl DerivedField {
    /// 创建派生字段
    pub fn new<F>(meta: FieldMeta, function: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> GcResult<Vec<f64>> + Send + Sync + 'static,
    {
        Self {
            meta,
            dependencies: Vec::new(),
            function: Arc::new(function),
        }
    }

    /// 追加依赖
    #[inline]
    pub fn depends_on(mut self, key: FieldKey) -> Self {
        self.dependencies.push(key);
        self
    }

    /// 字段键
    #[inline]
    pub fn key(&self) -> &FieldKey {
        &self.meta.key
    }
}

impl fmt::Debug for DerivedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedField")
            .field("meta", &self.meta)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// 派生字段注册表
///
/// 注册表只保存定义，数据保存在 [`ParticleData`]。
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: HashMap<FieldKey, DerivedField>,
    /// 注册顺序（保证迭代一致性）
    order: Vec<FieldKey>,
}

impl FieldRegistry {
    /// 创建空注册表
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册派生字段
    ///
    /// 同名字段已存在时，`force_override` 为真则替换定义并保持原注册顺序，
    /// 否则返回 [`FieldError::DuplicateField`]。
    pub fn add_field(&mut self, field: DerivedField, force_override: bool) -> Result<(), FieldError> {
        let key = field.key().clone();

        if !is_valid_field_name(&key.name) {
            return Err(FieldError::InvalidName(key.name));
        }
        if is_reserved_field(&key.name) {
            return Err(FieldError::ReservedField(key.name));
        }

        if self.fields.contains_key(&key) {
            if !force_override {
                return Err(FieldError::DuplicateField(key.to_string()));
            }
            debug!(field = %key, "覆盖派生字段定义");
        } else {
            self.order.push(key.clone());
        }

        self.fields.insert(key, field);
        Ok(())
    }

    /// 获取字段定义
    #[inline]
    pub fn get(&self, key: &FieldKey) -> Option<&DerivedField> {
        self.fields.get(key)
    }

    /// 检查字段是否已注册
    #[inline]
    pub fn contains(&self, key: &FieldKey) -> bool {
        self.fields.contains_key(key)
    }

    /// 已注册字段（注册顺序）
    pub fn names(&self) -> impl Iterator<Item = &FieldKey> {
        self.order.iter()
    }

    /// 按注册顺序迭代字段定义
    pub fn iter(&self) -> impl Iterator<Item = &DerivedField> {
        self.order.iter().filter_map(|key| self.fields.get(key))
    }

    /// 字段数量
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 求值字段
    ///
    /// 数据中已有的字段（原始字段或先前求值的缓存）直接返回。
    pub fn evaluate<'d>(&self, data: &'d mut ParticleData, key: &FieldKey) -> GcResult<&'d [f64]> {
        let mut stack = Vec::new();
        self.resolve(data, key, &mut stack)?;
        data.field(key)
    }

    fn resolve(
        &self,
        data: &mut ParticleData,
        key: &FieldKey,
        stack: &mut Vec<FieldKey>,
    ) -> GcResult<()> {
        if data.has_field(key) {
            return Ok(());
        }

        let derived = require!(
            self.fields.get(key),
            GcError::field_not_found(key.particle_type.to_string(), &key.name)
        );

        if stack.contains(key) {
            let chain = stack
                .iter()
                .chain(std::iter::once(key))
                .map(|k| k.name.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(GcError::cyclic_field(chain));
        }

        stack.push(key.clone());
        for dependency in &derived.dependencies {
            self.resolve(data, dependency, stack)?;
        }
        stack.pop();

        let values = (derived.function)(&FieldContext::new(data, key.particle_type))?;
        let expected = data.len(key.particle_type);
        if expected > 0 {
            GcError::check_size(&key.name, expected, values.len())?;
        }
        trace!(field = %key, n = values.len(), "派生字段求值完成");

        data.insert_field(key.clone(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(name: &str, source: &str, factor: f64) -> DerivedField {
        let source_name = source.to_string();
        DerivedField::new(FieldMeta::gas(name, "1"), move |ctx| {
            Ok(ctx.field(&source_name)?.iter().map(|v| v * factor).collect())
        })
        .depends_on(FieldKey::gas(source))
    }

    fn sample_data() -> ParticleData {
        let mut data = ParticleData::new();
        data.set_ids(ParticleType::Gas, vec![1, 2]).unwrap();
        data.insert_field(FieldKey::gas("Density"), vec![1.0, 2.0]).unwrap();
        data
    }

    #[test]
    fn test_field_name_validation() {
        assert!(is_valid_field_name("gas_temperature"));
        assert!(is_valid_field_name("DustDensity"));
        assert!(is_valid_field_name("H2NumDensity"));
        assert!(is_valid_field_name("numberdens_13CO_despotic"));

        assert!(!is_valid_field_name(""));
        assert!(!is_valid_field_name("_private"));
        assert!(!is_valid_field_name("13CO"));
        assert!(!is_valid_field_name("double__underscore"));
        assert!(!is_valid_field_name("trailing_"));
        assert!(!is_valid_field_name("has space"));
    }

    #[test]
    fn test_duplicate_and_override() {
        let mut registry = FieldRegistry::new();
        registry.add_field(scaled("a", "Density", 2.0), false).unwrap();
        registry.add_field(scaled("b", "Density", 3.0), false).unwrap();

        let err = registry.add_field(scaled("a", "Density", 5.0), false).unwrap_err();
        assert!(matches!(err, FieldError::DuplicateField(_)));

        registry.add_field(scaled("a", "Density", 5.0), true).unwrap();
        let names: Vec<_> = registry.names().map(|k| k.name.clone()).collect();
        assert_eq!(names, vec!["a", "b"]);

        let mut data = sample_data();
        let a = registry.evaluate(&mut data, &FieldKey::gas("a")).unwrap();
        assert_eq!(a, &[5.0, 10.0]);
    }

    #[test]
    fn test_reserved_names() {
        let mut registry = FieldRegistry::new();
        let err = registry.add_field(scaled("Density", "Masses", 1.0), true).unwrap_err();
        assert_eq!(err, FieldError::ReservedField("Density".into()));
    }

    #[test]
    fn test_chained_dependencies_are_cached() {
        let mut registry = FieldRegistry::new();
        registry.add_field(scaled("c", "b", 10.0), false).unwrap();
        registry.add_field(scaled("b", "Density", 2.0), false).unwrap();

        let mut data = sample_data();
        let c = registry.evaluate(&mut data, &FieldKey::gas("c")).unwrap();
        assert_eq!(c, &[20.0, 40.0]);
        assert!(data.has_field(&FieldKey::gas("b")));
    }

    #[test]
    fn test_cycle_detection() {
        let mut registry = FieldRegistry::new();
        registry.add_field(scaled("x", "y", 1.0), false).unwrap();
        registry.add_field(scaled("y", "x", 1.0), false).unwrap();

        let mut data = sample_data();
        let err = registry.evaluate(&mut data, &FieldKey::gas("x")).unwrap_err();
        match err {
            GcError::CyclicField { chain } => assert_eq!(chain, "x -> y -> x"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_raw_field() {
        let mut registry = FieldRegistry::new();
        registry.add_field(scaled("e", "InternalEnergy", 1.0), false).unwrap();

        let mut data = sample_data();
        let err = registry.evaluate(&mut data, &FieldKey::gas("e")).unwrap_err();
        assert!(matches!(err, GcError::FieldNotFound { ref name, .. } if name == "InternalEnergy"));
    }

    #[test]
    fn test_wrong_length_result() {
        let mut registry = FieldRegistry::new();
        registry
            .add_field(
                DerivedField::new(FieldMeta::gas("short", "1"), |_| Ok(vec![1.0])),
                false,
            )
            .unwrap();

        let mut data = sample_data();
        let err = registry.evaluate(&mut data, &FieldKey::gas("short")).unwrap_err();
        assert!(matches!(err, GcError::SizeMismatch { .. }));
    }

    #[test]
    fn test_require_ids() {
        let data = sample_data();
        let ctx = FieldContext::new(&data, ParticleType::Gas);
        assert_eq!(ctx.require_ids().unwrap(), &[1, 2]);

        let mut no_ids = ParticleData::new();
        no_ids.insert_field(FieldKey::gas("Density"), vec![1.0, 2.0]).unwrap();
        let ctx = FieldContext::new(&no_ids, ParticleType::Gas);
        assert!(ctx.ids().is_empty());
        let err = ctx.require_ids().unwrap_err();
        assert!(matches!(err, GcError::FieldNotFound { ref name, .. } if name == "ParticleIDs"));

        let empty = ParticleData::new();
        let ctx = FieldContext::new(&empty, ParticleType::Sink);
        assert!(ctx.require_ids().unwrap().is_empty());
    }
}
