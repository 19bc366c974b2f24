// crates/gc_fields/src/derived.rs

//! 标准派生字段
//!
//! 全部字段定义在 PartType0 上，物理常数在注册时从配置中取出，
//! 计算函数只捕获数值。

use gc_config::{AbundanceSource, CarverConfig, MicroturbulenceModel, SpeciesOutput};
use gc_foundation::GcResult;
use std::sync::Arc;
use tracing::debug;

use crate::accretion::AccretionLog;
use crate::formulas;
use crate::names;
use crate::particles::{FieldKey, ParticleType};
use crate::registry::{DerivedField, FieldContext, FieldMeta, FieldRegistry};

impl FieldRegistry {
    /// 创建标准字段注册表
    ///
    /// 提供 `accretion` 时额外注册 `AccretedMask` 和
    /// `MaskedMolecularNumDensity`。
    pub fn standard(config: &CarverConfig, accretion: Option<Arc<AccretionLog>>) -> GcResult<Self> {
        let mut registry = Self::new();
        register_standard_fields(&mut registry, config, accretion)?;
        Ok(registry)
    }
}

/// 向注册表追加标准字段（同名字段被覆盖）
pub fn register_standard_fields(
    registry: &mut FieldRegistry,
    config: &CarverConfig,
    accretion: Option<Arc<AccretionLog>>,
) -> GcResult<()> {
    let physics = &config.physics;

    let constant = physics.temperature_constant();
    let ceiling = physics.temperature_ceiling;
    registry.add_field(
        DerivedField::new(
            FieldMeta::gas(names::GAS_TEMPERATURE, "K").with_desc("理想气体温度，超过上限置零"),
            move |ctx| {
                Ok(formulas::gas_temperature_field(
                    ctx.field(names::INTERNAL_ENERGY)?,
                    constant,
                    ceiling,
                ))
            },
        )
        .depends_on(FieldKey::gas(names::INTERNAL_ENERGY)),
        true,
    )?;

    registry.add_field(
        DerivedField::new(
            FieldMeta::gas(names::DUST_TEMPERATURE, "K").with_desc("尘埃温度，取气体温度"),
            |ctx| Ok(ctx.field(names::GAS_TEMPERATURE)?.to_vec()),
        )
        .depends_on(FieldKey::gas(names::GAS_TEMPERATURE)),
        true,
    )?;

    let dust_to_gas = physics.dust_to_gas;
    registry.add_field(
        DerivedField::new(FieldMeta::gas(names::DUST_DENSITY, "g/cm^3"), move |ctx| {
            Ok(formulas::dust_density_field(ctx.field(names::DENSITY)?, dust_to_gas))
        })
        .depends_on(FieldKey::gas(names::DENSITY)),
        true,
    )?;

    let helium = physics.helium_mass_fraction;
    let ratio = physics.mol_hydrogen_ratio;
    registry.add_field(
        DerivedField::new(FieldMeta::gas(names::H2_NUM_DENSITY, "cm^-3"), move |ctx| {
            Ok(formulas::h2_number_density_field(
                ctx.field(names::DENSITY)?,
                ctx.field(names::MOLECULAR_MASS_FRACTION)?,
                ctx.field(names::NEUTRAL_HYDROGEN_ABUNDANCE)?,
                helium,
                ratio,
            ))
        })
        .depends_on(FieldKey::gas(names::DENSITY))
        .depends_on(FieldKey::gas(names::MOLECULAR_MASS_FRACTION))
        .depends_on(FieldKey::gas(names::NEUTRAL_HYDROGEN_ABUNDANCE)),
        true,
    )?;

    let thresholds = Thresholds {
        density: physics.h2_density_threshold,
        temperature: physics.cold_gas_threshold,
    };
    let abundance = physics.molecular_abundance;
    registry.add_field(
        molecular_field(
            FieldMeta::gas(names::MOLECULAR_NUM_DENSITY, "cm^-3"),
            Abundance::Constant(abundance),
            thresholds,
            None,
        ),
        true,
    )?;

    let speed = match config.microturbulence {
        MicroturbulenceModel::Constant => physics.microturbulence_speed,
        MicroturbulenceModel::LinewidthSize => {
            formulas::linewidth_size_speed(config.region.cell_size_cm())
        }
    };
    registry.add_field(
        DerivedField::new(FieldMeta::gas(names::MICROTURBULENCE, "cm/s"), move |ctx| {
            Ok(vec![speed; ctx.len()])
        }),
        true,
    )?;

    if let Some(log) = accretion.as_ref() {
        let log = Arc::clone(log);
        registry.add_field(
            DerivedField::new(
                FieldMeta::gas(names::ACCRETED_MASK, "1").with_desc("出现在吸积记录中的气体粒子"),
                move |ctx| Ok(log.accreted_mask(ctx.require_ids()?)),
            ),
            true,
        )?;

        registry.add_field(
            molecular_field(
                FieldMeta::gas(names::MASKED_MOLECULAR_NUM_DENSITY, "cm^-3"),
                Abundance::Constant(abundance),
                thresholds,
                accretion.clone(),
            ),
            true,
        )?;
    }

    let species_mask = if config.mask_abundance {
        accretion.clone()
    } else {
        None
    };
    for output in &config.species {
        registry.add_field(species_field(config, output, species_mask.clone()), true)?;
    }

    debug!(fields = registry.len(), "标准派生字段注册完成");
    Ok(())
}

/// 某个分子输出对应的字段键
pub fn species_field_key(output: &SpeciesOutput) -> FieldKey {
    FieldKey::gas(names::species_number_density(
        output.species.label(),
        output.chemistry.as_str(),
    ))
}

#[derive(Debug, Clone, Copy)]
struct Thresholds {
    density: f64,
    temperature: f64,
}

#[derive(Debug, Clone)]
enum Abundance {
    Constant(f64),
    Field { name: String, factor: f64 },
}

impl Abundance {
    fn values(&self, ctx: &FieldContext<'_>) -> GcResult<Vec<f64>> {
        match self {
            Self::Constant(x) => Ok(vec![*x; ctx.len()]),
            Self::Field { name, factor } => {
                Ok(ctx.field(name)?.iter().map(|x| x * factor).collect())
            }
        }
    }
}

fn species_field(
    config: &CarverConfig,
    output: &SpeciesOutput,
    mask: Option<Arc<AccretionLog>>,
) -> DerivedField {
    let factor = output.species.isotope_factor(&config.physics);
    let abundance = match &output.abundance {
        AbundanceSource::Global => Abundance::Constant(config.physics.molecular_abundance * factor),
        AbundanceSource::Constant(x) => Abundance::Constant(x * factor),
        AbundanceSource::Field(name) => Abundance::Field {
            name: name.clone(),
            factor,
        },
    };

    let key = species_field_key(output);
    let meta = FieldMeta::new(key, "cm^-3").with_desc(format!(
        "{} 数密度（{}）",
        output.species, output.chemistry
    ));
    let thresholds = Thresholds {
        density: config.physics.h2_density_threshold,
        temperature: config.physics.cold_gas_threshold,
    };
    molecular_field(meta, abundance, thresholds, mask)
}

fn molecular_field(
    meta: FieldMeta,
    abundance: Abundance,
    thresholds: Thresholds,
    mask: Option<Arc<AccretionLog>>,
) -> DerivedField {
    let abundance_dependency = match &abundance {
        Abundance::Field { name, .. } => Some(FieldKey::gas(name.clone())),
        Abundance::Constant(_) => None,
    };

    let mut field = DerivedField::new(meta, move |ctx| {
        let x = abundance.values(ctx)?;
        let mask = match &mask {
            Some(log) => Some(log.existing_sink_mask(
                ctx.require_ids()?,
                ctx.ids_of(ParticleType::Sink),
            )),
            None => None,
        };
        formulas::molecular_number_density_field(
            ctx.field(names::H2_NUM_DENSITY)?,
            &x,
            ctx.field(names::GAS_TEMPERATURE)?,
            mask.as_deref(),
            thresholds.density,
            thresholds.temperature,
        )
    })
    .depends_on(FieldKey::gas(names::H2_NUM_DENSITY))
    .depends_on(FieldKey::gas(names::GAS_TEMPERATURE));

    if let Some(key) = abundance_dependency {
        field = field.depends_on(key);
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_config::{Chemistry, Species};
    use gc_foundation::constants::MASS_HYDROGEN_CGS;

    #[test]
    fn test_standard_field_names() {
        let registry = FieldRegistry::standard(&CarverConfig::default(), None).unwrap();
        let names: Vec<_> = registry.names().map(|k| k.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "gas_temperature",
                "dust_temperature",
                "DustDensity",
                "H2NumDensity",
                "MolecularNumDensity",
                "microturbulence_speed",
                "numberdens_CO_despotic",
            ]
        );
    }

    #[test]
    fn test_accretion_fields_registered() {
        let log = Arc::new(AccretionLog::default());
        let registry = FieldRegistry::standard(&CarverConfig::default(), Some(log)).unwrap();
        assert!(registry.contains(&FieldKey::gas(names::ACCRETED_MASK)));
        assert!(registry.contains(&FieldKey::gas(names::MASKED_MOLECULAR_NUM_DENSITY)));
    }

    #[test]
    fn test_species_key() {
        let output = SpeciesOutput {
            species: Species::Co13,
            chemistry: Chemistry::Uclchem,
            abundance: AbundanceSource::Global,
        };
        assert_eq!(species_field_key(&output).name, "numberdens_13CO_uclchem");
    }

    #[test]
    fn test_isotope_scaling() {
        let mut config = CarverConfig::default();
        config.species = vec![
            SpeciesOutput::default(),
            SpeciesOutput {
                species: Species::Co13,
                ..Default::default()
            },
        ];
        let registry = FieldRegistry::standard(&config, None).unwrap();

        let mut data = crate::ParticleData::new();
        data.set_ids(ParticleType::Gas, vec![1]).unwrap();
        // n_H2 = 1e4 cm^-3, T 远低于 100 K
        let rho = 1e4 * 2.0 * MASS_HYDROGEN_CGS / (1.0 - 0.284);
        data.insert_field(FieldKey::gas(names::DENSITY), vec![rho]).unwrap();
        data.insert_field(FieldKey::gas(names::MOLECULAR_MASS_FRACTION), vec![1.0]).unwrap();
        data.insert_field(FieldKey::gas(names::NEUTRAL_HYDROGEN_ABUNDANCE), vec![1.0]).unwrap();
        data.insert_field(FieldKey::gas(names::INTERNAL_ENERGY), vec![1e11]).unwrap();

        let co = registry
            .evaluate(&mut data, &FieldKey::gas("numberdens_CO_despotic"))
            .unwrap()[0];
        let co13 = registry
            .evaluate(&mut data, &FieldKey::gas("numberdens_13CO_despotic"))
            .unwrap()[0];
        assert!((co - 1.0).abs() < 1e-9, "{co}");
        assert!((co13 - co / 50.0).abs() < 1e-12);
    }
}
