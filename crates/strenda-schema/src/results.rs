//! # Results Record Kinds
//!
//! The five results sections of a StrENDA Biocat report. Each kind is a flat
//! set of required numbers and strings plus the optional JSON-LD envelope.
//! Quantities are paired with a free-text unit field; units, ranges and
//! formulas are informative only and are never checked here.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use strenda_core::JsonLd;

use crate::decode::RecordSchema;
use crate::registry::{FieldSet, SchemaDeclarationError, SchemaRegistry};

macro_rules! record_schema {
    ($ty:ident, $fields:expr) => {
        impl RecordSchema for $ty {
            const SCHEMA_NAME: &'static str = stringify!($ty);

            fn fields() -> FieldSet {
                $fields
            }

            fn json_ld(&self) -> &JsonLd {
                &self.ld
            }

            fn json_ld_mut(&mut self) -> &mut JsonLd {
                &mut self.ld
            }
        }
    };
}

/// Enzyme kinetics: Michaelis-Menten, turnover, efficiency, binding and
/// inhibition constants, each with its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticParameters {
    /// Km, substrate concentration at half-maximal rate.
    pub michaelis_constant: f64,
    pub michaelis_constant_unit: String,
    /// Vmax.
    pub maximum_reaction_rate: f64,
    pub maximum_reaction_rate_unit: String,
    /// kcat.
    pub turnover_number: f64,
    pub turnover_number_unit: String,
    /// kcat/Km.
    pub catalytic_efficiency: f64,
    pub catalytic_efficiency_unit: String,
    /// Kd.
    pub dissociation_constant: f64,
    pub dissociation_constant_unit: String,
    /// Competitive, non-competitive, uncompetitive, mixed, irreversible, ...
    /// Not restricted to a fixed vocabulary.
    pub inhibition_type: String,
    /// Ki.
    pub inhibition_constant: f64,
    pub inhibition_constant_unit: String,
    /// Cooperativity; above 1 is positive, below 1 negative.
    pub hill_coefficient: f64,
    pub enzyme_stability: String,
    pub special_treatment: String,
    #[serde(flatten)]
    pub ld: JsonLd,
}

record_schema!(
    KineticParameters,
    FieldSet::new()
        .number("michaelis_constant")
        .text("michaelis_constant_unit")
        .number("maximum_reaction_rate")
        .text("maximum_reaction_rate_unit")
        .number("turnover_number")
        .text("turnover_number_unit")
        .number("catalytic_efficiency")
        .text("catalytic_efficiency_unit")
        .number("dissociation_constant")
        .text("dissociation_constant_unit")
        .text("inhibition_type")
        .number("inhibition_constant")
        .text("inhibition_constant_unit")
        .number("hill_coefficient")
        .text("enzyme_stability")
        .text("special_treatment")
);

/// Yield, space-time yield and substrate conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldAndConversion {
    pub c_yield: f64,
    pub yield_unit: String,
    pub space_time_yield: f64,
    pub space_time_yield_unit: String,
    pub conversion: f64,
    pub conversion_unit: String,
    pub special_treatment: String,
    #[serde(flatten)]
    pub ld: JsonLd,
}

record_schema!(
    YieldAndConversion,
    FieldSet::new()
        .number("c_yield")
        .text("yield_unit")
        .number("space_time_yield")
        .text("space_time_yield_unit")
        .number("conversion")
        .text("conversion_unit")
        .text("special_treatment")
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityAndInitialReactionRate {
    pub specific_activity: f64,
    pub specific_activity_unit: String,
    pub initial_reaction_rate: f64,
    pub initial_reaction_rate_unit: String,
    pub special_treatment: String,
    #[serde(flatten)]
    pub ld: JsonLd,
}

record_schema!(
    ActivityAndInitialReactionRate,
    FieldSet::new()
        .number("specific_activity")
        .text("specific_activity_unit")
        .number("initial_reaction_rate")
        .text("initial_reaction_rate_unit")
        .text("special_treatment")
);

/// Stereo-, enantio-, chemo- and regioselectivity, with excess and isomeric
/// content metrics.
///
/// `diasteriomeric_excess_unit` keeps the spelling used by published
/// documents so existing records validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectivityAndSpecificity {
    pub stereoselectivity: String,
    /// Enantiomeric ratio E.
    pub enantioselectivity: f64,
    pub enantiomeric_excess: f64,
    pub enantiomeric_excess_unit: String,
    pub diastereomeric_excess: f64,
    pub diasteriomeric_excess_unit: String,
    pub isomeric_content: f64,
    pub isomeric_content_unit: String,
    pub chemoselectivity: String,
    pub regioselectivity: String,
    pub special_treatment: String,
    #[serde(flatten)]
    pub ld: JsonLd,
}

record_schema!(
    SelectivityAndSpecificity,
    FieldSet::new()
        .text("stereoselectivity")
        .number("enantioselectivity")
        .number("enantiomeric_excess")
        .text("enantiomeric_excess_unit")
        .number("diastereomeric_excess")
        .text("diasteriomeric_excess_unit")
        .number("isomeric_content")
        .text("isomeric_content_unit")
        .text("chemoselectivity")
        .text("regioselectivity")
        .text("special_treatment")
);

/// Gibbs free energy and enthalpy changes.
///
/// Both are text: reports embed sign and magnitude commentary in the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermodynamicParameters {
    pub gibbs_free_energy_change: String,
    pub enthalpy_change: String,
    pub special_treatment: String,
    #[serde(flatten)]
    pub ld: JsonLd,
}

record_schema!(
    ThermodynamicParameters,
    FieldSet::new()
        .text("gibbs_free_energy_change")
        .text("enthalpy_change")
        .text("special_treatment")
);

/// The results record kinds, for callers that pick a kind at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    KineticParameters,
    YieldAndConversion,
    ActivityAndInitialReactionRate,
    SelectivityAndSpecificity,
    ThermodynamicParameters,
}

impl ResultKind {
    pub const ALL: [ResultKind; 5] = [
        Self::KineticParameters,
        Self::YieldAndConversion,
        Self::ActivityAndInitialReactionRate,
        Self::SelectivityAndSpecificity,
        Self::ThermodynamicParameters,
    ];

    pub fn schema_name(&self) -> &'static str {
        match self {
            Self::KineticParameters => KineticParameters::SCHEMA_NAME,
            Self::YieldAndConversion => YieldAndConversion::SCHEMA_NAME,
            Self::ActivityAndInitialReactionRate => ActivityAndInitialReactionRate::SCHEMA_NAME,
            Self::SelectivityAndSpecificity => SelectivityAndSpecificity::SCHEMA_NAME,
            Self::ThermodynamicParameters => ThermodynamicParameters::SCHEMA_NAME,
        }
    }

    /// Kebab-case name used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::KineticParameters => "kinetic-parameters",
            Self::YieldAndConversion => "yield-and-conversion",
            Self::ActivityAndInitialReactionRate => "activity-and-initial-reaction-rate",
            Self::SelectivityAndSpecificity => "selectivity-and-specificity",
            Self::ThermodynamicParameters => "thermodynamic-parameters",
        }
    }

    pub fn fields(&self) -> FieldSet {
        match self {
            Self::KineticParameters => KineticParameters::fields(),
            Self::YieldAndConversion => YieldAndConversion::fields(),
            Self::ActivityAndInitialReactionRate => ActivityAndInitialReactionRate::fields(),
            Self::SelectivityAndSpecificity => SelectivityAndSpecificity::fields(),
            Self::ThermodynamicParameters => ThermodynamicParameters::fields(),
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}

impl FromStr for ResultKind {
    type Err = String;

    /// Accepts the schema name (`YieldAndConversion`) or the slug
    /// (`yield-and-conversion`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.schema_name() == s || k.slug() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.slug()).collect();
                format!("unknown record kind '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Build and verify a registry holding the five results schemas.
///
/// # Errors
///
/// Returns a [`SchemaDeclarationError`] if any declaration is inconsistent.
pub fn build_results_registry() -> Result<SchemaRegistry, SchemaDeclarationError> {
    let mut registry = SchemaRegistry::new();
    KineticParameters::declare(&mut registry)?;
    YieldAndConversion::declare(&mut registry)?;
    ActivityAndInitialReactionRate::declare(&mut registry)?;
    SelectivityAndSpecificity::declare(&mut registry)?;
    ThermodynamicParameters::declare(&mut registry)?;
    registry.verify()?;
    Ok(registry)
}

static RESULTS: OnceLock<SchemaRegistry> = OnceLock::new();

/// The process-wide results registry, built on first call.
///
/// # Errors
///
/// Returns the declaration error if the registry cannot be built.
pub fn results_registry() -> Result<&'static SchemaRegistry, SchemaDeclarationError> {
    if let Some(registry) = RESULTS.get() {
        return Ok(registry);
    }
    let built = build_results_registry()?;
    Ok(RESULTS.get_or_init(|| built))
}
