//! Scenario files.
//!
//! A scenario describes one decision in TOML: the candidate acts, the
//! actors each act affects, and the consequences those actors feel.
//! [`Scenario::build`] turns it into a ready-to-query [`ActionSelector`].

use felicific_core::{
    nearness_from_delay, Act, ActionSelector, CalculusError, Consequence, Effect, Factors,
    Polarity, SecondOrder, Weight,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::config::{ConfigError, EvaluationConfig};

/// A complete decision read from a scenario file.
///
/// Every table rejects unknown keys so that a misspelled factor fails to
/// load instead of silently falling back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acts: Vec<ActSpec>,
}

/// One candidate act
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actors: Vec<ActorSpec>,
}

/// One affected party and what it feels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorSpec {
    pub name: String,
    #[serde(default)]
    pub decision_maker: bool,
    /// First-order consequences with optional follow-ups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consequences: Vec<ConsequenceSpec>,
    /// Raw effects with an explicit weight kind
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectSpec>,
}

/// Magnitude of an effect.
///
/// Nearness can be given directly or as a `delay`, which is discounted with
/// the configured propinquity decay. Neither means the effect is immediate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeSpec {
    pub intensity: f64,
    pub duration: f64,
    pub nearness: Option<f64>,
    pub delay: Option<f64>,
    pub extent: f64,
}

impl MagnitudeSpec {
    /// Resolves to concrete factors; `None` when both nearness and delay are set.
    pub fn factors(&self, decay_exponent: f64) -> Option<Factors> {
        let nearness = match (self.nearness, self.delay) {
            (Some(_), Some(_)) => return None,
            (Some(nearness), None) => nearness,
            (None, Some(delay)) => nearness_from_delay(delay, decay_exponent),
            (None, None) => 1.0,
        };
        Some(Factors::new(
            self.intensity,
            self.duration,
            nearness,
            self.extent,
        ))
    }
}

/// Copies the inline magnitude keys of an effect table.
macro_rules! magnitude_of {
    ($spec:expr) => {
        MagnitudeSpec {
            intensity: $spec.intensity,
            duration: $spec.duration,
            nearness: $spec.nearness,
            delay: $spec.delay,
            extent: $spec.extent,
        }
    };
}

/// A second-order follow-up of a consequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecondOrderSpec {
    pub likelihood: f64,
    pub intensity: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    pub extent: f64,
}

impl SecondOrderSpec {
    pub fn magnitude(&self) -> MagnitudeSpec {
        magnitude_of!(self)
    }
}

/// A first-order pleasure or pain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsequenceSpec {
    pub polarity: Polarity,
    #[serde(default = "certain")]
    pub certainty: f64,
    pub intensity: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    pub extent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecundity: Option<SecondOrderSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purity: Option<SecondOrderSpec>,
}

impl ConsequenceSpec {
    pub fn magnitude(&self) -> MagnitudeSpec {
        magnitude_of!(self)
    }
}

/// Label for the likelihood term of a raw effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightKind {
    #[default]
    Certainty,
    Fecundity,
    Purity,
}

impl WeightKind {
    fn with_value(self, value: f64) -> Weight {
        match self {
            WeightKind::Certainty => Weight::Certainty(value),
            WeightKind::Fecundity => Weight::Fecundity(value),
            WeightKind::Purity => Weight::Purity(value),
        }
    }
}

/// A single effect, first or second order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectSpec {
    pub polarity: Polarity,
    #[serde(default)]
    pub weight: WeightKind,
    #[serde(default = "certain")]
    pub likelihood: f64,
    pub intensity: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    pub extent: f64,
}

impl EffectSpec {
    pub fn magnitude(&self) -> MagnitudeSpec {
        magnitude_of!(self)
    }
}

fn certain() -> f64 {
    1.0
}

/// Errors that can occur while loading or building a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read or parsed
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Two acts share a name
    #[error("act '{0}' is defined more than once")]
    DuplicateAct(String),
    /// An effect gives both a nearness and a delay
    #[error("actor '{actor}' in act '{act}' sets both nearness and delay on one effect")]
    ConflictingNearness { act: String, actor: String },
    /// An effect factor failed validation
    #[error("actor '{actor}' in act '{act}': {source}")]
    InvalidEffect {
        act: String,
        actor: String,
        #[source]
        source: CalculusError,
    },
    /// Evaluation settings were rejected
    #[error(transparent)]
    Calculus(#[from] CalculusError),
}

impl Scenario {
    /// Loads a scenario from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        let scenario = Self::from_str(&content)?;
        tracing::info!(
            "Loaded scenario from {:?} ({} acts)",
            path,
            scenario.acts.len()
        );
        Ok(scenario)
    }

    /// Parses a scenario from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(content).map_err(ConfigError::TomlError)?)
    }

    /// Serializes the scenario as a TOML string.
    pub fn to_toml(&self) -> Result<String, ScenarioError> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::TomlSerializeError)?)
    }

    /// Builds the selector described by this scenario.
    ///
    /// Every effect is validated and the configured self-interest scale, if
    /// any, is applied to all acts.
    pub fn build(&self) -> Result<ActionSelector, ScenarioError> {
        let exponent = self.evaluation.propinquity_decay_exponent;
        let mut seen = HashSet::new();
        let mut selector = ActionSelector::new();

        for act_spec in &self.acts {
            if !seen.insert(act_spec.name.as_str()) {
                return Err(ScenarioError::DuplicateAct(act_spec.name.clone()));
            }

            let mut act = Act::new(act_spec.name.clone());
            for actor_spec in &act_spec.actors {
                let effects = actor_effects(actor_spec, exponent).map_err(|e| match e {
                    EffectError::Nearness => ScenarioError::ConflictingNearness {
                        act: act_spec.name.clone(),
                        actor: actor_spec.name.clone(),
                    },
                    EffectError::Invalid(source) => ScenarioError::InvalidEffect {
                        act: act_spec.name.clone(),
                        actor: actor_spec.name.clone(),
                        source,
                    },
                })?;

                let actor = act.create_actor(actor_spec.name.clone());
                actor.set_decision_maker(actor_spec.decision_maker);
                for effect in effects {
                    actor.add_effect(effect);
                }
            }
            selector.add_act(act);
        }

        if let Some(scale) = self.evaluation.self_interest()? {
            selector.set_self_interest_scale(scale);
        }

        tracing::debug!("Built selector with {} acts", selector.len());
        Ok(selector)
    }
}

enum EffectError {
    Nearness,
    Invalid(CalculusError),
}

/// Expands and validates every effect of one actor, consequences first.
fn actor_effects(spec: &ActorSpec, exponent: f64) -> Result<Vec<Effect>, EffectError> {
    let factors = |m: &MagnitudeSpec| m.factors(exponent).ok_or(EffectError::Nearness);
    let mut effects = Vec::new();

    for c in &spec.consequences {
        let mut consequence = Consequence::new(c.polarity, c.certainty, factors(&c.magnitude())?);
        if let Some(f) = &c.fecundity {
            consequence = consequence
                .with_fecundity(SecondOrder::new(f.likelihood, factors(&f.magnitude())?));
        }
        if let Some(p) = &c.purity {
            consequence =
                consequence.with_purity(SecondOrder::new(p.likelihood, factors(&p.magnitude())?));
        }
        effects.extend(consequence.effects());
    }

    for e in &spec.effects {
        effects.push(Effect::new(
            e.polarity,
            e.weight.with_value(e.likelihood),
            factors(&e.magnitude())?,
        ));
    }

    for effect in &effects {
        effect.validate().map_err(EffectError::Invalid)?;
    }
    Ok(effects)
}
