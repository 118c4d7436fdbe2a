//! Scenario files and evaluation settings for the felicific calculus.
//!
//! This crate is the outer boundary of the calculus: it reads decisions
//! from TOML, validates them, and hands back a populated
//! [`felicific_core::ActionSelector`].
//!
//! # Modules
//!
//! - [`config`]: Evaluation settings (selection mode, self-interest, decay)
//! - [`scenario`]: Scenario file format and builder

pub mod config;
pub mod scenario;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use config::{default_config_toml, ConfigError, EvaluationConfig};
pub use scenario::{
    ActSpec, ActorSpec, ConsequenceSpec, EffectSpec, MagnitudeSpec, Scenario, ScenarioError,
    SecondOrderSpec, WeightKind,
};
