//! Sample scenarios for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // felicific-scenario = { path = "../felicific-scenario", features = ["test-fixtures"] }
//!
//! use felicific_scenario::fixtures;
//!
//! let selector = fixtures::lifeboat_selector();
//! ```

use felicific_core::ActionSelector;

use crate::Scenario;

/// Raw TOML of the lifeboat dilemma.
///
/// Three acts (help the families, the seniors, or the young), four actors
/// each, with "you" as the decision maker. Unweighted totals are 304, 74.8
/// and -43.
pub fn lifeboat_toml() -> &'static str {
    include_str!("../tests/fixtures/lifeboat.toml")
}

/// The parsed lifeboat scenario.
pub fn lifeboat_scenario() -> Scenario {
    Scenario::from_str(lifeboat_toml()).expect("Failed to parse lifeboat.toml")
}

/// The lifeboat scenario built into a selector.
pub fn lifeboat_selector() -> ActionSelector {
    lifeboat_scenario()
        .build()
        .expect("Failed to build lifeboat scenario")
}
