//! Felicific calculus: moral value of candidate acts.
//!
//! Bentham's hedonic calculus scores every pleasure and pain an act causes
//! as `certainty * intensity * duration * nearness * extent` (negated for
//! pain), sums those per affected actor, then sums actors per act. The
//! [`ActionSelector`] compares the totals of mutually exclusive acts.
//!
//! # Ownership
//!
//! ```text
//! ActionSelector ──▶ Act ──▶ Actor ──▶ Effect
//! ```
//!
//! Each level owns the next; there are no back references.
//!
//! # Modules
//!
//! - [`effect`]: Effects, weights, factors, propinquity decay
//! - [`consequence`]: First-order effects with second-order follow-ups
//! - [`actor`]: Per-party aggregation
//! - [`act`]: Per-act aggregation and the self-interest scale
//! - [`selector`]: Ranking and selection across acts

pub mod act;
pub mod actor;
pub mod consequence;
pub mod effect;
pub mod error;
pub mod selector;

pub use act::{Act, SelfInterestScale};
pub use actor::Actor;
pub use consequence::{Consequence, SecondOrder};
pub use effect::{
    nearness_from_delay, Effect, Factors, Order, Polarity, Weight, PROPINQUITY_DECAY_EXPONENT,
};
pub use error::CalculusError;
pub use selector::{ActScore, ActionSelector, Evaluation, SelectionMode};
