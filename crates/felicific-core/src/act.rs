//! Candidate acts and the self-interest scale.

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::error::CalculusError;

/// Weight placed on the decision maker's own outcome.
///
/// 0.0 is fully altruistic (only others count), 1.0 fully egoistic (only
/// the decision maker counts). Every other actor is weighted `1 - scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SelfInterestScale(f64);

impl SelfInterestScale {
    pub const ALTRUISTIC: Self = Self(0.0);
    pub const EGOISTIC: Self = Self(1.0);

    /// Creates a scale, rejecting values outside `[0, 1]` and NaN.
    pub fn new(scale: f64) -> Result<Self, CalculusError> {
        if (0.0..=1.0).contains(&scale) {
            Ok(Self(scale))
        } else {
            Err(CalculusError::InvalidSelfInterestScale(scale))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Multiplier applied to an actor's total
    pub fn multiplier(self, decision_maker: bool) -> f64 {
        if decision_maker {
            self.0
        } else {
            1.0 - self.0
        }
    }
}

impl TryFrom<f64> for SelfInterestScale {
    type Error = CalculusError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SelfInterestScale> for f64 {
    fn from(scale: SelfInterestScale) -> Self {
        scale.0
    }
}

/// One candidate action under evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Act {
    /// Label identifying the act in reports
    name: String,
    /// Parties affected by the act
    #[serde(default)]
    actors: Vec<Actor>,
    /// Self-interest weighting; plain sum when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    self_interest: Option<SelfInterestScale>,
}

impl Act {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actors: Vec::new(),
            self_interest: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Creates an actor owned by this act and returns it for populating.
    pub fn create_actor(&mut self, name: impl Into<String>) -> &mut Actor {
        self.actors.push(Actor::new(name));
        let last = self.actors.len() - 1;
        &mut self.actors[last]
    }

    /// Looks up an actor by name
    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name() == name)
    }

    pub fn self_interest_scale(&self) -> Option<SelfInterestScale> {
        self.self_interest
    }

    pub fn set_self_interest_scale(&mut self, scale: Option<SelfInterestScale>) {
        self.self_interest = scale;
    }

    /// Whether any actor is marked as the decision maker
    pub fn has_decision_maker(&self) -> bool {
        self.actors.iter().any(Actor::is_decision_maker)
    }

    /// Moral value of the act: the (optionally self-interest weighted) sum
    /// of actor totals. 0 when there are no actors.
    pub fn total_value(&self) -> f64 {
        self.weighted_sum(Actor::total_value)
    }

    /// Same aggregation as [`Act::total_value`] over pain only
    pub fn negative_value(&self) -> f64 {
        self.weighted_sum(Actor::negative_value)
    }

    fn weighted_sum(&self, per_actor: impl Fn(&Actor) -> f64) -> f64 {
        match self.self_interest {
            Some(scale) => self
                .actors
                .iter()
                .map(|a| per_actor(a) * scale.multiplier(a.is_decision_maker()))
                .sum(),
            None => self.actors.iter().map(per_actor).sum(),
        }
    }
}
