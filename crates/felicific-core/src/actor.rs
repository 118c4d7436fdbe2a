//! Actors affected by an act.

use serde::{Deserialize, Serialize};

use crate::consequence::Consequence;
use crate::effect::Effect;

/// One party (or group affected equally) touched by an act
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Opaque label
    name: String,
    /// Whether this actor is the one making the decision
    #[serde(default)]
    decision_maker: bool,
    /// Effects felt by this actor, first- and second-order alike
    #[serde(default)]
    effects: Vec<Effect>,
}

impl Actor {
    /// Actors are created through [`Act::create_actor`](crate::Act::create_actor).
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decision_maker: false,
            effects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn is_decision_maker(&self) -> bool {
        self.decision_maker
    }

    /// Marks (or unmarks) this actor as the decision maker
    pub fn set_decision_maker(&mut self, decision_maker: bool) -> &mut Self {
        self.decision_maker = decision_maker;
        self
    }

    /// Appends an effect
    pub fn add_effect(&mut self, effect: Effect) -> &mut Self {
        self.effects.push(effect);
        self
    }

    /// Appends every effect the consequence expands into
    pub fn add_consequence(&mut self, consequence: &Consequence) -> &mut Self {
        self.effects.extend(consequence.effects());
        self
    }

    /// Sum of all effect values, 0 when there are none
    pub fn total_value(&self) -> f64 {
        self.effects.iter().map(Effect::value).sum()
    }

    /// Sum of the negative effect values only
    pub fn negative_value(&self) -> f64 {
        self.effects
            .iter()
            .map(Effect::value)
            .filter(|v| *v < 0.0)
            .sum()
    }
}
