//! First-order consequences with their second-order follow-ups.
//!
//! A consequence bundles a direct pleasure or pain with the effects it may
//! breed later. Fecundity yields a further effect of the same sign, purity
//! one of the opposite sign. Expansion produces ordinary [`Effect`]s, so an
//! actor sums them like any other.

use serde::{Deserialize, Serialize};

use crate::effect::{Effect, Factors, Polarity, Weight};

/// A second-order effect bred by a consequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondOrder {
    /// Probability that the follow-up effect occurs
    pub likelihood: f64,
    /// Magnitude of the follow-up effect
    pub factors: Factors,
}

impl SecondOrder {
    pub fn new(likelihood: f64, factors: Factors) -> Self {
        Self {
            likelihood,
            factors,
        }
    }
}

/// A first-order pleasure or pain and its optional second-order effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Consequence {
    pub polarity: Polarity,
    pub certainty: f64,
    pub factors: Factors,
    /// Same-sign follow-up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecundity: Option<SecondOrder>,
    /// Opposite-sign follow-up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purity: Option<SecondOrder>,
}

impl Consequence {
    pub fn new(polarity: Polarity, certainty: f64, factors: Factors) -> Self {
        Self {
            polarity,
            certainty,
            factors,
            fecundity: None,
            purity: None,
        }
    }

    pub fn pleasure(certainty: f64, factors: Factors) -> Self {
        Self::new(Polarity::Pleasure, certainty, factors)
    }

    pub fn pain(certainty: f64, factors: Factors) -> Self {
        Self::new(Polarity::Pain, certainty, factors)
    }

    /// Adds a same-sign second-order effect
    pub fn with_fecundity(mut self, second: SecondOrder) -> Self {
        self.fecundity = Some(second);
        self
    }

    /// Adds an opposite-sign second-order effect
    pub fn with_purity(mut self, second: SecondOrder) -> Self {
        self.purity = Some(second);
        self
    }

    /// Expands into the first-order effect followed by any second-order
    /// effects with a non-zero likelihood.
    pub fn effects(&self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(3);
        effects.push(Effect::new(
            self.polarity,
            Weight::Certainty(self.certainty),
            self.factors,
        ));

        if let Some(fecund) = self.fecundity.filter(|s| s.likelihood != 0.0) {
            effects.push(Effect::new(
                self.polarity,
                Weight::Fecundity(fecund.likelihood),
                fecund.factors,
            ));
        }

        if let Some(impure) = self.purity.filter(|s| s.likelihood != 0.0) {
            effects.push(Effect::new(
                self.polarity.opposite(),
                Weight::Purity(impure.likelihood),
                impure.factors,
            ));
        }

        effects
    }

    /// Sum of the expanded effects
    pub fn value(&self) -> f64 {
        self.effects().iter().map(Effect::value).sum()
    }
}
