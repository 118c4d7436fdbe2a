//! Pleasure and pain effects
//!
//! A single effect is scored with Bentham's product:
//!
//! ```text
//! value = sign * weight * intensity * duration * nearness * extent
//! ```
//!
//! First-order effects are weighted by certainty. Second-order effects (the
//! pleasure or pain bred by another effect) substitute fecundity or purity
//! for certainty; the product itself is unchanged.

use serde::{Deserialize, Serialize};

use crate::error::CalculusError;

/// Default exponent for converting a time distance into a nearness factor
pub const PROPINQUITY_DECAY_EXPONENT: f64 = 0.1;

/// Whether an effect is felt as pleasure or pain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Pleasure,
    Pain,
}

impl Polarity {
    /// +1 for pleasure, -1 for pain
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Pleasure => 1.0,
            Polarity::Pain => -1.0,
        }
    }

    /// The opposite polarity (pleasure <-> pain)
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Pleasure => Polarity::Pain,
            Polarity::Pain => Polarity::Pleasure,
        }
    }
}

/// Order of an effect relative to the act
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Caused directly by the act
    First,
    /// Caused by a first-order effect
    Second,
}

/// The likelihood term of the product.
///
/// Which variant the caller picks only labels the term; the value is used
/// as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Weight {
    /// Certainty of a first-order effect
    Certainty(f64),
    /// Likelihood of a further effect of the same sign
    Fecundity(f64),
    /// Likelihood of a further effect of the opposite sign
    Purity(f64),
}

impl Weight {
    /// The raw multiplier
    pub fn value(self) -> f64 {
        match self {
            Weight::Certainty(w) | Weight::Fecundity(w) | Weight::Purity(w) => w,
        }
    }

    /// Order implied by the weight kind
    pub fn order(self) -> Order {
        match self {
            Weight::Certainty(_) => Order::First,
            Weight::Fecundity(_) | Weight::Purity(_) => Order::Second,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Weight::Certainty(_) => "certainty",
            Weight::Fecundity(_) => "fecundity",
            Weight::Purity(_) => "purity",
        }
    }
}

/// The magnitude factors shared by every effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    /// How strongly the effect is felt
    pub intensity: f64,
    /// How long the effect lasts
    pub duration: f64,
    /// Propinquity: how near in time the effect is (1.0 = immediate)
    pub nearness: f64,
    /// Number of people affected equally
    pub extent: f64,
}

impl Factors {
    pub fn new(intensity: f64, duration: f64, nearness: f64, extent: f64) -> Self {
        Self {
            intensity,
            duration,
            nearness,
            extent,
        }
    }

    /// Product of the four factors
    pub fn magnitude(&self) -> f64 {
        self.intensity * self.duration * self.nearness * self.extent
    }

    /// Rejects non-finite factors and a negative extent.
    ///
    /// Optional hardening for untrusted input; scoring never calls it.
    pub fn validate(&self) -> Result<(), CalculusError> {
        for (factor, value) in [
            ("intensity", self.intensity),
            ("duration", self.duration),
            ("nearness", self.nearness),
            ("extent", self.extent),
        ] {
            if !value.is_finite() {
                return Err(CalculusError::InvalidFactor { factor, value });
            }
        }
        if self.extent < 0.0 {
            return Err(CalculusError::InvalidFactor {
                factor: "extent",
                value: self.extent,
            });
        }
        Ok(())
    }
}

/// Converts a distance in time into a nearness factor.
///
/// Returns `1 / delay^exponent`, and 1.0 for a zero delay so that
/// immediate effects are undiscounted.
pub fn nearness_from_delay(delay: f64, exponent: f64) -> f64 {
    if delay == 0.0 {
        1.0
    } else {
        1.0 / delay.powf(exponent)
    }
}

/// One pleasure or pain experienced by an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    polarity: Polarity,
    weight: Weight,
    factors: Factors,
}

impl Effect {
    pub fn new(polarity: Polarity, weight: Weight, factors: Factors) -> Self {
        Self {
            polarity,
            weight,
            factors,
        }
    }

    /// Shorthand for a pleasure effect
    pub fn pleasure(weight: Weight, factors: Factors) -> Self {
        Self::new(Polarity::Pleasure, weight, factors)
    }

    /// Shorthand for a pain effect
    pub fn pain(weight: Weight, factors: Factors) -> Self {
        Self::new(Polarity::Pain, weight, factors)
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn factors(&self) -> &Factors {
        &self.factors
    }

    pub fn order(&self) -> Order {
        self.weight.order()
    }

    /// Validates the weight and factors, see [`Factors::validate`].
    pub fn validate(&self) -> Result<(), CalculusError> {
        let weight = self.weight.value();
        if !weight.is_finite() {
            return Err(CalculusError::InvalidFactor {
                factor: self.weight.label(),
                value: weight,
            });
        }
        self.factors.validate()
    }

    /// Signed contribution of this effect
    pub fn value(&self) -> f64 {
        self.polarity.sign() * self.weight.value() * self.factors.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_pleasure_value_is_literal_product() {
        let effect = Effect::pleasure(Weight::Certainty(1.0), Factors::new(5.0, 2.0, 1.0, 1.0));
        assert_eq!(effect.value(), 10.0);

        let effect = Effect::pleasure(Weight::Certainty(0.7), Factors::new(10.0, 1.0, 0.5, 5.0));
        assert!((effect.value() - 0.7 * 10.0 * 1.0 * 0.5 * 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_flipping_polarity_negates() {
        let factors = Factors::new(3.0, 4.0, 0.8, 2.0);
        let pleasure = Effect::pleasure(Weight::Certainty(0.9), factors);
        let pain = Effect::pain(Weight::Certainty(0.9), factors);

        assert!(pleasure.value() > 0.0);
        assert_eq!(pain.value(), -pleasure.value());
    }

    #[test]
    fn test_second_order_purity_pain() {
        let effect = Effect::pain(Weight::Purity(0.5), Factors::new(4.0, 1.0, 1.0, 2.0));
        assert_eq!(effect.value(), -4.0);
        assert_eq!(effect.order(), Order::Second);
    }

    #[test]
    fn test_weight_order() {
        assert_eq!(Weight::Certainty(1.0).order(), Order::First);
        assert_eq!(Weight::Fecundity(1.0).order(), Order::Second);
        assert_eq!(Weight::Purity(1.0).order(), Order::Second);
    }

    #[test]
    fn test_zero_factor_zeroes_value() {
        let effect = Effect::pleasure(Weight::Certainty(1.0), Factors::new(5.0, 2.0, 1.0, 0.0));
        assert_eq!(effect.value(), 0.0);
    }

    #[test]
    fn test_nearness_from_delay() {
        assert_eq!(nearness_from_delay(0.0, PROPINQUITY_DECAY_EXPONENT), 1.0);
        assert_eq!(nearness_from_delay(1.0, PROPINQUITY_DECAY_EXPONENT), 1.0);

        let far = nearness_from_delay(100.0, PROPINQUITY_DECAY_EXPONENT);
        let near = nearness_from_delay(2.0, PROPINQUITY_DECAY_EXPONENT);
        assert!(far < near, "Later effects should be discounted more");
        assert!((far - 1.0 / 100f64.powf(0.1)).abs() < EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_factors() {
        assert!(Factors::new(1.0, 1.0, 1.0, 1.0).validate().is_ok());

        let err = Factors::new(1.0, f64::NAN, 1.0, 1.0).validate().unwrap_err();
        assert!(matches!(err, CalculusError::InvalidFactor { factor: "duration", .. }));

        let err = Factors::new(1.0, 1.0, 1.0, -3.0).validate().unwrap_err();
        assert_eq!(
            err,
            CalculusError::InvalidFactor {
                factor: "extent",
                value: -3.0
            }
        );

        let effect = Effect::pain(Weight::Fecundity(f64::INFINITY), Factors::new(1.0, 1.0, 1.0, 1.0));
        assert!(matches!(
            effect.validate(),
            Err(CalculusError::InvalidFactor { factor: "fecundity", .. })
        ));
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::pain(Weight::Purity(0.5), Factors::new(4.0, 1.0, 1.0, 2.0));
        let json = serde_json::to_string(&effect).unwrap();

        assert!(json.contains("\"pain\""));
        assert!(json.contains("\"purity\""));

        let parsed: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, effect);
    }
}
