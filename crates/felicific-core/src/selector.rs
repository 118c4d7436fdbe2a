//! Action Selection
//!
//! Ranks mutually exclusive candidate acts and picks the extremum.
//!
//! Acts are kept in registration order. When several acts share the best
//! value the first registered wins, so repeated evaluations of the same
//! selector always agree.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::act::{Act, SelfInterestScale};
use crate::error::CalculusError;

/// Which extremum to select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Classical utilitarian: maximum total value
    #[default]
    Highest,
    /// Minimum total value
    Lowest,
    /// Negative utilitarian: pain total closest to zero
    LeastNegative,
}

impl SelectionMode {
    /// The score this mode ranks on
    fn score(self, act: &Act) -> f64 {
        match self {
            SelectionMode::Highest | SelectionMode::Lowest => act.total_value(),
            SelectionMode::LeastNegative => act.negative_value(),
        }
    }

    /// Ordering that counts as "better" for this mode
    fn preferred(self) -> Ordering {
        match self {
            SelectionMode::Highest | SelectionMode::LeastNegative => Ordering::Greater,
            SelectionMode::Lowest => Ordering::Less,
        }
    }

    /// Equal scores tie; NaN ties with NaN so an all-NaN winner is listed.
    fn ties(candidate: f64, best: f64) -> bool {
        candidate == best || (candidate.is_nan() && best.is_nan())
    }

    fn beats(self, candidate: f64, best: f64) -> bool {
        if best.is_nan() {
            return !candidate.is_nan();
        }
        candidate.partial_cmp(&best) == Some(self.preferred())
    }
}

/// Score of one act within an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActScore {
    pub name: String,
    /// Total moral value
    pub value: f64,
    /// Pain-only total
    pub negative_value: f64,
}

impl ActScore {
    fn of(act: &Act) -> Self {
        Self {
            name: act.name().to_string(),
            value: act.total_value(),
            negative_value: act.negative_value(),
        }
    }
}

/// Full result of evaluating every registered act
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub mode: SelectionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_interest_scale: Option<SelfInterestScale>,
    /// Every act in registration order
    pub scores: Vec<ActScore>,
    /// The winning act
    pub selected: ActScore,
    /// Names of every act sharing the winning score, winner first
    pub tied: Vec<String>,
}

/// The decision context: all candidate acts for one decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSelector {
    #[serde(default)]
    acts: Vec<Act>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    self_interest: Option<SelfInterestScale>,
}

impl ActionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acts(&self) -> &[Act] {
        &self.acts
    }

    pub fn len(&self) -> usize {
        self.acts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    /// Registers a candidate act.
    ///
    /// A selector-wide self-interest scale, if set, is applied to the act.
    pub fn add_act(&mut self, mut act: Act) -> &mut Act {
        if let Some(scale) = self.self_interest {
            warn_without_decision_maker(&act, scale);
            act.set_self_interest_scale(Some(scale));
        }
        self.acts.push(act);
        let last = self.acts.len() - 1;
        &mut self.acts[last]
    }

    pub fn self_interest_scale(&self) -> Option<SelfInterestScale> {
        self.self_interest
    }

    /// Applies a self-interest scale to every current and future act.
    pub fn set_self_interest_scale(&mut self, scale: SelfInterestScale) {
        for act in &mut self.acts {
            warn_without_decision_maker(act, scale);
            act.set_self_interest_scale(Some(scale));
        }
        self.self_interest = Some(scale);
    }

    /// Validates a raw scale before applying it.
    pub fn try_set_self_interest_scale(&mut self, scale: f64) -> Result<(), CalculusError> {
        self.set_self_interest_scale(SelfInterestScale::new(scale)?);
        Ok(())
    }

    /// Reverts every act to the unweighted sum.
    pub fn clear_self_interest_scale(&mut self) {
        for act in &mut self.acts {
            act.set_self_interest_scale(None);
        }
        self.self_interest = None;
    }

    /// The act with the maximum total value
    pub fn act_with_highest_value(&self) -> Result<&Act, CalculusError> {
        self.select(SelectionMode::Highest)
    }

    /// The act with the minimum total value
    pub fn act_with_lowest_value(&self) -> Result<&Act, CalculusError> {
        self.select(SelectionMode::Lowest)
    }

    /// The act whose pain total is closest to zero
    pub fn act_with_least_negative_value(&self) -> Result<&Act, CalculusError> {
        self.select(SelectionMode::LeastNegative)
    }

    /// Every act sharing the maximum total value
    pub fn acts_with_highest_value(&self) -> Result<Vec<&Act>, CalculusError> {
        self.select_all(SelectionMode::Highest)
    }

    /// Every act sharing the least negative pain total
    pub fn acts_with_least_negative_value(&self) -> Result<Vec<&Act>, CalculusError> {
        self.select_all(SelectionMode::LeastNegative)
    }

    /// Selects one act by `mode`; ties go to the first registered.
    pub fn select(&self, mode: SelectionMode) -> Result<&Act, CalculusError> {
        let (index, score) = self.best(mode)?;
        let act = &self.acts[index];
        tracing::debug!("Selected act '{}' ({:?}) with score {}", act.name(), mode, score);
        Ok(act)
    }

    /// Selects every act whose score equals the winning score.
    pub fn select_all(&self, mode: SelectionMode) -> Result<Vec<&Act>, CalculusError> {
        let (_, best) = self.best(mode)?;
        Ok(self
            .acts
            .iter()
            .filter(|act| SelectionMode::ties(mode.score(act), best))
            .collect())
    }

    /// Scores every act and reports the selection.
    pub fn evaluate(&self, mode: SelectionMode) -> Result<Evaluation, CalculusError> {
        let (index, best) = self.best(mode)?;

        let scores: Vec<ActScore> = self.acts.iter().map(ActScore::of).collect();
        for score in &scores {
            tracing::debug!(
                "Scored act '{}': value {}, negative value {}",
                score.name,
                score.value,
                score.negative_value
            );
        }

        let tied = self
            .acts
            .iter()
            .filter(|act| SelectionMode::ties(mode.score(act), best))
            .map(|act| act.name().to_string())
            .collect();

        Ok(Evaluation {
            mode,
            self_interest_scale: self.self_interest,
            selected: scores[index].clone(),
            scores,
            tied,
        })
    }

    /// Index and score of the winning act.
    ///
    /// Only a strictly better score displaces the current best, which keeps
    /// the first registered act on ties. NaN wins only if every score is NaN.
    fn best(&self, mode: SelectionMode) -> Result<(usize, f64), CalculusError> {
        let mut scored = self.acts.iter().map(|act| mode.score(act)).enumerate();
        let first = scored.next().ok_or(CalculusError::EmptySelection)?;

        Ok(scored.fold(first, |best, candidate| {
            if mode.beats(candidate.1, best.1) {
                candidate
            } else {
                best
            }
        }))
    }
}

fn warn_without_decision_maker(act: &Act, scale: SelfInterestScale) {
    if !act.has_decision_maker() {
        tracing::warn!(
            "Act '{}' has no decision maker; self-interest scale {} only discounts other actors",
            act.name(),
            scale.value()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Effect, Factors, Weight};

    /// Act whose single actor feels a pleasure (or pain) worth `value`
    fn act_worth(name: &str, value: f64) -> Act {
        let mut act = Act::new(name);
        let factors = Factors::new(value.abs(), 1.0, 1.0, 1.0);
        let effect = if value >= 0.0 {
            Effect::pleasure(Weight::Certainty(1.0), factors)
        } else {
            Effect::pain(Weight::Certainty(1.0), factors)
        };
        act.create_actor("party").add_effect(effect);
        act
    }

    fn selector_with(values: &[f64]) -> ActionSelector {
        let mut selector = ActionSelector::new();
        for (i, value) in values.iter().enumerate() {
            selector.add_act(act_worth(&format!("act_{}", i), *value));
        }
        selector
    }

    #[test]
    fn test_highest_value_tie_goes_to_first_registered() {
        let selector = selector_with(&[3.0, 7.0, 7.0, 2.0]);

        let best = selector.act_with_highest_value().unwrap();
        assert_eq!(best.name(), "act_1");
        assert_eq!(best.total_value(), 7.0);
    }

    #[test]
    fn test_lowest_value_tie_goes_to_first_registered() {
        let selector = selector_with(&[3.0, -1.0, 7.0, -1.0]);

        let worst = selector.act_with_lowest_value().unwrap();
        assert_eq!(worst.name(), "act_1");
    }

    #[test]
    fn test_empty_selection_errors() {
        let selector = ActionSelector::new();

        assert_eq!(
            selector.act_with_highest_value().unwrap_err(),
            CalculusError::EmptySelection
        );
        assert_eq!(
            selector.act_with_lowest_value().unwrap_err(),
            CalculusError::EmptySelection
        );
        assert!(selector.acts_with_highest_value().is_err());
        assert!(selector.evaluate(SelectionMode::LeastNegative).is_err());
    }

    #[test]
    fn test_zero_value_act_is_a_valid_winner() {
        let mut selector = ActionSelector::new();
        selector.add_act(Act::new("do_nothing"));
        selector.add_act(act_worth("harm", -5.0));

        let best = selector.act_with_highest_value().unwrap();
        assert_eq!(best.name(), "do_nothing");
        assert_eq!(best.total_value(), 0.0);
    }

    #[test]
    fn test_least_negative_ignores_pleasure() {
        let mut selector = ActionSelector::new();

        let mut mixed = Act::new("mixed");
        mixed
            .create_actor("party")
            .add_effect(Effect::pleasure(
                Weight::Certainty(1.0),
                Factors::new(100.0, 1.0, 1.0, 1.0),
            ))
            .add_effect(Effect::pain(
                Weight::Certainty(1.0),
                Factors::new(5.0, 1.0, 1.0, 1.0),
            ));
        selector.add_act(mixed);
        selector.add_act(act_worth("mild", -2.0));

        assert_eq!(selector.act_with_highest_value().unwrap().name(), "mixed");
        assert_eq!(selector.act_with_least_negative_value().unwrap().name(), "mild");
    }

    #[test]
    fn test_all_tied_acts_in_registration_order() {
        let selector = selector_with(&[3.0, 7.0, 2.0, 7.0]);

        let names: Vec<&str> = selector
            .acts_with_highest_value()
            .unwrap()
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, vec!["act_1", "act_3"]);

        let names: Vec<&str> = selector
            .acts_with_least_negative_value()
            .unwrap()
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, vec!["act_0", "act_1", "act_2", "act_3"]);
    }

    #[test]
    fn test_all_nan_scores_still_list_winner() {
        let mut selector = ActionSelector::new();
        for name in ["a", "b"] {
            let mut act = Act::new(name);
            act.create_actor("party").add_effect(Effect::pain(
                Weight::Certainty(f64::NAN),
                Factors::new(1.0, 1.0, 1.0, 1.0),
            ));
            selector.add_act(act);
        }

        assert_eq!(selector.act_with_highest_value().unwrap().name(), "a");
        assert_eq!(selector.acts_with_highest_value().unwrap().len(), 2);

        let evaluation = selector.evaluate(SelectionMode::Highest).unwrap();
        assert_eq!(evaluation.selected.name, "a");
        assert_eq!(evaluation.tied, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_nan_never_wins() {
        let mut selector = ActionSelector::new();
        let mut broken = Act::new("broken");
        broken.create_actor("party").add_effect(Effect::pleasure(
            Weight::Certainty(f64::NAN),
            Factors::new(1.0, 1.0, 1.0, 1.0),
        ));
        selector.add_act(broken.clone());
        selector.add_act(act_worth("fine", 1.0));
        selector.add_act(broken);

        assert_eq!(selector.act_with_highest_value().unwrap().name(), "fine");
        assert_eq!(selector.act_with_lowest_value().unwrap().name(), "fine");
    }

    #[test]
    fn test_self_interest_scale_applies_to_current_and_future_acts() {
        let mut selector = ActionSelector::new();
        let mut selfish = Act::new("selfish");
        selfish
            .create_actor("you")
            .set_decision_maker(true)
            .add_effect(Effect::pleasure(
                Weight::Certainty(1.0),
                Factors::new(4.0, 1.0, 1.0, 1.0),
            ));
        selfish.create_actor("others").add_effect(Effect::pain(
            Weight::Certainty(1.0),
            Factors::new(10.0, 1.0, 1.0, 1.0),
        ));
        selector.add_act(selfish);

        assert_eq!(selector.acts()[0].total_value(), -6.0);

        selector.set_self_interest_scale(SelfInterestScale::EGOISTIC);
        assert_eq!(selector.acts()[0].total_value(), 4.0);

        let late = selector.add_act(act_worth("late", 3.0));
        assert_eq!(late.self_interest_scale(), Some(SelfInterestScale::EGOISTIC));
        // No decision maker: an egoist gives the act nothing.
        assert_eq!(late.total_value(), 0.0);

        assert_eq!(selector.act_with_highest_value().unwrap().name(), "selfish");

        selector.clear_self_interest_scale();
        assert_eq!(selector.act_with_highest_value().unwrap().name(), "late");
    }

    #[test]
    fn test_try_set_self_interest_scale_rejects_out_of_range() {
        let mut selector = selector_with(&[1.0]);

        assert_eq!(
            selector.try_set_self_interest_scale(1.2),
            Err(CalculusError::InvalidSelfInterestScale(1.2))
        );
        assert_eq!(selector.self_interest_scale(), None);
        assert!(selector.try_set_self_interest_scale(0.4).is_ok());
    }

    #[test]
    fn test_evaluate_reports_every_act() {
        let selector = selector_with(&[3.0, 7.0, -2.0, 7.0]);
        let evaluation = selector.evaluate(SelectionMode::Highest).unwrap();

        assert_eq!(evaluation.scores.len(), 4);
        assert_eq!(evaluation.scores[2].value, -2.0);
        assert_eq!(evaluation.scores[2].negative_value, -2.0);
        assert_eq!(evaluation.selected.name, "act_1");
        assert_eq!(evaluation.tied, vec!["act_1".to_string(), "act_3".to_string()]);
        assert_eq!(evaluation.self_interest_scale, None);
    }

    #[test]
    fn test_selection_mode_serialization() {
        let json = serde_json::to_string(&SelectionMode::LeastNegative).unwrap();
        assert_eq!(json, "\"least_negative\"");
        assert_eq!(SelectionMode::default(), SelectionMode::Highest);
    }
}
