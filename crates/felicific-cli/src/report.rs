//! Text rendering of evaluations.

use felicific_core::{Evaluation, SelectionMode};
use std::fmt::Write;

/// Renders an evaluation as human-readable lines.
pub fn render_text(evaluation: &Evaluation, list_ties: bool) -> String {
    let mut out = String::new();

    for score in &evaluation.scores {
        match evaluation.mode {
            SelectionMode::LeastNegative => {
                let _ = writeln!(
                    out,
                    "{}: {} (negative {})",
                    score.name, score.value, score.negative_value
                );
            }
            SelectionMode::Highest | SelectionMode::Lowest => {
                let _ = writeln!(out, "{}: {}", score.name, score.value);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "The best act from a {} perspective is: {}, with a moral value of {}",
        perspective(evaluation.mode),
        evaluation.selected.name,
        evaluation.selected.value
    );

    if let Some(scale) = evaluation.self_interest_scale {
        let _ = writeln!(
            out,
            "This act was chosen with a self-interest scale of {}",
            scale.value()
        );
    }

    if list_ties && evaluation.tied.len() > 1 {
        let _ = writeln!(out, "Tied acts: {}", evaluation.tied.join(", "));
    }

    out
}

fn perspective(mode: SelectionMode) -> &'static str {
    match mode {
        SelectionMode::Highest => "standard utilitarian",
        SelectionMode::Lowest => "lowest-value",
        SelectionMode::LeastNegative => "negative utilitarian",
    }
}
