use crate::signals::SignalSnapshot;
use serde::{Deserialize, Serialize};

/// One signal's share of a candidate's base score. Zero-valued entries are
/// kept so an audit shows what could have fired but did not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub name: String,
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Pure weighted sum over a scoped weight list. Missing signals read as
/// `0.0`; fired buckets read as `1.0` (`SignalValue::effective`). No I/O,
/// no randomness, no mutation, so concurrent invocation per session needs
/// no coordination.
pub fn score<'a, I>(weights: I, signals: &SignalSnapshot) -> (f64, Vec<SignalContribution>)
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut contributions = Vec::new();
    let mut base_score = 0.0;

    for (name, weight) in weights {
        let value = signals.get(name);
        let contribution = weight * value;
        base_score += contribution;
        contributions.push(SignalContribution {
            name: name.to_string(),
            value,
            weight,
            contribution,
        });
    }

    (base_score, contributions)
}
