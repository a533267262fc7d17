//! Threshold discretization for continuous signals.
//!
//! Detectors expose a bucket as a compound key (`llm.valence.high`) set only
//! when the underlying continuous value falls inside a configured band.
//! Methodology authors tune those bands; a band no continuous value ever
//! reaches silently nullifies whatever weight was hung on the bucket. The
//! trace audit below makes that visible instead of guessed at.

use super::SignalSnapshot;
use serde::{Deserialize, Serialize};

/// One discretization rule: fire `<signal>.<bucket>` when the continuous
/// signal lands inside `[min, max]`. A missing bound is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRule {
    pub signal: String,
    pub bucket: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl BucketRule {
    /// Bucket for values at or above a floor, e.g. `llm.valence.high`.
    pub fn at_least(signal: impl Into<String>, bucket: impl Into<String>, min: f64) -> Self {
        Self {
            signal: signal.into(),
            bucket: bucket.into(),
            min: Some(min),
            max: None,
        }
    }

    /// Bucket for values at or below a ceiling, e.g. `llm.engagement.low`.
    pub fn at_most(signal: impl Into<String>, bucket: impl Into<String>, max: f64) -> Self {
        Self {
            signal: signal.into(),
            bucket: bucket.into(),
            min: None,
            max: Some(max),
        }
    }

    /// Compound key the bucket is published under.
    pub fn key(&self) -> String {
        format!("{}.{}", self.signal, self.bucket)
    }

    /// A rule only fires when its signal was actually computed this turn;
    /// an absent signal is "not fired", never "zero and therefore low".
    pub fn fires(&self, snapshot: &SignalSnapshot) -> bool {
        if !snapshot.contains(&self.signal) {
            return false;
        }
        let value = snapshot.get(&self.signal);
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Enrich a snapshot with every bucket that fires for it.
pub fn apply(rules: &[BucketRule], snapshot: &mut SignalSnapshot) {
    for rule in rules {
        if rule.fires(snapshot) {
            snapshot.mark_fired(rule.key());
        }
    }
}

/// Per-rule fire count across a recorded trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketAuditEntry {
    pub rule: BucketRule,
    pub fired_turns: usize,
    pub total_turns: usize,
}

impl BucketAuditEntry {
    pub fn key(&self) -> String {
        self.rule.key()
    }

    /// A bucket that never fired across a representative trace is almost
    /// certainly miscalibrated.
    pub fn never_fired(&self) -> bool {
        self.total_turns > 0 && self.fired_turns == 0
    }
}

/// Count, for each rule, how many turns of the trace would have fired it.
pub fn audit_trace(rules: &[BucketRule], trace: &[SignalSnapshot]) -> Vec<BucketAuditEntry> {
    rules
        .iter()
        .map(|rule| BucketAuditEntry {
            rule: rule.clone(),
            fired_turns: trace.iter().filter(|turn| rule.fires(turn)).count(),
            total_turns: trace.len(),
        })
        .collect()
}
