use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coarse stage of an interview, used to rescale strategy scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    Early,
    Mid,
    Late,
}

impl InterviewPhase {
    pub const fn ordered() -> [Self; 3] {
        [Self::Early, Self::Mid, Self::Late]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        }
    }
}

impl fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score rescaling for one strategy within one phase. Applied as
/// `final_score = base_score * multiplier + bonus`; the per-signal
/// contribution breakdown is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseAdjustment {
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub bonus: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for PhaseAdjustment {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            bonus: 0.0,
        }
    }
}

/// Turn boundaries between phases plus per-phase, per-strategy adjustments.
/// Strategies a phase does not name keep multiplier 1.0 and bonus 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTable {
    #[serde(default = "default_mid_start")]
    pub mid_starts_at_turn: u32,
    #[serde(default = "default_late_start")]
    pub late_starts_at_turn: u32,
    #[serde(default)]
    pub early: BTreeMap<String, PhaseAdjustment>,
    #[serde(default)]
    pub mid: BTreeMap<String, PhaseAdjustment>,
    #[serde(default)]
    pub late: BTreeMap<String, PhaseAdjustment>,
}

fn default_mid_start() -> u32 {
    4
}

fn default_late_start() -> u32 {
    10
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            mid_starts_at_turn: default_mid_start(),
            late_starts_at_turn: default_late_start(),
            early: BTreeMap::new(),
            mid: BTreeMap::new(),
            late: BTreeMap::new(),
        }
    }
}

impl PhaseTable {
    /// Phase for a 1-based turn index.
    pub fn phase_for_turn(&self, turn: u32) -> InterviewPhase {
        if turn >= self.late_starts_at_turn {
            InterviewPhase::Late
        } else if turn >= self.mid_starts_at_turn {
            InterviewPhase::Mid
        } else {
            InterviewPhase::Early
        }
    }

    pub fn adjustments_for(&self, phase: InterviewPhase) -> &BTreeMap<String, PhaseAdjustment> {
        match phase {
            InterviewPhase::Early => &self.early,
            InterviewPhase::Mid => &self.mid,
            InterviewPhase::Late => &self.late,
        }
    }

    /// Adjustment for one strategy in one phase; identity when unnamed.
    pub fn adjustment(&self, phase: InterviewPhase, strategy_name: &str) -> PhaseAdjustment {
        self.adjustments_for(phase)
            .get(strategy_name)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_boundaries_are_inclusive_starts() {
        let table = PhaseTable {
            mid_starts_at_turn: 4,
            late_starts_at_turn: 10,
            ..PhaseTable::default()
        };
        assert_eq!(table.phase_for_turn(1), InterviewPhase::Early);
        assert_eq!(table.phase_for_turn(3), InterviewPhase::Early);
        assert_eq!(table.phase_for_turn(4), InterviewPhase::Mid);
        assert_eq!(table.phase_for_turn(9), InterviewPhase::Mid);
        assert_eq!(table.phase_for_turn(10), InterviewPhase::Late);
        assert_eq!(table.phase_for_turn(40), InterviewPhase::Late);
    }

    #[test]
    fn unnamed_strategies_keep_identity_adjustment() {
        let mut table = PhaseTable::default();
        table.late.insert(
            "close".to_string(),
            PhaseAdjustment {
                multiplier: 1.0,
                bonus: 0.5,
            },
        );

        let named = table.adjustment(InterviewPhase::Late, "close");
        assert_eq!(named.bonus, 0.5);

        let unnamed = table.adjustment(InterviewPhase::Late, "deepen");
        assert_eq!(unnamed.multiplier, 1.0);
        assert_eq!(unnamed.bonus, 0.0);
    }
}
