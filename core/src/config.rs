use crate::types::Confidence;
use serde::{Deserialize, Serialize};

/// How `recent_tie_pressure` reacts to a non-tie round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieDecay {
    /// Subtract one, floored at zero.
    #[default]
    Decrement,
    /// Drop straight back to zero.
    Reset,
}

/// Every numeric cut-off the suggestion and timing rules use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum pattern confidence for a suggestion to be emitted (inclusive).
    pub suggestion_threshold: Confidence,
    /// Confidence strictly above this counts as favorable timing.
    pub favorable_confidence_threshold: Confidence,
    /// Tie pressure at or above this is adverse early in a session.
    pub early_tie_pressure: u32,
    /// "Early" means a ledger no longer than this many rounds.
    pub early_tie_window: usize,
    /// Consecutive rounds showing a 1 at or above this are adverse.
    pub low_roll_streak: u32,
    /// Rounds without a tie strictly above this are favorable.
    pub tie_drought: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            suggestion_threshold:           70,
            favorable_confidence_threshold: 90,
            early_tie_pressure:             3,
            early_tie_window:               15,
            low_roll_streak:                5,
            tie_drought:                    15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: ThresholdConfig,
    pub tie_decay:  TieDecay,
}

impl EngineConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    /// In tests, use EngineConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::debug!("Loaded engine config from {path}: {config:?}");
        Ok(config)
    }

    pub fn with_tie_decay(mut self, tie_decay: TieDecay) -> Self {
        self.tie_decay = tie_decay;
        self
    }
}
