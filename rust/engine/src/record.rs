use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::betting::{BettingRound, CombatAction};
use crate::cards::Card;
use crate::errors::CombatError;
use crate::player::Side;
use crate::resolution::CombatResolution;

/// A single accepted action, tagged with the street it happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub side: Side,
    pub round: BettingRound,
    pub action: CombatAction,
}

/// Hand history of one combat, rendered as one JSON line per combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatRecord {
    /// Format: YYYYMMDD-NNNNNN
    pub combat_id: String,
    /// Deck seed, when the engine dealt (enables deterministic replay)
    #[serde(default)]
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    pub community: Vec<Card>,
    #[serde(default)]
    pub resolution: Option<CombatResolution>,
    /// RFC3339; filled in by [`CombatRecord::to_json_line`] when missing
    #[serde(default)]
    pub ts: Option<String>,
}

impl CombatRecord {
    pub fn new(combat_id: String) -> Self {
        Self {
            combat_id,
            seed: None,
            actions: Vec::new(),
            community: Vec::new(),
            resolution: None,
            ts: None,
        }
    }

    /// JSON line terminated by `\n`. Writing it anywhere is up to the host.
    pub fn to_json_line(&self) -> Result<String, CombatError> {
        let mut rec = self.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let mut line = serde_json::to_string(&rec)?;
        line.push('\n');
        Ok(line)
    }

    pub fn from_json_line(line: &str) -> Result<Self, CombatError> {
        Ok(serde_json::from_str(line.trim_end())?)
    }
}

pub fn format_combat_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Hands out sequential combat ids for one day.
#[derive(Debug, Clone)]
pub struct CombatLog {
    date: String,
    seq: u32,
}

impl CombatLog {
    pub fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn today() -> Self {
        Self::new(&Utc::now().format("%Y%m%d").to_string())
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_combat_id(&self.date, self.seq)
    }
}
