use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::lap::LapRecord;

pub const LEADER: &str = "Leader";

/// # gap to the leader
/// difference between a competitor's theoretical lap and the theoretical lap
/// of the competitor in first position.
///
/// `AheadOfLeader` means the feed's positions disagree with its theoretical
/// laps. it is kept as is and flagged, the magnitude is stored positive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GapToLeader {
    Leader,
    Behind { ms: i64 },
    AheadOfLeader { ms: i64 },
}

impl GapToLeader {
    pub fn from_delta(delta_ms: i64) -> GapToLeader {
        if delta_ms < 0 {
            GapToLeader::AheadOfLeader { ms: delta_ms.saturating_neg() }
        } else {
            GapToLeader::Behind { ms: delta_ms }
        }
    }

    pub fn is_inconsistent(&self) -> bool {
        matches!(self, GapToLeader::AheadOfLeader { .. })
    }
}

impl fmt::Display for GapToLeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GapToLeader::Leader => write!(f, "{}", LEADER),
            GapToLeader::Behind { ms } => write!(f, "+{}", TimeHelper::millis_to_formatted(*ms)),
            GapToLeader::AheadOfLeader { ms } => write!(f, "-{}", TimeHelper::millis_to_formatted(*ms)),
        }
    }
}

impl From<GapToLeader> for String {
    fn from(gap: GapToLeader) -> String {
        gap.to_string()
    }
}

impl TryFrom<String> for GapToLeader {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == LEADER {
            return Ok(GapToLeader::Leader);
        }

        let parse = |formatted: &str| {
            TimeHelper::formatted_to_millis(formatted)
                .ok_or_else(|| format!("invalid gap to leader: {}", value))
        };

        if let Some(formatted) = value.strip_prefix('+') {
            Ok(GapToLeader::Behind { ms: parse(formatted)? })
        } else if let Some(formatted) = value.strip_prefix('-') {
            Ok(GapToLeader::AheadOfLeader { ms: parse(formatted)? })
        } else {
            Err(format!("invalid gap to leader: {}", value))
        }
    }
}

/// # competitor
/// the full record of one competitor in a race, joined from the embedded
/// competitor object, the results table, and the binary lap blob.
#[derive(Clone, Serialize, PartialEq, Eq, Deserialize, Debug)]
pub struct Competitor {
    pub id: String,
    pub num: String,
    pub name: String,
    pub pos: u32,
    pub laps: u32,
    pub theor_lap_ms: i64,
    pub best_lap: String,
    pub theor_lap_formatted: String,
    pub display_name: String,
    pub gap_to_leader: GapToLeader,
    pub lap_times: Vec<LapRecord>,
}

impl Competitor {
    /// the name shown to users, anonymous drivers are named after their cart
    pub fn display_name_for(name: &str, num: &str) -> String {
        if name.trim().is_empty() {
            format!("Cart #{}", num)
        } else {
            name.to_string()
        }
    }

    pub fn is_leader(&self) -> bool {
        self.gap_to_leader == GapToLeader::Leader
    }

    pub fn best_lap_ms(&self) -> Option<i64> {
        TimeHelper::formatted_to_millis(&self.best_lap)
    }

    /// # summary
    /// human readable summary of the competitor, one field per line
    pub fn summary(&self) -> String {
        let best_lap = if self.best_lap.is_empty() { "-" } else { &self.best_lap };

        format!(
            "{} (cart #{})\nPosition: {}\nLaps: {}\nBest lap: {}\nTheoretical lap: {}\nGap to leader: {}",
            self.display_name,
            self.num,
            self.pos,
            self.laps,
            best_lap,
            self.theor_lap_formatted,
            self.gap_to_leader,
        )
    }
}
