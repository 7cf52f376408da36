use serde::{Deserialize, Serialize};

/// # lap record
/// one decoded lap of a competitor. lap 0 is the start lap, it never has a lap
/// time or a first sector.
///
/// every time is formatted, `None` means the timing system had no signal for
/// that value. it is never a zero duration.
#[derive(Clone, Serialize, PartialEq, Eq, Deserialize, Debug)]
pub struct LapRecord {
    pub lap_number: u32,
    pub lap_time: Option<String>,
    pub sector1: Option<String>,
    pub sector2: Option<String>,
    pub sector3: Option<String>,
    pub sector4: Option<String>,
}

impl LapRecord {
    pub fn is_start_lap(&self) -> bool {
        self.lap_number == 0
    }

    pub fn sectors(&self) -> [Option<&str>; 4] {
        [
            self.sector1.as_deref(),
            self.sector2.as_deref(),
            self.sector3.as_deref(),
            self.sector4.as_deref(),
        ]
    }
}
