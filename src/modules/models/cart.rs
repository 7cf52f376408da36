use serde::{Deserialize, Serialize};

/// one row of the results table. `number` joins it to a competitor
#[derive(Clone, Serialize, PartialEq, Eq, Deserialize, Debug, Default)]
pub struct CartSummary {
    pub number: String,
    pub best_lap: String,
    pub position: String,
}
