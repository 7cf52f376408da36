use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt};

use crate::errors::{CustomResult, InvalidJsonSnafu, NotAnObjectSnafu, ObjectNotFoundSnafu};
use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::cart::CartSummary;
use crate::modules::models::competitor::{Competitor, GapToLeader};
use crate::modules::parsers::binary_laps::BinaryLaps;
use crate::modules::parsers::embedded_object::{EmbeddedObject, COMPETITORS_VARIABLE};

/// # competitor entry
/// one value of the embedded competitor object. every field is optional and
/// coerced on its own, a field that can not be read gets its zero value.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CompetitorEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub num: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub pos: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub laps: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub theor_lap: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub binary_laps: String,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        _ => String::new(),
    })
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        Value::String(value) => {
            let value = value.trim();
            value
                .parse::<i64>()
                .ok()
                .or_else(|| value.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    })
}

pub struct CompetitorParser {}

impl CompetitorParser {
    /// # parse competitors
    /// find the embedded competitor object in a race page and assemble the
    /// competitors from it.
    ///
    /// ## Arguments
    /// * `page` - the race page
    /// * `carts` - the results table of the same page, used for the best laps
    ///
    /// ## Returns
    /// * `Vec<Competitor>` - the competitors sorted by position
    pub fn parse(page: &str, carts: &[CartSummary]) -> CustomResult<Vec<Competitor>> {
        let literal = EmbeddedObject::find(page, COMPETITORS_VARIABLE)
            .context(ObjectNotFoundSnafu { variable: COMPETITORS_VARIABLE })?;

        CompetitorParser::parse_json(literal, carts)
    }

    /// assemble the competitors from the text of the embedded object
    pub fn parse_json(literal: &str, carts: &[CartSummary]) -> CustomResult<Vec<Competitor>> {
        let value: Value = serde_json::from_str(literal).context(InvalidJsonSnafu)?;
        let object = value
            .as_object()
            .context(NotAnObjectSnafu { variable: COMPETITORS_VARIABLE })?;

        Ok(CompetitorParser::assemble(object, carts))
    }

    /// # assemble competitors
    /// join the competitor entries with the best laps of the results table,
    /// decode their laps, and compute the gap to the leader.
    ///
    /// carts without a competitor entry are left out. entries that are not
    /// objects are skipped.
    ///
    /// ## Arguments
    /// * `object` - the competitor object, keyed by competitor id
    /// * `carts` - the rows of the results table
    ///
    /// ## Returns
    /// * `Vec<Competitor>` - the competitors sorted by position
    pub fn assemble(object: &Map<String, Value>, carts: &[CartSummary]) -> Vec<Competitor> {
        let mut best_laps: HashMap<&str, &str> = HashMap::new();
        for cart in carts {
            best_laps.entry(cart.number.as_str()).or_insert(cart.best_lap.as_str());
        }

        let mut entries: Vec<(&String, CompetitorEntry)> = object
            .iter()
            .filter_map(|(id, value)| match CompetitorEntry::deserialize(value) {
                Ok(entry) => Some((id, entry)),
                Err(error) => {
                    warn!(target:"parsers/competitors:assemble", "competitor {} is not an object, skipping. (error: {})", id, error);
                    None
                }
            })
            .collect();
        entries.sort_by_key(|(_, entry)| entry.pos);

        for cart in carts {
            if !entries.iter().any(|(_, entry)| entry.num == cart.number) {
                debug!(target:"parsers/competitors:assemble", "cart {} has no competitor entry, dropping", cart.number);
            }
        }

        let reference_theor_lap = entries
            .iter()
            .find(|(_, entry)| entry.pos == 1)
            .or_else(|| entries.first())
            .map(|(_, entry)| entry.theor_lap)
            .unwrap_or_default();

        entries
            .into_iter()
            .map(|(id, entry)| {
                let gap_to_leader = if entry.pos == 1 {
                    GapToLeader::Leader
                } else {
                    match entry.theor_lap.checked_sub(reference_theor_lap) {
                        Some(delta) => GapToLeader::from_delta(delta),
                        None => {
                            warn!(target:"parsers/competitors:assemble", "theoretical lap of competitor {} ({}) is out of range of the leader's ({}), saturating the gap", id, entry.theor_lap, reference_theor_lap);
                            GapToLeader::from_delta(entry.theor_lap.saturating_sub(reference_theor_lap))
                        }
                    }
                };
                if gap_to_leader.is_inconsistent() {
                    warn!(target:"parsers/competitors:assemble", "competitor {} in position {} has a faster theoretical lap than the leader ({})", id, entry.pos, gap_to_leader);
                }

                Competitor {
                    id: id.to_string(),
                    best_lap: best_laps.get(entry.num.as_str()).map(|lap| lap.to_string()).unwrap_or_default(),
                    pos: u32::try_from(entry.pos).unwrap_or(0),
                    laps: u32::try_from(entry.laps).unwrap_or(0),
                    theor_lap_ms: entry.theor_lap,
                    theor_lap_formatted: TimeHelper::millis_to_formatted(entry.theor_lap),
                    display_name: Competitor::display_name_for(&entry.name, &entry.num),
                    gap_to_leader,
                    lap_times: BinaryLaps::decode(&entry.binary_laps),
                    num: entry.num,
                    name: entry.name,
                }
            })
            .collect()
    }
}
