use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// a single race on the archive page. `href` is relative to the archive url
#[derive(Clone, Serialize, PartialEq, Eq, Deserialize, Debug)]
pub struct RaceRef {
    pub number: String,
    pub href: String,
}

/// all races listed under one date header, in page order. never empty
#[derive(Clone, Serialize, PartialEq, Eq, Deserialize, Debug)]
pub struct DayRaces {
    pub date: NaiveDate,
    pub races: Vec<RaceRef>,
}

impl DayRaces {
    pub fn find_race(&self, number: &str) -> Option<&RaceRef> {
        self.races.iter().find(|race| race.number == number)
    }
}
