use log::{error, info};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::config::Config;
use crate::errors::{CustomResult, RequestSnafu};
use crate::macros::parse_error_handler::log_parse_error;
use crate::modules::models::cart::CartSummary;
use crate::modules::models::competitor::Competitor;
use crate::modules::models::race::DayRaces;
use crate::modules::parsers::archive::ArchiveParser;
use crate::modules::parsers::competitors::CompetitorParser;
use crate::modules::parsers::race_results::RaceResultsParser;

/// everything on a race page: the results table and the assembled competitors
#[derive(Clone, Serialize, PartialEq, Eq, Deserialize, Debug)]
pub struct RaceDetails {
    pub carts: Vec<CartSummary>,
    pub competitors: Vec<Competitor>,
}

impl RaceDetails {
    pub fn competitor_by_cart(&self, number: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|competitor| competitor.num == number)
    }
}

/// # parse race details
/// run the results table parser and the competitor parser on the same race page
pub fn parse_race_details(page: &str) -> CustomResult<RaceDetails> {
    let carts = log_parse_error!(RaceResultsParser::parse(page), "kartchrono_api:parse_race_details", "results table");
    let competitors = log_parse_error!(CompetitorParser::parse(page, &carts), "kartchrono_api:parse_race_details", "competitors");

    Ok(RaceDetails { carts, competitors })
}

/// # kartchrono api
/// fetches archive and race pages and hands them to the parsers.
/// requests are made once, failed requests are not retried.
pub struct KartchronoApi {
    client: reqwest::Client,
    config: Config,
}

impl KartchronoApi {
    pub fn new(config: Config) -> KartchronoApi {
        KartchronoApi {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// # get page
    /// get the text of a page. responses that are not successful are errors
    pub async fn get_page(&self, url: &str) -> CustomResult<String> {
        info!(target: "kartchrono_api:get_page", "Getting page {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .context(RequestSnafu { url })?;

        response.text().await.context(RequestSnafu { url })
    }

    /// # get archive
    /// get all race days listed on the archive page
    pub async fn get_archive(&self) -> CustomResult<Vec<DayRaces>> {
        let page = log_parse_error!(self.get_page(&self.config.base_url).await, "kartchrono_api:get_archive", "archive page");
        let days = log_parse_error!(ArchiveParser::parse(&page), "kartchrono_api:get_archive", "archive");

        info!(target: "kartchrono_api:get_archive", "found {} race days", days.len());
        Ok(days)
    }

    /// # get race results
    /// get the results table of a race
    ///
    /// ## Arguments
    /// * `href` - the link of the race on the archive page
    pub async fn get_race_results(&self, href: &str) -> CustomResult<Vec<CartSummary>> {
        let url = self.config.race_url(href);
        let page = log_parse_error!(self.get_page(&url).await, "kartchrono_api:get_race_results", format!("race page {}", url));

        let carts = log_parse_error!(RaceResultsParser::parse(&page), "kartchrono_api:get_race_results", "results table");

        Ok(carts)
    }

    /// # get race details
    /// get the results table and the competitors of a race from a single request
    ///
    /// ## Arguments
    /// * `href` - the link of the race on the archive page
    pub async fn get_race_details(&self, href: &str) -> CustomResult<RaceDetails> {
        let url = self.config.race_url(href);
        let page = log_parse_error!(self.get_page(&url).await, "kartchrono_api:get_race_details", format!("race page {}", url));

        parse_race_details(&page)
    }
}
