use std::env;
use dotenvy::dotenv;

pub const DEFAULT_BASE_URL: &str = "https://mayak.kartchrono.com/archive/";
pub const DEFAULT_LOGGING_LEVEL: &str = "INFO";
pub const DEFAULT_LOG_FILE: &str = "kartchrono.log";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub logging_level: String,
    pub log_file: String,
}

impl Config {
    /// # load config from the environment
    /// loads the `.env` file when there is one and reads the settings from the
    /// environment. missing variables fall back to their defaults.
    ///
    /// ## Variables
    /// * `KARTCHRONO_BASE_URL` - the archive url, race hrefs are relative to it
    /// * `LOGGING_LEVEL` - one of OFF, ERROR, WARN, INFO, DEBUG, TRACE
    /// * `LOG_FILE` - the file the log is written to
    pub fn from_env() -> Config {
        dotenv().ok();

        Config {
            base_url: env::var("KARTCHRONO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            logging_level: env::var("LOGGING_LEVEL").unwrap_or_else(|_| DEFAULT_LOGGING_LEVEL.to_string()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
        }
    }

    /// the url of a race page. hrefs on the archive page are relative to the archive url
    pub fn race_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }

        format!("{}{}", self.base_url, href.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            logging_level: DEFAULT_LOGGING_LEVEL.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn race_url_is_relative_to_archive() {
        let config = Config::default();
        assert_eq!(
            config.race_url("race.php?id=42"),
            "https://mayak.kartchrono.com/archive/race.php?id=42"
        );
        assert_eq!(
            config.race_url("/race.php?id=42"),
            "https://mayak.kartchrono.com/archive/race.php?id=42"
        );
    }

    #[test]
    fn absolute_href_is_kept() {
        let config = Config::default();
        assert_eq!(config.race_url("https://example.org/x"), "https://example.org/x");
    }
}
