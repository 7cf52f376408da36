use chrono::NaiveDate;
use clap::Parser;
use log::error;

use kartchrono_archive::config::Config;
use kartchrono_archive::modules::helpers::logging::setup_logging;
use kartchrono_archive::modules::kartchrono_api::KartchronoApi;
use kartchrono_archive::modules::parsers::archive::DATE_FORMAT;

/// list the race days and races on the archive page
#[derive(Parser, Debug)]
struct Args {
    /// only show this day (DD.MM.YYYY)
    #[arg(long)]
    date: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = Config::from_env();
    setup_logging(&config).expect("failed to setup logging");

    let date_filter = match args.date.as_deref().map(|date| NaiveDate::parse_from_str(date, DATE_FORMAT)) {
        Some(Ok(date)) => Some(date),
        Some(Err(err)) => {
            error!(target:"list_archive", "invalid date. (error: {})", err);
            std::process::exit(2);
        }
        None => None,
    };

    let api = KartchronoApi::new(config);
    let days = match api.get_archive().await {
        Ok(days) => days,
        Err(err) => {
            error!(target:"list_archive", "failed loading archive. (error: {})", err);
            std::process::exit(1);
        }
    };

    for day in days.iter().filter(|day| date_filter.map_or(true, |date| day.date == date)) {
        println!("{}", day.date.format(DATE_FORMAT));
        for race in &day.races {
            println!("  race {:<6} {}", race.number, race.href);
        }
    }
}
