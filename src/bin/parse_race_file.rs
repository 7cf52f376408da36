use clap::Parser;
use log::{error, info};
use snafu::ResultExt;

use kartchrono_archive::config::Config;
use kartchrono_archive::errors::{CustomResult, ReadFileSnafu};
use kartchrono_archive::modules::helpers::lap_table::LapTable;
use kartchrono_archive::modules::helpers::logging::setup_logging;
use kartchrono_archive::modules::kartchrono_api::{parse_race_details, RaceDetails};

/// parse race pages that were saved to disk
#[derive(Parser, Debug)]
struct Args {
    /// the saved race pages
    #[arg(required = true)]
    files: Vec<String>,

    /// print the races as json
    #[arg(long)]
    json: bool,
}

fn load_race(path: &str) -> CustomResult<RaceDetails> {
    let page = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;
    parse_race_details(&page)
}

fn main() {
    let args = Args::parse();
    setup_logging(&Config::from_env()).expect("failed to setup logging");

    for path in &args.files {
        let details = match load_race(path) {
            Ok(details) => details,
            Err(err) => {
                error!(target:"parse_race_file", "failed parsing {}. (error: {})", path, err);
                continue;
            }
        };
        info!(target:"parse_race_file", "parsed {} competitors from {}", details.competitors.len(), path);

        if args.json {
            match serde_json::to_string_pretty(&details) {
                Ok(json) => println!("{}", json),
                Err(err) => error!(target:"parse_race_file", "failed serializing {}. (error: {})", path, err),
            }
            continue;
        }

        // rank on the real best lap, competitors without one go last
        let mut ranked: Vec<_> = details.competitors.iter().collect();
        ranked.sort_by_key(|competitor| competitor.best_lap_ms().unwrap_or(i64::MAX));

        println!("== {}", path);
        for (rank, competitor) in ranked.iter().enumerate() {
            let best_lap = if competitor.best_lap.is_empty() { "-" } else { &competitor.best_lap };
            println!("{:>2}. {:<22} #{:<5} {}", rank + 1, competitor.display_name, competitor.num, best_lap);
        }
        println!();

        for competitor in &details.competitors {
            println!("{}\n", competitor.summary());
            println!("{}\n", LapTable::render(&competitor.lap_times));
        }
    }
}
