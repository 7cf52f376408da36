use clap::Parser;
use log::error;

use kartchrono_archive::config::Config;
use kartchrono_archive::modules::helpers::logging::setup_logging;
use kartchrono_archive::modules::kartchrono_api::KartchronoApi;
use kartchrono_archive::modules::helpers::lap_table::LapTable;

/// show the results and lap times of a race from the archive
#[derive(Parser, Debug)]
struct Args {
    /// the link of the race on the archive page
    href: String,

    /// only show the competitor driving this cart
    #[arg(long)]
    cart: Option<String>,

    /// print the race as json
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = Config::from_env();
    setup_logging(&config).expect("failed to setup logging");

    let api = KartchronoApi::new(config);
    let details = match api.get_race_details(&args.href).await {
        Ok(details) => details,
        Err(err) => {
            error!(target:"race_details", "failed loading race {}. (error: {})", args.href, err);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&details) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                error!(target:"race_details", "failed serializing race. (error: {})", err);
                std::process::exit(1);
            }
        }
        return;
    }

    for competitor in details.competitors.iter().filter(|c| args.cart.as_ref().map_or(true, |num| &c.num == num)) {
        println!("{}\n", competitor.summary());
        println!("{}\n", LapTable::render(&competitor.lap_times));
    }
}
