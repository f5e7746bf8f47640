// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;
use log::error;

use flight_weather::config::{self, AppConfig, API_KEY_ENV_VAR};
use flight_weather::{Error, OpenWeatherClient, RouteEnricher};

/// Enrich a flight-route CSV with current airport city temperatures.
#[derive(Debug, Parser)]
#[command(name = "flight-weather", version)]
struct Cli {
    /// Input route CSV: header row, then
    /// origin,destination,origin_lat,origin_lon,dest_lat,dest_lon
    input: PathBuf,

    /// Output CSV path
    #[arg(default_value = "out.csv")]
    output: PathBuf,

    /// OpenWeatherMap API key, overriding the environment variable and the
    /// config file
    #[arg(long)]
    api_key: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        error!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    // Credential resolution happens before any file or network activity.
    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None => resolve_configured_api_key()?,
    };

    let mut enricher = RouteEnricher::new(OpenWeatherClient::new(api_key));

    enricher.load(&cli.input)?;
    println!("Input csv read. Fetching temperature info for each city ...");

    enricher.resolve_temperatures();
    println!("Number of API calls: {}", enricher.api_calls());

    enricher.export(&cli.output)?;
    println!("Results written to {}", cli.output.display());
    Ok(())
}

/// Resolve the API key from the environment variable or the config file.
fn resolve_configured_api_key() -> Result<String, Error> {
    let app_config = AppConfig::load()
        .map_err(|e| Error::config(format!("failed to load config file: {e}")))?;

    config::resolve_api_key(app_config.openweathermap_api_key.as_deref()).ok_or_else(|| {
        let config_path = AppConfig::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the config file".to_string());
        Error::config(format!(
            "no OpenWeatherMap API key found; set {API_KEY_ENV_VAR} or add \
             openweathermap_api_key to {config_path}"
        ))
    })
}
