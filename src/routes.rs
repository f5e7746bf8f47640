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

//! Route dataset loading, temperature resolution, and export.
//!
//! This module owns the route list, the per-city coordinate index, and the
//! temperature cache. The pipeline runs in three phases: [`RouteEnricher::load`]
//! builds the index and route list from CSV, [`RouteEnricher::resolve_temperatures`]
//! fetches each unique city's temperature exactly once, and
//! [`RouteEnricher::export`] fans the cached readings back out to every route row.
//!
//! Input row format (header row discarded):
//! ```text
//! origin,destination,origin_lat,origin_lon,destination_lat,destination_lon
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::{info, warn};

use crate::error::Error;
use crate::weather::{Coordinate, TemperatureProvider};

/// Number of columns every route row must carry.
const ROUTE_COLUMNS: usize = 6;

/// One directed origin → destination pair from one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub origin: String,
    pub destination: String,
}

/// Batch enricher for a flight-route dataset.
///
/// Holds the full dataset state between phases. The coordinate index and
/// route list are immutable after [`load`](Self::load); only the temperature
/// cache and call counter change during the resolve phase.
#[derive(Debug)]
pub struct RouteEnricher<P> {
    provider: P,
    /// City code → first-seen coordinate.
    coordinates: HashMap<String, Coordinate>,
    /// City code → reading; `None` means a fetch was attempted and failed.
    temperatures: HashMap<String, Option<f64>>,
    routes: Vec<Route>,
    api_calls: u64,
}

impl<P: TemperatureProvider> RouteEnricher<P> {
    /// Create an enricher with an empty dataset.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            coordinates: HashMap::new(),
            temperatures: HashMap::new(),
            routes: Vec::new(),
            api_calls: 0,
        }
    }

    /// Load routes and city coordinates from a CSV file.
    ///
    /// The first row is treated as a header and discarded. Each data row
    /// appends one route; a city's coordinate is recorded only the first
    /// time the city appears, so conflicting later values are ignored.
    pub fn load<Q: AsRef<Path>>(&mut self, path: Q) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Input {
            path: path.to_path_buf(),
            source,
        })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        for (index, result) in csv_reader.records().enumerate() {
            // Header occupies line 1 on disk, so data rows start at 2.
            let line = index as u64 + 2;
            let record = result.map_err(|e| Error::MalformedRow {
                line,
                message: e.to_string(),
            })?;
            self.add_row(line, &record)?;
        }

        info!(
            "Loaded {} routes across {} cities",
            self.routes.len(),
            self.coordinates.len()
        );
        Ok(())
    }

    /// Record one data row: index both city coordinates, append the route.
    fn add_row(&mut self, line: u64, record: &csv::StringRecord) -> Result<(), Error> {
        if record.len() < ROUTE_COLUMNS {
            return Err(Error::MalformedRow {
                line,
                message: format!("expected {ROUTE_COLUMNS} columns, found {}", record.len()),
            });
        }

        // Column pairs: origin lat/lon at 2/3, destination lat/lon at 4/5.
        for city_column in 0..2 {
            let code = record[city_column].trim();
            if !self.coordinates.contains_key(code) {
                let coordinate = Coordinate {
                    latitude: parse_coordinate_field(line, record, city_column * 2 + 2)?,
                    longitude: parse_coordinate_field(line, record, city_column * 2 + 3)?,
                };
                self.coordinates.insert(code.to_string(), coordinate);
            }
        }

        self.routes.push(Route {
            origin: record[0].trim().to_string(),
            destination: record[1].trim().to_string(),
        });
        Ok(())
    }

    /// Fetch the temperature for every city not yet in the cache.
    ///
    /// Each unique city triggers at most one network call, no matter how
    /// many routes reference it. A failed fetch is logged and recorded as
    /// unavailable; it does not stop the remaining cities. Calling this
    /// again on a fully populated cache performs zero additional calls.
    pub fn resolve_temperatures(&mut self) {
        for (code, coordinate) in &self.coordinates {
            if self.temperatures.contains_key(code) {
                continue;
            }

            let reading = match self.provider.fetch_temperature(coordinate) {
                Ok(temperature) => Some(temperature),
                Err(err) => {
                    warn!("Failed to fetch temperature for {code}: {err}");
                    None
                }
            };
            self.api_calls += 1;
            self.temperatures.insert(code.clone(), reading);
        }

        info!(
            "Temperature cache covers {} cities after {} API calls",
            self.temperatures.len(),
            self.api_calls
        );
    }

    /// Write the enriched dataset as CSV, one row per input route in input
    /// order, with no header row.
    ///
    /// Requires a cache entry for every referenced city, so
    /// [`resolve_temperatures`](Self::resolve_temperatures) must have run
    /// against the same loaded dataset.
    pub fn export<Q: AsRef<Path>>(&self, path: Q) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Output {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        for route in &self.routes {
            let origin_label = self.temperature_label(&route.origin)?;
            let destination_label = self.temperature_label(&route.destination)?;
            writer
                .write_record([
                    route.origin.as_str(),
                    route.destination.as_str(),
                    origin_label.as_str(),
                    destination_label.as_str(),
                ])
                .map_err(|source| Error::Output {
                    path: path.to_path_buf(),
                    source: std::io::Error::other(source),
                })?;
        }

        writer.flush().map_err(|source| Error::Output {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Wrote {} enriched routes to {}", self.routes.len(), path.display());
        Ok(())
    }

    /// Format a city's cached reading as `"<value>°C"`, or `"N/A°C"` when
    /// the fetch failed.
    pub fn temperature_label(&self, code: &str) -> Result<String, Error> {
        let cached = self
            .temperatures
            .get(code)
            .ok_or_else(|| Error::UncachedCity {
                code: code.to_string(),
            })?;

        Ok(match cached {
            Some(temperature) => format!("{temperature}°C"),
            None => "N/A°C".to_string(),
        })
    }

    /// Number of network calls made so far (reporting only).
    #[must_use]
    pub fn api_calls(&self) -> u64 {
        self.api_calls
    }

    /// Loaded routes in input order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First-seen coordinate for a city, if the city has been loaded.
    #[must_use]
    pub fn coordinate(&self, code: &str) -> Option<&Coordinate> {
        self.coordinates.get(code)
    }

    /// Number of distinct cities in the coordinate index.
    #[must_use]
    pub fn city_count(&self) -> usize {
        self.coordinates.len()
    }
}

/// Parse one lat/lon field as a decimal degree value.
fn parse_coordinate_field(
    line: u64,
    record: &csv::StringRecord,
    index: usize,
) -> Result<f64, Error> {
    let field = record[index].trim();
    field.parse::<f64>().map_err(|_| Error::MalformedRow {
        line,
        message: format!("column {index} is not a decimal coordinate: '{field}'"),
    })
}
