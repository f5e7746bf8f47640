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

//! Flight route weather enrichment.
//!
//! Reads a flight-route CSV, fetches the current temperature for each unique
//! airport city from OpenWeatherMap (exactly one call per city, memoized in
//! memory), and writes the routes back out with both cities' temperatures
//! appended. Two layers:
//!
//! - **Weather layer**: [`OpenWeatherClient`] wraps URL construction, the
//!   blocking request, and response decoding behind the
//!   [`TemperatureProvider`] trait.
//! - **Enricher layer**: [`RouteEnricher`] owns the route list, the city
//!   coordinate index, and the temperature cache, and drives the
//!   load → resolve → export pipeline.
//!
//! # Quick Start
//!
//! ```no_run
//! use flight_weather::{OpenWeatherClient, RouteEnricher};
//!
//! fn main() -> Result<(), flight_weather::Error> {
//!     let client = OpenWeatherClient::new("my-api-key".to_string());
//!     let mut enricher = RouteEnricher::new(client);
//!
//!     enricher.load("routes.csv")?;
//!     enricher.resolve_temperatures();
//!     println!("Number of API calls: {}", enricher.api_calls());
//!     enricher.export("out.csv")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod weather;

pub use error::Error;
pub use routes::{Route, RouteEnricher};
pub use weather::{Coordinate, FetchError, OpenWeatherClient, TemperatureProvider};
