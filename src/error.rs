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

//! Fatal error types for the enrichment pipeline.
//!
//! Per-city fetch failures are not represented here; they are recovered
//! locally by the enricher and recorded as unavailable temperatures. See
//! [`crate::weather::FetchError`] for the recoverable variant.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that terminate the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable API credential at startup.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Input file could not be opened or read.
    #[error("failed to read input file '{path}': {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input row does not match the expected six-column route shape.
    #[error("malformed route row {line}: {message}")]
    MalformedRow { line: u64, message: String },

    /// Output file could not be created or written.
    #[error("failed to write output file '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A route references a city with no cache entry at export time.
    /// Indicates export ran before the resolve phase covered the index.
    #[error("no temperature cache entry for city '{code}'")]
    UncachedCity { code: String },
}

impl Error {
    /// Create a configuration error from any message.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// 2 = credential problem, 3 = input problem, 4 = output problem,
    /// 1 = internal invariant violation.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config { .. } => 2,
            Error::Input { .. } | Error::MalformedRow { .. } => 3,
            Error::Output { .. } => 4,
            Error::UncachedCity { .. } => 1,
        }
    }
}
