/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! batch processing of satellite hotspot detections over Indonesia:
//!
//!  - daily retrieval of FIRMS (MODIS/VIIRS) active fire files, confidence filtering and
//!    appending of hotspots within Indonesian provinces to a cumulative archive ([`ingest`])
//!  - monthly hotspot counts per province and kabupaten from that archive ([`aggregate`])
//!  - assignment of province/kabupaten names to BMKG hotspot tables ([`preprocess`])
//!  - rendering of the daily BMKG situational hotspot map ([`map`])

use tracing_subscriber::EnvFilter;

pub mod errors;
pub use errors::{OdinHotspotError,Result};

pub mod config;
pub use config::*;

pub mod firms;
pub mod boundary;
pub mod archive;
pub mod ingest;
pub mod aggregate;
pub mod bmkg;
pub mod preprocess;
pub mod map;

/// initialize tracing for our binaries. Levels are set via RUST_LOG (default is "info").
/// Note this only succeeds if there is no global subscriber set yet
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_target(false)
        .try_init();
}
