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

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use odin_common::config::load_config_or_default;
use odin_hotspot::{
    init_tracing, ExtractConfig,
    aggregate::{count_by_kabupaten,count_by_province,write_kabupaten_counts,write_province_counts},
    archive::read_records,
    boundary::BoundaryLayer
};

/// monthly hotspot counts per province and kabupaten from the hotspot archive
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    config: Option<PathBuf>,
}

fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();
    let config: ExtractConfig = load_config_or_default( args.config.as_ref())?;

    let records = read_records( &config.archive)?;
    let prov_layer = BoundaryLayer::from_file( &config.province_boundaries, &config.province_names)?;
    let kab_layer = BoundaryLayer::from_file( &config.kabupaten_boundaries, &config.kabupaten_names)?;

    let prov_counts = count_by_province( &records, &prov_layer);
    write_province_counts( &config.province_output, &prov_counts)?;

    let kab_counts = count_by_kabupaten( &records, &kab_layer);
    write_kabupaten_counts( &config.kabupaten_output, &kab_counts)?;

    println!("{} archived hotspots", records.len());
    println!("saved {} province rows to {}", prov_counts.len(), config.province_output.display());
    println!("saved {} kabupaten rows to {}", kab_counts.len(), config.kabupaten_output.display());

    Ok(())
}
