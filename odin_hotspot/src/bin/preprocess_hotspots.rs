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
use odin_hotspot::{
    init_tracing,
    bmkg::{HotspotTable,TabMode},
    boundary::{BoundaryLayer,NameColumns},
    preprocess::{assign_regions,write_table}
};

/// add PROVINSI and KABUPATEN columns to a BMKG hotspot TXT file
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// input hotspot TXT (tab separated)
    #[arg(short,long)]
    input: PathBuf,

    /// province boundaries (GeoJSON)
    #[arg(short,long)]
    prov: PathBuf,

    /// kabupaten boundaries (GeoJSON)
    #[arg(short,long)]
    kab: PathBuf,

    /// output TXT (tab separated)
    #[arg(short,long)]
    output: PathBuf,
}

fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();

    let table = HotspotTable::read( &args.input, TabMode::Collapse)?;
    let prov_layer = BoundaryLayer::from_file( &args.prov, &NameColumns::province_layer())?;
    let kab_layer = BoundaryLayer::from_file( &args.kab, &NameColumns::kabupaten_layer())?;

    let outcome = assign_regions( &table, &prov_layer, &kab_layer)?;
    println!("{}", outcome.summary());

    write_table( &args.output, &outcome.table)?;
    println!("saved {}", args.output.display());

    Ok(())
}
