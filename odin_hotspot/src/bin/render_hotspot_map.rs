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
use tracing::{error,warn};
use odin_common::{config::load_config_or_default, datetime::{local_today,parse_date,yesterday}, fs::ensure_writable_dir};
use odin_hotspot::{
    init_tracing, MapConfig, OdinHotspotError,
    bmkg::{fetch_or_reuse,to_bmkg_hotspots,write_clean_csv,DataSource,HotspotTable,RegionCounts,TabMode},
    boundary::{BoundaryLayer,NameColumns},
    map::{load_font,load_logo,save_png,MapInput,MapRenderer}
};

/// retrieve yesterday's BMKG hotspot file and render the situational hotspot map
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    config: Option<PathBuf>,

    /// run date as YYYY-MM-DD, the map shows the day before (default is today)
    #[arg(short,long, value_parser = parse_date_arg)]
    date: Option<chrono::NaiveDate>,
}

fn parse_date_arg (s: &str)->std::result::Result<chrono::NaiveDate,String> {
    parse_date(s).ok_or_else( || format!("not a YYYY-MM-DD date: {s}"))
}

#[tokio::main]
async fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();
    let config: MapConfig = load_config_or_default( args.config.as_ref())?;
    ensure_writable_dir( &config.work_dir)?;

    let date = yesterday( args.date.unwrap_or_else( local_today));

    let source = match fetch_or_reuse( &config.ftp, date, &config.hotspot_path()).await {
        Ok(source) => source,
        Err(OdinHotspotError::NoData(msg)) => {
            error!("cannot generate map: {msg}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into())
    };
    if let DataSource::Stale(path) = &source {
        println!("using old data from {}", path.display());
    }

    let table = HotspotTable::read( source.path(), TabMode::Single)?;
    let hotspots = to_bmkg_hotspots( &table)?;
    write_clean_csv( config.clean_csv_path(), &table.header, &hotspots)?;
    let counts = RegionCounts::compute( &hotspots, &config.regions);

    let indonesia = BoundaryLayer::from_file( &config.indonesia_boundaries, &config.indonesia_names)?;
    let world = BoundaryLayer::from_file( &config.world_boundaries, &NameColumns::default())?;

    let font = match &config.font {
        Some(path) => match load_font( path) {
            Ok(font) => Some(font),
            Err(e) => { warn!( file=?path, "failed to load font, map has no text: {e}"); None }
        }
        None => { warn!("no font configured, map has no text"); None }
    };

    let logo = match &config.logo {
        Some(path) => load_logo( path).inspect_err( |e| warn!( file=?path, "logo not loaded: {e}")).ok(),
        None => None
    };

    let renderer = MapRenderer::new( config.layout.clone(), config.style.clone(), font);
    let input = MapInput {
        world: &world,
        indonesia: &indonesia,
        hotspots: &hotspots,
        counts: &counts,
        date,
        satellites: &config.satellites,
        logo: logo.as_ref(),
    };
    let img = renderer.render( &input);

    let output = config.output_path();
    save_png( &img, &output)?;
    println!("map {} has been generated ({} hotspots)", output.display(), counts.total.total());

    Ok(())
}
