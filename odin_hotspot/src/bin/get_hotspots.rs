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
use odin_common::{config::load_config_or_default, datetime::{local_today,parse_date}};
use odin_hotspot::{init_tracing, IngestConfig, ingest::run_daily_ingest};

/// download yesterday's FIRMS hotspots and append high confidence detections within Indonesia to the archive
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    config: Option<PathBuf>,

    /// run date as YYYY-MM-DD, data is retrieved for the day before (default is today)
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

    let config: IngestConfig = load_config_or_default( args.config.as_ref())?;
    let today = args.date.unwrap_or_else( local_today);

    let report = run_daily_ingest( &config, today).await?;

    println!("data date:       {}", report.date);
    println!("downloaded:      {} of {} files", report.downloaded.len(), config.sources.len());
    println!("high confidence: {}", report.n_high_confidence);
    println!("in Indonesia:    {}", report.n_in_indonesia);

    if report.appended.is_empty() {
        println!("no new hotspots for {}", config.archive.display());
    } else {
        println!("saved {} hotspots to {}", report.outcome.count(), config.archive.display());
        println!("{:>10} {:>10} {:>5} {:>3} {:>4}", "lat", "lon", "month", "day", "year");
        for rec in report.appended.iter().take(5) {
            println!("{:>10.4} {:>10.4} {:>5} {:>3} {:>4}", rec.lat, rec.lon, rec.month, rec.day, rec.year);
        }
    }

    Ok(())
}
