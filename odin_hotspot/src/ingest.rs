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

//! the daily FIRMS ingest: download yesterday's files, keep high confidence hotspots within
//! Indonesian provinces and append them to the archive

use std::path::{Path,PathBuf};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{info,warn,error};

use odin_common::{datetime::yesterday, fs::{ensure_writable_dir,remove_files}};
use crate::{
    archive::{append_records,AppendOutcome,ArchiveRecord},
    boundary::{BoundaryLayer,Predicate},
    config::IngestConfig,
    errors::Result,
    firms::{collect_high_confidence,download_firms_file,local_filename,FirmsHotspot}
};

#[derive(Debug,Clone)]
pub struct IngestReport {
    pub date: NaiveDate, // the data date (day before the run date)
    pub downloaded: Vec<PathBuf>,
    pub n_high_confidence: usize,
    pub n_in_indonesia: usize,
    pub outcome: AppendOutcome,
    pub appended: Vec<ArchiveRecord>,
}

/// the local paths of all files we would download for `date`
pub fn expected_files (config: &IngestConfig, date: NaiveDate)->Vec<(String,PathBuf)> {
    config.sources.iter().filter_map( |src| {
        let url = src.url(date);
        let path = config.work_dir.join( local_filename( &url)?);
        Some( (url,path) )
    }).collect()
}

/// run the daily ingest for the data of the day before `today`.
/// Downloaded files are always removed before we return, also if processing failed
pub async fn run_daily_ingest (config: &IngestConfig, today: NaiveDate)->Result<IngestReport> {
    let date = yesterday( today);
    ensure_writable_dir( &config.work_dir)?;

    let files = expected_files( config, date);
    let token = config.token();
    if token.is_empty() {
        warn!("no Earthdata token set, downloads will most likely fail");
    }

    let client = Client::new();
    let mut downloaded: Vec<PathBuf> = Vec::new();

    for (url,path) in &files {
        info!( %url, "downloading");
        match download_firms_file( &client, url, &token, &config.work_dir).await {
            Ok(_) => downloaded.push( path.clone()),
            Err(e) => error!( %url, "download failed: {e}")
        }
    }

    let paths: Vec<&PathBuf> = files.iter().map( |(_,p)| p).collect();
    let res = process_files( config, &paths);

    let n_removed = remove_files( &paths);
    info!( n_removed, "cleaned up downloaded files");

    let (n_high_confidence, appended, outcome) = res?;
    Ok( IngestReport { date, downloaded, n_high_confidence, n_in_indonesia: appended.len(), outcome, appended })
}

fn process_files<P: AsRef<Path>> (config: &IngestConfig, paths: &[P])->Result<(usize,Vec<ArchiveRecord>,AppendOutcome)> {
    let hotspots = collect_high_confidence( paths);
    let n_high_confidence = hotspots.len();

    let layer = BoundaryLayer::from_file( &config.province_boundaries, &config.province_names)
        .inspect_err( |e| error!( file=?config.province_boundaries, "failed to load province boundaries: {e}"))?;

    let records = within_provinces( &hotspots, &layer);
    info!( n_high_confidence, n_in_indonesia=records.len(), "filtered hotspots");

    let outcome = append_records( &config.archive, &records)?;
    Ok( (n_high_confidence, records, outcome) )
}

/// archive records for all hotspots strictly inside any province. Points in overlapping
/// provinces are only reported once
pub fn within_provinces (hotspots: &[FirmsHotspot], layer: &BoundaryLayer)->Vec<ArchiveRecord> {
    hotspots.iter()
        .map( ArchiveRecord::from_hotspot)
        .filter( |rec| layer.contains_any( &rec.point(), Predicate::Within))
        .collect()
}
