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

//! the cumulative CSV archive of high confidence hotspots within Indonesia

use std::{fs::File, io::Read, path::Path};
use chrono::{Datelike, NaiveDate};
use geo_types::Point;
use serde::{Serialize,Deserialize};
use tracing::{info,warn};

use odin_common::fs::append_open;
use crate::{errors::Result, firms::FirmsHotspot};

/// one archive row. The field order is the column order of the archive file
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ArchiveRecord {
    pub lat: f64,
    pub lon: f64,
    pub month: u32,
    pub day: u32,
    pub year: i32,
    pub confidence: u32, // always 1 for ingested records
}

impl ArchiveRecord {
    pub fn from_hotspot (hs: &FirmsHotspot)->Self {
        ArchiveRecord {
            lat: hs.latitude,
            lon: hs.longitude,
            month: hs.acq_date.month(),
            day: hs.acq_date.day(),
            year: hs.acq_date.year(),
            confidence: 1
        }
    }

    /// None if year/month/day do not form a valid date
    pub fn date (&self)->Option<NaiveDate> {
        NaiveDate::from_ymd_opt( self.year, self.month, self.day)
    }

    pub fn point (&self)->Point<f64> {
        Point::new( self.lon, self.lat)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum AppendOutcome {
    Created(usize),  // archive did not exist before, header + n records written
    Appended(usize)  // n records appended to existing archive
}

impl AppendOutcome {
    pub fn count (&self)->usize {
        match self {
            AppendOutcome::Created(n) | AppendOutcome::Appended(n) => *n
        }
    }
}

/// append records to the archive, writing the header only if the archive file is new.
/// Appending an empty slice does not touch the file system
pub fn append_records (path: impl AsRef<Path>, records: &[ArchiveRecord])->Result<AppendOutcome> {
    let path = path.as_ref();
    if records.is_empty() {
        return Ok( AppendOutcome::Appended(0))
    }

    let is_new = !path.exists();
    let file = append_open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers( is_new)
        .from_writer( file);

    for rec in records {
        writer.serialize( rec)?;
    }
    writer.flush()?;

    let n = records.len();
    if is_new {
        info!( file=?path, n, "created archive");
        Ok( AppendOutcome::Created(n))
    } else {
        info!( file=?path, n, "appended to archive");
        Ok( AppendOutcome::Appended(n))
    }
}

pub fn read_records (path: impl AsRef<Path>)->Result<Vec<ArchiveRecord>> {
    let file = File::open( path.as_ref())?;
    read_records_from( file)
}

/// read archive records. Malformed rows are skipped
pub fn read_records_from (reader: impl Read)->Result<Vec<ArchiveRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim( csv::Trim::All)
        .from_reader( reader);

    let mut records: Vec<ArchiveRecord> = Vec::new();
    for (i,res) in csv_reader.deserialize::<ArchiveRecord>().enumerate() {
        match res {
            Ok(rec) => records.push(rec),
            Err(e) => warn!( row=i+1, "skipping malformed archive record: {e}")
        }
    }

    Ok(records)
}
