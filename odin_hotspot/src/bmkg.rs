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

//! BMKG Himawari hotspot files. These are daily tab separated text files with (at least)
//! `BUJUR` (longitude), `LINTANG` (latitude), `KEPERCAYAAN` (confidence 7..9) and `REGION` columns

use std::{fs::File, io::{BufRead,BufReader,Read}, path::{Path,PathBuf}};
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize,Deserialize};
use suppaftp::tokio::AsyncFtpStream;
use tokio::{fs::File as AsyncFile, io::AsyncWriteExt};
use tracing::{debug,info,warn};

use odin_common::fs::replace_file;
use crate::{config::BmkgFtpConfig, errors::{OdinHotspotError,Result,op_failed}};

pub const LON_COLUMN: &str = "BUJUR";
pub const LAT_COLUMN: &str = "LINTANG";
pub const CONFIDENCE_COLUMN: &str = "KEPERCAYAAN";
pub const REGION_COLUMN: &str = "REGION";

lazy_static! {
    static ref TAB_RUNS: Regex = Regex::new(r"\t+").unwrap();
}

/* #region FTP retrieval ******************************************************************/

/// e.g. "Hotspot_20250726.txt"
pub fn remote_filename (date: NaiveDate)->String {
    format!("Hotspot_{:04}{:02}{:02}.txt", date.year(), date.month(), date.day())
}

pub fn remote_dir (root: &str, date: NaiveDate)->String {
    format!("{}/{:04}/{:02}/{:02}", root.trim_end_matches('/'), date.year(), date.month(), date.day())
}

/// e.g. "/himawari6/Hotspot/data/2025/07/26/Hotspot_20250726.txt"
pub fn remote_path (root: &str, date: NaiveDate)->String {
    format!("{}/{}", remote_dir( root, date), remote_filename( date))
}

/// retrieve the hotspot file for `date` and store it as `target`, replacing a previous file.
/// We download under the remote file name into the target directory and only rename once the
/// transfer is complete
pub async fn download_daily_file (config: &BmkgFtpConfig, date: NaiveDate, target: &Path)->Result<PathBuf> {
    let dir = target.parent().filter( |p| !p.as_os_str().is_empty()).unwrap_or( Path::new("."));
    let local = dir.join( remote_filename( date));

    if let Err(e) = retrieve( config, date, &local).await {
        if local.is_file() {
            let _ = std::fs::remove_file( &local);
        }
        return Err(e)
    }

    replace_file( &local, target)?;
    info!( file=?target, "retrieved {}", remote_path( &config.root, date));
    Ok( target.to_path_buf())
}

async fn retrieve (config: &BmkgFtpConfig, date: NaiveDate, local: &Path)->Result<()> {
    let mut ftp_stream = AsyncFtpStream::connect( &config.addr).await?;
    ftp_stream.login( &config.user(), &config.pw()).await?;
    ftp_stream.cwd( &remote_dir( &config.root, date)).await?;

    let mut reader = ftp_stream.retr_as_stream( &remote_filename( date)).await?;
    let mut file = AsyncFile::create( local).await?;
    tokio::io::copy( &mut reader, &mut file).await?;
    ftp_stream.finalize_retr_stream( reader).await?;
    file.flush().await?;

    if let Err(e) = ftp_stream.quit().await {
        debug!("ftp quit failed: {e}");
    }
    Ok(())
}

/// where the hotspot data we use came from
#[derive(Debug,Clone,PartialEq,Eq)]
pub enum DataSource {
    Fresh(PathBuf), // downloaded in this run
    Stale(PathBuf)  // download failed, using an existing file from a previous run
}

impl DataSource {
    pub fn path (&self)->&Path {
        match self {
            DataSource::Fresh(p) | DataSource::Stale(p) => p.as_path()
        }
    }
}

/// try to download, fall back to an existing `target` (which can be empty) if that fails
pub async fn fetch_or_reuse (config: &BmkgFtpConfig, date: NaiveDate, target: &Path)->Result<DataSource> {
    match download_daily_file( config, date, target).await {
        Ok(path) => Ok( DataSource::Fresh(path)),
        Err(e) => {
            if target.is_file() {
                warn!( file=?target, "download failed ({e}), using existing data");
                Ok( DataSource::Stale( target.to_path_buf()))
            } else {
                Err( OdinHotspotError::NoData( format!("{} not retrieved ({e}) and no local data", remote_filename( date))))
            }
        }
    }
}

/* #endregion FTP retrieval */

/* #region hotspot tables *****************************************************************/

/// how columns are separated in TXT input
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum TabMode {
    Single,  // each tab separates a field, rows with a different field count than the header are dropped
    Collapse // runs of tabs count as one separator
}

/// a raw, untyped tab separated table
#[derive(Debug,Clone,Default,PartialEq)]
pub struct HotspotTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HotspotTable {
    pub fn read (path: impl AsRef<Path>, mode: TabMode)->Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader( file, mode)?;
        debug!( file=?path, rows=table.rows.len(), "read hotspot table");
        Ok(table)
    }

    pub fn from_reader (reader: impl Read, mode: TabMode)->Result<Self> {
        match mode {
            TabMode::Single => Self::read_single_tabs( reader),
            TabMode::Collapse => Self::read_collapsed_tabs( reader)
        }
    }

    /// each line is stripped before it is split. An empty input is an empty table
    fn read_single_tabs (reader: impl Read)->Result<Self> {
        let mut lines = BufReader::new( reader).lines();

        let header: Vec<String> = match lines.next() {
            Some(line) => line?.trim().split('\t').map( |s| s.to_string()).collect(),
            None => {
                warn!("hotspot table is empty");
                return Ok( HotspotTable::default())
            }
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut n_dropped = 0;
        for line in lines {
            let row: Vec<String> = line?.trim().split('\t').map( |s| s.to_string()).collect();
            if row.len() == header.len() {
                rows.push( row);
            } else {
                n_dropped += 1;
            }
        }

        if n_dropped > 0 {
            warn!( n_dropped, "dropped hotspot rows with wrong number of fields");
        }
        Ok( HotspotTable { header, rows })
    }

    fn read_collapsed_tabs (reader: impl Read)->Result<Self> {
        let mut lines = BufReader::new( reader).lines();

        let mut header: Vec<String> = Vec::new();
        for line in lines.by_ref() {
            let line = line?;
            if !line.trim().is_empty() {
                header = split_collapsed( &line).into_iter().map( |h| h.trim().to_string()).collect();
                break;
            }
        }
        if header.is_empty() {
            return Err( op_failed!("hotspot table has no header"))
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut n_dropped = 0;
        for line in lines {
            let line = line?;
            if line.trim().is_empty() { continue }

            let mut row = split_collapsed( &line);
            if row.len() > header.len() {
                n_dropped += 1;
            } else {
                row.resize( header.len(), String::new());
                rows.push( row);
            }
        }

        if n_dropped > 0 {
            warn!( n_dropped, "dropped hotspot rows with excess fields");
        }
        Ok( HotspotTable { header, rows })
    }

    pub fn column (&self, name: &str)->Option<usize> {
        self.header.iter().position( |h| h == name)
    }

    pub fn required_column (&self, name: &str)->Result<usize> {
        self.column(name).ok_or_else( || OdinHotspotError::MissingColumn( name.to_string()))
    }

    /// index of column `name`, appending an empty column if there is none yet
    pub fn ensure_column (&mut self, name: &str)->usize {
        match self.column(name) {
            Some(idx) => idx,
            None => {
                self.header.push( name.to_string());
                for row in &mut self.rows {
                    row.push( String::new());
                }
                self.header.len() - 1
            }
        }
    }

    pub fn len (&self)->usize { self.rows.len() }

    pub fn is_empty (&self)->bool { self.rows.is_empty() }

    /// write tab separated, with header
    pub fn write_tsv (&self, path: impl AsRef<Path>)->Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path( path.as_ref())?;

        writer.write_record( &self.header)?;
        for row in &self.rows {
            writer.write_record( row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn split_collapsed (line: &str)->Vec<String> {
    let line = line.trim_end_matches(['\r','\n']).trim_start_matches('\t');
    TAB_RUNS.split( line).map( |s| s.to_string()).collect()
}

/* #endregion hotspot tables */

/* #region typed hotspots *****************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum ConfidenceClass { Low, Medium, High }

impl ConfidenceClass {
    pub const ALL: [ConfidenceClass;3] = [ConfidenceClass::Low, ConfidenceClass::Medium, ConfidenceClass::High];

    pub fn from_value (confidence: i64)->Option<Self> {
        match confidence {
            7 => Some(ConfidenceClass::Low),
            8 => Some(ConfidenceClass::Medium),
            9 => Some(ConfidenceClass::High),
            _ => None
        }
    }

    pub fn label (&self)->&'static str {
        match self {
            ConfidenceClass::Low => "Rendah",
            ConfidenceClass::Medium => "Sedang",
            ConfidenceClass::High => "Tinggi",
        }
    }
}

/// a cleaned BMKG hotspot. `fields` is the raw row we got it from
#[derive(Debug,Clone,PartialEq)]
pub struct BmkgHotspot {
    pub lon: f64,
    pub lat: f64,
    pub confidence: i64,
    pub region: Option<String>,
    pub fields: Vec<String>,
}

impl BmkgHotspot {
    pub fn class (&self)->Option<ConfidenceClass> {
        ConfidenceClass::from_value( self.confidence)
    }
}

fn parse_finite (s: &str)->Option<f64> {
    s.trim().parse::<f64>().ok().filter( |v| v.is_finite())
}

/// coerce position and confidence of table rows, dropping rows where this fails.
/// Confidence values are truncated to integers
pub fn to_bmkg_hotspots (table: &HotspotTable)->Result<Vec<BmkgHotspot>> {
    if table.is_empty() {
        return Ok( Vec::new())
    }

    let i_lon = table.required_column( LON_COLUMN)?;
    let i_lat = table.required_column( LAT_COLUMN)?;
    let i_conf = table.required_column( CONFIDENCE_COLUMN)?;
    let i_region = table.column( REGION_COLUMN);

    let hotspots: Vec<BmkgHotspot> = table.rows.iter().filter_map( |row| {
        let lon = parse_finite( row.get(i_lon)?)?;
        let lat = parse_finite( row.get(i_lat)?)?;
        let confidence = parse_finite( row.get(i_conf)?)?.trunc() as i64;
        let region = i_region.and_then( |i| row.get(i)).map( |s| s.trim().to_string());

        Some( BmkgHotspot { lon, lat, confidence, region, fields: row.clone() })
    }).collect();

    let n_dropped = table.rows.len() - hotspots.len();
    if n_dropped > 0 {
        info!( n_dropped, "dropped hotspot rows without valid position or confidence");
    }
    Ok(hotspots)
}

/// write comma separated copy of cleaned hotspots (with integer confidence). Nothing is written if there are none,
/// the return value tells if we did write
pub fn write_clean_csv (path: impl AsRef<Path>, header: &[String], hotspots: &[BmkgHotspot])->Result<bool> {
    if hotspots.is_empty() {
        warn!("no valid hotspots, no CSV written");
        return Ok(false)
    }

    let path = path.as_ref();
    let i_conf = header.iter().position( |h| h == CONFIDENCE_COLUMN);

    let mut writer = csv::Writer::from_path( path)?;
    writer.write_record( header)?;
    for hs in hotspots {
        let mut fields = hs.fields.clone();
        if let Some(field) = i_conf.and_then( |i| fields.get_mut(i)) {
            *field = hs.confidence.to_string();
        }
        writer.write_record( &fields)?;
    }
    writer.flush()?;

    info!( file=?path, rows=hotspots.len(), "saved cleaned hotspot data");
    Ok(true)
}

/* #endregion typed hotspots */

/* #region region statistics **************************************************************/

#[derive(Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct ClassCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl ClassCounts {
    pub fn add (&mut self, class: ConfidenceClass) {
        match class {
            ConfidenceClass::Low => self.low += 1,
            ConfidenceClass::Medium => self.medium += 1,
            ConfidenceClass::High => self.high += 1,
        }
    }

    pub fn total (&self)->usize { self.low + self.medium + self.high }
}

/// per-class counts for the configured regions (in config order), plus Indonesia totals
#[derive(Debug,Clone,Default,PartialEq)]
pub struct RegionCounts {
    pub regions: Vec<(String,ClassCounts)>,
    pub total: ClassCounts,
}

impl RegionCounts {
    /// hotspots without class are not counted. The totals include hotspots outside of the listed regions
    pub fn compute<S: AsRef<str>> (hotspots: &[BmkgHotspot], regions: &[S])->Self {
        let mut region_counts: Vec<(String,ClassCounts)> = regions.iter()
            .map( |r| (r.as_ref().to_string(), ClassCounts::default()))
            .collect();
        let mut total = ClassCounts::default();

        for hs in hotspots {
            let Some(class) = hs.class() else { continue };
            total.add( class);

            if let Some(region) = &hs.region {
                if let Some((_,counts)) = region_counts.iter_mut().find( |(r,_)| r == region) {
                    counts.add( class);
                }
            }
        }

        RegionCounts { regions: region_counts, total }
    }
}

/* #endregion region statistics */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_path() {
        let date = NaiveDate::from_ymd_opt( 2025, 7, 6).unwrap();
        assert_eq!( remote_path( "/himawari6/Hotspot/data/", date), "/himawari6/Hotspot/data/2025/07/06/Hotspot_20250706.txt");
    }

    #[test]
    fn test_confidence_classes() {
        assert_eq!( ConfidenceClass::from_value(7), Some(ConfidenceClass::Low));
        assert_eq!( ConfidenceClass::from_value(9), Some(ConfidenceClass::High));
        assert_eq!( ConfidenceClass::from_value(6), None);
        assert_eq!( ConfidenceClass::Medium.label(), "Sedang");
    }

    #[test]
    fn test_collapsed_split() {
        assert_eq!( split_collapsed("\ta\t\tb\tc\r"), vec!["a","b","c"]);
    }
}
