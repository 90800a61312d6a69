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

//! FIRMS near-realtime active fire files (MODIS C6.1 and VIIRS C2 global daily text files),
//! see <https://www.earthdata.nasa.gov/data/tools/firms>

use std::{fs::File, io::{Read,Write}, path::{Path,PathBuf}};
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn,error};

use odin_common::{datetime::day_of_year, fs::{existing_non_empty_file,filename}};
use crate::errors::{OdinHotspotError,Result,op_failed};

const FIRMS_ARCHIVE: &str = "https://nrt3.modaps.eosdis.nasa.gov/archive/FIRMS";

/// a FIRMS product we retrieve daily files for. The `url_template` can contain
/// `{year}` (4 digits) and `{doy}` (zero padded 3 digit day of year) placeholders
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct FirmsSource {
    pub name: String,
    pub url_template: String,
}

impl FirmsSource {
    pub fn new (name: impl ToString, url_template: impl ToString)->Self {
        FirmsSource { name: name.to_string(), url_template: url_template.to_string() }
    }

    pub fn url (&self, date: NaiveDate)->String {
        source_url( self, date)
    }
}

/// MODIS (Terra/Aqua), NOAA-20, NOAA-21 and Suomi-NPP VIIRS - in this order
pub fn default_sources ()->Vec<FirmsSource> {
    vec![
        FirmsSource::new( "modis", format!("{FIRMS_ARCHIVE}/modis-c6.1/Global/MODIS_C6_1_Global_MCD14DL_NRT_{{year}}{{doy}}.txt")),
        FirmsSource::new( "noaa20", format!("{FIRMS_ARCHIVE}/noaa-20-viirs-c2/Global/J1_VIIRS_C2_Global_VJ114IMGTDL_NRT_{{year}}{{doy}}.txt")),
        FirmsSource::new( "noaa21", format!("{FIRMS_ARCHIVE}/noaa-21-viirs-c2/Global/J2_VIIRS_C2_Global_VJ214IMGTDL_NRT_{{year}}{{doy}}.txt")),
        FirmsSource::new( "suomi", format!("{FIRMS_ARCHIVE}/suomi-npp-viirs-c2/Global/SUOMI_VIIRS_C2_Global_VNP14IMGTDL_NRT_{{year}}{{doy}}.txt")),
    ]
}

pub fn source_url (source: &FirmsSource, date: NaiveDate)->String {
    source.url_template
        .replace( "{year}", &format!("{:04}", date.year()))
        .replace( "{doy}", &format!("{:03}", day_of_year( date)))
}

/// the last path element of a URL (without query), which is also the name we store downloads under
pub fn local_filename (url: &str)->Option<&str> {
    let path = url.split(['?','#']).next()?;
    let name = path.rsplit('/').next()?;
    if name.is_empty() { None } else { Some(name) }
}

/// retrieve a FIRMS file into `dir`, authorized by an Earthdata bearer `token` (if not empty).
/// We download into a temp file first so that partial downloads never show up under the final name
pub async fn download_firms_file (client: &Client, url: &str, token: &str, dir: &Path)->Result<PathBuf> {
    let filename = local_filename(url).ok_or_else( || op_failed!("no filename in url {}", url))?;
    let path = dir.join( filename);

    let mut request = client.get(url);
    if !token.is_empty() {
        request = request.bearer_auth( token);
    }

    let mut response = request.send().await?;
    if !response.status().is_success() {
        return Err( OdinHotspotError::DownloadError( format!("{} -> {}", url, response.status())))
    }

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)?;
    }
    file.persist( &path).map_err( |e| e.error)?;

    Ok(path)
}

/* #region confidence filtering ***********************************************************/

/// the instrument family of a FIRMS file, which determines how to interpret its confidence column
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum Sensor {
    Modis, // numeric confidence 0..100
    Viirs  // nominal confidence low/nominal/high
}

impl Sensor {
    /// derive sensor from (upper cased) FIRMS file name
    pub fn from_filename (name: &str)->Option<Sensor> {
        let name = name.to_uppercase();
        if name.contains("MODIS") {
            Some(Sensor::Modis)
        } else if name.contains("J1_VIIRS") || name.contains("J2_VIIRS") || name.contains("SUOMI") {
            Some(Sensor::Viirs)
        } else {
            None
        }
    }

    pub fn from_path (path: impl AsRef<Path>)->Option<Sensor> {
        filename( &path).and_then( Sensor::from_filename)
    }
}

/// MODIS detections need a numeric confidence above 80, VIIRS detections a 'high' label
pub fn is_high_confidence (sensor: Sensor, confidence: &str)->bool {
    match sensor {
        Sensor::Modis => confidence.trim().parse::<f64>().map( |c| c > 80.0).unwrap_or(false),
        Sensor::Viirs => confidence.trim().eq_ignore_ascii_case("high")
    }
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct FirmsHotspot {
    pub latitude: f64,
    pub longitude: f64,
    pub acq_date: NaiveDate,
    pub confidence: String,
    pub sensor: Sensor,
}

// we only need a few of the columns. Keeping them as strings lets us coerce per value
#[derive(Debug,Deserialize)]
struct RawFirmsRecord {
    latitude: String,
    longitude: String,
    acq_date: String,
    confidence: String,
}

const REQUIRED_COLUMNS: [&str;4] = ["latitude", "longitude", "acq_date", "confidence"];

/// read high confidence hotspots from a FIRMS CSV text file. Files that do not belong to a
/// known sensor are accepted but yield no hotspots
pub fn read_high_confidence (path: impl AsRef<Path>)->Result<Vec<FirmsHotspot>> {
    let path = path.as_ref();
    match Sensor::from_path(path) {
        Some(sensor) => {
            let file = File::open(path)?;
            let hotspots = read_high_confidence_from( file, sensor)?;
            Ok(hotspots)
        }
        None => {
            debug!( file=?path, "no known sensor for file, ignored");
            Ok( Vec::new())
        }
    }
}

pub fn read_high_confidence_from (reader: impl Read, sensor: Sensor)->Result<Vec<FirmsHotspot>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim( csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any( |h| h == col) {
            return Err( OdinHotspotError::MissingColumn( col.to_string()))
        }
    }

    let mut n_rows = 0;
    let mut hotspots: Vec<FirmsHotspot> = Vec::new();

    for res in csv_reader.deserialize::<RawFirmsRecord>() {
        n_rows += 1;
        match res {
            Ok(raw) => {
                if is_high_confidence( sensor, &raw.confidence) {
                    if let Some(hs) = to_hotspot( raw, sensor) {
                        hotspots.push(hs);
                    }
                }
            }
            Err(e) => debug!("skipping malformed FIRMS record: {e}")
        }
    }

    info!( ?sensor, rows=n_rows, high_confidence=hotspots.len(), "processed FIRMS data");
    Ok(hotspots)
}

fn to_hotspot (raw: RawFirmsRecord, sensor: Sensor)->Option<FirmsHotspot> {
    let latitude = raw.latitude.trim().parse::<f64>().ok()?;
    let longitude = raw.longitude.trim().parse::<f64>().ok()?;
    let acq_date = NaiveDate::parse_from_str( raw.acq_date.trim(), "%Y-%m-%d").ok()?;

    if latitude.is_finite() && longitude.is_finite() {
        Some( FirmsHotspot { latitude, longitude, acq_date, confidence: raw.confidence, sensor })
    } else {
        None
    }
}

/// concatenate high confidence hotspots of all given files (in order). Missing, empty or
/// unreadable files are reported and skipped
pub fn collect_high_confidence<P: AsRef<Path>> (files: &[P])->Vec<FirmsHotspot> {
    let mut all: Vec<FirmsHotspot> = Vec::new();

    for p in files {
        let path = p.as_ref();
        if existing_non_empty_file(path).is_none() {
            warn!( file=?path, "skipping empty or non-existent file");
            continue;
        }

        match read_high_confidence(path) {
            Ok(mut hotspots) => {
                if !hotspots.is_empty() {
                    info!( file=?path, n=hotspots.len(), "found high confidence rows");
                    all.append( &mut hotspots);
                }
            }
            Err(e) => error!( file=?path, "error reading file: {e}")
        }
    }

    all
}

/* #endregion confidence filtering */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_urls() {
        let date = NaiveDate::from_ymd_opt( 2025, 2, 3).unwrap();
        let urls: Vec<String> = default_sources().iter().map( |s| s.url(date)).collect();

        assert_eq!( urls[0], "https://nrt3.modaps.eosdis.nasa.gov/archive/FIRMS/modis-c6.1/Global/MODIS_C6_1_Global_MCD14DL_NRT_2025034.txt");
        assert!( urls[3].ends_with("/suomi-npp-viirs-c2/Global/SUOMI_VIIRS_C2_Global_VNP14IMGTDL_NRT_2025034.txt"));
        assert_eq!( local_filename( &urls[1]), Some("J1_VIIRS_C2_Global_VJ114IMGTDL_NRT_2025034.txt"));
        assert_eq!( local_filename( "https://host/dir/"), None);
    }

    #[test]
    fn test_sensor_detection() {
        assert_eq!( Sensor::from_filename("MODIS_C6_1_Global_MCD14DL_NRT_2025034.txt"), Some(Sensor::Modis));
        assert_eq!( Sensor::from_filename("j2_viirs_c2_global_vj214imgtdl_nrt_2025034.txt"), Some(Sensor::Viirs));
        assert_eq!( Sensor::from_filename("SUOMI_VIIRS_C2_Global_VNP14IMGTDL_NRT_2025034.txt"), Some(Sensor::Viirs));
        assert_eq!( Sensor::from_filename("hotspot.txt"), None);
    }

    #[test]
    fn test_confidence_rules() {
        assert!( is_high_confidence( Sensor::Modis, "81"));
        assert!( !is_high_confidence( Sensor::Modis, "80"));
        assert!( !is_high_confidence( Sensor::Modis, "h"));
        assert!( is_high_confidence( Sensor::Viirs, " High "));
        assert!( !is_high_confidence( Sensor::Viirs, "nominal"));
        assert!( !is_high_confidence( Sensor::Viirs, "95"));
    }
}
