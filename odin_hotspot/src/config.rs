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

//! RON configs for our batch steps. All fields have defaults so that partial configs are valid.
//! String values that hold secrets (tokens, passwords) can reference environment variables
//! as `${NAME}`, which get expanded when the value is used

use std::path::PathBuf;
use serde::{Serialize,Deserialize};
use odin_common::strings::env_expand;

use crate::firms::{FirmsSource,default_sources};
use crate::boundary::NameColumns;
use crate::map::{MapLayout,MapStyle};

/// config for the daily FIRMS ingest
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub sources: Vec<FirmsSource>,
    pub token: String, // Earthdata bearer token, normally "${EARTHDATA_TOKEN}"
    pub work_dir: PathBuf, // where we download to (files get removed after each run)
    pub province_boundaries: PathBuf,
    pub province_names: NameColumns,
    pub archive: PathBuf,
}

impl IngestConfig {
    pub fn token (&self)->String {
        env_expand( &self.token).into_owned()
    }
}

impl Default for IngestConfig {
    fn default()->Self {
        IngestConfig {
            sources: default_sources(),
            token: "${EARTHDATA_TOKEN}".to_string(),
            work_dir: PathBuf::from("."),
            province_boundaries: PathBuf::from("indonesia_38prov.geojson"),
            province_names: NameColumns::province_layer(),
            archive: PathBuf::from("archived_hotspot_idn.csv"),
        }
    }
}

/// config for the monthly per-region aggregation of the archive
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub archive: PathBuf,
    pub province_boundaries: PathBuf,
    pub province_names: NameColumns,
    pub kabupaten_boundaries: PathBuf,
    pub kabupaten_names: NameColumns,
    pub province_output: PathBuf,
    pub kabupaten_output: PathBuf,
}

impl Default for ExtractConfig {
    fn default()->Self {
        ExtractConfig {
            archive: PathBuf::from("archived_hotspot_idn.csv"),
            province_boundaries: PathBuf::from("indonesia_38prov.geojson"),
            province_names: NameColumns::province_layer(),
            kabupaten_boundaries: PathBuf::from("indonesia_kabkota_38prov.geojson"),
            kabupaten_names: NameColumns::kabupaten_layer(),
            province_output: PathBuf::from("hotspot_by_province.csv"),
            kabupaten_output: PathBuf::from("hotspot_by_municipality.csv"),
        }
    }
}

/// BMKG FTP server that serves the daily Himawari hotspot TXT files
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct BmkgFtpConfig {
    pub addr: String, // host:port
    pub root: String, // remote data dir, day directories are YYYY/MM/DD below
    user: String,
    pw: String,
}

impl BmkgFtpConfig {
    pub fn new (addr: impl ToString, root: impl ToString, user: impl ToString, pw: impl ToString)->Self {
        BmkgFtpConfig { addr: addr.to_string(), root: root.to_string(), user: user.to_string(), pw: pw.to_string() }
    }

    pub fn user (&self)->String { env_expand( &self.user).into_owned() }

    pub fn pw (&self)->String { env_expand( &self.pw).into_owned() }
}

impl Default for BmkgFtpConfig {
    fn default()->Self {
        BmkgFtpConfig::new( "202.90.199.64:21", "/himawari6/Hotspot/data", "${BMKG_FTP_USER}", "${BMKG_FTP_PW}")
    }
}

pub fn default_regions ()->Vec<String> {
    ["SUMATERA", "JAWA", "KEPULAUAN NUSA TENGGARA", "KALIMANTAN", "SULAWESI", "KEPULAUAN MALUKU", "PAPUA"]
        .iter().map( |s| s.to_string()).collect()
}

/// config for the daily BMKG hotspot map
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub ftp: BmkgFtpConfig,
    pub work_dir: PathBuf,
    pub hotspot_file: PathBuf, // name of the (reused) daily TXT file within work_dir
    pub clean_csv: PathBuf,
    pub indonesia_boundaries: PathBuf,
    pub indonesia_names: NameColumns,
    pub world_boundaries: PathBuf, // countries without Indonesia
    pub logo: Option<PathBuf>,
    pub font: Option<PathBuf>, // TTF/OTF font. No text is drawn without it
    pub output: PathBuf,
    pub regions: Vec<String>,
    pub satellites: String,
    pub layout: MapLayout,
    pub style: MapStyle,
}

impl MapConfig {
    pub fn hotspot_path (&self)->PathBuf { self.work_dir.join( &self.hotspot_file) }
    pub fn clean_csv_path (&self)->PathBuf { self.work_dir.join( &self.clean_csv) }
    pub fn output_path (&self)->PathBuf { self.work_dir.join( &self.output) }
}

impl Default for MapConfig {
    fn default()->Self {
        MapConfig {
            ftp: BmkgFtpConfig::default(),
            work_dir: PathBuf::from("."),
            hotspot_file: PathBuf::from("hotspot.txt"),
            clean_csv: PathBuf::from("hotspot.csv"),
            indonesia_boundaries: PathBuf::from("indonesia_38prov.geojson"),
            indonesia_names: NameColumns::province_layer(),
            world_boundaries: PathBuf::from("world_without_indonesia.geojson"),
            logo: Some( PathBuf::from("logo_bmkg.png")),
            font: None,
            output: PathBuf::from("update_hotspot.png"),
            regions: default_regions(),
            satellites: "Terra, Aqua, Suomi NPP, NOAA-20".to_string(),
            layout: MapLayout::default(),
            style: MapStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_ron_config() {
        let cfg: IngestConfig = ron::from_str( r#"(archive: "/tmp/archive.csv", token: "abc")"#).unwrap();
        assert_eq!( cfg.archive, PathBuf::from("/tmp/archive.csv"));
        assert_eq!( cfg.token(), "abc");
        assert_eq!( cfg.sources.len(), 4);

        let cfg: MapConfig = ron::from_str( r#"(ftp: (addr: "localhost:2121"), font: Some("DejaVuSans.ttf"))"#).unwrap();
        assert_eq!( cfg.ftp.addr, "localhost:2121");
        assert_eq!( cfg.ftp.root, "/himawari6/Hotspot/data");
        assert_eq!( cfg.regions.len(), 7);
        assert_eq!( cfg.hotspot_path(), PathBuf::from("./hotspot.txt"));
    }
}
