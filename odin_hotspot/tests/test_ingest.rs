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

use std::{fs, path::PathBuf};
use chrono::NaiveDate;
use odin_hotspot::{
    IngestConfig, OdinHotspotError,
    archive::{read_records,AppendOutcome},
    boundary::NameColumns,
    firms::FirmsSource,
    ingest::{expected_files,run_daily_ingest},
    errors::Result
};

fn resource (name: &str)->PathBuf {
    PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(name)
}

// nothing listens on the discard port, i.e. downloads fail right away and we process whatever
// files are already in the work dir
fn test_config (work_dir: PathBuf, archive: PathBuf, province_boundaries: PathBuf)->IngestConfig {
    IngestConfig {
        sources: vec![
            FirmsSource::new( "modis", "http://127.0.0.1:9/MODIS_C6_1_Global_MCD14DL_NRT_{year}{doy}.txt"),
            FirmsSource::new( "noaa20", "http://127.0.0.1:9/J1_VIIRS_C2_Global_VJ114IMGTDL_NRT_{year}{doy}.txt"),
        ],
        token: String::new(),
        work_dir,
        province_boundaries,
        province_names: NameColumns::province_layer(),
        archive,
    }
}

fn stage_inputs (config: &IngestConfig, date: NaiveDate)->Result<()> {
    for (_,path) in expected_files( config, date) {
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        fs::copy( resource(&name), &path)?;
    }
    Ok(())
}

#[tokio::test]
async fn test_daily_ingest()->Result<()> {
    let dir = tempfile::tempdir()?;
    let archive = dir.path().join("archived_hotspot_idn.csv");
    let config = test_config( dir.path().join("work"), archive.clone(), resource("provinces.geojson"));
    fs::create_dir_all( &config.work_dir)?;

    let today = NaiveDate::from_ymd_opt( 2025, 2, 4).unwrap();
    let data_date = NaiveDate::from_ymd_opt( 2025, 2, 3).unwrap(); // doy 034
    stage_inputs( &config, data_date)?;

    let report = run_daily_ingest( &config, today).await?;
    assert_eq!( report.date, data_date);
    assert!( report.downloaded.is_empty());
    assert_eq!( report.n_high_confidence, 6);
    assert_eq!( report.n_in_indonesia, 4);
    assert_eq!( report.outcome, AppendOutcome::Created(4));

    // input files are gone
    for (_,path) in expected_files( &config, data_date) {
        assert!( !path.exists());
    }

    let records = read_records( &archive)?;
    assert_eq!( records.len(), 4);
    assert!( records.iter().all( |r| r.confidence == 1 && r.year == 2025 && r.month == 2 && r.day == 3));

    // second run for the same day has nothing left to append
    let report = run_daily_ingest( &config, today).await?;
    assert_eq!( report.outcome, AppendOutcome::Appended(0));
    assert_eq!( read_records( &archive)?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_ingest_cleans_up_on_boundary_error()->Result<()> {
    let dir = tempfile::tempdir()?;
    let archive = dir.path().join("archive.csv");
    let config = test_config( dir.path().to_path_buf(), archive.clone(), dir.path().join("missing.geojson"));

    let today = NaiveDate::from_ymd_opt( 2025, 2, 4).unwrap();
    let data_date = NaiveDate::from_ymd_opt( 2025, 2, 3).unwrap();
    stage_inputs( &config, data_date)?;

    let res = run_daily_ingest( &config, today).await;
    assert!( matches!( res, Err(OdinHotspotError::OpFailedError(_))));

    assert!( !archive.exists());
    for (_,path) in expected_files( &config, data_date) {
        assert!( !path.exists());
    }
    Ok(())
}
