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

use std::fs;
use chrono::NaiveDate;
use odin_hotspot::{archive::*, firms::{FirmsHotspot,Sensor}, errors::Result};

fn hotspot (lat: f64, lon: f64, y: i32, m: u32, d: u32)->FirmsHotspot {
    FirmsHotspot {
        latitude: lat,
        longitude: lon,
        acq_date: NaiveDate::from_ymd_opt( y, m, d).unwrap(),
        confidence: "high".to_string(),
        sensor: Sensor::Viirs
    }
}

#[test]
fn test_append_writes_header_once()->Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("archive.csv");

    let outcome = append_records( &path, &[])?;
    assert_eq!( outcome, AppendOutcome::Appended(0));
    assert!( !path.exists());

    let recs: Vec<ArchiveRecord> = [hotspot( 1.5, 100.5, 2025, 2, 3), hotspot( -1.0, 103.0, 2025, 2, 3)]
        .iter().map( ArchiveRecord::from_hotspot).collect();
    assert_eq!( append_records( &path, &recs)?, AppendOutcome::Created(2));

    let more = vec![ ArchiveRecord::from_hotspot( &hotspot( 0.5, 101.5, 2025, 3, 1)) ];
    assert_eq!( append_records( &path, &more)?, AppendOutcome::Appended(1));

    let content = fs::read_to_string( &path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!( lines.len(), 4);
    assert_eq!( lines[0], "lat,lon,month,day,year,confidence");
    assert_eq!( lines[1], "1.5,100.5,2,3,2025,1");
    assert_eq!( content.matches("lat,lon").count(), 1);

    let read_back = read_records( &path)?;
    assert_eq!( read_back.len(), 3);
    assert_eq!( read_back[2].date(), NaiveDate::from_ymd_opt( 2025, 3, 1));
    assert!( read_back.iter().all( |r| r.confidence == 1));
    Ok(())
}

#[test]
fn test_malformed_rows_are_skipped()->Result<()> {
    let data = "lat,lon,month,day,year,confidence\n1.0,100.0,2,3,2025,1\nx,100.0,2,3,2025,1\n1.0,100.0,13,40,2025,1\n";
    let recs = read_records_from( data.as_bytes())?;

    assert_eq!( recs.len(), 2);
    assert!( recs[1].date().is_none()); // readable but not a valid date
    Ok(())
}
