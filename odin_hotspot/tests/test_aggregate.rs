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
use odin_common::datetime::YearMonth;
use odin_hotspot::{aggregate::*, archive::ArchiveRecord, boundary::{BoundaryLayer,NameColumns}, errors::Result};

fn resource (name: &str)->PathBuf {
    PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(name)
}

fn rec (lat: f64, lon: f64, year: i32, month: u32, day: u32)->ArchiveRecord {
    ArchiveRecord { lat, lon, month, day, year, confidence: 1 }
}

fn records ()->Vec<ArchiveRecord> {
    vec![
        rec( 1.5, 100.7, 2025, 2, 3),  // Riau / Pelalawan + Kampar
        rec( 0.5, 101.5, 2025, 2, 10), // Riau / Siak
        rec( -1.0, 103.0, 2025, 1, 5), // Jambi / unnamed kabupaten
        rec( 0.0, 102.0, 2025, 1, 6),  // corner shared by Riau and Jambi
        rec( 1.5, 100.2, 2024, 12, 31),// Riau / Pelalawan
        rec( 1.5, 100.2, 2025, 13, 1), // invalid date
        rec( 5.0, 120.0, 2025, 2, 3),  // outside
    ]
}

#[test]
fn test_count_by_province()->Result<()> {
    let layer = BoundaryLayer::from_file( resource("provinces.geojson"), &NameColumns::province_layer())?;
    let counts = count_by_province( &records(), &layer);

    let rows: Vec<(String,&str,usize)> = counts.iter().map( |c| (c.date.to_string(), c.province.as_str(), c.hotspot_count)).collect();
    assert_eq!( rows, vec![
        ("2024-12".to_string(), "Riau", 1),
        ("2025-01".to_string(), "Jambi", 2),
        ("2025-01".to_string(), "Riau", 1),
        ("2025-02".to_string(), "Riau", 2),
    ]);
    Ok(())
}

#[test]
fn test_count_by_kabupaten()->Result<()> {
    let layer = BoundaryLayer::from_file( resource("kabupaten.geojson"), &NameColumns::kabupaten_layer())?;
    let counts = count_by_kabupaten( &records(), &layer);

    let feb = YearMonth::new( 2025, 2).unwrap();
    let feb_kab: Vec<(&str,usize)> = counts.iter().filter( |c| c.date == feb).map( |c| (c.kabupaten.as_str(), c.hotspot_count)).collect();
    assert_eq!( feb_kab, vec![("Kampar",1), ("Pelalawan",1), ("Siak",1)]);

    // Jambi polygon has no kabupaten name, corner point only touches Siak
    let jan = YearMonth::new( 2025, 1).unwrap();
    let jan_kab: Vec<&str> = counts.iter().filter( |c| c.date == jan).map( |c| c.kabupaten.as_str()).collect();
    assert_eq!( jan_kab, vec!["Siak"]);
    assert!( counts.iter().all( |c| c.province == "Riau"));
    Ok(())
}

#[test]
fn test_write_counts()->Result<()> {
    let dir = tempfile::tempdir()?;
    let prov_path = dir.path().join("hotspot_by_province.csv");
    let kab_path = dir.path().join("hotspot_by_municipality.csv");

    let prov = vec![ ProvinceCount { date: YearMonth::new( 2025, 2).unwrap(), province: "Riau".to_string(), hotspot_count: 3 } ];
    write_province_counts( &prov_path, &prov)?;
    assert_eq!( fs::read_to_string( &prov_path)?, "date,province,hotspot_count\n2025-02,Riau,3\n");

    write_kabupaten_counts( &kab_path, &[])?;
    assert_eq!( fs::read_to_string( &kab_path)?, "date,province,kabupaten,hotspot_count\n");
    Ok(())
}
