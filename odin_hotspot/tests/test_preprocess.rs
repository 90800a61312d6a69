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
use odin_hotspot::{
    bmkg::{HotspotTable,TabMode},
    boundary::{BoundaryLayer,NameColumns},
    preprocess::*,
    errors::Result
};

fn resource (name: &str)->PathBuf {
    PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(name)
}

fn layers ()->Result<(BoundaryLayer,BoundaryLayer)> {
    let prov = BoundaryLayer::from_file( resource("provinces.geojson"), &NameColumns::province_layer())?;
    let kab = BoundaryLayer::from_file( resource("kabupaten.geojson"), &NameColumns::kabupaten_layer())?;
    Ok( (prov,kab) )
}

#[test]
fn test_assign_regions()->Result<()> {
    let (prov,kab) = layers()?;
    let table = HotspotTable::read( resource("preprocess_input.txt"), TabMode::Collapse)?;
    assert_eq!( table.header, vec!["BUJUR", "LINTANG", "KEPERCAYAAN"]);
    assert_eq!( table.len(), 5);

    let outcome = assign_regions( &table, &prov, &kab)?;
    // the overlapping Pelalawan/Kampar row counts twice
    assert_eq!( outcome.summary(), "Matched 4/6 rows; removed 2 out-of-boundary rows.");
    assert_eq!( outcome.matched + outcome.removed, outcome.total);

    let out = &outcome.table;
    assert_eq!( out.header, vec!["BUJUR", "LINTANG", "KEPERCAYAAN", "PROVINSI", "KABUPATEN"]);

    let regions: Vec<(&str,&str,&str)> = out.rows.iter().map( |r| (r[0].as_str(), r[3].as_str(), r[4].as_str())).collect();
    assert_eq!( regions, vec![
        ("100.7", "Riau", "Pelalawan"), // overlapping kabupaten duplicate the row
        ("100.7", "Riau", "Kampar"),
        ("101.5", "Riau", "Siak"),
        ("103.0", "Jambi", ""),         // province from province layer
    ]);
    assert!( out.rows.iter().all( |r| !r[3].is_empty()));
    Ok(())
}

#[test]
fn test_existing_columns_are_overwritten()->Result<()> {
    let (prov,kab) = layers()?;
    let input = "BUJUR\tLINTANG\tPROVINSI\n101.5\t0.5\told\n";
    let table = HotspotTable::from_reader( input.as_bytes(), TabMode::Collapse)?;

    let outcome = assign_regions( &table, &prov, &kab)?;
    assert_eq!( outcome.table.header, vec!["BUJUR", "LINTANG", "PROVINSI", "KABUPATEN"]);
    assert_eq!( outcome.table.rows[0], vec!["101.5", "0.5", "Riau", "Siak"]);
    Ok(())
}

#[test]
fn test_write_table()->Result<()> {
    let (prov,kab) = layers()?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.txt");

    let table = HotspotTable::read( resource("preprocess_input.txt"), TabMode::Collapse)?;
    let outcome = assign_regions( &table, &prov, &kab)?;
    write_table( &path, &outcome.table)?;

    let content = fs::read_to_string( &path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!( lines[0], "BUJUR\tLINTANG\tKEPERCAYAAN\tPROVINSI\tKABUPATEN");
    assert_eq!( lines[4], "103.0\t-1.0\t7\tJambi\t");
    assert_eq!( lines.len(), 5);
    Ok(())
}
