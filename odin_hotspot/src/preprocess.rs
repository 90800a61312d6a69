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

//! annotate BMKG hotspot tables with the province (`PROVINSI`) and kabupaten (`KABUPATEN`)
//! each hotspot lies in

use std::path::Path;
use geo_types::Point;
use tracing::info;

use crate::{
    bmkg::{HotspotTable,LAT_COLUMN,LON_COLUMN},
    boundary::{BoundaryLayer,Predicate},
    errors::Result
};

pub const PROVINCE_COLUMN: &str = "PROVINSI";
pub const KABUPATEN_COLUMN: &str = "KABUPATEN";

#[derive(Debug,Clone)]
pub struct PreprocessOutcome {
    pub table: HotspotTable,
    pub matched: usize, // output rows
    pub total: usize,   // rows after the kabupaten join, i.e. matched + removed
    pub removed: usize, // joined rows dropped because they are outside of all provinces
}

impl PreprocessOutcome {
    pub fn summary (&self)->String {
        format!("Matched {}/{} rows; removed {} out-of-boundary rows.", self.matched, self.total, self.removed)
    }
}

fn parse_point (row: &[String], i_lon: usize, i_lat: usize)->Option<Point<f64>> {
    let lon = row.get(i_lon)?.trim().parse::<f64>().ok()?;
    let lat = row.get(i_lat)?.trim().parse::<f64>().ok()?;
    Some( Point::new( lon, lat))
}

/// assign province and kabupaten names to all rows of `table`.
///
/// Rows are joined with every kabupaten they are within, which can duplicate rows that fall into
/// overlapping kabupaten polygons. Rows without a kabupaten get their province from `prov_layer`.
/// Rows that end up without province are removed
pub fn assign_regions (table: &HotspotTable, prov_layer: &BoundaryLayer, kab_layer: &BoundaryLayer)->Result<PreprocessOutcome> {
    let i_lon = table.required_column( LON_COLUMN)?;
    let i_lat = table.required_column( LAT_COLUMN)?;

    let mut out = HotspotTable { header: table.header.clone(), rows: Vec::new() };
    let i_prov = out.ensure_column( PROVINCE_COLUMN);
    let i_kab = out.ensure_column( KABUPATEN_COLUMN);
    let n_cols = out.header.len();

    let mut n_joined = 0;

    for row in &table.rows {
        // (province,kabupaten) candidates for this row
        let mut assignments: Vec<(Option<String>,Option<String>)> = Vec::new();

        if let Some(point) = parse_point( row, i_lon, i_lat) {
            for area in kab_layer.matches( &point, Predicate::Within) {
                assignments.push( (area.province.clone(), area.kabupaten.clone()));
            }
            if assignments.is_empty() {
                assignments.push( (None,None));
            }

            for (prov,kab) in assignments.iter_mut() {
                if kab.is_none() {
                    *prov = prov_layer.first_match( &point, Predicate::Within).and_then( |a| a.province.clone());
                }
            }
        } else {
            assignments.push( (None,None));
        }

        n_joined += assignments.len();

        for (prov,kab) in assignments {
            if let Some(prov) = prov {
                let mut out_row = row.clone();
                out_row.resize( n_cols, String::new());
                out_row[i_prov] = prov;
                out_row[i_kab] = kab.unwrap_or_default();
                out.rows.push( out_row);
            }
        }
    }

    let matched = out.rows.len();
    let outcome = PreprocessOutcome { matched, total: n_joined, removed: n_joined - matched, table: out };
    info!( matched=outcome.matched, total=outcome.total, removed=outcome.removed, "assigned regions");

    Ok(outcome)
}

/// tab separated output, with header
pub fn write_table (path: impl AsRef<Path>, table: &HotspotTable)->Result<()> {
    let path = path.as_ref();
    table.write_tsv( path)?;
    info!( file=?path, rows=table.len(), "saved preprocessed hotspots");
    Ok(())
}
