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

//! monthly hotspot counts per province and kabupaten.
//! Records are joined with all areas they intersect, i.e. a hotspot on a shared border counts
//! for each of the adjacent areas

use std::{collections::BTreeMap, path::Path};
use serde::{Serialize,Deserialize};
use tracing::info;

use odin_common::datetime::YearMonth;
use crate::{archive::ArchiveRecord, boundary::{AdminArea,BoundaryLayer,Predicate}, errors::Result};

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct ProvinceCount {
    pub date: YearMonth,
    pub province: String,
    pub hotspot_count: usize,
}

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct KabupatenCount {
    pub date: YearMonth,
    pub province: String,
    pub kabupaten: String,
    pub hotspot_count: usize,
}

/// inner join of dated records with layer areas. `key_fn` extracts the group key of a matched
/// area, areas without a key are not counted
fn count_joined<K,F> (records: &[ArchiveRecord], layer: &BoundaryLayer, key_fn: F)->BTreeMap<(YearMonth,K),usize>
    where K: Ord, F: Fn(&AdminArea)->Option<K>
{
    let mut counts: BTreeMap<(YearMonth,K),usize> = BTreeMap::new();

    for rec in records {
        let Some(date) = rec.date() else { continue };
        let ym = YearMonth::from(date);
        let point = rec.point();

        for area in layer.matches( &point, Predicate::Intersects) {
            if let Some(key) = key_fn(area) {
                *counts.entry( (ym,key)).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// counts sorted by (year-month, province)
pub fn count_by_province (records: &[ArchiveRecord], layer: &BoundaryLayer)->Vec<ProvinceCount> {
    count_joined( records, layer, |a| a.province.clone())
        .into_iter()
        .map( |((date,province),hotspot_count)| ProvinceCount { date, province, hotspot_count })
        .collect()
}

/// counts sorted by (year-month, kabupaten, province)
pub fn count_by_kabupaten (records: &[ArchiveRecord], layer: &BoundaryLayer)->Vec<KabupatenCount> {
    count_joined( records, layer, |a| Some( (a.kabupaten.clone()?, a.province.clone()?)))
        .into_iter()
        .map( |((date,(kabupaten,province)),hotspot_count)| KabupatenCount { date, province, kabupaten, hotspot_count })
        .collect()
}

// header is written explicitly so that we also get it for empty results
fn write_csv<T: Serialize> (path: &Path, header: &[&str], rows: &[T])->Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path( path)?;
    writer.write_record( header)?;
    for row in rows {
        writer.serialize( row)?;
    }
    writer.flush()?;
    info!( file=?path, rows=rows.len(), "saved hotspot counts");
    Ok(())
}

/// write `date,province,hotspot_count` CSV
pub fn write_province_counts (path: impl AsRef<Path>, counts: &[ProvinceCount])->Result<()> {
    write_csv( path.as_ref(), &["date", "province", "hotspot_count"], counts)
}

/// write `date,province,kabupaten,hotspot_count` CSV
pub fn write_kabupaten_counts (path: impl AsRef<Path>, counts: &[KabupatenCount])->Result<()> {
    write_csv( path.as_ref(), &["date", "province", "kabupaten", "hotspot_count"], counts)
}
