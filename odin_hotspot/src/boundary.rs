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

//! administrative boundary layers (provinces, kabupaten) read from GeoJSON feature collections,
//! and the point-in-polygon predicates we use to join hotspots with them.
//! Coordinates are always taken as geographic WGS84 (EPSG:4326) longitude/latitude

use std::{fs, io::Read, path::Path};
use geo::{BoundingRect, Contains, Intersects};
use geo_types::{Geometry, MultiPolygon, Point, Polygon};
use geojson::{Feature, GeoJson};
use serde::{Serialize,Deserialize};
use tracing::{debug,info};

use odin_common::BoundingBox;
use crate::errors::{OdinHotspotError,Result,op_failed};

/// property names we look up (in this order) to get province and kabupaten names of features.
/// Different boundary data sets use different attribute names for the same thing
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct NameColumns {
    pub province: Vec<String>,
    pub kabupaten: Vec<String>,
}

impl NameColumns {
    pub fn new (province: &[&str], kabupaten: &[&str])->Self {
        NameColumns {
            province: province.iter().map( |s| s.to_string()).collect(),
            kabupaten: kabupaten.iter().map( |s| s.to_string()).collect(),
        }
    }

    pub fn province_layer ()->Self {
        NameColumns::new( &["provinsi", "province", "name"], &[])
    }

    pub fn kabupaten_layer ()->Self {
        NameColumns::new( &["provinsi", "province"], &["kabupaten", "municipality", "name"])
    }
}

impl Default for NameColumns {
    fn default()->Self { NameColumns::province_layer() }
}

/// how a point relates to an area
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Predicate {
    Within,     // strictly inside, points on the boundary do not match
    Intersects  // inside or on the boundary
}

#[derive(Debug,Clone)]
pub struct AdminArea {
    pub province: Option<String>,
    pub kabupaten: Option<String>,
    pub shape: MultiPolygon<f64>,
    pub bbox: BoundingBox<f64>,
}

impl AdminArea {
    pub fn new (province: Option<String>, kabupaten: Option<String>, shape: MultiPolygon<f64>)->Option<Self> {
        let rect = shape.bounding_rect()?;
        let bbox = BoundingBox::from_wsen( &[rect.min().x, rect.min().y, rect.max().x, rect.max().y]);
        Some( AdminArea { province, kabupaten, shape, bbox })
    }

    pub fn matches (&self, point: &Point<f64>, predicate: Predicate)->bool {
        if !self.bbox.contains( point.x(), point.y()) {
            return false
        }

        match predicate {
            Predicate::Within => self.shape.contains( point),
            Predicate::Intersects => self.shape.intersects( point),
        }
    }
}

/// an ordered list of named administrative areas
#[derive(Debug,Clone,Default)]
pub struct BoundaryLayer {
    areas: Vec<AdminArea>,
}

impl BoundaryLayer {
    pub fn new (areas: Vec<AdminArea>)->Self {
        BoundaryLayer { areas }
    }

    pub fn from_file (path: impl AsRef<Path>, names: &NameColumns)->Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err( |e| op_failed!("failed to read boundary file {:?}: {}", path, e))?;
        let layer = Self::from_geojson_str( &s, names)?;
        info!( file=?path, areas=layer.len(), "loaded boundary layer");
        Ok(layer)
    }

    pub fn from_geojson_reader (mut reader: impl Read, names: &NameColumns)->Result<Self> {
        let mut s = String::new();
        reader.read_to_string( &mut s)?;
        Self::from_geojson_str( &s, names)
    }

    pub fn from_geojson_str (s: &str, names: &NameColumns)->Result<Self> {
        let features = match s.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => return Err( op_failed!("boundary layer has no features"))
        };

        let mut areas: Vec<AdminArea> = Vec::with_capacity( features.len());
        let mut n_skipped = 0;

        for feature in features {
            match feature_to_area( feature, names)? {
                Some(area) => areas.push(area),
                None => n_skipped += 1
            }
        }

        if n_skipped > 0 {
            debug!( n_skipped, "ignored non-polygonal boundary features");
        }

        Ok( BoundaryLayer { areas })
    }

    pub fn len (&self)->usize { self.areas.len() }

    pub fn is_empty (&self)->bool { self.areas.is_empty() }

    pub fn areas (&self)->&[AdminArea] { &self.areas }

    /// all areas that match the point, in layer order
    pub fn matches<'a> (&'a self, point: &'a Point<f64>, predicate: Predicate)->impl Iterator<Item=&'a AdminArea> + 'a {
        self.areas.iter().filter( move |a| a.matches( point, predicate))
    }

    pub fn first_match (&self, point: &Point<f64>, predicate: Predicate)->Option<&AdminArea> {
        self.areas.iter().find( |a| a.matches( point, predicate))
    }

    pub fn contains_any (&self, point: &Point<f64>, predicate: Predicate)->bool {
        self.first_match( point, predicate).is_some()
    }

    /// union of all area bounding boxes
    pub fn bbox (&self)->Option<BoundingBox<f64>> {
        let mut it = self.areas.iter();
        let first = it.next()?.bbox;
        Some( it.fold( first, |acc, a| {
            BoundingBox::new( acc.west.min(a.bbox.west), acc.south.min(a.bbox.south), acc.east.max(a.bbox.east), acc.north.max(a.bbox.north))
        }))
    }
}

fn feature_to_area (feature: Feature, names: &NameColumns)->Result<Option<AdminArea>> {
    let province = property_name( &feature, &names.province);
    let kabupaten = property_name( &feature, &names.kabupaten);

    let Some(geometry) = feature.geometry else { return Ok(None) };
    let geometry = Geometry::<f64>::try_from( geometry)?;

    match polygons_of( geometry) {
        Some(shape) if !shape.0.is_empty() => Ok( AdminArea::new( province, kabupaten, shape)),
        _ => Ok(None)
    }
}

/// the first candidate property that has a non-empty string value
fn property_name (feature: &Feature, candidates: &[String])->Option<String> {
    candidates.iter().find_map( |key| {
        feature.property(key)
            .and_then( |v| v.as_str())
            .map( |s| s.trim())
            .filter( |s| !s.is_empty())
            .map( |s| s.to_string())
    })
}

fn polygons_of (geometry: Geometry<f64>)->Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(p) => Some( MultiPolygon(vec![p])),
        Geometry::MultiPolygon(mp) => Some(mp),
        Geometry::GeometryCollection(gc) => {
            let polys: Vec<Polygon<f64>> = gc.0.into_iter()
                .filter_map( polygons_of)
                .flat_map( |mp| mp.0.into_iter())
                .collect();
            Some( MultiPolygon(polys))
        }
        _ => None
    }
}
