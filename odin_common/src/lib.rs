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

//! shared utilities for the hotspot processing crates

use serde::{Serialize,Deserialize};
use num::Num;

pub mod macros;
pub mod errors;
pub mod fs;
pub mod datetime;
pub mod strings;
pub mod config;

pub use errors::{OdinCommonError,Result};

/// a generic bounding box without semantics for the coordinate type.
/// For geographic boxes x is longitude (west/east) and y is latitude (south/north)
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + PartialOrd> BoundingBox<T> {
    pub fn new (west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north }
    }

    pub fn from_wsen<N> (wsen: &[N;4])->BoundingBox<T> where N: Num + Copy + Into<T> {
        BoundingBox::<T>{
            west: wsen[0].into(),
            south: wsen[1].into(),
            east: wsen[2].into(),
            north: wsen[3].into()
        }
    }

    pub fn width (&self)->T { self.east - self.west }

    pub fn height (&self)->T { self.north - self.south }

    /// inclusive on all four edges
    pub fn contains (&self, x: T, y: T)->bool {
        x >= self.west && x <= self.east && y >= self.south && y <= self.north
    }

    pub fn intersects (&self, other: &BoundingBox<T>)->bool {
        self.west <= other.east && other.west <= self.east && self.south <= other.north && other.south <= self.north
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_contains_edges() {
        let bbox = BoundingBox::new( 95.0, -19.0, 143.0, 14.0);
        assert!( bbox.contains( 95.0, 0.0));
        assert!( bbox.contains( 143.0, 14.0));
        assert!( !bbox.contains( 94.99, 0.0));
        assert_eq!( bbox.width(), 48.0);
        assert_eq!( bbox.height(), 33.0);
    }

    #[test]
    fn test_bbox_intersects() {
        let a = BoundingBox::new( 0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new( 10.0, 5.0, 20.0, 15.0);
        let c = BoundingBox::new( 10.5, 5.0, 20.0, 15.0);
        assert!( a.intersects(&b));
        assert!( !a.intersects(&c));
    }
}
