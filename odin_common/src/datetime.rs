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

use std::{fmt,str::FromStr};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Serialize,Deserialize,Serializer,Deserializer,de::Error as DeError};

use crate::errors::OdinCommonError;

/// this should be used wherever we need the current calendar date of the machine we run on
#[inline]
pub fn local_today ()->NaiveDate {
    Local::now().date_naive()
}

/// the day before `date` (saturates at `NaiveDate::MIN`)
pub fn yesterday (date: NaiveDate)->NaiveDate {
    date.checked_sub_days( Days::new(1)).unwrap_or(NaiveDate::MIN)
}

/// the julian day (day of year), 1..=366
#[inline]
pub fn day_of_year (date: NaiveDate)->u32 {
    date.ordinal()
}

/// "YYYYDDD" as used in many NASA file names
pub fn year_doy_string (date: NaiveDate)->String {
    format!("{:04}{:03}", date.year(), day_of_year( date))
}

/// parse "YYYY-MM-DD" dates (as used on our command lines)
pub fn parse_date (s: &str)->Option<NaiveDate> {
    NaiveDate::parse_from_str( s.trim(), "%Y-%m-%d").ok()
}

/* #region YearMonth ********************************************************************/

/// a monthly period. Ordered by year first, then month
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32, // 1..=12
}

impl YearMonth {
    pub fn new (year: i32, month: u32)->Option<Self> {
        if (1..=12).contains(&month) { Some( YearMonth{ year, month }) } else { None }
    }
}

impl From<NaiveDate> for YearMonth {
    fn from (date: NaiveDate)->Self {
        YearMonth { year: date.year(), month: date.month() }
    }
}

impl fmt::Display for YearMonth {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = OdinCommonError;

    fn from_str (s: &str)->Result<Self,Self::Err> {
        let s = s.trim();
        let (y,m) = s.split_once('-').ok_or_else( || OdinCommonError::ParseError( format!("not a year-month: {s:?}")))?;
        let year = y.parse::<i32>().map_err( |_| OdinCommonError::ParseError( format!("invalid year in {s:?}")))?;
        let month = m.parse::<u32>().map_err( |_| OdinCommonError::ParseError( format!("invalid month in {s:?}")))?;
        YearMonth::new( year, month).ok_or_else( || OdinCommonError::ParseError( format!("month out of range in {s:?}")))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer> (&self, s: S)->Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>> (deserializer: D)->Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err( D::Error::custom)
    }
}

/* #endregion YearMonth */
