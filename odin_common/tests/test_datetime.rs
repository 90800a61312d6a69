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

use chrono::NaiveDate;
use odin_common::datetime::*;

#[test]
fn test_yesterday_and_doy() {
    let d = NaiveDate::from_ymd_opt( 2025, 1, 1).unwrap();
    let y = yesterday(d);
    assert_eq!( y, NaiveDate::from_ymd_opt( 2024, 12, 31).unwrap());
    assert_eq!( day_of_year(y), 366); // 2024 is a leap year

    let d = NaiveDate::from_ymd_opt( 2025, 1, 9).unwrap();
    assert_eq!( day_of_year(d), 9);
    assert_eq!( year_doy_string(d), "2025009");
}

#[test]
fn test_year_month() {
    let a = YearMonth::from( NaiveDate::from_ymd_opt( 2024, 9, 30).unwrap());
    let b: YearMonth = "2024-10".parse().unwrap();
    let c: YearMonth = "2023-12".parse().unwrap();

    assert_eq!( a.to_string(), "2024-09");
    assert!( c < a && a < b);
    assert!( "2024-13".parse::<YearMonth>().is_err());
    assert!( "202410".parse::<YearMonth>().is_err());
}

#[test]
fn test_parse_date() {
    assert_eq!( parse_date(" 2025-07-26 "), NaiveDate::from_ymd_opt( 2025, 7, 26));
    assert!( parse_date("26-07-2025").is_none());
}
