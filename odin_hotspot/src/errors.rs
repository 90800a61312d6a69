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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinHotspotError>;

#[derive(Error,Debug)]
pub enum OdinHotspotError {

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("csv error {0}")]
    CsvError( #[from] csv::Error),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("ftp error {0}")]
    FtpError( #[from] suppaftp::FtpError),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("image error {0}")]
    ImageError( #[from] image::ImageError),

    #[error("invalid font {0}")]
    FontError( #[from] ab_glyph::InvalidFont),

    #[error("download failed: {0}")]
    DownloadError(String),

    #[error("no data available: {0}")]
    NoData(String),

    #[error("missing column {0}")]
    MissingColumn(String),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinHotspotError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
