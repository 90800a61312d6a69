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

use std::{fs, path::Path};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::errors::{OdinCommonError,Result};

/// load a RON config file
pub fn load_config<C,P> (path: P)->Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( OdinCommonError::ConfigNotFound( path.display().to_string()))
    }

    let data = fs::read(path)?;
    let config = ron::de::from_bytes( data.as_slice())?;
    info!( config=%path.display(), "loaded config");
    Ok(config)
}

/// load config from `path` if specified, otherwise use the `Default` value of the config type
pub fn load_config_or_default<C,P> (path: Option<P>)->Result<C> where C: DeserializeOwned + Default, P: AsRef<Path> {
    match path {
        Some(path) => load_config(path),
        None => Ok( C::default())
    }
}
