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

use std::fs::{self,File,OpenOptions};
use std::io::{self,ErrorKind};
use std::path::{Path,PathBuf};
use tracing::{debug,warn};

use crate::io_error;

type Result<T> = std::result::Result<T,io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>)->Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        if fs::metadata(path)?.permissions().readonly() {
            Err( io_error!(ErrorKind::PermissionDenied, "dir {:?} not writable", path))
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path)
    }
}

pub fn file_length (path: impl AsRef<Path>)->Option<u64> {
    fs::metadata(path).ok().map( |meta| meta.len())
}

/// answer the path if it refers to a regular file that has content
pub fn existing_non_empty_file (path: impl AsRef<Path>)->Option<PathBuf> {
    let path = path.as_ref();
    if path.is_file() && file_length(path).unwrap_or(0) > 0 {
        Some( path.to_path_buf())
    } else {
        None
    }
}

/// open file for appending, creating it if it does not exist yet
pub fn append_open (path: impl AsRef<Path>)->Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())
}

/// rename `src` to `dst`, removing a previous `dst` first
pub fn replace_file (src: impl AsRef<Path>, dst: impl AsRef<Path>)->Result<()> {
    let dst = dst.as_ref();
    if dst.is_file() {
        fs::remove_file(dst)?;
    }
    fs::rename( src.as_ref(), dst)
}

/// remove all listed files that exist. Failures are reported but do not stop the removal of
/// remaining files. Returns the number of removed files
pub fn remove_files<P: AsRef<Path>> (paths: &[P])->usize {
    let mut n_removed = 0;

    for p in paths {
        let path = p.as_ref();
        if path.exists() {
            match fs::remove_file(path) {
                Ok(()) => {
                    debug!( file=?path, "removed");
                    n_removed += 1;
                }
                Err(e) => warn!( file=?path, "error removing file: {e}")
            }
        }
    }

    n_removed
}
