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

use std::{borrow::Cow, env};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new( r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").unwrap();
}

/// expand `${NAME}` and `$NAME` references with the values of respective environment variables.
/// Undefined variables expand into empty strings
pub fn env_expand (s: &str)->Cow<'_,str> {
    env_expand_with( s, |name| env::var(name).ok())
}

/// variant of [`env_expand`] with an explicit variable lookup
pub fn env_expand_with<F> (s: &str, lookup: F)->Cow<'_,str> where F: Fn(&str)->Option<String> {
    ENV_VAR_RE.replace_all( s, |caps: &Captures| {
        let name = caps.get(1).or_else( || caps.get(2)).map( |m| m.as_str()).unwrap_or("");
        lookup(name).unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup (name: &str)->Option<String> {
        match name {
            "FTP_USER" => Some("hotspot".to_string()),
            "TOKEN" => Some("abc.def".to_string()),
            _ => None
        }
    }

    #[test]
    fn test_env_expand_forms() {
        assert_eq!( env_expand_with( "${FTP_USER}", lookup), "hotspot");
        assert_eq!( env_expand_with( "Bearer $TOKEN", lookup), "Bearer abc.def");
        assert_eq!( env_expand_with( "x${UNDEFINED}y", lookup), "xy");
        assert_eq!( env_expand_with( "no vars here", lookup), "no vars here");
    }
}
