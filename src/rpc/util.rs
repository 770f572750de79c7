/* This file is part of ProfitUnity DAO
 *
 * Copyright (C) 2022-2026 ProfitUnity developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::collections::HashMap;

pub use tinyjson::JsonValue::{
    self, Array as JsonArray, Boolean as JsonBool, Null as JsonNull, Number as JsonNum,
    Object as JsonObj, String as JsonStr,
};

use crate::{Error, Result};

// helper functions
pub fn json_map<const N: usize>(vals: [(&str, JsonValue); N]) -> JsonValue {
    JsonObj(HashMap::from(vals.map(|(k, v)| (k.to_string(), v))))
}

pub fn json_str(val: &str) -> JsonValue {
    JsonStr(val.to_string())
}

/// Look up `key` in a JSON object. Missing keys and non-objects yield `None`.
pub fn json_field<'a>(value: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
    let map: &HashMap<String, JsonValue> = value.get()?;
    map.get(key)
}

/// Grab a string out of a JSON value, failing with the given context.
pub fn json_as_str<'a>(value: &'a JsonValue, ctx: &'static str) -> Result<&'a str> {
    match value.get::<String>() {
        Some(s) => Ok(s.as_str()),
        None => Err(Error::InvalidJsonRpcReply(format!("{ctx}: expected a string"))),
    }
}
