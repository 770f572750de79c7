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

use num_bigint::BigUint;

use crate::{Error, Result};

/// Render an integer amount as a decimal string with `decimal_places`
/// fractional digits. Trailing zeros and a dangling point are trimmed.
pub fn encode_base10(amount: &BigUint, decimal_places: usize) -> String {
    let mut s: Vec<char> =
        format!("{:0width$}", amount, width = 1 + decimal_places).chars().collect();
    s.insert(s.len() - decimal_places, '.');

    String::from_iter(&s).trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Parse a decimal string into an integer amount with `decimal_places`
/// fractional digits. With `strict` set, excess fractional digits are an
/// error, otherwise they are truncated.
pub fn decode_base10(amount: &str, decimal_places: usize, strict: bool) -> Result<BigUint> {
    let amount = amount.trim();
    let (int_part, frac_part) = amount.split_once('.').unwrap_or((amount, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(Error::ParseFailed("Empty amount"))
    }

    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return Err(Error::ParseFailed("Found non-digits"))
    }

    let frac_part = if frac_part.len() > decimal_places {
        if strict {
            return Err(Error::ParseFailed("Amount has too many decimal places"))
        }
        &frac_part[..decimal_places]
    } else {
        frac_part
    };

    let digits =
        format!("{}{}{}", int_part, frac_part, "0".repeat(decimal_places - frac_part.len()));
    Ok(digits.parse::<BigUint>()?)
}
