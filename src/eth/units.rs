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
use num_traits::ToPrimitive;

use crate::{
    util::parse::{decode_base10, encode_base10},
    Error, Result,
};

/// Number of decimals of one ether expressed in wei
pub const ETHER_DECIMALS: usize = 18;

/// Encode an integer as a JSON-RPC hex quantity (`0x0`, `0x1a`, ...).
pub fn to_quantity(v: &BigUint) -> String {
    format!("0x{}", v.to_str_radix(16))
}

/// Parse a JSON-RPC hex quantity.
pub fn parse_quantity(s: &str) -> Result<BigUint> {
    let Some(digits) = s.strip_prefix("0x") else {
        return Err(Error::ParseFailed("Quantity is missing 0x prefix"))
    };

    if digits.is_empty() {
        return Err(Error::ParseFailed("Empty quantity"))
    }

    match BigUint::parse_bytes(digits.as_bytes(), 16) {
        Some(v) => Ok(v),
        None => Err(Error::ParseFailed("Invalid hex quantity")),
    }
}

pub fn parse_quantity_u64(s: &str) -> Result<u64> {
    match parse_quantity(s)?.to_u64() {
        Some(v) => Ok(v),
        None => Err(Error::ParseFailed("Quantity does not fit in u64")),
    }
}

/// Encode bytes as `0x`-prefixed hex data.
pub fn to_hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode `0x`-prefixed hex data. `0x` alone is empty data.
pub fn parse_hex_data(s: &str) -> Result<Vec<u8>> {
    let Some(digits) = s.strip_prefix("0x") else {
        return Err(Error::ParseFailed("Data is missing 0x prefix"))
    };
    Ok(hex::decode(digits)?)
}

/// Render a wei amount in ether.
pub fn format_ether(wei: &BigUint) -> String {
    encode_base10(wei, ETHER_DECIMALS)
}

/// Parse an ether amount into wei. Sub-wei precision is rejected.
pub fn parse_ether(ether: &str) -> Result<BigUint> {
    decode_base10(ether, ETHER_DECIMALS, true)
}
