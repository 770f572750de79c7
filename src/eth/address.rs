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

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// An Ethereum account or contract address
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses a `0x`-prefixed, 40 hex digit address. Checksum casing is
    /// accepted but not verified.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) else {
            return Err(Error::InvalidAddress(s.to_string()))
        };

        if digits.len() != 40 {
            return Err(Error::InvalidAddress(s.to_string()))
        }

        let mut bytes = [0u8; 20];
        if hex::decode_to_slice(digits, &mut bytes).is_err() {
            return Err(Error::InvalidAddress(s.to_string()))
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let addr = Address::from_str("0xE5B0C7B8A2B0CcF2Cd0bFFB57E39AaC0bb8B8c58").unwrap();
        assert_eq!(addr.to_string(), "0xe5b0c7b8a2b0ccf2cd0bffb57e39aac0bb8b8c58");

        assert!(Address::from_str("e5b0c7b8a2b0ccf2cd0bffb57e39aac0bb8b8c58").is_err());
        assert!(Address::from_str("0xe5b0c7b8").is_err());
        assert!(Address::from_str("0xz5b0c7b8a2b0ccf2cd0bffb57e39aac0bb8b8c58").is_err());
    }
}
