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

//! Encoding of the static Solidity types the DAO and NFT contracts use.
//! Every value occupies one 32-byte big-endian word.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use tiny_keccak::{Hasher, Keccak};

use super::Address;
use crate::{Error, Result};

/// Size of an ABI word in bytes
pub const WORD_SIZE: usize = 32;

/// Compute the keccak-256 hash of the given data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Function selector: the first four bytes of the keccak-256 hash of the
/// canonical signature, e.g. `balanceOf(address)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// An ABI-encodable value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Any of `uint8` through `uint256`
    Uint(BigUint),
    Address(Address),
    Bool(bool),
}

impl From<u64> for Token {
    fn from(v: u64) -> Self {
        Self::Uint(BigUint::from(v))
    }
}

impl From<Address> for Token {
    fn from(v: Address) -> Self {
        Self::Address(v)
    }
}

fn encode_word(token: &Token, out: &mut Vec<u8>) -> Result<()> {
    let mut word = [0u8; WORD_SIZE];
    match token {
        Token::Uint(v) => {
            let bytes = v.to_bytes_be();
            if bytes.len() > WORD_SIZE {
                return Err(Error::ParseFailed("Integer does not fit in uint256"))
            }
            // BigUint zero encodes as a single zero byte, which is fine here
            word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
        }
        Token::Address(a) => word[12..].copy_from_slice(a.as_bytes()),
        Token::Bool(b) => word[WORD_SIZE - 1] = *b as u8,
    }
    out.extend_from_slice(&word);
    Ok(())
}

/// Encode a list of static tokens, one word each.
pub fn encode(tokens: &[Token]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(tokens.len() * WORD_SIZE);
    for token in tokens {
        encode_word(token, &mut out)?;
    }
    Ok(out)
}

/// Encode calldata for a function call: selector followed by the arguments.
pub fn encode_call(selector: [u8; 4], args: &[Token]) -> Result<Vec<u8>> {
    let mut out = selector.to_vec();
    out.extend(encode(args)?);
    Ok(out)
}

/// Sequential reader over ABI-encoded return data
pub struct AbiReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> AbiReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next_word(&mut self) -> Result<&'a [u8]> {
        let end = self.pos + WORD_SIZE;
        if end > self.data.len() {
            return Err(Error::AbiDecodeError("Return data too short"))
        }
        let word = &self.data[self.pos..end];
        self.pos = end;
        Ok(word)
    }

    pub fn read_uint(&mut self) -> Result<BigUint> {
        Ok(BigUint::from_bytes_be(self.next_word()?))
    }

    /// Read a uint word that must fit in 64 bits.
    pub fn read_u64(&mut self) -> Result<u64> {
        match self.read_uint()?.to_u64() {
            Some(v) => Ok(v),
            None => Err(Error::AbiDecodeError("Integer does not fit in u64")),
        }
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        let v = self.read_uint()?;
        if v.is_zero() {
            return Ok(false)
        }
        if v == BigUint::from(1u8) {
            return Ok(true)
        }
        Err(Error::AbiDecodeError("Invalid bool word"))
    }

    pub fn read_address(&mut self) -> Result<Address> {
        let word = self.next_word()?;
        if word[..12].iter().any(|b| *b != 0) {
            return Err(Error::AbiDecodeError("Dirty address padding"))
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Ok(Address(bytes))
    }
}
