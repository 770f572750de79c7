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

use lazy_static::lazy_static;

use crate::{
    eth::{
        abi::{encode_call, selector, AbiReader, Token},
        Address, AsProvider,
    },
    Error, Result,
};

lazy_static! {
    static ref BALANCE_OF: [u8; 4] = selector("balanceOf(address)");
}

/// ERC-721 collection handle. Only the balance query is needed.
pub struct NftContract<H> {
    address: Address,
    handle: H,
}

impl<H: AsProvider> NftContract<H> {
    pub fn new(address: Address, handle: H) -> Self {
        Self { address, handle }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Number of tokens `owner` holds.
    pub async fn balance_of(&self, owner: &Address) -> Result<u64> {
        let data = encode_call(*BALANCE_OF, &[Token::Address(*owner)])?;
        let rep = self.handle.as_provider().call(&self.address, &data).await?;

        match AbiReader::new(&rep).read_u64() {
            Ok(v) => Ok(v),
            Err(Error::AbiDecodeError(msg)) => Err(Error::ContractCallFailed(format!("balanceOf: {msg}"))),
            Err(e) => Err(e),
        }
    }
}
