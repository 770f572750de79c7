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

/// 20-byte account and contract addresses
pub mod address;
pub use address::Address;

/// Contract ABI encoding and decoding
pub mod abi;

/// Hex quantities and ether units
pub mod units;

/// Read-only providers, signers and pending transactions
pub mod provider;
pub use provider::{AsProvider, PendingTransaction, Provider, ProviderOrSigner, Receipt, Signer};
