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

pub mod error;
pub use error::{Error, Result};

/// JSON-RPC primitives and transports
pub mod rpc;

/// Ethereum ABI encoding, addresses and provider/signer handles
pub mod eth;

/// Wallet endpoint session handling
pub mod session;

/// Typed DAO and NFT contract handles
pub mod contract;

/// DAO proposals and the client-side proposal store
pub mod dao;

/// Tab-based view state machine
pub mod ui;

/// Contract deployment routine
pub mod deploy;

/// Various utilities
pub mod util;

pub const ANSI_LOGO: &str = include_str!("../contrib/profitunity-logo-ansi.txt");
