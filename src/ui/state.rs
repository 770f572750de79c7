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

use num_bigint::BigUint;

use crate::{dao::ProposalStore, Error, Result};

/// The two views of the DAO dashboard
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tab {
    Create,
    View,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Create Proposal",
            Self::View => "View Proposals",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" | "create proposal" => Ok(Self::Create),
            "view" | "view proposals" => Ok(Self::View),
            _ => Err(Error::ParseFailed("Unknown tab, expected create or view")),
        }
    }
}

/// Wallet connection as seen by the UI
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected { tab: Option<Tab> },
}

/// Everything the UI shows. Mirrors the latest successful chain reads.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub connection: ConnectionState,
    /// A transaction is in flight
    pub loading: bool,
    pub nft_balance: u64,
    /// DAO treasury in wei
    pub treasury_balance: BigUint,
    pub num_proposals: u64,
    pub proposals: ProposalStore,
    /// User-facing notice, e.g. a wrong network warning
    pub alert: Option<String>,
}

impl UiState {
    pub fn is_connected(&self) -> bool {
        matches!(self.connection, ConnectionState::Connected { .. })
    }

    pub fn selected_tab(&self) -> Option<Tab> {
        match self.connection {
            ConnectionState::Connected { tab } => tab,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs() {
        assert_eq!(Tab::from_str("View").unwrap(), Tab::View);
        assert_eq!(Tab::from_str("create proposal").unwrap(), Tab::Create);
        assert!(Tab::from_str("delete").is_err());
        assert_eq!(Tab::View.to_string(), "View Proposals");
    }

    #[test]
    fn tab_requires_connection() {
        let mut state = UiState::default();
        assert!(!state.is_connected());
        assert_eq!(state.selected_tab(), None);

        state.connection = ConnectionState::Connected { tab: Some(Tab::Create) };
        assert_eq!(state.selected_tab(), Some(Tab::Create));
    }
}
