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

use prettytable::{format, row, Table};

use super::{ConnectionState, Tab, UiState};
use crate::{eth::units::format_ether, util::time::Timestamp};

pub const LOADING: &str = "Loading... Waiting for transaction...";
pub const NO_NFTS: &str =
    "You dont own any Profit Unity NFTs.\nYou cant create or vote on proposals";
pub const NO_PROPOSALS: &str = "No proposals have been created yet";

/// Dashboard figures, an alert if any, and the connection status.
pub fn render_header(state: &UiState) -> String {
    let mut out = String::from("Welcome to Profit Unity!\n");

    if let Some(alert) = &state.alert {
        out.push_str(&format!("!! {alert}\n"));
    }

    match state.connection {
        ConnectionState::Disconnected => {
            out.push_str("Wallet not connected\n");
            return out
        }
        ConnectionState::Connecting => {
            out.push_str("Connecting wallet...\n");
            return out
        }
        ConnectionState::Connected { .. } => {}
    }

    out.push_str(&format!("Your ProfitUnity NFT Balance: {}\n", state.nft_balance));
    out.push_str(&format!("Treasury Balance: {} ETH\n", format_ether(&state.treasury_balance)));
    out.push_str(&format!("Total Number of Proposals: {}\n", state.num_proposals));
    out
}

/// Body of the Create Proposal tab.
pub fn render_create_tab(state: &UiState) -> String {
    if state.loading {
        return LOADING.to_string()
    }

    if state.nft_balance == 0 {
        return NO_NFTS.to_string()
    }

    "Fake NFT Token ID To Purchase: run `propose <token-id>` to create a proposal".to_string()
}

/// Body of the View Proposals tab, with the action each proposal offers at `now`.
pub fn render_view_tab(state: &UiState, now: Timestamp) -> String {
    if state.loading {
        return LOADING.to_string()
    }

    if state.proposals.is_empty() {
        return NO_PROPOSALS.to_string()
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row![
        "Proposal ID",
        "Fake NFT To Purchase",
        "Deadline",
        "Yay Votes",
        "Nay Votes",
        "Executed?",
        "Action"
    ]);

    for p in state.proposals.all() {
        table.add_row(row![
            p.id,
            p.nft_token_id,
            p.deadline,
            p.yay_votes,
            p.nay_votes,
            p.executed,
            p.action(now).label()
        ]);
    }

    table.to_string()
}

/// Header followed by the selected tab, if any.
pub fn render(state: &UiState, now: Timestamp) -> String {
    let mut out = render_header(state);

    match state.selected_tab() {
        Some(Tab::Create) => {
            out.push_str(&format!("\n[{}]\n", Tab::Create));
            out.push_str(&render_create_tab(state));
        }
        Some(Tab::View) => {
            out.push_str(&format!("\n[{}]\n", Tab::View));
            out.push_str(&render_view_tab(state, now));
        }
        None if state.is_connected() => {
            out.push_str(&format!("\nSelect a tab: {} | {}", Tab::Create, Tab::View));
        }
        None => {}
    }

    out
}
