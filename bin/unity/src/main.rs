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

use std::{str::FromStr, time::Duration};

use log::info;
use num_bigint::BigUint;
use structopt_toml::{serde::Deserialize, structopt::StructOpt, StructOptToml};
use url::Url;

use profitunity::{
    async_daemonize, cli_desc,
    contract::ContractGateway,
    dao::Vote,
    eth::{provider::ConfirmSettings, Address},
    rpc::client::HttpRpcClient,
    session::{Network, WalletSession},
    ui::{render::render, Tab, ViewController},
    util::time::Timestamp,
    Error, Result,
};

/// Interactive shell
mod interactive;

const CONFIG_FILE: &str = "unity_config.toml";
const CONFIG_FILE_CONTENTS: &str = include_str!("../unity_config.toml");

#[derive(Clone, Debug, Deserialize, StructOpt, StructOptToml)]
#[serde(default)]
#[structopt(name = "unity", about = cli_desc!())]
struct Args {
    #[structopt(short, long)]
    /// Configuration file to use
    config: Option<String>,

    #[structopt(short, long, default_value = "http://127.0.0.1:8545")]
    /// Wallet JSON-RPC endpoint
    endpoint: Url,

    #[structopt(long, default_value = "4")]
    /// Chain id the DAO is deployed on
    chain_id: u64,

    #[structopt(long, default_value = "rinkeby")]
    /// Name of the chain, shown when the wallet is on another one
    network: String,

    #[structopt(long, default_value = "0x0000000000000000000000000000000000000000")]
    /// ProfitUnityDAO contract address
    dao_address: String,

    #[structopt(long, default_value = "0x0000000000000000000000000000000000000000")]
    /// ProfitUnity NFT collection address
    nft_address: String,

    #[structopt(long, default_value = "2")]
    /// Seconds between transaction receipt polls
    poll_interval: u64,

    #[structopt(long, default_value = "300")]
    /// Seconds to wait for a transaction to be mined
    tx_timeout: u64,

    #[structopt(long, default_value = "~/.local/profitunity/unity_history.txt")]
    /// Path to the interactive shell history file
    history_path: String,

    #[structopt(subcommand)]
    /// Sub command to execute
    command: Subcmd,

    #[structopt(short, long)]
    /// Set log file to ouput into
    log: Option<String>,

    #[structopt(short, parse(from_occurrences))]
    /// Increase verbosity (-vvv supported)
    verbose: u8,
}

#[derive(Clone, Debug, Deserialize, StructOpt)]
enum Subcmd {
    /// Show NFT balance, treasury balance and number of proposals
    Info,

    /// List all proposals and the action each one offers
    Proposals,

    /// Create a proposal to buy a marketplace NFT with treasury funds
    Propose {
        /// Fake NFT token ID to purchase
        token_id: String,
    },

    /// Vote on an open proposal
    Vote {
        /// Proposal ID
        id: u64,

        /// YAY or NAY
        vote: String,
    },

    /// Execute a proposal whose deadline has passed
    Execute {
        /// Proposal ID
        id: u64,
    },

    /// Enter the interactive shell
    Interactive,
}

/// Parse a configured contract address, refusing the zero placeholder.
fn contract_address(value: &str, option: &'static str) -> Result<Address> {
    let address = Address::from_str(value)?;
    if address.is_zero() {
        return Err(Error::ConfigMissing(option))
    }
    Ok(address)
}

fn build_controller(args: &Args) -> Result<ViewController> {
    let gateway = ContractGateway::new(
        contract_address(&args.dao_address, "dao_address")?,
        contract_address(&args.nft_address, "nft_address")?,
    );

    let rpc = HttpRpcClient::new(args.endpoint.clone())?.into_ptr();
    let network = Network::new(args.chain_id, &args.network);
    let confirm = ConfirmSettings {
        poll_interval: Duration::from_secs(args.poll_interval),
        timeout: Duration::from_secs(args.tx_timeout),
    };

    Ok(ViewController::new(WalletSession::new(rpc, network, confirm), gateway))
}

async_daemonize!(realmain);
async fn realmain(args: Args) -> Result<()> {
    let mut ctl = build_controller(&args)?;

    if let Subcmd::Interactive = args.command {
        interactive::interactive(&mut ctl, &args.history_path).await;
        return Ok(())
    }

    ctl.mount().await?;
    if let Some(alert) = &ctl.state().alert {
        return Err(Error::Custom(alert.clone()))
    }

    match args.command {
        Subcmd::Info | Subcmd::Interactive => {}

        Subcmd::Proposals => ctl.select_tab(Tab::View).await?,

        Subcmd::Propose { token_id } => {
            let token_id = BigUint::from_str(&token_id)?;
            ctl.select_tab(Tab::Create).await?;
            let receipt = ctl.create_proposal(token_id).await?;
            info!(target: "unity", "Proposal created in {}", receipt.transaction_hash);
        }

        Subcmd::Vote { id, vote } => {
            let vote = Vote::from_str(&vote)?;
            ctl.select_tab(Tab::View).await?;
            let receipt = ctl.vote(id, vote).await?;
            info!(target: "unity", "Voted {} on proposal {} in {}", vote, id, receipt.transaction_hash);
        }

        Subcmd::Execute { id } => {
            ctl.select_tab(Tab::View).await?;
            let receipt = ctl.execute(id).await?;
            info!(target: "unity", "Executed proposal {} in {}", id, receipt.transaction_hash);
        }
    }

    println!("{}", render(ctl.state(), Timestamp::current_time()));
    Ok(())
}
