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
use structopt_toml::{serde::Deserialize, structopt::StructOpt, StructOptToml};
use url::Url;

use profitunity::{
    async_daemonize, cli_desc,
    deploy::{deploy, DeployParams},
    eth::{provider::ConfirmSettings, units::parse_ether, Address},
    rpc::client::HttpRpcClient,
    session::{Network, WalletSession},
    util::path::expand_path,
    Error, Result,
};

const CONFIG_FILE: &str = "unity_deploy_config.toml";
const CONFIG_FILE_CONTENTS: &str = include_str!("../unity_deploy_config.toml");

#[derive(Clone, Debug, Deserialize, StructOpt, StructOptToml)]
#[serde(default)]
#[structopt(name = "unity-deploy", about = cli_desc!())]
struct Args {
    #[structopt(short, long)]
    /// Configuration file to use
    config: Option<String>,

    #[structopt(short, long, default_value = "http://127.0.0.1:8545")]
    /// Wallet JSON-RPC endpoint
    endpoint: Url,

    #[structopt(long, default_value = "4")]
    /// Chain id to deploy on
    chain_id: u64,

    #[structopt(long, default_value = "rinkeby")]
    /// Name of the chain to deploy on
    network: String,

    #[structopt(short, long, default_value = "artifacts")]
    /// Hardhat artifacts directory
    artifacts: String,

    #[structopt(long, default_value = "0x0000000000000000000000000000000000000000")]
    /// ProfitUnity NFT collection address
    nft_address: String,

    #[structopt(long, default_value = "0.01")]
    /// Ether sent to the DAO treasury on deployment
    funding: String,

    #[structopt(long, default_value = "2")]
    /// Seconds between transaction receipt polls
    poll_interval: u64,

    #[structopt(long, default_value = "300")]
    /// Seconds to wait for a deployment to be mined
    tx_timeout: u64,

    #[structopt(short, long)]
    /// Set log file to ouput into
    log: Option<String>,

    #[structopt(short, parse(from_occurrences))]
    /// Increase verbosity (-vvv supported)
    verbose: u8,
}

async_daemonize!(realmain);
async fn realmain(args: Args) -> Result<()> {
    let nft_address = Address::from_str(&args.nft_address)?;
    if nft_address.is_zero() {
        return Err(Error::ConfigMissing("nft_address"))
    }

    let params = DeployParams {
        artifacts_dir: expand_path(&args.artifacts)?,
        nft_address,
        funding: parse_ether(&args.funding)?,
    };

    let rpc = HttpRpcClient::new(args.endpoint.clone())?.into_ptr();
    let confirm = ConfirmSettings {
        poll_interval: Duration::from_secs(args.poll_interval),
        timeout: Duration::from_secs(args.tx_timeout),
    };
    let mut session = WalletSession::new(rpc, Network::new(args.chain_id, &args.network), confirm);

    info!(target: "unity-deploy", "Deploying to {} via {}", session.network(), args.endpoint);

    deploy(&mut session, &params, &mut std::io::stdout()).await?;
    Ok(())
}
