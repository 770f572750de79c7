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

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info};
use num_bigint::BigUint;

use crate::{
    eth::{
        abi::{encode, Token},
        provider::TxRequest,
        units::parse_hex_data,
        Address, Signer,
    },
    rpc::util::{json_as_str, json_field, JsonValue},
    session::WalletSession,
    Error, Result,
};

pub const MARKETPLACE_CONTRACT: &str = "FakeNFTMarketplace";
pub const DAO_CONTRACT: &str = "ProfitUnityDAO";

/// Compiled contract as emitted by Hardhat
#[derive(Clone, Debug)]
pub struct Artifact {
    pub contract_name: String,
    /// Creation code, constructor arguments are appended to it
    pub bytecode: Vec<u8>,
}

impl Artifact {
    /// `<artifacts>/contracts/<Name>.sol/<Name>.json`
    pub fn path(artifacts_dir: &Path, name: &str) -> PathBuf {
        artifacts_dir.join("contracts").join(format!("{name}.sol")).join(format!("{name}.json"))
    }

    pub fn load(artifacts_dir: &Path, name: &str) -> Result<Self> {
        let path = Self::path(artifacts_dir, name);
        if !path.exists() {
            return Err(Error::ArtifactNotFound(path.display().to_string()))
        }

        let contents = fs::read_to_string(&path)?;
        let json: JsonValue = match contents.parse() {
            Ok(v) => v,
            Err(e) => return Err(Error::ArtifactInvalid(format!("{}: {}", path.display(), e))),
        };

        Self::from_json(&json, name)
    }

    pub fn from_json(json: &JsonValue, name: &str) -> Result<Self> {
        let contract_name = match json_field(json, "contractName") {
            Some(v) => json_as_str(v, "contractName")?.to_string(),
            None => name.to_string(),
        };

        let Some(bytecode) = json_field(json, "bytecode") else {
            return Err(Error::ArtifactInvalid(format!("{name}: missing bytecode")))
        };

        let bytecode = parse_hex_data(json_as_str(bytecode, "bytecode")?)?;
        if bytecode.is_empty() {
            return Err(Error::ArtifactInvalid(format!("{name}: empty bytecode, is it abstract?")))
        }

        Ok(Self { contract_name, bytecode })
    }
}

/// Deployment inputs
#[derive(Clone, Debug)]
pub struct DeployParams {
    pub artifacts_dir: PathBuf,
    /// ProfitUnity NFT collection the DAO gates membership on
    pub nft_address: Address,
    /// Ether sent along with the DAO deployment, in wei
    pub funding: BigUint,
}

/// Addresses of the freshly deployed contracts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub marketplace: Address,
    pub dao: Address,
}

/// Deploy a single contract and wait until it is mined.
pub async fn deploy_contract(
    signer: &Signer,
    artifact: &Artifact,
    ctor_args: &[Token],
    value: Option<BigUint>,
) -> Result<Address> {
    let mut data = artifact.bytecode.clone();
    data.extend(encode(ctor_args)?);

    debug!(target: "deploy", "Deploying {} ({} bytes)", artifact.contract_name, data.len());
    let pending = signer.send_transaction(TxRequest { to: None, data, value }).await?;
    let hash = pending.hash().to_string();
    let receipt = pending.wait().await?;

    match receipt.contract_address {
        Some(address) => Ok(address),
        None => Err(Error::TransactionFailed(format!(
            "{} deployment {} has no contract address",
            artifact.contract_name, hash
        ))),
    }
}

/// Deploy the marketplace, then the DAO pointing at it. A line per deployed
/// contract is written and flushed to `output` as soon as it lands.
pub async fn deploy(
    session: &mut WalletSession,
    params: &DeployParams,
    output: &mut impl Write,
) -> Result<Deployment> {
    let marketplace_artifact = Artifact::load(&params.artifacts_dir, MARKETPLACE_CONTRACT)?;
    let dao_artifact = Artifact::load(&params.artifacts_dir, DAO_CONTRACT)?;

    let account = session.connect().await?;
    let signer = session.signer().await?;
    info!(target: "deploy", "Deploying from {}", account);

    let marketplace = deploy_contract(&signer, &marketplace_artifact, &[], None).await?;
    writeln!(output, "{MARKETPLACE_CONTRACT} deployed to: {marketplace}")?;
    output.flush()?;

    let ctor_args = [Token::Address(marketplace), Token::Address(params.nft_address)];
    let dao =
        deploy_contract(&signer, &dao_artifact, &ctor_args, Some(params.funding.clone())).await?;
    writeln!(output, "{DAO_CONTRACT} deployed to: {dao}")?;
    output.flush()?;

    Ok(Deployment { marketplace, dao })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_path() {
        let path = Artifact::path(Path::new("artifacts"), DAO_CONTRACT);
        assert_eq!(path, PathBuf::from("artifacts/contracts/ProfitUnityDAO.sol/ProfitUnityDAO.json"));
    }

    #[test]
    fn artifact_from_json() {
        let json: JsonValue =
            r#"{"contractName":"FakeNFTMarketplace","bytecode":"0x6080604052"}"#.parse().unwrap();
        let artifact = Artifact::from_json(&json, MARKETPLACE_CONTRACT).unwrap();
        assert_eq!(artifact.contract_name, MARKETPLACE_CONTRACT);
        assert_eq!(artifact.bytecode, vec![0x60, 0x80, 0x60, 0x40, 0x52]);

        let json: JsonValue = r#"{"contractName":"Abstract","bytecode":"0x"}"#.parse().unwrap();
        assert!(matches!(Artifact::from_json(&json, "Abstract"), Err(Error::ArtifactInvalid(_))));

        let json: JsonValue = r#"{"abi":[]}"#.parse().unwrap();
        assert!(matches!(Artifact::from_json(&json, "X"), Err(Error::ArtifactInvalid(_))));
    }
}
