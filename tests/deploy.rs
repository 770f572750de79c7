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

use std::{fs, io::Write, path::PathBuf, sync::Arc};

use num_bigint::BigUint;

use profitunity::{
    deploy::{deploy, Artifact, DeployParams, DAO_CONTRACT, MARKETPLACE_CONTRACT},
    eth::units::parse_ether,
    Error,
};

mod common;
use common::{account, ether, nft_address, session, FakeChain};

/// Write minimal Hardhat artifacts for both contracts into a fresh directory.
fn artifacts(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("profitunity-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    for (name, code) in [(MARKETPLACE_CONTRACT, "0x6080604052"), (DAO_CONTRACT, "0x6080604053")] {
        let path = Artifact::path(&dir, name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let json = format!(r#"{{"_format":"hh-sol-artifact-1","contractName":"{name}","abi":[],"bytecode":"{code}"}}"#);
        fs::write(path, json).unwrap();
    }

    dir
}

fn params(dir: PathBuf) -> DeployParams {
    DeployParams { artifacts_dir: dir, nft_address: nft_address(), funding: parse_ether("0.01").unwrap() }
}

/// Collects deploy output and notes how many transactions had been sent
/// every time it was flushed.
struct Output {
    chain: Arc<FakeChain>,
    buf: Vec<u8>,
    sends_at_flush: Vec<usize>,
}

impl Output {
    fn new(chain: &Arc<FakeChain>) -> Self {
        Self { chain: chain.clone(), buf: vec![], sends_at_flush: vec![] }
    }

    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.buf.clone()).unwrap().lines().map(String::from).collect()
    }
}

impl Write for Output {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sends_at_flush.push(self.chain.calls("eth_sendTransaction"));
        Ok(())
    }
}

#[test]
fn funded_deployment() {
    smol::block_on(async {
        let chain = FakeChain::new();
        let mut session = session(&chain);
        let dir = artifacts("funded");

        let mut output = Output::new(&chain);
        let deployment = deploy(&mut session, &params(dir.clone()), &mut output).await.unwrap();

        assert!(!deployment.marketplace.is_zero());
        assert!(!deployment.dao.is_zero());
        assert_ne!(deployment.marketplace, deployment.dao);
        let lines = output.lines();
        assert_eq!(
            lines,
            vec![
                format!("FakeNFTMarketplace deployed to: {}", deployment.marketplace),
                format!("ProfitUnityDAO deployed to: {}", deployment.dao),
            ]
        );

        // The marketplace line went out before the DAO deployment was sent
        assert_eq!(output.sends_at_flush, vec![1, 2]);

        for line in &lines {
            let addr = line.rsplit(' ').next().unwrap();
            assert!(addr.starts_with("0x") && addr.len() == 42);
            assert!(addr[2..].chars().all(|c| c.is_ascii_hexdigit()));
        }

        // The DAO got its funding
        let funded = chain.with(|s| s.balances.get(&deployment.dao).cloned()).unwrap();
        assert_eq!(funded, BigUint::from(10_000_000_000_000_000u64));

        let _ = fs::remove_dir_all(dir);
    });
}

#[test]
fn underfunded_dao_deployment_fails() {
    smol::block_on(async {
        let chain = FakeChain::new();
        chain.with(|s| s.balances.insert(account(), BigUint::from(1_000u32)));
        let mut session = session(&chain);
        let dir = artifacts("underfunded");

        let mut output = Output::new(&chain);
        let res = deploy(&mut session, &params(dir.clone()), &mut output).await;

        assert!(matches!(res, Err(Error::TransactionFailed(_))));
        // The marketplace still landed before the DAO failed
        let lines = output.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("FakeNFTMarketplace deployed to: 0x"));
        assert_eq!(output.sends_at_flush, vec![1]);

        let _ = fs::remove_dir_all(dir);
    });
}

#[test]
fn missing_artifacts() {
    smol::block_on(async {
        let chain = FakeChain::new();
        let mut session = session(&chain);
        let dir = std::env::temp_dir().join("profitunity-no-such-artifacts");

        let mut output = Output::new(&chain);
        let res = deploy(&mut session, &params(dir), &mut output).await;
        assert!(matches!(res, Err(Error::ArtifactNotFound(_))));
        assert!(output.lines().is_empty());
        assert_eq!(chain.calls("eth_sendTransaction"), 0);
    });
}

#[test]
fn wrong_network_blocks_deployment() {
    smol::block_on(async {
        let chain = FakeChain::new();
        chain.with(|s| s.chain_id = 1);
        let mut session = session(&chain);
        let dir = artifacts("wrongnet");

        let mut output = Output::new(&chain);
        let res = deploy(&mut session, &params(dir.clone()), &mut output).await;
        assert!(matches!(res, Err(Error::WrongNetwork { expected: 4, found: 1 })));
        assert_eq!(chain.calls("eth_sendTransaction"), 0);
        assert_eq!(chain.with(|s| s.balances.get(&account()).cloned()), Some(ether(10)));

        let _ = fs::remove_dir_all(dir);
    });
}
