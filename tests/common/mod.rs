//! Shared fixtures for the integration suite.

use revshare::{ArtifactCatalog, ArtifactKind, ArtifactsConfig, OrchestratorConfig};
use revshare::config::{ArtifactBlobConfig, PredeployConfig};
use std::collections::BTreeMap;

/// Route plan/dispatch logs through the test harness when RUST_LOG is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn addr(s: &str) -> ethers::types::Address {
    s.parse().unwrap()
}

pub fn predeploys() -> PredeployConfig {
    PredeployConfig {
        create2_deployer: addr("0x13b0D85CcB8bf860b6b79AF3029fCA081AE9beF2"),
        proxy_admin: addr("0x4200000000000000000000000000000000000018"),
        sequencer_fee_vault: addr("0x4200000000000000000000000000000000000011"),
        base_fee_vault: addr("0x4200000000000000000000000000000000000019"),
        l1_fee_vault: addr("0x420000000000000000000000000000000000001A"),
        operator_fee_vault: addr("0x420000000000000000000000000000000000001B"),
        fund_router: addr("0x4200000000000000000000000000000000000020"),
    }
}

pub fn artifacts() -> ArtifactsConfig {
    let mut blobs = BTreeMap::new();
    for (i, kind) in ArtifactKind::all().into_iter().enumerate() {
        blobs.insert(
            kind.symbol().to_string(),
            ArtifactBlobConfig {
                creation_code: format!("0x60{:02x}60005260206000f3", i + 1),
                deploy_gas: 2_500_000,
            },
        );
    }
    ArtifactsConfig {
        blobs,
        upgrade_gas: 1_000_000,
        setter_gas: 200_000,
    }
}

pub fn config() -> OrchestratorConfig {
    OrchestratorConfig {
        predeploys: predeploys(),
        artifacts: artifacts(),
    }
}

pub fn catalog() -> ArtifactCatalog {
    ArtifactCatalog::from_config(&artifacts()).unwrap()
}
