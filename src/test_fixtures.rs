//! Shared fixtures for the unit test modules.

use crate::catalog::{ArtifactCatalog, ArtifactKind};
use crate::config::{ArtifactBlobConfig, ArtifactsConfig, OrchestratorConfig};
use crate::planner::CallerContext;
use config::{Config, File, FileFormat};
use ethers::types::Address;
use std::collections::BTreeMap;

pub fn fixture_config() -> OrchestratorConfig {
    let toml = r#"
        [predeploys]
        [artifacts]
        blobs = {}
    "#;
    let mut cfg: OrchestratorConfig = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();
    cfg.artifacts = fixture_artifacts();
    cfg
}

pub fn fixture_artifacts() -> ArtifactsConfig {
    let mut blobs = BTreeMap::new();
    for (i, kind) in ArtifactKind::all().into_iter().enumerate() {
        blobs.insert(
            kind.symbol().to_string(),
            ArtifactBlobConfig {
                // distinct placeholder runtime per artifact so derived
                // addresses differ
                creation_code: format!("0x60{:02x}60005260206000f3", i + 1),
                deploy_gas: 2_500_000 + i as u64 * 10_000,
            },
        );
    }
    ArtifactsConfig {
        blobs,
        upgrade_gas: 1_000_000,
        setter_gas: 200_000,
    }
}

pub fn fixture_catalog() -> ArtifactCatalog {
    ArtifactCatalog::from_config(&fixture_artifacts()).unwrap()
}

pub fn caller() -> CallerContext {
    CallerContext::new(Address::repeat_byte(0xca))
}
