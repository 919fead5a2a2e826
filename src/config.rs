use crate::error::Result;
use config::{Config, Environment, File};
use ethers::types::Address;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration structure for one target environment.
///
/// Everything that was effectively global state in the deployed contract set
/// (predeploy proxy slots, the CREATE2 deployer, fixed gas budgets, artifact
/// blobs) is injected here so the same planner logic runs against any network
/// without recompilation.
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorConfig {
    pub predeploys: PredeployConfig,
    pub artifacts: ArtifactsConfig,
}

/// Well-known addresses that already exist on every remote domain.
#[derive(Debug, Clone, Deserialize)]
pub struct PredeployConfig {
    /// Deterministic-deployment facility (CREATE2 deployer) on each remote domain
    #[serde(default = "default_create2_deployer")]
    pub create2_deployer: Address,
    /// Upgrade authority: the proxy admin that owns every upgradeable predeploy
    #[serde(default = "default_proxy_admin")]
    pub proxy_admin: Address,
    /// Sequencer fee vault proxy slot
    #[serde(default = "default_sequencer_fee_vault")]
    pub sequencer_fee_vault: Address,
    /// Base fee vault proxy slot
    #[serde(default = "default_base_fee_vault")]
    pub base_fee_vault: Address,
    /// L1 fee vault proxy slot
    #[serde(default = "default_l1_fee_vault")]
    pub l1_fee_vault: Address,
    /// Operator fee vault proxy slot
    #[serde(default = "default_operator_fee_vault")]
    pub operator_fee_vault: Address,
    /// Fund router proxy slot (receives vault withdrawals, splits via calculator)
    #[serde(default = "default_fund_router")]
    pub fund_router: Address,
}

impl PredeployConfig {
    /// The four recognized vault proxy slots, in canonical emission order.
    pub fn vault_slots(&self) -> [Address; 4] {
        [
            self.sequencer_fee_vault,
            self.base_fee_vault,
            self.l1_fee_vault,
            self.operator_fee_vault,
        ]
    }
}

/// Artifact registry source: hex creation code and a fixed deploy gas budget
/// per artifact symbol, plus the shared budgets for proxy upgrades and
/// setter calls. Gas is never computed dynamically.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// keyed by artifact symbol (see `ArtifactKind::symbol`)
    pub blobs: BTreeMap<String, ArtifactBlobConfig>,
    #[serde(default = "default_upgrade_gas")]
    pub upgrade_gas: u64,
    #[serde(default = "default_setter_gas")]
    pub setter_gas: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactBlobConfig {
    /// 0x-prefixed hex of the artifact's creation code (constructor args are
    /// appended at plan time)
    pub creation_code: String,
    pub deploy_gas: u64,
}

impl OrchestratorConfig {
    /// Load configuration from a TOML file with environment variable overrides
    /// (prefix `REVSHARE`, e.g. `REVSHARE__PREDEPLOYS__FUND_ROUTER`).
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("REVSHARE").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

fn parse_addr(s: &str) -> Address {
    s.parse().expect("static address literal")
}

fn default_create2_deployer() -> Address {
    // Canonical OP Stack Create2Deployer preinstall
    parse_addr("0x13b0D85CcB8bf860b6b79AF3029fCA081AE9beF2")
}

fn default_proxy_admin() -> Address {
    parse_addr("0x4200000000000000000000000000000000000018")
}

fn default_sequencer_fee_vault() -> Address {
    parse_addr("0x4200000000000000000000000000000000000011")
}

fn default_base_fee_vault() -> Address {
    parse_addr("0x4200000000000000000000000000000000000019")
}

fn default_l1_fee_vault() -> Address {
    parse_addr("0x420000000000000000000000000000000000001A")
}

fn default_operator_fee_vault() -> Address {
    parse_addr("0x420000000000000000000000000000000000001B")
}

fn default_fund_router() -> Address {
    parse_addr("0x4200000000000000000000000000000000000020")
}

fn default_upgrade_gas() -> u64 {
    1_000_000
}

fn default_setter_gas() -> u64 {
    200_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_slots_are_distinct() {
        let toml = r#"
            [predeploys]
            [artifacts]
            blobs = {}
        "#;
        let cfg: OrchestratorConfig = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let slots = cfg.predeploys.vault_slots();
        for i in 0..slots.len() {
            for j in (i + 1)..slots.len() {
                assert_ne!(slots[i], slots[j]);
            }
        }
        assert_eq!(cfg.artifacts.upgrade_gas, 1_000_000);
        assert_eq!(cfg.artifacts.setter_gas, 200_000);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let toml = r#"
            [predeploys]
            fund_router = "0x00000000000000000000000000000000000000aa"

            [artifacts]
            upgrade_gas = 555

            [artifacts.blobs.fund-router]
            creation_code = "0x60016000f3"
            deploy_gas = 100000
        "#;
        let cfg: OrchestratorConfig = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(
            cfg.predeploys.fund_router,
            "0x00000000000000000000000000000000000000aa".parse().unwrap()
        );
        assert_eq!(cfg.artifacts.upgrade_gas, 555);
        assert_eq!(
            cfg.artifacts.blobs["fund-router"].creation_code,
            "0x60016000f3"
        );
    }
}
