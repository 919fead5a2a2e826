use crate::config::ArtifactsConfig;
use crate::error::{OrchestratorError, Result};
use ethers::abi::{self, Token};
use ethers::types::Bytes;
use std::collections::BTreeMap;
use std::fmt;

/// One deployable artifact of the revenue-share contract set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    SequencerFeeVault,
    BaseFeeVault,
    L1FeeVault,
    OperatorFeeVault,
    FundRouter,
    RevenueCalculator,
    WithdrawalAggregator,
}

impl ArtifactKind {
    /// Symbolic name used for salt derivation, config keys, and logging.
    pub fn symbol(&self) -> &'static str {
        match self {
            ArtifactKind::SequencerFeeVault => "sequencer-fee-vault",
            ArtifactKind::BaseFeeVault => "base-fee-vault",
            ArtifactKind::L1FeeVault => "l1-fee-vault",
            ArtifactKind::OperatorFeeVault => "operator-fee-vault",
            ArtifactKind::FundRouter => "fund-router",
            ArtifactKind::RevenueCalculator => "revenue-calculator",
            ArtifactKind::WithdrawalAggregator => "withdrawal-aggregator",
        }
    }

    /// Canonical vault emission order: sequencer, base, L1, operator.
    pub fn canonical_vaults() -> [ArtifactKind; 4] {
        [
            ArtifactKind::SequencerFeeVault,
            ArtifactKind::BaseFeeVault,
            ArtifactKind::L1FeeVault,
            ArtifactKind::OperatorFeeVault,
        ]
    }

    /// All artifact kinds the catalog must carry.
    pub fn all() -> [ArtifactKind; 7] {
        [
            ArtifactKind::SequencerFeeVault,
            ArtifactKind::BaseFeeVault,
            ArtifactKind::L1FeeVault,
            ArtifactKind::OperatorFeeVault,
            ArtifactKind::FundRouter,
            ArtifactKind::RevenueCalculator,
            ArtifactKind::WithdrawalAggregator,
        ]
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone)]
struct ArtifactEntry {
    creation_code: Bytes,
    deploy_gas: u64,
}

/// Fixed registry of deployable payloads and their gas budgets.
///
/// The catalog is the only source of gas numbers in the system; the planner
/// attaches whatever budget the catalog states and never computes gas.
#[derive(Debug, Clone)]
pub struct ArtifactCatalog {
    entries: BTreeMap<ArtifactKind, ArtifactEntry>,
    upgrade_gas: u64,
    setter_gas: u64,
}

impl ArtifactCatalog {
    /// Build the catalog from configuration blobs. Fails if any of the seven
    /// artifact kinds is missing, has malformed hex, or carries a zero budget.
    pub fn from_config(cfg: &ArtifactsConfig) -> Result<Self> {
        if cfg.upgrade_gas == 0 {
            return Err(OrchestratorError::GasBudgetZero { what: "upgrade" });
        }
        if cfg.setter_gas == 0 {
            return Err(OrchestratorError::GasBudgetZero { what: "setter" });
        }

        let mut entries = BTreeMap::new();
        for kind in ArtifactKind::all() {
            let blob = cfg.blobs.get(kind.symbol()).ok_or_else(|| {
                OrchestratorError::MissingArtifact {
                    symbol: kind.symbol().to_string(),
                }
            })?;
            if blob.deploy_gas == 0 {
                return Err(OrchestratorError::GasBudgetZero {
                    what: kind.symbol(),
                });
            }
            let raw = hex::decode(blob.creation_code.trim_start_matches("0x")).map_err(|e| {
                OrchestratorError::ArtifactEncoding {
                    symbol: kind.symbol().to_string(),
                    reason: e.to_string(),
                }
            })?;
            if raw.is_empty() {
                return Err(OrchestratorError::ArtifactEncoding {
                    symbol: kind.symbol().to_string(),
                    reason: "creation code is empty".to_string(),
                });
            }
            entries.insert(
                kind,
                ArtifactEntry {
                    creation_code: raw.into(),
                    deploy_gas: blob.deploy_gas,
                },
            );
        }
        Ok(Self {
            entries,
            upgrade_gas: cfg.upgrade_gas,
            setter_gas: cfg.setter_gas,
        })
    }

    /// Creation code with the ABI-encoded constructor arguments appended:
    /// the init code whose hash participates in address derivation.
    pub fn init_code(&self, kind: ArtifactKind, ctor_args: &[Token]) -> Bytes {
        let entry = &self.entries[&kind];
        let mut code = entry.creation_code.to_vec();
        if !ctor_args.is_empty() {
            code.extend_from_slice(&abi::encode(ctor_args));
        }
        code.into()
    }

    /// Fixed deployment gas budget for one artifact.
    pub fn deploy_gas(&self, kind: ArtifactKind) -> u64 {
        self.entries[&kind].deploy_gas
    }

    /// Fixed budget for a proxy upgrade-and-initialize instruction.
    pub fn upgrade_gas(&self) -> u64 {
        self.upgrade_gas
    }

    /// Fixed budget for a plain setter invocation.
    pub fn setter_gas(&self) -> u64 {
        self.setter_gas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArtifactBlobConfig;
    use ethers::types::{Address, U256};

    fn full_config() -> ArtifactsConfig {
        let mut blobs = BTreeMap::new();
        for (i, kind) in ArtifactKind::all().into_iter().enumerate() {
            blobs.insert(
                kind.symbol().to_string(),
                ArtifactBlobConfig {
                    creation_code: format!("0x60{:02x}6000f3", i + 1),
                    deploy_gas: 2_000_000,
                },
            );
        }
        ArtifactsConfig {
            blobs,
            upgrade_gas: 1_000_000,
            setter_gas: 200_000,
        }
    }

    #[test]
    fn builds_from_complete_config() {
        let catalog = ArtifactCatalog::from_config(&full_config()).unwrap();
        assert_eq!(catalog.deploy_gas(ArtifactKind::FundRouter), 2_000_000);
        assert_eq!(catalog.upgrade_gas(), 1_000_000);
        assert_eq!(catalog.setter_gas(), 200_000);
    }

    #[test]
    fn missing_artifact_is_rejected() {
        let mut cfg = full_config();
        cfg.blobs.remove("revenue-calculator");
        let err = ArtifactCatalog::from_config(&cfg).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::MissingArtifact { ref symbol } if symbol == "revenue-calculator"
        ));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        let mut cfg = full_config();
        cfg.blobs.get_mut("fund-router").unwrap().creation_code = "0xzz".to_string();
        let err = ArtifactCatalog::from_config(&cfg).unwrap_err();
        assert!(matches!(err, OrchestratorError::ArtifactEncoding { .. }));
    }

    #[test]
    fn zero_deploy_gas_is_rejected() {
        let mut cfg = full_config();
        cfg.blobs.get_mut("base-fee-vault").unwrap().deploy_gas = 0;
        let err = ArtifactCatalog::from_config(&cfg).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::GasBudgetZero { what } if what == "base-fee-vault"
        ));
    }

    #[test]
    fn init_code_appends_encoded_constructor_args() {
        let catalog = ArtifactCatalog::from_config(&full_config()).unwrap();
        let bare = catalog.init_code(ArtifactKind::WithdrawalAggregator, &[]);
        let with_args = catalog.init_code(
            ArtifactKind::WithdrawalAggregator,
            &[
                Token::Uint(U256::from(7)),
                Token::Address(Address::repeat_byte(0x11)),
            ],
        );
        assert_eq!(with_args.len(), bare.len() + 64);
        assert_eq!(&with_args[..bare.len()], &bare[..]);
    }
}
