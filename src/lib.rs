pub mod catalog;
pub mod config;
pub mod create2;
pub mod encoder;
pub mod error;
pub mod fanout;
pub mod planner;
pub mod relay;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use catalog::{ArtifactCatalog, ArtifactKind};
pub use config::{ArtifactsConfig, OrchestratorConfig, PredeployConfig};
pub use create2::{artifact_salt, create2_address, DEFAULT_SALT_NAMESPACE};
pub use encoder::{RemoteCallInstruction, WithdrawalNetwork};
pub use error::{OrchestratorError, Result};
pub use fanout::FleetUpgrade;
pub use planner::{
    AggregatorConfig, CallerContext, TransitionMode, UpgradePlanner, VaultUpgradeSpec, VAULT_COUNT,
};
pub use relay::{OutboundRelay, RecordingRelay};
