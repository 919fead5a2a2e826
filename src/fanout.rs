//! Multi-domain fan-out.
//!
//! One orchestrator invocation migrates an arbitrary fleet: parallel arrays
//! carry one entry per target domain, every domain is planned before the
//! first instruction is dispatched, and dispatch then proceeds in domain
//! order. A planning failure anywhere aborts the call with zero side
//! effects; a relay refusal aborts the remainder of the call. Once accepted
//! by the relay, each domain's instructions execute remotely on their own
//! schedule, independent of every other domain.

use crate::catalog::ArtifactCatalog;
use crate::config::OrchestratorConfig;
use crate::encoder::RemoteCallInstruction;
use crate::error::{OrchestratorError, Result};
use crate::planner::{
    AggregatorConfig, CallerContext, TransitionMode, UpgradePlanner, VaultUpgradeSpec,
};
use crate::relay::OutboundRelay;
use ethers::types::Address;
use tracing::{debug, info};

/// Fleet-wide upgrade driver.
pub struct FleetUpgrade<'a> {
    planner: UpgradePlanner<'a>,
}

impl<'a> FleetUpgrade<'a> {
    pub fn new(config: &'a OrchestratorConfig, catalog: &'a ArtifactCatalog) -> Self {
        Self {
            planner: UpgradePlanner::new(config, catalog),
        }
    }

    /// Generic entry point: one transition mode per domain, parallel arrays.
    ///
    /// Plans every domain first, then dispatches every domain's sequence in
    /// order. Calling twice with identical arguments produces bit-identical
    /// instruction batches.
    pub fn run(
        &self,
        ctx: &CallerContext,
        relay: &mut dyn OutboundRelay,
        domains: &[Address],
        modes: &[TransitionMode],
    ) -> Result<()> {
        ctx.validate()?;
        if domains.is_empty() {
            return Err(OrchestratorError::EmptyFleet);
        }
        if modes.len() != domains.len() {
            return Err(OrchestratorError::ArrayLengthMismatch {
                field: "modes",
                expected: domains.len(),
                actual: modes.len(),
            });
        }
        for (index, domain) in domains.iter().enumerate() {
            if domain.is_zero() {
                return Err(OrchestratorError::DomainZero { index });
            }
        }

        // Plan the whole fleet before dispatching anything: a validation
        // failure on domain N must not leave domains 0..N already in flight.
        let mut plans: Vec<(Address, Vec<RemoteCallInstruction>)> =
            Vec::with_capacity(domains.len());
        for (domain, mode) in domains.iter().zip(modes) {
            let instructions = self.planner.plan(ctx, *domain, mode)?;
            plans.push((*domain, instructions));
        }

        let total: usize = plans.iter().map(|(_, p)| p.len()).sum();
        info!(
            caller = %ctx.sender,
            fleet = domains.len(),
            instructions = total,
            "dispatching fleet upgrade"
        );

        for (domain, instructions) in plans {
            for instruction in &instructions {
                relay.dispatch(domain, instruction)?;
            }
            debug!(%domain, count = instructions.len(), "domain instructions dispatched");
        }
        Ok(())
    }

    /// Fresh deploy + enable across the fleet: three parallel arrays, one
    /// aggregator config and one remainder recipient per domain.
    pub fn deploy_and_enable(
        &self,
        ctx: &CallerContext,
        relay: &mut dyn OutboundRelay,
        domains: &[Address],
        aggregators: &[AggregatorConfig],
        remainders: &[Address],
    ) -> Result<()> {
        let modes = zip_enable_params(domains, aggregators, remainders, |aggregator, remainder| {
            TransitionMode::DeployAndEnableAtomically {
                aggregator,
                remainder,
            }
        })?;
        self.run(ctx, relay, domains, &modes)
    }

    /// Enable-only across a fleet whose proxies already point at upgraded
    /// implementations.
    pub fn enable(
        &self,
        ctx: &CallerContext,
        relay: &mut dyn OutboundRelay,
        domains: &[Address],
        aggregators: &[AggregatorConfig],
        remainders: &[Address],
    ) -> Result<()> {
        let modes = zip_enable_params(domains, aggregators, remainders, |aggregator, remainder| {
            TransitionMode::EnableOnAlreadyUpgraded {
                aggregator,
                remainder,
            }
        })?;
        self.run(ctx, relay, domains, &modes)
    }

    /// Deploy the upgraded contract set across the fleet but leave every
    /// fund router disabled. With `custom` set, each vault keeps its
    /// caller-chosen spec instead of the standard fund-router wiring.
    pub fn deploy_disabled(
        &self,
        ctx: &CallerContext,
        relay: &mut dyn OutboundRelay,
        domains: &[Address],
        salt_namespace: &str,
        vault_specs: &[Vec<VaultUpgradeSpec>],
        custom: bool,
    ) -> Result<()> {
        if domains.is_empty() {
            return Err(OrchestratorError::EmptyFleet);
        }
        if vault_specs.len() != domains.len() {
            return Err(OrchestratorError::ArrayLengthMismatch {
                field: "vault_specs",
                expected: domains.len(),
                actual: vault_specs.len(),
            });
        }
        let modes: Vec<TransitionMode> = vault_specs
            .iter()
            .map(|vaults| {
                if custom {
                    TransitionMode::DeployCustomThenDisabled {
                        salt_namespace: salt_namespace.to_string(),
                        vaults: vaults.clone(),
                    }
                } else {
                    TransitionMode::DeployOnlyDisabled {
                        salt_namespace: salt_namespace.to_string(),
                        vaults: vaults.clone(),
                    }
                }
            })
            .collect();
        self.run(ctx, relay, domains, &modes)
    }
}

fn zip_enable_params(
    domains: &[Address],
    aggregators: &[AggregatorConfig],
    remainders: &[Address],
    make: impl Fn(AggregatorConfig, Address) -> TransitionMode,
) -> Result<Vec<TransitionMode>> {
    if domains.is_empty() {
        return Err(OrchestratorError::EmptyFleet);
    }
    if aggregators.len() != domains.len() {
        return Err(OrchestratorError::ArrayLengthMismatch {
            field: "aggregators",
            expected: domains.len(),
            actual: aggregators.len(),
        });
    }
    if remainders.len() != domains.len() {
        return Err(OrchestratorError::ArrayLengthMismatch {
            field: "remainders",
            expected: domains.len(),
            actual: remainders.len(),
        });
    }
    Ok(aggregators
        .iter()
        .zip(remainders)
        .map(|(aggregator, remainder)| make(aggregator.clone(), *remainder))
        .collect())
}
