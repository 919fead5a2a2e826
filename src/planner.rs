//! Per-domain upgrade planning.
//!
//! Given one remote domain and a transition mode, produce the exact ordered
//! instruction sequence that migrates that domain's revenue-share contracts.
//! Validation runs in full before the first instruction is built, so a plan
//! call is all-or-nothing: a complete valid sequence, or a named error and
//! nothing emitted.
//!
//! Ordering invariant: the fund router must hold a valid calculator before
//! any vault is pointed at it. A vault that redirects revenue to a router
//! with no calculator either reverts on receipt or strands the funds, and
//! the orchestrator cannot observe or retry the remote execution.

use crate::catalog::{ArtifactCatalog, ArtifactKind};
use crate::config::OrchestratorConfig;
use crate::create2::{artifact_salt, create2_address, DEFAULT_SALT_NAMESPACE};
use crate::encoder::{
    self, RemoteCallInstruction, WithdrawalNetwork,
};
use crate::error::{OrchestratorError, Result};
use ethers::abi::Token;
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Withdrawal aggregator parameters for the enable paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Balance the aggregator accumulates before forwarding
    pub min_withdrawal: U256,
    /// Recipient on the coordinating domain
    pub l1_recipient: Address,
    /// Gas forwarded with the withdrawal; the aggregator constructor takes a
    /// uint32, so the bound is enforced by the type
    pub withdrawal_gas: u32,
}

/// Caller-chosen configuration for one vault proxy upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultUpgradeSpec {
    /// Must match one of the four configured predeploy slots
    pub proxy: Address,
    pub recipient: Address,
    pub min_withdrawal: U256,
    pub network: WithdrawalNetwork,
}

/// The supported migration shapes for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionMode {
    /// Upgrade the four vaults with standard wiring, then leave the fund
    /// router deployed but initialized with a zero calculator: an explicit,
    /// auditable disabled terminal state.
    DeployOnlyDisabled {
        salt_namespace: String,
        vaults: Vec<VaultUpgradeSpec>,
    },
    /// Vaults and router already point at upgraded implementations; deploy a
    /// fresh aggregator + calculator and flip everything live via setters.
    EnableOnAlreadyUpgraded {
        aggregator: AggregatorConfig,
        remainder: Address,
    },
    /// Fresh deploy of the full set with the default wiring, live on arrival.
    DeployAndEnableAtomically {
        aggregator: AggregatorConfig,
        remainder: Address,
    },
    /// Like `DeployOnlyDisabled`, but each vault is initialized with the
    /// caller-chosen recipient/threshold/destination instead of the standard
    /// fund-router wiring.
    DeployCustomThenDisabled {
        salt_namespace: String,
        vaults: Vec<VaultUpgradeSpec>,
    },
}

impl TransitionMode {
    fn name(&self) -> &'static str {
        match self {
            TransitionMode::DeployOnlyDisabled { .. } => "deploy-only-disabled",
            TransitionMode::EnableOnAlreadyUpgraded { .. } => "enable-on-already-upgraded",
            TransitionMode::DeployAndEnableAtomically { .. } => "deploy-and-enable-atomically",
            TransitionMode::DeployCustomThenDisabled { .. } => "deploy-custom-then-disabled",
        }
    }
}

/// Explicit caller identity. The orchestrator's instructions execute under
/// its caller's authority on the coordinating domain, so the caller is a
/// parameter of every operation rather than ambient context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerContext {
    pub sender: Address,
}

impl CallerContext {
    pub fn new(sender: Address) -> Self {
        Self { sender }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sender.is_zero() {
            return Err(OrchestratorError::CallerZero);
        }
        Ok(())
    }
}

/// Number of vault proxy slots per domain.
pub const VAULT_COUNT: usize = 4;

/// The orchestration core: plans one domain at a time.
pub struct UpgradePlanner<'a> {
    config: &'a OrchestratorConfig,
    catalog: &'a ArtifactCatalog,
}

impl<'a> UpgradePlanner<'a> {
    pub fn new(config: &'a OrchestratorConfig, catalog: &'a ArtifactCatalog) -> Self {
        Self { config, catalog }
    }

    /// Produce the ordered instruction sequence for one domain, or fail with
    /// a named error before anything is built.
    pub fn plan(
        &self,
        ctx: &CallerContext,
        domain: Address,
        mode: &TransitionMode,
    ) -> Result<Vec<RemoteCallInstruction>> {
        ctx.validate()?;
        if domain.is_zero() {
            return Err(OrchestratorError::DomainZero { index: 0 });
        }
        self.validate_mode(mode)?;

        let instructions = match mode {
            TransitionMode::DeployAndEnableAtomically {
                aggregator,
                remainder,
            } => self.build_deploy_and_enable(aggregator, *remainder),
            TransitionMode::EnableOnAlreadyUpgraded {
                aggregator,
                remainder,
            } => self.build_enable(aggregator, *remainder),
            TransitionMode::DeployOnlyDisabled {
                salt_namespace,
                vaults,
            } => self.build_disabled(salt_namespace, vaults, false),
            TransitionMode::DeployCustomThenDisabled {
                salt_namespace,
                vaults,
            } => self.build_disabled(salt_namespace, vaults, true),
        };

        info!(
            caller = %ctx.sender,
            %domain,
            mode = mode.name(),
            instructions = instructions.len(),
            "planned domain upgrade"
        );
        Ok(instructions)
    }

    /// Validation order is fixed across modes: namespace, then vault count,
    /// then per-entry identity and slot checks in field order; or aggregator
    /// recipient, aggregator gas, remainder.
    fn validate_mode(&self, mode: &TransitionMode) -> Result<()> {
        match mode {
            TransitionMode::DeployOnlyDisabled {
                salt_namespace,
                vaults,
            } => {
                self.validate_vault_batch(salt_namespace, vaults, false)?;
            }
            TransitionMode::DeployCustomThenDisabled {
                salt_namespace,
                vaults,
            } => {
                self.validate_vault_batch(salt_namespace, vaults, true)?;
            }
            TransitionMode::EnableOnAlreadyUpgraded {
                aggregator,
                remainder,
            }
            | TransitionMode::DeployAndEnableAtomically {
                aggregator,
                remainder,
            } => {
                if aggregator.l1_recipient.is_zero() {
                    return Err(OrchestratorError::RecipientZero {
                        what: "aggregator recipient",
                    });
                }
                if aggregator.withdrawal_gas == 0 {
                    return Err(OrchestratorError::GasBudgetZero {
                        what: "aggregator withdrawal",
                    });
                }
                if remainder.is_zero() {
                    return Err(OrchestratorError::RecipientZero {
                        what: "remainder recipient",
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_vault_batch(
        &self,
        salt_namespace: &str,
        vaults: &[VaultUpgradeSpec],
        custom: bool,
    ) -> Result<()> {
        if salt_namespace.is_empty() {
            return Err(OrchestratorError::SaltNamespaceEmpty);
        }
        if vaults.len() != VAULT_COUNT {
            return Err(OrchestratorError::VaultCountInvalid {
                expected: VAULT_COUNT,
                count: vaults.len(),
            });
        }
        let slots = self.config.predeploys.vault_slots();
        for (index, spec) in vaults.iter().enumerate() {
            if spec.proxy.is_zero() {
                return Err(OrchestratorError::VaultProxyZero { index });
            }
            if !slots.contains(&spec.proxy) {
                return Err(OrchestratorError::UnknownVaultTarget { proxy: spec.proxy });
            }
            if vaults[..index].iter().any(|prev| prev.proxy == spec.proxy) {
                return Err(OrchestratorError::DuplicateVaultTarget { proxy: spec.proxy });
            }
            if custom && spec.recipient.is_zero() {
                return Err(OrchestratorError::RecipientZero {
                    what: "vault recipient",
                });
            }
        }
        Ok(())
    }

    /// Deploy one artifact through the remote CREATE2 deployer and return the
    /// instruction together with the address the artifact will occupy.
    fn deploy(
        &self,
        namespace: &str,
        kind: ArtifactKind,
        ctor_args: &[Token],
    ) -> (RemoteCallInstruction, Address) {
        let deployer = self.config.predeploys.create2_deployer;
        let salt = artifact_salt(namespace, kind.symbol());
        let init_code = self.catalog.init_code(kind, ctor_args);
        let address = create2_address(deployer, salt, &init_code);
        debug!(artifact = %kind, %address, "derived deterministic address");
        let instr =
            encoder::deploy_via_create2(deployer, salt, init_code, self.catalog.deploy_gas(kind));
        (instr, address)
    }

    /// 12 instructions: aggregator, calculator, router deploys; router
    /// upgrade+init with the calculator; then per vault in canonical order a
    /// deploy and an upgrade+init pointing at the router. The router gains
    /// its calculator strictly before any vault references it.
    fn build_deploy_and_enable(
        &self,
        aggregator: &AggregatorConfig,
        remainder: Address,
    ) -> Vec<RemoteCallInstruction> {
        let ns = DEFAULT_SALT_NAMESPACE;
        let predeploys = &self.config.predeploys;
        let mut out = Vec::with_capacity(12);

        let (instr, aggregator_addr) = self.deploy(
            ns,
            ArtifactKind::WithdrawalAggregator,
            &[
                Token::Uint(aggregator.min_withdrawal),
                Token::Address(aggregator.l1_recipient),
                Token::Uint(U256::from(aggregator.withdrawal_gas)),
            ],
        );
        out.push(instr);

        let (instr, calculator_addr) = self.deploy(
            ns,
            ArtifactKind::RevenueCalculator,
            &[Token::Address(aggregator_addr), Token::Address(remainder)],
        );
        out.push(instr);

        let (instr, router_impl) = self.deploy(ns, ArtifactKind::FundRouter, &[]);
        out.push(instr);

        out.push(encoder::upgrade_and_call(
            predeploys.proxy_admin,
            predeploys.fund_router,
            router_impl,
            encoder::router_initialize_data(calculator_addr),
            self.catalog.upgrade_gas(),
        ));

        for (kind, proxy) in ArtifactKind::canonical_vaults()
            .into_iter()
            .zip(predeploys.vault_slots())
        {
            let (instr, vault_impl) = self.deploy(ns, kind, &[]);
            out.push(instr);
            out.push(encoder::upgrade_and_call(
                predeploys.proxy_admin,
                proxy,
                vault_impl,
                encoder::vault_initialize_data(
                    predeploys.fund_router,
                    U256::zero(),
                    WithdrawalNetwork::Coordinating,
                ),
                self.catalog.upgrade_gas(),
            ));
        }
        out
    }

    /// 7 instructions: aggregator and calculator deploys, the calculator
    /// setter on the router, then one config setter per vault. Proxies
    /// already point at upgraded code, so no upgrade step is emitted.
    fn build_enable(
        &self,
        aggregator: &AggregatorConfig,
        remainder: Address,
    ) -> Vec<RemoteCallInstruction> {
        let ns = DEFAULT_SALT_NAMESPACE;
        let predeploys = &self.config.predeploys;
        let mut out = Vec::with_capacity(7);

        let (instr, aggregator_addr) = self.deploy(
            ns,
            ArtifactKind::WithdrawalAggregator,
            &[
                Token::Uint(aggregator.min_withdrawal),
                Token::Address(aggregator.l1_recipient),
                Token::Uint(U256::from(aggregator.withdrawal_gas)),
            ],
        );
        out.push(instr);

        let (instr, calculator_addr) = self.deploy(
            ns,
            ArtifactKind::RevenueCalculator,
            &[Token::Address(aggregator_addr), Token::Address(remainder)],
        );
        out.push(instr);

        out.push(encoder::contract_call(
            predeploys.fund_router,
            encoder::router_set_calculator_data(calculator_addr),
            self.catalog.setter_gas(),
        ));

        for proxy in predeploys.vault_slots() {
            out.push(encoder::contract_call(
                proxy,
                encoder::vault_set_config_data(
                    predeploys.fund_router,
                    U256::zero(),
                    WithdrawalNetwork::Coordinating,
                ),
                self.catalog.setter_gas(),
            ));
        }
        out
    }

    /// 10 instructions: per supplied vault spec a deploy and an upgrade+init,
    /// then the router deploy and upgrade+init with the zero calculator.
    /// Vaults go first here: none of them can route through the router yet,
    /// and the zero-calculator router is the explicit disabled end state.
    fn build_disabled(
        &self,
        salt_namespace: &str,
        vaults: &[VaultUpgradeSpec],
        custom: bool,
    ) -> Vec<RemoteCallInstruction> {
        let predeploys = &self.config.predeploys;
        let slots = predeploys.vault_slots();
        let canonical = ArtifactKind::canonical_vaults();
        let mut out = Vec::with_capacity(vaults.len() * 2 + 2);

        for spec in vaults {
            // validated above: every proxy matches exactly one slot
            let slot_index = slots
                .iter()
                .position(|slot| *slot == spec.proxy)
                .unwrap_or_default();
            let kind = canonical[slot_index];
            let (instr, vault_impl) = self.deploy(salt_namespace, kind, &[]);
            out.push(instr);

            let init_data = if custom {
                encoder::vault_initialize_data(spec.recipient, spec.min_withdrawal, spec.network)
            } else {
                encoder::vault_initialize_data(
                    predeploys.fund_router,
                    U256::zero(),
                    WithdrawalNetwork::Coordinating,
                )
            };
            out.push(encoder::upgrade_and_call(
                predeploys.proxy_admin,
                spec.proxy,
                vault_impl,
                init_data,
                self.catalog.upgrade_gas(),
            ));
        }

        let (instr, router_impl) = self.deploy(salt_namespace, ArtifactKind::FundRouter, &[]);
        out.push(instr);
        out.push(encoder::upgrade_and_call(
            predeploys.proxy_admin,
            predeploys.fund_router,
            router_impl,
            encoder::router_initialize_data(Address::zero()),
            self.catalog.upgrade_gas(),
        ));
        out
    }
}
