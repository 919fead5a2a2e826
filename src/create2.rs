//! Deterministic address derivation.
//!
//! The orchestrator computes the address of every artifact *before* it exists
//! on the remote domain, so later wiring instructions can reference it. The
//! formula here must match the remote CREATE2 deployer bit-for-bit: any
//! divergence silently wires proxies to addresses nothing will ever occupy.

use ethers::types::{Address, H256};
use ethers::utils::{get_create2_address, keccak256};

/// Default salt namespace used by the modes that are not namespace-
/// parameterized. Fixed so repeated orchestrator invocations converge on the
/// same addresses (re-deploys are idempotent no-ops on the remote side).
pub const DEFAULT_SALT_NAMESPACE: &str = "revshare";

/// Derive the CREATE2 salt for one artifact within a namespace.
///
/// The salt deliberately excludes the target domain identity: two domains
/// configured with identical parameters derive identical addresses, each
/// meaningful only within its own domain. Namespaces exist to keep different
/// orchestrator call sites from colliding, not to separate domains.
pub fn artifact_salt(namespace: &str, symbol: &str) -> H256 {
    H256(keccak256(format!("{namespace}/{symbol}").as_bytes()))
}

/// EIP-1014 address derivation:
/// `keccak256(0xff ++ deployer ++ salt ++ keccak256(init_code))[12..]`.
///
/// Pure and total; identical inputs always produce the identical address,
/// whether or not the artifact has already been deployed.
pub fn create2_address(deployer: Address, salt: H256, init_code: &[u8]) -> Address {
    get_create2_address(deployer, salt.as_bytes(), init_code)
}
