use ethers::types::Address;
use thiserror::Error;

/// Main error type for the upgrade orchestrator.
///
/// Every variant is a local, pre-dispatch failure: validation runs in full
/// before any instruction is handed to the relay, so the only post-validation
/// variant is `Dispatch`, which propagates a relay-layer refusal on the
/// coordinating domain. Remote execution failures do not exist at this layer
/// by design (fire-and-forget messaging, no return channel).
#[derive(Error, Debug)]
pub enum OrchestratorError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Artifact {symbol} has malformed creation code: {reason}")]
    ArtifactEncoding { symbol: String, reason: String },

    #[error("Artifact catalog is missing creation code for {symbol}")]
    MissingArtifact { symbol: String },

    // Shape errors
    #[error("Fleet is empty: at least one target domain is required")]
    EmptyFleet,

    #[error("Array length mismatch: {field} has {actual} entries, expected {expected}")]
    ArrayLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Expected exactly {expected} vault upgrade specs, got {count}")]
    VaultCountInvalid { expected: usize, count: usize },

    // Identity errors
    #[error("Caller context has the zero address as sender")]
    CallerZero,

    #[error("Domain at index {index} is the zero address")]
    DomainZero { index: usize },

    #[error("{what} is the zero address")]
    RecipientZero { what: &'static str },

    #[error("Vault spec at index {index} has the zero address as proxy")]
    VaultProxyZero { index: usize },

    // Unknown-target errors
    #[error("Vault proxy {proxy:?} does not match any configured predeploy slot")]
    UnknownVaultTarget { proxy: Address },

    #[error("Vault proxy {proxy:?} appears more than once in the upgrade specs")]
    DuplicateVaultTarget { proxy: Address },

    // Input-form errors
    #[error("Salt namespace must not be empty")]
    SaltNamespaceEmpty,

    #[error("{what} gas budget must be greater than zero")]
    GasBudgetZero { what: &'static str },

    // Dispatch-layer errors (the only failure possible after validation passes)
    #[error("Relay dispatch failed for domain {domain:?}: {reason}")]
    Dispatch { domain: Address, reason: String },
}

/// Convenience type alias
pub type Result<T> = std::result::Result<T, OrchestratorError>;
