use std::path::PathBuf;

use common::{error::InterfaceError, version::ProtocolVersion};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::protocol::QuorumShortfall;

/// Errors that can occur while handing over mint authority
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// The `<NEW_AUTHORITY>` argument is not a valid public key
    #[error("Invalid new authority address: {0:?}")]
    InvalidAuthority(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to load keypair from {}: {reason}", path.display())]
    KeypairLoad { path: PathBuf, reason: String },
    /// The manager predates the two-step token authority instructions
    #[error(
        "Manager program version {found} does not support two-step authority transfer \
         (requires major version {required} or later). Upgrade the manager program first"
    )]
    UnsupportedVersion {
        found: ProtocolVersion,
        required: u64,
    },
    #[error("Manager is not paused. Pause the manager before changing the mint authority")]
    NotPaused,
    #[error("Manager mint {on_chain} does not match the configured token mint {configured}")]
    MintMismatch { configured: Pubkey, on_chain: Pubkey },
    #[error("{0}")]
    InsufficientQuorum(QuorumShortfall),
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),
    #[error("Manager returned no version data")]
    MissingVersion,
    #[error("Simulating the manager's version instruction failed: {0}")]
    VersionSimulation(String),
    #[error("Failed to decode account data: {0}")]
    Decode(String),
    #[error(transparent)]
    Interface(#[from] InterfaceError),
    /// An error occurred while making an RPC request
    #[error("RPC error: {0}")]
    RpcError(#[from] solana_client::client_error::ClientError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Failures from building, signing or broadcasting a transaction
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Failed to sign transaction: {0}")]
    Signing(String),
    /// The cluster refused the transaction; on-chain state is unchanged
    #[error("Transaction {signature} rejected: {reason}")]
    Rejected { signature: Signature, reason: String },
    /// Sent, but not confirmed in time. It may still land.
    #[error(
        "Transaction {signature} was sent but could not be confirmed; \
         check its status before retrying"
    )]
    ConfirmationTimeout { signature: Signature },
    #[error("RPC error: {0}")]
    Rpc(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("Config field `{field}` is not a valid address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },
    #[error("Config field `version` is invalid: {0}")]
    InvalidVersion(InterfaceError),
    #[error("Configured manager version {0} predates two-step authority transfer")]
    UnsupportedVersion(ProtocolVersion),
    #[error("Unsupported chain {0:?}; only Solana is supported")]
    UnsupportedChain(String),
}
