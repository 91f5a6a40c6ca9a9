use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterfaceError {
    #[error("Account data too short")]
    InvalidLength,
    #[error("Account discriminator mismatch")]
    InvalidDiscriminator,
    #[error("Failed to decode account data: {0}")]
    Decode(String),
    #[error("Unsupported token program: {0}")]
    UnsupportedTokenProgram(Pubkey),
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),
    #[error("Invalid mint account")]
    InvalidMint,
}
