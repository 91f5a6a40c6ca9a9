// Seeds used by the NTT manager program for its PDAs.
pub const CONFIG_SEED: &[u8] = b"config";
pub const TOKEN_AUTHORITY_SEED: &[u8] = b"token_authority";
pub const PENDING_TOKEN_AUTHORITY_SEED: &[u8] = b"pending_token_authority";

// Discriminants for NTT manager instructions
pub const SET_TOKEN_AUTHORITY_DISCRIMINATOR: [u8; 8] = [252, 249, 189, 177, 91, 10, 198, 194];
pub const CLAIM_TOKEN_AUTHORITY_DISCRIMINATOR: [u8; 8] = [79, 88, 31, 151, 247, 235, 106, 175];
pub const CLAIM_TOKEN_AUTHORITY_TO_MULTISIG_DISCRIMINATOR: [u8; 8] =
    [126, 120, 191, 188, 30, 56, 80, 226];
pub const VERSION_DISCRIMINATOR: [u8; 8] = [118, 65, 195, 198, 129, 216, 252, 192];

// Discriminants for NTT manager accounts
pub const CONFIG_ACCOUNT_DISCRIMINATOR: [u8; 8] = [155, 12, 170, 224, 30, 250, 204, 130];

/// The two-step token authority instructions first shipped in this major version.
pub const MIN_TWO_STEP_MAJOR_VERSION: u64 = 3;
