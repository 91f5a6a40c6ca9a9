use solana_sdk::pubkey::Pubkey;

use crate::constants::{CONFIG_SEED, PENDING_TOKEN_AUTHORITY_SEED, TOKEN_AUTHORITY_SEED};

pub fn get_config(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id).0
}

/// The PDA that holds mint authority while the manager is in normal operation.
pub fn get_token_authority(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[TOKEN_AUTHORITY_SEED], program_id).0
}

pub fn get_pending_token_authority(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[PENDING_TOKEN_AUTHORITY_SEED], program_id).0
}
