use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{constants::CONFIG_ACCOUNT_DISCRIMINATOR, error::InterfaceError, pda};

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Locking,
    Burning,
}

/// Which SPL token program owns the mint.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenProgramVariant {
    /// `spl-token`
    Classic,
    /// `spl-token-2022`
    Extended,
}

impl TokenProgramVariant {
    pub fn from_program_id(program_id: &Pubkey) -> Result<Self, InterfaceError> {
        if *program_id == spl_token::id() {
            Ok(Self::Classic)
        } else if *program_id == spl_token_2022::id() {
            Ok(Self::Extended)
        } else {
            Err(InterfaceError::UnsupportedTokenProgram(*program_id))
        }
    }

    pub fn program_id(&self) -> Pubkey {
        match self {
            Self::Classic => spl_token::id(),
            Self::Extended => spl_token_2022::id(),
        }
    }
}

// Field order mirrors the manager's `Config` account after the discriminator.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug)]
struct RawConfig {
    bump: u8,
    owner: [u8; 32],
    pending_owner: Option<[u8; 32]>,
    mint: [u8; 32],
    token_program: [u8; 32],
    mode: Mode,
    chain_id: u16,
    next_transceiver_id: u8,
    threshold: u8,
    enabled_transceivers: u128,
    paused: bool,
    custody: [u8; 32],
}

/// Snapshot of the manager state relevant to a mint authority handover.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ManagerConfig {
    pub program_id: Pubkey,
    pub owner: Pubkey,
    pub pending_owner: Option<Pubkey>,
    pub mint: Pubkey,
    pub token_program: TokenProgramVariant,
    pub mode: Mode,
    pub chain_id: u16,
    pub threshold: u8,
    pub paused: bool,
    pub custody: Pubkey,
    /// PDA expected to hold mint authority under normal operation.
    pub token_authority_pda: Pubkey,
}

impl ManagerConfig {
    /// Decodes the `Config` account owned by `program_id`.
    pub fn decode(program_id: &Pubkey, data: &[u8]) -> Result<Self, InterfaceError> {
        if data.len() < CONFIG_ACCOUNT_DISCRIMINATOR.len() {
            return Err(InterfaceError::InvalidLength);
        }
        let (discriminator, mut body) = data.split_at(CONFIG_ACCOUNT_DISCRIMINATOR.len());
        if discriminator != CONFIG_ACCOUNT_DISCRIMINATOR {
            return Err(InterfaceError::InvalidDiscriminator);
        }

        let raw = RawConfig::deserialize(&mut body)
            .map_err(|e| InterfaceError::Decode(e.to_string()))?;
        let token_program =
            TokenProgramVariant::from_program_id(&Pubkey::new_from_array(raw.token_program))?;

        Ok(Self {
            program_id: *program_id,
            owner: Pubkey::new_from_array(raw.owner),
            pending_owner: raw.pending_owner.map(Pubkey::new_from_array),
            mint: Pubkey::new_from_array(raw.mint),
            token_program,
            mode: raw.mode,
            chain_id: raw.chain_id,
            threshold: raw.threshold,
            paused: raw.paused,
            custody: Pubkey::new_from_array(raw.custody),
            token_authority_pda: pda::get_token_authority(program_id),
        })
    }
}
