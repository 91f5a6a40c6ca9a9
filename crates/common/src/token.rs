use solana_program_option::COption;
use solana_program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use spl_token_2022::{extension::StateWithExtensions, state::Multisig};

use crate::{error::InterfaceError, state::TokenProgramVariant};

/// Reads the mint authority out of raw mint account data.
///
/// Returns `None` when the mint has no authority (fixed supply).
pub fn decode_mint_authority(
    variant: TokenProgramVariant,
    data: &[u8],
) -> Result<Option<Pubkey>, InterfaceError> {
    let authority = match variant {
        TokenProgramVariant::Classic => {
            spl_token::state::Mint::unpack(data)
                .map_err(|_| InterfaceError::InvalidMint)?
                .mint_authority
        }
        TokenProgramVariant::Extended => {
            StateWithExtensions::<spl_token_2022::state::Mint>::unpack(data)
                .map_err(|_| InterfaceError::InvalidMint)?
                .base
                .mint_authority
        }
    };

    Ok(match authority {
        COption::Some(key) => Some(key),
        COption::None => None,
    })
}

/// The parts of an SPL multisig account this crate cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigInfo {
    /// Number of signers required.
    pub m: u8,
    pub signers: Vec<Pubkey>,
}

/// Decodes `data` as an SPL multisig if `owner` is a token program and the
/// layout fits. Anything else yields `None`.
pub fn decode_multisig(owner: &Pubkey, data: &[u8]) -> Option<MultisigInfo> {
    TokenProgramVariant::from_program_id(owner).ok()?;
    let multisig = Multisig::unpack(data).ok()?;
    Some(MultisigInfo {
        m: multisig.m,
        signers: multisig
            .signers
            .iter()
            .take(multisig.n as usize)
            .copied()
            .collect(),
    })
}
