use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::{
    constants::{
        CLAIM_TOKEN_AUTHORITY_DISCRIMINATOR, CLAIM_TOKEN_AUTHORITY_TO_MULTISIG_DISCRIMINATOR,
        SET_TOKEN_AUTHORITY_DISCRIMINATOR, VERSION_DISCRIMINATOR,
    },
    pda,
    state::ManagerConfig,
};

/// Accounts for `set_token_authority`, the first half of the handover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetTokenAuthority {
    pub rent_payer: Pubkey,
    pub owner: Pubkey,
    pub new_authority: Pubkey,
    /// Multisig currently holding mint authority, if it is not the manager PDA.
    pub multisig_token_authority: Option<Pubkey>,
}

/// Accounts for `claim_token_authority`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimTokenAuthority {
    pub rent_payer: Pubkey,
    pub new_authority: Pubkey,
    pub multisig_token_authority: Option<Pubkey>,
}

/// Accounts for `claim_token_authority_to_multisig`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimTokenAuthorityToMultisig {
    pub rent_payer: Pubkey,
    pub new_multisig_authority: Pubkey,
    /// Signers of the new multisig, passed as remaining accounts in this order.
    pub additional_signers: Vec<Pubkey>,
    pub multisig_token_authority: Option<Pubkey>,
}

// Anchor encodes an absent optional account as the program id.
fn optional_account(program_id: &Pubkey, account: Option<Pubkey>) -> AccountMeta {
    AccountMeta::new_readonly(account.unwrap_or(*program_id), false)
}

pub fn set_token_authority(config: &ManagerConfig, args: &SetTokenAuthority) -> Instruction {
    let program_id = config.program_id;
    let accounts = vec![
        AccountMeta::new_readonly(pda::get_config(&program_id), false),
        AccountMeta::new_readonly(args.owner, true),
        AccountMeta::new(config.mint, false),
        AccountMeta::new_readonly(config.token_authority_pda, false),
        optional_account(&program_id, args.multisig_token_authority),
        AccountMeta::new_readonly(args.new_authority, false),
        AccountMeta::new(args.rent_payer, true),
        AccountMeta::new(pda::get_pending_token_authority(&program_id), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction {
        program_id,
        accounts,
        data: SET_TOKEN_AUTHORITY_DISCRIMINATOR.to_vec(),
    }
}

// Shared prefix of both claim instructions.
fn claim_base_accounts(
    config: &ManagerConfig,
    rent_payer: Pubkey,
    multisig_token_authority: Option<Pubkey>,
) -> Vec<AccountMeta> {
    let program_id = config.program_id;
    vec![
        AccountMeta::new_readonly(pda::get_config(&program_id), false),
        AccountMeta::new(config.mint, false),
        AccountMeta::new_readonly(config.token_authority_pda, false),
        optional_account(&program_id, multisig_token_authority),
        AccountMeta::new(rent_payer, false),
        AccountMeta::new(pda::get_pending_token_authority(&program_id), false),
        AccountMeta::new_readonly(config.token_program.program_id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ]
}

pub fn claim_token_authority(config: &ManagerConfig, args: &ClaimTokenAuthority) -> Instruction {
    let mut accounts = claim_base_accounts(config, args.rent_payer, args.multisig_token_authority);
    accounts.push(AccountMeta::new_readonly(args.new_authority, true));

    Instruction {
        program_id: config.program_id,
        accounts,
        data: CLAIM_TOKEN_AUTHORITY_DISCRIMINATOR.to_vec(),
    }
}

pub fn claim_token_authority_to_multisig(
    config: &ManagerConfig,
    args: &ClaimTokenAuthorityToMultisig,
) -> Instruction {
    let mut accounts = claim_base_accounts(config, args.rent_payer, args.multisig_token_authority);
    accounts.push(AccountMeta::new_readonly(
        args.new_multisig_authority,
        false,
    ));
    accounts.extend(
        args.additional_signers
            .iter()
            .map(|signer| AccountMeta::new_readonly(*signer, true)),
    );

    Instruction {
        program_id: config.program_id,
        accounts,
        data: CLAIM_TOKEN_AUTHORITY_TO_MULTISIG_DISCRIMINATOR.to_vec(),
    }
}

/// `version` takes no accounts; the version string comes back as return data.
pub fn version(program_id: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![],
        data: VERSION_DISCRIMINATOR.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Mode, TokenProgramVariant};

    fn test_config() -> ManagerConfig {
        let program_id = Pubkey::new_unique();
        ManagerConfig {
            program_id,
            owner: Pubkey::new_unique(),
            pending_owner: None,
            mint: Pubkey::new_unique(),
            token_program: TokenProgramVariant::Extended,
            mode: Mode::Burning,
            chain_id: 1,
            threshold: 1,
            paused: true,
            custody: Pubkey::new_unique(),
            token_authority_pda: pda::get_token_authority(&program_id),
        }
    }

    #[test]
    fn test_set_token_authority_accounts() {
        let config = test_config();
        let payer = Pubkey::new_unique();
        let new_authority = Pubkey::new_unique();
        let ix = set_token_authority(
            &config,
            &SetTokenAuthority {
                rent_payer: payer,
                owner: payer,
                new_authority,
                multisig_token_authority: None,
            },
        );

        assert_eq!(ix.program_id, config.program_id);
        assert_eq!(ix.data, SET_TOKEN_AUTHORITY_DISCRIMINATOR);
        assert_eq!(ix.accounts.len(), 9);
        assert_eq!(ix.accounts[1], AccountMeta::new_readonly(payer, true));
        assert!(ix.accounts[2].is_writable);
        // absent multisig falls back to the program id placeholder
        assert_eq!(ix.accounts[4].pubkey, config.program_id);
        assert_eq!(ix.accounts[5].pubkey, new_authority);
        assert_eq!(ix.accounts[6], AccountMeta::new(payer, true));
        assert_eq!(
            ix.accounts[7].pubkey,
            pda::get_pending_token_authority(&config.program_id)
        );
    }

    #[test]
    fn test_set_token_authority_with_prior_multisig() {
        let config = test_config();
        let prior = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let ix = set_token_authority(
            &config,
            &SetTokenAuthority {
                rent_payer: payer,
                owner: payer,
                new_authority: Pubkey::new_unique(),
                multisig_token_authority: Some(prior),
            },
        );
        assert_eq!(ix.accounts[4], AccountMeta::new_readonly(prior, false));
    }

    #[test]
    fn test_claim_token_authority_accounts() {
        let config = test_config();
        let payer = Pubkey::new_unique();
        let new_authority = Pubkey::new_unique();
        let ix = claim_token_authority(
            &config,
            &ClaimTokenAuthority {
                rent_payer: payer,
                new_authority,
                multisig_token_authority: None,
            },
        );

        assert_eq!(ix.data, CLAIM_TOKEN_AUTHORITY_DISCRIMINATOR);
        assert_eq!(ix.accounts.len(), 9);
        assert_eq!(ix.accounts[4], AccountMeta::new(payer, false));
        assert_eq!(ix.accounts[6].pubkey, spl_token_2022::id());
        assert_eq!(ix.accounts[8], AccountMeta::new_readonly(new_authority, true));
    }

    #[test]
    fn test_claim_to_multisig_keeps_signer_order() {
        let config = test_config();
        let payer = Pubkey::new_unique();
        let multisig = Pubkey::new_unique();
        let cosigners = vec![payer, Pubkey::new_unique(), Pubkey::new_unique()];
        let ix = claim_token_authority_to_multisig(
            &config,
            &ClaimTokenAuthorityToMultisig {
                rent_payer: payer,
                new_multisig_authority: multisig,
                additional_signers: cosigners.clone(),
                multisig_token_authority: None,
            },
        );

        assert_eq!(ix.data, CLAIM_TOKEN_AUTHORITY_TO_MULTISIG_DISCRIMINATOR);
        assert_eq!(ix.accounts[8], AccountMeta::new_readonly(multisig, false));
        let remaining: Vec<Pubkey> = ix.accounts[9..].iter().map(|a| a.pubkey).collect();
        assert_eq!(remaining, cosigners);
        assert!(ix.accounts[9..].iter().all(|a| a.is_signer && !a.is_writable));
    }

    #[test]
    fn test_version_instruction() {
        let program_id = Pubkey::new_unique();
        let ix = version(&program_id);
        assert!(ix.accounts.is_empty());
        assert_eq!(ix.data, VERSION_DISCRIMINATOR);
    }
}
