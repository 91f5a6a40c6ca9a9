// Property tests for version gating and claim instruction layout.

use common::{
    constants::MIN_TWO_STEP_MAJOR_VERSION,
    instruction::{claim_token_authority_to_multisig, ClaimTokenAuthorityToMultisig},
    pda,
    state::{ManagerConfig, Mode, TokenProgramVariant},
    version::ProtocolVersion,
};
use proptest::prelude::*;
use solana_sdk::pubkey::Pubkey;

fn config_for(program_id: Pubkey) -> ManagerConfig {
    ManagerConfig {
        program_id,
        owner: Pubkey::new_unique(),
        pending_owner: None,
        mint: Pubkey::new_unique(),
        token_program: TokenProgramVariant::Classic,
        mode: Mode::Locking,
        chain_id: 1,
        threshold: 1,
        paused: true,
        custody: Pubkey::new_unique(),
        token_authority_pda: pda::get_token_authority(&program_id),
    }
}

proptest! {
    #[test]
    fn proptest_version_parse_matches_components(
        major in 0u64..1_000,
        minor in 0u64..1_000,
        patch in 0u64..1_000,
    ) {
        let parsed: ProtocolVersion = format!("{major}.{minor}.{patch}").parse().unwrap();
        prop_assert_eq!(parsed, ProtocolVersion::new(major, minor, patch));
        prop_assert_eq!(parsed.to_string(), format!("{major}.{minor}.{patch}"));
    }

    #[test]
    fn proptest_gate_depends_only_on_major(
        major in 0u64..10,
        minor in 0u64..100,
        patch in 0u64..100,
    ) {
        let version = ProtocolVersion::new(major, minor, patch);
        prop_assert_eq!(
            version.supports_two_step_authority(),
            major >= MIN_TWO_STEP_MAJOR_VERSION
        );
    }

    #[test]
    fn proptest_claim_to_multisig_appends_signers_in_order(
        seeds in proptest::collection::vec(any::<[u8; 32]>(), 1..11),
        with_prior in any::<bool>(),
    ) {
        let config = config_for(Pubkey::new_unique());
        let signers: Vec<Pubkey> = seeds.into_iter().map(Pubkey::new_from_array).collect();
        let prior = with_prior.then(Pubkey::new_unique);

        let ix = claim_token_authority_to_multisig(
            &config,
            &ClaimTokenAuthorityToMultisig {
                rent_payer: signers[0],
                new_multisig_authority: Pubkey::new_unique(),
                additional_signers: signers.clone(),
                multisig_token_authority: prior,
            },
        );

        let tail: Vec<Pubkey> = ix.accounts[9..].iter().map(|meta| meta.pubkey).collect();
        prop_assert_eq!(tail, signers);
        prop_assert_eq!(ix.accounts[3].pubkey, prior.unwrap_or(config.program_id));
    }
}
