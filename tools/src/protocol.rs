use std::fmt;

use common::{
    constants::MIN_TWO_STEP_MAJOR_VERSION,
    instruction::{
        self, ClaimTokenAuthority, ClaimTokenAuthorityToMultisig, SetTokenAuthority,
    },
    state::ManagerConfig,
    version::ProtocolVersion,
};
use log::{info, warn};
use serde::Deserialize;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    error::AuthorityError,
    reader::{ManagerStateReader, MultisigProbe},
    submitter::TransactionSubmitter,
};

/// Config key an operator edits to add multisig co-signers.
pub const ADDITIONAL_SIGNERS_CONFIG_KEY: &str = "additional_signer_keypair_paths";

/// What to do when a claim to a multisig carries fewer signers than it requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuorumPolicy {
    /// Log a warning and submit anyway; the manager rejects the claim on chain.
    #[default]
    Warn,
    /// Fail before anything is submitted.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuorumShortfall {
    pub required: u8,
    /// Payer plus configured additional signers.
    pub available: usize,
}

impl fmt::Display for QuorumShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New multisig authority requires {} signers but only {} are available \
             (payer + additional signers). Update `{}` in the config",
            self.required, self.available, ADDITIONAL_SIGNERS_CONFIG_KEY
        )
    }
}

/// Checks a multisig's `m` against the payer plus `additional_signers`.
pub fn check_quorum(required: u8, additional_signers: usize) -> Option<QuorumShortfall> {
    let available = additional_signers + 1;
    (usize::from(required) > available).then_some(QuorumShortfall {
        required,
        available,
    })
}

/// Current mint authority relative to the manager's expected PDA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAuthorityState {
    pub current_authority: Option<Pubkey>,
    /// Set when the mint authority is a key other than the manager PDA.
    pub multisig_token_authority: Option<Pubkey>,
}

impl MintAuthorityState {
    pub fn is_pda_authority(&self) -> bool {
        self.current_authority.is_some() && self.multisig_token_authority.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub signature: Signature,
    pub new_authority: Pubkey,
    pub multisig_token_authority: Option<Pubkey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimTarget {
    Plain,
    Multisig {
        required: u8,
        /// Signers handed to the instruction, payer first.
        signers: Vec<Pubkey>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub signature: Signature,
    pub new_authority: Pubkey,
    pub mint: Pubkey,
    pub target: ClaimTarget,
    pub multisig_token_authority: Option<Pubkey>,
    pub quorum_shortfall: Option<QuorumShortfall>,
}

/// The two-step mint authority handover.
///
/// `transfer` designates a pending authority through the manager; `claim`
/// finalizes it. Both re-read all manager state on every call.
pub struct AuthorityTransfer<'a, R, S> {
    reader: R,
    submitter: S,
    payer: &'a Keypair,
    additional_signers: &'a [Keypair],
    quorum_policy: QuorumPolicy,
    expected_version: Option<ProtocolVersion>,
}

impl<'a, R, S> AuthorityTransfer<'a, R, S>
where
    R: ManagerStateReader,
    S: TransactionSubmitter,
{
    pub fn new(
        reader: R,
        submitter: S,
        payer: &'a Keypair,
        additional_signers: &'a [Keypair],
    ) -> Self {
        Self {
            reader,
            submitter,
            payer,
            additional_signers,
            quorum_policy: QuorumPolicy::default(),
            expected_version: None,
        }
    }

    pub fn with_quorum_policy(mut self, quorum_policy: QuorumPolicy) -> Self {
        self.quorum_policy = quorum_policy;
        self
    }

    /// Version the operator believes is deployed; a mismatch is only logged.
    pub fn with_expected_version(mut self, version: ProtocolVersion) -> Self {
        self.expected_version = Some(version);
        self
    }

    /// Refuses to go further unless the manager is new enough and paused.
    pub fn check_preconditions(&self) -> Result<ProtocolVersion, AuthorityError> {
        let version: ProtocolVersion = self.reader.read_manager_version()?.parse()?;
        if !version.supports_two_step_authority() {
            return Err(AuthorityError::UnsupportedVersion {
                found: version,
                required: MIN_TWO_STEP_MAJOR_VERSION,
            });
        }
        if let Some(expected) = self.expected_version.filter(|expected| *expected != version) {
            warn!("Configured manager version {expected} differs from on-chain version {version}");
        }

        if !self.reader.read_manager_paused()? {
            return Err(AuthorityError::NotPaused);
        }
        Ok(version)
    }

    pub fn resolve_current_authority(
        &self,
        config: &ManagerConfig,
    ) -> Result<MintAuthorityState, AuthorityError> {
        let current_authority = self.reader.read_mint_authority(config)?;
        let multisig_token_authority =
            current_authority.filter(|authority| *authority != config.token_authority_pda);

        if let Some(authority) = multisig_token_authority {
            info!("Mint authority is currently held by multisig {authority}");
        }
        Ok(MintAuthorityState {
            current_authority,
            multisig_token_authority,
        })
    }

    // Shared by both commands: gate, then a fresh config and authority read.
    fn prepare(&self) -> Result<(ManagerConfig, MintAuthorityState), AuthorityError> {
        let version = self.check_preconditions()?;
        info!("Manager version {version}, paused");

        let config = self.reader.read_manager_config()?;
        let authority = self.resolve_current_authority(&config)?;
        Ok((config, authority))
    }

    /// First step: records `new_authority` as the manager's pending token authority.
    pub fn transfer(&self, new_authority: Pubkey) -> Result<TransferOutcome, AuthorityError> {
        let (config, authority) = self.prepare()?;
        let payer = self.payer.pubkey();

        let ix = instruction::set_token_authority(
            &config,
            &SetTokenAuthority {
                rent_payer: payer,
                owner: payer,
                new_authority,
                multisig_token_authority: authority.multisig_token_authority,
            },
        );
        let signature = self.submitter.submit_and_confirm(&[ix], &[self.payer])?;

        Ok(TransferOutcome {
            signature,
            new_authority,
            multisig_token_authority: authority.multisig_token_authority,
        })
    }

    /// Second step: moves mint authority to `new_authority`, which may be an SPL multisig.
    pub fn claim(&self, new_authority: Pubkey) -> Result<ClaimOutcome, AuthorityError> {
        let (config, authority) = self.prepare()?;
        let payer = self.payer.pubkey();

        let multisig = match self.reader.probe_multisig(&new_authority) {
            MultisigProbe::IsMultisig(info) => Some(info),
            MultisigProbe::NotMultisig => None,
            MultisigProbe::ProbeFailed(cause) => {
                warn!(
                    "Could not determine whether {new_authority} is a multisig ({cause}); \
                     treating it as a plain account"
                );
                None
            }
        };

        let mut quorum_shortfall = None;
        let (ix, target): (Instruction, ClaimTarget) = match multisig {
            Some(info) => {
                quorum_shortfall = check_quorum(info.m, self.additional_signers.len());
                if let Some(shortfall) = quorum_shortfall {
                    if self.quorum_policy == QuorumPolicy::Abort {
                        return Err(AuthorityError::InsufficientQuorum(shortfall));
                    }
                    warn!("{shortfall}");
                }

                let signers: Vec<Pubkey> = std::iter::once(payer)
                    .chain(self.additional_signers.iter().map(Keypair::pubkey))
                    .collect();
                let ix = instruction::claim_token_authority_to_multisig(
                    &config,
                    &ClaimTokenAuthorityToMultisig {
                        rent_payer: payer,
                        new_multisig_authority: new_authority,
                        additional_signers: signers.clone(),
                        multisig_token_authority: authority.multisig_token_authority,
                    },
                );
                (
                    ix,
                    ClaimTarget::Multisig {
                        required: info.m,
                        signers,
                    },
                )
            }
            None => {
                let ix = instruction::claim_token_authority(
                    &config,
                    &ClaimTokenAuthority {
                        rent_payer: payer,
                        new_authority,
                        multisig_token_authority: authority.multisig_token_authority,
                    },
                );
                (ix, ClaimTarget::Plain)
            }
        };

        // Every configured signer co-signs regardless of the branch taken.
        let signers: Vec<&Keypair> = std::iter::once(self.payer)
            .chain(self.additional_signers.iter())
            .collect();
        let signature = self.submitter.submit_and_confirm(&[ix], &signers)?;

        Ok(ClaimOutcome {
            signature,
            new_authority,
            mint: config.mint,
            target,
            multisig_token_authority: authority.multisig_token_authority,
            quorum_shortfall,
        })
    }
}
