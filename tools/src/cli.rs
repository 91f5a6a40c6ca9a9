use std::{path::PathBuf, str::FromStr};

use argh::FromArgs;
use solana_sdk::pubkey::Pubkey;

use crate::error::AuthorityError;

/// Transfers the mint authority of an NTT-managed token in two steps.
#[derive(FromArgs, PartialEq, Debug)]
pub struct TopLevel {
    /// path to the settings file (defaults to $NTT_AUTHORITY_CONFIG or ./ntt-authority.toml)
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    #[argh(subcommand)]
    pub cmd: Commands,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum Commands {
    Transfer(TransferArgs),
    Claim(ClaimArgs),
}

/// Transfers token mint authority to new authority
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "transfer")]
pub struct TransferArgs {
    /// the new mint authority
    #[argh(positional)]
    pub new_authority: String,
}

/// Completes token mint authority transfer to new authority
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "claim")]
pub struct ClaimArgs {
    /// the new mint authority, an account or SPL multisig
    #[argh(positional)]
    pub new_authority: String,
}

/// A parsed command, ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Transfer { new_authority: Pubkey },
    Claim { new_authority: Pubkey },
}

pub fn parse_authority(value: &str) -> Result<Pubkey, AuthorityError> {
    Pubkey::from_str(value.trim()).map_err(|_| AuthorityError::InvalidAuthority(value.to_string()))
}

impl TryFrom<Commands> for Command {
    type Error = AuthorityError;

    fn try_from(cmd: Commands) -> Result<Self, Self::Error> {
        Ok(match cmd {
            Commands::Transfer(args) => Command::Transfer {
                new_authority: parse_authority(&args.new_authority)?,
            },
            Commands::Claim(args) => Command::Claim {
                new_authority: parse_authority(&args.new_authority)?,
            },
        })
    }
}
