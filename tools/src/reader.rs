use base64::{engine::general_purpose::STANDARD as base64, Engine as _};
use borsh::BorshDeserialize;
use common::{
    instruction, pda,
    state::ManagerConfig,
    token::{decode_mint_authority, decode_multisig, MultisigInfo},
};
use log::debug;
use solana_client::{rpc_client::RpcClient, rpc_config::RpcSimulateTransactionConfig};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey,
    transaction::Transaction,
};

use crate::{
    context::{ChainContext, ManagerHandle},
    error::AuthorityError,
};

/// Result of checking whether an account is an SPL multisig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultisigProbe {
    IsMultisig(MultisigInfo),
    /// Missing account, wrong owner or non-multisig layout.
    NotMultisig,
    /// The read itself failed; the account's nature is unknown.
    ProbeFailed(String),
}

/// Read-only view of the manager and token accounts.
pub trait ManagerStateReader {
    fn read_manager_version(&self) -> Result<String, AuthorityError>;

    fn read_manager_config(&self) -> Result<ManagerConfig, AuthorityError>;

    fn read_manager_paused(&self) -> Result<bool, AuthorityError> {
        Ok(self.read_manager_config()?.paused)
    }

    /// Current mint authority of `config.mint`, `None` if the supply is fixed.
    fn read_mint_authority(&self, config: &ManagerConfig)
        -> Result<Option<Pubkey>, AuthorityError>;

    fn probe_multisig(&self, account: &Pubkey) -> MultisigProbe;
}

impl<T: ManagerStateReader + ?Sized> ManagerStateReader for &T {
    fn read_manager_version(&self) -> Result<String, AuthorityError> {
        (**self).read_manager_version()
    }

    fn read_manager_config(&self) -> Result<ManagerConfig, AuthorityError> {
        (**self).read_manager_config()
    }

    fn read_manager_paused(&self) -> Result<bool, AuthorityError> {
        (**self).read_manager_paused()
    }

    fn read_mint_authority(
        &self,
        config: &ManagerConfig,
    ) -> Result<Option<Pubkey>, AuthorityError> {
        (**self).read_mint_authority(config)
    }

    fn probe_multisig(&self, account: &Pubkey) -> MultisigProbe {
        (**self).probe_multisig(account)
    }
}

/// Reads manager state over JSON-RPC. Nothing is cached between calls.
pub struct RpcManagerReader<'a> {
    client: &'a RpcClient,
    manager: ManagerHandle,
    payer: Pubkey,
    commitment: CommitmentConfig,
}

impl<'a> RpcManagerReader<'a> {
    /// `payer` funds the simulated `version` call and must exist on chain.
    pub fn new(context: &'a ChainContext, payer: Pubkey) -> Self {
        Self {
            client: &context.client,
            manager: context.manager,
            payer,
            commitment: context.commitment,
        }
    }

    fn fetch_account(&self, address: &Pubkey) -> Result<Account, AuthorityError> {
        self.client
            .get_account_with_commitment(address, self.commitment)?
            .value
            .ok_or(AuthorityError::AccountNotFound(*address))
    }
}

impl ManagerStateReader for RpcManagerReader<'_> {
    fn read_manager_version(&self) -> Result<String, AuthorityError> {
        let ix = instruction::version(&self.manager.program_id);
        let tx = Transaction::new_with_payer(&[ix], Some(&self.payer));
        let config = RpcSimulateTransactionConfig {
            sig_verify: false,
            replace_recent_blockhash: true,
            commitment: Some(self.commitment),
            ..RpcSimulateTransactionConfig::default()
        };

        let result = self.client.simulate_transaction_with_config(&tx, config)?.value;
        if let Some(err) = result.err {
            return Err(AuthorityError::VersionSimulation(format!("{err:?}")));
        }

        let return_data = result.return_data.ok_or(AuthorityError::MissingVersion)?;
        if return_data.program_id != self.manager.program_id.to_string() {
            return Err(AuthorityError::MissingVersion);
        }
        let (encoded, _) = return_data.data;
        let bytes = base64
            .decode(encoded)
            .map_err(|e| AuthorityError::Decode(e.to_string()))?;
        let version = String::deserialize(&mut bytes.as_slice())
            .map_err(|e| AuthorityError::Decode(e.to_string()))?;

        debug!("Manager {} reports version {}", self.manager.program_id, version);
        Ok(version)
    }

    fn read_manager_config(&self) -> Result<ManagerConfig, AuthorityError> {
        let program_id = self.manager.program_id;
        let address = pda::get_config(&program_id);
        let account = self.fetch_account(&address)?;
        if account.owner != program_id {
            return Err(AuthorityError::Decode(format!(
                "config account {address} is owned by {}, not the manager",
                account.owner
            )));
        }

        let config = ManagerConfig::decode(&program_id, &account.data)?;
        if config.mint != self.manager.token_mint {
            return Err(AuthorityError::MintMismatch {
                configured: self.manager.token_mint,
                on_chain: config.mint,
            });
        }
        Ok(config)
    }

    fn read_mint_authority(
        &self,
        config: &ManagerConfig,
    ) -> Result<Option<Pubkey>, AuthorityError> {
        let account = self.fetch_account(&config.mint)?;
        let token_program = config.token_program.program_id();
        if account.owner != token_program {
            return Err(AuthorityError::Decode(format!(
                "mint {} is owned by {}, expected {token_program}",
                config.mint, account.owner
            )));
        }
        Ok(decode_mint_authority(config.token_program, &account.data)?)
    }

    fn probe_multisig(&self, account: &Pubkey) -> MultisigProbe {
        match self
            .client
            .get_account_with_commitment(account, self.commitment)
        {
            Ok(response) => match response
                .value
                .and_then(|acc| decode_multisig(&acc.owner, &acc.data))
            {
                Some(info) => MultisigProbe::IsMultisig(info),
                None => MultisigProbe::NotMultisig,
            },
            Err(e) => MultisigProbe::ProbeFailed(e.to_string()),
        }
    }
}
