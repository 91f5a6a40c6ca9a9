use log::info;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    rpc_client::RpcClient,
    rpc_request::RpcError,
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::error::SubmitError;

/// Wraps instructions in a transaction, signs, broadcasts and waits for confirmation.
///
/// The first signer pays the fees.
pub trait TransactionSubmitter {
    fn submit_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature, SubmitError>;
}

impl<T: TransactionSubmitter + ?Sized> TransactionSubmitter for &T {
    fn submit_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature, SubmitError> {
        (**self).submit_and_confirm(instructions, signers)
    }
}

pub struct RpcSubmitter<'a> {
    client: &'a RpcClient,
    commitment: CommitmentConfig,
}

impl<'a> RpcSubmitter<'a> {
    pub fn new(client: &'a RpcClient, commitment: CommitmentConfig) -> Self {
        Self { client, commitment }
    }
}

impl TransactionSubmitter for RpcSubmitter<'_> {
    fn submit_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature, SubmitError> {
        let payer = signers
            .first()
            .ok_or_else(|| SubmitError::Signing("no fee payer supplied".to_string()))?;
        let blockhash = self
            .client
            .get_latest_blockhash()
            .map_err(|e| SubmitError::Rpc(e.to_string()))?;

        let mut tx = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
        tx.try_sign(signers, blockhash)
            .map_err(|e| SubmitError::Signing(e.to_string()))?;
        let signature = tx.signatures[0];

        info!(
            "Sending transaction {} ({} signer(s), commitment {:?})",
            signature,
            signers.len(),
            self.commitment.commitment
        );
        self.client
            .send_and_confirm_transaction_with_spinner_and_commitment(&tx, self.commitment)
            .map_err(|e| classify_send_error(signature, e))
    }
}

const UNCONFIRMED_PREFIX: &str = "unable to confirm transaction";

fn classify_send_error(signature: Signature, err: ClientError) -> SubmitError {
    if let Some(tx_err) = err.get_transaction_error() {
        return SubmitError::Rejected {
            signature,
            reason: tx_err.to_string(),
        };
    }
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::ForUser(message))
            if message.starts_with(UNCONFIRMED_PREFIX) =>
        {
            SubmitError::ConfirmationTimeout { signature }
        }
        _ => SubmitError::Rpc(err.to_string()),
    }
}
