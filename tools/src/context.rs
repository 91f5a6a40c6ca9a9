use solana_client::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::config::{Cluster, Network, ValidatedSettings};

/// Addresses of the NTT deployment the tool operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerHandle {
    pub program_id: Pubkey,
    pub token_mint: Pubkey,
    pub wormhole_transceiver: Pubkey,
}

/// RPC connection plus the deployment it points at.
pub struct ChainContext {
    pub client: RpcClient,
    pub manager: ManagerHandle,
    pub network: Network,
    pub cluster: Cluster,
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
}

impl ChainContext {
    pub fn new(settings: &ValidatedSettings) -> Self {
        Self {
            client: RpcClient::new_with_commitment(settings.rpc_url.clone(), settings.commitment),
            manager: ManagerHandle {
                program_id: settings.manager_program,
                token_mint: settings.token_mint,
                wormhole_transceiver: settings.wormhole_transceiver,
            },
            network: settings.network,
            cluster: settings.cluster,
            rpc_url: settings.rpc_url.clone(),
            commitment: settings.commitment,
        }
    }
}
