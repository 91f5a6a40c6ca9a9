use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    str::FromStr,
};

use common::version::ProtocolVersion;
use serde::Deserialize;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{error::ConfigError, protocol::QuorumPolicy};

/// Env var naming the settings file when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "NTT_AUTHORITY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "ntt-authority.toml";
pub const RPC_URL_ENV: &str = "NTT_AUTHORITY_RPC_URL";
pub const PAYER_ENV: &str = "NTT_AUTHORITY_PAYER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Confirmed,
    #[default]
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

fn default_chain() -> String {
    "Solana".to_string()
}

/// Settings deserialized from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to the payer keypair.
    pub payer_keypair_path: String,
    /// Paths to keypairs of additional signers of an SPL multisig. Empty entries are skipped.
    #[serde(default)]
    pub additional_signer_keypair_paths: Vec<String>,
    /// Wormhole network the manager is deployed on.
    pub network: Network,
    /// Solana cluster to use.
    pub cluster: Cluster,
    /// Overrides the cluster's public RPC endpoint.
    pub rpc_url: Option<String>,
    #[serde(default = "default_chain")]
    pub chain: String,
    /// Address of the deployed token mint.
    pub token_mint: String,
    /// Address of the deployed NTT manager.
    pub manager_program: String,
    /// Address of the deployed Wormhole transceiver.
    pub wormhole_transceiver: String,
    /// Deployed manager version.
    pub version: String,
    #[serde(default)]
    pub commitment: Commitment,
    #[serde(default)]
    pub quorum_policy: QuorumPolicy,
}

/// Settings with every address parsed and every path checked.
#[derive(Debug, Clone)]
pub struct ValidatedSettings {
    pub payer_keypair_path: PathBuf,
    pub additional_signer_keypair_paths: Vec<PathBuf>,
    pub network: Network,
    pub cluster: Cluster,
    pub rpc_url: String,
    pub token_mint: Pubkey,
    pub manager_program: Pubkey,
    pub wormhole_transceiver: Pubkey,
    pub version: ProtocolVersion,
    pub commitment: CommitmentConfig,
    pub quorum_policy: QuorumPolicy,
}

fn parse_address(field: &'static str, value: &str) -> Result<Pubkey, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyField(field));
    }
    Pubkey::from_str(value.trim()).map_err(|_| ConfigError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

impl Settings {
    /// Loads settings from `path`, falling back to `$NTT_AUTHORITY_CONFIG` and then
    /// `./ntt-authority.toml`. Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => std::env::var(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };
        let contents = read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let mut settings = Self::from_toml_str(&contents)?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(RPC_URL_ENV) {
            self.rpc_url = Some(url);
        }
        if let Some(payer) = lookup(PAYER_ENV) {
            self.payer_keypair_path = payer;
        }
    }

    pub fn validate(self) -> Result<ValidatedSettings, ConfigError> {
        if self.payer_keypair_path.trim().is_empty() {
            return Err(ConfigError::EmptyField("payer_keypair_path"));
        }
        if self.chain != "Solana" {
            return Err(ConfigError::UnsupportedChain(self.chain));
        }

        let token_mint = parse_address("token_mint", &self.token_mint)?;
        let manager_program = parse_address("manager_program", &self.manager_program)?;
        let wormhole_transceiver =
            parse_address("wormhole_transceiver", &self.wormhole_transceiver)?;

        let version =
            ProtocolVersion::from_str(&self.version).map_err(ConfigError::InvalidVersion)?;
        if !version.supports_two_step_authority() {
            return Err(ConfigError::UnsupportedVersion(version));
        }

        let rpc_url = match self.rpc_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => self.cluster.default_rpc_url().to_string(),
        };

        Ok(ValidatedSettings {
            payer_keypair_path: PathBuf::from(self.payer_keypair_path),
            additional_signer_keypair_paths: self
                .additional_signer_keypair_paths
                .into_iter()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .collect(),
            network: self.network,
            cluster: self.cluster,
            rpc_url,
            token_mint,
            manager_program,
            wormhole_transceiver,
            version,
            commitment: self.commitment.into(),
            quorum_policy: self.quorum_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
payer_keypair_path = "../temp.json"
additional_signer_keypair_paths = [""]
network = "Testnet"
cluster = "devnet"
token_mint = "xuFfVG99eGnsGUJyjPiLLyQFmXt7C1URExUXt4NPW4i"
manager_program = "8y2hh2wGnagy8wc8Fe8xsjUtLSHnzFbiPmFNrext4jHm"
wormhole_transceiver = "z95km6PpYxapTPmTF5costpc7y1J7ZqTSBqggETZcmn"
version = "3.0.0"
"#;

    #[test]
    fn test_sample_settings_validate() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap().validate().unwrap();

        assert_eq!(settings.payer_keypair_path, PathBuf::from("../temp.json"));
        assert!(settings.additional_signer_keypair_paths.is_empty());
        assert_eq!(settings.network, Network::Testnet);
        assert_eq!(settings.cluster, Cluster::Devnet);
        assert_eq!(settings.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(settings.version, ProtocolVersion::new(3, 0, 0));
        assert_eq!(settings.commitment, CommitmentConfig::finalized());
        assert_eq!(settings.quorum_policy, QuorumPolicy::Warn);
    }

    #[test]
    fn test_overrides() {
        let mut settings = Settings::from_toml_str(SAMPLE).unwrap();
        settings.apply_overrides(|key| match key {
            RPC_URL_ENV => Some("http://localhost:8899".to_string()),
            PAYER_ENV => Some("/keys/payer.json".to_string()),
            _ => None,
        });
        let settings = settings.validate().unwrap();

        assert_eq!(settings.rpc_url, "http://localhost:8899");
        assert_eq!(settings.payer_keypair_path, PathBuf::from("/keys/payer.json"));
    }

    #[test]
    fn test_invalid_address_names_field() {
        let contents = SAMPLE.replace(
            "8y2hh2wGnagy8wc8Fe8xsjUtLSHnzFbiPmFNrext4jHm",
            "not-an-address",
        );
        let err = Settings::from_toml_str(&contents)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidAddress {
                field: "manager_program",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_payer_rejected() {
        let contents = SAMPLE.replace("../temp.json", "");
        let err = Settings::from_toml_str(&contents)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField("payer_keypair_path")));
    }

    #[test]
    fn test_old_configured_version_rejected() {
        let contents = SAMPLE.replace("3.0.0", "2.0.0");
        let err = Settings::from_toml_str(&contents)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion(_)));
    }

    #[test]
    fn test_strict_quorum_and_confirmed_commitment() {
        let contents = format!("{SAMPLE}commitment = \"confirmed\"\nquorum_policy = \"abort\"\n");
        let settings = Settings::from_toml_str(&contents).unwrap().validate().unwrap();
        assert_eq!(settings.commitment, CommitmentConfig::confirmed());
        assert_eq!(settings.quorum_policy, QuorumPolicy::Abort);
    }

    #[test]
    fn test_unknown_chain_rejected() {
        let contents = format!("{SAMPLE}chain = \"Ethereum\"\n");
        let err = Settings::from_toml_str(&contents)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedChain(_)));
    }

    #[test]
    fn test_example_file_parses() {
        let example = include_str!("../ntt-authority.example.toml");
        let settings = Settings::from_toml_str(example).unwrap().validate().unwrap();
        assert_eq!(settings.cluster, Cluster::Devnet);
        assert!(settings.additional_signer_keypair_paths.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
