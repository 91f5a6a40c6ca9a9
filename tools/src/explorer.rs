use std::fmt::Display;

use crate::config::Cluster;

const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

fn cluster_query(cluster: Cluster, rpc_url: &str) -> String {
    match cluster {
        Cluster::MainnetBeta => String::new(),
        Cluster::Devnet => "?cluster=devnet".to_string(),
        Cluster::Testnet => "?cluster=testnet".to_string(),
        Cluster::Localnet => format!("?cluster=custom&customUrl={}", encode_component(rpc_url)),
    }
}

// Percent-encodes everything outside the unreserved set.
fn encode_component(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

pub fn transaction_link(signature: impl Display, cluster: Cluster, rpc_url: &str) -> String {
    format!(
        "{EXPLORER_BASE_URL}/tx/{signature}{}",
        cluster_query(cluster, rpc_url)
    )
}

pub fn address_link(address: impl Display, cluster: Cluster, rpc_url: &str) -> String {
    format!(
        "{EXPLORER_BASE_URL}/address/{address}{}",
        cluster_query(cluster, rpc_url)
    )
}
