use std::process;

use anyhow::Context;
use env_logger::Env;
use log::info;
use ntt_mint_authority::{
    cli::{Command, TopLevel},
    config::Settings,
    context::ChainContext,
    explorer::{address_link, transaction_link},
    keys::{load_keypair, load_keypairs},
    protocol::{AuthorityTransfer, ClaimTarget},
    reader::RpcManagerReader,
    submitter::RpcSubmitter,
};
use solana_sdk::signature::Signer;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: TopLevel = argh::from_env();
    if let Err(e) = run(args) {
        eprintln!("ntt-mint-authority: {e:#}");
        process::exit(1);
    }
}

fn run(args: TopLevel) -> anyhow::Result<()> {
    // Reject a bad address before touching the filesystem or network.
    let command = Command::try_from(args.cmd)?;

    let settings = Settings::load(args.config.as_deref())
        .context("loading settings")?
        .validate()
        .context("validating settings")?;

    let payer = load_keypair(&settings.payer_keypair_path)?;
    let additional_signers = load_keypairs(&settings.additional_signer_keypair_paths)?;
    println!("Loaded payer keypair: {}", payer.pubkey());
    if !additional_signers.is_empty() {
        println!("Loaded {} additional signer(s)", additional_signers.len());
    }

    let context = ChainContext::new(&settings);
    println!("NTT setup using config values:");
    println!("Token Mint: {}", context.manager.token_mint);
    println!("NTT Address: {}", context.manager.program_id);
    info!(
        "Network {:?}, cluster {:?} ({}), transceiver {}",
        context.network, context.cluster, context.rpc_url, context.manager.wormhole_transceiver
    );

    let reader = RpcManagerReader::new(&context, payer.pubkey());
    let submitter = RpcSubmitter::new(&context.client, context.commitment);
    let protocol = AuthorityTransfer::new(reader, submitter, &payer, &additional_signers)
        .with_quorum_policy(settings.quorum_policy)
        .with_expected_version(settings.version);

    match command {
        Command::Transfer { new_authority } => {
            let outcome = protocol.transfer(new_authority)?;
            println!(
                "Transaction: {}",
                transaction_link(outcome.signature, context.cluster, &context.rpc_url)
            );
            println!("Token authority transfer initiated to {}", outcome.new_authority);
            println!(
                "Run `ntt-mint-authority claim {}` to complete the transfer",
                outcome.new_authority
            );
        }
        Command::Claim { new_authority } => {
            let outcome = protocol.claim(new_authority)?;
            println!(
                "Transaction: {}",
                transaction_link(outcome.signature, context.cluster, &context.rpc_url)
            );
            if let ClaimTarget::Multisig { required, signers } = &outcome.target {
                println!(
                    "Claimed to multisig {} ({} of {} signers supplied)",
                    outcome.new_authority,
                    signers.len(),
                    required
                );
            }
            println!(
                "Token mint authority transferred to {}: {}",
                outcome.new_authority,
                address_link(outcome.mint, context.cluster, &context.rpc_url)
            );
        }
    }

    Ok(())
}
