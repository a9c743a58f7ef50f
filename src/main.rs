use anyhow::Result;
use clap::Parser;
use rs_block_data_fetcher::{
    chains::evm::{etherscan::EtherscanClient, rewards::download_block_rewards},
    cli::RewardsCli,
    config::AppConfig,
    core::planner::RewardRange,
    utils::logger::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = RewardsCli::parse();
    let cfg = AppConfig::load(&args.config)?;

    // Initialize logger system
    init_logger(&cfg.logging);

    info!("✅ Configuration load successful");
    info!(from = args.from, to = args.to, "Block range");
    info!(directory = %args.directory.display(), filename = %args.filename(), "Output");
    info!(endpoint = %cfg.etherscan.endpoint_url, "Etherscan endpoint");

    // Everything is validated before the first request goes out
    let range = RewardRange::new(args.from, args.to, cfg.rewards.batch_size)?;
    let api_key = cfg.etherscan.require_api_key()?;
    let client = EtherscanClient::new(&cfg.etherscan.endpoint_url, api_key, cfg.etherscan.timeout())?;

    download_block_rewards(&client, range, &args.output_path()).await?;

    info!("✨ All done");
    Ok(())
}
