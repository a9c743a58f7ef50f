use anyhow::Result;
use clap::Parser;
use rs_block_data_fetcher::{
    chains::evm::{client::EvmClient, hashes::collect_last_hashes},
    cli::HashesCli,
    config::AppConfig,
    core::planner::HashRange,
    utils::logger::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = HashesCli::parse();
    let cfg = AppConfig::load(&args.config)?;

    init_logger(&cfg.logging);

    info!("✅ Configuration load successful");

    let range = HashRange::new(cfg.hashes.begin_block, cfg.hashes.number)?;
    let rpc_url = cfg.rpc.require_url()?;
    let client = EvmClient::new(rpc_url, cfg.rpc.timeout())?;

    let hashes = collect_last_hashes(&client, range, &cfg.hashes.output_path()).await?;

    info!("✨ Wrote {} hashes", hashes.len());
    Ok(())
}
