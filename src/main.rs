use anyhow::{anyhow, Result};
use clap::{Arg, Command};
use tracing::{debug, error, info};

use vessel_liquidator::config::Config;
use vessel_liquidator::ethereum::{
    abi,
    liquidator::{liquidate_vessels, LiquidationCall},
    provider::{parse_signer, Connection},
    utils, LiquidationSummary, TxOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Local .env files are how the signing key is kept out of source.
    dotenvy::dotenv().ok();

    let matches = Command::new("vessel-liquidator")
        .version("0.1.0")
        .about("Submits a liquidateVessels transaction and waits for it to be mined")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file"),
        )
        .arg(
            Arg::new("network")
                .short('n')
                .long("network")
                .value_name("NETWORK")
                .help("Network to use (botanix, sepolia, or any configured network)"),
        )
        .arg(
            Arg::new("rpc-url")
                .short('r')
                .long("rpc-url")
                .value_name("URL")
                .help("RPC endpoint URL (overrides the selected network's endpoint)"),
        )
        .arg(
            Arg::new("contract")
                .long("contract")
                .value_name("ADDRESS")
                .help("Address of the contract exposing liquidateVessels"),
        )
        .arg(
            Arg::new("abi")
                .long("abi")
                .value_name("FILE")
                .help("Path to a JSON ABI declaring liquidateVessels (built-in fragment used if absent)"),
        )
        .arg(
            Arg::new("asset")
                .long("asset")
                .value_name("ADDRESS")
                .help("Asset address passed as the first call argument"),
        )
        .arg(
            Arg::new("vessels")
                .long("vessels")
                .value_name("COUNT")
                .help("Number of vessels to liquidate (decimal or 0x hex, any magnitude)"),
        )
        .arg(
            Arg::new("gas-limit")
                .long("gas-limit")
                .value_name("GAS")
                .help("Gas limit override (default 3000000)"),
        )
        .arg(
            Arg::new("gas-price")
                .long("gas-price")
                .value_name("WEI")
                .help("Legacy gas price in wei"),
        )
        .arg(
            Arg::new("max-fee-per-gas")
                .long("max-fee-per-gas")
                .value_name("WEI")
                .help("EIP-1559 max fee per gas in wei"),
        )
        .arg(
            Arg::new("max-priority-fee-per-gas")
                .long("max-priority-fee-per-gas")
                .value_name("WEI")
                .help("EIP-1559 max priority fee per gas in wei"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .help("Generate a sample configuration file and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-path")
                .long("config-path")
                .help("Print the default configuration file path and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("generate-config") {
        println!("{}", Config::generate_sample());
        return Ok(());
    }

    if matches.get_flag("config-path") {
        let path = Config::default_config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let config = Config::load_or_default(config_path).await;

    let network = matches.get_one::<String>("network").map(|s| s.as_str());
    let network_config = config.network(network)?;

    let rpc_url = matches
        .get_one::<String>("rpc-url")
        .map(|s| s.as_str())
        .unwrap_or(&network_config.rpc_url);

    let contract = matches
        .get_one::<String>("contract")
        .or(config.contract.address.as_ref())
        .ok_or_else(|| anyhow!("No contract address given. Pass --contract or set [contract] address in the config file"))?;

    let asset = matches
        .get_one::<String>("asset")
        .ok_or_else(|| anyhow!("Missing required --asset address"))?;

    let vessels = matches
        .get_one::<String>("vessels")
        .ok_or_else(|| anyhow!("Missing required --vessels count"))?;

    let call = LiquidationCall::parse(contract, asset, vessels)?;

    // Network gas defaults seed the options; explicit flags win.
    let mut opts: TxOptions = network_config.gas.tx_options();
    if let Some(gas_limit) = matches.get_one::<String>("gas-limit") {
        opts.gas_limit = Some(parse_flag("gas-limit", gas_limit)?);
    }
    if let Some(gas_price) = matches.get_one::<String>("gas-price") {
        opts.gas_price = Some(parse_flag("gas-price", gas_price)?);
    }
    if let Some(max_fee) = matches.get_one::<String>("max-fee-per-gas") {
        opts.max_fee_per_gas = Some(parse_flag("max-fee-per-gas", max_fee)?);
    }
    if let Some(priority_fee) = matches.get_one::<String>("max-priority-fee-per-gas") {
        opts.max_priority_fee_per_gas = Some(parse_flag("max-priority-fee-per-gas", priority_fee)?);
    }

    let private_key = std::env::var("PRIVATE_KEY")
        .map_err(|_| anyhow!("PRIVATE_KEY environment variable is not set"))?;
    let signer = parse_signer(&private_key)?;

    let interface = match matches
        .get_one::<String>("abi")
        .or(config.contract.abi_path.as_ref())
    {
        Some(path) => abi::load_interface(path).await?,
        None => abi::parse_interface(abi::MINIMAL_INTERFACE)?,
    };

    let conn = Connection::new(rpc_url)?;
    conn.check().await?;
    debug!("Chain id: {}", conn.chain_id().await?);

    info!("Liquidating on network '{}' via {}", network.unwrap_or(&config.default_network), rpc_url);

    match liquidate_vessels(&conn, signer, &interface, &call, &opts).await {
        Ok(receipt) => {
            let summary = LiquidationSummary::from(&receipt);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(e) => {
            error!("{}", utils::interpret_rpc_error(&e.to_string()));
            Err(e)
        }
    }
}

fn parse_flag<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid value for --{}: '{}'", name, value))
}
