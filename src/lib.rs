pub mod config;
pub mod ethereum;

pub use config::Config;
pub use ethereum::{
    liquidator::{liquidate_vessels, LiquidationCall},
    provider::Connection,
    LiquidationSummary, TxOptions, DEFAULT_GAS_LIMIT,
};
