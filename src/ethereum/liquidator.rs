use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
};
use anyhow::Result;
use tracing::{error, info};

use super::{abi, provider::Connection, utils, TxOptions};

/// One liquidation invocation: the target contract plus the two call
/// arguments. Built fresh per call, never stored.
#[derive(Debug, Clone)]
pub struct LiquidationCall {
    pub contract: Address,
    pub asset: Address,
    pub vessel_count: U256,
}

impl LiquidationCall {
    pub fn new(contract: Address, asset: Address, vessel_count: U256) -> Self {
        Self {
            contract,
            asset,
            vessel_count,
        }
    }

    /// Build a call from string inputs: hex addresses and a decimal or
    /// '0x' hex vessel count (any magnitude up to 256 bits).
    pub fn parse(contract: &str, asset: &str, vessel_count: &str) -> Result<Self> {
        Ok(Self {
            contract: utils::validate_address(contract)?,
            asset: utils::validate_address(asset)?,
            vessel_count: utils::parse_uint256(vessel_count)?,
        })
    }
}

/// Submit a signed `liquidateVessels` transaction and wait for it to be
/// mined.
///
/// The interface is checked for the expected `(address, uint256)` entry
/// point before anything is sent, the caller's options are merged over
/// the default gas limit, and the receipt is returned exactly as the
/// network produced it. Failures are logged and re-signaled unchanged;
/// retry or fallback is the caller's decision.
pub async fn liquidate_vessels(
    conn: &Connection,
    signer: PrivateKeySigner,
    interface: &JsonAbi,
    call: &LiquidationCall,
    opts: &TxOptions,
) -> Result<TransactionReceipt> {
    // Interface mismatch must surface before any network submission.
    let function = abi::resolve_liquidation_fn(interface)?;
    let calldata = abi::encode_call(function, call.asset, call.vessel_count)?;

    let from = signer.address();
    let provider = conn.signer_provider(signer)?;

    let tx = TransactionRequest::default()
        .to(call.contract)
        .input(calldata.into());
    let tx = opts.apply(tx);

    info!(
        "Calling {} on {:?} with asset {:?} and count {} from {:?} (gas limit {})",
        abi::LIQUIDATE_VESSELS,
        call.contract,
        call.asset,
        call.vessel_count,
        from,
        opts.effective_gas_limit()
    );

    let pending = provider.send_transaction(tx).await.map_err(|e| {
        error!("Failed to submit liquidation transaction: {}", e);
        e
    })?;

    info!("Transaction hash: {:?}", pending.tx_hash());

    let receipt = pending.get_receipt().await.map_err(|e| {
        error!("Liquidation transaction confirmation failed: {}", e);
        e
    })?;

    info!(
        "Transaction confirmed in block {}",
        receipt.block_number.unwrap_or_default()
    );

    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethereum::provider::parse_signer;

    const CONTRACT: &str = "0xd4B76b6e5E56F1DAD86c96D275831dEfdB9473c1";
    const ASSET: &str = "0x321f90864fb21cdcddD0D67FE5e4Cbc812eC9e64";
    const TEST_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe512961708279feb1be6ae5538da033";

    #[test]
    fn test_parse_call() {
        let call = LiquidationCall::parse(CONTRACT, ASSET, "100").unwrap();
        assert_eq!(call.vessel_count, U256::from(100u64));
        assert_eq!(format!("{:?}", call.contract).to_lowercase(), CONTRACT.to_lowercase());
    }

    #[test]
    fn test_parse_call_rejects_bad_inputs() {
        assert!(LiquidationCall::parse("0x123", ASSET, "100").is_err());
        assert!(LiquidationCall::parse(CONTRACT, "nope", "100").is_err());
        assert!(LiquidationCall::parse(CONTRACT, ASSET, "many").is_err());
    }

    #[tokio::test]
    async fn test_interface_mismatch_fails_before_submission() {
        // Interface without the entry point: the call must fail during
        // resolution, so the unreachable endpoint is never contacted.
        let conn = Connection::new("http://127.0.0.1:9").unwrap();
        let signer = parse_signer(TEST_KEY).unwrap();
        let interface = abi::parse_interface("[]").unwrap();
        let call = LiquidationCall::parse(CONTRACT, ASSET, "100").unwrap();

        let err = liquidate_vessels(&conn, signer, &interface, &call, &TxOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no functions"));
    }
}
