pub mod abi;
pub mod liquidator;
pub mod provider;
pub mod utils;

use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use serde::{Deserialize, Serialize};

/// Gas limit applied when the caller supplies no override.
pub const DEFAULT_GAS_LIMIT: u64 = 3_000_000;

/// Per-invocation transaction overrides. Every field is optional; the
/// only built-in default is the gas limit. Caller-supplied fields take
/// precedence over the default, and fee-market fields are forwarded to
/// the transaction unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxOptions {
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

impl TxOptions {
    pub fn effective_gas_limit(&self) -> u64 {
        self.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT)
    }

    /// Apply the effective options to a transaction request.
    pub fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        tx = tx.with_gas_limit(self.effective_gas_limit());

        if let Some(gas_price) = self.gas_price {
            tx = tx.with_gas_price(gas_price);
        }
        if let Some(max_fee) = self.max_fee_per_gas {
            tx = tx.with_max_fee_per_gas(max_fee);
        }
        if let Some(priority_fee) = self.max_priority_fee_per_gas {
            tx = tx.with_max_priority_fee_per_gas(priority_fee);
        }

        tx
    }
}

/// Operator-facing view of a confirmed liquidation. The receipt itself
/// is returned to callers unmodified; this is only a display shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidationSummary {
    pub transaction_hash: String,
    pub from: String,
    pub to: Option<String>,
    pub block_number: u64,
    pub gas_used: u64,
    pub effective_gas_price: String,
    pub status: bool,
}

impl From<&TransactionReceipt> for LiquidationSummary {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: format!("0x{:x}", receipt.transaction_hash),
            from: format!("0x{:x}", receipt.from),
            to: receipt.to.map(|to| format!("0x{:x}", to)),
            block_number: receipt.block_number.unwrap_or_default(),
            gas_used: receipt.gas_used() as u64,
            effective_gas_price: receipt.effective_gas_price.to_string(),
            status: receipt.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gas_limit_applies_when_absent() {
        let opts = TxOptions::default();
        assert_eq!(opts.effective_gas_limit(), 3_000_000);

        let tx = opts.apply(TransactionRequest::default());
        assert_eq!(tx.gas, Some(3_000_000));
        assert_eq!(tx.gas_price, None);
        assert_eq!(tx.max_fee_per_gas, None);
        assert_eq!(tx.max_priority_fee_per_gas, None);
    }

    #[test]
    fn test_supplied_gas_limit_overrides_default() {
        let opts = TxOptions {
            gas_limit: Some(15_000_000),
            ..Default::default()
        };
        assert_eq!(opts.effective_gas_limit(), 15_000_000);

        let tx = opts.apply(TransactionRequest::default());
        assert_eq!(tx.gas, Some(15_000_000));
    }

    #[test]
    fn test_fee_market_fields_pass_through_alongside_gas_limit() {
        let opts = TxOptions {
            gas_limit: None,
            gas_price: None,
            max_fee_per_gas: Some(8_148),
            max_priority_fee_per_gas: Some(8_148),
        };

        let tx = opts.apply(TransactionRequest::default());
        assert_eq!(tx.gas, Some(3_000_000));
        assert_eq!(tx.max_fee_per_gas, Some(8_148));
        assert_eq!(tx.max_priority_fee_per_gas, Some(8_148));
    }

    #[test]
    fn test_legacy_gas_price_pass_through() {
        let opts = TxOptions {
            gas_limit: Some(500_000),
            gas_price: Some(1_000_000_000),
            ..Default::default()
        };

        let tx = opts.apply(TransactionRequest::default());
        assert_eq!(tx.gas, Some(500_000));
        assert_eq!(tx.gas_price, Some(1_000_000_000));
    }
}
