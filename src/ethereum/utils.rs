use alloy::primitives::{Address, U256};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Validates and normalizes an Ethereum address
pub fn validate_address(address: &str) -> Result<Address> {
    let address = address.trim();

    if address.is_empty() {
        return Err(anyhow!("Address cannot be empty"));
    }

    if !address.starts_with("0x") && !address.starts_with("0X") {
        return Err(anyhow!(
            "Invalid address format: '{}'. Ethereum addresses must start with '0x'",
            address
        ));
    }

    if address.len() != 42 {
        return Err(anyhow!(
            "Invalid address length: '{}'. Ethereum addresses must be exactly 42 characters (0x + 40 hex characters)",
            address
        ));
    }

    let hex_part = &address[2..];
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!(
            "Invalid address format: '{}'. Contains non-hexadecimal characters",
            address
        ));
    }

    Address::from_str(address)
        .map_err(|e| anyhow!("Invalid Ethereum address: '{}'. Error: {}", address, e))
}

/// Parses an unsigned integer from decimal or '0x' prefixed hex notation.
/// Carried as U256 so counts beyond native 64-bit range stay exact.
pub fn parse_uint256(value_str: &str) -> Result<U256> {
    let value_str = value_str.trim();

    if value_str.is_empty() {
        return Err(anyhow!("Value cannot be empty"));
    }

    let value = if value_str.starts_with("0x") || value_str.starts_with("0X") {
        U256::from_str_radix(&value_str[2..], 16)
            .map_err(|_| anyhow!("Invalid hexadecimal value: '{}'", value_str))?
    } else {
        U256::from_str(value_str).map_err(|_| {
            anyhow!(
                "Invalid numeric value: '{}'. Use decimal format or '0x' prefixed hex",
                value_str
            )
        })?
    };

    Ok(value)
}

/// Creates operator-friendly messages for common RPC errors. Display
/// only: the invoker propagates the underlying error untouched, and the
/// CLI runs failures through this before printing them.
pub fn interpret_rpc_error(error: &str) -> String {
    if error.contains("execution reverted") {
        "Transaction failed: the contract reverted execution. This usually means the liquidation's requirements were not met.".to_string()
    } else if error.contains("insufficient funds") {
        "Transaction failed: insufficient funds to cover gas costs. Make sure the signing account has enough balance for gas fees.".to_string()
    } else if error.contains("gas required exceeds allowance") {
        "Transaction failed: gas limit too low. Try increasing --gas-limit for this call.".to_string()
    } else if error.contains("nonce too low") {
        "Transaction failed: nonce too low. Another transaction from this account was likely mined with the same nonce.".to_string()
    } else if error.contains("replacement transaction underpriced") {
        "Transaction failed: gas price too low to replace a pending transaction. Increase the fee settings.".to_string()
    } else if error.contains("connection refused") || error.contains("network unreachable") {
        "Network error: cannot connect to the RPC endpoint. Check your connection and RPC URL configuration.".to_string()
    } else if error.contains("timeout") {
        "Network error: request timed out. The RPC endpoint may be overloaded or unreachable."
            .to_string()
    } else if error.contains("rate limit") {
        "Rate limit error: too many requests to the RPC endpoint. Try again shortly or use a different endpoint.".to_string()
    } else {
        format!("RPC error: {}", error)
    }
}
