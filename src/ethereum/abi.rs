use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::{Function, JsonAbi, StateMutability},
    primitives::{Address, Bytes, U256},
};
use anyhow::{anyhow, Result};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Name of the contract entry point this tool drives.
pub const LIQUIDATE_VESSELS: &str = "liquidateVessels";

/// Minimal interface fragment used when the caller supplies no ABI of
/// their own. Declares only the entry point being invoked.
pub const MINIMAL_INTERFACE: &str = r#"[
  {
    "type": "function",
    "name": "liquidateVessels",
    "inputs": [
      { "name": "_asset", "type": "address" },
      { "name": "_n", "type": "uint256" }
    ],
    "outputs": [],
    "stateMutability": "nonpayable"
  }
]"#;

/// Parse a JSON ABI fragment from a string.
pub fn parse_interface(json: &str) -> Result<JsonAbi> {
    let abi: JsonAbi = serde_json::from_str(json)
        .map_err(|e| anyhow!("Failed to parse interface JSON: {}", e))?;
    Ok(abi)
}

/// Load a JSON ABI fragment from a file.
pub async fn load_interface<P: AsRef<Path>>(path: P) -> Result<JsonAbi> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("Failed to read interface file {:?}: {}", path, e))?;

    parse_interface(&content).map_err(|e| anyhow!("Interface file {:?}: {}", path, e))
}

/// Find `liquidateVessels` in the interface and check its shape: exactly
/// one `address` argument followed by one `uint256`, and state-mutating.
/// Runs before anything touches the network, so a mismatched interface
/// never results in a submission.
pub fn resolve_liquidation_fn(abi: &JsonAbi) -> Result<&Function> {
    let function = abi
        .functions()
        .find(|f| f.name == LIQUIDATE_VESSELS)
        .ok_or_else(|| {
            let available: Vec<String> = abi.functions().map(|f| f.name.clone()).collect();

            if available.is_empty() {
                anyhow!(
                    "Function '{}' not found. The interface contains no functions.",
                    LIQUIDATE_VESSELS
                )
            } else {
                anyhow!(
                    "Function '{}' not found in interface. Available functions: {}",
                    LIQUIDATE_VESSELS,
                    available.join(", ")
                )
            }
        })?;

    let declared: Vec<&str> = function.inputs.iter().map(|i| i.ty.as_str()).collect();
    if declared != ["address", "uint256"] {
        return Err(anyhow!(
            "Function '{}' has signature ({}), expected (address, uint256)",
            LIQUIDATE_VESSELS,
            declared.join(", ")
        ));
    }

    match function.state_mutability {
        StateMutability::Pure | StateMutability::View => Err(anyhow!(
            "Function '{}' is declared {} but a state-mutating call is required",
            LIQUIDATE_VESSELS,
            if function.state_mutability == StateMutability::Pure {
                "pure"
            } else {
                "view"
            }
        )),
        _ => Ok(function),
    }
}

/// ABI-encode the `(asset, vessel_count)` arguments for the resolved
/// function, selector included.
pub fn encode_call(function: &Function, asset: Address, vessel_count: U256) -> Result<Bytes> {
    let inputs = [
        DynSolValue::Address(asset),
        DynSolValue::Uint(vessel_count, 256),
    ];

    let encoded = function
        .abi_encode_input(&inputs)
        .map_err(|e| anyhow!("Failed to encode call arguments: {}", e))?;

    debug!("Encoded calldata: 0x{}", hex::encode(&encoded));
    Ok(encoded.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_minimal_interface_resolves() {
        let abi = parse_interface(MINIMAL_INTERFACE).unwrap();
        let function = resolve_liquidation_fn(&abi).unwrap();
        assert_eq!(function.name, LIQUIDATE_VESSELS);
        assert_eq!(function.inputs.len(), 2);
    }

    #[test]
    fn test_missing_function_is_rejected() {
        let abi = parse_interface(
            r#"[{"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"}]"#,
        )
        .unwrap();

        let err = resolve_liquidation_fn(&abi).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("transfer"));
    }

    #[test]
    fn test_empty_interface_is_rejected() {
        let abi = parse_interface("[]").unwrap();
        let err = resolve_liquidation_fn(&abi).unwrap_err();
        assert!(err.to_string().contains("no functions"));
    }

    #[test]
    fn test_wrong_argument_types_are_rejected() {
        let abi = parse_interface(
            r#"[{"type":"function","name":"liquidateVessels","inputs":[{"name":"_asset","type":"address"},{"name":"_n","type":"uint64"}],"outputs":[],"stateMutability":"nonpayable"}]"#,
        )
        .unwrap();

        let err = resolve_liquidation_fn(&abi).unwrap_err();
        assert!(err.to_string().contains("expected (address, uint256)"));
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let abi = parse_interface(
            r#"[{"type":"function","name":"liquidateVessels","inputs":[{"name":"_asset","type":"address"}],"outputs":[],"stateMutability":"nonpayable"}]"#,
        )
        .unwrap();

        assert!(resolve_liquidation_fn(&abi).is_err());
    }

    #[test]
    fn test_view_function_is_rejected() {
        let abi = parse_interface(
            r#"[{"type":"function","name":"liquidateVessels","inputs":[{"name":"_asset","type":"address"},{"name":"_n","type":"uint256"}],"outputs":[],"stateMutability":"view"}]"#,
        )
        .unwrap();

        let err = resolve_liquidation_fn(&abi).unwrap_err();
        assert!(err.to_string().contains("view"));
    }

    #[test]
    fn test_encode_call_produces_selector_prefixed_calldata() {
        let abi = parse_interface(MINIMAL_INTERFACE).unwrap();
        let function = resolve_liquidation_fn(&abi).unwrap();

        let asset = Address::from_str("0x321f90864fb21cdcddD0D67FE5e4Cbc812eC9e64").unwrap();
        let count = U256::from(100u64);

        let calldata = encode_call(function, asset, count).unwrap();
        assert_eq!(calldata.len(), 4 + 32 + 32);
        assert_eq!(&calldata[..4], function.selector().as_slice());

        let decoded = function.abi_decode_input(&calldata[4..], false).unwrap();
        assert_eq!(decoded[0], DynSolValue::Address(asset));
        assert_eq!(decoded[1], DynSolValue::Uint(count, 256));
    }

    #[tokio::test]
    async fn test_load_interface_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liquidate.json");
        tokio::fs::write(&path, MINIMAL_INTERFACE).await.unwrap();

        let abi = load_interface(&path).await.unwrap();
        assert!(resolve_liquidation_fn(&abi).is_ok());
    }

    #[tokio::test]
    async fn test_load_interface_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        assert!(load_interface(&path).await.is_err());
    }
}
