//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

use crate::clarity::ClarityValue;
use crate::contract::abi::FunctionSpec;
use crate::ledger::{TransactionReceipt, TxId};
use crate::principal::Principal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Generic success response
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Maximum number of arguments any contract function takes
const MAX_FUNCTION_ARGS: u64 = 8;

/// Request to submit a state-mutating contract call
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContractCallRequest {
    #[validate(custom(function = "validate_principal"))]
    pub sender: String,

    #[serde(default)]
    #[validate(length(max = MAX_FUNCTION_ARGS, message = "Too many function arguments"))]
    pub function_args: Vec<ClarityValue>,
}

/// Request to evaluate a read-only function
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReadOnlyCallRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_principal"))]
    pub sender: Option<String>,

    #[serde(default)]
    #[validate(length(max = MAX_FUNCTION_ARGS, message = "Too many function arguments"))]
    pub arguments: Vec<ClarityValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSubmittedResponse {
    pub tx_id: TxId,
    pub function_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOnlyResponse {
    pub function_name: String,
    pub result: ClarityValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInterfaceResponse {
    pub contract_id: String,
    pub block_height: u64,
    pub quorum: u64,
    pub functions: &'static [FunctionSpec],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub receipt: TransactionReceipt,
}

fn validate_principal(address: &str) -> Result<(), validator::ValidationError> {
    if Principal::parse(address).is_err() {
        let mut err = validator::ValidationError::new("invalid_principal");
        err.message = Some(format!("'{}' is not a valid standard principal", address).into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::fixtures::*;

    #[test]
    fn test_call_request_parses_node_api_shape() {
        let body = serde_json::json!({
            "sender": SENDER,
            "functionArgs": [
                { "type": "uint", "value": 1 },
                { "type": "principal", "address": RECIPIENT },
                { "type": "uint", "value": 50 }
            ]
        });
        let req: ContractCallRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.function_args.len(), 3);
    }

    #[test]
    fn test_invalid_sender_fails_validation() {
        let req = ContractCallRequest {
            sender: "alice".to_string(),
            function_args: vec![],
        };
        assert!(req.validate().is_err());

        let read = ReadOnlyCallRequest {
            sender: None,
            arguments: vec![],
        };
        assert!(read.validate().is_ok());
    }

    #[test]
    fn test_too_many_arguments() {
        let req = ContractCallRequest {
            sender: SENDER.to_string(),
            function_args: vec![ClarityValue::uint(1); 9],
        };
        assert!(req.validate().is_err());
    }
}
