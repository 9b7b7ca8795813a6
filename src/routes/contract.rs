//! Contract call route handlers
//!
//! Mirrors the node API shape: public calls are submitted as transactions,
//! read-only calls are evaluated against current state.

use crate::client::LedgerClient;
use crate::contract::abi::FUNCTIONS;
use crate::error::{validation_error, ApiResult, AppError};
use crate::ledger::TxId;
use crate::models::{
    ContractCallRequest, ContractInterfaceResponse, ReadOnlyCallRequest, ReadOnlyResponse,
    ReceiptResponse, SuccessResponse, TxSubmittedResponse,
};
use crate::principal::Principal;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info};
use validator::Validate;

/// Describe the deployed contract and its callable functions
pub async fn get_interface(
    State(state): State<SharedState>,
) -> Json<SuccessResponse<ContractInterfaceResponse>> {
    let response = ContractInterfaceResponse {
        contract_id: state.contract.identifier(),
        block_height: state.ledger.block_height().await,
        quorum: state.contract.quorum,
        functions: FUNCTIONS,
    };
    Json(SuccessResponse::with_data("Contract interface", response))
}

/// Submit a state-mutating contract call
pub async fn call_public(
    State(state): State<SharedState>,
    Path(function): Path<String>,
    Json(payload): Json<ContractCallRequest>,
) -> ApiResult<Json<SuccessResponse<TxSubmittedResponse>>> {
    // Validate input
    payload.validate().map_err(|e| validation_error(e.to_string()))?;
    let sender = Principal::parse(payload.sender).map_err(|e| validation_error(e.to_string()))?;

    debug!("Submitting {} from {}", function, sender);
    let tx_id = state
        .ledger
        .submit(&function, payload.function_args, &sender)
        .await?;

    info!("📨 {} accepted as {}", function, tx_id);
    Ok(Json(SuccessResponse::with_data(
        format!("{} applied", function),
        TxSubmittedResponse {
            tx_id,
            function_name: function,
        },
    )))
}

/// Evaluate a read-only contract function
pub async fn call_read_only(
    State(state): State<SharedState>,
    Path(function): Path<String>,
    Json(payload): Json<ReadOnlyCallRequest>,
) -> ApiResult<Json<SuccessResponse<ReadOnlyResponse>>> {
    payload.validate().map_err(|e| validation_error(e.to_string()))?;

    let result = state.ledger.query(&function, payload.arguments).await?;
    Ok(Json(SuccessResponse::with_data(
        format!("{} evaluated", function),
        ReadOnlyResponse {
            function_name: function,
            result,
        },
    )))
}

/// Look up the receipt of an applied transaction
pub async fn get_transaction(
    State(state): State<SharedState>,
    Path(tx_id): Path<String>,
) -> ApiResult<Json<SuccessResponse<ReceiptResponse>>> {
    let not_found = || AppError::NotFound(format!("Transaction '{}' not found", tx_id));

    let id = TxId::parse(&tx_id).ok_or_else(not_found)?;
    let receipt = state.ledger.receipt(&id).await.ok_or_else(not_found)?;

    Ok(Json(SuccessResponse::with_data("Transaction found", ReceiptResponse { receipt })))
}
