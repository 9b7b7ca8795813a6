//! In-process ledger
//!
//! Applies contract calls one at a time, in submission order, the way a chain
//! executes transactions. Each applied call becomes a block with a receipt.
//! A call that aborts leaves state, height and receipts untouched.

use crate::clarity::ClarityValue;
use crate::client::LedgerClient;
use crate::contract::{ContractParams, LanguageContract, PublicCall, ReadOnlyCall, TxContext};
use crate::error::{ApiResult, AppError};
use crate::principal::Principal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Transaction id: `0x` followed by 64 lowercase hex digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix("0x")?;
        let valid = hex.len() == 64 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        valid.then(|| Self(s.to_string()))
    }

    fn derive(
        block_height: u64,
        function: &str,
        args: &[ClarityValue],
        sender: &Principal,
    ) -> Result<Self, AppError> {
        let encoded_args = serde_json::to_vec(args)
            .map_err(|e| AppError::Internal(format!("Failed to encode arguments: {}", e)))?;

        let mut hasher = Sha256::new();
        hasher.update(block_height.to_be_bytes());
        hasher.update(function.as_bytes());
        hasher.update(&encoded_args);
        hasher.update(sender.as_str().as_bytes());
        Ok(Self(format!("0x{:x}", hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record of an applied transaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_id: TxId,
    pub function_name: String,
    pub function_args: Vec<ClarityValue>,
    pub sender: Principal,
    pub block_height: u64,
    /// The call's `ok` value
    pub result: ClarityValue,
    pub applied_at: DateTime<Utc>,
}

struct LedgerState {
    contract: LanguageContract,
    block_height: u64,
    receipts: HashMap<TxId, TransactionReceipt>,
}

/// Thread-safe ledger holding a single contract instance
pub struct LocalLedger {
    state: RwLock<LedgerState>,
}

impl LocalLedger {
    pub fn new(params: ContractParams) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                contract: LanguageContract::new(params),
                block_height: 0,
                receipts: HashMap::new(),
            }),
        }
    }

    pub async fn block_height(&self) -> u64 {
        self.state.read().await.block_height
    }

    pub async fn receipt(&self, tx_id: &TxId) -> Option<TransactionReceipt> {
        self.state.read().await.receipts.get(tx_id).cloned()
    }

    /// Run `f` against the current contract state
    pub async fn inspect<R>(&self, f: impl FnOnce(&LanguageContract) -> R) -> R {
        let state = self.state.read().await;
        f(&state.contract)
    }
}

impl LedgerClient for LocalLedger {
    async fn submit(
        &self,
        function: &str,
        args: Vec<ClarityValue>,
        sender: &Principal,
    ) -> ApiResult<TxId> {
        let call = PublicCall::decode(function, &args)?;

        let mut state = self.state.write().await;
        let block_height = state.block_height + 1;
        let tx_id = TxId::derive(block_height, function, &args, sender)?;
        let ctx = TxContext {
            sender: sender.clone(),
            block_height,
        };

        let result = state.contract.execute(call, &ctx).map_err(|e| {
            warn!("⚠️  {} from {} aborted: {} (err u{})", function, sender, e, e.code());
            e
        })?;

        state.block_height = block_height;
        state.receipts.insert(
            tx_id.clone(),
            TransactionReceipt {
                tx_id: tx_id.clone(),
                function_name: function.to_string(),
                function_args: args,
                sender: sender.clone(),
                block_height,
                result,
                applied_at: Utc::now(),
            },
        );

        info!("⛓️  Block {}: {} from {} -> {}", block_height, function, sender, tx_id);
        Ok(tx_id)
    }

    async fn query(&self, function: &str, args: Vec<ClarityValue>) -> ApiResult<ClarityValue> {
        let call = ReadOnlyCall::decode(function, &args)?;
        debug!("Evaluating read-only {}", function);
        let state = self.state.read().await;
        Ok(state.contract.evaluate(&call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LanguageContractClient;
    use crate::contract::{ContentLimits, ContractError, ProposalKind, ProposalStatus};
    use crate::principal::fixtures::*;
    use pretty_assertions::assert_eq;

    fn ledger(quorum: u64) -> LocalLedger {
        LocalLedger::new(ContractParams {
            quorum,
            ..ContractParams::new(deployer())
        })
    }

    fn client(quorum: u64) -> LanguageContractClient<LocalLedger> {
        LanguageContractClient::new(ledger(quorum), ContentLimits::default())
    }

    #[tokio::test]
    async fn test_end_to_end_through_the_client() {
        let client = client(1);

        client
            .propose_word("newword", "definition of the new word", &sender())
            .await
            .unwrap();
        let word = client.get_word(1).await.unwrap().unwrap();
        assert_eq!(word.get("word").and_then(ClarityValue::as_str), Some("newword"));
        assert_eq!(word.get("status").and_then(ClarityValue::as_str), Some("proposed"));

        client.vote_word(1, &sender()).await.unwrap();
        client.approve_word(1, &sender()).await.unwrap();
        assert_eq!(client.get_word_ownership(1, &sender()).await.unwrap(), 100);

        client
            .transfer_word_ownership(1, &recipient(), 50, &sender())
            .await
            .unwrap();
        assert_eq!(client.get_word_ownership(1, &sender()).await.unwrap(), 50);
        assert_eq!(client.get_word_ownership(1, &recipient()).await.unwrap(), 50);
        assert_eq!(client.get_word_count().await.unwrap(), 1);
        assert_eq!(client.inner().block_height().await, 4);
    }

    #[tokio::test]
    async fn test_each_submission_gets_a_distinct_receipt() {
        let ledger = ledger(1);
        let args = vec![ClarityValue::string_ascii("New grammatical rule description", 500).unwrap()];

        let first = ledger
            .submit("propose-grammatical-rule", args.clone(), &sender())
            .await
            .unwrap();
        let second = ledger
            .submit("propose-grammatical-rule", args, &sender())
            .await
            .unwrap();
        assert_ne!(first, second);
        assert!(TxId::parse(first.as_str()).is_some());

        let receipt = ledger.receipt(&second).await.unwrap();
        assert_eq!(receipt.block_height, 2);
        assert_eq!(receipt.function_name, "propose-grammatical-rule");
        assert_eq!(receipt.result, ClarityValue::uint(2));
        assert_eq!(receipt.sender, sender());
    }

    #[tokio::test]
    async fn test_aborted_call_leaves_no_trace() {
        let ledger = ledger(2);
        let id = vec![ClarityValue::uint(1)];
        ledger
            .submit(
                "propose-phonetic-change",
                vec![ClarityValue::string_ascii("New phonetic change description", 500).unwrap()],
                &sender(),
            )
            .await
            .unwrap();
        ledger.submit("vote-phonetic-change", id.clone(), &sender()).await.unwrap();

        let err = ledger
            .submit("approve-phonetic-change", id.clone(), &sender())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Contract(ContractError::ThresholdNotMet { votes: 1, quorum: 2, .. })
        ));

        let err = ledger
            .submit("vote-phonetic-change", id, &sender())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Contract(ContractError::AlreadyVoted { .. })));

        assert_eq!(ledger.block_height().await, 2);
        let status = ledger
            .inspect(|c| c.proposal(ProposalKind::PhoneticChange, 1).map(|p| (p.status, p.votes)))
            .await;
        assert_eq!(status, Ok((ProposalStatus::Proposed, 1)));
    }

    #[tokio::test]
    async fn test_transfer_beyond_share_keeps_ownership() {
        let client = client(1);
        client.propose_word("mot", "word", &sender()).await.unwrap();
        client.vote_word(1, &recipient()).await.unwrap();
        client.approve_word(1, &recipient()).await.unwrap();
        client
            .transfer_word_ownership(1, &recipient(), 70, &sender())
            .await
            .unwrap();

        let err = client
            .transfer_word_ownership(1, &recipient(), 31, &sender())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Contract(ContractError::InsufficientShare { held: 30, requested: 31, .. })
        ));
        assert_eq!(client.get_word_ownership(1, &sender()).await.unwrap(), 30);
        assert_eq!(client.get_word_ownership(1, &recipient()).await.unwrap(), 70);
    }

    #[tokio::test]
    async fn test_wrong_access_and_unknown_functions() {
        let ledger = ledger(1);
        assert!(matches!(
            ledger.submit("get-word-count", vec![], &sender()).await,
            Err(AppError::UnknownFunction(_))
        ));
        assert!(matches!(
            ledger.query("propose-word", vec![]).await,
            Err(AppError::UnknownFunction(_))
        ));
        assert!(matches!(
            ledger.query("get-word", vec![]).await,
            Err(AppError::BadArguments(_))
        ));
        assert_eq!(ledger.block_height().await, 0);
    }

    #[tokio::test]
    async fn test_translations_and_scores() {
        let client = client(1);
        client
            .add_translation("source", "target", "language", &recipient())
            .await
            .unwrap();

        let translation = client.get_translation(1).await.unwrap().unwrap();
        assert_eq!(translation.get("target").and_then(ClarityValue::as_str), Some("target"));
        assert_eq!(client.get_translation(2).await.unwrap(), None);
        assert_eq!(client.get_user_score(&recipient()).await.unwrap(), 1);
        assert_eq!(client.get_user_score(&sender()).await.unwrap(), 0);
    }

    #[test]
    fn test_tx_id_format() {
        assert!(TxId::parse("0x").is_none());
        assert!(TxId::parse(&"a".repeat(66)).is_none());
        assert!(TxId::parse(&format!("0x{}", "F".repeat(64))).is_none());
        assert!(TxId::parse(&format!("0x{}", "0f".repeat(32))).is_some());
    }
}
