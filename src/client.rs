//! Ledger client
//!
//! [`LedgerClient`] is the only way callers reach the contract: `submit` for
//! state-mutating functions, `query` for read-only ones.
//! [`LanguageContractClient`] wraps any client with one typed method per
//! contract function and validates arguments before they are submitted.

use crate::clarity::ClarityValue;
use crate::contract::ContentLimits;
use crate::error::{validation_error, ApiResult};
use crate::ledger::TxId;
use crate::principal::Principal;
use std::future::Future;
use tracing::debug;

pub trait LedgerClient: Send + Sync {
    /// Submit a state-mutating call and return its transaction id
    fn submit(
        &self,
        function: &str,
        args: Vec<ClarityValue>,
        sender: &Principal,
    ) -> impl Future<Output = ApiResult<TxId>> + Send;

    /// Evaluate a read-only function against current state
    fn query(
        &self,
        function: &str,
        args: Vec<ClarityValue>,
    ) -> impl Future<Output = ApiResult<ClarityValue>> + Send;
}

/// Typed calls to the language contract over a [`LedgerClient`]
pub struct LanguageContractClient<C> {
    client: C,
    limits: ContentLimits,
}

impl<C: LedgerClient> LanguageContractClient<C> {
    pub fn new(client: C, limits: ContentLimits) -> Self {
        Self { client, limits }
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    async fn submit(&self, function: &str, args: Vec<ClarityValue>, sender: &Principal) -> ApiResult<TxId> {
        debug!("Submitting {} from {}", function, sender);
        self.client.submit(function, args, sender).await
    }

    fn text(&self, value: &str, max_len: usize) -> ApiResult<ClarityValue> {
        Ok(ClarityValue::string_ascii(value, max_len)?)
    }

    pub async fn propose_word(&self, word: &str, definition: &str, sender: &Principal) -> ApiResult<TxId> {
        let args = vec![
            self.text(word, self.limits.word)?,
            self.text(definition, self.limits.definition)?,
        ];
        self.submit("propose-word", args, sender).await
    }

    pub async fn propose_grammatical_rule(&self, description: &str, sender: &Principal) -> ApiResult<TxId> {
        let args = vec![self.text(description, self.limits.description)?];
        self.submit("propose-grammatical-rule", args, sender).await
    }

    pub async fn propose_phonetic_change(&self, description: &str, sender: &Principal) -> ApiResult<TxId> {
        let args = vec![self.text(description, self.limits.description)?];
        self.submit("propose-phonetic-change", args, sender).await
    }

    pub async fn vote_word(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("vote-word", vec![ClarityValue::uint(id)], sender).await
    }

    pub async fn approve_word(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("approve-word", vec![ClarityValue::uint(id)], sender).await
    }

    pub async fn reject_word(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("reject-word", vec![ClarityValue::uint(id)], sender).await
    }

    pub async fn vote_grammatical_rule(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("vote-grammatical-rule", vec![ClarityValue::uint(id)], sender)
            .await
    }

    pub async fn approve_grammatical_rule(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("approve-grammatical-rule", vec![ClarityValue::uint(id)], sender)
            .await
    }

    pub async fn reject_grammatical_rule(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("reject-grammatical-rule", vec![ClarityValue::uint(id)], sender)
            .await
    }

    pub async fn vote_phonetic_change(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("vote-phonetic-change", vec![ClarityValue::uint(id)], sender)
            .await
    }

    pub async fn approve_phonetic_change(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("approve-phonetic-change", vec![ClarityValue::uint(id)], sender)
            .await
    }

    pub async fn reject_phonetic_change(&self, id: u64, sender: &Principal) -> ApiResult<TxId> {
        self.submit("reject-phonetic-change", vec![ClarityValue::uint(id)], sender)
            .await
    }

    pub async fn transfer_word_ownership(
        &self,
        word_id: u64,
        recipient: &Principal,
        percent: u64,
        sender: &Principal,
    ) -> ApiResult<TxId> {
        if percent == 0 || percent > 100 {
            return Err(validation_error(format!(
                "percent must be between 1 and 100, got {}",
                percent
            )));
        }
        let args = vec![
            ClarityValue::uint(word_id),
            ClarityValue::from(recipient.clone()),
            ClarityValue::uint(percent),
        ];
        self.submit("transfer-word-ownership", args, sender).await
    }

    pub async fn add_translation(
        &self,
        source: &str,
        target: &str,
        language: &str,
        sender: &Principal,
    ) -> ApiResult<TxId> {
        let args = vec![
            self.text(source, self.limits.term)?,
            self.text(target, self.limits.term)?,
            self.text(language, self.limits.language)?,
        ];
        self.submit("add-translation", args, sender).await
    }

    // =========================================================================
    // READ-ONLY
    // =========================================================================

    pub async fn get_word(&self, id: u64) -> ApiResult<Option<ClarityValue>> {
        let value = self.client.query("get-word", vec![ClarityValue::uint(id)]).await?;
        Ok(value.into_option())
    }

    pub async fn get_grammatical_rule(&self, id: u64) -> ApiResult<Option<ClarityValue>> {
        let value = self
            .client
            .query("get-grammatical-rule", vec![ClarityValue::uint(id)])
            .await?;
        Ok(value.into_option())
    }

    pub async fn get_phonetic_change(&self, id: u64) -> ApiResult<Option<ClarityValue>> {
        let value = self
            .client
            .query("get-phonetic-change", vec![ClarityValue::uint(id)])
            .await?;
        Ok(value.into_option())
    }

    /// Percentage of `word_id` held by `owner` (0 if none)
    pub async fn get_word_ownership(&self, word_id: u64, owner: &Principal) -> ApiResult<u64> {
        let value = self
            .client
            .query(
                "get-word-ownership",
                vec![ClarityValue::uint(word_id), ClarityValue::from(owner.clone())],
            )
            .await?;
        Ok(value
            .into_option()
            .and_then(|entry| entry.get("percentage").and_then(ClarityValue::as_uint))
            .unwrap_or(0))
    }

    pub async fn get_translation(&self, id: u64) -> ApiResult<Option<ClarityValue>> {
        let value = self
            .client
            .query("get-translation", vec![ClarityValue::uint(id)])
            .await?;
        Ok(value.into_option())
    }

    pub async fn get_user_score(&self, user: &Principal) -> ApiResult<u64> {
        let value = self
            .client
            .query("get-user-score", vec![ClarityValue::from(user.clone())])
            .await?;
        expect_uint("get-user-score", value)
    }

    pub async fn get_word_count(&self) -> ApiResult<u64> {
        let value = self.client.query("get-word-count", Vec::new()).await?;
        expect_uint("get-word-count", value)
    }

    pub async fn get_grammatical_rule_count(&self) -> ApiResult<u64> {
        let value = self.client.query("get-grammatical-rule-count", Vec::new()).await?;
        expect_uint("get-grammatical-rule-count", value)
    }

    pub async fn get_phonetic_change_count(&self) -> ApiResult<u64> {
        let value = self.client.query("get-phonetic-change-count", Vec::new()).await?;
        expect_uint("get-phonetic-change-count", value)
    }
}

fn expect_uint(function: &str, value: ClarityValue) -> ApiResult<u64> {
    value.as_uint().ok_or_else(|| {
        crate::error::AppError::Internal(format!(
            "{} returned {} instead of uint",
            function,
            value.type_name()
        ))
    })
}
