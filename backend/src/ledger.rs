//! Game result submission
//!
//! Finished games against the AI are forwarded to an external relay that
//! records them. The relay is a collaborator: this module only packages the
//! result and reports back what happened. Submission never fails with an
//! error; every outcome is a [`SubmissionReceipt`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::deadline::with_deadline;

pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Human,
    Ai,
    Draw,
}

impl Winner {
    pub fn as_str(self) -> &'static str {
        match self {
            Winner::Human => "human",
            Winner::Ai => "ai",
            Winner::Draw => "draw",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Winner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Winner::Human),
            "ai" => Ok(Winner::Ai),
            "draw" => Ok(Winner::Draw),
            other => Err(format!("Unknown winner: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_id: String,
    pub human_address: String,
    pub winner: Winner,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl SubmissionReceipt {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            tx_hash: None,
        }
    }

    pub fn recorded(tx_hash: String) -> Self {
        Self {
            success: true,
            message: format!("Result recorded. Tx: {tx_hash}"),
            tx_hash: Some(tx_hash),
        }
    }
}

/// Somewhere finished games are recorded
#[async_trait]
pub trait ResultLedger: Send + Sync {
    async fn submit(&self, result: &GameResult) -> SubmissionReceipt;
}

/// Ledger used when no relay is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredLedger;

#[async_trait]
impl ResultLedger for UnconfiguredLedger {
    async fn submit(&self, result: &GameResult) -> SubmissionReceipt {
        warn!("[LEDGER] No relay configured, dropping result for {}", result.game_id);
        SubmissionReceipt::failed("Ledger not configured.")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayReply {
    tx_hash: String,
}

/// Ledger that posts results to an HTTP relay
pub struct HttpLedger {
    client: reqwest::Client,
    url: String,
    deadline: Duration,
}

impl HttpLedger {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            deadline: DEFAULT_RELAY_TIMEOUT,
        }
    }

    /// Give up on the relay after `deadline`
    pub fn with_timeout(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    async fn post(&self, result: &GameResult) -> Result<String, reqwest::Error> {
        let reply: RelayReply = self
            .client
            .post(&self.url)
            .json(result)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(reply.tx_hash)
    }
}

#[async_trait]
impl ResultLedger for HttpLedger {
    async fn submit(&self, result: &GameResult) -> SubmissionReceipt {
        match with_deadline(self.deadline, self.post(result)).await {
            Some(Ok(tx_hash)) => {
                info!("[LEDGER] Recorded {}: {}", result.game_id, tx_hash);
                SubmissionReceipt::recorded(tx_hash)
            }
            Some(Err(e)) => {
                warn!("[LEDGER] Submission of {} failed: {}", result.game_id, e);
                SubmissionReceipt::failed(format!("Error: {e}"))
            }
            None => {
                warn!("[LEDGER] Relay timeout after {:?} for {}", self.deadline, result.game_id);
                SubmissionReceipt::failed("Error: relay timed out")
            }
        }
    }
}

/// Pick the ledger for an optional relay URL
pub fn ledger_for(url: Option<&str>) -> Arc<dyn ResultLedger> {
    match url {
        Some(url) => {
            info!("[LEDGER] Relay: {}", url);
            Arc::new(HttpLedger::new(url))
        }
        None => Arc::new(UnconfiguredLedger),
    }
}

/// Submit a finished game
///
/// Wins by the human are submitted by the client itself, so the ledger is
/// not contacted for them.
pub async fn submit_game_result(ledger: &dyn ResultLedger, result: &GameResult) -> SubmissionReceipt {
    if result.winner == Winner::Human {
        info!("[LEDGER] Human won {}, leaving submission to the client", result.game_id);
        return SubmissionReceipt::failed("Human won; frontend submits.");
    }
    ledger.submit(result).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLedger(AtomicUsize);

    #[async_trait]
    impl ResultLedger for CountingLedger {
        async fn submit(&self, _result: &GameResult) -> SubmissionReceipt {
            self.0.fetch_add(1, Ordering::SeqCst);
            SubmissionReceipt::recorded("0xabc".to_string())
        }
    }

    fn result(winner: Winner) -> GameResult {
        GameResult {
            game_id: "game-1".to_string(),
            human_address: "0x1234".to_string(),
            winner,
            signature: "0xsig".to_string(),
        }
    }

    #[test]
    fn test_winner_parsing() {
        assert_eq!("ai".parse::<Winner>().unwrap(), Winner::Ai);
        assert_eq!("Draw".parse::<Winner>().unwrap(), Winner::Draw);
        assert!("nobody".parse::<Winner>().is_err());
    }

    #[tokio::test]
    async fn test_human_win_skips_ledger() {
        let ledger = CountingLedger(AtomicUsize::new(0));
        let receipt = submit_game_result(&ledger, &result(Winner::Human)).await;

        assert!(!receipt.success);
        assert_eq!(receipt.message, "Human won; frontend submits.");
        assert_eq!(ledger.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ai_win_is_submitted() {
        let ledger = CountingLedger(AtomicUsize::new(0));
        let receipt = submit_game_result(&ledger, &result(Winner::Ai)).await;

        assert!(receipt.success);
        assert_eq!(receipt.tx_hash.as_deref(), Some("0xabc"));
        assert_eq!(ledger.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_ledger_declines() {
        let receipt = submit_game_result(&UnconfiguredLedger, &result(Winner::Draw)).await;
        assert!(!receipt.success);
        assert_eq!(receipt.message, "Ledger not configured.");
    }

    #[tokio::test]
    async fn test_hung_relay_times_out() {
        // Accepts connections and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let ledger = HttpLedger::new(format!("http://{addr}/submit"))
            .with_timeout(Duration::from_millis(200));
        let receipt = submit_game_result(&ledger, &result(Winner::Ai)).await;

        assert!(!receipt.success);
        assert_eq!(receipt.message, "Error: relay timed out");
        assert!(receipt.tx_hash.is_none());
        server.abort();
    }

    #[test]
    fn test_receipt_omits_missing_tx_hash() {
        let json = serde_json::to_value(SubmissionReceipt::failed("nope")).unwrap();
        assert!(json.get("txHash").is_none());

        let json = serde_json::to_value(SubmissionReceipt::recorded("0x1".into())).unwrap();
        assert_eq!(json["txHash"], "0x1");
    }
}
