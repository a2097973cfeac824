//! Remote move advisor
//!
//! Asks an external language-model service for a move and maps the answer
//! onto a legal move. The advisor is never trusted: its reply is sanitized
//! and must exactly match the SAN, UCI or from+to form of a legal move, or it
//! is discarded. Every failure mode (transport, status, body, timeout, illegal
//! answer) ends as `None` for the orchestrator.

use std::time::Duration;

use async_trait::async_trait;
use chess_engine::api::{fullmoves, position_key};
use chess_engine::shakmaty::Chess;
use chess_engine::{Candidate, GamePhase, Side};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::deadline::with_deadline;
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, AdvisorResult};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 300;

/// Everything the advisor is told about the position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorQuery {
    pub fen: String,
    pub side: Side,
    pub phase: GamePhase,
    /// Legal moves in SAN
    pub legal_moves: Vec<String>,
}

impl AdvisorQuery {
    pub fn new(pos: &Chess, side: Side, legal: &[Candidate]) -> Self {
        Self {
            fen: position_key(pos),
            side,
            phase: GamePhase::from_fullmoves(fullmoves(pos)),
            legal_moves: legal.iter().map(|c| c.san.clone()).collect(),
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "You are an elite chess engine (2800+ ELO). Analyze this position and return ONLY the best move in SAN notation.\n\
             \n\
             Position: {fen}\n\
             You play: {side}\n\
             Phase: {phase}\n\
             Legal moves: {moves}\n\
             \n\
             Requirements:\n\
             - {guidance}\n\
             - Look for tactics: checks, captures, forks, pins\n\
             - NEVER expose your king to danger\n\
             - Choose unpredictable but strong moves\n\
             \n\
             Respond with ONLY the move (e.g., \"Nf3\" or \"e4\"). No explanation.",
            fen = self.fen,
            side = self.side.as_str().to_uppercase(),
            phase = self.phase,
            moves = self.legal_moves.join(", "),
            guidance = self.phase.guidance(),
        )
    }
}

/// A source of free-form move suggestions
#[async_trait]
pub trait MoveAdvisor: Send + Sync {
    /// Raw reply text for `query`
    async fn suggest(&self, query: &AdvisorQuery) -> AdvisorResult<String>;
}

/// Keep only characters that can appear in a move token
pub fn sanitize_suggestion(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '=' | '-'))
        .collect()
}

fn match_token<'a>(token: &str, legal: &'a [Candidate]) -> Option<&'a Candidate> {
    if token.is_empty() {
        return None;
    }
    legal
        .iter()
        .find(|c| c.san == token || c.uci == token || c.from_to() == token)
}

/// Map a raw advisor reply onto a legal move
///
/// The whole reply is tried first, then each whitespace-separated word, so
/// `"Nf3"` and `"Best move: Nf3"` both resolve while `"Nf4"` never does.
pub fn match_suggestion<'a>(raw: &str, legal: &'a [Candidate]) -> Option<&'a Candidate> {
    match_token(&sanitize_suggestion(raw), legal).or_else(|| {
        raw.split_whitespace()
            .find_map(|word| match_token(&sanitize_suggestion(word), legal))
    })
}

/// Ask `advisor` for a move, bounded by `deadline`
pub async fn request_move(
    advisor: &dyn MoveAdvisor,
    query: &AdvisorQuery,
    legal: &[Candidate],
    deadline: Duration,
) -> Option<Candidate> {
    let reply = match with_deadline(deadline, advisor.suggest(query)).await {
        Some(Ok(reply)) => reply,
        Some(Err(e)) => {
            warn!("[ADVISOR] Request failed, using fallback: {}", e);
            return None;
        }
        None => {
            warn!("[ADVISOR] Request timeout after {:?}", deadline);
            return None;
        }
    };

    match match_suggestion(&reply, legal) {
        Some(candidate) => {
            info!("[ADVISOR] Move: {}", candidate.san);
            Some(candidate.clone())
        }
        None => {
            warn!("[ADVISOR] Discarding suggestion {:?}: not a legal move", reply);
            None
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Advisor backed by the Anthropic Messages API
pub struct AnthropicAdvisor {
    client: reqwest::Client,
    config: AdvisorConfig,
}

impl AnthropicAdvisor {
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MoveAdvisor for AnthropicAdvisor {
    async fn suggest(&self, query: &AdvisorQuery) -> AdvisorResult<String> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: query.prompt(),
            }],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", self.config.api_key.as_str())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status {
                status: status.as_u16(),
            });
        }

        let reply: MessagesResponse = response.json().await?;
        reply
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| AdvisorError::Malformed {
                message: "missing content[0].text".to_string(),
            })
    }
}
