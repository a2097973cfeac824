//! Move orchestrator
//!
//! Resolves one move per request by trying each tier in turn:
//!
//! 1. Move cache
//! 2. Opening book (first three full moves only)
//! 3. Remote advisor (hard difficulty with a configured credential)
//! 4. Bounded search on a blocking thread
//! 5. A uniformly random legal move if the search task itself fails
//!
//! Every tier answers with an `Option`; only the first hit is used. Tiers 2
//! to 4 populate the cache, the last-resort fallback does not.

use std::sync::Arc;
use std::time::Duration;

use chess_engine::api::{apply, find_by_san, legal_candidates, parse_position, position_key};
use chess_engine::shakmaty::{Chess, Position};
use chess_engine::{search_move, Candidate, Difficulty, OpeningBook, Side};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::advisor::{request_move, AdvisorQuery, AnthropicAdvisor, MoveAdvisor};
use super::cache::{cache_key, MoveCache};
use crate::config::{ServiceConfig, DEFAULT_ADVISOR_TIMEOUT_MS};
use crate::error::{ResolveError, ResolveResult};

/// Which tier produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    Cache,
    Book,
    Advisor,
    Search,
    Fallback,
}

impl MoveSource {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveSource::Cache => "cache",
            MoveSource::Book => "book",
            MoveSource::Advisor => "advisor",
            MoveSource::Search => "search",
            MoveSource::Fallback => "fallback",
        }
    }
}

/// A resolved move and the position it leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMove {
    pub san: String,
    pub uci: String,
    pub fen_after: String,
    pub source: MoveSource,
}

impl ResolvedMove {
    fn new(pos: &Chess, candidate: &Candidate, source: MoveSource) -> Self {
        Self {
            san: candidate.san.clone(),
            uci: candidate.uci.clone(),
            fen_after: position_key(&apply(pos, candidate)),
            source,
        }
    }
}

/// Signature of the bounded search tier
pub type SearchFn = fn(&Chess, Difficulty, Side, &mut StdRng) -> Option<Candidate>;

pub struct MoveOrchestrator {
    cache: MoveCache,
    book: OpeningBook,
    advisor: Option<Arc<dyn MoveAdvisor>>,
    advisor_deadline: Duration,
    rng: Mutex<StdRng>,
    search_fn: SearchFn,
}

impl MoveOrchestrator {
    /// Orchestrator with the standard book and no advisor
    pub fn new(cache: MoveCache) -> Self {
        Self {
            cache,
            book: OpeningBook::standard(),
            advisor: None,
            advisor_deadline: Duration::from_millis(DEFAULT_ADVISOR_TIMEOUT_MS),
            rng: Mutex::new(StdRng::from_os_rng()),
            search_fn: search_move::<StdRng>,
        }
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn MoveAdvisor>, deadline: Duration) -> Self {
        self.advisor = Some(advisor);
        self.advisor_deadline = deadline;
        self
    }

    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    /// Pin all randomness (book choice, search noise, fallback) to `seed`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Replace the search tier
    pub fn with_search(mut self, search: SearchFn) -> Self {
        self.search_fn = search;
        self
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        let orchestrator = Self::new(MoveCache::new(config.cache_capacity));
        match &config.advisor {
            Some(advisor) => {
                info!("[ADVISOR] Enabled: {} ({:?} deadline)", advisor.model, advisor.deadline);
                let deadline = advisor.deadline;
                orchestrator.with_advisor(Arc::new(AnthropicAdvisor::new(advisor.clone())), deadline)
            }
            None => {
                info!("[ADVISOR] No credential configured, remote advisor disabled");
                orchestrator
            }
        }
    }

    pub fn cache(&self) -> &MoveCache {
        &self.cache
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    /// Resolve a legal move for `side` in the position `fen`
    ///
    /// Fails only on bad input or when the position has no legal moves.
    pub async fn resolve_move(
        &self,
        fen: &str,
        side: Side,
        difficulty: Difficulty,
    ) -> ResolveResult<ResolvedMove> {
        let pos = parse_position(fen)?;
        let to_move = Side::from_color(pos.turn());
        if side != to_move {
            return Err(ResolveError::NotYourTurn { side, to_move });
        }

        let key = cache_key(&position_key(&pos), side, difficulty);
        let legal = legal_candidates(&pos);

        if let Some(san) = self.cache.get(&key) {
            match find_by_san(&legal, &san) {
                Some(candidate) => {
                    info!("[CACHE] Hit: {}", candidate.san);
                    return Ok(ResolvedMove::new(&pos, candidate, MoveSource::Cache));
                }
                None => warn!("[CACHE] Cached move {} is not legal here, ignoring", san),
            }
        }

        if legal.is_empty() {
            return Err(ResolveError::NoLegalMoves);
        }

        if OpeningBook::in_scope(&pos) {
            let hit = self.book.lookup(&pos, &mut *self.rng.lock());
            if let Some(candidate) = hit {
                info!("[BOOK] Move: {}", candidate.san);
                return Ok(self.remember(&key, &pos, &candidate, MoveSource::Book));
            }
        }

        if difficulty.allows_remote_advisor() {
            if let Some(advisor) = &self.advisor {
                let query = AdvisorQuery::new(&pos, side, &legal);
                if let Some(candidate) =
                    request_move(advisor.as_ref(), &query, &legal, self.advisor_deadline).await
                {
                    return Ok(self.remember(&key, &pos, &candidate, MoveSource::Advisor));
                }
            }
        }

        match self.search(&pos, side, difficulty).await {
            Ok(candidate) => {
                info!("[SEARCH] Move: {} ({})", candidate.san, difficulty);
                Ok(self.remember(&key, &pos, &candidate, MoveSource::Search))
            }
            Err(e) => {
                error!("[FALLBACK] {}; playing a random legal move", e);
                self.random_move(&pos, &legal)
            }
        }
    }

    async fn search(
        &self,
        pos: &Chess,
        side: Side,
        difficulty: Difficulty,
    ) -> ResolveResult<Candidate> {
        let seed: u64 = self.rng.lock().random();
        let pos = pos.clone();
        let search = self.search_fn;

        let found = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            search(&pos, difficulty, side, &mut rng)
        })
        .await
        .map_err(|e| ResolveError::Internal {
            message: format!("search task failed: {e}"),
        })?;

        found.ok_or_else(|| ResolveError::Internal {
            message: "search returned no move".to_string(),
        })
    }

    fn random_move(&self, pos: &Chess, legal: &[Candidate]) -> ResolveResult<ResolvedMove> {
        let chosen = legal.choose(&mut *self.rng.lock());
        chosen
            .map(|candidate| ResolvedMove::new(pos, candidate, MoveSource::Fallback))
            .ok_or(ResolveError::NoLegalMoves)
    }

    fn remember(
        &self,
        key: &str,
        pos: &Chess,
        candidate: &Candidate,
        source: MoveSource,
    ) -> ResolvedMove {
        debug!("[CACHE] Store {} -> {}", key, candidate.san);
        self.cache.put(key.to_string(), candidate.san.clone());
        ResolvedMove::new(pos, candidate, source)
    }
}
