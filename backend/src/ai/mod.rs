//! AI move resolution for the service
//!
//! - `cache` - bounded FIFO memo of resolved moves
//! - `deadline` - race a future against a timer
//! - `advisor` - remote language-model move suggestions
//! - `orchestrator` - the tier chain that ties them to the engine

pub mod advisor;
pub mod cache;
pub mod deadline;
pub mod orchestrator;

pub use advisor::{AdvisorQuery, AnthropicAdvisor, MoveAdvisor};
pub use cache::{cache_key, MoveCache};
pub use deadline::with_deadline;
pub use orchestrator::{MoveOrchestrator, MoveSource, ResolvedMove, SearchFn};
