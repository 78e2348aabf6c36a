//! # Markup Walker
//!
//! A state machine over the token stream of one document. It tracks which
//! tags are open, accumulates the text of the pending block and, at block
//! boundaries, resolves the block's scope.
//!
//! The walker never calls a check itself. Each call to [`Walker::step`]
//! returns the [`Effect`]s the token caused (blocks ready for dispatch, counter
//! updates, comments) and a dispatcher applies them, so inline blocks checked
//! mid-paragraph never re-enter the walker.
//!
//! ## Modules
//!
//! - **`config`**: `WalkerConfig`, the skip/ignore lists injected per walker
//! - **`history`**: `TagHistory`, the stack of open tags
//! - **`clean`**: text cleaning applied before text joins a block
//! - **`state`**: `Walker`, `WalkerState` and the transition function
//!
//! ## Key Invariants
//!
//! - Void tags are never pushed onto the history
//! - The document context keeps its length; only the per-block buffers reset

pub mod clean;
pub mod config;
pub mod history;
pub mod state;

pub use config::WalkerConfig;
pub use history::TagHistory;
pub use state::{Effect, Mode, PendingBlock, Walker, WalkerState};
