//! Workspace session orchestration.
//!
//! Coordinates the service client and the local profile store, and owns the
//! workspace rules: what may be generated, with which reference or voice,
//! and when no request should be issued at all.

mod session;

pub use session::{Session, SessionError, WORDS_PER_CHUNK, chunk_count};
