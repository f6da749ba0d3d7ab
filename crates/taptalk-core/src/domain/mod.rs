//! Core domain types.
//!
//! These types represent the pure domain model of the phrase board,
//! independent of any infrastructure concerns (filesystem, network,
//! audio output).

mod phrase;

// Re-export phrase types at the domain level for convenience
pub use phrase::{ArtifactRef, Phrase, PhraseId};
