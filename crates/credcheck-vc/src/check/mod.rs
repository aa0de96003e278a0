mod compaction;
mod embedded_proof;

pub use compaction::{CompactionCheck, CompactionError, JsonLdCompactor};
pub use embedded_proof::EmbeddedProofCheck;
