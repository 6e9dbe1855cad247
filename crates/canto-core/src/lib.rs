#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! canto-core
//!
//! Read-only analytics over the 34 chants of the Inferno, one `Canto_<n>.txt`
//! file per chant. See [`ChantRepository`] for the queries.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod report;
pub mod repository;
pub mod traits;
pub mod types;

pub use diagnostics::TracingSink;
pub use error::{Error, Result};
pub use repository::ChantRepository;
pub use traits::DiagnosticsSink;
pub use types::{ChantNumber, CorpusSummary, LongestChant, ReadOptions, WordCounts, CHANT_COUNT};
