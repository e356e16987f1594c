//! Resolve a person's name to one Wikipedia article and extract its infobox and
//! plaintext body as a single labeled text artifact.
//!
//! ```no_run
//! # async fn run() -> Result<(), wiki_extractor::ExtractError> {
//! let result = wiki_extractor::extract("Marie Curie").await?;
//! println!("{}", result.full_text);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod compose;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use compose::ExtractionResult;
pub use config::{ResolutionPolicy, Settings};
pub use error::{ApiError, ExtractError};
pub use parser::infobox::InfoboxEntry;
pub use pipeline::{extract, Extractor};
pub use resolver::{ResolutionMethod, ResolvedPage};
