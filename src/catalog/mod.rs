//! Artifact catalog
//!
//! Every artifact is cataloged under a key of the form `"{text}-({n})"`,
//! where `n` is the smallest index not already taken for that text:
//!
//! ```text
//! create("score")  ->  score-(0)
//! create("score")  ->  score-(1)
//! create("lives")  ->  lives-(0)
//! ```
//!
//! A selector is either an exact key (`score-(1)`) or a bare name (`score`).
//! Bare names and `match_all` address whole families of same-text artifacts.

mod key;
mod registry;
mod resolver;

pub use key::{bare_name, format_key, split_key};
pub use registry::Catalog;
pub use resolver::Family;
