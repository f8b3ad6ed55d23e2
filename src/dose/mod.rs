//! Drug-dose resolution: the static formulary and the resolver that
//! recognizes dosing intents directly from query text.
//!
//! This path never touches the lexical index — a recognized drug name is
//! answered by computation against reference rules, not by retrieval.

pub mod resolver;
pub mod rules;

pub use resolver::DoseResolver;
pub use rules::{DoseAmount, DoseFormulary, DoseRule, DoseUnit};
