//! In-memory bank account ledger with a terminal menu front end.
//!
//! [`account`] holds the account model and the registry that owns a
//! session's accounts; [`cli`] is the menu that drives them.

pub mod account;
pub mod cli;
pub mod config;
