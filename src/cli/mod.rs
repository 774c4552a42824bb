// Menu front end for the ledger: console helpers, per-action handlers,
// the interactive session loop and the polymorphism demonstration.

pub mod account;
pub mod demo;
pub mod interactive;
pub mod utils;

pub use interactive::{MenuChoice, Session};
