// Account module
// This module provides the account data model with its per-variant
// withdrawal policies, and the registry that owns a session's accounts.

mod model;
mod registry;

pub use model::{Account, AccountKind, AccountType};
pub use registry::{Accrual, Comparison, Mutation, Registry, RegistryError};
