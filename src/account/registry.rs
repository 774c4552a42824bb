use log::{debug, info, warn};

use super::model::{Account, AccountKind};

/// Registry errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("An account with number {0} already exists")]
    DuplicateAccount(String),

    #[error("Account {0} not found")]
    NotFound(String),

    #[error("Account {0} is not a savings account")]
    NotSavings(String),

    #[error("Account number cannot be empty")]
    InvalidAccountNumber,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

// Balance, fee and rate must be finite; a negative fee would let a checking
// withdrawal debit less than requested.
fn validate(balance: f64, kind: &AccountKind) -> Result<(), RegistryError> {
    if !balance.is_finite() {
        return Err(RegistryError::InvalidParameter(format!("balance {} is not finite", balance)));
    }

    match *kind {
        AccountKind::Checking { transaction_fee } if !(transaction_fee.is_finite() && transaction_fee >= 0.0) => {
            Err(RegistryError::InvalidParameter(format!(
                "transaction fee {} must be a non-negative amount",
                transaction_fee
            )))
        }
        AccountKind::Savings { interest_rate } if !interest_rate.is_finite() => Err(
            RegistryError::InvalidParameter(format!("interest rate {} is not finite", interest_rate)),
        ),
        _ => Ok(()),
    }
}

/// Result of a deposit or withdrawal routed through the registry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation {
    /// False when the amount was rejected and the balance left alone
    pub applied: bool,
    pub balance: f64,
}

/// Relational facts about two accounts, as seen from the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub same_number: bool,
    pub smaller_balance: bool,
    pub larger_balance: bool,
}

/// Interest credited to a savings account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accrual {
    pub interest: f64,
    pub balance: f64,
}

/// Insertion-ordered collection of accounts, one per account number.
///
/// Accounts are addressed by number on every call; nothing hands out
/// references that outlive a single operation.
#[derive(Debug, Default)]
pub struct Registry {
    accounts: Vec<Account>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a new account
    pub fn create(
        &mut self,
        number: &str,
        holder_name: &str,
        balance: f64,
        kind: AccountKind,
    ) -> Result<&Account, RegistryError> {
        if number.is_empty() {
            warn!("Rejected account creation with an empty account number");
            return Err(RegistryError::InvalidAccountNumber);
        }

        if self.contains(number) {
            warn!("Rejected duplicate account number {}", number);
            return Err(RegistryError::DuplicateAccount(number.to_string()));
        }

        if let Err(e) = validate(balance, &kind) {
            warn!("Rejected account {}: {}", number, e);
            return Err(e);
        }

        let account = Account::new(number.to_string(), holder_name.to_string(), balance, kind);
        info!(
            "Created {} account {} for {}",
            account.account_type().as_str(),
            number,
            holder_name
        );

        self.accounts.push(account);
        let index = self.accounts.len() - 1;
        Ok(&self.accounts[index])
    }

    /// Find an account by number (linear scan)
    pub fn find(&self, number: &str) -> Result<&Account, RegistryError> {
        self.accounts
            .iter()
            .find(|account| account.number() == number)
            .ok_or_else(|| RegistryError::NotFound(number.to_string()))
    }

    fn find_mut(&mut self, number: &str) -> Result<&mut Account, RegistryError> {
        self.accounts
            .iter_mut()
            .find(|account| account.number() == number)
            .ok_or_else(|| RegistryError::NotFound(number.to_string()))
    }

    pub fn contains(&self, number: &str) -> bool {
        self.find(number).is_ok()
    }

    /// Deposit into the account with the given number
    pub fn deposit_to(&mut self, number: &str, amount: f64) -> Result<Mutation, RegistryError> {
        let account = self.find_mut(number)?;
        let applied = account.deposit(amount);
        debug!(
            "Deposit of {} to {} applied={} balance={}",
            amount,
            number,
            applied,
            account.balance()
        );

        Ok(Mutation {
            applied,
            balance: account.balance(),
        })
    }

    /// Withdraw from the account with the given number, using its variant's policy
    pub fn withdraw_from(&mut self, number: &str, amount: f64) -> Result<Mutation, RegistryError> {
        let account = self.find_mut(number)?;
        let applied = account.withdraw(amount);
        if applied {
            debug!("Withdrawal of {} from {} balance={}", amount, number, account.balance());
        } else {
            warn!(
                "Withdrawal of {} from {} declined, balance {}",
                amount,
                number,
                account.balance()
            );
        }

        Ok(Mutation {
            applied,
            balance: account.balance(),
        })
    }

    /// Change the holder name of an account
    pub fn rename(&mut self, number: &str, holder_name: &str) -> Result<(), RegistryError> {
        let account = self.find_mut(number)?;
        account.rename(holder_name);
        info!("Renamed holder of account {} to {}", number, holder_name);
        Ok(())
    }

    /// Compare two accounts: identity by number, order by balance
    pub fn compare(&self, first: &str, second: &str) -> Result<Comparison, RegistryError> {
        let first = self.find(first)?;
        let second = self.find(second)?;

        Ok(Comparison {
            same_number: first == second,
            smaller_balance: first.is_less_than(second),
            larger_balance: first.is_greater_than(second),
        })
    }

    /// Credit interest to a savings account
    pub fn accrue_interest(&mut self, number: &str) -> Result<Accrual, RegistryError> {
        let account = self.find_mut(number)?;
        match account.accrue_interest() {
            Some(interest) => {
                info!("Credited interest {} to account {}", interest, number);
                Ok(Accrual {
                    interest,
                    balance: account.balance(),
                })
            }
            None => Err(RegistryError::NotSavings(number.to_string())),
        }
    }

    /// Accounts in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .create("CHK123", "John Doe", 1000.0, AccountKind::Checking { transaction_fee: 1.5 })
            .unwrap();
        registry
            .create("SAV456", "Jane Smith", 2000.0, AccountKind::Savings { interest_rate: 0.02 })
            .unwrap();
        registry.create("A1", "X", 500.0, AccountKind::Standard).unwrap();
        registry
    }

    #[rstest]
    fn test_create_and_find(registry: Registry) {
        let account = registry.find("SAV456").unwrap();
        assert_eq!(account.holder_name(), "Jane Smith");
        assert_eq!(account.balance(), 2000.0);
        assert_eq!(registry.len(), 3);

        let numbers: Vec<&str> = registry.iter().map(|a| a.number()).collect();
        assert_eq!(numbers, vec!["CHK123", "SAV456", "A1"]);
    }

    #[rstest]
    fn test_create_duplicate_keeps_original(mut registry: Registry) {
        let result = registry.create("A1", "Impostor", 1.0, AccountKind::Savings { interest_rate: 0.5 });
        assert_eq!(result.unwrap_err(), RegistryError::DuplicateAccount("A1".to_string()));

        assert_eq!(registry.len(), 3);
        let original = registry.find("A1").unwrap();
        assert_eq!(original.holder_name(), "X");
        assert_eq!(original.balance(), 500.0);
        assert_eq!(original.kind(), AccountKind::Standard);
    }

    #[rstest]
    fn test_create_empty_number_rejected(mut registry: Registry) {
        let result = registry.create("", "Nobody", 10.0, AccountKind::Standard);
        assert_eq!(result.unwrap_err(), RegistryError::InvalidAccountNumber);
        assert_eq!(registry.len(), 3);
    }

    #[rstest]
    #[case(AccountKind::Checking { transaction_fee: -5.0 })]
    #[case(AccountKind::Checking { transaction_fee: f64::NAN })]
    #[case(AccountKind::Checking { transaction_fee: f64::INFINITY })]
    #[case(AccountKind::Savings { interest_rate: f64::NAN })]
    fn test_create_invalid_parameter_rejected(mut registry: Registry, #[case] kind: AccountKind) {
        let result = registry.create("C1", "X", 6.0, kind);
        assert!(matches!(result, Err(RegistryError::InvalidParameter(_))));

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.withdraw_from("C1", 10.0).unwrap_err(),
            RegistryError::NotFound("C1".to_string())
        );
    }

    #[rstest]
    fn test_create_non_finite_balance_rejected(mut registry: Registry) {
        let result = registry.create("S9", "X", f64::INFINITY, AccountKind::Standard);
        assert!(matches!(result, Err(RegistryError::InvalidParameter(_))));
        assert!(!registry.contains("S9"));
    }

    #[rstest]
    fn test_create_zero_fee_accepted(mut registry: Registry) {
        registry
            .create("C0", "X", 6.0, AccountKind::Checking { transaction_fee: 0.0 })
            .unwrap();
        let outcome = registry.withdraw_from("C0", 10.0).unwrap();
        assert_eq!(outcome, Mutation { applied: false, balance: 6.0 });
    }

    #[rstest]
    fn test_not_found_everywhere(mut registry: Registry) {
        let missing = RegistryError::NotFound("NOPE".to_string());
        assert_eq!(registry.find("NOPE").unwrap_err(), missing);
        assert_eq!(registry.find("NOPE").unwrap_err(), missing);
        assert_eq!(registry.deposit_to("NOPE", 1.0).unwrap_err(), missing);
        assert_eq!(registry.withdraw_from("NOPE", 1.0).unwrap_err(), missing);
        assert_eq!(registry.rename("NOPE", "Y").unwrap_err(), missing);
        assert_eq!(registry.accrue_interest("NOPE").unwrap_err(), missing);
        assert_eq!(registry.compare("A1", "NOPE").unwrap_err(), missing);
        assert_eq!(registry.compare("NOPE", "A1").unwrap_err(), missing);
    }

    #[rstest]
    fn test_deposit_and_withdraw(mut registry: Registry) {
        let deposit = registry.deposit_to("A1", 25.0).unwrap();
        assert_eq!(deposit, Mutation { applied: true, balance: 525.0 });

        let ignored = registry.deposit_to("A1", -25.0).unwrap();
        assert_eq!(ignored, Mutation { applied: false, balance: 525.0 });

        let checking = registry.withdraw_from("CHK123", 100.0).unwrap();
        assert_eq!(checking, Mutation { applied: true, balance: 898.5 });

        let savings = registry.withdraw_from("SAV456", 100.0).unwrap();
        assert_eq!(savings, Mutation { applied: true, balance: 1900.0 });
    }

    #[rstest]
    fn test_overdraw_not_applied(mut registry: Registry) {
        let outcome = registry.withdraw_from("A1", 600.0).unwrap();
        assert!(!outcome.applied);
        assert_eq!(outcome.balance, 500.0);
        assert_eq!(registry.find("A1").unwrap().balance(), 500.0);
    }

    #[rstest]
    fn test_accrue_interest(mut registry: Registry) {
        registry.withdraw_from("SAV456", 100.0).unwrap();
        let accrual = registry.accrue_interest("SAV456").unwrap();
        assert!((accrual.interest - 38.0).abs() < 1e-9);
        assert!((accrual.balance - 1938.0).abs() < 1e-9);
    }

    #[rstest]
    #[case("CHK123")]
    #[case("A1")]
    fn test_accrue_interest_wrong_variant(mut registry: Registry, #[case] number: &str) {
        let before = registry.find(number).unwrap().balance();
        assert_eq!(
            registry.accrue_interest(number).unwrap_err(),
            RegistryError::NotSavings(number.to_string())
        );
        assert_eq!(registry.find(number).unwrap().balance(), before);
    }

    #[rstest]
    fn test_compare(registry: Registry) {
        let comparison = registry.compare("CHK123", "SAV456").unwrap();
        assert_eq!(
            comparison,
            Comparison {
                same_number: false,
                smaller_balance: true,
                larger_balance: false,
            }
        );

        let itself = registry.compare("A1", "A1").unwrap();
        assert!(itself.same_number);
        assert!(!itself.smaller_balance);
        assert!(!itself.larger_balance);
    }

    #[rstest]
    fn test_rename(mut registry: Registry) {
        registry.rename("A1", "New Holder").unwrap();
        let account = registry.find("A1").unwrap();
        assert_eq!(account.holder_name(), "New Holder");
        assert_eq!(account.balance(), 500.0);
    }
}
