use anyhow::Result;
use log::debug;
use std::io::{BufRead, Write};

use crate::account::{AccountKind, AccountType, Registry, RegistryError};
use crate::cli::utils::Console;
use crate::config::LedgerConfig;

fn type_title(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Standard => "Standard",
        AccountType::Checking => "Checking",
        AccountType::Savings => "Savings",
    }
}

/// Create a new account from prompted values
pub fn create_account<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    registry: &mut Registry,
    ledger: &LedgerConfig,
) -> Result<()> {
    let selection = console.read_line("Select account type (1 for Checking, 2 for Savings, 3 for Standard): ")?;
    let account_type = match selection.as_str() {
        "1" => AccountType::Checking,
        "2" => AccountType::Savings,
        "3" => AccountType::Standard,
        "" => return console.print_invalid_input(),
        name => match name.parse::<AccountType>() {
            Ok(account_type) => account_type,
            Err(_) => return console.println("Invalid account type selected."),
        },
    };

    let number = console.read_line("Enter account number: ")?;
    if number.is_empty() {
        return console.println("Account number cannot be empty.");
    }

    // Reject duplicates before asking for anything else
    if registry.contains(&number) {
        return console.println("An account with this number already exists.");
    }

    let holder_name = console.read_line("Enter account holder name: ")?;

    let balance = match console.read_parsed::<f64>("Enter initial balance: ")? {
        Some(balance) if balance.is_finite() => balance,
        _ => return console.print_invalid_input(),
    };

    let kind = match account_type {
        AccountType::Standard => AccountKind::Standard,
        AccountType::Checking => {
            let prompt = format!(
                "Enter transaction fee (blank for {}): ",
                ledger.default_transaction_fee
            );
            match console.read_amount_or(&prompt, ledger.default_transaction_fee)? {
                Some(fee) if fee >= 0.0 && fee.is_finite() => AccountKind::Checking { transaction_fee: fee },
                _ => return console.print_invalid_input(),
            }
        }
        AccountType::Savings => {
            let prompt = format!(
                "Enter interest rate (e.g., 0.05 for 5%, blank for {}): ",
                ledger.default_interest_rate
            );
            match console.read_amount_or(&prompt, ledger.default_interest_rate)? {
                Some(rate) if rate.is_finite() => AccountKind::Savings { interest_rate: rate },
                _ => return console.print_invalid_input(),
            }
        }
    };

    match registry.create(&number, &holder_name, balance, kind) {
        Ok(account) => {
            let message = format!("{} account created successfully.", type_title(account.account_type()));
            console.println(&message)
        }
        Err(RegistryError::DuplicateAccount(_)) => {
            console.println("An account with this number already exists.")
        }
        Err(e) => console.println(&e.to_string()),
    }
}

/// Deposit into an account
pub fn deposit<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &mut Registry) -> Result<()> {
    let number = console.read_line("Enter account number: ")?;
    if !registry.contains(&number) {
        return console.println("Account not found.");
    }

    let amount = match console.read_parsed::<f64>("Enter amount to deposit: ")? {
        Some(amount) if amount > 0.0 && amount.is_finite() => amount,
        _ => return console.print_invalid_input(),
    };

    match registry.deposit_to(&number, amount) {
        Ok(outcome) => console.println(&format!("Deposit successful. New balance: {}", outcome.balance)),
        Err(e) => console.println(&e.to_string()),
    }
}

/// Withdraw from an account using its variant's policy
pub fn withdraw<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &mut Registry) -> Result<()> {
    let number = console.read_line("Enter account number: ")?;
    if !registry.contains(&number) {
        return console.println("Account not found.");
    }

    let amount = match console.read_parsed::<f64>("Enter amount to withdraw: ")? {
        Some(amount) if amount > 0.0 && amount.is_finite() => amount,
        _ => return console.print_invalid_input(),
    };

    match registry.withdraw_from(&number, amount) {
        Ok(outcome) if outcome.applied => {
            console.println(&format!("Withdrawal successful. New balance: {}", outcome.balance))
        }
        Ok(outcome) => console.println(&format!(
            "Withdrawal declined: insufficient funds. Balance: {}",
            outcome.balance
        )),
        Err(e) => console.println(&e.to_string()),
    }
}

/// Print the details block of an account
pub fn display_account<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &Registry) -> Result<()> {
    let number = console.read_line("Enter account number: ")?;
    match registry.find(&number) {
        Ok(account) => console.println(&account.to_string()),
        Err(_) => console.println("Account not found."),
    }
}

/// Compare two accounts by number and balance
pub fn compare_accounts<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &Registry) -> Result<()> {
    let first = console.read_line("Enter first account number: ")?;
    let second = console.read_line("Enter second account number: ")?;

    let comparison = match registry.compare(&first, &second) {
        Ok(comparison) => comparison,
        Err(RegistryError::NotFound(number)) => {
            debug!("Comparison failed, {} missing", number);
            return console.println("One or both accounts not found.");
        }
        Err(e) => return console.println(&e.to_string()),
    };

    if comparison.same_number {
        console.println("The accounts have the same account number.")?;
    }
    if comparison.smaller_balance {
        console.println(&format!("Account {} has a smaller balance.", first))?;
    }
    if comparison.larger_balance {
        console.println(&format!("Account {} has a larger balance.", first))?;
    }
    if !comparison.smaller_balance && !comparison.larger_balance {
        console.println("The accounts have equal balances.")?;
    }

    Ok(())
}

/// Accrue interest on a savings account
pub fn accrue_interest<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &mut Registry) -> Result<()> {
    let number = console.read_line("Enter savings account number to calculate interest: ")?;
    match registry.accrue_interest(&number) {
        Ok(accrual) => console.println(&format!("Interest calculated. New balance: {}", accrual.balance)),
        Err(RegistryError::NotSavings(_)) => console.println("This account is not a savings account."),
        Err(RegistryError::NotFound(_)) => console.println("Account not found."),
        Err(e) => console.println(&e.to_string()),
    }
}

/// Change the holder name on an account
pub fn rename_holder<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &mut Registry) -> Result<()> {
    let number = console.read_line("Enter account number: ")?;
    if !registry.contains(&number) {
        return console.println("Account not found.");
    }

    let holder_name = console.read_line("Enter new account holder name: ")?;
    match registry.rename(&number, &holder_name) {
        Ok(()) => console.println("Account holder updated."),
        Err(e) => console.println(&e.to_string()),
    }
}

/// List all accounts in creation order
pub fn list_accounts<R: BufRead, W: Write>(console: &mut Console<R, W>, registry: &Registry) -> Result<()> {
    if registry.is_empty() {
        return console.println("No accounts found.");
    }

    console.println(&format!("{:<12} {:<10} {:<20} {:<12}", "NUMBER", "TYPE", "HOLDER", "BALANCE"))?;
    console.println(&format!("{:-<12} {:-<10} {:-<20} {:-<12}", "", "", "", ""))?;

    for account in registry.iter() {
        console.println(&format!(
            "{:<12} {:<10} {:<20} ${:<11}",
            account.number(),
            account.account_type().as_str(),
            account.holder_name(),
            account.balance()
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    fn scripted(input: &str) -> TestConsole {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: TestConsole) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    fn ledger() -> LedgerConfig {
        LedgerConfig {
            default_transaction_fee: 1.5,
            default_interest_rate: 0.02,
        }
    }

    #[test]
    fn test_create_checking_with_default_fee() {
        let mut registry = Registry::new();
        let mut console = scripted("1\nCHK123\nJohn Doe\n1000\n\n");
        create_account(&mut console, &mut registry, &ledger()).unwrap();

        let account = registry.find("CHK123").unwrap();
        assert_eq!(account.kind(), AccountKind::Checking { transaction_fee: 1.5 });
        assert!(output(console).ends_with("Checking account created successfully.\n"));
    }

    #[test]
    fn test_create_duplicate_stops_prompting() {
        let mut registry = Registry::new();
        registry.create("A1", "X", 500.0, AccountKind::Standard).unwrap();

        let mut console = scripted("3\nA1\n");
        create_account(&mut console, &mut registry, &ledger()).unwrap();

        let text = output(console);
        assert!(text.contains("An account with this number already exists."));
        assert!(!text.contains("Enter account holder name"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_by_type_name() {
        let mut registry = Registry::new();
        let mut console = scripted("Savings\nS1\nJane\n200\n0.05\n");
        create_account(&mut console, &mut registry, &ledger()).unwrap();

        assert_eq!(
            registry.find("S1").unwrap().kind(),
            AccountKind::Savings { interest_rate: 0.05 }
        );
        assert!(output(console).ends_with("Savings account created successfully.\n"));
    }

    #[test]
    fn test_create_unknown_type() {
        let mut registry = Registry::new();
        let mut console = scripted("7\n");
        create_account(&mut console, &mut registry, &ledger()).unwrap();

        assert!(registry.is_empty());
        assert!(output(console).contains("Invalid account type selected."));
    }

    #[test]
    fn test_create_rejects_negative_fee() {
        let mut registry = Registry::new();
        let mut console = scripted("1\nC1\nX\n10\n-1\n");
        create_account(&mut console, &mut registry, &ledger()).unwrap();

        assert!(registry.is_empty());
        assert!(output(console).contains("Invalid input. Please try again."));
    }

    #[test]
    fn test_withdraw_declined_is_reported() {
        let mut registry = Registry::new();
        registry.create("A1", "X", 500.0, AccountKind::Standard).unwrap();

        let mut console = scripted("A1\n600\n");
        withdraw(&mut console, &mut registry).unwrap();

        assert!(output(console).contains("Withdrawal declined: insufficient funds. Balance: 500"));
        assert_eq!(registry.find("A1").unwrap().balance(), 500.0);
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut registry = Registry::new();
        registry.create("A1", "X", 500.0, AccountKind::Standard).unwrap();

        let mut console = scripted("A1\n0\n");
        deposit(&mut console, &mut registry).unwrap();

        assert!(output(console).contains("Invalid input. Please try again."));
        assert_eq!(registry.find("A1").unwrap().balance(), 500.0);
    }

    #[test]
    fn test_compare_equal_balances() {
        let mut registry = Registry::new();
        registry.create("A1", "X", 500.0, AccountKind::Standard).unwrap();
        registry.create("A2", "Y", 500.0, AccountKind::Standard).unwrap();

        let mut console = scripted("A1\nA2\n");
        compare_accounts(&mut console, &registry).unwrap();

        let text = output(console);
        assert!(!text.contains("same account number"));
        assert!(text.contains("The accounts have equal balances."));
    }

    #[test]
    fn test_list_accounts() {
        let mut registry = Registry::new();
        let mut console = scripted("");
        list_accounts(&mut console, &registry).unwrap();
        assert_eq!(output(console), "No accounts found.\n");

        registry.create("A1", "X", 500.0, AccountKind::Standard).unwrap();
        registry
            .create("S1", "Y", 20.0, AccountKind::Savings { interest_rate: 0.1 })
            .unwrap();
        let mut console = scripted("");
        list_accounts(&mut console, &registry).unwrap();

        let text = output(console);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[2].starts_with("A1 "));
        assert!(rows[3].contains("savings"));
    }
}
