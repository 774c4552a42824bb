use anyhow::Result;
use std::io::{BufRead, Write};

use crate::account::Account;
use crate::cli::utils::Console;
use crate::config::Config;

/// Withdraw the same amount from a checking and a savings account through
/// the shared `withdraw` entry point and show how each variant debits it.
pub fn demonstrate_polymorphism<R: BufRead, W: Write>(console: &mut Console<R, W>, config: &Config) -> Result<()> {
    let amount = config.demo.withdrawal_amount;
    let mut accounts = vec![
        Account::checking("CHK123", "John Doe", 1000.0, config.ledger.default_transaction_fee),
        Account::savings("SAV456", "Jane Smith", 2000.0, config.ledger.default_interest_rate),
    ];

    console.print_header("Demonstrating Polymorphism")?;

    for account in accounts.iter_mut() {
        console.println(&format!("\nInitial state of account {}:", account.number()))?;
        console.println(&account.to_string())?;

        console.println(&format!("Withdrawing ${}...", amount))?;
        account.withdraw(amount);

        console.println(&format!("Final state of account {}:", account.number()))?;
        console.println(&account.to_string())?;
    }

    console.println("\n--- End of Demonstration ---")
}
