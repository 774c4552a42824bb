use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const BORDER: &str = "------------------------";

/// Account type tag, without the variant-specific parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Standard,
    Checking,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Standard => "standard",
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(AccountType::Standard),
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            _ => Err(format!("Invalid account type: {}", s)),
        }
    }
}

/// Account variant together with the parameters that drive its withdrawal policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountKind {
    /// Plain account, withdrawals debit exactly the requested amount
    Standard,
    /// Every withdrawal also debits a flat transaction fee
    Checking { transaction_fee: f64 },
    /// Withdrawals behave like a standard account; interest can be accrued
    Savings { interest_rate: f64 },
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Standard => AccountType::Standard,
            AccountKind::Checking { .. } => AccountType::Checking,
            AccountKind::Savings { .. } => AccountType::Savings,
        }
    }
}

/// A single ledger account.
///
/// Identity (`==`) is the account number alone. Balance ordering is a separate
/// relation exposed through [`Account::compare_balance`] and friends, so two
/// accounts can be identical while one holds more money than the other.
#[derive(Debug, Clone)]
pub struct Account {
    number: String,
    holder_name: String,
    balance: f64,
    kind: AccountKind,
}

impl Default for Account {
    /// Uninitialised account with an empty number. Never accepted by the registry.
    fn default() -> Self {
        Self {
            number: String::new(),
            holder_name: String::new(),
            balance: 0.0,
            kind: AccountKind::Standard,
        }
    }
}

impl Account {
    pub fn new(number: String, holder_name: String, balance: f64, kind: AccountKind) -> Self {
        Self {
            number,
            holder_name,
            balance,
            kind,
        }
    }

    pub fn standard(number: &str, holder_name: &str, balance: f64) -> Self {
        Self::new(number.to_string(), holder_name.to_string(), balance, AccountKind::Standard)
    }

    pub fn checking(number: &str, holder_name: &str, balance: f64, transaction_fee: f64) -> Self {
        Self::new(
            number.to_string(),
            holder_name.to_string(),
            balance,
            AccountKind::Checking { transaction_fee },
        )
    }

    pub fn savings(number: &str, holder_name: &str, balance: f64, interest_rate: f64) -> Self {
        Self::new(
            number.to_string(),
            holder_name.to_string(),
            balance,
            AccountKind::Savings { interest_rate },
        )
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    /// Replace the holder name
    pub fn rename(&mut self, holder_name: &str) {
        self.holder_name = holder_name.to_string();
    }

    /// Credit `amount` to the balance. Non-positive amounts are ignored.
    ///
    /// Returns whether the balance changed.
    pub fn deposit(&mut self, amount: f64) -> bool {
        if amount > 0.0 {
            self.balance += amount;
            true
        } else {
            false
        }
    }

    /// Withdraw `amount` according to the account's variant.
    ///
    /// Checking accounts debit `amount + fee` as one unit: if the total does not
    /// fit, nothing is debited, fee included. Returns whether the balance changed.
    pub fn withdraw(&mut self, amount: f64) -> bool {
        match self.kind {
            AccountKind::Standard | AccountKind::Savings { .. } => self.debit(amount),
            AccountKind::Checking { transaction_fee } => {
                if amount <= 0.0 {
                    return false;
                }
                self.debit(amount + transaction_fee)
            }
        }
    }

    // Every variant's withdrawal ends here; keeps the balance from going negative.
    fn debit(&mut self, amount: f64) -> bool {
        if amount > 0.0 && amount <= self.balance {
            self.balance -= amount;
            true
        } else {
            false
        }
    }

    /// Credit interest (`balance * rate`) to a savings account.
    ///
    /// Returns `None` for non-savings accounts, otherwise the interest credited,
    /// which is zero when the rate is not positive.
    pub fn accrue_interest(&mut self) -> Option<f64> {
        match self.kind {
            AccountKind::Savings { interest_rate } => {
                if interest_rate <= 0.0 {
                    return Some(0.0);
                }
                let interest = self.balance * interest_rate;
                if self.deposit(interest) {
                    Some(interest)
                } else {
                    Some(0.0)
                }
            }
            _ => None,
        }
    }

    /// Deposit and hand the account back, for chained use
    pub fn combine(mut self, amount: f64) -> Self {
        self.deposit(amount);
        self
    }

    /// Withdraw and hand the account back, for chained use
    pub fn reduce(mut self, amount: f64) -> Self {
        self.withdraw(amount);
        self
    }

    /// Order two accounts by balance. `None` only for NaN balances.
    pub fn compare_balance(&self, other: &Account) -> Option<Ordering> {
        self.balance.partial_cmp(&other.balance)
    }

    pub fn is_less_than(&self, other: &Account) -> bool {
        self.balance < other.balance
    }

    pub fn is_greater_than(&self, other: &Account) -> bool {
        self.balance > other.balance
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Account {}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BORDER)?;
        writeln!(f, "Account Holder: {}", self.holder_name)?;
        writeln!(f, "Account Number: {}", self.number)?;
        writeln!(f, "Balance: ${}", self.balance)?;
        write!(f, "{}", BORDER)
    }
}
