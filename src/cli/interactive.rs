use anyhow::Result;
use log::{debug, info};
use std::io::{BufRead, Write};

use crate::account::Registry;
use crate::cli::account;
use crate::cli::demo::demonstrate_polymorphism;
use crate::cli::utils::{is_closed, Console};
use crate::config::Config;

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Deposit,
    Withdraw,
    Display,
    Compare,
    Interest,
    Demo,
    Rename,
    List,
    Exit,
}

impl MenuChoice {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Create),
            "2" => Some(MenuChoice::Deposit),
            "3" => Some(MenuChoice::Withdraw),
            "4" => Some(MenuChoice::Display),
            "5" => Some(MenuChoice::Compare),
            "6" => Some(MenuChoice::Interest),
            "7" => Some(MenuChoice::Demo),
            "8" => Some(MenuChoice::Rename),
            "9" => Some(MenuChoice::List),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MENU: &[&str] = &[
    "1. Create a new account",
    "2. Deposit money",
    "3. Withdraw money",
    "4. Display account details",
    "5. Compare two accounts",
    "6. Calculate interest for a savings account",
    "7. Demonstrate polymorphism",
    "8. Rename account holder",
    "9. List accounts",
    "0. Exit",
];

/// One interactive session: a console, the registry it owns, and the config
pub struct Session<R, W> {
    console: Console<R, W>,
    registry: Registry,
    config: Config,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            console: Console::new(input, output),
            registry: Registry::new(),
            config,
        }
    }

    /// Run the menu loop until the user exits or input runs out
    pub fn run(&mut self) -> Result<()> {
        info!("Starting {} session", self.config.app_name);

        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) if is_closed(&e) => {
                    info!("Input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        info!("Session ended with {} account(s)", self.registry.len());
        Ok(())
    }

    // Returns false once the user asks to exit.
    fn step(&mut self) -> Result<bool> {
        self.console.print_header("Bank Account Menu")?;
        for line in MENU {
            self.console.println(line)?;
        }

        let input = self.console.read_line("Enter your choice: ")?;
        let choice = match MenuChoice::from_input(&input) {
            Some(choice) => choice,
            None => {
                self.console.println("Invalid choice. Please select a valid option.")?;
                return Ok(true);
            }
        };
        debug!("Menu choice {:?}", choice);

        match choice {
            MenuChoice::Create => account::create_account(&mut self.console, &mut self.registry, &self.config.ledger)?,
            MenuChoice::Deposit => account::deposit(&mut self.console, &mut self.registry)?,
            MenuChoice::Withdraw => account::withdraw(&mut self.console, &mut self.registry)?,
            MenuChoice::Display => account::display_account(&mut self.console, &self.registry)?,
            MenuChoice::Compare => account::compare_accounts(&mut self.console, &self.registry)?,
            MenuChoice::Interest => account::accrue_interest(&mut self.console, &mut self.registry)?,
            MenuChoice::Demo => demonstrate_polymorphism(&mut self.console, &self.config)?,
            MenuChoice::Rename => account::rename_holder(&mut self.console, &mut self.registry)?,
            MenuChoice::List => account::list_accounts(&mut self.console, &self.registry)?,
            MenuChoice::Exit => {
                self.console.println("Exiting program. Goodbye!")?;
                return Ok(false);
            }
        }

        Ok(true)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Finish the session, handing back the registry and the output sink
    pub fn into_parts(self) -> (Registry, W) {
        (self.registry, self.console.into_output())
    }
}
