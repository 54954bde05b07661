//! QuickBite CLI - browse the menu and manage the saved cart.
//!
//! # Usage
//!
//! ```bash
//! # List the menu, optionally filtered
//! qb menu --category dessert --search tira
//!
//! # Work with the cart the storefront persists
//! qb cart add 3
//! qb cart update 3 -1
//! qb cart show
//! qb cart checkout
//! ```
//!
//! # Commands
//!
//! - `menu` - List menu items
//! - `cart` - Show, change or check out the saved cart
//!
//! Reads the same `QUICKBITE_DATA_DIR` and `QUICKBITE_CATALOG_PATH` as the
//! storefront server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use quickbite_core::{CategoryFilter, ItemId};
use quickbite_storefront::config::StorefrontConfig;

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "qb")]
#[command(author, version, about = "QuickBite command-line tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items
    Menu {
        /// Category to show (`all`, `pizza`, `burger`, `indian`, `chinese`, `dessert`)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Manage the saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its totals
    Show,
    /// Add one of a menu item
    Add {
        /// Menu item id
        id: ItemId,
    },
    /// Change an item's quantity by a signed amount
    Update {
        /// Menu item id
        id: ItemId,

        /// Amount to add (negative to reduce)
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Remove an item
    Remove {
        /// Menu item id
        id: ItemId,
    },
    /// Empty the cart
    Clear,
    /// Place the order and empty the cart
    Checkout,
}

fn main() -> ExitCode {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut stdout = io::stdout().lock();
    let result = run(cli, &mut stdout).and_then(|()| stdout.flush().map_err(CliError::from));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    let context = Context::load(&config)?;

    match cli.command {
        Commands::Menu { category, search } => {
            commands::menu::list(&context, category, &search, out)?;
        }
        Commands::Cart { action } => {
            let mut cart = context.cart();
            match action {
                CartAction::Show => commands::cart::show(&cart, out)?,
                CartAction::Add { id } => commands::cart::add(&mut cart, &context, id, out)?,
                CartAction::Update { id, delta } => {
                    commands::cart::update(&mut cart, id, delta, out)?;
                }
                CartAction::Remove { id } => commands::cart::remove(&mut cart, id, out)?,
                CartAction::Clear => commands::cart::clear(&mut cart, out)?,
                CartAction::Checkout => commands::cart::checkout(&mut cart, out)?,
            }
        }
    }
    Ok(())
}
