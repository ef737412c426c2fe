//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod init;
pub mod menu;

use clap::Args;

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Store name used in the order label.
    #[arg(default_value = "BG-14")]
    pub name: String,

    /// Write JSON instead of TOML.
    #[arg(long)]
    pub json_config: bool,

    /// Overwrite an existing config file.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only show one category ("all" shows everything).
    #[arg(long, default_value = "all")]
    pub category: String,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Menu item id.
    pub id: u32,

    /// Option name (defaults to the item's first option).
    #[arg(short, long)]
    pub option: Option<String>,

    /// Note for the kitchen.
    #[arg(short, long, default_value = "")]
    pub note: String,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Line position as shown by `comanda cart` (starting at 1).
    pub position: usize,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Client name (at least 5 characters).
    #[arg(short, long)]
    pub name: String,

    /// Order type (defaults to the first configured type).
    #[arg(short = 't', long = "type")]
    pub order_type: Option<String>,

    /// Skip the confirmation prompt (required with --json).
    #[arg(short, long)]
    pub yes: bool,
}
