use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use pocketbook::cli::{
    handle_category_command, handle_check_command, handle_export_command,
    handle_history_command, handle_import_command, handle_reset_command, handle_stats_command,
    handle_summary_command, handle_transaction_command, handle_transfer_command,
    handle_wallet_command,
};
use pocketbook::config::{PocketbookPaths, Settings};
use pocketbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocketbook",
    author = "Kaylee Beyene",
    version,
    about = "Personal wallet ledger for the terminal",
    long_about = "Pocketbook tracks money across cash, bank and e-wallets. \
                  Record income and expenses by category, move money between \
                  wallets, and see where it went."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Wallet management commands
    #[command(subcommand)]
    Wallet(pocketbook::cli::WalletCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(pocketbook::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(pocketbook::cli::TransactionCommands),

    /// Move money between two wallets
    Transfer(pocketbook::cli::TransferArgs),

    /// Total balance, income, expense and transfers
    Summary {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Monthly and per-category statistics
    #[command(subcommand)]
    Stats(pocketbook::cli::StatsCommands),

    /// Export the ledger
    #[command(subcommand)]
    Export(pocketbook::cli::ExportCommands),

    /// Replace the ledger with a JSON backup
    Import {
        /// Path to the JSON backup
        file: PathBuf,
        /// Replace existing data without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete transactions or all data
    #[command(subcommand)]
    Reset(pocketbook::cli::ResetCommands),

    /// Check that wallet balances match their transactions
    Check {
        /// Rebuild mismatched balances from transactions
        #[arg(long)]
        fix: bool,
    },

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("POCKETBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PocketbookPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::from_paths(&paths, &settings)?;

    match cli.command {
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&mut storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut storage, &settings, cmd)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&mut storage, &settings, cmd)?,
        Some(Commands::Transfer(args)) => handle_transfer_command(&mut storage, &settings, args)?,
        Some(Commands::Summary { month }) => handle_summary_command(&storage, &settings, month)?,
        Some(Commands::Stats(cmd)) => handle_stats_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file, yes }) => handle_import_command(&mut storage, &file, yes)?,
        Some(Commands::Reset(cmd)) => handle_reset_command(&mut storage, cmd)?,
        Some(Commands::Check { fix }) => handle_check_command(&mut storage, &settings, fix)?,
        Some(Commands::History { count }) => handle_history_command(&storage, count)?,
        Some(Commands::Config) => {
            println!("Pocketbook Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Default wallet type: {}", settings.default_wallet_type);
            println!("  Audit enabled:       {}", settings.audit_enabled);
        }
        None => {
            println!("Pocketbook - personal wallet ledger");
            println!();
            println!("Run 'pocketbook --help' for usage information.");
            println!("Run 'pocketbook wallet add <name>' to create your first wallet.");
        }
    }

    Ok(())
}
