//! Fee Ledger CLI - track students and their meal-fee payments
//!
//! Command-line front end for `fee-ledger-core`, backed by a SQLite file.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use app::AppContext;
use cli::{Cli, Commands, PaymentCommands, StudentCommands};
use errors::exit_code_for;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `--verbose` means debug
/// and the default is warn.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "fee_ledger_core=debug,feeledger=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Init(args) => commands::handle_init(&ctx, args),
        Commands::Student(StudentCommands::Add(args)) => commands::handle_student_add(&ctx, args),
        Commands::Payment(PaymentCommands::Add(args)) => commands::handle_payment_add(&ctx, args),
        Commands::Balance(args) => commands::handle_balance(&ctx, args),
        Commands::List(args) => commands::handle_list(&ctx, args),
        Commands::Payments(args) => commands::handle_payments(&ctx, args),
        Commands::Summary(args) => commands::handle_summary(&ctx, args),
        Commands::Pending(args) => commands::handle_pending(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::Sweep => commands::handle_sweep(&ctx),
        Commands::Check(args) => commands::handle_check(&ctx, args),
        Commands::Export(args) => commands::handle_export(&ctx, args),
        Commands::Backup { destination } => commands::handle_backup(&ctx, destination),
        Commands::Completions { shell } => commands::handle_completions(*shell),
    }
}
