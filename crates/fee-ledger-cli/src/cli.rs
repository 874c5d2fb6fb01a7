use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use fee_ledger_core::VERSION;

/// Fee Ledger - track students and their meal-fee payments
#[derive(Parser)]
#[command(name = "feeledger")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger database
    #[arg(short, long, global = true, env = "FEELEDGER_PATH")]
    pub ledger: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ledger database and config file
    Init(InitArgs),

    /// Manage students
    #[command(subcommand)]
    Student(StudentCommands),

    /// Manage payments
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// Preview the balance for a fee entry
    Balance(BalanceArgs),

    /// List students with their totals
    List(ListArgs),

    /// Show the payments of one student
    Payments(PaymentsArgs),

    /// Show dashboard totals
    Summary(ViewArgs),

    /// List students with outstanding fees
    Pending(ViewArgs),

    /// Delete a student and all of their payments
    Delete(DeleteArgs),

    /// Remove payments whose student no longer exists
    Sweep,

    /// Check database integrity and ledger consistency
    Check(ViewArgs),

    /// Export all records as JSON
    Export(ExportArgs),

    /// Back up the ledger database
    Backup {
        /// Destination path
        #[arg(value_name = "DEST")]
        destination: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the ledger will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Currency symbol shown before amounts
    #[arg(long)]
    pub currency_symbol: Option<String>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force_config: bool,
}

#[derive(Subcommand)]
pub enum StudentCommands {
    /// Add a student
    Add(StudentAddArgs),
}

/// Arguments for `student add`
#[derive(Args)]
pub struct StudentAddArgs {
    /// Student name
    #[arg(long)]
    pub name: String,

    /// Room or unit number
    #[arg(long)]
    pub room: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Meal plan tier
    #[arg(long, default_value = "standard")]
    pub lunch_type: String,
}

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record a payment
    Add(PaymentAddArgs),
}

/// Arguments for `payment add`
#[derive(Args)]
pub struct PaymentAddArgs {
    /// Student ID (full ID or unique prefix)
    #[arg(long, value_name = "ID")]
    pub student: String,

    /// Total fees due (unparseable input counts as 0)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub total_fees: String,

    /// Amount paid (unparseable input counts as 0)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub paid: String,

    /// Payment mode
    #[arg(long, default_value = "cash")]
    pub mode: String,

    /// Payment date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `balance` command
#[derive(Args)]
pub struct BalanceArgs {
    /// Total fees due
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub total_fees: String,

    /// Amount paid
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub paid: String,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive name filter
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `payments` command
#[derive(Args)]
pub struct PaymentsArgs {
    /// Student ID (full ID or unique prefix)
    #[arg(value_name = "ID")]
    pub student: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Shared output flags for read-only views
#[derive(Args)]
pub struct ViewArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Student ID (full ID or unique prefix)
    #[arg(value_name = "ID")]
    pub student: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}
