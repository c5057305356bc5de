use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::api;
use crate::application::Services;
use crate::domain::{format_amount, ExpenseDraft, ExpenseId, UserId};
use crate::storage::DATE_FORMAT;

/// Spendbook - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spendbook")]
#[command(about = "Track dated expenses by category, from the command line or over HTTP")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(
        short,
        long,
        env = "SPENDBOOK_DATABASE",
        default_value = "spendbook.db",
        global = true
    )]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, env = "SPENDBOOK_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },

    /// Register a new user
    Register {
        /// Email address (must be unique)
        email: String,

        /// Password
        #[arg(long, env = "SPENDBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check credentials and print the user id
    Login {
        /// Email address
        email: String,

        /// Password
        #[arg(long, env = "SPENDBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Record an expense
    Add {
        /// Amount spent (e.g., "25.50" or "25")
        amount: String,

        /// What the money was spent on
        #[arg(short = 'm', long)]
        description: String,

        /// Category (e.g., "Food", "Transport")
        #[arg(short, long)]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Owner user id
        #[arg(short, long)]
        user: UserId,
    },

    /// List a user's expenses, newest first
    List {
        /// Owner user id
        #[arg(short, long)]
        user: UserId,
    },

    /// Show a user's totals per category
    Totals {
        /// Owner user id
        #[arg(short, long)]
        user: UserId,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id
        id: ExpenseId,
    },

    /// Export a user's data to CSV
    Export {
        /// What to export: expenses, totals
        export_type: String,

        /// Owner user id
        #[arg(short, long)]
        user: UserId,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    fn init_tracing(&self) {
        let default_level = if self.verbose {
            "debug"
        } else if matches!(self.command, Commands::Serve { .. }) {
            "info"
        } else {
            "warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

        let result = if self.log_json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        if let Err(e) = result {
            eprintln!("tracing init failed: {}", e);
        }
    }

    pub async fn run(self) -> Result<()> {
        self.init_tracing();

        let services = Services::init(&self.database)
            .await
            .with_context(|| format!("Failed to open database {}", self.database))?;

        let result = run_command(&services, &self.database, self.command).await;
        services.close().await;
        result
    }
}

async fn run_command(services: &Services, database: &str, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {
            println!("Database initialized: {}", database);
        }

        Commands::Serve { host, port } => {
            api::serve(services.clone(), &host, port).await?;
        }

        Commands::Register { email, password } => {
            let user_id = services.accounts.register(&email, &password).await?;
            println!("Registered {} (user id {})", email, user_id);
        }

        Commands::Login { email, password } => {
            let user_id = services.accounts.login(&email, &password).await?;
            println!("Logged in as {} (user id {})", email, user_id);
        }

        Commands::Add {
            amount,
            description,
            category,
            date,
            user,
        } => {
            let date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format(DATE_FORMAT)
                    .to_string()
            });
            let draft = ExpenseDraft::new(description, amount, category, date, user);
            let expense_id = services.ledger.add_expense(draft).await?;
            println!("Recorded expense {}", expense_id);
        }

        Commands::List { user } => {
            run_list_command(services, user).await?;
        }

        Commands::Totals { user } => {
            run_totals_command(services, user).await?;
        }

        Commands::Delete { id } => {
            let removal = services.ledger.remove_expense(id).await?;
            if removal.deleted() {
                println!("Deleted expense {}", id);
            } else {
                println!("No expense with id {}", id);
            }
        }

        Commands::Export {
            export_type,
            user,
            output,
        } => {
            run_export_command(services, &export_type, user, output.as_deref()).await?;
        }
    }

    Ok(())
}

async fn run_list_command(services: &Services, user: UserId) -> Result<()> {
    let expenses = services.ledger.list_expenses(Some(user)).await?;

    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:>10} {:<15} DESCRIPTION",
        "ID", "DATE", "AMOUNT", "CATEGORY"
    );
    println!("{}", "-".repeat(70));

    let mut sum = 0.0;
    for expense in &expenses {
        sum += expense.amount;
        println!(
            "{:<6} {:<12} {:>10} {:<15} {}",
            expense.id,
            expense.date.to_string(),
            format_amount(expense.amount),
            truncate(&expense.category, 15),
            truncate(&expense.description, 30)
        );
    }

    println!("{}", "-".repeat(70));
    println!("{:<19} {:>10}", "TOTAL", format_amount(sum));
    Ok(())
}

async fn run_totals_command(services: &Services, user: UserId) -> Result<()> {
    let totals = services.ledger.category_totals(Some(user)).await?;

    if totals.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!("{:<20} {:>12}", "CATEGORY", "TOTAL");
    println!("{}", "-".repeat(33));
    for total in &totals {
        println!(
            "{:<20} {:>12}",
            truncate(total.label(), 20),
            format_amount(total.total)
        );
    }
    Ok(())
}

async fn run_export_command(
    services: &Services,
    export_type: &str,
    user: UserId,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(&services.ledger);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "expenses" => {
            let count = exporter.export_expenses_csv(user, writer).await?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "totals" => {
            let count = exporter.export_totals_csv(user, writer).await?;
            if output.is_some() {
                eprintln!("Exported {} category totals", count);
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: expenses, totals",
                export_type
            );
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
