use std::fs::File;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::application::{LedgerError, LedgerStore};
use crate::assistant::{AssistantProvider, ChatSession, Speaker};
use crate::domain::{format_amount_grouped, parse_amount, Category, TransactionKind};
use crate::io::{Exporter, SessionSnapshot};

const BAR_WIDTH: usize = 30;

/// One line typed into the session
#[derive(Parser, Debug)]
#[command(name = "moneymate", no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// Record income: salary, bonus, business, other
    Income {
        category: String,
        /// Amount (e.g. "5000000" or "5,000,000.00")
        amount: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Record an expense: needs, wants, savings, other
    Expense {
        category: String,
        /// Amount (e.g. "150000" or "150,000.00")
        amount: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Create or update a savings goal
    Goal { name: String, target: String },

    /// Show the dashboard: balance, totals, allocation, goals
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List transactions, newest first
    History,

    /// Bar chart of expense allocation
    Chart,

    /// Show goal progress
    Goals,

    /// Export transactions (csv) or the whole session (json)
    Export {
        /// csv or json
        #[arg(default_value = "csv")]
        format: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Ask the financial coach a question
    Ask {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },

    /// Show the conversation so far
    Chat,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// One user session: the ledger plus the conversation with the coach.
pub struct Session {
    store: LedgerStore,
    chat: ChatSession,
}

impl Session {
    pub fn new(currency: &str, provider: AssistantProvider) -> Self {
        Self {
            store: LedgerStore::with_currency(currency),
            chat: ChatSession::new(provider),
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Parse and execute one input line. Usage mistakes, rejected input and
    /// failed file exports are reported to `out` and never end the session.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<LoopControl> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                return Ok(LoopControl::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` and `--help` as well as usage errors
                write!(out, "{}", e.render())?;
                return Ok(LoopControl::Continue);
            }
        };

        match self.execute(command, out).await {
            Ok(control) => Ok(control),
            Err(e) => {
                // Anything else is a failure writing to `out` itself
                if e.is::<LedgerError>() || e.is::<UsageError>() || e.is::<ExportError>() {
                    writeln!(out, "Error: {e}")?;
                    Ok(LoopControl::Continue)
                } else {
                    Err(e)
                }
            }
        }
    }

    pub async fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<LoopControl> {
        match command {
            SessionCommand::Income {
                category,
                amount,
                description,
                date,
            } => self.record(TransactionKind::Income, &category, &amount, description, date, out)?,

            SessionCommand::Expense {
                category,
                amount,
                description,
                date,
            } => self.record(TransactionKind::Expense, &category, &amount, description, date, out)?,

            SessionCommand::Goal { name, target } => {
                let target = parse_money(&target)?;
                let goal = self.store.set_goal(&name, target)?;
                writeln!(
                    out,
                    "Goal '{}' set: {} {}",
                    goal.name,
                    self.store.currency(),
                    format_amount_grouped(goal.target)
                )?;
            }

            SessionCommand::Summary { json } => {
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&self.store.dashboard())?)?;
                } else {
                    self.print_summary(out)?;
                }
            }

            SessionCommand::History => self.print_history(out)?,

            SessionCommand::Chart => self.print_chart(out)?,

            SessionCommand::Goals => self.print_goals(out)?,

            SessionCommand::Export { format, output } => self.export(&format, output.as_deref(), out)?,

            SessionCommand::Ask { question } => {
                let question = question.join(" ");
                let reply = self.chat.ask(&self.store, &question).await;
                writeln!(out, "MoneyMate: {reply}")?;
            }

            SessionCommand::Chat => {
                if self.chat.transcript().is_empty() {
                    writeln!(out, "No messages yet. Use `ask <question>`.")?;
                }
                for (speaker, text) in self.chat.transcript().turns() {
                    let who = match speaker {
                        Speaker::User => "You",
                        Speaker::Assistant => "MoneyMate",
                    };
                    writeln!(out, "{who}: {text}")?;
                }
            }

            SessionCommand::Quit => return Ok(LoopControl::Exit),
        }

        Ok(LoopControl::Continue)
    }

    fn record<W: Write>(
        &mut self,
        kind: TransactionKind,
        category: &str,
        amount: &str,
        description: Option<String>,
        date: Option<String>,
        out: &mut W,
    ) -> Result<()> {
        let category = Category::from_str(category).ok_or_else(|| {
            let allowed: Vec<&str> = kind.categories().iter().map(Category::as_str).collect();
            UsageError(format!(
                "Unknown category '{}'. Valid {} categories: {}",
                category,
                kind,
                allowed.join(", ")
            ))
        })?;
        let amount = parse_money(amount)?;

        let transaction = match date {
            Some(date_str) => {
                let date = parse_date(&date_str)?;
                self.store
                    .add_transaction_on(date, kind, category, amount, description)?
            }
            None => self
                .store
                .add_transaction(kind, category, amount, description)?,
        };

        writeln!(
            out,
            "Recorded {} {} {} ({})",
            transaction.kind,
            self.store.currency(),
            format_amount_grouped(transaction.amount),
            transaction.category
        )?;
        Ok(())
    }

    fn print_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.store.is_empty() {
            writeln!(out, "No transactions yet. Record your first one with `income` or `expense`.")?;
            return Ok(());
        }

        let report = self.store.dashboard();
        let cur = self.store.currency();

        writeln!(out, "Balance:        {} {}", cur, format_amount_grouped(report.balance))?;
        writeln!(out, "Total income:   {} {}", cur, format_amount_grouped(report.total_income))?;
        writeln!(out, "Total expense:  {} {}", cur, format_amount_grouped(report.total_expense))?;
        writeln!(out, "Savings pool:   {} {}", cur, format_amount_grouped(report.savings_pool))?;

        if !report.expense_categories.is_empty() {
            writeln!(out)?;
            writeln!(out, "{:<12} {:>18} {:>6} {:>8}", "CATEGORY", "TOTAL", "COUNT", "PERCENT")?;
            writeln!(out, "{}", "-".repeat(47))?;
            for cat in &report.expense_categories {
                writeln!(
                    out,
                    "{:<12} {:>18} {:>6} {:>7.1}%",
                    cat.category.as_str(),
                    format_amount_grouped(cat.total),
                    cat.count,
                    cat.percentage
                )?;
            }
        }

        if let Some((category, deviation)) = report.largest_budget_deviation() {
            if deviation.abs() >= 1.0 {
                let direction = if deviation > 0.0 { "above" } else { "below" };
                writeln!(out)?;
                writeln!(
                    out,
                    "Largest 50/30/20 gap: {} is {:.1} points {} its share of income",
                    category,
                    deviation.abs(),
                    direction
                )?;
            }
        }

        Ok(())
    }

    fn print_history<W: Write>(&self, out: &mut W) -> Result<()> {
        let transactions = self.store.transactions_for_display();
        if transactions.is_empty() {
            writeln!(out, "No transactions found.")?;
            return Ok(());
        }

        writeln!(
            out,
            "{:<10}  {:<8} {:<10} {:>18}  DESCRIPTION",
            "DATE", "KIND", "CATEGORY", "AMOUNT"
        )?;
        writeln!(out, "{}", "-".repeat(72))?;
        for t in transactions {
            writeln!(
                out,
                "{:<10}  {:<8} {:<10} {:>18}  {}",
                t.date.format("%Y-%m-%d"),
                t.kind.as_str(),
                t.category.as_str(),
                format_amount_grouped(t.amount),
                truncate(t.description.as_deref().unwrap_or(""), 30)
            )?;
        }
        Ok(())
    }

    fn print_chart<W: Write>(&self, out: &mut W) -> Result<()> {
        let totals = self.store.expense_by_category();
        let Some(max) = totals.values().copied().max() else {
            writeln!(out, "No expense data yet.")?;
            return Ok(());
        };

        for (category, total) in &totals {
            let filled = bar_width(*total, max, BAR_WIDTH);
            writeln!(
                out,
                "{:<8} {:<width$} {}",
                category.as_str(),
                "#".repeat(filled),
                format_amount_grouped(*total),
                width = BAR_WIDTH
            )?;
        }
        Ok(())
    }

    fn print_goals<W: Write>(&self, out: &mut W) -> Result<()> {
        let statuses = self.store.goal_statuses();
        if statuses.is_empty() {
            writeln!(out, "You have no goals yet. Use `goal <name> <target>`.")?;
            return Ok(());
        }

        for status in statuses {
            let filled = (status.clamped_percentage() / 100.0 * BAR_WIDTH as f64).round() as usize;
            writeln!(
                out,
                "{}: {:.1}% [{}{}] {} / {}",
                status.name,
                status.percentage,
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled),
                format_amount_grouped(status.saved),
                format_amount_grouped(status.target)
            )?;
        }
        Ok(())
    }

    fn export<W: Write>(&self, format: &str, output: Option<&str>, out: &mut W) -> Result<()> {
        let format = ExportFormat::parse(format)?;
        let exporter = Exporter::new(&self.store);

        let outcome = match output {
            Some(path) => File::create(path)
                .map_err(anyhow::Error::from)
                .and_then(|file| write_export(&exporter, format, file))
                .map_err(|e| ExportError {
                    path: path.to_string(),
                    reason: format!("{e:#}"),
                })?,
            None => write_export(&exporter, format, &mut *out)?,
        };

        match (outcome, output) {
            (ExportOutcome::Transactions(count), Some(path)) => {
                writeln!(out, "Exported {} transactions to {}", count, path)?;
            }
            (ExportOutcome::Session(snapshot), Some(path)) => {
                writeln!(
                    out,
                    "Exported session: {} transactions, {} goals to {}",
                    snapshot.transactions.len(),
                    snapshot.goals.len(),
                    path
                )?;
            }
            // JSON has no trailing newline of its own
            (ExportOutcome::Session(_), None) => writeln!(out)?,
            (ExportOutcome::Transactions(_), None) => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn parse(s: &str) -> Result<Self, UsageError> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(UsageError(format!(
                "Invalid export format '{}'. Valid formats: csv, json",
                s
            ))),
        }
    }
}

enum ExportOutcome {
    Transactions(usize),
    Session(SessionSnapshot),
}

fn write_export<X: Write>(exporter: &Exporter<'_>, format: ExportFormat, writer: X) -> Result<ExportOutcome> {
    Ok(match format {
        ExportFormat::Csv => ExportOutcome::Transactions(exporter.export_transactions_csv(writer)?),
        ExportFormat::Json => ExportOutcome::Session(exporter.export_session_json(writer)?),
    })
}

/// Bad input caught before it reaches the ledger
#[derive(Error, Debug)]
#[error("{0}")]
struct UsageError(String);

/// Writing an export to a user-chosen file failed; the ledger is unaffected.
#[derive(Error, Debug)]
#[error("Could not export to '{path}': {reason}")]
struct ExportError {
    path: String,
    reason: String,
}

fn parse_money(input: &str) -> Result<i64> {
    parse_amount(input)
        .map_err(|e| UsageError(format!("Invalid amount '{}': {}. Use '50000' or '50,000.00'", input, e)).into())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| UsageError(format!("Invalid date '{}'. Use YYYY-MM-DD", date_str)).into())
}

fn bar_width(value: i64, max: i64, width: usize) -> usize {
    if max <= 0 {
        return 0;
    }
    ((value as f64 / max as f64) * width as f64).round() as usize
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
