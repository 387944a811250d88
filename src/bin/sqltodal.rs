//! sqltodal: SQL to DAL code generator
//!
//! # Usage
//!
//! ```bash
//! # Print DAL code for a statement
//! sqltodal "select user_master.login_user_id from user_master for update"
//!
//! # Write a complete function to a file
//! sqltodal --sql "delete from boo where boo.boo = 'x'" --wrap -o main.cpp
//!
//! # Show how a statement was parsed
//! sqltodal explain "update t set t.a = 1 where t.b is null" --format json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sqltodal::prelude::*;
use sqltodal::tokens::Keyword;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqltodal")]
#[command(version)]
#[command(about = "Turn a SQL statement into DAL statement code", long_about = None)]
#[command(after_help = "RESTRICTIONS:
    1) Every column must be qualified with its table: table.column
    2) HAVING, JOIN and in-place arithmetic are not supported
    3) Do not end the statement with ';' or '/'
    4) Identifiers are not validated against the DAL table keys
    5) SELECT, INSERT, UPDATE and DELETE only, no stored procedures

EXAMPLES:
    sqltodal 'select user_master.login_user_id from user_master order by user_master.login_user_id desc for update'
    sqltodal --sql \"insert into carton_dtl (carton_dtl.invn_type) values ('A')\" --wrap -o main.cpp")]
struct Cli {
    /// The SQL statement to translate
    query: Option<String>,

    /// The SQL statement to translate (alternative to the positional form)
    #[arg(short, long, conflicts_with = "query")]
    sql: Option<String>,

    /// Write the generated code to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Wrap the generated code in a function definition
    #[arg(short, long)]
    wrap: bool,

    /// Config file (defaults to ./sqltodal.toml, then the user config dir)
    #[arg(short, long, env = "SQLTODAL_CONFIG")]
    config: Option<String>,

    /// First id for literal host variable names
    #[arg(long, default_value_t = 1)]
    seed_literal: u64,

    /// First id for subquery names
    #[arg(long, default_value_t = 0)]
    seed_subquery: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement and show its structure
    Explain {
        /// The SQL statement to explain
        query: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List the reserved words of the SQL dialect
    Keywords,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Explain { query, format }) => explain_statement(query, format),
        Some(Commands::Keywords) => {
            show_keywords();
            Ok(())
        }
        None => match cli.query.as_deref().or(cli.sql.as_deref()) {
            Some(sql) => translate(sql, &cli),
            None => {
                println!("{}", "sqltodal: SQL to DAL code generator".cyan().bold());
                println!();
                println!("Usage: sqltodal <SQL> [OPTIONS]");
                println!();
                println!("Try: sqltodal --help");
                std::process::exit(2);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "sqltodal=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<DalConfig> {
    match &cli.config {
        Some(path) => DalConfig::load(path).with_context(|| format!("failed to load config '{}'", path)),
        None => DalConfig::discover().context("failed to load config"),
    }
}

fn translate(sql: &str, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let mut names = NameAllocator::seeded(cli.seed_literal, cli.seed_subquery);

    if cli.verbose {
        eprintln!("{} {}", "Input:".dimmed(), sql.yellow());
    }

    let code = sqltodal::translate_with(sql, &mut names, &config).map_err(|e| describe(sql, e))?;
    let code = if cli.wrap { wrap_function(&code, &config) } else { code };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &code).with_context(|| format!("failed to write '{}'", path))?;
            eprintln!("{} Wrote DAL code to {}", "✓".green(), path.cyan());
        }
        None => print!("{}", code),
    }
    Ok(())
}

/// Attach a caret line under the offending input position.
fn describe(sql: &str, err: DalError) -> anyhow::Error {
    match err.position() {
        Some(position) => {
            let column = sql[..position.min(sql.len())].chars().count();
            anyhow::anyhow!("{}\n  {}\n  {}^", err, sql, " ".repeat(column))
        }
        None => anyhow::Error::new(err),
    }
}

fn explain_statement(sql: &str, format: &OutputFormat) -> Result<()> {
    let stmt = sqltodal::parse(sql).map_err(|e| describe(sql, e))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stmt)?);
        }
        OutputFormat::Text => {
            println!("{}", "SQL Statement Explanation".cyan().bold());
            println!();
            println!("{} {}", "Input:".dimmed(), sql.yellow());
            println!("{} {}", "Normalized:".dimmed(), stmt.to_string().white());
            println!();
            println!("{}", "Parsed Structure:".green().bold());
            println!("  {} {}", "Kind:".dimmed(), stmt.dal_class().cyan());
            explain_body(&stmt);
        }
    }
    Ok(())
}

fn explain_body(stmt: &Statement) {
    match stmt {
        Statement::Select(s) => {
            println!("  {}", "Columns:".dimmed());
            for item in &s.items {
                println!("    • {}", item.to_string().white());
            }
            println!("  {} {}", "Tables:".dimmed(), s.tables.join(", ").white());
            if !s.order_by.is_empty() {
                println!("  {}", "Order By:".dimmed());
                for key in &s.order_by {
                    let dir = match key.direction {
                        SortDirection::Asc => "↑",
                        SortDirection::Desc => "↓",
                    };
                    println!("    {} {}", key.column.to_string().white(), dir.cyan());
                }
            }
            if s.for_update {
                println!("  {}", "For Update".yellow());
            }
        }
        Statement::Insert(i) => {
            println!("  {} {}", "Table:".dimmed(), i.table.white());
            for (col, val) in i.columns.iter().zip(&i.values) {
                println!("    {} ← {}", col.to_string().white(), val.to_string().yellow());
            }
            if i.columns.len() != i.values.len() {
                println!(
                    "  {} {} columns, {} values",
                    "Mismatch:".red().bold(),
                    i.columns.len(),
                    i.values.len()
                );
            }
        }
        Statement::Update(u) => {
            println!("  {} {}", "Table:".dimmed(), u.table.white());
            for assign in &u.assignments {
                println!(
                    "    {} ← {}",
                    assign.column.to_string().white(),
                    assign.value.to_string().yellow()
                );
            }
        }
        Statement::Delete(d) => {
            println!("  {} {}", "Table:".dimmed(), d.table.white());
        }
    }

    if let Some(filter) = stmt.filter() {
        println!("  {}", "Where:".dimmed());
        explain_chain(filter, 2);
    }
}

fn explain_chain(chain: &ConditionChain, depth: usize) {
    let indent = "  ".repeat(depth);
    for (join, term) in chain.terms() {
        let join = join.map(|j| j.sql().to_uppercase()).unwrap_or_default();
        match term {
            ConditionTerm::Condition(cond) => {
                println!("{}{:3} {}", indent, join.cyan(), cond.to_string().white());
            }
            ConditionTerm::Group(inner) => {
                println!("{}{:3} {}", indent, join.cyan(), "(".dimmed());
                explain_chain(inner, depth + 1);
                println!("{}    {}", indent, ")".dimmed());
            }
        }
    }
}

fn show_keywords() {
    println!("{}", "Reserved Words".cyan().bold());
    println!();
    for row in Keyword::ALL.chunks(6) {
        let words: Vec<String> = row.iter().map(|k| format!("{:10}", k.as_str())).collect();
        println!("  {}", words.join("").white());
    }
    println!();
    println!(
        "{} having, join, left, right and on are reserved but not supported",
        "Note:".yellow()
    );
}
