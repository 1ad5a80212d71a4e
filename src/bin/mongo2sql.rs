//! mongo2sql — MongoDB find() to SQL
//!
//! # Usage
//!
//! ```bash
//! # Translate a query
//! mongo2sql "db.user.find({age: {\$gte: 21}}, {name: 1})"
//!
//! # Show the parsed structure
//! mongo2sql explain "db.user.find({name: 'julio'})"
//!
//! # Interactive mode
//! mongo2sql repl
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use mongo2sql::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mongo2sql")]
#[command(version)]
#[command(about = "Translate MongoDB find() queries into SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    mongo2sql 'db.user.find();'
    mongo2sql 'db.user.find({_id: 23113}, {name: 1, age: 1});'
    mongo2sql --group-parens 'db.t.find({a: 1, $or: [{b: 2}, {c: 3}]})'")]
struct Cli {
    /// The MongoDB query to translate
    query: Option<String>,

    /// The MongoDB query to translate (same as the positional argument)
    #[arg(long = "mongodb-query", alias = "mongodb_query", conflicts_with = "query")]
    mongodb_query: Option<String>,

    /// Wrap $and/$or groups in parentheses
    #[arg(long)]
    group_parens: bool,

    /// Config file (defaults to ./mongo2sql.toml, then the user config dir)
    #[arg(short, long, env = "MONGO2SQL_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and show its table, projection and filter
    Explain {
        /// The MongoDB query to explain
        query: String,

        /// Print the parsed query as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive REPL mode
    Repl,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(cli.verbose, &config);

    let mut options = config.render;
    options.parenthesize_groups |= cli.group_parens;

    match &cli.command {
        Some(Commands::Explain { query, json }) => explain_query(query, *json, &options)?,
        Some(Commands::Repl) => run_repl(&options),
        None => match cli.query.as_ref().or(cli.mongodb_query.as_ref()) {
            Some(query) => println!("{}", mongo2sql::translate_with(query, &options)?),
            None => {
                println!("{}", "mongo2sql — MongoDB find() to SQL".cyan().bold());
                println!();
                println!("Usage: mongo2sql <QUERY> [OPTIONS]");
                println!();
                println!("Try: mongo2sql --help");
            }
        },
    }

    Ok(())
}

/// `-v`/`-vv` win over `RUST_LOG`, which wins over the config file.
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn explain_query(query: &str, json: bool, options: &RenderOptions) -> anyhow::Result<()> {
    let parsed = mongo2sql::parse(query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    println!("{}", "Query Explanation".cyan().bold());
    println!();
    println!("{} {}", "Query:".dimmed(), query.yellow());
    println!();
    println!("{}", "Parsed Structure:".green().bold());
    println!("  {} {}", "Table:".dimmed(), parsed.table.white());
    println!(
        "  {} {}",
        "Columns:".dimmed(),
        parsed.projection.to_sql_with(options).white()
    );

    if !parsed.filter.is_empty() {
        println!("  {}", "Filter:".dimmed());
        for cond in &parsed.filter {
            print_condition(cond, 2);
        }
    }

    println!();
    println!("{}", "Generated SQL:".green().bold());
    println!("  {}", parsed.to_sql_with(options).white());
    Ok(())
}

fn print_condition(cond: &Condition, depth: usize) {
    let indent = "  ".repeat(depth);
    match cond {
        Condition::Leaf(c) => {
            println!(
                "{}• {} {} {}",
                indent,
                c.field.white(),
                c.op.to_string().cyan(),
                c.value.yellow()
            );
        }
        Condition::Group(g) => {
            println!("{}[{}]", indent, g.op.to_string().cyan());
            for child in &g.children {
                print_condition(child, depth + 1);
            }
        }
    }
}

fn run_repl(options: &RenderOptions) {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    println!("{}", "mongo2sql REPL — Interactive Mode".cyan().bold());
    println!("{}", "Type find() queries to see the generated SQL. '.exit' to quit.".dimmed());
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("{} {}", "Failed to initialize REPL:".red(), e);
            return;
        }
    };

    let history_path = dirs::home_dir()
        .map(|p| p.join(".mongo2sql_history"))
        .unwrap_or_default();
    let _ = rl.load_history(&history_path);

    loop {
        let prompt = "mongo2sql> ".cyan().bold().to_string();
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    ".exit" | ".quit" | "exit" | "quit" => break,
                    ".clear" | "clear" => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    _ => {}
                }

                match mongo2sql::translate_with(line, options) {
                    Ok(sql) => println!("{} {}", "→".green(), sql.white().bold()),
                    Err(e) => eprintln!("{} {}", "✗".red(), e.to_string().red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{} {:?}", "Error:".red(), err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
}
