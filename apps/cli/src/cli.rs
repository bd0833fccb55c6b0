//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use drnekin_core::NewOperation;

/// drnekin - customer and visit records for the workshop.
#[derive(Parser, Debug)]
#[command(name = "drnekin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides $QR_DB_PATH and the db_path setting)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage customers
    #[command(subcommand)]
    Customer(CustomerCommand),

    /// Manage visits
    #[command(subcommand)]
    Visit(VisitCommand),

    /// Inspect settings
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Fill an empty database with demo customers and visits
    Seed(SeedArgs),
}

/// Subcommands for `drnekin customer`
#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// Register a customer
    Add(CustomerAddArgs),
    /// List customers, optionally filtered by plate, phone or name
    List {
        /// Case-sensitive substring
        #[arg(default_value = "")]
        query: String,
    },
    /// Show a customer with visits and operations
    Show {
        public_id: String,
    },
    /// Delete a customer and everything recorded for it
    Delete {
        public_id: String,
    },
}

#[derive(Args, Debug)]
pub struct CustomerAddArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub plate: String,
}

/// Subcommands for `drnekin visit`
#[derive(Subcommand, Debug)]
pub enum VisitCommand {
    /// Record a visit for a customer
    Add(VisitAddArgs),
}

#[derive(Args, Debug)]
pub struct VisitAddArgs {
    /// Customer public id
    pub public_id: String,

    /// Visit date (defaults to today)
    #[arg(long, default_value = "")]
    pub date: String,

    /// Odometer reading
    #[arg(long, default_value = "")]
    pub km: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    /// Operation as TEXT or TEXT=PRICE; repeatable
    #[arg(long = "op", value_parser = parse_operation)]
    pub operations: Vec<NewOperation>,
}

/// Subcommands for `drnekin config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print settings with tokens masked
    Show,
    /// Print the settings file and database locations
    Path,
}

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Number of customers to create
    #[arg(short, long, default_value_t = 25)]
    pub count: usize,
}

/// Parses `TEXT=PRICE`; the price is optional.
pub fn parse_operation(raw: &str) -> Result<NewOperation, String> {
    let op = match raw.rsplit_once('=') {
        Some((text, price)) => NewOperation::new(text, price),
        None => NewOperation::new(raw, ""),
    };
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation() {
        assert_eq!(
            parse_operation("Oil change=100").unwrap(),
            NewOperation::new("Oil change", "100")
        );
        assert_eq!(
            parse_operation("Brake pad").unwrap(),
            NewOperation::new("Brake pad", "")
        );
        assert_eq!(
            parse_operation("a=b=12").unwrap(),
            NewOperation::new("a=b", "12")
        );
    }

    #[test]
    fn test_visit_add_collects_operations() {
        let cli = Cli::try_parse_from([
            "drnekin",
            "visit",
            "add",
            "abcdEFGH",
            "--km",
            "120500",
            "--op",
            "Oil change=100",
            "--op",
            "Brake pad",
        ])
        .unwrap();

        let Commands::Visit(VisitCommand::Add(args)) = cli.command else {
            panic!("parsed wrong command");
        };
        assert_eq!(args.public_id, "abcdEFGH");
        assert_eq!(args.km, "120500");
        assert_eq!(args.operations.len(), 2);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["drnekin", "customer", "list", "34AB", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Customer(CustomerCommand::List { ref query }) if query == "34AB"
        ));
    }
}
