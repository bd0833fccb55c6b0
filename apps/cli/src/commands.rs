//! # Command Handlers
//!
//! Each handler opens what it needs (settings, database), performs one
//! repository call sequence, and prints the result as text or JSON.

use std::io::Write;
use std::path::PathBuf;

use drnekin_config::ConfigStore;
use drnekin_core::{Customer, NewCustomer, NewVisit, Operation, Visit};
use drnekin_db::{Database, DbConfig};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{
    Cli, Commands, ConfigCommand, CustomerAddArgs, CustomerCommand, SeedArgs, VisitAddArgs,
    VisitCommand,
};
use crate::error::{CliError, CliResult};

/// Everything a handler needs besides its arguments.
pub struct Context {
    pub store: ConfigStore,
    pub db_override: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    async fn open_db(&self) -> CliResult<Database> {
        let config = match &self.db_override {
            Some(path) => DbConfig::new(path),
            None => {
                let app_config = self.store.load()?;
                DbConfig::resolve(Some(&app_config))
            }
        };

        debug!(path = %config.database_path.display(), "Opening database");
        Ok(Database::new(config).await?)
    }
}

/// A customer with its full history, as printed by `customer show`.
#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub visits: Vec<VisitDetail>,
}

#[derive(Debug, Serialize)]
pub struct VisitDetail {
    #[serde(flatten)]
    pub visit: Visit,
    pub operations: Vec<Operation>,
}

/// Dispatches a parsed command line.
pub async fn run(cli: Cli, store: ConfigStore, out: &mut impl Write) -> CliResult<()> {
    let ctx = Context {
        store,
        db_override: cli.db,
        json: cli.json,
    };

    match cli.command {
        Commands::Customer(cmd) => run_customer(&ctx, cmd, out).await,
        Commands::Visit(VisitCommand::Add(args)) => add_visit(&ctx, args, out).await,
        Commands::Config(cmd) => run_config(&ctx, cmd, out),
        Commands::Seed(args) => seed(&ctx, args, out).await,
    }
}

// =============================================================================
// Customers
// =============================================================================

async fn run_customer(ctx: &Context, cmd: CustomerCommand, out: &mut impl Write) -> CliResult<()> {
    let db = ctx.open_db().await?;

    match cmd {
        CustomerCommand::Add(CustomerAddArgs { name, phone, plate }) => {
            let customer = db
                .customers()
                .create(NewCustomer::new(name, phone, plate))
                .await?;
            info!(public_id = %customer.public_id, "Customer registered");

            if ctx.json {
                print_json(out, &customer)?;
            } else {
                writeln!(out, "public_id  {}", customer.public_id)?;
                writeln!(out, "secret     {}", customer.secret)?;
            }
        }

        CustomerCommand::List { query } => {
            let customers = db.customers().list(&query).await?;

            if ctx.json {
                print_json(out, &customers)?;
            } else {
                for customer in &customers {
                    write_customer_line(out, customer)?;
                }
            }
        }

        CustomerCommand::Show { public_id } => {
            let customer = db
                .customers()
                .get_by_public_id(&public_id)
                .await?
                .ok_or_else(|| CliError::CustomerNotFound(public_id.clone()))?;

            let detail = load_detail(&db, customer).await?;
            if ctx.json {
                print_json(out, &detail)?;
            } else {
                write_detail(out, &detail)?;
            }
        }

        CustomerCommand::Delete { public_id } => {
            if !db.customers().delete_by_public_id(&public_id).await? {
                return Err(CliError::CustomerNotFound(public_id));
            }
            info!(public_id = %public_id, "Customer deleted");
            writeln!(out, "deleted {public_id}")?;
        }
    }

    Ok(())
}

async fn load_detail(db: &Database, customer: Customer) -> CliResult<CustomerDetail> {
    let mut visits = Vec::new();
    for visit in db.visits().list_for_customer(customer.id).await? {
        let operations = db.visits().list_operations(visit.id).await?;
        visits.push(VisitDetail { visit, operations });
    }

    Ok(CustomerDetail { customer, visits })
}

fn write_customer_line(out: &mut impl Write, customer: &Customer) -> CliResult<()> {
    writeln!(
        out,
        "{}  {:<12} {:<24} {:<16} {}",
        customer.public_id, customer.plate, customer.name, customer.phone, customer.updated_at
    )?;
    Ok(())
}

fn write_detail(out: &mut impl Write, detail: &CustomerDetail) -> CliResult<()> {
    let c = &detail.customer;
    writeln!(out, "{}", c.public_id)?;
    writeln!(out, "  name     {}", c.name)?;
    writeln!(out, "  phone    {}", c.phone)?;
    writeln!(out, "  plate    {}", c.plate)?;
    writeln!(out, "  created  {}", c.created_at)?;
    writeln!(out, "  updated  {}", c.updated_at)?;
    writeln!(out, "visits ({})", detail.visits.len())?;

    for VisitDetail { visit, operations } in &detail.visits {
        writeln!(out, "  {}  km {}  {}", visit.visit_date, visit.km, visit.notes)?;
        for op in operations {
            writeln!(out, "    - {}  {}", op.text, op.price)?;
        }
    }

    Ok(())
}

// =============================================================================
// Visits
// =============================================================================

async fn add_visit(ctx: &Context, args: VisitAddArgs, out: &mut impl Write) -> CliResult<()> {
    let db = ctx.open_db().await?;

    let customer = db
        .customers()
        .get_by_public_id(&args.public_id)
        .await?
        .ok_or_else(|| CliError::CustomerNotFound(args.public_id.clone()))?;

    let visit = NewVisit {
        customer_id: customer.id,
        visit_date: args.date,
        km: args.km,
        notes: args.notes,
        operations: args.operations,
    };
    let visit_id = db.visits().create(visit).await?;
    info!(visit_id, public_id = %customer.public_id, "Visit recorded");

    if ctx.json {
        print_json(out, &serde_json::json!({ "visit_id": visit_id }))?;
    } else {
        writeln!(out, "visit {visit_id} recorded for {}", customer.public_id)?;
    }

    Ok(())
}

// =============================================================================
// Settings
// =============================================================================

fn run_config(ctx: &Context, cmd: ConfigCommand, out: &mut impl Write) -> CliResult<()> {
    match cmd {
        ConfigCommand::Show => {
            let cfg = ctx.store.load()?;
            print_json(out, &cfg.redacted())?;
        }
        ConfigCommand::Path => {
            let db_path = match &ctx.db_override {
                Some(path) => path.clone(),
                None => DbConfig::resolve(Some(&ctx.store.load()?)).database_path,
            };
            writeln!(out, "config    {}", ctx.store.path().display())?;
            writeln!(out, "database  {}", db_path.display())?;
        }
    }

    Ok(())
}

// =============================================================================
// Demo Data
// =============================================================================

const FIRST_NAMES: &[&str] = &[
    "Ayşe", "Mehmet", "Fatma", "Ahmet", "Zeynep", "Mustafa", "Elif", "Emre", "Selin", "Can",
];

const LAST_NAMES: &[&str] = &["Yılmaz", "Kaya", "Demir", "Şahin", "Çelik", "Aydın", "Öztürk"];

const PLATE_LETTERS: &[&str] = &["ABC", "KM", "T", "DR", "NEK", "BZ", "HP"];

const OPERATIONS: &[(&str, &str)] = &[
    ("Oil change", "1200"),
    ("Oil filter", "250"),
    ("Air filter", "300"),
    ("Brake pads (front)", "1800"),
    ("Tyre rotation", "400"),
    ("Battery replacement", "2500"),
    ("Coolant flush", ""),
    ("Wheel alignment", "600"),
];

/// Builds the `index`-th demo customer. Deterministic for a given index.
fn demo_customer(index: usize) -> NewCustomer {
    let name = format!(
        "{} {}",
        FIRST_NAMES[index % FIRST_NAMES.len()],
        LAST_NAMES[(index * 3) % LAST_NAMES.len()]
    );
    let phone = format!("05{:02} {:03} {:04}", 30 + index % 70, (index * 37) % 1000, index);
    let plate = format!(
        "{:02} {} {}",
        1 + (index * 7) % 81,
        PLATE_LETTERS[index % PLATE_LETTERS.len()],
        100 + (index * 13) % 900
    );
    NewCustomer::new(name, phone, plate)
}

/// Builds the `n`-th visit of a demo customer.
fn demo_visit(customer_id: i64, index: usize, n: usize) -> NewVisit {
    let month = 1 + (index + n * 4) % 12;
    let day = 1 + (index * 5 + n) % 28;
    let mut visit = NewVisit::for_customer(customer_id)
        .visit_date(format!("2025-{month:02}-{day:02}"))
        .km(((n + 1) * 15_000 + index * 731).to_string());

    for k in 0..=(index + n) % 3 {
        visit = visit.operation(OPERATIONS[(index + n + k * 3) % OPERATIONS.len()]);
    }
    visit
}

async fn seed(ctx: &Context, args: SeedArgs, out: &mut impl Write) -> CliResult<()> {
    let db = ctx.open_db().await?;

    let existing = db.customers().count().await?;
    if existing > 0 {
        writeln!(out, "Database already has {existing} customers; skipping seed.")?;
        return Ok(());
    }

    let mut visits = 0;
    for index in 0..args.count {
        let customer = db.customers().create(demo_customer(index)).await?;
        for n in 0..(index % 3 + 1) {
            db.visits().create(demo_visit(customer.id, index, n)).await?;
            visits += 1;
        }
    }

    info!(customers = args.count, visits, "Seed complete");
    writeln!(out, "Seeded {} customers and {visits} visits.", args.count)?;
    Ok(())
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    struct Env {
        dir: TempDir,
    }

    impl Env {
        fn new() -> Self {
            Env {
                dir: TempDir::new().unwrap(),
            }
        }

        fn store(&self) -> ConfigStore {
            ConfigStore::new(self.dir.path().join("config.json"))
        }

        async fn run(&self, args: &[&str]) -> CliResult<String> {
            let db = self.dir.path().join("app.db");
            let mut argv = vec!["drnekin", "--db", db.to_str().unwrap()];
            argv.extend_from_slice(args);

            let cli = Cli::try_parse_from(argv).unwrap();
            let mut out = Vec::new();
            run(cli, self.store(), &mut out).await?;
            Ok(String::from_utf8(out).unwrap())
        }
    }

    #[tokio::test]
    async fn test_add_visit_and_show() {
        let env = Env::new();

        let added = env
            .run(&["--json", "customer", "add", "--name", " Ada ", "--plate", "34ABC"])
            .await
            .unwrap();
        let customer: Customer = serde_json::from_str(&added).unwrap();
        assert_eq!(customer.name, "Ada");

        env.run(&[
            "visit",
            "add",
            &customer.public_id,
            "--date",
            "2026-01-31",
            "--op",
            "Oil change=100",
            "--op",
            " =50",
        ])
        .await
        .unwrap();

        let shown = env
            .run(&["--json", "customer", "show", &customer.public_id])
            .await
            .unwrap();
        let detail: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(detail["visits"][0]["visit_date"], "2026-01-31");
        assert_eq!(detail["visits"][0]["operations"].as_array().unwrap().len(), 1);
        assert_eq!(detail["visits"][0]["operations"][0]["text"], "Oil change");
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let env = Env::new();
        env.run(&["customer", "add", "--name", "Ada", "--plate", "34ABC"])
            .await
            .unwrap();

        let listed = env.run(&["--json", "customer", "list", "34AB"]).await.unwrap();
        let customers: Vec<Customer> = serde_json::from_str(&listed).unwrap();
        assert_eq!(customers.len(), 1);

        let public_id = customers[0].public_id.clone();
        let deleted = env.run(&["customer", "delete", &public_id]).await.unwrap();
        assert_eq!(deleted.trim(), format!("deleted {public_id}"));

        let err = env.run(&["customer", "delete", &public_id]).await.unwrap_err();
        assert!(matches!(err, CliError::CustomerNotFound(_)));
    }

    #[tokio::test]
    async fn test_show_unknown_customer() {
        let env = Env::new();
        let err = env.run(&["customer", "show", "nobody00"]).await.unwrap_err();
        assert!(matches!(err, CliError::CustomerNotFound(id) if id == "nobody00"));
    }

    #[tokio::test]
    async fn test_seed_once() {
        let env = Env::new();

        let first = env.run(&["seed", "--count", "6"]).await.unwrap();
        assert!(first.starts_with("Seeded 6 customers"));

        let second = env.run(&["seed"]).await.unwrap();
        assert!(second.contains("skipping seed"));

        let listed = env.run(&["--json", "customer", "list"]).await.unwrap();
        let customers: Vec<Customer> = serde_json::from_str(&listed).unwrap();
        assert_eq!(customers.len(), 6);
    }

    #[tokio::test]
    async fn test_config_show_masks_tokens() {
        let env = Env::new();

        let shown = env.run(&["config", "show"]).await.unwrap();
        let cfg: serde_json::Value = serde_json::from_str(&shown).unwrap();
        let token = cfg["admin_token"].as_str().unwrap();
        assert!(token.ends_with("****"));

        let stored = env.store().load().unwrap();
        assert_ne!(stored.admin_token, token);
    }

    #[test]
    fn test_demo_customers_are_distinct() {
        let plates: std::collections::HashSet<String> =
            (0..25).map(|i| demo_customer(i).plate).collect();
        assert!(plates.len() > 20);
        assert!(demo_visit(1, 0, 0).operations.len() >= 1);
    }
}
