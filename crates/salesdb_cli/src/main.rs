//! Demo driver for the department/seller stores.
//!
//! # Responsibility
//! - Walk through every store operation against a configured database.
//! - Read the id for the delete step from stdin unless given as a flag.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use salesdb_core::db::schema::apply_schema;
use salesdb_core::{
    default_log_level, init_logging, ConnectionProvider, Department, DepartmentStore, Seller,
    SellerStore, StoreFactory, DEFAULT_PROPERTIES_FILE,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Exercise the department and seller stores against a database."
)]
struct Cli {
    /// Properties file providing `dburl` (and optional `user`/`password`).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PROPERTIES_FILE)]
    properties: PathBuf,

    /// Create the `department`/`seller` tables if they are missing.
    #[arg(long)]
    init_schema: bool,

    /// Seller id for the delete step; prompts on stdin when omitted.
    #[arg(long, value_name = "ID")]
    delete_id: Option<i64>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "SALESDB_LOG_DIR", value_name = "DIR")]
    log_dir: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir).context("failed to initialize logging")?;
    }

    let mut provider = ConnectionProvider::from_properties(&cli.properties);
    {
        let conn = provider
            .get_connection()
            .with_context(|| format!("failed to connect using {}", cli.properties.display()))?;
        if cli.init_schema {
            apply_schema(conn).context("failed to create schema")?;
        }

        let factory = StoreFactory::from_provider(&provider)?;
        let departments = factory.create_department_store();
        let sellers = factory.create_seller_store();
        run_department_demo(departments.as_ref())?;
        run_seller_demo(sellers.as_ref(), cli.delete_id)?;
    }
    provider.close_connection()?;
    info!("event=demo_finished module=cli status=ok");
    Ok(())
}

fn run_department_demo(store: &dyn DepartmentStore) -> Result<()> {
    println!("=== TEST 1: department insert =====");
    let mut department = Department::new("Music");
    store.insert(&mut department)?;
    println!("Inserted! New id = {}", id_text(department.id));

    println!("=== TEST 2: department findById =====");
    if let Some(id) = department.id {
        print_found(store.find_by_id(id)?);
    }

    println!("=== TEST 3: department update =====");
    department.name = "Food".to_string();
    store.update(&department)?;
    println!("Update completed");

    println!("=== TEST 4: department findAll =====");
    for item in store.find_all()? {
        println!("{item}");
    }

    println!("=== TEST 5: department delete =====");
    if let Some(id) = department.id {
        store.delete_by_id(id)?;
        println!("Delete completed");
    }
    Ok(())
}

fn run_seller_demo(store: &dyn SellerStore, delete_id: Option<i64>) -> Result<()> {
    println!("=== TEST 1: seller findById =====");
    print_found(store.find_by_id(3)?);

    println!("=== TEST 2: seller findByDepartment =====");
    let department = Rc::new(Department::with_id(2, ""));
    for seller in store.find_by_department(&department)? {
        println!("{seller}");
    }

    println!("=== TEST 3: seller findAll =====");
    for seller in store.find_all()? {
        println!("{seller}");
    }

    println!("=== TEST 4: seller insert =====");
    let mut seller = Seller::new(
        "Greg",
        "greg@gmail.com",
        chrono::Local::now().date_naive(),
        4000.0,
        Rc::clone(&department),
    );
    store.insert(&mut seller)?;
    println!("Inserted! New id = {}", id_text(seller.id));

    println!("=== TEST 5: seller update =====");
    match store.find_by_id(1)? {
        Some(mut existing) => {
            existing.name = "Martha Waine".to_string();
            store.update(&existing)?;
            println!("Update completed");
        }
        None => println!("No seller with id 1"),
    }

    println!("=== TEST 6: seller delete =====");
    let id = match delete_id {
        Some(id) => id,
        None => prompt_id("Enter id for delete test: ")?,
    };
    store.delete_by_id(id)?;
    println!("Delete completed");
    Ok(())
}

fn prompt_id(prompt: &str) -> Result<i64> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    line.trim()
        .parse()
        .with_context(|| format!("`{}` is not an integer id", line.trim()))
}

fn print_found<T: std::fmt::Display>(item: Option<T>) {
    match item {
        Some(item) => println!("{item}"),
        None => println!("null"),
    }
}

fn id_text(id: Option<i64>) -> String {
    id.map_or_else(|| "<none>".to_string(), |id| id.to_string())
}
