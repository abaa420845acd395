//! `app:create-admin`: create an account holding `ROLE_ADMIN`.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use carnet::domain::{AdminBootstrapService, Role};
use carnet::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use carnet::outbound::security::Argon2PasswordHasher;
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tokio::runtime::Builder;
use zeroize::Zeroizing;

/// `create-admin` command arguments.
#[derive(Parser)]
#[command(
    name = "app:create-admin",
    about = "Creates a new admin-user",
    version
)]
struct CliArgs {
    /// Login name of the new admin.
    username: String,
    /// Plaintext password; only its Argon2id hash is stored.
    password: Zeroizing<String>,
    /// Contact e-mail address.
    email: String,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args, &mut io::stdout().lock()))
}

async fn run(args: CliArgs, out: &mut impl Write) -> Result<()> {
    let database_url = resolve_database_url(args.database_url.clone(), env::var("DATABASE_URL").ok())?;
    write_summary(out, &args)?;

    run_pending_migrations(&database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("failed to create database pool")?;
    let service = AdminBootstrapService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
    );

    service
        .create_admin(&args.username, &args.password, &args.email)
        .await
        .map_err(|error| eyre!("failed to create admin: {}", error.message()))?;

    writeln!(out, "Admin successfully created")?;
    Ok(())
}

fn write_summary(out: &mut impl Write, args: &CliArgs) -> io::Result<()> {
    writeln!(out, "You are about to create an admin-user.")?;
    writeln!(out, "Username: {}", args.username)?;
    writeln!(out, "Password: {}", args.password.as_str())?;
    writeln!(out, "Email: {}", args.email)?;
    writeln!(out, "Role: {}", Role::ADMIN)
}

fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }

    match from_env {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(eyre!("DATABASE_URL must not be empty")),
        None => Err(eyre!(
            "database URL missing: set --database-url or DATABASE_URL"
        )),
    }
}
