//! CARESLOT Reference Clinic Demo CLI
//!
//! Runs the reference clinic walkthroughs, or answers one-off questions about
//! slot availability and route access against the same mock practice.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- booking --today 2025-05-19
//!   cargo run -p demo -- slots --provider 1 --date 2025-05-21
//!   cargo run -p demo -- route --email patient@example.com --path /admin/patients

use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use careslot_contracts::{access::RouteDecision, catalog::ProviderId, error::CareResult};
use careslot_ref_clinic::{
    scenarios::{access_control, booking, rescheduling},
    ClinicConfig, ReferenceClinic,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// CARESLOT: appointment availability, role policy, and booking demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "CARESLOT reference clinic demo",
    long_about = "Runs CARESLOT reference clinic scenarios showing slot availability,\n\
                  role-based route guarding, booking workflows, and the activity trail."
)]
struct Cli {
    /// Clinic configuration file. Defaults to the embedded configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Date treated as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: front office books an appointment.
    Booking,
    /// Scenario 2: every role walks the route table.
    Access,
    /// Scenario 3: a patient reschedules, then cancels.
    Rescheduling,
    /// Show the open slots for a provider on a date.
    Slots {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Log in as a user and navigate to a path.
    Route {
        /// Email of a directory user. Omit to navigate anonymously.
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        path: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    print_banner(today);

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Command::RunAll => run_all(&config, today),
        Command::Booking => booking::run_scenario(&config, today),
        Command::Access => access_control::run_scenario(&config),
        Command::Rescheduling => rescheduling::run_scenario(&config, today),
        Command::Slots { provider, date } => show_slots(&config, &provider, date, today),
        Command::Route { email, path } => show_route(&config, email.as_deref(), &path),
    });

    match result {
        Ok(()) => {
            println!("Done.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> CareResult<ClinicConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading clinic config");
            ClinicConfig::from_file(path)
        }
        None => ClinicConfig::embedded(),
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all(config: &ClinicConfig, today: NaiveDate) -> CareResult<()> {
    booking::run_scenario(config, today)?;
    access_control::run_scenario(config)?;
    rescheduling::run_scenario(config, today)?;
    Ok(())
}

// ── One-off queries ───────────────────────────────────────────────────────────

fn show_slots(
    config: &ClinicConfig,
    provider: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> CareResult<()> {
    let clinic = ReferenceClinic::in_memory(config.clone())?;
    let provider = ProviderId::new(provider);
    let name = clinic.desk.catalog().provider_name(&provider).to_string();

    println!("  Provider:  {} ({})", name, provider);
    println!("  Date:      {}", date);

    if clinic.desk.is_date_disabled(date, Some(&provider), today) {
        println!("  Status:    UNAVAILABLE (past date or not a working day)");
        if let Some(next) = clinic.next_available_date(&provider, date, today) {
            println!("  Next open: {}", next);
        }
        println!();
        return Ok(());
    }

    let open = clinic.desk.available_time_slots(Some(date), Some(&provider))?;
    println!("  Open:      {} of {} slot(s)", open.len(), clinic.desk.master_slots().len());
    for slot in &open {
        println!("    {}", slot);
    }
    println!();
    Ok(())
}

fn show_route(config: &ClinicConfig, email: Option<&str>, path: &str) -> CareResult<()> {
    let mut clinic = ReferenceClinic::in_memory(config.clone())?;
    if let Some(email) = email {
        let landing = clinic.sessions.login(email, "demo", Utc::now())?;
        println!("  Logged in:  {} (landing {})", email, landing);
    } else {
        println!("  Logged in:  nobody");
    }

    let decision = clinic.navigate(path)?;
    let outcome = match &decision {
        RouteDecision::Allow => "ALLOW".to_string(),
        RouteDecision::Login { from, .. } => format!("LOGIN (return to {})", from),
        RouteDecision::Redirect { .. } => "REDIRECT".to_string(),
        RouteDecision::Denied { reason, .. } => format!("DENIED ({})", reason),
        RouteDecision::NotFound { .. } => "NOT FOUND".to_string(),
    };
    println!("  Requested:  {}", path);
    println!("  Decision:   {}", outcome);
    println!("  Lands on:   {}", decision.destination(path));
    println!();
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner(today: NaiveDate) {
    println!();
    println!("CARESLOT: Appointment Scheduling Runtime");
    println!("Reference Clinic Demo (today = {})", today);
    println!("========================================");
    println!();
    println!("Every request passes through:");
    println!("  [1] Route guard: path + role -> Allow / Login / Redirect / Denied / NotFound");
    println!("  [2] Form check: every required selection present, or nothing happens");
    println!("  [3] Availability: past dates, provider working days, master slot list");
    println!("  [4] Atomic slot claim in the appointment store");
    println!("  [5] One activity record per completed action, SHA-256 hash-chained");
    println!();
}
