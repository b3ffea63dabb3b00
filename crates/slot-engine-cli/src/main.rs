//! `slots` CLI — query availability and book slots against file-backed
//! calendar fixtures.
//!
//! ## Usage
//!
//! ```sh
//! # List bookable slots for a resource over the next 7 days
//! slots query --policies policies.json --busy busy.json --resource dr-alvarez
//!
//! # Scan a specific date range with a caller display zone
//! slots query --resource dr-alvarez --date 2026-08-10 --days 3 \
//!     --caller-tz Europe/London
//!
//! # Book a chosen start (naive local time, resource zone)
//! slots book --resource dr-alvarez --start 2026-08-10T10:00:00 \
//!     --duration 30 --attendee "Ana Prieto"
//!
//! # Deterministic runs pin the clock
//! slots query --resource dr-alvarez --now 2026-08-10T06:00:00+02:00
//! ```
//!
//! The busy file is a JSON map of resource id to raw busy entries; the
//! policy file carries `defaults` plus per-resource overrides. Bookings go
//! to a stub sink that prints the reservation instead of calling a real
//! calendar.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slot_engine::{
    AvailabilityRequest, BookingRequest, BusySource, Engine, EngineError, PolicyOverrides,
    PolicyTable, RawBusy, Reservation, ReservationRequest, ReservationSink,
};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Availability & booking engine over calendar fixtures"
)]
struct Cli {
    /// Policy table JSON file
    #[arg(long, global = true, default_value = "policies.json")]
    policies: PathBuf,

    /// Busy fixture JSON file (resource id -> busy entries)
    #[arg(long, global = true, default_value = "busy.json")]
    busy: PathBuf,

    /// Pin the clock to an RFC 3339 instant for deterministic runs
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable slots for a resource
    Query {
        /// Resource id from the policy table
        #[arg(long)]
        resource: String,
        /// First day to scan (YYYY-MM-DD, resource zone); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Number of days to scan
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Required free minutes per slot (policy default when omitted)
        #[arg(long)]
        duration: Option<u32>,
        /// Alignment grid in minutes (policy default when omitted)
        #[arg(long)]
        grid: Option<u32>,
        /// Stop after this many slots
        #[arg(long, default_value_t = 10)]
        max_slots: usize,
        /// Display zone for the returned slots
        #[arg(long)]
        caller_tz: Option<String>,
    },
    /// Reserve a chosen window
    Book {
        /// Resource id from the policy table
        #[arg(long)]
        resource: String,
        /// Chosen start: RFC 3339, or naive local time in --caller-tz
        #[arg(long)]
        start: String,
        /// Appointment duration in minutes
        #[arg(long, default_value_t = 30)]
        duration: u32,
        /// Zone the naive start is expressed in (resource zone when omitted)
        #[arg(long)]
        caller_tz: Option<String>,
        /// Attendee shown in the reservation summary
        #[arg(long)]
        attendee: Option<String>,
        /// Explicit reservation summary
        #[arg(long)]
        summary: Option<String>,
    },
}

/// Busy source backed by a JSON fixture file.
struct FileBusySource {
    entries: HashMap<String, Vec<RawBusy>>,
}

#[async_trait]
impl BusySource for FileBusySource {
    async fn fetch_busy(
        &self,
        resource_id: &str,
        time_min: DateTime<Tz>,
        time_max: DateTime<Tz>,
    ) -> slot_engine::Result<Vec<RawBusy>> {
        let tz = time_min.timezone();
        let entries = self.entries.get(resource_id).cloned().unwrap_or_default();
        Ok(entries
            .into_iter()
            .filter(|entry| {
                slot_engine::merge_busy(std::slice::from_ref(entry), tz)
                    .first()
                    .is_some_and(|iv| iv.start < time_max && time_min < iv.end)
            })
            .collect())
    }
}

/// Reservation sink that fabricates a deterministic reservation instead of
/// calling a real calendar.
struct StubSink;

#[async_trait]
impl ReservationSink for StubSink {
    async fn create_reservation(
        &self,
        resource_id: &str,
        request: &ReservationRequest,
    ) -> slot_engine::Result<Reservation> {
        let id = format!("res-{}-{}", resource_id, request.start.timestamp());
        let link = format!("https://calendar.example/r/{id}");
        Ok(Reservation {
            id,
            link: Some(link),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    defaults: PolicyOverrides,
    #[serde(default)]
    resources: HashMap<String, PolicyOverrides>,
}

fn load_policies(path: &Path) -> Result<PolicyTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
    let file: PolicyFile = serde_json::from_str(&text)
        .with_context(|| format!("Invalid policy file: {}", path.display()))?;

    let mut table = PolicyTable::new(&file.defaults)?;
    for (id, overrides) in file.resources {
        table = table.with_resource(id, overrides)?;
    }
    Ok(table)
}

fn load_busy(path: &Path) -> Result<FileBusySource> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read busy file: {}", path.display()))?;
    let entries: HashMap<String, Vec<RawBusy>> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid busy file: {}", path.display()))?;
    Ok(FileBusySource { entries })
}

fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("--now must be RFC 3339, got: {raw}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn fail(err: &EngineError) -> ! {
    eprintln!("error ({}): {err}", err.kind());
    process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let now = parse_now(cli.now.as_deref())?;
    let engine = Engine::new(load_policies(&cli.policies)?, load_busy(&cli.busy)?, StubSink);

    match cli.command {
        Commands::Query {
            resource,
            date,
            days,
            duration,
            grid,
            max_slots,
            caller_tz,
        } => {
            let request = AvailabilityRequest {
                requested_date: date,
                days_to_check: days,
                required_free_minutes: duration,
                alignment_minutes: grid,
                max_slots,
                caller_timezone: caller_tz,
                ..AvailabilityRequest::new(resource)
            };
            match engine.availability_at(&request, now).await {
                Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                Err(err) => fail(&err),
            }
        }
        Commands::Book {
            resource,
            start,
            duration,
            caller_tz,
            attendee,
            summary,
        } => {
            let request = BookingRequest {
                caller_timezone: caller_tz,
                attendee,
                summary,
                ..BookingRequest::new(resource, start, duration)
            };
            match engine.book_at(&request, now).await {
                Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                Err(err @ EngineError::SlotNoLongerAvailable(_)) => {
                    println!(
                        "{}",
                        serde_json::json!({ "outcome": "conflict", "error": err.to_string() })
                    );
                    process::exit(2);
                }
                Err(err) => fail(&err),
            }
        }
    }

    Ok(())
}
