mod catalog;
mod chat;
mod concierge;
mod config;
mod error;
mod models;
mod polish;
mod repl;
mod resolver;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use concierge::Concierge;
use config::{Cli, Command, ListingArgs, Settings};
use std::sync::Arc;
use store::{LegacyBookingLog, RecordStore, VisitLog};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout stays free for the conversation
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings.resolve();

    let store = RecordStore::load(&settings.properties_path)
        .with_context(|| format!("Failed to load {}", settings.properties_path.display()))?;
    if store.is_empty() {
        warn!("No listings in {}", settings.properties_path.display());
    }

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => chat(store, &settings).await,
        Command::Listings(args) => listings(&store, &args),
        Command::Book {
            name,
            property,
            date,
        } => book(&store, &settings, name, &property, date),
        Command::Bookings => bookings(&settings),
        Command::Visits => visits(&settings),
    }
}

async fn chat(store: RecordStore, settings: &Settings) -> Result<()> {
    let polisher = polish::from_config(settings.polish.clone())?;
    let concierge = Concierge::new(
        Arc::new(store),
        VisitLog::new(&settings.visits_path),
        polisher,
    );
    repl::run_chat(&concierge).await
}

fn listings(store: &RecordStore, args: &ListingArgs) -> Result<()> {
    let filter = catalog::ListingFilter::from(args);
    let listings = catalog::browse(store, &filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if let Some((lo, hi)) = catalog::price_bounds(store) {
        println!(
            "Cities: {} | Types: {} | Price range: {} – {}",
            catalog::distinct_cities(store).join(", "),
            catalog::distinct_types(store).join(", "),
            chat::format::thousands(lo as i64),
            chat::format::thousands(hi as i64),
        );
    }
    repl::print_cards(&listings);
    Ok(())
}

fn book(
    store: &RecordStore,
    settings: &Settings,
    name: String,
    property: &str,
    date: chrono::NaiveDate,
) -> Result<()> {
    let booking = store::bookings::form_booking(store, &name, property, date)?;
    LegacyBookingLog::new(&settings.legacy_bookings_path)
        .append(&booking)
        .context("Failed to save booking")?;

    println!(
        "✅ Booking confirmed for {} at {} on {}",
        booking.name, booking.property_name, booking.date
    );
    Ok(())
}

fn bookings(settings: &Settings) -> Result<()> {
    let bookings = LegacyBookingLog::new(&settings.legacy_bookings_path).load()?;
    println!("{}", store::bookings::render_bookings(&bookings));
    Ok(())
}

fn visits(settings: &Settings) -> Result<()> {
    let requests = VisitLog::new(&settings.visits_path).load()?;
    if requests.is_empty() {
        println!("No visit requests yet.");
        return Ok(());
    }
    println!("📋 Visit Requests");
    for r in &requests {
        println!(
            "{} | {} | {} | {} | {}",
            r.timestamp.format("%Y-%m-%d %H:%M"),
            r.name,
            r.phone,
            r.listing_id.as_deref().unwrap_or("-"),
            r.property_name.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
