use std::env;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn, Level};

use condo_gateway::client::{
    ApiClient, ApiError, FileSessionStore, GatewayConfig, NullNavigator, SessionStore,
};
use condo_gateway::filters::{guest_stats, EventKind};

/// A failed fetch degrades to an empty list with the normalized message shown
fn or_empty<T>(result: Result<Vec<T>, ApiError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!("Could not load {what}: {}", err.user_message());
            Vec::new()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    dotenvy::dotenv().ok();

    info!("🏢 Condo Gateway - dashboard snapshot");
    info!("=====================================");

    let config = GatewayConfig::from_env();
    info!("Backend: {}", config.base_url);

    let store = Arc::new(FileSessionStore::open("condo_session.json")?);
    let api = ApiClient::new(config, store.clone(), Arc::new(NullNavigator))?;

    if store.token().is_none() {
        match (env::var("CONDO_EMAIL"), env::var("CONDO_PASSWORD")) {
            (Ok(email), Ok(password)) => {
                let session = api.login(&email, &password).await.map_err(|e| {
                    anyhow::anyhow!("Login failed: {}", e.user_message())
                })?;
                info!("Signed in as {}", session.user.name);
                store.store(session);
            }
            _ => warn!("No stored session and no CONDO_EMAIL/CONDO_PASSWORD; fetching unauthenticated"),
        }
    } else if let Some(user) = store.user() {
        info!("Using stored session for {}", user.name);
    }

    // Independent fetches, the way the dashboard loads a page: no ordering
    // between them, each one degrades on its own.
    let (apartments, users, payments) =
        tokio::join!(api.apartments(), api.users(), api.payments(None));
    let (events, notifications, reports) =
        tokio::join!(api.events(), api.notifications(), api.damage_reports());
    let (guests, active) = tokio::join!(api.guests(), api.active_guests());

    let apartments = or_empty(apartments, "apartments");
    let users = or_empty(users, "users");
    let payments = or_empty(payments, "payments");
    let events = or_empty(events, "maintenance events");
    let notifications = or_empty(notifications, "notifications");
    let reports = or_empty(reports, "damage reports");
    let guests = or_empty(guests, "Airbnb guests");
    let active = or_empty(active, "active guests");

    info!("");
    info!(
        "✅ {} apartments, {} users, {} payments, {} events, {} notifications, {} reports, {} guests ({} active)",
        apartments.len(),
        users.len(),
        payments.len(),
        events.len(),
        notifications.len(),
        reports.len(),
        guests.len(),
        active.len(),
    );

    for (i, apartment) in apartments.iter().enumerate() {
        println!(
            "{}. Tower {} / floor {} / apt {}",
            i + 1,
            apartment.tower,
            apartment.floor,
            apartment.number
        );
    }

    for payment in &payments {
        println!(
            "Payment #{}: {} ({:?}, due {})",
            payment.id, payment.concept, payment.status, payment.due_date
        );
    }

    for event in &events {
        println!(
            "Event #{}: {} [{:?}] in {} on {}",
            event.id,
            event.title,
            EventKind::classify(&event.event_type),
            event.area,
            event.scheduled_date
        );
    }

    let stats = guest_stats(&guests, Utc::now().date_naive());
    println!(
        "Guests: {} pending check-in, {} checking in today",
        stats.pending_check_in, stats.check_ins_today
    );

    // Save a snapshot of everything fetched
    let snapshot = serde_json::json!({
        "fetchedAt": Utc::now(),
        "apartments": apartments,
        "users": users,
        "payments": payments,
        "events": events,
        "notifications": notifications,
        "damageReports": reports,
        "airbnbGuests": guests,
    });
    tokio::fs::write(
        "dashboard_snapshot.json",
        serde_json::to_string_pretty(&snapshot)?,
    )
    .await?;
    info!("💾 Saved dashboard_snapshot.json");

    Ok(())
}
