//! EventDesk demo binary
//!
//! Mounts a view controller against a live GraphQL endpoint, waits for the initial
//! load and prints what a renderer would show.
//!
//! ```text
//! EVENTDESK_ENDPOINT=http://localhost:8000/graphql EVENTDESK_VIEW=both cargo run -p eventdesk-client
//! ```

use eventdesk_client::{
    ClientConfig, DisplayMode, HttpGateway, ViewController, ViewEnvironment, ViewSnapshot,
};
use eventdesk_core::auth::SessionCell;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventdesk_client=info,eventdesk_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(endpoint = %config.endpoint, view = ?config.view, "Starting EventDesk");

    let session = SessionCell::new(config.session.clone());
    let env = ViewEnvironment::new(
        Arc::new(HttpGateway::new(config.endpoint.clone())),
        Arc::new(session),
    );
    let controller = ViewController::with_environment(env, config.display_mode);

    let handles = controller.mount(config.view.collections())?;
    futures::future::try_join_all(
        handles
            .into_iter()
            .map(|mut handle| async move { handle.wait_with_timeout(LOAD_TIMEOUT).await }),
    )
    .await?;

    print_snapshot(&controller.snapshot());

    controller.close(SHUTDOWN_TIMEOUT).await?;
    Ok(())
}

fn print_snapshot(snapshot: &ViewSnapshot) {
    println!("=== Events ({}) ===", snapshot.events.len());
    for event in &snapshot.events {
        let date = event.starts_at().map_or_else(
            || event.date.clone(),
            |at| at.format("%Y-%m-%d").to_string(),
        );
        let marker = if snapshot.viewer.is_own_event(event) {
            " (yours)"
        } else {
            ""
        };
        println!("  {} - ${:.2} - {date}{marker}", event.title, event.price);
    }
    if snapshot.viewer.can_create_events() {
        println!("  [Create Event]");
    }

    println!("\n=== Bookings ({}) ===", snapshot.bookings.len());
    match snapshot.display_mode {
        DisplayMode::List => {
            for booking in &snapshot.bookings {
                let created = booking.created_at_time().map_or_else(
                    || booking.created_at.clone(),
                    |at| at.format("%Y-%m-%d").to_string(),
                );
                println!("  {} - booked {created}", booking.event.title);
            }
        },
        DisplayMode::Chart => {
            if let Some(chart) = snapshot.chart() {
                for (bucket, count) in chart.bars() {
                    println!("  {bucket:<10} {}", "#".repeat(count));
                }
            }
        },
    }
}
