//! Mini Cache demo
//!
//! Walks through the cache's behaviour with logging subscribers attached.

use std::time::Duration;

use anyhow::Context;
use serde_json::{json, Value};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::events::names;
use mini_cache::{CacheConfig, CacheEvent, CacheSystem, EventBus, EvictionStrategy};

/// Entry point of the demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache on a shared event bus with logging subscribers
/// 4. Run the walkthrough until it finishes or a shutdown signal arrives
/// 5. Shut the cache down and print final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&config).context("failed to serialize configuration")?
    );

    let bus: EventBus<CacheEvent<Value>> = EventBus::new();
    subscribe_loggers(&bus);

    let cache = CacheSystem::builder(config)
        .event_bus(bus)
        .build()
        .context("failed to start cache")?;

    tokio::select! {
        result = walkthrough(&cache) => result?,
        _ = shutdown_signal() => warn!("Walkthrough interrupted"),
    }

    println!(
        "Final statistics:\n{}",
        serde_json::to_string_pretty(&cache.stats())?
    );
    cache.shutdown();

    info!("Demo complete");
    Ok(())
}

fn subscribe_loggers(bus: &EventBus<CacheEvent<Value>>) {
    bus.subscribe(names::HIT, |event| {
        if let Some(key) = event.key() {
            info!("Cache HIT for key: {}", key);
        }
    });

    bus.subscribe(names::MISS, |event| {
        if let CacheEvent::Miss { key, reason } = event {
            info!("Cache MISS for key: {} ({:?})", key, reason);
        }
    });

    bus.subscribe(names::EVICTION, |event| {
        if let CacheEvent::Eviction { key, reason, .. } = event {
            info!("EVICTED: {} (reason: {})", key, reason);
        }
    });

    bus.subscribe(names::SET, |event| {
        if let CacheEvent::Set { key, ttl, .. } = event {
            info!("SET: {} (TTL: {:?})", key, ttl);
        }
    });

    bus.subscribe(names::CLEANUP, |event| {
        if let CacheEvent::Cleanup { count } = event {
            info!("CLEANUP: {} expired entries", count);
        }
    });
}

async fn walkthrough(cache: &CacheSystem<Value>) -> anyhow::Result<()> {
    cache.set_max_size(5);

    cache.set(
        "user:1",
        json!({ "id": 1, "name": "Alice" }),
        Some(Duration::from_secs(2)),
    );
    cache.set("user:2", json!({ "id": 2, "name": "Bob" }), None);
    cache.set(
        "product:1",
        json!({ "id": 1, "name": "Laptop", "price": 999 }),
        None,
    );
    cache.set("config:theme", json!("dark"), None);
    cache.set("config:language", json!("es"), None);

    tokio::time::sleep(Duration::from_millis(100)).await;

    info!("--- Forcing an eviction ---");
    cache.set("config:fontSize", json!("large"), None);

    info!("--- Reading entries ---");
    info!("user:2 = {:?}", cache.get("user:2"));
    info!("user:999 = {:?}", cache.get("user:999"));

    info!("--- Switching to FIFO ---");
    cache.set_eviction_strategy(EvictionStrategy::Fifo);

    println!(
        "Statistics:\n{}",
        serde_json::to_string_pretty(&cache.stats())?
    );

    info!("--- Waiting for user:1 to expire ---");
    tokio::time::sleep(Duration::from_millis(2_100)).await;
    info!("user:1 after expiry = {:?}", cache.get("user:1"));

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
