use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecocollect_client::models::LoginRequest;
use ecocollect_client::services::{ApiClient, AuthService, NotificationService};
use ecocollect_client::views::{ConsoleStatus, NotificationsConsole};
use ecocollect_client::{ClientEvent, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Arc::new(Config::from_env()?);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EcoCollect console against {}", config.api_base_url);

    let api = ApiClient::from_config(config.clone())?;
    let auth = AuthService::new(api.clone());
    let notifications = NotificationService::new(api.clone());

    // Session-level listener: drop the credential when the backend rejects it
    let mut signals = api.events().subscribe();
    let listener_tokens = api.tokens().clone();
    tokio::spawn(async move {
        while let Ok(event) = signals.recv().await {
            match event {
                ClientEvent::AuthenticationError { message, status } => {
                    warn!(?status, "{}", message);
                    if status.is_some() {
                        if let Err(e) = listener_tokens.remove() {
                            error!("Failed to clear session: {}", e);
                        }
                    }
                }
                ClientEvent::ServerError { message, status } => error!(status, "{}", message),
                ClientEvent::NetworkStatusChange { is_online } => info!(is_online, "Connectivity"),
            }
        }
    });

    if let (Ok(email), Ok(password)) = (
        std::env::var("CONSOLE_EMAIL"),
        std::env::var("CONSOLE_PASSWORD"),
    ) {
        auth.login(LoginRequest { email, password }).await?;
    }

    let Some(claims) = auth.current_session()? else {
        warn!("No stored session. Set CONSOLE_EMAIL and CONSOLE_PASSWORD to log in.");
        return Ok(());
    };
    let Some(user_id) = claims.user_id() else {
        anyhow::bail!("Session token does not identify a user");
    };

    let mut console = NotificationsConsole::new(notifications.clone(), user_id);
    console.load().await;

    let state = console.state();
    match &state.status {
        ConsoleStatus::Loaded => {
            println!(
                "Page {}/{} - {} notifications, {} unread",
                state.page() + 1,
                state.total_pages.max(1),
                state.notifications.len(),
                state.unread_on_page()
            );
            for n in &state.notifications {
                let marker = if n.is_read { " " } else { "*" };
                println!(
                    "{} [{}] {} {}",
                    marker,
                    n.notification_type,
                    n.created_at.format("%Y-%m-%d %H:%M"),
                    n.message
                );
            }
        }
        ConsoleStatus::Error(message) => error!("Could not load notifications: {}", message),
        _ => {}
    }

    match notifications.get_alert_status().await {
        Ok(Some(alert)) => println!("Active alert: {}", alert.message),
        Ok(None) => println!("No active alerts"),
        Err(e) => error!("Alert status unavailable: {}", e),
    }

    Ok(())
}
