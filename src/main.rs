use std::sync::Arc;

use serenity::async_trait;
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod db;
mod models;
mod services;
mod utils;

use config::Config;
use db::InMemoryDealStore;

struct Handler;

struct EscrowRouter;

impl TypeMapKey for EscrowRouter {
    type Value = Arc<commands::Router>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Component(component) = interaction {
            commands::handle_component(&ctx, &component).await;
        }
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    for directive in ["escrow_bot=debug", "serenity=warn"] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Invalid log directive {}: {}", directive, e),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🤝 Starting escrow bot...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Command prefix {:?}, deal ids from {}, cooldown {}s",
        config.command_prefix,
        config.deal_id_offset.saturating_add(1),
        config.cooldown_seconds
    );

    let router = commands::Router::new(
        Box::new(InMemoryDealStore::with_offset(config.deal_id_offset)),
        &config.command_prefix,
        config.cooldown_seconds,
    );

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create client: {}", e);
            std::process::exit(1);
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<EscrowRouter>(Arc::new(router));
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
