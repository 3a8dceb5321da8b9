pub mod approve;
pub mod callback;
pub mod cancel;
pub mod create;
pub mod deal;
pub mod help;
pub mod mydeals;
pub mod reject;

use std::sync::Arc;

use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::ComponentInteraction;
use serenity::model::channel::Message;
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use tokio::sync::Mutex;
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

use crate::db::DealStore;
use crate::models::{Inbound, Outbound, Reply};
use crate::services::capture_service::{self, Sessions};
use crate::services::reply_service;
use crate::utils::Cooldowns;

const COMMANDS: &[&str] = &[
    "create", "cancel", "deal", "approve", "reject", "mydeals", "help", "start", "about",
];

/// Routes inbound chat events to the capture and deal lifecycle machines.
///
/// Events may arrive concurrently. Deal mutations are serialised by the store
/// lock, and whenever both locks are needed they are taken sessions first.
pub struct Router {
    prefix: String,
    store: Mutex<Box<dyn DealStore>>,
    sessions: Mutex<Sessions>,
    cooldowns: Mutex<Cooldowns>,
}

impl Router {
    pub fn new(store: Box<dyn DealStore>, prefix: &str, cooldown_seconds: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            store: Mutex::new(store),
            sessions: Mutex::new(Sessions::new()),
            cooldowns: Mutex::new(Cooldowns::new(cooldown_seconds)),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Classify a chat message. Anything that is not a known command is free text,
    /// so a description starting with the prefix still reaches the capture.
    pub fn parse_message(&self, content: &str, from: i64) -> Inbound {
        if let Some(rest) = content.trim_start().strip_prefix(&self.prefix) {
            let mut parts = rest.split_whitespace();
            if let Some(name) = parts.next() {
                let name = name.to_lowercase();
                if COMMANDS.contains(&name.as_str()) {
                    return Inbound::Command {
                        name,
                        args: parts.map(str::to_string).collect(),
                        from,
                    };
                }
            }
        }

        Inbound::FreeText {
            text: content.to_string(),
            from,
        }
    }

    pub async fn dispatch(&self, event: Inbound) -> Vec<Outbound> {
        match event {
            Inbound::Command { name, args, from } => self.dispatch_command(&name, &args, from).await,
            Inbound::FreeText { text, from } => {
                let mut sessions = self.sessions.lock().await;
                let mut store = self.store.lock().await;
                capture_service::handle_input(&mut sessions, &mut **store, from, &text)
                    .map(Outbound::reply)
                    .into_iter()
                    .collect()
            }
            Inbound::ButtonPress { token, from } => {
                let mut store = self.store.lock().await;
                callback::execute(&mut **store, &token, from)
            }
        }
    }

    async fn dispatch_command(&self, name: &str, args: &[String], from: i64) -> Vec<Outbound> {
        if !COMMANDS.contains(&name) {
            return Vec::new();
        }

        let cooldown = self.cooldowns.lock().await.check(from, name);
        if let Err((remaining_seconds, should_warn)) = cooldown {
            debug!("User {} on cooldown for {} ({}s left)", from, name, remaining_seconds);
            return if should_warn {
                vec![Outbound::reply(Reply::Cooldown { remaining_seconds })]
            } else {
                Vec::new()
            };
        }

        let mut sessions = self.sessions.lock().await;
        let step = capture_service::step_of(&sessions, from);
        let abandoned = capture_service::abandon(&mut sessions, from);
        if let Some(step) = step.filter(|_| !matches!(name, "create" | "cancel")) {
            debug!("User {} abandoned deal creation at {} with {}", from, step, name);
        }

        let mut store = self.store.lock().await;
        let reply = match name {
            "create" => create::execute(&mut sessions, from),
            "cancel" => cancel::execute(abandoned),
            "deal" => deal::execute(&**store, from, args, &self.prefix),
            "approve" => approve::execute(&mut **store, from, args, &self.prefix),
            "reject" => reject::execute(&mut **store, from, args, &self.prefix),
            "mydeals" => mydeals::execute(&**store, from),
            _ => help::execute(),
        };
        vec![reply]
    }
}

fn router_from(data: &serenity::prelude::TypeMap) -> Option<Arc<Router>> {
    data.get::<crate::EscrowRouter>().cloned()
}

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let Some(router) = router_from(&*ctx.data.read().await) else {
        error!("Router not initialized");
        return;
    };

    let user_id = msg.author.id.get() as i64;
    let event = router.parse_message(&msg.content, user_id);
    let span = info_span!("message", event_id = %Uuid::new_v4(), user_id);

    let replies = router.dispatch(event).instrument(span).await;
    for outbound in replies {
        match outbound {
            Outbound::Reply { body, buttons } => {
                send_reply(ctx, msg.channel_id, &router, &body, &buttons).await
            }
            Outbound::Acknowledge { .. } => {
                warn!("Dropping acknowledgement for a plain message");
            }
        }
    }
}

pub async fn handle_component(ctx: &Context, component: &ComponentInteraction) {
    let Some(router) = router_from(&*ctx.data.read().await) else {
        error!("Router not initialized");
        return;
    };

    let user_id = component.user.id.get() as i64;
    let event = Inbound::ButtonPress {
        token: component.data.custom_id.clone(),
        from: user_id,
    };
    let span = info_span!("button", event_id = %Uuid::new_v4(), user_id);

    let replies = router.dispatch(event).instrument(span).await;
    for outbound in replies {
        match outbound {
            Outbound::Acknowledge { text, alert } => {
                // An alert is only shown to the presser; otherwise the pressed
                // message loses its buttons so it cannot be pressed again.
                let response = if alert {
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .content(text)
                            .ephemeral(true),
                    )
                } else {
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .content(text)
                            .components(Vec::new()),
                    )
                };
                if let Err(e) = component.create_response(ctx, response).await {
                    warn!("Failed to acknowledge button press: {}", e);
                }
            }
            Outbound::Reply { body, buttons } => {
                send_reply(ctx, component.channel_id, &router, &body, &buttons).await
            }
        }
    }
}

async fn send_reply(
    ctx: &Context,
    channel_id: ChannelId,
    router: &Router,
    body: &Reply,
    buttons: &[crate::models::DealAction],
) {
    let message = reply_service::create_reply_message(body, buttons, router.prefix());
    if let Err(e) = channel_id.send_message(ctx, message).await {
        warn!("Failed to send reply to channel {}: {}", channel_id, e);
    }
}
