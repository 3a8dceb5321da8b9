use serenity::builder::{CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::model::application::ButtonStyle;

use crate::models::{ApprovalOutcome, CaptureStep, Deal, DealAction, Reply};

const COLOR_INFO: u32 = 0x00b0f4;
const COLOR_SUCCESS: u32 = 0x00ff00;
const COLOR_PENDING: u32 = 0xffa500;
const COLOR_ERROR: u32 = 0xff0000;

// Discord caps an embed at 25 fields
const MAX_LIST_FIELDS: usize = 25;
/// Discord rejects embeds whose title, description, field and footer text exceed this total
const MAX_EMBED_CHARS: usize = 6000;
/// Room kept for the "Showing k of N deals" footer
const LIST_FOOTER_RESERVE: usize = 64;

/// Build the Discord message for a reply, with its action buttons
pub fn create_reply_message(reply: &Reply, buttons: &[DealAction], prefix: &str) -> CreateMessage {
    let mut message = CreateMessage::default().embed(create_reply_embed(reply, prefix));
    if let Some(row) = create_action_row(buttons) {
        message = message.components(vec![row]);
    }
    message
}

pub fn create_action_row(actions: &[DealAction]) -> Option<CreateActionRow> {
    if actions.is_empty() {
        return None;
    }

    let buttons = actions
        .iter()
        .map(|action| match action {
            DealAction::Approve(_) => CreateButton::new(action.token())
                .label("Approve")
                .emoji('✅')
                .style(ButtonStyle::Success),
            DealAction::Reject(_) => CreateButton::new(action.token())
                .label("Reject")
                .emoji('❌')
                .style(ButtonStyle::Danger),
        })
        .collect();

    Some(CreateActionRow::Buttons(buttons))
}

pub fn create_reply_embed(reply: &Reply, prefix: &str) -> CreateEmbed {
    match reply {
        Reply::Help => create_help_embed(prefix),
        Reply::CapturePrompt(step) => create_prompt_embed(*step, prefix),
        Reply::CaptureCancelled => CreateEmbed::default()
            .title("🛑 Deal Creation Cancelled")
            .description(format!("Nothing was created. Start again with `{}create`.", prefix))
            .color(COLOR_PENDING),
        Reply::NothingToCancel => CreateEmbed::default()
            .description("There is no deal creation in progress.")
            .color(COLOR_INFO),
        Reply::DealCreated(deal) => create_deal_embed(
            deal,
            format!("✅ Deal #{} created successfully!", deal.id),
            COLOR_SUCCESS,
        )
        .footer(CreateEmbedFooter::new(format!(
            "Use {}deal {} to view details.",
            prefix, deal.id
        ))),
        Reply::DealDetails(deal) => {
            let color = if deal.status.is_terminal() {
                COLOR_INFO
            } else {
                COLOR_PENDING
            };
            let mut embed = create_deal_embed(deal, format!("📋 Deal #{} Details", deal.id), color)
                .field("Buyer Approval", approval_label(deal.approved_by_buyer), true)
                .field("Seller Approval", approval_label(deal.approved_by_seller), true);
            if !deal.status.is_terminal() {
                embed = embed.footer(CreateEmbedFooter::new(format!(
                    "Available actions: {p}approve {id}, {p}reject {id}",
                    p = prefix,
                    id = deal.id
                )));
            }
            embed
        }
        Reply::Approved { deal_id, outcome } => match outcome {
            ApprovalOutcome::Completed => CreateEmbed::default()
                .title(format!("✅ Deal #{} completed!", deal_id))
                .description("Both parties approved. Funds have been released to the seller.")
                .color(COLOR_SUCCESS),
            ApprovalOutcome::Waiting => CreateEmbed::default()
                .title(format!("✅ You approved deal #{}", deal_id))
                .description("Waiting for the other party...")
                .color(COLOR_PENDING),
        },
        Reply::Rejected { deal_id } => CreateEmbed::default()
            .title(format!("❌ Deal #{} rejected", deal_id))
            .description("The transaction is cancelled.")
            .color(COLOR_ERROR),
        Reply::DealList { user_id, deals } => create_deal_list_embed(*user_id, deals),
        Reply::Cooldown { remaining_seconds } => CreateEmbed::default()
            .title("Command Cooldown")
            .description(format!(
                "⏳ Please wait {} seconds before using this command again.",
                remaining_seconds
            ))
            .color(COLOR_PENDING),
        Reply::Error(e) => CreateEmbed::default()
            .title(e.title())
            .description(format!("❌ {}", e))
            .color(COLOR_ERROR),
    }
}

fn create_deal_embed(deal: &Deal, title: String, color: u32) -> CreateEmbed {
    CreateEmbed::default()
        .title(title)
        .field("Buyer", format!("<@{}>", deal.buyer_id), true)
        .field("Seller", format!("<@{}>", deal.seller_id), true)
        .field("Amount", format!("{} {}", deal.amount, deal.currency), true)
        .field("Description", truncate(&deal.description, 1024), false)
        .field("Status", deal.status.as_str(), true)
        .field(
            "Created",
            deal.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            true,
        )
        .color(color)
}

fn create_deal_list_embed(user_id: i64, deals: &[Deal]) -> CreateEmbed {
    if deals.is_empty() {
        return CreateEmbed::default()
            .title("📭 No Deals")
            .description("You have no deals yet.")
            .color(COLOR_INFO);
    }

    let title = "📊 Your Deals";
    let mut embed = CreateEmbed::default().title(title).color(COLOR_INFO);
    let mut used = title.chars().count() + LIST_FOOTER_RESERVE;
    let mut shown = 0;

    for deal in deals.iter().take(MAX_LIST_FIELDS) {
        let role = deal
            .role_of(user_id)
            .map(|r| r.to_string())
            .unwrap_or_default();
        let name = format!("Deal #{} - {}", deal.id, role);
        let value = format!(
            "**Amount**: {} {}\n**Status**: {}\n**Description**: {}",
            deal.amount,
            deal.currency,
            deal.status,
            truncate(&deal.description, 200)
        );

        let cost = name.chars().count() + value.chars().count();
        if used + cost > MAX_EMBED_CHARS {
            break;
        }
        used += cost;
        shown += 1;
        embed = embed.field(name, value, false);
    }

    if shown < deals.len() {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Showing {} of {} deals",
            shown,
            deals.len()
        )));
    }
    embed
}

fn create_prompt_embed(step: CaptureStep, prefix: &str) -> CreateEmbed {
    let (title, description) = match step {
        CaptureStep::SellerId => (
            "📝 Let's create a new escrow deal!",
            "1️⃣ Enter the seller's User ID (or mention them)",
        ),
        CaptureStep::Amount => ("📝 New Deal", "2️⃣ Enter the amount (e.g., 100, 500.50)"),
        CaptureStep::Currency => ("📝 New Deal", "3️⃣ Enter currency code (USD, EUR, GBP, etc.)"),
        CaptureStep::Description => ("📝 New Deal", "4️⃣ Enter description of goods/services"),
    };

    CreateEmbed::default()
        .title(title)
        .description(description)
        .footer(CreateEmbedFooter::new(format!("{}cancel to stop", prefix)))
        .color(COLOR_INFO)
}

fn create_help_embed(prefix: &str) -> CreateEmbed {
    CreateEmbed::default()
        .title("🤝 Escrow Bot Help")
        .description("I help buyers and sellers agree on a deal and track both approvals.")
        .field(
            "📖 How it works",
            "1. The buyer creates a deal\n\
             2. The seller checks the terms\n\
             3. Both parties approve, or either rejects\n\
             4. Once both approve, the deal is completed",
            false,
        )
        .field(
            "💡 Commands",
            format!(
                "`{p}create` - Start a new deal\n\
                 `{p}cancel` - Stop creating a deal\n\
                 `{p}mydeals` - List your deals\n\
                 `{p}deal <id>` - View a deal\n\
                 `{p}approve <id>` - Approve a deal\n\
                 `{p}reject <id>` - Reject a deal",
                p = prefix
            ),
            false,
        )
        .color(COLOR_INFO)
}

fn approval_label(approved: bool) -> &'static str {
    if approved {
        "✅ Approved"
    } else {
        "⏳ Pending"
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::NewDeal;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("book", 10), "book");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("ééééé", 3).chars().count(), 3);
    }

    fn deal(id: i64, description: &str) -> Deal {
        Deal::new(
            id,
            NewDeal {
                buyer_id: 10,
                seller_id: 55,
                amount: 100.0,
                currency: "USD".to_string(),
                description: description.to_string(),
            },
            Utc::now(),
        )
    }

    /// Sum of the text Discord counts against the embed total
    fn embed_text_len(embed: &CreateEmbed) -> usize {
        let json = serde_json::to_value(embed).unwrap();
        let text = |v: &serde_json::Value| v.as_str().map_or(0, |s| s.chars().count());

        let mut total = text(&json["title"]) + text(&json["description"]) + text(&json["footer"]["text"]);
        if let Some(fields) = json["fields"].as_array() {
            for field in fields {
                total += text(&field["name"]) + text(&field["value"]);
            }
        }
        total
    }

    fn field_count(embed: &CreateEmbed) -> usize {
        let json = serde_json::to_value(embed).unwrap();
        json["fields"].as_array().map_or(0, Vec::len)
    }

    #[test]
    fn test_deal_list_stays_within_embed_limit() {
        let deals: Vec<Deal> = (1001..1026).map(|id| deal(id, &"x".repeat(300))).collect();
        let embed = create_deal_list_embed(10, &deals);

        assert!(embed_text_len(&embed) <= MAX_EMBED_CHARS);
        let shown = field_count(&embed);
        assert!(shown > 0 && shown < deals.len());

        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(
            json["footer"]["text"],
            format!("Showing {} of {} deals", shown, deals.len())
        );
    }

    #[test]
    fn test_short_deal_list_has_no_footer() {
        let deals: Vec<Deal> = (1001..1004).map(|id| deal(id, "book")).collect();
        let embed = create_deal_list_embed(10, &deals);

        assert_eq!(field_count(&embed), 3);
        let json = serde_json::to_value(&embed).unwrap();
        assert!(json["footer"].is_null());
    }

    #[test]
    fn test_action_row_only_with_actions() {
        assert!(create_action_row(&[]).is_none());
        assert!(create_action_row(&[DealAction::Approve(1001), DealAction::Reject(1001)]).is_some());
    }
}
