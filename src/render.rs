use chrono::NaiveDateTime;

use crate::{
    models::{
        message::NotificationMessage,
        submission::{Contact, ContactType, Inquiry, Order, Submission},
    },
    utils::escape_html,
};

pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

const CALL_TO_ACTION: &str = "\u{1f446} Message the customer!";

/// Renders the message for a submission. `now` is the local wall-clock time
/// the submission was received.
pub fn render_submission(
    submission: &Submission,
    now: NaiveDateTime,
    currency: &str,
) -> NotificationMessage {
    match submission {
        Submission::Order(order) => render_order(order, now, currency),
        Submission::Inquiry(inquiry) => render_inquiry(inquiry, now),
    }
}

pub fn render_order(order: &Order, now: NaiveDateTime, currency: &str) -> NotificationMessage {
    let mut lines = vec![
        "\u{1f6d2} <b>New order!</b>".to_string(),
        format!("\u{1f4c5} {}", now.format(TIMESTAMP_FORMAT)),
        String::new(),
    ];

    if !order.items.is_empty() {
        lines.push("<b>Order items:</b>".to_string());
        for item in &order.items {
            lines.push(format!(
                "  \u{2022} {} \u{2014} {} \u{2014} {} {}",
                escape_html(&item.name),
                escape_html(&item.detail),
                escape_html(item.total.as_str()),
                currency
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "\u{1f4b0} <b>Total: {} {}</b>",
            escape_html(order.total.as_str()),
            currency
        ));
        lines.push(String::new());
    }

    push_footer(&mut lines, &order.contact);

    NotificationMessage::from_lines(lines)
}

pub fn render_inquiry(inquiry: &Inquiry, now: NaiveDateTime) -> NotificationMessage {
    let mut lines = vec![
        "\u{1f4e9} <b>New request!</b>".to_string(),
        format!("\u{1f4c5} {}", now.format(TIMESTAMP_FORMAT)),
        String::new(),
    ];

    if let Some(product_name) = &inquiry.product_name {
        lines.push(format!(
            "\u{1f375} Interested in: <b>{}</b>",
            escape_html(product_name)
        ));
        lines.push(String::new());
    }

    if let Some(message) = &inquiry.message {
        lines.push(format!("\u{1f4ac} Message: {}", escape_html(message)));
        lines.push(String::new());
    }

    push_footer(&mut lines, &inquiry.contact);

    NotificationMessage::from_lines(lines)
}

/// Telegram handles become a t.me link with leading `@`s stripped; WhatsApp
/// numbers stay plain text.
pub fn format_contact(contact: &Contact) -> String {
    match contact.kind {
        ContactType::Telegram => {
            let username = escape_html(contact.value.trim_start_matches('@'));
            format!(r#"Telegram: <a href="https://t.me/{username}">@{username}</a>"#)
        }
        ContactType::WhatsApp => format!("WhatsApp: {}", escape_html(&contact.value)),
    }
}

fn push_footer(lines: &mut Vec<String>, contact: &Contact) {
    lines.push(format!("\u{1f4f1} <b>Contact:</b> {}", format_contact(contact)));
    lines.push(String::new());
    lines.push(CALL_TO_ACTION.to_string());
}
