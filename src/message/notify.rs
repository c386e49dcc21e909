// src/message/notify.rs
// =============================================================================
// Small, fixed messages: plain notifications, error cards, usage hints.
//
// Every message goes out under the configured bot name and avatar and is
// never grouped with the previous message.
// =============================================================================

use super::types::{Attachment, Message, COLOR_ERROR};
use crate::config::Settings;

fn base(settings: &Settings) -> Message {
    Message {
        alias: settings.name.clone(),
        avatar_url: settings.icon.clone(),
        groupable: false,
        text: None,
        attachments: Vec::new(),
    }
}

pub fn notification(settings: &Settings, text: impl Into<String>) -> Message {
    Message {
        text: Some(text.into()),
        ..base(settings)
    }
}

pub fn single_attachment(settings: &Settings, attachment: Attachment) -> Message {
    multiple_attachments(settings, vec![attachment])
}

pub fn multiple_attachments(settings: &Settings, attachments: Vec<Attachment>) -> Message {
    Message {
        attachments,
        ..base(settings)
    }
}

fn error_card(settings: &Settings, title: &str, text: &str) -> Message {
    single_attachment(settings, Attachment::new(COLOR_ERROR).title(title).text(text))
}

pub fn bad_api_key(settings: &Settings) -> Message {
    error_card(
        settings,
        "No API Key!",
        "Please set the API Key in the App Settings.",
    )
}

pub fn no_response(settings: &Settings) -> Message {
    error_card(settings, "Failed to get a response!", "Please try again.")
}

pub fn parse_failure(settings: &Settings) -> Message {
    error_card(settings, "Failed to parse response!", "Please try again.")
}

pub fn no_results(settings: &Settings) -> Message {
    notification(settings, "No results!")
}

// "Usage: `...`", optionally preceded by a line explaining what went wrong.
pub fn usage(settings: &Settings, usage: &str, problem: Option<&str>) -> Message {
    let text = match problem {
        Some(problem) => format!("{}\nUsage: {}", problem, usage),
        None => format!("Usage: {}", usage),
    };
    notification(settings, text)
}
