// src/message/render.rs
// =============================================================================
// Plain-text rendering of messages and previews for the terminal.
//
// The chat host would draw attachments as colored cards; in a terminal we
// print them as indented blocks:
//
//   [IGDB]
//   == The Witcher 3 <https://www.igdb.com/games/...>
//      Id: 1942
//      Genres:
//        RPG
//        Adventure
//      *Summary: *...
// =============================================================================

use super::types::{Attachment, Message, Preview, PreviewItemKind};

const INDENT: &str = "   ";

pub fn render_message(message: &Message) -> String {
    let mut lines = vec![format!("[{}]", message.alias)];

    if let Some(text) = &message.text {
        lines.extend(text.lines().map(str::to_string));
    }

    for attachment in &message.attachments {
        render_attachment(attachment, &mut lines);
    }

    lines.join("\n")
}

fn render_attachment(attachment: &Attachment, lines: &mut Vec<String>) {
    match &attachment.title {
        Some(title) => match &title.link {
            Some(link) => lines.push(format!("== {} <{}>", title.value, link)),
            None => lines.push(format!("== {}", title.value)),
        },
        None => lines.push("==".to_string()),
    }

    if let Some(url) = &attachment.thumbnail_url {
        lines.push(format!("{}Thumbnail: {}", INDENT, url));
    }
    if let Some(url) = &attachment.image_url {
        lines.push(format!("{}Image: {}", INDENT, url));
    }

    // Collapsed cards only show their title.
    if attachment.collapsed {
        return;
    }

    for field in &attachment.fields {
        if field.short && !field.value.contains('\n') {
            lines.push(format!("{}{}: {}", INDENT, field.title, field.value));
        } else {
            lines.push(format!("{}{}:", INDENT, field.title));
            for line in field.value.lines() {
                lines.push(format!("{}{}{}", INDENT, INDENT, line));
            }
        }
    }

    if let Some(text) = &attachment.text {
        for line in text.lines() {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}{}", INDENT, line));
            }
        }
    }
}

pub fn render_preview(preview: &Preview) -> String {
    let mut lines = vec![preview.title.clone()];
    for item in &preview.items {
        let kind = match item.kind {
            PreviewItemKind::Image => "image",
            PreviewItemKind::Text => "text",
        };
        lines.push(format!("{}{:>8}  {:<5}  {}", INDENT, item.id, kind, item.value));
    }
    lines.join("\n")
}
