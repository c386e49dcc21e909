// src/message/mod.rs
// =============================================================================
// What we send back to the chat.
//
// Submodules:
// - types: Message / Attachment / Preview structures (serde, camelCase)
// - notify: fixed notifications (errors, usage, help building blocks)
// - format: game record -> rich attachment cards
// - render: terminal text for the CLI
// =============================================================================

mod format;
mod notify;
mod render;
mod types;

pub use format::{game_preview, game_results};
pub use notify::{
    bad_api_key, multiple_attachments, no_response, no_results, notification, parse_failure,
    single_attachment, usage,
};
pub use render::{render_message, render_preview};
pub use types::{
    Attachment, AttachmentField, AttachmentTitle, Message, Preview, PreviewItem, PreviewItemKind,
    COLOR_ERROR, COLOR_GAME, COLOR_HEADER, COLOR_HELP,
};
