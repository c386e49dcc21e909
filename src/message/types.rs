// src/message/types.rs
// =============================================================================
// Chat message structures.
//
// A message is posted under a custom alias and avatar and may carry rich
// attachments (title + link, thumbnail, image, short/long fields). They
// serialize to camelCase JSON so a chat host can take them as-is.
// =============================================================================

use serde::Serialize;

pub const COLOR_ERROR: &str = "#e10000";
pub const COLOR_HELP: &str = "#e4a00e";
pub const COLOR_HEADER: &str = "#00CE00";
pub const COLOR_GAME: &str = "#3eb87a";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub alias: String,
    pub avatar_url: String,
    pub groupable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Whether this message reports a failure (any red attachment).
    pub fn is_error(&self) -> bool {
        self.attachments.iter().any(|a| a.color == COLOR_ERROR)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentTitle {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentField {
    pub short: bool,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub collapsed: bool,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AttachmentTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
}

impl Attachment {
    /// Start an expanded attachment with the given side color.
    pub fn new(color: &str) -> Self {
        Self {
            collapsed: false,
            color: color.to_string(),
            title: None,
            text: None,
            thumbnail_url: None,
            image_url: None,
            fields: Vec::new(),
        }
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(AttachmentTitle {
            value: value.into(),
            link: None,
        });
        self
    }

    /// Title that links somewhere; a missing link gives a plain title.
    pub fn linked_title(mut self, value: impl Into<String>, link: Option<String>) -> Self {
        self.title = Some(AttachmentTitle {
            value: value.into(),
            link,
        });
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail_url = url;
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn fields(mut self, fields: Vec<AttachmentField>) -> Self {
        self.fields = fields;
        self
    }
}

/// A preview tile offered while the user is still typing a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PreviewItemKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewItemKind {
    Image,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub title: String,
    pub items: Vec<PreviewItem>,
}

impl Preview {
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }
}
