//! Telegram login widget and Bot API types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw login widget payload: arbitrary provider fields plus a `hash`
/// signature. Kept as a JSON map because the widget's field set is open
/// (photo_url, first_name, ... appear depending on account settings) and
/// the signature covers all of them.
pub type LoginPayload = Map<String, Value>;

/// Membership statuses that count as "joined" for the community check.
pub const JOINED_STATUSES: &[&str] = &["creator", "administrator", "member"];

/// `getChatMember` response envelope.
#[derive(Debug, Deserialize)]
pub struct ChatMemberEnvelope {
    pub ok: bool,
    pub result: Option<ChatMember>,
    pub description: Option<String>,
}

/// Chat member object, reduced to the fields the service consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMember {
    pub status: String,
}

/// Outcome of a widget login: verified payload plus community membership.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetLoginOutcome {
    pub joined: bool,
    pub user: Value,
}
