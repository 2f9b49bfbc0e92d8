//! Session-related types.
//!
//! The session is the storefront's persisted key-value store: one slot
//! holds the serialized cart, two independent slots hold the user
//! preferences. Slots are overwritten wholesale; last writer wins.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session keys for persisted data.
pub mod keys {
    /// Key for the serialized cart (a JSON array of line items).
    pub const CART: &str = "cart";

    /// Key for the display-name preference.
    pub const DISPLAY_NAME: &str = "display_name";

    /// Key for the dark-mode preference.
    pub const DARK_MODE: &str = "dark_mode";
}

/// User preferences read from the session.
///
/// The two slots are independent: the display name is written on explicit
/// form submission, the dark-mode flag also flips on immediate toggle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub display_name: Option<String>,
    pub dark_mode: bool,
}

impl Preferences {
    /// Load both preference slots, defaulting when absent or unreadable.
    pub async fn load(session: &Session) -> Self {
        let display_name = session
            .get::<String>(keys::DISPLAY_NAME)
            .await
            .ok()
            .flatten()
            .filter(|name| !name.is_empty());
        let dark_mode = session
            .get::<bool>(keys::DARK_MODE)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        Self {
            display_name,
            dark_mode,
        }
    }
}
