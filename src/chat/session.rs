use super::{main_menu, BookingFlow, GREETING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Per-user conversation state; never shared between users
#[derive(Debug, Clone)]
pub struct Session {
    pub flow: BookingFlow,
    /// Whether the listing grid should be shown under the chat
    pub show_listings: bool,
    pub actions: Vec<String>,
    pub history: Vec<(Role, String)>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            flow: BookingFlow::Idle,
            show_listings: false,
            actions: main_menu(),
            history: vec![(Role::Assistant, GREETING.to_string())],
        }
    }

    pub fn record(&mut self, role: Role, text: impl Into<String>) {
        self.history.push((role, text.into()));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
