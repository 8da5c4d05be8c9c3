pub mod booking;
pub mod format;
pub mod router;
pub mod session;

pub use booking::BookingFlow;
pub use router::IntentRouter;
pub use session::{Role, Session};

pub const SHOW_ALL: &str = "Show all properties";
pub const BOOK_VISIT: &str = "Book a visit";
pub const FAQS: &str = "FAQs";
pub const CHECK_AMENITIES: &str = "Check amenities";

pub const GREETING: &str = "Hello! 👋 How can I help you today?";

/// Quick actions offered on greeting and at session start
pub fn main_menu() -> Vec<String> {
    actions(&[SHOW_ALL, BOOK_VISIT, FAQS, CHECK_AMENITIES])
}

pub(crate) fn actions(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

/// What a reply carries, so the caller knows whether it may be rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Plain,
    ListingDetail,
    /// Answer to "show all listings"; the caller renders the grid under it
    ListingGrid,
}

/// Assistant reply plus the quick actions to offer next
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub actions: Vec<String>,
    pub kind: ReplyKind,
}

impl Reply {
    pub fn plain(text: impl Into<String>, actions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            actions,
            kind: ReplyKind::Plain,
        }
    }

    pub fn grid(text: impl Into<String>, actions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            actions,
            kind: ReplyKind::ListingGrid,
        }
    }

    pub fn listing(text: impl Into<String>, actions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            actions,
            kind: ReplyKind::ListingDetail,
        }
    }
}
