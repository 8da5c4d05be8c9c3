use super::{actions, Reply, SHOW_ALL};
use crate::models::BookingRequest;
use crate::resolver::Resolver;
use tracing::debug;

pub const SKIP_KEYWORD: &str = "skip";

/// Three-step visit capture; each state carries what has been collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingFlow {
    #[default]
    Idle,
    AskName,
    AskPhone {
        name: String,
    },
    AskProperty {
        name: String,
        phone: String,
    },
}

/// Outcome of feeding one message to an active flow
#[derive(Debug, Clone)]
pub struct FlowStep {
    pub reply: Reply,
    /// Set only when the final step completes
    pub request: Option<BookingRequest>,
}

impl BookingFlow {
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingFlow::Idle)
    }

    /// Enter `AskName`, discarding anything collected earlier
    pub fn start(&mut self) -> Reply {
        *self = BookingFlow::AskName;
        Reply::plain("Sure! Let's schedule a visit. Please share your full name:", vec![])
    }

    /// Consume the next message; `None` when the flow is idle
    pub fn advance(&mut self, message: &str, resolver: &Resolver<'_>) -> Option<FlowStep> {
        let value = message.trim().to_string();

        let (next, step) = match std::mem::take(self) {
            BookingFlow::Idle => return None,
            BookingFlow::AskName => (
                BookingFlow::AskPhone { name: value },
                FlowStep {
                    reply: Reply::plain("Thanks! Please share your phone number:", vec![]),
                    request: None,
                },
            ),
            BookingFlow::AskPhone { name } => (
                BookingFlow::AskProperty { name, phone: value },
                FlowStep {
                    reply: Reply::plain(
                        "Which property? You can send listing id like P003 or name (optional, type 'skip').",
                        vec![],
                    ),
                    request: None,
                },
            ),
            BookingFlow::AskProperty { name, phone } => {
                let listing = if value.eq_ignore_ascii_case(SKIP_KEYWORD) {
                    None
                } else {
                    resolver.resolve(message)
                };
                debug!(
                    "Booking flow property step resolved to {:?}",
                    listing.map(|p| &p.listing_id)
                );
                let request = BookingRequest::capture(listing, name, phone, message.to_string());
                (
                    BookingFlow::Idle,
                    FlowStep {
                        reply: Reply::plain(
                            "✅ Booking captured. Our team will reach out shortly.",
                            actions(&[SHOW_ALL]),
                        ),
                        request: Some(request),
                    },
                )
            }
        };

        *self = next;
        Some(step)
    }
}
