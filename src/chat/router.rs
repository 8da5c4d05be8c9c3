//! Keyword intent routing.
//!
//! Rules are checked in order against the lower-cased message. A rule
//! wins when its predicate holds and its handler produces a reply; lookup
//! rules may decline, letting later rules try.

use super::format::{listing_detail, thousands};
use super::{actions, main_menu, Reply, Session, BOOK_VISIT, CHECK_AMENITIES, GREETING, SHOW_ALL};
use crate::resolver::Resolver;
use crate::store::RecordStore;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Listing ids as typed into questions, e.g. "P003"
static LISTING_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"P\d+").unwrap());

/// Connector phrases and category nouns removed before a second lookup
static FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"show details for|details for|information about|tell me about|what is|price of|property|apartment|villa|studio|office|house",
    )
    .unwrap()
});

const FAQ_LIST: &str = "Here are some FAQs:\n\n\
    1️⃣ Do you offer home loans? ✅ Yes, we have tie-ups with banks.\n\
    2️⃣ Can I visit properties before booking? ✅ Yes, you can book a visit.\n\
    3️⃣ Are there any hidden charges? ❌ No, all charges are transparent.";

const OFFICE_ANSWER: &str = "Our head office is at 123 Palm St, Dubai.";
const HOURS_ANSWER: &str = "We are available 9am–6pm IST, Mon–Sat.";

const NOT_UNDERSTOOD: &str = "I didn't understand that. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    ShowListings,
    StartBooking,
    Amenities,
    FaqList,
    Price,
    GeneralFaq,
    Lookup,
    StrippedLookup,
    NotUnderstood,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Everything a rule handler may read or change for one message
struct Turn<'a> {
    /// Lower-cased, trimmed message
    text: &'a str,
    store: &'a RecordStore,
    resolver: Resolver<'a>,
    session: &'a mut Session,
}

type Predicate = fn(&str) -> bool;
type Handler = fn(&mut Turn<'_>) -> Option<Reply>;

struct Rule {
    intent: Intent,
    applies: Predicate,
    handle: Handler,
}

/// Ordered intent cascade
pub struct IntentRouter {
    rules: Vec<Rule>,
}

impl IntentRouter {
    pub fn new() -> Self {
        let rules = vec![
            Rule {
                intent: Intent::Greeting,
                applies: |t| matches!(t, "hi" | "hello" | "hey"),
                handle: |_| Some(Reply::plain(GREETING, main_menu())),
            },
            Rule {
                intent: Intent::ShowListings,
                applies: |t| t.contains("properties"),
                handle: show_listings,
            },
            Rule {
                intent: Intent::StartBooking,
                applies: |t| t.contains("book") || t.contains("visit"),
                handle: |turn| Some(turn.session.flow.start()),
            },
            Rule {
                intent: Intent::Amenities,
                applies: |t| t.contains("amenities"),
                handle: amenities,
            },
            Rule {
                intent: Intent::FaqList,
                applies: |t| t.contains("faq"),
                handle: |_| Some(Reply::plain(FAQ_LIST, actions(&[SHOW_ALL, BOOK_VISIT]))),
            },
            Rule {
                intent: Intent::Price,
                applies: |t| t.contains("price"),
                handle: price,
            },
            Rule {
                intent: Intent::GeneralFaq,
                applies: |t| faq_answer(t).is_some(),
                handle: |turn| {
                    faq_answer(turn.text)
                        .map(|answer| Reply::plain(answer, actions(&[SHOW_ALL, BOOK_VISIT])))
                },
            },
            Rule {
                intent: Intent::Lookup,
                applies: |_| true,
                handle: |turn| turn.resolver.resolve(turn.text).map(detail_reply),
            },
            Rule {
                intent: Intent::StrippedLookup,
                applies: |_| true,
                handle: stripped_lookup,
            },
            Rule {
                intent: Intent::NotUnderstood,
                applies: |_| true,
                handle: |_| Some(Reply::plain(NOT_UNDERSTOOD, actions(&[SHOW_ALL, BOOK_VISIT]))),
            },
        ];
        Self { rules }
    }

    /// Classify `message` and build the reply, updating session display state
    pub fn route(&self, store: &RecordStore, session: &mut Session, message: &str) -> (Intent, Reply) {
        let lowered = message.trim().to_lowercase();
        let mut turn = Turn {
            text: &lowered,
            store,
            resolver: Resolver::new(store),
            session,
        };

        for rule in &self.rules {
            if !(rule.applies)(turn.text) {
                continue;
            }
            if let Some(reply) = (rule.handle)(&mut turn) {
                debug!("Routed '{}' as {}", lowered, rule.intent);
                return (rule.intent, reply);
            }
        }

        // The last rule always answers; this only guards an empty rule list.
        (
            Intent::NotUnderstood,
            Reply::plain(NOT_UNDERSTOOD, actions(&[SHOW_ALL, BOOK_VISIT])),
        )
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Canned answers for office and opening-hours questions
pub fn faq_answer(text: &str) -> Option<&'static str> {
    let t = text.to_lowercase();
    if ["where is your office", "office location", "address"]
        .iter()
        .any(|k| t.contains(k))
    {
        return Some(OFFICE_ANSWER);
    }
    if ["working hours", "hours", "timings"].iter().any(|k| t.contains(k)) {
        return Some(HOURS_ANSWER);
    }
    None
}

fn detail_reply(record: &crate::models::PropertyRecord) -> Reply {
    Reply::listing(listing_detail(record), actions(&[BOOK_VISIT, SHOW_ALL]))
}

fn show_listings(turn: &mut Turn<'_>) -> Option<Reply> {
    turn.session.show_listings = true;
    Some(Reply::grid(
        "Here are the available properties:",
        actions(&[BOOK_VISIT, CHECK_AMENITIES]),
    ))
}

fn amenities(turn: &mut Turn<'_>) -> Option<Reply> {
    turn.session.show_listings = false;
    let lines = turn
        .store
        .iter()
        .map(|p| format!("🏠 {}: {}", p.property_name, p.short_description))
        .collect::<Vec<_>>()
        .join("\n");
    Some(Reply::plain(
        format!("Here are the amenities for each property:\n\n{}", lines),
        vec![],
    ))
}

fn price(turn: &mut Turn<'_>) -> Option<Reply> {
    let upper = turn.text.to_uppercase();
    if let Some(id) = LISTING_ID_RE.find(&upper) {
        if let Some(record) = turn.resolver.resolve(id.as_str()) {
            return Some(detail_reply(record));
        }
    }

    if let Some(record) = turn.resolver.resolve(turn.text) {
        return Some(detail_reply(record));
    }

    let prices = turn
        .store
        .iter()
        .map(|p| format!("{}: {} {}", p.property_name, thousands(p.price as i64), p.price_currency))
        .collect::<Vec<_>>()
        .join("\n");
    Some(Reply::plain(
        format!("Here are the property prices:\n\n{}", prices),
        vec![],
    ))
}

fn stripped_lookup(turn: &mut Turn<'_>) -> Option<Reply> {
    let stripped = FILLER_RE.replace_all(turn.text, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return None;
    }
    turn.resolver.resolve(stripped).map(detail_reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ReplyKind;
    use crate::models::fixtures::sample_records;

    fn route(message: &str) -> (Intent, Reply, Session) {
        let store = RecordStore::from_records(sample_records()).unwrap();
        let mut session = Session::new();
        let (intent, reply) = IntentRouter::new().route(&store, &mut session, message);
        (intent, reply, session)
    }

    #[test]
    fn test_greeting() {
        let (intent, reply, _) = route("  Hello ");
        assert_eq!(intent, Intent::Greeting);
        assert_eq!(reply.text, GREETING);
        assert_eq!(reply.actions, main_menu());
    }

    #[test]
    fn test_show_listings_sets_flag() {
        let (intent, reply, session) = route("Show all properties");
        assert_eq!(intent, Intent::ShowListings);
        assert!(session.show_listings);
        assert_eq!(reply.kind, ReplyKind::ListingGrid);
        assert_eq!(reply.actions, actions(&[BOOK_VISIT, CHECK_AMENITIES]));
    }

    #[test]
    fn test_amenities_clears_flag() {
        let store = RecordStore::from_records(sample_records()).unwrap();
        let router = IntentRouter::new();
        let mut session = Session::new();
        router.route(&store, &mut session, "properties please");
        assert!(session.show_listings);

        let (intent, reply) = router.route(&store, &mut session, "Check amenities");
        assert_eq!(intent, Intent::Amenities);
        assert!(!session.show_listings);
        assert!(reply.text.contains("🏠 Marina Studio: Marina Studio with sea view"));
        assert!(reply.actions.is_empty());
    }

    #[test]
    fn test_other_intents_leave_flag_alone() {
        let store = RecordStore::from_records(sample_records()).unwrap();
        let router = IntentRouter::new();
        let mut session = Session::new();
        router.route(&store, &mut session, "show all properties");
        router.route(&store, &mut session, "faqs");
        router.route(&store, &mut session, "P003");
        assert!(session.show_listings);
    }

    #[test]
    fn test_book_starts_flow() {
        let (intent, reply, session) = route("I want to book a visit");
        assert_eq!(intent, Intent::StartBooking);
        assert!(reply.text.contains("full name"));
        assert!(session.flow.is_active());
    }

    #[test]
    fn test_properties_keyword_outranks_booking() {
        let (intent, _, session) = route("book one of your properties");
        assert_eq!(intent, Intent::ShowListings);
        assert!(!session.flow.is_active());
    }

    #[test]
    fn test_faq_list() {
        let (intent, reply, _) = route("FAQs");
        assert_eq!(intent, Intent::FaqList);
        assert!(reply.text.starts_with("Here are some FAQs:"));
    }

    #[test]
    fn test_price_with_embedded_id() {
        let (intent, reply, _) = route("what is the price of p003?");
        assert_eq!(intent, Intent::Price);
        assert_eq!(reply.kind, ReplyKind::ListingDetail);
        assert!(reply.text.starts_with("Marina Studio — 0 BHK (540 sqft) in Dubai. Price: 320,000 AED."));
        assert_eq!(reply.actions, actions(&[BOOK_VISIT, SHOW_ALL]));
    }

    #[test]
    fn test_price_unknown_id_lists_all_prices() {
        let (intent, reply, _) = route("price for P999");
        assert_eq!(intent, Intent::Price);
        assert_eq!(reply.kind, ReplyKind::Plain);
        assert!(reply.text.starts_with("Here are the property prices:"));
        assert!(reply.text.contains("Sunrise Apartments: 1,250,000 USD"));
        assert!(reply.text.contains("Marina Studio: 320,000 AED"));
        assert!(reply.actions.is_empty());
    }

    #[test]
    fn test_general_faq() {
        let (intent, reply, _) = route("What are your working hours?");
        assert_eq!(intent, Intent::GeneralFaq);
        assert_eq!(reply.text, HOURS_ANSWER);

        let (intent, reply, _) = route("where is your office");
        assert_eq!(intent, Intent::GeneralFaq);
        assert_eq!(reply.text, OFFICE_ANSWER);
    }

    #[test]
    fn test_lookup_on_raw_text() {
        let (intent, reply, _) = route("Palm Garden Villa");
        assert_eq!(intent, Intent::Lookup);
        assert!(reply.text.starts_with("Palm Garden Villa — 5 BHK"));
    }

    #[test]
    fn test_lookup_after_stripping_filler() {
        let (intent, reply, _) = route("Tell me about Marina Studio");
        assert_eq!(intent, Intent::StrippedLookup);
        assert!(reply.text.starts_with("Marina Studio"));

        let (intent, reply, _) = route("show details for sunrise apartments");
        assert_eq!(intent, Intent::StrippedLookup);
        assert!(reply.text.starts_with("Sunrise Apartments"));
    }

    #[test]
    fn test_not_understood() {
        let (intent, reply, _) = route("quantum flux capacitor");
        assert_eq!(intent, Intent::NotUnderstood);
        assert_eq!(reply.text, NOT_UNDERSTOOD);
        assert_eq!(reply.actions, actions(&[SHOW_ALL, BOOK_VISIT]));

        let (intent, _, _) = route("villa");
        assert_eq!(intent, Intent::Lookup);
    }
}
