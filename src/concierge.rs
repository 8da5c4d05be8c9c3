use crate::chat::{IntentRouter, Reply, ReplyKind, Role, Session};
use crate::polish::ReplyPolisher;
use crate::resolver::Resolver;
use crate::store::{RecordStore, VisitLog};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Answers one user's messages against a shared, read-only store
pub struct Concierge {
    store: Arc<RecordStore>,
    router: IntentRouter,
    visits: VisitLog,
    polisher: Box<dyn ReplyPolisher>,
}

impl Concierge {
    pub fn new(store: Arc<RecordStore>, visits: VisitLog, polisher: Box<dyn ReplyPolisher>) -> Self {
        Self {
            store,
            router: IntentRouter::new(),
            visits,
            polisher,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Handle one message: an active booking flow takes it first, otherwise
    /// it goes through intent routing. Listing replies are polished.
    pub async fn handle(&self, session: &mut Session, message: &str) -> Result<Reply> {
        session.record(Role::User, message);

        let resolver = Resolver::new(&self.store);
        let mut reply = match session.flow.advance(message, &resolver) {
            Some(step) => {
                if let Some(request) = &step.request {
                    self.visits
                        .append(request)
                        .with_context(|| format!("Failed to save booking to {}", self.visits.path().display()))?;
                }
                step.reply
            }
            None => {
                let (intent, reply) = self.router.route(&self.store, session, message);
                debug!("Intent: {}", intent);
                reply
            }
        };

        if reply.kind == ReplyKind::ListingDetail {
            reply.text = self.polisher.polish(&reply.text).await;
        }

        session.record(Role::Assistant, reply.text.clone());
        session.actions = reply.actions.clone();
        Ok(reply)
    }
}
