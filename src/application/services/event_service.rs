use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::application::messaging::CommandRouter;
use crate::domain::entities::ChatEvent;

/// Outcome of handling one inbound event, serialized as `{"status": ...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventOutcome {
    Ok,
    Ignored,
    InvalidEvent,
}

/// Entry point for inbound chat events.
///
/// Filters out non-actionable events, extracts channel and text, and runs
/// the router on its own task. Concurrent router runs are bounded by
/// `max_workers`.
pub struct EventService {
    router: Arc<CommandRouter>,
    workers: Arc<Semaphore>,
}

impl EventService {
    pub fn new(router: Arc<CommandRouter>, max_workers: usize) -> Self {
        Self {
            router,
            workers: Arc::new(Semaphore::new(max_workers.max(1))),
        }
    }

    /// Handle a raw event payload, either the full envelope or the inner event.
    pub async fn handle_event(&self, payload: serde_json::Value) -> EventOutcome {
        let event_value = match payload.get("event") {
            Some(inner) => inner.clone(),
            None => payload,
        };

        if !ChatEvent::is_actionable_value(&event_value) {
            tracing::debug!(
                event_type = ?event_value.get("type"),
                subtype = ?event_value.get("subtype"),
                from_bot = event_value.get("bot_id").is_some(),
                "Ignoring event"
            );
            return EventOutcome::Ignored;
        }

        let event: ChatEvent = match serde_json::from_value(event_value) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "Event payload has unexpected shape");
                return EventOutcome::InvalidEvent;
            }
        };

        self.handle(event).await
    }

    pub async fn handle(&self, event: ChatEvent) -> EventOutcome {
        if !event.is_actionable() {
            tracing::debug!(
                event_type = ?event.event_type,
                subtype = ?event.subtype,
                from_bot = event.bot_id.is_some(),
                "Ignoring event"
            );
            return EventOutcome::Ignored;
        }

        let (Some(channel), Some(text)) = (event.channel(), event.text()) else {
            tracing::warn!("Message event without channel or text");
            return EventOutcome::InvalidEvent;
        };

        let channel = channel.to_string();
        let text = text.to_string();
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("chat_event", %request_id, channel = %channel);

        let permit = match self.workers.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!(error = %e, "Worker pool closed");
                return EventOutcome::Ok;
            }
        };

        let router = self.router.clone();
        let task = tokio::spawn(
            async move {
                let _permit = permit;
                router.route_text(&text, &channel).await;
            }
            .instrument(span),
        );

        // A panic inside the router must not reach the webhook caller
        if let Err(e) = task.await {
            tracing::error!(%request_id, error = %e, "Router task failed");
        }

        EventOutcome::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::messaging::mocks::{MockAi, MockChat};
    use serde_json::json;

    fn service(chat: &Arc<MockChat>) -> EventService {
        let ai = Arc::new(MockAi::replying("hello back"));
        let router = CommandRouter::new(chat.clone(), ai);
        EventService::new(Arc::new(router), 4)
    }

    #[tokio::test]
    async fn test_message_is_routed() {
        let chat = Arc::new(MockChat::default());
        let payload = json!({
            "type": "event_callback",
            "event": {"type": "message", "channel": "C1", "user": "U1", "text": "<@UBOT> ai hi"}
        });

        let outcome = service(&chat).handle_event(payload).await;

        assert_eq!(outcome, EventOutcome::Ok);
        assert_eq!(
            chat.sent(),
            vec![("C1".to_string(), "AI Response:\nhello back".to_string())]
        );
    }

    #[tokio::test]
    async fn test_bot_message_is_ignored() {
        let chat = Arc::new(MockChat::default());
        let payload = json!({
            "event": {"type": "message", "channel": "C1", "bot_id": "B1", "text": "ai loop"}
        });

        assert_eq!(service(&chat).handle_event(payload).await, EventOutcome::Ignored);
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_subtype_and_other_types_are_ignored() {
        let chat = Arc::new(MockChat::default());
        let svc = service(&chat);

        let edited = json!({"event": {"type": "message", "subtype": "message_changed",
            "channel": "C1", "message": {"text": "ai hi"}}});
        let reaction = json!({"event": {"type": "reaction_added", "channel": "C1"}});

        assert_eq!(svc.handle_event(edited).await, EventOutcome::Ignored);
        assert_eq!(svc.handle_event(reaction).await, EventOutcome::Ignored);
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_non_message_event_with_object_channel_is_ignored() {
        let chat = Arc::new(MockChat::default());
        let payload = json!({"event": {"type": "channel_created", "channel": {"id": "C1", "name": "ops"}}});

        assert_eq!(service(&chat).handle_event(payload).await, EventOutcome::Ignored);
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_null_bot_id_is_ignored() {
        let chat = Arc::new(MockChat::default());
        let payload = json!({"event": {"type": "message", "bot_id": null,
            "channel": "C1", "text": "list channels"}});

        assert_eq!(service(&chat).handle_event(payload).await, EventOutcome::Ignored);
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_router_panic_is_contained() {
        let chat = Arc::new(MockChat::default().panicking_send());
        let ai = Arc::new(MockAi::replying("unused"));
        let svc = EventService::new(Arc::new(CommandRouter::new(chat.clone(), ai)), 1);
        let payload = json!({"event": {"type": "message", "channel": "C1", "text": "list channels"}});

        assert_eq!(svc.handle_event(payload.clone()).await, EventOutcome::Ok);
        // The single permit was released by the panicking task
        let second = tokio::time::timeout(std::time::Duration::from_secs(5), svc.handle_event(payload))
            .await
            .expect("second event should get a worker");
        assert_eq!(second, EventOutcome::Ok);
        assert_eq!(chat.send_attempts(), 2);
    }

    #[tokio::test]
    async fn test_missing_fields_are_invalid() {
        let chat = Arc::new(MockChat::default());
        let svc = service(&chat);

        let no_channel = json!({"event": {"type": "message", "text": "ai hi"}});
        let no_text = json!({"event": {"type": "message", "channel": "C1"}});
        let bad_shape = json!({"event": {"type": "message", "channel": 5, "text": "ai hi"}});

        assert_eq!(svc.handle_event(no_channel).await, EventOutcome::InvalidEvent);
        assert_eq!(svc.handle_event(no_text).await, EventOutcome::InvalidEvent);
        assert_eq!(svc.handle_event(bad_shape).await, EventOutcome::InvalidEvent);
        assert!(chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_nested_message_text_is_used() {
        let chat = Arc::new(MockChat::default());
        let payload = json!({"event": {"type": "message", "channel": "C9",
            "message": {"text": "list channels"}}});

        assert_eq!(service(&chat).handle_event(payload).await, EventOutcome::Ok);
        assert_eq!(
            chat.sent_texts(),
            vec!["Listing channels is not implemented yet.".to_string()]
        );
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(serde_json::to_value(EventOutcome::Ok).unwrap(), json!({"status": "ok"}));
        assert_eq!(
            serde_json::to_value(EventOutcome::Ignored).unwrap(),
            json!({"status": "ignored"})
        );
        assert_eq!(
            serde_json::to_value(EventOutcome::InvalidEvent).unwrap(),
            json!({"status": "invalid_event"})
        );
    }
}
