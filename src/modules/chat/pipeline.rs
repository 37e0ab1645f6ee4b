//! Filter, dispatch and reply normalisation for a single chat message.
//!
//! Every path ends in a reply string: a blocked prompt, an agent failure and
//! an empty agent answer each map to a fixed reply from [`ChatPolicy`].

use crate::modules::chat::policy::ChatPolicy;
use crate::modules::interaction::{
    crud,
    model::{Interaction, Outcome},
};
use crate::services::agent::{AgentClient, AgentError};
use crate::AppState;

#[derive(Debug)]
pub enum ChatOutcome {
    Blocked,
    Answered(String),
    /// The agent call succeeded but produced no text.
    Fallback,
    Failed(AgentError),
}

impl ChatOutcome {
    pub fn reply<'a>(&'a self, policy: &'a ChatPolicy) -> &'a str {
        match self {
            ChatOutcome::Blocked => &policy.blocked_reply,
            ChatOutcome::Answered(text) => text,
            ChatOutcome::Fallback => &policy.fallback_reply,
            ChatOutcome::Failed(_) => &policy.error_reply,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            ChatOutcome::Blocked => Outcome::Blocked,
            ChatOutcome::Answered(_) => Outcome::Answered,
            ChatOutcome::Fallback => Outcome::Fallback,
            ChatOutcome::Failed(_) => Outcome::Failed,
        }
    }
}

pub async fn run(
    agent: &AgentClient,
    policy: &ChatPolicy,
    session_id: &str,
    message: &str,
) -> ChatOutcome {
    if let Some(term) = policy.blocked_term(message) {
        tracing::warn!(target: "interactions", %session_id, %message, %term, "blocked prompt");
        return ChatOutcome::Blocked;
    }

    tracing::info!(target: "interactions", %session_id, %message, "user prompt");

    match agent.detect_intent(session_id, message).await {
        Ok(reply) if reply.text.trim().is_empty() => {
            tracing::error!(
                target: "interactions",
                %session_id,
                response_id = ?reply.response_id,
                "empty response received from agent"
            );
            tracing::info!(target: "interactions", %session_id, response = %policy.fallback_reply, "agent response");
            ChatOutcome::Fallback
        }
        Ok(reply) => {
            tracing::info!(target: "interactions", %session_id, response = %reply.text, "agent response");
            ChatOutcome::Answered(reply.text)
        }
        Err(e) => {
            tracing::error!(target: "interactions", %session_id, error = %e, "agent call failed");
            ChatOutcome::Failed(e)
        }
    }
}

/// Runs the pipeline and records the exchange; returns the reply to send.
pub async fn respond(state: &AppState, session_id: &str, message: &str) -> String {
    let outcome = run(&state.agent, &state.policy, session_id, message).await;
    let reply = outcome.reply(&state.policy).to_string();

    let error = match &outcome {
        ChatOutcome::Failed(e) => Some(e.to_string()),
        _ => None,
    };

    crud::record(
        state.db.as_ref(),
        Interaction::new(
            session_id.to_string(),
            message.to_string(),
            reply.clone(),
            outcome.outcome(),
            error,
        ),
    )
    .await;

    reply
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::{field::Field, Event, Level, Subscriber};
    use tracing_subscriber::{layer::Context, layer::SubscriberExt, Layer, Registry};

    use super::*;
    use crate::config::agent::AgentSettings;

    /// Keeps `(level, target, message)` for every event.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<(Level, String, String)>>>);

    impl CapturedEvents {
        fn levels_for(&self, message: &str) -> Vec<Level> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, target, msg)| target == "interactions" && msg == message)
                .map(|(level, _, _)| *level)
                .collect()
        }
    }

    #[derive(Default)]
    struct MessageVisitor(String);

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            self.0.lock().unwrap().push((
                *event.metadata().level(),
                event.metadata().target().to_string(),
                visitor.0,
            ));
        }
    }

    fn agent(endpoint: String, access_token: Option<&str>) -> AgentClient {
        AgentClient::new(AgentSettings {
            project_id: "snow-project".to_string(),
            location_id: "us-central1".to_string(),
            agent_id: "agent-42".to_string(),
            language_code: "en".to_string(),
            endpoint,
            access_token: access_token.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn blocked_prompt_logs_warning_only() {
        let events = CapturedEvents::default();
        let _guard = tracing::subscriber::set_default(Registry::default().with(events.clone()));
        let policy = ChatPolicy::default();

        let outcome = run(&agent("http://127.0.0.1:9".to_string(), Some("t")), &policy, "s-1", "hack the plows").await;

        assert!(matches!(outcome, ChatOutcome::Blocked));
        assert_eq!(events.levels_for("blocked prompt"), vec![Level::WARN]);
        assert!(events.levels_for("user prompt").is_empty());
    }

    #[tokio::test]
    async fn failed_call_logs_prompt_then_error() {
        let events = CapturedEvents::default();
        let _guard = tracing::subscriber::set_default(Registry::default().with(events.clone()));
        let policy = ChatPolicy::default();

        let outcome = run(&agent("http://127.0.0.1:9".to_string(), None), &policy, "s-1", "Hello").await;

        assert!(matches!(outcome, ChatOutcome::Failed(AgentError::MissingAccessToken)));
        assert_eq!(events.levels_for("user prompt"), vec![Level::INFO]);
        assert_eq!(events.levels_for("agent call failed"), vec![Level::ERROR]);
        assert!(events.levels_for("agent response").is_empty());
    }

    #[tokio::test]
    async fn empty_reply_logs_error_and_fallback_response() {
        let mut upstream = mockito::Server::new_async().await;
        let _mock = upstream
            .mock("POST", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"queryResult": {}}"#)
            .create_async()
            .await;
        let events = CapturedEvents::default();
        let _guard = tracing::subscriber::set_default(Registry::default().with(events.clone()));
        let policy = ChatPolicy::default();

        let outcome = run(&agent(upstream.url(), Some("t")), &policy, "s-1", "Hello").await;

        assert!(matches!(outcome, ChatOutcome::Fallback));
        assert_eq!(events.levels_for("empty response received from agent"), vec![Level::ERROR]);
        assert_eq!(events.levels_for("agent response"), vec![Level::INFO]);
    }

    #[test]
    fn outcomes_map_to_policy_replies() {
        let policy = ChatPolicy::default();

        assert_eq!(ChatOutcome::Blocked.reply(&policy), policy.blocked_reply);
        assert_eq!(ChatOutcome::Fallback.reply(&policy), policy.fallback_reply);
        assert_eq!(
            ChatOutcome::Failed(AgentError::MissingAccessToken).reply(&policy),
            policy.error_reply
        );
        assert_eq!(ChatOutcome::Answered("Roads are clear.".to_string()).reply(&policy), "Roads are clear.");
    }

    #[test]
    fn outcomes_map_to_stored_kind() {
        assert_eq!(ChatOutcome::Blocked.outcome(), Outcome::Blocked);
        assert_eq!(ChatOutcome::Answered(String::new()).outcome(), Outcome::Answered);
        assert_eq!(ChatOutcome::Fallback.outcome(), Outcome::Fallback);
        assert_eq!(
            ChatOutcome::Failed(AgentError::ApiError("denied".to_string())).outcome(),
            Outcome::Failed
        );
    }
}
