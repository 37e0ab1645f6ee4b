pub const FORBIDDEN_TERMS: &[&str] = &["hack", "ignore instructions", "system override", "admin"];

pub const BLOCKED_REPLY: &str = "I cannot process that request due to security filters.";
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I couldn't find an answer to that in the provided documents.";
pub const ERROR_REPLY: &str = "System Error: Please check the logs.";

/// Denylist and the fixed replies the chat pipeline answers with.
#[derive(Debug, Clone)]
pub struct ChatPolicy {
    /// Stored lowercase.
    pub forbidden_terms: Vec<String>,
    pub blocked_reply: String,
    pub fallback_reply: String,
    pub error_reply: String,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self::new(FORBIDDEN_TERMS.iter().copied())
    }
}

impl ChatPolicy {
    pub fn new<I, S>(forbidden_terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            forbidden_terms: forbidden_terms
                .into_iter()
                .map(|term| term.as_ref().to_lowercase())
                .collect(),
            blocked_reply: BLOCKED_REPLY.to_string(),
            fallback_reply: FALLBACK_REPLY.to_string(),
            error_reply: ERROR_REPLY.to_string(),
        }
    }

    /// Case-insensitive substring match against the denylist.
    pub fn blocked_term(&self, message: &str) -> Option<&str> {
        let lowered = message.to_lowercase();
        self.forbidden_terms
            .iter()
            .find(|term| lowered.contains(term.as_str()))
            .map(String::as_str)
    }
}
