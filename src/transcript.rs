/// Greeting shown before the user says anything. Mirrors the widget on
/// annisa.org so the terminal client opens the same way.
pub const GREETING: &str = "Hello there! 💙 I'm Amal, your companion here at An-Nisa Hope Center. I'm here to support you with warmth and care - whether you're seeking information about our programs, looking for volunteer opportunities, or need guidance on how we can help. Please know that you're not alone, and I'm here to listen. What can I help you with today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Speaker,
    pub content: String,
}

/// Interaction status of the conversation. At most one exchange is
/// `Pending` at a time; `Errored` carries the banner text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Pending,
    Errored(String),
}

impl Status {
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Pending)
    }
}

/// Ordered, append-only record of the conversation plus the current
/// interaction status. Messages are never mutated or removed once
/// appended; there is no public mutable access to past entries.
pub struct Transcript {
    messages: Vec<Message>,
    status: Status,
    follow: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                role: Speaker::Assistant,
                content: GREETING.to_string(),
            }],
            status: Status::Idle,
            follow: true,
        }
    }

    pub fn append(&mut self, role: Speaker, content: impl Into<String>) {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        // The renderer picks this up and scrolls the newest message into view.
        self.follow = true;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consume the follow-latest flag raised by the last `append`.
    pub fn take_follow(&mut self) -> bool {
        std::mem::take(&mut self.follow)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting() {
        let transcript = Transcript::new();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, Speaker::Assistant);
        assert_eq!(transcript.messages()[0].content, GREETING);
        assert_eq!(*transcript.status(), Status::Idle);
    }

    #[test]
    fn append_only_grows_and_preserves_prior_entries() {
        let mut transcript = Transcript::new();
        transcript.append(Speaker::User, "first");
        let before: Vec<(Speaker, String)> = transcript
            .messages()
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect();

        transcript.append(Speaker::Assistant, "second");
        transcript.set_status(Status::Errored("oops".to_string()));
        transcript.append(Speaker::User, "third");

        assert_eq!(transcript.messages().len(), 4);
        for (i, (role, content)) in before.iter().enumerate() {
            assert_eq!(transcript.messages()[i].role, *role);
            assert_eq!(transcript.messages()[i].content, *content);
        }
    }

    #[test]
    fn append_raises_follow_flag_once() {
        let mut transcript = Transcript::new();
        assert!(transcript.take_follow());
        assert!(!transcript.take_follow());

        transcript.append(Speaker::User, "hi");
        assert!(transcript.take_follow());
        assert!(!transcript.take_follow());
    }

    #[test]
    fn status_transitions() {
        let mut transcript = Transcript::new();
        transcript.set_status(Status::Pending);
        assert!(transcript.status().is_pending());

        transcript.set_status(Status::Errored("no backend".to_string()));
        assert_eq!(
            *transcript.status(),
            Status::Errored("no backend".to_string())
        );

        transcript.set_status(Status::Pending);
        assert!(transcript.status().is_pending());

        transcript.set_status(Status::Idle);
        assert_eq!(*transcript.status(), Status::Idle);
    }
}
