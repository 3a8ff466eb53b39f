use anyhow::anyhow;
use tokio::task::JoinHandle;

use crate::responder::ResponderClient;
use crate::transcript::{Speaker, Status, Transcript};

/// Shown in the transcript when the backend cannot be reached or answers
/// with something unusable. Every failure kind folds into this one message.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting to the server. Please make sure the backend is running and try again.";

/// Banner text carried by the errored status.
pub const SEND_ERROR: &str = "Failed to send message. Please check if the backend is running.";

pub struct App {
    pub should_quit: bool,

    // Conversation state
    pub transcript: Transcript,

    // Pending input (single line, char-indexed cursor)
    pub input: String,
    pub cursor: usize,

    // Transcript viewport
    pub scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,
    pub total_chat_lines: u16,

    // Typing indicator animation, 0-2
    pub animation_frame: u8,

    // The single in-flight exchange, if any
    pub exchange: Option<JoinHandle<anyhow::Result<String>>>,

    responder: ResponderClient,
}

impl App {
    pub fn new(responder: ResponderClient) -> Self {
        Self {
            should_quit: false,
            transcript: Transcript::new(),
            input: String::new(),
            cursor: 0,
            scroll: 0,
            chat_height: 0,
            chat_width: 0,
            total_chat_lines: 0,
            animation_frame: 0,
            exchange: None,
            responder,
        }
    }

    /// Submit the staged input. Whitespace-only input is silently ignored;
    /// a second submit while an exchange is outstanding has no effect.
    pub fn submit(&mut self) {
        if self.exchange.is_some() {
            return;
        }

        let text = self.input.trim().to_string();
        if text.is_empty() {
            return;
        }

        self.input.clear();
        self.cursor = 0;

        self.transcript.append(Speaker::User, text.clone());
        // Replaces any prior Errored status as well.
        self.transcript.set_status(Status::Pending);

        tracing::debug!("sending message ({} chars)", text.len());

        let responder = self.responder.clone();
        self.exchange = Some(tokio::spawn(
            async move { responder.send(&text).await },
        ));
    }

    pub fn exchange_finished(&self) -> bool {
        self.exchange.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Resolve the outstanding exchange: append the reply on success, the
    /// fixed fallback on any failure. Either way the status leaves Pending.
    pub async fn finish_exchange(&mut self) {
        let Some(task) = self.exchange.take() else {
            return;
        };

        let outcome = match task.await {
            Ok(result) => result,
            Err(join_error) => Err(anyhow!(join_error)),
        };

        match outcome {
            Ok(reply) => {
                self.transcript.append(Speaker::Assistant, reply);
                self.transcript.set_status(Status::Idle);
            }
            Err(error) => {
                tracing::warn!("exchange failed: {error:#}");
                self.transcript.append(Speaker::Assistant, FALLBACK_REPLY);
                self.transcript
                    .set_status(Status::Errored(SEND_ERROR.to_string()));
            }
        }
    }

    /// Advance the typing indicator. Driven by the tick event.
    pub fn tick_animation(&mut self) {
        if self.transcript.status().is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Transcript scrolling. Bounds come from the last rendered frame.

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max_scroll = self.total_chat_lines.saturating_sub(self.chat_height);
        self.scroll = self.scroll.saturating_add(1).min(max_scroll);
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.chat_height.max(1));
    }

    pub fn scroll_page_down(&mut self) {
        let max_scroll = self.total_chat_lines.saturating_sub(self.chat_height);
        self.scroll = self
            .scroll
            .saturating_add(self.chat_height.max(1))
            .min(max_scroll);
    }

    /// Recompute the wrapped line count and pin the viewport to the newest
    /// message. Called by the renderer whenever the transcript grew.
    pub fn scroll_to_latest(&mut self) {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.transcript.messages() {
            total_lines += 1; // Role line ("You:" or "Amal:")
            for line in msg.content.lines() {
                // Character count, not byte length, for UTF-8 content
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count.saturating_sub(1) / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.transcript.status().is_pending() {
            total_lines += 2; // Role line + dots
        }

        self.total_chat_lines = total_lines;

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        self.scroll = total_lines.saturating_sub(visible_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app() -> App {
        // Nothing listens here; these tests never resolve an exchange.
        App::new(ResponderClient::new("http://127.0.0.1:9"))
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_is_a_no_op() {
        let mut app = test_app();

        app.submit();
        assert_eq!(app.transcript.messages().len(), 1);
        assert_eq!(*app.transcript.status(), Status::Idle);
        assert!(app.exchange.is_none());

        app.input = "   ".to_string();
        app.submit();
        assert_eq!(app.transcript.messages().len(), 1);
        assert_eq!(*app.transcript.status(), Status::Idle);
        assert!(app.exchange.is_none());
    }

    #[tokio::test]
    async fn submit_appends_user_message_and_goes_pending() {
        let mut app = test_app();
        app.input = "  hello there  ".to_string();
        app.submit();

        let messages = app.transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Speaker::User);
        assert_eq!(messages[1].content, "hello there");
        assert!(app.transcript.status().is_pending());
        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
        assert!(app.exchange.is_some());
    }

    #[tokio::test]
    async fn submit_is_refused_while_an_exchange_is_outstanding() {
        let mut app = test_app();
        app.transcript.set_status(Status::Pending);
        app.exchange = Some(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("late".to_string())
        }));

        app.input = "second message".to_string();
        app.submit();

        // No visible effect: nothing appended, input untouched.
        assert_eq!(app.transcript.messages().len(), 1);
        assert_eq!(app.input, "second message");
        if let Some(task) = app.exchange.take() {
            task.abort();
        }
    }

    #[tokio::test]
    async fn failed_exchange_folds_into_fallback_and_errored_status() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.submit();

        // Port 9 (discard) is unreachable; the request fails fast.
        app.finish_exchange().await;

        let messages = app.transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, Speaker::Assistant);
        assert_eq!(messages[2].content, FALLBACK_REPLY);
        assert_eq!(
            *app.transcript.status(),
            Status::Errored(SEND_ERROR.to_string())
        );
        assert!(app.exchange.is_none());
    }

    #[tokio::test]
    async fn animation_only_advances_while_pending() {
        let mut app = test_app();
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);

        app.transcript.set_status(Status::Pending);
        app.tick_animation();
        app.tick_animation();
        assert_eq!(app.animation_frame, 2);
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);
    }
}
