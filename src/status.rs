use std::time::{Duration, Instant};

pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(5);

pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

/// Single transient message shown under the log pane. Expiry is checked when the line is
/// read, nothing clears it in the background.
pub struct StatusLine {
    current: Option<StatusMessage>,
    ttl: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_TTL)
    }
}

impl StatusLine {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.set_at(text, Instant::now());
    }

    pub fn set_at(&mut self, text: impl Into<String>, set_at: Instant) {
        self.current = Some(StatusMessage {
            text: text.into(),
            set_at,
        });
    }

    /// Latest message regardless of age.
    pub fn latest(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn visible_at(&self, now: Instant) -> Option<&str> {
        self.latest()
            .filter(|msg| !msg.text.is_empty())
            .filter(|msg| now.saturating_duration_since(msg.set_at) < self.ttl)
            .map(|msg| msg.text.as_str())
    }

    pub fn visible(&self) -> Option<&str> {
        self.visible_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_is_hidden() {
        let status = StatusLine::default();
        assert_eq!(status.visible(), None);
        assert!(status.latest().is_none());
    }

    #[test]
    fn fresh_message_is_visible() {
        let mut status = StatusLine::default();
        status.set("ready");
        assert_eq!(status.visible(), Some("ready"));
    }

    #[test]
    fn message_expires_after_ttl() {
        let mut status = StatusLine::new(Duration::from_secs(5));
        let set_at = Instant::now();
        status.set_at("done", set_at);

        assert_eq!(
            status.visible_at(set_at + Duration::from_millis(4999)),
            Some("done")
        );
        assert_eq!(status.visible_at(set_at + Duration::from_secs(5)), None);
        assert_eq!(status.latest().map(|m| m.text.as_str()), Some("done"));
    }

    #[test]
    fn set_overwrites_previous_message() {
        let mut status = StatusLine::default();
        status.set("one");
        status.set("two");
        assert_eq!(status.visible(), Some("two"));
    }
}
