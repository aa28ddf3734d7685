//! User-facing messages handed to the presentation layer.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escape the characters that could open markup: `< > & " '`.
#[must_use]
pub fn sanitize_markup(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A sanitized message plus its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    severity: Severity,
}

impl Notification {
    #[must_use]
    pub fn new(message: impl AsRef<str>, severity: Severity) -> Self {
        Self {
            message: sanitize_markup(message.as_ref()),
            severity,
        }
    }

    #[must_use]
    pub fn info(message: impl AsRef<str>) -> Self {
        Self::new(message, Severity::Info)
    }

    #[must_use]
    pub fn success(message: impl AsRef<str>) -> Self {
        Self::new(message, Severity::Success)
    }

    #[must_use]
    pub fn warning(message: impl AsRef<str>) -> Self {
        Self::new(message, Severity::Warning)
    }

    #[must_use]
    pub fn error(message: impl AsRef<str>) -> Self {
        Self::new(message, Severity::Error)
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Outbox of pending notifications, drained by the presentation layer.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    #[must_use]
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(
            sanitize_markup(r#"<img src="x" onerror='boom'> & co"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;boom&#39;&gt; &amp; co"
        );
        assert_eq!(sanitize_markup("plain text"), "plain text");
    }

    #[test]
    fn notifications_are_sanitized_on_construction() {
        let n = Notification::success("Successfully enrolled in <b>UI/UX</b>!");
        assert_eq!(n.message(), "Successfully enrolled in &lt;b&gt;UI/UX&lt;/b&gt;!");
        assert_eq!(n.severity(), Severity::Success);
        assert_eq!(n.severity().to_string(), "success");
    }

    #[test]
    fn outbox_drains_in_order() {
        let mut outbox = Notifications::default();
        outbox.push(Notification::info("one"));
        outbox.push(Notification::warning("two"));

        let drained: Vec<String> = outbox.take().iter().map(|n| n.message().to_string()).collect();
        assert_eq!(drained, ["one", "two"]);
        assert!(outbox.is_empty());
    }
}
