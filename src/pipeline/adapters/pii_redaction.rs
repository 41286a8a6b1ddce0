//! Redaction of personal data from text requests.

use crate::capability::domain::Payload;
use crate::pipeline::{domain::PipelineContext, ports::PipelineStage};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Match, Regex};

/// Annotation key holding the number of redacted spans.
pub const PII_REDACTIONS: &str = "pii_redactions";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"));
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{2,4}\)[\s.-]?|\d{2,4}[\s.-])\d{3,4}[\s.-]\d{3,4}")
});

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals exercised by the stage tests"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("redaction pattern should compile")
}

/// Masks e-mail addresses and phone numbers in text input.
///
/// Non-text payloads pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiiRedactionStage;

impl PiiRedactionStage {
    /// Runs after authentication and before other request rewrites.
    pub const PRIORITY: i32 = 20;

    /// Replacement for e-mail addresses.
    pub const EMAIL_MASK: &'static str = "[redacted email]";

    /// Replacement for phone numbers.
    pub const PHONE_MASK: &'static str = "[redacted phone]";

    /// Returns `text` with personal data masked, and the number of masks.
    #[must_use]
    pub fn redact(text: &str) -> (String, usize) {
        let emails = EMAIL_PATTERN.find_iter(text).count();
        let without_emails = EMAIL_PATTERN.replace_all(text, Self::EMAIL_MASK);
        let mut phones = 0_usize;
        let redacted = PHONE_PATTERN
            .replace_all(&without_emails, |caps: &Captures<'_>| match caps.get(0) {
                Some(found) if is_phone_number(&without_emails, &found) => {
                    phones = phones.saturating_add(1);
                    Self::PHONE_MASK.to_owned()
                }
                Some(found) => found.as_str().to_owned(),
                None => String::new(),
            })
            .into_owned();
        (redacted, emails.saturating_add(phones))
    }
}

/// A phone number has 10 to 15 digits and is not part of a longer number
/// or a decimal.
fn is_phone_number(text: &str, found: &Match<'_>) -> bool {
    let digits = found
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    let before = text
        .get(..found.start())
        .and_then(|head| head.chars().next_back());
    let after = text.get(found.end()..).and_then(|tail| tail.chars().next());
    PHONE_DIGITS.contains(&digits)
        && !before.is_some_and(|c| c.is_ascii_digit() || c == '.')
        && !after.is_some_and(|c| c.is_ascii_digit())
}

#[async_trait]
impl PipelineStage for PiiRedactionStage {
    fn name(&self) -> &str {
        "pii_redaction"
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    async fn process_request(&self, context: &mut PipelineContext) {
        let Some(text) = context.request().input().as_text() else {
            return;
        };
        let (redacted, count) = Self::redact(text);
        if count == 0 {
            return;
        }
        context.request_mut().replace_input(Payload::text(redacted));
        context.annotate(PII_REDACTIONS, count);
        tracing::debug!(redactions = count, "personal data masked");
    }
}
