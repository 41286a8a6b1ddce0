//! The closed catalogue of routable capabilities.

use super::ParseCapabilityError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A unit of work a handler can perform.
///
/// The set is closed: every capability is known at compile time and carries
/// a stable camel-case identifier used in configuration and logs.
///
/// # Examples
///
/// ```rust
/// use switchyard::capability::domain::Capability;
///
/// let capability = Capability::try_from("deepThinking").expect("known capability");
/// assert_eq!(capability, Capability::DeepThinking);
/// assert_eq!(capability.display_name(), "Deep Thinking");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Free-form text generation.
    TextGeneration,
    /// Generation of math exercises.
    MathProblemGeneration,
    /// Multi-step reasoning over a prompt.
    DeepThinking,
    /// Translation between natural languages.
    Translation,
    /// Condensing long text.
    Summarization,
    /// Optical character recognition.
    TextRecognition,
    /// Sentiment classification of text.
    SentimentAnalysis,
    /// Source code generation.
    CodeGeneration,
    /// Image synthesis from a prompt.
    ImageGeneration,
    /// Speech-to-text transcription.
    SpeechRecognition,
}

impl Capability {
    /// Every capability in catalogue order.
    pub const ALL: [Self; 10] = [
        Self::TextGeneration,
        Self::MathProblemGeneration,
        Self::DeepThinking,
        Self::Translation,
        Self::Summarization,
        Self::TextRecognition,
        Self::SentimentAnalysis,
        Self::CodeGeneration,
        Self::ImageGeneration,
        Self::SpeechRecognition,
    ];

    /// Returns the full catalogue as a set.
    #[must_use]
    pub fn all() -> BTreeSet<Self> {
        Self::ALL.into_iter().collect()
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextGeneration => "textGeneration",
            Self::MathProblemGeneration => "mathProblemGeneration",
            Self::DeepThinking => "deepThinking",
            Self::Translation => "translation",
            Self::Summarization => "summarization",
            Self::TextRecognition => "textRecognition",
            Self::SentimentAnalysis => "sentimentAnalysis",
            Self::CodeGeneration => "codeGeneration",
            Self::ImageGeneration => "imageGeneration",
            Self::SpeechRecognition => "speechRecognition",
        }
    }

    /// Returns the human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TextGeneration => "Text Generation",
            Self::MathProblemGeneration => "Math Problem Generation",
            Self::DeepThinking => "Deep Thinking",
            Self::Translation => "Translation",
            Self::Summarization => "Summarization",
            Self::TextRecognition => "Text Recognition",
            Self::SentimentAnalysis => "Sentiment Analysis",
            Self::CodeGeneration => "Code Generation",
            Self::ImageGeneration => "Image Generation",
            Self::SpeechRecognition => "Speech Recognition",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Capability {
    type Error = ParseCapabilityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|capability| capability.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCapabilityError(value.to_owned()))
    }
}
