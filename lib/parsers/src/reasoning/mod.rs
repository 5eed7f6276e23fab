// SPDX-FileCopyrightText: Copyright (c) 2025-2026 Reverie Contributors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

mod tag_extractor;
mod tag_scanner;

// Re-export main types and functions for convenience
pub use tag_extractor::TagExtractor;
pub use tag_scanner::{DelimiterScan, scan_delimiter};

use serde::{Deserialize, Serialize};

/// Output channel a span of model text is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Text found between the reasoning delimiters.
    Reasoning,
    /// User-visible answer text outside the delimiters.
    Answer,
}

/// One decided span of streamed text.
///
/// The text already carries any join separator owed to its channel, so
/// concatenating the deltas of a channel reproduces the batch result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanDelta {
    pub channel: Channel,
    pub text: String,
}

/// Result of extracting reasoning from a complete response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// The extracted reasoning text from within reasoning blocks.
    pub reasoning: String,

    /// The answer text outside of reasoning blocks.
    pub text: String,
}

impl Extraction {
    pub fn get_some_reasoning(&self) -> Option<&str> {
        if self.reasoning.is_empty() {
            None
        } else {
            Some(&self.reasoning)
        }
    }

    pub fn get_some_text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }
}

/// Errors raised when building an extractor from its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The tag name selecting the delimiter pair was empty.
    #[error("tag name must not be empty")]
    EmptyTagName,
}

/// Configuration for the tag-based extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagExtractorConfig {
    /// Name of the delimiter pair, i.e. `<name>` and `</name>`. Assumed not
    /// to contain characters that make the delimiter ambiguous with itself.
    pub tag_name: String,
    /// Joiner inserted between spans of the same channel.
    pub separator: String,
    /// Begin scanning inside the reasoning block, for models that open their
    /// output mid-block without emitting the opening delimiter.
    pub start_in_reasoning: bool,
}

impl Default for TagExtractorConfig {
    fn default() -> Self {
        Self {
            tag_name: "think".to_string(),
            separator: "\n".to_string(),
            start_in_reasoning: false,
        }
    }
}

impl TagExtractorConfig {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    /// DeepSeek-R1 style output: the opening `<think>` is implicit and the
    /// response starts inside the reasoning block.
    pub fn deepseek_r1() -> Self {
        Self {
            start_in_reasoning: true,
            ..Default::default()
        }
    }
}

/// Extracts tag-delimited reasoning from model output, either from a
/// complete response or incrementally from streamed fragments.
pub trait ReasoningExtractor: Send + std::fmt::Debug {
    /// Splits a standalone, complete response into reasoning and answer
    /// text. Delimiters must not appear in either output. Holds no state
    /// across calls.
    fn extract(&self, text: &str) -> Extraction;

    /// Consumes one streamed fragment and returns the spans that became
    /// decidable, in document order. The return value is the delta for this
    /// fragment, not a cumulative total.
    fn push_fragment(&mut self, fragment: &str) -> Vec<SpanDelta>;

    /// Flushes any text still held back at end of input and resets the
    /// streaming state.
    fn finalize(&mut self) -> Vec<SpanDelta>;
}
