// SPDX-FileCopyrightText: Copyright (c) 2025-2026 Reverie Contributors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use reverie_parsers::{Channel, SpanDelta};
use serde::{Deserialize, Serialize};

/// One frame arriving from a model completion stream.
///
/// Only text deltas drive the extraction; the payload type `E` carries
/// whatever the upstream protocol attaches to its non-text frames (response
/// metadata, usage, a finish reason) and is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionFrame<E> {
    /// A fragment of generated text. Boundaries are arbitrary and may split
    /// a delimiter.
    Delta(String),
    /// End-of-generation marker. Forwarded only after held text has been
    /// flushed.
    Finish(E),
    /// Any other upstream frame, forwarded unchanged at its position.
    Event(E),
}

impl<E> CompletionFrame<E> {
    pub fn delta(text: impl Into<String>) -> Self {
        CompletionFrame::Delta(text.into())
    }

    pub fn is_delta(&self) -> bool {
        matches!(self, CompletionFrame::Delta(_))
    }
}

/// One frame produced by the transducer: channel-tagged text deltas plus the
/// untouched passthrough frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractedFrame<E> {
    /// Text decided to lie between the reasoning delimiters.
    ReasoningDelta(String),
    /// User-visible answer text.
    AnswerDelta(String),
    /// The upstream finish marker, after the final flush.
    Finish(E),
    /// An upstream frame passed through unchanged.
    Event(E),
}

impl<E> ExtractedFrame<E> {
    /// The text payload, for either delta kind.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractedFrame::ReasoningDelta(text) | ExtractedFrame::AnswerDelta(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_reasoning(&self) -> bool {
        matches!(self, ExtractedFrame::ReasoningDelta(_))
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, ExtractedFrame::AnswerDelta(_))
    }
}

impl<E> From<SpanDelta> for ExtractedFrame<E> {
    fn from(delta: SpanDelta) -> Self {
        match delta.channel {
            Channel::Reasoning => ExtractedFrame::ReasoningDelta(delta.text),
            Channel::Answer => ExtractedFrame::AnswerDelta(delta.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_delta_conversion() {
        let frame: ExtractedFrame<()> = SpanDelta {
            channel: Channel::Reasoning,
            text: "thought".to_string(),
        }
        .into();
        assert_eq!(frame, ExtractedFrame::ReasoningDelta("thought".to_string()));
        assert!(frame.is_reasoning());
        assert_eq!(frame.text(), Some("thought"));
    }

    #[test]
    fn test_frames_round_trip_through_serde() {
        let frame: CompletionFrame<serde_json::Value> = CompletionFrame::delta("chunk");
        assert!(frame.is_delta());
        let json = serde_json::to_string(&frame).unwrap();
        let back: CompletionFrame<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, back);
    }

    #[test]
    fn test_passthrough_frames_carry_no_text() {
        let frame: ExtractedFrame<&str> = ExtractedFrame::Event("usage");
        assert_eq!(frame.text(), None);
        assert!(!frame.is_reasoning());
        assert!(!frame.is_answer());
    }
}
