// SPDX-FileCopyrightText: Copyright (c) 2025-2026 Reverie Contributors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::reasoning::tag_scanner::{DelimiterScan, scan_delimiter};
use crate::reasoning::{
    Channel, ConfigError, Extraction, ReasoningExtractor, SpanDelta, TagExtractorConfig,
};

/// Which delimiter the scan is currently looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    /// Outside a reasoning block, watching for the opening delimiter.
    Plain,
    /// Inside a reasoning block, watching for the closing delimiter.
    InsideTag,
}

impl ScanMode {
    fn flipped(self) -> Self {
        match self {
            ScanMode::Plain => ScanMode::InsideTag,
            ScanMode::InsideTag => ScanMode::Plain,
        }
    }

    fn channel(self) -> Channel {
        match self {
            ScanMode::Plain => Channel::Answer,
            ScanMode::InsideTag => Channel::Reasoning,
        }
    }
}

/// Tag-based [`ReasoningExtractor`].
///
/// The streaming state is one growing buffer of not-yet-decided text, the
/// current scan mode, and the bookkeeping that places join separators. The
/// buffer never holds more than one pending partial-delimiter candidate at
/// its tail; everything ahead of it is published as soon as it is decidable.
/// Batch extraction shares the scanner but keeps no state across calls.
#[derive(Debug, Clone)]
pub struct TagExtractor {
    open_tag: String,
    close_tag: String,
    separator: String,
    start_in_reasoning: bool,
    buffer: String,
    mode: ScanMode,
    /// A delimiter was crossed since the last nonempty span was published.
    switched: bool,
    emitted_reasoning: bool,
    emitted_answer: bool,
}

impl TagExtractor {
    pub fn new(config: TagExtractorConfig) -> Result<Self, ConfigError> {
        if config.tag_name.is_empty() {
            return Err(ConfigError::EmptyTagName);
        }
        let mode = if config.start_in_reasoning {
            ScanMode::InsideTag
        } else {
            ScanMode::Plain
        };
        Ok(Self {
            open_tag: format!("<{}>", config.tag_name),
            close_tag: format!("</{}>", config.tag_name),
            separator: config.separator,
            start_in_reasoning: config.start_in_reasoning,
            buffer: String::new(),
            mode,
            switched: false,
            emitted_reasoning: false,
            emitted_answer: false,
        })
    }

    fn delimiter(&self, mode: ScanMode) -> &str {
        match mode {
            ScanMode::Plain => &self.open_tag,
            ScanMode::InsideTag => &self.close_tag,
        }
    }

    /// Queues a decided span, skipping empty ones. The first nonempty span
    /// after a delimiter crossing is prefixed with the separator when its
    /// channel has emitted before, so per-channel concatenation matches the
    /// batch result.
    fn publish(&mut self, channel: Channel, text: String, out: &mut Vec<SpanDelta>) {
        if text.is_empty() {
            return;
        }
        let rejoining = match channel {
            Channel::Reasoning => self.emitted_reasoning,
            Channel::Answer => self.emitted_answer,
        };
        let text = if self.switched && rejoining {
            let mut joined = self.separator.clone();
            joined.push_str(&text);
            joined
        } else {
            text
        };
        match channel {
            Channel::Reasoning => self.emitted_reasoning = true,
            Channel::Answer => self.emitted_answer = true,
        }
        self.switched = false;
        out.push(SpanDelta { channel, text });
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.mode = if self.start_in_reasoning {
            ScanMode::InsideTag
        } else {
            ScanMode::Plain
        };
        self.switched = false;
        self.emitted_reasoning = false;
        self.emitted_answer = false;
    }

    fn join_spans(spans: &[&str], separator: &str) -> String {
        spans
            .iter()
            .filter(|span| !span.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl ReasoningExtractor for TagExtractor {
    fn extract(&self, text: &str) -> Extraction {
        tracing::debug!(len = text.len(), "extracting reasoning from complete text");

        let mut plain: Vec<&str> = Vec::new();
        let mut reasoning: Vec<&str> = Vec::new();
        let mut inside = self.start_in_reasoning;
        let mut rest = text;

        loop {
            if inside {
                match scan_delimiter(rest, &self.close_tag) {
                    DelimiterScan::Found { at, after } => {
                        reasoning.push(&rest[..at]);
                        rest = &rest[after..];
                        inside = false;
                    }
                    // The block never closes: the whole remaining region
                    // degrades to answer text, verbatim.
                    _ => {
                        plain.push(rest);
                        break;
                    }
                }
            } else {
                match scan_delimiter(rest, &self.open_tag) {
                    DelimiterScan::Found { at, after } => {
                        // The opening delimiter only counts once its close is
                        // known to exist; otherwise the region from the
                        // delimiter onward stays answer text, verbatim.
                        match scan_delimiter(&rest[after..], &self.close_tag) {
                            DelimiterScan::Found {
                                at: close_at,
                                after: close_after,
                            } => {
                                plain.push(&rest[..at]);
                                reasoning.push(&rest[after..after + close_at]);
                                rest = &rest[after + close_after..];
                            }
                            _ => {
                                plain.push(rest);
                                break;
                            }
                        }
                    }
                    // A partial tail at true end of input is decided text.
                    _ => {
                        plain.push(rest);
                        break;
                    }
                }
            }
        }

        Extraction {
            reasoning: Self::join_spans(&reasoning, &self.separator),
            text: Self::join_spans(&plain, &self.separator),
        }
    }

    fn push_fragment(&mut self, fragment: &str) -> Vec<SpanDelta> {
        tracing::trace!(?fragment, buffered = self.buffer.len(), "push_fragment");
        self.buffer.push_str(fragment);

        let mut out = Vec::new();
        loop {
            let scan = scan_delimiter(&self.buffer, self.delimiter(self.mode));
            match scan {
                DelimiterScan::Found { at, after } => {
                    let decided = self.buffer[..at].to_string();
                    self.buffer.drain(..after);
                    let channel = self.mode.channel();
                    self.publish(channel, decided, &mut out);
                    self.mode = self.mode.flipped();
                    self.switched = true;
                }
                DelimiterScan::Partial { keep_from } => {
                    if keep_from > 0 {
                        let decided = self.buffer[..keep_from].to_string();
                        self.buffer.drain(..keep_from);
                        let channel = self.mode.channel();
                        self.publish(channel, decided, &mut out);
                    }
                    break;
                }
                DelimiterScan::Absent => {
                    if !self.buffer.is_empty() {
                        let decided = std::mem::take(&mut self.buffer);
                        let channel = self.mode.channel();
                        self.publish(channel, decided, &mut out);
                    }
                    break;
                }
            }
        }
        out
    }

    fn finalize(&mut self) -> Vec<SpanDelta> {
        tracing::trace!(buffered = self.buffer.len(), "finalize");

        let mut out = Vec::new();
        if !self.buffer.is_empty() {
            // A retained tail can no longer become a delimiter. When the
            // input ends inside an unterminated block, the remainder
            // degrades to the answer channel; reasoning already streamed
            // out stays where it was emitted.
            let rest = std::mem::take(&mut self.buffer);
            self.publish(Channel::Answer, rest, &mut out);
        }
        self.reset();
        out
    }
}
