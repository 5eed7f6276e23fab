// SPDX-FileCopyrightText: Copyright (c) 2025-2026 Reverie Contributors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;

use futures::stream::{self, Stream, StreamExt};
use reverie_parsers::ReasoningExtractor;

use crate::frame::{CompletionFrame, ExtractedFrame};

/// Rewrites a completion frame stream into channel-tagged delta frames.
///
/// Text deltas are split into reasoning and answer spans by `extractor`;
/// other frames pass through at their original positions. A finish frame
/// flushes held text before it is forwarded and resets the extractor, so
/// frames after a finish are processed from a fresh state. Upstream
/// exhaustion without a finish flushes as well. Dropping the returned stream
/// drops the scan state without flushing — an abnormally terminated source
/// never produces a guessed final span.
///
/// Frames are processed strictly in arrival order; each delta's scan-and-emit
/// loop completes before the next frame is examined. One extractor serves one
/// stream; concurrent streams take independent instances.
pub fn extract_reasoning_stream<E, S, X>(
    upstream: S,
    extractor: X,
) -> impl Stream<Item = ExtractedFrame<E>>
where
    S: Stream<Item = CompletionFrame<E>> + Unpin,
    X: ReasoningExtractor,
{
    struct State<S, X, E> {
        upstream: S,
        extractor: X,
        queued: VecDeque<ExtractedFrame<E>>,
        done: bool,
    }

    let state = State {
        upstream,
        extractor,
        queued: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut inner| async move {
        loop {
            if let Some(frame) = inner.queued.pop_front() {
                return Some((frame, inner));
            }
            if inner.done {
                return None;
            }

            match inner.upstream.next().await {
                Some(CompletionFrame::Delta(text)) => {
                    tracing::trace!(len = text.len(), "text delta");
                    for span in inner.extractor.push_fragment(&text) {
                        inner.queued.push_back(span.into());
                    }
                }
                Some(CompletionFrame::Finish(payload)) => {
                    tracing::trace!("finish frame; flushing held text");
                    for span in inner.extractor.finalize() {
                        inner.queued.push_back(span.into());
                    }
                    inner.queued.push_back(ExtractedFrame::Finish(payload));
                }
                Some(CompletionFrame::Event(payload)) => {
                    inner.queued.push_back(ExtractedFrame::Event(payload));
                }
                None => {
                    tracing::trace!("source exhausted; flushing held text");
                    inner.done = true;
                    for span in inner.extractor.finalize() {
                        inner.queued.push_back(span.into());
                    }
                }
            }
        }
    })
}
