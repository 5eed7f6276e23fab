// SPDX-FileCopyrightText: Copyright (c) 2025-2026 Reverie Contributors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Streaming reasoning extraction over model completion frames.
//!
//! A completion stream is an ordered sequence of frames: text deltas of
//! arbitrary granularity, interleaved with opaque passthrough events and a
//! finish marker. [`extract_reasoning_stream`] rewrites the text deltas into
//! reasoning and answer channel deltas, leaving everything else untouched
//! and in place.

pub mod frame;
pub mod transducer;

pub use frame::{CompletionFrame, ExtractedFrame};
pub use transducer::extract_reasoning_stream;
