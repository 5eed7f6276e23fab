// SPDX-FileCopyrightText: Copyright (c) 2025-2026 Reverie Contributors. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

/// Outcome of scanning a buffer for one delimiter literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterScan {
    /// The earliest complete occurrence: `buffer[..at]` is decided text and
    /// scanning continues at `buffer[after..]` in the flipped mode.
    Found { at: usize, after: usize },
    /// No complete occurrence, but the tail starting at `keep_from` is a
    /// nonempty proper prefix of the delimiter. `buffer[..keep_from]` is
    /// decided; the tail must be retained until more input arrives.
    Partial { keep_from: usize },
    /// No occurrence and no ambiguous tail; the whole buffer is decided.
    Absent,
}

/// Locates the next occurrence of `delimiter` in `buffer`.
///
/// A full match always wins over a partial one; among partial candidates the
/// longest tail is retained. Offsets are byte indices. The delimiter opens
/// with ASCII `<`, so every reported offset falls on a char boundary even
/// for multi-byte buffer content.
pub fn scan_delimiter(buffer: &str, delimiter: &str) -> DelimiterScan {
    if let Some(at) = buffer.find(delimiter) {
        return DelimiterScan::Found {
            at,
            after: at + delimiter.len(),
        };
    }

    let bytes = buffer.as_bytes();
    let delim = delimiter.as_bytes();
    let longest = bytes.len().min(delim.len().saturating_sub(1));
    for take in (1..=longest).rev() {
        if bytes[bytes.len() - take..] == delim[..take] {
            return DelimiterScan::Partial {
                keep_from: bytes.len() - take,
            };
        }
    }

    DelimiterScan::Absent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_reports_split_points() {
        let scan = scan_delimiter("before<think>after", "<think>");
        assert_eq!(scan, DelimiterScan::Found { at: 6, after: 13 });
    }

    #[test]
    fn test_earliest_occurrence_wins() {
        let scan = scan_delimiter("<think>a<think>b", "<think>");
        assert_eq!(scan, DelimiterScan::Found { at: 0, after: 7 });
    }

    #[test]
    fn test_full_match_wins_over_leading_partial() {
        // The broken partial at the head is decided text once a real
        // occurrence follows it.
        let scan = scan_delimiter("<thi<think>", "<think>");
        assert_eq!(scan, DelimiterScan::Found { at: 4, after: 11 });
    }

    #[test]
    fn test_partial_tail_is_retained() {
        let scan = scan_delimiter("some text<thi", "<think>");
        assert_eq!(scan, DelimiterScan::Partial { keep_from: 9 });
    }

    #[test]
    fn test_whole_buffer_may_be_partial() {
        let scan = scan_delimiter("<thi", "<think>");
        assert_eq!(scan, DelimiterScan::Partial { keep_from: 0 });
    }

    #[test]
    fn test_longest_candidate_tail_wins() {
        // "<t" and "<" both prefix the delimiter; the longer run from the
        // second "<" is the one that could still complete.
        let scan = scan_delimiter("<t<thin", "<think>");
        assert_eq!(scan, DelimiterScan::Partial { keep_from: 2 });
    }

    #[test]
    fn test_broken_partial_mid_buffer_is_decided() {
        // "<th" is followed by text that rules the delimiter out.
        let scan = scan_delimiter("a<th b", "<think>");
        assert_eq!(scan, DelimiterScan::Absent);
    }

    #[test]
    fn test_plain_text_is_absent() {
        assert_eq!(scan_delimiter("no markers here", "<think>"), DelimiterScan::Absent);
    }

    #[test]
    fn test_empty_buffer_is_absent() {
        assert_eq!(scan_delimiter("", "<think>"), DelimiterScan::Absent);
    }

    #[test]
    fn test_lone_angle_bracket_is_partial() {
        let scan = scan_delimiter("text ending <", "<think>");
        assert_eq!(scan, DelimiterScan::Partial { keep_from: 12 });
    }

    #[test]
    fn test_closing_delimiter_scans_the_same_way() {
        let scan = scan_delimiter("reasoning</thi", "</think>");
        assert_eq!(scan, DelimiterScan::Partial { keep_from: 9 });
    }

    #[test]
    fn test_multibyte_text_around_delimiter() {
        let buffer = "héllo <think>wörld";
        let scan = scan_delimiter(buffer, "<think>");
        assert_eq!(
            scan,
            DelimiterScan::Found {
                at: buffer.find('<').unwrap(),
                after: buffer.find('<').unwrap() + 7
            }
        );
    }

    #[test]
    fn test_multibyte_tail_is_absent() {
        assert_eq!(scan_delimiter("héllo wörld", "<think>"), DelimiterScan::Absent);
    }
}
