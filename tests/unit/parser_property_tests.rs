/*!
 * Property tests for the subtitle parser over generated input
 */

use proptest::prelude::*;
use subdrill::subtitle_processor::{clean_text, format_timestamp, parse_srt_string, parse_timestamp};

// Text made of characters the parser cares about
fn markup_heavy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("<".to_string()),
            Just(">".to_string()),
            Just("{".to_string()),
            Just("}".to_string()),
            Just("[".to_string()),
            Just("]".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("\n".to_string()),
            "[a-zA-Z0-9,.!?']{1,6}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn timestamp() -> impl Strategy<Value = (u64, String)> {
    (0u64..100, 0u64..60, 0u64..60, 0u64..1000).prop_map(|(h, m, s, ms)| {
        let total = h * 3_600_000 + m * 60_000 + s * 1_000 + ms;
        (total, format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms))
    })
}

// A block that is well formed apart from possibly empty text
fn srt_block() -> impl Strategy<Value = String> {
    (0usize..500, timestamp(), timestamp(), markup_heavy_text())
        .prop_map(|(seq, (_, start), (_, end), text)| format!("{}\n{} --> {}\n{}", seq, start, end, text))
}

proptest! {
    #[test]
    fn test_parse_srt_string_withArbitraryInput_shouldNeverPanic(content in any::<String>()) {
        let _ = parse_srt_string(&content);
    }

    #[test]
    fn test_clean_text_withArbitraryInput_shouldBeIdempotent(raw in markup_heavy_text()) {
        let once = clean_text(&raw);
        prop_assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_clean_text_withAnyString_shouldBeIdempotent(raw in any::<String>()) {
        let once = clean_text(&raw);
        prop_assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_parse_srt_string_withGeneratedBlocks_shouldOrderAndKeepText(
        blocks in prop::collection::vec(srt_block(), 0..20)
    ) {
        let cues = parse_srt_string(&blocks.join("\n\n"));

        for pair in cues.windows(2) {
            prop_assert!(pair[0].sequence() <= pair[1].sequence());
        }
        for cue in &cues {
            prop_assert!(!cue.text().is_empty());
            prop_assert_eq!(cue.text(), clean_text(cue.text()));
        }
        prop_assert!(cues.len() <= blocks.len());
    }

    #[test]
    fn test_parse_srt_string_withCleanText_shouldKeepEveryBlock(
        entries in prop::collection::vec((0usize..1000, timestamp(), timestamp(), "[a-z]{1,10}( [a-z]{1,10}){0,4}"), 1..15)
    ) {
        let content: Vec<String> = entries
            .iter()
            .map(|(seq, (_, start), (_, end), text)| format!("{}\n{} --> {}\n{}", seq, start, end, text))
            .collect();
        let cues = parse_srt_string(&content.join("\n\n"));

        prop_assert_eq!(cues.len(), entries.len());

        let mut expected: Vec<_> = entries
            .iter()
            .map(|(seq, (start, _), (end, _), text)| (*seq, text.clone(), *start, *end))
            .collect();
        expected.sort_by_key(|entry| entry.0);

        let actual: Vec<_> = cues
            .iter()
            .map(|cue| (cue.sequence(), cue.text().to_string(), cue.start_time(), cue.end_time()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn test_timestamp_withValidFields_shouldConvertBothWays((ms, formatted) in timestamp()) {
        prop_assert_eq!(parse_timestamp(&formatted), Some(ms));
        prop_assert_eq!(format_timestamp(ms), formatted);
    }
}
