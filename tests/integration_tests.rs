//! Integration tests for srtfix
//!
//! These tests drive the public API end to end: parsing whole documents,
//! applying shifts and framerate factors, and reading/writing files.

use srtfix::config::LineEnding;
use srtfix::pipeline::{convert, convert_text, run, ConvertConfig, Sink, Source};
use srtfix::subtitle::{EntryList, Framerate, Span, Time};
use srtfix::SrtfixError;

use std::fs;

const TWO_ENTRIES: &str = "1
00:00:01,500 --> 00:00:03,100
Hello, welcome to this video.

2
00:00:05,000 --> 00:00:07,250
Today we're going to learn.
Second line.
";

fn endpoints(list: &EntryList) -> Vec<i64> {
    list.iter()
        .flat_map(|e| [e.span().start().millis(), e.span().end().millis()])
        .collect()
}

// ============================================================================
// Time Arithmetic Tests
// ============================================================================

mod time_tests {
    use super::*;

    #[test]
    fn test_documented_values() {
        assert_eq!(Time::parse("0:0:0,0").unwrap().millis(), 0);
        assert_eq!(Time::parse("9:59:59,999").unwrap().millis(), 35_999_999);
        assert_eq!(Time::parse("1h2m3s4ms").unwrap().millis(), 3_723_004);
        assert_eq!(
            Time::parse("1ms1s1m1h").unwrap(),
            Time::parse("1h1m1s1ms").unwrap()
        );
        assert_eq!(Time::parse("-1h1ms").unwrap().millis(), -3_600_001);
        assert_eq!(Time::parse("1h1ms-").unwrap().millis(), -3_600_001);
        assert_eq!(Time::from_millis(-1001).to_string(), "-00:00:01,001");
    }

    #[test]
    fn test_integer_scaling_matches_multiplication() {
        for ms in [-35_999_999, -1, 0, 1, 1001, 3_723_004] {
            for factor in [-3i64, 0, 1, 2, 7] {
                let scaled = Time::from_millis(ms).scale(factor as f64);
                assert_eq!(scaled.millis(), ms * factor);
            }
        }
    }

    #[test]
    fn test_span_shift() {
        let span = Span::parse("0:0:0,1 --> 0:0:0,2").unwrap().add(100i64).unwrap();
        assert_eq!(span.start().millis(), 101);
        assert_eq!(span.end().millis(), 102);
    }
}

// ============================================================================
// Document Tests
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_parse_two_entries() {
        let list = EntryList::parse(TWO_ENTRIES).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(endpoints(&list), vec![1500, 3100, 5000, 7250]);
        assert_eq!(
            list.get(2).unwrap().text(),
            "Today we're going to learn.\nSecond line."
        );
    }

    #[test]
    fn test_dangling_index_dropped() {
        let text = format!("{}\n3\n", TWO_ENTRIES);
        let list = EntryList::parse(&text).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.get(3).is_none());
    }

    #[test]
    fn test_unparsable_span_aborts() {
        let text = TWO_ENTRIES.replace("00:00:05,000 --> 00:00:07,250", "00:00:05,000 -> 00:00:07,250");
        assert!(matches!(
            EntryList::parse(&text),
            Err(SrtfixError::SpanFormat(_))
        ));

        let text = TWO_ENTRIES.replace("00:00:05,000", "00:00:xx,000");
        assert!(matches!(
            EntryList::parse(&text),
            Err(SrtfixError::TimeParse(_))
        ));
    }

    #[test]
    fn test_entry_without_text() {
        let text = "1\n00:00:01,000 --> 00:00:02,000\n2\n00:00:03,000 --> 00:00:04,000\nText\n";
        let list = EntryList::parse(text).unwrap();
        assert_eq!(list.get(1).unwrap().text(), "");
        assert_eq!(
            list.format(LineEnding::Lf),
            "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nText\n"
        );
    }

    #[test]
    fn test_round_trip_normalizes_timestamps() {
        let text = "1\r\n0:0:1,5 --> 0:0:2,50\r\nText\r\n";
        let list = EntryList::parse(text).unwrap();
        assert_eq!(
            list.to_string(),
            "1\r\n00:00:01,005 --> 00:00:02,050\r\nText\r\n"
        );
    }
}

// ============================================================================
// Conversion Tests
// ============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_shift_then_framerate() {
        let list = EntryList::parse(TWO_ENTRIES).unwrap();
        let config = ConvertConfig {
            shift: Some(Time::parse("2s").unwrap()),
            framerate: Some(Framerate::parse("25/24").unwrap()),
            line_ending: LineEnding::Crlf,
        };

        let converted = convert(&list, &config);
        let factor = 25.0 / 24.0;
        let expected: Vec<i64> = endpoints(&list)
            .into_iter()
            .map(|ms| ((ms + 2000) as f64 * factor).trunc() as i64)
            .collect();

        assert_eq!(endpoints(&converted), expected);
        assert_eq!(endpoints(&converted), vec![3645, 5312, 7291, 9635]);
    }

    #[test]
    fn test_negative_shift_formats_with_sign() {
        let config = ConvertConfig {
            shift: Some(Time::parse("-2s").unwrap()),
            line_ending: LineEnding::Lf,
            ..Default::default()
        };
        let result = convert_text(TWO_ENTRIES, &config).unwrap();
        assert!(result
            .output
            .starts_with("1\n-00:00:00,500 --> 00:00:01,100\nHello, welcome to this video.\n\n2\n"));
        assert_eq!(result.stats.entries, 2);
    }

    #[test]
    fn test_text_is_untouched() {
        let config = ConvertConfig {
            shift: Some(Time::from_millis(250)),
            framerate: Some(Framerate::new(0.5).unwrap()),
            line_ending: LineEnding::Lf,
        };
        let result = convert_text(TWO_ENTRIES, &config).unwrap();
        assert!(result.output.contains("Hello, welcome to this video.\n"));
        assert!(result
            .output
            .contains("Today we're going to learn.\nSecond line.\n"));
    }
}

// ============================================================================
// File I/O Tests
// ============================================================================

mod io_tests {
    use super::*;

    #[test]
    fn test_run_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.srt");
        let output = dir.path().join("out.srt");
        fs::write(&input, TWO_ENTRIES).unwrap();

        let config = ConvertConfig {
            shift: Some(Time::parse("1s").unwrap()),
            ..Default::default()
        };
        let stats = run(
            &Source::File(input.clone()),
            &Sink::File(output.clone()),
            &config,
        )
        .unwrap();

        assert_eq!(stats.entries, 2);
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("1\r\n00:00:02,500 --> 00:00:04,100\r\n"));
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.srt");
        let output = dir.path().join("out.srt");
        fs::write(&input, "1\nnot a span\nText\n").unwrap();

        let result = run(
            &Source::File(input),
            &Sink::File(output.clone()),
            &ConvertConfig::default(),
        );

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &Source::File(dir.path().join("missing.srt")),
            &Sink::Stdout,
            &ConvertConfig::default(),
        );
        assert!(matches!(result, Err(SrtfixError::FileNotFound(_))));
    }
}
