use crate::entry::LogEntry;
use std::path::Path;

/// Read the last `max_lines` non-blank lines of a file, oldest first.
///
/// A missing or unreadable file yields an empty window. Invalid UTF-8 is
/// replaced rather than rejected, so one corrupt write does not hide the
/// whole file.
pub fn read_last_lines(path: &Path, max_lines: usize) -> Vec<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("cannot read {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let start = lines.len().saturating_sub(max_lines);
    lines[start..].iter().map(|line| line.to_string()).collect()
}

/// Parse a window of lines into entries, most recent first.
///
/// Index 0 is the last line of the window. Lines that are not JSON become
/// [`LogEntry::ParseError`] without affecting their neighbours.
pub fn parse_log_lines(lines: &[String]) -> Vec<LogEntry> {
    lines
        .iter()
        .rev()
        .enumerate()
        .map(|(index, line)| LogEntry::parse(index, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_lines(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("test.jsonl");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lines = read_last_lines(&dir.path().join("nope.jsonl"), 100);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_last_lines(dir.path(), 10).is_empty());
    }

    #[test]
    fn test_keeps_last_lines_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_lines(&dir, "{\"a\":1}\n{\"b\":2}\n{\"c\":3}\n{\"d\":4}\n");

        assert_eq!(read_last_lines(&path, 2), vec!["{\"c\":3}", "{\"d\":4}"]);
        assert_eq!(read_last_lines(&path, 10).len(), 4);
        assert!(read_last_lines(&path, 0).is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_count_toward_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_lines(&dir, "one\n\n   \ntwo\r\n\t\nthree\n\n");

        assert_eq!(read_last_lines(&path, 2), vec!["two", "three"]);
        assert_eq!(read_last_lines(&path, 5), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_window_sizes_match_min_of_lines_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        let content: String = (0..7).map(|i| format!("{{\"n\":{i}}}\n")).collect();
        let path = write_lines(&dir, &content);

        for limit in 0..10 {
            let lines = read_last_lines(&path, limit);
            let expected: Vec<String> = (7usize.saturating_sub(limit)..7)
                .map(|i| format!("{{\"n\":{i}}}"))
                .collect();
            assert_eq!(lines, expected, "limit {limit}");
        }
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, b"{\"a\":1}\n\xff\xfe\n").unwrap();

        let lines = read_last_lines(&path, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "{\"a\":1}");
    }

    #[test]
    fn test_parse_reverses_and_indexes_newest_first() {
        let lines = vec![
            r#"{"name":"A"}"#.to_string(),
            r#"{"name":"B"}"#.to_string(),
            r#"{"name":"C"}"#.to_string(),
        ];
        let entries = parse_log_lines(&lines);

        let names: Vec<_> = entries.iter().map(|e| e.text("name").unwrap()).collect();
        let indices: Vec<_> = entries.iter().map(LogEntry::index).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_bad_line_is_isolated() {
        let lines = vec![
            r#"{"stage":"request"}"#.to_string(),
            "garbage{".to_string(),
            r#"{"stage":"usage"}"#.to_string(),
        ];
        let entries = parse_log_lines(&lines);

        assert_eq!(entries[0].stage().as_deref(), Some("usage"));
        assert_eq!(
            entries[1],
            LogEntry::ParseError {
                index: 1,
                raw: "garbage{".to_string()
            }
        );
        assert_eq!(entries[2].stage().as_deref(), Some("request"));
    }
}
