//! Checks that inspect the raw text of a line.
//!
//! These operate on the line exactly as read from the file, including the
//! trailing line terminator. None of them understands the language grammar;
//! the comment checks treat any `#` as a comment start, even inside a string
//! literal.

/// Default maximum line length for the length check.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 79;

/// Number of consecutive blank lines tolerated before a non-blank line.
pub const MAX_BLANK_LINES: usize = 2;

/// Returns true if the line, minus trailing whitespace, exceeds `max` chars.
pub fn is_too_long(line: &str, max: usize) -> bool {
    line.trim_end().chars().count() > max
}

/// Count of leading space characters. Tabs are not expanded.
pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Returns true if the leading-space indentation is not a multiple of four.
pub fn has_bad_indentation(line: &str) -> bool {
    leading_spaces(line) % 4 != 0
}

/// Returns true if the line holds a `;` outside quotes and before any comment.
pub fn has_unnecessary_semicolon(line: &str) -> bool {
    let mut in_single = false;
    let mut in_double = false;

    for ch in line.chars() {
        match ch {
            '#' if !in_single && !in_double => break,
            '"' if !in_single => in_double = !in_double,
            '\'' if !in_double => in_single = !in_single,
            ';' if !in_single && !in_double => return true,
            _ => {}
        }
    }

    false
}

/// Returns true for a code line whose inline comment has fewer than two
/// spaces in front of it.
pub fn lacks_inline_comment_spacing(line: &str) -> bool {
    !line.starts_with('#') && line.contains('#') && !line.contains("  #")
}

/// Returns true if the comment part of the line mentions a todo.
pub fn has_todo(line: &str) -> bool {
    match line.find('#') {
        Some(start) => line[start..].to_lowercase().contains("todo"),
        None => false,
    }
}

/// Returns true if the line holds nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Running count of consecutive blank lines within one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlankRun {
    count: usize,
}

impl BlankRun {
    /// Feed the next line of the file.
    ///
    /// Returns true on the non-blank line that ends a run longer than
    /// [`MAX_BLANK_LINES`]. The counter restarts on every non-blank line.
    pub fn observe(&mut self, line: &str) -> bool {
        if is_blank(line) {
            self.count += 1;
            return false;
        }

        let too_many = self.count > MAX_BLANK_LINES;
        self.count = 0;
        too_many
    }

    /// Blank lines seen since the last non-blank line.
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_long_boundary() {
        let ok = format!("{}\n", "x".repeat(79));
        let long = format!("{}\n", "x".repeat(80));
        assert!(!is_too_long(&ok, DEFAULT_MAX_LINE_LENGTH));
        assert!(is_too_long(&long, DEFAULT_MAX_LINE_LENGTH));
    }

    #[test]
    fn test_too_long_ignores_trailing_whitespace() {
        let line = format!("{}      \r\n", "x".repeat(79));
        assert!(!is_too_long(&line, DEFAULT_MAX_LINE_LENGTH));
    }

    #[test]
    fn test_too_long_counts_chars_not_bytes() {
        let line = "é".repeat(79);
        assert!(!is_too_long(&line, DEFAULT_MAX_LINE_LENGTH));
    }

    #[test]
    fn test_indentation() {
        assert!(!has_bad_indentation("x = 1\n"));
        assert!(!has_bad_indentation("    x = 1\n"));
        assert!(!has_bad_indentation("        x = 1\n"));
        assert!(has_bad_indentation("  x = 1\n"));
        assert!(has_bad_indentation("     x = 1\n"));
        // Tabs are not spaces.
        assert!(!has_bad_indentation("\tx = 1\n"));
        // Blank lines still count their spaces.
        assert!(!has_bad_indentation("\n"));
        assert!(has_bad_indentation("   \n"));
    }

    #[test]
    fn test_semicolon() {
        assert!(has_unnecessary_semicolon("a = 1;\n"));
        assert!(has_unnecessary_semicolon("a = 1; b = 2\n"));
        assert!(!has_unnecessary_semicolon("a = 'x;y'\n"));
        assert!(!has_unnecessary_semicolon("a = \"x;y\"\n"));
        assert!(!has_unnecessary_semicolon("a = 1  # comment; here\n"));
        assert!(!has_unnecessary_semicolon("a = 1\n"));
    }

    #[test]
    fn test_semicolon_nested_quotes() {
        // The apostrophe inside double quotes does not open a single-quoted span.
        assert!(has_unnecessary_semicolon("a = \"it's\";\n"));
        assert!(!has_unnecessary_semicolon("a = \"it's;\"\n"));
        assert!(has_unnecessary_semicolon("a = 'say \"hi\"';\n"));
    }

    #[test]
    fn test_semicolon_hash_inside_string_is_not_a_comment() {
        assert!(has_unnecessary_semicolon("a = '#';\n"));
    }

    #[test]
    fn test_inline_comment_spacing() {
        assert!(lacks_inline_comment_spacing("x = 1 # comment\n"));
        assert!(lacks_inline_comment_spacing("x = 1# comment\n"));
        assert!(!lacks_inline_comment_spacing("x = 1  # comment\n"));
        assert!(!lacks_inline_comment_spacing("# full line comment\n"));
        assert!(!lacks_inline_comment_spacing("x = 1\n"));
        // Not quote aware.
        assert!(lacks_inline_comment_spacing("print('#')\n"));
    }

    #[test]
    fn test_todo() {
        assert!(has_todo("# TODO fix this\n"));
        assert!(has_todo("#ToDo\n"));
        assert!(has_todo("x = 1  # todo: later\n"));
        assert!(!has_todo("# nothing here\n"));
        assert!(!has_todo("todo = 1\n"));
        assert!(!has_todo("todo_list = []  # items\n"));
    }

    #[test]
    fn test_blank_run_fires_on_terminating_line() {
        let mut run = BlankRun::default();
        for _ in 0..4 {
            assert!(!run.observe("\n"));
        }
        assert_eq!(run.count(), 4);
        assert!(run.observe("code()\n"));
        assert_eq!(run.count(), 0);
        assert!(!run.observe("more()\n"));
    }

    #[test]
    fn test_blank_run_tolerates_two() {
        let mut run = BlankRun::default();
        assert!(!run.observe("\n"));
        assert!(!run.observe("   \n"));
        assert!(!run.observe("code()\n"));
    }

    #[test]
    fn test_blank_run_three_fires() {
        let mut run = BlankRun::default();
        assert!(!run.observe("\n"));
        assert!(!run.observe("\t\n"));
        assert!(!run.observe("\r\n"));
        assert!(run.observe("code()\n"));
    }
}
