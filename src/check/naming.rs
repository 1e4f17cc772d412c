//! Declaration checks driven by line-anchored patterns.
//!
//! Every matcher returns the offending token so the caller can render it into
//! the diagnostic message. Only single lines are inspected: a `def` whose
//! parameter list spans several lines is checked up to the end of its first
//! line. [`OpenBrackets`] is the one piece of state carried between lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `class` or `def` followed by two or more spaces.
    static ref DECLARATION_SPACING: Regex = Regex::new(r"^ *(class|def) {2,}").unwrap();

    /// Class names starting with a lowercase letter, digit or underscore.
    static ref NOT_CAMEL_CASE_CLASS: Regex = Regex::new(r"^ *class +([a-z0-9_]\w*)").unwrap();

    /// Function names starting with an uppercase letter or digit.
    static ref NOT_SNAKE_CASE_FUNCTION: Regex = Regex::new(r"^ *def +([A-Z0-9]\w*)").unwrap();

    /// Start of a function signature, up to and including the opening paren.
    static ref SIGNATURE_START: Regex = Regex::new(r"^ *(?:async +)?def +\w+\s*\(").unwrap();

    /// Plain, augmented or annotated assignment to a bare name.
    static ref ASSIGNMENT: Regex = Regex::new(
        r"^ *(\w+)\s*(?::[^=]*)?(?://|\*\*|>>|<<|[-+*/%@&|^])?=(?:[^=]|$)"
    ).unwrap();

    static ref IDENTIFIER: Regex = Regex::new(r"^\w+$").unwrap();
}

/// Returns the keyword followed by too many spaces, if any.
pub fn declaration_spacing(line: &str) -> Option<&str> {
    DECLARATION_SPACING
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the declared class name if it is not CamelCase.
pub fn non_camel_case_class(line: &str) -> Option<&str> {
    NOT_CAMEL_CASE_CLASS
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the declared function name if it is not snake_case.
pub fn non_snake_case_function(line: &str) -> Option<&str> {
    NOT_SNAKE_CASE_FUNCTION
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the first parameter on a `def` line whose name is not snake_case.
///
/// Positional-only parameters are not inspected.
pub fn non_snake_case_argument(line: &str) -> Option<&str> {
    parameters(line)
        .into_iter()
        .filter(|p| !p.positional_only)
        .map(|p| p.name)
        .find(|name| starts_upper_or_digit(name))
}

/// Returns the assigned name of an assignment if it is not snake_case.
///
/// A line ending in `,` is taken to be a keyword argument or an element of
/// a bracketed list, not a statement.
pub fn non_snake_case_variable(line: &str) -> Option<&str> {
    if line.trim_end().ends_with(',') {
        return None;
    }
    let name = ASSIGNMENT.captures(line)?.get(1)?.as_str();
    if starts_upper_or_digit(name) {
        Some(name)
    } else {
        None
    }
}

/// Returns true if a parameter on a `def` line defaults to a list, dict or
/// set literal.
pub fn has_mutable_default(line: &str) -> bool {
    parameters(line).iter().any(|p| {
        p.default
            .map(|d| d.starts_with('[') || d.starts_with('{'))
            .unwrap_or(false)
    })
}

fn starts_upper_or_digit(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .unwrap_or(false)
}

/// Tracks brackets left open across lines, so that continuation lines of a
/// call or literal are not read as statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenBrackets {
    depth: usize,
}

impl OpenBrackets {
    /// Feed the next line of the file.
    ///
    /// Returns true if the line starts inside an open bracket. Quotes and
    /// comments are honoured within the line; strings spanning lines are not
    /// tracked.
    pub fn observe(&mut self, line: &str) -> bool {
        let nested = self.depth > 0;
        let mut quote: Option<char> = None;

        for ch in line.chars() {
            if let Some(q) = quote {
                if ch == q {
                    quote = None;
                }
                continue;
            }
            match ch {
                '\'' | '"' => quote = Some(ch),
                '#' => break,
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
        }

        nested
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A named parameter taken from a function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Parameter<'a> {
    name: &'a str,
    default: Option<&'a str>,
    positional_only: bool,
}

/// Split the parameter list of a `def` line into the parameters that can be
/// passed positionally.
///
/// Everything from the first star parameter or bare `*` onwards is keyword
/// only and dropped. Parameters before a `/` marker are flagged as
/// positional-only. Splitting respects brackets and quotes so defaults such
/// as `x=(1, 2)` stay intact.
fn parameters(line: &str) -> Vec<Parameter<'_>> {
    let Some(start) = SIGNATURE_START.find(line).map(|m| m.end()) else {
        return Vec::new();
    };
    let rest = &line[start..];

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut seg_start = 0;
    let mut end = rest.len();

    for (i, ch) in rest.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth > 0 => depth -= 1,
            ')' => {
                end = i;
                break;
            }
            ',' if depth == 0 => {
                segments.push(&rest[seg_start..i]);
                seg_start = i + 1;
            }
            '#' if depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    if seg_start <= end {
        segments.push(&rest[seg_start..end]);
    }

    let mut params: Vec<Parameter<'_>> = Vec::new();
    for segment in segments {
        let segment = segment.trim();
        if segment.starts_with('*') {
            break;
        }
        if segment == "/" {
            for param in params.iter_mut() {
                param.positional_only = true;
            }
            continue;
        }
        let (head, default) = match segment.split_once('=') {
            Some((head, default)) => (head, Some(default.trim())),
            None => (segment, None),
        };
        let name = head.split(':').next().unwrap_or("").trim();
        if IDENTIFIER.is_match(name) {
            params.push(Parameter {
                name,
                default,
                positional_only: false,
            });
        }
    }
    params
}
