//! The closed set of checks and the ordered registry that runs them.

use lazy_static::lazy_static;
use std::collections::BTreeSet;

use super::lines::{self, DEFAULT_MAX_LINE_LENGTH};
use super::naming;
use super::{CheckCode, CheckOutcome, ScanContext};

/// Every check known to the analyzer.
///
/// Adding a check means adding a variant here, giving it a code, and listing
/// it in [`Check::ALL`]. The registry orders by code, so the position in that
/// list does not affect output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    TooLong { max: usize },
    Indentation,
    UnnecessarySemicolon,
    InlineCommentSpacing,
    Todo,
    BlankLines,
    DeclarationSpacing,
    ClassName,
    FunctionName,
    ArgumentName,
    VariableName,
    MutableDefault,
}

impl Check {
    /// All checks with their default parameters.
    pub const ALL: [Check; 12] = [
        Check::TooLong {
            max: DEFAULT_MAX_LINE_LENGTH,
        },
        Check::Indentation,
        Check::UnnecessarySemicolon,
        Check::InlineCommentSpacing,
        Check::Todo,
        Check::BlankLines,
        Check::DeclarationSpacing,
        Check::ClassName,
        Check::FunctionName,
        Check::ArgumentName,
        Check::VariableName,
        Check::MutableDefault,
    ];

    pub fn code(&self) -> CheckCode {
        let number = match self {
            Check::TooLong { .. } => 1,
            Check::Indentation => 2,
            Check::UnnecessarySemicolon => 3,
            Check::InlineCommentSpacing => 4,
            Check::Todo => 5,
            Check::BlankLines => 6,
            Check::DeclarationSpacing => 7,
            Check::ClassName => 8,
            Check::FunctionName => 9,
            Check::ArgumentName => 10,
            Check::VariableName => 11,
            Check::MutableDefault => 12,
        };
        CheckCode(number)
    }

    /// Short kebab-case name, used when listing checks.
    pub fn name(&self) -> &'static str {
        match self {
            Check::TooLong { .. } => "too-long",
            Check::Indentation => "indentation",
            Check::UnnecessarySemicolon => "unnecessary-semicolon",
            Check::InlineCommentSpacing => "inline-comment-spacing",
            Check::Todo => "todo",
            Check::BlankLines => "blank-lines",
            Check::DeclarationSpacing => "declaration-spacing",
            Check::ClassName => "class-name",
            Check::FunctionName => "function-name",
            Check::ArgumentName => "argument-name",
            Check::VariableName => "variable-name",
            Check::MutableDefault => "mutable-default",
        }
    }

    /// Message template; `{}` marks the substituted token.
    pub fn template(&self) -> &'static str {
        match self {
            Check::TooLong { .. } => "Too long",
            Check::Indentation => "Indentation is not a multiple of four",
            Check::UnnecessarySemicolon => "Unnecessary semicolon",
            Check::InlineCommentSpacing => "At least two spaces required before inline comments",
            Check::Todo => "TODO found",
            Check::BlankLines => "Too many blank lines",
            Check::DeclarationSpacing => "Too many spaces after '{}'",
            Check::ClassName => "Class name '{}' should use CamelCase",
            Check::FunctionName => "Function name '{}' should use snake_case",
            Check::ArgumentName => "Argument name '{}' should be snake_case",
            Check::VariableName => "Variable '{}' in function should be snake_case",
            Check::MutableDefault => "Default argument value is mutable",
        }
    }

    /// Evaluate the check against one raw line.
    ///
    /// Only [`Check::BlankLines`] and [`Check::VariableName`] touch the
    /// context; they must see every line of a file in order for their
    /// results to be meaningful.
    pub fn evaluate(&self, line: &str, ctx: &mut ScanContext) -> CheckOutcome {
        let matched = match self {
            Check::TooLong { max } => lines::is_too_long(line, *max),
            Check::Indentation => lines::has_bad_indentation(line),
            Check::UnnecessarySemicolon => lines::has_unnecessary_semicolon(line),
            Check::InlineCommentSpacing => lines::lacks_inline_comment_spacing(line),
            Check::Todo => lines::has_todo(line),
            Check::BlankLines => ctx.blank_run.observe(line),
            Check::MutableDefault => naming::has_mutable_default(line),
            Check::DeclarationSpacing => {
                return self.render(naming::declaration_spacing(line));
            }
            Check::ClassName => return self.render(naming::non_camel_case_class(line)),
            Check::FunctionName => return self.render(naming::non_snake_case_function(line)),
            Check::ArgumentName => return self.render(naming::non_snake_case_argument(line)),
            Check::VariableName => {
                if ctx.open_brackets.observe(line) {
                    return CheckOutcome::pass();
                }
                return self.render(naming::non_snake_case_variable(line));
            }
        };

        if matched {
            CheckOutcome::fail(self.template())
        } else {
            CheckOutcome::pass()
        }
    }

    fn render(&self, token: Option<&str>) -> CheckOutcome {
        match token {
            Some(token) => CheckOutcome::fail(self.template().replacen("{}", token, 1)),
            None => CheckOutcome::pass(),
        }
    }
}

/// Which checks to run and with what parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Codes to run; `None` runs everything.
    pub select: Option<Vec<CheckCode>>,
    /// Codes to skip, applied after `select`.
    pub ignore: Vec<CheckCode>,
    pub max_line_length: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            select: None,
            ignore: Vec::new(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Error building a registry from a selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown check code {0}")]
    UnknownCode(CheckCode),
    #[error("max line length must be positive")]
    ZeroLineLength,
}

lazy_static! {
    static ref STANDARD: Registry = Registry::build(Check::ALL.to_vec());
}

/// Ordered, read-only set of checks.
///
/// Iteration is always ascending by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    checks: Vec<Check>,
}

impl Registry {
    /// The registry holding every check with default parameters.
    pub fn standard() -> &'static Registry {
        &STANDARD
    }

    /// Build a registry narrowed and parameterized by a selection.
    pub fn from_selection(selection: &Selection) -> Result<Self, SelectionError> {
        if selection.max_line_length == 0 {
            return Err(SelectionError::ZeroLineLength);
        }

        let known: BTreeSet<CheckCode> = Check::ALL.iter().map(|c| c.code()).collect();
        let requested = selection.select.iter().flatten().chain(&selection.ignore);
        for code in requested {
            if !known.contains(code) {
                return Err(SelectionError::UnknownCode(*code));
            }
        }

        let checks = Check::ALL
            .iter()
            .filter(|check| {
                let code = check.code();
                selection
                    .select
                    .as_ref()
                    .map(|s| s.contains(&code))
                    .unwrap_or(true)
                    && !selection.ignore.contains(&code)
            })
            .map(|check| match check {
                Check::TooLong { .. } => Check::TooLong {
                    max: selection.max_line_length,
                },
                other => *other,
            })
            .collect();

        Ok(Self::build(checks))
    }

    fn build(mut checks: Vec<Check>) -> Self {
        checks.sort_by_key(|c| c.code());
        checks.dedup_by_key(|c| c.code());
        Self { checks }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn codes(&self) -> Vec<CheckCode> {
        self.checks.iter().map(|c| c.code()).collect()
    }
}
