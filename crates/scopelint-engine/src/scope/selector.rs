use std::str::FromStr;

use crate::error::SelectorError;

/// Whole-document pseudo-scopes. Rules scoped to one of these run on the
/// synthetic document-level blocks rather than on individual spans.
pub const SIZED_SCOPES: [&str; 3] = ["raw", "summary", "text"];

/// A single, optionally negated, scope pattern such as `text.comment` or
/// `~blockquote`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    segments: Vec<String>,
    negated: bool,
}

impl Selector {
    /// Parses a selector written in a rule.
    ///
    /// A leading `~` negates the whole selector. Empty selectors and empty
    /// segments (`a..b`) are rejected.
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let trimmed = raw.trim();
        let (negated, body) = match trimmed.strip_prefix('~') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };

        if body.is_empty() {
            return Err(SelectorError::Empty {
                raw: raw.to_string(),
            });
        }

        let segments: Vec<String> = body.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(String::is_empty) {
            return Err(SelectorError::EmptySegment {
                raw: raw.to_string(),
            });
        }

        Ok(Self { segments, negated })
    }

    /// Builds the selector view of a concrete scope path. Never negated and
    /// never validated: a candidate is whatever the resolver produced.
    pub fn from_path(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_string).collect(),
            negated: false,
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether `segment` is one of this selector's segments.
    pub fn has(&self, segment: &str) -> bool {
        self.segments.iter().any(|s| s == segment)
    }

    /// Whether every segment of `other` is present in `self`.
    pub fn contains(&self, other: &Selector) -> bool {
        other.segments.iter().all(|s| self.has(s))
    }

    /// A two-segment path naming a whole-document scope, e.g. `summary.md`.
    pub fn is_sized(&self) -> bool {
        self.segments.len() == 2 && SIZED_SCOPES.iter().any(|s| self.has(s))
    }

    /// Evaluates this selector against a candidate path view.
    ///
    /// A selector without segments never matches.
    pub fn matches(&self, candidate: &Selector) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        candidate.contains(self) != self.negated
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Everything a rule says about where it applies.
///
/// Each input string is split on `&` into clauses; the expression matches a
/// path only when every clause of every string matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeExpression {
    clauses: Vec<Selector>,
    sized: bool,
}

impl ScopeExpression {
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, SelectorError> {
        let mut clauses = Vec::new();
        for value in raw {
            for part in value.as_ref().split('&') {
                clauses.push(Selector::parse(part)?);
            }
        }

        let sized = match clauses.as_slice() {
            [only] => {
                !only.negated
                    && only.segments.len() == 1
                    && SIZED_SCOPES.contains(&only.segments[0].as_str())
            }
            _ => false,
        };

        Ok(Self { clauses, sized })
    }

    /// Convenience for a single expression string.
    pub fn parse_one(raw: &str) -> Result<Self, SelectorError> {
        Self::parse(&[raw])
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.clauses
    }

    /// True iff the expression is exactly `raw`, `summary` or `text`.
    pub fn is_sized(&self) -> bool {
        self.sized
    }

    /// Decides whether this expression applies to a concrete scope path.
    ///
    /// Sized candidates (`raw.md`, `summary.md`, `text.md`) match every sized
    /// expression regardless of which whole-document scope it names; all other
    /// candidates go through clause-by-clause containment.
    pub fn matches(&self, candidate: impl AsRef<str>) -> bool {
        let candidate = Selector::from_path(candidate.as_ref());
        if candidate.is_sized() {
            return self.sized;
        }
        self.clauses.iter().all(|sel| sel.matches(&candidate))
    }
}

impl FromStr for ScopeExpression {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_one(s)
    }
}
