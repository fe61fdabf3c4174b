//! Deterministic ordering of route patterns by specificity.
//!
//! Patterns are split on `/` and every non-empty segment is classified. Two patterns are
//! compared segment by segment on their [`SegmentKind`]; the first differing kind decides.
//! When one kind sequence is a prefix of the other the shorter pattern wins, and fully tied
//! patterns fall back to plain string order. A bare `*` therefore always sorts after every
//! pattern whose first segment is not itself a wildcard.

use std::cmp::Ordering;

/// Orders the route patterns of a manifest.
pub trait RouteOrder {
  /// Return `patterns` in output order.
  fn order(&self, patterns: Vec<String>) -> Vec<String>;
}

/// Classification of a single path segment, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SegmentKind {
  /// Literal segment such as `blog`.
  Static,
  /// Parameter with a literal suffix such as `:name.html`.
  SuffixedParam,
  /// Parameter such as `:slug`.
  Param,
  /// Optional parameter such as `:page?`.
  OptionalParam,
  /// Catch-all segment such as `*` or `*rest`.
  Wildcard,
}

impl SegmentKind {
  fn classify(segment: &str) -> Self {
    if segment.starts_with('*') {
      Self::Wildcard
    } else if let Some(param) = segment.strip_prefix(':') {
      if param.ends_with('?') {
        Self::OptionalParam
      } else if param.contains('.') {
        Self::SuffixedParam
      } else {
        Self::Param
      }
    } else {
      Self::Static
    }
  }
}

/// Classify every non-empty segment of `pattern`.
pub fn segment_kinds(pattern: &str) -> Vec<SegmentKind> {
  pattern
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(SegmentKind::classify)
    .collect()
}

/// Built-in specificity sort: static before parameterized before wildcard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificityOrder;

impl SpecificityOrder {
  /// Compare two patterns by specificity.
  pub fn compare(a: &str, b: &str) -> Ordering {
    segment_kinds(a)
      .cmp(&segment_kinds(b))
      .then_with(|| a.cmp(b))
  }
}

impl RouteOrder for SpecificityOrder {
  fn order(&self, mut patterns: Vec<String>) -> Vec<String> {
    patterns.sort_by(|a, b| Self::compare(a, b));
    patterns
  }
}
