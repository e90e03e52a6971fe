//! Errors produced by the siteswap analyser.
//!
//! Two failure modes are surfaced distinctly: the input is not a siteswap expression at all
//! (raised here, as a `SiteswapError`), versus the input is syntactically well-formed but does not
//! denote a valid juggling pattern (returned as an [`AnalysisResult`](crate::AnalysisResult) with
//! `valid: false`, not an error at all). Callers rely on this split to decide between showing
//! "not a siteswap" and "invalid siteswap" — do not collapse it.

use core::fmt;

/// An error preventing a pattern from being analysed at all.
///
/// Every variant carries the offending pattern (after whitespace-stripping and lowercasing, the
/// same string that would have been echoed back as `AnalysisResult::pattern`) so a caller can
/// report it without holding on to the original input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteswapError {
    /// The pattern does not match the siteswap grammar at all: unbalanced brackets, a stray
    /// token, a braced literal containing a letter, or similar. This fires before any semantic
    /// interpretation is attempted.
    SyntacticallyInvalid {
        /// The cleaned (whitespace-stripped, lowercased) pattern that failed to parse.
        pattern: String,
    },
    /// The pattern uses a negative value, a negative repetition quantity, or a zero-value
    /// crossing throw, but `Options::allow_theoretical_patterns` was not set. These constructs
    /// model time-reversed or "debit" operations that most callers don't want by default.
    TheoreticalDisallowed {
        /// The pattern that triggered the check.
        pattern: String,
    },
    /// Two or more explicit synchronous tuples `(...)` in the pattern disagree on how many hands
    /// they describe.
    InconsistentHandCount {
        /// The pattern containing the mismatched tuples.
        pattern: String,
    },
    /// A throw's crossing offset (its trailing run of `x` markers) names a hand that doesn't
    /// exist for the pattern's inferred hand count.
    OffsetExceedsHands {
        /// The pattern containing the out-of-range offset.
        pattern: String,
    },
    /// A synchronous tuple's suppression marks (`!`) are not fewer than the number of hands in
    /// that tuple, so there would be nothing left to suppress.
    InvalidSuppression {
        /// The pattern containing the invalid suppression.
        pattern: String,
    },
    /// The per-hand state range the pattern would require exceeds `Options::maximum_length`.
    /// Raised before the corresponding allocation, so memory use stays bounded even for
    /// pathological inputs like `1^{99}20`.
    StateRangeTooLarge {
        /// The pattern that would have required an oversized range.
        pattern: String,
    },
}

impl SiteswapError {
    /// The pattern string carried by this error, regardless of variant.
    pub fn pattern(&self) -> &str {
        match self {
            SiteswapError::SyntacticallyInvalid { pattern }
            | SiteswapError::TheoreticalDisallowed { pattern }
            | SiteswapError::InconsistentHandCount { pattern }
            | SiteswapError::OffsetExceedsHands { pattern }
            | SiteswapError::InvalidSuppression { pattern }
            | SiteswapError::StateRangeTooLarge { pattern } => pattern,
        }
    }
}

impl fmt::Display for SiteswapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteswapError::SyntacticallyInvalid { pattern } => {
                write!(f, "`{}` is not a siteswap expression", pattern)
            }
            SiteswapError::TheoreticalDisallowed { pattern } => write!(
                f,
                "`{}` uses a theoretical construct (negative value, negative quantity, or \
                 zero-value crossing throw) but theoretical patterns are disallowed",
                pattern
            ),
            SiteswapError::InconsistentHandCount { pattern } => write!(
                f,
                "`{}` has synchronous tuples with different numbers of hands",
                pattern
            ),
            SiteswapError::OffsetExceedsHands { pattern } => write!(
                f,
                "`{}` crosses to a hand that does not exist in the pattern",
                pattern
            ),
            SiteswapError::InvalidSuppression { pattern } => write!(
                f,
                "`{}` suppresses at least as many throws as it has hands",
                pattern
            ),
            SiteswapError::StateRangeTooLarge { pattern } => write!(
                f,
                "`{}` requires a per-hand state range larger than the configured maximum",
                pattern
            ),
        }
    }
}

impl std::error::Error for SiteswapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_accessor_covers_all_variants() {
        let errs = [
            SiteswapError::SyntacticallyInvalid {
                pattern: "-".into(),
            },
            SiteswapError::TheoreticalDisallowed {
                pattern: "-5".into(),
            },
            SiteswapError::InconsistentHandCount {
                pattern: "(4,4)(4,4,4)".into(),
            },
            SiteswapError::OffsetExceedsHands {
                pattern: "(6xx,4xx)".into(),
            },
            SiteswapError::InvalidSuppression {
                pattern: "(4,4)!!!".into(),
            },
            SiteswapError::StateRangeTooLarge {
                pattern: "1^{99}20".into(),
            },
        ];
        for e in &errs {
            assert!(!e.pattern().is_empty());
            assert!(!e.to_string().is_empty());
        }
    }
}
