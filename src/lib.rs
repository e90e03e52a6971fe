//! `siteswap` is a validator and analyser for siteswap juggling notation.
//!
//! Siteswap is a compact notation for juggling patterns: a string like `"744"` or `"(4,4)!"`
//! describes, beat by beat, how many props each hand throws and how far ahead they land. Not
//! every string that *looks* like a siteswap is actually a valid juggling pattern — a pattern is
//! valid only if there exists a consistent assignment of props to hands and beats that the
//! pattern's throws neither duplicate nor starve. This crate decides that question and, for valid
//! patterns, reports their period, cardinality (prop count), ground/excited state, and a
//! canonical normalised form.
//!
//! The crate has a single entry point, [`analyse`], which takes a pattern string and an
//! [`Options`] and returns an [`AnalysisResult`] or a [`SiteswapError`]. The distinction between
//! the two matters: a string that isn't a siteswap expression at all (unbalanced brackets, a
//! stray character) is an error, while a string that *is* a siteswap expression but doesn't
//! denote a valid pattern (e.g. `"321"`, a classic collision) is simply an `AnalysisResult` with
//! `valid: false`. See [`SiteswapError`] for the full error taxonomy.
//!
//! ## A brief overview of the analyser's architecture
//!
//! The pipeline runs in the stages below, each in its own module, leaves first:
//!
//! - [`scanner`] turns the whitespace-stripped, lowercased input into a token stream, resolving
//!   every value literal (decimal digit, `a`..`o` letter, or `{n}` braced literal) along the way.
//! - [`parser`] is a hand-written recursive-descent parser driving the token stream into a
//!   [`grammar::Pattern`]: an ordered list of groups, each an ordered list of actions (multiplex
//!   throws), each an ordered list of events (a value, a crossing offset, and a quantity).
//! - [`semantics`] rejects patterns that are syntactically fine but semantically impossible: a
//!   theoretical construct used without `Options::set_allow_theoretical_patterns`, an explicit
//!   tuple whose hand count disagrees with another, a crossing offset naming a hand that doesn't
//!   exist.
//! - [`normalizer`] reduces the parsed pattern to its canonical minimal-period form — collapsing
//!   repeated groups, deduplicating multiplex events, and finding the smallest period a pattern's
//!   group sequence actually needs — and computes period/cardinality along the way.
//! - [`solver`] proves periodicity by building, per hand, a finite window of beat indices the
//!   pattern can touch and a delta array over that window, then solving for the unique state
//!   (assumed zero outside the window) that a `period`-beat shift leaves unchanged. A pattern is
//!   valid iff that assumption is self-consistent.
//! - [`printer`] renders a normalised group list back to its canonical string form.
//!
//! ## Theoretical patterns
//!
//! Ordinary siteswaps only ever throw a non-negative number of props. Juggling theory also
//! studies *negative* throws and *negative* repetition quantities, which model the time-reversed
//! inverse of a throw or a chain of throws. These constructs are rejected by default (see
//! [`SiteswapError::TheoreticalDisallowed`]) and only admitted when
//! [`Options::set_allow_theoretical_patterns`] is set.

mod errors;
pub use errors::SiteswapError;

mod options;
pub use options::Options;

pub mod grammar;
pub mod normalizer;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod semantics;
pub mod solver;
mod utils;

/// The observable result of analysing a pattern.
///
/// `pattern` and `valid` are always present. `hands` is always present too, but its own `None`
/// means something different from an absent field: it means the pattern never used an explicit
/// synchronous tuple, so it's implicitly one-handed. `period` is present for valid patterns and
/// for the distinguished "empty pattern"/period-zero case; `cardinality`, `normalised`, `ground`,
/// and `excited` are present only when the pattern is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisResult {
    /// The input after whitespace-stripping and lowercasing, or `"ε"` for the empty pattern.
    pub pattern: String,
    /// Whether the pattern denotes a valid juggling sequence.
    pub valid: bool,
    /// The pattern's period in beats, when known.
    pub period: Option<i64>,
    /// The pattern's cardinality (signed prop count), when valid.
    pub cardinality: Option<i64>,
    /// The inferred hand count, or `None` if the pattern never used an explicit synchronous
    /// tuple (in which case it's treated as one-handed).
    pub hands: Option<u32>,
    /// The canonical minimal-period rendering of the pattern, when valid.
    pub normalised: Option<String>,
    /// Whether the pattern returns to the canonical ground state for its cardinality, when
    /// valid.
    pub ground: Option<bool>,
    /// `!ground`, when valid.
    pub excited: Option<bool>,
}

impl AnalysisResult {
    fn invalid(pattern: String, period: Option<i64>, hands: Option<u32>) -> Self {
        Self {
            pattern,
            valid: false,
            period,
            cardinality: None,
            hands,
            normalised: None,
            ground: None,
            excited: None,
        }
    }
}

/// Analyses a siteswap pattern, reporting its validity and, if valid, its period, cardinality,
/// ground state, and canonical normalised form.
///
/// Returns `Err` only when `pattern` cannot be interpreted as a siteswap expression at all, or
/// uses a construct `options` disallows; a well-formed pattern that simply isn't a valid juggling
/// sequence (e.g. `"321"`) comes back as `Ok` with `valid: false`, never an error.
///
/// ```
/// use siteswap::{analyse, Options};
///
/// let result = analyse("744", Options::default()).unwrap();
/// assert!(result.valid);
/// assert_eq!(result.period, Some(3));
/// assert_eq!(result.cardinality, Some(5));
/// ```
pub fn analyse(pattern: &str, options: Options) -> Result<AnalysisResult, SiteswapError> {
    let cleaned: String = pattern
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if cleaned.is_empty() {
        return Ok(AnalysisResult::invalid("ε".to_string(), Some(0), None));
    }

    let mut parsed = parser::parse(&cleaned)?;
    semantics::infer_hands(&mut parsed, &cleaned)?;
    semantics::check_theoretical(&cleaned, options.allow_theoretical_patterns(), &parsed)?;
    semantics::validate_offsets(&parsed, &cleaned)?;
    semantics::validate_suppression(&parsed, &cleaned)?;

    let hands = parsed.hands;
    let hands_effective = parsed.hands_effective();

    let normalized = normalizer::normalize(parsed);

    if normalized.period == 0 {
        return Ok(AnalysisResult::invalid(cleaned, Some(0), hands));
    }
    if normalized.cardinality % normalized.period != 0 {
        return Ok(AnalysisResult::invalid(cleaned, None, hands));
    }
    let cardinality = normalized.cardinality / normalized.period;

    let solved = solver::solve(
        &normalized.groups,
        hands_effective as usize,
        normalized.period,
        options.maximum_length(),
        &cleaned,
    )?;

    if !solved.valid {
        return Ok(AnalysisResult::invalid(cleaned, None, hands));
    }

    let ground = solver::classify_ground(
        &solved.states,
        &solved.ranges,
        hands_effective as usize,
        cardinality,
    );
    let normalised = printer::render(&normalized.groups);

    Ok(AnalysisResult {
        pattern: cleaned,
        valid: true,
        period: Some(normalized.period),
        cardinality: Some(cardinality),
        hands,
        normalised: Some(normalised),
        ground: Some(ground),
        excited: Some(!ground),
    })
}
