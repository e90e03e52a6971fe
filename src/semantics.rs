//! Semantic checks that run on a freshly-parsed [`Pattern`], before normalisation: the
//! theoretical-mode gate, hand-count inference, and crossing-offset validation.

use crate::errors::SiteswapError;
use crate::grammar::Pattern;

/// Rejects negative values/quantities and zero-value crossing throws unless theoretical patterns
/// are allowed.
///
/// The `-` check runs on the raw (whitespace-stripped, lowercased) string rather than by walking
/// the parse tree, so a negative *quantity* buried inside a `^{...}` exponent is caught even
/// though it never becomes a negative `Event::value`.
pub fn check_theoretical(cleaned: &str, allow: bool, pattern: &Pattern) -> Result<(), SiteswapError> {
    if allow {
        return Ok(());
    }
    if cleaned.contains('-') {
        return Err(SiteswapError::TheoreticalDisallowed {
            pattern: cleaned.to_string(),
        });
    }
    let has_zero_crossing = pattern
        .groups
        .iter()
        .flat_map(|g| g.actions.iter())
        .flat_map(|a| a.events.iter())
        .any(|e| e.value == 0 && e.offset > 0);
    if has_zero_crossing {
        return Err(SiteswapError::TheoreticalDisallowed {
            pattern: cleaned.to_string(),
        });
    }
    Ok(())
}

/// Infers the pattern's hand count from its explicit synchronous tuples (if any), validates that
/// every explicit tuple agrees on that count, and assigns a rotating hand index to every implicit
/// (non-tuple) group.
///
/// Hand-index assignment: the counter resets to 0 immediately after any
/// explicit tuple and increments by 1 per implicit group. A *contiguous* run of implicit groups
/// at the very start of the pattern (before the first explicit tuple) is special-cased: since
/// there is no preceding tuple to reset from, its indices instead continue counting from wherever
/// the trailing implicit run at the end of the pattern left off, wrapping modulo the hand count —
/// this is what makes the pattern's hand rotation close into a cycle.
pub fn infer_hands(pattern: &mut Pattern, cleaned: &str) -> Result<(), SiteswapError> {
    let explicit_counts: Vec<usize> = pattern
        .groups
        .iter()
        .filter(|g| g.is_tuple)
        .map(|g| g.actions.len())
        .collect();

    let hands = match explicit_counts.first() {
        None => {
            pattern.hands = None;
            return Ok(());
        }
        Some(&first) => {
            if explicit_counts.iter().any(|&n| n != first) {
                return Err(SiteswapError::InconsistentHandCount {
                    pattern: cleaned.to_string(),
                });
            }
            first as u32
        }
    };
    pattern.hands = Some(hands);

    let first_tuple_idx = pattern.groups.iter().position(|g| g.is_tuple).unwrap();
    let (leading, rest) = pattern.groups.split_at_mut(first_tuple_idx);

    let mut counter = 0u32;
    for group in rest.iter_mut() {
        if group.is_tuple {
            counter = 0;
        } else {
            group.hand_index = counter;
            counter += 1;
        }
    }
    let tail_counter = counter;

    for (i, group) in leading.iter_mut().enumerate() {
        group.hand_index = (tail_counter + i as u32) % hands;
    }

    Ok(())
}

/// Checks every event's crossing offset against the inferred hand count.
pub fn validate_offsets(pattern: &Pattern, cleaned: &str) -> Result<(), SiteswapError> {
    let hands_effective = pattern.hands_effective();
    let in_range = pattern
        .groups
        .iter()
        .flat_map(|g| g.actions.iter())
        .flat_map(|a| a.events.iter())
        .all(|e| e.offset < hands_effective);
    if in_range {
        Ok(())
    } else {
        Err(SiteswapError::OffsetExceedsHands {
            pattern: cleaned.to_string(),
        })
    }
}

/// Checks every explicit tuple's suppression count against its own action count.
pub fn validate_suppression(pattern: &Pattern, cleaned: &str) -> Result<(), SiteswapError> {
    let ok = pattern
        .groups
        .iter()
        .filter(|g| g.is_tuple)
        .all(|g| (g.suppression as usize) < g.actions.len());
    if ok {
        Ok(())
    } else {
        Err(SiteswapError::InvalidSuppression {
            pattern: cleaned.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn no_explicit_tuple_is_one_handed() {
        let mut p = parse("744").unwrap();
        infer_hands(&mut p, "744").unwrap();
        assert_eq!(p.hands, None);
        assert_eq!(p.hands_effective(), 1);
    }

    #[test]
    fn inconsistent_hand_count_rejected() {
        let mut p = parse("(4,4)(4,4,4)").unwrap();
        assert!(infer_hands(&mut p, "(4,4)(4,4,4)").is_err());
    }

    #[test]
    fn leading_implicit_run_wraps_from_the_end() {
        // "3(4,4)3": one leading implicit group, then a 2-hand tuple, then one trailing
        // implicit. The trailing implicit gets hand_index 0 (counter reset after the tuple), so
        // the leading implicit wraps to (0 + 1) % 2 == 1.
        let mut p = parse("3(4,4)3").unwrap();
        infer_hands(&mut p, "3(4,4)3").unwrap();
        assert_eq!(p.groups[0].hand_index, 1);
        assert_eq!(p.groups[2].hand_index, 0);
    }

    #[test]
    fn offset_exceeding_hands_rejected() {
        let mut p = parse("(6xx,4xx)").unwrap();
        infer_hands(&mut p, "(6xx,4xx)").unwrap();
        assert!(validate_offsets(&p, "(6xx,4xx)").is_err());
    }

    #[test]
    fn theoretical_gate_catches_string_level_negative() {
        let p = parse("11^-1").unwrap();
        assert!(check_theoretical("11^-1", false, &p).is_err());
        assert!(check_theoretical("11^-1", true, &p).is_ok());
    }

    #[test]
    fn suppression_at_least_action_count_rejected() {
        let p = parse("(4,4)!!!").unwrap();
        assert!(matches!(
            validate_suppression(&p, "(4,4)!!!"),
            Err(SiteswapError::InvalidSuppression { .. })
        ));
    }
}
