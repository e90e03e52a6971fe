//! Range inference, delta construction, the periodicity solver, and the ground-state classifier.
//!
//! The pattern is valid iff there is a bi-infinite per-hand state (props landing on future beats)
//! that is unchanged by shifting it `period` beats — we assume the state is zero outside an
//! inferred finite window and solve for it inside; validity is exactly the self-consistency of
//! that zero-outside assumption, checked at the window's trailing edge.

use crate::errors::SiteswapError;
use crate::grammar::Group;

/// Per-hand results, all indexed by hand 0..hands_effective.
pub struct Solved {
    pub ranges: Vec<(i64, i64)>,
    pub states: Vec<Vec<i64>>,
    pub valid: bool,
}

/// Range inference and delta construction walk `groups` with identical stepping logic but
/// different accumulator shapes, so rather than share a visitor callback they share this helper
/// (and `target_hand` below) to keep the two walks from drifting apart.
fn step(group: &Group) -> (i64, i64, i64) {
    let q = group.quantity;
    let grp_step = group.step();
    let offset_bit = if q > 0 { 1 } else { 0 };
    (q, grp_step, offset_bit)
}

fn target_hand(h_i: usize, value: i64, offset: u32, hands_effective: usize) -> usize {
    (h_i as i64 + value + offset as i64).rem_euclid(hands_effective as i64) as usize
}

fn infer_ranges(groups: &[Group], hands_effective: usize) -> Vec<(i64, i64)> {
    let mut mins = vec![i64::MAX; hands_effective];
    let mut maxs = vec![i64::MIN; hands_effective];
    let mut extend = |h: usize, at: i64, mins: &mut [i64], maxs: &mut [i64]| {
        mins[h] = mins[h].min(at);
        maxs[h] = maxs[h].max(at);
    };

    let mut position: i64 = 0;
    for group in groups {
        let (q, grp_step, offset_bit) = step(group);
        let sign = q.signum();
        for i in 0..q.unsigned_abs() {
            let base = position + sign * (i as i64) * grp_step;
            for (h_i, action) in group.actions.iter().enumerate() {
                extend(h_i, base + offset_bit, &mut mins, &mut maxs);
                for event in &action.events {
                    let target = target_hand(h_i, event.value, event.offset, hands_effective);
                    extend(target, base + offset_bit + event.value, &mut mins, &mut maxs);
                }
            }
        }
        position += q * grp_step;
    }
    mins.into_iter().zip(maxs).collect()
}

fn build_deltas(groups: &[Group], hands_effective: usize, ranges: &[(i64, i64)]) -> Vec<Vec<i64>> {
    let mut deltas: Vec<Vec<i64>> = ranges
        .iter()
        .map(|&(min, max)| vec![0i64; (max - min + 1) as usize])
        .collect();

    let mut position: i64 = 0;
    for group in groups {
        let (q, grp_step, offset_bit) = step(group);
        let sign = q.signum();
        for i in 0..q.unsigned_abs() {
            let base = position + sign * (i as i64) * grp_step;
            for (h_i, action) in group.actions.iter().enumerate() {
                let own_min = ranges[h_i].0;
                let idx = (base + offset_bit - own_min) as usize;
                let event_quantity_sum: i64 = action.events.iter().map(|e| e.quantity).sum();
                deltas[h_i][idx] -= event_quantity_sum * sign;

                for event in &action.events {
                    let target = target_hand(h_i, event.value, event.offset, hands_effective);
                    let target_min = ranges[target].0;
                    let t_idx = (base + offset_bit + event.value - target_min) as usize;
                    deltas[target][t_idx] += event.quantity * sign;
                }
            }
        }
        position += q * grp_step;
    }
    deltas
}

fn solve_states(deltas: &[Vec<i64>], ranges: &[(i64, i64)], period: i64) -> Vec<Vec<i64>> {
    ranges
        .iter()
        .zip(deltas)
        .map(|(&(min, max), delta)| {
            let len = (max - min + 1) as usize;
            let mut state = vec![0i64; len];
            for idx in min..=max {
                let before = if period < 0 { max + min - idx } else { idx };
                let after = before - period;
                let after_val = if after < min || after > max {
                    0
                } else {
                    state[(after - min) as usize]
                };
                state[(before - min) as usize] = after_val - delta[(before - min) as usize];
            }
            state
        })
        .collect()
}

fn hand_tail_is_zero(state: &[i64], period: i64) -> bool {
    let p = period.unsigned_abs() as usize;
    if p >= state.len() {
        return state.iter().all(|&x| x == 0);
    }
    if period > 0 {
        state[state.len() - p..].iter().all(|&x| x == 0)
    } else {
        state[..p].iter().all(|&x| x == 0)
    }
}

/// Infers ranges, builds deltas, and solves for the per-hand state, checking `maximum_length`
/// along the way.
pub fn solve(
    groups: &[Group],
    hands_effective: usize,
    period: i64,
    maximum_length: usize,
    cleaned: &str,
) -> Result<Solved, SiteswapError> {
    let ranges = infer_ranges(groups, hands_effective);
    for &(min, max) in &ranges {
        if (max - min) as usize > maximum_length {
            return Err(SiteswapError::StateRangeTooLarge {
                pattern: cleaned.to_string(),
            });
        }
    }
    let deltas = build_deltas(groups, hands_effective, &ranges);
    let states = solve_states(&deltas, &ranges, period);
    let valid = states.iter().all(|s| hand_tail_is_zero(s, period));
    Ok(Solved {
        ranges,
        states,
        valid,
    })
}

/// Classifies a valid pattern's solved state as ground or excited.
pub fn classify_ground(
    states: &[Vec<i64>],
    ranges: &[(i64, i64)],
    hands_effective: usize,
    cardinality: i64,
) -> bool {
    let h_count = hands_effective as i64;
    let offset_bit: i64 = if cardinality > 0 { 1 } else { 0 };
    let abs_c = cardinality.unsigned_abs() as i64;
    let sign_c = cardinality.signum();

    for h in 0..hands_effective {
        let (min, max) = ranges[h];
        let state = &states[h];
        let expected_count = abs_c / h_count + i64::from((h as i64) < abs_c % h_count);

        let nonzero_count = state.iter().filter(|&&v| v != 0).count() as i64;
        if nonzero_count != expected_count {
            return false;
        }

        for j in 0..expected_count {
            let beat = if cardinality > 0 {
                h as i64 + j * h_count + offset_bit
            } else {
                -(h as i64 + j * h_count)
            };
            if beat < min || beat > max {
                return false;
            }
            if state[(beat - min) as usize] != sign_c {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::parser::parse;
    use crate::semantics::infer_hands;

    fn analyse_groups(pattern: &str) -> (Vec<Group>, i64, i64, u32) {
        let mut p = parse(pattern).unwrap();
        infer_hands(&mut p, pattern).unwrap();
        let hands_effective = p.hands_effective();
        let n = normalize(p);
        // `n.cardinality` is the raw pre-division total throw mass; divide by period the same
        // way `analyse` does before handing it to `classify_ground`, which expects the per-beat
        // prop count, not the mass.
        (n.groups, n.period, n.cardinality / n.period, hands_effective)
    }

    #[test]
    fn simple_three_ball_cascade_is_valid_and_ground() {
        let (groups, period, cardinality, hands) = analyse_groups("3");
        let solved = solve(&groups, hands as usize, period, 100, "3").unwrap();
        assert!(solved.valid);
        assert!(classify_ground(
            &solved.states,
            &solved.ranges,
            hands as usize,
            cardinality
        ));
    }

    #[test]
    fn seven_four_four_is_valid_and_ground() {
        let (groups, period, cardinality, hands) = analyse_groups("744");
        assert_eq!(period, 3);
        assert_eq!(cardinality, 5);
        let solved = solve(&groups, hands as usize, period, 100, "744").unwrap();
        assert!(solved.valid);
        assert!(classify_ground(
            &solved.states,
            &solved.ranges,
            hands as usize,
            cardinality
        ));
    }

    #[test]
    fn nine_one_is_excited() {
        let (groups, period, cardinality, hands) = analyse_groups("91");
        let solved = solve(&groups, hands as usize, period, 100, "91").unwrap();
        assert!(solved.valid);
        assert!(!classify_ground(
            &solved.states,
            &solved.ranges,
            hands as usize,
            cardinality
        ));
    }

    #[test]
    fn collision_pattern_is_not_solver_consistent() {
        let (groups, period, _cardinality, hands) = analyse_groups("321");
        let solved = solve(&groups, hands as usize, period, 100, "321").unwrap();
        assert!(!solved.valid);
    }
}
