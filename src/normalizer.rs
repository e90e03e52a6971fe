//! Reduces a semantically-validated [`Pattern`] to its canonical minimal-period form
//! and computes period/cardinality.
//!
//! Four passes, in order: per-action cleanup, per-group-sequence collapsing, minimal-period
//! reduction, and implicit-to-explicit hand expansion. Each pass only ever shortens or simplifies
//! the group list; none of them can make an invalid pattern valid or vice versa — that
//! determination is made downstream, by the solver, from the period/cardinality this module
//! produces.

use crate::grammar::{Action, Event, Group, Pattern};

/// The outcome of normalisation: possibly-empty period/cardinality (an all-zero-quantity pattern
/// collapses to an empty group list, which is simply invalid) plus the reduced group list ready
/// for the solver and printer.
pub struct Normalized {
    pub groups: Vec<Group>,
    pub period: i64,
    pub cardinality: i64,
}

pub fn normalize(mut pattern: Pattern) -> Normalized {
    for group in &mut pattern.groups {
        for action in &mut group.actions {
            normalize_action(action);
        }
    }
    collapse_groups(&mut pattern.groups);
    minimal_period_reduce(&mut pattern.groups);
    let hands_effective = pattern.hands_effective();
    expand_implicit_groups(&mut pattern.groups, hands_effective);

    let period = total_period(&pattern.groups);
    let cardinality = total_cardinality(&pattern.groups);
    Normalized {
        groups: pattern.groups,
        period,
        cardinality,
    }
}

fn normalize_action(action: &mut Action) {
    action.events.retain(|e| !(e.value == 0 && e.offset == 0));
    action.events.sort_by_key(|e| e.value);

    let mut collapsed: Vec<Event> = Vec::with_capacity(action.events.len());
    for event in action.events.drain(..) {
        if let Some(last) = collapsed.last_mut() {
            if last.value == event.value && last.offset == event.offset {
                last.quantity += event.quantity;
                continue;
            }
        }
        collapsed.push(event);
    }
    collapsed.retain(|e| e.quantity != 0);

    if collapsed.is_empty() {
        collapsed.push(Event::new(0, 0, 1));
    }
    action.events = collapsed;
}

/// Adjacent groups merge only when they also agree on `hand_index`. Two implicit groups that
/// happen to throw the same action can still sit at different rotating hand positions (e.g. the
/// two `3`s in `"(4,4)33"`, thrown by alternating hands) — merging those would collapse a
/// two-beat alternation into one group pinned to a single hand. Explicit tuples never carry a
/// meaningful `hand_index` (it stays `0`), so this adds no constraint there.
fn collapse_groups(groups: &mut Vec<Group>) {
    let mut collapsed: Vec<Group> = Vec::with_capacity(groups.len());
    for group in groups.drain(..) {
        if let Some(last) = collapsed.last_mut() {
            if last.actions == group.actions
                && last.suppression == group.suppression
                && last.hand_index == group.hand_index
            {
                last.quantity += group.quantity;
                continue;
            }
        }
        collapsed.push(group);
    }
    collapsed.retain(|g| g.quantity != 0);
    *groups = collapsed;
}

/// Finds the smallest divisor `p` of `L = groups.len()` such that `groups[i] == groups[i mod p]`
/// for every `i`, and truncates the list to its first `p` entries. When `p == 1` the single
/// surviving group's own quantity no longer describes "a group repeated N times" (there's nothing
/// left to compare it against), so its quantity collapses further, to its sign.
fn minimal_period_reduce(groups: &mut Vec<Group>) {
    let l = groups.len();
    if l == 0 {
        return;
    }
    let p = (1..=l)
        .filter(|p| l % p == 0)
        .find(|&p| (0..l).all(|i| groups[i].content_eq(&groups[i % p])))
        .unwrap_or(l);
    groups.truncate(p);
    if p == 1 {
        groups[0].quantity = groups[0].quantity.signum();
    }
}

/// Replaces each surviving implicit group's singleton action with a full `hands_effective`-wide
/// tuple, placing the original action at its assigned hand index and filling the rest with the
/// "no throw" placeholder action. Suppresses all but that one position so the group still costs
/// exactly one beat per repetition.
///
/// When `hands_effective == 1` there is exactly one position to fill and it's already occupied,
/// so this is a no-op in shape (the group keeps its single action) even though it runs over every
/// group uniformly.
fn expand_implicit_groups(groups: &mut [Group], hands_effective: u32) {
    for group in groups.iter_mut() {
        if group.is_tuple {
            continue;
        }
        let hands_effective = hands_effective as usize;
        if hands_effective <= 1 {
            continue;
        }
        let original = group.actions[0].clone();
        let mut actions = vec![
            Action {
                events: vec![Event::new(0, 0, 1)]
            };
            hands_effective
        ];
        actions[group.hand_index as usize % hands_effective] = original;
        group.actions = actions;
        group.suppression = hands_effective as u32 - 1;
    }
}

fn total_period(groups: &[Group]) -> i64 {
    groups.iter().map(|g| g.quantity * g.step()).sum()
}

fn total_cardinality(groups: &[Group]) -> i64 {
    groups
        .iter()
        .map(|g| {
            g.quantity
                * g.actions
                    .iter()
                    .flat_map(|a| a.events.iter())
                    .map(|e| e.value * e.quantity)
                    .sum::<i64>()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::semantics::infer_hands;

    fn normalized(pattern: &str) -> Normalized {
        let mut p = parse(pattern).unwrap();
        infer_hands(&mut p, pattern).unwrap();
        normalize(p)
    }

    #[test]
    fn repeated_identical_groups_collapse_to_period_one() {
        let n = normalized("333");
        assert_eq!(n.groups.len(), 1);
        assert_eq!(n.period, 1);
        assert_eq!(n.cardinality, 3);
    }

    #[test]
    fn sync_tuple_suppression_counts_beats_correctly() {
        let n = normalized("(4,4)!");
        assert_eq!(n.period, 1);
        assert_eq!(n.cardinality, 8);
    }

    #[test]
    fn minimal_period_finds_proper_divisor() {
        // "(3,0)!(0,3)!" is length-2 at the group level, and the two groups are not structurally
        // equal (suppression targets a different position), so period stays 2.
        let n = normalized("(3,0)!(0,3)!");
        assert_eq!(n.period, 2);
    }

    #[test]
    fn adjacent_implicit_groups_on_different_hands_do_not_collapse() {
        // The two `3`s here are thrown by alternating hands (rotation resets after the tuple),
        // not the same hand twice, so they must survive as two distinct groups rather than
        // collapsing into one `quantity: 2` group pinned to a single hand.
        let n = normalized("(4,4)33");
        assert_eq!(n.groups.len(), 3);
        assert_eq!(n.groups[1].quantity, 1);
        assert_eq!(n.groups[2].quantity, 1);
    }

    #[test]
    fn action_dedup_sums_multiplex_quantities() {
        let mut action = Action {
            events: vec![Event::new(4, 0, 1), Event::new(4, 0, 2)],
        };
        normalize_action(&mut action);
        assert_eq!(action.events, vec![Event::new(4, 0, 3)]);
    }

    #[test]
    fn empty_action_gets_placeholder() {
        let mut action = Action {
            events: vec![Event::new(0, 0, 1)],
        };
        normalize_action(&mut action);
        assert_eq!(action.events, vec![Event::new(0, 0, 1)]);
    }
}
