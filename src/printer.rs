//! Renders a normalised group list back to its canonical siteswap string.

use crate::grammar::{Action, Event, Group};

const CUTOFF: i64 = 2;

/// `convert_integer`: the inverse of the scanner's value parsing. Decimal digits for `0..10`,
/// letters for `10..25`, and a braced signed literal for anything else (including negatives).
pub fn convert_integer(n: i64) -> String {
    if (0..10).contains(&n) {
        n.to_string()
    } else if (10..25).contains(&n) {
        let letter = (b'a' + (n - 10) as u8) as char;
        letter.to_string()
    } else {
        format!("{{{}}}", n)
    }
}

/// Appends `^<convert_integer(quantity)>` when the quantity falls outside `[1, CUTOFF)`, or
/// literally repeats `rendered` that many times otherwise. `rendered` is the string for a single
/// occurrence of the element the quantity applies to.
fn render_with_quantity(rendered: &str, quantity: i64) -> String {
    if quantity < 0 || quantity >= CUTOFF {
        format!("{}^{}", rendered, convert_integer(quantity))
    } else if quantity == 1 {
        rendered.to_string()
    } else {
        rendered.repeat(quantity as usize)
    }
}

fn render_event(event: &Event) -> String {
    let offset_marker = if event.offset < CUTOFF as u32 {
        "x".repeat(event.offset as usize)
    } else {
        format!("x^{}", convert_integer(event.offset as i64))
    };
    let base = format!("{}{}", convert_integer(event.value), offset_marker);
    render_with_quantity(&base, event.quantity)
}

fn render_action(action: &Action) -> String {
    if action.events.len() == 1 && action.events[0].quantity == 1 {
        render_event(&action.events[0])
    } else {
        let events: String = action.events.iter().map(render_event).collect();
        format!("[{}]", events)
    }
}

fn render_group_body(group: &Group) -> String {
    let as_tuple = group.actions.len() > 1 || group.is_tuple;
    if as_tuple {
        let actions: Vec<String> = group.actions.iter().map(render_action).collect();
        format!("({}){}", actions.join(","), "!".repeat(group.suppression as usize))
    } else {
        render_action(&group.actions[0])
    }
}

/// Renders the full normalised group list as a canonical pattern string.
pub fn render(groups: &[Group]) -> String {
    groups
        .iter()
        .map(|g| render_with_quantity(&render_group_body(g), g.quantity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::parser::parse;
    use crate::semantics::infer_hands;

    fn rendered(pattern: &str) -> String {
        let mut p = parse(pattern).unwrap();
        infer_hands(&mut p, pattern).unwrap();
        render(&normalize(p).groups)
    }

    #[test]
    fn repeated_group_renders_bare() {
        assert_eq!(rendered("333"), "3");
    }

    #[test]
    fn letter_value_round_trips() {
        assert_eq!(convert_integer(11), "b");
        assert_eq!(convert_integer(3), "3");
        assert_eq!(convert_integer(99), "{99}");
        assert_eq!(convert_integer(-1), "{-1}");
    }

    #[test]
    fn explicit_single_hand_tuple_round_trips_as_tuple() {
        let mut p = parse("(3)").unwrap();
        infer_hands(&mut p, "(3)").unwrap();
        let normalized = normalize(p);
        assert_eq!(render(&normalized.groups), "(3)");
    }

    #[test]
    fn synchronous_pattern_round_trips_with_suppression() {
        assert_eq!(rendered("(4,4)!"), "(4,4)!");
    }
}
