//! Recursive-descent parser building a [`Pattern`] from a [`Token`] stream.
//!
//! Grammar:
//!
//! ```text
//! sign        ::= '-'?
//! value       ::= sign (digit | 'a'..'o') | '{' sign digits '}'
//! quantity    ::= '^' value
//! event       ::= value 'x'*
//! events      ::= event quantity?
//! action      ::= '[' events+ ']' | event
//! suppression ::= '!'+
//! tuple       ::= '(' action (',' action)* ')'
//! group       ::= tuple suppression? | action
//! groups      ::= group quantity?
//! pattern     ::= groups+
//! ```
//!
//! `value` is already fully resolved by the scanner into a single [`Token::Value`], so this
//! parser never re-derives signs or digit/letter bases; it only assembles tokens into the tree.
//!
//! The `actions ::= action quantity?` production above is never actually reachable from `pattern`
//! (`group` only derives a bare `action`), so a trailing `^quantity` outside a multiplex bracket
//! is parsed as the *group's* quantity, and one inside a bracket is parsed as the
//! directly-preceding *event's* quantity.

use crate::errors::SiteswapError;
use crate::grammar::{Action, Event, Group, Pattern};
use crate::scanner::{self, Token};
use crate::utils::PeekIter;

pub fn parse(pattern: &str) -> Result<Pattern, SiteswapError> {
    let tokens = scanner::scan(pattern)?;
    let mut iter = PeekIter::new(tokens.into_iter());
    let mut groups = Vec::new();
    while iter.peek().is_some() {
        groups.push(parse_group(&mut iter, pattern)?);
    }
    let hands = None; // inferred in `semantics::infer_hands` from the parsed groups.
    Ok(Pattern { groups, hands })
}

fn parse_group(
    iter: &mut PeekIter<Token>,
    pattern: &str,
) -> Result<Group, SiteswapError> {
    let mut group = if iter.peek() == Some(&Token::LParen) {
        parse_tuple(iter, pattern)?
    } else {
        Group::implicit(parse_action(iter, pattern)?)
    };
    if iter.peek() == Some(&Token::Caret) {
        iter.next();
        group.quantity = parse_value(iter, pattern)?;
    }
    Ok(group)
}

fn parse_tuple(iter: &mut PeekIter<Token>, pattern: &str) -> Result<Group, SiteswapError> {
    expect(iter, Token::LParen, pattern)?;
    let mut actions = vec![parse_action(iter, pattern)?];
    while iter.peek() == Some(&Token::Comma) {
        iter.next();
        actions.push(parse_action(iter, pattern)?);
    }
    expect(iter, Token::RParen, pattern)?;
    let mut suppression = 0u32;
    while iter.peek() == Some(&Token::Bang) {
        iter.next();
        suppression += 1;
    }
    Ok(Group::tuple(actions, suppression))
}

fn parse_action(iter: &mut PeekIter<Token>, pattern: &str) -> Result<Action, SiteswapError> {
    if iter.peek() == Some(&Token::LBracket) {
        iter.next();
        // Inside a multiplex bracket, a trailing `^quantity` binds to the event it follows.
        let mut events = vec![parse_event(iter, pattern, true)?];
        while iter.peek() != Some(&Token::RBracket) {
            if iter.peek().is_none() {
                return Err(invalid(pattern));
            }
            events.push(parse_event(iter, pattern, true)?);
        }
        expect(iter, Token::RBracket, pattern)?;
        Ok(Action { events })
    } else {
        // Outside a bracket, a trailing `^quantity` binds to the enclosing group instead (see
        // the grammar note above), so the lone event here never consumes one itself.
        Ok(Action::single(parse_event(iter, pattern, false)?))
    }
}

fn parse_event(
    iter: &mut PeekIter<Token>,
    pattern: &str,
    own_quantity: bool,
) -> Result<Event, SiteswapError> {
    let value = parse_value(iter, pattern)?;
    let mut offset = 0u32;
    while iter.peek() == Some(&Token::X) {
        iter.next();
        offset += 1;
    }
    let mut quantity = 1i64;
    if own_quantity && iter.peek() == Some(&Token::Caret) {
        iter.next();
        quantity = parse_value(iter, pattern)?;
    }
    Ok(Event::new(value, offset, quantity))
}

fn parse_value(iter: &mut PeekIter<Token>, pattern: &str) -> Result<i64, SiteswapError> {
    match iter.next() {
        Some(Token::Value(n)) => Ok(n),
        _ => Err(invalid(pattern)),
    }
}

fn expect(iter: &mut PeekIter<Token>, expected: Token, pattern: &str) -> Result<(), SiteswapError> {
    match iter.next() {
        Some(t) if t == expected => Ok(()),
        _ => Err(invalid(pattern)),
    }
}

fn invalid(pattern: &str) -> SiteswapError {
    SiteswapError::SyntacticallyInvalid {
        pattern: pattern.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_event() {
        let p = parse("3").unwrap();
        assert_eq!(p.groups.len(), 1);
        assert_eq!(p.groups[0].actions[0].events[0], Event::new(3, 0, 1));
        assert!(!p.groups[0].is_tuple);
    }

    #[test]
    fn crossing_offset() {
        let p = parse("4x").unwrap();
        assert_eq!(p.groups[0].actions[0].events[0], Event::new(4, 1, 1));
    }

    #[test]
    fn multiplex() {
        let p = parse("[43]23").unwrap();
        assert_eq!(p.groups.len(), 3);
        assert_eq!(p.groups[0].actions[0].events.len(), 2);
        assert_eq!(p.groups[0].actions[0].events[0], Event::new(4, 0, 1));
        assert_eq!(p.groups[0].actions[0].events[1], Event::new(3, 0, 1));
    }

    #[test]
    fn event_exponent_inside_bracket() {
        // Per the grammar note, a `^quantity` right after an event inside `[...]` attaches to
        // that event, not to the surrounding group.
        let p = parse("[3^24]").unwrap();
        assert_eq!(p.groups[0].actions[0].events[0], Event::new(3, 0, 2));
        assert_eq!(p.groups[0].actions[0].events[1], Event::new(4, 0, 1));
        assert_eq!(p.groups[0].quantity, 1);
    }

    #[test]
    fn group_exponent() {
        let p = parse("b4^6").unwrap();
        assert_eq!(p.groups.len(), 2);
        assert_eq!(p.groups[1].quantity, 6);
    }

    #[test]
    fn sync_tuple_with_suppression() {
        let p = parse("(4,4)!").unwrap();
        assert!(p.groups[0].is_tuple);
        assert_eq!(p.groups[0].actions.len(), 2);
        assert_eq!(p.groups[0].suppression, 1);
    }

    #[test]
    fn multiple_tuples_and_suppression_marks() {
        let p = parse("(4,4,4)!!").unwrap();
        assert_eq!(p.groups[0].suppression, 2);
    }

    #[test]
    fn unbalanced_brackets_fail() {
        assert!(parse("[34").is_err());
        assert!(parse("(3,3").is_err());
    }

    #[test]
    fn empty_after_strip_is_not_parsed_here() {
        // `analyse` special-cases the empty pattern before invoking the parser; the parser
        // itself treats zero tokens as zero groups.
        let p = parse("").unwrap();
        assert!(p.groups.is_empty());
    }
}
