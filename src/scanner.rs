//! Character-level lexer turning a cleaned pattern string into a token stream.
//!
//! `-` never appears on its own in the grammar (see `value ::= sign (digit | 'a'..'o') | '{' sign
//! digits '}'`) — it only ever prefixes a value — so the scanner folds a leading `-` directly into
//! the [`Token::Value`] it introduces rather than emitting a separate minus token. This keeps the
//! parser from having to special-case sign handling at every call site that expects a value.

use crate::errors::SiteswapError;

// 'a'..='o' maps to 10..=24; 'p'..'z' are reserved
const LETTER_BASE: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Value(i64),
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Bang,
    Caret,
    X,
}

/// Scans a whitespace-stripped, lowercased pattern into tokens.
///
/// Any character sequence that can't be classified (an unbracketed digit-or-letter run that
/// doesn't fit a `Value`, a brace literal containing a letter, a character outside the siteswap
/// alphabet) is reported as [`SiteswapError::SyntacticallyInvalid`]; the scanner does not attempt
/// partial recovery.
pub fn scan(pattern: &str) -> Result<Vec<Token>, SiteswapError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '[' => {
                tokens.push(Token::LBracket);
                i += 1;
            }
            ']' => {
                tokens.push(Token::RBracket);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '!' => {
                tokens.push(Token::Bang);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            'x' => {
                tokens.push(Token::X);
                i += 1;
            }
            '{' => {
                let (value, consumed) = scan_braced(&chars[i..], pattern)?;
                tokens.push(Token::Value(value));
                i += consumed;
            }
            '-' => {
                let (value, consumed) = scan_value(&chars[i..], pattern)?;
                tokens.push(Token::Value(value));
                i += consumed;
            }
            '0'..='9' => {
                let (value, consumed) = scan_value(&chars[i..], pattern)?;
                tokens.push(Token::Value(value));
                i += consumed;
            }
            'a'..='o' => {
                let (value, consumed) = scan_value(&chars[i..], pattern)?;
                tokens.push(Token::Value(value));
                i += consumed;
            }
            _ => return Err(invalid(pattern)),
        }
    }
    Ok(tokens)
}

/// Scans `sign (digit | 'a'..'o')` starting at `chars[0]`, returning the resolved value and the
/// number of characters consumed.
fn scan_value(chars: &[char], pattern: &str) -> Result<(i64, usize), SiteswapError> {
    let mut i = 0;
    let mut negative = false;
    if chars.first() == Some(&'-') {
        negative = true;
        i += 1;
    }
    let magnitude = match chars.get(i) {
        Some(d) if d.is_ascii_digit() => *d as i64 - '0' as i64,
        Some(l) if ('a'..='o').contains(l) => LETTER_BASE + (*l as i64 - 'a' as i64),
        _ => return Err(invalid(pattern)),
    };
    i += 1;
    let value = if negative { -magnitude } else { magnitude };
    Ok((value, i))
}

/// Scans `'{' sign digits '}'` starting at `chars[0] == '{'`. Letters inside braces are rejected:
/// the grammar only admits decimal digits there.
fn scan_braced(chars: &[char], pattern: &str) -> Result<(i64, usize), SiteswapError> {
    let mut i = 1; // skip '{'
    let mut negative = false;
    if chars.get(i) == Some(&'-') {
        negative = true;
        i += 1;
    }
    let digits_start = i;
    while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if i == digits_start {
        return Err(invalid(pattern));
    }
    let digits: String = chars[digits_start..i].iter().collect();
    let magnitude: i64 = digits.parse().map_err(|_| invalid(pattern))?;
    if chars.get(i) != Some(&'}') {
        return Err(invalid(pattern));
    }
    i += 1;
    let value = if negative { -magnitude } else { magnitude };
    Ok((value, i))
}

fn invalid(pattern: &str) -> SiteswapError {
    SiteswapError::SyntacticallyInvalid {
        pattern: pattern.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! scan_tests {
        ($($name:ident: $input:expr => $expected:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(scan($input).unwrap(), $expected);
                }
            )*
        };
    }

    scan_tests! {
        digit: "3" => vec![Token::Value(3)],
        letter: "b" => vec![Token::Value(11)],
        negative_digit: "-5" => vec![Token::Value(-5)],
        braced: "{12}" => vec![Token::Value(12)],
        braced_negative: "{-3}" => vec![Token::Value(-3)],
        multiplex: "[43]" => vec![
            Token::LBracket, Token::Value(4), Token::Value(3), Token::RBracket,
        ],
        sync_tuple: "(4,4)" => vec![
            Token::LParen, Token::Value(4), Token::Comma, Token::Value(4), Token::RParen,
        ],
        crossing: "4x" => vec![Token::Value(4), Token::X],
        exponent: "b4^6" => vec![
            Token::Value(11), Token::Value(4), Token::Caret, Token::Value(6),
        ],
        suppression: "(4,4)!" => vec![
            Token::LParen, Token::Value(4), Token::Comma, Token::Value(4), Token::RParen,
            Token::Bang,
        ],
    }

    #[test]
    fn braced_with_letter_is_invalid() {
        assert!(scan("{a}").is_err());
    }

    #[test]
    fn lone_sign_is_invalid() {
        assert!(scan("-").is_err());
    }

    #[test]
    fn rejects_letters_past_o() {
        assert!(scan("p").is_err());
    }
}
