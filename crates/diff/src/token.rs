use crate::number::NumericToken;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A maximal literal-or-numeric span of a line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// Raw text, emitted verbatim
    Literal(String),

    /// A numeric field that can be differenced between runs
    Number(NumericToken),
}

impl Token {
    /// Whether this token is a numeric field
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }

    /// The original text of the span
    pub fn text(&self) -> &str {
        match self {
            Token::Literal(text) => text,
            Token::Number(num) => num.raw(),
        }
    }
}

/// One line of a snapshot, split into tokens
///
/// Tokenization is lossless: concatenating the token texts reproduces the
/// line exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenizedLine {
    raw: String,
    tokens: Vec<Token>,
}

impl TokenizedLine {
    /// Tokenize a single line. Any input is tokenizable; a line with no
    /// numbers yields one literal token covering the whole line.
    pub fn parse(line: &str) -> Self {
        Self {
            raw: line.to_string(),
            tokens: tokenize(line),
        }
    }

    /// The original line text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The tokens of this line, in order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of numeric fields on this line
    pub fn number_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_number()).count()
    }
}

/// Split a line into alternating literal and numeric spans.
///
/// Numeric grammar: optional `+`/`-` (only at line start or after
/// whitespace), digits, optional `.` followed by more digits. Scientific
/// notation is not recognized; a number with an `e`/`E` exponent is swallowed
/// into the surrounding literal span.
fn tokenize(line: &str) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let signed = (c == '+' || c == '-')
            && (i == 0 || chars[i - 1].is_whitespace())
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());

        if !signed && !c.is_ascii_digit() {
            literal.push(c);
            i += 1;
            continue;
        }

        let mut j = if signed { i + 1 } else { i };
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if chars.get(j) == Some(&'.') && chars.get(j + 1).is_some_and(|c| c.is_ascii_digit()) {
            j += 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
        }

        // An exponent suffix turns the whole span into literal text
        if let Some(end) = exponent_end(&chars, j) {
            literal.extend(&chars[i..end]);
            i = end;
            continue;
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        let glued = i > 0 && !chars[i - 1].is_whitespace();
        let raw: String = chars[i..j].iter().collect();
        tokens.push(Token::Number(NumericToken::parse(&raw, glued)));
        i = j;
    }

    if !literal.is_empty() || tokens.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// End of an `e`/`E` exponent starting at `j`, if one is present
fn exponent_end(chars: &[char], j: usize) -> Option<usize> {
    if !matches!(chars.get(j), Some('e' | 'E')) {
        return None;
    }
    let mut k = j + 1;
    if matches!(chars.get(k), Some('+' | '-')) {
        k += 1;
    }
    if !chars.get(k).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    while k < chars.len() && chars[k].is_ascii_digit() {
        k += 1;
    }
    Some(k)
}
