//! Tolerant three-tier parser — text into [`Value`].
//!
//! Pasted data is rarely strict JSON: single quotes, unquoted keys, trailing
//! commas and bare `undefined`/`NaN`/`Infinity` tokens are all common. The
//! parser tries three tiers in order, first success wins:
//!
//! 1. **Strict** — standard JSON via serde_json.
//! 2. **Normalized** — regex-based rewriting of the relaxed constructs into
//!    strict JSON, then re-parse. The rewritten text is reported back so
//!    callers can offer it as an "auto-fix" replacement.
//! 3. **Literal** — a hand-written recursive-descent parser over a
//!    literal-only grammar (objects, arrays, strings, numbers, keywords,
//!    comments). No identifiers in value position, no calls, no statements.
//!
//! # Known limitation
//!
//! Tier 2 is a line/regex heuristic, not a tokenizer. It does not understand
//! quote characters occurring inside already-quoted strings, so input like
//! `{"note": "it's undefined"}` that *fails* strict parsing for some other
//! reason can be mangled by the rewrite. When that happens the rewritten
//! text no longer parses and the input falls through to tier 3.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value as Json;

use crate::error::{ParseError, Result};
use crate::value::{insert_field, Value};

/// Which parser tier accepted the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Strict,
    Normalized,
    Literal,
}

impl Tier {
    /// Badge text for status displays.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Strict => "strict",
            Tier::Normalized => "normalized",
            Tier::Literal => "literal",
        }
    }
}

/// Top-level shape requirement for a comparison mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    /// The input must be an array (array-comparison mode).
    Array,
    /// The input must be an object or an array (object-comparison mode).
    ObjectOrArray,
}

/// A successful parse: the value, the tier that accepted it, and (for
/// non-strict tiers) a strict-leaning rewrite of the input text.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub value: Value,
    pub tier: Tier,
    /// `None` for [`Tier::Strict`]. For [`Tier::Normalized`] this is the
    /// regex-rewritten text; for [`Tier::Literal`] it is the compact literal
    /// rendering of the parsed value. Either way it re-parses at tier ≤ 2.
    pub normalized: Option<String>,
}

/// Parse text through the three tiers.
///
/// Empty or whitespace-only input fails with [`ParseError::EmptyInput`]
/// before any tier is attempted. When every tier fails, the reported
/// message comes from the strict-JSON attempt, which carries the most
/// useful position information.
pub fn parse(text: &str) -> Result<Parsed> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let strict_err = match serde_json::from_str::<Json>(text) {
        Ok(json) => {
            return Ok(Parsed {
                value: Value::from_json(&json),
                tier: Tier::Strict,
                normalized: None,
            });
        }
        Err(e) => e,
    };

    let fixed = normalize_relaxed(text);
    if let Ok(json) = serde_json::from_str::<Json>(&sentinelize(&fixed)) {
        return Ok(Parsed {
            value: decode_sentinels(Value::from_json(&json)),
            tier: Tier::Normalized,
            normalized: Some(fixed),
        });
    }

    match literal::parse(text) {
        Ok(value) => {
            let normalized = Some(value.to_string());
            Ok(Parsed {
                value,
                tier: Tier::Literal,
                normalized,
            })
        }
        Err(_) => Err(ParseError::Syntax(strict_err.to_string())),
    }
}

/// Parse and enforce the top-level shape for the given comparison mode.
pub fn parse_and_classify(text: &str, shape: ExpectedShape) -> Result<Parsed> {
    let parsed = parse(text)?;
    match (shape, &parsed.value) {
        (ExpectedShape::Array, Value::Array(_)) => Ok(parsed),
        (ExpectedShape::Array, v) => Err(ParseError::NotAnArray(v.kind())),
        (ExpectedShape::ObjectOrArray, Value::Array(_) | Value::Object(_)) => Ok(parsed),
        (ExpectedShape::ObjectOrArray, v) => Err(ParseError::NotAnObjectOrArray(v.kind())),
    }
}

// ---------------------------------------------------------------------------
// Tier 2: relaxed-syntax normalization
// ---------------------------------------------------------------------------

// Sentinel string contents after JSON unescaping. The U+0001 framing
// cannot be typed literally in pasted text, so colliding with real data
// requires deliberately crafted input.
const SENT_UNDEFINED: &str = "\u{1}jd:undefined\u{1}";
const SENT_NAN: &str = "\u{1}jd:nan\u{1}";
const SENT_POS_INF: &str = "\u{1}jd:inf\u{1}";
const SENT_NEG_INF: &str = "\u{1}jd:-inf\u{1}";

static RE_SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'((?:[^'\\]|\\.)*)'").expect("quote regex compiles"));
static RE_UNQUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z_$][A-Za-z0-9_$]*)\s*:").expect("key regex compiles")
});
static RE_TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("comma regex compiles"));
static RE_NEG_INFINITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-Infinity\b").expect("neg-inf regex compiles"));
static RE_INFINITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bInfinity\b").expect("inf regex compiles"));
static RE_NAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bNaN\b").expect("nan regex compiles"));
static RE_UNDEFINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bundefined\b").expect("undefined regex compiles"));

/// Rewrite the relaxed constructs into strict-JSON spelling, leaving the
/// bare `undefined`/`NaN`/`Infinity` tokens in place. This is the text
/// surfaced to callers as the auto-fix suggestion.
fn normalize_relaxed(text: &str) -> String {
    // (i) single-quoted strings -> double-quoted
    let step = RE_SINGLE_QUOTED.replace_all(text, |caps: &regex::Captures<'_>| {
        let mut out = String::with_capacity(caps[1].len() + 2);
        out.push('"');
        let mut chars = caps[1].chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                },
                '"' => out.push_str("\\\""),
                other => out.push(other),
            }
        }
        out.push('"');
        out
    });
    // (ii) unquoted identifier keys -> quoted
    let step = RE_UNQUOTED_KEY.replace_all(&step, "$1\"$2\":");
    // (iii) trailing commas before } or ] -> removed
    RE_TRAILING_COMMA.replace_all(&step, "$1").into_owned()
}

/// Replace the bare extension tokens with quoted sentinel strings so the
/// text parses as strict JSON. `-Infinity` must run before `Infinity`.
fn sentinelize(text: &str) -> String {
    let step = RE_NEG_INFINITY.replace_all(text, "\"\\u0001jd:-inf\\u0001\"");
    let step = RE_INFINITY.replace_all(&step, "\"\\u0001jd:inf\\u0001\"");
    let step = RE_NAN.replace_all(&step, "\"\\u0001jd:nan\\u0001\"");
    RE_UNDEFINED
        .replace_all(&step, "\"\\u0001jd:undefined\\u0001\"")
        .into_owned()
}

/// Substitute sentinel strings back into their Value variants.
fn decode_sentinels(value: Value) -> Value {
    match value {
        Value::String(s) => match s.as_str() {
            SENT_UNDEFINED => Value::Undefined,
            SENT_NAN => Value::NaN,
            SENT_POS_INF => Value::PosInfinity,
            SENT_NEG_INF => Value::NegInfinity,
            _ => Value::String(s),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(decode_sentinels).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k, decode_sentinels(v)))
                .collect(),
        ),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tier 3: bounded literal-expression parser
// ---------------------------------------------------------------------------

/// Recursive-descent parser for the literal-only grammar.
///
/// Accepts everything tier 2 handles plus `//` and `/* */` comments,
/// `+`-signed numbers and bare fractions (`.5`), without any of the regex
/// pre-pass fragility. Deliberately rejects identifiers in value position,
/// function calls and statements; this replaces the original system's
/// "evaluate as code" fallback without executing anything.
mod literal {
    use super::{insert_field, Value};

    pub(super) fn parse(text: &str) -> Result<Value, String> {
        let mut p = Parser {
            bytes: text.as_bytes(),
            pos: 0,
        };
        p.skip_trivia();
        let value = p.parse_value()?;
        p.skip_trivia();
        if p.pos != p.bytes.len() {
            return Err(format!("unexpected trailing input at byte {}", p.pos));
        }
        Ok(value)
    }

    struct Parser<'a> {
        bytes: &'a [u8],
        pos: usize,
    }

    impl Parser<'_> {
        fn peek(&self) -> Option<u8> {
            self.bytes.get(self.pos).copied()
        }

        fn skip_trivia(&mut self) {
            loop {
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace() {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                match (self.peek(), self.bytes.get(self.pos + 1)) {
                    (Some(b'/'), Some(b'/')) => {
                        while let Some(b) = self.peek() {
                            if b == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    (Some(b'/'), Some(b'*')) => {
                        self.pos += 2;
                        while self.pos < self.bytes.len() {
                            if self.bytes[self.pos] == b'*'
                                && self.bytes.get(self.pos + 1) == Some(&b'/')
                            {
                                self.pos += 2;
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    _ => return,
                }
            }
        }

        fn parse_value(&mut self) -> Result<Value, String> {
            match self.peek() {
                Some(b'{') => self.parse_object(),
                Some(b'[') => self.parse_array(),
                Some(q @ (b'"' | b'\'')) => Ok(Value::String(self.parse_string(q)?)),
                Some(sign @ (b'-' | b'+')) => {
                    if self.word_follows_at(self.pos + 1, "Infinity") {
                        self.pos += 1 + "Infinity".len();
                        return Ok(if sign == b'-' {
                            Value::NegInfinity
                        } else {
                            Value::PosInfinity
                        });
                    }
                    self.parse_number()
                }
                Some(b) if b.is_ascii_digit() || b == b'.' => self.parse_number(),
                Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {
                    match self.parse_word()? {
                        "true" => Ok(Value::Bool(true)),
                        "false" => Ok(Value::Bool(false)),
                        "null" => Ok(Value::Null),
                        "undefined" => Ok(Value::Undefined),
                        "NaN" => Ok(Value::NaN),
                        "Infinity" => Ok(Value::PosInfinity),
                        other => Err(format!("unexpected identifier '{}'", other)),
                    }
                }
                Some(b) => Err(format!("unexpected byte 0x{:02x} at {}", b, self.pos)),
                None => Err("unexpected end of input".to_string()),
            }
        }

        fn parse_object(&mut self) -> Result<Value, String> {
            self.pos += 1; // consume '{'
            let mut fields: Vec<(String, Value)> = Vec::new();
            loop {
                self.skip_trivia();
                match self.peek() {
                    Some(b'}') => {
                        self.pos += 1;
                        return Ok(Value::Object(fields));
                    }
                    Some(_) => {}
                    None => return Err("unterminated object".to_string()),
                }
                let key = self.parse_key()?;
                self.skip_trivia();
                if self.peek() != Some(b':') {
                    return Err(format!("expected ':' after key at byte {}", self.pos));
                }
                self.pos += 1;
                self.skip_trivia();
                let value = self.parse_value()?;
                insert_field(&mut fields, key, value);
                self.skip_trivia();
                match self.peek() {
                    Some(b',') => self.pos += 1, // trailing comma handled by loop head
                    Some(b'}') => {}
                    _ => return Err(format!("expected ',' or '}}' at byte {}", self.pos)),
                }
            }
        }

        fn parse_array(&mut self) -> Result<Value, String> {
            self.pos += 1; // consume '['
            let mut items = Vec::new();
            loop {
                self.skip_trivia();
                match self.peek() {
                    Some(b']') => {
                        self.pos += 1;
                        return Ok(Value::Array(items));
                    }
                    Some(_) => {}
                    None => return Err("unterminated array".to_string()),
                }
                items.push(self.parse_value()?);
                self.skip_trivia();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b']') => {}
                    _ => return Err(format!("expected ',' or ']' at byte {}", self.pos)),
                }
            }
        }

        /// Object keys: quoted strings or bare identifiers.
        fn parse_key(&mut self) -> Result<String, String> {
            match self.peek() {
                Some(q @ (b'"' | b'\'')) => self.parse_string(q),
                Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {
                    Ok(self.parse_word()?.to_string())
                }
                _ => Err(format!("expected object key at byte {}", self.pos)),
            }
        }

        /// Quoted string with escape handling. Raw multibyte UTF-8 passes
        /// through untouched (all continuation bytes are >= 0x80 and cannot
        /// collide with the quote or backslash bytes).
        fn parse_string(&mut self, quote: u8) -> Result<String, String> {
            self.pos += 1; // consume opening quote
            let mut out: Vec<u8> = Vec::new();
            loop {
                let Some(b) = self.peek() else {
                    return Err("unterminated string".to_string());
                };
                self.pos += 1;
                if b == quote {
                    break;
                }
                if b != b'\\' {
                    out.push(b);
                    continue;
                }
                let Some(esc) = self.peek() else {
                    return Err("unterminated escape".to_string());
                };
                self.pos += 1;
                match esc {
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'0' => out.push(0),
                    b'u' => {
                        let c = self.parse_unicode_escape()?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    }
                    other => out.push(other),
                }
            }
            String::from_utf8(out).map_err(|_| "invalid utf-8 in string".to_string())
        }

        /// `\uXXXX`, including surrogate pairs for astral-plane characters.
        fn parse_unicode_escape(&mut self) -> Result<char, String> {
            let high = self.parse_hex4()?;
            if (0xD800..=0xDBFF).contains(&high) {
                if self.peek() == Some(b'\\') && self.bytes.get(self.pos + 1) == Some(&b'u') {
                    self.pos += 2;
                    let low = self.parse_hex4()?;
                    if (0xDC00..=0xDFFF).contains(&low) {
                        let c = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                        return char::from_u32(c)
                            .ok_or_else(|| "invalid surrogate pair".to_string());
                    }
                }
                return Err("lone surrogate in string".to_string());
            }
            char::from_u32(high).ok_or_else(|| "invalid unicode escape".to_string())
        }

        fn parse_hex4(&mut self) -> Result<u32, String> {
            let mut v: u32 = 0;
            for _ in 0..4 {
                let Some(b) = self.peek() else {
                    return Err("truncated \\u escape".to_string());
                };
                let digit = (b as char)
                    .to_digit(16)
                    .ok_or_else(|| format!("bad hex digit at byte {}", self.pos))?;
                v = v * 16 + digit;
                self.pos += 1;
            }
            Ok(v)
        }

        fn parse_number(&mut self) -> Result<Value, String> {
            let start = self.pos;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.peek() == Some(b'.') {
                self.pos += 1;
                while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
            if matches!(self.peek(), Some(b'e' | b'E')) {
                self.pos += 1;
                if matches!(self.peek(), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
            let text = std::str::from_utf8(&self.bytes[start..self.pos])
                .map_err(|_| "invalid number bytes".to_string())?;
            let n: f64 = text
                .parse()
                .map_err(|_| format!("bad number '{}' at byte {}", text, start))?;
            if !n.is_finite() {
                return Err(format!("number '{}' out of range", text));
            }
            Ok(Value::Number(n))
        }

        fn parse_word(&mut self) -> Result<&str, String> {
            let start = self.pos;
            while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
            {
                self.pos += 1;
            }
            if self.pos == start {
                return Err(format!("expected identifier at byte {}", start));
            }
            std::str::from_utf8(&self.bytes[start..self.pos])
                .map_err(|_| "invalid identifier bytes".to_string())
        }

        /// True when `word` starts at `at` and is not followed by an
        /// identifier character.
        fn word_follows_at(&self, at: usize, word: &str) -> bool {
            let end = at + word.len();
            if self.bytes.len() < end || &self.bytes[at..end] != word.as_bytes() {
                return false;
            }
            !matches!(self.bytes.get(end), Some(b) if b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$')
        }
    }
}
