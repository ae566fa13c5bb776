//! # Roman numeral codec
//!
//! This crate converts between non-negative integers and Roman numeral
//! strings, validates numerals under **subtractive** (classical) or
//! **additive** notation, and supports arithmetic between numerals or between
//! a numeral and a plain integer.
//!
//! The alphabet is the thirteen classical tokens: the seven digit characters
//! `I V X L C D M` plus the six subtractive digraphs `IV IX XL XC CD CM`.
//! A numeral is scanned left to right, one token at a time:
//!
//! 1. **Digraphs** form only under subtractive notation, and only when a digit
//!    is followed by one of its two partner digits (`I` opens `IV`/`IX`, `X`
//!    opens `XL`/`XC`, `C` opens `CD`/`CM`). Nothing at all may follow `IV`
//!    or `IX`.
//! 2. **Repetition** is capped per token: `I`, `X` and `C` may run three in a
//!    row under subtractive notation and four under additive; `V`, `L` and
//!    `D` never repeat; `M` repeats without bound in either notation.
//! 3. **Precedence** must not increase left to right, and a subtractive
//!    digraph lowers what may follow it (`XL` and `CD` by one step, `XC` and
//!    `CM` by three).
//!
//! Input is case-insensitive; renderings are always upper-case. The empty
//! string is the well-formed numeral for zero.
//!
//! ## Output
//! Parsing returns a strongly typed [`Roman`] value. Errors are categorised in
//! [`ErrorKind`] with helpful context. The canonical rendering is provided via
//! `Display`, and arithmetic re-encodes in the left operand's notation.
//!
//! ## Example
//! ```rust
//! use roman_numerals::parse;
//! let year = parse("MCMXCIX").expect("valid numeral");
//! assert_eq!(year.value(), 1999);
//! let next = year.add(1).expect("in range");
//! assert_eq!(next.numeral(), "MM");
//! ```

use core::fmt;
use once_cell::sync::Lazy;
use std::{collections::HashMap, str::FromStr};

mod arith;

pub use arith::{ArithmeticMode, Operand};

/// A row of the token table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Token {
    /// Canonical upper-case symbol, one or two characters.
    symbol: &'static str,
    value: u64,
    /// The two subtractive digraphs this digit can open, if any.
    subtractives: Option<[&'static str; 2]>,
}

/// The thirteen tokens in ascending value order. The validator's precedence
/// ranks and the encoder's largest-first scan are both derived from this
/// array, so the ordering is load-bearing.
static TOKENS: [Token; 13] = [
    Token {
        symbol: "I",
        value: 1,
        subtractives: Some(["IV", "IX"]),
    },
    Token {
        symbol: "IV",
        value: 4,
        subtractives: None,
    },
    Token {
        symbol: "V",
        value: 5,
        subtractives: None,
    },
    Token {
        symbol: "IX",
        value: 9,
        subtractives: None,
    },
    Token {
        symbol: "X",
        value: 10,
        subtractives: Some(["XL", "XC"]),
    },
    Token {
        symbol: "XL",
        value: 40,
        subtractives: None,
    },
    Token {
        symbol: "L",
        value: 50,
        subtractives: None,
    },
    Token {
        symbol: "XC",
        value: 90,
        subtractives: None,
    },
    Token {
        symbol: "C",
        value: 100,
        subtractives: Some(["CD", "CM"]),
    },
    Token {
        symbol: "CD",
        value: 400,
        subtractives: None,
    },
    Token {
        symbol: "D",
        value: 500,
        subtractives: None,
    },
    Token {
        symbol: "CM",
        value: 900,
        subtractives: None,
    },
    Token {
        symbol: "M",
        value: 1000,
        subtractives: None,
    },
];

// Precomputed lookups derived from the table.
static SINGLE_DIGITS: Lazy<HashMap<char, &'static Token>> = Lazy::new(|| {
    TOKENS
        .iter()
        .filter(|t| t.symbol.len() == 1)
        .map(|t| (t.symbol.as_bytes()[0] as char, t))
        .collect()
});

/// Symbol to rank counted from the largest value down (`M` is rank 0).
static DESCENDING_RANK: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    TOKENS
        .iter()
        .rev()
        .enumerate()
        .map(|(rank, t)| (t.symbol, rank))
        .collect()
});

/// Top-level parse entry point: strict validation, subtractive notation.
pub fn parse(input: &str) -> Result<Roman, Error> {
    Roman::new(input, Validation::Strict, Notation::Subtractive)
}

/// Encoding style for renderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Notation {
    /// Classical style: 99 renders as `XCIX`.
    #[default]
    Subtractive,
    /// Digraph-free style: 99 renders as `LXXXXVIIII`.
    Additive,
}

/// Whether a malformed (but alphabet-clean) numeral is a construction error
/// or merely recorded as invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Validation {
    #[default]
    Strict,
    Permissive,
}

/// Error type with granular categories.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// A character outside `I V X L C D M` (case-insensitive).
    InvalidCharacter { ch: char, position: usize },
    /// Alphabet-clean input that the validator rejects, under strict
    /// validation only.
    InvalidNumeral,
    /// A negative magnitude where only numerals are representable.
    NegativeValue,
    /// A real operand with a fractional part.
    NonIntegralOperand,
    /// A replacement rendering that decodes to a different value; the
    /// instance keeps its prior rendering.
    ValueMismatch { expected: u64, found: u64 },
    /// A non-numeral operand under strict arithmetic.
    IncompatibleOperand,
    DivisionByZero,
    /// A result beyond the encodable range.
    Overflow,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidCharacter { ch, position } => {
                write!(f, "'{ch}' at position {position} is not a roman digit")
            }
            ErrorKind::InvalidNumeral => f.write_str("not a well-formed roman numeral"),
            ErrorKind::NegativeValue => {
                f.write_str("negative values cannot be rendered as a numeral")
            }
            ErrorKind::NonIntegralOperand => f.write_str("operand has a fractional part"),
            ErrorKind::ValueMismatch { expected, found } => {
                write!(
                    f,
                    "replacement numeral decodes to {found}, instance value is {expected}"
                )
            }
            ErrorKind::IncompatibleOperand => {
                f.write_str("strict arithmetic accepts roman operands only")
            }
            ErrorKind::DivisionByZero => f.write_str("division or remainder by zero"),
            ErrorKind::Overflow => f.write_str("result exceeds the encodable range"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} ({})", self.kind, self.context)
        }
    }
}

impl std::error::Error for Error {}

/// One step of the left-to-right scan.
#[derive(Clone, Copy, Debug)]
struct Scan {
    token: &'static Token,
    /// True when the token is a digraph and the caller must skip the next
    /// character.
    consumed_next: bool,
    /// How many *additional* consecutive occurrences of this token the
    /// validator tolerates.
    max_repeats: u32,
}

/// Classify the token starting at `index`, which the caller has already
/// bounds-checked. A digraph is preferred over its opening digit whenever the
/// two-character window matches one of the digit's partners.
fn next_token(chars: &[char], index: usize, notation: Notation) -> Result<Scan, Error> {
    let ch = chars[index];
    let digit = *SINGLE_DIGITS.get(&ch).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidCharacter { ch, position: index },
            chars.iter().collect::<String>(),
        )
    })?;

    let Some(partners) = digit.subtractives else {
        // V, L, D and M never open a digraph and never repeat.
        return Ok(Scan {
            token: digit,
            consumed_next: false,
            max_repeats: 0,
        });
    };

    match notation {
        // Digraphs never form additively; a fourth repeat stands in for the
        // digraph that subtractive notation would have required.
        Notation::Additive => Ok(Scan {
            token: digit,
            consumed_next: false,
            max_repeats: 3,
        }),
        Notation::Subtractive => {
            if let Some(&next) = chars.get(index + 1) {
                let window: String = [ch, next].into_iter().collect();
                if let Some(symbol) = partners.into_iter().find(|p| *p == window) {
                    let token = TOKENS
                        .iter()
                        .find(|t| t.symbol == symbol)
                        .expect("digraphs are table entries");
                    return Ok(Scan {
                        token,
                        consumed_next: true,
                        max_repeats: 2,
                    });
                }
            }

            Ok(Scan {
                token: digit,
                consumed_next: false,
                max_repeats: 2,
            })
        }
    }
}

/// Walk the numeral and decide well-formedness. Reaching the end without a
/// rule firing means valid; the empty numeral is valid and denotes zero.
fn scan_validity(chars: &[char], notation: Notation) -> Result<bool, Error> {
    let mut previous: Option<&'static Token> = None;
    let mut repetitions = 0u32;
    let mut index = 0;

    while index < chars.len() {
        let scan = next_token(chars, index, notation)?;
        index += if scan.consumed_next { 2 } else { 1 };

        if let Some(prev) = previous {
            // IV and IX terminate a numeral outright. The higher digraphs do
            // not share this rule; they are constrained by the modifier below.
            if prev.symbol == "IV" || prev.symbol == "IX" {
                return Ok(false);
            }

            if prev.symbol == scan.token.symbol {
                repetitions += 1;
                if repetitions > scan.max_repeats && scan.token.symbol != "M" {
                    return Ok(false);
                }
            } else {
                repetitions = 0;

                // A subtractive digraph has already spent part of the next
                // level, which narrows what may follow it.
                let modifier = match prev.symbol {
                    "XL" | "CD" => 1,
                    "XC" | "CM" => 3,
                    _ => 0,
                };

                if DESCENDING_RANK[prev.symbol] + modifier > DESCENDING_RANK[scan.token.symbol] {
                    return Ok(false);
                }
            }
        }

        previous = Some(scan.token);
    }

    Ok(true)
}

/// Sum token values along the scan. Total over any alphabet-clean string;
/// well-formedness is deliberately not required here.
fn scan_value(chars: &[char], notation: Notation) -> Result<u64, Error> {
    let mut total = 0u64;
    let mut index = 0;

    while index < chars.len() {
        let scan = next_token(chars, index, notation)?;
        total += scan.token.value;
        index += if scan.consumed_next { 2 } else { 1 };
    }

    Ok(total)
}

fn uppercase_chars(numeral: &str) -> Vec<char> {
    numeral.chars().map(|c| c.to_ascii_uppercase()).collect()
}

/// Render `value` as a numeral: repeatedly append the largest token that
/// still fits, skipping digraphs under additive notation. Zero renders as the
/// empty string. A negative value fails unless `accept_negative` is set, in
/// which case a leading `-` precedes the encoded magnitude; such strings are
/// display-only and are not accepted back by [`Roman::new`].
pub fn encode(value: i64, notation: Notation, accept_negative: bool) -> Result<String, Error> {
    let mut out = String::new();
    let mut remaining = if value < 0 {
        if !accept_negative {
            return Err(Error::new(ErrorKind::NegativeValue, value.to_string()));
        }
        out.push('-');
        value.unsigned_abs()
    } else {
        value as u64
    };

    while remaining > 0 {
        for token in TOKENS.iter().rev() {
            if notation == Notation::Additive && token.symbol.len() == 2 {
                continue;
            }

            if remaining >= token.value {
                out.push_str(token.symbol);
                remaining -= token.value;
                break;
            }
        }
    }

    Ok(out)
}

/// Decode a numeral to its integer value without requiring well-formedness;
/// `XLL` decodes to 90. Case-insensitive. Fails only on characters outside
/// the alphabet.
pub fn decode(numeral: &str, notation: Notation) -> Result<u64, Error> {
    scan_value(&uppercase_chars(numeral), notation)
}

/// Decide well-formedness of a numeral under the given notation.
/// Case-insensitive. Fails only on characters outside the alphabet.
pub fn validate(numeral: &str, notation: Notation) -> Result<bool, Error> {
    scan_validity(&uppercase_chars(numeral), notation)
}

/// A parsed Roman numeral: a write-once integer value paired with an
/// upper-case rendering in one of the two notations.
///
/// The rendering and the value stay consistent at all times. Switching
/// notation re-encodes the same value; replacing the rendering outright is
/// only accepted when the replacement decodes to the same value.
#[derive(Clone, Debug)]
pub struct Roman {
    numeral: String,
    value: u64,
    valid: bool,
    notation: Notation,
    mode: ArithmeticMode,
}

impl Roman {
    /// Build a `Roman` from a digit string. Under [`Validation::Strict`] a
    /// malformed numeral is an error; under [`Validation::Permissive`] it is
    /// recorded in [`Roman::is_valid`] and still decoded.
    pub fn new(numeral: &str, validation: Validation, notation: Notation) -> Result<Self, Error> {
        let chars = uppercase_chars(numeral);
        let upper: String = chars.iter().collect();

        let valid = scan_validity(&chars, notation)?;
        if validation == Validation::Strict && !valid {
            return Err(Error::new(ErrorKind::InvalidNumeral, upper));
        }

        let value = scan_value(&chars, notation)?;
        Ok(Roman {
            numeral: upper,
            value,
            valid,
            notation,
            mode: ArithmeticMode::default(),
        })
    }

    /// Build a `Roman` from an integer via the encoder. The rendering is
    /// greedy-canonical and therefore always well-formed.
    pub fn from_value(value: i64, notation: Notation) -> Result<Self, Error> {
        let numeral = encode(value, notation, false)?;
        Ok(Roman {
            numeral,
            value: value as u64,
            valid: true,
            notation,
            mode: ArithmeticMode::default(),
        })
    }

    /// The decoded magnitude. Fixed for the lifetime of the instance.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The current upper-case rendering.
    pub fn numeral(&self) -> &str {
        &self.numeral
    }

    /// The validator's verdict on the rendering given at construction.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn arithmetic_mode(&self) -> ArithmeticMode {
        self.mode
    }

    /// Select the operand compatibility rules this instance applies when it
    /// is the left side of an arithmetic operation.
    pub fn with_arithmetic_mode(mut self, mode: ArithmeticMode) -> Self {
        self.mode = mode;
        self
    }

    /// Re-encode the value in the given notation. The value never changes.
    pub fn set_notation(&mut self, notation: Notation) {
        self.notation = notation;
        self.numeral =
            encode(self.value as i64, notation, false).expect("stored values are non-negative");
    }

    /// Replace the rendering with an equivalent spelling, e.g. `XXXX` for a
    /// value of 40. A replacement that decodes to a different value is
    /// rejected with [`ErrorKind::ValueMismatch`] and the instance is left
    /// unchanged; build a new instance to hold a new value.
    pub fn set_numeral(&mut self, numeral: &str) -> Result<(), Error> {
        let chars = uppercase_chars(numeral);
        let upper: String = chars.iter().collect();

        let found = scan_value(&chars, self.notation)?;
        if found != self.value {
            return Err(Error::new(
                ErrorKind::ValueMismatch {
                    expected: self.value,
                    found,
                },
                upper,
            ));
        }

        self.numeral = upper;
        Ok(())
    }
}

impl fmt::Display for Roman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.numeral)
    }
}

impl FromStr for Roman {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<&Roman> for u64 {
    fn from(roman: &Roman) -> u64 {
        roman.value()
    }
}

impl From<&Roman> for f64 {
    fn from(roman: &Roman) -> f64 {
        roman.value() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -----------------------
    // Helpers
    // -----------------------

    fn ok(input: &str) -> Roman {
        parse(input).expect("should parse")
    }

    fn err(input: &str) -> ErrorKind {
        match parse(input) {
            Ok(_) => panic!("expected error"),
            Err(e) => e.kind,
        }
    }

    fn additive(input: &str) -> Result<Roman, Error> {
        Roman::new(input, Validation::Strict, Notation::Additive)
    }

    // -----------------------
    // Token table
    // -----------------------

    #[test]
    fn token_table_is_ascending_and_closed_over_digraphs() {
        assert_eq!(TOKENS.len(), 13);
        for pair in TOKENS.windows(2) {
            assert!(
                pair[0].value < pair[1].value,
                "{} must sort below {}",
                pair[0].symbol,
                pair[1].symbol
            );
        }

        // Only I, X and C open digraphs, and every digraph is itself a table
        // entry.
        let openers: Vec<&str> = TOKENS
            .iter()
            .filter(|t| t.subtractives.is_some())
            .map(|t| t.symbol)
            .collect();
        assert_eq!(openers, vec!["I", "X", "C"]);

        for token in TOKENS.iter() {
            if let Some(partners) = token.subtractives {
                for partner in partners {
                    assert!(TOKENS.iter().any(|t| t.symbol == partner));
                }
            }
        }
    }

    // -----------------------
    // Parsing & decoding
    // -----------------------

    #[test]
    fn parses_classical_numerals() {
        assert_eq!(ok("XLV").value(), 45);
        assert_eq!(ok("MCMXCIX").value(), 1999);
        assert_eq!(ok("CCCXLIX").value(), 349);
        assert_eq!(ok("MMXVI").value(), 2016);
        assert_eq!(ok("XIX").value(), 19);
    }

    #[test]
    fn input_is_case_insensitive_and_rendering_upper_case() {
        let r = ok("mcmxcix");
        assert_eq!(r.value(), 1999);
        assert_eq!(r.numeral(), "MCMXCIX");

        assert_eq!(decode("xLv", Notation::Subtractive).expect("clean"), 45);
    }

    #[test]
    fn empty_string_is_the_numeral_for_zero() {
        let r = ok("");
        assert_eq!(r.value(), 0);
        assert!(r.is_valid());
        assert_eq!(r.numeral(), "");
        assert_eq!(encode(0, Notation::Subtractive, false).expect("zero"), "");
    }

    #[test]
    fn invalid_characters_report_their_position() {
        assert!(matches!(
            err("XIZ"),
            ErrorKind::InvalidCharacter {
                ch: 'Z',
                position: 2
            }
        ));

        assert!(matches!(
            err("-X"),
            ErrorKind::InvalidCharacter {
                ch: '-',
                position: 0
            }
        ));

        // Whitespace is not part of the alphabet either.
        assert!(matches!(
            err("X I"),
            ErrorKind::InvalidCharacter {
                ch: ' ',
                position: 1
            }
        ));

        // The decoder and validator surface the same error.
        assert!(decode("XIZ", Notation::Subtractive).is_err());
        assert!(validate("XIZ", Notation::Additive).is_err());
    }

    // -----------------------
    // Validator rules
    // -----------------------

    #[test]
    fn nothing_may_follow_iv_or_ix() {
        assert!(matches!(err("IXI"), ErrorKind::InvalidNumeral));
        assert!(matches!(err("IVI"), ErrorKind::InvalidNumeral));
        assert!(matches!(err("IXX"), ErrorKind::InvalidNumeral));
        assert!(!validate("IXM", Notation::Subtractive).expect("clean"));
    }

    #[test]
    fn higher_digraphs_constrain_but_do_not_terminate() {
        // XL already spent the tens level once; a single X may still follow,
        // but L may not.
        assert!(validate("XLX", Notation::Subtractive).expect("clean"));
        assert!(!validate("XLL", Notation::Subtractive).expect("clean"));

        // XC and CM carry the wider modifier.
        assert!(validate("XCIX", Notation::Subtractive).expect("clean"));
        assert!(!validate("XCL", Notation::Subtractive).expect("clean"));
        assert!(validate("CMXCIX", Notation::Subtractive).expect("clean"));
        assert!(!validate("CMD", Notation::Subtractive).expect("clean"));
    }

    #[test]
    fn malformed_numerals_still_decode_permissively() {
        let r = Roman::new("XLL", Validation::Permissive, Notation::Subtractive)
            .expect("alphabet-clean");
        assert_eq!(r.value(), 90);
        assert!(!r.is_valid());

        assert!(matches!(err("XLL"), ErrorKind::InvalidNumeral));
    }

    #[test]
    fn precedence_must_not_increase() {
        assert!(matches!(err("IIIX"), ErrorKind::InvalidNumeral));
        assert!(matches!(err("VX"), ErrorKind::InvalidNumeral));
        assert!(matches!(err("LC"), ErrorKind::InvalidNumeral));
        assert!(validate("MDCLXVI", Notation::Subtractive).expect("clean"));
    }

    #[test]
    fn repetition_caps_subtractive() {
        assert_eq!(ok("III").value(), 3);
        assert_eq!(ok("CCC").value(), 300);
        assert!(matches!(err("IIII"), ErrorKind::InvalidNumeral));
        assert!(matches!(err("XXXX"), ErrorKind::InvalidNumeral));
        assert!(matches!(err("VV"), ErrorKind::InvalidNumeral));
        assert!(matches!(err("DD"), ErrorKind::InvalidNumeral));
    }

    #[test]
    fn repetition_caps_additive() {
        // A fourth repeat is how additive notation spells what a digraph
        // would have spelled.
        let four = additive("IIII").expect("additive four");
        assert_eq!(four.value(), 4);
        assert!(four.is_valid());

        assert_eq!(additive("LXXXXVIIII").expect("ninety-nine").value(), 99);
        assert_eq!(additive("VIIII").expect("nine").value(), 9);

        assert!(additive("IIIII").is_err());
        assert!(additive("VV").is_err());

        // III is fine in both notations.
        assert_eq!(additive("III").expect("three").value(), 3);
        assert_eq!(ok("III").value(), 3);
    }

    #[test]
    fn m_repeats_without_bound() {
        assert_eq!(ok("MMMM").value(), 4000);
        assert_eq!(additive("MMMM").expect("additive").value(), 4000);
        assert!(validate("MMMMMMMM", Notation::Subtractive).expect("clean"));
    }

    // -----------------------
    // Encoder
    // -----------------------

    #[test]
    fn greedy_encoding_matches_classical_spellings() {
        assert_eq!(encode(45, Notation::Subtractive, false).expect("ok"), "XLV");
        assert_eq!(
            encode(1999, Notation::Subtractive, false).expect("ok"),
            "MCMXCIX"
        );
        assert_eq!(
            encode(3999, Notation::Subtractive, false).expect("ok"),
            "MMMCMXCIX"
        );
        assert_eq!(
            encode(349, Notation::Subtractive, false).expect("ok"),
            "CCCXLIX"
        );
        assert_eq!(
            encode(4000, Notation::Subtractive, false).expect("ok"),
            "MMMM"
        );
    }

    #[test]
    fn additive_encoding_avoids_digraphs() {
        assert_eq!(
            encode(269, Notation::Additive, false).expect("ok"),
            "CCLXVIIII"
        );
        assert_eq!(
            encode(99, Notation::Additive, false).expect("ok"),
            "LXXXXVIIII"
        );
        assert_eq!(encode(45, Notation::Additive, false).expect("ok"), "XXXXV");
    }

    #[test]
    fn negative_values_need_explicit_acceptance() {
        assert!(matches!(
            encode(-9, Notation::Subtractive, false)
                .expect_err("rejected")
                .kind,
            ErrorKind::NegativeValue
        ));

        // The signed rendering exists for display only.
        assert_eq!(
            encode(-9, Notation::Subtractive, true).expect("signed"),
            "-IX"
        );
        assert!(matches!(
            err("-IX"),
            ErrorKind::InvalidCharacter { ch: '-', .. }
        ));

        assert!(Roman::from_value(-1, Notation::Subtractive).is_err());
    }

    // -----------------------
    // Round trips
    // -----------------------

    #[test]
    fn round_trip_subtractive() {
        for n in 0..=3999i64 {
            let numeral = encode(n, Notation::Subtractive, false).expect("non-negative");
            assert_eq!(
                decode(&numeral, Notation::Subtractive).expect("clean"),
                n as u64,
                "numeral={numeral}"
            );
            assert!(
                validate(&numeral, Notation::Subtractive).expect("clean"),
                "numeral={numeral}"
            );
        }
    }

    #[test]
    fn round_trip_additive() {
        for n in 0..=3999i64 {
            let numeral = encode(n, Notation::Additive, false).expect("non-negative");
            assert_eq!(
                decode(&numeral, Notation::Additive).expect("clean"),
                n as u64,
                "numeral={numeral}"
            );
            assert!(
                validate(&numeral, Notation::Additive).expect("clean"),
                "numeral={numeral}"
            );
        }
    }

    // -----------------------
    // Notation switching & rendering replacement
    // -----------------------

    #[test]
    fn switching_notation_re_renders_and_preserves_value() {
        let mut r = ok("XLV");
        assert_eq!(r.numeral(), "XLV");

        r.set_notation(Notation::Additive);
        assert_eq!(r.numeral(), "XXXXV");
        assert_eq!(r.value(), 45);

        r.set_notation(Notation::Subtractive);
        assert_eq!(r.numeral(), "XLV");
        assert_eq!(r.value(), 45);
        assert!(r.is_valid());
    }

    #[test]
    fn rendering_replacement_is_value_guarded() {
        let mut r = ok("XL");

        // An equivalent spelling is accepted even if informally invalid.
        r.set_numeral("XXXX").expect("same value");
        assert_eq!(r.numeral(), "XXXX");
        assert_eq!(r.value(), 40);

        // A different value is rejected and nothing changes.
        let e = r.set_numeral("XC").expect_err("mismatch");
        assert!(matches!(
            e.kind,
            ErrorKind::ValueMismatch {
                expected: 40,
                found: 90
            }
        ));
        assert_eq!(r.numeral(), "XXXX");
        assert_eq!(r.value(), 40);

        // Bad characters surface as such, not as a mismatch.
        assert!(matches!(
            r.set_numeral("XQ").expect_err("bad digit").kind,
            ErrorKind::InvalidCharacter { ch: 'Q', .. }
        ));
    }

    // -----------------------
    // std trait surface
    // -----------------------

    #[test]
    fn display_fromstr_and_conversions() {
        let r: Roman = "XIV".parse().expect("should parse");
        assert_eq!(r.value(), 14);
        assert_eq!(format!("{r}"), "XIV");
        assert_eq!(u64::from(&r), 14);
        assert_eq!(f64::from(&r), 14.0);

        assert!("XIZ".parse::<Roman>().is_err());
    }

    // -----------------------
    // Torture
    // -----------------------

    #[test]
    fn gargantuan_magnitudes_ride_on_unbounded_m() {
        let r = Roman::from_value(1_002_003, Notation::Subtractive).expect("encodable");
        assert_eq!(r.numeral().matches('M').count(), 1002);
        assert!(r.numeral().ends_with("III"));
        assert_eq!(
            decode(r.numeral(), Notation::Subtractive).expect("clean"),
            1_002_003
        );
        assert!(validate(r.numeral(), Notation::Subtractive).expect("clean"));

        // The same magnitude survives a double notation flip untouched.
        let mut flipped = r.clone();
        flipped.set_notation(Notation::Additive);
        flipped.set_notation(Notation::Subtractive);
        assert_eq!(flipped.numeral(), r.numeral());
        assert_eq!(flipped.value(), 1_002_003);
    }
}
