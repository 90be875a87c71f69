//! Surface syntaxes accepted for Exif property values.
//!
//! Every pattern is anchored and ASCII-only: digits are spelled `[0-9]`
//! (not `\d`) so that non-ASCII digits never match, and there is no sign
//! anywhere, so negative numbers are rejected by construction.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `4`
    OneInt,
    /// `4` or `2.5`
    OneDecimal,
    /// `5/2`; the denominator has no leading zero
    OneRational,

    /// `9 9`
    TwoIntBlank,
    /// `9,9`
    TwoIntComma,

    /// `8 8 8`
    ThreeIntBlank,
    /// `8,8,8`
    ThreeIntComma,
    /// `39 54 20`, no component may be zero or start with zero
    ThreeNonZeroIntBlank,
    /// `39,54,20`
    ThreeNonZeroIntComma,
    /// `12:30:45`, time-of-day shorthand
    ThreeNonZeroIntColon,
    /// `39/1 54/1 20/1`
    ThreeRationalBlank,
    /// `0.299 0.587 0.114`
    ThreeDecimalBlank,
    /// `0.299,0.587,0.114`
    ThreeDecimalComma,

    /// `2 2 0 0`
    FourIntBlank,
    /// `1,1,0,0`
    FourIntComma,
    /// `1,3,1,2`
    FourNonZeroIntComma,
    /// `2.2.0.0`
    FourIntDot,
    /// `1/1 3/2 1/1 2/1`
    FourRationalBlank,
    /// `1.0 3.5 1.8 2.8`
    FourDecimalBlank,
    /// `1.0,3.5,1.8,2.8`
    FourDecimalComma,

    /// `2022:06:02`
    Date,
    /// `2022:06:02 15:51:34`
    DateTime,
}

const INT: &str = "[0-9]+";
const NZ_INT: &str = "[1-9][0-9]*";
const RATIONAL: &str = "[0-9]+/[1-9][0-9]*";
const DECIMAL: &str = r"[0-9]+(?:\.[0-9]+)?";
/// ASCII whitespace, unlike the Unicode-aware `\s`.
const BLANK: &str = r"[ \t\n\x0B\f\r]";

impl Grammar {
    pub const ALL: [Grammar; 22] = [
        Grammar::OneInt,
        Grammar::OneDecimal,
        Grammar::OneRational,
        Grammar::TwoIntBlank,
        Grammar::TwoIntComma,
        Grammar::ThreeIntBlank,
        Grammar::ThreeIntComma,
        Grammar::ThreeNonZeroIntBlank,
        Grammar::ThreeNonZeroIntComma,
        Grammar::ThreeNonZeroIntColon,
        Grammar::ThreeRationalBlank,
        Grammar::ThreeDecimalBlank,
        Grammar::ThreeDecimalComma,
        Grammar::FourIntBlank,
        Grammar::FourIntComma,
        Grammar::FourNonZeroIntComma,
        Grammar::FourIntDot,
        Grammar::FourRationalBlank,
        Grammar::FourDecimalBlank,
        Grammar::FourDecimalComma,
        Grammar::Date,
        Grammar::DateTime,
    ];

    /// The anchored regular expression for this grammar.
    pub fn pattern(self) -> String {
        use Grammar::*;

        match self {
            OneInt => repeat(INT, "", 1),
            OneDecimal => repeat(DECIMAL, "", 1),
            OneRational => repeat(RATIONAL, "", 1),
            TwoIntBlank => repeat(INT, BLANK, 2),
            TwoIntComma => repeat(INT, ",", 2),
            ThreeIntBlank => repeat(INT, BLANK, 3),
            ThreeIntComma => repeat(INT, ",", 3),
            ThreeNonZeroIntBlank => repeat(NZ_INT, BLANK, 3),
            ThreeNonZeroIntComma => repeat(NZ_INT, ",", 3),
            ThreeNonZeroIntColon => repeat(NZ_INT, ":", 3),
            ThreeRationalBlank => repeat(RATIONAL, BLANK, 3),
            ThreeDecimalBlank => repeat(DECIMAL, BLANK, 3),
            ThreeDecimalComma => repeat(DECIMAL, ",", 3),
            FourIntBlank => repeat(INT, BLANK, 4),
            FourIntComma => repeat(INT, ",", 4),
            FourNonZeroIntComma => repeat(NZ_INT, ",", 4),
            FourIntDot => repeat(INT, r"\.", 4),
            FourRationalBlank => repeat(RATIONAL, BLANK, 4),
            FourDecimalBlank => repeat(DECIMAL, BLANK, 4),
            FourDecimalComma => repeat(DECIMAL, ",", 4),
            Date => "^[0-9]{4}:[0-9]{2}:[0-9]{2}$".to_owned(),
            DateTime => format!("^[0-9]{{4}}:[0-9]{{2}}:[0-9]{{2}}{BLANK}[0-9]{{2}}:[0-9]{{2}}:[0-9]{{2}}$"),
        }
    }

    fn regex(self) -> &'static Regex {
        static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
            Grammar::ALL
                .iter()
                // Safe unwrap: every pattern is a constant, see `all_patterns_compile`
                .map(|g| Regex::new(&g.pattern()).unwrap())
                .collect()
        });
        &COMPILED[self as usize]
    }

    /// Returns true if the whole of `value` is in this grammar.
    pub fn matches(self, value: &str) -> bool {
        let matched = self.regex().is_match(value);
        if !matched {
            tracing::debug!(grammar = ?self, value, "grammar not matched");
        }
        matched
    }
}

fn repeat(token: &str, sep: &str, n: usize) -> String {
    let body = vec![token; n].join(sep);
    format!("^{body}$")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::case;

    #[test]
    fn all_patterns_compile() {
        for (i, g) in Grammar::ALL.iter().enumerate() {
            assert_eq!(*g as usize, i, "{g:?} is out of order in Grammar::ALL");
            Regex::new(&g.pattern()).unwrap();
        }
    }

    #[case(Grammar::OneInt, "3", true)]
    #[case(Grammar::OneInt, "0003", true)]
    #[case(Grammar::OneInt, "-3", false)]
    #[case(Grammar::OneInt, "", false)]
    #[case(Grammar::OneInt, "3.0", false)]
    #[case(Grammar::OneInt, "٣", false)]
    #[case(Grammar::OneDecimal, "3.0", true)]
    #[case(Grammar::OneDecimal, "3", true)]
    #[case(Grammar::OneDecimal, "3.", false)]
    #[case(Grammar::OneDecimal, ".5", false)]
    #[case(Grammar::OneRational, "5/2", true)]
    #[case(Grammar::OneRational, "0/1", true)]
    #[case(Grammar::OneRational, "5/0", false)]
    #[case(Grammar::OneRational, "5/02", false)]
    #[case(Grammar::OneRational, "-5/2", false)]
    #[case(Grammar::TwoIntBlank, "9 9", true)]
    #[case(Grammar::TwoIntComma, "9,9", true)]
    #[case(Grammar::TwoIntComma, "9, 9", false)]
    #[case(Grammar::ThreeIntBlank, "8 8 8", true)]
    #[case(Grammar::ThreeIntBlank, "8\t8\t8", true)]
    #[case(Grammar::ThreeIntBlank, "8  8 8", false)]
    #[case(Grammar::ThreeIntBlank, "8\u{3000}8\u{3000}8", false)]
    #[case(Grammar::ThreeIntBlank, "8\u{a0}8\u{a0}8", false)]
    #[case(Grammar::ThreeRationalBlank, "39/1\u{2003}54/1\u{2003}20/1", false)]
    #[case(Grammar::DateTime, "2022:06:02\u{3000}15:51:34", false)]
    #[case(Grammar::ThreeIntComma, "8,8,8", true)]
    #[case(Grammar::ThreeIntComma, "8,8", false)]
    #[case(Grammar::ThreeNonZeroIntBlank, "39 54 20", true)]
    #[case(Grammar::ThreeNonZeroIntBlank, "39 0 20", false)]
    #[case(Grammar::ThreeNonZeroIntComma, "39,54,20", true)]
    #[case(Grammar::ThreeNonZeroIntColon, "12:30:45", true)]
    #[case(Grammar::ThreeNonZeroIntColon, "12:00:45", false)]
    #[case(Grammar::ThreeRationalBlank, "39/1 54/1 20/1", true)]
    #[case(Grammar::ThreeDecimalBlank, "0.299 0.587 0.114", true)]
    #[case(Grammar::ThreeDecimalComma, "39.0,54,20.0", true)]
    #[case(Grammar::FourIntBlank, "2 2 0 0", true)]
    #[case(Grammar::FourIntComma, "1,1,0,0", true)]
    #[case(Grammar::FourNonZeroIntComma, "1,3,1,2", true)]
    #[case(Grammar::FourNonZeroIntComma, "1,3,0,2", false)]
    #[case(Grammar::FourIntDot, "2.2.0.0", true)]
    #[case(Grammar::FourIntDot, "2x2x0x0", false)]
    #[case(Grammar::FourRationalBlank, "1/1 3/2 1/1 2/1", true)]
    #[case(Grammar::FourDecimalBlank, "1.0 3.5 1.8 2.8", true)]
    #[case(Grammar::FourDecimalComma, "1.0,3.5,1.8,2.8", true)]
    #[case(Grammar::Date, "2022:06:02", true)]
    #[case(Grammar::Date, "2022-06-02", false)]
    #[case(Grammar::DateTime, "2022:06:02 15:51:34", true)]
    #[case(Grammar::DateTime, "2022:06:02", false)]
    fn grammar_matches(grammar: Grammar, value: &str, expect: bool) {
        assert_eq!(grammar.matches(value), expect, "{grammar:?} {value:?}");
    }

    #[test]
    fn empty_matches_nothing() {
        for g in Grammar::ALL {
            assert!(!g.matches(""), "{g:?}");
        }
    }
}
