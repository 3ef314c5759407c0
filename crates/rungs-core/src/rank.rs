//! Dense lexicographic rank keys.
//!
//! A [`Rank`] is a base-62 string whose byte order matches its positional
//! (fractional) order, so a scope's statuses sort correctly under plain
//! string comparison. [`Rank::between`] inserts a new key strictly between
//! two existing keys without touching any neighbor: it copies the shared
//! prefix, takes an integral midpoint where one exists, and grows the key by
//! one position only when the bounds are adjacent at the current length.
//!
//! # Key Space
//!
//! Alphabet: `0-9 A-Z a-z` — 62 digits whose ASCII byte order equals their
//! digit order. Keys are non-empty, and generated keys never end in the
//! lowest digit `'0'`: a trailing-`'0'` key leaves no room for a left-side
//! insert.
//!
//! # Invariants
//!
//! - `between(p, n)` with `p < n` returns `r` with `p < r < n`.
//! - `between` is a pure function of its inputs: no state, no randomness.
//! - Key length is capped at [`MAX_RANK_LEN`]. Hitting the cap
//!   ([`RankError::Exhausted`]) is an operational safety valve; recovery is
//!   a store-level rebalance of the whole scope, not performed here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered digit alphabet. Index in this table is the digit's value.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of digits in the alphabet.
const RADIX: u16 = 62;

/// Upper bound on generated key length.
pub const MAX_RANK_LEN: usize = 255;

/// Digit value of an alphabet byte, `None` for bytes outside the alphabet.
const fn digit_of(byte: u8) -> Option<u16> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u16),
        b'A'..=b'Z' => Some((byte - b'A') as u16 + 10),
        b'a'..=b'z' => Some((byte - b'a') as u16 + 36),
        _ => None,
    }
}

fn alphabet_char(digit: u16) -> char {
    char::from(ALPHABET[usize::from(digit)])
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from the rank ordering engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankError {
    /// The supplied bounds were already out of order; the caller's ordering
    /// is corrupt and must be rejected, not silently repaired.
    #[error("rank bounds out of order: {prev} is not below {next}")]
    InvalidOrder {
        /// Lower bound as supplied.
        prev: Rank,
        /// Upper bound as supplied.
        next: Rank,
    },

    /// No midpoint was found within [`MAX_RANK_LEN`] digits. The scope needs
    /// a store-side rebalance.
    #[error("rank key space exhausted at {MAX_RANK_LEN} digits")]
    Exhausted,
}

/// Error from parsing rank key text received from the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRankError {
    /// Rank keys are non-empty by construction.
    #[error("rank key is empty")]
    Empty,

    /// A byte outside the `0-9A-Za-z` alphabet.
    #[error("invalid rank byte {byte:#04x} at position {at}")]
    InvalidByte {
        /// The offending byte.
        byte: u8,
        /// Byte offset within the key text.
        at: usize,
    },
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// A validated position key. Ordering is plain string ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rank(String);

impl Rank {
    /// The canonical middle of the key space: what [`Rank::between`] returns
    /// when the scope is empty. Stable across calls and releases.
    #[must_use]
    pub fn middle() -> Self {
        Self(alphabet_char(RADIX / 2).to_string())
    }

    /// Compute a key strictly between `prev` and `next`.
    ///
    /// An absent `prev` means "below everything"; an absent `next` means
    /// "above everything". With both absent this returns [`Rank::middle`].
    ///
    /// # Errors
    ///
    /// [`RankError::InvalidOrder`] when `prev >= next` as supplied, and
    /// [`RankError::Exhausted`] when no midpoint exists within
    /// [`MAX_RANK_LEN`] digits.
    pub fn between(prev: Option<&Self>, next: Option<&Self>) -> Result<Self, RankError> {
        if let (Some(p), Some(n)) = (prev, next) {
            if p >= n {
                return Err(RankError::InvalidOrder {
                    prev: p.clone(),
                    next: n.clone(),
                });
            }
        }

        let lower = prev.map(Self::digit_values).unwrap_or_default();
        // Dropped to `None` once the result commits to a digit strictly below
        // the upper bound; from there only the lower bound constrains.
        let mut upper = next.map(Self::digit_values);

        let mut key = String::new();
        for pos in 0..MAX_RANK_LEN {
            // An exhausted lower bound reads as 0, an absent upper bound as
            // the radix: the bounds behave as fractions padded with the
            // smallest / one-past-largest digit.
            let low = lower.get(pos).copied().unwrap_or(0);
            let high = upper
                .as_ref()
                .map_or(RADIX, |digits| digits.get(pos).copied().unwrap_or(0));

            if high > low + 1 {
                key.push(alphabet_char(low.midpoint(high)));
                return Ok(Self(key));
            }

            // Bounds touch at this position: keep the lower digit. When the
            // upper digit is exactly one above, every extension of the lower
            // digit already sorts below the upper bound.
            key.push(alphabet_char(low));
            if high == low + 1 {
                upper = None;
            }
        }

        Err(RankError::Exhausted)
    }

    /// Generate `count` ascending keys for seeding an empty scope.
    ///
    /// Keys are spaced evenly at the shortest length that fits `count`
    /// positions, leaving insertion room below the first key, above the
    /// last, and between every adjacent pair.
    #[must_use]
    pub fn initial_spread(count: usize) -> Vec<Self> {
        let radix = u128::from(RADIX);
        let mut width = 1usize;
        let mut span = radix;
        while span < count as u128 + 2 {
            width += 1;
            span *= radix;
        }
        let step = span / (count as u128 + 1);
        (1..=count as u128)
            .map(|slot| Self(encode(slot * step, width)))
            .collect()
    }

    /// The key text as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digit_values(&self) -> Vec<u16> {
        self.0.bytes().filter_map(digit_of).collect()
    }
}

/// Fixed-width base-62 numeral for `value`, with trailing lowest digits
/// trimmed. Trimming preserves relative order: a prefix sorts before every
/// extension of itself.
fn encode(mut value: u128, width: usize) -> String {
    let radix = u128::from(RADIX);
    let mut digits = vec![0u16; width];
    for slot in digits.iter_mut().rev() {
        // remainder is < RADIX
        *slot = u16::try_from(value % radix).unwrap_or(0);
        value /= radix;
    }
    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    digits.into_iter().map(alphabet_char).collect()
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Rank {
    type Error = ParseRankError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        if text.is_empty() {
            return Err(ParseRankError::Empty);
        }
        for (at, byte) in text.bytes().enumerate() {
            if digit_of(byte).is_none() {
                return Err(ParseRankError::InvalidByte { byte, at });
            }
        }
        Ok(Self(text))
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{MAX_RANK_LEN, ParseRankError, Rank, RankError};
    use std::str::FromStr;

    fn rank(s: &str) -> Rank {
        Rank::from_str(s).unwrap()
    }

    #[test]
    fn middle_is_stable() {
        assert_eq!(Rank::middle(), Rank::between(None, None).unwrap());
        assert_eq!(Rank::between(None, None), Rank::between(None, None));
        assert_eq!(Rank::middle().as_str(), "V");
    }

    #[test]
    fn between_both_bounds() {
        let prev = rank("a0");
        let next = rank("a1");
        let mid = Rank::between(Some(&prev), Some(&next)).unwrap();
        assert!(prev < mid, "{prev} < {mid}");
        assert!(mid < next, "{mid} < {next}");
    }

    #[test]
    fn between_wide_gap_stays_short() {
        let prev = rank("B");
        let next = rank("x");
        let mid = Rank::between(Some(&prev), Some(&next)).unwrap();
        assert_eq!(mid.as_str().len(), 1);
        assert!(prev < mid && mid < next);
    }

    #[test]
    fn between_open_below() {
        let next = rank("V");
        let below = Rank::between(None, Some(&next)).unwrap();
        assert!(below < next);
    }

    #[test]
    fn between_open_above() {
        let prev = rank("V");
        let above = Rank::between(Some(&prev), None).unwrap();
        assert!(prev < above);
    }

    #[test]
    fn between_rejects_inverted_bounds() {
        let prev = rank("a1");
        let next = rank("a0");
        let err = Rank::between(Some(&prev), Some(&next)).unwrap_err();
        assert_eq!(err, RankError::InvalidOrder { prev, next });
    }

    #[test]
    fn between_rejects_equal_bounds() {
        let bound = rank("V");
        assert!(matches!(
            Rank::between(Some(&bound), Some(&bound)),
            Err(RankError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn between_exhausts_against_zero_tail() {
        // "0" admits nothing below it; the engine must fail instead of
        // looping.
        let next = rank("0");
        assert_eq!(Rank::between(None, Some(&next)), Err(RankError::Exhausted));
    }

    #[test]
    fn repeated_inserts_converge_without_collision() {
        let mut low = rank("A");
        let high = rank("B");
        for _ in 0..64 {
            let mid = Rank::between(Some(&low), Some(&high)).unwrap();
            assert!(low < mid && mid < high);
            low = mid;
        }
        assert!(low.as_str().len() <= MAX_RANK_LEN);
    }

    #[test]
    fn generated_keys_never_end_in_zero() {
        let mut prev = Rank::middle();
        for _ in 0..200 {
            let next = Rank::between(Some(&prev), None).unwrap();
            assert!(!next.as_str().ends_with('0'), "{next}");
            prev = next;
        }
    }

    #[test]
    fn initial_spread_is_ascending() {
        for count in [0, 1, 2, 10, 61, 62, 200] {
            let ranks = Rank::initial_spread(count);
            assert_eq!(ranks.len(), count);
            for pair in ranks.windows(2) {
                assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn initial_spread_leaves_room_at_both_ends() {
        let ranks = Rank::initial_spread(5);
        let first = ranks.first().unwrap();
        let last = ranks.last().unwrap();
        assert!(Rank::between(None, Some(first)).is_ok());
        assert!(Rank::between(Some(last), None).is_ok());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(Rank::from_str(""), Err(ParseRankError::Empty));
        assert_eq!(
            Rank::from_str("a!b"),
            Err(ParseRankError::InvalidByte { byte: b'!', at: 1 })
        );
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let key = rank("a0V");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"a0V\"");
        assert_eq!(serde_json::from_str::<Rank>(&json).unwrap(), key);
        assert!(serde_json::from_str::<Rank>("\"\"").is_err());
        assert!(serde_json::from_str::<Rank>("\"no spaces\"").is_err());
    }

    #[test]
    fn string_order_is_rank_order() {
        let mut keys = vec![rank("a0"), rank("V"), rank("a0V"), rank("09"), rank("z")];
        keys.sort();
        let texts: Vec<&str> = keys.iter().map(Rank::as_str).collect();
        assert_eq!(texts, vec!["09", "V", "a0", "a0V", "z"]);
    }
}
