use super::{
    AccountId, DOMAIN, MAX_ACCOUNT_ID_LEN,
    words::{ADJECTIVES, DIGITS, FILLERS, NOUNS, SUFFIXES},
};
use crate::{
    error::{Error, Result},
    rand::{RandSource, ThreadRandom},
    time::{SystemClock, TimeSource},
};

const fn longest(words: &[&str]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < words.len() {
        if words[i].len() > max {
            max = words[i].len();
        }
        i += 1;
    }
    max
}

const fn max(a: usize, b: usize) -> usize {
    if a > b { a } else { b }
}

const ADJECTIVE_LEN: usize = longest(&ADJECTIVES);
const NOUN_LEN: usize = longest(&NOUNS);
const SUFFIX_LEN: usize = longest(&SUFFIXES);

/// Longest tail any [`Pattern`] appends to the prefix.
pub const MAX_PATTERN_LEN: usize = max(
    max(ADJECTIVE_LEN + NOUN_LEN + SUFFIX_LEN, 2 * NOUN_LEN),
    max(2 * ADJECTIVE_LEN, max(NOUN_LEN, ADJECTIVE_LEN) + SUFFIX_LEN + 1),
);

/// Longest prefix for which every pattern still fits in
/// [`MAX_ACCOUNT_ID_LEN`] once `.near` is appended.
pub const MAX_PREFIX_LEN: usize = MAX_ACCOUNT_ID_LEN - MAX_PATTERN_LEN - DOMAIN.len() - 1;

/// Checks that `prefix` can seed generated ids.
///
/// # Errors
///
/// [`Error::InvalidConfig`] unless the prefix is 2 to [`MAX_PREFIX_LEN`]
/// characters of `a-z` and `0-9`.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if !(2..=MAX_PREFIX_LEN).contains(&prefix.len())
        || !prefix
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        return Err(Error::InvalidConfig {
            reason: format!(
                "prefix `{prefix}` must be 2 to {MAX_PREFIX_LEN} characters of a-z and 0-9"
            ),
        });
    }
    Ok(())
}

/// How a generated name is composed after the prefix.
///
/// Every pattern yields only `[a-z0-9]` characters and at most
/// [`MAX_PATTERN_LEN`] of them, so a prefix accepted by [`validate_prefix`]
/// always produces a valid account id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    AdjectiveNoun,
    NounAdjective,
    AdjectiveNounSuffix,
    NounDigits,
    AdjectiveDigits,
    NounNoun,
    AdjectiveAdjective,
    NounFillerDigit,
    AdjectiveFillerDigit,
    NounSuffixDigit,
    AdjectiveSuffixDigit,
    DigitsNoun,
    DigitsAdjective,
    FillerNounDigit,
    FillerAdjectiveDigit,
    /// The last four digits of the current millisecond timestamp.
    Timestamp,
}

impl Pattern {
    pub const ALL: [Self; 16] = [
        Self::AdjectiveNoun,
        Self::NounAdjective,
        Self::AdjectiveNounSuffix,
        Self::NounDigits,
        Self::AdjectiveDigits,
        Self::NounNoun,
        Self::AdjectiveAdjective,
        Self::NounFillerDigit,
        Self::AdjectiveFillerDigit,
        Self::NounSuffixDigit,
        Self::AdjectiveSuffixDigit,
        Self::DigitsNoun,
        Self::DigitsAdjective,
        Self::FillerNounDigit,
        Self::FillerAdjectiveDigit,
        Self::Timestamp,
    ];
}

/// Produces candidate account ids from a prefix.
///
/// Names are drawn uniformly from a fixed set of [`Pattern`]s and word lists.
/// Uniqueness is *not* guaranteed; callers probe each candidate and ask for
/// another on collision. The prefix is taken as given: check it with
/// [`validate_prefix`] first, as [`resolve`](crate::resolve()) does.
///
/// # Example
/// ```
/// use nearmint::IdentifierGenerator;
///
/// let generator: IdentifierGenerator = IdentifierGenerator::default();
/// let id = generator.generate("yl");
/// assert!(id.as_str().starts_with("yl"));
/// assert!(id.as_str().ends_with(".near"));
/// ```
#[derive(Clone, Debug)]
pub struct IdentifierGenerator<R = ThreadRandom, C = SystemClock> {
    rng: R,
    clock: C,
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new(ThreadRandom, SystemClock)
    }
}

impl<R, C> IdentifierGenerator<R, C>
where
    R: RandSource,
    C: TimeSource,
{
    pub const fn new(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// Generates one candidate using a randomly chosen pattern.
    pub fn generate(&self, prefix: &str) -> AccountId {
        let pattern = Pattern::ALL[self.rng.pick(Pattern::ALL.len())];
        self.compose(prefix, pattern)
    }

    /// Generates one candidate using the given pattern. Word choices are
    /// still random.
    pub fn compose(&self, prefix: &str, pattern: Pattern) -> AccountId {
        let mut name = String::with_capacity(prefix.len() + 24);
        name.push_str(prefix);

        match pattern {
            Pattern::AdjectiveNoun => {
                name.push_str(self.adjective());
                name.push_str(self.noun());
            }
            Pattern::NounAdjective => {
                name.push_str(self.noun());
                name.push_str(self.adjective());
            }
            Pattern::AdjectiveNounSuffix => {
                name.push_str(self.adjective());
                name.push_str(self.noun());
                name.push_str(self.suffix());
            }
            Pattern::NounDigits => {
                name.push_str(self.noun());
                self.push_digits(&mut name, 2);
            }
            Pattern::AdjectiveDigits => {
                name.push_str(self.adjective());
                self.push_digits(&mut name, 2);
            }
            Pattern::NounNoun => {
                name.push_str(self.noun());
                name.push_str(self.noun());
            }
            Pattern::AdjectiveAdjective => {
                name.push_str(self.adjective());
                name.push_str(self.adjective());
            }
            Pattern::NounFillerDigit => {
                name.push_str(self.noun());
                name.push(self.filler());
                self.push_digits(&mut name, 1);
            }
            Pattern::AdjectiveFillerDigit => {
                name.push_str(self.adjective());
                name.push(self.filler());
                self.push_digits(&mut name, 1);
            }
            Pattern::NounSuffixDigit => {
                name.push_str(self.noun());
                name.push_str(self.suffix());
                self.push_digits(&mut name, 1);
            }
            Pattern::AdjectiveSuffixDigit => {
                name.push_str(self.adjective());
                name.push_str(self.suffix());
                self.push_digits(&mut name, 1);
            }
            Pattern::DigitsNoun => {
                self.push_digits(&mut name, 2);
                name.push_str(self.noun());
            }
            Pattern::DigitsAdjective => {
                self.push_digits(&mut name, 2);
                name.push_str(self.adjective());
            }
            Pattern::FillerNounDigit => {
                name.push(self.filler());
                name.push_str(self.noun());
                self.push_digits(&mut name, 1);
            }
            Pattern::FillerAdjectiveDigit => {
                name.push(self.filler());
                name.push_str(self.adjective());
                self.push_digits(&mut name, 1);
            }
            Pattern::Timestamp => {
                let tail = self.clock.current_millis() % 10_000;
                name.push_str(&format!("{tail:04}"));
            }
        }

        name.push('.');
        name.push_str(DOMAIN);
        AccountId::from_generated(name)
    }

    fn adjective(&self) -> &'static str {
        ADJECTIVES[self.rng.pick(ADJECTIVES.len())]
    }

    fn noun(&self) -> &'static str {
        NOUNS[self.rng.pick(NOUNS.len())]
    }

    fn suffix(&self) -> &'static str {
        SUFFIXES[self.rng.pick(SUFFIXES.len())]
    }

    fn filler(&self) -> char {
        FILLERS[self.rng.pick(FILLERS.len())]
    }

    fn push_digits(&self, name: &mut String, n: usize) {
        for _ in 0..n {
            name.push(DIGITS[self.rng.pick(DIGITS.len())]);
        }
    }
}
