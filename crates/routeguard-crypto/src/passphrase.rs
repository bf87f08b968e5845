use rand::rngs::OsRng;
use rand::Rng;
use routeguard_types::{
    RouteGuardError, RouteGuardResult, DEFAULT_PASSPHRASE_WORDS, PASSPHRASE_SEPARATOR,
};
use std::fmt;
use zeroize::Zeroize;

pub const WORDLIST_SIZE: usize = 64;

pub const WORDLIST: [&str; WORDLIST_SIZE] = [
    "alpha", "bravo", "carbon", "delta", "echo", "foxtrot", "gamma", "harbor",
    "igloo", "juliet", "kilo", "lima", "metro", "north", "oscar", "papa",
    "quest", "romeo", "sierra", "tango", "ultra", "victor", "whiskey", "xray",
    "yankee", "zulu", "bridge", "canyon", "drift", "ember", "frost", "grove",
    "haven", "ivory", "jade", "karma", "lunar", "maple", "nexus", "oasis",
    "prism", "quartz", "ridge", "solar", "torch", "urban", "vault", "wander",
    "zenith", "atlas", "blaze", "coral", "dawn", "eagle", "flame", "glacier",
    "horizon", "island", "jungle", "knight", "legend", "mirage", "noble", "orbit",
];

/// Caller-held secret phrase. The text is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Passphrase {
    phrase: String,
}

impl Passphrase {
    /// Wraps an existing phrase exactly as typed; no normalization is applied,
    /// since the derived commitment depends on every byte.
    pub fn new(phrase: impl Into<String>) -> RouteGuardResult<Self> {
        let phrase = phrase.into();
        if phrase.is_empty() {
            return Err(RouteGuardError::InvalidInput("passphrase is empty".into()));
        }
        Ok(Self { phrase })
    }

    pub fn as_str(&self) -> &str {
        &self.phrase
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.phrase.as_bytes()
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split(PASSPHRASE_SEPARATOR).collect()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.phrase.split(PASSPHRASE_SEPARATOR).nth(index)
    }

    pub fn word_count(&self) -> usize {
        self.words().len()
    }

    /// Entropy if every word came from the generator's list.
    pub fn entropy_bits(&self) -> f64 {
        self.word_count() as f64 * (WORDLIST_SIZE as f64).log2()
    }

    /// True when every word is in the generator's list.
    pub fn is_generated_form(&self) -> bool {
        self.words().iter().all(|w| is_known_word(w))
    }
}

impl Drop for Passphrase {
    fn drop(&mut self) {
        self.phrase.zeroize();
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Passphrase(<{} words redacted>)", self.word_count())
    }
}

/// Draws `word_count` words uniformly from [`WORDLIST`] using the OS CSPRNG.
pub fn generate_passphrase(word_count: usize) -> RouteGuardResult<Passphrase> {
    if word_count == 0 {
        return Err(RouteGuardError::InvalidArgument(
            "word count must be at least 1".into(),
        ));
    }

    let mut rng = OsRng;
    let words: Vec<&str> = (0..word_count)
        .map(|_| WORDLIST[rng.gen_range(0..WORDLIST_SIZE)])
        .collect();

    Ok(Passphrase {
        phrase: words.join(&PASSPHRASE_SEPARATOR.to_string()),
    })
}

pub fn generate_default_passphrase() -> RouteGuardResult<Passphrase> {
    generate_passphrase(DEFAULT_PASSPHRASE_WORDS)
}

pub fn is_known_word(word: &str) -> bool {
    WORDLIST.contains(&word)
}

pub fn suggest_words(prefix: &str, max_suggestions: usize) -> Vec<&'static str> {
    WORDLIST
        .iter()
        .filter(|word| word.starts_with(prefix))
        .take(max_suggestions)
        .copied()
        .collect()
}
