use rand::{seq::SliceRandom, Rng};

/// The fixed set of sentences a session can ask for.
pub const SAMPLE_TEXTS: [&str; 4] = [
    "Learning never exhausts the mind.",
    "Code is like humor. When you have to explain it, it’s bad.",
    "The best way to predict the future is to invent it.",
    "Experience is the name everyone gives to their mistakes.",
];

/// Immutable list of candidate reference sentences
#[derive(Debug, Clone, Copy)]
pub struct Corpus {
    sentences: &'static [&'static str],
}

impl Corpus {
    pub fn new(sentences: &'static [&'static str]) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> &'static [&'static str] {
        self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Uniform draw with replacement. An empty corpus yields the empty string.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.sentences
            .choose(rng)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new(&SAMPLE_TEXTS)
    }
}
