use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the walk's single nondeterministic decision: which of the
/// usable actions to take.
pub trait ChoiceSource {
    /// Pick an index in `0..options`. `options` is never zero.
    fn choose(&mut self, options: usize) -> usize;

    /// Name of this source (for tracing).
    fn name(&self) -> &str;
}

/// Uniform choice driven by a ChaCha8 RNG. Seed it for reproducible walks.
pub struct PseudoRandomChoice {
    rng: ChaCha8Rng,
}

impl PseudoRandomChoice {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl ChoiceSource for PseudoRandomChoice {
    fn choose(&mut self, options: usize) -> usize {
        if options <= 1 {
            return 0;
        }
        self.rng.gen_range(0..options)
    }

    fn name(&self) -> &str {
        "pseudo_random"
    }
}

/// Replays a fixed list of picks, each reduced modulo the number of options.
/// Once exhausted it always picks the first option.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChoice {
    picks: VecDeque<usize>,
}

impl ScriptedChoice {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl ChoiceSource for ScriptedChoice {
    fn choose(&mut self, options: usize) -> usize {
        match self.picks.pop_front() {
            Some(pick) if options > 0 => pick % options,
            _ => 0,
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
