use crate::rep3::share::BShare;
use crate::types::Data;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub type PrfSeed = [u8; 32];

/// Two correlated streams: `my_prf` is seeded locally and mirrored by the
/// successor, `prev_prf` is seeded by the predecessor.
pub struct Prf {
    my_prf: ChaCha12Rng,
    prev_prf: ChaCha12Rng,
}

impl Prf {
    pub fn new(my_seed: PrfSeed, prev_seed: PrfSeed) -> Self {
        Self {
            my_prf: ChaCha12Rng::from_seed(my_seed),
            prev_prf: ChaCha12Rng::from_seed(prev_seed),
        }
    }

    pub fn gen_seed() -> PrfSeed {
        let mut rng = ChaCha12Rng::from_entropy();
        rng.gen::<PrfSeed>()
    }

    pub(crate) fn gen_rands(&mut self) -> (Data, Data) {
        let a = self.my_prf.gen::<Data>();
        let b = self.prev_prf.gen::<Data>();
        (a, b)
    }

    /// The three parties' outputs sum to zero mod 2^64.
    pub(crate) fn gen_zero_share(&mut self) -> Data {
        let (a, b) = self.gen_rands();
        a.wrapping_sub(b)
    }

    /// The three parties' outputs XOR to zero.
    pub(crate) fn gen_binary_zero_share(&mut self) -> Data {
        let (a, b) = self.gen_rands();
        a ^ b
    }

    /// A replicated boolean sharing of a fresh random word, without
    /// communication.
    pub(crate) fn gen_binary_random_share(&mut self) -> BShare {
        let (mine, prev) = self.gen_rands();
        BShare::new(prev, mine)
    }
}
