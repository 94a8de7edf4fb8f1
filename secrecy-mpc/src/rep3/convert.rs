use super::protocol::Rep3;
use super::share::{AShare, BShare, BitShare};
use crate::error::Error;
use crate::traits::network_trait::NetworkTrait;

impl<N: NetworkTrait> Rep3<N> {
    // Piece `j` is the sub-share x_j alone, as a valid sharing: party i
    // holds (x_i if i == j, x_{i+1} if i + 1 == j).
    fn split_pieces(&self, a: u64, b: u64) -> [(u64, u64); 3] {
        let mut pieces = [(0, 0); 3];
        let me = usize::from(self.id);
        let next = usize::from(self.id.next_id());
        pieces[me].0 = a;
        pieces[next].1 = b;
        pieces
    }

    /// Boolean/arithmetic sharings of `n` random bits, two multiplication
    /// rounds and no dealer.
    pub async fn rand_bits(&mut self, n: usize) -> Result<Vec<(AShare, BitShare)>, Error> {
        let mut rb = Vec::with_capacity(n);
        for _ in 0..n {
            rb.push(self.prf()?.gen_binary_random_share().lsb());
        }

        // lift the three boolean sub-bits into arithmetic sharings
        let mut pieces: [Vec<AShare>; 3] = Default::default();
        for r in rb.iter() {
            let split = self.split_pieces(r.a, r.b);
            for (piece, (a, b)) in pieces.iter_mut().zip(split) {
                piece.push(AShare::new(a, b));
            }
        }
        let [p0, p1, p2] = pieces;

        // a ^ b = a + b - 2ab on bits
        let t = self.arithmetic_xor_many(&p0, &p1).await?;
        let ra = self.arithmetic_xor_many(&t, &p2).await?;
        Ok(ra.into_iter().zip(rb).collect())
    }

    async fn arithmetic_xor_many(
        &mut self,
        a: &[AShare],
        b: &[AShare],
    ) -> Result<Vec<AShare>, Error> {
        let ab = self.mul_many(a, b).await?;
        Ok(a.iter()
            .zip(b)
            .zip(ab)
            .map(|((a, b), ab)| *a + *b - ab * 2)
            .collect())
    }

    /// Fills the pool of random bits consumed by [`Self::b2a_bit_many`].
    pub async fn preprocess_rand_bits(&mut self, n: usize) -> Result<(), Error> {
        let mut bits = self.rand_bits(n).await?;
        self.rand_bits.append(&mut bits);
        Ok(())
    }

    /// Tops the pool up to at least `n` random bits in one generation.
    pub async fn ensure_rand_bits(&mut self, n: usize) -> Result<(), Error> {
        if self.rand_bits.len() < n {
            let missing = n - self.rand_bits.len();
            self.preprocess_rand_bits(missing).await?;
        }
        Ok(())
    }

    async fn take_rand_bits(&mut self, n: usize) -> Result<Vec<(AShare, BitShare)>, Error> {
        self.ensure_rand_bits(n).await?;
        let rest = self.rand_bits.len() - n;
        Ok(self.rand_bits.split_off(rest))
    }

    /// Converts single-bit boolean shares into arithmetic 0/1 shares.
    ///
    /// `bit ^ r` is opened for a random bit `r` known in both sharings, then
    /// each result is `r + z - 2rz`, one round if the pool is filled.
    pub async fn b2a_bit_many(&mut self, bits: &[BitShare]) -> Result<Vec<AShare>, Error> {
        let rand = self.take_rand_bits(bits.len()).await?;
        let masked: Vec<BShare> = bits
            .iter()
            .zip(rand.iter())
            .map(|(b, (_, rb))| (*b ^ *rb).lsb())
            .collect();
        let z = self.open_b_many(masked).await?;
        Ok(z.into_iter()
            .zip(rand)
            .map(|(z, (ra, _))| if z == 1 { self.const_sub(1, ra) } else { ra })
            .collect())
    }

    pub async fn b2a_bit(&mut self, bit: BitShare) -> Result<AShare, Error> {
        let res = self.b2a_bit_many(&[bit]).await?;
        res.first().copied().ok_or(Error::InvalidMessageSize)
    }

    /// Arithmetic to boolean conversion: the three sub-shares are added with
    /// one full-adder round followed by a ripple-carry addition.
    pub async fn a2b_many(&mut self, x: &[AShare]) -> Result<Vec<BShare>, Error> {
        let n = x.len();
        let mut p: [Vec<BShare>; 3] = Default::default();
        for x in x {
            let split = self.split_pieces(x.a, x.b);
            for (piece, (a, b)) in p.iter_mut().zip(split) {
                piece.push(BShare::new(a, b));
            }
        }
        let [p1, p2, p3] = p;

        // Full Adder
        let mut lhs = Vec::with_capacity(n);
        let mut rhs = Vec::with_capacity(n);
        let mut sum = Vec::with_capacity(n);
        for ((p1, p2), p3) in p1.iter().zip(&p2).zip(&p3) {
            sum.push(*p1 ^ *p2 ^ *p3);
            lhs.push(*p1 ^ *p3);
            rhs.push(*p2 ^ *p3);
        }
        let c = self.and_many(&lhs, &rhs).await?;
        let carry: Vec<BShare> = c
            .into_iter()
            .zip(&p3)
            .map(|(c, p3)| (c ^ *p3) << 1)
            .collect();

        self.rca_many(&sum, &carry).await
    }
}
