use super::protocol::Rep3;
use super::share::BShare;
use crate::error::Error;
use crate::traits::network_trait::NetworkTrait;
use crate::types::{Data, DATA_BITS};

impl<N: NetworkTrait> Rep3<N> {
    /// Ripple-carry addition of boolean shared words, mod 2^64.
    ///
    /// Bit `j` produces its carry as `((x_j ^ c) & (y_j ^ c)) ^ c` with `c` the
    /// incoming carry, one AND round per bit and 63 rounds in total. All
    /// elements of the batch share these rounds.
    pub async fn rca_many(&mut self, x: &[BShare], y: &[BShare]) -> Result<Vec<BShare>, Error> {
        if x.len() != y.len() {
            return Err(Error::InvalidSizeError);
        }
        // bit j of `carry` is the carry out of bit j
        let mut carry = vec![BShare::default(); x.len()];
        let mut lhs = Vec::with_capacity(x.len());
        let mut rhs = Vec::with_capacity(x.len());

        for j in 0..DATA_BITS - 1 {
            let bit: Data = 1 << j;
            lhs.clear();
            rhs.clear();
            for ((x, y), c) in x.iter().zip(y).zip(&carry) {
                let c_in = (*c << 1) & bit;
                lhs.push((*x ^ c_in) & bit);
                rhs.push((*y ^ c_in) & bit);
            }
            let t = self.and_many(&lhs, &rhs).await?;
            for (c, t) in carry.iter_mut().zip(t) {
                let c_in = (*c << 1) & bit;
                *c ^= (t & bit) ^ c_in;
            }
        }

        Ok(x.iter()
            .zip(y)
            .zip(carry)
            .map(|((x, y), c)| *x ^ *y ^ (c << 1))
            .collect())
    }
}
