use super::protocol::Rep3;
use super::share::{BShare, BitShare};
use crate::error::Error;
use crate::traits::network_trait::NetworkTrait;
use crate::types::{Data, DATA_BITS};

const SIGN_BIT: Data = 1 << (DATA_BITS - 1);

impl<N: NetworkTrait> Rep3<N> {
    /// Bitwise equality reduced by a balanced AND tree, six rounds for the
    /// whole batch.
    pub async fn eq_many(&mut self, x: &[BShare], y: &[BShare]) -> Result<Vec<BitShare>, Error> {
        let mut z = Self::xor_many(x, y)?;
        for z in z.iter_mut() {
            *z = !*z;
        }
        let mut shift = DATA_BITS as u32 / 2;
        while shift > 0 {
            let hi: Vec<BShare> = z.iter().map(|z| *z >> shift).collect();
            z = self.and_many(&z, &hi).await?;
            shift /= 2;
        }
        Ok(z.into_iter().map(BShare::lsb).collect())
    }

    pub async fn eq_const_many(&mut self, x: &[BShare], c: Data) -> Result<Vec<BitShare>, Error> {
        let y = vec![BShare::constant(c); x.len()];
        self.eq_many(x, &y).await
    }

    /// Unsigned `(x > y, x == y)`.
    ///
    /// Every bit position starts as a block of its own with
    /// `g = x & !y` and `e = !(x ^ y)`. Each level merges neighbouring blocks,
    /// `g = g_hi ^ (e_hi & g_lo)` and `e = e_hi & e_lo`, with both ANDs
    /// of a level sent in one message. One round for the diagonal plus six
    /// levels, independent of the batch size.
    pub async fn compare_unsigned_many(
        &mut self,
        x: &[BShare],
        y: &[BShare],
    ) -> Result<(Vec<BitShare>, Vec<BitShare>), Error> {
        if x.len() != y.len() {
            return Err(Error::InvalidSizeError);
        }
        let n = x.len();
        let mut e: Vec<BShare> = x.iter().zip(y).map(|(x, y)| !(*x ^ *y)).collect();
        let not_y = Self::not_many(y);
        let mut g = self.and_many(x, &not_y).await?;

        let mut shift = 1;
        while (shift as usize) < DATA_BITS {
            let mut lhs = Vec::with_capacity(2 * n);
            let mut rhs = Vec::with_capacity(2 * n);
            for (g, e) in g.iter().zip(e.iter()) {
                let e_hi = *e >> shift;
                lhs.push(e_hi);
                rhs.push(*g);
                lhs.push(e_hi);
                rhs.push(*e);
            }
            let res = self.and_many(&lhs, &rhs).await?;
            for (i, pair) in res.chunks_exact(2).enumerate() {
                g[i] = (g[i] >> shift) ^ pair[0];
                e[i] = pair[1];
            }
            shift <<= 1;
        }

        Ok((
            g.into_iter().map(BShare::lsb).collect(),
            e.into_iter().map(BShare::lsb).collect(),
        ))
    }

    /// Signed `(x > y, x == y)` in seven rounds.
    pub async fn compare_many(
        &mut self,
        x: &[BShare],
        y: &[BShare],
    ) -> Result<(Vec<BitShare>, Vec<BitShare>), Error> {
        let x: Vec<BShare> = x.iter().map(|x| *x ^ SIGN_BIT).collect();
        let y: Vec<BShare> = y.iter().map(|y| *y ^ SIGN_BIT).collect();
        self.compare_unsigned_many(&x, &y).await
    }

    pub async fn greater_unsigned_many(
        &mut self,
        x: &[BShare],
        y: &[BShare],
    ) -> Result<Vec<BitShare>, Error> {
        Ok(self.compare_unsigned_many(x, y).await?.0)
    }

    /// Signed `x > y`.
    pub async fn greater_many(
        &mut self,
        x: &[BShare],
        y: &[BShare],
    ) -> Result<Vec<BitShare>, Error> {
        Ok(self.compare_many(x, y).await?.0)
    }

    /// Signed `x >= y`, computed as `!(y > x)`.
    pub async fn geq_many(&mut self, x: &[BShare], y: &[BShare]) -> Result<Vec<BitShare>, Error> {
        let lt = self.greater_many(y, x).await?;
        Ok(lt.into_iter().map(|b| b ^ 1).collect())
    }

    pub async fn greater_const_many(
        &mut self,
        x: &[BShare],
        c: Data,
    ) -> Result<Vec<BitShare>, Error> {
        let y = vec![BShare::constant(c); x.len()];
        self.greater_many(x, &y).await
    }

    /// Sign bit, local.
    pub fn ltz_many(x: &[BShare]) -> Vec<BitShare> {
        x.iter().map(|x| x.msb()).collect()
    }
}
