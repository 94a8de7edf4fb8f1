use super::protocol::Rep3;
use super::share::AShare;
use crate::error::Error;
use crate::traits::network_trait::NetworkTrait;
use crate::types::Data;

impl<N: NetworkTrait> Rep3<N> {
    /// Masked local half of `a * b`. Has to be reshared before it is a
    /// valid share again.
    pub fn mul_pre(&mut self, a: &AShare, b: &AShare) -> Result<Data, Error> {
        let rand = self.prf()?.gen_zero_share();
        Ok(a.mul_local(b).wrapping_add(rand))
    }

    pub async fn mul(&mut self, a: AShare, b: AShare) -> Result<AShare, Error> {
        let res = self.mul_many(&[a], &[b]).await?;
        res.first().copied().ok_or(Error::InvalidMessageSize)
    }

    pub async fn mul_many(&mut self, a: &[AShare], b: &[AShare]) -> Result<Vec<AShare>, Error> {
        if a.len() != b.len() {
            return Err(Error::InvalidSizeError);
        }
        let mut shares_a = Vec::with_capacity(a.len());
        for (a_, b_) in a.iter().zip(b) {
            shares_a.push(self.mul_pre(a_, b_)?);
        }

        // Network: reshare
        self.reshare_a(shares_a).await
    }

    /// `bit ? on_true : on_false` for an arithmetic 0/1 selector.
    pub async fn mux_a_many(
        &mut self,
        bits: &[AShare],
        on_true: &[AShare],
        on_false: &[AShare],
    ) -> Result<Vec<AShare>, Error> {
        if bits.len() != on_true.len() || bits.len() != on_false.len() {
            return Err(Error::InvalidSizeError);
        }
        let diff: Vec<AShare> = on_true
            .iter()
            .zip(on_false)
            .map(|(t, f)| *t - *f)
            .collect();
        let prod = self.mul_many(bits, &diff).await?;
        Ok(prod.into_iter().zip(on_false).map(|(p, f)| p + *f).collect())
    }
}
