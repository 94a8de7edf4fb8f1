use super::protocol::Rep3;
use super::share::{BShare, BitShare};
use crate::error::Error;
use crate::traits::network_trait::NetworkTrait;
use crate::types::{Data, SENTINEL};

impl<N: NetworkTrait> Rep3<N> {
    /// Masked local half of `a & b`. Has to be reshared before it is a valid
    /// share again.
    pub fn and_pre(&mut self, a: &BShare, b: &BShare) -> Result<Data, Error> {
        let rand = self.prf()?.gen_binary_zero_share();
        Ok(a.and_local(b) ^ rand)
    }

    pub async fn and(&mut self, a: BShare, b: BShare) -> Result<BShare, Error> {
        let res = self.and_many(&[a], &[b]).await?;
        res.first().copied().ok_or(Error::InvalidMessageSize)
    }

    pub async fn and_many(&mut self, a: &[BShare], b: &[BShare]) -> Result<Vec<BShare>, Error> {
        if a.len() != b.len() {
            return Err(Error::InvalidSizeError);
        }
        let mut shares_a = Vec::with_capacity(a.len());
        for (a_, b_) in a.iter().zip(b) {
            shares_a.push(self.and_pre(a_, b_)?);
        }

        // Network: reshare
        self.reshare_b(shares_a).await
    }

    pub async fn or_many(&mut self, a: &[BShare], b: &[BShare]) -> Result<Vec<BShare>, Error> {
        let y = self.and_many(a, b).await?;
        Ok(y.into_iter()
            .zip(a.iter().zip(b))
            .map(|(y, (a, b))| y ^ *a ^ *b)
            .collect())
    }

    pub fn xor_many(a: &[BShare], b: &[BShare]) -> Result<Vec<BShare>, Error> {
        if a.len() != b.len() {
            return Err(Error::InvalidSizeError);
        }
        Ok(a.iter().zip(b).map(|(a, b)| *a ^ *b).collect())
    }

    pub fn not_many(a: &[BShare]) -> Vec<BShare> {
        a.iter().map(|a| !*a).collect()
    }

    /// Local half of `bit ? on_true : on_false`, see [`Self::mux_b_many`].
    pub(crate) fn mux_b_pre(
        &mut self,
        bit: &BitShare,
        on_true: &BShare,
        on_false: &BShare,
    ) -> Result<Data, Error> {
        let diff = *on_true ^ *on_false;
        Ok(self.and_pre(&bit.expand_lsb(), &diff)? ^ on_false.a)
    }

    /// `bit ? on_true : on_false`, one round for the whole batch.
    pub async fn mux_b_many(
        &mut self,
        bits: &[BitShare],
        on_true: &[BShare],
        on_false: &[BShare],
    ) -> Result<Vec<BShare>, Error> {
        if bits.len() != on_true.len() || bits.len() != on_false.len() {
            return Err(Error::InvalidSizeError);
        }
        let mut local = Vec::with_capacity(bits.len());
        for ((b, t), f) in bits.iter().zip(on_true).zip(on_false) {
            local.push(self.mux_b_pre(b, t, f)?);
        }
        self.reshare_b(local).await
    }

    /// Replaces every value whose selection bit is 0 with the sentinel.
    /// `values` holds `width` consecutive values per selection bit.
    pub async fn mask_rows(
        &mut self,
        selected: &[BitShare],
        values: &[BShare],
        width: usize,
    ) -> Result<Vec<BShare>, Error> {
        if selected.len() * width != values.len() {
            return Err(Error::InvalidSizeError);
        }
        let sentinel = BShare::constant(SENTINEL);
        let mut local = Vec::with_capacity(values.len());
        for (row, sel) in values.chunks(width.max(1)).zip(selected) {
            for v in row {
                local.push(self.mux_b_pre(sel, v, &sentinel)?);
            }
        }
        self.reshare_b(local).await
    }

    /// ANDs each group of `width` consecutive bits into one bit with a
    /// balanced tree, log2(width) rounds for all groups together.
    pub async fn and_reduce_many(
        &mut self,
        mut bits: Vec<BitShare>,
        width: usize,
    ) -> Result<Vec<BitShare>, Error> {
        super::utils::check_power_of_two(width)?;
        if bits.len() % width != 0 {
            return Err(Error::InvalidSizeError);
        }
        let groups = bits.len() / width;
        let mut width = width;
        while width > 1 {
            let half = width / 2;
            let mut lo = Vec::with_capacity(groups * half);
            let mut hi = Vec::with_capacity(groups * half);
            for group in bits.chunks(width) {
                lo.extend_from_slice(&group[..half]);
                hi.extend_from_slice(&group[half..]);
            }
            bits = self.and_many(&lo, &hi).await?;
            width = half;
        }
        Ok(bits)
    }
}
