use super::table::BShareTable;
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::share::{AShare, BShare};
use crate::traits::network_trait::NetworkTrait;
use crate::types::SENTINEL;
use num_traits::Zero;

impl<N: NetworkTrait> RelationalProtocol<N> {
    /// Fused equi-join and group-by sum.
    ///
    /// For every left row the right values whose `right_join_col` equals the
    /// row's `left_join_col` are added up, then the partial sums are summed
    /// per group of `group_col` (left sorted on it). The last row of each
    /// group keeps the group total, all other left rows and sums are masked.
    /// `batch` left rows are joined per window.
    #[allow(clippy::too_many_arguments)]
    pub async fn group_by_join(
        &mut self,
        left: &mut BShareTable,
        right: &BShareTable,
        group_col: usize,
        left_join_col: usize,
        right_join_col: usize,
        right_values: &[AShare],
        batch: usize,
    ) -> Result<Vec<AShare>, Error> {
        let n = left.num_rows();
        let m = right.num_rows();
        if batch == 0 || right_values.len() != m {
            return Err(Error::InvalidSizeError);
        }
        left.check_column(group_col)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        let l = left.column(left_join_col)?;
        let r = right.column(right_join_col)?;
        tracing::debug!("group by join {}x{} in windows of {} rows", n, m, batch);

        let mut sums = Vec::with_capacity(n);
        for window in l.chunks(batch) {
            let mut x = Vec::with_capacity(window.len() * m);
            let mut y = Vec::with_capacity(window.len() * m);
            for l in window {
                x.extend(std::iter::repeat(*l).take(m));
                y.extend_from_slice(&r);
            }
            let eq = self.mpc.eq_many(&x, &y).await?;
            let eq_a = self.mpc.b2a_bit_many(&eq).await?;
            let values: Vec<AShare> = right_values
                .iter()
                .cycle()
                .take(eq_a.len())
                .copied()
                .collect();
            let prod = self.mpc.mul_many(&eq_a, &values).await?;
            if m == 0 {
                sums.extend(std::iter::repeat(AShare::zero()).take(window.len()));
            } else {
                sums.extend(
                    prod.chunks(m)
                        .map(|c| c.iter().fold(AShare::zero(), |acc, v| acc + *v)),
                );
            }
        }

        let group = left.column(group_col)?;
        let first = self.distinct_flags(&group, batch).await?;
        let first_a = self.mpc.b2a_bit_many(&first).await?;

        // res[i] = sum[i] + (1 - first[i]) * res[i - 1]
        for i in 1..n {
            let same = self.mpc.const_sub(1, first_a[i]);
            let carried = self.mpc.mul(same, sums[i - 1]).await?;
            sums[i] += carried;
        }

        // row i - 1 is the last of its group iff row i starts a new one
        let mut keep: Vec<BShare> = first[1..].to_vec();
        keep.push(BShare::constant(1));
        self.mask(left, &keep, batch).await?;

        let mut keep_a: Vec<AShare> = first_a[1..].to_vec();
        keep_a.push(self.mpc.constant_a(1));
        let diff: Vec<AShare> = sums
            .iter()
            .map(|s| self.mpc.sub_const(*s, SENTINEL))
            .collect();
        let masked = self.mpc.mul_many(&keep_a, &diff).await?;
        Ok(masked
            .into_iter()
            .map(|s| self.mpc.add_const(s, SENTINEL))
            .collect())
    }
}
