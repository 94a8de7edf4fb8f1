use super::table::BShareTable;
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::share::{BShare, BitShare};
use crate::rep3::utils;
use crate::traits::network_trait::NetworkTrait;

impl<N: NetworkTrait> RelationalProtocol<N> {
    /// Membership bit per left row: does `left[i][left_col]` occur in
    /// `right[..][right_col]`. The right table needs a power of two rows.
    /// `batch` left rows are matched per window.
    pub async fn semi_join(
        &mut self,
        left: &BShareTable,
        right: &BShareTable,
        left_col: usize,
        right_col: usize,
        batch: usize,
    ) -> Result<Vec<BitShare>, Error> {
        self.semi_join_inner(left, right, left_col, right_col, None, batch)
            .await
    }

    /// Like [`Self::semi_join`], only right rows whose selection bit is set
    /// can match.
    pub async fn semi_join_selected(
        &mut self,
        left: &BShareTable,
        right: &BShareTable,
        left_col: usize,
        right_col: usize,
        right_selected: &[BitShare],
        batch: usize,
    ) -> Result<Vec<BitShare>, Error> {
        if right_selected.len() != right.num_rows() {
            return Err(Error::InvalidSizeError);
        }
        self.semi_join_inner(left, right, left_col, right_col, Some(right_selected), batch)
            .await
    }

    async fn semi_join_inner(
        &mut self,
        left: &BShareTable,
        right: &BShareTable,
        left_col: usize,
        right_col: usize,
        right_selected: Option<&[BitShare]>,
        batch: usize,
    ) -> Result<Vec<BitShare>, Error> {
        utils::check_power_of_two(right.num_rows())?;
        if batch == 0 {
            return Err(Error::InvalidSizeError);
        }
        let l = left.column(left_col)?;
        let r = right.column(right_col)?;
        tracing::debug!(
            "semi join {}x{} in windows of {} rows, {} reduction rounds each",
            l.len(),
            r.len(),
            batch,
            utils::ceil_log2(r.len())
        );

        let mut res = Vec::with_capacity(l.len());
        for window in l.chunks(batch) {
            let mut x = Vec::with_capacity(window.len() * r.len());
            let mut y = Vec::with_capacity(window.len() * r.len());
            for l in window {
                x.extend(std::iter::repeat(*l).take(r.len()));
                y.extend_from_slice(&r);
            }
            let mut eq = self.mpc.eq_many(&x, &y).await?;

            if let Some(sel) = right_selected {
                let sel: Vec<BShare> = sel.iter().cycle().take(eq.len()).copied().collect();
                eq = self.mpc.and_many(&eq, &sel).await?;
            }

            // OR over the right rows as a negated AND tree
            let not_eq = eq.into_iter().map(|b| (b ^ 1).lsb()).collect();
            let none = self.mpc.and_reduce_many(not_eq, r.len()).await?;
            res.extend(none.into_iter().map(|b| (b ^ 1).lsb()));
        }
        Ok(res)
    }
}
