use super::table::BShareTable;
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::share::{AShare, BShare, BitShare};
use crate::traits::network_trait::NetworkTrait;
use crate::types::{Data, SENTINEL};

// Group-by operators scan a table sorted on the grouping keys. Aggregates
// travel forward to the last row of every group, which is the only row left
// unmasked. Masked rows carry the sentinel in every column and in the
// returned aggregate.

impl<N: NetworkTrait> RelationalProtocol<N> {
    /// Row `i` and row `i + 1` agree on all `keys`, for every adjacent pair.
    pub(crate) async fn same_group(
        &mut self,
        table: &BShareTable,
        keys: &[usize],
    ) -> Result<Vec<BitShare>, Error> {
        let n = table.num_rows().saturating_sub(1);
        if keys.is_empty() {
            return Err(Error::InvalidSizeError);
        }
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut x = Vec::with_capacity(n * keys.len());
        let mut y = Vec::with_capacity(n * keys.len());
        for key in keys {
            let column = table.column(*key)?;
            for w in column.windows(2) {
                x.push(w[0]);
                y.push(w[1]);
            }
        }
        let eq = self.mpc.eq_many(&x, &y).await?;

        let mut acc = eq[..n].to_vec();
        for k in 1..keys.len() {
            acc = self.mpc.and_many(&acc, &eq[k * n..(k + 1) * n]).await?;
        }
        Ok(acc)
    }

    fn masked_row_local(
        &mut self,
        table: &BShareTable,
        row: usize,
        keep: &BitShare,
    ) -> Result<Vec<Data>, Error> {
        let sentinel = BShare::constant(SENTINEL);
        let mut local = Vec::with_capacity(table.num_cols());
        for v in table.row(row)? {
            local.push(self.mpc.mux_b_pre(keep, v, &sentinel)?);
        }
        Ok(local)
    }

    // keep ? acc : SENTINEL is SENTINEL + keep * (acc - SENTINEL)
    fn masked_acc_local(&mut self, keep: &AShare, acc: &AShare) -> Result<Data, Error> {
        let diff = self.mpc.sub_const(*acc, SENTINEL);
        self.mpc.mul_pre(keep, &diff)
    }

    /// Counts the rows of every group, no selection. Returns one count per
    /// row, valid at the last row of each group.
    pub async fn group_by_count(
        &mut self,
        table: &mut BShareTable,
        keys: &[usize],
    ) -> Result<Vec<AShare>, Error> {
        let n = table.num_rows();
        if n == 0 {
            return Ok(Vec::new());
        }
        tracing::debug!("group by count over {} rows", n);
        let bs = self.same_group(table, keys).await?;
        let bs_a = self.mpc.b2a_bit_many(&bs).await?;

        let mut counts = vec![self.mpc.constant_a(1); n];
        for i in 0..n - 1 {
            let carried = self.mpc.mul(bs_a[i], counts[i]).await?;
            counts[i + 1] += carried;
        }

        let mut keep: Vec<BitShare> = bs.iter().map(|b| (*b ^ 1).lsb()).collect();
        keep.push(BShare::constant(1));
        self.mask(table, &keep, n).await?;

        let mut keep_a: Vec<AShare> = bs_a.iter().map(|b| self.mpc.const_sub(1, *b)).collect();
        keep_a.push(self.mpc.constant_a(1));
        let diff: Vec<AShare> = counts
            .iter()
            .map(|c| self.mpc.sub_const(*c, SENTINEL))
            .collect();
        let masked = self.mpc.mul_many(&keep_a, &diff).await?;
        Ok(masked
            .into_iter()
            .map(|c| self.mpc.add_const(c, SENTINEL))
            .collect())
    }

    /// Counts the selected rows of every group. Groups without a selected row
    /// are masked entirely.
    pub async fn group_by_count_selected(
        &mut self,
        table: &mut BShareTable,
        keys: &[usize],
        selected: &[BitShare],
    ) -> Result<Vec<AShare>, Error> {
        if selected.len() != table.num_rows() {
            return Err(Error::InvalidSizeError);
        }
        tracing::debug!("group by count over {} selected rows", selected.len());
        let init = self.mpc.b2a_bit_many(selected).await?;
        self.group_scan(table, keys, selected, init).await
    }

    /// Sums `values` over the selected rows of every group.
    pub async fn group_by_sum_selected(
        &mut self,
        table: &mut BShareTable,
        keys: &[usize],
        selected: &[BitShare],
        values: &[AShare],
    ) -> Result<Vec<AShare>, Error> {
        if selected.len() != table.num_rows() || values.len() != table.num_rows() {
            return Err(Error::InvalidSizeError);
        }
        tracing::debug!("group by sum over {} selected rows", selected.len());
        let sel_a = self.mpc.b2a_bit_many(selected).await?;
        let init = self.mpc.mul_many(&sel_a, values).await?;
        self.group_scan(table, keys, selected, init).await
    }

    async fn group_scan(
        &mut self,
        table: &mut BShareTable,
        keys: &[usize],
        selected: &[BitShare],
        mut acc: Vec<AShare>,
    ) -> Result<Vec<AShare>, Error> {
        let n = table.num_rows();
        if n == 0 {
            return Ok(acc);
        }
        let width = table.num_cols();
        let bs = self.same_group(table, keys).await?;
        let bs_a = self.mpc.b2a_bit_many(&bs).await?;
        let mut sel = selected.to_vec();
        // one keep bit per row is converted inside the scan
        self.mpc.ensure_rand_bits(n).await?;

        for i in 0..n - 1 {
            // keep row i iff it ends its group and the group has a selected row
            let t = self
                .mpc
                .and_many(&[sel[i], sel[i]], &[(bs[i] ^ 1).lsb(), bs[i]])
                .await?;
            let (keep, cond) = (t[0], t[1]);
            let keep_a = self.mpc.b2a_bit(keep).await?;

            let mut bin = self.masked_row_local(table, i, &keep)?;
            bin.push(self.mpc.and_pre(&sel[i + 1], &cond)?);
            let arith = vec![
                self.mpc.mul_pre(&bs_a[i], &acc[i])?,
                self.masked_acc_local(&keep_a, &acc[i])?,
            ];
            let (b, a) = self.mpc.reshare_mixed(bin, arith).await?;

            table.row_mut(i)?.copy_from_slice(&b[..width]);
            sel[i + 1] = sel[i + 1] ^ cond ^ b[width];
            acc[i + 1] += a[0];
            acc[i] = self.mpc.add_const(a[1], SENTINEL);
        }

        let last = n - 1;
        let keep_a = self.mpc.b2a_bit(sel[last]).await?;
        let bin = self.masked_row_local(table, last, &sel[last])?;
        let arith = vec![self.masked_acc_local(&keep_a, &acc[last])?];
        let (b, a) = self.mpc.reshare_mixed(bin, arith).await?;
        table.row_mut(last)?.copy_from_slice(&b);
        acc[last] = self.mpc.add_const(a[0], SENTINEL);
        Ok(acc)
    }

    /// Per group, the minimum of `min_col` and the maximum of `max_col` over
    /// the selected rows, written into the last row of the group.
    pub async fn group_by_min_max_selected(
        &mut self,
        table: &mut BShareTable,
        keys: &[usize],
        selected: &[BitShare],
        min_col: usize,
        max_col: usize,
    ) -> Result<(), Error> {
        let n = table.num_rows();
        if selected.len() != n {
            return Err(Error::InvalidSizeError);
        }
        table.check_column(min_col)?;
        table.check_column(max_col)?;
        if n == 0 {
            return Ok(());
        }
        tracing::debug!("group by min/max over {} selected rows", n);
        let width = table.num_cols();
        let bs = self.same_group(table, keys).await?;
        let mut sel = selected.to_vec();

        for i in 0..n - 1 {
            let min_i = table.get(i, min_col)?;
            let min_n = table.get(i + 1, min_col)?;
            let max_i = table.get(i, max_col)?;
            let max_n = table.get(i + 1, max_col)?;
            let g = self
                .mpc
                .greater_many(&[min_n, max_i], &[min_i, max_n])
                .await?;
            let (bmin, bmax) = (g[0], g[1]);

            let t = self
                .mpc
                .and_many(
                    &[sel[i], sel[i], sel[i + 1], sel[i + 1]],
                    &[bs[i], (bs[i] ^ 1).lsb(), (bmax ^ 1).lsb(), (bmin ^ 1).lsb()],
                )
                .await?;
            let (cond, keep, u1, u2) = (t[0], t[1], t[2], t[3]);

            // take the predecessor's value unless row i + 1 is selected and
            // already at least as good
            let mut local = vec![
                self.mpc.and_pre(&cond, &(u1 ^ 1).lsb())?,
                self.mpc.and_pre(&cond, &(u2 ^ 1).lsb())?,
                self.mpc.and_pre(&sel[i + 1], &cond)?,
            ];
            local.extend(self.masked_row_local(table, i, &keep)?);
            let b = self.mpc.reshare_b(local).await?;
            let (bu, bp) = (b[0], b[1]);
            sel[i + 1] = sel[i + 1] ^ cond ^ b[2];
            table.row_mut(i)?.copy_from_slice(&b[3..3 + width]);

            let m = self
                .mpc
                .mux_b_many(&[bu, bp], &[max_i, min_i], &[max_n, min_n])
                .await?;
            table.set(i + 1, max_col, m[0])?;
            table.set(i + 1, min_col, m[1])?;
        }

        let last = n - 1;
        let masked = self
            .mpc
            .mask_rows(&sel[last..], table.row(last)?, width)
            .await?;
        table.row_mut(last)?.copy_from_slice(&masked);
        Ok(())
    }
}
