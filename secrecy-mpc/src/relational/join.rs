use super::table::BShareTable;
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::share::{BShare, BitShare};
use crate::traits::network_trait::NetworkTrait;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOp {
    Equal,
    Greater,
    GreaterEqual,
}

impl<N: NetworkTrait> RelationalProtocol<N> {
    async fn compare_op(
        &mut self,
        op: JoinOp,
        x: &[BShare],
        y: &[BShare],
    ) -> Result<Vec<BitShare>, Error> {
        match op {
            JoinOp::Equal => self.mpc.eq_many(x, y).await,
            JoinOp::Greater => self.mpc.greater_many(x, y).await,
            JoinOp::GreaterEqual => self.mpc.geq_many(x, y).await,
        }
    }

    /// Nested loop join: `left[i][left_col] op right[j][right_col]` for every
    /// pair, left-major. At most `batch` pairs are compared per call of the
    /// comparison circuit.
    pub async fn join_batch(
        &mut self,
        left: &BShareTable,
        right: &BShareTable,
        left_col: usize,
        right_col: usize,
        op: JoinOp,
        batch: usize,
    ) -> Result<Vec<BitShare>, Error> {
        if batch == 0 {
            return Err(Error::InvalidSizeError);
        }
        let l = left.column(left_col)?;
        let r = right.column(right_col)?;
        let total = l.len() * r.len();
        tracing::debug!("join {:?}: {} pairs in batches of {}", op, total, batch);

        let mut res = Vec::with_capacity(total);
        let mut x = Vec::with_capacity(batch.min(total));
        let mut y = Vec::with_capacity(batch.min(total));
        for start in (0..total).step_by(batch) {
            x.clear();
            y.clear();
            for p in start..(start + batch).min(total) {
                x.push(l[p / r.len()]);
                y.push(r[p % r.len()]);
            }
            res.extend(self.compare_op(op, &x, &y).await?);
        }
        Ok(res)
    }

    /// `row[k][col1] >= row[k + 1][col2]` for all adjacent rows, or with the
    /// operands swapped, `row[k + 1][col1] >= row[k][col2]`.
    pub async fn adjacent_geq(
        &mut self,
        table: &BShareTable,
        col1: usize,
        col2: usize,
        batch: usize,
        swap: bool,
    ) -> Result<Vec<BitShare>, Error> {
        let total = table.num_rows().saturating_sub(1);
        if batch == 0 || total == 0 {
            return Err(Error::InvalidSizeError);
        }
        let c1 = table.column(col1)?;
        let c2 = table.column(col2)?;
        let (first, second) = if swap { (1, 0) } else { (0, 1) };

        let mut res = Vec::with_capacity(total);
        for start in (0..total).step_by(batch) {
            let end = (start + batch).min(total);
            let x: Vec<BShare> = (start..end).map(|k| c1[k + first]).collect();
            let y: Vec<BShare> = (start..end).map(|k| c2[k + second]).collect();
            res.extend(self.mpc.geq_many(&x, &y).await?);
        }
        Ok(res)
    }
}
