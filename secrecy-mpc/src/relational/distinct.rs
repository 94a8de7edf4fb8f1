use super::table::BShareTable;
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::share::{BShare, BitShare};
use crate::traits::network_trait::NetworkTrait;

impl<N: NetworkTrait> RelationalProtocol<N> {
    /// Distinct flags of a table sorted on `col`, all rows in one batch.
    pub async fn distinct(
        &mut self,
        table: &BShareTable,
        col: usize,
    ) -> Result<Vec<BitShare>, Error> {
        let batch = table.num_rows().max(1);
        self.distinct_batch(table, col, batch).await
    }

    /// Row `i` is distinct iff it differs from row `i - 1`, the first row
    /// always is. Comparisons run in windows of `batch`.
    pub async fn distinct_batch(
        &mut self,
        table: &BShareTable,
        col: usize,
        batch: usize,
    ) -> Result<Vec<BitShare>, Error> {
        if batch == 0 {
            return Err(Error::InvalidSizeError);
        }
        let values = table.column(col)?;
        self.distinct_flags(&values, batch).await
    }

    pub(crate) async fn distinct_flags(
        &mut self,
        values: &[BShare],
        batch: usize,
    ) -> Result<Vec<BitShare>, Error> {
        let mut res = Vec::with_capacity(values.len());
        if values.is_empty() {
            return Ok(res);
        }
        res.push(BShare::constant(1));
        for window in values.windows(2).collect::<Vec<_>>().chunks(batch) {
            let prev: Vec<BShare> = window.iter().map(|w| w[0]).collect();
            let cur: Vec<BShare> = window.iter().map(|w| w[1]).collect();
            let eq = self.mpc.eq_many(&prev, &cur).await?;
            res.extend(eq.into_iter().map(|b| b ^ 1));
        }
        Ok(res)
    }
}
