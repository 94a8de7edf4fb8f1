use super::table::BShareTable;
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::share::BitShare;
use crate::traits::network_trait::NetworkTrait;

impl<N: NetworkTrait> RelationalProtocol<N> {
    /// Overwrites every row whose selection bit is 0 with the sentinel. Row
    /// order is kept. At most `batch` rows are multiplexed per round.
    pub async fn mask(
        &mut self,
        table: &mut BShareTable,
        selected: &[BitShare],
        batch: usize,
    ) -> Result<(), Error> {
        if selected.len() != table.num_rows() || batch == 0 {
            return Err(Error::InvalidSizeError);
        }
        let width = table.num_cols();
        if width == 0 {
            return Ok(());
        }
        tracing::debug!("mask {} rows in batches of {}", selected.len(), batch);
        for (rows, sel) in table
            .contents_mut()
            .chunks_mut(batch * width)
            .zip(selected.chunks(batch))
        {
            let masked = self.mpc.mask_rows(sel, rows, width).await?;
            rows.copy_from_slice(&masked);
        }
        Ok(())
    }
}
