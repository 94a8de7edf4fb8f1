use super::predicate::{ArithPredicate, Predicate};
use super::table::{AShareTable, BShareTable};
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::protocol::Rep3;
use crate::rep3::share::{AShare, BShare, BitShare};
use crate::traits::network_trait::NetworkTrait;

impl<N: NetworkTrait> RelationalProtocol<N> {
    /// One selection bit per row, all rows in one batch.
    pub async fn select(
        &mut self,
        table: &BShareTable,
        predicate: &Predicate,
    ) -> Result<Vec<BitShare>, Error> {
        for col in predicate.columns() {
            table.check_column(col)?;
        }
        tracing::debug!("select {:?} on {} rows", predicate, table.num_rows());

        match *predicate {
            Predicate::Equal { left, right } => {
                let (x, y) = (table.column(left)?, table.column(right)?);
                self.mpc.eq_many(&x, &y).await
            }
            Predicate::Greater { left, right } => {
                let (x, y) = (table.column(left)?, table.column(right)?);
                self.mpc.greater_many(&x, &y).await
            }
            Predicate::GreaterEqual { left, right } => {
                let (x, y) = (table.column(left)?, table.column(right)?);
                self.mpc.geq_many(&x, &y).await
            }
            Predicate::GreaterConst { col, constant } => {
                let x = table.column(col)?;
                let y = vec![constant; x.len()];
                self.mpc.greater_many(&x, &y).await
            }
            Predicate::EqualConst { col, constant } => {
                let x = table.column(col)?;
                let y = vec![constant; x.len()];
                self.mpc.eq_many(&x, &y).await
            }
            Predicate::LessThanZero { col } => {
                let x = table.column(col)?;
                Ok(Rep3::<N>::ltz_many(&x))
            }
        }
    }

    /// Equality selection on arithmetic shares. The difference of both sides
    /// is converted to boolean and compared against zero, so the results are
    /// boolean selection bits like [`Self::select`] returns.
    pub async fn select_a(
        &mut self,
        table: &AShareTable,
        predicate: &ArithPredicate,
    ) -> Result<Vec<BitShare>, Error> {
        for col in predicate.columns() {
            table.check_column(col)?;
        }
        tracing::debug!("select {:?} on {} arithmetic rows", predicate, table.num_rows());

        let diff: Vec<AShare> = match *predicate {
            ArithPredicate::Equal { left, right } => table
                .column(left)?
                .into_iter()
                .zip(table.column(right)?)
                .map(|(x, y)| x - y)
                .collect(),
            ArithPredicate::EqualConst { col, constant } => table
                .column(col)?
                .into_iter()
                .map(|x| self.mpc.sub_const(x, constant))
                .collect(),
        };
        let diff = self.mpc.a2b_many(&diff).await?;
        self.mpc.eq_const_many(&diff, 0).await
    }

    /// Row-wise conjunction of two selection vectors.
    pub async fn and_columns(
        &mut self,
        a: &[BitShare],
        b: &[BitShare],
    ) -> Result<Vec<BitShare>, Error> {
        let res = self.mpc.and_many(a, b).await?;
        Ok(res.into_iter().map(BShare::lsb).collect())
    }
}
