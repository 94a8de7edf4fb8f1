use super::table::BShareTable;
use super::RelationalProtocol;
use crate::error::Error;
use crate::rep3::share::{BShare, BitShare};
use crate::rep3::utils;
use crate::traits::network_trait::NetworkTrait;

impl<N: NetworkTrait> RelationalProtocol<N> {
    /// Sorts the table in place with a bitonic network.
    ///
    /// `keys` are compared lexicographically, key `k` ascending iff `asc[k]`.
    /// Every (phase, column) level runs its comparators in windows of
    /// `batch`, each window costs one comparison circuit, `keys.len() - 1`
    /// rounds to combine the keys and one multiplexer round. Table size and
    /// batch must be powers of two.
    pub async fn bitonic_sort(
        &mut self,
        table: &mut BShareTable,
        keys: &[usize],
        asc: &[bool],
        batch: usize,
    ) -> Result<(), Error> {
        let n = table.num_rows();
        utils::check_power_of_two(n)?;
        utils::check_power_of_two(batch)?;
        if keys.is_empty() || keys.len() != asc.len() {
            return Err(Error::InvalidSizeError);
        }
        for key in keys {
            table.check_column(*key)?;
        }
        let batch = batch.min((n / 2).max(1));
        let phases = n.trailing_zeros();

        for phase in 0..phases {
            for column in 0..=phase {
                let d = 1usize << (phase - column);
                tracing::debug!("bitonic sort: phase {} column {} distance {}", phase, column, d);
                let positions: Vec<usize> = (0..n).filter(|pos| pos & d == 0).collect();
                for window in positions.chunks(batch) {
                    self.compare_swap(table, keys, asc, window, d, phase).await?;
                }
            }
        }
        Ok(())
    }

    async fn compare_swap(
        &mut self,
        table: &mut BShareTable,
        keys: &[usize],
        asc: &[bool],
        positions: &[usize],
        d: usize,
        phase: u32,
    ) -> Result<(), Error> {
        // the larger element goes to the second slot in ascending boxes
        let pairs: Vec<(usize, usize)> = positions
            .iter()
            .map(|&pos| {
                let up = (pos >> (phase + 1)) & 1 == 0;
                if up {
                    (pos, pos | d)
                } else {
                    (pos | d, pos)
                }
            })
            .collect();

        let swap = self.comes_after(table, keys, asc, &pairs).await?;

        let width = table.num_cols();
        let mut lhs = Vec::with_capacity(pairs.len() * width);
        let mut rhs = Vec::with_capacity(pairs.len() * width);
        for ((first, second), s) in pairs.iter().zip(&swap) {
            let s = s.expand_lsb();
            for (x, y) in table.row(*first)?.iter().zip(table.row(*second)?) {
                lhs.push(s);
                rhs.push(*x ^ *y);
            }
        }
        let m = self.mpc.and_many(&lhs, &rhs).await?;

        for ((first, second), m) in pairs.iter().zip(m.chunks(width.max(1))) {
            for (x, m) in table.row_mut(*first)?.iter_mut().zip(m) {
                *x ^= *m;
            }
            for (y, m) in table.row_mut(*second)?.iter_mut().zip(m) {
                *y ^= *m;
            }
        }
        Ok(())
    }

    /// Whether row `first` sorts after row `second`, per pair.
    pub(crate) async fn comes_after(
        &mut self,
        table: &BShareTable,
        keys: &[usize],
        asc: &[bool],
        pairs: &[(usize, usize)],
    ) -> Result<Vec<BitShare>, Error> {
        let n = pairs.len();
        let mut x = Vec::with_capacity(n * keys.len());
        let mut y = Vec::with_capacity(n * keys.len());
        for (key, asc) in keys.iter().zip(asc) {
            for (first, second) in pairs {
                let a = table.get(*first, *key)?;
                let b = table.get(*second, *key)?;
                if *asc {
                    x.push(a);
                    y.push(b);
                } else {
                    x.push(b);
                    y.push(a);
                }
            }
        }
        let (g, e) = self.mpc.compare_many(&x, &y).await?;
        self.combine_keys(g, e, n).await
    }

    /// Folds per-key (greater, equal) bits laid out key-major into one
    /// lexicographic bit, starting from the least significant key.
    pub(crate) async fn combine_keys(
        &mut self,
        g: Vec<BitShare>,
        e: Vec<BitShare>,
        n: usize,
    ) -> Result<Vec<BitShare>, Error> {
        let num_keys = g.len() / n.max(1);
        if num_keys == 0 {
            return Ok(Vec::new());
        }
        let mut acc: Vec<BShare> = g[(num_keys - 1) * n..].to_vec();
        for k in (0..num_keys - 1).rev() {
            let t = self.mpc.and_many(&e[k * n..(k + 1) * n], &acc).await?;
            acc = g[k * n..(k + 1) * n]
                .iter()
                .zip(t)
                .map(|(g, t)| (*g ^ t).lsb())
                .collect();
        }
        Ok(acc)
    }
}
