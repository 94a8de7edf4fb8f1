use color_eyre::eyre::{ensure, Result};
use rand::Rng;
use rand::{rngs::SmallRng, SeedableRng};
use std::cmp::Ordering;

/// Plaintext value of one table cell.
pub type Value = u64;

/// Marker written into masked rows and aggregates.
pub const SENTINEL: Value = Value::MAX;

/// Row-major plaintext table, the cleartext counterpart of a share table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlainTable {
    num_cols: usize,
    rows: Vec<Vec<Value>>,
}

impl PlainTable {
    pub fn new(num_cols: usize) -> Self {
        Self {
            num_cols,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self> {
        let num_cols = rows.first().map(|r| r.len()).unwrap_or_default();
        ensure!(
            rows.iter().all(|r| r.len() == num_cols),
            "rows of different width, expected {} columns",
            num_cols
        );
        Ok(Self { num_cols, rows })
    }

    pub fn random(num_rows: usize, num_cols: usize, max: Value) -> Self {
        let mut rng = SmallRng::from_entropy();
        Self::random_rng(&mut rng, num_rows, num_cols, max)
    }

    /// Values drawn uniformly from `0..max`, so small domains give groups.
    pub fn random_rng<R: Rng>(rng: &mut R, num_rows: usize, num_cols: usize, max: Value) -> Self {
        let rows = (0..num_rows)
            .map(|_| (0..num_cols).map(|_| rng.gen_range(0..max)).collect())
            .collect();
        Self { num_cols, rows }
    }

    pub fn push(&mut self, row: Vec<Value>) {
        assert_eq!(row.len(), self.num_cols);
        self.rows.push(row);
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Value {
        self.rows[row][col]
    }

    pub fn column(&self, col: usize) -> Vec<Value> {
        self.rows.iter().map(|r| r[col]).collect()
    }

    /// Raw bytes of one row, in native byte order.
    pub fn row_bytes(&self, row: usize) -> &[u8] {
        bytemuck::cast_slice(&self.rows[row])
    }

    pub fn sort(&mut self, keys: &[usize], asc: &[bool]) {
        self.rows.sort_by(|x, y| compare_rows(x, y, keys, asc));
    }

    /// Overwrites every unselected row with the sentinel.
    pub fn mask(&mut self, selected: &[bool]) {
        for (row, sel) in self.rows.iter_mut().zip(selected) {
            if !sel {
                row.fill(SENTINEL);
            }
        }
    }
}

/// Values compare as two's complement signed integers.
pub fn compare_signed(x: Value, y: Value) -> Ordering {
    (x as i64).cmp(&(y as i64))
}

pub fn greater(x: Value, y: Value) -> bool {
    compare_signed(x, y) == Ordering::Greater
}

pub fn greater_equal(x: Value, y: Value) -> bool {
    compare_signed(x, y) != Ordering::Less
}

pub fn compare_rows(x: &[Value], y: &[Value], keys: &[usize], asc: &[bool]) -> Ordering {
    for (key, asc) in keys.iter().zip(asc) {
        let ord = compare_signed(x[*key], y[*key]);
        let ord = if *asc { ord } else { ord.reverse() };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// `left[i] == right[j]` for every pair, left-major.
pub fn join_eq(left: &[Value], right: &[Value]) -> Vec<bool> {
    left.iter()
        .flat_map(|l| right.iter().map(move |r| l == r))
        .collect()
}

pub fn semi_join(left: &[Value], right: &[Value]) -> Vec<bool> {
    left.iter().map(|l| right.contains(l)).collect()
}

pub fn distinct(column: &[Value]) -> Vec<bool> {
    column
        .iter()
        .enumerate()
        .map(|(i, v)| i == 0 || column[i - 1] != *v)
        .collect()
}

fn same_group(table: &PlainTable, keys: &[usize], i: usize) -> bool {
    keys.iter().all(|k| table.get(i, *k) == table.get(i + 1, *k))
}

// Runs `fold` over the selected rows of every group and keeps the last row
// of each group with a selected row. Everything else is masked.
fn group_fold<F>(table: &mut PlainTable, keys: &[usize], selected: &[bool], mut fold: F) -> Vec<Value>
where
    F: FnMut(usize, Option<Value>) -> Value,
{
    let n = table.num_rows();
    let mut res = vec![SENTINEL; n];
    let mut keep = vec![false; n];
    let mut acc: Option<Value> = None;
    for i in 0..n {
        if selected[i] {
            acc = Some(fold(i, acc));
        }
        if i + 1 == n || !same_group(table, keys, i) {
            if let Some(v) = acc {
                keep[i] = true;
                res[i] = v;
            }
            acc = None;
        }
    }
    table.mask(&keep);
    res
}

pub fn group_by_count_selected(table: &mut PlainTable, keys: &[usize], selected: &[bool]) -> Vec<Value> {
    group_fold(table, keys, selected, |_, acc| acc.unwrap_or(0) + 1)
}

pub fn group_by_count(table: &mut PlainTable, keys: &[usize]) -> Vec<Value> {
    let selected = vec![true; table.num_rows()];
    group_by_count_selected(table, keys, &selected)
}

pub fn group_by_sum_selected(
    table: &mut PlainTable,
    keys: &[usize],
    selected: &[bool],
    values: &[Value],
) -> Vec<Value> {
    group_fold(table, keys, selected, |i, acc| {
        acc.unwrap_or(0).wrapping_add(values[i])
    })
}

/// Writes the group minimum of `min_col` and maximum of `max_col` over the
/// selected rows into the representative row.
pub fn group_by_min_max_selected(
    table: &mut PlainTable,
    keys: &[usize],
    selected: &[bool],
    min_col: usize,
    max_col: usize,
) {
    let n = table.num_rows();
    let orig = table.clone();
    let mut best: Option<(Value, Value)> = None;
    for i in 0..n {
        if selected[i] {
            let (mi, ma) = (orig.get(i, min_col), orig.get(i, max_col));
            best = Some(match best {
                None => (mi, ma),
                Some((a, b)) => (
                    if greater(a, mi) { mi } else { a },
                    if greater(ma, b) { ma } else { b },
                ),
            });
        }
        if i + 1 == n || !same_group(&orig, keys, i) {
            if let Some((mi, ma)) = best {
                table.rows[i][min_col] = mi;
                table.rows[i][max_col] = ma;
            }
            best = None;
        }
    }
    group_fold(table, keys, selected, |_, _| 0);
}

/// Per left row the sum of right values with an equal join key, then summed
/// per group of `group`.
pub fn group_by_join(
    left: &mut PlainTable,
    group_col: usize,
    left_join_col: usize,
    right_keys: &[Value],
    right_values: &[Value],
) -> Vec<Value> {
    let n = left.num_rows();
    let selected = vec![true; n];
    let sums: Vec<Value> = (0..n)
        .map(|i| {
            let k = left.get(i, left_join_col);
            right_keys
                .iter()
                .zip(right_values)
                .filter(|(r, _)| **r == k)
                .fold(0, |acc: Value, (_, v)| acc.wrapping_add(*v))
        })
        .collect();
    group_by_sum_selected(left, &[group_col], &selected, &sums)
}
