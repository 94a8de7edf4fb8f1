use crate::error::Error;
use crate::rep3::id::PartyID;
use crate::rep3::share::{AShare, BShare};
use serde::{Deserialize, Serialize};

pub type BShareTable = ShareTable<BShare>;
pub type AShareTable = ShareTable<AShare>;

/// Row-major table of shares, one share pair per logical column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareTable<S> {
    /// Party that contributed the plaintext.
    pub owner_id: usize,
    /// Party holding this table.
    pub holder_id: usize,
    pub relation_id: usize,
    num_rows: usize,
    num_cols: usize,
    contents: Vec<S>,
}

impl<S: Copy + Default> ShareTable<S> {
    pub fn new(
        owner_id: usize,
        holder: PartyID,
        relation_id: usize,
        num_rows: usize,
        num_cols: usize,
    ) -> Self {
        Self {
            owner_id,
            holder_id: holder.into(),
            relation_id,
            num_rows,
            num_cols,
            contents: vec![S::default(); num_rows * num_cols],
        }
    }

    pub fn from_rows(
        owner_id: usize,
        holder: PartyID,
        relation_id: usize,
        rows: Vec<Vec<S>>,
    ) -> Result<Self, Error> {
        let num_rows = rows.len();
        let num_cols = rows.first().map(Vec::len).unwrap_or_default();
        let mut contents = Vec::with_capacity(num_rows * num_cols);
        for row in rows {
            if row.len() != num_cols {
                return Err(Error::InvalidSizeError);
            }
            contents.extend(row);
        }
        Ok(Self {
            owner_id,
            holder_id: holder.into(),
            relation_id,
            num_rows,
            num_cols,
            contents,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn check_column(&self, col: usize) -> Result<(), Error> {
        if col >= self.num_cols {
            Err(Error::InvalidColumn(col))
        } else {
            Ok(())
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, Error> {
        self.check_column(col)?;
        if row >= self.num_rows {
            return Err(Error::InvalidSizeError);
        }
        Ok(row * self.num_cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<S, Error> {
        Ok(self.contents[self.index(row, col)?])
    }

    pub fn set(&mut self, row: usize, col: usize, value: S) -> Result<(), Error> {
        let idx = self.index(row, col)?;
        self.contents[idx] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<&[S], Error> {
        if row >= self.num_rows {
            return Err(Error::InvalidSizeError);
        }
        let start = row * self.num_cols;
        Ok(&self.contents[start..start + self.num_cols])
    }

    pub fn row_mut(&mut self, row: usize) -> Result<&mut [S], Error> {
        if row >= self.num_rows {
            return Err(Error::InvalidSizeError);
        }
        let start = row * self.num_cols;
        Ok(&mut self.contents[start..start + self.num_cols])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[S]> {
        self.contents.chunks(self.num_cols.max(1)).take(self.num_rows)
    }

    pub fn column(&self, col: usize) -> Result<Vec<S>, Error> {
        self.check_column(col)?;
        Ok(self.rows().map(|row| row[col]).collect())
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) -> Result<(), Error> {
        if i >= self.num_rows || j >= self.num_rows {
            return Err(Error::InvalidSizeError);
        }
        for col in 0..self.num_cols {
            self.contents
                .swap(i * self.num_cols + col, j * self.num_cols + col);
        }
        Ok(())
    }

    pub fn contents(&self) -> &[S] {
        &self.contents
    }

    pub(crate) fn contents_mut(&mut self) -> &mut [S] {
        &mut self.contents
    }

    pub fn into_contents(self) -> Vec<S> {
        self.contents
    }
}
