use crate::rep3::share::BShare;
use crate::types::Data;

/// Row predicate evaluated by [`select`](super::RelationalProtocol::select).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// `row[left] == row[right]`
    Equal { left: usize, right: usize },
    /// `row[left] > row[right]`, signed
    Greater { left: usize, right: usize },
    /// `row[left] >= row[right]`, signed
    GreaterEqual { left: usize, right: usize },
    /// `row[col] > constant`, signed
    GreaterConst { col: usize, constant: BShare },
    /// `row[col] == constant`
    EqualConst { col: usize, constant: BShare },
    /// `row[col] < 0`
    LessThanZero { col: usize },
}

impl Predicate {
    pub(crate) fn columns(&self) -> Vec<usize> {
        match *self {
            Predicate::Equal { left, right }
            | Predicate::Greater { left, right }
            | Predicate::GreaterEqual { left, right } => vec![left, right],
            Predicate::GreaterConst { col, .. }
            | Predicate::EqualConst { col, .. }
            | Predicate::LessThanZero { col } => vec![col],
        }
    }
}

/// Row predicate on an arithmetic table, evaluated by
/// [`select_a`](super::RelationalProtocol::select_a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithPredicate {
    /// `row[left] == row[right]`
    Equal { left: usize, right: usize },
    /// `row[col] == constant`
    EqualConst { col: usize, constant: Data },
}

impl ArithPredicate {
    pub(crate) fn columns(&self) -> Vec<usize> {
        match *self {
            ArithPredicate::Equal { left, right } => vec![left, right],
            ArithPredicate::EqualConst { col, .. } => vec![col],
        }
    }
}
