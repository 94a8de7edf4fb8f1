use super::id::PartyID;
use crate::types::Data;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::ops::{
    Add, AddAssign, BitAnd, BitXor, BitXorAssign, Mul, Neg, Not, Shl, Shr, Sub, SubAssign,
};

// share x = x0 ^ x1 ^ x2 (or x0 + x1 + x2) where party i has (xi, x{i+1})

/// Boolean (XOR) replicated share of a 64-bit word.
#[derive(Clone, Copy, Debug, PartialEq, Default, Eq, Serialize, Deserialize)]
pub struct BShare {
    pub(crate) a: Data,
    pub(crate) b: Data,
}

/// A [`BShare`] whose value lives in the least significant bit.
pub type BitShare = BShare;

/// Arithmetic (mod 2^64) replicated share of a 64-bit word.
#[derive(Clone, Copy, Debug, PartialEq, Default, Eq, Serialize, Deserialize)]
pub struct AShare {
    pub(crate) a: Data,
    pub(crate) b: Data,
}

impl BShare {
    pub fn new(a: Data, b: Data) -> Self {
        BShare { a, b }
    }

    /// Sharing of a public value. Every party holds the value in both
    /// slots, the three copies XOR to the value since 3 is odd.
    pub fn constant(value: Data) -> Self {
        BShare { a: value, b: value }
    }

    pub fn get_a(&self) -> Data {
        self.a
    }

    pub fn get_b(&self) -> Data {
        self.b
    }

    pub fn get_ab(self) -> (Data, Data) {
        (self.a, self.b)
    }

    /// The local half of an AND gate, still to be masked and reshared.
    pub(crate) fn and_local(&self, other: &Self) -> Data {
        (self.a & other.a) ^ (self.a & other.b) ^ (self.b & other.a)
    }

    pub fn lsb(self) -> BitShare {
        self & 1
    }

    pub fn msb(self) -> BitShare {
        self >> (Data::BITS - 1)
    }

    /// Spreads the least significant bit over the whole word.
    pub fn expand_lsb(self) -> Self {
        BShare {
            a: (self.a & 1).wrapping_neg(),
            b: (self.b & 1).wrapping_neg(),
        }
    }
}

impl AShare {
    pub fn new(a: Data, b: Data) -> Self {
        AShare { a, b }
    }

    pub fn constant(value: Data, id: PartyID) -> Self {
        AShare::zero().add_const(value, id)
    }

    pub fn get_a(&self) -> Data {
        self.a
    }

    pub fn get_b(&self) -> Data {
        self.b
    }

    pub fn get_ab(self) -> (Data, Data) {
        (self.a, self.b)
    }

    /// The local half of a multiplication, still to be masked and reshared.
    pub(crate) fn mul_local(&self, other: &Self) -> Data {
        self.a
            .wrapping_mul(other.a)
            .wrapping_add(self.a.wrapping_mul(other.b))
            .wrapping_add(self.b.wrapping_mul(other.a))
    }

    pub(crate) fn add_const(mut self, other: Data, id: PartyID) -> Self {
        self.add_assign_const(other, id);
        self
    }

    // x0 is held by party 0 as `a` and by party 2 as `b`
    pub(crate) fn add_assign_const(&mut self, other: Data, id: PartyID) {
        match id {
            PartyID::ID0 => self.a = self.a.wrapping_add(other),
            PartyID::ID1 => {}
            PartyID::ID2 => self.b = self.b.wrapping_add(other),
        }
    }

    pub(crate) fn sub_const(self, other: Data, id: PartyID) -> Self {
        self.add_const(other.wrapping_neg(), id)
    }
}

impl BitXor for BShare {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        BShare {
            a: self.a ^ rhs.a,
            b: self.b ^ rhs.b,
        }
    }
}

impl BitXor<Data> for BShare {
    type Output = Self;

    fn bitxor(self, rhs: Data) -> Self::Output {
        BShare {
            a: self.a ^ rhs,
            b: self.b ^ rhs,
        }
    }
}

impl BitXorAssign for BShare {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.a ^= rhs.a;
        self.b ^= rhs.b;
    }
}

impl BitXorAssign<Data> for BShare {
    fn bitxor_assign(&mut self, rhs: Data) {
        self.a ^= rhs;
        self.b ^= rhs;
    }
}

/// AND with a public mask is local.
impl BitAnd<Data> for BShare {
    type Output = Self;

    fn bitand(self, rhs: Data) -> Self::Output {
        BShare {
            a: self.a & rhs,
            b: self.b & rhs,
        }
    }
}

impl Not for BShare {
    type Output = Self;

    fn not(self) -> Self::Output {
        BShare {
            a: !self.a,
            b: !self.b,
        }
    }
}

impl Shl<u32> for BShare {
    type Output = Self;

    fn shl(self, rhs: u32) -> Self::Output {
        BShare {
            a: self.a << rhs,
            b: self.b << rhs,
        }
    }
}

impl Shr<u32> for BShare {
    type Output = Self;

    fn shr(self, rhs: u32) -> Self::Output {
        BShare {
            a: self.a >> rhs,
            b: self.b >> rhs,
        }
    }
}

impl Add for AShare {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        AShare {
            a: self.a.wrapping_add(rhs.a),
            b: self.b.wrapping_add(rhs.b),
        }
    }
}

impl AddAssign for AShare {
    fn add_assign(&mut self, rhs: Self) {
        self.a = self.a.wrapping_add(rhs.a);
        self.b = self.b.wrapping_add(rhs.b);
    }
}

impl Sub for AShare {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        AShare {
            a: self.a.wrapping_sub(rhs.a),
            b: self.b.wrapping_sub(rhs.b),
        }
    }
}

impl SubAssign for AShare {
    fn sub_assign(&mut self, rhs: Self) {
        self.a = self.a.wrapping_sub(rhs.a);
        self.b = self.b.wrapping_sub(rhs.b);
    }
}

impl Neg for AShare {
    type Output = Self;

    fn neg(self) -> Self::Output {
        AShare {
            a: self.a.wrapping_neg(),
            b: self.b.wrapping_neg(),
        }
    }
}

impl Mul<Data> for AShare {
    type Output = Self;

    fn mul(self, rhs: Data) -> Self::Output {
        AShare {
            a: self.a.wrapping_mul(rhs),
            b: self.b.wrapping_mul(rhs),
        }
    }
}

impl Zero for AShare {
    fn zero() -> Self {
        AShare { a: 0, b: 0 }
    }

    fn is_zero(&self) -> bool {
        self.a == 0 && self.b == 0
    }
}

/// Splits `value` into the three boolean party views.
pub fn share_b<R: rand::Rng>(value: Data, rng: &mut R) -> [BShare; 3] {
    let x0 = rng.gen::<Data>();
    let x1 = rng.gen::<Data>();
    let x2 = value ^ x0 ^ x1;
    [
        BShare::new(x0, x1),
        BShare::new(x1, x2),
        BShare::new(x2, x0),
    ]
}

/// Splits `value` into the three arithmetic party views.
pub fn share_a<R: rand::Rng>(value: Data, rng: &mut R) -> [AShare; 3] {
    let x0 = rng.gen::<Data>();
    let x1 = rng.gen::<Data>();
    let x2 = value.wrapping_sub(x0).wrapping_sub(x1);
    [
        AShare::new(x0, x1),
        AShare::new(x1, x2),
        AShare::new(x2, x0),
    ]
}
