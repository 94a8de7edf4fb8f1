/// A plaintext word. Signed values are stored in two's complement.
pub type Data = u64;

/// Value written into masked rows.
pub const SENTINEL: Data = Data::MAX;

pub const DATA_BITS: usize = Data::BITS as usize;
