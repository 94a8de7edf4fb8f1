pub(crate) mod adder;
pub(crate) mod arithmetic;
pub(crate) mod binary;
pub(crate) mod compare;
pub(crate) mod convert;
pub mod id;
pub mod network;
pub mod protocol;
pub mod random;
pub mod share;
pub(crate) mod utils;
