pub use super::error::Error;
pub use super::relational::join::JoinOp;
pub use super::relational::predicate::{ArithPredicate, Predicate};
pub use super::relational::table::{AShareTable, BShareTable, ShareTable};
pub use super::relational::RelationalProtocol;
pub use super::rep3::id::PartyID;
pub use super::rep3::network::Rep3Network;
pub use super::rep3::protocol::Rep3;
pub use super::rep3::share::{AShare, BShare, BitShare};
pub use super::traits::network_trait::NetworkTrait;
pub use super::traits::test_network::{PartyTestNetwork, TestNetwork3p};
pub use super::types::{Data, SENTINEL};
