pub mod distinct;
pub mod group_by;
pub mod group_by_join;
pub mod join;
pub mod mask;
pub mod predicate;
pub mod select;
pub mod semi_join;
pub mod sort;
pub mod table;

use crate::error::Error;
use crate::rep3::protocol::Rep3;
use crate::traits::network_trait::NetworkTrait;

/// Oblivious relational operators on top of a [`Rep3`] engine.
///
/// Operators only ever open what the caller asks for; row positions and the
/// number of rounds depend on table sizes alone.
pub struct RelationalProtocol<N: NetworkTrait> {
    mpc: Rep3<N>,
}

impl<N: NetworkTrait> RelationalProtocol<N> {
    pub fn new(mpc: Rep3<N>) -> Self {
        RelationalProtocol { mpc }
    }

    pub fn get_id(&self) -> usize {
        self.mpc.get_id().into()
    }

    pub fn get_mpc_ref(&self) -> &Rep3<N> {
        &self.mpc
    }

    pub fn get_mpc_mut(&mut self) -> &mut Rep3<N> {
        &mut self.mpc
    }

    pub fn print_connection_stats(&self, out: &mut impl std::io::Write) -> Result<(), Error> {
        self.mpc.print_connection_stats(out)
    }

    pub async fn preprocessing(&mut self) -> Result<(), Error> {
        self.mpc.setup_prf().await
    }

    pub async fn finish(self) -> Result<(), Error> {
        self.mpc.finish().await
    }
}
