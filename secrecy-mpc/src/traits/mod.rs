pub mod network_trait;
pub mod test_network;
