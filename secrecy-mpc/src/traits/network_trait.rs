use bytes::{Bytes, BytesMut};
use std::io::Error;

/// Point-to-point transport of one party in the ring.
///
/// Messages are unframed, so every receive names the exact number of bytes
/// it waits for.
#[allow(async_fn_in_trait)]
pub trait NetworkTrait {
    fn get_id(&self) -> usize;
    fn get_num_parties(&self) -> usize;

    fn print_connection_stats(&self, out: &mut impl std::io::Write) -> Result<(), Error>;

    async fn shutdown(self) -> Result<(), Error>;

    async fn send(&mut self, id: usize, data: Bytes) -> Result<(), Error>;
    async fn send_next_id(&mut self, data: Bytes) -> Result<(), Error>;
    async fn send_prev_id(&mut self, data: Bytes) -> Result<(), Error>;

    async fn receive(&mut self, id: usize, len: usize) -> Result<BytesMut, Error>;
    async fn receive_prev_id(&mut self, len: usize) -> Result<BytesMut, Error>;
    async fn receive_next_id(&mut self, len: usize) -> Result<BytesMut, Error>;

    /// One round: send to the predecessor, receive from the successor.
    async fn send_prev_receive_next(&mut self, data: Bytes, len: usize) -> Result<BytesMut, Error> {
        self.send_prev_id(data).await?;
        self.receive_next_id(len).await
    }

    /// One round: send to the successor, receive from the predecessor.
    async fn send_next_receive_prev(&mut self, data: Bytes, len: usize) -> Result<BytesMut, Error> {
        self.send_next_id(data).await?;
        self.receive_prev_id(len).await
    }
}
