use super::id::PartyID;
use crate::error::Error;
use crate::traits::network_trait::NetworkTrait;
use bytes::{Bytes, BytesMut};
use futures::{Future, SinkExt};
use mpc_net::channel::BytesChannel;
use mpc_net::config::NetworkConfig;
use mpc_net::MpcNetworkHandler;
use std::io;
use std::time::Duration;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

type TcpChannel = BytesChannel<OwnedReadHalf, OwnedWriteHalf>;

/// TCP transport of one party, connected to both ring neighbours.
pub struct Rep3Network {
    handler: MpcNetworkHandler,
    id: PartyID,
    channel_next: TcpChannel,
    channel_prev: TcpChannel,
    timeout: Option<Duration>,
}

impl Rep3Network {
    pub async fn new(config: NetworkConfig) -> Result<Self, Error> {
        let id = PartyID::try_from(config.my_id)?;
        if config.parties.len() != 3 {
            return Err(Error::NumPartyError(config.parties.len()));
        }
        let timeout = config.timeout;

        let mut handler = MpcNetworkHandler::establish(config).await?;
        let mut channels = handler.get_byte_channels()?;

        let next_id: usize = id.next_id().into();
        let prev_id: usize = id.prev_id().into();

        let channel_next = channels.remove(&next_id).ok_or(Error::ConfigError)?;
        let channel_prev = channels.remove(&prev_id).ok_or(Error::ConfigError)?;

        Ok(Self {
            handler,
            id,
            channel_next,
            channel_prev,
            timeout,
        })
    }
}

async fn with_timeout<T>(
    timeout: Option<Duration>,
    fut: impl Future<Output = io::Result<T>>,
) -> io::Result<T> {
    match timeout {
        Some(t) => tokio::time::timeout(t, fut).await.map_err(|_| {
            io::Error::new(io::ErrorKind::TimedOut, "peer did not answer in time")
        })?,
        None => fut.await,
    }
}

impl NetworkTrait for Rep3Network {
    fn get_id(&self) -> usize {
        self.id.into()
    }

    fn get_num_parties(&self) -> usize {
        3
    }

    fn print_connection_stats(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        self.handler.print_connection_stats(out)
    }

    async fn send(&mut self, id: usize, data: Bytes) -> io::Result<()> {
        if id == usize::from(self.id.next_id()) {
            self.send_next_id(data).await
        } else if id == usize::from(self.id.prev_id()) {
            self.send_prev_id(data).await
        } else {
            Err(io::Error::new(io::ErrorKind::Other, "Invalid ID"))
        }
    }

    async fn send_next_id(&mut self, data: Bytes) -> io::Result<()> {
        tracing::trace!("send {}->{}: {} bytes", self.id, self.id.next_id(), data.len());
        let res = self.channel_next.send(data).await;
        tracing::trace!("send {}->{}: done", self.id, self.id.next_id());
        res
    }

    async fn send_prev_id(&mut self, data: Bytes) -> io::Result<()> {
        tracing::trace!("send {}->{}: {} bytes", self.id, self.id.prev_id(), data.len());
        let res = self.channel_prev.send(data).await;
        tracing::trace!("send {}->{}: done", self.id, self.id.prev_id());
        res
    }

    async fn receive(&mut self, id: usize, len: usize) -> io::Result<BytesMut> {
        if id == usize::from(self.id.prev_id()) {
            self.receive_prev_id(len).await
        } else if id == usize::from(self.id.next_id()) {
            self.receive_next_id(len).await
        } else {
            Err(io::Error::new(io::ErrorKind::Other, "Invalid ID"))
        }
    }

    async fn receive_prev_id(&mut self, len: usize) -> io::Result<BytesMut> {
        tracing::trace!("recv {}<-{}: ", self.id, self.id.prev_id());
        let buf = with_timeout(self.timeout, self.channel_prev.recv(len)).await;
        tracing::trace!("recv {}<-{}: done", self.id, self.id.prev_id());
        buf
    }

    async fn receive_next_id(&mut self, len: usize) -> io::Result<BytesMut> {
        tracing::trace!("recv {}<-{}: ", self.id, self.id.next_id());
        let buf = with_timeout(self.timeout, self.channel_next.recv(len)).await;
        tracing::trace!("recv {}<-{}: done", self.id, self.id.next_id());
        buf
    }

    // Both directions of a round are driven at once, a large batch would
    // otherwise fill the socket buffers all around the ring.
    async fn send_prev_receive_next(&mut self, data: Bytes, len: usize) -> io::Result<BytesMut> {
        tracing::trace!(
            "exchange {}->{} / {}<-{}: {} bytes",
            self.id,
            self.id.prev_id(),
            self.id,
            self.id.next_id(),
            data.len()
        );
        let timeout = self.timeout;
        let send = self.channel_prev.send(data);
        let recv = with_timeout(timeout, self.channel_next.recv(len));
        let ((), buf) = tokio::try_join!(send, recv)?;
        Ok(buf)
    }

    async fn send_next_receive_prev(&mut self, data: Bytes, len: usize) -> io::Result<BytesMut> {
        tracing::trace!(
            "exchange {}->{} / {}<-{}: {} bytes",
            self.id,
            self.id.next_id(),
            self.id,
            self.id.prev_id(),
            data.len()
        );
        let timeout = self.timeout;
        let send = self.channel_next.send(data);
        let recv = with_timeout(timeout, self.channel_prev.recv(len));
        let ((), buf) = tokio::try_join!(send, recv)?;
        Ok(buf)
    }

    async fn shutdown(self) -> io::Result<()> {
        let Rep3Network {
            channel_next,
            channel_prev,
            timeout,
            ..
        } = self;
        // each side closes its write half and waits for the peer to do the same
        let (a, b) = tokio::join!(
            with_timeout(timeout, channel_next.close()),
            with_timeout(timeout, channel_prev.close())
        );
        a?;
        b
    }
}
