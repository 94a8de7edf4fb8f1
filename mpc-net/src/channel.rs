use bytes::{Bytes, BytesMut};
use futures::{Sink, SinkExt, StreamExt};
use std::{
    io::{self},
    pin::Pin,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::codecs::RawCodec;

pub type ReadChannel<T> = FramedRead<T, RawCodec>;
pub type WriteChannel<T> = FramedWrite<T, RawCodec>;
pub type BytesChannel<R, W> = Channel<R, W>;

/// Byte counters of a single connection, shared with the network handler.
#[derive(Debug, Default)]
pub struct ConnectionStats {
    sent: AtomicUsize,
    recv: AtomicUsize,
}

impl ConnectionStats {
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }

    pub fn recv(&self) -> usize {
        self.recv.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub struct Channel<
    R: AsyncReadExt + Send + 'static + std::marker::Unpin,
    W: AsyncWriteExt + Send + 'static + std::marker::Unpin,
> {
    read_conn: ReadChannel<R>,
    write_conn: WriteChannel<W>,
    stats: Arc<ConnectionStats>,
}

impl<
        R: AsyncReadExt + Send + 'static + std::marker::Unpin,
        W: AsyncWriteExt + Send + 'static + std::marker::Unpin,
    > Channel<R, W>
{
    /// Create a new [`Channel`], backed by a read and write half. Messages are
    /// written without any framing, see [`RawCodec`].
    pub fn new(read_half: R, write_half: W, stats: Arc<ConnectionStats>) -> Self {
        Channel {
            write_conn: FramedWrite::new(write_half, RawCodec::new()),
            read_conn: FramedRead::new(read_half, RawCodec::new()),
            stats,
        }
    }

    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    /// Waits until exactly `len` bytes have been received.
    pub async fn recv(&mut self, len: usize) -> Result<BytesMut, io::Error> {
        if len == 0 {
            return Ok(BytesMut::new());
        }
        self.read_conn.decoder_mut().expect(len);
        match self.read_conn.next().await {
            Some(Ok(frame)) => {
                self.stats.recv.fetch_add(frame.len(), Ordering::Relaxed);
                Ok(frame)
            }
            Some(Err(e)) => Err(e),
            None => Err(io::Error::new(
                io::ErrorKind::ConnectionAborted,
                "Receive on closed Channel",
            )),
        }
    }

    pub async fn close(self) -> Result<(), io::Error> {
        let Channel {
            mut read_conn,
            mut write_conn,
            ..
        } = self;
        write_conn.flush().await?;
        write_conn.close().await?;
        if let Some(x) = read_conn.next().await {
            match x {
                Ok(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        "Unexpected data on read channel when closing connections",
                    ));
                }
                Err(e) => {
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}

impl<
        R: AsyncReadExt + Send + 'static + std::marker::Unpin,
        W: AsyncWriteExt + Send + 'static + std::marker::Unpin,
    > Sink<Bytes> for Channel<R, W>
{
    type Error = io::Error;

    fn poll_ready(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.write_conn.poll_ready_unpin(cx)
    }

    fn start_send(mut self: Pin<&mut Self>, item: Bytes) -> Result<(), Self::Error> {
        self.stats.sent.fetch_add(item.len(), Ordering::Relaxed);
        self.write_conn.start_send_unpin(item)
    }

    fn poll_flush(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.write_conn.poll_flush_unpin(cx)
    }

    fn poll_close(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.write_conn.poll_close_unpin(cx)
    }
}
