use super::network_trait::NetworkTrait;
use crate::rep3::id::PartyID;
use bytes::{Bytes, BytesMut};
use std::io::{Error as IOError, ErrorKind as IOErrorKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// In-memory ring of three parties, one unbounded channel per direction.
pub struct TestNetwork3p {
    p1_p2: (UnboundedSender<Bytes>, UnboundedReceiver<Bytes>),
    p1_p3: (UnboundedSender<Bytes>, UnboundedReceiver<Bytes>),
    p2_p3: (UnboundedSender<Bytes>, UnboundedReceiver<Bytes>),
    p2_p1: (UnboundedSender<Bytes>, UnboundedReceiver<Bytes>),
    p3_p1: (UnboundedSender<Bytes>, UnboundedReceiver<Bytes>),
    p3_p2: (UnboundedSender<Bytes>, UnboundedReceiver<Bytes>),
}

impl Default for TestNetwork3p {
    fn default() -> Self {
        Self::new()
    }
}

impl TestNetwork3p {
    pub fn new() -> Self {
        Self {
            p1_p2: mpsc::unbounded_channel(),
            p1_p3: mpsc::unbounded_channel(),
            p2_p3: mpsc::unbounded_channel(),
            p2_p1: mpsc::unbounded_channel(),
            p3_p1: mpsc::unbounded_channel(),
            p3_p2: mpsc::unbounded_channel(),
        }
    }

    pub fn get_party_networks(self) -> [PartyTestNetwork; 3] {
        let party1 = PartyTestNetwork {
            id: PartyID::ID0,
            send_prev: self.p1_p3.0,
            recv_prev: self.p3_p1.1,
            send_next: self.p1_p2.0,
            recv_next: self.p2_p1.1,
            stats: [0; 4],
            messages_sent: 0,
        };

        let party2 = PartyTestNetwork {
            id: PartyID::ID1,
            send_prev: self.p2_p1.0,
            recv_prev: self.p1_p2.1,
            send_next: self.p2_p3.0,
            recv_next: self.p3_p2.1,
            stats: [0; 4],
            messages_sent: 0,
        };

        let party3 = PartyTestNetwork {
            id: PartyID::ID2,
            send_prev: self.p3_p2.0,
            recv_prev: self.p2_p3.1,
            send_next: self.p3_p1.0,
            recv_next: self.p1_p3.1,
            stats: [0; 4],
            messages_sent: 0,
        };

        [party1, party2, party3]
    }
}

pub struct PartyTestNetwork {
    id: PartyID,
    send_prev: UnboundedSender<Bytes>,
    send_next: UnboundedSender<Bytes>,
    recv_prev: UnboundedReceiver<Bytes>,
    recv_next: UnboundedReceiver<Bytes>,
    stats: [usize; 4], // [sent_prev, sent_next, recv_prev, recv_next]
    messages_sent: usize,
}

impl PartyTestNetwork {
    pub const NUM_PARTIES: usize = 3;

    pub fn messages_sent(&self) -> usize {
        self.messages_sent
    }

    fn check_len(data: Bytes, len: usize) -> Result<BytesMut, IOError> {
        if data.len() != len {
            return Err(IOError::new(
                IOErrorKind::InvalidData,
                format!("expected {} bytes, got {}", len, data.len()),
            ));
        }
        Ok(BytesMut::from(data.as_ref()))
    }
}

impl NetworkTrait for PartyTestNetwork {
    async fn shutdown(self) -> Result<(), IOError> {
        Ok(())
    }

    fn print_connection_stats(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        writeln!(
            out,
            "Connection \"prev\" stats:\n\tSENT: {} bytes\n\tRECV: {} bytes",
            self.stats[0], self.stats[2]
        )?;
        writeln!(
            out,
            "Connection \"next\" stats:\n\tSENT: {} bytes\n\tRECV: {} bytes",
            self.stats[1], self.stats[3]
        )?;
        Ok(())
    }

    async fn send(&mut self, id: usize, data: Bytes) -> std::io::Result<()> {
        if id == usize::from(self.id.next_id()) {
            self.send_next_id(data).await
        } else if id == usize::from(self.id.prev_id()) {
            self.send_prev_id(data).await
        } else {
            Err(IOError::new(IOErrorKind::Other, "Invalid ID"))
        }
    }

    async fn receive(&mut self, id: usize, len: usize) -> std::io::Result<BytesMut> {
        if id == usize::from(self.id.prev_id()) {
            self.receive_prev_id(len).await
        } else if id == usize::from(self.id.next_id()) {
            self.receive_next_id(len).await
        } else {
            Err(IOError::new(IOErrorKind::Other, "Invalid ID"))
        }
    }

    fn get_id(&self) -> usize {
        self.id.into()
    }

    fn get_num_parties(&self) -> usize {
        Self::NUM_PARTIES
    }

    async fn send_next_id(&mut self, data: Bytes) -> Result<(), IOError> {
        tracing::trace!("send {}->{}: {} bytes", self.id, self.id.next_id(), data.len());
        self.stats[1] += data.len();
        self.messages_sent += 1;
        self.send_next
            .send(data)
            .map_err(|_| IOError::new(IOErrorKind::Other, "Send failed"))
    }

    async fn send_prev_id(&mut self, data: Bytes) -> Result<(), IOError> {
        tracing::trace!("send {}->{}: {} bytes", self.id, self.id.prev_id(), data.len());
        self.stats[0] += data.len();
        self.messages_sent += 1;
        self.send_prev
            .send(data)
            .map_err(|_| IOError::new(IOErrorKind::Other, "Send failed"))
    }

    async fn receive_prev_id(&mut self, len: usize) -> Result<BytesMut, IOError> {
        tracing::trace!("recv {}<-{}: ", self.id, self.id.prev_id());
        let buf = self
            .recv_prev
            .recv()
            .await
            .ok_or_else(|| IOError::new(IOErrorKind::Other, "Receive failed"))?;
        self.stats[2] += buf.len();

        tracing::trace!("recv {}<-{}: done", self.id, self.id.prev_id());
        Self::check_len(buf, len)
    }

    async fn receive_next_id(&mut self, len: usize) -> Result<BytesMut, IOError> {
        tracing::trace!("recv {}<-{}: ", self.id, self.id.next_id());
        let buf = self
            .recv_next
            .recv()
            .await
            .ok_or_else(|| IOError::new(IOErrorKind::Other, "Receive failed"))?;
        self.stats[3] += buf.len();

        tracing::trace!("recv {}<-{}: done", self.id, self.id.next_id());
        Self::check_len(buf, len)
    }
}
