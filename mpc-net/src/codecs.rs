use std::io;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// A codec for raw, unframed messages.
///
/// Nothing is prepended on the wire. The receiving side has to announce how
/// many bytes it is waiting for with [`RawCodec::expect`] before polling the
/// stream; the decoder then yields exactly one frame of that size.
#[derive(Default, Debug, Clone)]
pub struct RawCodec {
    decode_state: Option<usize>,
}

impl RawCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the next frame.
    pub fn expect(&mut self, len: usize) {
        self.decode_state = Some(len);
    }
}

impl Encoder<Bytes> for RawCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(&item);
        Ok(())
    }
}

impl Decoder for RawCodec {
    type Item = BytesMut;

    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let n = match self.decode_state {
            // nobody is waiting for data yet
            None => return Ok(None),
            Some(n) => n,
        };
        if src.len() < n {
            src.reserve(n - src.len());
            return Ok(None);
        }
        self.decode_state = None;
        Ok(Some(src.split_to(n)))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                if buf.is_empty() && self.decode_state.is_none() {
                    Ok(None)
                } else {
                    Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "stream closed in the middle of a message",
                    ))
                }
            }
        }
    }
}
