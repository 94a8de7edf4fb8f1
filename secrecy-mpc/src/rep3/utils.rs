use super::random::prf::PrfSeed;
use crate::{error::Error, traits::network_trait::NetworkTrait, types::Data};
use bytes::{Buf, BufMut, Bytes, BytesMut};

const WORD_BYTES: usize = std::mem::size_of::<Data>();

pub(crate) fn bytes_to_seed(mut bytes: BytesMut) -> Result<PrfSeed, Error> {
    if bytes.len() != 32 {
        Err(Error::Other(
            "cannot setup prf because wrong seed length from other party".to_owned(),
        ))
    } else {
        let mut their_seed: PrfSeed = [0; 32];
        bytes.copy_to_slice(&mut their_seed);
        Ok(their_seed)
    }
}

pub(crate) fn ceil_log2(x: usize) -> usize {
    let mut y = 0;
    let mut x = x.saturating_sub(1);
    while x > 0 {
        x >>= 1;
        y += 1;
    }
    y
}

pub(crate) fn check_power_of_two(x: usize) -> Result<(), Error> {
    if x.is_power_of_two() {
        Ok(())
    } else {
        Err(Error::NotPowerOfTwo(x))
    }
}

pub(crate) fn data_slice_to_bytes(values: &[Data]) -> Bytes {
    let mut out = BytesMut::with_capacity(WORD_BYTES * values.len());
    for v in values {
        out.put_u64_le(*v);
    }
    out.freeze()
}

pub(crate) fn data_vec_from_bytes(mut bytes: BytesMut, n: usize) -> Result<Vec<Data>, Error> {
    if bytes.remaining() != n * WORD_BYTES {
        return Err(Error::InvalidMessageSize);
    }
    let mut res = Vec::with_capacity(n);
    for _ in 0..n {
        res.push(bytes.get_u64_le());
    }
    Ok(res)
}

/// Sends to the predecessor and receives the same number of words from the
/// successor.
pub(crate) async fn send_prev_and_receive_next<N: NetworkTrait>(
    network: &mut N,
    values: &[Data],
) -> Result<Vec<Data>, Error> {
    let len = values.len();
    let response = network
        .send_prev_receive_next(data_slice_to_bytes(values), len * WORD_BYTES)
        .await?;
    data_vec_from_bytes(response, len)
}

/// Sends to the successor and receives the same number of words from the
/// predecessor.
pub(crate) async fn send_next_and_receive_prev<N: NetworkTrait>(
    network: &mut N,
    values: &[Data],
) -> Result<Vec<Data>, Error> {
    let len = values.len();
    let response = network
        .send_next_receive_prev(data_slice_to_bytes(values), len * WORD_BYTES)
        .await?;
    data_vec_from_bytes(response, len)
}

pub(crate) async fn send_vec<N: NetworkTrait>(
    network: &mut N,
    values: &[Data],
    id: usize,
) -> Result<(), Error> {
    Ok(network.send(id, data_slice_to_bytes(values)).await?)
}

pub(crate) async fn receive_vec<N: NetworkTrait>(
    network: &mut N,
    id: usize,
    len: usize,
) -> Result<Vec<Data>, Error> {
    let response = network.receive(id, len * WORD_BYTES).await?;
    data_vec_from_bytes(response, len)
}
