use super::id::PartyID;
use super::random::prf::{Prf, PrfSeed};
use super::share::{self, AShare, BShare, BitShare};
use super::utils;
use crate::error::Error;
use crate::traits::network_trait::NetworkTrait;
use crate::types::Data;
use bytes::Bytes;
use rand::Rng;

/// Semi-honest replicated secret sharing engine of one party.
///
/// Owns the transport and the correlated randomness. All three parties have
/// to call the same methods in the same order.
pub struct Rep3<N: NetworkTrait> {
    pub(crate) network: N,
    pub(crate) prf: Option<Prf>,
    pub(crate) id: PartyID,
    /// Pregenerated (arithmetic, boolean) sharings of random bits.
    pub(crate) rand_bits: Vec<(AShare, BitShare)>,
}

impl<N: NetworkTrait> Rep3<N> {
    pub fn new(network: N) -> Result<Self, Error> {
        if network.get_num_parties() != 3 {
            return Err(Error::NumPartyError(network.get_num_parties()));
        }
        let id = PartyID::try_from(network.get_id())?;
        Ok(Self {
            network,
            prf: None,
            id,
            rand_bits: Vec::new(),
        })
    }

    pub fn get_id(&self) -> PartyID {
        self.id
    }

    pub fn get_network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    pub async fn setup_prf(&mut self) -> Result<(), Error> {
        let seed = Prf::gen_seed();
        self.setup_prf_from_seed(seed).await
    }

    /// Sends `seed` to the successor and seeds the second stream with the
    /// predecessor's seed.
    pub async fn setup_prf_from_seed(&mut self, seed: PrfSeed) -> Result<(), Error> {
        let data = Bytes::from_iter(seed);
        let response = self
            .network
            .send_next_receive_prev(data, seed.len())
            .await?;
        let their_seed = utils::bytes_to_seed(response)?;
        self.prf = Some(Prf::new(seed, their_seed));
        tracing::debug!("party {}: prf ready", self.id);
        Ok(())
    }

    pub(crate) fn prf(&mut self) -> Result<&mut Prf, Error> {
        self.prf.as_mut().ok_or(Error::PrfNotInitialized)
    }

    pub async fn finish(self) -> Result<(), Error> {
        self.network.shutdown().await?;
        Ok(())
    }

    pub fn print_connection_stats(&self, out: &mut impl std::io::Write) -> Result<(), Error> {
        Ok(self.network.print_connection_stats(out)?)
    }

    /// Sends the local words to the predecessor and returns the successor's
    /// local words. One round.
    pub async fn exchange_many(&mut self, local: &[Data]) -> Result<Vec<Data>, Error> {
        utils::send_prev_and_receive_next(&mut self.network, local).await
    }

    pub async fn exchange(&mut self, local: Data) -> Result<Data, Error> {
        let remote = self.exchange_many(&[local]).await?;
        remote.first().copied().ok_or(Error::InvalidMessageSize)
    }

    pub(crate) async fn reshare_b(&mut self, local: Vec<Data>) -> Result<Vec<BShare>, Error> {
        let remote = self.exchange_many(&local).await?;
        Ok(local
            .into_iter()
            .zip(remote)
            .map(|(a, b)| BShare::new(a, b))
            .collect())
    }

    pub(crate) async fn reshare_a(&mut self, local: Vec<Data>) -> Result<Vec<AShare>, Error> {
        let remote = self.exchange_many(&local).await?;
        Ok(local
            .into_iter()
            .zip(remote)
            .map(|(a, b)| AShare::new(a, b))
            .collect())
    }

    /// Reshares boolean and arithmetic local halves in the same round.
    pub(crate) async fn reshare_mixed(
        &mut self,
        mut bin: Vec<Data>,
        arith: Vec<Data>,
    ) -> Result<(Vec<BShare>, Vec<AShare>), Error> {
        let split = bin.len();
        bin.extend(arith);
        let remote = self.exchange_many(&bin).await?;
        if remote.len() != bin.len() {
            return Err(Error::InvalidMessageSize);
        }
        let b = bin[..split]
            .iter()
            .zip(&remote[..split])
            .map(|(a, b)| BShare::new(*a, *b))
            .collect();
        let a = bin[split..]
            .iter()
            .zip(&remote[split..])
            .map(|(a, b)| AShare::new(*a, *b))
            .collect();
        Ok((b, a))
    }

    // Every party forwards its local share to the successor and receives the
    // one share it is missing from the predecessor.
    async fn open_missing(&mut self, locals: &[Data]) -> Result<Vec<Data>, Error> {
        utils::send_next_and_receive_prev(&mut self.network, locals).await
    }

    pub async fn open_b_many(&mut self, shares: Vec<BShare>) -> Result<Vec<Data>, Error> {
        let locals: Vec<Data> = shares.iter().map(|s| s.a).collect();
        let missing = self.open_missing(&locals).await?;
        Ok(shares
            .into_iter()
            .zip(missing)
            .map(|(s, c)| s.a ^ s.b ^ c)
            .collect())
    }

    pub async fn open_a_many(&mut self, shares: Vec<AShare>) -> Result<Vec<Data>, Error> {
        let locals: Vec<Data> = shares.iter().map(|s| s.a).collect();
        let missing = self.open_missing(&locals).await?;
        Ok(shares
            .into_iter()
            .zip(missing)
            .map(|(s, c)| s.a.wrapping_add(s.b).wrapping_add(c))
            .collect())
    }

    pub async fn open_b(&mut self, share: BShare) -> Result<Data, Error> {
        let res = self.open_b_many(vec![share]).await?;
        res.first().copied().ok_or(Error::InvalidMessageSize)
    }

    pub async fn open_a(&mut self, share: AShare) -> Result<Data, Error> {
        let res = self.open_a_many(vec![share]).await?;
        res.first().copied().ok_or(Error::InvalidMessageSize)
    }

    /// Both other parties send their local shares to `party`, which
    /// reconstructs. Returns `None` everywhere else.
    async fn open_to(
        &mut self,
        party: PartyID,
        locals: Vec<Data>,
    ) -> Result<Option<(Vec<Data>, Vec<Data>, Vec<Data>)>, Error> {
        if party == self.id {
            let len = locals.len();
            let from_next = utils::receive_vec(&mut self.network, party.next_id().into(), len).await?;
            let from_prev = utils::receive_vec(&mut self.network, party.prev_id().into(), len).await?;
            Ok(Some((locals, from_next, from_prev)))
        } else {
            utils::send_vec(&mut self.network, &locals, party.into()).await?;
            Ok(None)
        }
    }

    pub async fn open_b_to(
        &mut self,
        party: PartyID,
        shares: Vec<BShare>,
    ) -> Result<Option<Vec<Data>>, Error> {
        let locals = shares.into_iter().map(|s| s.a).collect();
        Ok(self.open_to(party, locals).await?.map(|(x0, x1, x2)| {
            itertools::izip!(x0, x1, x2)
                .map(|(x0, x1, x2)| x0 ^ x1 ^ x2)
                .collect()
        }))
    }

    pub async fn open_a_to(
        &mut self,
        party: PartyID,
        shares: Vec<AShare>,
    ) -> Result<Option<Vec<Data>>, Error> {
        let locals = shares.into_iter().map(|s| s.a).collect();
        Ok(self.open_to(party, locals).await?.map(|(x0, x1, x2)| {
            itertools::izip!(x0, x1, x2)
                .map(|(x0, x1, x2)| x0.wrapping_add(x1).wrapping_add(x2))
                .collect()
        }))
    }

    /// Opens boolean and arithmetic shares to `party` in one round, e.g. the
    /// key columns next to the aggregates of a group-by.
    pub async fn open_mixed_to(
        &mut self,
        party: PartyID,
        bin: Vec<BShare>,
        arith: Vec<AShare>,
    ) -> Result<Option<(Vec<Data>, Vec<Data>)>, Error> {
        let split = bin.len();
        let locals = bin
            .into_iter()
            .map(|s| s.a)
            .chain(arith.into_iter().map(|s| s.a))
            .collect();
        Ok(self.open_to(party, locals).await?.map(|(x0, x1, x2)| {
            let b = itertools::izip!(&x0[..split], &x1[..split], &x2[..split])
                .map(|(x0, x1, x2)| x0 ^ x1 ^ x2)
                .collect();
            let a = itertools::izip!(&x0[split..], &x1[split..], &x2[split..])
                .map(|(x0, x1, x2)| x0.wrapping_add(*x1).wrapping_add(*x2))
                .collect();
            (b, a)
        }))
    }

    /// Secret shares the values of `owner`. Everybody else passes `None` and
    /// the number of values it expects.
    pub async fn input_b_many(
        &mut self,
        input: Option<Vec<Data>>,
        owner: usize,
        len: usize,
    ) -> Result<Vec<BShare>, Error> {
        let owner = PartyID::try_from(owner)?;
        let mut locals = Vec::with_capacity(len);
        for _ in 0..len {
            locals.push(self.prf()?.gen_binary_zero_share());
        }
        if owner == self.id {
            let values = input.ok_or_else(|| Error::ValueError("Cannot share None".to_string()))?;
            if values.len() != len {
                return Err(Error::InvalidSizeError);
            }
            for (l, v) in locals.iter_mut().zip(values) {
                *l ^= v;
            }
        }
        self.reshare_b(locals).await
    }

    pub async fn input_a_many(
        &mut self,
        input: Option<Vec<Data>>,
        owner: usize,
        len: usize,
    ) -> Result<Vec<AShare>, Error> {
        let owner = PartyID::try_from(owner)?;
        let mut locals = Vec::with_capacity(len);
        for _ in 0..len {
            locals.push(self.prf()?.gen_zero_share());
        }
        if owner == self.id {
            let values = input.ok_or_else(|| Error::ValueError("Cannot share None".to_string()))?;
            if values.len() != len {
                return Err(Error::InvalidSizeError);
            }
            for (l, v) in locals.iter_mut().zip(values) {
                *l = l.wrapping_add(v);
            }
        }
        self.reshare_a(locals).await
    }

    pub async fn input_b(&mut self, input: Option<Data>, owner: usize) -> Result<BShare, Error> {
        let res = self.input_b_many(input.map(|v| vec![v]), owner, 1).await?;
        res.first().copied().ok_or(Error::InvalidMessageSize)
    }

    pub async fn input_a(&mut self, input: Option<Data>, owner: usize) -> Result<AShare, Error> {
        let res = self.input_a_many(input.map(|v| vec![v]), owner, 1).await?;
        res.first().copied().ok_or(Error::InvalidMessageSize)
    }

    /// Dealer side sharing, one view per party.
    pub fn share_b<R: Rng>(input: Data, rng: &mut R) -> [BShare; 3] {
        share::share_b(input, rng)
    }

    pub fn share_a<R: Rng>(input: Data, rng: &mut R) -> [AShare; 3] {
        share::share_a(input, rng)
    }

    pub fn constant_a(&self, value: Data) -> AShare {
        AShare::constant(value, self.id)
    }

    pub fn add_const(&self, a: AShare, value: Data) -> AShare {
        a.add_const(value, self.id)
    }

    pub fn sub_const(&self, a: AShare, value: Data) -> AShare {
        a.sub_const(value, self.id)
    }

    /// Public `value - a`.
    pub fn const_sub(&self, value: Data, a: AShare) -> AShare {
        (-a).add_const(value, self.id)
    }
}
