use channel::{BytesChannel, ConnectionStats};
use color_eyre::eyre::{self, Context, Report};
use config::NetworkConfig;
use std::{
    collections::{BTreeMap, HashMap},
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpListener, TcpStream,
    },
};

pub mod channel;
pub mod codecs;
pub mod config;

const CONNECT_ATTEMPTS: usize = 300;
const CONNECT_RETRY: Duration = Duration::from_millis(100);

/// Owns the TCP streams to the ring neighbours of this party.
pub struct MpcNetworkHandler {
    streams: HashMap<usize, TcpStream>,
    stats: BTreeMap<usize, Arc<ConnectionStats>>,
    my_id: usize,
}

impl MpcNetworkHandler {
    /// Connects this party to its successor and predecessor.
    ///
    /// Party 0 connects to its successor first and accepts its predecessor
    /// afterwards, every other party does it the other way round. All parties
    /// must follow this order, otherwise the ring never closes.
    pub async fn establish(config: NetworkConfig) -> Result<Self, Report> {
        config.check_config()?;
        let num_parties = config.num_parties();
        if num_parties < 3 {
            eyre::bail!("a ring needs at least 3 parties, got {}", num_parties);
        }
        let my_id = config.my_id;
        let next_id = (my_id + 1) % num_parties;
        let prev_id = (my_id + num_parties - 1) % num_parties;

        let me = config
            .party(my_id)
            .ok_or_else(|| eyre::eyre!("party {} missing from config", my_id))?;
        let bind_addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), me.socket_addr.port());
        let listener = TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("binding listener on {}", bind_addr))?;
        tracing::debug!("party {} listening on {}", my_id, bind_addr);

        let mut streams = HashMap::with_capacity(2);
        if my_id == 0 {
            streams.insert(next_id, Self::connect(&config, next_id).await?);
            streams.insert(prev_id, Self::accept(&listener, prev_id).await?);
        } else {
            streams.insert(prev_id, Self::accept(&listener, prev_id).await?);
            streams.insert(next_id, Self::connect(&config, next_id).await?);
        }

        let stats = streams
            .keys()
            .map(|id| (*id, Arc::new(ConnectionStats::default())))
            .collect();

        Ok(Self {
            streams,
            stats,
            my_id,
        })
    }

    async fn connect(config: &NetworkConfig, id: usize) -> Result<TcpStream, Report> {
        let addr = config
            .party(id)
            .ok_or_else(|| eyre::eyre!("party {} missing from config", id))?
            .socket_addr;

        let mut attempt = 0;
        let mut stream = loop {
            match TcpStream::connect(addr).await {
                Ok(stream) => break stream,
                Err(err) if attempt + 1 < CONNECT_ATTEMPTS => {
                    tracing::trace!("connect {}->{} failed ({}), retrying", config.my_id, id, err);
                    attempt += 1;
                    tokio::time::sleep(CONNECT_RETRY).await;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("connecting to party {}", id));
                }
            }
        };
        stream.set_nodelay(true)?;
        stream.write_u64_le(config.my_id as u64).await?;
        tracing::debug!("party {} connected to party {} at {}", config.my_id, id, addr);
        Ok(stream)
    }

    async fn accept(listener: &TcpListener, id: usize) -> Result<TcpStream, Report> {
        let (mut stream, addr) = listener.accept().await?;
        stream.set_nodelay(true)?;
        let their_id = stream.read_u64_le().await?;
        if their_id != id as u64 {
            eyre::bail!(
                "expected party {} to connect, but {} identified as {}",
                id,
                addr,
                their_id
            );
        }
        tracing::debug!("accepted party {} from {}", id, addr);
        Ok(stream)
    }

    pub fn my_id(&self) -> usize {
        self.my_id
    }

    /// Hands out one raw channel per connected party.
    pub fn get_byte_channels(
        &mut self,
    ) -> Result<HashMap<usize, BytesChannel<OwnedReadHalf, OwnedWriteHalf>>, Report> {
        if self.streams.is_empty() {
            eyre::bail!("byte channels have already been handed out");
        }
        let mut channels = HashMap::with_capacity(self.streams.len());
        for (id, stream) in self.streams.drain() {
            let stats = self
                .stats
                .get(&id)
                .cloned()
                .ok_or_else(|| eyre::eyre!("no stats for party {}", id))?;
            let (read, write) = stream.into_split();
            channels.insert(id, BytesChannel::new(read, write, stats));
        }
        Ok(channels)
    }

    pub fn print_connection_stats(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        for (id, stats) in self.stats.iter() {
            writeln!(
                out,
                "Connection {} <-> {}:\n\tSENT: {} bytes\n\tRECV: {} bytes",
                self.my_id,
                id,
                stats.sent(),
                stats.recv()
            )?;
        }
        Ok(())
    }
}
