use color_eyre::eyre::{self, Context};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    net::{IpAddr, SocketAddr},
    path::Path,
    time::Duration,
};

/// The default TCP port every party listens on.
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParty {
    pub id: usize,
    pub dns_name: String,
    pub socket_addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub parties: Vec<NetworkParty>,
    pub my_id: usize,
    /// Upper bound for a single receive. `None` blocks forever.
    pub timeout: Option<Duration>,
}

impl NetworkConfig {
    /// Builds a config from a list of peer addresses in rank order, all
    /// listening on the same port.
    pub fn from_ip_list(my_id: usize, port: u16, ips: &[IpAddr]) -> Self {
        let parties = ips
            .iter()
            .enumerate()
            .map(|(id, ip)| NetworkParty {
                id,
                dns_name: format!("party{}", id),
                socket_addr: SocketAddr::new(*ip, port),
            })
            .collect();
        Self {
            parties,
            my_id,
            timeout: None,
        }
    }

    /// Reads a YAML list of [`NetworkParty`] entries.
    pub fn from_yaml_file(path: impl AsRef<Path>, my_id: usize) -> eyre::Result<Self> {
        let parties: Vec<NetworkParty> =
            serde_yaml::from_reader(File::open(path).context("opening config file")?)
                .context("parsing config file")?;
        Ok(Self {
            parties,
            my_id,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn num_parties(&self) -> usize {
        self.parties.len()
    }

    pub fn party(&self, id: usize) -> Option<&NetworkParty> {
        self.parties.iter().find(|p| p.id == id)
    }

    pub fn check_config(&self) -> eyre::Result<()> {
        if self.parties.is_empty() {
            eyre::bail!("no parties configured");
        }
        let mut seen = vec![false; self.parties.len()];
        for party in &self.parties {
            match seen.get_mut(party.id) {
                Some(flag) if !*flag => *flag = true,
                Some(_) => eyre::bail!("duplicate party id {}", party.id),
                None => eyre::bail!(
                    "party id {} out of range for {} parties",
                    party.id,
                    self.parties.len()
                ),
            }
        }
        if self.my_id >= self.parties.len() {
            eyre::bail!("my id {} is not part of the config", self.my_id);
        }
        Ok(())
    }
}
