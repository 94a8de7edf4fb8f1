use clap::{Parser, ValueEnum};
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use mpc_net::config::{NetworkConfig, DEFAULT_PORT};
use rusqlite::Connection;
use secrecy_mpc::prelude::{
    BShare, BShareTable, Error, PartyID, Predicate, Rep3, Rep3Network, RelationalProtocol,
};
use std::{net::IpAddr, path::PathBuf, time::Duration};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

macro_rules! println0  {
    ($id:expr) => {
        if $id == 0 {
            println!();
        }
    };
    ($id:expr, $($arg:tt)*) => {{
        if $id == 0 {
            println!($($arg)*);
        }
    }};

}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Query {
    /// sort on the first column
    Sort,
    /// distinct flags of the first column after sorting
    Distinct,
    /// group by the first column and count
    GroupByCount,
    /// first column greater than the second
    Select,
}

#[derive(Parser, Clone)]
struct Args {
    /// The rank of our party
    #[clap(short, long, value_name = "ID")]
    rank: usize,

    /// Number of parties, has to be 3
    #[clap(short, long, value_name = "NUM", default_value_t = 3)]
    num_parties: usize,

    /// Port all parties listen on when using --ips
    #[clap(long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Comma separated list of party addresses in rank order
    #[clap(long, value_name = "IPS", value_delimiter = ',')]
    ips: Option<Vec<IpAddr>>,

    /// YAML party list, used instead of --ips
    #[clap(short, long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// path to the share database created by create-sample-data
    #[arg(short, long, value_name = "FILE", required = true)]
    database: PathBuf,

    /// The query to run
    #[arg(short, long, value_enum, default_value_t = Query::Sort)]
    query: Query,

    /// Give up on a peer after this many seconds
    #[arg(short, long, value_name = "SECS")]
    timeout_secs: Option<u64>,
}

fn print_stats(protocol: &RelationalProtocol<Rep3Network>) -> Result<()> {
    let id = protocol.get_id();
    if id == 0 {
        println!("Stats: party {}", id);
        protocol.print_connection_stats(&mut std::io::stdout())?;
    }
    Ok(())
}

fn network_config(args: &Args) -> Result<NetworkConfig> {
    if args.num_parties != 3 {
        return Err(Error::NumPartyError(args.num_parties).into());
    }
    let config = match (&args.config_file, &args.ips) {
        (Some(file), _) => NetworkConfig::from_yaml_file(file, args.rank)?,
        (None, Some(ips)) => NetworkConfig::from_ip_list(args.rank, args.port, ips),
        (None, None) => return Err(eyre!("either --ips or --config-file is required")),
    };
    config.check_config().context("checking network config")?;
    if config.num_parties() != args.num_parties {
        return Err(Error::NumPartyError(config.num_parties()).into());
    }
    Ok(config.with_timeout(args.timeout_secs.map(Duration::from_secs)))
}

fn open_database(database_file: &PathBuf) -> Result<Connection> {
    let conn = Connection::open(database_file)?;
    Ok(conn)
}

fn read_db(args: &Args) -> Result<BShareTable> {
    let conn = open_database(&args.database)?;

    // party i holds the sub-shares i and i + 1
    let mut stmt = match args.rank {
        0 => conn.prepare("SELECT share_a, share_b from shared_rows ORDER BY id;")?,
        1 => conn.prepare("SELECT share_b, share_c from shared_rows ORDER BY id;")?,
        2 => conn.prepare("SELECT share_c, share_a from shared_rows ORDER BY id;")?,
        i => Err(Error::IdError(i))?,
    };

    let mut table = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let share_a: Vec<u64> = bincode::deserialize(&row.get::<_, Vec<u8>>(0)?)?;
        let share_b: Vec<u64> = bincode::deserialize(&row.get::<_, Vec<u8>>(1)?)?;
        if share_a.len() != share_b.len() {
            Err(Error::InvalidSizeError)?;
        }
        let shares: Vec<BShare> = share_a
            .into_iter()
            .zip(share_b)
            .map(|(a, b)| BShare::new(a, b))
            .collect();
        table.push(shares);
    }

    let holder = PartyID::try_from(args.rank)?;
    Ok(BShareTable::from_rows(0, holder, 0, table)?)
}

async fn run_query(
    protocol: &mut RelationalProtocol<Rep3Network>,
    table: &mut BShareTable,
    query: Query,
) -> Result<Vec<u64>> {
    let batch = (table.num_rows() / 2).max(1);
    let res = match query {
        Query::Sort => {
            protocol.bitonic_sort(table, &[0], &[true], batch).await?;
            table.column(0)?
        }
        Query::Distinct => {
            protocol.bitonic_sort(table, &[0], &[true], batch).await?;
            protocol.distinct(table, 0).await?
        }
        Query::GroupByCount => {
            protocol.bitonic_sort(table, &[0], &[true], batch).await?;
            let counts = protocol.group_by_count(table, &[0]).await?;
            return Ok(protocol.get_mpc_mut().open_a_many(counts).await?);
        }
        Query::Select => {
            protocol
                .select(table, &Predicate::Greater { left: 0, right: 1 })
                .await?
        }
    };
    Ok(protocol.get_mpc_mut().open_b_many(res).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let id = args.rank;
    let config = network_config(&args)?;

    println0!(id, "Reading database:");
    let start = Instant::now();
    let mut table = read_db(&args)?;
    let duration = start.elapsed();
    println0!(id, "...done, {} rows, took {} ms\n", table.num_rows(), duration.as_millis());

    println0!(id, "Setting up network:");
    let start = Instant::now();
    let network = Rep3Network::new(config).await?;
    let duration = start.elapsed();
    println0!(id, "...done, took {} ms\n", duration.as_millis());

    println0!(id, "\nInitialize protocol:");
    let start = Instant::now();
    let mut protocol = RelationalProtocol::new(Rep3::new(network)?);
    let duration = start.elapsed();
    println0!(id, "...done, took {} ms\n", duration.as_millis());
    print_stats(&protocol)?;

    println0!(id, "\nPreprocessing:");
    let start = Instant::now();
    protocol.preprocessing().await?;
    let duration = start.elapsed();
    println0!(id, "...done, took {} ms\n", duration.as_millis());
    print_stats(&protocol)?;

    println0!(id, "\nQuery {:?}:", args.query);
    let start = Instant::now();
    let res = run_query(&mut protocol, &mut table, args.query).await?;
    let duration = start.elapsed();
    println0!(id, "...done, took {} ms", duration.as_millis());
    println0!(id, "Result is {:?}\n", res);
    print_stats(&protocol)?;

    protocol.finish().await?;

    Ok(())
}
