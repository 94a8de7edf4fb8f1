use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use plain_reference::PlainTable;
use rand::{rngs::SmallRng, SeedableRng};
use rusqlite::Connection;
use secrecy_mpc::prelude::{Rep3, Rep3Network};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// path to the database file to store stuff in
    #[arg(short, long, value_name = "FILE", required = true)]
    database: PathBuf,

    /// number of rows to generate
    #[arg(short, long, value_name = "NUM", required = true)]
    rows: usize,

    /// number of columns per row
    #[arg(short, long, value_name = "NUM", default_value_t = 2)]
    cols: usize,

    /// values are drawn from 0..max
    #[arg(short, long, value_name = "MAX", default_value_t = 16)]
    max: u64,
}

fn open_database(database_file: &PathBuf) -> Result<Connection> {
    let conn = Connection::open(database_file)?;
    Ok(conn)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let opts: Opts = Opts::parse();

    let mut conn = open_database(&opts.database)?;

    // Create the table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS shared_rows (
            id INTEGER PRIMARY KEY,
            plain BLOB NOT NULL,
            share_a BLOB NOT NULL,
            share_b BLOB NOT NULL,
            share_c BLOB NOT NULL
        )",
        rusqlite::params![],
    )?;

    let mut rng = SmallRng::from_entropy();
    let table = PlainTable::random_rng(&mut rng, opts.rows, opts.cols, opts.max.max(1));

    // Insert the rows into the database
    let transaction = conn.transaction()?;
    let mut stmt = transaction.prepare(
        "INSERT INTO shared_rows (plain, share_a, share_b, share_c) VALUES (?1, ?2, ?3, ?4)",
    )?;

    for row in table.rows() {
        let mut share_a = Vec::with_capacity(row.len());
        let mut share_b = Vec::with_capacity(row.len());
        let mut share_c = Vec::with_capacity(row.len());
        for value in row {
            // We simulate the parties already knowing the shares of the row.
            let shares = Rep3::<Rep3Network>::share_b(*value, &mut rng);
            share_a.push(shares[0].get_a());
            share_b.push(shares[1].get_a());
            share_c.push(shares[2].get_a());
        }

        let plain = bincode::serialize(row)?;
        let data_a = bincode::serialize(&share_a)?;
        let data_b = bincode::serialize(&share_b)?;
        let data_c = bincode::serialize(&share_c)?;

        stmt.execute([&plain, &data_a, &data_b, &data_c])?;
    }
    drop(stmt);
    transaction.commit()?;

    Ok(())
}
