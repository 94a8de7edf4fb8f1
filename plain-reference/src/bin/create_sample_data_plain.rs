use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use plain_reference::PlainTable;
use rusqlite::Connection;

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
        "CREATE TABLE IF NOT EXISTS plain_rows (
            id INTEGER PRIMARY KEY,
            cols INTEGER NOT NULL,
            data BLOB NOT NULL
        )",
        rusqlite::params![],
    )?;

    let table = PlainTable::random(opts.rows, opts.cols, opts.max.max(1));

    let transaction = conn.transaction()?;
    let mut stmt = transaction.prepare("INSERT INTO plain_rows (cols, data) VALUES (?1, ?2)")?;
    for i in 0..table.num_rows() {
        stmt.execute(rusqlite::params![table.num_cols() as i64, table.row_bytes(i)])?;
    }
    drop(stmt);
    transaction.commit()?;

    Ok(())
}
