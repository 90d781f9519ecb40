//! ATM simulator CLI.
//!
//! A single-user terminal over three flat files in the working directory:
//! `accounts.dat`, `transactions.dat`, and `locked_accounts.dat`. Two demo
//! accounts are seeded on first run.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin atm-sim
//! ```
//!
//! Output uses the yuan sign and Chinese characters; the terminal must
//! support UTF-8.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::io;
use std::process;
use teller::atm::{Atm, DataFiles, Dialog, Result};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("发生错误: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut atm = Atm::open(DataFiles::default())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut dialog = Dialog::new(stdin.lock(), stdout.lock());
    dialog.run(&mut atm)?;

    // The store is rewritten one last time on the way out.
    atm.flush()?;
    println!("\n程序结束。");
    Ok(())
}
