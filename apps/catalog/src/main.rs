//! # Shopfront Catalog Entry Point
//!
//! ```bash
//! # Seed on first run and print every product
//! shopfront-catalog
//!
//! # Filter by name and attach a comment
//! shopfront-catalog --search samsung --comment 2 "Great picture"
//! ```

use std::process::ExitCode;

use shopfront_catalog::{render, run, CliArgs, USAGE};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(args).await.and_then(|report| render(&report)) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error [{:?}]: {}", err.code, err);
            ExitCode::FAILURE
        }
    }
}
