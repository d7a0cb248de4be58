//! # AutoParts Storefront Entry Point
//!
//! Headless start of the storefront application layer.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from `AUTOPARTS_*` variables
//! 3. Open the database and run migrations
//! 4. Restore the session, build the cart and product grid
//! 5. Log a summary and exit
//!
//! The setup lives in `lib.rs` so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match autoparts_storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("storefront failed to start: {}", err);
            ExitCode::FAILURE
        }
    }
}
