//! probely-postman-env: import Postman environment variables into a Probely target
//!
//! Converts the `values` of a Postman environment export into custom API
//! parameters and patches them onto the target's API scan settings.

use anyhow::Result;

fn main() -> Result<()> {
    probely_postman_env::cli::run()
}
