use anyhow::{anyhow, Result};

fn main() -> Result<()> {
    wellnest_frontend::run_frontend().map_err(|err| anyhow!(err.to_string()))
}
