use anyhow::Result;
use farma4u_admin::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let action = cli::start()?;
    action.execute().await?;
    Ok(())
}
