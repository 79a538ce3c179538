use anyhow::Result;
use identity_ui::cli;

// Main function
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let action = cli::start()?;

    action.execute().await?;

    Ok(())
}
