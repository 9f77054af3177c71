use anyhow::Context;
use flyview::{app::ViewerApp, config::ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = ViewerApp::new(ViewerConfig::default()).context("failed to set up viewer")?;
    app.run().context("viewer exited with an error")?;
    Ok(())
}
