use std::net::SocketAddr;
use std::sync::Arc;

use localrag_core::config::Config;
use localrag_cli::{build_agent, build_index, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Config::load()?.settings()?;
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let index = Arc::new(build_index(&settings));
    if settings.server.warm_corpus {
        let warm = Arc::clone(&index);
        let pages = tokio::task::spawn_blocking(move || warm.warm_up()).await?;
        info!(pages, dir = %settings.corpus.dir, "Corpus ready");
    }

    // the blocking HTTP client must be built off the async runtime
    let agent = tokio::task::spawn_blocking(move || build_agent(&settings, index)).await?;
    localrag_server::serve(agent, addr).await?;
    Ok(())
}
