use anyhow::Context;
use folio::domain::config::FolioConfig;
use folio::kernel::config::load_config;
use folio_logger::Logger;
use folio_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder(env!("CARGO_PKG_NAME")).init()?;

    // An explicit config path must exist; otherwise `folio.*` in the working directory is optional.
    let cfg: FolioConfig =
        load_config(std::env::args().nth(1)).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build()?.run().await
}
