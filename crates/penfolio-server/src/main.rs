use crate::opt::{Commands, Db, Run};
use anyhow::{Result, anyhow};
use axum::serve;
use clap::Parser;
use penfolio_db::sea_orm::{ConnectOptions, Database};
use penfolio_utils::net::create_listener;
use std::env;
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr};
use url::Url;

mod app;
mod db;
mod opt;
mod routes;
mod user;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3030;

async fn run(opt: Run) -> Result<()> {
    let _guard = penfolio_utils::tracing::setup(
        penfolio_utils::tracing::TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn.clone())
            .env(opt.env.clone())
            .build(),
    )?;

    let db_url_string = env::var("DATABASE_URL").map_err(|e| anyhow!("Can't find env: \"DATABASE_URL\" {e:?}"))?;
    let db_url = Url::parse(&db_url_string)?;

    let pool_options = build_connect_options(&opt.db, db_url);
    let pool = Database::connect(pool_options).await?;

    db::bootstrap(&pool)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to create schema"))?;

    let Run {
        host,
        port,
        origins,
        deletable,
        ..
    } = opt;

    let app = app::create_app(origins, deletable, pool)?;

    let listener = create_listener((host, port), (DEFAULT_HOST, DEFAULT_PORT)).await?;

    let service = app.into_make_service();
    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve::serve(listener, service).await?;
    Ok(())
}

fn build_connect_options(db_options: &Db, db_url: Url) -> ConnectOptions {
    let mut pool_options = ConnectOptions::new(db_url);
    if let Some(min_connections) = db_options.db_min_connections {
        pool_options.min_connections(min_connections);
    }
    if let Some(max_connections) = db_options.db_max_connections {
        pool_options.max_connections(max_connections);
    }
    pool_options
}

fn main() -> Result<()> {
    let main = async {
        let opt = opt::Cli::parse();

        match opt.command {
            Commands::Run(o) => run(o).await?,
        }
        Ok(())
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(main)
}
