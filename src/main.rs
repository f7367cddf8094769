use rolodex::api;
use rolodex::logger::*;
use rolodex::server::*;
use rolodex::settings::*;
use std::sync::Arc;
use tokio::signal;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload(&project_settings.log.filter)?;

    let address: std::net::SocketAddr = project_settings.http.address.parse()?;

    let server = Arc::new(Server::try_new(&project_settings)?);

    // The browser calls from the frontend origin with cookies attached, so
    // CORS must name that origin exactly and allow credentials.
    let cors = warp::cors()
        .allow_origin(project_settings.frontend.url.as_str())
        .allow_credentials(true)
        .allow_headers(vec!["authorization", "content-type"])
        .allow_methods(vec!["GET", "POST"]);

    let routes = api::routes(server).recover(api::recover_error).with(cors);

    warp::serve(routes)
        .bind_with_graceful_shutdown(address, async {
            signal::ctrl_c().await.expect("Could not register SIGINT");
        })
        .1
        .await;

    info!("server stopped");

    Ok(())
}
