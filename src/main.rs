#![forbid(unsafe_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{error, info};
use poem::endpoint::StaticFilesEndpoint;
use poem::{listener::TcpListener, Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

// Server Utilities
use crate::utils::app_state::AppState;
use crate::utils::config::{init_runtime_context, Config};
use crate::utils::errors::Errors;
use crate::utils::hx_utils::{get_absolute_path, log_request};

// Modules
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "HxDemoServer"; // for poem logging

// Time allowed for in-flight requests once shutdown starts.
const SHUTDOWN_TIMEOUT : Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting hxdemo_server!");

    // Read arguments, create directories, start logging and load config.
    let runtime_ctx = init_runtime_context()?;
    if runtime_ctx.hx_args.create_dirs_only {
        println!("Data directories created under {}.", runtime_ctx.hx_dirs.root_dir);
        return Ok(());
    }
    info!("{}", Errors::InputParms(format!("{:#?}", runtime_ctx)));
    print_version_info();

    // The state is owned by the routes from here on.
    let config = &runtime_ctx.parms.config;
    let state = if config.seed {AppState::new_seeded()} else {AppState::new()};
    if state.store.is_empty() {
        info!("Dog store initialized empty, seeding is disabled.");
    } else {
        info!("Dog store initialized with {} records.", state.store.len());
    }

    // --------------- Main Loop Set Up ---------------
    let addr = format!("{}{}", "0.0.0.0:", config.http_port);
    let app = make_app(state, config);

    // ------------------ Main Loop -------------------
    info!("startup: api router started on {}", addr);
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run_with_graceful_shutdown(app, shutdown_signal(), Some(SHUTDOWN_TIMEOUT))
        .await?;
    info!("shutdown: shutdown complete");
    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// make_app:
// ---------------------------------------------------------------------------
/** Assemble the routes.  The htmx endpoints live under /v1, the generated
 * OpenAPI documents and their UI sit beside them, and everything else is
 * looked up in the static directory.
 */
fn make_app(state: Arc<AppState>, config: &Config) -> impl Endpoint {
    // Assign base URL.
    let server_url = format!("{}:{}{}", config.http_addr, config.http_port, "/v1");

    let api_service =
        OpenApiService::new(v1::dogs::endpoints(&state), config.title.clone(), env!("CARGO_PKG_VERSION"))
            .server(server_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    let static_dir = get_absolute_path(&config.static_dir);
    Route::new()
        .nest("/v1", api_service)
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/", StaticFilesEndpoint::new(static_dir).index_file("index.html"))
        .around(|ep, req| log_request(ep, req))
}

// ---------------------------------------------------------------------------
// shutdown_signal:
// ---------------------------------------------------------------------------
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown: shutdown started"),
        Err(e) => {
            // Keep serving; without the signal there is nothing to wait for.
            error!("shutdown: unable to listen for the interrupt signal: {}", e);
            std::future::pending::<()>().await
        },
    }
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running HXDEMO={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        env!("GIT_BRANCH"),
                        env!("GIT_COMMIT_SHORT"),
                        env!("GIT_DIRTY"),
                        env!("SOURCE_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}
