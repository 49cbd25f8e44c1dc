#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use log::info;
use poem::listener::TcpListener;

// Counter server utilities
use crate::utils::config::{init_runtime_context, RuntimeCtx};
use crate::utils::counter_store::CounterStore;
use crate::utils::errors::Errors;
use crate::v1::counters::make_routes;
use crate::v1::counters::version::version_info;

// Modules
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "CounterServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting counter_server!");

    // Read parameters, create data directories and start logging.
    let ctx = counter_init()?;
    if ctx.args.create_dirs_only {
        info!("Data directories created under {}, exiting.", ctx.dirs.root_dir);
        return Ok(());
    }

    // --------------- Main Loop Set Up ---------------
    // The store starts empty on every start.
    let config = &ctx.parms.config;
    let server_url = format!("{}:{}", config.http_addr, config.http_port);
    let app = make_routes(Arc::new(CounterStore::new()), &config.title, &server_url);

    // ------------------ Main Loop -------------------
    let addr = format!("{}{}", "0.0.0.0:", config.http_port);
    info!("{} listening on {}.", SERVER_NAME, addr);
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await?;

    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// counter_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems other than those needed to configure the main
 * loop processor.
 */
fn counter_init() -> Result<RuntimeCtx> {
    let ctx = init_runtime_context()?;
    info!("{}", Errors::InputParms(format!("{:#?}", ctx)));

    // Log build info.
    info!("{}", version_info());
    Ok(ctx)
}
