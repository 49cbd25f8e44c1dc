#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, param::Path, ApiResponse };
use log::{debug, info};

use crate::utils::counter_store::CounterStore;
use crate::utils::counter_types::CounterView;
use crate::utils::counter_utils::{self, name_request_info, RequestDebug};
use crate::utils::errors::{CounterError, RespMessage};

// ***************************************************************************
//                             Endpoint Definition
// ***************************************************************************
pub struct GetCounterApi
{
    store: Arc<CounterStore>,
}

impl GetCounterApi {
    pub fn new(store: Arc<CounterStore>) -> Self {
        Self {store}
    }
}

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
struct ReqGetCounter
{
    name: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetCounter {
    fn get_request_info(&self) -> String {
        name_request_info(&self.name)
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum CounterResponse {
    #[oai(status = 200)]
    Http200(Json<HashMap<String, u64>>),
    #[oai(status = 404)]
    Http404(Json<RespMessage>),
}

fn make_http_200(view: CounterView) -> CounterResponse {
    CounterResponse::Http200(Json(view.into_payload()))
}
fn make_http_404(e: CounterError) -> CounterResponse {
    CounterResponse::Http404(Json(RespMessage::from(e)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetCounterApi {
    /// Read a counter's current value.
    #[oai(path = "/counters/:name", method = "get")]
    async fn get_counter_api(&self, http_req: &Request, name: Path<String>) -> CounterResponse {
        let req = ReqGetCounter {name: name.0};
        req.process(http_req, &self.store)
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl ReqGetCounter {
    /// Process the request.
    fn process(&self, http_req: &Request, store: &CounterStore) -> CounterResponse {
        // Conditional logging depending on log level.
        counter_utils::debug_request(http_req, self);

        // Reads never change the store.
        match store.read(&self.name) {
            Ok(view) => {
                debug!("Counter {} read with value {}.", view.name, view.value);
                make_http_200(view)
            },
            Err(e) => {
                info!("Read rejected: {}", e);
                make_http_404(e)
            }
        }
    }
}
