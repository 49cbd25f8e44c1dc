#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, param::Path, ApiResponse };
use log::info;

use crate::utils::counter_store::CounterStore;
use crate::utils::counter_utils::{self, name_request_info, RequestDebug};
use crate::utils::errors::{CounterError, RespMessage};

// ***************************************************************************
//                             Endpoint Definition
// ***************************************************************************
pub struct DeleteCounterApi
{
    store: Arc<CounterStore>,
}

impl DeleteCounterApi {
    pub fn new(store: Arc<CounterStore>) -> Self {
        Self {store}
    }
}

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
struct ReqDeleteCounter
{
    name: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqDeleteCounter {
    fn get_request_info(&self) -> String {
        name_request_info(&self.name)
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum CounterResponse {
    #[oai(status = 204)]
    Http204,
    #[oai(status = 404)]
    Http404(Json<RespMessage>),
}

fn make_http_204() -> CounterResponse {
    CounterResponse::Http204
}
fn make_http_404(e: CounterError) -> CounterResponse {
    CounterResponse::Http404(Json(RespMessage::from(e)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl DeleteCounterApi {
    /// Remove a counter.  Its name can be reused by a later create.
    #[oai(path = "/counters/:name", method = "delete")]
    async fn delete_counter_api(&self, http_req: &Request, name: Path<String>) -> CounterResponse {
        let req = ReqDeleteCounter {name: name.0};
        req.process(http_req, &self.store)
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl ReqDeleteCounter {
    /// Process the request.
    fn process(&self, http_req: &Request, store: &CounterStore) -> CounterResponse {
        // Conditional logging depending on log level.
        counter_utils::debug_request(http_req, self);

        match store.delete(&self.name) {
            Ok(()) => {
                info!("Counter {} deleted, {} counters in store.", &self.name, store.len());
                make_http_204()
            },
            Err(e) => {
                info!("Delete rejected: {}", e);
                make_http_404(e)
            }
        }
    }
}
