#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::Arc;

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, param::Path, ApiResponse };
use log::info;

use crate::utils::counter_store::CounterStore;
use crate::utils::counter_types::CounterView;
use crate::utils::counter_utils::{self, name_request_info, RequestDebug};
use crate::utils::errors::{CounterError, RespMessage};

// ***************************************************************************
//                             Endpoint Definition
// ***************************************************************************
pub struct CreateCounterApi
{
    store: Arc<CounterStore>,
}

impl CreateCounterApi {
    pub fn new(store: Arc<CounterStore>) -> Self {
        Self {store}
    }
}

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
struct ReqCreateCounter
{
    name: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqCreateCounter {
    fn get_request_info(&self) -> String {
        name_request_info(&self.name)
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum CounterResponse {
    #[oai(status = 201)]
    Http201(Json<HashMap<String, u64>>),
    #[oai(status = 409)]
    Http409(Json<RespMessage>),
}

fn make_http_201(view: CounterView) -> CounterResponse {
    CounterResponse::Http201(Json(view.into_payload()))
}
fn make_http_409(e: CounterError) -> CounterResponse {
    CounterResponse::Http409(Json(RespMessage::from(e)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl CreateCounterApi {
    /// Create a counter with value 0.
    #[oai(path = "/counters/:name", method = "post")]
    async fn create_counter_api(&self, http_req: &Request, name: Path<String>) -> CounterResponse {
        let req = ReqCreateCounter {name: name.0};
        req.process(http_req, &self.store)
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl ReqCreateCounter {
    /// Process the request.
    fn process(&self, http_req: &Request, store: &CounterStore) -> CounterResponse {
        // Conditional logging depending on log level.
        counter_utils::debug_request(http_req, self);

        match store.create(&self.name) {
            Ok(view) => {
                info!("Counter {} created, {} counters in store.", &self.name, store.len());
                make_http_201(view)
            },
            Err(e) => {
                info!("Create rejected: {}", e);
                make_http_409(e)
            }
        }
    }
}
