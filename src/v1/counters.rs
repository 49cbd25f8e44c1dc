#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Route;
use poem_openapi::OpenApiService;

use crate::utils::counter_store::CounterStore;

pub mod counters_create;
pub mod counters_delete;
pub mod counters_get;
pub mod counters_update;
pub mod version;

use counters_create::CreateCounterApi;
use counters_delete::DeleteCounterApi;
use counters_get::GetCounterApi;
use counters_update::UpdateCounterApi;
use version::VersionApi;

// From cargo.toml.
const API_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// make_routes:
// ---------------------------------------------------------------------------
/** Assemble every endpoint around one shared store.  Besides the counter 
 * endpoints, the generated openapi document is served at /spec and 
 * /spec_yaml and the swagger ui at /docs.
 */
pub fn make_routes(store: Arc<CounterStore>, title: &str, server_url: &str) -> Route {
    let endpoints = (
        CreateCounterApi::new(store.clone()),
        GetCounterApi::new(store.clone()),
        UpdateCounterApi::new(store.clone()),
        DeleteCounterApi::new(store),
        VersionApi,
    );
    let api_service = OpenApiService::new(endpoints, title, API_VERSION).server(server_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem::Route;
    use serde_json::json;

    use super::make_routes;
    use crate::utils::counter_store::CounterStore;

    fn client() -> TestClient<Route> {
        TestClient::new(make_routes(Arc::new(CounterStore::new()), "Counter Server", "http://localhost:3000"))
    }

    #[tokio::test]
    async fn counter_lifecycle() {
        let cli = client();

        let resp = cli.post("/counters/foo").send().await;
        resp.assert_status(StatusCode::CREATED);
        resp.assert_json(json!({"foo": 0})).await;

        let resp = cli.post("/counters/foo").send().await;
        resp.assert_status(StatusCode::CONFLICT);
        resp.assert_json(json!({"Message": "Counter foo already exists"})).await;

        let resp = cli.put("/counters/foo").send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"foo": 1})).await;

        let resp = cli.get("/counters/foo").send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"foo": 1})).await;

        let resp = cli.delete("/counters/foo").send().await;
        resp.assert_status(StatusCode::NO_CONTENT);
        resp.assert_text("").await;

        let resp = cli.get("/counters/foo").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(json!({"Message": "Counter foo does not exist"})).await;
    }

    #[tokio::test]
    async fn missing_counter_is_not_found() {
        let cli = client();
        let expected = json!({"Message": "Counter nope does not exist"});

        let resp = cli.get("/counters/nope").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(&expected).await;

        let resp = cli.put("/counters/nope").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(&expected).await;

        let resp = cli.delete("/counters/nope").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(&expected).await;
    }

    #[tokio::test]
    async fn update_counts_each_call() {
        let cli = client();
        cli.post("/counters/hits").send().await.assert_status(StatusCode::CREATED);

        for i in 1..=3 {
            let resp = cli.put("/counters/hits").send().await;
            resp.assert_status_is_ok();
            resp.assert_json(json!({"hits": i})).await;
        }

        // Reads leave the value alone.
        for _ in 0..3 {
            let resp = cli.get("/counters/hits").send().await;
            resp.assert_status_is_ok();
            resp.assert_json(json!({"hits": 3})).await;
        }
    }

    #[tokio::test]
    async fn deleted_name_can_be_recreated() {
        let cli = client();
        cli.post("/counters/again").send().await.assert_status(StatusCode::CREATED);
        cli.put("/counters/again").send().await.assert_status_is_ok();
        cli.delete("/counters/again").send().await.assert_status(StatusCode::NO_CONTENT);
        cli.delete("/counters/again").send().await.assert_status(StatusCode::NOT_FOUND);

        let resp = cli.post("/counters/again").send().await;
        resp.assert_status(StatusCode::CREATED);
        resp.assert_json(json!({"again": 0})).await;
    }

    #[tokio::test]
    async fn routes_share_one_store() {
        let store = Arc::new(CounterStore::new());
        let cli = TestClient::new(make_routes(store.clone(), "Counter Server", "http://localhost:3000"));

        cli.post("/counters/shared").send().await.assert_status(StatusCode::CREATED);
        cli.put("/counters/shared").send().await.assert_status_is_ok();

        assert_eq!(store.read("shared").unwrap().value, 1);
    }

    #[tokio::test]
    async fn version_reports_package() {
        let cli = client();
        let resp = cli.get("/version").send().await;
        resp.assert_status_is_ok();
        let json = resp.json().await;
        let obj = json.value().object();
        obj.get("result_code").assert_string("0");
        obj.get("server_version").assert_string(env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn openapi_spec_is_served() {
        let cli = client();
        let resp = cli.get("/spec").send().await;
        resp.assert_status_is_ok();
        let body = resp.0.into_body().into_string().await.unwrap();
        assert!(body.contains("/counters/{name}"));
        assert!(body.contains("/version"));
    }
}
