//! HTTP-level test suite shared by every store backend.
//!
//! `api_tests!` generates tests that drive the full router:
//! JSON → HTTP request → handler → Store → HTTP response → JSON.
//! `$state_factory` is an async expression yielding a fresh, empty `AppState`.

#[macro_export]
macro_rules! api_tests {
    ($state_factory:expr) => {
        mod api_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{json, Value};

            async fn make_server() -> TestServer {
                let state: biztime::AppState = $state_factory.await;
                TestServer::new(biztime::app(state)).unwrap()
            }

            async fn add_company(server: &TestServer, code: &str, name: &str, description: &str) {
                server
                    .post("/companies")
                    .json(&json!({"code": code, "name": name, "description": description}))
                    .await
                    .assert_status(StatusCode::CREATED);
            }

            async fn add_invoice(server: &TestServer, comp_code: &str, amt: f64) -> Value {
                let response = server
                    .post("/invoices")
                    .json(&json!({"comp_code": comp_code, "amt": amt}))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json::<Value>()["invoice"].clone()
            }

            async fn seed_big_two(server: &TestServer) {
                add_company(server, "ibm", "IBM", "Big blue.").await;
                add_company(server, "apple", "Apple Computer", "Maker of OSX.").await;
            }

            fn assert_error(body: &Value, status: u16) {
                assert_eq!(body["error"]["status"], status);
                assert!(body["error"]["message"].is_string());
            }

            // ==============================================================
            // Companies
            // ==============================================================

            #[tokio::test]
            async fn list_companies_ordered_by_code() {
                let server = make_server().await;
                seed_big_two(&server).await;

                let response = server.get("/companies").await;
                response.assert_status_ok();
                response.assert_json(&json!({
                    "companies": [
                        {"code": "apple", "name": "Apple Computer", "description": "Maker of OSX."},
                        {"code": "ibm", "name": "IBM", "description": "Big blue."}
                    ]
                }));
            }

            #[tokio::test]
            async fn list_companies_empty() {
                let server = make_server().await;
                server
                    .get("/companies")
                    .await
                    .assert_json(&json!({"companies": []}));
            }

            #[tokio::test]
            async fn created_company_reads_back_identically() {
                let server = make_server().await;
                let response = server
                    .post("/companies")
                    .json(&json!({"code": "acme", "name": "Acme Corp", "description": "Anvils."}))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.assert_json(&json!({
                    "company": {"code": "acme", "name": "Acme Corp", "description": "Anvils."}
                }));

                let response = server.get("/companies/acme").await;
                response.assert_status_ok();
                response.assert_json(&json!({
                    "company": {
                        "code": "acme",
                        "name": "Acme Corp",
                        "description": "Anvils.",
                        "invoices": []
                    }
                }));
            }

            #[tokio::test]
            async fn company_lists_its_invoice_ids() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let first = add_invoice(&server, "apple", 100.0).await;
                add_invoice(&server, "ibm", 400.0).await;
                let second = add_invoice(&server, "apple", 200.0).await;

                let body: Value = server.get("/companies/apple").await.json();
                assert_eq!(
                    body["company"]["invoices"],
                    json!([{"id": first["id"]}, {"id": second["id"]}])
                );
            }

            #[tokio::test]
            async fn missing_company_is_404() {
                let server = make_server().await;
                let response = server.get("/companies/nope").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            #[tokio::test]
            async fn create_company_without_body_is_400() {
                let server = make_server().await;
                let response = server.post("/companies").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400);

                server
                    .get("/companies")
                    .await
                    .assert_json(&json!({"companies": []}));
            }

            #[tokio::test]
            async fn create_company_with_malformed_json_is_400() {
                let server = make_server().await;
                server
                    .post("/companies")
                    .content_type("application/json")
                    .bytes("{\"code\": ".into())
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn create_company_missing_fields_is_400() {
                let server = make_server().await;
                server
                    .post("/companies")
                    .json(&json!({"name": "No Code"}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
                server
                    .post("/companies")
                    .json(&json!({"code": "", "name": "Blank"}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn duplicate_company_is_generic_500() {
                let server = make_server().await;
                add_company(&server, "ibm", "IBM", "Big blue.").await;

                let response = server
                    .post("/companies")
                    .json(&json!({"code": "ibm", "name": "Other", "description": "x"}))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: Value = response.json();
                assert_error(&body, 500);
                assert_eq!(body["error"]["message"], "Internal Server Error");
            }

            #[tokio::test]
            async fn update_company_replaces_name_and_description() {
                let server = make_server().await;
                seed_big_two(&server).await;

                let response = server
                    .put("/companies/apple")
                    .json(&json!({"name": "Meta", "description": "Facebook."}))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!({
                    "company": {"code": "apple", "name": "Meta", "description": "Facebook."}
                }));
            }

            #[tokio::test]
            async fn update_company_without_body_is_400() {
                let server = make_server().await;
                seed_big_two(&server).await;
                server
                    .put("/companies/apple")
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn update_missing_company_is_404() {
                let server = make_server().await;
                let response = server
                    .put("/companies/nope")
                    .json(&json!({"name": "Nope", "description": "Nothing."}))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            #[tokio::test]
            async fn delete_company_twice() {
                let server = make_server().await;
                seed_big_two(&server).await;

                let response = server.delete("/companies/ibm").await;
                response.assert_status_ok();
                response.assert_json(&json!({"message": "deleted"}));

                let response = server.delete("/companies/ibm").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            #[tokio::test]
            async fn deleting_company_removes_its_invoices() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let doomed = add_invoice(&server, "ibm", 400.0).await;
                add_invoice(&server, "apple", 100.0).await;

                server.delete("/companies/ibm").await.assert_status_ok();
                server
                    .get(&format!("/invoices/{}", doomed["id"]))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                let body: Value = server.get("/invoices").await.json();
                assert_eq!(body["invoices"].as_array().unwrap().len(), 1);
            }

            // ==============================================================
            // Invoices
            // ==============================================================

            #[tokio::test]
            async fn create_invoice_takes_defaults() {
                let server = make_server().await;
                seed_big_two(&server).await;

                let response = server
                    .post("/invoices")
                    .json(&json!({"comp_code": "apple", "amt": 100}))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                let invoice = &body["invoice"];
                assert!(invoice["id"].is_i64());
                assert_eq!(invoice["comp_code"], "apple");
                assert_eq!(invoice["amt"], 100.0);
                assert_eq!(invoice["paid"], false);
                assert!(invoice["add_date"].is_string());
                assert!(invoice["paid_date"].is_null());
            }

            #[tokio::test]
            async fn create_invoice_without_body_is_400() {
                let server = make_server().await;
                let response = server.post("/invoices").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400);
            }

            #[tokio::test]
            async fn create_invoice_with_mistyped_amount_is_400() {
                let server = make_server().await;
                seed_big_two(&server).await;
                server
                    .post("/invoices")
                    .json(&json!({"comp_code": "apple", "amt": "lots"}))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn create_invoice_for_unknown_company_is_500() {
                let server = make_server().await;
                let response = server
                    .post("/invoices")
                    .json(&json!({"comp_code": "ghost", "amt": 10}))
                    .await;
                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                assert_error(&response.json(), 500);
            }

            #[tokio::test]
            async fn list_invoices_ordered_by_id() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let a = add_invoice(&server, "ibm", 400.0).await;
                let b = add_invoice(&server, "apple", 100.0).await;
                let c = add_invoice(&server, "apple", 200.0).await;

                let response = server.get("/invoices").await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["invoices"], json!([a, b, c]));
            }

            #[tokio::test]
            async fn invoice_nests_its_company() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let created = add_invoice(&server, "ibm", 400.0).await;

                let response = server.get(&format!("/invoices/{}", created["id"])).await;
                response.assert_status_ok();
                let body: Value = response.json();
                let invoice = &body["invoice"];
                assert_eq!(invoice["id"], created["id"]);
                assert_eq!(invoice["comp_code"], "ibm");
                assert_eq!(invoice["amt"], 400.0);
                assert_eq!(
                    invoice["company"],
                    json!({"code": "ibm", "name": "IBM", "description": "Big blue."})
                );
            }

            #[tokio::test]
            async fn missing_invoice_is_404() {
                let server = make_server().await;
                let response = server.get("/invoices/999").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            #[tokio::test]
            async fn non_numeric_invoice_id_is_400() {
                let server = make_server().await;
                let response = server.get("/invoices/abc").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400);
            }

            #[tokio::test]
            async fn update_invoice_changes_amount_only() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let before = add_invoice(&server, "apple", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", before["id"]))
                    .json(&json!({"amt": 250.5}))
                    .await;
                response.assert_status_ok();
                let body: Value = response.json();
                let after = &body["invoice"];
                assert_eq!(after["amt"], 250.5);
                assert_eq!(after["id"], before["id"]);
                assert_eq!(after["comp_code"], before["comp_code"]);
                assert_eq!(after["paid"], before["paid"]);
                assert_eq!(after["add_date"], before["add_date"]);
                assert_eq!(after["paid_date"], before["paid_date"]);
            }

            #[tokio::test]
            async fn update_invoice_without_body_is_400() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let inv = add_invoice(&server, "apple", 100.0).await;
                server
                    .put(&format!("/invoices/{}", inv["id"]))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn update_missing_invoice_is_404() {
                let server = make_server().await;
                server
                    .put("/invoices/999")
                    .json(&json!({"amt": 5}))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn delete_invoice_twice() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let inv = add_invoice(&server, "apple", 100.0).await;
                let path = format!("/invoices/{}", inv["id"]);

                let response = server.delete(&path).await;
                response.assert_status_ok();
                response.assert_json(&json!({"status": "deleted"}));

                let response = server.delete(&path).await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }

            // ==============================================================
            // Operational routes and fallback
            // ==============================================================

            #[tokio::test]
            async fn health_ready_version() {
                let server = make_server().await;
                server.get("/health").await.assert_json(&json!({"status": "ok"}));
                let response = server.get("/ready").await;
                response.assert_status_ok();
                response.assert_json(&json!({"status": "ok", "database": "ok"}));
                let body: Value = server.get("/version").await.json();
                assert_eq!(body["name"], "biztime");
            }

            #[tokio::test]
            async fn unsupported_method_is_405_envelope() {
                let server = make_server().await;
                seed_big_two(&server).await;
                let response = server
                    .patch("/companies/apple")
                    .json(&json!({"name": "Meta"}))
                    .await;
                response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
                assert_error(&response.json(), 405);
            }

            #[tokio::test]
            async fn oversized_body_is_rejected_before_the_store() {
                let server = make_server().await;
                let description = "x".repeat(biztime::routes::MAX_BODY_BYTES + 1);
                let response = server
                    .post("/companies")
                    .json(&json!({"code": "big", "name": "Big", "description": description}))
                    .await;
                let status = response.status_code();
                assert!(
                    status == StatusCode::PAYLOAD_TOO_LARGE || status == StatusCode::BAD_REQUEST,
                    "unexpected status {}",
                    status
                );
                assert_error(&response.json(), status.as_u16());

                server
                    .get("/companies")
                    .await
                    .assert_json(&json!({"companies": []}));
            }

            #[tokio::test]
            async fn unknown_route_is_404_envelope() {
                let server = make_server().await;
                let response = server.get("/nowhere").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404);
            }
        }
    };
}
