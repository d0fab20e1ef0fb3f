//! Serve command - Expose orchestration over HTTP.
//!
//! `POST /api/orchestrate` accepts `{requirement_link?, requirement_summary?}`
//! and answers with the orchestration report. Failures use the
//! `{ok: false, error}` envelope: 400 for an unusable request, 500 otherwise.

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{post, web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{error, info, warn};

use stlc_integrations::{IntegrationError, OrchestrateRequest, Orchestrator};

use super::load_config;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides STLC_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "STLC_CONFIG")]
    config: Option<PathBuf>,
}

/// Error envelope returned by the API.
#[derive(Debug, Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

fn error_response(err: &IntegrationError) -> HttpResponse {
    let body = ErrorBody {
        ok: false,
        error: err.to_string(),
    };
    if err.is_client_error() {
        warn!("Rejected request: {}", err);
        HttpResponse::BadRequest().json(body)
    } else {
        error!("Orchestration failed: {}", err);
        HttpResponse::InternalServerError().json(body)
    }
}

#[post("/orchestrate")]
async fn orchestrate(
    orchestrator: web::Data<Orchestrator>,
    body: Option<web::Json<OrchestrateRequest>>,
) -> HttpResponse {
    // A missing or malformed body is treated like an empty request.
    let request = body.map(web::Json::into_inner).unwrap_or_default();

    match orchestrator.orchestrate(&request).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

/// Register the API routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(orchestrate));
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(host) = args.host {
        config.http.host = host;
    }

    let address = (config.http.host.clone(), config.http.port);
    let orchestrator = web::Data::new(Orchestrator::from_config(config)?);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(orchestrator.clone())
            .configure(routes)
    })
    .bind(address.clone())
    .with_context(|| format!("Failed to bind {}:{}", address.0, address.1))?
    .run();

    info!("Server running on {}:{}", address.0, address.1);
    println!("🌐 Listening on http://{}:{}/api/orchestrate", address.0, address.1);

    server.await.context("HTTP server stopped with an error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::{json, Value};
    use stlc_integrations::IntegrationConfig;

    fn state() -> web::Data<Orchestrator> {
        web::Data::new(Orchestrator::from_config(IntegrationConfig::default()).unwrap())
    }

    #[actix_web::test]
    async fn test_orchestrate_with_summary() {
        let app = actix_test::init_service(App::new().app_data(state()).configure(routes)).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/orchestrate")
            .set_json(json!({ "requirement_summary": "User login with username and password" }))
            .to_request();

        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["requirement_summary"], "User login with username and password");
        assert!(body["requirement_link"].is_null());
        assert_eq!(body["generated_test_cases"][0]["id"], "REQUNKNOWN-TC-001");
        assert_eq!(body["automation_code"]["framework"], "Cypress");
        assert_eq!(body["qmetry_payloads"]["dry_run"], true);
        assert_eq!(
            body["execution_results"].as_array().map(Vec::len),
            body["generated_test_cases"].as_array().map(Vec::len)
        );
    }

    #[actix_web::test]
    async fn test_orchestrate_with_link_falls_back_to_mock() {
        let app = actix_test::init_service(App::new().app_data(state()).configure(routes)).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/orchestrate")
            .set_json(json!({ "requirement_link": "https://acme.atlassian.net/browse/ABC-1" }))
            .to_request();

        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["requirement_summary"], "Mock summary for ABC-1");
        assert_eq!(body["requirement_link"], "https://acme.atlassian.net/browse/ABC-1");
        assert_eq!(body["generated_test_cases"][0]["id"], "ABC1-TC-001");
    }

    #[actix_web::test]
    async fn test_empty_request_is_rejected() {
        let app = actix_test::init_service(App::new().app_data(state()).configure(routes)).await;

        for req in [
            actix_test::TestRequest::post()
                .uri("/api/orchestrate")
                .set_json(json!({}))
                .to_request(),
            actix_test::TestRequest::post()
                .uri("/api/orchestrate")
                .set_json(json!({ "requirement_summary": "" }))
                .to_request(),
            actix_test::TestRequest::post().uri("/api/orchestrate").to_request(),
        ] {
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = actix_test::read_body_json(resp).await;
            assert_eq!(
                body,
                json!({ "ok": false, "error": "Provide requirement_link or requirement_summary" })
            );
        }
    }

    #[test]
    fn test_error_status_mapping() {
        let err = IntegrationError::invalid_setting("PORT", "not a port");
        assert_eq!(error_response(&err).status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = IntegrationError::MissingRequirement;
        assert_eq!(error_response(&err).status(), StatusCode::BAD_REQUEST);
    }
}
