//! AWS Lambda handler for company comparisons
//!
//! Accepts the comparison settings plus the standard-comparison company
//! payload as JSON and returns the comparison table.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{error, info};
use policy_returns::policy::company_tables_from_value;
use policy_returns::{ComparisonConfig, ComparisonEngine, ComparisonTable};
use serde::{Deserialize, Serialize};

/// Input for one comparison
#[derive(Debug, Deserialize)]
pub struct ComparisonRequest {
    /// Settings; every field is optional and falls back to its default
    #[serde(flatten)]
    pub config: ComparisonConfig,

    /// Companies as returned by `/api/insurance-companies/standard-comparison/`
    pub companies: serde_json::Value,
}

/// Output of a comparison
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    #[serde(flatten)]
    pub table: ComparisonTable,
    pub execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &ComparisonResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ComparisonRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let products = match company_tables_from_value(request.companies) {
        Ok(p) => p,
        Err(e) => return error_response(400, &format!("Invalid company data: {}", e)),
    };

    let table = match ComparisonEngine::new(request.config).compare(&products) {
        Ok(t) => t,
        Err(e) => {
            error!("comparison failed: {}", e);
            return error_response(422, &e.to_string());
        }
    };

    info!(
        "compared {} companies over {} years",
        table.products.len(),
        table.target_years.len()
    );

    json_response(&ComparisonResponse {
        table,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
