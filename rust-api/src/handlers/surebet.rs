use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::debug;

use super::AppState;
use crate::analysis::BatchAnalyzer;
use crate::core::SurebetCalculator;
use crate::error::{validate_batch_size, AppError};
use crate::models::{BatchRequest, OddsRow, SurebetRequest, SurebetResponse};

/// Calculate the stake distribution for one set of odds
pub async fn calculate(
    state: web::Data<Arc<AppState>>,
    req: web::Json<SurebetRequest>,
) -> Result<HttpResponse, AppError> {
    let total_stake = req.total_stake.unwrap_or(state.default_stake);
    let calculator = SurebetCalculator::new(total_stake);
    let result = calculator.evaluate(&req.odds)?;

    debug!(
        "odds {:?} stake {}: surebet {}",
        req.odds,
        total_stake,
        result.is_some()
    );

    Ok(HttpResponse::Ok().json(SurebetResponse::new(&req.odds, total_stake, result)))
}

/// Evaluate many odds rows with one shared stake
pub async fn calculate_batch(
    state: web::Data<Arc<AppState>>,
    req: web::Json<BatchRequest>,
) -> Result<HttpResponse, AppError> {
    validate_batch_size(req.rows.len())?;

    let total_stake = req.total_stake.unwrap_or(state.default_stake);
    let rows = OddsRow::from_odds_lists(req.into_inner().rows);
    let analyzer = BatchAnalyzer::new(SurebetCalculator::new(total_stake));
    let report = analyzer.analyze(&rows)?;

    Ok(HttpResponse::Ok().json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    fn app_state() -> web::Data<Arc<AppState>> {
        web::Data::new(Arc::new(AppState::default()))
    }

    #[actix_web::test]
    async fn test_calculate_surebet_found() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/surebet", web::post().to(calculate)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/surebet")
            .set_json(json!({ "odds": [2.1, 2.1], "total_stake": 100.0 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["found"], true);
        assert_eq!(body["bet_type"], "two_way");
        assert_eq!(body["labels"], json!(["A1", "A2"]));
        let profit = body["result"]["profit"].as_f64().unwrap();
        assert!((profit - 5.0).abs() < 0.0001);
    }

    #[actix_web::test]
    async fn test_calculate_no_surebet_uses_default_stake() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/surebet", web::post().to(calculate)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/surebet")
            .set_json(json!({ "odds": [2.0, 2.0] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["found"], false);
        assert_eq!(body["total_stake"], 100.0);
        assert!(body.get("result").is_none());
    }

    #[actix_web::test]
    async fn test_calculate_rejects_invalid_odds() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/surebet", web::post().to(calculate)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/surebet")
            .set_json(json!({ "odds": [1.0, 3.0] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[actix_web::test]
    async fn test_calculate_rejects_zero_stake() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/surebet", web::post().to(calculate)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/surebet")
            .set_json(json!({ "odds": [2.1, 2.1], "total_stake": 0.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("total stake must be a positive amount"));
    }

    #[actix_web::test]
    async fn test_batch_rejects_negative_stake() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/surebet/batch", web::post().to(calculate_batch)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/surebet/batch")
            .set_json(json!({ "rows": [[2.1, 2.1]], "total_stake": -5.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_batch_preserves_row_indices() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .route("/surebet/batch", web::post().to(calculate_batch)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/surebet/batch")
            .set_json(json!({
                "rows": [[2.1, 2.1], [2.0, 2.0], [2.5, 3.2, 3.5], [4.0]],
                "total_stake": 100.0
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let hits = body["hits"].as_array().unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0]["row_index"], 1);
        assert_eq!(hits[1]["row_index"], 3);
        assert_eq!(hits[1]["profit"], 0.18);
        assert_eq!(body["no_arbitrage_rows"], 1);
        assert_eq!(body["skipped"][0]["row_index"], 4);
        assert_eq!(body["metrics"]["surebet_rows"], 2);
    }
}
