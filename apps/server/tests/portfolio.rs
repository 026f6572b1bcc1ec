mod common;

use axum::http::StatusCode;
use common::{as_f64, spawn_app};
use serde_json::json;

#[tokio::test]
async fn portfolio_metrics_scenario() {
    let app = spawn_app(None).await;

    let (status, portfolio) = app
        .post(
            "/api/v1/portfolios",
            json!({ "userId": "user-1", "name": "Renewables", "riskTolerance": "moderate" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = portfolio["id"].as_str().unwrap().to_string();

    let (status, item) = app
        .post(
            &format!("/api/v1/portfolios/{id}/items"),
            json!({
                "acquisitionPrice": 100,
                "currentValue": 150,
                "metadata": { "sector": "solar", "riskLevel": "low", "site": "Mojave" }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["status"], "active");
    assert_eq!(item["metadata"]["site"], "Mojave");

    for (period, value) in [("2026-01-31", 0.1), ("2026-02-28", -0.05)] {
        let (status, _) = app
            .post(
                &format!("/api/v1/portfolios/{id}/performance"),
                json!({ "period": period, "return": value }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, metrics) = app.get(&format!("/api/v1/portfolios/{id}/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_f64(&metrics["totalValue"]), 150.0);
    assert_eq!(as_f64(&metrics["totalReturn"]), 50.0);
    assert_eq!(as_f64(&metrics["returnPercentage"]), 50.0);
    assert_eq!(as_f64(&metrics["winRate"]), 100.0);
    assert_eq!(as_f64(&metrics["diversificationScore"]), 20.0);
    assert!((as_f64(&metrics["maxDrawdown"]) - -0.05).abs() < 1e-9);

    let (status, recommendations) = app
        .get(&format!("/api/v1/portfolios/{id}/recommendations"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(recommendations
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["priority"] == "high" && r["sector"] == "solar"));

    let (status, summary) = app.get(&format!("/api/v1/portfolios/{id}/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["itemCount"], 1);
    assert_eq!(summary["portfolio"]["id"], id.as_str());

    let (status, listed) = app.get("/api/v1/portfolios?userId=user-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn item_valuation_and_status_changes() {
    let app = spawn_app(None).await;
    let (_, portfolio) = app
        .post("/api/v1/portfolios", json!({ "userId": "u", "name": "Wind" }))
        .await;
    let id = portfolio["id"].as_str().unwrap().to_string();
    let (_, item) = app
        .post(
            &format!("/api/v1/portfolios/{id}/items"),
            json!({ "acquisitionPrice": 200, "metadata": { "sector": "wind" } }),
        )
        .await;
    let item_id = item["id"].as_str().unwrap().to_string();
    assert_eq!(as_f64(&item["currentValue"]), 200.0);

    let (status, updated) = app
        .put(
            &format!("/api/v1/portfolios/{id}/items/{item_id}/valuation"),
            json!({ "currentValue": 180 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_f64(&updated["currentValue"]), 180.0);

    let (status, sold) = app
        .put(
            &format!("/api/v1/portfolios/{id}/items/{item_id}/status"),
            json!({ "status": "sold" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sold["status"], "sold");

    let (_, metrics) = app.get(&format!("/api/v1/portfolios/{id}/metrics")).await;
    assert_eq!(as_f64(&metrics["totalValue"]), 0.0);
    assert_eq!(metrics["activeItemCount"], 0);

    let (_, items) = app.get(&format!("/api/v1/portfolios/{id}/items")).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn portfolio_errors_map_to_statuses() {
    let app = spawn_app(None).await;

    let (status, body) = app.get("/api/v1/portfolios/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, _) = app.get("/api/v1/portfolios").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/v1/portfolios",
            json!({ "userId": "u", "name": "Over", "targetAllocation": { "solar": 70, "wind": 40 } }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, portfolio) = app
        .post("/api/v1/portfolios", json!({ "userId": "u", "name": "P" }))
        .await;
    let id = portfolio["id"].as_str().unwrap().to_string();
    let point = json!({ "period": "2026-03-31", "return": 0.02 });
    let (status, _) = app
        .post(&format!("/api/v1/portfolios/{id}/performance"), point.clone())
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post(&format!("/api/v1/portfolios/{id}/performance"), point)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn stateless_metrics_with_empty_input() {
    let app = spawn_app(None).await;
    let (status, body) = app.post("/api/v1/metrics/calculate", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_f64(&body["metrics"]["totalValue"]), 0.0);
    assert_eq!(as_f64(&body["metrics"]["returnPercentage"]), 0.0);
    assert_eq!(as_f64(&body["metrics"]["winRate"]), 0.0);
    assert_eq!(as_f64(&body["metrics"]["volatility"]), 0.0);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn stateless_metrics_overflow_is_an_error_response() {
    let app = spawn_app(None).await;
    let (status, body) = app
        .post(
            "/api/v1/metrics/calculate",
            json!({
                "performanceHistory": [
                    { "return": -7.9e28 },
                    { "return": 7.9e28 },
                    { "return": 7.9e28 }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert!(body["message"].as_str().unwrap().contains("overflow"));
}
