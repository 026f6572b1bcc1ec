mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{as_f64, spawn_app};
use serde_json::json;

#[tokio::test]
async fn listings_and_watchlist_flow() {
    let app = spawn_app(None).await;

    let (status, listing) = app
        .post(
            "/api/v1/listings",
            json!({
                "sellerId": "seller-1",
                "title": "Mojave Solar 40MW",
                "assetType": "solar",
                "capacityMw": 40,
                "askingPrice": 12500000,
                "status": "active"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let listing_id = listing["id"].as_str().unwrap().to_string();
    assert_eq!(as_f64(&listing["capacityMw"]), 40.0);

    let (status, filtered) = app.get("/api/v1/listings?assetType=solar&status=active").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    let (_, none) = app.get("/api/v1/listings?assetType=wind").await;
    assert!(none.as_array().unwrap().is_empty());

    let (status, _) = app.get("/api/v1/listings/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let entry = json!({ "userId": "buyer-1", "listingId": listing_id });
    let (status, first) = app.post("/api/v1/watchlist", entry.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = app.post("/api/v1/watchlist", entry).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);

    let (status, items) = app.get("/api/v1/watchlist?userId=buyer-1").await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["listing"]["title"], "Mojave Solar 40MW");

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/watchlist?userId=buyer-1&listingId={listing_id}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, items) = app.get("/api/v1/watchlist?userId=buyer-1").await;
    assert!(items.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn notifications_read_flow() {
    let app = spawn_app(None).await;
    for message in ["Ada followed you", "Bo liked your listing"] {
        let (status, _) = app
            .post(
                "/api/v1/notifications",
                json!({ "userId": "user-1", "actorId": "ada", "kind": "follow", "message": message }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, unread) = app
        .get("/api/v1/notifications?userId=user-1&unreadOnly=true")
        .await;
    let unread = unread.as_array().unwrap().clone();
    assert_eq!(unread.len(), 2);

    let first_id = unread[0]["id"].as_str().unwrap();
    let (status, read) = app
        .put(&format!("/api/v1/notifications/{first_id}/read"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["read"], true);

    let (status, body) = app
        .put("/api/v1/notifications/read-all?userId=user-1", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    let (_, unread) = app
        .get("/api/v1/notifications?userId=user-1&unreadOnly=true")
        .await;
    assert!(unread.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn letters_of_intent_are_not_implemented() {
    let app = spawn_app(None).await;
    let (status, body) = app
        .post(
            "/api/v1/lois",
            json!({ "listingId": "l1", "buyerId": "b1", "offeredPrice": 1000000 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["code"], 501);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("temporarily disabled"));

    let (status, _) = app.get("/api/v1/lois?userId=b1").await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn opportunities_scan_on_empty_sources() {
    let app = spawn_app(None).await;
    let (status, body) = app.get("/api/v1/opportunities?minScore=10&type=idle&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app.get("/api/v1/opportunities?type=bankrupt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn document_upload_is_served_from_storage() {
    let app = spawn_app(None).await;
    let boundary = "voltmarket-boundary";
    let multipart = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"path\"\r\n\r\nseller-1/deed.pdf\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"deed.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n%PDF-1.7 test\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/documents/listing-documents")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(multipart))
        .unwrap();
    let (status, document) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        document["publicUrl"],
        "http://localhost:8080/storage/listing-documents/seller-1/deed.pdf"
    );
    assert_eq!(document["size"], 13);

    let (status, url) = app
        .get("/api/v1/documents/listing-documents/url?path=seller-1/deed.pdf")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(url["publicUrl"], document["publicUrl"]);

    let (status, served) = app.get("/storage/listing-documents/seller-1/deed.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, "%PDF-1.7 test");

    let (status, _) = app
        .get("/api/v1/documents/listing-documents/url?path=missing.pdf")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get("/api/v1/documents/Bad_Bucket/url?path=a.pdf")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recent_realtime_events_follow_filters() {
    let app = spawn_app(None).await;
    for (user, message) in [
        ("user-1", "Ada followed you"),
        ("user-2", "Bo followed you"),
        ("user-1", "Cy followed you"),
    ] {
        let (status, _) = app
            .post(
                "/api/v1/notifications",
                json!({ "userId": user, "kind": "follow", "message": message }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, events) = app
        .get("/api/v1/realtime/notifications/recent?column=user_id&value=user-1")
        .await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "notification:created");
    assert_eq!(events[0]["payload"]["message"], "Ada followed you");
    assert_eq!(events[1]["payload"]["message"], "Cy followed you");

    let (_, all) = app.get("/api/v1/realtime/notifications/recent").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, _) = app.get("/api/v1/realtime/accounts/recent").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
