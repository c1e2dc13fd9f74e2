//! Router-level tests against an in-memory store.
//!
//! The auth middleware lives in the server crate; here each test router is
//! layered with a fixed [`Identity`] extension, the way the middleware
//! would insert one after resolving a session.

use std::sync::Arc;

use axum::{
  Extension, Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use berth_core::{
  catalog::Catalog,
  identity::{Identity, Role},
  lifecycle::Lifecycle,
};
use berth_store_memory::MemoryStore;
use chrono::{Days, Utc};
use serde_json::{Value, json};
use tower::util::ServiceExt as _;

use crate::api_router;

fn lifecycle() -> Arc<Lifecycle<MemoryStore>> {
  Arc::new(Lifecycle::new(MemoryStore::new(), Catalog::club_fleet()))
}

fn router_for(
  lifecycle: &Arc<Lifecycle<MemoryStore>>,
  identity: Identity,
) -> Router {
  api_router(Arc::clone(lifecycle)).layer(Extension(identity))
}

fn member(name: &str) -> Identity {
  Identity::new(name, Role::Member)
}

fn tomorrow() -> String {
  (Utc::now().date_naive() + Days::new(1))
    .format("%Y-%m-%d")
    .to_string()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
  let response = router.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .unwrap();
  let body = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, body)
}

fn booking_body(yacht_id: &str, slot: &str, party_size: u64) -> Value {
  json!({
    "yacht_id": yacht_id,
    "date": tomorrow(),
    "time_slot": slot,
    "party_size": party_size,
  })
}

#[tokio::test]
async fn create_returns_201_with_the_pending_booking() {
  let lc = lifecycle();
  let alice = router_for(&lc, member("alice"));

  let (status, body) = send(
    &alice,
    json_request("POST", "/bookings", booking_body("yacht-1", "morning", 4)),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["status"], "pending");
  assert_eq!(body["owner"], "alice");
  assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn double_booking_maps_to_409() {
  let lc = lifecycle();
  let alice = router_for(&lc, member("alice"));
  let bob = router_for(&lc, member("bob"));

  let body = booking_body("yacht-1", "morning", 4);
  let (status, _) =
    send(&alice, json_request("POST", "/bookings", body.clone())).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, body) = send(&bob, json_request("POST", "/bookings", body)).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(body["error"].as_str().unwrap().contains("not available"));
}

#[tokio::test]
async fn capacity_exceeded_maps_to_400_and_cites_capacity() {
  let lc = lifecycle();
  let alice = router_for(&lc, member("alice"));

  let (status, body) = send(
    &alice,
    json_request("POST", "/bookings", booking_body("yacht-1", "morning", 9)),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains('8'));
}

#[tokio::test]
async fn unknown_booking_maps_to_404() {
  let lc = lifecycle();
  let alice = router_for(&lc, member("alice"));

  let (status, _) =
    send(&alice, json_request("PUT", "/bookings/999", json!({}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let request = Request::builder()
    .method("DELETE")
    .uri("/bookings/999")
    .body(Body::empty())
    .unwrap();
  let (status, _) = send(&alice, request).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_listing_is_403_for_everyone_else() {
  let lc = lifecycle();
  let alice = router_for(&lc, member("alice"));
  let commodore = router_for(&lc, Identity::new("commodore", Role::Admin));

  send(
    &alice,
    json_request("POST", "/bookings", booking_body("yacht-1", "morning", 4)),
  )
  .await;

  let (status, _) = send(&alice, get_request("/admin/bookings")).await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, body) = send(&commodore, get_request("/admin/bookings")).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn listing_supports_a_status_filter() {
  let lc = lifecycle();
  let alice = router_for(&lc, member("alice"));

  let (_, first) = send(
    &alice,
    json_request("POST", "/bookings", booking_body("yacht-1", "morning", 4)),
  )
  .await;
  send(
    &alice,
    json_request("POST", "/bookings", booking_body("yacht-1", "evening", 4)),
  )
  .await;

  let uri = format!("/bookings/{}", first["id"]);
  let request = Request::builder()
    .method("DELETE")
    .uri(uri)
    .body(Body::empty())
    .unwrap();
  let (status, _) = send(&alice, request).await;
  assert_eq!(status, StatusCode::OK);

  let (_, all) = send(&alice, get_request("/bookings")).await;
  assert_eq!(all.as_array().unwrap().len(), 2);

  let (_, cancelled) =
    send(&alice, get_request("/bookings?status=cancelled")).await;
  let cancelled = cancelled.as_array().unwrap();
  assert_eq!(cancelled.len(), 1);
  assert_eq!(cancelled[0]["id"], first["id"]);
  assert!(cancelled[0]["cancelled_at"].is_string());
}

#[tokio::test]
async fn the_fleet_is_listed_for_any_member() {
  let lc = lifecycle();
  let alice = router_for(&lc, member("alice"));

  let (status, body) = send(&alice, get_request("/yachts")).await;
  assert_eq!(status, StatusCode::OK);
  let fleet = body.as_array().unwrap();
  assert_eq!(fleet.len(), 8);
  assert_eq!(fleet[0]["id"], "yacht-1");
  assert_eq!(fleet[0]["capacity"], 8);
}
