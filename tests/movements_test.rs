/*!
 * Movement Handler Integration Tests
 *
 * Drives the real router over in-memory stores.
 *
 * Test Categories:
 * - Create (generated ids, overwrite on existing id, decimal amounts)
 * - List (envelope shape, integer collapse of whole amounts)
 * - Partial update (empty bodies, untouched fields, explicit nulls)
 * - Delete (idempotent)
 * - Preflight, unsupported methods and failure bodies
 */

mod common;

use std::str::FromStr;

use axum::http::StatusCode;
use common::*;
use flatout_server::store::MovementStore;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use uuid::Uuid;

fn find<'a>(list: &'a Value, id: &str) -> &'a Value {
    list["movements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == id)
        .unwrap_or_else(|| panic!("movement {} not listed", id))
}

#[tokio::test]
async fn create_without_id_generates_distinct_uuids() {
    let app = test_app();

    let first = send(&app.router, "POST", "/movements", Some(json!({ "nome": "Feira" }))).await;
    let second = send(&app.router, "POST", "/movements", Some(json!({ "nome": "Feira" }))).await;

    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(second.status, StatusCode::CREATED);
    assert_movement_cors(&first);

    let first_id = first.json()["movement"]["id"].as_str().unwrap().to_string();
    let second_id = second.json()["movement"]["id"].as_str().unwrap().to_string();

    assert!(Uuid::parse_str(&first_id).is_ok());
    assert!(Uuid::parse_str(&second_id).is_ok());
    assert_ne!(first_id, second_id);
    assert_eq!(app.movements.scan().await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_echoes_the_full_item() {
    let app = test_app();

    let response = send(
        &app.router,
        "POST",
        "/movements",
        Some(json!({
            "id": "m-1",
            "data": "2025-03-10",
            "categoria": "mercado",
            "nome": "Feira",
            "moeda": "BRL",
            "valor": 87.4,
            "observacao": "semana"
        })),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.json(),
        json!({
            "message": "movement created",
            "movement": {
                "id": "m-1",
                "data": "2025-03-10",
                "categoria": "mercado",
                "nome": "Feira",
                "moeda": "BRL",
                "valor": 87.4,
                "observacao": "semana",
                "lembrar_proxima_compra": false
            }
        })
    );

    let stored = app.movements.get("m-1").await.unwrap().unwrap();
    assert_eq!(stored.valor, Some(Decimal::from_str("87.4").unwrap()));
}

#[tokio::test]
async fn create_with_existing_id_replaces_the_item() {
    let app = test_app();

    send(
        &app.router,
        "POST",
        "/movements",
        Some(json!({ "id": "m-1", "nome": "Antigo", "moeda": "BRL" })),
    )
    .await;
    send(
        &app.router,
        "POST",
        "/movements",
        Some(json!({ "id": "m-1", "nome": "Novo" })),
    )
    .await;

    let stored = app.movements.get("m-1").await.unwrap().unwrap();
    assert_eq!(stored.nome.as_deref(), Some("Novo"));
    assert_eq!(stored.moeda, None);
    assert_eq!(app.movements.scan().await.unwrap().len(), 1);
}

#[tokio::test]
async fn whole_amounts_list_as_integers() {
    let app = test_app();

    send(&app.router, "POST", "/movements", Some(json!({ "id": "whole", "valor": 100 }))).await;
    send(&app.router, "POST", "/movements", Some(json!({ "id": "fraction", "valor": 100.5 }))).await;

    let response = send(&app.router, "GET", "/movements", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_movement_cors(&response);

    let list = response.json();
    assert_eq!(list["movements"].as_array().unwrap().len(), 2);

    let whole = &find(&list, "whole")["valor"];
    assert!(whole.is_i64());
    assert_eq!(whole.as_i64(), Some(100));
    assert!(response.text.contains(r#""valor":100,"#) || response.text.contains(r#""valor":100}"#));

    let fraction = &find(&list, "fraction")["valor"];
    assert!(fraction.is_f64());
    assert_eq!(fraction.as_f64(), Some(100.5));
}

#[tokio::test]
async fn list_on_item_path_returns_everything() {
    let app = test_app();

    send(&app.router, "POST", "/movements", Some(json!({ "id": "a" }))).await;
    send(&app.router, "POST", "/movements", Some(json!({ "id": "b" }))).await;

    let response = send(&app.router, "GET", "/movements/a", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["movements"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_put_is_rejected_whether_or_not_the_id_exists() {
    let app = test_app();
    send(&app.router, "POST", "/movements", Some(json!({ "id": "m-1", "nome": "Feira" }))).await;

    for uri in ["/movements/m-1", "/movements/missing"] {
        for body in ["", "{}", "null", "[]", "\"\"", "0", "false"] {
            let response = send_raw(&app.router, "PUT", uri, body).await;

            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri} {body:?}");
            assert_eq!(response.json(), json!({ "message": "no data to update" }));
            assert_movement_cors(&response);
        }
    }

    assert!(app.movements.get("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn put_with_only_unknown_keys_returns_the_stored_item() {
    let app = test_app();
    send(
        &app.router,
        "POST",
        "/movements",
        Some(json!({ "id": "m-1", "nome": "Feira", "valor": 12 })),
    )
    .await;

    let response = send(
        &app.router,
        "PUT",
        "/movements/m-1",
        Some(json!({ "unrelated": true })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["message"], "movement updated");
    assert_eq!(body["movement"]["nome"], "Feira");
    assert_eq!(body["movement"]["valor"], 12);
    assert!(body["movement"].get("unrelated").is_none());
    assert_movement_cors(&response);
}

#[tokio::test]
async fn put_with_only_unknown_keys_on_missing_id_creates_it() {
    let app = test_app();

    let response = send(
        &app.router,
        "PUT",
        "/movements/m-new",
        Some(json!({ "unrelated": true })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["movement"]["id"], "m-new");
    let stored = app.movements.get("m-new").await.unwrap().unwrap();
    assert_eq!(stored.nome, None);
}

#[tokio::test]
async fn put_only_touches_sent_fields() {
    let app = test_app();
    send(
        &app.router,
        "POST",
        "/movements",
        Some(json!({
            "id": "m-1",
            "data": "2025-03-10",
            "categoria": "mercado",
            "nome": "Feira",
            "moeda": "BRL",
            "valor": 87.4,
            "observacao": "semana",
            "lembrar_proxima_compra": true
        })),
    )
    .await;

    let response = send(
        &app.router,
        "PUT",
        "/movements/m-1",
        Some(json!({ "nome": "Sacolao" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_movement_cors(&response);
    assert_eq!(
        response.json(),
        json!({
            "message": "movement updated",
            "movement": {
                "id": "m-1",
                "data": "2025-03-10",
                "categoria": "mercado",
                "nome": "Sacolao",
                "moeda": "BRL",
                "valor": 87.4,
                "observacao": "semana",
                "lembrar_proxima_compra": true
            }
        })
    );
}

#[tokio::test]
async fn put_converts_valor_and_clears_nulls() {
    let app = test_app();
    send(
        &app.router,
        "POST",
        "/movements",
        Some(json!({ "id": "m-1", "valor": 10.25, "observacao": "nota" })),
    )
    .await;

    let response = send(
        &app.router,
        "PUT",
        "/movements/m-1",
        Some(json!({ "valor": "250.00", "observacao": null })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let movement = &response.json()["movement"];
    assert_eq!(movement["valor"], json!(250));
    assert_eq!(movement["observacao"], Value::Null);

    let stored = app.movements.get("m-1").await.unwrap().unwrap();
    assert_eq!(stored.valor, Some(Decimal::from_str("250.00").unwrap()));
    assert_eq!(stored.observacao, None);
}

#[tokio::test]
async fn put_decodes_the_path_id() {
    let app = test_app();
    send(&app.router, "POST", "/movements", Some(json!({ "id": "conta luz" }))).await;

    let response = send(
        &app.router,
        "PUT",
        "/movements/conta%20luz",
        Some(json!({ "moeda": "EUR" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["movement"]["id"], "conta luz");
}

#[tokio::test]
async fn delete_removes_the_item() {
    let app = test_app();
    send(&app.router, "POST", "/movements", Some(json!({ "id": "m-1" }))).await;

    let response = send(&app.router, "DELETE", "/movements/m-1", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "message": "movement deleted" }));
    assert!(app.movements.get("m-1").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_of_unknown_id_still_succeeds() {
    let app = test_app();

    let response = send(&app.router, "DELETE", "/movements/never-existed", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "message": "movement deleted" }));
    assert_movement_cors(&response);
}

#[tokio::test]
async fn options_answers_preflight_on_every_path() {
    let app = test_app();

    for uri in ["/movements", "/movements/any-id"] {
        let response = send(&app.router, "OPTIONS", uri, None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.text.is_empty());
        assert_movement_cors(&response);
    }
}

#[tokio::test]
async fn unsupported_methods_get_405() {
    let app = test_app();

    let cases = [
        ("PATCH", "/movements"),
        ("PATCH", "/movements/m-1"),
        ("PUT", "/movements"),
        ("DELETE", "/movements"),
    ];

    for (method, uri) in cases {
        let response = send(&app.router, method, uri, Some(json!({ "nome": "x" }))).await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(response.json(), json!({ "message": "method not supported" }));
        assert_movement_cors(&response);
    }
}

#[tokio::test]
async fn head_is_not_served_as_get() {
    let app = test_app();
    send(&app.router, "POST", "/movements", Some(json!({ "id": "m-1" }))).await;

    for uri in ["/movements", "/movements/m-1"] {
        let response = send(&app.router, "HEAD", uri, None).await;

        // HEAD responses carry no body; status and headers are what matter
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_movement_cors(&response);
    }
}

#[tokio::test]
async fn string_encoded_body_is_not_decoded_twice() {
    let app = test_app();
    let encoded = json!(json!({ "id": "m-1", "nome": "Feira" }).to_string()).to_string();

    let response = send_raw(&app.router, "POST", "/movements", &encoded).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["message"], "error updating movement");
    assert!(app.movements.get("m-1").await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_body_is_an_unexpected_error() {
    let app = test_app();

    let response = send_raw(&app.router, "POST", "/movements", "{not json").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["message"], "error updating movement");
    assert!(body["error"].is_string());
    assert_movement_cors(&response);
}

#[tokio::test]
async fn store_failures_are_reported_as_store_errors() {
    let router = failing_app();

    let requests = [
        ("GET", "/movements", None),
        ("POST", "/movements", Some(json!({ "nome": "x" }))),
        ("PUT", "/movements/m-1", Some(json!({ "nome": "x" }))),
        ("DELETE", "/movements/m-1", None),
    ];

    for (method, uri, body) in requests {
        let response = send(&router, method, uri, body).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        let body = response.json();
        assert_eq!(body["message"], "error accessing store");
        assert!(body["error"].as_str().unwrap().contains("pool timed out"));
        assert_movement_cors(&response);
    }
}

#[tokio::test]
async fn empty_put_is_rejected_before_the_store_is_called() {
    let router = failing_app();

    let response = send_raw(&router, "PUT", "/movements/m-1", "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
