//! End-to-end tests driving the full HTTP stack
//!
//! Every test builds its own server over an empty in-memory database.

use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use creditscan::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .build()
        .expect("Failed to build app");
    TestServer::new(app)
}

fn as_user(request: TestRequest, user: Uuid) -> TestRequest {
    request.add_header("x-user-id", user.to_string())
}

fn as_superuser(request: TestRequest, user: Uuid) -> TestRequest {
    as_user(request, user).add_header("x-user-superuser", "true")
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("record without id").to_string()
}

async fn create(server: &TestServer, user: Uuid, path: &str, body: Value) -> Value {
    let response = as_user(server.post(path), user).json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn create_card(server: &TestServer, user: Uuid) -> Value {
    create(
        server,
        user,
        "/api/v1/cards",
        json!({
            "bank": "Acme Bank",
            "brand": "visa",
            "last4": "4242",
            "currency": "usd",
        }),
    )
    .await
}

async fn create_statement(server: &TestServer, user: Uuid, card_id: &str) -> Value {
    create(
        server,
        user,
        "/api/v1/card-statements",
        json!({
            "card_id": card_id,
            "period_start": "2024-01-01",
            "period_end": "2024-01-31",
            "close_date": "2024-01-31",
            "due_date": "2024-02-20",
            "current_balance": "100.00",
            "minimum_payment": "25.00",
            "is_fully_paid": false,
        }),
    )
    .await
}

async fn create_transaction(
    server: &TestServer,
    user: Uuid,
    statement_id: &str,
    payee: &str,
    amount: &str,
) -> Value {
    create(
        server,
        user,
        "/api/v1/transactions",
        json!({
            "statement_id": statement_id,
            "txn_date": "2024-01-15",
            "payee": payee,
            "amount": amount,
            "currency": "USD",
        }),
    )
    .await
}

async fn create_tag(server: &TestServer, user: Uuid, label: &str) -> Value {
    create(server, user, "/api/v1/tags", json!({ "label": label })).await
}

/// Card, statement and one transaction owned by `user`
async fn seed(server: &TestServer, user: Uuid) -> (Value, Value, Value) {
    let card = create_card(server, user).await;
    let statement = create_statement(server, user, &id_of(&card)).await;
    let transaction =
        create_transaction(server, user, &id_of(&statement), "Corner Market", "42.50").await;
    (card, statement, transaction)
}

// =============================================================================
// Health
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoints() {
        let server = create_test_server();

        for path in ["/health", "/healthz"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["status"], "ok");
        }
    }
}

// =============================================================================
// CRUD behaviour
// =============================================================================

mod crud_tests {
    use super::*;

    #[tokio::test]
    async fn test_collection_routes_accept_trailing_slash() {
        let server = create_test_server();
        let user = Uuid::new_v4();

        as_user(server.post("/api/v1/tags/"), user)
            .json(&json!({ "label": "travel" }))
            .await
            .assert_status(StatusCode::CREATED);

        let tags: Value = as_user(server.get("/api/v1/tags/"), user).await.json();
        assert_eq!(tags["count"], 1);

        let rules: Value = as_user(server.get("/api/v1/tag-rules/"), user).await.json();
        assert_eq!(rules["count"], 0);
    }

    #[tokio::test]
    async fn test_statement_lifecycle() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let card = create_card(&server, user).await;

        let statement = create_statement(&server, user, &id_of(&card)).await;
        let id = id_of(&statement);
        assert_eq!(statement["current_balance"], "100.00");
        assert_eq!(statement["is_fully_paid"], false);

        let fetched: Value = as_user(server.get(&format!("/api/v1/card-statements/{id}")), user)
            .await
            .json();
        assert_eq!(fetched, statement);

        let response = as_user(server.patch(&format!("/api/v1/card-statements/{id}")), user)
            .json(&json!({ "is_fully_paid": true }))
            .await;
        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["is_fully_paid"], true);
        assert_eq!(updated["current_balance"], "100.00");
        assert_eq!(updated["created_at"], statement["created_at"]);

        as_user(server.delete(&format!("/api/v1/card-statements/{id}")), user)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        as_user(server.get(&format!("/api/v1/card-statements/{id}")), user)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found_everywhere() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let path = format!("/api/v1/cards/{}", Uuid::new_v4());

        let response = as_user(server.get(&path), user).await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["code"], "NOT_FOUND");

        as_user(server.patch(&path), user)
            .json(&json!({ "alias": "x" }))
            .await
            .assert_status_not_found();
        as_user(server.delete(&path), user)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_partial_update_is_idempotent() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let card = create_card(&server, user).await;
        let path = format!("/api/v1/cards/{}", id_of(&card));

        let patch = json!({ "alias": "Groceries card" });
        let first: Value = as_user(server.patch(&path), user).json(&patch).await.json();
        let second: Value = as_user(server.patch(&path), user).json(&patch).await.json();

        for field in ["bank", "brand", "last4", "alias", "currency", "credit_limit"] {
            assert_eq!(first[field], second[field], "field {field}");
        }
        assert_eq!(second["alias"], "Groceries card");
        assert_eq!(second["bank"], card["bank"]);
    }

    #[tokio::test]
    async fn test_null_clears_nullable_field() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, _, transaction) = seed(&server, user).await;
        let path = format!("/api/v1/transactions/{}", id_of(&transaction));

        let kept: Value = as_user(server.patch(&path), user)
            .json(&json!({ "payee": "Market" }))
            .await
            .json();
        assert_eq!(kept["amount"], "42.50");

        let cleared: Value = as_user(server.patch(&path), user)
            .json(&json!({ "amount": null }))
            .await
            .json();
        assert_eq!(cleared["amount"], Value::Null);
        assert_eq!(cleared["payee"], "Market");
    }

    #[tokio::test]
    async fn test_dangling_reference_is_invalid() {
        let server = create_test_server();
        let user = Uuid::new_v4();

        let response = as_user(server.post("/api/v1/card-statements"), user)
            .json(&json!({
                "card_id": Uuid::new_v4(),
                "period_start": "2024-01-01",
                "period_end": "2024-01-31",
                "close_date": "2024-01-31",
                "due_date": "2024-02-20",
                "current_balance": "10",
            }))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_DATA");
    }

    #[tokio::test]
    async fn test_malformed_inputs_are_invalid() {
        let server = create_test_server();
        let user = Uuid::new_v4();

        as_user(server.get("/api/v1/cards/not-a-uuid"), user)
            .await
            .assert_status_bad_request();
        as_user(server.post("/api/v1/cards"), user)
            .json(&json!({ "bank": "Acme" }))
            .await
            .assert_status_bad_request();
        as_user(server.post("/api/v1/cards"), user)
            .json(&json!({
                "bank": "Acme",
                "brand": "visa",
                "last4": "42",
                "currency": "USD",
            }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_card_with_statements_cannot_be_deleted() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let card = create_card(&server, user).await;
        let statement = create_statement(&server, user, &id_of(&card)).await;
        let card_path = format!("/api/v1/cards/{}", id_of(&card));

        let response = as_user(server.delete(&card_path), user).await;
        response.assert_status(StatusCode::CONFLICT);

        as_user(
            server.delete(&format!("/api/v1/card-statements/{}", id_of(&statement))),
            user,
        )
        .await
        .assert_status(StatusCode::NO_CONTENT);
        as_user(server.delete(&card_path), user)
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_card_summary() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let card = create_card(&server, user).await;
        let card_id = id_of(&card);

        create_statement(&server, user, &card_id).await;
        create(
            &server,
            user,
            "/api/v1/card-statements",
            json!({
                "card_id": card_id,
                "period_start": "2024-02-01",
                "period_end": "2024-02-29",
                "close_date": "2024-02-29",
                "due_date": "2024-03-20",
                "current_balance": "250.00",
                "minimum_payment": "40.00",
            }),
        )
        .await;

        let summary: Value = as_user(server.get(&format!("/api/v1/cards/{card_id}/summary")), user)
            .await
            .json();
        assert_eq!(summary["statement_count"], 2);
        assert_eq!(summary["latest_balance"], "250.00");
        assert_eq!(summary["latest_close_date"], "2024-02-29");
        assert_eq!(summary["unpaid_minimum_total"], "65.00");
    }
}

// =============================================================================
// Listing
// =============================================================================

mod list_tests {
    use super::*;

    async fn seeded_tags(server: &TestServer, user: Uuid) {
        for label in ["bills", "coffee", "dining", "fuel", "travel"] {
            create_tag(server, user, label).await;
        }
    }

    #[tokio::test]
    async fn test_limit_bounds_page_and_count_ignores_paging() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        seeded_tags(&server, user).await;

        let page: Value = as_user(server.get("/api/v1/tags"), user)
            .add_query_param("limit", 2)
            .await
            .json();
        assert_eq!(page["data"].as_array().unwrap().len(), 2);
        assert_eq!(page["count"], 5);

        let tail: Value = as_user(server.get("/api/v1/tags"), user)
            .add_query_param("skip", 4)
            .add_query_param("limit", 2)
            .await
            .json();
        assert_eq!(tail["data"].as_array().unwrap().len(), 1);
        assert_eq!(tail["count"], 5);
    }

    #[tokio::test]
    async fn test_non_positive_limit_uses_default() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        seeded_tags(&server, user).await;

        for limit in [0, -3] {
            let page: Value = as_user(server.get("/api/v1/tags"), user)
                .add_query_param("limit", limit)
                .await
                .json();
            assert_eq!(page["data"].as_array().unwrap().len(), 5);
        }
    }

    #[tokio::test]
    async fn test_sorting_and_filtering() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        seeded_tags(&server, user).await;

        let page: Value = as_user(server.get("/api/v1/tags"), user)
            .add_query_param("sort_by", "label")
            .add_query_param("sort_order", "desc")
            .await
            .json();
        let labels: Vec<&str> = page["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["travel", "fuel", "dining", "coffee", "bills"]);

        let filtered: Value = as_user(server.get("/api/v1/tags"), user)
            .add_query_param("label", "fuel")
            .await
            .json();
        assert_eq!(filtered["count"], 1);
    }

    #[tokio::test]
    async fn test_unknown_filter_or_sort_field_is_rejected() {
        let server = create_test_server();
        let user = Uuid::new_v4();

        let response = as_user(server.get("/api/v1/tags"), user)
            .add_query_param("colour", "red")
            .await;
        response.assert_status_bad_request();

        as_user(server.get("/api/v1/tags"), user)
            .add_query_param("sort_by", "colour")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_extra_filter_on_known_field() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, statement, _) = seed(&server, user).await;
        create_transaction(&server, user, &id_of(&statement), "Airline", "900.00").await;

        let page: Value = as_user(server.get("/api/v1/transactions"), user)
            .add_query_param("payee", "Airline")
            .await
            .json();
        assert_eq!(page["count"], 1);
    }

    #[tokio::test]
    async fn test_transaction_range_filters() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, statement, _) = seed(&server, user).await;
        create_transaction(&server, user, &id_of(&statement), "Airline", "900.00").await;

        let page: Value = as_user(server.get("/api/v1/transactions"), user)
            .add_query_param("amount_min", "100")
            .await
            .json();
        assert_eq!(page["count"], 1);
        assert_eq!(page["data"][0]["payee"], "Airline");

        let none: Value = as_user(server.get("/api/v1/transactions"), user)
            .add_query_param("date_from", "2024-02-01")
            .await
            .json();
        assert_eq!(none["count"], 0);
    }
}

// =============================================================================
// Identity and ownership
// =============================================================================

mod ownership_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_or_malformed_identity_is_unauthorized() {
        let server = create_test_server();

        server
            .get("/api/v1/cards")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/api/v1/cards")
            .add_header("x-user-id", "someone")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_other_users_records_are_forbidden() {
        let server = create_test_server();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let (card, statement, transaction) = seed(&server, owner).await;

        for path in [
            format!("/api/v1/cards/{}", id_of(&card)),
            format!("/api/v1/card-statements/{}", id_of(&statement)),
            format!("/api/v1/transactions/{}", id_of(&transaction)),
        ] {
            as_user(server.get(&path), intruder)
                .await
                .assert_status(StatusCode::FORBIDDEN);
            as_user(server.delete(&path), intruder)
                .await
                .assert_status(StatusCode::FORBIDDEN);
        }

        as_user(server.post("/api/v1/transactions"), intruder)
            .json(&json!({
                "statement_id": id_of(&statement),
                "txn_date": "2024-01-20",
                "payee": "Sneaky",
                "currency": "USD",
            }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_lists_are_scoped_to_the_caller() {
        let server = create_test_server();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        seed(&server, alice).await;
        seed(&server, bob).await;

        for path in ["/api/v1/cards", "/api/v1/card-statements", "/api/v1/transactions"] {
            let page: Value = as_user(server.get(path), alice).await.json();
            assert_eq!(page["count"], 1, "{path}");

            let all: Value = as_superuser(server.get(path), Uuid::new_v4()).await.json();
            assert_eq!(all["count"], 2, "{path}");
        }

        as_user(server.get("/api/v1/cards"), alice)
            .add_query_param("user_id", bob.to_string())
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_superuser_creates_for_another_user() {
        let server = create_test_server();
        let admin = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let response = as_superuser(server.post("/api/v1/tags"), admin)
            .json(&json!({ "label": "imported", "user_id": owner }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let tag: Value = response.json();
        assert_eq!(tag["user_id"], owner.to_string());

        let ignored: Value = as_user(server.post("/api/v1/tags"), owner)
            .json(&json!({ "label": "mine", "user_id": admin }))
            .await
            .json();
        assert_eq!(ignored["user_id"], owner.to_string());
    }
}

// =============================================================================
// Tags and tagging
// =============================================================================

mod tag_tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_label_conflicts_per_user() {
        let server = create_test_server();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        create_tag(&server, alice, "coffee").await;

        as_user(server.post("/api/v1/tags"), alice)
            .json(&json!({ "label": "coffee" }))
            .await
            .assert_status(StatusCode::CONFLICT);
        create_tag(&server, bob, "coffee").await;
    }

    #[tokio::test]
    async fn test_manual_tagging() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, _, transaction) = seed(&server, user).await;
        let tag = create_tag(&server, user, "groceries").await;
        let tags_path = format!("/api/v1/transactions/{}/tags", id_of(&transaction));
        let link_path = format!("{tags_path}/{}", id_of(&tag));

        as_user(server.post(&link_path), user)
            .await
            .assert_status(StatusCode::CREATED);
        as_user(server.post(&link_path), user)
            .await
            .assert_status(StatusCode::CONFLICT);

        let tags: Value = as_user(server.get(&tags_path), user).await.json();
        assert_eq!(tags["count"], 1);
        assert_eq!(tags["data"][0]["label"], "groceries");

        as_user(server.delete(&link_path), user)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        as_user(server.delete(&link_path), user)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_tag_of_another_user_cannot_be_applied() {
        let server = create_test_server();
        let owner = Uuid::new_v4();
        let (_, _, transaction) = seed(&server, owner).await;
        let foreign = create_tag(&server, Uuid::new_v4(), "foreign").await;

        as_user(
            server.post(&format!(
                "/api/v1/transactions/{}/tags/{}",
                id_of(&transaction),
                id_of(&foreign)
            )),
            owner,
        )
        .await
        .assert_status(StatusCode::FORBIDDEN);

        as_user(server.post("/api/v1/transaction-tags"), owner)
            .json(&json!({ "transaction_id": id_of(&transaction), "tag_id": id_of(&foreign) }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_deleting_tag_removes_rules_and_applications() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, _, transaction) = seed(&server, user).await;
        let tag = create_tag(&server, user, "groceries").await;
        let rule = create(
            &server,
            user,
            "/api/v1/tag-rules",
            json!({ "tag_id": id_of(&tag), "payee_contains": "market" }),
        )
        .await;
        create(
            &server,
            user,
            "/api/v1/transaction-tags",
            json!({ "transaction_id": id_of(&transaction), "tag_id": id_of(&tag) }),
        )
        .await;

        as_user(server.delete(&format!("/api/v1/tags/{}", id_of(&tag))), user)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        as_user(server.get(&format!("/api/v1/tag-rules/{}", id_of(&rule))), user)
            .await
            .assert_status_not_found();
        let links: Value = as_user(server.get("/api/v1/transaction-tags"), user)
            .await
            .json();
        assert_eq!(links["count"], 0);
    }

    #[tokio::test]
    async fn test_deleting_transaction_removes_its_tags() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, _, transaction) = seed(&server, user).await;
        let tag = create_tag(&server, user, "groceries").await;
        as_user(
            server.post(&format!(
                "/api/v1/transactions/{}/tags/{}",
                id_of(&transaction),
                id_of(&tag)
            )),
            user,
        )
        .await
        .assert_status(StatusCode::CREATED);

        as_user(
            server.delete(&format!("/api/v1/transactions/{}", id_of(&transaction))),
            user,
        )
        .await
        .assert_status(StatusCode::NO_CONTENT);

        let links: Value = as_user(server.get("/api/v1/transaction-tags"), user)
            .await
            .json();
        assert_eq!(links["count"], 0);
        as_user(server.get(&format!("/api/v1/tags/{}", id_of(&tag))), user)
            .await
            .assert_status_ok();
    }
}

// =============================================================================
// Tag rules
// =============================================================================

mod tag_rule_tests {
    use super::*;

    #[tokio::test]
    async fn test_rule_needs_a_condition() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let tag = create_tag(&server, user, "misc").await;

        as_user(server.post("/api/v1/tag-rules"), user)
            .json(&json!({ "tag_id": id_of(&tag), "name": "catch-all" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_apply_dry_run_then_for_real() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, statement, market) = seed(&server, user).await;
        create_transaction(&server, user, &id_of(&statement), "Airline", "900.00").await;
        let tag = create_tag(&server, user, "groceries").await;
        let rule = create(
            &server,
            user,
            "/api/v1/tag-rules",
            json!({ "tag_id": id_of(&tag), "payee_contains": "MARKET" }),
        )
        .await;

        let dry: Value = as_user(server.post("/api/v1/tag-rules/apply"), user)
            .json(&json!({ "dry_run": true }))
            .await
            .json();
        assert_eq!(dry["evaluated_count"], 2);
        assert_eq!(dry["applied_count"], 1);
        assert_eq!(
            dry["details"],
            json!([{
                "transaction_id": id_of(&market),
                "tag_id": id_of(&tag),
                "rule_id": id_of(&rule),
            }])
        );

        let links: Value = as_user(server.get("/api/v1/transaction-tags"), user)
            .await
            .json();
        assert_eq!(links["count"], 0);

        let applied: Value = as_user(server.post("/api/v1/tag-rules/apply"), user)
            .json(&json!({}))
            .await
            .json();
        assert_eq!(applied["applied_count"], 1);
        assert!(applied.get("details").is_none());

        let again: Value = as_user(server.post("/api/v1/tag-rules/apply"), user)
            .json(&json!({ "statement_id": id_of(&statement) }))
            .await
            .json();
        assert_eq!(again["evaluated_count"], 2);
        assert_eq!(again["applied_count"], 0);

        let tags: Value = as_user(
            server.get(&format!("/api/v1/transactions/{}/tags", id_of(&market))),
            user,
        )
        .await
        .json();
        assert_eq!(tags["data"][0]["label"], "groceries");
    }

    #[tokio::test]
    async fn test_apply_ignores_disabled_rules_and_other_users() {
        let server = create_test_server();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        seed(&server, alice).await;
        seed(&server, bob).await;

        let tag = create_tag(&server, alice, "groceries").await;
        create(
            &server,
            alice,
            "/api/v1/tag-rules",
            json!({ "tag_id": id_of(&tag), "payee_contains": "market", "enabled": false }),
        )
        .await;

        let result: Value = as_user(server.post("/api/v1/tag-rules/apply"), alice)
            .json(&json!({ "dry_run": true }))
            .await
            .json();
        assert_eq!(result["evaluated_count"], 1);
        assert_eq!(result["applied_count"], 0);
    }

    #[tokio::test]
    async fn test_apply_narrowed_to_foreign_records_evaluates_nothing() {
        let server = create_test_server();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        seed(&server, alice).await;
        let (_, bob_statement, bob_transaction) = seed(&server, bob).await;

        let tag = create_tag(&server, alice, "groceries").await;
        create(
            &server,
            alice,
            "/api/v1/tag-rules",
            json!({ "tag_id": id_of(&tag), "payee_contains": "market" }),
        )
        .await;

        for body in [
            json!({ "transaction_id": id_of(&bob_transaction), "dry_run": true }),
            json!({ "statement_id": id_of(&bob_statement), "dry_run": true }),
            json!({ "transaction_id": Uuid::new_v4(), "dry_run": true }),
        ] {
            let response = as_user(server.post("/api/v1/tag-rules/apply"), alice)
                .json(&body)
                .await;
            response.assert_status_ok();
            let result: Value = response.json();
            assert_eq!(result["evaluated_count"], 0);
            assert_eq!(result["applied_count"], 0);
        }
    }

    #[tokio::test]
    async fn test_apply_date_range_accepts_datetimes() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        seed(&server, user).await;

        let inside: Value = as_user(server.post("/api/v1/tag-rules/apply"), user)
            .json(&json!({
                "date_from": "2024-01-01T00:00:00",
                "date_to": "2024-01-31T23:59:59Z",
                "dry_run": true,
            }))
            .await
            .json();
        assert_eq!(inside["evaluated_count"], 1);

        let outside: Value = as_user(server.post("/api/v1/tag-rules/apply"), user)
            .json(&json!({ "date_from": "2024-02-01", "dry_run": true }))
            .await
            .json();
        assert_eq!(outside["evaluated_count"], 0);
    }

    #[tokio::test]
    async fn test_rule_on_foreign_tag_is_forbidden() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let foreign = create_tag(&server, Uuid::new_v4(), "foreign").await;

        as_user(server.post("/api/v1/tag-rules"), user)
            .json(&json!({ "tag_id": id_of(&foreign), "currency": "USD" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}

// =============================================================================
// Spending summary
// =============================================================================

mod summary_tests {
    use super::*;

    async fn tag(server: &TestServer, user: Uuid, transaction: &Value, tag: &Value) {
        let path = format!(
            "/api/v1/transactions/{}/tags/{}",
            id_of(transaction),
            id_of(tag)
        );
        as_user(server.post(&path), user)
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_summary_by_tag() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        let (_, statement, market) = seed(&server, user).await;
        let bakery =
            create_transaction(&server, user, &id_of(&statement), "Bakery", "7.50").await;
        create_transaction(&server, user, &id_of(&statement), "Airline", "300.00").await;
        seed(&server, Uuid::new_v4()).await;

        let groceries = create_tag(&server, user, "groceries").await;
        tag(&server, user, &market, &groceries).await;
        tag(&server, user, &bakery, &groceries).await;

        let response = as_user(server.get("/api/v1/transactions/summary"), user).await;
        response.assert_status_ok();
        let summary: Value = response.json();

        assert_eq!(summary["group_by"], "tag");
        assert_eq!(summary["currencies"], json!(["USD"]));
        assert_eq!(summary["period"], json!({ "from": null, "to": null }));
        assert_eq!(
            summary["data"],
            json!([
                { "tag": "groceries", "transaction_count": 2, "amount_usd": "50.00" },
                { "tag": null, "transaction_count": 1, "amount_usd": "300.00" },
            ])
        );
    }

    #[tokio::test]
    async fn test_summary_by_month_with_range_and_currencies() {
        let server = create_test_server();
        let user = Uuid::new_v4();
        seed(&server, user).await;

        let summary: Value = as_user(
            server.get(
                "/api/v1/transactions/summary?group_by=month&date_from=2024-01-01&date_to=2024-01-31&currencies=usd,eur",
            ),
            user,
        )
        .await
        .json();
        assert_eq!(summary["currencies"], json!(["USD", "EUR"]));
        assert_eq!(summary["period"]["from"], "2024-01-01");
        assert_eq!(
            summary["data"],
            json!([{
                "month": "2024-01-01",
                "transaction_count": 1,
                "amount_usd": "42.50",
                "amount_eur": "0",
            }])
        );

        let later: Value = as_user(
            server.get("/api/v1/transactions/summary?group_by=month&date_from=2024-02-01"),
            user,
        )
        .await
        .json();
        assert_eq!(later["data"], json!([]));
    }

    #[tokio::test]
    async fn test_summary_rejects_bad_queries() {
        let server = create_test_server();
        let user = Uuid::new_v4();

        for query in [
            "group_by=week",
            "currencies=dollars",
            "date_from=2024-02-01&date_to=2024-01-01",
        ] {
            as_user(
                server.get(&format!("/api/v1/transactions/summary?{query}")),
                user,
            )
            .await
            .assert_status_bad_request();
        }

        server
            .get("/api/v1/transactions/summary")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
