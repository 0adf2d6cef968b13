//! Command queue: at-most-once claim, FIFO order, auth boundaries

mod helpers;

use helpers::spawn_app;
use http::StatusCode;
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn enqueue_then_poll_claims_once() {
    let app = spawn_app().await;
    let kiosk_id = app.seed_kiosk(1, "Lobby Kiosk", "device-k1").await;

    let admin = app.token("op-1", Role::Admin, None);
    let device = app.token("device-k1", Role::Kiosk, None);

    // Enqueue(kiosk, logout, {}) returns an id
    let (status, body) = app
        .request(
            "POST",
            "/api/commands",
            Some(&admin),
            Some(json!({ "kiosk_id": kiosk_id, "kind": "logout", "payload": {} })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let command_id = body["command_id"].as_i64().expect("command id");

    // First poll returns the command, marked claimed
    let (status, body) = app
        .request("GET", "/api/commands/poll", Some(&device), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let commands = body.as_array().expect("command list");
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0]["id"].as_i64(), Some(command_id));
    assert_eq!(commands[0]["command"], "logout");
    assert_eq!(commands[0]["payload"], json!({}));

    // Second poll returns nothing: the claim was destructive
    let (status, body) = app
        .request("GET", "/api/commands/poll", Some(&device), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn poll_returns_commands_oldest_first() {
    let app = spawn_app().await;
    let kiosk_id = app.seed_kiosk(1, "Lobby Kiosk", "device-k1").await;

    let admin = app.token("op-1", Role::Admin, None);
    let device = app.token("device-k1", Role::Kiosk, None);

    let mut enqueued = Vec::new();
    for kind in ["logout", "refresh_content", "reboot"] {
        let (status, body) = app
            .request(
                "POST",
                "/api/commands",
                Some(&admin),
                Some(json!({ "kiosk_id": kiosk_id, "kind": kind })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        enqueued.push((body["command_id"].as_i64().unwrap(), kind));
    }

    let (_, body) = app
        .request("GET", "/api/commands/poll", Some(&device), None)
        .await;
    let claimed = body.as_array().expect("command list");
    assert_eq!(claimed.len(), 3);
    for (claimed, (id, kind)) in claimed.iter().zip(&enqueued) {
        assert_eq!(claimed["id"].as_i64(), Some(*id));
        assert_eq!(&claimed["command"], kind);
    }
}

#[tokio::test]
async fn poll_does_not_leak_other_kiosks_commands() {
    let app = spawn_app().await;
    let kiosk_a = app.seed_kiosk(1, "Kiosk A", "device-a").await;
    let kiosk_b = app.seed_kiosk(1, "Kiosk B", "device-b").await;

    let admin = app.token("op-1", Role::Admin, None);
    app.request(
        "POST",
        "/api/commands",
        Some(&admin),
        Some(json!({ "kiosk_id": kiosk_a, "kind": "reboot" })),
    )
    .await;
    app.request(
        "POST",
        "/api/commands",
        Some(&admin),
        Some(json!({ "kiosk_id": kiosk_b, "kind": "logout" })),
    )
    .await;

    // B's poll only sees B's command; the kiosk is resolved from the
    // principal binding, not from anything the client sends
    let device_b = app.token("device-b", Role::Kiosk, None);
    let (_, body) = app
        .request("GET", "/api/commands/poll", Some(&device_b), None)
        .await;
    let claimed = body.as_array().unwrap();
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0]["command"], "logout");

    // A's command is still pending for A
    let device_a = app.token("device-a", Role::Kiosk, None);
    let (_, body) = app
        .request("GET", "/api/commands/poll", Some(&device_a), None)
        .await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn poll_without_kiosk_binding_is_not_found() {
    let app = spawn_app().await;

    // Device-class principal with no kiosk row: misconfiguration, not idle
    let device = app.token("device-unbound", Role::Kiosk, None);
    let (status, body) = app
        .request("GET", "/api/commands/poll", Some(&device), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"].as_u64(), Some(3002));
}

#[tokio::test]
async fn enqueue_validation_and_auth_failures() {
    let app = spawn_app().await;
    let kiosk_id = app.seed_kiosk(1, "Lobby Kiosk", "device-k1").await;
    let admin = app.token("op-1", Role::Admin, None);

    // Unauthenticated
    let (status, _) = app
        .request(
            "POST",
            "/api/commands",
            None,
            Some(json!({ "kiosk_id": kiosk_id, "kind": "logout" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Device-tier principal may not enqueue
    let device = app.token("device-k1", Role::Kiosk, None);
    let (status, _) = app
        .request(
            "POST",
            "/api/commands",
            Some(&device),
            Some(json!({ "kiosk_id": kiosk_id, "kind": "logout" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Missing kind
    let (status, _) = app
        .request(
            "POST",
            "/api/commands",
            Some(&admin),
            Some(json!({ "kiosk_id": kiosk_id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown kind
    let (status, _) = app
        .request(
            "POST",
            "/api/commands",
            Some(&admin),
            Some(json!({ "kiosk_id": kiosk_id, "kind": "format_disk" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown kiosk
    let (status, _) = app
        .request(
            "POST",
            "/api/commands",
            Some(&admin),
            Some(json!({ "kiosk_id": 999, "kind": "logout" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing above must have queued anything
    let device = app.token("device-k1", Role::Kiosk, None);
    let (_, body) = app
        .request("GET", "/api/commands/poll", Some(&device), None)
        .await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn manager_is_scoped_to_own_project() {
    let app = spawn_app().await;
    let kiosk_id = app.seed_kiosk(7, "Annex Kiosk", "device-k7").await;

    // Manager of another project cannot address this kiosk
    let manager = app.token("mgr-2", Role::Manager, Some(2));
    let (status, _) = app
        .request(
            "POST",
            "/api/commands",
            Some(&manager),
            Some(json!({ "kiosk_id": kiosk_id, "kind": "reboot" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The right manager can
    let manager = app.token("mgr-7", Role::Manager, Some(7));
    let (status, _) = app
        .request(
            "POST",
            "/api/commands",
            Some(&manager),
            Some(json!({ "kiosk_id": kiosk_id, "kind": "reboot" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn command_history_is_retained_after_claim() {
    let app = spawn_app().await;
    let kiosk_id = app.seed_kiosk(1, "Lobby Kiosk", "device-k1").await;
    let admin = app.token("op-1", Role::Admin, None);
    let device = app.token("device-k1", Role::Kiosk, None);

    app.request(
        "POST",
        "/api/commands",
        Some(&admin),
        Some(json!({ "kiosk_id": kiosk_id, "kind": "logout" })),
    )
    .await;
    app.request("GET", "/api/commands/poll", Some(&device), None)
        .await;

    // Claimed commands stay on record for the console
    let (status, body) = app
        .request(
            "GET",
            &format!("/api/kiosks/{kiosk_id}/commands"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["processed"], json!(true));
}
