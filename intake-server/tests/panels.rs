mod common;

use common::{ADMIN_KEY, MANAGER_KEY, TestApp};
use http::StatusCode;
use serde_json::json;

const SECTIONS: [&str; 6] = ["Ops", "AI", "AI Queue", "Rules", "Menu", "Audit"];

fn assert_all_sections(html: &str) {
    for section in SECTIONS {
        assert!(html.contains(&format!("<h2>{section}</h2>")), "missing heading {section}");
        assert!(html.contains(&format!(">{section}</button>")), "missing nav {section}");
    }
    assert!(html.contains("Last updated"));
}

#[tokio::test]
async fn admin_panel_exposes_every_section() {
    let t = TestApp::new().await;
    let (status, html) = t.get_text(&format!("/admin?key={ADMIN_KEY}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_all_sections(&html);
    assert!(html.contains("Admin Panel"));
    assert!(html.contains(r#"id="toggle-accept_bookings""#));
    assert!(html.contains(r#"id="toggle-ai_mode""#));
}

#[tokio::test]
async fn manager_panel_exposes_every_section() {
    let t = TestApp::new().await;
    let (status, html) = t.get_text(&format!("/manager?key={MANAGER_KEY}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_all_sections(&html);
    assert!(html.contains("Manager Panel"));

    // Admin keys open the manager panel too
    let (status, _) = t.get_text(&format!("/manager?key={ADMIN_KEY}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn manager_key_cannot_open_admin_panel() {
    let t = TestApp::new().await;
    let (status, body) = t.json("GET", &format!("/admin?key={MANAGER_KEY}"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);
}

#[tokio::test]
async fn unknown_or_missing_key_renders_nothing() {
    let t = TestApp::new().await;

    for path in ["/admin", "/manager", "/api/panel/ops", "/api/panel/audit"] {
        let (status, text) = t.get_text(&format!("{path}?key=not-a-key")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
        assert!(!text.contains("<h2>"), "{path}");
        let body: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["code"], 1008);

        let (status, body) = t.json("GET", path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(body["code"], 1001);
    }

    // Rejected writes leave the toggle untouched
    let before = t.state.ops.get("accept_bookings").await.unwrap();
    let (status, _) = t.set_toggle("accept_bookings", "not-a-key", json!(false)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(t.state.ops.get("accept_bookings").await.unwrap(), before);
}

#[tokio::test]
async fn toggling_moves_last_updated_strictly_later() {
    let t = TestApp::new().await;

    let (_, before) = t.json("GET", &format!("/api/panel/ops?key={MANAGER_KEY}"), None).await;
    let before_ms = before["data"]["last_updated"].as_i64().unwrap();
    let toggle_before = before["data"]["toggles"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["key"] == "match_day_mode")
        .unwrap()
        .clone();
    assert_eq!(toggle_before["value"], false);

    let (status, change) = t.set_toggle("match_day_mode", MANAGER_KEY, json!(true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(change["data"]["accepted"], true);
    assert_eq!(change["data"]["toggle"]["value"], true);
    let changed_ms = change["data"]["toggle"]["last_updated"].as_i64().unwrap();
    assert!(changed_ms > toggle_before["last_updated"].as_i64().unwrap());
    assert!(changed_ms > before_ms);

    // Value and timestamp read back together from the same mutation
    let (_, after) = t.json("GET", &format!("/api/panel/ops?key={MANAGER_KEY}"), None).await;
    let toggle_after = after["data"]["toggles"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["key"] == "match_day_mode")
        .unwrap()
        .clone();
    assert_eq!(toggle_after["value"], true);
    assert_eq!(toggle_after["last_updated"].as_i64().unwrap(), changed_ms);
    assert_eq!(toggle_after["updated_by"], "manager");
    assert_eq!(after["data"]["last_updated"].as_i64().unwrap(), changed_ms);

    // Rendered page reflects the change
    let (_, html) = t.get_text(&format!("/manager?key={MANAGER_KEY}")).await;
    assert!(html.contains(r#"data-key="match_day_mode" checked"#));
    assert!(html.contains(&format!(r#"data-ms="{changed_ms}""#)));

    // Persisted through the toggle store
    let stored = t
        .store
        .snapshot()
        .into_iter()
        .find(|t| t.key == "match_day_mode")
        .unwrap();
    assert_eq!(stored.last_updated, changed_ms);
}

#[tokio::test]
async fn manager_cannot_change_admin_only_toggle() {
    let t = TestApp::new().await;

    let (status, body) = t.set_toggle("ai_mode", MANAGER_KEY, json!("off")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);
    assert_eq!(t.state.ops.choice("ai_mode").await.as_deref(), Some("auto"));

    let (status, body) = t.set_toggle("ai_mode", ADMIN_KEY, json!("review")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["toggle"]["value"], "review");
}

#[tokio::test]
async fn invalid_toggle_writes_are_rejected() {
    let t = TestApp::new().await;

    let (status, body) = t.set_toggle("happy_hour", ADMIN_KEY, json!(true)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, body) = t.set_toggle("ai_mode", ADMIN_KEY, json!("manual")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let (status, body) = t.set_toggle("accept_bookings", ADMIN_KEY, json!("yes")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let (status, body) = t
        .json(
            "PUT",
            &format!("/api/panel/ops/accept_bookings?key={ADMIN_KEY}"),
            Some(json!({ "enabled": false })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    assert!(t.state.activity.audit(10).is_empty());
}

#[tokio::test]
async fn audit_lists_changes_newest_first() {
    let t = TestApp::new().await;
    t.set_toggle("accept_bookings", MANAGER_KEY, json!(false)).await;
    t.set_toggle("ai_mode", ADMIN_KEY, json!("review")).await;

    let (status, body) = t.json("GET", &format!("/api/panel/audit?key={MANAGER_KEY}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["key"], "ai_mode");
    assert_eq!(entries[0]["role"], "admin");
    assert_eq!(entries[0]["previous"], "auto");
    assert_eq!(entries[0]["value"], "review");
    assert_eq!(entries[1]["key"], "accept_bookings");
    assert_eq!(entries[1]["previous"], true);
    assert_eq!(entries[1]["value"], false);

    let (_, body) = t
        .json("GET", &format!("/api/panel/audit?key={MANAGER_KEY}&limit=1"), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rules_menu_and_ai_sections() {
    let t = TestApp::new().await;

    let (status, body) = t.json("GET", &format!("/api/panel/rules?key={MANAGER_KEY}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let rules = body["data"].as_array().unwrap();
    assert_eq!(rules.len(), 4);
    let ai_mode = rules.iter().find(|r| r["key"] == "ai_mode").unwrap();
    assert_eq!(ai_mode["editable_by"], json!(["admin"]));
    assert_eq!(ai_mode["can_edit"], false);
    assert_eq!(ai_mode["kind"]["type"], "choice");
    let accept = rules.iter().find(|r| r["key"] == "accept_bookings").unwrap();
    assert_eq!(accept["editable_by"], json!(["manager", "admin"]));

    let (status, body) = t.json("GET", &format!("/api/panel/menu?key={ADMIN_KEY}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Nachos");

    let (status, body) = t.json("GET", &format!("/api/panel/ai?key={ADMIN_KEY}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["model"], "fake-model");
    assert_eq!(body["data"]["enabled"], true);
    assert_eq!(body["data"]["ai_mode"], "auto");
    assert_eq!(body["data"]["extractions"], 0);
}

#[tokio::test]
async fn malformed_list_limit_is_a_json_validation_error() {
    let t = TestApp::new().await;

    for section in ["audit", "ai-queue"] {
        let (status, body) = t
            .json("GET", &format!("/api/panel/{section}?key={ADMIN_KEY}&limit=abc"), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{section}");
        assert_eq!(body["code"], 2, "{section}");
        assert!(body["message"].is_string(), "{section}");
    }
}
