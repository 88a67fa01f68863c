use super::*;
use crate::error::ApiErrorKind;
use crate::request::MockHttpClient;
use crate::session::MemoryTokenStore;
use netinv_shared::protocol::HttpMethod;
use netinv_shared::{DeviceStatus, DeviceType, Role};
use serde_json::json;
use std::rc::Rc;

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test";

fn create_api(token: Option<&str>) -> (InventoryApi<Rc<MockHttpClient>>, Rc<MockHttpClient>) {
    let http = Rc::new(MockHttpClient::new());
    let store = match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    };
    let api = InventoryApi::new(ClientConfig::new(BASE), http.clone(), Session::new(store));
    (api, http)
}

fn device_json(id: i64, hostname: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "hostname": hostname,
        "ip_address": format!("10.0.0.{}", id),
        "device_type": "cisco_ios",
        "ssh_port": 22,
        "status": status,
        "last_sync": null,
        "owner_id": 1,
        "created_at": "2024-03-01T12:00:00",
        "updated_at": "2024-03-01T12:00:00"
    })
}

// =========================================================
// 拦截器
// =========================================================

#[tokio::test]
async fn test_bearer_header_injected_when_token_present() {
    let (api, http) = create_api(Some("abc123"));
    http.mock_response(HttpMethod::Get, "http://api.test/api/devices", 200, json!([]));

    api.list_devices().await.unwrap();

    let req = http.last_request().unwrap();
    assert_eq!(req.header("Authorization"), Some("Bearer abc123"));
    assert!(req.body.is_none());
}

#[tokio::test]
async fn test_request_proceeds_without_header_when_no_token() {
    let (api, http) = create_api(None);
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/devices",
        401,
        json!({ "detail": "Not authenticated" }),
    );

    let err = api.list_devices().await.unwrap_err();

    assert_eq!(http.request_count(), 1);
    assert!(http.last_request().unwrap().header("Authorization").is_none());
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.detail(), Some("Not authenticated"));
}

// =========================================================
// Devices
// =========================================================

#[tokio::test]
async fn test_list_devices_decodes() {
    let (api, http) = create_api(Some("t"));
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/devices",
        200,
        json!([device_json(1, "sw1", "active"), device_json(2, "sw2", "pending")]),
    );

    let devices = api.list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[1].status, DeviceStatus::Pending);
    assert_eq!(devices[0].device_type, DeviceType::CiscoIos);
}

#[tokio::test]
async fn test_create_device_posts_json() {
    let (api, http) = create_api(Some("t"));
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/devices",
        200,
        device_json(9, "sw9", "active"),
    );

    let new_device = NewDevice {
        hostname: "sw9".to_string(),
        ip_address: "10.0.0.9".to_string(),
        device_type: DeviceType::CiscoIos,
        platform: None,
        vendor: None,
        model: None,
        ssh_port: 22,
        username: Some("netops".to_string()),
        password: Some("pw".to_string()),
        enable_password: None,
        status: DeviceStatus::Active,
        description: None,
        location: None,
    };
    let created = api.create_device(&new_device).await.unwrap();
    assert_eq!(created.id, 9);

    let req = http.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["hostname"], "sw9");
    assert_eq!(body["password"], "pw");
    assert!(body.get("enable_password").is_none());
}

#[tokio::test]
async fn test_update_device_sends_only_changed_fields() {
    let (api, http) = create_api(Some("t"));
    http.mock_response(
        HttpMethod::Put,
        "http://api.test/api/devices/4",
        200,
        device_json(4, "sw4", "inactive"),
    );

    let changes = DeviceChanges {
        status: Some(DeviceStatus::Inactive),
        ..Default::default()
    };
    api.update_device(4, changes).await.unwrap();

    let req = http.last_request().unwrap();
    assert_eq!(req.url, "http://api.test/api/devices/4");
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "status": "inactive" }));
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let (api, http) = create_api(Some("t"));
    http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/devices/3",
        200,
        json!({ "message": "Device deleted successfully" }),
    );
    http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/devices/3",
        404,
        json!({ "detail": "Device not found" }),
    );

    api.delete_device(3).await.unwrap();
    let err = api.delete_device(3).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.user_message("Operation failed"), "Device not found");
}

#[tokio::test]
async fn test_delete_with_empty_body_succeeds() {
    let (api, http) = create_api(Some("t"));
    http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/users/8",
        204,
        json!(null),
    );

    assert!(api.delete_user(8).await.is_ok());
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    let (api, http) = create_api(Some("t"));
    http.go_offline();

    let err = api.get_device(1).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.spans(), ["GET /api/devices/1"]);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (api, http) = create_api(Some("t"));
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/devices/1",
        200,
        json!({ "unexpected": true }),
    );

    let err = api.get_device(1).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

// =========================================================
// Users
// =========================================================

#[tokio::test]
async fn test_user_crud_paths() {
    let (api, http) = create_api(Some("t"));
    let user = json!({
        "id": 2,
        "username": "bob",
        "email": "bob@example.com",
        "full_name": "Bob",
        "role": "admin",
        "is_active": true,
        "created_at": "2024-01-01T00:00:00"
    });
    http.mock_response(HttpMethod::Get, "http://api.test/api/users", 200, json!([user.clone()]));
    http.mock_response(HttpMethod::Get, "http://api.test/api/users/2", 200, user.clone());
    http.mock_response(HttpMethod::Put, "http://api.test/api/users/2", 200, user);

    assert_eq!(api.list_users().await.unwrap().len(), 1);
    assert_eq!(api.get_user(2).await.unwrap().role, Role::Admin);

    let changes = UserChanges {
        is_active: Some(false),
        ..Default::default()
    };
    api.update_user(2, changes).await.unwrap();
    let body: serde_json::Value =
        serde_json::from_str(http.last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "is_active": false }));
}
