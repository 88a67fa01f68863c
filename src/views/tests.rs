use super::*;
use crate::config::ClientConfig;
use crate::error::ApiErrorKind;
use crate::request::MockHttpClient;
use crate::session::{MemoryTokenStore, Session};
use netinv_shared::protocol::HttpMethod;
use netinv_shared::{DeviceType, Role};
use serde_json::json;
use std::rc::Rc;

// =========================================================
// 辅助函数
// =========================================================

const DEVICES_URL: &str = "http://api.test/api/devices";
const USERS_URL: &str = "http://api.test/api/users";
const ME_URL: &str = "http://api.test/api/auth/me";

struct Fixture {
    api: InventoryApi<Rc<MockHttpClient>>,
    auth: AuthClient<Rc<MockHttpClient>>,
    http: Rc<MockHttpClient>,
}

fn fixture() -> Fixture {
    let http = Rc::new(MockHttpClient::new());
    let api = InventoryApi::new(
        ClientConfig::new("http://api.test"),
        http.clone(),
        Session::new(MemoryTokenStore::with_token("valid")),
    );
    let auth = AuthClient::new(api.clone());
    Fixture { api, auth, http }
}

fn device_json(id: i64, hostname: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "hostname": hostname,
        "ip_address": format!("10.0.0.{}", id),
        "device_type": "cisco_ios",
        "ssh_port": 22,
        "username": "netops",
        "status": status,
        "location": "Lab",
        "owner_id": 1,
        "created_at": "2024-03-01T12:00:00",
        "updated_at": "2024-03-01T12:00:00"
    })
}

fn user_json(id: i64, username: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "role": role,
        "is_active": true
    })
}

fn device(value: serde_json::Value) -> Device {
    serde_json::from_value(value).unwrap()
}

fn new_device_form(hostname: &str, ip_address: &str) -> DeviceForm {
    let mut form = DeviceForm::new();
    form.hostname = hostname.to_string();
    form.ip_address = ip_address.to_string();
    form.device_type = DeviceType::CiscoIos;
    form
}

fn body_of(http: &MockHttpClient, index: usize) -> serde_json::Value {
    let requests = http.requests.borrow();
    serde_json::from_str(requests[index].body.as_deref().unwrap()).unwrap()
}

// =========================================================
// 统计
// =========================================================

#[test]
fn test_stats_count_by_status() {
    let devices = vec![
        device(device_json(1, "a", "active")),
        device(device_json(2, "b", "active")),
        device(device_json(3, "c", "inactive")),
        device(device_json(4, "d", "pending")),
    ];

    let stats = DeviceStats::from_devices(&devices);

    assert_eq!(
        stats,
        DeviceStats {
            total: 4,
            active: 2,
            inactive: 1,
            pending: 1,
        }
    );
    assert_eq!(DeviceStats::from_devices(&[]), DeviceStats::default());
}

#[test]
fn test_recent_devices_capped() {
    let devices: Vec<Device> = (1..=8)
        .map(|i| device(device_json(i, &format!("sw{}", i), "active")))
        .collect();

    let recent = recent_devices(&devices, RECENT_DEVICE_COUNT);

    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].hostname, "sw1");
    assert_eq!(recent_devices(&devices[..2], RECENT_DEVICE_COUNT).len(), 2);
}

// =========================================================
// 控制面板
// =========================================================

#[tokio::test]
async fn test_dashboard_load_joins_both_fetches() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Get,
        DEVICES_URL,
        200,
        json!([
            device_json(1, "core-1", "active"),
            device_json(2, "core-2", "pending"),
        ]),
    );
    f.http.mock_response(HttpMethod::Get, ME_URL, 200, user_json(1, "alice", "admin"));

    let dashboard = Dashboard::load(&f.api, &f.auth).await;

    assert_eq!(f.http.request_count(), 2);
    assert!(dashboard.error.is_none());
    assert_eq!(dashboard.user.as_ref().map(|u| u.username.as_str()), Some("alice"));
    assert_eq!(dashboard.stats().total, 2);
    assert_eq!(dashboard.stats().pending, 1);
    assert_eq!(dashboard.recent().len(), 2);
}

#[tokio::test]
async fn test_dashboard_load_reports_device_failure() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Get,
        DEVICES_URL,
        500,
        json!({ "detail": "Database unavailable" }),
    );
    f.http.mock_response(HttpMethod::Get, ME_URL, 200, user_json(1, "alice", "user"));

    let dashboard = Dashboard::load(&f.api, &f.auth).await;

    assert!(dashboard.devices.is_empty());
    assert_eq!(dashboard.error.as_deref(), Some("Database unavailable"));
    assert!(dashboard.user.is_some());
    assert_eq!(dashboard.stats(), DeviceStats::default());
}

// =========================================================
// 设备
// =========================================================

#[tokio::test]
async fn test_submit_invalid_form_sends_nothing() {
    let f = fixture();
    let mut form = DeviceForm::new();
    form.ip_address = "10.0.0.1".to_string();

    let err = submit_device(&f.api, &form).await.unwrap_err();

    assert!(matches!(err, SubmitError::Form(ref e) if e.field == "hostname"));
    assert_eq!(f.http.request_count(), 0);
}

#[tokio::test]
async fn test_submit_create_then_refetch() {
    let f = fixture();
    f.http.mock_response(HttpMethod::Post, DEVICES_URL, 200, device_json(1, "sw1", "active"));
    f.http.mock_response(
        HttpMethod::Get,
        DEVICES_URL,
        200,
        json!([device_json(1, "sw1", "active")]),
    );

    let form = new_device_form("sw1", "10.0.0.1");
    let devices = submit_device(&f.api, &form).await.unwrap().unwrap();

    assert_eq!(f.http.request_count(), 2);
    let body = body_of(&f.http, 0);
    assert_eq!(body["hostname"], "sw1");
    assert_eq!(body["device_type"], "cisco_ios");
    assert_eq!(body["ssh_port"], 22);
    assert_eq!(body["status"], "active");

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].hostname, "sw1");
    assert_eq!(devices[0].status, DeviceStatus::Active);
}

#[tokio::test]
async fn test_submit_edit_with_blank_password() {
    let f = fixture();
    let original = device(device_json(7, "edge-7", "active"));
    f.http.mock_response(
        HttpMethod::Put,
        "http://api.test/api/devices/7",
        200,
        device_json(7, "edge-7", "inactive"),
    );
    f.http.mock_response(
        HttpMethod::Get,
        DEVICES_URL,
        200,
        json!([device_json(7, "edge-7", "inactive")]),
    );

    let mut form = DeviceForm::edit(&original);
    form.status = DeviceStatus::Inactive;
    let devices = submit_device(&f.api, &form).await.unwrap().unwrap();

    let body = body_of(&f.http, 0);
    assert_eq!(body, json!({ "status": "inactive" }));
    assert!(body.get("password").is_none());
    assert_eq!(devices[0].status, DeviceStatus::Inactive);
}

#[tokio::test]
async fn test_submit_server_rejection_is_api_error() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Post,
        DEVICES_URL,
        400,
        json!({ "detail": "Device with this hostname already exists" }),
    );

    let form = new_device_form("sw1", "10.0.0.1");
    let err = submit_device(&f.api, &form).await.unwrap_err();

    assert_eq!(
        err.user_message("Operation failed"),
        "Device with this hostname already exists"
    );
    // 失败时不重新拉取
    assert_eq!(f.http.request_count(), 1);
}

#[tokio::test]
async fn test_delete_device_refetches() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/devices/2",
        200,
        json!({ "message": "Device deleted successfully" }),
    );
    f.http.mock_response(
        HttpMethod::Get,
        DEVICES_URL,
        200,
        json!([device_json(1, "sw1", "active")]),
    );

    let devices = delete_device(&f.api, 2).await.unwrap().unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(f.http.last_request().unwrap().method, HttpMethod::Get);
}

#[tokio::test]
async fn test_submit_create_survives_refetch_failure() {
    let f = fixture();
    f.http.mock_response(HttpMethod::Post, DEVICES_URL, 200, device_json(1, "sw1", "active"));
    f.http.mock_response(HttpMethod::Get, DEVICES_URL, 500, json!({ "detail": "db down" }));

    let form = new_device_form("sw1", "10.0.0.1");
    let refetch = submit_device(&f.api, &form)
        .await
        .expect("创建已被接受，不应报告为保存失败");

    let err = refetch.unwrap_err();
    assert_eq!(err.user_message("Failed to load devices"), "db down");
    assert_eq!(f.http.request_count(), 2);
}

#[tokio::test]
async fn test_delete_device_survives_refetch_failure() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/devices/1",
        200,
        json!({ "message": "Device deleted successfully" }),
    );
    f.http.mock_response(HttpMethod::Get, DEVICES_URL, 500, json!({ "detail": "db down" }));

    let refetch = delete_device(&f.api, 1).await.expect("删除已成功");

    assert_eq!(refetch.unwrap_err().kind, ApiErrorKind::Rejected);
}

#[tokio::test]
async fn test_delete_missing_device_surfaces_error() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/devices/3",
        404,
        json!({ "detail": "Device not found" }),
    );

    let err = delete_device(&f.api, 3).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.user_message("Failed to delete device"), "Device not found");
    assert_eq!(f.http.request_count(), 1);
}

// =========================================================
// 用户
// =========================================================

#[tokio::test]
async fn test_submit_user_sends_changes_and_refetches() {
    let f = fixture();
    let user: User = serde_json::from_value(user_json(4, "frank", "user")).unwrap();
    f.http.mock_response(
        HttpMethod::Put,
        "http://api.test/api/users/4",
        200,
        user_json(4, "frank", "admin"),
    );
    f.http.mock_response(
        HttpMethod::Get,
        USERS_URL,
        200,
        json!([user_json(1, "alice", "admin"), user_json(4, "frank", "admin")]),
    );

    let mut form = UserForm::edit(&user);
    form.role = Role::Admin;
    let users = submit_user(&f.api, &form).await.unwrap().unwrap();

    assert_eq!(body_of(&f.http, 0), json!({ "role": "admin" }));
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].role, Role::Admin);
}

#[tokio::test]
async fn test_submit_user_invalid_email_sends_nothing() {
    let f = fixture();
    let user: User = serde_json::from_value(user_json(4, "frank", "user")).unwrap();

    let mut form = UserForm::edit(&user);
    form.email = "  ".to_string();
    let err = submit_user(&f.api, &form).await.unwrap_err();

    assert!(matches!(err, SubmitError::Form(_)));
    assert_eq!(f.http.request_count(), 0);
}

#[tokio::test]
async fn test_delete_user_forbidden() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/users/1",
        403,
        json!({ "detail": "Not enough permissions" }),
    );

    let err = delete_user(&f.api, 1).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Forbidden);
    assert_eq!(err.user_message("Failed to delete user"), "Not enough permissions");
}

#[tokio::test]
async fn test_delete_user_refetches() {
    let f = fixture();
    f.http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/users/4",
        200,
        json!({ "message": "User deleted successfully" }),
    );
    f.http.mock_response(HttpMethod::Get, USERS_URL, 200, json!([user_json(1, "alice", "admin")]));

    let users = delete_user(&f.api, 4).await.unwrap().unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");
}

#[tokio::test]
async fn test_user_changes_survive_refetch_failure() {
    let f = fixture();
    let user: User = serde_json::from_value(user_json(4, "frank", "user")).unwrap();
    f.http.mock_response(
        HttpMethod::Put,
        "http://api.test/api/users/4",
        200,
        user_json(4, "frank", "admin"),
    );
    f.http.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/users/4",
        200,
        json!({ "message": "User deleted successfully" }),
    );
    f.http.mock_response(HttpMethod::Get, USERS_URL, 500, json!({ "detail": "db down" }));

    let mut form = UserForm::edit(&user);
    form.role = Role::Admin;
    let refetch = submit_user(&f.api, &form).await.expect("更新已被接受");
    assert_eq!(refetch.unwrap_err().user_message("Failed to load users"), "db down");

    let refetch = delete_user(&f.api, 4).await.expect("删除已成功");
    assert!(refetch.is_err());
}
