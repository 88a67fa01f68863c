use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const DEFAULT_SSH_PORT: u16 = 22;

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

// =========================================================
// 枚举 (Enums)
// =========================================================

/// 设备操作系统类型
///
/// 序列化为后端使用的纯字符串。未知取值落入 `Other`，
/// 避免其他客户端写入的记录导致整个列表解析失败。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceType {
    CiscoIos,
    CiscoNxos,
    CiscoXe,
    Juniper,
    AristaEos,
    HpProcurve,
    Linux,
    Other(String),
}

impl DeviceType {
    /// 下拉框中可选的全部已知类型
    pub const KNOWN: [DeviceType; 7] = [
        DeviceType::CiscoIos,
        DeviceType::CiscoNxos,
        DeviceType::CiscoXe,
        DeviceType::Juniper,
        DeviceType::AristaEos,
        DeviceType::HpProcurve,
        DeviceType::Linux,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DeviceType::CiscoIos => "cisco_ios",
            DeviceType::CiscoNxos => "cisco_nxos",
            DeviceType::CiscoXe => "cisco_xe",
            DeviceType::Juniper => "juniper",
            DeviceType::AristaEos => "arista_eos",
            DeviceType::HpProcurve => "hp_procurve",
            DeviceType::Linux => "linux",
            DeviceType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DeviceType::CiscoIos => "Cisco IOS",
            DeviceType::CiscoNxos => "Cisco NX-OS",
            DeviceType::CiscoXe => "Cisco IOS-XE",
            DeviceType::Juniper => "Juniper",
            DeviceType::AristaEos => "Arista EOS",
            DeviceType::HpProcurve => "HP ProCurve",
            DeviceType::Linux => "Linux",
            DeviceType::Other(raw) => raw,
        }
    }
}

impl Default for DeviceType {
    fn default() -> Self {
        DeviceType::CiscoIos
    }
}

impl From<String> for DeviceType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "cisco_ios" => DeviceType::CiscoIos,
            "cisco_nxos" => DeviceType::CiscoNxos,
            "cisco_xe" => DeviceType::CiscoXe,
            "juniper" => DeviceType::Juniper,
            "arista_eos" => DeviceType::AristaEos,
            "hp_procurve" => DeviceType::HpProcurve,
            "linux" => DeviceType::Linux,
            _ => DeviceType::Other(raw),
        }
    }
}

impl From<&str> for DeviceType {
    fn from(raw: &str) -> Self {
        DeviceType::from(raw.to_string())
    }
}

impl From<DeviceType> for String {
    fn from(value: DeviceType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 设备生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl DeviceStatus {
    pub const ALL: [DeviceStatus; 3] = [
        DeviceStatus::Active,
        DeviceStatus::Inactive,
        DeviceStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Inactive => "inactive",
            DeviceStatus::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "Active",
            DeviceStatus::Inactive => "Inactive",
            DeviceStatus::Pending => "Pending",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// admin 隐式满足任何角色要求
    pub fn satisfies(&self, required: Role) -> bool {
        *self == Role::Admin || *self == required
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 服务端返回的设备记录
///
/// 密码字段只写不读，读模型中不存在。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub hostname: String,
    pub ip_address: String,
    pub device_type: DeviceType,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub last_sync: Option<Timestamp>,
    #[serde(default)]
    pub configuration: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// 欢迎语使用的显示名
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

// =========================================================
// 请求载荷 (Payloads)
// =========================================================

/// 创建设备的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDevice {
    pub hostname: String,
    pub ip_address: String,
    pub device_type: DeviceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub ssh_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_password: Option<String>,
    pub status: DeviceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// 设备的部分更新
///
/// `None` 的字段不会出现在 JSON 中，服务端将缺失字段视为"不修改"。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl DeviceChanges {
    pub fn is_empty(&self) -> bool {
        *self == DeviceChanges::default()
    }
}

/// 用户的部分更新
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        *self == UserChanges::default()
    }
}

/// 登录凭据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 注册新账号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// 登录成功后返回的令牌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

// =========================================================
// 错误载荷 (Error Envelope)
// =========================================================

/// 服务端错误响应体 `{"detail": ...}`
///
/// `detail` 可能是字符串，也可能是字段校验错误列表。
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ValidationItem>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationItem {
    pub msg: String,
}

impl ApiErrorBody {
    /// 从响应体中提取可展示给用户的消息
    pub fn message(body: &str) -> Option<String> {
        let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            ErrorDetail::Message(msg) if !msg.is_empty() => Some(msg),
            ErrorDetail::Message(_) => None,
            ErrorDetail::Items(items) if !items.is_empty() => Some(
                items
                    .into_iter()
                    .map(|i| i.msg)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            ErrorDetail::Items(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_type_round_trips_known_and_unknown() {
        let known: DeviceType = serde_json::from_value(json!("arista_eos")).unwrap();
        assert_eq!(known, DeviceType::AristaEos);

        let other: DeviceType = serde_json::from_value(json!("cisco_asa")).unwrap();
        assert_eq!(other, DeviceType::Other("cisco_asa".to_string()));
        assert_eq!(serde_json::to_value(&other).unwrap(), json!("cisco_asa"));
    }

    #[test]
    fn test_device_changes_omits_unset_fields() {
        let changes = DeviceChanges {
            hostname: Some("sw2".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&changes).unwrap();
        assert_eq!(value, json!({ "hostname": "sw2" }));
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_new_device_defaults_are_sent() {
        let device = NewDevice {
            hostname: "sw1".to_string(),
            ip_address: "10.0.0.1".to_string(),
            device_type: DeviceType::CiscoIos,
            platform: None,
            vendor: None,
            model: None,
            ssh_port: DEFAULT_SSH_PORT,
            username: None,
            password: None,
            enable_password: None,
            status: DeviceStatus::Active,
            description: None,
            location: None,
        };
        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(
            value,
            json!({
                "hostname": "sw1",
                "ip_address": "10.0.0.1",
                "device_type": "cisco_ios",
                "ssh_port": 22,
                "status": "active"
            })
        );
    }

    #[test]
    fn test_device_decodes_backend_shape() {
        let device: Device = serde_json::from_value(json!({
            "id": 7,
            "hostname": "core-1",
            "ip_address": "192.168.1.1",
            "device_type": "juniper",
            "platform": null,
            "vendor": "Juniper",
            "model": "MX204",
            "ssh_port": 2222,
            "username": "netops",
            "status": "pending",
            "description": null,
            "location": "DC1",
            "last_sync": null,
            "configuration": null,
            "owner_id": 1,
            "created_at": "2024-05-01T08:30:00.123456",
            "updated_at": "2024-05-01T08:30:00.123456"
        }))
        .unwrap();

        assert_eq!(device.device_type, DeviceType::Juniper);
        assert_eq!(device.status, DeviceStatus::Pending);
        assert_eq!(device.ssh_port, 2222);
        assert!(device.last_sync.is_none());
        assert!(device.created_at.is_some());
    }

    #[test]
    fn test_role_satisfies() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Admin.satisfies(Role::User));
        assert!(Role::User.satisfies(Role::User));
        assert!(!Role::User.satisfies(Role::Admin));
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ApiErrorBody::message(r#"{"detail":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            ApiErrorBody::message(
                r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"}]}"#
            )
            .as_deref(),
            Some("value is not a valid email address")
        );
        assert_eq!(ApiErrorBody::message("Internal Server Error"), None);
        assert_eq!(ApiErrorBody::message(r#"{"detail":""}"#), None);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: None,
            role: Role::User,
            is_active: true,
            created_at: None,
        };
        assert_eq!(user.display_name(), "alice");
        user.full_name = Some("Alice Liddell".to_string());
        assert_eq!(user.display_name(), "Alice Liddell");
    }
}
