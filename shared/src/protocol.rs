use crate::{AccessToken, Credentials, Device, DeviceChanges, NewDevice, Registration, User, UserChanges};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 是否携带请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// POST/PUT 请求把自身序列化为请求体，路径参数用 `#[serde(skip)]` 排除。
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// 是否需要携带 Bearer 令牌（登录与注册不需要）
    const AUTHENTICATED: bool = true;
    /// The URL path.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for Credentials {
    type Response = AccessToken;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

impl ApiRequest for Registration {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }
}

/// Fetch the identity behind the current bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUser;

impl ApiRequest for CurrentUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/auth/me".to_string()
    }
}

// =========================================================
// Devices
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListDevices;

impl ApiRequest for ListDevices {
    type Response = Vec<Device>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/devices".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetDevice {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for GetDevice {
    type Response = Device;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/devices/{}", self.id)
    }
}

impl ApiRequest for NewDevice {
    type Response = Device;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/devices".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDevice {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub changes: DeviceChanges,
}

impl ApiRequest for UpdateDevice {
    type Response = Device;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/devices/{}", self.id)
    }
}

/// 删除成功时响应体内容无关紧要
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteDevice {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for DeleteDevice {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/devices/{}", self.id)
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsers;

impl ApiRequest for ListUsers {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/users".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetUser {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for GetUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub changes: UserChanges,
}

impl ApiRequest for UpdateUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUser {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for DeleteUser {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_device_body_excludes_id() {
        let req = UpdateDevice {
            id: 42,
            changes: DeviceChanges {
                location: Some("Rack 4".to_string()),
                ..Default::default()
            },
        };
        assert_eq!(req.path(), "/api/devices/42");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "location": "Rack 4" })
        );
    }

    #[test]
    fn test_auth_endpoints_are_unauthenticated() {
        assert!(!<Credentials as ApiRequest>::AUTHENTICATED);
        assert!(!<Registration as ApiRequest>::AUTHENTICATED);
        assert!(<CurrentUser as ApiRequest>::AUTHENTICATED);
        assert!(<ListUsers as ApiRequest>::AUTHENTICATED);
    }

    #[test]
    fn test_delete_response_accepts_any_body() {
        let _: <DeleteUser as ApiRequest>::Response =
            serde_json::from_str(r#"{"message":"User deleted successfully"}"#).unwrap();
        let _: <DeleteDevice as ApiRequest>::Response = serde_json::from_str("null").unwrap();
    }
}
