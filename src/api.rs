//! 资源 API 客户端
//!
//! 所有请求都经过 `call`：统一拼接 URL、注入 Bearer 头、序列化请求体、
//! 解释状态码。没有令牌时照常发出请求，由服务端返回 401。

use netinv_shared::protocol::{
    ApiRequest, DeleteDevice, DeleteUser, GetDevice, GetUser, ListDevices, ListUsers,
    UpdateDevice, UpdateUser,
};
use netinv_shared::{
    CONTENT_TYPE_JSON, Device, DeviceChanges, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
    NewDevice, User, UserChanges,
};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest};
use crate::session::Session;

#[cfg(test)]
mod tests;

/// 设备与用户 CRUD 客户端
#[derive(Clone)]
pub struct InventoryApi<C> {
    config: ClientConfig,
    http: C,
    session: Session,
}

impl<C: HttpClient> InventoryApi<C> {
    pub fn new(config: ClientConfig, http: C, session: Session) -> Self {
        Self {
            config,
            http,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 发送一个端点请求并解析响应
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let op = format!("{} {}", R::METHOD.as_str(), path);
        let mut http_req = HttpRequest::new(&self.config.url(&path), R::METHOD);

        if R::AUTHENTICATED {
            if let Some(bearer) = self.session.bearer() {
                http_req = http_req.with_header(HEADER_AUTHORIZATION, &bearer);
            }
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| ApiError::decode(format!("encode request: {}", e)).in_op(op.clone()))?;
            http_req = http_req
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }

        let resp = self
            .http
            .send(http_req)
            .await
            .map_err(|e| e.in_op(op.clone()))?;

        if !resp.ok() {
            return Err(ApiError::from_response(resp.status, &resp.body).in_op(op));
        }

        // DELETE 等可能返回空响应体
        let body = if resp.body.trim().is_empty() {
            "null"
        } else {
            resp.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::from(e).in_op(op))
    }

    // =========================================================
    // Devices
    // =========================================================

    pub async fn list_devices(&self) -> ApiResult<Vec<Device>> {
        self.call(&ListDevices).await
    }

    pub async fn get_device(&self, id: i64) -> ApiResult<Device> {
        self.call(&GetDevice { id }).await
    }

    pub async fn create_device(&self, device: &NewDevice) -> ApiResult<Device> {
        self.call(device).await
    }

    /// 部分更新：`changes` 中为 None 的字段不会发送
    pub async fn update_device(&self, id: i64, changes: DeviceChanges) -> ApiResult<Device> {
        self.call(&UpdateDevice { id, changes }).await
    }

    pub async fn delete_device(&self, id: i64) -> ApiResult<()> {
        self.call(&DeleteDevice { id }).await.map(|_| ())
    }

    // =========================================================
    // Users（账号只能通过注册创建）
    // =========================================================

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.call(&ListUsers).await
    }

    pub async fn get_user(&self, id: i64) -> ApiResult<User> {
        self.call(&GetUser { id }).await
    }

    pub async fn update_user(&self, id: i64, changes: UserChanges) -> ApiResult<User> {
        self.call(&UpdateUser { id, changes }).await
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.call(&DeleteUser { id }).await.map(|_| ())
    }
}
