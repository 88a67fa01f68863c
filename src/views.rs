//! 页面工作流
//!
//! 每次变更之后都完整重新拉取列表，不做乐观更新或本地缓存。

use netinv_shared::{Device, DeviceStatus, User};

use crate::api::InventoryApi;
use crate::auth::AuthClient;
use crate::error::{ApiResult, SubmitError};
use crate::forms::{DeviceForm, DeviceSubmission, UserForm};
use crate::request::HttpClient;

#[cfg(test)]
mod tests;

/// 控制面板默认展示的最近设备数
pub const RECENT_DEVICE_COUNT: usize = 5;

// =========================================================
// 统计
// =========================================================

/// 按状态统计设备，每次渲染时从当前列表重新计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub pending: usize,
}

impl DeviceStats {
    pub fn from_devices(devices: &[Device]) -> Self {
        let count = |status: DeviceStatus| devices.iter().filter(|d| d.status == status).count();
        Self {
            total: devices.len(),
            active: count(DeviceStatus::Active),
            inactive: count(DeviceStatus::Inactive),
            pending: count(DeviceStatus::Pending),
        }
    }
}

pub fn recent_devices(devices: &[Device], limit: usize) -> Vec<Device> {
    devices.iter().take(limit).cloned().collect()
}

// =========================================================
// 控制面板
// =========================================================

/// 控制面板数据
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub devices: Vec<Device>,
    pub user: Option<User>,
    /// 设备列表加载失败时的提示
    pub error: Option<String>,
}

impl Dashboard {
    /// 并发拉取设备列表与当前用户，两者都完成后才返回
    pub async fn load<C: HttpClient>(api: &InventoryApi<C>, auth: &AuthClient<C>) -> Self {
        let (devices, user) = futures::join!(api.list_devices(), auth.current_user());

        match devices {
            Ok(devices) => Self {
                devices,
                user,
                error: None,
            },
            Err(e) => {
                crate::log_error!("[Dashboard] Failed to load devices: {}", e);
                Self {
                    devices: Vec::new(),
                    user,
                    error: Some(e.user_message("Failed to load devices")),
                }
            }
        }
    }

    pub fn stats(&self) -> DeviceStats {
        DeviceStats::from_devices(&self.devices)
    }

    pub fn recent(&self) -> Vec<Device> {
        recent_devices(&self.devices, RECENT_DEVICE_COUNT)
    }
}

/// 变更成功之后的列表刷新结果
///
/// 变更本身已被服务端接受；刷新失败只影响列表展示，不代表变更失败。
pub type Refetch<T> = ApiResult<Vec<T>>;

// =========================================================
// 设备
// =========================================================

/// 提交设备表单：先本地校验，再按模式创建或更新，最后重新拉取列表
///
/// 外层 `Err` 只表示校验或变更失败；刷新失败放在内层。
pub async fn submit_device<C: HttpClient>(
    api: &InventoryApi<C>,
    form: &DeviceForm,
) -> Result<Refetch<Device>, SubmitError> {
    match form.submission()? {
        DeviceSubmission::Create(device) => {
            let created = api
                .create_device(&device)
                .await
                .map_err(|e| e.in_op("views.submit_device"))?;
            crate::log_info!("[Devices] Created device {} ({})", created.hostname, created.id);
        }
        DeviceSubmission::Update { id, changes } => {
            api.update_device(id, changes)
                .await
                .map_err(|e| e.in_op("views.submit_device"))?;
            crate::log_info!("[Devices] Updated device {}", id);
        }
    }
    Ok(refetch_devices(api).await)
}

/// 删除设备并重新拉取列表
///
/// 删除失败会返回给页面展示（例如重复删除得到 404），而不是只写日志。
pub async fn delete_device<C: HttpClient>(
    api: &InventoryApi<C>,
    id: i64,
) -> ApiResult<Refetch<Device>> {
    if let Err(e) = api.delete_device(id).await {
        crate::log_error!("[Devices] Error deleting device {}: {}", id, e);
        return Err(e.in_op("views.delete_device"));
    }
    Ok(refetch_devices(api).await)
}

async fn refetch_devices<C: HttpClient>(api: &InventoryApi<C>) -> Refetch<Device> {
    api.list_devices().await.map_err(|e| {
        crate::log_error!("[Devices] Error fetching devices: {}", e);
        e.in_op("views.refetch_devices")
    })
}

// =========================================================
// 用户
// =========================================================

pub async fn submit_user<C: HttpClient>(
    api: &InventoryApi<C>,
    form: &UserForm,
) -> Result<Refetch<User>, SubmitError> {
    let changes = form.to_changes()?;
    api.update_user(form.user_id, changes)
        .await
        .map_err(|e| e.in_op("views.submit_user"))?;
    crate::log_info!("[Users] Updated user {}", form.username());
    Ok(refetch_users(api).await)
}

pub async fn delete_user<C: HttpClient>(
    api: &InventoryApi<C>,
    id: i64,
) -> ApiResult<Refetch<User>> {
    if let Err(e) = api.delete_user(id).await {
        crate::log_error!("[Users] Error deleting user {}: {}", id, e);
        return Err(e.in_op("views.delete_user"));
    }
    Ok(refetch_users(api).await)
}

async fn refetch_users<C: HttpClient>(api: &InventoryApi<C>) -> Refetch<User> {
    api.list_users().await.map_err(|e| {
        crate::log_error!("[Users] Error fetching users: {}", e);
        e.in_op("views.refetch_users")
    })
}
