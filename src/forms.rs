//! 表单模型
//!
//! 纯数据结构，负责：
//! - 默认值与从记录加载（编辑模式）
//! - 必填/格式校验（校验失败的表单不会到达 API 客户端）
//! - 转换为创建请求或部分更新

use std::net::IpAddr;

use netinv_shared::{
    Credentials, DEFAULT_SSH_PORT, Device, DeviceChanges, DeviceStatus, DeviceType, NewDevice,
    Registration, Role, User, UserChanges,
};

use crate::error::FormError;

/// 共享模态框的模式标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 与原值不同时才返回新值
fn changed(new: &str, old: Option<&str>) -> Option<String> {
    let new = new.trim();
    if new == old.unwrap_or("") {
        None
    } else {
        Some(new.to_string())
    }
}

fn parse_port(raw: &str) -> Result<u16, FormError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(FormError::new(
            "ssh_port",
            "SSH port must be a number between 1 and 65535",
        )),
    }
}

// =========================================================
// 设备表单
// =========================================================

/// 设备创建/编辑的提交结果
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceSubmission {
    Create(NewDevice),
    Update { id: i64, changes: DeviceChanges },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceForm {
    pub mode: FormMode,
    pub hostname: String,
    pub ip_address: String,
    pub device_type: DeviceType,
    pub platform: String,
    pub vendor: String,
    pub model: String,
    pub ssh_port: String,
    pub username: String,
    pub password: String,
    pub enable_password: String,
    pub status: DeviceStatus,
    pub description: String,
    pub location: String,
    original: Option<Device>,
}

impl Default for DeviceForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            hostname: String::new(),
            ip_address: String::new(),
            device_type: DeviceType::CiscoIos,
            platform: String::new(),
            vendor: String::new(),
            model: String::new(),
            ssh_port: DEFAULT_SSH_PORT.to_string(),
            username: String::new(),
            password: String::new(),
            enable_password: String::new(),
            status: DeviceStatus::Active,
            description: String::new(),
            location: String::new(),
            original: None,
        }
    }
}

impl DeviceForm {
    /// 新建模式
    pub fn new() -> Self {
        Self::default()
    }

    /// 编辑模式：密码字段留空，从不回显
    pub fn edit(device: &Device) -> Self {
        Self {
            mode: FormMode::Edit(device.id),
            hostname: device.hostname.clone(),
            ip_address: device.ip_address.clone(),
            device_type: device.device_type.clone(),
            platform: device.platform.clone().unwrap_or_default(),
            vendor: device.vendor.clone().unwrap_or_default(),
            model: device.model.clone().unwrap_or_default(),
            ssh_port: device.ssh_port.to_string(),
            username: device.username.clone().unwrap_or_default(),
            password: String::new(),
            enable_password: String::new(),
            status: device.status,
            description: device.description.clone().unwrap_or_default(),
            location: device.location.clone().unwrap_or_default(),
            original: Some(device.clone()),
        }
    }

    pub fn original(&self) -> Option<&Device> {
        self.original.as_ref()
    }

    /// 必填字段：主机名、IP 地址、设备类型
    pub fn validate(&self) -> Result<(), FormError> {
        if self.hostname.trim().is_empty() {
            return Err(FormError::required("hostname", "Hostname"));
        }
        let ip = self.ip_address.trim();
        if ip.is_empty() {
            return Err(FormError::required("ip_address", "IP address"));
        }
        if ip.parse::<IpAddr>().is_err() {
            return Err(FormError::new(
                "ip_address",
                format!("'{}' is not a valid IP address", ip),
            ));
        }
        if self.device_type.as_str().trim().is_empty() {
            return Err(FormError::required("device_type", "Device type"));
        }
        parse_port(&self.ssh_port)?;
        Ok(())
    }

    pub fn to_new_device(&self) -> Result<NewDevice, FormError> {
        self.validate()?;
        Ok(NewDevice {
            hostname: self.hostname.trim().to_string(),
            ip_address: self.ip_address.trim().to_string(),
            device_type: self.device_type.clone(),
            platform: non_blank(&self.platform),
            vendor: non_blank(&self.vendor),
            model: non_blank(&self.model),
            ssh_port: parse_port(&self.ssh_port)?,
            username: non_blank(&self.username),
            password: non_blank(&self.password),
            enable_password: non_blank(&self.enable_password),
            status: self.status,
            description: non_blank(&self.description),
            location: non_blank(&self.location),
        })
    }

    /// 部分更新：只包含与原记录不同的字段；空白密码表示"不修改"
    pub fn to_changes(&self) -> Result<DeviceChanges, FormError> {
        self.validate()?;
        let original = self.original.as_ref();
        let port = parse_port(&self.ssh_port)?;

        Ok(DeviceChanges {
            hostname: changed(&self.hostname, original.map(|d| d.hostname.as_str())),
            ip_address: changed(&self.ip_address, original.map(|d| d.ip_address.as_str())),
            device_type: (original.map(|d| &d.device_type) != Some(&self.device_type))
                .then(|| self.device_type.clone()),
            platform: changed(&self.platform, original.and_then(|d| d.platform.as_deref())),
            vendor: changed(&self.vendor, original.and_then(|d| d.vendor.as_deref())),
            model: changed(&self.model, original.and_then(|d| d.model.as_deref())),
            ssh_port: (original.map(|d| d.ssh_port) != Some(port)).then_some(port),
            username: changed(&self.username, original.and_then(|d| d.username.as_deref())),
            password: non_blank(&self.password),
            enable_password: non_blank(&self.enable_password),
            status: (original.map(|d| d.status) != Some(self.status)).then_some(self.status),
            description: changed(
                &self.description,
                original.and_then(|d| d.description.as_deref()),
            ),
            location: changed(&self.location, original.and_then(|d| d.location.as_deref())),
        })
    }

    /// 根据模式标记生成创建或更新
    pub fn submission(&self) -> Result<DeviceSubmission, FormError> {
        match self.mode {
            FormMode::Create => Ok(DeviceSubmission::Create(self.to_new_device()?)),
            FormMode::Edit(id) => Ok(DeviceSubmission::Update {
                id,
                changes: self.to_changes()?,
            }),
        }
    }
}

// =========================================================
// 用户表单（仅编辑）
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    original: User,
}

impl UserForm {
    pub fn edit(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone().unwrap_or_default(),
            role: user.role,
            is_active: user.is_active,
            original: user.clone(),
        }
    }

    pub fn username(&self) -> &str {
        &self.original.username
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::required("email", "Email"));
        }
        if !email.contains('@') {
            return Err(FormError::new("email", "Email must be a valid address"));
        }
        Ok(())
    }

    pub fn to_changes(&self) -> Result<UserChanges, FormError> {
        self.validate()?;
        Ok(UserChanges {
            email: changed(&self.email, Some(self.original.email.as_str())),
            full_name: changed(&self.full_name, self.original.full_name.as_deref()),
            role: (self.role != self.original.role).then_some(self.role),
            is_active: (self.is_active != self.original.is_active).then_some(self.is_active),
        })
    }
}

// =========================================================
// 登录 / 注册
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_credentials(&self) -> Result<Credentials, FormError> {
        let username = non_blank(&self.username)
            .ok_or_else(|| FormError::required("username", "Username"))?;
        if self.password.is_empty() {
            return Err(FormError::required("password", "Password"));
        }
        Ok(Credentials {
            username,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

impl RegisterForm {
    pub fn to_registration(&self) -> Result<Registration, FormError> {
        let username = non_blank(&self.username)
            .ok_or_else(|| FormError::required("username", "Username"))?;
        let email =
            non_blank(&self.email).ok_or_else(|| FormError::required("email", "Email"))?;
        if self.password.is_empty() {
            return Err(FormError::required("password", "Password"));
        }
        Ok(Registration {
            username,
            email,
            password: self.password.clone(),
            full_name: non_blank(&self.full_name),
            role: Some(self.role),
        })
    }
}
