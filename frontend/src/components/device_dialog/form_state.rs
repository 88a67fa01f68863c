//! 设备表单状态
//!
//! 把输入框绑定的 signal 整合为 `DeviceFormState`：
//! - 新建时重置为默认值
//! - 编辑时从记录加载（密码不回显）
//! - 提交时转换为核心层的 `DeviceForm`，由它负责校验与差异计算

use leptos::prelude::*;
use netinv::forms::{DeviceForm, FormMode};
use netinv_shared::{Device, DeviceStatus, DeviceType};

/// 使用 `RwSignal` 因为它实现了 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct DeviceFormState {
    // 标识
    pub hostname: RwSignal<String>,
    pub ip_address: RwSignal<String>,
    pub device_type: RwSignal<DeviceType>,
    pub platform: RwSignal<String>,
    pub vendor: RwSignal<String>,
    pub model: RwSignal<String>,
    pub status: RwSignal<DeviceStatus>,
    pub location: RwSignal<String>,
    pub description: RwSignal<String>,

    // 访问凭据
    pub ssh_port: RwSignal<String>,
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub enable_password: RwSignal<String>,

    /// 编辑中的原始记录；None 表示新建
    original: RwSignal<Option<Device>>,
}

impl DeviceFormState {
    pub fn new() -> Self {
        let state = Self {
            hostname: RwSignal::new(String::new()),
            ip_address: RwSignal::new(String::new()),
            device_type: RwSignal::new(DeviceType::default()),
            platform: RwSignal::new(String::new()),
            vendor: RwSignal::new(String::new()),
            model: RwSignal::new(String::new()),
            status: RwSignal::new(DeviceStatus::default()),
            location: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            ssh_port: RwSignal::new(String::new()),
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            enable_password: RwSignal::new(String::new()),
            original: RwSignal::new(None),
        };
        state.apply(&DeviceForm::new());
        state
    }

    fn apply(&self, form: &DeviceForm) {
        self.hostname.set(form.hostname.clone());
        self.ip_address.set(form.ip_address.clone());
        self.device_type.set(form.device_type.clone());
        self.platform.set(form.platform.clone());
        self.vendor.set(form.vendor.clone());
        self.model.set(form.model.clone());
        self.status.set(form.status);
        self.location.set(form.location.clone());
        self.description.set(form.description.clone());
        self.ssh_port.set(form.ssh_port.clone());
        self.username.set(form.username.clone());
        self.password.set(form.password.clone());
        self.enable_password.set(form.enable_password.clone());
        self.original.set(form.original().cloned());
    }

    /// 切换到新建模式
    pub fn reset(&self) {
        self.apply(&DeviceForm::new());
    }

    /// 切换到编辑模式
    pub fn load(&self, device: &Device) {
        self.apply(&DeviceForm::edit(device));
    }

    pub fn mode(&self) -> FormMode {
        self.original.with(|original| match original {
            Some(device) => FormMode::Edit(device.id),
            None => FormMode::Create,
        })
    }

    pub fn is_edit(&self) -> bool {
        self.mode().is_edit()
    }

    pub fn to_form(&self) -> DeviceForm {
        let mut form = match self.original.get_untracked() {
            Some(device) => DeviceForm::edit(&device),
            None => DeviceForm::new(),
        };
        form.hostname = self.hostname.get_untracked();
        form.ip_address = self.ip_address.get_untracked();
        form.device_type = self.device_type.get_untracked();
        form.platform = self.platform.get_untracked();
        form.vendor = self.vendor.get_untracked();
        form.model = self.model.get_untracked();
        form.status = self.status.get_untracked();
        form.location = self.location.get_untracked();
        form.description = self.description.get_untracked();
        form.ssh_port = self.ssh_port.get_untracked();
        form.username = self.username.get_untracked();
        form.password = self.password.get_untracked();
        form.enable_password = self.enable_password.get_untracked();
        form
    }
}

impl Default for DeviceFormState {
    fn default() -> Self {
        Self::new()
    }
}
