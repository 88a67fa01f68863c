//! 操作结果提示
//!
//! 成功或失败的短暂通知，3 秒后自动消失。新通知会取消上一条的计时器。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const TOAST_DURATION_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

#[component]
pub fn Toast(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    // Timeout 持有 JS 闭包，只能存放在本地存储中
    let pending = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |_| {
        if notice.get().is_some() {
            let timeout = Timeout::new(TOAST_DURATION_MS, move || notice.set(None));
            // 替换时旧计时器被 drop 即取消
            pending.set_value(Some(timeout));
        }
    });

    move || {
        notice.get().map(|n| {
            let class = if n.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{n.message}</span>
                    </div>
                </div>
            }
        })
    }
}
