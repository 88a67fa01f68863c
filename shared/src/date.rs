//! 时间类型模块
//!
//! 后端以不带时区的 ISO-8601 字符串返回时间（UTC），
//! 例如 `2024-05-01T08:30:00.123456`。`Timestamp` 同时兼容带偏移量的 RFC 3339。

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// UTC 时间戳
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub const fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// 解析后端时间字符串
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.naive_utc()));
        }
        NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
            .ok()
            .map(Self)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// 表格中显示的日期时间
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    /// 仅日期
    pub fn display_date(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

/// 最后同步时间：从未同步时显示 "Never"
pub fn format_last_sync(ts: Option<&Timestamp>) -> String {
    ts.map(Timestamp::display)
        .unwrap_or_else(|| "Never".to_string())
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(NAIVE_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
