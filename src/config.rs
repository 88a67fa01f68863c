// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 构建时未设置 `NETINV_API_URL` 时使用的后端地址
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// 令牌在持久化存储中的键名
pub const TOKEN_STORAGE_KEY: &str = "token";

/// 客户端配置
///
/// 浏览器中没有进程环境变量，API 地址在构建时通过 `option_env!` 注入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub token_key: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token_key: TOKEN_STORAGE_KEY.to_string(),
        }
    }

    /// 读取构建时的 `NETINV_API_URL`，为空则使用默认值
    pub fn from_env() -> Self {
        let api_url = option_env!("NETINV_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Self::new(api_url)
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}/{}", self.api_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let cfg = ClientConfig::new("http://inventory.local:8000/");
        assert_eq!(cfg.url("/api/devices"), "http://inventory.local:8000/api/devices");
        assert_eq!(cfg.url("api/users"), "http://inventory.local:8000/api/users");
    }

    #[test]
    fn test_token_key_is_fixed() {
        assert_eq!(ClientConfig::new(DEFAULT_API_URL).token_key, "token");
    }
}
