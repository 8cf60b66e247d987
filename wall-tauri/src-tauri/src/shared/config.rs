use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub feed: FeedConfig,
    pub storage: StorageConfig,
    pub profile: ProfileConfig,
}

/// Supabase プロジェクトへの接続情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub table: String,
    pub limit: usize,
    pub live_updates: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub cache_control_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub default_display_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: String::new(),
                anon_key: String::new(),
            },
            feed: FeedConfig {
                table: "posts".to_string(),
                limit: crate::domain::constants::FEED_FETCH_LIMIT,
                live_updates: true,
            },
            storage: StorageConfig {
                bucket: "post-photos".to_string(),
                cache_control_secs: 3600, // 1 hour
            },
            profile: ProfileConfig {
                default_display_name: crate::domain::constants::DEFAULT_DISPLAY_NAME.to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("WALL_SUPABASE_URL") {
            cfg.backend.url = v.trim().trim_end_matches('/').to_string();
        }
        if let Ok(v) = std::env::var("WALL_SUPABASE_ANON_KEY") {
            cfg.backend.anon_key = v.trim().to_string();
        }

        if let Ok(v) = std::env::var("WALL_POSTS_TABLE") {
            if !v.trim().is_empty() {
                cfg.feed.table = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("WALL_FEED_LIMIT") {
            if let Some(value) = parse_usize(&v) {
                cfg.feed.limit = value;
            }
        }
        if let Ok(v) = std::env::var("WALL_LIVE_UPDATES") {
            cfg.feed.live_updates = parse_bool(&v, cfg.feed.live_updates);
        }

        if let Ok(v) = std::env::var("WALL_PHOTO_BUCKET") {
            if !v.trim().is_empty() {
                cfg.storage.bucket = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("WALL_PHOTO_CACHE_SECONDS") {
            if let Some(value) = parse_u64(&v) {
                cfg.storage.cache_control_secs = value;
            }
        }

        if let Ok(v) = std::env::var("WALL_DEFAULT_DISPLAY_NAME") {
            cfg.profile.default_display_name = v;
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.backend.url.is_empty() {
            return Err("WALL_SUPABASE_URL must be set".to_string());
        }
        if self.backend.anon_key.is_empty() {
            return Err("WALL_SUPABASE_ANON_KEY must be set".to_string());
        }
        let url = Url::parse(&self.backend.url)
            .map_err(|e| format!("Invalid backend url {}: {}", self.backend.url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "Backend url must be http or https, got {}",
                url.scheme()
            ));
        }
        if self.feed.limit == 0 {
            return Err("Feed limit must be greater than 0".to_string());
        }
        if self.feed.table.is_empty() {
            return Err("Posts table name must not be empty".to_string());
        }
        if self.storage.bucket.is_empty() {
            return Err("Photo bucket name must not be empty".to_string());
        }
        Ok(())
    }

    /// Realtime 用の WebSocket エンドポイント（http→ws, https→wss）
    pub fn realtime_url(&self) -> Result<Url, String> {
        let mut url = Url::parse(&self.backend.url)
            .map_err(|e| format!("Invalid backend url {}: {}", self.backend.url, e))?;
        let scheme = match url.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => return Err(format!("Unsupported backend scheme: {}", other)),
        };
        url.set_scheme(scheme)
            .map_err(|_| format!("Failed to derive realtime url from {}", self.backend.url))?;
        url.set_path("/realtime/v1/websocket");
        url.query_pairs_mut()
            .clear()
            .append_pair("apikey", &self.backend.anon_key)
            .append_pair("vsn", "1.0.0");
        Ok(url)
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.backend.url = "https://abc.supabase.co".to_string();
        cfg.backend.anon_key = "anon".to_string();
        cfg
    }

    #[test]
    fn defaults_match_wall_page() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.feed.table, "posts");
        assert_eq!(cfg.feed.limit, 50);
        assert_eq!(cfg.storage.bucket, "post-photos");
        assert_eq!(cfg.storage.cache_control_secs, 3600);
        assert_eq!(cfg.profile.default_display_name, "Aldrich Aranzamendez");
    }

    #[test]
    fn validate_requires_credentials() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_err());
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_scheme_and_zero_limit() {
        let mut cfg = configured();
        cfg.backend.url = "ftp://abc.supabase.co".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = configured();
        cfg.feed.limit = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn realtime_url_switches_scheme() {
        let url = configured().realtime_url().unwrap();
        assert_eq!(url.scheme(), "wss");
        assert_eq!(url.path(), "/realtime/v1/websocket");
        assert_eq!(url.query(), Some("apikey=anon&vsn=1.0.0"));

        let mut cfg = configured();
        cfg.backend.url = "http://127.0.0.1:54321".to_string();
        assert_eq!(cfg.realtime_url().unwrap().scheme(), "ws");
    }

    #[test]
    fn parse_bool_falls_back_to_default() {
        assert!(parse_bool("on", false));
        assert!(!parse_bool("0", true));
        assert!(parse_bool("maybe", true));
    }
}
