use crate::shared::config::BackendConfig;
use crate::shared::AppError;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Supabase プロジェクトへの HTTP クライアント。
/// すべてのリクエストに `apikey` と Bearer トークン（anon key）を付ける。
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: String,
}

/// PostgREST / Storage が返すエラーボディ
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    error: Option<String>,
    details: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.url)?;
        Ok(Self {
            http: Client::new(),
            base_url,
            anon_key: config.anon_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` の後ろにパスセグメントを連結した URL
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AppError::ConfigurationError(format!(
                    "Backend url cannot be a base: {}",
                    self.base_url
                ))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url.path());
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

/// 2xx なら本文を JSON として読み、そうでなければバックエンドのメッセージで失敗させる
pub async fn request_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, AppError> {
    let response = builder
        .send()
        .await
        .map_err(|err| AppError::Network(err.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| AppError::Network(err.to_string()))?;
    if !status.is_success() {
        return Err(backend_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|err| AppError::DeserializationError(err.to_string()))
}

pub(crate) fn backend_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .message
                .or(parsed.error)
                .or(parsed.details)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });
    AppError::backend(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SupabaseClient {
        SupabaseClient::new(&BackendConfig {
            url: url.to_string(),
            anon_key: "anon".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let c = client("https://abc.supabase.co");
        let url = c.endpoint(&["rest", "v1", "posts"]).unwrap();
        assert_eq!(url.as_str(), "https://abc.supabase.co/rest/v1/posts");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let c = client("http://127.0.0.1:8000/proxy/");
        let url = c.endpoint(&["storage", "v1", "object"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/proxy/storage/v1/object");
    }

    #[test]
    fn backend_error_prefers_message_field() {
        let err = backend_error(
            StatusCode::BAD_REQUEST,
            r#"{"code":"42501","message":"permission denied for table posts","details":null}"#,
        );
        assert_eq!(err.user_message(), "permission denied for table posts");
    }

    #[test]
    fn backend_error_falls_back_to_raw_body_or_reason() {
        let err = backend_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.user_message(), "upstream down");

        let err = backend_error(StatusCode::NOT_FOUND, "");
        assert_eq!(err.user_message(), "Not Found");
    }
}
