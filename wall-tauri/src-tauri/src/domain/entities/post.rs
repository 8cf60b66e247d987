use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `posts` テーブルの 1 行。作成後は不変。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    #[serde(deserialize_with = "row_id")]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub body: String,
    #[serde(with = "wire_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Post {
    /// 空文字の `photo_url` は写真なしとして扱う
    pub fn photo(&self) -> Option<&str> {
        self.photo_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

/// 挿入用のレコード。`id` と `created_at` はサーバー側で採番される。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewPost {
    pub user_id: String,
    pub name: String,
    pub body: String,
    pub photo_url: String,
}

impl NewPost {
    // 認証がないため投稿ごとに author id を振り直している
    pub fn new(name: String, body: String, photo_url: String) -> Self {
        Self {
            user_id: uuid::Uuid::new_v4().to_string(),
            name,
            body,
            photo_url,
        }
    }
}

// bigint 主キーのテーブルでは数値で届く
fn row_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// PostgREST と Realtime の両方のタイムスタンプ表記を受け付ける。
/// Realtime はオフセットなしの `timestamp` を送ってくることがあるので UTC とみなす。
mod wire_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        // "2024-05-01 12:00:00+00" 形式（Postgres の text 表現）
        if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Some(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn deserializes_postgrest_row() {
        let post: Post = serde_json::from_value(json!({
            "id": "42",
            "user_id": "2c0b6f3e-0000-4000-8000-000000000000",
            "name": "Jane Doe",
            "body": "hello",
            "created_at": "2024-05-01T12:00:00.123456+00:00",
            "photo_url": ""
        }))
        .unwrap();

        assert_eq!(post.id, "42");
        assert_eq!(post.photo(), None);
        assert_eq!(
            post.created_at.timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn deserializes_realtime_record_without_offset_or_photo() {
        let post: Post = serde_json::from_value(json!({
            "id": "7",
            "user_id": "u",
            "name": "Prince",
            "body": "pushed",
            "created_at": "2024-05-01T12:00:00.5"
        }))
        .unwrap();

        assert_eq!(post.photo_url, None);
        assert_eq!(post.created_at.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn numeric_row_id_is_read_as_text() {
        let post: Post = serde_json::from_value(json!({
            "id": 42,
            "user_id": "u",
            "name": "n",
            "body": "b",
            "created_at": "2024-05-01T12:00:00Z",
            "photo_url": null
        }))
        .unwrap();
        assert_eq!(post.id, "42");
        assert_eq!(post.photo(), None);
    }

    #[test]
    fn accepts_postgres_text_timestamp() {
        let parsed = wire_timestamp::parse("2024-05-01 12:00:00+00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn photo_returns_non_empty_url() {
        let post = Post {
            id: "1".into(),
            user_id: "u".into(),
            name: "n".into(),
            body: "b".into(),
            created_at: Utc::now(),
            photo_url: Some("https://cdn.example/p.png".into()),
        };
        assert_eq!(post.photo(), Some("https://cdn.example/p.png"));
    }

    #[test]
    fn new_post_gets_fresh_author_id_each_time() {
        let a = NewPost::new("n".into(), "b".into(), String::new());
        let b = NewPost::new("n".into(), "b".into(), String::new());
        assert_ne!(a.user_id, b.user_id);
        assert!(uuid::Uuid::parse_str(&a.user_id).is_ok());
    }
}
