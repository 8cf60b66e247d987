//! Supabase Realtime が話す Phoenix チャネルのメッセージ

use crate::domain::entities::Post;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const EVENT_JOIN: &str = "phx_join";
pub const EVENT_LEAVE: &str = "phx_leave";
pub const EVENT_REPLY: &str = "phx_reply";
pub const EVENT_ERROR: &str = "phx_error";
pub const EVENT_CLOSE: &str = "phx_close";
pub const EVENT_HEARTBEAT: &str = "heartbeat";
pub const EVENT_POSTGRES_CHANGES: &str = "postgres_changes";
const PHOENIX_TOPIC: &str = "phoenix";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhoenixMessage {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
}

impl PhoenixMessage {
    /// テーブルへの INSERT だけを購読する join
    pub fn join(topic: &str, schema: &str, table: &str, access_token: &str, reference: u64) -> Self {
        Self {
            topic: topic.to_string(),
            event: EVENT_JOIN.to_string(),
            payload: json!({
                "config": {
                    "broadcast": { "ack": false, "self": false },
                    "presence": { "key": "" },
                    "postgres_changes": [
                        { "event": "INSERT", "schema": schema, "table": table }
                    ]
                },
                "access_token": access_token
            }),
            reference: Some(reference.to_string()),
        }
    }

    pub fn leave(topic: &str, reference: u64) -> Self {
        Self {
            topic: topic.to_string(),
            event: EVENT_LEAVE.to_string(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }

    pub fn heartbeat(reference: u64) -> Self {
        Self {
            topic: PHOENIX_TOPIC.to_string(),
            event: EVENT_HEARTBEAT.to_string(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }

    pub fn is_reply_to(&self, reference: u64) -> bool {
        self.event == EVENT_REPLY && self.reference.as_deref() == Some(reference.to_string().as_str())
    }

    /// phx_reply の `status`（"ok" / "error"）
    pub fn reply_status(&self) -> Option<&str> {
        self.payload.get("status").and_then(Value::as_str)
    }

    pub fn reply_reason(&self) -> String {
        self.payload
            .get("response")
            .map(|response| {
                response
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| response.to_string())
            })
            .unwrap_or_else(|| "unknown reason".to_string())
    }
}

/// 受信メッセージの分類
#[derive(Debug, PartialEq)]
pub enum Incoming {
    Inserted(Box<Post>),
    /// 挿入通知だがレコードを読めなかった
    Malformed(String),
    Closed(String),
    Other,
}

pub fn classify(message: &PhoenixMessage, topic: &str) -> Incoming {
    if message.topic != topic {
        return Incoming::Other;
    }
    match message.event.as_str() {
        EVENT_POSTGRES_CHANGES => {
            let data = message.payload.get("data").unwrap_or(&Value::Null);
            if data.get("type").and_then(Value::as_str) != Some("INSERT") {
                return Incoming::Other;
            }
            parse_record(data.get("record"))
        }
        // 旧プロトコルでは event 名がそのまま "INSERT" になる
        "INSERT" => parse_record(message.payload.get("record")),
        EVENT_ERROR | EVENT_CLOSE => Incoming::Closed(message.event.clone()),
        _ => Incoming::Other,
    }
}

fn parse_record(record: Option<&Value>) -> Incoming {
    let Some(record) = record else {
        return Incoming::Malformed("missing record".to_string());
    };
    match serde_json::from_value::<Post>(record.clone()) {
        Ok(post) => Incoming::Inserted(Box::new(post)),
        Err(err) => Incoming::Malformed(err.to_string()),
    }
}
