use super::protocol::{Incoming, PhoenixMessage, classify};
use crate::application::ports::{LiveFeed, LiveFeedSubscription};
use crate::domain::entities::Post;
use crate::shared::AppError;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);
const JOIN_REF: u64 = 1;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("Failed to connect to realtime: {0}")]
    Connect(String),

    #[error("Channel join rejected: {0}")]
    JoinRejected(String),

    #[error("Connection closed before join reply")]
    ClosedBeforeJoin,

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<RealtimeError> for AppError {
    fn from(err: RealtimeError) -> Self {
        AppError::Realtime(err.to_string())
    }
}

/// Supabase Realtime の `postgres_changes` で INSERT を受け取る
pub struct SupabaseRealtime {
    url: Url,
    access_token: String,
    schema: String,
    table: String,
}

impl SupabaseRealtime {
    pub fn new(url: Url, access_token: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            url,
            access_token: access_token.into(),
            schema: "public".to_string(),
            table: table.into(),
        }
    }

    fn topic(&self) -> String {
        format!("realtime:{}", self.table)
    }

    async fn join(&self, socket: &mut WsStream, topic: &str) -> Result<(), RealtimeError> {
        let join = PhoenixMessage::join(
            topic,
            &self.schema,
            &self.table,
            &self.access_token,
            JOIN_REF,
        );
        send(socket, &join).await?;

        while let Some(frame) = socket.next().await {
            let frame = frame.map_err(|err| RealtimeError::Protocol(err.to_string()))?;
            let Some(message) = decode(frame) else {
                continue;
            };
            if message.topic == topic && message.is_reply_to(JOIN_REF) {
                return match message.reply_status() {
                    Some("ok") => Ok(()),
                    _ => Err(RealtimeError::JoinRejected(message.reply_reason())),
                };
            }
        }
        Err(RealtimeError::ClosedBeforeJoin)
    }
}

#[async_trait]
impl LiveFeed for SupabaseRealtime {
    async fn subscribe(&self) -> Result<LiveFeedSubscription, AppError> {
        let (mut socket, _) = connect_async(self.url.as_str())
            .await
            .map_err(|err| RealtimeError::Connect(err.to_string()))?;

        let topic = self.topic();
        self.join(&mut socket, &topic).await?;
        info!("Joined realtime channel {}", topic);

        let (tx, rx) = mpsc::unbounded_channel();
        let release = CancellationToken::new();
        tokio::spawn(run_channel(socket, topic, tx, release.clone()));

        Ok(LiveFeedSubscription::new(rx, release))
    }
}

/// 購読が解放されるかソケットが閉じるまで受信を続ける
async fn run_channel(
    mut socket: WsStream,
    topic: String,
    tx: mpsc::UnboundedSender<Post>,
    release: CancellationToken,
) {
    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    heartbeat.tick().await;
    let mut next_ref = JOIN_REF + 1;

    loop {
        tokio::select! {
            _ = release.cancelled() => {
                let leave = PhoenixMessage::leave(&topic, next_ref);
                if let Err(err) = send(&mut socket, &leave).await {
                    warn!("Failed to leave realtime channel: {}", err);
                }
                let _ = socket.close(None).await;
                info!("Left realtime channel {}", topic);
                break;
            }
            _ = heartbeat.tick() => {
                let beat = PhoenixMessage::heartbeat(next_ref);
                next_ref += 1;
                if let Err(err) = send(&mut socket, &beat).await {
                    error!("Realtime heartbeat failed: {}", err);
                    break;
                }
            }
            frame = socket.next() => {
                let frame = match frame {
                    Some(Ok(frame)) => frame,
                    Some(Err(err)) => {
                        error!("Realtime socket error: {}", err);
                        break;
                    }
                    None => {
                        warn!("Realtime socket closed");
                        break;
                    }
                };
                if let Message::Ping(data) = &frame {
                    let _ = socket.send(Message::Pong(data.clone())).await;
                    continue;
                }
                let Some(message) = decode(frame) else {
                    continue;
                };
                match classify(&message, &topic) {
                    Incoming::Inserted(post) => {
                        debug!("Realtime insert {}", post.id);
                        if tx.send(*post).is_err() {
                            // 受け手がいなくなった
                            break;
                        }
                    }
                    Incoming::Malformed(reason) => {
                        warn!("Ignoring malformed realtime record: {}", reason);
                    }
                    Incoming::Closed(event) => {
                        warn!("Realtime channel {} closed by server ({})", topic, event);
                        break;
                    }
                    Incoming::Other => {}
                }
            }
        }
    }
}

async fn send(socket: &mut WsStream, message: &PhoenixMessage) -> Result<(), RealtimeError> {
    let text =
        serde_json::to_string(message).map_err(|err| RealtimeError::Protocol(err.to_string()))?;
    socket
        .send(Message::Text(text.into()))
        .await
        .map_err(|err| RealtimeError::Protocol(err.to_string()))
}

fn decode(frame: Message) -> Option<PhoenixMessage> {
    let Message::Text(text) = frame else {
        return None;
    };
    match serde_json::from_str::<PhoenixMessage>(text.as_str()) {
        Ok(message) => Some(message),
        Err(err) => {
            warn!("Undecodable realtime frame: {}", err);
            None
        }
    }
}
