/// 投稿本文の上限（文字数）
pub const MAX_BODY_CHARS: usize = 280;

/// 初回ロードで取得する最新投稿の件数
pub const FEED_FETCH_LIMIT: usize = 50;

// 画面上の案内は 5MB だが、実際に判定している上限は 10MB
pub const PROFILE_PHOTO_MAX_BYTES: u64 = 10 * 1024 * 1024;

pub const DEFAULT_DISPLAY_NAME: &str = "Aldrich Aranzamendez";
pub const DEFAULT_NETWORK: &str = "None";
pub const DEFAULT_CITY: &str = "Quezon City, PH";

/// 名前からイニシャルを作れないときの表示
pub const INITIALS_PLACEHOLDER: &str = "?";
