use crate::domain::constants::{DEFAULT_CITY, DEFAULT_NETWORK, INITIALS_PLACEHOLDER};
use crate::domain::value_objects::PhotoPreview;

/// プロフィールカードのローカル状態（永続化しない）。
/// 表示名はウォール側が所有するのでここには持たない。
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCard {
    pub network: String,
    pub city: String,
    pub is_editing: bool,
    pub photo: Option<PhotoPreview>,
}

impl Default for ProfileCard {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            city: DEFAULT_CITY.to_string(),
            is_editing: false,
            photo: None,
        }
    }
}

impl ProfileCard {
    pub fn toggle_editing(&mut self) -> bool {
        self.is_editing = !self.is_editing;
        self.is_editing
    }
}

/// 表示名の先頭 2 語の頭文字（大文字化はしない）。1 語なら 1 文字。
pub fn initials(display_name: &str) -> String {
    let mut words = display_name.split_whitespace();
    let Some(first) = words.next().and_then(|w| w.chars().next()) else {
        return INITIALS_PLACEHOLDER.to_string();
    };
    let mut out = String::from(first);
    if let Some(second) = words.next().and_then(|w| w.chars().next()) {
        out.push(second);
    }
    out
}
