use async_trait::async_trait;

/// 親（ウォール）が所有する表示名を子（プロフィールカード）から読み書きするための口
#[async_trait]
pub trait DisplayNameBinding: Send + Sync {
    async fn display_name(&self) -> String;

    async fn set_display_name(&self, name: String);
}
