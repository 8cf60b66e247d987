use super::post::Post;

/// 画面に表示する投稿リスト（新しい順）
#[derive(Debug, Clone, Default)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    /// 取得結果で丸ごと置き換える
    pub fn replace(&mut self, posts: Vec<Post>, limit: usize) {
        let mut posts = posts;
        posts.truncate(limit);
        self.posts = posts;
    }

    /// 先頭に追加する。ID による重複排除も件数の切り詰めもしない。
    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
