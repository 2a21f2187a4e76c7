//! # UploadSession Entity
//!
//! 1回のアップロードの可変な進捗状態

/// アップロードセッション
///
/// リモートの resumable セッションハンドル、受信確認済みオフセット、
/// 連続リトライ回数を保持する。ドライバーが1回のアップロードの間だけ占有する。
#[derive(Debug)]
pub struct UploadSession<H> {
    handle: H,
    offset: u64,
    retries: u32,
}

impl<H> UploadSession<H> {
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            offset: 0,
            retries: 0,
        }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// リモートが受信確認したバイトオフセット
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[inline]
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// オフセットを進め、リトライ回数をリセットする
    pub fn advance(&mut self, offset: u64) {
        self.offset = offset;
        self.retries = 0;
    }

    /// リモートの受信確認に合わせてオフセットを戻す（リトライ回数は維持）
    pub fn rewind(&mut self, offset: u64) {
        self.offset = offset;
    }

    /// リトライ回数を1増やし、増加後の値を返す
    pub fn record_failure(&mut self) -> u32 {
        self.retries += 1;
        self.retries
    }
}
