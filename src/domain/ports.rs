use crate::utils::error::Result;
use std::path::Path;

/// 唯讀設定來源，由服務層與持久化層在建構時取得
pub trait SettingsProvider {
    fn max_credits_per_semester(&self) -> u32;
    fn data_directory(&self) -> &Path;
    fn backup_directory(&self) -> &Path;
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for &T {
    fn max_credits_per_semester(&self) -> u32 {
        (**self).max_credits_per_semester()
    }

    fn data_directory(&self) -> &Path {
        (**self).data_directory()
    }

    fn backup_directory(&self) -> &Path {
        (**self).backup_directory()
    }
}

/// 計算目錄大小（位元組）；路徑不存在時回傳 0
pub trait DirectorySizer {
    fn directory_size(&self, path: &Path) -> Result<u64>;
}

pub trait Searchable<T> {
    fn find_all(&self) -> Vec<&T>;
    fn find_by<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool;
    fn find_by_id(&self, id: &str) -> Option<&T>;

    fn count(&self) -> usize {
        self.find_all().len()
    }
}
