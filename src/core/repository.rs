use crate::domain::{Course, Searchable, Student};
use crate::utils::error::{RecordsError, Result};
use std::collections::BTreeMap;

/// 以字串鍵值索引的實體
pub trait Keyed {
    const KIND: &'static str;

    fn key(&self) -> &str;
}

impl Keyed for Student {
    const KIND: &'static str = "Student";

    fn key(&self) -> &str {
        self.id()
    }
}

impl Keyed for Course {
    const KIND: &'static str = "Course";

    fn key(&self) -> &str {
        self.code()
    }
}

/// 記憶體內的鍵值集合，依鍵排序
#[derive(Debug, Clone)]
pub struct Repository<T: Keyed> {
    entries: BTreeMap<String, T>,
}

pub type StudentRepository = Repository<Student>;
pub type CourseRepository = Repository<Course>;

impl<T: Keyed> Default for Repository<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Keyed> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增實體；鍵值重複時回傳驗證錯誤且不修改集合
    pub fn insert(&mut self, entity: T) -> Result<&T> {
        let key = entity.key().to_string();
        if self.entries.contains_key(&key) {
            return Err(RecordsError::validation(format!(
                "{} with key {} already exists",
                T::KIND,
                key
            )));
        }
        Ok(self.entries.entry(key).or_insert(entity))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.remove(key)
    }
}

impl<T: Keyed> Searchable<T> for Repository<T> {
    fn find_all(&self) -> Vec<&T> {
        self.entries.values().collect()
    }

    fn find_by<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.entries.values().filter(|e| predicate(*e)).collect()
    }

    fn find_by_id(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    fn count(&self) -> usize {
        self.entries.len()
    }
}
