use crate::error::{ScriptError, Result};
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Хранилище значений между запусками скрипта.
///
/// Сам компонент держит данные только в памяти; сохранение на диск
/// выполняет хост через `load`/`save`.
#[derive(Debug, Default)]
pub struct Store {
    values: DashMap<String, Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сохранить значение (перезаписывает существующее)
    pub fn set_value(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get_value(&self, key: &str) -> Result<Value> {
        match self.values.get(key) {
            Some(value) => Ok(value.clone()),
            None => ScriptError::key_not_found(key),
        }
    }

    /// Удалить значение, вернув его
    pub fn remove_value(&self, key: &str) -> Result<Value> {
        match self.values.remove(key) {
            Some((_, value)) => Ok(value),
            None => ScriptError::key_not_found(key),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Снимок содержимого в порядке ключей
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Загрузить хранилище из JSON-объекта; отсутствующий файл даёт пустое хранилище
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let store = Self::new();

        if !path.exists() {
            debug!("Файл хранилища {:?} не найден, начинаем с пустого", path);
            return Ok(store);
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(store);
        }

        let values: BTreeMap<String, Value> = serde_json::from_str(&contents)?;
        for (key, value) in values {
            store.values.insert(key, value);
        }

        info!("Хранилище загружено из {:?}: {} значений", path, store.len());
        Ok(store)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        debug!("Хранилище сохранено в {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get_returns_value() {
        let store = Store::new();
        store.set_value("count", 3);
        store.set_value("nested", json!({"a": [1, 2]}));

        assert_eq!(store.get_value("count").unwrap(), json!(3));
        assert_eq!(store.get_value("nested").unwrap(), json!({"a": [1, 2]}));

        store.set_value("count", "three");
        assert_eq!(store.get_value("count").unwrap(), json!("three"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn absent_key_is_an_error() {
        let store = Store::new();
        assert!(matches!(store.get_value("nope"), Err(ScriptError::KeyNotFound(k)) if k == "nope"));
        assert!(matches!(store.remove_value("nope"), Err(ScriptError::KeyNotFound(_))));
    }

    #[test]
    fn remove_deletes_entry() {
        let store = Store::new();
        store.set_value("k", true);
        assert_eq!(store.remove_value("k").unwrap(), json!(true));
        assert!(store.get_value("k").is_err());
        assert!(store.remove_value("k").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = Store::new();
        store.set_value("name", "value");
        store.set_value("list", json!([1, "two"]));
        store.save(&path).unwrap();

        let loaded = Store::load(&path).unwrap();
        assert_eq!(loaded.snapshot(), store.snapshot());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::load(dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }
}
