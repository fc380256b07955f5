use crate::error::Result;
use crate::events::KeyInput;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

use super::r#trait::Mediator;

/// Медиатор без реального ввода: логирует и запоминает доставленное
pub struct DryRunMediator {
    pending: Mutex<Vec<KeyInput>>,
    delivered: Mutex<Vec<KeyInput>>,
    flushes: AtomicUsize,
    window_title: RwLock<String>,
}

impl DryRunMediator {
    pub fn new() -> Self {
        info!("Инициализация DryRunMediator");
        Self {
            pending: Mutex::new(Vec::new()),
            delivered: Mutex::new(Vec::new()),
            flushes: AtomicUsize::new(0),
            window_title: RwLock::new("Terminal - dry_run".to_string()),
        }
    }

    /// Эмулировать смену активного окна
    pub fn set_window_title(&self, title: &str) {
        *self.window_title.write() = title.to_string();
    }

    /// Ввод, прошедший через flush
    pub fn delivered(&self) -> Vec<KeyInput> {
        self.delivered.lock().clone()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl Default for DryRunMediator {
    fn default() -> Self {
        Self::new()
    }
}

impl Mediator for DryRunMediator {
    fn send_string(&self, text: &str) -> Result<()> {
        self.pending.lock().push(KeyInput::Text(text.to_string()));
        Ok(())
    }

    fn send_key(&self, key: &str) -> Result<()> {
        self.pending.lock().push(KeyInput::Key(key.to_string()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let inputs = std::mem::take(&mut *self.pending.lock());
        for input in &inputs {
            info!("[DRY RUN] Синтетический ввод: {}", input);
        }
        self.delivered.lock().extend(inputs);
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn get_window_title(&self) -> Result<String> {
        Ok(self.window_title.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_only_on_flush() {
        let mediator = DryRunMediator::new();
        mediator.send_key("<enter>").unwrap();
        assert!(mediator.delivered().is_empty());

        mediator.flush().unwrap();
        assert_eq!(mediator.delivered(), vec![KeyInput::Key("<enter>".into())]);
        assert_eq!(mediator.flush_count(), 1);
    }

    #[test]
    fn window_title_can_be_changed() {
        let mediator = DryRunMediator::new();
        mediator.set_window_title("MyApp");
        assert_eq!(mediator.get_window_title().unwrap(), "MyApp");
    }
}
