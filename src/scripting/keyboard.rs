use crate::debug_if_enabled;
use crate::error::Result;
use crate::services::Mediator;
use std::sync::Arc;

/// Генерация событий клавиатуры через медиатор хоста
pub struct Keyboard {
    mediator: Arc<dyn Mediator>,
}

impl Keyboard {
    pub fn new(mediator: Arc<dyn Mediator>) -> Self {
        Self { mediator }
    }

    /// Отправить последовательность клавиш (включая токены вроде `<enter>`)
    pub fn send_keys(&self, key_string: &str) -> Result<()> {
        debug_if_enabled!("send_keys: {:?}", key_string);
        self.mediator.send_string(key_string)?;
        self.mediator.flush()
    }

    /// Отправить одну клавишу `repeat` раз (по умолчанию 1).
    ///
    /// При `repeat < 1` ничего не отправляется, но flush всё равно выполняется
    /// ровно один раз в конце.
    pub fn send_key(&self, key: &str, repeat: Option<i64>) -> Result<()> {
        let repeat = repeat.unwrap_or(1);
        debug_if_enabled!("send_key: {:?} x{}", key, repeat);

        for _ in 0..repeat.max(0) {
            self.mediator.send_key(key)?;
        }
        self.mediator.flush()
    }
}
