use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Одноразовый сигнал со значением: семафор с начальным счётчиком 0,
/// который освобождается ровно один раз.
pub struct OneShot<T> {
    slot: Mutex<Option<T>>,
    ready: Condvar,
}

impl<T> OneShot<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    /// Положить значение и разбудить ожидающего. Повторный вызов заменяет
    /// значение, если его ещё не забрали.
    pub fn release(&self, value: T) {
        *self.slot.lock() = Some(value);
        self.ready.notify_one();
    }

    /// Ждать значение. `None` в `timeout` ждёт бесконечно; по истечении
    /// таймаута возвращает `None`.
    pub fn wait(&self, timeout: Option<Duration>) -> Option<T> {
        let mut slot = self.slot.lock();
        let deadline = timeout.map(|t| Instant::now() + t);

        while slot.is_none() {
            match deadline {
                Some(deadline) => {
                    if self.ready.wait_until(&mut slot, deadline).timed_out() {
                        break;
                    }
                }
                None => self.ready.wait(&mut slot),
            }
        }

        slot.take()
    }
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self::new()
    }
}
