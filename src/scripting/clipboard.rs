use crate::debug_if_enabled;
use crate::error::Result;
use crate::script_error;
use crate::services::{Buffer, ClipboardBackend};
use crate::utils::OneShot;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Чтение и запись буфера обмена и первичного выделения X11.
///
/// Бэкенд отдаёт текст через колбэк; чтение здесь блокирует поток до ответа.
/// Без `read_timeout` ожидание бесконечно, если колбэк так и не будет вызван.
pub struct Clipboard {
    backend: Arc<dyn ClipboardBackend>,
    read_timeout: Option<Duration>,
}

impl Clipboard {
    pub fn new(backend: Arc<dyn ClipboardBackend>, read_timeout: Option<Duration>) -> Self {
        Self {
            backend,
            read_timeout,
        }
    }

    pub fn fill_selection(&self, contents: &str) -> Result<()> {
        self.backend.set_text(Buffer::PrimarySelection, contents)
    }

    pub fn get_selection(&self) -> Result<String> {
        self.request(Buffer::PrimarySelection)
    }

    pub fn fill_clipboard(&self, contents: &str) -> Result<()> {
        self.backend.set_text(Buffer::Clipboard, contents)
    }

    pub fn get_clipboard(&self) -> Result<String> {
        self.request(Buffer::Clipboard)
    }

    fn request(&self, buffer: Buffer) -> Result<String> {
        let signal = Arc::new(OneShot::new());
        let remote = Arc::clone(&signal);

        debug_if_enabled!("Запрос текста из {}", buffer);
        self.backend
            .request_text(buffer, Box::new(move |text| remote.release(text)));

        match signal.wait(self.read_timeout) {
            Some(text) => text,
            None => {
                warn!("{} не ответил за {:?}", buffer, self.read_timeout);
                Err(script_error!(
                    clipboard_timeout,
                    "{} не ответил за {:?}",
                    buffer,
                    self.read_timeout.unwrap_or_default()
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptError;
    use crate::services::clipboard_backend::{DryRunClipboard, TextCallback};
    use parking_lot::Mutex;

    /// Бэкенд, который принимает запросы и никогда не отвечает
    #[derive(Default)]
    struct SilentBackend {
        pending: Mutex<Vec<TextCallback>>,
    }

    impl ClipboardBackend for SilentBackend {
        fn set_text(&self, _buffer: Buffer, _text: &str) -> Result<()> {
            Ok(())
        }

        fn request_text(&self, _buffer: Buffer, callback: TextCallback) {
            self.pending.lock().push(callback);
        }
    }

    #[test]
    fn fill_then_get_each_buffer() {
        let clipboard = Clipboard::new(Arc::new(DryRunClipboard::new()), None);
        clipboard.fill_clipboard("from clipboard").unwrap();
        clipboard.fill_selection("выделение").unwrap();

        assert_eq!(clipboard.get_clipboard().unwrap(), "from clipboard");
        assert_eq!(clipboard.get_selection().unwrap(), "выделение");
    }

    #[test]
    fn missing_callback_times_out() {
        let clipboard = Clipboard::new(
            Arc::new(SilentBackend::default()),
            Some(Duration::from_millis(50)),
        );
        assert!(matches!(
            clipboard.get_clipboard(),
            Err(ScriptError::ClipboardTimeout(_))
        ));
    }

    #[test]
    fn backend_errors_propagate() {
        struct FailingBackend;

        impl ClipboardBackend for FailingBackend {
            fn set_text(&self, _buffer: Buffer, _text: &str) -> Result<()> {
                Ok(())
            }

            fn request_text(&self, _buffer: Buffer, callback: TextCallback) {
                callback(Err(ScriptError::ExternalToolNotFound("xclip".into())));
            }
        }

        let clipboard = Clipboard::new(Arc::new(FailingBackend), None);
        assert!(matches!(
            clipboard.get_selection(),
            Err(ScriptError::ExternalToolNotFound(_))
        ));
    }
}
