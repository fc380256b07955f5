use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::r#trait::{Buffer, ClipboardBackend, TextCallback};

/// Буферы в памяти процесса; ответ на запрос приходит из отдельного потока
#[derive(Clone)]
pub struct DryRunClipboard {
    buffers: Arc<Mutex<HashMap<Buffer, String>>>,
}

impl DryRunClipboard {
    pub fn new() -> Self {
        info!("Инициализация DryRunClipboard");
        Self {
            buffers: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for DryRunClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardBackend for DryRunClipboard {
    fn set_text(&self, buffer: Buffer, text: &str) -> Result<()> {
        info!("[DRY RUN] {} <- {:?}", buffer, text);
        self.buffers.lock().insert(buffer, text.to_string());
        Ok(())
    }

    fn request_text(&self, buffer: Buffer, callback: TextCallback) {
        let buffers = Arc::clone(&self.buffers);
        std::thread::spawn(move || {
            let text = buffers.lock().get(&buffer).cloned().unwrap_or_default();
            callback(Ok(text));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn buffers_are_independent() {
        let backend = DryRunClipboard::new();
        backend.set_text(Buffer::Clipboard, "clip").unwrap();

        let (tx, rx) = mpsc::channel();
        for buffer in [Buffer::Clipboard, Buffer::PrimarySelection] {
            let tx = tx.clone();
            backend.request_text(buffer, Box::new(move |r| {
                let _ = tx.send((buffer, r.unwrap()));
            }));
        }

        let mut replies: Vec<(Buffer, String)> = rx.iter().take(2).collect();
        replies.sort_by_key(|(b, _)| b.selection_name());
        assert_eq!(
            replies,
            vec![
                (Buffer::Clipboard, "clip".to_string()),
                (Buffer::PrimarySelection, String::new()),
            ]
        );
    }
}
