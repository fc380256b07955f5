use crate::debug_if_enabled;
use crate::error::{ScriptError, Result};
use crate::events::KeyInput;
use crate::mappings::KeyTokenToKeysym;
use crate::services::runner::ToolRunner;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Медиатор поверх xdotool: текст через `type`, клавиши через `key`
pub struct XdotoolMediator {
    program: String,
    runner: Arc<dyn ToolRunner>,
    pending: Mutex<Vec<KeyInput>>,
}

/// Пакет одного вызова xdotool
#[derive(Debug, PartialEq, Eq)]
enum Batch {
    Type(String),
    Keys(Vec<String>),
}

impl XdotoolMediator {
    pub fn new(program: &str, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            program: program.to_string(),
            runner,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Склеить очередь в минимальное число вызовов xdotool
    fn batches(inputs: Vec<KeyInput>) -> Vec<Batch> {
        let mut batches: Vec<Batch> = Vec::new();

        for input in inputs {
            match input {
                KeyInput::Text(text) => Self::push_text(&mut batches, &text),
                KeyInput::Key(key) => match KeyTokenToKeysym::translate(&key) {
                    Some(keysym) => match batches.last_mut() {
                        Some(Batch::Keys(keys)) => keys.push(keysym.to_string()),
                        _ => batches.push(Batch::Keys(vec![keysym.to_string()])),
                    },
                    // Одиночный символ печатается, остальное уходит в xdotool как keysym
                    None if key.chars().count() == 1 => Self::push_text(&mut batches, &key),
                    None => match batches.last_mut() {
                        Some(Batch::Keys(keys)) => keys.push(key),
                        _ => batches.push(Batch::Keys(vec![key])),
                    },
                },
            }
        }

        batches
    }

    fn push_text(batches: &mut Vec<Batch>, text: &str) {
        match batches.last_mut() {
            Some(Batch::Type(buffer)) => buffer.push_str(text),
            _ => batches.push(Batch::Type(text.to_string())),
        }
    }

    fn run_checked(&self, args: Vec<String>) -> Result<String> {
        let output = self.runner.run(&self.program, &args)?;
        if !output.success() {
            return Err(ScriptError::Internal(format!(
                "{} {} вернул код {}: {}",
                self.program,
                args.first().map(String::as_str).unwrap_or(""),
                output.code,
                output.output
            )));
        }
        Ok(output.output)
    }
}

impl super::r#trait::Mediator for XdotoolMediator {
    fn send_string(&self, text: &str) -> Result<()> {
        self.pending.lock().extend(KeyInput::parse_sequence(text));
        Ok(())
    }

    fn send_key(&self, key: &str) -> Result<()> {
        self.pending.lock().push(KeyInput::Key(key.to_string()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let inputs = std::mem::take(&mut *self.pending.lock());
        if inputs.is_empty() {
            return Ok(());
        }

        for batch in Self::batches(inputs) {
            debug_if_enabled!("xdotool: {:?}", batch);
            let args = match batch {
                Batch::Type(text) => vec![
                    "type".to_string(),
                    "--clearmodifiers".to_string(),
                    "--".to_string(),
                    text,
                ],
                Batch::Keys(keys) => {
                    let mut args = vec!["key".to_string(), "--clearmodifiers".to_string()];
                    args.extend(keys);
                    args
                }
            };
            self.run_checked(args)?;
        }

        Ok(())
    }

    fn get_window_title(&self) -> Result<String> {
        let args = vec!["getactivewindow".to_string(), "getwindowname".to_string()];
        let output = self.runner.run(&self.program, &args)?;

        if !output.success() {
            debug!("xdotool не вернул активное окно (код {})", output.code);
            return Ok(String::new());
        }

        Ok(output.output.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mediator::Mediator;
    use crate::services::runner::recording::RecordingRunner;

    fn mediator() -> (Arc<RecordingRunner>, XdotoolMediator) {
        let runner = Arc::new(RecordingRunner::new());
        let mediator = XdotoolMediator::new("xdotool", runner.clone());
        (runner, mediator)
    }

    #[test]
    fn nothing_is_sent_before_flush() {
        let (runner, mediator) = mediator();
        mediator.send_string("abc").unwrap();
        mediator.send_key("<enter>").unwrap();
        assert!(runner.calls().is_empty());

        mediator.flush().unwrap();
        assert_eq!(
            runner.calls(),
            vec![
                vec!["xdotool", "type", "--clearmodifiers", "--", "abc"],
                vec!["xdotool", "key", "--clearmodifiers", "Return"],
            ]
        );

        // Очередь опустела
        mediator.flush().unwrap();
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn batches_merge_neighbours() {
        let batches = XdotoolMediator::batches(vec![
            KeyInput::Text("ab".into()),
            KeyInput::Key("c".into()),
            KeyInput::Key("<tab>".into()),
            KeyInput::Key("<tab>".into()),
            KeyInput::Key("ctrl+v".into()),
        ]);
        assert_eq!(
            batches,
            vec![
                Batch::Type("abc".into()),
                Batch::Keys(vec!["Tab".into(), "Tab".into(), "ctrl+v".into()]),
            ]
        );
    }

    #[test]
    fn failed_xdotool_is_reported() {
        let (runner, mediator) = mediator();
        runner.reply(1, "Can't open display");
        mediator.send_string("x").unwrap();
        assert!(matches!(mediator.flush(), Err(ScriptError::Internal(_))));
    }

    #[test]
    fn window_title_from_xdotool() {
        let (runner, mediator) = mediator();
        runner.reply(0, "Terminal - bash").reply(1, "");
        assert_eq!(mediator.get_window_title().unwrap(), "Terminal - bash");
        assert_eq!(mediator.get_window_title().unwrap(), "");
        assert_eq!(
            runner.last_call(),
            vec!["xdotool", "getactivewindow", "getwindowname"]
        );
    }
}
