use crate::error::{ScriptError, Result};
use crate::events::ToolOutput;
use parking_lot::Mutex;
use std::collections::VecDeque;

use super::r#trait::ToolRunner;

/// Тестовый runner: запоминает вызовы и отдаёт заранее заданные ответы
#[derive(Default)]
pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    invoker_calls: Mutex<Vec<Vec<String>>>,
    replies: Mutex<VecDeque<ToolOutput>>,
    missing: Mutex<Option<String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Следующие вызовы получат эти ответы по очереди, затем код 0 и пустой вывод
    pub fn reply(&self, code: i32, output: &str) -> &Self {
        self.replies.lock().push_back(ToolOutput::new(code, output));
        self
    }

    /// Эмулировать отсутствие программы
    pub fn missing(&self, program: &str) {
        *self.missing.lock() = Some(program.to_string());
    }

    /// Все вызовы в виде [program, args...]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    /// Вызовы через `run_as_invoker`
    pub fn invoker_calls(&self) -> Vec<Vec<String>> {
        self.invoker_calls.lock().clone()
    }

    pub fn last_call(&self) -> Vec<String> {
        self.calls.lock().last().cloned().unwrap_or_default()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        if self.missing.lock().as_deref() == Some(program) {
            return Err(ScriptError::ExternalToolNotFound(program.to_string()));
        }

        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.lock().push(call);

        Ok(self.replies.lock().pop_front().unwrap_or_default())
    }

    fn run_as_invoker(&self, program: &str, args: &[String]) -> Result<ToolOutput> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.invoker_calls.lock().push(call);

        self.run(program, args)
    }
}
