use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::ToolOutput;
use crate::services::ToolRunner;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const INPUT_TITLE: &str = "Enter a value";
const PASSWORD_TITLE: &str = "Enter password";
const LIST_TITLE: &str = "Choose a value";
const LIST_MULTI_TITLE: &str = "Choose one or more values";
const OPEN_FILE_TITLE: &str = "Open File";
const SAVE_FILE_TITLE: &str = "Save As";
const DIRECTORY_TITLE: &str = "Select Directory";

/// Код завершения диалога и введённое/выбранное значение.
///
/// Ненулевой код означает отмену пользователем, это не ошибка.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogResult {
    pub code: i32,
    pub output: String,
}

impl DialogResult {
    pub fn accepted(&self) -> bool {
        self.code == 0
    }
}

impl From<ToolOutput> for DialogResult {
    fn from(output: ToolOutput) -> Self {
        Self {
            code: output.code,
            output: output.output,
        }
    }
}

/// Результат множественного выбора
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChoice {
    pub code: i32,
    pub choices: Vec<String>,
}

/// Простые модальные диалоги через внешнюю программу (zenity)
pub struct Dialog {
    program: String,
    runner: Arc<dyn ToolRunner>,
}

impl Dialog {
    pub fn new(program: &str, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            program: program.to_string(),
            runner,
        }
    }

    fn run(&self, title: &str, args: Vec<String>) -> Result<DialogResult> {
        let mut full_args = vec!["--title".to_string(), title.to_string()];
        full_args.extend(args);

        debug_if_enabled!("Диалог '{}': {:?}", title, full_args);
        Ok(self.runner.run(&self.program, &full_args)?.into())
    }

    /// Строки `TRUE/FALSE <вариант>` для колонок списка
    fn list_rows<S: AsRef<str>>(options: &[S], selected: impl Fn(&str) -> bool) -> Vec<String> {
        options
            .iter()
            .flat_map(|option| {
                let option = option.as_ref();
                let flag = if selected(option) { "TRUE" } else { "FALSE" };
                [flag.to_string(), option.to_string()]
            })
            .collect()
    }

    fn list_args(kind: &str, message: &str, rows: Vec<String>) -> Vec<String> {
        let mut args = strings(&[
            "--list", kind, "--text", message, "--column", " ", "--column", "Options",
        ]);
        args.extend(rows);
        args
    }

    /// Однострочный ввод текста
    pub fn input_dialog(
        &self,
        title: Option<&str>,
        message: Option<&str>,
        default: Option<&str>,
    ) -> Result<DialogResult> {
        self.run(
            title.unwrap_or(INPUT_TITLE),
            strings(&[
                "--entry",
                "--text",
                message.unwrap_or(INPUT_TITLE),
                "--entry-text",
                default.unwrap_or(""),
            ]),
        )
    }

    /// Ввод пароля со скрытыми символами
    pub fn password_dialog(&self, title: Option<&str>, message: Option<&str>) -> Result<DialogResult> {
        self.run(
            title.unwrap_or(PASSWORD_TITLE),
            strings(&["--entry", "--text", message.unwrap_or(PASSWORD_TITLE), "--hide-text"]),
        )
    }

    /// Выбор одного варианта; `default` отмечается выбранным заранее
    pub fn list_menu<S: AsRef<str>>(
        &self,
        options: &[S],
        title: Option<&str>,
        message: Option<&str>,
        default: Option<&str>,
    ) -> Result<DialogResult> {
        let rows = Self::list_rows(options, |option| Some(option) == default);
        self.run(
            title.unwrap_or(LIST_TITLE),
            Self::list_args("--radiolist", message.unwrap_or(LIST_TITLE), rows),
        )
    }

    /// Выбор нескольких вариантов.
    ///
    /// Вывод программы делится по пробельным символам, поэтому варианты с
    /// пробелами внутри распадаются на несколько элементов.
    pub fn list_menu_multi<S: AsRef<str>, D: AsRef<str>>(
        &self,
        options: &[S],
        title: Option<&str>,
        message: Option<&str>,
        defaults: &[D],
    ) -> Result<MultiChoice> {
        let rows = Self::list_rows(options, |option| {
            defaults.iter().any(|default| default.as_ref() == option)
        });
        let result = self.run(
            title.unwrap_or(LIST_MULTI_TITLE),
            Self::list_args("--checklist", message.unwrap_or(LIST_MULTI_TITLE), rows),
        )?;

        Ok(MultiChoice {
            code: result.code,
            choices: result.output.split_whitespace().map(str::to_string).collect(),
        })
    }

    pub fn open_file(&self, title: Option<&str>) -> Result<DialogResult> {
        self.run(title.unwrap_or(OPEN_FILE_TITLE), strings(&["--file-selection"]))
    }

    pub fn save_file(&self, title: Option<&str>) -> Result<DialogResult> {
        self.run(
            title.unwrap_or(SAVE_FILE_TITLE),
            strings(&["--file-selection", "--save"]),
        )
    }

    pub fn choose_directory(&self, title: Option<&str>) -> Result<DialogResult> {
        self.run(
            title.unwrap_or(DIRECTORY_TITLE),
            strings(&["--file-selection", "--directory"]),
        )
    }
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
