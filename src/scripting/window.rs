use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::{title_field, ToolOutput, WindowTarget};
use crate::services::{Mediator, ToolRunner};
use crate::trace_if_enabled;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Действие над свойством окна (`wmctrl -b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyAction {
    Add,
    Remove,
    Toggle,
}

impl PropertyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyAction::Add => "add",
            PropertyAction::Remove => "remove",
            PropertyAction::Toggle => "toggle",
        }
    }
}

/// Свойство окна, поддерживаемое wmctrl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowProperty {
    Modal,
    Sticky,
    MaximizedVert,
    MaximizedHorz,
    Shaded,
    SkipTaskbar,
    SkipPager,
    Hidden,
    Fullscreen,
    Above,
}

impl WindowProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowProperty::Modal => "modal",
            WindowProperty::Sticky => "sticky",
            WindowProperty::MaximizedVert => "maximized_vert",
            WindowProperty::MaximizedHorz => "maximized_horz",
            WindowProperty::Shaded => "shaded",
            WindowProperty::SkipTaskbar => "skip_taskbar",
            WindowProperty::SkipPager => "skip_pager",
            WindowProperty::Hidden => "hidden",
            WindowProperty::Fullscreen => "fullscreen",
            WindowProperty::Above => "above",
        }
    }
}

impl AsRef<str> for PropertyAction {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for WindowProperty {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Новые позиция и размер окна; -1 оставляет значение без изменений
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: -1,
            y: -1,
            width: -1,
            height: -1,
        }
    }
}

impl Geometry {
    pub fn x(mut self, x: i32) -> Self {
        self.x = x;
        self
    }

    pub fn y(mut self, y: i32) -> Self {
        self.y = y;
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }
}

impl fmt::Display for Geometry {
    /// Формат `wmctrl -e`: гравитация всегда 0 (левый верхний угол)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0,{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// Управление окнами через wmctrl.
///
/// Везде, кроме `wait_for_focus`, вместо заголовка можно передать `:ACTIVE:`
/// (активное окно) или `:SELECT:` (выбор щелчком). Заголовок сравнивается
/// самим wmctrl как подстрока без учёта регистра.
pub struct Window {
    mediator: Arc<dyn Mediator>,
    runner: Arc<dyn ToolRunner>,
    program: String,
    poll_interval: Duration,
    default_timeout: Duration,
}

impl Window {
    pub fn new(
        mediator: Arc<dyn Mediator>,
        runner: Arc<dyn ToolRunner>,
        program: &str,
        poll_interval: Duration,
        default_timeout: Duration,
    ) -> Self {
        Self {
            mediator,
            runner,
            program: program.to_string(),
            poll_interval,
            default_timeout,
        }
    }

    /// Регулярное выражение, совпадающее только с начала строки
    fn compile(title: &str) -> Result<Regex> {
        Ok(Regex::new(&format!("^(?:{})", title))?)
    }

    /// Опрашивать `check` с фиксированным шагом, пока не истечёт таймаут.
    ///
    /// Время считается суммой шагов, без учёта длительности самих проверок.
    fn poll(&self, timeout: Option<Duration>, mut check: impl FnMut() -> Result<bool>) -> Result<bool> {
        let timeout = timeout.unwrap_or(self.default_timeout);
        let mut waited = Duration::ZERO;

        while waited < timeout {
            if check()? {
                return Ok(true);
            }
            std::thread::sleep(self.poll_interval);
            waited += self.poll_interval;
        }

        Ok(false)
    }

    /// Ждать, пока заголовок активного окна совпадёт с регулярным выражением
    pub fn wait_for_focus(&self, title: &str, timeout: Option<Duration>) -> Result<bool> {
        let regex = Self::compile(title)?;
        debug_if_enabled!("Ожидание фокуса окна /{}/", title);

        let found = self.poll(timeout, || {
            let current = self.mediator.get_window_title()?;
            trace_if_enabled!("Активное окно: '{}'", current);
            Ok(regex.is_match(&current))
        })?;

        debug!("Фокус окна /{}/: {}", title, found);
        Ok(found)
    }

    /// Ждать появления окна с заголовком, совпадающим с регулярным выражением
    pub fn wait_for_exist(&self, title: &str, timeout: Option<Duration>) -> Result<bool> {
        let regex = Self::compile(title)?;
        debug_if_enabled!("Ожидание появления окна /{}/", title);

        let found = self.poll(timeout, || {
            let listing = self.run_wmctrl(vec!["-l".to_string()])?;
            Ok(listing
                .output
                .split('\n')
                .any(|line| regex.is_match(title_field(line))))
        })?;

        debug!("Окно /{}/ существует: {}", title, found);
        Ok(found)
    }

    /// Активировать окно. При `switch_desktop` переключиться на его рабочий
    /// стол, иначе перенести окно на текущий.
    pub fn activate(&self, title: impl Into<WindowTarget>, switch_desktop: bool) -> Result<ToolOutput> {
        let flag = if switch_desktop { "-a" } else { "-R" };
        self.run_wmctrl(vec![flag.to_string(), title.into().as_arg().to_string()])
    }

    pub fn close(&self, title: impl Into<WindowTarget>) -> Result<ToolOutput> {
        self.run_wmctrl(vec!["-c".to_string(), title.into().as_arg().to_string()])
    }

    pub fn resize_move(&self, title: impl Into<WindowTarget>, geometry: Geometry) -> Result<ToolOutput> {
        self.run_wmctrl(vec![
            "-r".to_string(),
            title.into().as_arg().to_string(),
            "-e".to_string(),
            geometry.to_string(),
        ])
    }

    /// Перенести окно на рабочий стол (нумерация с нуля)
    pub fn move_to_desktop(&self, title: impl Into<WindowTarget>, desk_num: i32) -> Result<ToolOutput> {
        self.run_wmctrl(vec![
            "-r".to_string(),
            title.into().as_arg().to_string(),
            "-t".to_string(),
            desk_num.to_string(),
        ])
    }

    /// Переключить рабочий стол (нумерация с нуля)
    pub fn switch_desktop(&self, desk_num: i32) -> Result<ToolOutput> {
        self.run_wmctrl(vec!["-s".to_string(), desk_num.to_string()])
    }

    /// Изменить свойство окна. Значения не проверяются, ошибку вернёт wmctrl.
    pub fn set_property(
        &self,
        title: impl Into<WindowTarget>,
        action: impl AsRef<str>,
        prop: impl AsRef<str>,
    ) -> Result<ToolOutput> {
        self.run_wmctrl(vec![
            "-r".to_string(),
            title.into().as_arg().to_string(),
            format!("-b{},{}", action.as_ref(), prop.as_ref()),
        ])
    }

    fn run_wmctrl(&self, args: Vec<String>) -> Result<ToolOutput> {
        self.runner.run(&self.program, &args)
    }
}
