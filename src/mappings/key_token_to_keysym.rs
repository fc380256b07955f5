/// Преобразование токенов специальных клавиш (`<enter>`, `<f5>`) в keysym X11
/// Отвечает за трансляцию скриптовых имён клавиш в имена, понятные xdotool
pub struct KeyTokenToKeysym;

impl KeyTokenToKeysym {
    /// Получить keysym по токену в угловых скобках (регистр не важен)
    pub fn translate(token: &str) -> Option<&'static str> {
        let normalized = token.to_lowercase();
        let keysym = match normalized.as_str() {
            // Специальные клавиши
            "<enter>" => "Return",
            "<tab>" => "Tab",
            "<backspace>" => "BackSpace",
            "<escape>" => "Escape",
            "<delete>" => "Delete",
            "<insert>" => "Insert",
            "<space>" => "space",

            // Навигация
            "<home>" => "Home",
            "<end>" => "End",
            "<page_up>" => "Prior",
            "<page_down>" => "Next",
            "<up>" => "Up",
            "<down>" => "Down",
            "<left>" => "Left",
            "<right>" => "Right",

            // Модификаторы
            "<shift>" => "Shift_L",
            "<ctrl>" => "Control_L",
            "<alt>" => "Alt_L",
            "<alt_gr>" => "ISO_Level3_Shift",
            "<super>" => "Super_L",
            "<capslock>" => "Caps_Lock",
            "<numlock>" => "Num_Lock",
            "<scroll_lock>" => "Scroll_Lock",

            // Прочие
            "<menu>" => "Menu",
            "<print_screen>" => "Print",
            "<pause>" => "Pause",

            // Функциональные клавиши
            "<f1>" => "F1",
            "<f2>" => "F2",
            "<f3>" => "F3",
            "<f4>" => "F4",
            "<f5>" => "F5",
            "<f6>" => "F6",
            "<f7>" => "F7",
            "<f8>" => "F8",
            "<f9>" => "F9",
            "<f10>" => "F10",
            "<f11>" => "F11",
            "<f12>" => "F12",

            _ => return None,
        };

        Some(keysym)
    }

    /// Является ли строка известным токеном специальной клавиши
    pub fn is_token(token: &str) -> bool {
        Self::translate(token).is_some()
    }
}
