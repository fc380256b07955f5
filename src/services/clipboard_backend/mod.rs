mod dry_run;
mod xclip;
mod r#trait;

pub use self::dry_run::DryRunClipboard;
pub use self::r#trait::{create_clipboard_backend, Buffer, ClipboardBackend, TextCallback};
pub use self::xclip::XclipBackend;
