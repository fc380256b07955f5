pub mod key_token_to_keysym;

pub use key_token_to_keysym::KeyTokenToKeysym;
