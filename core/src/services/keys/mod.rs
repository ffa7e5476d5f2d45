//! RSA signing key material for access tokens

mod key_material;


pub use key_material::{KeyMaterial, KeySource};
pub use tg_shared::config::MIN_KEY_BITS;
