//! Fixtures shared by unit tests across modules

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;

use crate::services::keys::KeyMaterial;

/// Generated once per test binary; 2048-bit generation is the slow part
pub static TEST_KEYS: Lazy<Arc<KeyMaterial>> =
    Lazy::new(|| Arc::new(KeyMaterial::generate(2048).expect("generate test keypair")));

/// A second, unrelated keypair
pub static OTHER_KEYS: Lazy<Arc<KeyMaterial>> =
    Lazy::new(|| Arc::new(KeyMaterial::generate(2048).expect("generate second keypair")));

/// Fresh directory under the system temp dir
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
