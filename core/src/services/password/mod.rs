//! Password hashing with bcrypt

mod hasher;

pub use hasher::{PasswordHasher, MAX_COST, MIN_COST};
