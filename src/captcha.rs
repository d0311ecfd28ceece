//! CAPTCHA generation, identifiers, verification and pre-generation.

pub mod generator;
pub mod identifier;
pub mod manager;
pub mod verify;

pub use generator::{Captcha, CaptchaGenerator};
pub use manager::CaptchaPool;
pub use verify::check_values;
