//! Configuration validation

use super::error::ConfigResult;

/// A config section that checks its own value ranges
pub trait Validatable {
    /// `Ok(())` when every field is usable
    fn validate(&self) -> ConfigResult<()>;

    /// Section name used as the field prefix in errors
    fn config_name(&self) -> &'static str;
}
