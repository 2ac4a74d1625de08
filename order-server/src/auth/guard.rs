//! Role guards
//!
//! Handlers call these after extracting [`CurrentUser`]; a mismatch is a
//! 403 and a `security` log entry.

use shared::error::ErrorCode;

use crate::AppError;
use crate::auth::{CurrentUser, Role};
use crate::security_log;

impl CurrentUser {
    /// Restaurant id of a restaurant caller
    pub fn require_restaurant(&self) -> Result<&str, AppError> {
        self.require_role(Role::Restaurant)
    }

    /// Customer id of a customer caller
    pub fn require_customer(&self) -> Result<&str, AppError> {
        self.require_role(Role::Customer)
    }

    pub fn require_admin(&self) -> Result<&str, AppError> {
        if !self.is_admin() {
            security_log!(
                WARN,
                "admin_required",
                user_id = %self.id,
                user_role = %self.role
            );
            return Err(AppError::new(ErrorCode::AdminRequired));
        }
        Ok(&self.id)
    }

    fn require_role(&self, role: Role) -> Result<&str, AppError> {
        if !self.has_role(role) {
            security_log!(
                WARN,
                "role_required",
                user_id = %self.id,
                user_role = %self.role,
                required_role = %role
            );
            return Err(AppError::with_message(
                ErrorCode::RoleRequired,
                format!("{role} role is required"),
            ));
        }
        Ok(&self.id)
    }
}
