use crate::users::{User, UserSpec, UserUpdate};

/// Action required to converge the user towards the desired state.
#[derive(Debug, Clone, PartialEq)]
pub enum UserPlan {
    /// The user doesn't exist yet.
    Create,
    /// A write-once field differs, the user has to be deleted and created again.
    Replace,
    /// Mutable fields differ.
    Update(UserUpdate),
    Unchanged,
}

impl UserPlan {
    /// Compares the last known state of the user (if any) with the desired state.
    pub fn new(current: Option<&User>, desired: &UserSpec) -> Self {
        let Some(current) = current else {
            return Self::Create;
        };

        // Servers don't always report the account type, it can't be compared then.
        let account_type_changed =
            current.raw.contains_key("type") && current.account_type != desired.account_type;
        if current.username != desired.username || account_type_changed {
            return Self::Replace;
        }

        let update = UserUpdate::between(current, desired);
        if update.is_empty() {
            Self::Unchanged
        } else {
            Self::Update(update)
        }
    }
}
