mod api_ext;
mod reconciler;
mod user;
mod user_id;
mod user_plan;
mod user_spec;
mod user_update;

pub use self::{
    api_ext::UsersApi,
    reconciler::UserReconciler,
    user::{DEFAULT_ACCOUNT_TYPE, User},
    user_id::UserId,
    user_plan::UserPlan,
    user_spec::UserSpec,
    user_update::{UserUpdate, UserUpdatePayload},
};
