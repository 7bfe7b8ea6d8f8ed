mod api_ext;
mod role;

pub use self::{api_ext::RolesApi, role::Role};
