mod api_ext;
mod group;

pub use self::{api_ext::GroupsApi, group::Group};
