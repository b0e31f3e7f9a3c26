pub mod list;
pub mod crud;
pub mod view;

pub use list::list;
pub use crud::{new_form, create, edit_form, update, duplicate, delete};
pub use view::show;
