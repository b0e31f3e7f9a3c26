pub mod document;
pub mod filetype;
