pub mod credentials;
pub mod csrf;
pub mod flash;
pub mod password;
pub mod session;

pub use credentials::Credentials;
