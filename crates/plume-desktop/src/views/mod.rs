//! Top-level views

mod home;
mod login;

pub use home::Home;
pub use login::Login;
