//! Account routes: signup, email verification, login, logout

pub mod login;
pub mod logout;
pub mod register;
pub mod verify_email;
