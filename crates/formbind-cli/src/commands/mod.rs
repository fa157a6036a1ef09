pub mod inspect;
pub mod route;
