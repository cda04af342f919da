pub mod user;

pub use user::AppState;
