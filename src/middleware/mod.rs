pub mod current_user;
pub mod security_headers;

pub use current_user::CurrentUser;
pub use security_headers::SecurityHeaders;
