pub mod lead;
pub mod user;
pub mod course;
pub mod hospital;
pub mod follow_up;
pub mod notification;

pub use lead::*;
pub use user::*;
pub use course::*;
pub use hospital::*;
pub use follow_up::*;
pub use notification::*;
