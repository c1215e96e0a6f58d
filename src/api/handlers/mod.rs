pub mod banner;
pub mod fund;
pub mod message;
pub mod pages;
pub mod phone_verification;
pub mod rating;
pub mod subscription;

pub use banner::*;
pub use fund::*;
pub use message::*;
pub use pages::*;
pub use phone_verification::*;
pub use rating::*;
pub use subscription::*;
