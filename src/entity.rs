pub mod banner;
pub mod message;
pub mod phone_verification;
pub mod rating;
pub mod subscription;

pub use banner::Entity as Banner;
pub use message::Entity as Message;
pub use phone_verification::Entity as PhoneVerification;
pub use rating::Entity as Rating;
pub use subscription::Entity as Subscription;
