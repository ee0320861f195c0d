pub mod contact;
pub mod manager;
pub mod toi;

pub use contact::{ColliderId, ContactEvent};
pub use manager::{CollisionManager, CONTACT_OFFSET};
pub use toi::PointLineContact;
