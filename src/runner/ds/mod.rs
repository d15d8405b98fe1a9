//! Data structures of the object model: values, prototypes and the realm
//! that dispatches member access over them.

pub mod array_members;
pub mod cast;
pub mod error;
pub mod lookup;
pub mod map_members;
pub mod operations;
pub mod prototype;
pub mod realm;
pub mod value;
pub mod views;
