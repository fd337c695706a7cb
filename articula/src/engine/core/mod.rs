//! Core data types shared by the world and its components.

pub mod side;
pub mod transform;

pub use side::*;
pub use transform::*;

use slotmap::{Key, new_key_type};

new_key_type! { pub struct SegmentId; }

impl SegmentId {
    /// Packs the id into rapier's `user_data` slot so bodies and colliders can be mapped back.
    pub fn as_user_data(&self) -> u128 {
        self.data().as_ffi() as u128
    }

    pub fn from_user_data(data: u128) -> SegmentId {
        SegmentId::from(slotmap::KeyData::from_ffi(data as u64))
    }
}
