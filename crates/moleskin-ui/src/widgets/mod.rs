//! Ready-made components composed from the generic [`Component`](crate::component::Component).

pub mod button;

pub use button::{Button, ButtonBackground, ButtonForm};
