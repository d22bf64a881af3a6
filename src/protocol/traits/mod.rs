//! Abstraction traits consumed by the session driver (serial link and timer).
pub mod korri_timer;
pub mod serial_link;
