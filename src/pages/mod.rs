//! Feature pages
//!
//! Each page owns its local UI state. Network results are written back into
//! these structs by the tasks in `dispatch`.

pub mod clients;
pub mod dashboard;
pub mod forms;
pub mod logs;
pub mod mail;
pub mod sms;
