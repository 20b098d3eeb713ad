//! View models: observable state slots over the repositories.
//!
//! Every operation runs on its own task and reports through its slot, so a
//! failure in one operation never affects another.

mod auth;
mod homework;
mod profile;
mod slot;

pub use auth::AuthViewModel;
pub use homework::HomeworkViewModel;
pub use profile::ProfileViewModel;
pub use slot::{Slot, SlotState};
