//! Profile state for the front end.

use tokio::task::JoinHandle;

use super::slot::Slot;
use crate::models::{ProfileUpdate, User};
use crate::repository::ProfileRepository;

#[derive(Clone)]
pub struct ProfileViewModel {
    repository: ProfileRepository,
    pub profile: Slot<User>,
    pub profile_update: Slot<User>,
}

impl ProfileViewModel {
    pub fn new(repository: ProfileRepository) -> Self {
        Self {
            repository,
            profile: Slot::new(),
            profile_update: Slot::new(),
        }
    }

    pub fn load_profile(&self) -> JoinHandle<()> {
        self.profile.spawn(self.repository.get_profile())
    }

    pub fn update_profile(&self, update: ProfileUpdate) -> JoinHandle<()> {
        self.profile_update.spawn(self.repository.update_profile(update))
    }
}
