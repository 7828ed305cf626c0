pub mod google_profile_client;

pub use google_profile_client::{GoogleProfileClient, ProfileFetchError};
