//! # Profile Example
//!
//! A user profile held in one store and handed to every view that needs it.
//!
//! There is no ambient lookup: a view receives a [`ProfileStore`] handle
//! when it is constructed and dispatches through that handle. Cloning the
//! handle shares the same state.
//!
//! ## Example
//!
//! ```no_run
//! use profile::{ProfileForm, ProfileSummary};
//!
//! # async fn example() -> Result<(), parlour_runtime::StoreError> {
//! let store = profile::store();
//! let form = ProfileForm::new(store.clone());
//! let summary = ProfileSummary::new(store);
//!
//! form.submit_name("Ada").await?;
//! assert_eq!(summary.render().await, "Ada (age unknown, no email)");
//! # Ok(())
//! # }
//! ```

use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use parlour_runtime::{Store, StoreError};

/// Profile state
///
/// Every field starts out unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name
    pub user_name: Option<String>,
    /// Age in years
    pub age: Option<u32>,
    /// Contact address
    pub email: Option<String>,
}

/// Profile actions, one per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    /// Replace the user name
    SetUserName(String),
    /// Replace the age
    SetAge(u32),
    /// Replace the email address
    SetEmail(String),
}

/// Profile reducer
///
/// Each action replaces exactly one field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileReducer;

impl Reducer for ProfileReducer {
    type State = UserProfile;
    type Action = ProfileAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ProfileAction::SetUserName(name) => state.user_name = Some(name),
            ProfileAction::SetAge(age) => state.age = Some(age),
            ProfileAction::SetEmail(email) => state.email = Some(email),
        }

        smallvec![Effect::None]
    }
}

/// Store handle passed to profile views
pub type ProfileStore = Store<UserProfile, ProfileAction, (), ProfileReducer>;

/// Create a store holding an empty profile
#[must_use]
pub fn store() -> ProfileStore {
    Store::new(UserProfile::default(), ProfileReducer, ())
}

/// View that edits the profile
#[derive(Clone)]
pub struct ProfileForm {
    store: ProfileStore,
}

impl ProfileForm {
    /// Build the form around an injected store
    #[must_use]
    pub const fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    /// Submit the name field
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unmounted`] once the store is unmounted.
    pub async fn submit_name(&self, name: &str) -> Result<(), StoreError> {
        tracing::debug!(name, "Submitting user name");
        self.store
            .send(ProfileAction::SetUserName(name.trim().to_string()))
            .await
            .map(drop)
    }

    /// Submit the age field as typed
    ///
    /// Text that is not a whole number is ignored and `false` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unmounted`] once the store is unmounted.
    pub async fn submit_age(&self, age: &str) -> Result<bool, StoreError> {
        let Ok(age) = age.trim().parse::<u32>() else {
            tracing::debug!(age, "Ignoring age that is not a number");
            return Ok(false);
        };
        self.store.send(ProfileAction::SetAge(age)).await?;
        Ok(true)
    }

    /// Submit the email field
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unmounted`] once the store is unmounted.
    pub async fn submit_email(&self, email: &str) -> Result<(), StoreError> {
        self.store
            .send(ProfileAction::SetEmail(email.trim().to_string()))
            .await
            .map(drop)
    }
}

/// Read-only view of the profile
#[derive(Clone)]
pub struct ProfileSummary {
    store: ProfileStore,
}

impl ProfileSummary {
    /// Build the summary around an injected store
    #[must_use]
    pub const fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    /// One-line description of the current profile
    pub async fn render(&self) -> String {
        self.store
            .state(|profile| {
                let name = profile.user_name.as_deref().unwrap_or("Anonymous");
                let age = profile
                    .age
                    .map_or_else(|| "age unknown".to_string(), |age| format!("age {age}"));
                let email = profile.email.as_deref().unwrap_or("no email");
                format!("{name} ({age}, {email})")
            })
            .await
    }
}
