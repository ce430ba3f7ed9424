use dioxus::prelude::*;
use shared_types::AuthUser;

/// The signed-in account, shared through context. `None` browses anonymously.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    /// Whether the store's write policy lets this session create, edit or
    /// delete schools. The server decides; this only shapes the UI.
    pub fn can_write(&self) -> bool {
        self.current_user
            .read()
            .as_ref()
            .is_some_and(|user| user.role.can_write())
    }

    pub fn sign_in(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
    }

    pub fn sign_out(&mut self) {
        self.current_user.set(None);
    }
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}
