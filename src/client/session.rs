/// Session state owned by the client application shell.
///
/// Lifecycle: set on signin, cleared on logout or on any 403 response, read
/// before every outgoing request. Tokens are stateless, so discarding the
/// token is all a logout takes.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
