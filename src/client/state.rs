use uuid::Uuid;

use crate::todos::Todo;
use crate::users::dto::PublicUser;

/// Auth slice of the client state. Each remote operation drives exactly one
/// pending → (fulfilled | rejected) transition; interleaved operations on the
/// same slice resolve last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<PublicUser>,
    pub loading: bool,
    pub error: Option<String>,
    pub activation_status: Option<String>,
    pub authenticated: bool,
}

impl AuthState {
    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Signup and activation both resolve into a status message.
    pub fn activation_status_fulfilled(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.activation_status = Some(message.into());
    }

    pub fn signin_fulfilled(&mut self, user: PublicUser) {
        self.loading = false;
        self.user = Some(user);
        self.authenticated = true;
        self.error = None;
    }

    pub fn user_info_fulfilled(&mut self, user: PublicUser) {
        self.loading = false;
        self.user = Some(user);
        self.authenticated = true;
    }

    pub fn rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Signin rejection also drops any previously held identity.
    pub fn signin_rejected(&mut self, message: impl Into<String>) {
        self.rejected(message);
        self.user = None;
        self.authenticated = false;
    }

    pub fn signed_out(&mut self) {
        self.user = None;
        self.error = None;
        self.authenticated = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_activation_status(&mut self) {
        self.activation_status = None;
    }
}

/// Todo slice of the client state.
#[derive(Debug, Clone, Default)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TodoState {
    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn loaded(&mut self, todos: Vec<Todo>) {
        self.loading = false;
        self.todos = todos;
    }

    pub fn created(&mut self, todo: Todo) {
        self.loading = false;
        self.todos.push(todo);
    }

    pub fn updated(&mut self, todo: Todo) {
        self.loading = false;
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }

    pub fn deleted(&mut self, id: Uuid) {
        self.loading = false;
        self.todos.retain(|t| t.id != id);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
