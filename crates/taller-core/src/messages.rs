//! User-facing text.
//!
//! The remote service and its users are Spanish-speaking; every string the
//! user can see lives here so views and the CLI stay consistent.

/// Generic failure when an error body carries no usable message.
pub const GENERIC_ERROR: &str = "Error";
/// Error body parsed but without a message.
pub const REQUEST_FAILED: &str = "Request failed";
/// Success body that is not valid JSON.
pub const INVALID_RESPONSE: &str = "Respuesta inválida del servidor";
/// Transport-level failure (host unreachable, DNS, TLS).
pub const CONNECTIVITY_FAILED: &str = "No se puede conectar al servidor";

pub const REGISTER_SUCCESS: &str = "Registro exitoso! Ahora puedes iniciar sesión";
pub const REGISTER_FAILED: &str = "Error al registrar usuario";
pub const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub const LOGOUT_DONE: &str = "Sesión cerrada correctamente";
pub const USERS_LOAD_FAILED: &str = "Error al cargar usuarios";
pub const USERS_EMPTY: &str = "No hay usuarios registrados";
pub const USERS_LOADING: &str = "Cargando usuarios...";

pub const LOGIN_SUBMIT: &str = "Iniciar Sesión";
pub const LOGIN_SUBMITTING: &str = "Iniciando sesión...";
pub const REGISTER_SUBMIT: &str = "Crear Cuenta";
pub const REGISTER_SUBMITTING: &str = "Creando cuenta...";

/// Placeholder for a profile without first/last name.
pub const NAME_PLACEHOLDER: &str = "-";

/// Welcome notification after a successful login.
pub fn welcome(username: &str) -> String {
    format!("Bienvenido {username}!")
}
