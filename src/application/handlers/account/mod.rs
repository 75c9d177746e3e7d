//! Account handlers: signup, login, profile management, and password reset.

mod emails;
mod login;
mod password_reset;
mod profile;
mod signup;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use password_reset::{PasswordResetCommand, PasswordResetHandler};
pub use profile::{
    DeleteAccountCommand, GetProfileQuery, ProfileHandler, UpdateProfileCommand,
};
pub use signup::{SignupCommand, SignupHandler, SignupResult};

use crate::domain::account::AccountError;
use crate::ports::DirectoryError;

/// Provider errors surface as validation problems when the caller can fix
/// them and as opaque provider failures otherwise.
fn map_directory_err(err: DirectoryError) -> AccountError {
    match err {
        DirectoryError::InvalidCredentials => AccountError::InvalidCredentials,
        DirectoryError::TooManyAttempts => {
            AccountError::validation("Too many attempts, try again later")
        }
        DirectoryError::Rejected(message) => AccountError::Validation(message),
        DirectoryError::Unavailable(message) => AccountError::provider(message),
    }
}
