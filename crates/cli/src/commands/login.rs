//! `login` command: obtain and store a bearer token.

use std::io::Read;

use secrecy::SecretString;

use shopsmart_core::Email;
use shopsmart_storefront::AppState;
use shopsmart_storefront::api::AuthError;
use shopsmart_storefront::error::{AppError, Result};

/// Log in with `email`, reading the password from stdin, and persist the
/// token for subsequent commands.
pub async fn run(state: &AppState, email: &str) -> Result<()> {
    let email = Email::parse(email).map_err(|_| AppError::Auth(AuthError::InvalidCredentials))?;

    let mut password = String::new();
    std::io::stdin()
        .read_to_string(&mut password)
        .map_err(|e| AppError::Storage(e.into()))?;
    let password = SecretString::from(password.trim_end().to_owned());

    state
        .auth()
        .login_and_store(state.storage().as_ref(), &email, &password)
        .await?;

    println!("Login successful.");
    Ok(())
}
