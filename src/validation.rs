use lazy_static::lazy_static;
use regex::Regex;

use crate::services::{ensure, ApiError, ApiResult};

lazy_static! {
    static ref USERNAME: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{2,31}$").unwrap();
    static ref EMAIL: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
}

pub fn validate_username(username: &str) -> ApiResult<()> {
    ensure(
        USERNAME.is_match(username),
        ApiError::Validation(format!("invalid username: {username:?}")),
    )
}

pub fn validate_email(email: &str) -> ApiResult<()> {
    ensure(
        EMAIL.is_match(email),
        ApiError::Validation(format!("invalid email: {email:?}")),
    )
}
