use crate::error::HandleError;

pub const MAX_HANDLE_LEN: usize = 15;

/// Trims the input, drops one leading `@`, and checks the result is 1 to 15
/// letters, digits or underscores.
pub fn normalize_handle(input: &str) -> Result<String, HandleError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HandleError::Empty);
    }
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    let allowed = handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if allowed && (1..=MAX_HANDLE_LEN).contains(&handle.len()) {
        Ok(handle.to_string())
    } else {
        Err(HandleError::Invalid)
    }
}
