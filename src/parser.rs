use crate::error::AppError;

/// Fields extracted from a request URI such as `/door?opener=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPress {
    pub page: String,
    pub name: String,
    pub button: u32,
}

fn is_separator(c: char) -> bool {
    matches!(c, '?' | '=' | '\n') || c.is_ascii_whitespace()
}

/// Splits `uri` on `?`, `=`, newlines and whitespace and expects exactly
/// three tokens: page, name and a numeric button index.
pub fn parse_press(uri: &str) -> Result<ButtonPress, AppError> {
    let tokens: Vec<&str> = uri.split(is_separator).filter(|t| !t.is_empty()).collect();

    let [page, name, button] = tokens.as_slice() else {
        return Err(AppError::MalformedRequest(format!(
            "expected <page>?<name>=<button>, got {} token(s)",
            tokens.len()
        )));
    };

    let button = button
        .parse::<u32>()
        .map_err(|_| AppError::MalformedRequest(format!("button must be an integer: {button}")))?;

    Ok(ButtonPress {
        page: page.to_string(),
        name: name.to_string(),
        button,
    })
}
