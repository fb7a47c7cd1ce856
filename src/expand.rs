use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

/// Expand `$NAME` and `${NAME}` from the process environment and a leading `~` to the
/// user's home directory.
///
/// Unknown variables are left as written.
pub fn expand_env(input: &str) -> String {
    let home = dirs::home_dir();
    expand_tilde(
        &expand_with(input, |name| std::env::var(name).ok()),
        home.as_deref(),
    )
}

/// Replace a leading `~` (alone or followed by `/`) with `home`
pub fn expand_tilde(input: &str, home: Option<&Path>) -> String {
    match (input.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            format!("{}{}", home.display(), rest)
        }
        _ => input.to_string(),
    }
}

/// Expand `$NAME` and `${NAME}` in `input` using `lookup` to resolve names
pub fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::new();
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }
        let name = read_variable_name(&mut chars);
        let closed = !braced || chars.next_if_eq(&'}').is_some();

        match lookup(&name) {
            Some(value) if !name.is_empty() && closed => result.push_str(&value),
            _ => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&name);
                if braced && closed {
                    result.push('}');
                }
            }
        }
    }

    result
}

fn read_variable_name(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_alphanumeric() || ch == '_' {
            name.push(ch);
            chars.next();
        } else {
            break;
        }
    }

    name
}
