use std::env;
use std::path::PathBuf;

/// Expands `~` and `$VAR`/`${VAR}` in a path given on the command line.
pub fn expand_path(path: &str) -> PathBuf {
    expand_with(path, dirs::home_dir(), |name| env::var(name).ok())
}

/// Shell-style expansion against an explicit home directory and variable
/// lookup.
///
/// A leading `~` (alone or followed by `/`) becomes `home`; with no home
/// directory, or for `~user`, the path is left alone. Variables follow
/// [`expand_vars`].
pub fn expand_with<F>(input: &str, home: Option<PathBuf>, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let after_tilde = if input == "~" {
        Some("")
    } else {
        input.strip_prefix("~/")
    };

    match (after_tilde, home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(expand_vars(rest.trim_start_matches('/'), lookup)),
        _ => PathBuf::from(expand_vars(input, lookup)),
    }
}

/// Replaces `$NAME` and `${NAME}` the way Go's `os.Expand` does.
///
/// `NAME` is a run of ASCII alphanumerics and `_`, or a single special
/// character (`*#$@!?-` or a digit), so `$1abc` is `$1` followed by `abc`.
/// Unset variables expand to nothing. Malformed `${` and `${}` are dropped.
/// A `$` followed by anything else, or at the end of input, is kept.
pub fn expand_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if after.is_empty() {
            out.push('$');
            rest = after;
            break;
        }

        let (name, width) = var_name(after);
        if !name.is_empty() {
            out.push_str(&lookup(name).unwrap_or_default());
        } else if width == 0 {
            out.push('$');
        }
        rest = &after[width..];
    }

    out.push_str(rest);
    out
}

fn is_special_var(b: u8) -> bool {
    matches!(b, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-' | b'0'..=b'9')
}

// Returns the variable name following a `$` and how many bytes it spans.
// An empty name with a non-zero width is bad syntax to be swallowed.
fn var_name(s: &str) -> (&str, usize) {
    let bytes = s.as_bytes();

    if bytes[0] == b'{' {
        if bytes.len() > 2 && is_special_var(bytes[1]) && bytes[2] == b'}' {
            return (&s[1..2], 3);
        }
        return match s[1..].find('}') {
            Some(0) => ("", 2),
            Some(end) => (&s[1..end + 1], end + 2),
            None => ("", 1),
        };
    }

    if is_special_var(bytes[0]) {
        return (&s[..1], 1);
    }

    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    (&s[..end], end)
}
