//! Environment variable expansion for raw document text.
//!
//! Only the braced `${NAME}` form is recognized. A bare `$NAME` is left alone
//! so values such as passwords may contain a literal `$`.

use std::borrow::Cow;

/// Outcome of scanning the text that follows a `$`.
enum Reference<'a> {
    /// `${NAME}`, replaced by the variable's value.
    Name(&'a str),
    /// `${}`, removed from the output.
    Empty,
    /// Not a reference; the `$` is kept as-is.
    Literal,
}

impl Reference<'_> {
    /// Number of bytes consumed after the `$`, up to and including `}`.
    fn width(&self) -> usize {
        match self {
            Reference::Name(name) => name.len() + 2,
            Reference::Empty => 2,
            Reference::Literal => 0,
        }
    }
}

/// Replaces every `${NAME}` in `input` with the value of the environment
/// variable `NAME`, or the empty string when it is unset.
///
/// Scanning is a single left-to-right pass:
///
/// - `${}` is deleted.
/// - A space, newline or `"` before the closing `}` means the text was not a
///   reference (e.g. `"xx${xxx"`), so the `$` is copied through.
/// - A `${` with no closing `}` is copied through unchanged.
///
/// Input without a reference is returned borrowed.
///
/// ```
/// assert_eq!(cfgtree::expand_env("price: $5"), "price: $5");
/// assert_eq!(cfgtree::expand_env("x${}y"), "xy");
/// ```
pub fn expand_env(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut output: Option<String> = None;
    // Start of the literal run not yet copied to `output`.
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'$' && pos + 2 < bytes.len() && bytes[pos + 1] == b'{' {
            let buf = output.get_or_insert_with(|| String::with_capacity(input.len()));
            buf.push_str(&input[copied..pos]);

            let reference = scan_reference(&input[pos + 1..]);
            match reference {
                Reference::Name(name) => buf.push_str(&lookup_var(name)),
                Reference::Empty => {}
                Reference::Literal => buf.push('$'),
            }

            pos += reference.width();
            copied = pos + 1;
        }
        pos += 1;
    }

    match output {
        Some(mut buf) => {
            buf.push_str(&input[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(input),
    }
}

/// Scans `s`, which starts at the `{` following a `$`.
fn scan_reference(s: &str) -> Reference<'_> {
    for (i, byte) in s.bytes().enumerate().skip(1) {
        match byte {
            b' ' | b'\n' | b'"' => return Reference::Literal,
            b'}' if i == 1 => return Reference::Empty,
            b'}' => return Reference::Name(&s[1..i]),
            _ => {}
        }
    }
    Reference::Literal
}

fn lookup_var(name: &str) -> String {
    // Names the platform cannot represent are treated as unset.
    let value = if name.contains(&['=', '\0'][..]) {
        None
    } else {
        std::env::var_os(name)
    };

    match value {
        Some(value) => value.to_string_lossy().into_owned(),
        None => {
            tracing::debug!(name, "environment variable not set, expanding to empty string");
            String::new()
        }
    }
}
