use std::ffi::{OsStr, OsString};

const OPENING: &[u8] = b"[[";
const CLOSING: &[u8] = b"]]";

/// Returns the name without its outer `[[` and `]]`, or `None` when the name
/// is not wrapped in double brackets.
///
/// `[[]]` unwraps to the empty name; callers decide whether that is usable,
/// see [`is_addressable`].
pub fn unwrap_bracketed(name: &OsStr) -> Option<OsString> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        strip_brackets(name.as_bytes()).map(|inner| OsString::from_vec(inner.to_vec()))
    }
    #[cfg(not(unix))]
    {
        // Non-unicode names cannot be split safely here, so they never match
        let name = name.to_str()?;
        name.strip_prefix("[[")?
            .strip_suffix("]]")
            .map(OsString::from)
    }
}

#[cfg_attr(not(unix), allow(dead_code))]
fn strip_brackets(bytes: &[u8]) -> Option<&[u8]> {
    if bytes.len() < OPENING.len() + CLOSING.len() {
        return None;
    }
    bytes
        .strip_prefix(OPENING)
        .and_then(|rest| rest.strip_suffix(CLOSING))
}

/// Whether `name` can be joined onto a parent directory as a new sibling.
/// The empty name, `.` and `..` would all address the parent or above it.
pub fn is_addressable(name: &OsStr) -> bool {
    !(name.is_empty() || name == "." || name == "..")
}
