//! Lexical path resolution confined to a root directory.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use super::BrowseError;

/// Resolve a client-supplied, percent-encoded relative path against `root`.
///
/// The decoded path is read as if rooted at the separator, so a leading `/`
/// is ignored. `.` segments and repeated separators are dropped and `..`
/// removes the previous segment. A `..` with nothing left to remove would
/// leave the root and is rejected. The filesystem is never consulted, so
/// symlinks below the root are not followed or checked here.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use fsbrowse::browse::resolve_path;
///
/// let root = Path::new("/srv/files");
/// assert_eq!(resolve_path(root, "a/./b").unwrap(), Path::new("/srv/files/a/b"));
/// assert!(resolve_path(root, "../../etc").is_err());
/// ```
pub fn resolve_path(root: &Path, raw: &str) -> Result<PathBuf, BrowseError> {
    let decoded = query_unescape(raw)?;

    let mut relative = PathBuf::new();
    for component in Path::new(&*decoded).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(BrowseError::InvalidPath);
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    let root = normalize(root);
    if relative.as_os_str().is_empty() {
        return Ok(root);
    }

    let resolved = root.join(&relative);
    // Component-wise, so `root-other` never matches `root`.
    if !resolved.starts_with(&root) {
        return Err(BrowseError::InvalidPath);
    }

    Ok(resolved)
}

/// Lexically normalize a path: drop `.`, fold `name/..`, keep leading `..`
/// on relative paths. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Decode with query-string rules: `+` is a space and every `%` must be
/// followed by two hex digits. The decoded bytes must be UTF-8.
fn query_unescape(raw: &str) -> Result<Cow<'_, str>, BrowseError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(BrowseError::InvalidPath);
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    if !raw.contains(['%', '+']) {
        return Ok(Cow::Borrowed(raw));
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| Cow::Owned(s.into_owned()))
        .map_err(|_| BrowseError::InvalidPath)
}
