// Drop-target payload parsing.
// - Terminals deliver a drag-and-drop as pasted text holding one or more paths.
// - Handles quoting, backslash-escaped spaces, file:// URLs and `~/` paths.
use std::path::PathBuf;

use dirs_next::home_dir;
use url::Url;

pub(crate) fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    text.split(['\n', '\r'])
        .flat_map(split_drop_line)
        .map(|token| token_to_path(&token))
        .collect()
}

fn split_drop_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.trim().chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                // Backslash is a path separator on Windows, an escape elsewhere.
                '\\' if cfg!(not(windows)) => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                ch if ch.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                ch => current.push(ch),
            },
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// `file:` URLs become local paths; anything else gets `~` expanded.
fn token_to_path(token: &str) -> PathBuf {
    if token.starts_with("file:")
        && let Ok(url) = Url::parse(token)
        && let Ok(path) = url.to_file_path()
    {
        return path;
    }
    expand_tilde(token)
}

fn expand_tilde(token: &str) -> PathBuf {
    let rest = if token == "~" {
        ""
    } else if let Some(rest) = token.strip_prefix("~/").or_else(|| token.strip_prefix("~\\")) {
        rest
    } else {
        return PathBuf::from(token);
    };

    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Vec<String> {
        parse_dropped_paths(text)
            .into_iter()
            .map(|path| path.display().to_string())
            .collect()
    }

    #[test]
    fn splits_plain_paths_on_whitespace_and_newlines() {
        assert_eq!(
            parsed("/src/a.ts /src/b.tsx\n/src/c.js\r\n"),
            vec!["/src/a.ts", "/src/b.tsx", "/src/c.js"]
        );
    }

    #[test]
    fn keeps_quoted_paths_whole() {
        assert_eq!(
            parsed("'/my code/app.jsx' \"/other dir/x.ts\""),
            vec!["/my code/app.jsx", "/other dir/x.ts"]
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn unescapes_backslash_spaces() {
        assert_eq!(parsed("/my\\ code/app.js"), vec!["/my code/app.js"]);
    }

    #[cfg(not(windows))]
    #[test]
    fn decodes_file_urls() {
        assert_eq!(
            parsed("file:///home/me/My%20Project/index.ts file://localhost/tmp/a.js"),
            vec!["/home/me/My Project/index.ts", "/tmp/a.js"]
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn leaves_malformed_escapes_alone() {
        assert_eq!(parsed("file:///a%2/b%zz.js"), vec!["/a%2/b%zz.js"]);
    }

    #[test]
    fn expands_home_directory_prefix() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(
            parse_dropped_paths("~/proj/a.ts ~ /abs/~/b.ts"),
            vec![home.join("proj/a.ts"), home.clone(), PathBuf::from("/abs/~/b.ts")]
        );
    }

    #[test]
    fn tilde_inside_a_name_is_literal() {
        assert_eq!(parsed("~notes.ts"), vec!["~notes.ts"]);
    }

    #[test]
    fn blank_payload_has_no_paths() {
        assert!(parsed("").is_empty());
        assert!(parsed("  \n \r\n").is_empty());
    }
}
