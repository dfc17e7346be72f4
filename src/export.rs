//! Getting the modified template out of the editor.
//!
//! Besides writing the output file through the store, the host offers a
//! ready-to-paste download link (a base64 `data:` URI) and a clipboard
//! copy of the raw HTML.

use std::io::{Write, stdout};

use base64::Engine;

/// Link text of the download anchor.
pub const DOWNLOAD_LABEL: &str = "Download Modified Template";

/// Encode `html` as a `data:text/html;base64,...` URI.
pub fn data_uri(html: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(html.as_bytes());
    format!("data:text/html;base64,{encoded}")
}

/// An anchor that downloads `html` as `filename` when opened in a browser.
pub fn download_link(html: &str, filename: &str) -> String {
    format!(
        r#"<a href="{}" download="{filename}">{DOWNLOAD_LABEL}</a>"#,
        data_uri(html)
    )
}

/// Copy `text` to the system clipboard.
///
/// Uses `pbcopy` on macOS when available, otherwise an OSC 52 escape
/// sequence, which most modern terminals forward to the clipboard.
pub fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

/// OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        let seq = osc52_sequence("hi");
        assert_eq!(seq, "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_data_uri_is_base64_html() {
        assert_eq!(data_uri("<p>hi</p>"), "data:text/html;base64,PHA+aGk8L3A+");
    }

    #[test]
    fn test_download_link_names_file() {
        let link = download_link("<p>hi</p>", "modified_template.html");
        assert_eq!(
            link,
            r#"<a href="data:text/html;base64,PHA+aGk8L3A+" download="modified_template.html">Download Modified Template</a>"#
        );
    }

    #[test]
    fn test_data_uri_decodes_back() {
        let html = "<h1>Café ✓</h1>";
        let uri = data_uri(html);
        let payload = uri.strip_prefix("data:text/html;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), html);
    }
}
