//! Lightweight markup stripping for export.

/// Strips emphasis markers from draft content before it is laid out as
/// document paragraphs.
///
/// Removes `**`, `__`, single `*` and backticks. Single underscores are
/// kept: they are load-bearing in job names like
/// `CTR.WEEKLY_UNDETECT_REPORT_CLEANUP_V2.B`.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .replace('*', "")
        .replace('`', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bold_markers() {
        assert_eq!(strip_emphasis("**KEDB View**"), "KEDB View");
        assert_eq!(strip_emphasis("__also bold__"), "also bold");
    }

    #[test]
    fn test_strips_italics_and_code_ticks() {
        assert_eq!(strip_emphasis("*emphasis* and `code`"), "emphasis and code");
    }

    #[test]
    fn test_keeps_underscores_inside_identifiers() {
        assert_eq!(
            strip_emphasis("CTR.WEEKLY_UNDETECT_REPORT_CLEANUP_V2.B"),
            "CTR.WEEKLY_UNDETECT_REPORT_CLEANUP_V2.B"
        );
    }
}
