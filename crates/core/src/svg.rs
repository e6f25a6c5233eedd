//! Cleanup of model output into bare SVG markup.

/// Opening fence some models put before SVG output.
const SVG_FENCE: &str = "```svg";
/// Plain markdown fence marker.
const FENCE: &str = "```";

/// Strip markdown code-fence markers from a completion and trim it.
///
/// Every ```` ```svg ```` and ```` ``` ```` marker is removed wherever it
/// appears, then surrounding whitespace is trimmed, so both fenced and
/// unfenced completions yield the same bare markup.
///
/// # Examples
///
/// ```
/// use atelier_core::svg::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```svg\n<svg></svg>\n```"), "<svg></svg>");
/// assert_eq!(strip_code_fences("  <svg></svg>  "), "<svg></svg>");
/// ```
pub fn strip_code_fences(content: &str) -> String {
    content
        .trim()
        .replace(SVG_FENCE, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Whether a string looks like it contains an `<svg` element.
///
/// Used only for logging; content is stored as returned either way.
pub fn looks_like_svg(content: &str) -> bool {
    content.to_ascii_lowercase().contains("<svg")
}
