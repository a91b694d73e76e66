//! Thumbnail upscaling.
//!
//! The marketplace serves the same picture at several sizes, distinguished
//! only by the file suffix. Search results point at the small `-I` variant.

/// Suffix of the low-resolution variant returned in search results.
pub const LOW_RES_SUFFIX: &str = "-I.jpg";

/// Suffix of the high-resolution variant.
pub const HIGH_RES_SUFFIX: &str = "-O.jpg";

/// Rewrite a low-resolution thumbnail URL to its high-resolution variant.
///
/// URLs with any other suffix are returned unchanged.
pub fn upscale(url: &str) -> String {
    match url.strip_suffix(LOW_RES_SUFFIX) {
        Some(stem) => format!("{stem}{HIGH_RES_SUFFIX}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_res_is_upscaled() {
        assert_eq!(upscale("http://img/p-I.jpg"), "http://img/p-O.jpg");
        assert_eq!(
            upscale("https://http2.mlstatic.com/D_123-MLB456_789-I.jpg"),
            "https://http2.mlstatic.com/D_123-MLB456_789-O.jpg"
        );
    }

    #[test]
    fn test_other_suffixes_pass_through() {
        for url in [
            "http://img/p-O.jpg",
            "http://img/p-I.webp",
            "http://img/p-I.jpg?v=2",
            "http://img/p.png",
            "",
        ] {
            assert_eq!(upscale(url), url);
        }
    }

    #[test]
    fn test_only_the_suffix_is_touched() {
        assert_eq!(upscale("http://img/a-I.jpg/b-I.jpg"), "http://img/a-I.jpg/b-O.jpg");
    }
}
