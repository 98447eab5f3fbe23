//! Helpers for the location info of log macros

/// Shorten a fully qualified function path to its last `count` segments
pub fn short_path(path: &str, count: usize) -> &str {
    let mut idx = path.len();
    for _ in 0..count {
        match path[..idx].rfind("::") {
            Some(sep) => idx = sep,
            None => return path,
        }
    }
    &path[idx + 2..]
}

#[cfg(test)]
mod tests {
    use super::short_path;

    #[test]
    fn test_short_path() {
        assert_eq!(short_path("gbreak_ucd::generator::Generator::generate", 2), "Generator::generate");
        assert_eq!(short_path("generate", 2), "generate");
        assert_eq!(short_path("a::b", 1), "b");
    }
}
