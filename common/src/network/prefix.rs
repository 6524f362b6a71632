/// Splits a prefix list such as `"192, 10 172"` into its tokens.
///
/// Commas count as whitespace, empty tokens are dropped and input order is kept.
pub fn parse_prefixes(input: &str) -> Vec<String> {
    input
        .replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Returns the first prefix that `addr` starts with.
pub fn first_match<'a>(addr: &str, prefixes: &'a [String]) -> Option<&'a str> {
    prefixes
        .iter()
        .map(String::as_str)
        .find(|prefix| addr.starts_with(prefix))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
