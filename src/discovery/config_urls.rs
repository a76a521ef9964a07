use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_LINE_RE: Regex =
        Regex::new(r"(?m)url[ \t]*=[ \t]*([^\r\n]*)").expect("config url regex");
}

/// Every `url = <value>` fragment in `raw`, top to bottom, duplicates kept.
///
/// This is a line scan rather than a config parser: values are taken
/// verbatim up to the end of the line with trailing whitespace removed, and
/// lines with an empty value are skipped.
pub fn extract_urls(raw: &str) -> Vec<String> {
    URL_LINE_RE
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|value| value.as_str().trim_end())
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
