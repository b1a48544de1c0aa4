/// Format a duration as `minutes:seconds`, seconds zero-padded.
///
/// Whole seconds are floored before splitting, so `61999` ms is `"1:01"`.
pub fn format_duration(total_ms: u64) -> String {
    let total_secs = total_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
#[path = "../../tests/unit/text/format.rs"]
mod tests;
