//! Code-fence stripping (§4.4 step 4: "Strip any leading/trailing
//! triple-backtick fences (with or without a `json` tag), line-anchored
//! or inline").

/// Remove a leading and/or trailing ` ``` ` fence, tolerating an
/// optional `json` language tag and either a newline or no separator
/// before the payload.
pub fn strip_fences(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        text = rest.trim_start_matches('\n');
    }

    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }

    text.trim().to_string()
}
