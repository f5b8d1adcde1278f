//! Template rendering (§4.4, "Template rendering"): `{{key}}` / `{{key_str}}`
//! placeholder substitution, plus the `character_name` extraction
//! fallback.

use std::collections::HashMap;

const CHARACTER_BASICS_MARKER: &str = "【キャラクター基本情報】\n";

/// If `map` lacks `character_name` but has `immutable_context`, try to
/// pull the name out of the `"【キャラクター基本情報】\n<name>は"`
/// pattern and insert it. No-op if the pattern isn't found or
/// `character_name` is already present.
pub fn ensure_character_name(map: &mut HashMap<String, String>) {
    if map.contains_key("character_name") {
        return;
    }
    let Some(immutable_context) = map.get("immutable_context") else {
        return;
    };
    if let Some(name) = extract_character_name(immutable_context) {
        map.insert("character_name".to_string(), name);
    }
}

fn extract_character_name(immutable_context: &str) -> Option<String> {
    let start = immutable_context.find(CHARACTER_BASICS_MARKER)? + CHARACTER_BASICS_MARKER.len();
    let rest = &immutable_context[start..];
    let end = rest.find('は')?;
    Some(rest[..end].to_string())
}

/// Substitute every `{{key}}` and `{{key_str}}` placeholder in
/// `template` with its mapped value. Placeholders with no entry in
/// `map` pass through unchanged.
pub fn render(template: &str, map: &HashMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in map {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
        rendered = rendered.replace(&format!("{{{{{key}_str}}}}"), value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_plain_and_str_suffixed_placeholders() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), "Alice".to_string());
        let rendered = render("Hello {{name}}, aka {{name_str}}", &map);
        assert_eq!(rendered, "Hello Alice, aka Alice");
    }

    #[test]
    fn unsubstituted_placeholder_passes_through() {
        let map = HashMap::new();
        let rendered = render("Hello {{ghost}}", &map);
        assert_eq!(rendered, "Hello {{ghost}}");
    }

    #[test]
    fn extracts_character_name_from_immutable_context() {
        let mut map = HashMap::new();
        map.insert(
            "immutable_context".to_string(),
            "【キャラクター基本情報】\nAliceは28歳。".to_string(),
        );
        ensure_character_name(&mut map);
        assert_eq!(map.get("character_name").unwrap(), "Alice");
    }

    #[test]
    fn does_not_override_existing_character_name() {
        let mut map = HashMap::new();
        map.insert("character_name".to_string(), "Explicit".to_string());
        map.insert(
            "immutable_context".to_string(),
            "【キャラクター基本情報】\nAliceは28歳。".to_string(),
        );
        ensure_character_name(&mut map);
        assert_eq!(map.get("character_name").unwrap(), "Explicit");
    }
}
