//! JSON response validation (§4.4: thought-generation and
//! long-term-update-generation contracts).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storyloom_core::error::GatewayError;

/// A validated `{think, act, talk}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtOutput {
    /// The character's private reasoning.
    pub think: String,
    /// An observable action. Empty string is valid (§4.4 step 6).
    pub act: String,
    /// Spoken dialogue. Empty string is valid.
    pub talk: String,
}

/// One entry of a `new_experiences` proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedExperience {
    /// What happened.
    pub event: String,
    /// Salience, `[1..10]`.
    pub importance: u8,
}

/// One entry of an `updated_goals` proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedGoal {
    /// The goal text.
    pub goal: String,
    /// Priority, `[1..10]`.
    pub importance: u8,
}

/// One entry of a `new_memories` proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedMemory {
    /// The remembered content.
    pub memory: String,
    /// Which scene this memory is from.
    pub scene_id_of_memory: String,
    /// Other characters involved, if any.
    #[serde(default)]
    pub related_character_ids: Vec<String>,
}

/// A validated long-term-update proposal. Any of the three lists may be
/// empty if its key was absent from the response, but at least one key
/// must have been present (enforced during parsing, not here).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LongTermUpdateProposal {
    /// Proposed new experiences.
    #[serde(default)]
    pub new_experiences: Vec<ProposedExperience>,
    /// Proposed goal changes.
    #[serde(default)]
    pub updated_goals: Vec<ProposedGoal>,
    /// Proposed new memories.
    #[serde(default)]
    pub new_memories: Vec<ProposedMemory>,
}

fn parse_object(json_text: &str) -> Result<serde_json::Map<String, Value>, GatewayError> {
    let value: Value = serde_json::from_str(json_text)
        .map_err(|e| GatewayError::InvalidResponse(format!("invalid json: {e}")))?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| GatewayError::InvalidResponse("response is not a json object".into()))
}

/// Parse and validate a thought-generation response (§4.4 steps 5-6).
pub fn parse_thought(json_text: &str) -> Result<ThoughtOutput, GatewayError> {
    let obj = parse_object(json_text)?;
    let field = |key: &str| -> Result<String, GatewayError> {
        obj.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GatewayError::InvalidResponse(format!("missing key: {key}")))
    };
    Ok(ThoughtOutput {
        think: field("think")?,
        act: field("act")?,
        talk: field("talk")?,
    })
}

fn importance_from_value(value: &Value, path: &str) -> Result<u8, GatewayError> {
    let n = value
        .as_u64()
        .ok_or_else(|| GatewayError::InvalidResponse(format!("{path} must be an integer")))?;
    let n = u8::try_from(n)
        .map_err(|_| GatewayError::InvalidResponse(format!("{path} out of range [1..10]")))?;
    if !(1..=10).contains(&n) {
        return Err(GatewayError::InvalidResponse(format!(
            "{path} out of range [1..10]"
        )));
    }
    Ok(n)
}

fn string_field(item: &Value, key: &str, path: &str) -> Result<String, GatewayError> {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| GatewayError::InvalidResponse(format!("{path} must be a string")))
}

fn parse_experiences(value: &Value) -> Result<Vec<ProposedExperience>, GatewayError> {
    let arr = value
        .as_array()
        .ok_or_else(|| GatewayError::InvalidResponse("new_experiences must be an array".into()))?;
    arr.iter()
        .enumerate()
        .map(|(i, item)| {
            Ok(ProposedExperience {
                event: string_field(item, "event", &format!("new_experiences[{i}].event"))?,
                importance: importance_from_value(
                    item.get("importance").unwrap_or(&Value::Null),
                    &format!("new_experiences[{i}].importance"),
                )?,
            })
        })
        .collect()
}

fn parse_goals(value: &Value) -> Result<Vec<ProposedGoal>, GatewayError> {
    let arr = value
        .as_array()
        .ok_or_else(|| GatewayError::InvalidResponse("updated_goals must be an array".into()))?;
    arr.iter()
        .enumerate()
        .map(|(i, item)| {
            Ok(ProposedGoal {
                goal: string_field(item, "goal", &format!("updated_goals[{i}].goal"))?,
                importance: importance_from_value(
                    item.get("importance").unwrap_or(&Value::Null),
                    &format!("updated_goals[{i}].importance"),
                )?,
            })
        })
        .collect()
}

fn parse_memories(value: &Value) -> Result<Vec<ProposedMemory>, GatewayError> {
    let arr = value
        .as_array()
        .ok_or_else(|| GatewayError::InvalidResponse("new_memories must be an array".into()))?;
    arr.iter()
        .enumerate()
        .map(|(i, item)| {
            let related = match item.get("related_character_ids") {
                None => Vec::new(),
                Some(Value::Array(entries)) => entries
                    .iter()
                    .enumerate()
                    .map(|(j, entry)| {
                        entry.as_str().map(str::to_string).ok_or_else(|| {
                            GatewayError::InvalidResponse(format!(
                                "new_memories[{i}].related_character_ids[{j}] must be a string"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Some(_) => {
                    return Err(GatewayError::InvalidResponse(format!(
                        "new_memories[{i}].related_character_ids must be an array"
                    )))
                }
            };
            Ok(ProposedMemory {
                memory: string_field(item, "memory", &format!("new_memories[{i}].memory"))?,
                scene_id_of_memory: string_field(
                    item,
                    "scene_id_of_memory",
                    &format!("new_memories[{i}].scene_id_of_memory"),
                )?,
                related_character_ids: related,
            })
        })
        .collect()
}

/// Parse and validate a long-term-update response (§4.4 "Long-term
/// update generation").
pub fn parse_lt_update(json_text: &str) -> Result<LongTermUpdateProposal, GatewayError> {
    let obj = parse_object(json_text)?;
    let has_any = obj.contains_key("new_experiences")
        || obj.contains_key("updated_goals")
        || obj.contains_key("new_memories");
    if !has_any {
        return Err(GatewayError::InvalidResponse(
            "at least one of new_experiences, updated_goals, new_memories must be present".into(),
        ));
    }

    Ok(LongTermUpdateProposal {
        new_experiences: match obj.get("new_experiences") {
            Some(v) => parse_experiences(v)?,
            None => Vec::new(),
        },
        updated_goals: match obj.get("updated_goals") {
            Some(v) => parse_goals(v)?,
            None => Vec::new(),
        },
        new_memories: match obj.get("new_memories") {
            Some(v) => parse_memories(v)?,
            None => Vec::new(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_thought() {
        let out = parse_thought(r#"{"think":"t","act":"a","talk":"s"}"#).unwrap();
        assert_eq!(out.think, "t");
    }

    #[test]
    fn empty_strings_are_valid_thought_fields() {
        let out = parse_thought(r#"{"think":"","act":"","talk":""}"#).unwrap();
        assert_eq!(out, ThoughtOutput { think: String::new(), act: String::new(), talk: String::new() });
    }

    #[test]
    fn missing_key_is_invalid_response() {
        let err = parse_thought(r#"{"think":"t","act":"a"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(msg) if msg.contains("talk")));
    }

    #[test]
    fn lt_update_requires_at_least_one_key() {
        let err = parse_lt_update("{}").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn lt_update_parses_all_three_keys() {
        let json = r#"{
            "new_experiences": [{"event": "met a stranger", "importance": 5}],
            "updated_goals": [{"goal": "learn to bake", "importance": 7}],
            "new_memories": [{"memory": "a warm afternoon", "scene_id_of_memory": "s1", "related_character_ids": ["bob"]}]
        }"#;
        let proposal = parse_lt_update(json).unwrap();
        assert_eq!(proposal.new_experiences.len(), 1);
        assert_eq!(proposal.updated_goals[0].importance, 7);
        assert_eq!(proposal.new_memories[0].related_character_ids, vec!["bob"]);
    }

    #[test]
    fn lt_update_out_of_range_importance_is_rejected_with_path() {
        let json = r#"{"new_experiences": [{"event": "x", "importance": 99}]}"#;
        let err = parse_lt_update(json).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(msg) if msg.contains("new_experiences[0].importance")));
    }
}
