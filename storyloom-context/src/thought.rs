//! Thought context assembly (§4.3, "Thought context (per turn)").

use crate::names::resolve_name;
use std::collections::HashMap;
use storyloom_core::character::{Experience, Goal, ImmutableCharacter, LongTermCharacter, Memory};
use storyloom_core::error::RepoError;
use storyloom_core::id::CharacterId;
use storyloom_core::repository::CharacterRepository;
use storyloom_core::scene::Scene;
use storyloom_core::turn::Turn;

/// At most this many of the most recent turns are rendered into the
/// "Recent interactions" section (design value, §4.3).
pub const MAX_TURNS: usize = 5;

/// The five labelled sections of a turn's thought context, plus the
/// interleaved `full_context` the gateway actually sends to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ThoughtContext {
    /// Section 1: name, age/occupation sentence, personality paragraph.
    pub character_basics: String,
    /// Section 2: experiences, goals, memories.
    pub experience_memory: String,
    /// Section 3: location, time, situation, participant names.
    pub scene_context: String,
    /// Section 4: previous-scene summary and/or pending revelation.
    pub previous_context: String,
    /// Section 5: recent turns without private `think`.
    pub recent_interactions: String,
    /// All five sections interleaved with blank-line separators.
    pub full_context: String,
}

impl ThoughtContext {
    /// Flatten into the `{{key}}`-substitution map the Gateway expects.
    /// `immutable_context` is what §4.4's `character_name` extraction
    /// fallback scans when the caller doesn't supply the name directly.
    pub fn into_map(self, character_name: String) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("character_name".to_string(), character_name);
        map.insert("immutable_context".to_string(), self.character_basics);
        map.insert("experience_memory_context".to_string(), self.experience_memory);
        map.insert("scene_context".to_string(), self.scene_context);
        map.insert("previous_context".to_string(), self.previous_context);
        map.insert(
            "recent_interactions_context".to_string(),
            self.recent_interactions,
        );
        map.insert("full_context".to_string(), self.full_context);
        map
    }
}

fn character_basics(profile: &ImmutableCharacter) -> String {
    let mut lines = vec![format!("【キャラクター基本情報】\n{}は", profile.name)];
    let mut sentence = String::new();
    if let Some(age) = profile.age {
        sentence.push_str(&format!("{age}歳"));
    }
    if let Some(occupation) = &profile.occupation {
        if !sentence.is_empty() {
            sentence.push('、');
        }
        sentence.push_str(occupation);
    }
    if !sentence.is_empty() {
        lines.push(format!("{sentence}。"));
    }
    lines.push(profile.base_personality.clone());
    lines.join("\n")
}

fn sorted_by_importance_desc<T>(items: &[T], importance: impl Fn(&T) -> u8) -> Vec<&T> {
    let mut refs: Vec<&T> = items.iter().collect();
    refs.sort_by(|a, b| importance(b).cmp(&importance(a)));
    refs
}

async fn render_experiences(experiences: &[Experience]) -> String {
    sorted_by_importance_desc(experiences, |e| e.importance.get())
        .into_iter()
        .map(|e| format!("- {} (重要度: {})", e.event, e.importance.get()))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn render_goals(goals: &[Goal]) -> String {
    sorted_by_importance_desc(goals, |g| g.importance.get())
        .into_iter()
        .map(|g| format!("- {} (重要度: {})", g.goal, g.importance.get()))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn render_memories(repo: &dyn CharacterRepository, memories: &[Memory]) -> String {
    let mut lines = Vec::with_capacity(memories.len());
    for memory in memories {
        if memory.related_character_ids.is_empty() {
            lines.push(format!("- {}", memory.memory));
            continue;
        }
        let mut names = Vec::with_capacity(memory.related_character_ids.len());
        for id in &memory.related_character_ids {
            names.push(resolve_name(repo, id).await);
        }
        lines.push(format!("- {} ({})", memory.memory, names.join(", ")));
    }
    lines.join("\n")
}

pub(crate) async fn experience_memory_section(
    repo: &dyn CharacterRepository,
    record: &LongTermCharacter,
) -> String {
    format!(
        "【経験】\n{}\n\n【目標】\n{}\n\n【記憶】\n{}",
        render_experiences(&record.experiences).await,
        render_goals(&record.goals).await,
        render_memories(repo, &record.memories).await,
    )
}

async fn scene_section(repo: &dyn CharacterRepository, scene: &Scene) -> String {
    let mut names = Vec::with_capacity(scene.participants.len());
    for id in &scene.participants {
        names.push(resolve_name(repo, id.as_str()).await);
    }
    let location = scene.location.as_deref().unwrap_or("不明");
    let time = scene.time.as_deref().unwrap_or("不明");
    format!(
        "【場面】\n場所: {location}\n時間: {time}\n状況: {}\n参加者: {}",
        scene.situation,
        names.join(", ")
    )
}

fn previous_context_section(
    previous_scene_summary: Option<&str>,
    pending_revelation_text: Option<&str>,
) -> String {
    let mut blocks = Vec::new();
    if let Some(revelation) = pending_revelation_text {
        blocks.push(format!("【天啓】\n{revelation}"));
    }
    if let Some(summary) = previous_scene_summary {
        blocks.push(format!("【前の場面のまとめ】\n{summary}"));
    }
    blocks.join("\n\n")
}

fn turn_line(name: &str, turn: &Turn) -> String {
    let mut line = format!("{name}:");
    if let Some(act) = &turn.act {
        if !act.is_empty() {
            line.push_str(&format!(" {act}"));
        }
    }
    if let Some(talk) = &turn.talk {
        if !talk.is_empty() {
            line.push_str(&format!(" 「{talk}」"));
        }
    }
    line
}

async fn recent_interactions_section(repo: &dyn CharacterRepository, recent_turns: &[Turn]) -> String {
    let start = recent_turns.len().saturating_sub(MAX_TURNS);
    let mut lines = Vec::new();
    for turn in &recent_turns[start..] {
        let name = resolve_name(repo, turn.character_id.as_str()).await;
        lines.push(turn_line(&name, turn));
    }
    lines.join("\n")
}

/// Build the full thought context for `character_id` in `scene`.
pub async fn assemble_thought_context(
    repo: &dyn CharacterRepository,
    character_id: &CharacterId,
    scene: &Scene,
    recent_turns: &[Turn],
    previous_scene_summary: Option<&str>,
    pending_revelation_text: Option<&str>,
) -> Result<ThoughtContext, RepoError> {
    tracing::debug!(character_id = %character_id, "assembling thought context");
    let profile = repo.get_immutable(character_id).await?;
    let record = repo.get_long_term(character_id).await?;

    let character_basics = character_basics(&profile);
    let experience_memory = experience_memory_section(repo, &record).await;
    let scene_context = scene_section(repo, scene).await;
    let previous_context =
        previous_context_section(previous_scene_summary, pending_revelation_text);
    let recent_interactions = recent_interactions_section(repo, recent_turns).await;

    let full_context = [
        &character_basics,
        &experience_memory,
        &scene_context,
        &previous_context,
        &recent_interactions,
    ]
    .iter()
    .filter(|s| !s.is_empty())
    .map(|s| s.as_str())
    .collect::<Vec<_>>()
    .join("\n\n");

    Ok(ThoughtContext {
        character_basics,
        experience_memory,
        scene_context,
        previous_context,
        recent_interactions,
        full_context,
    })
}
