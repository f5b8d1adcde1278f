//! Engine-level universal properties (§8). P1 (turn numbering), P2
//! (participant uniqueness), P6 (importance range), P7/P8 (long-term
//! upsert), and P9 (fence stripping) are exercised at the unit level in
//! `storyloom-core`, `storyloom-gateway`, and `storyloom-engine`'s own
//! `long_term_apply` module; this file covers the properties that only
//! emerge from the engine driving several collaborators together.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storyloom_core::provider::{LlmProvider, ProviderError};
use storyloom_core::test_utils::MockProvider;
use storyloom_core::{CharacterId, ImmutableCharacter, LongTermCharacter, SceneId};
use storyloom_engine::SimulationEngine;
use storyloom_gateway::Gateway;
use storyloom_state_fs::{read_scene_log, simulation_dir};
use storyloom_state_memory::MemoryCharacterRepository;

fn character(id: &str) -> (ImmutableCharacter, LongTermCharacter) {
    (
        ImmutableCharacter {
            character_id: CharacterId::new(id),
            name: id.to_string(),
            age: None,
            occupation: None,
            base_personality: "steady".into(),
        },
        LongTermCharacter::empty(CharacterId::new(id)),
    )
}

fn thought_json(act: &str, talk: &str) -> String {
    format!(r#"{{"think":"t","act":"{act}","talk":"{talk}"}}"#)
}

/// Records every rendered prompt it is asked to answer, so tests can
/// inspect what context a turn actually saw — `MockProvider` itself is
/// blind to the prompt text.
struct CapturingProvider {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl CapturingProvider {
    fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for CapturingProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ProviderError::RequestFailed("queue exhausted".into()))
    }
}

async fn engine_with(
    tmp: &std::path::Path,
    ids: &[&str],
    provider: Arc<dyn LlmProvider>,
) -> SimulationEngine {
    let repo = Arc::new(MemoryCharacterRepository::new(
        ids.iter().map(|id| character(id)).collect(),
    ));
    let gateway = Gateway::new("test-model", Some("key"), "UNUSED", provider).unwrap();

    let thought_template = tmp.join("thought.txt");
    tokio::fs::write(&thought_template, "{{full_context}}").await.unwrap();
    let lt_template = tmp.join("lt.txt");
    tokio::fs::write(&lt_template, "{{existing_long_term_context_str}}").await.unwrap();

    let scene_path = tmp.join("scene.yaml");
    let participant_list = ids.join(", ");
    tokio::fs::write(
        &scene_path,
        format!("scene_id: s1\nsituation: tea\nparticipant_character_ids: [{participant_list}]\n"),
    )
    .await
    .unwrap();

    let mut engine = SimulationEngine::new(repo, gateway, thought_template, lt_template, tmp.join("logs"));
    engine.setup(&scene_path).await.unwrap();
    engine
}

#[tokio::test]
async fn p3_round_robin_cycles_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(MockProvider::ok(vec![
        thought_json("a1", "t1"),
        thought_json("a2", "t2"),
        thought_json("a3", "t3"),
        thought_json("a4", "t4"),
    ]));
    let mut engine = engine_with(dir.path(), &["alice", "bob", "carol"], provider).await;

    for _ in 0..4 {
        assert!(engine.execute_one_turn().await.unwrap());
    }

    let sim_dir = simulation_dir(dir.path().join("logs").as_path(), engine.simulation_id().unwrap());
    let log = read_scene_log(&sim_dir, &SceneId::new("s1")).await.unwrap();
    let ids: Vec<&str> = log.turns.iter().map(|t| t.character_id.as_str()).collect();
    assert_eq!(ids, vec!["alice", "bob", "carol", "alice"]);
}

#[tokio::test]
async fn p4_revelation_appears_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(CapturingProvider::new(vec![
        thought_json("", ""), // alice, turn 1
        thought_json("", ""), // bob, turn 2
        thought_json("", ""), // alice, turn 3 — should see the revelation
        thought_json("", ""), // bob, turn 4
        thought_json("", ""), // alice, turn 5 — should NOT see it again
    ]));
    let provider_handle = provider.clone();
    let mut engine = engine_with(dir.path(), &["alice", "bob"], provider).await;

    assert!(engine.execute_one_turn().await.unwrap()); // alice, turn 1
    let (ok, _) = engine
        .process_intervention_command("give_revelation alice you smell smoke")
        .await;
    assert!(ok);

    assert!(engine.execute_one_turn().await.unwrap()); // bob, turn 2
    assert!(engine.execute_one_turn().await.unwrap()); // alice, turn 3
    assert!(engine.execute_one_turn().await.unwrap()); // bob, turn 4
    assert!(engine.execute_one_turn().await.unwrap()); // alice, turn 5

    let prompts = provider_handle.prompts();
    assert!(!prompts[0].contains("you smell smoke")); // alice, turn 1: before the revelation
    assert!(!prompts[1].contains("you smell smoke")); // bob, turn 2: not the target
    assert!(prompts[2].contains("you smell smoke")); // alice, turn 3: delivered
    assert!(!prompts[4].contains("you smell smoke")); // alice, turn 5: cleared after delivery
}

#[tokio::test]
async fn p5_on_disk_log_matches_after_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(MockProvider::ok(vec![thought_json("waves", "hi")]));
    let mut engine = engine_with(dir.path(), &["alice"], provider).await;

    assert!(engine.execute_one_turn().await.unwrap());

    let sim_dir = simulation_dir(dir.path().join("logs").as_path(), engine.simulation_id().unwrap());
    let log = read_scene_log(&sim_dir, &SceneId::new("s1")).await.unwrap();
    assert_eq!(log.turns.len(), 1);
    assert_eq!(log.turns[0].act.as_deref(), Some("waves"));
}
