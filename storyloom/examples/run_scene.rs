//! Run a two-character scene to completion against a canned provider.
//!
//! No API key or network access needed — this uses the in-tree
//! `MockProvider` so the example runs standalone. Swap it for a real
//! `LlmProvider` implementation to drive an actual model.
//!
//! Run with: `cargo run --example run_scene -p storyloom --features state-memory`

use std::sync::Arc;
use storyloom::prelude::*;
use storyloom_core::test_utils::MockProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let repo = Arc::new(MemoryCharacterRepository::new(vec![
        (
            ImmutableCharacter {
                character_id: CharacterId::new("alice"),
                name: "Alice".into(),
                age: Some(34),
                occupation: Some("baker".into()),
                base_personality: "warm, a little anxious about the weather".into(),
            },
            LongTermCharacter::empty(CharacterId::new("alice")),
        ),
        (
            ImmutableCharacter {
                character_id: CharacterId::new("bob"),
                name: "Bob".into(),
                age: Some(40),
                occupation: Some("mail carrier".into()),
                base_personality: "dry humor, observant".into(),
            },
            LongTermCharacter::empty(CharacterId::new("bob")),
        ),
    ]));

    let thought_template = dir.path().join("thought.txt");
    tokio::fs::write(&thought_template, "{{full_context}}").await?;
    let lt_template = dir.path().join("lt.txt");
    tokio::fs::write(&lt_template, "{{existing_long_term_context_str}}").await?;
    let scene_path = dir.path().join("scene.yaml");
    tokio::fs::write(
        &scene_path,
        "scene_id: bakery_morning\nsituation: Alice is opening the bakery; Bob is on his usual round.\nparticipant_character_ids: [alice, bob]\n",
    )
    .await?;

    let provider = Arc::new(MockProvider::ok(vec![
        r#"{"think":"the bread should be ready soon","act":"slides a tray into the oven","talk":"morning, Bob"}"#,
        r#"{"think":"she always smells like cinnamon this early","act":"waves through the window","talk":"morning! package for you today"}"#,
        r#"{"think":"a package, how nice","act":"opens the door","talk":"come in out of the cold"}"#,
    ]));

    let gateway = Gateway::new("mock-model", Some("unused"), "STORYLOOM_API_KEY", provider)?;
    let mut engine = SimulationEngine::new(repo, gateway, thought_template, lt_template, dir.path().join("logs"));

    engine.setup(&scene_path).await?;
    for _ in 0..3 {
        engine.execute_one_turn().await?;
        let status = engine.get_status();
        println!("turn {} of {:?}", status.turns_completed, status.participants);
    }

    engine.process_intervention_command("end_scene").await;
    engine.execute_one_turn().await?; // transitions Idle -> Completed
    engine.end().await?;
    println!("scene finished: {:?}", engine.get_status().state);
    Ok(())
}
