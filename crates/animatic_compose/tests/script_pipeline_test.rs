//! Integration tests for the script-generation pipeline.

mod common;

use animatic_compose::{MemoryOutlineStore, ScriptGenerationPipeline};
use animatic_core::{Outline, OutlineElement, OutlineStatus, SourceClip};
use animatic_interface::OutlineStore;
use chrono::{DateTime, Duration, Utc};
use common::{RecordingSink, ScriptedDriver};
use std::sync::Arc;
use uuid::Uuid;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
}

/// Seed an outline with `count` contiguous ten-second clips.
async fn seed_outline(store: &MemoryOutlineStore, count: usize) -> Uuid {
    let outline = Outline::new("Budget spot", "30s persuasion ad on the city budget");
    let outline_id = outline.id;
    store.insert_outline(outline).unwrap();

    for i in 0..count {
        let source = SourceClip {
            id: Uuid::new_v4(),
            title: format!("Council hearing {i}"),
            description: Some("Floor debate footage".to_string()),
        };
        store.insert_source(source.clone()).unwrap();

        let mut element = OutlineElement::video(outline_id, source.id, at(0), at(10));
        element.position_start_time = at(i as i64 * 10);
        element.position_end_time = at(i as i64 * 10 + 10);
        element.description = Some(format!("Clip {i} of the hearing"));
        if i == 0 {
            element.script = Some("MAYOR: The numbers do not lie.".to_string());
        }
        store.insert_element(&element).await.unwrap();
    }

    outline_id
}

#[tokio::test]
async fn seven_elements_run_as_two_batches() {
    let store = Arc::new(MemoryOutlineStore::new());
    let outline_id = seed_outline(&store, 7).await;

    let driver = ScriptedDriver::new(vec![
        "NARRATOR: Our city deserves honesty.",
        "NARRATOR: Vote like your budget depends on it.",
    ]);
    let sink = Arc::new(RecordingSink::new());
    let pipeline = ScriptGenerationPipeline::new(driver, store.clone(), sink.clone());

    let script = pipeline.generate_full_script(outline_id).await.unwrap();

    assert_eq!(
        script,
        "NARRATOR: Our city deserves honesty.\n\n\
         NARRATOR: Vote like your budget depends on it."
    );
    // Progress resets, then 5/7 and 7/7.
    assert_eq!(sink.percents(), vec![0, 71, 100]);

    let outline = store.get_outline(outline_id).await.unwrap();
    assert_eq!(outline.full_script.as_deref(), Some(script.as_str()));
    assert_eq!(outline.script_generation_progress, 100);
    assert_eq!(outline.status, OutlineStatus::ScriptFinalized);
}

#[tokio::test]
async fn batch_prompts_carry_first_and_last_flags() {
    let store = Arc::new(MemoryOutlineStore::new());
    let outline_id = seed_outline(&store, 7).await;

    let driver = ScriptedDriver::new(vec!["part one", "part two"]);
    let sink = Arc::new(RecordingSink::new());
    let pipeline = ScriptGenerationPipeline::new(driver, store.clone(), sink);

    pipeline.generate_full_script(outline_id).await.unwrap();

    let requests = pipeline.driver().requests();
    assert_eq!(requests.len(), 2);

    let first_prompt = &requests[0].messages[1].content;
    let last_prompt = &requests[1].messages[1].content;
    assert!(first_prompt.contains("beginning of the script"));
    assert!(last_prompt.contains("end of the script"));
    // The first batch holds five elements, the second the remaining two.
    assert!(first_prompt.contains("Clip 4 of the hearing"));
    assert!(!first_prompt.contains("Clip 5 of the hearing"));
    assert!(last_prompt.contains("Clip 5 of the hearing"));
    // Existing narration rides along for incremental refinement.
    assert!(first_prompt.contains("The numbers do not lie"));
}

#[tokio::test]
async fn empty_outline_completes_immediately() {
    let store = Arc::new(MemoryOutlineStore::new());
    let outline = Outline::new("Empty", "Nothing placed yet");
    let outline_id = outline.id;
    store.insert_outline(outline).unwrap();

    let driver = ScriptedDriver::new(vec![]);
    let sink = Arc::new(RecordingSink::new());
    let pipeline = ScriptGenerationPipeline::new(driver, store.clone(), sink.clone());

    let script = pipeline.generate_full_script(outline_id).await.unwrap();

    assert_eq!(script, "");
    assert_eq!(pipeline.driver().request_count(), 0);
    assert_eq!(sink.percents(), vec![0, 100]);

    let outline = store.get_outline(outline_id).await.unwrap();
    assert_eq!(outline.full_script.as_deref(), Some(""));
    assert_eq!(outline.script_generation_progress, 100);
}

#[tokio::test]
async fn generation_failure_aborts_with_no_partial_script() {
    let store = Arc::new(MemoryOutlineStore::new());
    let outline_id = seed_outline(&store, 7).await;

    // One response for two batches: the second call fails.
    let driver = ScriptedDriver::new(vec!["NARRATOR: This never lands."]);
    let sink = Arc::new(RecordingSink::new());
    let pipeline = ScriptGenerationPipeline::new(driver, store.clone(), sink.clone());

    let err = pipeline.generate_full_script(outline_id).await.unwrap_err();
    assert!(format!("{err}").contains("batch 2 of 2"));

    let outline = store.get_outline(outline_id).await.unwrap();
    assert_eq!(outline.full_script, None);
    assert_ne!(outline.script_generation_progress, 100);
    // The first batch had reported before the abort.
    assert_eq!(sink.percents(), vec![0, 71]);
}

#[tokio::test]
async fn progress_sink_failure_never_aborts_the_run() {
    let store = Arc::new(MemoryOutlineStore::new());
    let outline_id = seed_outline(&store, 3).await;

    let driver = ScriptedDriver::new(vec!["NARRATOR: One clean take."]);
    let sink = Arc::new(RecordingSink::failing());
    let pipeline = ScriptGenerationPipeline::new(driver, store.clone(), sink.clone());

    let script = pipeline.generate_full_script(outline_id).await.unwrap();

    assert_eq!(script, "NARRATOR: One clean take.");
    // Every report was attempted even though each one failed.
    assert_eq!(sink.percents(), vec![0, 100]);
    let outline = store.get_outline(outline_id).await.unwrap();
    assert_eq!(outline.full_script.as_deref(), Some(script.as_str()));
}

#[tokio::test]
async fn single_batch_gets_opening_and_closing_tone() {
    let store = Arc::new(MemoryOutlineStore::new());
    let outline_id = seed_outline(&store, 3).await;

    let driver = ScriptedDriver::new(vec!["whole spot"]);
    let sink = Arc::new(RecordingSink::new());
    let pipeline = ScriptGenerationPipeline::new(driver, store.clone(), sink);

    pipeline.generate_full_script(outline_id).await.unwrap();

    let requests = pipeline.driver().requests();
    assert_eq!(requests.len(), 1);
    let prompt = &requests[0].messages[1].content;
    assert!(prompt.contains("strong opening"));
    assert!(prompt.contains("call to action"));
}

#[tokio::test]
async fn missing_outline_is_reported_as_such() {
    let store = Arc::new(MemoryOutlineStore::new());
    let driver = ScriptedDriver::new(vec![]);
    let sink = Arc::new(RecordingSink::new());
    let pipeline = ScriptGenerationPipeline::new(driver, store, sink);

    let missing = Uuid::new_v4();
    let err = pipeline.generate_full_script(missing).await.unwrap_err();
    assert!(format!("{err}").contains(&missing.to_string()));
}
