//! Integration tests for the ordering-suggestion client.

mod common;

use animatic_compose::{MemoryOutlineStore, OrderingSuggestionClient};
use animatic_core::{Outline, OutlineElement, SourceClip, TranscriptSegment};
use animatic_interface::OutlineStore;
use animatic_timeline::TimelineModel;
use chrono::{DateTime, Duration, Utc};
use common::ScriptedDriver;
use std::sync::Arc;
use uuid::Uuid;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
}

struct Seeded {
    store: Arc<MemoryOutlineStore>,
    outline_id: Uuid,
    element_ids: Vec<Uuid>,
}

/// Seed an outline with three contiguous ten-second clips, each with
/// source metadata and a transcript.
async fn seed() -> Seeded {
    let store = Arc::new(MemoryOutlineStore::new());
    let outline = Outline::new("School levy", "Persuasion spot for the levy");
    let outline_id = outline.id;
    store.insert_outline(outline).unwrap();

    let titles = ["Town hall", "Classroom visit", "Parent interview"];
    let mut element_ids = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        let source = SourceClip {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: Some(format!("{title} footage")),
        };
        store.insert_source(source.clone()).unwrap();
        store
            .insert_transcript(
                source.id,
                vec![
                    TranscriptSegment {
                        start: at(2),
                        end: at(6),
                        text: format!("soundbite {i} inside trim"),
                    },
                    TranscriptSegment {
                        start: at(40),
                        end: at(44),
                        text: "outside the trimmed span".to_string(),
                    },
                ],
            )
            .unwrap();

        let mut element = OutlineElement::video(outline_id, source.id, at(0), at(10));
        element.position_start_time = at(i as i64 * 10);
        element.position_end_time = at(i as i64 * 10 + 10);
        store.insert_element(&element).await.unwrap();
        element_ids.push(element.id);
    }

    Seeded {
        store,
        outline_id,
        element_ids,
    }
}

/// A schema-conformant response: three candidates over the given ids, the
/// second one reversed, all with contiguous ten-second spacing.
fn valid_response(ids: &[Uuid]) -> String {
    let mut reversed = ids.to_vec();
    reversed.reverse();
    let candidates = [ids.to_vec(), reversed, ids.to_vec()];

    let orderings: Vec<_> = candidates.iter().cloned().collect();
    let in_between: Vec<Vec<String>> = candidates
        .iter()
        .map(|c| {
            (1..c.len())
                .map(|i| format!("Hard cut into clip {i}"))
                .collect()
        })
        .collect();
    let timestamps: Vec<Vec<serde_json::Value>> = candidates
        .iter()
        .map(|c| {
            c.iter()
                .enumerate()
                .map(|(i, id)| {
                    serde_json::json!({
                        "id": id,
                        "start": format!("00:00:{:02}", i * 10),
                        "end": format!("00:00:{:02}", i * 10 + 10),
                    })
                })
                .collect()
        })
        .collect();

    serde_json::json!({
        "orderings": orderings,
        "in_between": in_between,
        "timestamps": timestamps,
    })
    .to_string()
}

#[tokio::test]
async fn returns_three_validated_candidates() {
    let seeded = seed().await;
    let driver = ScriptedDriver::new(vec![&valid_response(&seeded.element_ids)]);
    let client = OrderingSuggestionClient::new(driver, seeded.store.clone());

    let suggestions = client
        .request_orderings(&seeded.element_ids)
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 3);
    for suggestion in &suggestions {
        assert_eq!(suggestion.ordering.len(), 3);
        assert_eq!(suggestion.in_between.len(), 2);
        let mut sorted = suggestion.ordering.clone();
        sorted.sort();
        let mut expected = seeded.element_ids.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }
    // The second candidate really is the reversed arrangement.
    let reversed: Vec<Uuid> = seeded.element_ids.iter().rev().copied().collect();
    assert_eq!(suggestions[1].ordering, reversed);
}

#[tokio::test]
async fn payload_carries_titles_and_trimmed_transcripts() {
    let seeded = seed().await;
    let driver = ScriptedDriver::new(vec![&valid_response(&seeded.element_ids)]);
    let client = OrderingSuggestionClient::new(driver, seeded.store.clone());

    client
        .request_orderings(&seeded.element_ids)
        .await
        .unwrap();

    let requests = client.driver().requests();
    assert_eq!(requests.len(), 1);
    let prompt = &requests[0].messages[1].content;
    assert!(prompt.contains("Town hall"));
    assert!(prompt.contains("soundbite 0 inside trim"));
    // Segments outside the trimmed source span never reach the backend.
    assert!(!prompt.contains("outside the trimmed span"));
}

#[tokio::test]
async fn wrong_cardinality_fails_the_whole_request() {
    let seeded = seed().await;
    let short = &seeded.element_ids[..2];
    let response = serde_json::json!({
        "orderings": [short],
        "in_between": [["only bridge"]],
        "timestamps": [[
            {"id": short[0], "start": "00:00:00", "end": "00:00:10"},
            {"id": short[1], "start": "00:00:10", "end": "00:00:20"},
        ]],
    })
    .to_string();

    let driver = ScriptedDriver::new(vec![&response]);
    let client = OrderingSuggestionClient::new(driver, seeded.store.clone());

    let err = client
        .request_orderings(&seeded.element_ids)
        .await
        .unwrap_err();
    assert!(format!("{err}").contains("expected 3"));
}

#[tokio::test]
async fn markdown_fenced_json_is_still_accepted() {
    let seeded = seed().await;
    let fenced = format!(
        "Here you go:\n```json\n{}\n```\n",
        valid_response(&seeded.element_ids)
    );
    let driver = ScriptedDriver::new(vec![&fenced]);
    let client = OrderingSuggestionClient::new(driver, seeded.store.clone());

    let suggestions = client
        .request_orderings(&seeded.element_ids)
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 3);
}

#[tokio::test]
async fn accepting_a_suggestion_replaces_the_timeline_wholesale() {
    let seeded = seed().await;
    let driver = ScriptedDriver::new(vec![&valid_response(&seeded.element_ids)]);
    let client = OrderingSuggestionClient::new(driver, seeded.store.clone());

    let elements = seeded.store.get_elements(seeded.outline_id).await.unwrap();
    let mut model = TimelineModel::from_elements(seeded.outline_id, elements).unwrap();

    let suggestions = client
        .request_orderings(&seeded.element_ids)
        .await
        .unwrap();
    let reversed = suggestions[1].clone();

    client.accept(&mut model, &reversed).await.unwrap();

    // The model now holds the reversed order with the suggested spacing.
    let ordered: Vec<Uuid> = model.elements().iter().map(|e| e.id).collect();
    assert_eq!(ordered, reversed.ordering);
    assert_eq!(model.elements()[0].position_start_time, at(0));
    assert_eq!(model.elements()[2].position_end_time, at(30));

    // The store was rewritten to match.
    let stored = seeded.store.get_elements(seeded.outline_id).await.unwrap();
    let stored_order: Vec<Uuid> = stored.iter().map(|e| e.id).collect();
    assert_eq!(stored_order, reversed.ordering);
}

#[tokio::test]
async fn empty_element_set_is_rejected_before_any_call() {
    let seeded = seed().await;
    let driver = ScriptedDriver::new(vec![]);
    let client = OrderingSuggestionClient::new(driver, seeded.store.clone());

    let err = client.request_orderings(&[]).await.unwrap_err();
    assert!(format!("{err}").contains("empty element set"));
    assert_eq!(client.driver().request_count(), 0);
}
