//! End-to-end task lifecycle tests
//!
//! Exercise the full path through the task store: submission, state
//! transitions, streamed artifact reassembly, and terminal absorption.

use agentnest_a2a::{prelude::*, protocol::FileContent};

#[tokio::test]
async fn test_streamed_task_end_to_end() {
    let store = TaskStore::new();

    // submitted
    let task = store
        .submit("session-1", Message::user("Generate the quarterly report"))
        .await
        .unwrap();
    assert_eq!(task.status.state, TaskState::Submitted);

    // working
    store
        .update_status(
            &task.id,
            TaskStatus::new(TaskState::Working).with_message(Message::agent("Starting")),
        )
        .await
        .unwrap();

    // two streamed fragments at index 0: open, then append + lastChunk
    let first = Artifact::new(0, vec![Part::text("Q1 numbers. ")]);
    let second = Artifact::new(0, vec![Part::text("Q1 outlook.")])
        .appending()
        .final_chunk();

    assert!(store
        .ingest_artifact(&task.id, first)
        .await
        .unwrap()
        .is_none());
    let sealed = store
        .ingest_artifact(&task.id, second)
        .await
        .unwrap()
        .expect("lastChunk seals the artifact");

    // reassembled artifact equals the concatenation of both fragments
    assert_eq!(
        sealed.parts,
        vec![Part::text("Q1 numbers. "), Part::text("Q1 outlook.")]
    );

    // completed
    let task = store
        .update_status(&task.id, TaskStatus::new(TaskState::Completed))
        .await
        .unwrap();
    assert!(task.is_terminal());
    assert_eq!(task.artifacts.as_ref().unwrap()[0].parts, sealed.parts);

    // any further status update is rejected
    let result = store
        .update_status(&task.id, TaskStatus::new(TaskState::Working))
        .await;
    assert!(matches!(result, Err(A2AError::InvalidTransition { .. })));
}

#[tokio::test]
async fn test_terminal_states_reject_all_updates() {
    for terminal in [TaskState::Completed, TaskState::Canceled, TaskState::Failed] {
        let store = TaskStore::new();
        let task = store
            .submit("session-1", Message::user("run"))
            .await
            .unwrap();
        store
            .update_status(&task.id, TaskStatus::new(TaskState::Working))
            .await
            .unwrap();
        store
            .update_status(&task.id, TaskStatus::new(terminal))
            .await
            .unwrap();

        for next in [
            TaskState::Submitted,
            TaskState::Working,
            TaskState::InputRequired,
            TaskState::Completed,
            TaskState::Canceled,
            TaskState::Failed,
            TaskState::Unknown,
        ] {
            let result = store
                .update_status(&task.id, TaskStatus::new(next))
                .await;
            assert!(
                matches!(result, Err(A2AError::InvalidTransition { .. })),
                "expected rejection of {terminal:?} -> {next:?}"
            );
        }

        // history is frozen too
        let result = store
            .append_message(&task.id, Message::user("anyone there?"))
            .await;
        assert!(matches!(result, Err(A2AError::InvalidTransition { .. })));
    }
}

#[tokio::test]
async fn test_input_required_conversation() {
    let store = TaskStore::new();
    let task = store
        .submit("session-1", Message::user("Book a flight"))
        .await
        .unwrap();

    store
        .update_status(&task.id, TaskStatus::new(TaskState::Working))
        .await
        .unwrap();
    store
        .update_status(
            &task.id,
            TaskStatus::new(TaskState::InputRequired)
                .with_message(Message::agent("Which date?")),
        )
        .await
        .unwrap();

    // caller supplies the missing input, agent resumes
    store
        .append_message(&task.id, Message::user("Next Tuesday"))
        .await
        .unwrap();
    let task = store
        .update_status(&task.id, TaskStatus::new(TaskState::Working))
        .await
        .unwrap();

    // history is chronological and complete: initial request, agent
    // question, caller answer
    let history = task.history.as_ref().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].role, Role::Agent);
    assert_eq!(history[2].role, Role::User);
}

#[tokio::test]
async fn test_failed_task_carries_diagnostic() {
    let store = TaskStore::new();
    let task = store
        .submit("session-1", Message::user("run"))
        .await
        .unwrap();
    store
        .update_status(&task.id, TaskStatus::new(TaskState::Working))
        .await
        .unwrap();

    let task = store
        .update_status(
            &task.id,
            TaskStatus::new(TaskState::Failed)
                .with_message(Message::agent("Upstream service timed out")),
        )
        .await
        .unwrap();

    assert_eq!(task.status.state, TaskState::Failed);
    let message = task.status.message.as_ref().unwrap();
    assert_eq!(message.parts, vec![Part::text("Upstream service timed out")]);
}

#[tokio::test]
async fn test_fragment_after_seal_is_a_violation() {
    let store = TaskStore::new();
    let task = store
        .submit("session-1", Message::user("stream"))
        .await
        .unwrap();
    store
        .update_status(&task.id, TaskStatus::new(TaskState::Working))
        .await
        .unwrap();

    store
        .ingest_artifact(
            &task.id,
            Artifact::new(0, vec![Part::text("all of it")]).final_chunk(),
        )
        .await
        .unwrap();

    let late = Artifact::new(0, vec![Part::text("straggler")]).appending();
    let result = store.ingest_artifact(&task.id, late).await;
    assert!(matches!(
        result,
        Err(A2AError::StreamOrderViolation { index: 0, .. })
    ));
}

#[tokio::test]
async fn test_interleaved_artifact_indices() {
    let store = TaskStore::new();
    let task = store
        .submit("session-1", Message::user("stream two"))
        .await
        .unwrap();
    store
        .update_status(&task.id, TaskStatus::new(TaskState::Working))
        .await
        .unwrap();

    store
        .ingest_artifact(&task.id, Artifact::new(1, vec![Part::text("b1 ")]))
        .await
        .unwrap();
    store
        .ingest_artifact(
            &task.id,
            Artifact::new(0, vec![Part::text("a")]).final_chunk(),
        )
        .await
        .unwrap();
    store
        .ingest_artifact(
            &task.id,
            Artifact::new(1, vec![Part::text("b2")])
                .appending()
                .final_chunk(),
        )
        .await
        .unwrap();

    let task = store.get(&task.id).await.unwrap();
    let artifacts = task.artifacts.as_ref().unwrap();
    assert_eq!(artifacts.len(), 2);
    // ordered by index regardless of completion order
    assert_eq!(artifacts[0].index, 0);
    assert_eq!(artifacts[1].index, 1);
    assert_eq!(
        artifacts[1].parts,
        vec![Part::text("b1 "), Part::text("b2")]
    );
}

#[tokio::test]
async fn test_cancellation_is_an_explicit_transition() {
    let store = TaskStore::new();
    let task = store
        .submit("session-1", Message::user("long job"))
        .await
        .unwrap();

    // cancel straight from submitted is a defined edge
    let task = store.cancel(&task.id).await.unwrap();
    assert_eq!(task.status.state, TaskState::Canceled);

    // canceling again is rejected, not ignored
    let result = store.cancel(&task.id).await;
    assert!(matches!(result, Err(A2AError::InvalidTransition { .. })));
}

#[test]
fn test_malformed_parts_rejected_at_construction() {
    // zero parts
    let result = Message::builder().role(Role::User).build();
    assert!(result.is_err());

    // file part with neither bytes nor uri
    let part = Part::File {
        file: FileContent::default(),
        metadata: None,
    };
    assert!(matches!(part.validate(), Err(A2AError::MalformedPart(_))));
}
