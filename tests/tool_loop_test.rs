// Client-side tool loop against a mock Letta server.
//
// The first request of a turn carries the user prompt; follow-ups carry the
// approval with the local tool return. Mocks tell them apart by body.
//
// Run with: cargo test --test tool_loop_test

use std::fs;

use letta_devtools::agents::ToolLoop;
use letta_devtools::client::LettaMessage;
use letta_devtools::permissions::PermissionManager;
use letta_devtools::{LettaClient, LettaConfig, ToolRegistry};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tempfile::tempdir;

const MESSAGES_PATH: &str = "/v1/agents/agent-1/messages";

fn client_for(server: &Server) -> LettaClient {
    LettaClient::new(LettaConfig::default().with_base_url(server.url())).unwrap()
}

fn approval_request(tool: &str, arguments: Value) -> String {
    json!({
        "messages": [
            {"id": "m1", "message_type": "reasoning_message", "reasoning": "need a tool"},
            {
                "id": "m2",
                "message_type": "approval_request_message",
                "tool_call": {
                    "name": tool,
                    "arguments": arguments.to_string(),
                    "tool_call_id": "call-1"
                }
            }
        ],
        "stop_reason": {"stop_reason": "requires_approval"}
    })
    .to_string()
}

fn final_reply(text: &str) -> String {
    json!({
        "messages": [{"id": "m3", "message_type": "assistant_message", "content": text}],
        "stop_reason": {"stop_reason": "end_turn"}
    })
    .to_string()
}

fn user_turn() -> Matcher {
    Matcher::Regex(r#""role":"user""#.to_string())
}

fn approval_turn() -> Matcher {
    Matcher::Regex(r#""type":"approval""#.to_string())
}

#[tokio::test]
async fn runs_requested_tool_locally_and_returns_result() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join("notes.md"), "").unwrap();

    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", MESSAGES_PATH)
        .match_body(Matcher::AllOf(vec![
            user_turn(),
            Matcher::Regex(r#""client_tools":\["#.to_string()),
            Matcher::Regex(r#""name":"list_files""#.to_string()),
        ]))
        .with_status(200)
        .with_body(approval_request(
            "list_files",
            json!({"directory": dir.path(), "pattern": "*.rs"}),
        ))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", MESSAGES_PATH)
        .match_body(Matcher::AllOf(vec![
            approval_turn(),
            Matcher::Regex(r#""tool_call_id":"call-1""#.to_string()),
            Matcher::Regex(r#"main\.rs"#.to_string()),
            Matcher::Regex(r#""status":"success""#.to_string()),
        ]))
        .with_status(200)
        .with_body(final_reply("There is one Rust file: main.rs"))
        .expect(1)
        .create_async()
        .await;

    let tool_loop = ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools());
    let transcript = tool_loop.run_turn("agent-1", "What Rust files are here?").await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(transcript.len(), 3);
    assert!(matches!(
        transcript.last(),
        Some(LettaMessage::AssistantMessage { .. })
    ));
}

#[tokio::test]
async fn write_is_denied_without_permission() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("out.txt");

    let mut server = Server::new_async().await;
    let _first = server
        .mock("POST", MESSAGES_PATH)
        .match_body(user_turn())
        .with_status(200)
        .with_body(approval_request(
            "write_file",
            json!({"file_path": target, "content": "hello"}),
        ))
        .create_async()
        .await;
    let second = server
        .mock("POST", MESSAGES_PATH)
        .match_body(Matcher::AllOf(vec![
            approval_turn(),
            Matcher::Regex("Permission denied for tool write_file".to_string()),
            Matcher::Regex(r#""status":"error""#.to_string()),
        ]))
        .with_status(200)
        .with_body(final_reply("I was not allowed to write the file."))
        .expect(1)
        .create_async()
        .await;

    let tool_loop = ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools());
    tool_loop.run_turn("agent-1", "Write hello to out.txt").await.unwrap();

    second.assert_async().await;
    assert!(!target.exists());
}

#[tokio::test]
async fn write_runs_once_allowed() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("out.txt");

    let mut server = Server::new_async().await;
    let _first = server
        .mock("POST", MESSAGES_PATH)
        .match_body(user_turn())
        .with_status(200)
        .with_body(approval_request(
            "write_file",
            json!({"file_path": target, "content": "hello"}),
        ))
        .create_async()
        .await;
    let second = server
        .mock("POST", MESSAGES_PATH)
        .match_body(Matcher::AllOf(vec![
            approval_turn(),
            Matcher::Regex("Wrote 5 characters".to_string()),
        ]))
        .with_status(200)
        .with_body(final_reply("Done."))
        .expect(1)
        .create_async()
        .await;

    let mut permissions = PermissionManager::new();
    permissions.always_allow_tool("write_file");
    let tool_loop = ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools())
        .with_permissions(permissions);
    tool_loop.run_turn("agent-1", "Write hello to out.txt").await.unwrap();

    second.assert_async().await;
    assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
}

#[tokio::test]
async fn parallel_requests_are_all_answered() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, "alpha\nbeta").unwrap();

    let response = json!({
        "messages": [
            {
                "id": "m1",
                "message_type": "approval_request_message",
                "tool_call": {
                    "name": "list_files",
                    "arguments": json!({"directory": dir.path()}).to_string(),
                    "tool_call_id": "call-1"
                }
            },
            {
                "id": "m2",
                "message_type": "approval_request_message",
                "tool_call": {
                    "name": "read_file",
                    "arguments": json!({"file_path": file, "start_line": 2, "end_line": 2}).to_string(),
                    "tool_call_id": "call-2"
                }
            }
        ],
        "stop_reason": {"stop_reason": "requires_approval"}
    })
    .to_string();

    let mut server = Server::new_async().await;
    let _first = server
        .mock("POST", MESSAGES_PATH)
        .match_body(user_turn())
        .with_status(200)
        .with_body(response)
        .create_async()
        .await;
    let second = server
        .mock("POST", MESSAGES_PATH)
        .match_body(Matcher::AllOf(vec![
            approval_turn(),
            Matcher::Regex(r#""tool_call_id":"call-1".*"tool_call_id":"call-2""#.to_string()),
            Matcher::Regex(r#""tool_return":"beta""#.to_string()),
        ]))
        .with_status(200)
        .with_body(final_reply("a.txt has beta on line 2"))
        .expect(1)
        .create_async()
        .await;

    let tool_loop = ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools());
    tool_loop.run_turn("agent-1", "Look around").await.unwrap();

    second.assert_async().await;
}

#[tokio::test]
async fn negative_line_number_is_reported_as_tool_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, "alpha\nbeta").unwrap();

    let mut server = Server::new_async().await;
    let _first = server
        .mock("POST", MESSAGES_PATH)
        .match_body(user_turn())
        .with_status(200)
        .with_body(approval_request(
            "read_file",
            json!({"file_path": file, "start_line": -1, "end_line": 2}),
        ))
        .create_async()
        .await;
    let second = server
        .mock("POST", MESSAGES_PATH)
        .match_body(Matcher::AllOf(vec![
            approval_turn(),
            Matcher::Regex("Line numbers must be >= 1".to_string()),
            Matcher::Regex(r#""status":"error""#.to_string()),
        ]))
        .with_status(200)
        .with_body(final_reply("Line numbers start at 1."))
        .expect(1)
        .create_async()
        .await;

    let tool_loop = ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools());
    tool_loop.run_turn("agent-1", "Read from line -1").await.unwrap();

    second.assert_async().await;
}

#[tokio::test]
async fn unknown_tool_gets_error_return() {
    let mut server = Server::new_async().await;
    let _first = server
        .mock("POST", MESSAGES_PATH)
        .match_body(user_turn())
        .with_status(200)
        .with_body(approval_request("launch_rockets", json!({})))
        .create_async()
        .await;
    let second = server
        .mock("POST", MESSAGES_PATH)
        .match_body(Matcher::AllOf(vec![
            approval_turn(),
            Matcher::Regex("Unknown tool: launch_rockets".to_string()),
            Matcher::Regex(r#""status":"error""#.to_string()),
        ]))
        .with_status(200)
        .with_body(final_reply("That tool does not exist."))
        .expect(1)
        .create_async()
        .await;

    let tool_loop = ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools());
    tool_loop.run_turn("agent-1", "Launch").await.unwrap();

    second.assert_async().await;
}

#[tokio::test]
async fn stops_after_max_steps() {
    let dir = tempdir().unwrap();
    let args = json!({"directory": dir.path()});

    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", MESSAGES_PATH)
        .match_body(user_turn())
        .with_status(200)
        .with_body(approval_request("list_files", args.clone()))
        .expect(1)
        .create_async()
        .await;
    let follow_ups = server
        .mock("POST", MESSAGES_PATH)
        .match_body(approval_turn())
        .with_status(200)
        .with_body(approval_request("list_files", args))
        .expect(2)
        .create_async()
        .await;

    let tool_loop =
        ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools()).with_max_steps(3);
    let transcript = tool_loop.run_turn("agent-1", "Loop forever").await.unwrap();

    first.assert_async().await;
    follow_ups.assert_async().await;
    assert_eq!(transcript.len(), 6);
}

#[tokio::test]
async fn server_error_aborts_the_turn() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", MESSAGES_PATH)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let tool_loop = ToolLoop::new(client_for(&server), ToolRegistry::with_file_tools());
    let err = tool_loop.run_turn("agent-1", "Hello").await.unwrap_err();
    assert!(err.to_string().contains("agent-1"));
}
