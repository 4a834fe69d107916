//! Tool loop and agent behaviour with a mock provider.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::MockProvider;
use crypto_assistant::agent::{Agent, CRYPTO_AGENT_INSTRUCTIONS};
use crypto_assistant::error::AssistantError;
use crypto_assistant::generation::{self, MAX_TOOL_ITERATIONS};
use crypto_assistant::tools::{AgentTool, AgentToolParameters, Tool};
use crypto_assistant::types::*;
use serde_json::json;

fn fake_price_tool(calls: Arc<AtomicUsize>) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "get_coin_price",
        "Get the price of a trading pair",
        AgentToolParameters::object()
            .string("symbol", "Ticker symbol", true)
            .build(),
        move |args| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let symbol = args.get_str("symbol")?.to_uppercase();
                Ok(json!(format!("The current price of {symbol} is 100.00 USDT")))
            }
        },
    ))
}

#[tokio::test]
async fn generate_text_simple() {
    let provider = MockProvider::new("test-model");
    provider.queue_response("Hello from mock!");

    let result = generation::generate_text(
        &provider,
        vec![ModelMessage::user("Hi")],
        GenerationSettings::default(),
        &[],
    )
    .await
    .unwrap();

    assert_eq!(result.text, "Hello from mock!");
    assert_eq!(result.steps.len(), 1);
    assert_eq!(result.finish_reason, Some(FinishReason::Stop));
    assert!(provider.requests()[0].tools.is_none());
}

#[tokio::test]
async fn generate_text_with_tool_loop() {
    let provider = MockProvider::new("test-model");
    provider.queue_tool_call("call_1", "get_coin_price", json!({"symbol": "btcusdt"}));
    provider.queue_response("Bitcoin trades at 100.00 USDT.");

    let calls = Arc::new(AtomicUsize::new(0));
    let result = generation::generate_text(
        &provider,
        vec![ModelMessage::user("Price of BTCUSDT?")],
        GenerationSettings::default(),
        &[fake_price_tool(calls.clone())],
    )
    .await
    .unwrap();

    assert_eq!(result.text, "Bitcoin trades at 100.00 USDT.");
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.tool_call_count(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.usage.total_tokens, 45);

    // user, assistant tool call, tool result
    assert_eq!(result.messages.len(), 3);
    assert_eq!(result.messages[1].role, Role::Assistant);
    assert_eq!(result.messages[2].role, Role::Tool);
    match &result.messages[2].content[0] {
        ContentPart::ToolResult(tr) => {
            assert_eq!(tr.tool_call_id, "call_1");
            assert!(!tr.is_error);
            assert_eq!(tr.result, json!("The current price of BTCUSDT is 100.00 USDT"));
        }
        other => panic!("expected tool result, got {other:?}"),
    }

    let second = &provider.requests()[1];
    assert_eq!(second.messages.len(), 3);
    assert_eq!(second.tools.as_ref().unwrap()[0].name, "get_coin_price");
}

#[tokio::test]
async fn unknown_tool_is_reported_back_to_model() {
    let provider = MockProvider::new("test-model");
    provider.queue_tool_call("call_1", "get_weather", json!({"city": "Paris"}));
    provider.queue_response("I can only look up crypto prices.");

    let calls = Arc::new(AtomicUsize::new(0));
    let result = generation::generate_text(
        &provider,
        vec![ModelMessage::user("Weather?")],
        GenerationSettings::default(),
        &[fake_price_tool(calls.clone())],
    )
    .await
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let tr = &result.steps[0].tool_results[0];
    assert!(tr.is_error);
    assert!(tr.result["error"].as_str().unwrap().contains("get_weather"));
    assert_eq!(result.text, "I can only look up crypto prices.");
}

#[tokio::test]
async fn tool_error_is_reported_back_to_model() {
    let provider = MockProvider::new("test-model");
    provider.queue_tool_call("call_1", "get_coin_price", json!({}));
    provider.queue_response("Which symbol?");

    let calls = Arc::new(AtomicUsize::new(0));
    let result = generation::generate_text(
        &provider,
        vec![ModelMessage::user("price?")],
        GenerationSettings::default(),
        &[fake_price_tool(calls)],
    )
    .await
    .unwrap();

    assert!(result.steps[0].tool_results[0].is_error);
    assert_eq!(result.text, "Which symbol?");
}

#[tokio::test]
async fn tool_loop_stops_at_iteration_limit() {
    let provider = MockProvider::new("test-model");
    for i in 0..MAX_TOOL_ITERATIONS + 2 {
        provider.queue_tool_call(&format!("call_{i}"), "get_coin_price", json!({"symbol": "ETHUSDT"}));
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let result = generation::generate_text(
        &provider,
        vec![ModelMessage::user("loop")],
        GenerationSettings::default(),
        &[fake_price_tool(calls.clone())],
    )
    .await
    .unwrap();

    assert_eq!(result.steps.len(), MAX_TOOL_ITERATIONS);
    assert_eq!(calls.load(Ordering::SeqCst), MAX_TOOL_ITERATIONS);
    assert_eq!(result.finish_reason, Some(FinishReason::Length));
}

#[tokio::test]
async fn provider_error_propagates() {
    let provider = MockProvider::new("test-model");
    provider.queue_error(AssistantError::api(500, "boom"));

    let err = generation::generate_text(
        &provider,
        vec![ModelMessage::user("hi")],
        GenerationSettings::default(),
        &[],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AssistantError::Api { status: 500, .. }));
}

#[tokio::test]
async fn agent_sends_instructions_and_detects_symbol() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_tool_call("call_1", "get_coin_price", json!({"symbol": "ETHUSDT"}));
    provider.queue_response("ETH is 100.00 USDT.");

    let calls = Arc::new(AtomicUsize::new(0));
    let agent = Agent::crypto_price_agent(provider.clone(), vec![fake_price_tool(calls)]);
    let answer = agent.run("  what's ethusdt trading at?  ").await.unwrap();

    assert_eq!(answer.text, "ETH is 100.00 USDT.");
    assert_eq!(answer.detected_symbol, Some("ETHUSDT"));
    assert_eq!(answer.tool_calls, 1);

    let first = &provider.requests()[0];
    assert_eq!(first.messages[0].role, Role::System);
    assert_eq!(first.messages[0].text(), CRYPTO_AGENT_INSTRUCTIONS);
    assert_eq!(first.messages[1].text(), "what's ethusdt trading at?");
}

#[tokio::test]
async fn agent_without_tools_answers_directly() {
    let provider = Arc::new(MockProvider::new("gemini-2.0-flash"));
    provider.queue_response("Paris is the capital of France.");

    let agent = Agent::crypto_price_agent(provider.clone(), Vec::new());
    let answer = agent.run("Capital of France?").await.unwrap();

    assert_eq!(answer.text, "Paris is the capital of France.");
    assert_eq!(answer.detected_symbol, None);
    assert_eq!(answer.tool_calls, 0);
    assert!(provider.requests()[0].tools.is_none());
}

#[tokio::test]
async fn agent_rejects_blank_query() {
    let provider = Arc::new(MockProvider::new("m"));
    let agent = Agent::crypto_price_agent(provider.clone(), Vec::new());
    let err = agent.run("   ").await.unwrap_err();
    assert!(matches!(err, AssistantError::InvalidArgument(_)));
    assert!(provider.requests().is_empty());
}
