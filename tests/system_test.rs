//! Workspace-level system tests: container, provider gateway, tool
//! registry, and agents working together the way a caller wires them.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use codecrew::agents::{
    AgentContext, ProjectManagerAgent, LLM_PROVIDER_SERVICE, TOOL_REGISTRY_SERVICE,
};
use codecrew::container::ServiceContainer;
use codecrew::model_gateway::{create_provider, MockProvider, ProviderConfig, ProviderKind};
use codecrew::tools::{default_registry, FunctionTool, ToolRegistry};
use codecrew::traits::{LlmProvider, Tool};
use codecrew::types::ChatOptions;

#[derive(Deserialize, JsonSchema)]
struct AddArgs {
    a: i64,
    b: i64,
}

fn add_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::from_typed::<AddArgs, _>(
        "add",
        "Add two integers",
        |args| Ok(json!(args.a + args.b)),
    ))
}

#[tokio::test]
async fn test_wire_resolve_and_execute_end_to_end() {
    let container = Arc::new(ServiceContainer::new());

    let provider = create_provider(ProviderKind::Mock, ProviderConfig::default()).unwrap();
    container
        .register_singleton(LLM_PROVIDER_SERVICE, provider)
        .unwrap();

    let registry = Arc::new(ToolRegistry::new());
    registry.register(add_tool()).unwrap();
    container
        .register_singleton(TOOL_REGISTRY_SERVICE, registry)
        .unwrap();

    let llm = container
        .resolve::<Arc<dyn LlmProvider>>(LLM_PROVIDER_SERVICE)
        .unwrap();
    let response = llm.generate("hi", &ChatOptions::default()).await.unwrap();
    assert!(!response.content.is_empty());

    let tools = container
        .resolve::<Arc<ToolRegistry>>(TOOL_REGISTRY_SERVICE)
        .unwrap();
    let result = tools.execute("add", json!({"a": 2, "b": 3})).await.unwrap();
    assert!(result.success);
    assert_eq!(result.output, Some(json!(5)));
}

#[tokio::test]
async fn test_child_container_swaps_provider_for_scripted_mock() {
    let root = Arc::new(ServiceContainer::new());
    let shared: Arc<dyn LlmProvider> = Arc::new(MockProvider::new(vec!["root reply".into()]));
    root.register_singleton(LLM_PROVIDER_SERVICE, shared).unwrap();

    // A nested scope overrides the provider without touching the root.
    let scoped = Arc::new(ServiceContainer::create_child(&root));
    let scripted: Arc<dyn LlmProvider> = Arc::new(MockProvider::new(vec!["scoped reply".into()]));
    scoped
        .register_singleton(LLM_PROVIDER_SERVICE, scripted)
        .unwrap();

    let from_root = root
        .resolve::<Arc<dyn LlmProvider>>(LLM_PROVIDER_SERVICE)
        .unwrap();
    let from_scope = scoped
        .resolve::<Arc<dyn LlmProvider>>(LLM_PROVIDER_SERVICE)
        .unwrap();

    let options = ChatOptions::default();
    assert_eq!(
        from_root.generate("q", &options).await.unwrap().content,
        "root reply"
    );
    assert_eq!(
        from_scope.generate("q", &options).await.unwrap().content,
        "scoped reply"
    );
}

#[tokio::test]
async fn test_project_manager_runs_against_default_registry() {
    let container = Arc::new(ServiceContainer::new());

    let provider = create_provider(
        ProviderKind::Mock,
        ProviderConfig::default().with_extra("responses", json!(["Ship it."])),
    )
    .unwrap();
    container
        .register_singleton(LLM_PROVIDER_SERVICE, provider)
        .unwrap();
    container
        .register_singleton(TOOL_REGISTRY_SERVICE, Arc::new(default_registry().unwrap()))
        .unwrap();

    let ctx = AgentContext::new(container);
    let manager = ProjectManagerAgent::new(ctx.clone());

    assert!(manager.initiate_project("apollo").unwrap());
    assert!(manager.create_project_plan().unwrap());
    assert_eq!(
        manager.consult("How do we proceed?").await.unwrap(),
        "Ship it."
    );

    let tools = ctx.tools().unwrap();
    let result = tools
        .execute("execute_code", json!({"code": "result = sum([1, 2, 3])"}))
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.output.unwrap()["result"], json!(6));
}

#[tokio::test]
async fn test_function_calling_export_for_coding_tools() {
    let registry = default_registry().unwrap();

    let rendered = registry.to_function_calling_format(Some("coding"));
    assert_eq!(rendered.len(), 4);
    for entry in &rendered {
        assert_eq!(entry["type"], "function");
        assert_eq!(entry["function"]["parameters"]["type"], "object");
        assert!(entry["function"]["parameters"]["properties"].is_object());
    }
}

#[tokio::test]
async fn test_sandbox_rejection_surfaces_as_refused_result() {
    let registry = default_registry().unwrap();

    let result = registry
        .execute("execute_code", json!({"code": "import os"}))
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.error.unwrap().contains("forbidden construct"));
}
