//! Tool registry integration tests

use marmot_mcp::tools::ToolRegistry;

#[test]
fn test_all_tools_registered() {
    let registry = ToolRegistry::discover(false);

    assert!(
        registry.len() >= 100,
        "Expected at least 100 tools, got {}",
        registry.len()
    );
}

#[test]
fn test_tool_names_unique() {
    let registry = ToolRegistry::discover(false);

    let names: Vec<&str> = registry.tools().map(|t| t.name).collect();

    let mut seen = std::collections::HashSet::new();
    for name in &names {
        assert!(seen.insert(*name), "Duplicate tool name: {}", name);
    }
}

#[test]
fn test_tool_coverage_across_resource_areas() {
    let registry = ToolRegistry::discover(false);
    let tool_names: Vec<&str> = registry.tools().map(|t| t.name).collect();

    for expected in [
        "list_issues",
        "create_issue",
        "list_merge_requests",
        "merge_merge_request",
        "get_file",
        "list_branches",
        "list_commits",
        "list_pipelines",
        "get_job_log",
        "list_projects",
        "list_groups",
        "list_namespaces",
        "list_labels",
        "list_milestones",
        "list_releases",
        "list_tags",
        "get_current_user",
        "search_global",
        "list_wiki_pages",
    ] {
        assert!(
            tool_names.contains(&expected),
            "Missing expected tool: {}",
            expected
        );
    }
}

#[test]
fn test_tool_schemas_valid() {
    let registry = ToolRegistry::discover(false);

    for tool in registry.tools() {
        assert!(!tool.name.is_empty(), "Tool has empty name");
        assert!(
            !tool.description.is_empty(),
            "Tool {} has empty description",
            tool.name
        );

        // In schemars 1.0, Schema wraps a serde_json::Value
        let schema_value =
            serde_json::to_value(&tool.input_schema).expect("Schema should serialize to JSON");
        assert!(
            schema_value.is_object(),
            "Tool {} schema should be a JSON object",
            tool.name
        );
    }
}

#[test]
fn test_required_and_optional_fields_in_schema() {
    let registry = ToolRegistry::discover(false);
    let tool = registry.get("list_issues").expect("list_issues registered");

    let schema = serde_json::to_value(&tool.input_schema).unwrap();
    let properties = schema
        .get("properties")
        .and_then(|p| p.as_object())
        .expect("schema has properties");

    assert!(properties.contains_key("project"));
    assert!(properties.contains_key("labels"));
    assert!(properties.contains_key("created_after"));

    // Only `project` is required; the rest have serde defaults
    let required: Vec<&str> = schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();
    assert_eq!(required, vec!["project"]);
}

#[test]
fn test_read_only_registry_has_no_mutating_tools() {
    let registry = ToolRegistry::discover(true);

    assert!(registry.is_read_only());
    assert!(!registry.is_empty());

    for tool in registry.tools() {
        assert!(
            !tool.operation.is_mutating(),
            "Mutating tool {} registered in read-only mode",
            tool.name
        );
    }

    // The mutating surface must not exist at all
    for absent in [
        "create_issue",
        "update_issue",
        "delete_issue",
        "merge_merge_request",
        "create_branch",
        "delete_branch",
        "retry_pipeline",
        "create_file",
        "delete_project",
    ] {
        assert!(
            registry.get(absent).is_none(),
            "Tool {} must not exist in read-only mode",
            absent
        );
    }

    // The read surface stays intact
    for present in ["list_issues", "get_file", "list_pipelines", "search_global"] {
        assert!(
            registry.get(present).is_some(),
            "Read tool {} missing in read-only mode",
            present
        );
    }
}

#[test]
fn test_read_only_keeps_every_read_tool() {
    let full = ToolRegistry::discover(false);
    let read_only = ToolRegistry::discover(true);

    let full_read_count = full.tools().filter(|t| !t.operation.is_mutating()).count();
    assert_eq!(read_only.len(), full_read_count);
}
