use harvest_core::*;
use std::sync::Arc;

fn recon_ability() -> Ability {
    Ability::new("c0da588f", "T1033", "sh")
        .with_parser(ParserDescriptor::new(
            "basic",
            vec![ParserConfig::new("host.user.name")],
        ))
        .with_parser(ParserDescriptor::new(
            "basic",
            vec![ParserConfig::new("host.user.password")
                .with_edge("belongs_to")
                .with_target("host.user.name")],
        ))
}

fn seeded_operation() -> Operation {
    Operation::new("op-1", "discovery").with_source(FactSource {
        id: "src-1".into(),
        name: "basic".into(),
        facts: vec![
            Fact::new("domain.name", "corp.local", 1),
            Fact::new("host.user.name", "svc", 4).with_collector("agent-a"),
        ],
    })
}

// ── Full pipeline ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_basic_parser_pipeline_with_operation() {
    let extractor = Extractor::with_builtins();
    let op = seeded_operation();
    let used = Fact::new("host.user.name", "svc", 4);

    let mut link = Link::new("Y2F0IC9ldGMvcGFzc3dk", "agent-b", recon_ability())
        .with_used(vec![used.clone()]);
    link.apply_id("workstation-7");
    assert!(link.id.is_some());

    // Not executed yet: nothing happens.
    let summary = link.parse(&extractor, Some(&op), &encode_result("alice\nbob")).await;
    assert!(summary.skipped);

    link.status = LinkStatus::Success;
    let summary = link.parse(&extractor, Some(&op), &encode_result("alice\nbob")).await;

    assert_eq!(summary.descriptors_run, 2);
    assert_eq!(summary.relationships_found, 4);
    assert!(summary.failures.is_empty());
    assert_eq!(link.relationships().len(), 4);

    // Parser 1: alice, bob as user names.
    // Parser 2: alice, bob as passwords belonging to the used "svc" user,
    // whose target (svc, agent-b) is new for this host.
    let traits: Vec<_> = link
        .facts()
        .iter()
        .map(|f| (f.trait_name.as_str(), f.value.as_str()))
        .collect();
    assert_eq!(
        traits,
        vec![
            ("host.user.name", "alice"),
            ("host.user.name", "bob"),
            ("host.user.password", "alice"),
            ("host.user.name", "svc"),
            ("host.user.password", "bob"),
        ]
    );

    // svc was consumed; each parser found 2 relationships.
    let rewarded = op.pool().get(&used.unique()).unwrap().unwrap();
    assert_eq!(rewarded.collected_by, "agent-a");
    assert_eq!(rewarded.score, 8);

    assert_eq!(op.all_facts().unwrap().len(), 7);
}

#[tokio::test]
async fn test_pipeline_without_operation() {
    let extractor = Extractor::with_builtins();
    let mut link = Link::new("d2hvYW1p", "agent-a", recon_ability())
        .with_status(LinkStatus::Success);

    let summary = link.parse(&extractor, None, &encode_result("root\nroot\n")).await;

    assert_eq!(summary.relationships_found, 4);
    assert_eq!(link.relationships().len(), 4);
    // duplicate lines collapse against the link's own facts:
    // (name, root) once, (password, root) once, target (name, root) already known
    assert_eq!(link.facts().len(), 2);
}

#[tokio::test]
async fn test_garbage_result_is_contained() {
    let extractor = Extractor::with_builtins();
    let op = seeded_operation();
    let mut link = Link::new("d2hvYW1p", "agent-a", recon_ability())
        .with_status(LinkStatus::Success);

    let summary = link.parse(&extractor, Some(&op), "////\u{1F4A5}").await;

    assert_eq!(summary.failures.len(), 2);
    assert!(link.facts().is_empty());
    assert!(link.relationships().is_empty());
    assert_eq!(op.all_facts().unwrap().len(), 2);
}

// ── Links sharing an operation ───────────────────────────────────────────────

#[tokio::test]
async fn test_two_agents_same_host_observation() {
    let extractor = Arc::new(Extractor::with_builtins());
    let op = Arc::new(Operation::new("op-2", "lateral"));
    let ability = Ability::new("ab", "T1087", "sh").with_parser(ParserDescriptor::new(
        "basic",
        vec![ParserConfig::new("host.user.name")],
    ));

    let mut handles = Vec::new();
    for paw in ["agent-a", "agent-b", "agent-a"] {
        let extractor = extractor.clone();
        let op = op.clone();
        let ability = ability.clone();
        handles.push(tokio::spawn(async move {
            let mut link = Link::new("d2hvYW1p", paw, ability).with_status(LinkStatus::Success);
            link.parse(&extractor, Some(&*op), &encode_result("root")).await;
            link.facts().len()
        }));
    }

    let mut added = 0;
    for handle in handles {
        added += handle.await.unwrap();
    }

    // one copy per agent, the repeated agent-a observation is dropped
    assert_eq!(added, 2);
    assert_eq!(op.pool().len().unwrap(), 2);
}

// ── Display projection ───────────────────────────────────────────────────────

#[test]
fn test_display_json_shape() {
    let mut link = Link::new("d2hvYW1p", "agent-a", recon_ability());
    link.apply_id("workstation-7");

    let json = serde_json::to_value(link.display()).unwrap();
    for key in [
        "id", "paw", "command", "executor", "status", "score", "decide", "pin", "pid", "facts",
        "unique", "collect", "finish", "ability", "cleanup", "visibility", "host", "output",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["status"], -3);
    assert_eq!(json["host"], "workstation-7");
    assert_eq!(json["collect"], "");
    assert_eq!(json["pid"], "");
    assert_eq!(json["decide"].as_str().unwrap().len(), 19);
}
