//! Multi-call sessions for the SDR, grocery, tutor and story agents, run
//! through the JSON-lines session harness.

use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::io::BufReader;
use voicedesk::AgentKind;
use voicedesk::agents::story::CLOSING_PHRASE;
use voicedesk::config::GlobalConfig;
use voicedesk::session::{SessionRunner, UsageSummary};

fn config(dir: &Path) -> GlobalConfig {
    let mut config = GlobalConfig::default();
    config.paths.fraud_db = dir.join("fraud_cases.json");
    config.paths.faq_file = dir.join("company_faq.json");
    config.paths.leads_file = dir.join("leads.json");
    config.paths.catalog_file = dir.join("catalog.json");
    config.paths.orders_dir = dir.join("orders");
    config.paths.tutor_content = dir.join("tutor_content.json");
    config
}

fn write(path: &Path, value: Value) {
    std::fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// Run calls through a fresh agent session; returns the output lines and usage
async fn run_session(kind: AgentKind, config: &GlobalConfig, calls: &[Value]) -> (Vec<Value>, UsageSummary) {
    let agent = kind.build(config).unwrap();
    let input: String = calls.iter().map(|c| format!("{}\n", c)).collect();
    let mut output = Vec::new();

    let usage = SessionRunner::new(&agent)
        .run(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let lines = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (lines, usage)
}

#[tokio::test]
async fn test_grocery_order_session() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    write(
        &config.paths.catalog_file,
        json!({
            "items": [
                {"name": "Bread", "price": 40.0, "category": "Bakery"},
                {"name": "Milk", "price": 28.0, "category": "Dairy"},
                {"name": "Jam", "price": 95.5, "category": "Pantry"}
            ],
            "recipes": {"toast": ["bread", "jam"]}
        }),
    );

    let (lines, usage) = run_session(
        AgentKind::Grocery,
        &config,
        &[
            json!({"name": "add_to_cart", "input": {"item": "milk", "quantity": 2}}),
            json!({"name": "add_recipe", "input": {"recipe": "Toast"}}),
            json!({"name": "view_cart"}),
            json!({"name": "place_order", "input": {"customer_name": "Meera"}}),
            json!({"name": "view_cart"}),
            json!({"name": "place_order"}),
        ],
    )
    .await;

    assert_eq!(lines[2]["output"]["total"], 191.5);
    assert_eq!(lines[3]["output"]["status"], "ok");
    assert_eq!(lines[4]["output"]["item_count"], 0);
    assert_eq!(lines[5]["output"]["message"], "cart_empty");
    assert_eq!(usage.calls, 6);
    assert_eq!(usage.errors, 0);

    let files: Vec<_> = std::fs::read_dir(&config.paths.orders_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("order_") && files[0].ends_with(".json"));
}

#[tokio::test]
async fn test_sdr_session() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    write(
        &config.paths.faq_file,
        json!({
            "company": {"name": "Acme Voice"},
            "faqs": [
                {"question": "How much does it cost?", "answer": "From $49 a month.", "keywords": ["pricing", "price"]}
            ]
        }),
    );

    let (lines, _) = run_session(
        AgentKind::Sdr,
        &config,
        &[
            json!({"name": "find_faq", "input": {"question": "What's your pricing like?"}}),
            json!({"name": "find_faq", "input": {"question": "Do you integrate with Salesforce?"}}),
            json!({"name": "update_lead", "input": {"field": "name", "value": "Priya"}}),
            json!({"name": "save_lead"}),
            json!({"name": "update_lead", "input": {"field": "email", "value": "priya@example.com"}}),
            json!({"name": "save_lead"}),
        ],
    )
    .await;

    assert_eq!(lines[0]["output"]["answer"], "From $49 a month.");
    assert_eq!(lines[1]["output"], json!({"found": false}));
    assert_eq!(lines[3]["output"]["missing"], json!(["email"]));
    assert_eq!(lines[5]["output"]["total_leads"], 1);

    let leads: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&config.paths.leads_file).unwrap()).unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["email"], "priya@example.com");
}

#[tokio::test]
async fn test_sdr_missing_faq_file() {
    let dir = TempDir::new().unwrap();
    let (lines, _) = run_session(
        AgentKind::Sdr,
        &config(dir.path()),
        &[
            json!({"name": "get_company_info"}),
            json!({"name": "find_faq", "input": {"question": "pricing"}}),
        ],
    )
    .await;

    assert_eq!(lines[0]["output"], json!({}));
    assert_eq!(lines[1]["output"], json!({"found": false}));
}

#[tokio::test]
async fn test_tutor_session() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    write(
        &config.paths.tutor_content,
        json!([
            {
                "id": "loops",
                "title": "Loops",
                "summary": "A loop repeats a block of code.",
                "sample_question": "When would you use a loop?"
            }
        ]),
    );

    let (lines, _) = run_session(
        AgentKind::Tutor,
        &config,
        &[
            json!({"name": "get_activity"}),
            json!({"name": "select_topic", "input": {"topic_id": "loops"}}),
            json!({"name": "set_mode", "input": {"mode": "teach back"}}),
            json!({"name": "get_activity"}),
        ],
    )
    .await;

    assert_eq!(lines[0]["output"]["error"], "no_topic_selected");
    assert_eq!(lines[2]["output"]["voice"], "en-US-ken");
    assert_eq!(lines[3]["output"]["mode"], "teach_back");
}

#[tokio::test]
async fn test_story_session_closing_phrase() {
    let dir = TempDir::new().unwrap();
    let mut calls = vec![json!({"name": "start_story"})];
    calls.extend((0..4).map(|_| json!({"name": "continue_story", "input": {"player_action": "look around"}})));

    let (lines, usage) = run_session(AgentKind::Story, &config(dir.path()), &calls).await;

    assert_eq!(usage.calls, 5);
    for line in &lines {
        let narration = line["output"]["narration"].as_str().unwrap();
        assert!(narration.ends_with(CLOSING_PHRASE));
        assert_eq!(narration.matches(CLOSING_PHRASE).count(), 1);
    }
}
