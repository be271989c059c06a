/// Smoke tests for the demo driver wired to the real system clock.
use hl_demo::{build_chain, render::render, DemoConfig, LinkMode, OutputFormat, TxSpec};
use hl_transaction::SystemClock;

#[test]
fn default_demo_produces_valid_two_block_chain() {
    let chain = build_chain(&DemoConfig::default(), &SystemClock).unwrap();
    assert_eq!(chain.len(), 2);
    assert!(chain.verify().is_ok());
}

#[test]
fn custom_transfers_end_up_in_the_demo_block() {
    let config = DemoConfig {
        transactions: vec![
            "Carol:Dave:1.5".parse().unwrap(),
            TxSpec::new("Dave", "Erin", -2),
            TxSpec::new("Erin", "Carol", 0),
        ],
        link_mode: LinkMode::Build,
        ..DemoConfig::default()
    };
    let chain = build_chain(&config, &SystemClock).unwrap();

    let block = chain.latest();
    assert_eq!(block.index(), 1);
    assert_eq!(block.transactions().len(), 3);
    assert_eq!(block.transactions()[0].amount().to_string(), "1.5");
    assert!(chain.is_valid());
}

#[test]
fn json_output_exposes_header_fields() {
    let chain = build_chain(&DemoConfig::default(), &SystemClock).unwrap();
    let mut buf = Vec::new();
    render(&chain, OutputFormat::Json, &mut buf).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["previous_hash"], "0");
    assert_eq!(blocks[0]["merkle_root"], "");
    assert_eq!(blocks[1]["previous_hash"], blocks[0]["hash"]);
    assert_eq!(blocks[1]["transactions"][0]["sender"], "Alice");
}
