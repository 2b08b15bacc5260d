use utmatch::store::import_test_cases;
use utmatch::RuleSet;

const RULES: &str = r#"[
    {
        "name": "Newsletter",
        "conditions": [
            {"type": "parameter", "parameter": "utm_medium", "operator": "equals", "value": "email"}
        ],
        "output": {"type": "owned", "platform": "Mailchimp", "channel": "email"}
    },
    {
        "name": "Organic social",
        "conditionsOperator": "or",
        "conditions": [
            {"type": "referral", "operator": "contains", "value": "facebook"},
            {"type": "referral", "operator": "contains", "value": "instagram"}
        ],
        "output": {"type": "organic", "platform": "Meta", "channel": "social"}
    }
]"#;

fn main() {
    let ruleset = RuleSet::from_json(RULES).expect("rules should import");

    let rows = [
        ["url", "source"],
        ["example.com/?utm_medium=Email", ""],
        ["example.com/blog", "l.instagram.com"],
        ["not a url://", "facebook"],
    ];
    let import = import_test_cases(&rows, ruleset.config());
    println!(
        "imported {} test cases, skipped {}",
        import.cases.len(),
        import.skipped
    );

    for outcome in ruleset.analyze_batch(&import.cases) {
        match outcome.result {
            Ok(analysis) => println!("{} [{}] -> {analysis}", outcome.case.url, outcome.case.referral_source),
            Err(err) => println!("{} -> error: {err}", outcome.case.url),
        }
    }
}
