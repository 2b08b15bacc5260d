use utmatch::{param, referral, Output, RuleSetBuilder};

fn main() {
    // Define rules
    let ruleset = RuleSetBuilder::new()
        .rule("Google Ads", |r| {
            r.any()
                .when(param("gclid").exists())
                .when(param("utm_medium").equals("cpc"))
                .output(Output::new("paid", "Google", "cpc"))
        })
        .rule("Facebook", |r| {
            r.when(referral().contains("facebook"))
                .output(Output::new("social", "Facebook", "social"))
        })
        .compile()
        .expect("failed to compile ruleset");

    println!("{ruleset}");

    // Analyze a landing URL and its referral
    let analysis = ruleset
        .analyze("shop.example.com/sale?gclid=Cj0KCQ&utm_source=google", "google.com")
        .expect("url should parse");

    if analysis.matches.is_empty() {
        println!("No rule matched.");
    }
    for m in &analysis.matches {
        println!("{} -> {}", m.rule_name, m.output);
    }
}
