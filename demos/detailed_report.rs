use utmatch::report::Report;
use utmatch::{param, referral, Output, RuleSetBuilder};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ruleset = RuleSetBuilder::new()
        .rule("Paid", |r| {
            r.any()
                .when(param("gclid").exists())
                .when(param("utm_medium").equals("cpc"))
                .output(Output::new("paid", "", "cpc"))
        })
        .rule("Google", |r| {
            r.when(param("utm_source").equals("google"))
                .output(Output::new("", "Google", ""))
        })
        .rule("Direct", |r| {
            r.when(referral().not_present())
                .when(param("utm_source").not_exists())
                .output(Output::new("direct", "", "direct"))
        })
        .compile()
        .expect("failed to compile ruleset");

    let url = "example.com/pricing?utm_source=Google&utm_medium=CPC&utm_campaign=Spring";
    let analysis = ruleset.analyze(url, "").expect("url should parse");
    let report = Report::new(url, "", analysis);

    println!("{report}");
    println!("{}", report.to_json().expect("report serializes"));
}
