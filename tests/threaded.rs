use std::sync::Arc;
use std::thread;

use utmatch::{param, referral, Output, RuleSetBuilder, TestCase};

#[test]
fn analyze_across_threads() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule("paid", |r| {
                r.any()
                    .when(param("gclid").exists())
                    .when(param("utm_medium").equals("cpc"))
                    .output(Output::new("paid", "", "cpc"))
            })
            .rule("google", |r| {
                r.when(param("utm_source").equals("google"))
                    .output(Output::new("", "Google", ""))
            })
            .rule("social", |r| {
                r.when(referral().contains("facebook"))
                    .output(Output::new("", "Facebook", "social"))
            })
            .compile()
            .unwrap(),
    );

    let inputs = [
        ("example.com/?gclid=abc&utm_source=Google", ""),
        ("example.com/?utm_medium=email", "m.facebook.com"),
        ("example.com/", ""),
        ("http://", "facebook"),
    ];

    let handles: Vec<_> = inputs
        .iter()
        .map(|&(url, referral)| {
            let rs = Arc::clone(&ruleset);
            thread::spawn(move || {
                rs.analyze(url, referral)
                    .map(|a| a.matched_names().into_iter().map(str::to_owned).collect::<Vec<_>>())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0].as_ref().unwrap(), &vec!["paid", "google"]);
    assert_eq!(results[1].as_ref().unwrap(), &vec!["social"]);
    assert!(results[2].as_ref().unwrap().is_empty());
    assert!(results[3].is_err());
}

#[test]
fn batch_split_across_threads_matches_serial() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule("email", |r| r.when(param("utm_medium").equals("email")))
            .rule("direct", |r| r.when(referral().equals("direct")))
            .compile()
            .unwrap(),
    );

    let cases: Vec<TestCase> = (0..40)
        .map(|i| {
            let medium = if i % 2 == 0 { "email" } else { "cpc" };
            let source = if i % 3 == 0 { "direct" } else { "google" };
            TestCase::new(format!("example.com/?utm_medium={medium}&n={i}"), source)
        })
        .collect();

    let serial = ruleset.analyze_batch(&cases);

    let parallel: Vec<_> = cases
        .chunks(10)
        .map(|chunk| {
            let rs = Arc::clone(&ruleset);
            let chunk = chunk.to_vec();
            thread::spawn(move || rs.analyze_batch(&chunk))
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(serial, parallel);
}
