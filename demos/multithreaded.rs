use std::sync::Arc;
use std::thread;

use utmatch::{param, Output, RuleSetBuilder, TestCase};

fn main() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule("Email", |r| {
                r.when(param("utm_medium").equals("email"))
                    .output(Output::new("owned", "", "email"))
            })
            .rule("Paid", |r| {
                r.when(param("utm_medium").equals("cpc"))
                    .output(Output::new("paid", "", "cpc"))
            })
            .compile()
            .expect("failed to compile ruleset"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rs = Arc::clone(&ruleset);
            thread::spawn(move || {
                let medium = if i % 2 == 0 { "email" } else { "cpc" };
                let cases = vec![TestCase::new(
                    format!("example.com/?utm_medium={medium}&worker={i}"),
                    "direct",
                )];
                for outcome in rs.analyze_batch(&cases) {
                    match outcome.result {
                        Ok(analysis) => println!("Thread {i}: {analysis}"),
                        Err(err) => println!("Thread {i}: {err}"),
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
