use utmatch::{
    analyze, extract_parameters, normalize_url, param, referral, AnalysisError, LogicalOp,
    Output, Rule, RuleSet, RuleSetBuilder,
};

fn utm_rule(op: LogicalOp) -> Rule {
    Rule {
        name: "cpc".to_owned(),
        conditions_operator: op,
        conditions: vec![
            param("utm_source").exists(),
            param("utm_medium").equals("cpc"),
        ],
        output: Output::new("paid", "Google", "cpc"),
    }
}

#[test]
fn keys_preserve_case_values_lowercase() {
    let params = extract_parameters("https://x.com/?a=1&B=2").unwrap();
    assert_eq!(params.get("a"), Some("1"));
    assert_eq!(params.get("B"), Some("2"));
    assert_eq!(params.get("b"), None);
}

#[test]
fn default_scheme_is_transparent() {
    assert_eq!(
        extract_parameters("example.com/path?x=1").unwrap(),
        extract_parameters("https://example.com/path?x=1").unwrap()
    );
}

#[test]
fn and_rule_full_audit_trail() {
    let rules = [utm_rule(LogicalOp::And)];

    let hit = analyze(&rules, "x.com/?utm_source=google&utm_medium=cpc", "").unwrap();
    assert_eq!(hit.matches.len(), 1);
    assert_eq!(hit.matches[0].match_details.len(), 2);

    let miss = analyze(&rules, "x.com/?utm_source=google&utm_medium=organic", "").unwrap();
    assert!(miss.matches.is_empty());

    let outcome = utmatch::evaluate_rule(&rules[0], &miss.parameters, "");
    assert_eq!(
        outcome.match_details,
        vec![
            "Parameter 'utm_source' exists as required",
            "Parameter 'utm_medium' condition not met (equals)",
        ]
    );
}

#[test]
fn or_rule_matches_on_single_condition() {
    let rules = [utm_rule(LogicalOp::Or)];
    let analysis = analyze(&rules, "x.com/?utm_source=google", "").unwrap();
    assert_eq!(analysis.matches.len(), 1);
    assert_eq!(
        analysis.matches[0].match_details[1],
        "Parameter 'utm_medium' condition not met (equals)"
    );
}

#[test]
fn not_equals_absent_parameter_matches() {
    let ruleset = RuleSetBuilder::new()
        .rule("no_gclid_x", |r| r.when(param("gclid").not_equals("x")))
        .compile()
        .unwrap();
    let analysis = ruleset.analyze("x.com/?utm_source=a", "").unwrap();
    assert_eq!(analysis.matched_names(), vec!["no_gclid_x"]);
}

#[test]
fn referral_contains_case_insensitive() {
    let ruleset = RuleSetBuilder::new()
        .rule("fb", |r| r.when(referral().contains("face")))
        .compile()
        .unwrap();
    assert!(ruleset.analyze("x.com", "Facebook Ads").unwrap().is_match());
}

#[test]
fn empty_rules_never_error() {
    let analysis = analyze(&[], "https://x.com", "").unwrap();
    assert!(analysis.parameters.is_empty());
    assert!(analysis.matches.is_empty());
}

#[test]
fn empty_condition_rule_never_matches_unvalidated() {
    let rules = [Rule::new("vacuous_and", LogicalOp::And), Rule::new("vacuous_or", LogicalOp::Or)];
    let analysis = analyze(&rules, "x.com/?a=1", "").unwrap();
    assert!(analysis.matches.is_empty());
}

#[test]
fn empty_condition_rule_rejected_at_construction() {
    assert!(RuleSet::new(vec![Rule::new("vacuous", LogicalOp::And)]).is_err());
}

#[test]
fn invalid_url_produces_no_result() {
    let rules = [utm_rule(LogicalOp::Or)];
    assert!(matches!(
        analyze(&rules, "https://", ""),
        Err(AnalysisError::InvalidUrl(_))
    ));
}

#[test]
fn every_rule_is_evaluated() {
    let ruleset = RuleSetBuilder::new()
        .rule("paid", |r| r.when(param("utm_medium").equals("cpc")))
        .rule("unrelated", |r| r.when(param("fbclid").exists()))
        .rule("google", |r| r.when(param("utm_source").equals("google")))
        .rule("direct", |r| r.when(referral().not_present()))
        .compile()
        .unwrap();

    let analysis = ruleset
        .analyze("x.com/?utm_source=google&utm_medium=cpc", "")
        .unwrap();
    let indices: Vec<usize> = analysis.matches.iter().map(|m| m.rule_index).collect();
    assert_eq!(indices, vec![0, 2, 3]);
}

#[test]
fn normalized_url_is_stable() {
    let once = normalize_url("Example.com/?utm_source=Google&b=1").unwrap();
    assert_eq!(once, "https://example.com/?b=1&utm_source=google");
    assert_eq!(normalize_url(&once).unwrap(), once);
}

#[test]
fn unicode_values_lowercase() {
    let params = extract_parameters("x.com/?city=M%C3%9CNCHEN").unwrap();
    assert_eq!(params.get("city"), Some("münchen"));
}

#[test]
fn fragment_does_not_leak_into_parameters() {
    let params = extract_parameters("x.com/?a=1#b=2").unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params.get("a"), Some("1"));
}

#[test]
fn scheme_less_url_with_nested_url_value_analyzes() {
    let ruleset = RuleSetBuilder::new()
        .rule("Google", |r| {
            r.when(param("utm_source").equals("google"))
                .output(Output::new("paid", "Google", "cpc"))
        })
        .compile()
        .unwrap();

    let analysis = ruleset
        .analyze("example.com/?utm_source=google&ref=http://a.com", "")
        .unwrap();
    assert_eq!(analysis.matched_names(), vec!["Google"]);
    assert_eq!(analysis.parameters.get("ref"), Some("http://a.com"));
}
