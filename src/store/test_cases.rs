use tracing::{debug, warn};

use crate::extract::parse_url;
use crate::{EngineConfig, TestCase};

const URL_HEADERS: &[&str] = &["url", "link", "website"];
const REFERRAL_HEADERS: &[&str] = &["source", "referral", "referrer", "ref"];

/// Test cases read from a two-column table, plus the number of rows dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCaseImport {
    pub cases: Vec<TestCase>,
    /// Rows whose URL could not be parsed.
    pub skipped: usize,
    /// Whether the first row was recognized as a header and not imported.
    pub header: bool,
}

/// Turn already tokenized table rows into test cases.
///
/// The first row is treated as a header when one of its cells names a URL
/// column (`url`, `link`, `website`) or a referral column (`source`,
/// `referral`, `referrer`, `ref`) and does not itself look like a URL.
/// Otherwise every row is data and columns 0 and 1 are used. Blank referrals
/// become `config.direct_referral`. Rows with an unparsable URL are dropped
/// and counted; completely blank rows are ignored.
pub fn import_test_cases<R, C>(rows: &[R], config: &EngineConfig) -> TestCaseImport
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let Some(first) = rows.first() else {
        return TestCaseImport::default();
    };

    let (columns, header) = match detect_columns(first.as_ref()) {
        Some(columns) => (columns, true),
        None => ((0, 1), false),
    };
    let (url_col, referral_col) = columns;
    let data = if header { &rows[1..] } else { rows };

    let mut import = TestCaseImport {
        header,
        ..TestCaseImport::default()
    };

    for (line, row) in data.iter().enumerate() {
        let row = row.as_ref();
        if row.iter().all(|cell| cell.as_ref().trim().is_empty()) {
            continue;
        }

        let url = cell(row, url_col);
        if let Err(err) = parse_url(url, &config.default_scheme) {
            warn!(line, error = %err, "skipping test case with unparsable url");
            import.skipped += 1;
            continue;
        }

        let referral = cell(row, referral_col);
        let referral = if referral.is_empty() {
            config.direct_referral.clone()
        } else {
            referral.to_owned()
        };
        import.cases.push(TestCase::new(url, referral));
    }

    debug!(
        cases = import.cases.len(),
        skipped = import.skipped,
        header,
        "imported test cases"
    );
    import
}

fn cell<C: AsRef<str>>(row: &[C], index: usize) -> &str {
    row.get(index).map_or("", |c| c.as_ref().trim())
}

/// Column indices `(url, referral)` when `row` looks like a header.
fn detect_columns<C: AsRef<str>>(row: &[C]) -> Option<(usize, usize)> {
    // Cells that look like URLs or hostnames are data, whatever words they contain.
    let names: Vec<String> = row
        .iter()
        .map(|c| c.as_ref().trim().to_lowercase())
        .map(|n| if n.contains(['/', '.', '?']) { String::new() } else { n })
        .collect();

    let url_idx = names
        .iter()
        .position(|n| URL_HEADERS.iter().any(|k| n.contains(k)));
    let referral_idx = names
        .iter()
        .enumerate()
        .position(|(i, n)| Some(i) != url_idx && REFERRAL_HEADERS.iter().any(|k| n.contains(k)));

    match (url_idx, referral_idx) {
        (None, None) => None,
        (Some(u), Some(r)) => Some((u, r)),
        (Some(u), None) => Some((u, if u == 1 { 0 } else { 1 })),
        (None, Some(r)) => Some((if r == 0 { 1 } else { 0 }, r)),
    }
}
