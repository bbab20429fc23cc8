//! Batch solving of many battles.
//!
//! Reads scenarios as JSON lines (`{"own": "...", "enemy": "..."}`), solves
//! each one independently, and writes one JSON report per scenario in input
//! order. Scenarios are spread across a rayon thread pool when more than one
//! thread is configured; each individual search stays single-threaded.

use std::io::{BufRead, Write};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::army::roster::Side;
use crate::protocol::report::Report;
use crate::protocol::roster::{parse_roster_with, UnknownTypePolicy};
use crate::search::search;

/// Errors that abort a batch run. Bad scenarios do not; they are reported
/// per line with status `invalid`.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of worker threads. 1 solves scenarios sequentially.
    pub threads: usize,
    /// How unknown unit type names are parsed.
    pub unknown_types: UnknownTypePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            threads: 4,
            unknown_types: UnknownTypePolicy::Reject,
        }
    }
}

/// One input scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub own: String,
    pub enemy: String,
}

/// One output line: the scenario's position in the input and its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRecord {
    pub index: usize,
    #[serde(flatten)]
    pub report: Report,
}

/// Counts of each report status in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub wins: usize,
    pub no_solution: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[BatchRecord]) -> Self {
        let mut summary = BatchSummary::default();
        for record in records {
            match record.report {
                Report::Win { .. } => summary.wins += 1,
                Report::NoSolution { .. } => summary.no_solution += 1,
                Report::Invalid { .. } => summary.invalid += 1,
            }
        }
        summary
    }
}

/// Solves one scenario line. Never fails: undecodable bytes, malformed JSON
/// and bad rosters become `invalid` reports.
pub fn solve_line(index: usize, line: &[u8], policy: UnknownTypePolicy) -> BatchRecord {
    let report = match std::str::from_utf8(line) {
        Ok(text) => match serde_json::from_str::<Scenario>(text) {
            Ok(scenario) => solve_scenario(&scenario, policy),
            Err(e) => Report::Invalid {
                side: "input",
                error: e.to_string(),
            },
        },
        Err(e) => Report::Invalid {
            side: "input",
            error: format!("line is not valid UTF-8: {e}"),
        },
    };
    debug!(index, "scenario solved");
    BatchRecord { index, report }
}

/// Parses both rosters and runs the search.
pub fn solve_scenario(scenario: &Scenario, policy: UnknownTypePolicy) -> Report {
    let own = match parse_roster_with(&scenario.own, policy) {
        Ok(r) => r,
        Err(e) => return Report::invalid(Side::Own, e),
    };
    let enemy = match parse_roster_with(&scenario.enemy, policy) {
        Ok(r) => r,
        Err(e) => return Report::invalid(Side::Enemy, e),
    };
    Report::from_outcome(&search(&own, &enemy))
}

/// Reads non-blank input lines as raw bytes, without a trailing `\r`.
///
/// Lines are not decoded here, so a line that is not UTF-8 is reported on its
/// own by [`solve_line`] instead of aborting the run.
pub fn read_lines<R: BufRead>(input: R) -> Result<Vec<Vec<u8>>, BatchError> {
    let mut lines = Vec::new();
    for line in input.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if !line.iter().all(u8::is_ascii_whitespace) {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Solves every line, returning records in input order.
pub fn run_batch<L>(config: &BatchConfig, lines: &[L]) -> Result<Vec<BatchRecord>, BatchError>
where
    L: AsRef<[u8]> + Sync,
{
    let policy = config.unknown_types;
    if config.threads <= 1 {
        return Ok(lines
            .iter()
            .enumerate()
            .map(|(i, line)| solve_line(i, line.as_ref(), policy))
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    Ok(pool.install(|| {
        lines
            .par_iter()
            .enumerate()
            .map(|(i, line)| solve_line(i, line.as_ref(), policy))
            .collect()
    }))
}

/// Writes records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[BatchRecord], out: &mut W) -> Result<(), BatchError> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIN_LINE: &str = r#"{"own": "Spearmen#10;Militia#30;FootArcher#20;LightCavalry#1000;HeavyCavalry#120", "enemy": "Militia#10;Spearmen#10;FootArcher#1000;LightCavalry#120;CavalryArcher#100"}"#;
    const NONE_LINE: &str = r#"{"own": "Militia#1;Militia#1;Militia#1;Militia#1;Militia#1", "enemy": "Militia#5;Militia#5;Militia#5;Militia#5;Militia#5"}"#;
    const BAD_ENEMY_LINE: &str = r#"{"own": "Militia#1;Militia#1;Militia#1;Militia#1;Militia#1", "enemy": "Militia#10;Spearmen#10"}"#;

    fn sample_lines() -> Vec<String> {
        vec![
            WIN_LINE.to_string(),
            NONE_LINE.to_string(),
            BAD_ENEMY_LINE.to_string(),
            "not json".to_string(),
        ]
    }

    #[test]
    fn solve_line_statuses() {
        let policy = UnknownTypePolicy::Reject;
        assert!(matches!(
            solve_line(0, WIN_LINE.as_bytes(), policy).report,
            Report::Win { .. }
        ));
        assert!(matches!(
            solve_line(1, NONE_LINE.as_bytes(), policy).report,
            Report::NoSolution { .. }
        ));
        assert_eq!(
            solve_line(2, BAD_ENEMY_LINE.as_bytes(), policy).report,
            Report::Invalid {
                side: "enemy",
                error: "expected 5 unit groups, got 2".to_string(),
            }
        );
        assert!(matches!(
            solve_line(3, b"not json", policy).report,
            Report::Invalid { side: "input", .. }
        ));
    }

    #[test]
    fn own_roster_is_checked_first() {
        let scenario = Scenario {
            own: "bad".to_string(),
            enemy: "also bad".to_string(),
        };
        assert!(matches!(
            solve_scenario(&scenario, UnknownTypePolicy::Reject),
            Report::Invalid { side: "own", .. }
        ));
    }

    #[test]
    fn parallel_and_sequential_agree_and_keep_order() {
        let lines: Vec<String> = sample_lines().into_iter().cycle().take(40).collect();
        let sequential = run_batch(
            &BatchConfig {
                threads: 1,
                ..BatchConfig::default()
            },
            &lines,
        )
        .unwrap();
        let parallel = run_batch(&BatchConfig::default(), &lines).unwrap();

        assert_eq!(sequential, parallel);
        for (i, record) in parallel.iter().enumerate() {
            assert_eq!(record.index, i);
        }
    }

    #[test]
    fn summary_counts_statuses() {
        let records = run_batch(&BatchConfig::default(), &sample_lines()).unwrap();
        assert_eq!(
            BatchSummary::from_records(&records),
            BatchSummary {
                wins: 1,
                no_solution: 1,
                invalid: 2,
            }
        );
    }

    #[test]
    fn read_lines_skips_blank_lines() {
        let input = format!("{}\r\n\n   \n{}", WIN_LINE, NONE_LINE);
        let lines = read_lines(input.as_bytes()).unwrap();
        assert_eq!(
            lines,
            vec![WIN_LINE.as_bytes().to_vec(), NONE_LINE.as_bytes().to_vec()]
        );
    }

    #[test]
    fn non_utf8_line_is_reported_in_place() {
        let mut input = Vec::new();
        input.extend_from_slice(WIN_LINE.as_bytes());
        input.extend_from_slice(b"\n\xff\xfe garbage\n");
        input.extend_from_slice(NONE_LINE.as_bytes());
        input.push(b'\n');

        let lines = read_lines(&input[..]).unwrap();
        assert_eq!(lines.len(), 3);

        let records = run_batch(&BatchConfig::default(), &lines).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(matches!(records[0].report, Report::Win { .. }));
        match &records[1].report {
            Report::Invalid { side, error } => {
                assert_eq!(*side, "input");
                assert!(error.contains("UTF-8"), "{error}");
            }
            other => panic!("expected invalid report, got {other:?}"),
        }
        assert!(matches!(records[2].report, Report::NoSolution { .. }));
    }

    #[test]
    fn write_jsonl_flattens_report() {
        let records = run_batch(&BatchConfig::default(), &sample_lines()).unwrap();
        let mut out = Vec::new();
        write_jsonl(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let values: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(values.len(), 4);
        assert_eq!(values[0]["index"], 0);
        assert_eq!(values[0]["status"], "win");
        assert_eq!(values[0]["rounds"].as_array().unwrap().len(), 5);
        assert_eq!(values[1]["status"], "nosolution");
        assert_eq!(values[2]["status"], "invalid");
        assert_eq!(values[2]["side"], "enemy");
        assert_eq!(values[3]["side"], "input");
    }

    #[test]
    fn neutral_policy_accepts_unknown_types() {
        let scenario = Scenario {
            own: "Catapult#50;Militia#1;Militia#1;Militia#50;Militia#50".to_string(),
            enemy: "Militia#5;Militia#5;Militia#5;Militia#5;Militia#5".to_string(),
        };
        assert!(matches!(
            solve_scenario(&scenario, UnknownTypePolicy::Reject),
            Report::Invalid { side: "own", .. }
        ));
        assert!(matches!(
            solve_scenario(&scenario, UnknownTypePolicy::Neutral),
            Report::Win { .. }
        ));
    }
}
