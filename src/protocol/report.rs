//! Search reports.
//!
//! Renders a search outcome, or a rejected roster, either as PBI text lines
//! or as a JSON document. The JSON shape is shared with the batch runner.

use std::io::{self, Write};

use serde::Serialize;

use crate::army::roster::Side;
use crate::search::arrangement::{Order, SearchOutcome, SearchStats};

/// How the engine writes battle reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `bestarrangement` / `round` / `nosolution` / `invalid` lines.
    #[default]
    Text,
    /// A single `result <json>` line.
    Json,
}

impl OutputFormat {
    pub const fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// One round of a winning arrangement, with groups in roster encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: usize,
    pub own: String,
    pub enemy: String,
    pub outcome: &'static str,
}

/// The caller-facing outcome of one battle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    Win {
        arrangement: String,
        order: Order,
        wins: usize,
        draws: usize,
        losses: usize,
        rounds: Vec<RoundReport>,
        stats: SearchStats,
    },
    #[serde(rename = "nosolution")]
    NoSolution { stats: SearchStats },
    Invalid { side: &'static str, error: String },
}

impl Report {
    /// Builds a report from a finished search.
    pub fn from_outcome(outcome: &SearchOutcome) -> Report {
        match &outcome.result {
            Some(result) => Report::Win {
                arrangement: result.arrangement.to_string(),
                order: result.order,
                wins: result.wins(),
                draws: result.draws(),
                losses: result.losses(),
                rounds: result
                    .rounds
                    .iter()
                    .enumerate()
                    .map(|(i, r)| RoundReport {
                        round: i + 1,
                        own: r.own.to_string(),
                        enemy: r.enemy.to_string(),
                        outcome: r.outcome.name(),
                    })
                    .collect(),
                stats: outcome.stats,
            },
            None => Report::NoSolution {
                stats: outcome.stats,
            },
        }
    }

    /// Builds a report for a roster that could not be used.
    pub fn invalid(side: Side, error: impl ToString) -> Report {
        Report::Invalid {
            side: side.name(),
            error: error.to_string(),
        }
    }

    /// Writes the report as PBI text lines.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Report::Win {
                arrangement,
                rounds,
                stats,
                ..
            } => {
                write_info(stats, out)?;
                writeln!(out, "bestarrangement {}", arrangement)?;
                for r in rounds {
                    writeln!(out, "round {} {} {} {}", r.round, r.own, r.enemy, r.outcome)?;
                }
            }
            Report::NoSolution { stats } => {
                write_info(stats, out)?;
                writeln!(out, "nosolution")?;
            }
            Report::Invalid { side, error } => {
                writeln!(out, "invalid {} {}", side, error)?;
            }
        }
        Ok(())
    }

    /// Writes the report as a single `result <json>` line.
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "result {}", json)
    }

    /// Writes the report in the given format and flushes.
    pub fn write<W: Write>(&self, format: OutputFormat, out: &mut W) -> io::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(out)?,
            OutputFormat::Json => self.write_json(out)?,
        }
        out.flush()
    }
}

fn write_info<W: Write>(stats: &SearchStats, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "info candidates {} resolutions {}",
        stats.candidates, stats.resolutions
    )
}
