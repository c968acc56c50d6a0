//! Trace extraction: partition table rows per particle and shape the data
//! the report embeds.

use crate::Result;
use crate::errors::TraceError;
use crate::log::{Row, Table};
use serde::Serialize;
use std::collections::BTreeSet;

/// Column the grouping keys on.
pub const PARTICLE_ID: &str = "particle_id";

/// Trace columns the two panels draw.
const X_POS: &str = "x_pos";
const Y_POS: &str = "y_pos";
const X_MOMENTA: &str = "x_momenta";
const Y_MOMENTA: &str = "y_momenta";

/// One particle's traces, in row (temporal) order.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleTraceView {
    pub id: f64,
    pub samples: usize,
    pub position: Vec<[f64; 2]>,
    pub momenta: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub rows: usize,
    pub columns: usize,
    pub particles: usize,
    /// Time covered by the log, from the recovered line timestamps.
    /// None when no record carried one.
    pub elapsed_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    /// First-appearance order; the renderer draws in this order.
    pub particles: Vec<ParticleTraceView>,
    pub totals: TotalsView,
}

/// Distinct particle identifiers in first-appearance order.
///
/// The order is deliberately not sorted: it matches the order particles
/// first show up in the log, which is reproducible across runs of the same
/// input. Identifier equality is exact (bit-level); all occurrences of one
/// id come from identical source tokens.
///
/// An empty-schema table (no data records at all) yields an empty sequence;
/// a real schema without a particle_id column is an error.
pub fn particle_ids(table: &Table) -> Result<Vec<f64>> {
    if table.schema().is_empty() {
        return Ok(Vec::new());
    }

    let mut seen: BTreeSet<u64> = BTreeSet::new();
    let mut out = Vec::new();
    for id in table.column(PARTICLE_ID)? {
        if seen.insert(id.to_bits()) {
            out.push(id);
        }
    }
    Ok(out)
}

/// Rows belonging to one particle, in original row order.
pub fn group_rows<'a>(table: &'a Table, id: f64) -> Result<Vec<&'a Row>> {
    let idx = table
        .schema()
        .index_of(PARTICLE_ID)
        .ok_or_else(|| TraceError::missing_column(PARTICLE_ID))?;

    Ok(table
        .rows()
        .iter()
        .filter(|row| row.values[idx].to_bits() == id.to_bits())
        .collect())
}

/// Build the per-particle position/momenta series plus run totals.
pub fn build_report_data(table: &Table) -> Result<ReportData> {
    if table.schema().is_empty() {
        return Ok(ReportData {
            particles: Vec::new(),
            totals: TotalsView {
                rows: 0,
                columns: 0,
                particles: 0,
                elapsed_seconds: None,
            },
        });
    }

    let schema = table.schema();
    let col = |name: &str| {
        schema
            .index_of(name)
            .ok_or_else(|| TraceError::missing_column(name))
    };
    let x_pos = col(X_POS)?;
    let y_pos = col(Y_POS)?;
    let x_mom = col(X_MOMENTA)?;
    let y_mom = col(Y_MOMENTA)?;

    let mut particles = Vec::new();
    for id in particle_ids(table)? {
        let rows = group_rows(table, id)?;

        let position: Vec<[f64; 2]> = rows
            .iter()
            .map(|r| [r.values[x_pos], r.values[y_pos]])
            .collect();
        let momenta: Vec<[f64; 2]> = rows
            .iter()
            .map(|r| [r.values[x_mom], r.values[y_mom]])
            .collect();

        if rows.len() == 1 {
            eprintln!(
                "WARN: particle {} has a single sample; its trace has no visible segment",
                id
            );
        }

        particles.push(ParticleTraceView {
            id,
            samples: rows.len(),
            position,
            momenta,
        });
    }

    let mut span: Option<(f64, f64)> = None;
    for row in table.rows() {
        if let Some(t) = row.elapsed_seconds {
            span = Some(match span {
                None => (t, t),
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
            });
        }
    }

    Ok(ReportData {
        totals: TotalsView {
            rows: table.row_count(),
            columns: schema.len(),
            particles: particles.len(),
            elapsed_seconds: span.map(|(lo, hi)| hi - lo),
        },
        particles,
    })
}
