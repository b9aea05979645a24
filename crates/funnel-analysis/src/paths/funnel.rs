//! Stage-by-stage funnel counts and a missing-value report.

use serde::{Deserialize, Serialize};

use funnel_core::config::PathConfig;
use funnel_core::Record;

/// Count for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCount {
    pub stage: String,
    pub reached: usize,
    pub missing: usize,
    /// `reached` relative to the first stage; 0.0 when nobody reached it.
    pub rate_from_first: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunnelSummary {
    pub total_records: usize,
    pub stages: Vec<StageCount>,
}

impl FunnelSummary {
    pub fn from_records(records: &[Record], config: &PathConfig) -> Self {
        let mut reached = vec![0usize; config.stages.len()];
        for record in records {
            for (slot, present) in reached.iter_mut().zip(record.presence()) {
                if present {
                    *slot += 1;
                }
            }
        }

        let first = reached.first().copied().unwrap_or(0);
        let stages = config
            .stages
            .iter()
            .zip(&reached)
            .map(|(stage, &count)| StageCount {
                stage: stage.label.clone(),
                reached: count,
                missing: records.len() - count,
                rate_from_first: if first > 0 {
                    count as f64 / first as f64
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            total_records: records.len(),
            stages,
        }
    }
}
