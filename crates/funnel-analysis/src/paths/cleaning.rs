//! Jump-order filter: drops records that skip a funnel stage.

use funnel_core::config::CleaningConfig;
use funnel_core::Record;

/// Drop records where a stage at index `k >= jump_check_from` is present but
/// stage `k - 1` is not. Returns the kept records and the dropped count.
pub fn drop_jump_orders(records: Vec<Record>, config: &CleaningConfig) -> (Vec<Record>, usize) {
    if !config.drop_jump_orders {
        return (records, 0);
    }

    let total = records.len();
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|r| !is_jump(r, config.jump_check_from))
        .collect();
    let dropped = total - kept.len();

    if dropped > 0 {
        tracing::info!(dropped, kept = kept.len(), "removed jump orders");
    }
    (kept, dropped)
}

fn is_jump(record: &Record, check_from: usize) -> bool {
    record
        .stages
        .windows(2)
        .enumerate()
        .any(|(i, pair)| i + 1 >= check_from && pair[1].is_some() && pair[0].is_none())
}
