//! Deterministic error classification over a winning assignment (§4.5).

use std::collections::BTreeMap;

use crate::config::MatchConfig;
use crate::types::{Assignment, ErrorRecord, StrokeFeatures};

/// Run all five classification passes over `assignment` and return the
/// resulting error records, in pass order.
pub fn classify(
    assignment: &Assignment,
    written: &[StrokeFeatures],
    reference: &[StrokeFeatures],
    config: &MatchConfig,
) -> Vec<ErrorRecord> {
    let mut errors = Vec::new();

    // Pass 1: concatenated/redundant. Reserved — no sub-stroke feature available.

    broken_and_extra(assignment, &mut errors);
    missing(assignment, reference.len(), &mut errors);
    orientation(assignment, written, reference, config.angle_threshold, &mut errors);
    order(assignment, &mut errors);

    errors
}

/// Pass 2: group written indices by reference index and disambiguate surplus
/// mappings into EXTRA or BROKEN records.
fn broken_and_extra(assignment: &Assignment, errors: &mut Vec<ErrorRecord>) {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (written_idx, &ref_gene) in assignment.iter().enumerate() {
        groups.entry(ref_gene).or_default().push(written_idx);
    }

    if let Some(extras) = groups.get(&0)
        && !extras.is_empty()
    {
        errors.push(ErrorRecord::Extra {
            description: format!("extra strokes: {extras:?} (no reference match)"),
            written_indices: extras.clone(),
            reference_index: None,
        });
    }

    let distinct_matched_refs = groups.keys().filter(|&&k| k > 0).count();

    for (&ref_gene, written_indices) in &groups {
        if ref_gene == 0 || written_indices.len() <= 1 {
            continue;
        }

        if written_indices.len() > distinct_matched_refs {
            let surplus = written_indices[1..].to_vec();
            errors.push(ErrorRecord::Extra {
                description: format!(
                    "extra stroke(s): {surplus:?} (duplicate mapping to reference {})",
                    ref_gene - 1
                ),
                written_indices: surplus,
                reference_index: Some(ref_gene - 1),
            });
        } else {
            errors.push(ErrorRecord::Broken {
                description: format!(
                    "broken stroke: written {written_indices:?} all map to reference {}",
                    ref_gene - 1
                ),
                written_indices: written_indices.clone(),
                reference_index: ref_gene - 1,
            });
        }
    }
}

/// Pass 3: every reference index with no written stroke mapped to it is missing.
fn missing(assignment: &Assignment, reference_len: usize, errors: &mut Vec<ErrorRecord>) {
    let matched: std::collections::HashSet<usize> = assignment
        .iter()
        .filter(|&&gene| gene > 0)
        .map(|&gene| gene - 1)
        .collect();

    for ref_idx in 0..reference_len {
        if !matched.contains(&ref_idx) {
            errors.push(ErrorRecord::Missing {
                description: format!("missing stroke: reference stroke {ref_idx} not written"),
                reference_index: ref_idx,
            });
        }
    }
}

/// Pass 4: flag matched strokes whose chord angle differs from the
/// reference's by more than `angle_threshold`.
fn orientation(
    assignment: &Assignment,
    written: &[StrokeFeatures],
    reference: &[StrokeFeatures],
    angle_threshold: f64,
    errors: &mut Vec<ErrorRecord>,
) {
    for (written_idx, &ref_gene) in assignment.iter().enumerate() {
        if ref_gene == 0 || ref_gene > reference.len() {
            continue;
        }
        let ref_idx = ref_gene - 1;
        let w = &written[written_idx];
        let r = &reference[ref_idx];

        let mut angle_diff = (w.angle - r.angle).abs();
        if angle_diff > std::f64::consts::PI {
            angle_diff = 2.0 * std::f64::consts::PI - angle_diff;
        }

        if angle_diff > angle_threshold {
            errors.push(ErrorRecord::Orientation {
                description: format!(
                    "orientation error: written stroke {written_idx} vs reference {ref_idx}"
                ),
                written_index: written_idx,
                reference_index: ref_idx,
                angle_diff_degrees: angle_diff.to_degrees(),
            });
        }
    }
}

/// Pass 5: flag matched strokes whose position in the written sequence does
/// not match their reference index (1-indexed gene equals `written_idx + 1`).
fn order(assignment: &Assignment, errors: &mut Vec<ErrorRecord>) {
    for (written_idx, &ref_gene) in assignment.iter().enumerate() {
        if ref_gene == 0 {
            continue;
        }
        let expected_gene = written_idx + 1;
        if ref_gene != expected_gene {
            errors.push(ErrorRecord::Order {
                description: format!(
                    "order error: written stroke {written_idx} should be at position {} (maps to reference {})",
                    ref_gene - 1,
                    ref_gene - 1
                ),
                written_index: written_idx,
                reference_index: ref_gene - 1,
                expected_position: ref_gene - 1,
            });
        }
    }
}
