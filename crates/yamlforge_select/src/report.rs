//! Human-readable cost comparison.
//!
//! Line-oriented output for the CLI's analyze path: one candidate per
//! line, ranked, with the winner marked. This text is for people, not for
//! machine parsing. Costs are rounded to 4 decimal places here and only
//! here.

use crate::engine::SelectionResult;

/// Render the ranked comparison for one resolved instance.
pub fn render_comparison(instance: &str, result: &SelectionResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Cost comparison for '{}' ({} candidate{}):\n",
        instance,
        result.ranked_candidates.len(),
        if result.ranked_candidates.len() == 1 { "" } else { "s" }
    ));

    for (rank, candidate) in result.ranked_candidates.iter().enumerate() {
        let marker = if rank == 0 { "->" } else { "  " };
        let mut line = format!(
            "{} {:<12} {:<28} ${:.4}/hr",
            marker,
            candidate.provider().as_str(),
            candidate.flavor.native_type_id,
            candidate.adjusted_hourly_cost,
        );
        if candidate.adjusted_hourly_cost != candidate.flavor.base_hourly_cost {
            line.push_str(&format!(" (base ${:.4}", candidate.flavor.base_hourly_cost));
            if candidate.discount_pct > 0.0 {
                line.push_str(&format!(", {}% discount", candidate.discount_pct));
            }
            line.push(')');
        }
        if rank == 0 {
            line.push_str("  selected");
        }
        out.push_str(&line);
        out.push('\n');
    }

    if !result.excluded_providers.is_empty() {
        out.push_str("Excluded providers:\n");
        for (provider, reason) in &result.excluded_providers {
            out.push_str(&format!("   {:<12} {}\n", provider.as_str(), reason));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::AdjustedCandidate;
    use crate::eligibility::ExclusionReason;
    use std::collections::BTreeMap;
    use yamlforge_catalog::FlavorOption;
    use yamlforge_spec::Provider;

    fn candidate(provider: Provider, native: &str, base: f64, adjusted: f64) -> AdjustedCandidate {
        AdjustedCandidate {
            flavor: FlavorOption {
                provider,
                size_tier: "medium".to_string(),
                native_type_id: native.to_string(),
                vcpus: 2,
                memory_gb: 4.0,
                gpu_count: 0,
                gpu_type: None,
                base_hourly_cost: base,
                cost_factor: 1.0,
            },
            discount_pct: if base != adjusted { 25.0 } else { 0.0 },
            region_cost_factor: 1.0,
            provider_cost_factor: 1.0,
            adjusted_hourly_cost: adjusted,
        }
    }

    #[test]
    fn test_render_marks_winner_and_excludes() {
        let winner = candidate(Provider::Aws, "t3.medium", 0.0416, 0.0312);
        let result = SelectionResult {
            winner: winner.clone(),
            ranked_candidates: vec![
                winner,
                candidate(Provider::Gcp, "e2-medium", 0.0335, 0.0335),
            ],
            excluded_providers: BTreeMap::from([(
                Provider::Vmware,
                ExclusionReason::GloballyExcluded,
            )]),
        };

        let text = render_comparison("web-1", &result);

        assert!(text.contains("Cost comparison for 'web-1' (2 candidates):"));
        assert!(text.contains("-> aws"));
        assert!(text.contains("$0.0312/hr"));
        assert!(text.contains("25% discount"));
        assert!(text.contains("selected"));
        assert!(text.contains("vmware"));
        assert!(text.contains("globally excluded"));
    }
}
