//! GPU type name normalization.
//!
//! Requests may name a GPU by its full catalog name ("NVIDIA T4") or a bare
//! short form ("T4"). Matching is case-insensitive after expanding short
//! forms through the synonym table.

/// Short form → canonical full name.
const SYNONYMS: &[(&str, &str)] = &[
    ("t4", "nvidia t4"),
    ("v100", "nvidia v100"),
    ("a100", "nvidia a100"),
    ("l4", "nvidia l4"),
    ("l40s", "nvidia l40s"),
    ("k80", "nvidia k80"),
    ("p100", "nvidia p100"),
    ("v520", "amd radeon pro v520"),
    ("radeon pro v520", "amd radeon pro v520"),
];

/// Normalize a GPU type name to its canonical lowercase form.
pub fn canonical_gpu_type(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    for (short, full) in SYNONYMS {
        if lowered == *short {
            return (*full).to_string();
        }
    }
    lowered
}

/// Whether a requested GPU type matches a catalog entry's GPU type.
pub fn gpu_types_match(requested: &str, catalog_type: &str) -> bool {
    canonical_gpu_type(requested) == canonical_gpu_type(catalog_type)
}
