// CandidateScorer - unified release selection logic
//
// Ranks the candidates fetched for one item by user preferences:
// - Resolution tier detected from the release title (ultra > standard > basic)
// - Flat bonuses for localized subtitles and uncut releases
// - File-size sweet spot (moderate multi-gigabyte sizes beat both extremes)
//
// Tier markers, bonuses, and size bands are configuration data, not control
// flow; the defaults reflect the labels the supported catalogs produce.

use super::models::{Candidate, Preferences};

const GIB: u64 = 1024 * 1024 * 1024;

/// One resolution tier: ordered marker substrings and the bonus they earn
#[derive(Debug, Clone)]
pub struct ResolutionTier {
    /// Lowercase substrings matched against the release title
    pub markers: Vec<String>,
    pub bonus: i64,
}

/// One file-size band: [min_bytes, max_bytes) and the bonus it earns
#[derive(Debug, Clone)]
pub struct SizeBand {
    pub min_bytes: u64,
    pub max_bytes: u64,
    pub bonus: i64,
}

/// Heuristic tables driving the score
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Scanned in order; the first tier with a marker hit wins
    pub resolution_tiers: Vec<ResolutionTier>,
    /// Flat bonus for a localized-subtitle release
    pub subtitle_bonus: i64,
    /// Flat bonus for an uncut release
    pub uncut_bonus: i64,
    /// Scanned in order; the first band containing the size wins
    pub size_bands: Vec<SizeBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            resolution_tiers: vec![
                ResolutionTier {
                    markers: vec!["2160".into(), "4k".into(), "uhd".into()],
                    bonus: 40,
                },
                ResolutionTier {
                    markers: vec!["1080".into(), "fhd".into()],
                    bonus: 30,
                },
                ResolutionTier {
                    markers: vec!["720".into(), "hd".into()],
                    bonus: 15,
                },
            ],
            subtitle_bonus: 20,
            uncut_bonus: 20,
            size_bands: vec![
                // Sweet spot
                SizeBand {
                    min_bytes: 2 * GIB,
                    max_bytes: 8 * GIB,
                    bonus: 20,
                },
                // Shoulders
                SizeBand {
                    min_bytes: GIB,
                    max_bytes: 2 * GIB,
                    bonus: 10,
                },
                SizeBand {
                    min_bytes: 8 * GIB,
                    max_bytes: 12 * GIB,
                    bonus: 10,
                },
            ],
        }
    }
}

/// Scores release candidates and picks the best one.
///
/// Pure and deterministic: identical (candidates, preferences) always yield
/// the identical selection.
#[derive(Debug, Clone, Default)]
pub struct CandidateScorer {
    config: ScoringConfig,
}

impl CandidateScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Sum of independent weighted contributions for one candidate
    pub fn score(&self, candidate: &Candidate, prefs: &Preferences) -> i64 {
        let mut score = 0;
        let title = candidate.title.to_lowercase();

        if prefs.prefer_high_def {
            let tier = self
                .config
                .resolution_tiers
                .iter()
                .find(|t| t.markers.iter().any(|m| title.contains(m.as_str())));

            match tier {
                Some(t) => score += t.bonus,
                // Flagged high-def but no marker in the title: basic tier
                None if candidate.flags.high_def => {
                    score += self.config.resolution_tiers.last().map_or(0, |t| t.bonus);
                }
                None => {}
            }
        }

        if prefs.prefer_localized_subs && candidate.flags.localized_subs {
            score += self.config.subtitle_bonus;
        }

        if prefs.prefer_uncut && candidate.flags.uncut {
            score += self.config.uncut_bonus;
        }

        if let Some(bytes) = candidate.size_bytes() {
            let band = self
                .config
                .size_bands
                .iter()
                .find(|b| bytes >= b.min_bytes && bytes < b.max_bytes);
            if let Some(b) = band {
                score += b.bonus;
            }
        }

        score
    }

    /// Pick the best candidate, or None when the list is empty.
    ///
    /// With auto-selection disabled the first candidate is used
    /// unconditionally. Otherwise a single forward scan keeps the running
    /// best; only a strictly greater score replaces it, so the first
    /// candidate at the maximum wins and input order is never disturbed.
    pub fn select_best<'a>(
        &self,
        candidates: &'a [Candidate],
        prefs: &Preferences,
    ) -> Option<&'a Candidate> {
        if !prefs.auto_select_best {
            return candidates.first();
        }

        let mut best: Option<(&Candidate, i64)> = None;
        for candidate in candidates {
            let score = self.score(candidate, prefs);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }

        best.map(|(candidate, _)| candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candidate(title: &str, size: &str) -> Candidate {
        Candidate::from_label(title, Some(size.to_string()))
    }

    fn all_on() -> Preferences {
        Preferences {
            auto_select_best: true,
            prefer_high_def: true,
            prefer_localized_subs: true,
            prefer_uncut: true,
        }
    }

    #[test]
    fn test_empty_input_selects_nothing() {
        let scorer = CandidateScorer::new();
        assert!(scorer.select_best(&[], &all_on()).is_none());
        assert!(scorer
            .select_best(
                &[],
                &Preferences {
                    auto_select_best: false,
                    ..all_on()
                }
            )
            .is_none());
    }

    #[test]
    fn test_auto_select_disabled_takes_first() {
        let scorer = CandidateScorer::new();
        let candidates = vec![
            make_candidate("Tiny-480p", "300MB"),
            make_candidate("Big-2160p-中文", "6GB"),
        ];
        let prefs = Preferences {
            auto_select_best: false,
            ..all_on()
        };

        let selected = scorer.select_best(&candidates, &prefs).expect("non-empty");
        assert_eq!(selected.title, "Tiny-480p");
    }

    #[test]
    fn test_hd_and_subs_beat_basic_tier() {
        let scorer = CandidateScorer::new();
        let candidates = vec![
            make_candidate("A-720p", "1.5GB"),
            make_candidate("B-1080p-中文", "4GB"),
        ];
        let prefs = Preferences {
            auto_select_best: true,
            prefer_high_def: true,
            prefer_localized_subs: true,
            prefer_uncut: false,
        };

        let selected = scorer.select_best(&candidates, &prefs).expect("non-empty");
        assert_eq!(selected.title, "B-1080p-中文");
    }

    #[test]
    fn test_selected_score_is_maximal() {
        let scorer = CandidateScorer::new();
        let prefs = all_on();
        let candidates = vec![
            make_candidate("A-480p", "600MB"),
            make_candidate("B-1080p", "4GB"),
            make_candidate("C-2160p-中文-Uncensored", "20GB"),
            make_candidate("D-720p-中字", "2.5GB"),
        ];

        let selected = scorer.select_best(&candidates, &prefs).expect("non-empty");
        let best_score = scorer.score(selected, &prefs);
        for candidate in &candidates {
            assert!(scorer.score(candidate, &prefs) <= best_score);
        }
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let scorer = CandidateScorer::new();
        let prefs = all_on();
        let candidates = vec![
            make_candidate("First-1080p", "4GB"),
            make_candidate("Second-1080p", "4GB"),
        ];

        let selected = scorer.select_best(&candidates, &prefs).expect("non-empty");
        assert_eq!(selected.title, "First-1080p");
    }

    #[test]
    fn test_disabled_preference_zeroes_contribution() {
        let scorer = CandidateScorer::new();
        let candidate = make_candidate("X-2160p", "16GB");

        let prefs_off = Preferences {
            auto_select_best: true,
            prefer_high_def: false,
            prefer_localized_subs: false,
            prefer_uncut: false,
        };
        assert_eq!(scorer.score(&candidate, &prefs_off), 0);

        let prefs_on = Preferences {
            prefer_high_def: true,
            ..prefs_off
        };
        assert_eq!(scorer.score(&candidate, &prefs_on), 40);
    }

    #[test]
    fn test_unparseable_size_contributes_zero() {
        let scorer = CandidateScorer::new();
        let prefs = all_on();

        let sized = make_candidate("A-1080p", "4GB");
        let r#unsized = Candidate::from_label("A-1080p", Some("???".to_string()));

        assert_eq!(
            scorer.score(&sized, &prefs) - scorer.score(&r#unsized, &prefs),
            20
        );
    }

    #[test]
    fn test_size_sweet_spot_beats_extremes() {
        let scorer = CandidateScorer::new();
        let prefs = all_on();

        let small = make_candidate("A-1080p", "300MB");
        let sweet = make_candidate("B-1080p", "4GB");
        let huge = make_candidate("C-1080p", "40GB");

        assert!(scorer.score(&sweet, &prefs) > scorer.score(&small, &prefs));
        assert!(scorer.score(&sweet, &prefs) > scorer.score(&huge, &prefs));
    }

    #[test]
    fn test_flagged_high_def_without_marker_gets_basic_tier() {
        let scorer = CandidateScorer::new();
        let prefs = Preferences {
            auto_select_best: true,
            prefer_high_def: true,
            prefer_localized_subs: false,
            prefer_uncut: false,
        };

        let candidate = Candidate::new(
            "No-Marker-Release",
            None,
            crate::batch::models::CandidateFlags {
                high_def: true,
                ..Default::default()
            },
        );
        assert_eq!(scorer.score(&candidate, &prefs), 15);
    }
}
