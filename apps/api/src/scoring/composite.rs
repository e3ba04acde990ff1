//! Composite "entrepreneurial" score built from uniqueness, variety and keyword signal,
//! each worth a third of a 0–100 total.
//!
//! The engine is immutable once built; every call receives its own batch and
//! returns fresh results, so an `Arc<CompositeScoreEngine>` can be shared freely.

use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;
use crate::scoring::config::ScoringConfig;
use crate::scoring::keywords::{keyword_fraction, KeywordMatcher};
use crate::scoring::project::ProjectBlock;
use crate::similarity::{safe_mean, uniqueness, weighted_pair_dissimilarity, StringSimilarity};
use crate::text::{StopWords, TextVectorizer};

/// Points available to each sub-score.
pub const SUB_SCORE_POINTS: f64 = 33.0;

/// Maximum distance between the sum of the sub-scores and `total × 0.99`:
/// three independent half-point roundings plus the total's own.
pub const ROUNDING_TOLERANCE: f64 = 2.0;

/// A candidate as supplied by the screening service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    /// Full resume text.
    #[serde(default)]
    pub text: String,
    /// One block per project: first line title, remaining lines description.
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
}

impl Candidate {
    /// Everything searched for keywords: resume, projects, skills, experience, education.
    pub fn full_text(&self) -> String {
        std::iter::once(self.text.as_str())
            .chain(self.projects.iter().map(String::as_str))
            .chain(self.skills.as_deref())
            .chain(self.experience.iter().map(String::as_str))
            .chain(self.education.iter().map(String::as_str))
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub uniqueness: u8,
    pub variety: u8,
    pub keywords: u8,
    pub total: u8,
}

impl ScoreBreakdown {
    /// Scales `[0, 1]` fractions into 0–33 sub-scores and a 0–100 total.
    pub fn from_fractions(uniqueness: f64, variety: f64, keywords: f64) -> Self {
        let u = unit(uniqueness);
        let v = unit(variety);
        let k = unit(keywords);
        Self {
            uniqueness: (u * SUB_SCORE_POINTS).round() as u8,
            variety: (v * SUB_SCORE_POINTS).round() as u8,
            keywords: (k * SUB_SCORE_POINTS).round() as u8,
            total: ((u + v + k) / 3.0 * 100.0).round() as u8,
        }
    }

    pub fn sub_score_sum(&self) -> u16 {
        self.uniqueness as u16 + self.variety as u16 + self.keywords as u16
    }

    /// Tooltip text shown next to the score badge.
    pub fn explain(&self) -> String {
        format!(
            "• Project Uniqueness: {}/33\n• Project Variety: {}/33\n• Keywords: {}/33",
            self.uniqueness, self.variety, self.keywords
        )
    }
}

fn unit(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub id: i64,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

/// Orders scores by total (highest first), then by candidate id.
pub fn rank(scores: &mut [CandidateScore]) {
    scores.sort_by(|a, b| {
        b.breakdown
            .total
            .cmp(&a.breakdown.total)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Parsed projects of a whole batch plus the flattened title list that every
/// uniqueness comparison runs against.
struct ProjectCorpus {
    blocks: Vec<Vec<ProjectBlock>>,
    titles: Vec<String>,
    offsets: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct CompositeScoreEngine {
    config: ScoringConfig,
    stopwords: StopWords,
    similarity: StringSimilarity,
    keywords: KeywordMatcher,
}

impl CompositeScoreEngine {
    /// Validates the configuration and compiles the keyword list.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        let stopwords = StopWords::new(&config.stopwords);
        let similarity = StringSimilarity::new(config.shared_token_threshold, stopwords.clone());
        let keywords = KeywordMatcher::new(&config.keywords)?;
        Ok(Self {
            config,
            stopwords,
            similarity,
            keywords,
        })
    }

    /// A vectorizer using the configured idf scheme.
    pub fn vectorizer(&self) -> TextVectorizer {
        TextVectorizer::new(self.config.idf_scheme)
    }

    /// Scores `corpus[candidate]` against the whole corpus of project lists.
    pub fn score(
        &self,
        candidate: usize,
        corpus: &[Vec<String>],
        resume_full_text: &str,
    ) -> Result<ScoreBreakdown, ScoringError> {
        if candidate >= corpus.len() {
            return Err(ScoringError::InvalidInput(format!(
                "candidate index {candidate} outside corpus of {}",
                corpus.len()
            )));
        }
        let parsed = self.parse_corpus(corpus.iter().map(Vec::as_slice));
        Ok(self.breakdown(&parsed, candidate, resume_full_text))
    }

    /// Scores every candidate of a batch against the batch, in input order.
    pub fn score_candidates(&self, candidates: &[Candidate]) -> Vec<CandidateScore> {
        let parsed = self.parse_corpus(candidates.iter().map(|c| c.projects.as_slice()));
        let scores: Vec<CandidateScore> = candidates
            .iter()
            .enumerate()
            .map(|(idx, c)| CandidateScore {
                id: c.id,
                breakdown: self.breakdown(&parsed, idx, &c.full_text()),
            })
            .collect();

        tracing::debug!(
            candidates = candidates.len(),
            titles = parsed.titles.len(),
            "scored candidate batch"
        );
        scores
    }

    fn parse_corpus<'a, I>(&self, corpus: I) -> ProjectCorpus
    where
        I: Iterator<Item = &'a [String]>,
    {
        let blocks: Vec<Vec<ProjectBlock>> = corpus
            .map(|projects| {
                projects
                    .iter()
                    .map(|p| ProjectBlock::parse(p, &self.stopwords, self.config.min_body_token_len))
                    .collect()
            })
            .collect();

        let mut offsets = Vec::with_capacity(blocks.len());
        let mut titles = Vec::new();
        for own in &blocks {
            offsets.push(titles.len());
            titles.extend(own.iter().map(|b| b.title.clone()));
        }

        ProjectCorpus {
            blocks,
            titles,
            offsets,
        }
    }

    fn breakdown(&self, corpus: &ProjectCorpus, candidate: usize, full_text: &str) -> ScoreBreakdown {
        let own = &corpus.blocks[candidate];
        let offset = corpus.offsets[candidate];
        let hits = self.keywords.count_hits(full_text);

        ScoreBreakdown::from_fractions(
            self.uniqueness_fraction(own, offset, &corpus.titles),
            self.variety_fraction(own),
            keyword_fraction(hits, self.config.keyword_alpha),
        )
    }

    /// Mean title uniqueness against every title in the batch; 0 without projects.
    fn uniqueness_fraction(&self, own: &[ProjectBlock], offset: usize, titles: &[String]) -> f64 {
        safe_mean(own.iter().enumerate().map(|(k, block)| {
            uniqueness(&block.title, titles, Some(offset + k), |a, b| {
                self.similarity.compare(a, b)
            })
        }))
    }

    /// Mean weighted dissimilarity over the candidate's own project pairs.
    /// With fewer than two projects there is nothing redundant, so variety is 1.
    fn variety_fraction(&self, own: &[ProjectBlock]) -> f64 {
        if own.len() < 2 {
            return 1.0;
        }
        let weights = self.config.part_weights.as_array();
        let mut pairs = Vec::with_capacity(own.len() * (own.len() - 1) / 2);
        for (i, a) in own.iter().enumerate() {
            for b in &own[i + 1..] {
                if let Some(d) = weighted_pair_dissimilarity(&a.parts(), &b.parts(), &weights, |x, y| {
                    self.similarity.compare(x, y)
                }) {
                    pairs.push(d);
                }
            }
        }
        safe_mean(pairs).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CompositeScoreEngine {
        CompositeScoreEngine::new(ScoringConfig::default()).unwrap()
    }

    fn candidate(id: i64, projects: &[&str], text: &str) -> Candidate {
        Candidate {
            id,
            text: text.to_string(),
            projects: projects.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    fn assert_bounded(b: &ScoreBreakdown) {
        assert!(b.uniqueness <= 33, "{b:?}");
        assert!(b.variety <= 33, "{b:?}");
        assert!(b.keywords <= 33, "{b:?}");
        assert!(b.total <= 100, "{b:?}");
        let drift = (b.sub_score_sum() as f64 - b.total as f64 * 0.99).abs();
        assert!(drift <= ROUNDING_TOLERANCE, "rounding drift {drift} for {b:?}");
    }

    #[test]
    fn test_zero_projects_scores_keywords_only() {
        let scores = engine().score_candidates(&[candidate(1, &[], "Founded a robotics club")]);
        let b = scores[0].breakdown;
        assert_eq!(b.uniqueness, 0);
        assert_eq!(b.variety, 33);
        // one hit: 1 − e^(−1/1.8) ≈ 0.426 → 14 points; total (0 + 1 + 0.426) / 3 → 48
        assert_eq!(b.keywords, 14);
        assert_eq!(b.total, 48);
    }

    #[test]
    fn test_single_project_variety_is_full() {
        let scores = engine().score_candidates(&[candidate(1, &["Weather App\nForecast dashboard"], "")]);
        assert_eq!(scores[0].breakdown.variety, 33);
    }

    #[test]
    fn test_lone_title_is_fully_unique() {
        let scores = engine().score_candidates(&[candidate(1, &["Weather App"], "")]);
        assert_eq!(scores[0].breakdown.uniqueness, 33);
    }

    #[test]
    fn test_duplicate_titles_across_candidates_are_not_unique() {
        let scores = engine().score_candidates(&[
            candidate(1, &["Weather App 2022"], ""),
            candidate(2, &["Weather App 2023"], ""),
        ]);
        assert_eq!(scores[0].breakdown.uniqueness, 0);
        assert_eq!(scores[1].breakdown.uniqueness, 0);
    }

    #[test]
    fn test_identical_own_projects_have_no_variety() {
        let project = "Todo List\nCRUD tasks with local storage";
        let scores = engine().score_candidates(&[candidate(1, &[project, project], "")]);
        assert_eq!(scores[0].breakdown.variety, 0);
    }

    #[test]
    fn test_distinct_projects_beat_similar_projects_on_variety() {
        let e = engine();
        let varied = candidate(
            1,
            &[
                "Compiler\nRecursive descent parser emitting bytecode",
                "Photo Booth\nRaspberry camera kiosk printing strips",
            ],
            "",
        );
        let similar = candidate(
            2,
            &[
                "Todo App\nTask tracking with reminders",
                "Todo App v2\nTask tracking with reminders and tags",
            ],
            "",
        );
        let scores = e.score_candidates(&[varied, similar]);
        assert!(scores[0].breakdown.variety > scores[1].breakdown.variety);
    }

    #[test]
    fn test_no_keywords_scores_zero_keyword_points() {
        let scores = engine().score_candidates(&[candidate(1, &[], "Backend engineer, Python")]);
        assert_eq!(scores[0].breakdown.keywords, 0);
    }

    #[test]
    fn test_keywords_found_outside_resume_text() {
        let mut c = candidate(1, &[], "");
        c.experience = vec!["Freelance web developer".to_string()];
        c.skills = Some("Ran ads on Meta".to_string());
        let scores = engine().score_candidates(&[c]);
        assert!(scores[0].breakdown.keywords > 0);
    }

    #[test]
    fn test_custom_keyword_list() {
        let config = ScoringConfig {
            keywords: vec!["open source".to_string()],
            ..Default::default()
        };
        let e = CompositeScoreEngine::new(config).unwrap();
        let with = e.score_candidates(&[candidate(1, &[], "Open source maintainer")]);
        let founder = e.score_candidates(&[candidate(2, &[], "Founder")]);
        assert!(with[0].breakdown.keywords > 0);
        assert_eq!(founder[0].breakdown.keywords, 0);
    }

    #[test]
    fn test_score_by_corpus_index_matches_batch() {
        let e = engine();
        let candidates = vec![
            candidate(1, &["Chess Engine\nbitboards", "Budget Tracker\nplaid sync"], "Founder"),
            candidate(2, &["Chess Engine\nminimax"], ""),
        ];
        let corpus: Vec<Vec<String>> = candidates.iter().map(|c| c.projects.clone()).collect();
        let single = e.score(0, &corpus, &candidates[0].full_text()).unwrap();
        let batch = e.score_candidates(&candidates);
        assert_eq!(single, batch[0].breakdown);
    }

    #[test]
    fn test_score_rejects_out_of_range_candidate() {
        let err = engine().score(2, &[vec![], vec![]], "").unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput(_)));
    }

    #[test]
    fn test_scores_are_bounded_and_within_rounding_tolerance() {
        let e = engine();
        let candidates = vec![
            candidate(1, &[], ""),
            candidate(2, &["Weather App\nforecast"], "Founder, freelance, launched, mentored"),
            candidate(
                3,
                &[
                    "Chess Engine\nbitboard search",
                    "Weather App\nforecast widgets",
                    "Budget Tracker\nbank sync",
                ],
                "Consultant. Started a club.",
            ),
            candidate(4, &["Weather App\nforecast", "Weather App\nforecast"], "Owner™"),
        ];
        for score in e.score_candidates(&candidates) {
            assert_bounded(&score.breakdown);
        }
    }

    #[test]
    fn test_from_fractions_rounding_examples() {
        for (u, v, k) in [(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (0.5, 0.5, 0.5), (0.015, 0.985, 0.5), (0.33, 0.66, 0.99)] {
            assert_bounded(&ScoreBreakdown::from_fractions(u, v, k));
        }
        let full = ScoreBreakdown::from_fractions(1.0, 1.0, 1.0);
        assert_eq!((full.uniqueness, full.variety, full.keywords, full.total), (33, 33, 33, 100));
    }

    #[test]
    fn test_from_fractions_clamps_and_zeroes_non_finite() {
        let b = ScoreBreakdown::from_fractions(1.7, -0.2, f64::NAN);
        assert_eq!((b.uniqueness, b.variety, b.keywords), (33, 0, 0));
        assert_eq!(b.total, 33);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let e = engine();
        let candidates = vec![
            candidate(1, &["Chess Engine\nbitboards", "Weather App\nforecast"], "Founder"),
            candidate(2, &["Weather App\nradar maps"], "Freelance"),
        ];
        assert_eq!(e.score_candidates(&candidates), e.score_candidates(&candidates));
    }

    #[test]
    fn test_rank_orders_by_total_then_id() {
        let mk = |id, total| CandidateScore {
            id,
            breakdown: ScoreBreakdown {
                uniqueness: 0,
                variety: 0,
                keywords: 0,
                total,
            },
        };
        let mut scores = vec![mk(3, 40), mk(1, 70), mk(2, 40)];
        rank(&mut scores);
        let ids: Vec<i64> = scores.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_explain_lists_each_sub_score() {
        let b = ScoreBreakdown {
            uniqueness: 20,
            variety: 31,
            keywords: 9,
            total: 61,
        };
        assert_eq!(
            b.explain(),
            "• Project Uniqueness: 20/33\n• Project Variety: 31/33\n• Keywords: 9/33"
        );
    }

    #[test]
    fn test_full_text_joins_all_sections() {
        let c = Candidate {
            id: 7,
            text: "resume".to_string(),
            projects: vec!["project".to_string()],
            skills: Some("skills".to_string()),
            experience: vec!["experience".to_string(), " ".to_string()],
            education: vec!["education".to_string()],
        };
        assert_eq!(c.full_text(), "resume\nproject\nskills\nexperience\neducation");
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let config = ScoringConfig {
            keyword_alpha: 0.0,
            ..Default::default()
        };
        assert!(CompositeScoreEngine::new(config).is_err());
    }
}
