// ayatscope-core/tests/pipeline_tests.rs
use ayatscope_core::{
    analyze, run_analysis, AnalysisConfig, AnalysisError, Category, Corpus, StreamMode,
    SurahCatalog, TokenLevel, Verse,
};

fn two_verse_corpus() -> Corpus {
    Corpus::from_verses(vec![
        Verse::new(1, 1, "Dia Dia Dia"),
        Verse::new(1, 2, "Allah Maha Besar"),
    ])
}

#[test_log::test]
fn test_end_to_end_two_verses() {
    let corpus = two_verse_corpus();
    let analysis = analyze(&corpus, SurahCatalog::default_catalog(), &AnalysisConfig::default()).unwrap();

    assert_eq!(analysis.verse_stats.len(), 2);
    assert_eq!(analysis.verse_stats[0].entropy, 0.0);
    assert!((analysis.verse_stats[1].entropy - 3f64.log2()).abs() < 1e-12);

    assert_eq!(analysis.groups.len(), 1);
    let group = &analysis.groups[0];
    assert_eq!(group.group_id, 1);
    assert_eq!(group.name.as_deref(), Some("Al-Fatihah"));
    assert_eq!(group.category, Category::Makkiyah);
    assert!((group.mean_entropy - 3f64.log2() / 2.0).abs() < 1e-12);

    let dia = analysis.transitions.successors("dia");
    assert_eq!(dia.len(), 2);
    assert!((dia.get("dia").unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert!((dia.get("allah").unwrap() - 1.0 / 3.0).abs() < 1e-12);
    assert!(analysis.transitions.successors("besar").is_empty());
    assert_eq!(analysis.transitions.most_likely("dia"), Some(("dia", 2.0 / 3.0)));
}

#[test]
fn test_per_verse_stream_drops_boundary_transition() {
    let corpus = two_verse_corpus();
    let mut config = AnalysisConfig::default();
    config.transitions.stream_mode = StreamMode::PerVerse;

    let analysis = analyze(&corpus, SurahCatalog::default_catalog(), &config).unwrap();
    let dia = analysis.transitions.successors("dia");
    assert_eq!(dia.len(), 1);
    assert_eq!(dia.get("dia"), Some(1.0));
    assert_eq!(analysis.transitions.probability("dia", "allah"), 0.0);
    assert_eq!(analysis.transitions.transition_count(), 4);
}

#[test]
fn test_char_level_entropy_leaves_transitions_word_based() {
    let corpus = Corpus::from_verses(vec![Verse::new(1, 1, "ab ab")]);
    let config = AnalysisConfig {
        token_level: TokenLevel::Char,
        ..AnalysisConfig::default()
    };

    let analysis = analyze(&corpus, SurahCatalog::default_catalog(), &config).unwrap();
    assert_eq!(analysis.verse_stats[0].token_count, 4);
    assert!((analysis.verse_stats[0].entropy - 1.0).abs() < 1e-12);
    assert_eq!(analysis.transitions.vocabulary_size(), 1);
    assert_eq!(analysis.transitions.probability("ab", "ab"), 1.0);
}

#[test]
fn test_category_comparison_across_corpus() {
    // Surah 1 and 112 are Makkiyah, 2 and 110 are Madaniyah.
    let corpus = Corpus::from_verses(vec![
        Verse::new(1, 1, "a b"),
        Verse::new(1, 2, "a a"),
        Verse::new(112, 1, "a b c d"),
        Verse::new(2, 1, "a b c d"),
        Verse::new(2, 2, "a b c d e f g h"),
        Verse::new(110, 1, "a b"),
    ]);
    let report = run_analysis(&corpus, SurahCatalog::default_catalog(), &AnalysisConfig::default()).unwrap();

    let makkiyah = report.comparison.stat_for(Category::Makkiyah).unwrap();
    let madaniyah = report.comparison.stat_for(Category::Madaniyah).unwrap();
    assert_eq!(makkiyah.group_count, 2);
    assert_eq!(makkiyah.verse_count, 3);
    assert!((makkiyah.mean_entropy - 1.0).abs() < 1e-12);
    assert!((madaniyah.mean_entropy - 2.0).abs() < 1e-12);

    let test = report.comparison.t_test.unwrap();
    assert!(test.equal_variance);
    assert!(test.t_statistic < 0.0);
    assert!(test.p_value > 0.0 && test.p_value < 1.0);
    assert_eq!(report.groups.iter().map(|g| g.group_id).collect::<Vec<_>>(), vec![1, 2, 110, 112]);
}

#[test]
fn test_group_outside_catalog_is_reported() {
    let corpus = Corpus::from_verses(vec![Verse::new(200, 1, "kata")]);
    let err = run_analysis(&corpus, SurahCatalog::default_catalog(), &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownGroup(200)));
}

#[test]
fn test_report_serializes_to_json() {
    let report = run_analysis(&two_verse_corpus(), SurahCatalog::default_catalog(), &AnalysisConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["verse_count"], 2);
    assert_eq!(json["token_level"], "word");
    assert_eq!(json["stream_mode"], "continuous");
    assert_eq!(json["groups"][0]["category"], "makkiyah");
    assert_eq!(json["corpus_fingerprint"].as_str().unwrap().len(), 64);
}
