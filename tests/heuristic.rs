use abstract_skimmer::nlp::{
    classifier::{HeuristicClassifier, SectionClassifier, SectionLabel},
    features,
};

fn classify(sentences: &[&str]) -> Vec<SectionLabel> {
    let sentences: Vec<String> = sentences.iter().map(|s| s.to_string()).collect();
    let lines = features::with_line_numbers(&sentences);
    HeuristicClassifier
        .classify(&lines)
        .expect("heuristic classification is infallible")
        .into_iter()
        .map(|p| p.label)
        .collect()
}

#[test]
fn cue_words_drive_labels() {
    let labels = classify(&[
        "Hypertension has been a leading cause of death worldwide.",
        "We aimed to determine whether the new drug lowers blood pressure.",
        "Participants were randomized to the drug or placebo.",
        "Blood pressure decreased significantly compared with placebo.",
        "In conclusion, these findings support wider use of the drug.",
    ]);
    assert_eq!(
        labels,
        vec![
            SectionLabel::Background,
            SectionLabel::Objective,
            SectionLabel::Methods,
            SectionLabel::Results,
            SectionLabel::Conclusions,
        ]
    );
}

#[test]
fn scores_are_normalized() {
    let sentences = vec!["We aimed to evaluate the intervention.".to_string()];
    let lines = features::with_line_numbers(&sentences);
    let predictions = HeuristicClassifier.classify(&lines).unwrap();
    assert_eq!(predictions.len(), 1);
    let score = predictions[0].score;
    assert!(score > 0.0 && score <= 1.0);
}

#[test]
fn single_line_abstract_is_classified() {
    let labels = classify(&["This study was performed to assess feasibility."]);
    assert_eq!(labels.len(), 1);
}
