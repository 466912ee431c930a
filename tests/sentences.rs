use abstract_skimmer::nlp::sentences::split_sentences;

#[test]
fn splits_simple_abstract() {
    let text = "Diabetes is common. We aimed to assess the new treatment. Results were positive.";
    let sentences = split_sentences(text);
    assert_eq!(sentences.len(), 3);
    assert_eq!(sentences[0], "Diabetes is common.");
    assert_eq!(sentences[2], "Results were positive.");
}

#[test]
fn question_and_exclamation_terminate_sentences() {
    let sentences = split_sentences("Does drug X work? The trial says yes! More data are needed.");
    assert_eq!(sentences.len(), 3);
}

#[test]
fn decimals_do_not_split() {
    let sentences = split_sentences("Mean dose was 2.5 mg per day. Follow-up lasted 3 years.");
    assert_eq!(sentences.len(), 2);
    assert!(sentences[0].contains("2.5 mg"));
}

#[test]
fn abbreviations_do_not_split() {
    let sentences = split_sentences("Comorbidities (e.g. Diabetes) were recorded. Smith et al. Reported similar rates.");
    assert_eq!(sentences.len(), 2);
    assert!(sentences[0].contains("e.g. Diabetes"));
    assert!(sentences[1].contains("et al. Reported"));
}

#[test]
fn lowercase_continuation_does_not_split() {
    let sentences = split_sentences("Samples were stored at approx. ambient temperature overnight.");
    assert_eq!(sentences.len(), 1);
}

#[test]
fn empty_and_whitespace_inputs_yield_nothing() {
    assert!(split_sentences("").is_empty());
    assert!(split_sentences("   \n\t  ").is_empty());
}

#[test]
fn trailing_text_without_terminator_is_kept() {
    let sentences = split_sentences("First sentence. second clause without capital");
    assert_eq!(sentences.len(), 1);
    let sentences = split_sentences("First sentence. Trailing fragment without period");
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[1], "Trailing fragment without period");
}
