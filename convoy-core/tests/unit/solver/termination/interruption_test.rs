use super::*;

#[test]
fn can_detect_termination_when_signal_is_set() {
    let signal = Arc::new(AtomicBool::new(false));
    let termination = Interruption::new(signal.clone());
    let search_ctx = SearchContext::default();

    assert!(!termination.is_termination(&search_ctx));
    assert_eq!(termination.estimate(&search_ctx), 0.);

    signal.store(true, Ordering::Relaxed);

    assert!(termination.is_termination(&search_ctx));
    assert_eq!(termination.estimate(&search_ctx), 1.);
}
