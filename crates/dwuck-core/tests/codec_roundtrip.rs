use dwuck_core::cards::{CardDocument, CardEncoder};
use dwuck_core::domain::{BoundClass, StateInput};
use dwuck_core::scanner::SeriesScanner;

fn state(excitation_kev: f64, q_value_mev: f64, binding_energy_mev: f64) -> StateInput {
    StateInput {
        excitation_kev,
        orbital: "0f7/2".to_string(),
        l_transfer: 3,
        j2_transfer: 7,
        nodes: 0,
        q_value_mev,
        binding_energy_mev,
        exit_energy_mev: 9.438 - excitation_kev / 1000.0,
    }
}

/// The engine echoes each title card before its cross-section table; the
/// decoder reads that echo, not the deck itself.
fn synthesize_engine_report(document: &CardDocument) -> String {
    let mut text = String::new();
    for block in &document.blocks {
        text.push_str(&block.lines[0]);
        text.push('\n');
        text.push_str("0  page banner for the next case\n");
        text.push_str("    Theta      Inelsig    d(sig)\n");
        text.push_str("     (deg)     (mb/sr)\n");
        for step in 1..=3 {
            text.push_str(&format!("   {:2}.00    {:.3}E-01   0.0\n", step * 10, step as f64));
        }
        text.push_str("0 Tot-sig =  1.000E+00\n");
    }
    text
}

fn classify_label(label: &str) -> BoundClass {
    let trimmed = label.trim_end();
    if trimmed.ends_with("unbound ZR") {
        BoundClass::Unbound
    } else {
        assert!(trimmed.ends_with("bound ZR"), "label was '{label}'");
        BoundClass::Bound
    }
}

#[test]
fn decoded_classification_matches_the_binding_energy_sign() {
    let states = [
        state(0.0, 2.079, -4.304),
        state(4304.0, -2.225, 0.0),
        state(5000.0, -2.921, 0.696),
        state(1000.0, 1.079, -3.304),
    ];
    let report = CardEncoder::standard()
        .encode(&states)
        .expect("batch encodes");
    assert_eq!(report.encoded_count(), states.len());

    let engine_output = synthesize_engine_report(&report.document);
    let scan = SeriesScanner::standard()
        .scan(&engine_output)
        .expect("synthesized report decodes");

    assert_eq!(scan.collection.len(), states.len());
    for (state, series) in states.iter().zip(scan.collection.iter()) {
        assert_eq!(
            classify_label(&series.label),
            BoundClass::from_binding_energy(state.binding_energy_mev),
            "classification drifted for Ex = {} keV",
            state.excitation_kev
        );
        assert_eq!(series.excitation_kev, Some(state.excitation_kev));
        assert_eq!(series.len(), 3);
    }
}

#[test]
fn threshold_state_round_trips_as_unbound() {
    let threshold = state(4304.0, -2.225, 0.0);
    let report = CardEncoder::standard()
        .encode(std::slice::from_ref(&threshold))
        .expect("threshold state encodes");

    let engine_output = synthesize_engine_report(&report.document);
    let scan = SeriesScanner::standard()
        .scan(&engine_output)
        .expect("report decodes");
    let series = scan.collection.iter().next().expect("one series");
    assert_eq!(classify_label(&series.label), BoundClass::Unbound);
}

#[test]
fn re_decoding_the_same_report_yields_identical_collections() {
    let states = [state(0.0, 2.079, -4.304), state(1000.0, 1.079, -3.304)];
    let report = CardEncoder::standard()
        .encode(&states)
        .expect("batch encodes");
    let engine_output = synthesize_engine_report(&report.document);

    let scanner = SeriesScanner::standard();
    let first = scanner.scan(&engine_output).expect("first decode");
    let second = scanner.scan(&engine_output).expect("second decode");

    assert_eq!(first.collection, second.collection);
    assert_eq!(
        first.collection.labels(),
        second.collection.labels()
    );
}
